// This file makes the screen modules available to the rest of the application.

pub mod detail;
pub mod home;
pub mod search;
