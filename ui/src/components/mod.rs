//! Shared components used by the screens.
pub mod action_link;
pub mod empty_state;
pub mod header;
pub mod identifier;
pub mod pico;
pub mod polled_value;
