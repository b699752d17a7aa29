pub mod use_landing_poll;
