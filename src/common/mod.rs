pub mod list_utils;
pub mod logging_setup;
