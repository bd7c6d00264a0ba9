pub mod app_command;
pub mod field_args;

pub use app_command::{AppCommand, EntityTarget, HELP_TEXT};
pub use field_args::parse_field_args;
