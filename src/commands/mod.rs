//! Interactive commands module
//!
//! This module defines the command vocabulary and parsing functionality.

pub mod command;
pub mod help;
pub mod parser;

// Re-export the main types for easier importing
pub use command::{COMMAND_NAMES, Command};
pub use help::{get_help_text, query_syntax};
pub use parser::parse_command;
