//! Help text for interactive commands

use super::COMMAND_NAMES;

/// Returns the command listing printed by `help`
pub fn get_help_text() -> String {
    let mut text = String::from("Commands:");
    for name in COMMAND_NAMES {
        text.push_str("\n\t");
        text.push_str(name);
    }
    text
}

/// One-line reminder of the search syntax shown before each prompt
pub fn query_syntax() -> &'static str {
    "Syntax: Origin-Destination outDate [inDate]"
}
