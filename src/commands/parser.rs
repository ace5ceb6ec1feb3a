//! Command parsing functionality

use super::Command;

/// Parse user input into a Command. Returns None when the first word is not a command.
pub fn parse_command(input: &str) -> Option<Command> {
    let mut parts = input.split_whitespace();
    let cmd = parts.next()?.to_lowercase();

    let command = match cmd.as_str() {
        "login" => Command::Login,
        // A page argument that is not a number falls back to the first page
        "history" => Command::History(
            parts
                .next()
                .map(|page| page.parse::<u32>().ok().filter(|&n| n > 0).unwrap_or(1)),
        ),
        "logout" => Command::Logout,
        "points" => Command::Points,
        "set" => Command::Set,
        "help" => Command::Help,
        "benchmark" => Command::Benchmark,
        "options" => Command::Options,
        _ => return None,
    };

    Some(command)
}
