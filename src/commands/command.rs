//! Interactive command definitions

/// Commands recognised by the interactive session
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// LOGIN - Authenticate with the configured EuroBonus credentials
    Login,

    /// HISTORY [page] - Show transaction history, all pages or a single one
    History(Option<u32>),

    /// LOGOUT - Drop the current session
    Logout,

    /// POINTS - Show tier status and point balances
    Points,

    /// SET - Change an option (only reached when the directive was malformed)
    Set,

    /// HELP - List available commands
    Help,

    /// BENCHMARK - Run a batch of concurrent searches
    Benchmark,

    /// OPTIONS - Show current options
    Options,
}

/// Every command word, in the order `help` lists them
pub const COMMAND_NAMES: [&str; 8] = [
    "login",
    "history",
    "logout",
    "points",
    "set",
    "help",
    "benchmark",
    "options",
];

impl Command {
    /// Check if command needs an authenticated session
    pub fn requires_login(&self) -> bool {
        matches!(self, Command::History(_) | Command::Points)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Login => "login",
            Command::History(_) => "history",
            Command::Logout => "logout",
            Command::Points => "points",
            Command::Set => "set",
            Command::Help => "help",
            Command::Benchmark => "benchmark",
            Command::Options => "options",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::History(Some(page)) => write!(f, "history {page}"),
            cmd => write!(f, "{}", cmd.name()),
        }
    }
}
