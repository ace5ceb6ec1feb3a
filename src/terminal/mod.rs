//! Terminal module for the flysas client
//!
//! This module handles the interactive loop, command handlers and all
//! result display.

pub mod benchmark;
mod dispatch;
pub mod flights;
pub mod progress;
pub mod session;
pub mod table;

// Re-export commonly used items
pub use session::Terminal;
