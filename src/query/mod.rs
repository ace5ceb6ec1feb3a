//! Search query module
//!
//! This module defines the route/date query type and the shorthand parser.

pub mod parser;
pub mod query_spec;

// Re-export the main types for easier importing
pub use parser::QueryParser;
pub use query_spec::QuerySpec;
