//! SAS API response module
//!
//! Wire types for flight search and EuroBonus history responses.

pub mod history;
pub mod search;
mod timestamp;

// Re-export main types
pub use history::{HistoryResult, Transaction};
pub use search::{FareProduct, FlightRecord, SearchResult};

use serde::Deserialize;

/// Application-level error reported inside an otherwise successful response
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderError {
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub error_message: String,
}

/// First provider error of a response, if any
pub fn first_error(errors: &Option<Vec<ProviderError>>) -> Option<&ProviderError> {
    errors.as_ref().and_then(|errors| errors.first())
}
