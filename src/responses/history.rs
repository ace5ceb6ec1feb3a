//! EuroBonus account and transaction history response types

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::{ProviderError, timestamp};

/// Response of the account info endpoint for one history page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResult {
    pub eurobonus: Option<EuroBonus>,
    pub errors: Option<Vec<ProviderError>>,
}

impl HistoryResult {
    /// Transactions on this page, empty when the response carried errors
    pub fn transactions(&self) -> &[Transaction] {
        if self.errors.as_ref().is_some_and(|errors| !errors.is_empty()) {
            return &[];
        }
        self.eurobonus
            .as_ref()
            .and_then(|eb| eb.transaction_history.transaction.as_deref())
            .unwrap_or(&[])
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.eurobonus
            .as_ref()
            .map(|eb| eb.transaction_history.total_number_of_pages)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EuroBonus {
    #[serde(default)]
    pub current_tier_code: String,
    #[serde(default)]
    pub total_points_for_use: i64,
    #[serde(default)]
    pub points_available: i64,
    #[serde(default)]
    pub transaction_history: TransactionHistory,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistory {
    pub transaction: Option<Vec<Transaction>>,
    #[serde(default)]
    pub total_number_of_pages: u32,
}

/// One EuroBonus points transaction
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_performed: NaiveDateTime,
    pub type_of_transaction: String,
    #[serde(default)]
    pub basic_points_after_transaction: String,
    #[serde(default)]
    pub available_points_after_transaction: i64,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Display cells for the history table
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date_performed.format("%Y-%m-%d").to_string(),
            self.type_of_transaction.clone(),
            self.basic_points_after_transaction.clone(),
            self.available_points_after_transaction.to_string(),
            self.description.clone(),
        ]
    }
}
