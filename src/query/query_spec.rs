//! Parsed flight search query

use chrono::NaiveDate;

/// One route search: origin, destination and travel dates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub from: String,
    pub to: String,
    pub out_date: NaiveDate,
    pub in_date: Option<NaiveDate>,
}

impl QuerySpec {
    pub fn one_way(from: &str, to: &str, out_date: NaiveDate) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            out_date,
            in_date: None,
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.in_date.is_some()
    }
}

impl std::fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} {}", self.from, self.to, self.out_date)?;
        if let Some(in_date) = self.in_date {
            write!(f, " {}", in_date)?;
        }
        Ok(())
    }
}
