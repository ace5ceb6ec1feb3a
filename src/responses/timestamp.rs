//! Lenient timestamp decoding
//!
//! The API mixes `2026-10-20T06:30:00`, fractional seconds and
//! `+0000`/`Z` suffixes. The wall-clock part is kept as written.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_variants() {
        for raw in [
            "2026-10-20T06:30:00",
            "2026-10-20T06:30:00.000",
            "2026-10-20T06:30:00.000+0000",
            "2026-10-20T06:30:00Z",
            "2026-10-20T06:30:00+02:00",
        ] {
            let parsed = parse(raw).unwrap_or_else(|| panic!("failed to parse {}", raw));
            assert_eq!((parsed.hour(), parsed.minute()), (6, 30));
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("20 oct").is_none());
    }
}
