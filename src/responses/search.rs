//! Flight search response types

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use super::{ProviderError, timestamp};

/// Response of the flight products endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub outbound_flights: Vec<FlightRecord>,
    #[serde(default)]
    pub outbound_flight_products: Vec<FareProduct>,
    #[serde(default)]
    pub inbound_flights: Vec<FlightRecord>,
    #[serde(default)]
    pub inbound_flight_products: Vec<FareProduct>,
    pub errors: Option<Vec<ProviderError>>,
}

/// One bookable flight, possibly made of several segments
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub origin: Airport,
    pub destination: Airport,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start_time_in_local: NaiveDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start_time_in_gmt: NaiveDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub end_time_in_local: NaiveDateTime,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl FlightRecord {
    /// Aircraft codes in segment order
    pub fn equipment_codes(&self) -> Vec<&str> {
        self.segments
            .iter()
            .map(|segment| segment.air_craft.code.as_str())
            .collect()
    }

    /// Whole days between the GMT departure date and the local arrival date
    pub fn day_rollover(&self) -> i64 {
        (self.end_time_in_local.date() - self.start_time_in_gmt.date()).num_days()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Airport {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub air_craft: Aircraft,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aircraft {
    pub code: String,
}

/// A priced fare tier offered on one flight
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareProduct {
    /// Ends with `_<flight id>`
    pub id: String,
    pub product_code: String,
    pub price: Price,
    #[serde(default)]
    pub fares: Vec<Fare>,
}

impl FareProduct {
    /// Whether this product is offered on the given flight
    pub fn belongs_to(&self, flight_id: &str) -> bool {
        self.id
            .strip_suffix(flight_id)
            .is_some_and(|rest| rest.ends_with('_'))
    }

    /// Booking class with available seats per segment, e.g. `["K9", "K9"]`
    pub fn class_codes(&self) -> Vec<String> {
        self.fares
            .iter()
            .map(|fare| format!("{}{}", fare.booking_class, fare.avl_seats))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub formatted_total_price: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub booking_class: String,
    #[serde(default)]
    pub avl_seats: u32,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "outboundFlights": [{
            "id": 1,
            "origin": {"code": "KLR"},
            "destination": {"code": "ARN"},
            "startTimeInLocal": "2026-10-20T23:50:00",
            "startTimeInGmt": "2026-10-20T21:50:00.000+0000",
            "endTimeInLocal": "2026-10-21T01:10:00",
            "endTimeInGmt": "2026-10-20T23:10:00.000+0000",
            "segments": [{"airCraft": {"code": "AT7"}}, {"airCraft": {"code": "32N"}}]
        }],
        "outboundFlightProducts": [{
            "id": "GO_LIGHT_1",
            "productCode": "GO_LIGHT",
            "price": {"formattedTotalPrice": "1 290"},
            "fares": [{"bookingClass": "K", "avlSeats": 9}, {"bookingClass": "K", "avlSeats": 4}]
        }]
    }"#;

    #[test]
    fn test_decode_search_result() {
        let result: SearchResult = serde_json::from_str(SAMPLE).unwrap();
        assert!(result.errors.is_none());
        assert!(result.inbound_flights.is_empty());

        let flight = &result.outbound_flights[0];
        assert_eq!(flight.id, "1");
        assert_eq!(flight.origin.code, "KLR");
        assert_eq!(flight.equipment_codes(), vec!["AT7", "32N"]);
        assert_eq!(flight.day_rollover(), 1);

        let product = &result.outbound_flight_products[0];
        assert!(product.belongs_to(&flight.id));
        assert_eq!(product.class_codes(), vec!["K9", "K4"]);
    }

    #[test]
    fn test_decode_provider_errors() {
        let result: SearchResult = serde_json::from_str(
            r#"{"errors": [{"errorCode": "225036", "errorMessage": "No flights found"}]}"#,
        )
        .unwrap();
        let error = crate::responses::first_error(&result.errors).unwrap();
        assert_eq!(error.error_message, "No flights found");
    }

    #[test]
    fn test_belongs_to_requires_exact_suffix() {
        let product = FareProduct {
            id: "SAS_PLUS_12".to_string(),
            product_code: "SAS_PLUS".to_string(),
            price: Price {
                formatted_total_price: "2 400".to_string(),
            },
            fares: Vec::new(),
        };
        assert!(product.belongs_to("12"));
        assert!(!product.belongs_to("2"));
        assert!(!product.belongs_to("1"));
    }
}
