//! Flight search result display

use crate::config::Options;
use crate::responses::{FareProduct, FlightRecord};

use super::table::{TableStyle, TextTable};

const TIME_FORMAT: &str = "%H:%M";

/// Collapse a list whose elements are all equal to its single shared value
pub fn simplify<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    match items.split_first() {
        Some((first, rest)) if rest.iter().all(|item| item == first) => vec![first.clone()],
        _ => items.to_vec(),
    }
}

/// Build the result table for one leg. Returns None when there are no flights.
pub fn flight_table(
    flights: &[FlightRecord],
    products: &[FareProduct],
    options: &Options,
) -> Option<TextTable> {
    let first = flights.first()?;

    let mut codes: Vec<&str> = Vec::new();
    for product in products {
        if !codes.contains(&product.product_code.as_str()) {
            codes.push(&product.product_code);
        }
    }

    let mut table = TextTable::new();
    let mut header = vec![first.origin.code.clone(), first.destination.code.clone()];
    if options.output_equipment {
        header.push("Equip".to_string());
    }
    for code in &codes {
        header.push(code.to_string());
        if options.output_booking_class {
            header.push(String::new());
        }
    }
    table.add_row(header);

    for flight in flights {
        let mut values = Vec::new();
        let rollover = flight.day_rollover();
        values.push(flight.start_time_in_local.format(TIME_FORMAT).to_string());
        values.push(format!(
            "{}{}",
            flight.end_time_in_local.format(TIME_FORMAT),
            if rollover > 0 {
                format!("+{}", rollover)
            } else {
                String::new()
            }
        ));

        if options.output_equipment {
            values.push(simplify(&flight.equipment_codes()).join("/"));
        }

        let offered: Vec<&FareProduct> = products
            .iter()
            .filter(|product| product.belongs_to(&flight.id))
            .collect();

        for code in &codes {
            let (price, classes) = match single_match(&offered, code) {
                Some(product) => (
                    product.price.formatted_total_price.clone(),
                    simplify(&product.class_codes()).join("/"),
                ),
                None => (String::new(), String::new()),
            };
            values.push(price);
            if options.output_booking_class {
                values.push(classes);
            }
        }

        table.add_row(values);
    }

    Some(table)
}

/// Render one leg with the style chosen in the options
pub fn format_flights(
    flights: &[FlightRecord],
    products: &[FareProduct],
    options: &Options,
) -> Option<String> {
    flight_table(flights, products, options)
        .map(|table| table.render(TableStyle::from_bordered(options.table)))
}

/// The product with this code, unless there is none or more than one
fn single_match<'a>(offered: &[&'a FareProduct], code: &str) -> Option<&'a FareProduct> {
    let mut matches = offered
        .iter()
        .copied()
        .filter(|product| product.product_code == code);
    match (matches.next(), matches.next()) {
        (Some(product), None) => Some(product),
        _ => None,
    }
}
