//! Decoder for pre-relational flight/hotel JSON columns
//!
//! Older rows kept flights and hotels as JSON text on the itinerary row.
//! These are read only when the relational collection is empty, and any
//! blob that does not decode is treated as absent.

use serde_json::Value;

use crate::domain::{Flight, FlightType, HotelStay};

/// Decode a legacy flight blob.
///
/// Accepts either an array of typed flights or an object keyed by
/// `departure` / `return`.
pub fn decode_flights(raw: Option<&str>) -> Vec<Flight> {
    let Some(value) = parse(raw, "legacy_flight_info") else {
        return Vec::new();
    };

    match value {
        Value::Array(_) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring undecodable legacy flight list");
            Vec::new()
        }),
        Value::Object(mut map) => [FlightType::Departure, FlightType::Return]
            .into_iter()
            .filter_map(|flight_type| {
                let mut entry = map.remove(flight_type.as_str())?;
                entry
                    .as_object_mut()?
                    .insert("type".to_string(), Value::from(flight_type.as_str()));
                serde_json::from_value(entry).ok()
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Decode a legacy hotel blob (an array of stays).
pub fn decode_hotel_stays(raw: Option<&str>) -> Vec<HotelStay> {
    parse(raw, "legacy_hotel_info")
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

fn parse(raw: Option<&str>, column: &'static str) -> Option<Value> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(column, error = %e, "Ignoring malformed legacy JSON");
            None
        }
    }
}
