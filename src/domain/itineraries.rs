//! Itinerary domain types
//!
//! A trip record with its flights, hotel stays and day-by-day activities.
//! Flights, hotel stays and days have no stable identity across saves: every
//! save replaces them wholesale, so only the itinerary itself carries an id.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Itinerary lifecycle status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItineraryStatus {
    #[default]
    Draft,
    Upcoming,
    Active,
    Completed,
    Disrupted,
}

impl ItineraryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Disrupted => "disrupted",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "upcoming" => Some(Self::Upcoming),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "disrupted" => Some(Self::Disrupted),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItineraryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-activity progress marker
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Completed,
    Current,
    #[default]
    Upcoming,
    Issue,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Current => "current",
            Self::Upcoming => "upcoming",
            Self::Issue => "issue",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "current" => Self::Current,
            "issue" => Self::Issue,
            _ => Self::Upcoming,
        }
    }
}

/// Flight direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlightType {
    Departure,
    Return,
}

impl FlightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Departure => "departure",
            Self::Return => "return",
        }
    }

    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "departure" => Some(Self::Departure),
            "return" => Some(Self::Return),
            _ => None,
        }
    }
}

/// Booked flight (or train/coach leg)
///
/// `airport` is the station relevant to the trip: the arrival airport for a
/// departure flight, the departure airport for a return flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    #[serde(rename = "type")]
    pub flight_type: FlightType,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub carrier: String,
    #[serde(default)]
    pub flight_number: String,
    #[serde(default)]
    pub departure_time: String,
    #[serde(default)]
    pub arrival_time: String,
    #[serde(default)]
    pub airport: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl Flight {
    /// Carrier and number as a single label, if either is present.
    pub fn label(&self) -> Option<String> {
        let label = format!("{} {}", self.carrier.trim(), self.flight_number.trim());
        let label = label.trim();
        (!label.is_empty()).then(|| label.to_string())
    }
}

/// Hotel stay, active on `check_in <= day < check_out`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotelStay {
    #[serde(default)]
    pub name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl HotelStay {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

/// First hotel stay whose range contains `date`.
pub fn active_hotel(stays: &[HotelStay], date: NaiveDate) -> Option<&HotelStay> {
    stays.iter().find(|stay| stay.covers(date))
}

/// First flight of the given direction.
pub fn find_flight(flights: &[Flight], flight_type: FlightType) -> Option<&Flight> {
    flights.iter().find(|f| f.flight_type == flight_type)
}

/// Activity as entered by the user; it carries no order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivityDraft {
    #[serde(default, deserialize_with = "lenient_time")]
    pub time: String,
    #[serde(default)]
    pub duration: Option<Decimal>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ActivityStatus,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Persisted activity with its computed display order (1-based).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub time: String,
    pub duration: Option<Decimal>,
    pub title: String,
    pub location: String,
    pub notes: Option<String>,
    pub status: ActivityStatus,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub order: i32,
}

impl Activity {
    pub fn from_draft(draft: ActivityDraft, order: i32) -> Self {
        Self {
            time: draft.time,
            duration: draft.duration,
            title: draft.title,
            location: draft.location,
            notes: draft.notes,
            status: draft.status,
            lat: draft.lat,
            lng: draft.lng,
            order,
        }
    }
}

/// Incoming day group
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayDraft {
    #[serde(default)]
    pub day_number: Option<i32>,
    #[serde(default)]
    pub activities: Vec<ActivityDraft>,
}

/// Persisted day with ordered activities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Day {
    pub day_number: i32,
    pub activities: Vec<Activity>,
}

/// Optional client/trip details
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItineraryDetails {
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub headcount: Option<i32>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub origin_code: Option<String>,
    #[serde(default)]
    pub destination_code: Option<String>,
    #[serde(default)]
    pub total_days: Option<i32>,
}

impl ItineraryDetails {
    /// Overwrite every field the patch carries.
    pub fn apply(&mut self, patch: ItineraryDetails) {
        if patch.age.is_some() {
            self.age = patch.age;
        }
        if patch.headcount.is_some() {
            self.headcount = patch.headcount;
        }
        if patch.contact.is_some() {
            self.contact = patch.contact;
        }
        if patch.origin_code.is_some() {
            self.origin_code = patch.origin_code;
        }
        if patch.destination_code.is_some() {
            self.destination_code = patch.destination_code;
        }
        if patch.total_days.is_some() {
            self.total_days = patch.total_days;
        }
    }
}

/// Itinerary entity (canonical snapshot)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    pub id: Uuid,
    pub client_name: String,
    pub destination: String,
    pub status: ItineraryStatus,
    pub date_range: String,
    #[serde(flatten)]
    pub details: ItineraryDetails,
    pub flights: Vec<Flight>,
    pub hotel_stays: Vec<HotelStay>,
    pub days: Vec<Day>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Itinerary {
    pub fn flight(&self, flight_type: FlightType) -> Option<&Flight> {
        find_flight(&self.flights, flight_type)
    }

    pub fn departure_date(&self) -> Option<NaiveDate> {
        self.flight(FlightType::Departure).and_then(|f| f.date)
    }
}

/// Calendar date of a 1-based day, anchored on the departure date.
///
/// `None` when the date falls outside chrono's calendar range.
pub fn day_date(departure_date: NaiveDate, day_number: i32) -> Option<NaiveDate> {
    departure_date.checked_add_signed(Duration::days(i64::from(day_number.max(1) - 1)))
}

/// Header fields written alongside a tree replacement
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryHeader {
    pub client_name: String,
    pub destination: String,
    pub status: ItineraryStatus,
    pub date_range: String,
    pub details: ItineraryDetails,
}

/// Collections to replace in one save; `None` leaves the stored set untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeReplacement {
    pub flights: Option<Vec<Flight>>,
    pub hotel_stays: Option<Vec<HotelStay>>,
    pub days: Option<Vec<Day>>,
}

/// Request DTO for creating an itinerary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItineraryRequest {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub status: Option<ItineraryStatus>,
    #[serde(default)]
    pub date_range: String,
    #[serde(flatten)]
    pub details: ItineraryDetails,
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub hotel_stays: Vec<HotelStay>,
    #[serde(default)]
    pub days: Vec<DayDraft>,
}

/// Request DTO for updating an itinerary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItineraryRequest {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub status: Option<ItineraryStatus>,
    #[serde(default)]
    pub date_range: Option<String>,
    #[serde(flatten)]
    pub details: ItineraryDetails,
    #[serde(default)]
    pub flights: Option<Vec<Flight>>,
    #[serde(default)]
    pub hotel_stays: Option<Vec<HotelStay>>,
    #[serde(default)]
    pub days: Option<Vec<DayDraft>>,
    #[serde(default)]
    pub expected_version: Option<i32>,
}

/// List result: snapshots plus ids whose promotion is not yet written
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryListing {
    pub data: Vec<Itinerary>,
    pub pending_promotions: Vec<Uuid>,
}

/// Request DTO for the auto-schedule helper
#[derive(Debug, Clone, Deserialize)]
pub struct AutoScheduleRequest {
    #[serde(default)]
    pub flights: Vec<Flight>,
    #[serde(default)]
    pub hotel_stays: Vec<HotelStay>,
    #[serde(default)]
    pub days: Vec<DayDraft>,
}

/// Request DTO for applying pending promotions
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyPromotionsRequest {
    pub ids: Vec<Uuid>,
}

// Non-string times (numbers, null, objects) collapse to the unscheduled value.
fn lenient_time<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn activity_time_accepts_non_strings() {
        let draft: ActivityDraft =
            serde_json::from_value(json!({ "time": 930, "title": "Museum" })).unwrap();
        assert_eq!(draft.time, "");
        assert_eq!(draft.status, ActivityStatus::Upcoming);

        let draft: ActivityDraft = serde_json::from_value(json!({ "time": null })).unwrap();
        assert_eq!(draft.time, "");

        let draft: ActivityDraft = serde_json::from_value(json!({ "time": "9:30" })).unwrap();
        assert_eq!(draft.time, "9:30");
    }

    #[test]
    fn caller_supplied_order_is_ignored() {
        let day: DayDraft = serde_json::from_value(json!({
            "day_number": 1,
            "activities": [{ "time": "10:00", "title": "Walk", "order": 7 }]
        }))
        .unwrap();
        assert_eq!(day.activities.len(), 1);
        assert_eq!(day.activities[0].title, "Walk");
    }

    #[test]
    fn duration_accepts_fractional_hours() {
        let draft: ActivityDraft =
            serde_json::from_value(json!({ "duration": "1.5" })).unwrap();
        assert_eq!(draft.duration, Some(Decimal::new(15, 1)));
    }

    #[test]
    fn hotel_range_is_half_open() {
        let stay = HotelStay {
            name: "Harbour Inn".into(),
            check_in: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
            notes: String::new(),
            lat: None,
            lng: None,
        };
        assert!(stay.covers(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()));
        assert!(stay.covers(NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()));
        assert!(!stay.covers(NaiveDate::from_ymd_opt(2026, 5, 3).unwrap()));
    }

    #[test]
    fn flight_label_skips_blank_parts() {
        let flight = Flight {
            flight_type: FlightType::Departure,
            date: None,
            carrier: "KLM".into(),
            flight_number: String::new(),
            departure_time: String::new(),
            arrival_time: String::new(),
            airport: String::new(),
            lat: None,
            lng: None,
        };
        assert_eq!(flight.label().as_deref(), Some("KLM"));
    }

    #[test]
    fn day_dates_follow_the_departure_date() {
        let start = NaiveDate::from_ymd_opt(2026, 12, 30).unwrap();
        assert_eq!(day_date(start, 1), Some(start));
        assert_eq!(day_date(start, 3), NaiveDate::from_ymd_opt(2027, 1, 1));
        assert_eq!(day_date(start, -4), Some(start));
        assert_eq!(day_date(start, i32::MAX), None);
    }
}
