//! Synthetic boundary activities derived from flights
//!
//! Day 1 gets an arrival block (arrival + hotel transfer) from the
//! departure flight; the last day gets a departure activity from the
//! return flight. A block is skipped when its marker title is already on
//! the target day, so re-running keeps any edits the user made to it.

use crate::domain::itineraries::{
    active_hotel, day_date, find_flight, ActivityDraft, ActivityStatus, DayDraft, Flight,
    FlightType, HotelStay,
};

use super::time;

pub const ARRIVAL_MARKER: &str = "Arrival at";
pub const DEPARTURE_MARKER: &str = "Departure from";
pub const TRANSFER_TITLE: &str = "Transfer to Hotel";

const TRANSFER_OFFSET_MINUTES: i32 = 30;
const DEPARTURE_LEAD_MINUTES: i32 = 180;

/// Insert arrival/departure blocks into `days` where flight data allows.
///
/// Missing airports or unparsable clock times suppress the matching block.
pub fn apply_auto_schedule(
    flights: &[Flight],
    hotel_stays: &[HotelStay],
    mut days: Vec<DayDraft>,
) -> Vec<DayDraft> {
    if let Some(flight) = find_flight(flights, FlightType::Departure) {
        if let Some(first) = first_day(&mut days) {
            if !has_marker(first, ARRIVAL_MARKER) {
                let day_number = first.day_number.unwrap_or(1);
                if let Some(block) = arrival_block(flight, hotel_stays, day_number) {
                    tracing::debug!(airport = %flight.airport, "Inserting arrival block");
                    let rest = std::mem::take(&mut first.activities);
                    first.activities = block.into_iter().chain(rest).collect();
                }
            }
        }
    }

    if let Some(flight) = find_flight(flights, FlightType::Return) {
        if let Some(last) = last_day(&mut days) {
            if !has_marker(last, DEPARTURE_MARKER) {
                if let Some(activity) = departure_activity(flight) {
                    tracing::debug!(airport = %flight.airport, "Appending departure activity");
                    last.activities.push(activity);
                }
            }
        }
    }

    days
}

// Days are placed by the same key the reconciler sorts on, so the blocks
// land on what becomes Day 1 and the last day regardless of input order.
fn day_key(day: &DayDraft) -> i32 {
    day.day_number.unwrap_or(i32::MAX)
}

fn first_day(days: &mut [DayDraft]) -> Option<&mut DayDraft> {
    // min_by_key keeps the earliest of equal keys, matching a stable sort
    days.iter_mut().min_by_key(|d| day_key(d))
}

fn last_day(days: &mut [DayDraft]) -> Option<&mut DayDraft> {
    // max_by_key keeps the latest of equal keys, matching a stable sort
    days.iter_mut().max_by_key(|d| day_key(d))
}

fn has_marker(day: &DayDraft, marker: &str) -> bool {
    day.activities.iter().any(|a| a.title.starts_with(marker))
}

fn arrival_block(
    flight: &Flight,
    hotel_stays: &[HotelStay],
    day_number: i32,
) -> Option<[ActivityDraft; 2]> {
    let airport = flight.airport.trim();
    if airport.is_empty() {
        return None;
    }
    let arrival_time = time::normalize(&flight.arrival_time);
    if arrival_time.is_empty() {
        return None;
    }
    let transfer_time = time::add_minutes(&arrival_time, TRANSFER_OFFSET_MINUTES)?;

    let arrival = ActivityDraft {
        time: arrival_time,
        title: format!("{ARRIVAL_MARKER} {airport}"),
        location: airport.to_string(),
        notes: flight.label().map(|label| format!("Flight {label}")),
        status: ActivityStatus::Upcoming,
        lat: flight.lat,
        lng: flight.lng,
        ..Default::default()
    };

    let hotel = flight
        .date
        .and_then(|date| day_date(date, day_number))
        .and_then(|date| active_hotel(hotel_stays, date));
    let transfer = ActivityDraft {
        time: transfer_time,
        title: TRANSFER_TITLE.to_string(),
        location: hotel.map(|h| h.name.clone()).unwrap_or_default(),
        status: ActivityStatus::Upcoming,
        lat: hotel.and_then(|h| h.lat),
        lng: hotel.and_then(|h| h.lng),
        ..Default::default()
    };

    Some([arrival, transfer])
}

fn departure_activity(flight: &Flight) -> Option<ActivityDraft> {
    let airport = flight.airport.trim();
    if airport.is_empty() {
        return None;
    }
    let time = time::add_minutes(&flight.departure_time, -DEPARTURE_LEAD_MINUTES)?;

    Some(ActivityDraft {
        time,
        title: format!("{DEPARTURE_MARKER} {airport}"),
        location: airport.to_string(),
        notes: flight.label().map(|label| format!("Flight {label}")),
        status: ActivityStatus::Upcoming,
        lat: flight.lat,
        lng: flight.lng,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, day).unwrap()
    }

    fn flight(flight_type: FlightType, departure: &str, arrival: &str, airport: &str) -> Flight {
        Flight {
            flight_type,
            date: Some(date(2)),
            carrier: "IB".into(),
            flight_number: "3170".into(),
            departure_time: departure.into(),
            arrival_time: arrival.into(),
            airport: airport.into(),
            lat: Some(40.47),
            lng: Some(-3.56),
        }
    }

    fn days(count: usize) -> Vec<DayDraft> {
        (1..=count)
            .map(|n| DayDraft {
                day_number: Some(n as i32),
                activities: vec![ActivityDraft {
                    time: "12:00".into(),
                    title: format!("Lunch day {n}"),
                    ..Default::default()
                }],
            })
            .collect()
    }

    fn hotel() -> HotelStay {
        HotelStay {
            name: "Hotel Prado".into(),
            check_in: date(2),
            check_out: date(5),
            notes: String::new(),
            lat: Some(40.41),
            lng: Some(-3.69),
        }
    }

    #[test]
    fn inserts_arrival_and_transfer_at_front_of_day_one() {
        let flights = [flight(FlightType::Departure, "07:00", "9:45", "MAD")];
        let result = apply_auto_schedule(&flights, &[hotel()], days(3));

        let first = &result[0].activities;
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].title, "Arrival at MAD");
        assert_eq!(first[0].time, "09:45");
        assert_eq!(first[0].notes.as_deref(), Some("Flight IB 3170"));
        assert_eq!(first[0].lat, Some(40.47));
        assert_eq!(first[1].title, TRANSFER_TITLE);
        assert_eq!(first[1].time, "10:15");
        assert_eq!(first[1].location, "Hotel Prado");
        assert_eq!(first[1].status, ActivityStatus::Upcoming);
        assert_eq!(first[2].title, "Lunch day 1");
        assert_eq!(result[2].activities.len(), 1);
    }

    #[test]
    fn appends_departure_to_last_day() {
        let flights = [flight(FlightType::Return, "18:30", "21:00", "MAD")];
        let result = apply_auto_schedule(&flights, &[], days(2));

        let last = &result[1].activities;
        assert_eq!(last.len(), 2);
        assert_eq!(last[1].title, "Departure from MAD");
        assert_eq!(last[1].time, "15:30");
        assert_eq!(result[0].activities.len(), 1);
    }

    #[test]
    fn rerunning_is_idempotent() {
        let flights = [
            flight(FlightType::Departure, "07:00", "09:45", "MAD"),
            flight(FlightType::Return, "18:30", "21:00", "MAD"),
        ];
        let once = apply_auto_schedule(&flights, &[hotel()], days(2));
        let twice = apply_auto_schedule(&flights, &[hotel()], once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn customized_synthetic_activity_is_left_alone() {
        let flights = [flight(FlightType::Departure, "07:00", "09:45", "MAD")];
        let mut scheduled = apply_auto_schedule(&flights, &[], days(1));
        scheduled[0].activities[0].time = "10:30".into();
        scheduled[0].activities[0].title = "Arrival at Madrid Barajas T4".into();

        let rerun = apply_auto_schedule(&flights, &[], scheduled.clone());
        assert_eq!(rerun, scheduled);
    }

    #[test]
    fn missing_flight_data_suppresses_blocks() {
        let flights = [
            flight(FlightType::Departure, "07:00", "", "MAD"),
            flight(FlightType::Return, "18:30", "21:00", "  "),
        ];
        let result = apply_auto_schedule(&flights, &[], days(2));
        assert_eq!(result, days(2));
    }

    #[test]
    fn blocks_follow_day_numbers_not_positions() {
        let flights = [
            flight(FlightType::Departure, "07:00", "09:45", "MAD"),
            flight(FlightType::Return, "18:30", "21:00", "MAD"),
        ];
        let mut shuffled = days(3);
        shuffled.reverse();
        shuffled.push(DayDraft {
            day_number: None,
            activities: Vec::new(),
        });

        let result = apply_auto_schedule(&flights, &[hotel()], shuffled);
        // [3, 2, 1, None]: Day 1 is at index 2 and the unnumbered day sorts last
        assert_eq!(result[2].activities[0].title, "Arrival at MAD");
        assert_eq!(result[2].activities[1].location, "Hotel Prado");
        assert_eq!(result[3].activities.len(), 1);
        assert_eq!(result[3].activities[0].title, "Departure from MAD");
        assert_eq!(result[0].activities.len(), 1);
        assert_eq!(result[1].activities.len(), 1);
    }

    #[test]
    fn out_of_range_day_number_leaves_transfer_unlocated() {
        let flights = [flight(FlightType::Departure, "07:00", "09:45", "MAD")];
        let far_out = vec![DayDraft {
            day_number: Some(i32::MAX),
            activities: Vec::new(),
        }];

        let result = apply_auto_schedule(&flights, &[hotel()], far_out);
        let first = &result[0].activities;
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].title, TRANSFER_TITLE);
        assert_eq!(first[1].location, "");
        assert_eq!(first[1].lat, None);
    }

    #[test]
    fn no_days_means_nothing_to_schedule() {
        let flights = [flight(FlightType::Departure, "07:00", "09:45", "MAD")];
        assert!(apply_auto_schedule(&flights, &[], Vec::new()).is_empty());
    }

    #[test]
    fn single_day_trip_gets_both_blocks() {
        let flights = [
            flight(FlightType::Departure, "06:00", "08:00", "OPO"),
            flight(FlightType::Return, "22:00", "23:30", "OPO"),
        ];
        let result = apply_auto_schedule(&flights, &[], days(1));
        let titles: Vec<&str> = result[0].activities.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Arrival at OPO", TRANSFER_TITLE, "Lunch day 1", "Departure from OPO"]
        );
    }

    #[test]
    fn times_wrap_around_midnight_without_date_change() {
        let flights = [
            flight(FlightType::Departure, "20:00", "23:50", "FNC"),
            flight(FlightType::Return, "01:15", "03:00", "FNC"),
        ];
        let result = apply_auto_schedule(&flights, &[], days(2));
        assert_eq!(result[0].activities[1].time, "00:20");
        assert_eq!(result[1].activities[1].time, "22:15");
    }
}
