//! PostgreSQL itinerary store
//!
//! Tree writes run in a single transaction: delete the collections being
//! replaced, insert the new rows, then re-read the snapshot before commit.
//! Dropping the transaction on any error rolls the whole save back.

use chrono::{DateTime, NaiveDate, Utc};
use futures::future::BoxFuture;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use super::{legacy, ItineraryStore, StoreError, StoreResult, UpdateGuard};
use crate::domain::{
    Activity, ActivityStatus, Day, Flight, FlightType, HotelStay, Itinerary, ItineraryDetails,
    ItineraryHeader, ItineraryStatus, TreeReplacement,
};

#[derive(Clone)]
pub struct PgItineraryStore {
    pool: PgPool,
}

impl PgItineraryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row for itinerary
#[derive(Debug, sqlx::FromRow)]
struct ItineraryRow {
    id: Uuid,
    client_name: String,
    destination: String,
    status: String,
    date_range: String,
    age: Option<i32>,
    headcount: Option<i32>,
    contact: Option<String>,
    origin_code: Option<String>,
    destination_code: Option<String>,
    total_days: Option<i32>,
    legacy_flight_info: Option<String>,
    legacy_hotel_info: Option<String>,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Database row for flight
#[derive(Debug, sqlx::FromRow)]
struct FlightRow {
    itinerary_id: Uuid,
    flight_type: String,
    date: Option<NaiveDate>,
    carrier: String,
    flight_number: String,
    departure_time: String,
    arrival_time: String,
    airport: String,
    lat: Option<f64>,
    lng: Option<f64>,
}

impl TryFrom<FlightRow> for Flight {
    type Error = StoreError;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        let flight_type = FlightType::from_db(&row.flight_type)
            .ok_or_else(|| StoreError::Decode(format!("flight type '{}'", row.flight_type)))?;
        Ok(Self {
            flight_type,
            date: row.date,
            carrier: row.carrier,
            flight_number: row.flight_number,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            airport: row.airport,
            lat: row.lat,
            lng: row.lng,
        })
    }
}

/// Database row for hotel stay
#[derive(Debug, sqlx::FromRow)]
struct HotelStayRow {
    itinerary_id: Uuid,
    name: String,
    check_in: NaiveDate,
    check_out: NaiveDate,
    notes: String,
    lat: Option<f64>,
    lng: Option<f64>,
}

impl From<HotelStayRow> for HotelStay {
    fn from(row: HotelStayRow) -> Self {
        Self {
            name: row.name,
            check_in: row.check_in,
            check_out: row.check_out,
            notes: row.notes,
            lat: row.lat,
            lng: row.lng,
        }
    }
}

/// Database row for day
#[derive(Debug, sqlx::FromRow)]
struct DayRow {
    id: Uuid,
    itinerary_id: Uuid,
    day_number: i32,
}

/// Database row for activity
#[derive(Debug, sqlx::FromRow)]
struct ActivityRow {
    day_id: Uuid,
    time: String,
    duration: Option<Decimal>,
    title: String,
    location: String,
    notes: Option<String>,
    status: String,
    lat: Option<f64>,
    lng: Option<f64>,
    display_order: i32,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Self {
            time: row.time,
            duration: row.duration,
            title: row.title,
            location: row.location,
            notes: row.notes,
            status: ActivityStatus::from_db(&row.status),
            lat: row.lat,
            lng: row.lng,
            order: row.display_order,
        }
    }
}

const ITINERARY_COLUMNS: &str = r#"
    id, client_name, destination, status, date_range, age, headcount, contact,
    origin_code, destination_code, total_days, legacy_flight_info, legacy_hotel_info,
    version, created_at, updated_at
"#;

/// Load full snapshots for `rows`, keeping their order.
async fn assemble(conn: &mut PgConnection, rows: Vec<ItineraryRow>) -> StoreResult<Vec<Itinerary>> {
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

    let flight_rows = sqlx::query_as::<_, FlightRow>(
        r#"
        SELECT itinerary_id, flight_type, date, carrier, flight_number,
               departure_time, arrival_time, airport, lat, lng
        FROM flights
        WHERE itinerary_id = ANY($1)
        ORDER BY itinerary_id, position
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let hotel_rows = sqlx::query_as::<_, HotelStayRow>(
        r#"
        SELECT itinerary_id, name, check_in, check_out, notes, lat, lng
        FROM hotel_stays
        WHERE itinerary_id = ANY($1)
        ORDER BY itinerary_id, position
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let day_rows = sqlx::query_as::<_, DayRow>(
        r#"
        SELECT id, itinerary_id, day_number
        FROM days
        WHERE itinerary_id = ANY($1)
        ORDER BY itinerary_id, day_number
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let activity_rows = sqlx::query_as::<_, ActivityRow>(
        r#"
        SELECT a.day_id, a.time, a.duration, a.title, a.location, a.notes, a.status,
               a.lat, a.lng, a.display_order
        FROM activities a
        JOIN days d ON a.day_id = d.id
        WHERE d.itinerary_id = ANY($1)
        ORDER BY a.day_id, a.display_order
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    group_rows(
        rows,
        ChildRows {
            flights: flight_rows,
            hotel_stays: hotel_rows,
            days: day_rows,
            activities: activity_rows,
        },
    )
}

/// Child rows fetched for a batch of itineraries, each set already in read order.
#[derive(Default)]
struct ChildRows {
    flights: Vec<FlightRow>,
    hotel_stays: Vec<HotelStayRow>,
    days: Vec<DayRow>,
    activities: Vec<ActivityRow>,
}

/// Attach child rows to their itineraries, keeping the order of `rows`.
///
/// A legacy blob is only consulted for an itinerary with no relational rows
/// in that collection.
fn group_rows(rows: Vec<ItineraryRow>, children: ChildRows) -> StoreResult<Vec<Itinerary>> {
    let mut flights: HashMap<Uuid, Vec<Flight>> = HashMap::new();
    for row in children.flights {
        let owner = row.itinerary_id;
        flights.entry(owner).or_default().push(Flight::try_from(row)?);
    }

    let mut hotel_stays: HashMap<Uuid, Vec<HotelStay>> = HashMap::new();
    for row in children.hotel_stays {
        hotel_stays.entry(row.itinerary_id).or_default().push(row.into());
    }

    let mut activities: HashMap<Uuid, Vec<Activity>> = HashMap::new();
    for row in children.activities {
        activities.entry(row.day_id).or_default().push(row.into());
    }

    let mut days: HashMap<Uuid, Vec<Day>> = HashMap::new();
    for row in children.days {
        days.entry(row.itinerary_id).or_default().push(Day {
            day_number: row.day_number,
            activities: activities.remove(&row.id).unwrap_or_default(),
        });
    }

    rows.into_iter()
        .map(|row| {
            let status = ItineraryStatus::from_db(&row.status)
                .ok_or_else(|| StoreError::Decode(format!("itinerary status '{}'", row.status)))?;

            let flights = match flights.remove(&row.id) {
                Some(found) => found,
                None => legacy::decode_flights(row.legacy_flight_info.as_deref()),
            };
            let hotel_stays = match hotel_stays.remove(&row.id) {
                Some(found) => found,
                None => legacy::decode_hotel_stays(row.legacy_hotel_info.as_deref()),
            };

            Ok(Itinerary {
                id: row.id,
                client_name: row.client_name,
                destination: row.destination,
                status,
                date_range: row.date_range,
                details: ItineraryDetails {
                    age: row.age,
                    headcount: row.headcount,
                    contact: row.contact,
                    origin_code: row.origin_code,
                    destination_code: row.destination_code,
                    total_days: row.total_days,
                },
                flights,
                hotel_stays,
                days: days.remove(&row.id).unwrap_or_default(),
                version: row.version,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        })
        .collect()
}

async fn load_one(conn: &mut PgConnection, id: Uuid) -> StoreResult<Option<Itinerary>> {
    let row = sqlx::query_as::<_, ItineraryRow>(&format!(
        "SELECT {ITINERARY_COLUMNS} FROM itineraries WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => Ok(assemble(conn, vec![row]).await?.into_iter().next()),
        None => Ok(None),
    }
}

/// Legacy blob columns made stale by writing the collections in `tree`.
fn superseded_legacy_columns(tree: &TreeReplacement) -> Vec<&'static str> {
    let mut columns = Vec::new();
    if tree.flights.is_some() {
        columns.push("legacy_flight_info");
    }
    if tree.hotel_stays.is_some() {
        columns.push("legacy_hotel_info");
    }
    columns
}

async fn replace_tree(conn: &mut PgConnection, id: Uuid, tree: TreeReplacement) -> StoreResult<()> {
    // Once a collection is written relationally its legacy blob must not resurface,
    // even when the new collection is empty
    let superseded = superseded_legacy_columns(&tree);
    if !superseded.is_empty() {
        let assignments: Vec<String> = superseded
            .iter()
            .map(|column| format!("{column} = NULL"))
            .collect();
        sqlx::query(&format!(
            "UPDATE itineraries SET {} WHERE id = $1",
            assignments.join(", ")
        ))
        .bind(id)
        .execute(&mut *conn)
        .await?;
    }

    if let Some(flights) = tree.flights {
        sqlx::query("DELETE FROM flights WHERE itinerary_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        for (position, flight) in flights.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO flights (id, itinerary_id, position, flight_type, date, carrier,
                                     flight_number, departure_time, arrival_time, airport, lat, lng)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(id)
            .bind(position as i32)
            .bind(flight.flight_type.as_str())
            .bind(flight.date)
            .bind(&flight.carrier)
            .bind(&flight.flight_number)
            .bind(&flight.departure_time)
            .bind(&flight.arrival_time)
            .bind(&flight.airport)
            .bind(flight.lat)
            .bind(flight.lng)
            .execute(&mut *conn)
            .await?;
        }
    }

    if let Some(hotel_stays) = tree.hotel_stays {
        sqlx::query("DELETE FROM hotel_stays WHERE itinerary_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        for (position, stay) in hotel_stays.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO hotel_stays (id, itinerary_id, position, name, check_in, check_out,
                                         notes, lat, lng)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(id)
            .bind(position as i32)
            .bind(&stay.name)
            .bind(stay.check_in)
            .bind(stay.check_out)
            .bind(&stay.notes)
            .bind(stay.lat)
            .bind(stay.lng)
            .execute(&mut *conn)
            .await?;
        }
    }

    if let Some(days) = tree.days {
        // Activities go with their days via ON DELETE CASCADE
        sqlx::query("DELETE FROM days WHERE itinerary_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        for day in days {
            let day_id = Uuid::new_v4();
            sqlx::query("INSERT INTO days (id, itinerary_id, day_number) VALUES ($1, $2, $3)")
                .bind(day_id)
                .bind(id)
                .bind(day.day_number)
                .execute(&mut *conn)
                .await?;

            for activity in day.activities {
                sqlx::query(
                    r#"
                    INSERT INTO activities (id, day_id, time, duration, title, location, notes,
                                            status, lat, lng, display_order)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(day_id)
                .bind(&activity.time)
                .bind(activity.duration)
                .bind(&activity.title)
                .bind(&activity.location)
                .bind(&activity.notes)
                .bind(activity.status.as_str())
                .bind(activity.lat)
                .bind(activity.lng)
                .bind(activity.order)
                .execute(&mut *conn)
                .await?;
            }
        }
    }

    Ok(())
}

fn missing_after_write(id: Uuid) -> StoreError {
    StoreError::Decode(format!("itinerary {id} vanished inside its own transaction"))
}

impl ItineraryStore for PgItineraryStore {
    fn insert(
        &self,
        header: ItineraryHeader,
        tree: TreeReplacement,
    ) -> BoxFuture<'_, StoreResult<Itinerary>> {
        Box::pin(async move {
            let id = Uuid::new_v4();
            let mut tx = self.pool.begin().await?;

            sqlx::query(
                r#"
                INSERT INTO itineraries (id, client_name, destination, status, date_range, age,
                                         headcount, contact, origin_code, destination_code,
                                         total_days, version, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 1, NOW(), NOW())
                "#,
            )
            .bind(id)
            .bind(&header.client_name)
            .bind(&header.destination)
            .bind(header.status.as_str())
            .bind(&header.date_range)
            .bind(header.details.age)
            .bind(header.details.headcount)
            .bind(&header.details.contact)
            .bind(&header.details.origin_code)
            .bind(&header.details.destination_code)
            .bind(header.details.total_days)
            .execute(&mut *tx)
            .await?;

            replace_tree(&mut *tx, id, tree).await?;
            let snapshot = load_one(&mut *tx, id).await?.ok_or_else(|| missing_after_write(id))?;

            tx.commit().await?;
            Ok(snapshot)
        })
    }

    fn update(
        &self,
        id: Uuid,
        header: ItineraryHeader,
        tree: TreeReplacement,
        guard: UpdateGuard,
    ) -> BoxFuture<'_, StoreResult<Option<Itinerary>>> {
        Box::pin(async move {
            let mut tx = self.pool.begin().await?;

            // Row lock serializes concurrent saves and status changes of the same itinerary
            let current: Option<(i32, String)> = sqlx::query_as(
                "SELECT version, status FROM itineraries WHERE id = $1 FOR UPDATE",
            )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some((actual_version, actual_status)) = current else {
                return Ok(None);
            };
            let actual_status = ItineraryStatus::from_db(&actual_status)
                .ok_or_else(|| StoreError::Decode(format!("itinerary status '{actual_status}'")))?;
            if actual_status != guard.status {
                return Err(StoreError::StatusConflict {
                    expected: guard.status,
                    actual: actual_status,
                });
            }
            if let Some(expected) = guard.version {
                if expected != actual_version {
                    return Err(StoreError::VersionConflict {
                        expected,
                        actual: actual_version,
                    });
                }
            }

            sqlx::query(
                r#"
                UPDATE itineraries SET
                    client_name = $2,
                    destination = $3,
                    status = $4,
                    date_range = $5,
                    age = $6,
                    headcount = $7,
                    contact = $8,
                    origin_code = $9,
                    destination_code = $10,
                    total_days = $11,
                    version = version + 1,
                    updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(&header.client_name)
            .bind(&header.destination)
            .bind(header.status.as_str())
            .bind(&header.date_range)
            .bind(header.details.age)
            .bind(header.details.headcount)
            .bind(&header.details.contact)
            .bind(&header.details.origin_code)
            .bind(&header.details.destination_code)
            .bind(header.details.total_days)
            .execute(&mut *tx)
            .await?;

            replace_tree(&mut *tx, id, tree).await?;
            let snapshot = load_one(&mut *tx, id).await?.ok_or_else(|| missing_after_write(id))?;

            tx.commit().await?;
            Ok(Some(snapshot))
        })
    }

    fn get(&self, id: Uuid) -> BoxFuture<'_, StoreResult<Option<Itinerary>>> {
        Box::pin(async move {
            let mut conn = self.pool.acquire().await?;
            load_one(&mut conn, id).await
        })
    }

    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<Itinerary>>> {
        Box::pin(async move {
            let mut conn = self.pool.acquire().await?;
            let rows = sqlx::query_as::<_, ItineraryRow>(&format!(
                "SELECT {ITINERARY_COLUMNS} FROM itineraries ORDER BY created_at DESC, id"
            ))
            .fetch_all(&mut *conn)
            .await?;

            assemble(&mut conn, rows).await
        })
    }

    fn transition_status(
        &self,
        id: Uuid,
        from: ItineraryStatus,
        to: ItineraryStatus,
    ) -> BoxFuture<'_, StoreResult<bool>> {
        Box::pin(async move {
            let result = sqlx::query(
                r#"
                UPDATE itineraries
                SET status = $3, version = version + 1, updated_at = NOW()
                WHERE id = $1 AND status = $2
                "#,
            )
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .execute(&self.pool)
            .await?;

            Ok(result.rows_affected() == 1)
        })
    }

    fn delete(&self, id: Uuid) -> BoxFuture<'_, StoreResult<bool>> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM itineraries WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

            Ok(result.rows_affected() > 0)
        })
    }

    fn health_check(&self) -> BoxFuture<'_, StoreResult<()>> {
        Box::pin(async move {
            sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itinerary_row(id: Uuid) -> ItineraryRow {
        ItineraryRow {
            id,
            client_name: "Noor Haddad".into(),
            destination: "Amman".into(),
            status: "upcoming".into(),
            date_range: String::new(),
            age: None,
            headcount: Some(2),
            contact: None,
            origin_code: None,
            destination_code: None,
            total_days: Some(4),
            legacy_flight_info: None,
            legacy_hotel_info: None,
            version: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn flight_row(itinerary_id: Uuid, flight_type: &str, airport: &str) -> FlightRow {
        FlightRow {
            itinerary_id,
            flight_type: flight_type.into(),
            date: NaiveDate::from_ymd_opt(2026, 11, 2),
            carrier: "RJ".into(),
            flight_number: "112".into(),
            departure_time: "08:00".into(),
            arrival_time: "13:20".into(),
            airport: airport.into(),
            lat: None,
            lng: None,
        }
    }

    fn hotel_row(itinerary_id: Uuid, name: &str) -> HotelStayRow {
        HotelStayRow {
            itinerary_id,
            name: name.into(),
            check_in: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 11, 4).unwrap(),
            notes: String::new(),
            lat: None,
            lng: None,
        }
    }

    fn activity_row(day_id: Uuid, title: &str, order: i32) -> ActivityRow {
        ActivityRow {
            day_id,
            time: String::new(),
            duration: None,
            title: title.into(),
            location: String::new(),
            notes: None,
            status: "upcoming".into(),
            lat: None,
            lng: None,
            display_order: order,
        }
    }

    const LEGACY_FLIGHTS: &str =
        r#"{"departure": {"date": "2026-11-02", "airport": "AMM", "arrival_time": "13:20"}}"#;
    const LEGACY_HOTELS: &str = r#"[{"name": "Old Town Inn", "check_in": "2026-11-02", "check_out": "2026-11-06"}]"#;

    #[test]
    fn legacy_blobs_fill_only_empty_collections() {
        let id = Uuid::new_v4();
        let mut row = itinerary_row(id);
        row.legacy_flight_info = Some(LEGACY_FLIGHTS.into());
        row.legacy_hotel_info = Some(LEGACY_HOTELS.into());

        let children = ChildRows {
            hotel_stays: vec![hotel_row(id, "Relational Hotel")],
            ..Default::default()
        };
        let snapshot = group_rows(vec![row], children).unwrap().remove(0);

        assert_eq!(snapshot.flights.len(), 1);
        assert_eq!(snapshot.flights[0].flight_type, FlightType::Departure);
        assert_eq!(snapshot.flights[0].airport, "AMM");
        let hotels: Vec<&str> = snapshot.hotel_stays.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(hotels, vec!["Relational Hotel"]);
    }

    #[test]
    fn malformed_legacy_blob_reads_as_empty() {
        let id = Uuid::new_v4();
        let mut row = itinerary_row(id);
        row.legacy_flight_info = Some("{not json".into());

        let snapshot = group_rows(vec![row], ChildRows::default()).unwrap().remove(0);
        assert!(snapshot.flights.is_empty());
        assert!(snapshot.hotel_stays.is_empty());
    }

    #[test]
    fn children_attach_to_owners_in_read_order() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let (day_one, day_two) = (Uuid::new_v4(), Uuid::new_v4());

        let children = ChildRows {
            flights: vec![
                flight_row(first, "departure", "AMM"),
                flight_row(first, "return", "AQJ"),
                flight_row(second, "departure", "DXB"),
            ],
            hotel_stays: vec![hotel_row(first, "Dana"), hotel_row(first, "Wadi Rum Camp")],
            days: vec![
                DayRow {
                    id: day_one,
                    itinerary_id: first,
                    day_number: 1,
                },
                DayRow {
                    id: day_two,
                    itinerary_id: first,
                    day_number: 2,
                },
            ],
            activities: vec![
                activity_row(day_one, "Citadel", 1),
                activity_row(day_one, "Rainbow Street", 2),
                activity_row(day_two, "Petra", 1),
            ],
        };

        let snapshots =
            group_rows(vec![itinerary_row(second), itinerary_row(first)], children).unwrap();
        assert_eq!(snapshots[0].id, second);
        assert_eq!(snapshots[0].flights[0].airport, "DXB");
        assert!(snapshots[0].days.is_empty());

        let trip = &snapshots[1];
        let airports: Vec<&str> = trip.flights.iter().map(|f| f.airport.as_str()).collect();
        assert_eq!(airports, vec!["AMM", "AQJ"]);
        let hotels: Vec<&str> = trip.hotel_stays.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(hotels, vec!["Dana", "Wadi Rum Camp"]);
        assert_eq!(trip.days[0].activities[1].title, "Rainbow Street");
        assert_eq!(trip.days[1].activities[0].order, 1);
        assert_eq!(trip.details.total_days, Some(4));
        assert_eq!(trip.status, ItineraryStatus::Upcoming);
    }

    #[test]
    fn corrupt_status_is_a_decode_error() {
        let mut row = itinerary_row(Uuid::new_v4());
        row.status = "archived".into();
        assert!(matches!(
            group_rows(vec![row], ChildRows::default()),
            Err(StoreError::Decode(_))
        ));
    }

    #[test]
    fn written_collections_supersede_their_legacy_columns() {
        let both = TreeReplacement {
            flights: Some(Vec::new()),
            hotel_stays: Some(Vec::new()),
            days: None,
        };
        assert_eq!(
            superseded_legacy_columns(&both),
            vec!["legacy_flight_info", "legacy_hotel_info"]
        );

        let days_only = TreeReplacement {
            days: Some(Vec::new()),
            ..Default::default()
        };
        assert!(superseded_legacy_columns(&days_only).is_empty());
    }
}
