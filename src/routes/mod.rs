pub mod health;
pub mod itineraries;
pub mod schedule;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Itineraries
        .route(
            "/itineraries",
            post(itineraries::create_itinerary).get(itineraries::list_itineraries),
        )
        .route("/itineraries/promotions", post(itineraries::apply_promotions))
        .route(
            "/itineraries/:id",
            get(itineraries::get_itinerary)
                .put(itineraries::update_itinerary)
                .delete(itineraries::delete_itinerary),
        )
        // Lifecycle actions (nested under itineraries)
        .route(
            "/itineraries/:id/disruption",
            post(itineraries::report_disruption),
        )
        .route(
            "/itineraries/:id/complete",
            post(itineraries::complete_itinerary),
        )
        .route("/itineraries/:id/locks", get(itineraries::get_field_locks))
        // Form-layer helper
        .route("/schedule/auto", post(schedule::auto_schedule))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::app::{create_app, AppState};
    use crate::config::{Environment, LogFormat, Settings, StoreBackend};
    use crate::services::clock::FixedClock;
    use crate::services::ItineraryService;
    use crate::store::MemoryItineraryStore;

    fn test_app() -> Router {
        let now = NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let settings = Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".into(),
            log_format: LogFormat::Pretty,
            store: StoreBackend::Memory,
            cors_allow_origins: vec!["http://localhost:3000".into()],
            auto_apply_promotions: false,
        };
        let service = ItineraryService::new(
            Arc::new(MemoryItineraryStore::new()),
            Arc::new(FixedClock(now)),
        );
        create_app(AppState::new(settings, service))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn trip() -> Value {
        json!({
            "client_name": "Ines Duarte",
            "destination": "Kyoto",
            "status": "active",
            "date_range": "Nov 3 - Nov 5",
            "total_days": 2,
            "flights": [
                {
                    "type": "departure",
                    "date": "2026-11-03",
                    "carrier": "JL",
                    "flight_number": "61",
                    "departure_time": "01:05",
                    "arrival_time": "5:40",
                    "airport": "KIX"
                }
            ],
            "days": [
                { "day_number": 1, "activities": [
                    { "time": "13:00", "title": "Fushimi Inari", "order": 1 },
                    { "time": "", "title": "Tea house" },
                    { "time": "09:00", "title": "Check-in" }
                ]},
                { "day_number": 2, "activities": [] }
            ]
        })
    }

    #[tokio::test]
    async fn create_returns_canonical_snapshot() {
        let app = test_app();
        let (status, body) = send(&app, "POST", "/itineraries", Some(trip())).await;
        assert_eq!(status, StatusCode::CREATED);

        let data = &body["data"];
        assert_eq!(data["status"], "upcoming");
        assert_eq!(data["total_days"], 2);
        assert_eq!(data["version"], 1);
        let first_day = data["days"][0]["activities"].as_array().unwrap();
        let ordered: Vec<(&str, i64)> = first_day
            .iter()
            .map(|a| (a["title"].as_str().unwrap(), a["order"].as_i64().unwrap()))
            .collect();
        assert_eq!(
            ordered,
            vec![("Check-in", 1), ("Fushimi Inari", 2), ("Tea house", 3)]
        );
    }

    #[tokio::test]
    async fn update_get_and_delete_round_trip() {
        let app = test_app();
        let (_, created) = send(&app, "POST", "/itineraries", Some(json!({
            "client_name": "Ines Duarte",
            "destination": "Kyoto"
        })))
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();
        let uri = format!("/itineraries/{id}");

        let (status, updated) = send(&app, "PUT", &uri, Some(json!({
            "expected_version": 1,
            "days": [{ "activities": [{ "time": "8:15", "title": "Market" }] }]
        })))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["version"], 2);
        assert_eq!(updated["data"]["days"][0]["day_number"], 1);
        assert_eq!(updated["data"]["days"][0]["activities"][0]["order"], 1);

        let (status, stale) = send(&app, "PUT", &uri, Some(json!({ "expected_version": 1 }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(stale["code"], "CONFLICT");

        let (status, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"]["destination"], "Kyoto");

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, missing) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(missing["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn finalize_without_destination_is_rejected() {
        let app = test_app();
        let (status, body) = send(&app, "POST", "/itineraries", Some(json!({
            "client_name": "Ines Duarte",
            "status": "active",
            "total_days": 3
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "destination is required");
    }

    #[tokio::test]
    async fn lifecycle_actions_and_locks() {
        let app = test_app();
        let mut payload = trip();
        payload["flights"][0]["date"] = json!("2026-10-14");
        let (_, created) = send(&app, "POST", "/itineraries", Some(payload)).await;
        assert_eq!(created["data"]["status"], "active");
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let (_, locks) = send(&app, "GET", &format!("/itineraries/{id}/locks"), None).await;
        assert_eq!(locks["data"]["departure_flight"], true);
        assert_eq!(locks["data"]["activities"], false);

        let (status, disrupted) =
            send(&app, "POST", &format!("/itineraries/{id}/disruption"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(disrupted["data"]["status"], "disrupted");

        let (_, resaved) = send(&app, "PUT", &format!("/itineraries/{id}"), Some(json!({}))).await;
        assert_eq!(resaved["data"]["status"], "active");

        let (_, completed) =
            send(&app, "POST", &format!("/itineraries/{id}/complete"), None).await;
        assert_eq!(completed["data"]["status"], "completed");

        let (status, _) = send(&app, "PUT", &format!("/itineraries/{id}"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn list_reports_pending_promotions_until_applied() {
        let app = test_app();
        let mut payload = trip();
        payload["status"] = json!("draft");
        let (_, created) = send(&app, "POST", "/itineraries", Some(payload)).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        // Only upcoming itineraries are promoted
        let (_, listed) = send(&app, "GET", "/itineraries", None).await;
        assert_eq!(listed["data"][0]["status"], "draft");
        assert!(listed["pending_promotions"].as_array().unwrap().is_empty());

        let (status, applied) = send(
            &app,
            "POST",
            "/itineraries/promotions",
            Some(json!({ "ids": [id] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(applied["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn auto_schedule_inserts_boundary_activities_once() {
        let app = test_app();
        let request = json!({
            "flights": [
                { "type": "departure", "arrival_time": "05:40", "airport": "KIX", "carrier": "JL", "flight_number": "61" },
                { "type": "return", "departure_time": "11:00", "airport": "KIX" }
            ],
            "days": [{ "day_number": 1, "activities": [] }, { "day_number": 2, "activities": [] }]
        });

        let (status, first) = send(&app, "POST", "/schedule/auto", Some(request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let days = &first["data"];
        assert_eq!(days[0]["activities"][0]["title"], "Arrival at KIX");
        assert_eq!(days[0]["activities"][1]["time"], "06:10");
        assert_eq!(days[1]["activities"][0]["title"], "Departure from KIX");
        assert_eq!(days[1]["activities"][0]["time"], "08:00");

        let mut rerun = request;
        rerun["days"] = days.clone();
        let (_, second) = send(&app, "POST", "/schedule/auto", Some(rerun)).await;
        assert_eq!(second["data"], first["data"]);
    }

    #[tokio::test]
    async fn health_reports_store() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["services"]["store"], "ok");
    }
}
