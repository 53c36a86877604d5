//! Auto-schedule route
//!
//! The form layer calls this whenever flight fields change and replaces its
//! day list with the result. Nothing is persisted here.

use axum::Json;

use crate::api::DataResponse;
use crate::domain::{AutoScheduleRequest, DayDraft};
use crate::scheduling::apply_auto_schedule;

/// POST /schedule/auto
pub async fn auto_schedule(Json(req): Json<AutoScheduleRequest>) -> DataResponse<Vec<DayDraft>> {
    let days = apply_auto_schedule(&req.flights, &req.hotel_stays, req.days);
    DataResponse::new(days)
}
