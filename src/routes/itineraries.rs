//! Itinerary routes
//!
//! Create, read, update and delete itineraries, plus the explicit lifecycle
//! actions (disruption, completion, promotions) and field-lock lookup.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::{ApplyPromotionsRequest, CreateItineraryRequest, UpdateItineraryRequest};
use crate::error::ApiError;
use crate::middleware::RequestIdExt;

/// POST /itineraries
///
/// Create an itinerary; returns the canonical snapshot.
pub async fn create_itinerary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateItineraryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(
        request_id = headers.request_id(),
        destination = %req.destination,
        days = req.days.len(),
        "Creating itinerary"
    );

    let itinerary = state.itineraries.create(req).await?;
    Ok(Created(DataResponse::new(itinerary)))
}

/// GET /itineraries
///
/// List itineraries with pending promotions already reflected. When
/// auto-apply is enabled the promotions are written in the background and
/// a failure there is only logged.
pub async fn list_itineraries(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state.itineraries.list().await?;

    if state.settings.auto_apply_promotions && !listing.pending_promotions.is_empty() {
        let service = state.itineraries.clone();
        let ids = listing.pending_promotions.clone();
        tokio::spawn(async move {
            if let Err(e) = service.apply_pending_promotions(&ids).await {
                tracing::warn!(error = %e, pending = ids.len(), "Background promotion failed");
            }
        });
    }

    Ok(Json(listing))
}

/// POST /itineraries/promotions
///
/// Write pending promotions; responds with the ids actually promoted.
pub async fn apply_promotions(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApplyPromotionsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let promoted = state.itineraries.apply_pending_promotions(&req.ids).await?;
    Ok(Json(DataResponse::new(promoted)))
}

/// GET /itineraries/:id
pub async fn get_itinerary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let itinerary = state.itineraries.get(id).await?;
    Ok(Json(DataResponse::new(itinerary)))
}

/// PUT /itineraries/:id
///
/// Save an itinerary. Collections absent from the body are left as stored;
/// clients should replace their copy with the returned snapshot.
pub async fn update_itinerary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<UpdateItineraryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(
        request_id = headers.request_id(),
        itinerary_id = %id,
        replaces_days = req.days.is_some(),
        expected_version = ?req.expected_version,
        "Updating itinerary"
    );

    let itinerary = state.itineraries.update(id, req).await?;
    Ok(Json(DataResponse::new(itinerary)))
}

/// DELETE /itineraries/:id
pub async fn delete_itinerary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.itineraries.delete(id).await?;
    Ok(NoContent)
}

/// POST /itineraries/:id/disruption
pub async fn report_disruption(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let itinerary = state.itineraries.report_disruption(id).await?;
    Ok(Json(DataResponse::new(itinerary)))
}

/// POST /itineraries/:id/complete
pub async fn complete_itinerary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let itinerary = state.itineraries.complete(id).await?;
    Ok(Json(DataResponse::new(itinerary)))
}

/// GET /itineraries/:id/locks
pub async fn get_field_locks(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let locks = state.itineraries.field_locks(id).await?;
    Ok(Json(DataResponse::new(locks)))
}
