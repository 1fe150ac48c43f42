//! API endpoint handlers
//!
//! One generic handler per operation, instantiated for every vehicle kind.

use super::extractors::ValidatedJson;
use super::types::{HealthResponse, HealthState, KindState, PageParams};
use crate::error::ServerError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use vehicletype_core::{parse_count, parse_identifier, KindAttrs, Vehicle};

/// Health check endpoint
pub(super) async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        caches: state.cache_reports(),
    })
}

/// `POST /save`
pub(super) async fn save<A: KindAttrs>(
    State(state): State<KindState<A>>,
    ValidatedJson(vehicle): ValidatedJson<A>,
) -> Result<Json<Vehicle<A>>, ServerError> {
    let saved = state.service.save(vehicle).await?;
    Ok(Json(saved))
}

/// `DELETE /delete/{id}`
///
/// An unconfirmed deletion answers 303 with an explanatory text body.
pub(super) async fn delete<A: KindAttrs>(
    State(state): State<KindState<A>>,
    Path(raw_id): Path<String>,
) -> Result<(StatusCode, String), ServerError> {
    let id = parse_identifier("id", &raw_id)?;

    if state.service.delete(id).await? {
        Ok((
            StatusCode::OK,
            format!("{} with ID {} deleted.", A::KIND.label(), id),
        ))
    } else {
        Ok((
            StatusCode::SEE_OTHER,
            format!("Unable to delete {} with ID {}", A::KIND.name(), id),
        ))
    }
}

/// `GET /{id}`
pub(super) async fn find_by_id<A: KindAttrs>(
    State(state): State<KindState<A>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vehicle<A>>, ServerError> {
    let id = parse_identifier("id", &raw_id)?;
    let vehicle = state.service.find_by_id(id).await?;
    Ok(Json(vehicle))
}

/// `GET /all?page&size`
pub(super) async fn find_all<A: KindAttrs>(
    State(state): State<KindState<A>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Vehicle<A>>>, ServerError> {
    let page = match params.page.as_deref() {
        Some(raw) => parse_count("page", raw)?,
        None => 0,
    };
    let size = match params.size.as_deref() {
        Some(raw) => parse_count("size", raw)?,
        None => state.default_page_size,
    };

    let vehicles = state.service.find_all_order_by_make_asc(page, size).await?;
    Ok(Json(vehicles))
}
