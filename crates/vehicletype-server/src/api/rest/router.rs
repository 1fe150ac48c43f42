//! Router creation and configuration
//!
//! Creates Axum routers for REST API endpoints.

use super::handlers::*;
use super::types::{HealthState, KindState};
use crate::registry::{KindComponents, Registry};
use axum::{
    routing::{delete as delete_route, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vehicletype_core::{KindAttrs, VehicleKind};
use vehicletype_repository::DetailsMapping;

/// Create REST API router
///
/// Every kind is served under `/api/v1/{car|motorcycle|truck}`.
pub fn create_router(registry: &Registry, default_page_size: u32) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(HealthState::new(registry))
        .nest(&api_path(VehicleKind::Car), kind_routes(&registry.cars, default_page_size))
        .nest(
            &api_path(VehicleKind::Motorcycle),
            kind_routes(&registry.motorcycles, default_page_size),
        )
        .nest(&api_path(VehicleKind::Truck), kind_routes(&registry.trucks, default_page_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Routes for one vehicle kind, relative to its base path
pub fn vehicle_routes<A: KindAttrs>(state: KindState<A>) -> Router {
    Router::new()
        .route("/save", post(save::<A>))
        .route("/delete/:id", delete_route(delete::<A>))
        .route("/all", get(find_all::<A>))
        .route("/:id", get(find_by_id::<A>))
        .with_state(state)
}

fn kind_routes<A: DetailsMapping>(components: &KindComponents<A>, default_page_size: u32) -> Router {
    vehicle_routes(KindState::new(components.service.clone(), default_page_size))
}

fn api_path(kind: VehicleKind) -> String {
    format!("/api/v1/{}", kind.name())
}
