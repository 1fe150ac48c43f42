//! Unit tests for boundary error translation

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use std::collections::BTreeMap;
use vehicletype_core::{VehicleError, VehicleKind};
use vehicletype_server::error::{ErrorResponse, ServerError};

async fn render(err: ServerError) -> (StatusCode, ErrorResponse) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_not_found_body() {
    let (status, body) = render(VehicleError::not_found(VehicleKind::Car, 12).into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.status, 404);
    assert_eq!(
        body.errors,
        BTreeMap::from([("Car".to_string(), "Could not find car with id 12".to_string())])
    );
}

#[tokio::test]
async fn test_validation_body_keeps_every_field() {
    let fields = BTreeMap::from([
        ("make".to_string(), "Make cannot be null.".to_string()),
        ("year".to_string(), "Year cannot be null.".to_string()),
    ]);

    let (status, body) = render(VehicleError::Validation(fields.clone()).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.status, 400);
    assert_eq!(body.errors, fields);
}

#[tokio::test]
async fn test_malformed_body() {
    let (status, body) = render(ServerError::MalformedBody("EOF while parsing".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.errors.get("body").map(String::as_str), Some("EOF while parsing"));
}

#[tokio::test]
async fn test_storage_error_is_internal() {
    let (status, body) = render(VehicleError::Storage("connection refused".to_string()).into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.status, 500);
    assert_eq!(
        body.errors.get("error").map(String::as_str),
        Some("connection refused")
    );
}

#[test]
fn test_malformed_parameter_display() {
    let err = ServerError::MalformedParameter {
        field: "size".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid size: Input must be numeric");
}

#[test]
fn test_error_debug_format() {
    let err = ServerError::InternalError("test".to_string());
    let debug_str = format!("{:?}", err);
    assert!(debug_str.contains("InternalError"));
}
