//! Unit tests for StoreError display and conversion

use vehicletype_core::{VehicleError, VehicleKind};
use vehicletype_repository::StoreError;

#[test]
fn test_kind_mismatch_display() {
    let error = StoreError::KindMismatch {
        id: 4,
        expected: VehicleKind::Car,
        actual: VehicleKind::Truck,
    };

    assert_eq!(error.to_string(), "Record 4 is a truck, not a car");
}

#[test]
fn test_missing_details_display() {
    let error = StoreError::MissingDetails {
        id: 9,
        kind: VehicleKind::Motorcycle,
    };

    assert_eq!(error.to_string(), "Record 9 has no motorcycle details");
}

#[test]
fn test_other_display() {
    let error = StoreError::Other("disk full".to_string());
    assert_eq!(error.to_string(), "Storage error: disk full");
}

#[test]
fn test_migration_display() {
    let error = StoreError::Migration("syntax error".to_string());
    assert_eq!(error.to_string(), "Migration error: syntax error");
}

#[test]
fn test_conversion_into_vehicle_error() {
    let error: VehicleError = StoreError::IdentityExhausted.into();

    assert_eq!(
        error,
        VehicleError::Storage("Identity sequence exhausted".to_string())
    );
    assert!(!error.is_client_error());
}
