//! Unit tests for DTO-boundary validation

use serde_json::json;
use vehicletype_core::{
    CarAttrs, CarDto, MotorcycleAttrs, TruckAttrs, VehicleDraft, VehicleError,
};

fn draft<A: vehicletype_core::KindAttrs>(value: serde_json::Value) -> VehicleDraft<A> {
    serde_json::from_value(value).expect("draft should deserialize")
}

#[test]
fn test_valid_car_draft() {
    let car = draft::<CarAttrs>(json!({
        "make": "Toyota",
        "model": "Corolla",
        "year": 2020,
        "numberOfDoors": 4
    }))
    .validate()
    .unwrap();

    assert_eq!(
        car,
        CarDto::new("Toyota", "Corolla", 2020, CarAttrs { number_of_doors: 4 })
    );
}

#[test]
fn test_draft_keeps_identity() {
    let car = draft::<CarAttrs>(json!({
        "id": 12,
        "make": "Honda",
        "model": "Civic",
        "year": 2018,
        "numberOfDoors": 2
    }))
    .validate()
    .unwrap();

    assert_eq!(car.id, Some(12));
}

#[test]
fn test_missing_fields_are_reported_per_field() {
    let errors = draft::<CarAttrs>(json!({})).validate().unwrap_err();

    assert_eq!(errors.get("make").map(String::as_str), Some("Make cannot be null."));
    assert_eq!(errors.get("model").map(String::as_str), Some("Model cannot be null."));
    assert_eq!(errors.get("year").map(String::as_str), Some("Year cannot be null."));
    assert_eq!(
        errors.get("numberOfDoors").map(String::as_str),
        Some("Number of doors cannot be null.")
    );
    assert_eq!(errors.len(), 4);
}

#[test]
fn test_empty_make_and_model() {
    let errors = draft::<CarAttrs>(json!({
        "make": "",
        "model": "",
        "year": 2020,
        "numberOfDoors": 4
    }))
    .validate()
    .unwrap_err();

    assert_eq!(errors["make"], "Make cannot be empty.");
    assert_eq!(errors["model"], "Model cannot be empty.");
}

#[test]
fn test_explicit_null_is_missing() {
    let errors = draft::<MotorcycleAttrs>(json!({
        "make": "Harley-Davidson",
        "model": "Street Glide",
        "year": null,
        "hasSidecar": null
    }))
    .validate()
    .unwrap_err();

    assert_eq!(errors["year"], "Year cannot be null.");
    assert_eq!(errors["hasSidecar"], "Has side car cannot be null");
}

#[test]
fn test_motorcycle_valid() {
    let bike = draft::<MotorcycleAttrs>(json!({
        "make": "Ural",
        "model": "Gear Up",
        "year": 2022,
        "hasSidecar": true
    }))
    .validate()
    .unwrap();

    assert!(bike.attrs.has_sidecar);
}

#[test]
fn test_truck_negative_capacity_fails() {
    let errors = draft::<TruckAttrs>(json!({
        "make": "Volvo",
        "model": "FH16",
        "year": 2021,
        "payloadCapacity": -1
    }))
    .validate()
    .unwrap_err();

    assert_eq!(errors["payloadCapacity"], "must be greater than 0");
}

#[test]
fn test_truck_zero_capacity_fails() {
    let errors = draft::<TruckAttrs>(json!({
        "make": "Volvo",
        "model": "FH16",
        "year": 2021,
        "payloadCapacity": 0.0
    }))
    .validate()
    .unwrap_err();

    assert!(errors.contains_key("payloadCapacity"));
}

#[test]
fn test_truck_capacity_digit_limits() {
    let too_many_fraction_digits = draft::<TruckAttrs>(json!({
        "make": "MAN",
        "model": "TGX",
        "year": 2020,
        "payloadCapacity": 1.005
    }))
    .validate()
    .unwrap_err();
    assert_eq!(
        too_many_fraction_digits["payloadCapacity"],
        "Payload capacity must be a number"
    );

    let too_many_integer_digits = draft::<TruckAttrs>(json!({
        "make": "MAN",
        "model": "TGX",
        "year": 2020,
        "payloadCapacity": 123456.0
    }))
    .validate()
    .unwrap_err();
    assert!(too_many_integer_digits.contains_key("payloadCapacity"));

    for capacity in [0.000000001, 12.340000001] {
        let near_two_decimals = draft::<TruckAttrs>(json!({
            "make": "MAN",
            "model": "TGX",
            "year": 2020,
            "payloadCapacity": capacity
        }))
        .validate()
        .unwrap_err();
        assert_eq!(
            near_two_decimals["payloadCapacity"],
            "Payload capacity must be a number"
        );
    }

    let truck = draft::<TruckAttrs>(json!({
        "make": "MAN",
        "model": "TGX",
        "year": 2020,
        "payloadCapacity": 99999.99
    }))
    .validate()
    .unwrap();
    assert_eq!(truck.attrs.payload_capacity, 99999.99);
}

#[test]
fn test_into_vehicle_wraps_validation_error() {
    let err = draft::<TruckAttrs>(json!({"make": "Scania"}))
        .into_vehicle()
        .unwrap_err();

    match err {
        VehicleError::Validation(fields) => {
            assert!(fields.contains_key("model"));
            assert!(fields.contains_key("payloadCapacity"));
            assert!(!fields.contains_key("make"));
        }
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_wrong_json_type_is_a_parse_error() {
    let result: Result<VehicleDraft<CarAttrs>, _> = serde_json::from_value(json!({
        "make": "Toyota",
        "model": "Corolla",
        "year": "twenty",
        "numberOfDoors": 4
    }));

    assert!(result.is_err());
}
