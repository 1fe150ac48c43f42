//! DTO-boundary validation
//!
//! Inbound payloads are deserialized into all-optional drafts first, so a
//! missing field becomes a field error instead of a parse failure. Field rules
//! are declared with `validator` and flattened into a camelCase
//! field→message map.

use crate::dto::{CarAttrs, KindAttrs, MotorcycleAttrs, TruckAttrs, Vehicle};
use crate::error::{FieldErrors, VehicleError, VehicleResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use validator::{Validate, ValidationErrors};

/// Largest truck payload capacity with 5 integer digits
const MAX_PAYLOAD_CAPACITY: f64 = 100_000.0;

/// Unvalidated kind-specific attributes
pub trait AttrsDraft: DeserializeOwned + Validate + fmt::Debug + Send {
    /// Validated attribute type this draft produces
    type Attrs;

    /// Rules that do not fit a declarative validator
    fn check(&self, _errors: &mut FieldErrors) {}

    /// Convert into attributes; `None` while a required field is missing
    fn into_attrs(self) -> Option<Self::Attrs>;
}

/// Fields shared by every vehicle kind
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommonDraft {
    #[serde(default)]
    pub id: Option<i64>,

    #[validate(
        required(message = "Make cannot be null."),
        length(min = 1, message = "Make cannot be empty.")
    )]
    pub make: Option<String>,

    #[validate(
        required(message = "Model cannot be null."),
        length(min = 1, message = "Model cannot be empty.")
    )]
    pub model: Option<String>,

    #[validate(required(message = "Year cannot be null."))]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarDraft {
    #[validate(required(message = "Number of doors cannot be null."))]
    pub number_of_doors: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MotorcycleDraft {
    #[validate(required(message = "Has side car cannot be null"))]
    pub has_sidecar: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TruckDraft {
    #[validate(
        required(message = "Payload capacity cannot be null."),
        range(exclusive_min = 0.0, message = "must be greater than 0")
    )]
    pub payload_capacity: Option<f64>,
}

impl AttrsDraft for CarDraft {
    type Attrs = CarAttrs;

    fn into_attrs(self) -> Option<CarAttrs> {
        Some(CarAttrs {
            number_of_doors: self.number_of_doors?,
        })
    }
}

impl AttrsDraft for MotorcycleDraft {
    type Attrs = MotorcycleAttrs;

    fn into_attrs(self) -> Option<MotorcycleAttrs> {
        Some(MotorcycleAttrs {
            has_sidecar: self.has_sidecar?,
        })
    }
}

impl AttrsDraft for TruckDraft {
    type Attrs = TruckAttrs;

    fn check(&self, errors: &mut FieldErrors) {
        if let Some(capacity) = self.payload_capacity {
            if !fits_payload_digits(capacity) {
                errors
                    .entry("payloadCapacity".to_string())
                    .or_insert_with(|| "Payload capacity must be a number".to_string());
            }
        }
    }

    fn into_attrs(self) -> Option<TruckAttrs> {
        Some(TruckAttrs {
            payload_capacity: self.payload_capacity?,
        })
    }
}

/// Whether a capacity has at most 5 integer digits and 2 fraction digits
pub fn fits_payload_digits(value: f64) -> bool {
    if !value.is_finite() || value.abs() >= MAX_PAYLOAD_CAPACITY {
        return false;
    }
    // Display yields the shortest decimal text that round-trips, never exponent form
    match value.abs().to_string().split_once('.') {
        Some((_, fraction)) => fraction.len() <= 2,
        None => true,
    }
}

/// Wire shape of an inbound vehicle payload
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = ""))]
pub struct VehicleDraft<A: KindAttrs> {
    #[serde(flatten)]
    pub common: CommonDraft,
    #[serde(flatten)]
    pub attrs: A::Draft,
}

impl<A: KindAttrs> VehicleDraft<A> {
    /// Validate the draft, producing a record or every field error found
    pub fn validate(self) -> Result<Vehicle<A>, FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Err(e) = self.common.validate() {
            collect_field_errors(&e, &mut errors);
        }
        if let Err(e) = self.attrs.validate() {
            collect_field_errors(&e, &mut errors);
        }
        self.attrs.check(&mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let CommonDraft {
            id,
            make,
            model,
            year,
        } = self.common;

        match (make, model, year, self.attrs.into_attrs()) {
            (Some(make), Some(model), Some(year), Some(attrs)) => Ok(Vehicle {
                id,
                make,
                model,
                year,
                attrs,
            }),
            _ => {
                errors.insert("body".to_string(), "Incomplete vehicle record.".to_string());
                Err(errors)
            }
        }
    }

    /// Validate the draft, wrapping failures in the domain error
    pub fn into_vehicle(self) -> VehicleResult<Vehicle<A>> {
        self.validate().map_err(VehicleError::Validation)
    }
}

/// Flatten `validator` errors into the first message per camelCase field
fn collect_field_errors(source: &ValidationErrors, errors: &mut FieldErrors) {
    for (field, field_errors) in source.field_errors() {
        let Some(first) = field_errors.first() else {
            continue;
        };
        let message = first
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| first.code.to_string());
        let field: &str = field.as_ref();
        errors.entry(to_camel_case(field)).or_insert(message);
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse a numeric path or query parameter
///
/// Only plain digit strings that fit in an `i64` are accepted.
pub fn parse_identifier(field: &str, raw: &str) -> VehicleResult<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VehicleError::malformed(field, raw));
    }
    raw.parse::<i64>()
        .map_err(|_| VehicleError::malformed(field, raw))
}

/// Parse a numeric parameter that must fit in a `u32`
pub fn parse_count(field: &str, raw: &str) -> VehicleResult<u32> {
    let value = parse_identifier(field, raw)?;
    u32::try_from(value).map_err(|_| VehicleError::malformed(field, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("number_of_doors"), "numberOfDoors");
        assert_eq!(to_camel_case("make"), "make");
        assert_eq!(to_camel_case("hasSidecar"), "hasSidecar");
    }

    #[test]
    fn test_payload_digits() {
        assert!(fits_payload_digits(12345.67));
        assert!(fits_payload_digits(0.5));
        assert!(!fits_payload_digits(123456.0));
        assert!(!fits_payload_digits(1.234));
        assert!(!fits_payload_digits(0.000000001));
        assert!(!fits_payload_digits(12.340000001));
        assert!(fits_payload_digits(18000.75));
        assert!(!fits_payload_digits(f64::NAN));
    }

    #[test]
    fn test_parse_identifier() {
        assert_eq!(parse_identifier("id", "42").unwrap(), 42);
        assert_eq!(parse_identifier("id", "0").unwrap(), 0);
        assert!(parse_identifier("id", "-1").is_err());
        assert!(parse_identifier("id", "4a").is_err());
        assert!(parse_identifier("id", "").is_err());
        assert!(parse_identifier("id", "99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_count_rejects_overflow() {
        assert_eq!(parse_count("size", "10").unwrap(), 10);
        assert!(parse_count("size", "4294967296").is_err());
    }
}
