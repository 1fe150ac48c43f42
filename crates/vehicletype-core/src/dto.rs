//! Transfer objects for vehicle records
//!
//! A record is the shared `{id, make, model, year}` shape plus one
//! kind-specific attribute block. The attribute block is flattened into the
//! JSON object, so a car serializes as
//! `{"id":1,"make":"Toyota","model":"Corolla","year":2020,"numberOfDoors":4}`.

use crate::kind::VehicleKind;
use crate::validation::AttrsDraft;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind-specific attributes of a vehicle record
///
/// Implemented once per kind; everything generic over vehicles is
/// monomorphized over this trait.
pub trait KindAttrs:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Kind tag for these attributes
    const KIND: VehicleKind;

    /// Unvalidated wire shape of these attributes
    type Draft: AttrsDraft<Attrs = Self>;
}

/// A validated vehicle record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle<A> {
    /// Identity, absent until first persisted
    pub id: Option<i64>,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(flatten)]
    pub attrs: A,
}

impl<A: KindAttrs> Vehicle<A> {
    /// Create an unsaved record
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32, attrs: A) -> Self {
        Self {
            id: None,
            make: make.into(),
            model: model.into(),
            year,
            attrs,
        }
    }

    /// Copy of this record carrying the given identity
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Kind of this record
    pub fn kind(&self) -> VehicleKind {
        A::KIND
    }
}

/// Car attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarAttrs {
    pub number_of_doors: i32,
}

/// Motorcycle attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorcycleAttrs {
    pub has_sidecar: bool,
}

/// Truck attributes
///
/// Capacity is positive with at most 5 integer and 2 fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckAttrs {
    pub payload_capacity: f64,
}

pub type CarDto = Vehicle<CarAttrs>;
pub type MotorcycleDto = Vehicle<MotorcycleAttrs>;
pub type TruckDto = Vehicle<TruckAttrs>;

impl KindAttrs for CarAttrs {
    const KIND: VehicleKind = VehicleKind::Car;
    type Draft = crate::validation::CarDraft;
}

impl KindAttrs for MotorcycleAttrs {
    const KIND: VehicleKind = VehicleKind::Motorcycle;
    type Draft = crate::validation::MotorcycleDraft;
}

impl KindAttrs for TruckAttrs {
    const KIND: VehicleKind = VehicleKind::Truck;
    type Draft = crate::validation::TruckDraft;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_car_serializes_flat_camel_case() {
        let car = CarDto::new("Toyota", "Corolla", 2020, CarAttrs { number_of_doors: 4 }).with_id(7);
        let value = serde_json::to_value(&car).unwrap();

        assert_eq!(
            value,
            json!({"id": 7, "make": "Toyota", "model": "Corolla", "year": 2020, "numberOfDoors": 4})
        );
    }

    #[test]
    fn test_unsaved_record_serializes_null_id() {
        let bike = MotorcycleDto::new("Ducati", "Monster", 2019, MotorcycleAttrs { has_sidecar: false });
        let value = serde_json::to_value(&bike).unwrap();

        assert!(value["id"].is_null());
        assert_eq!(value["hasSidecar"], json!(false));
    }

    #[test]
    fn test_truck_deserializes() {
        let truck: TruckDto = serde_json::from_value(json!({
            "id": 3, "make": "Volvo", "model": "FH16", "year": 2021, "payloadCapacity": 25000.5
        }))
        .unwrap();

        assert_eq!(truck.id, Some(3));
        assert_eq!(truck.attrs.payload_capacity, 25000.5);
        assert_eq!(truck.kind(), VehicleKind::Truck);
    }
}
