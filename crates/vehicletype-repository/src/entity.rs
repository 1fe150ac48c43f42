//! Storage-side representation of vehicle records
//!
//! Every record is one common `{id, make, model, year}` row plus exactly one
//! kind-specific detail row sharing its identity. Conversion to and from the
//! transfer objects is total in the `to_entity` direction and fails when a
//! stored row belongs to another kind.

use crate::error::{StoreError, StoreResult};
use vehicletype_core::{CarAttrs, KindAttrs, MotorcycleAttrs, TruckAttrs, Vehicle, VehicleKind};

/// A stored vehicle record
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleEntity {
    /// Identity, assigned by the store on first save
    pub id: Option<i64>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub details: VehicleDetails,
}

impl VehicleEntity {
    pub fn kind(&self) -> VehicleKind {
        self.details.kind()
    }
}

/// Kind-specific detail row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VehicleDetails {
    Car { number_of_doors: i32 },
    Motorcycle { has_sidecar: bool },
    Truck { payload_capacity: f64 },
}

impl VehicleDetails {
    pub fn kind(&self) -> VehicleKind {
        match self {
            VehicleDetails::Car { .. } => VehicleKind::Car,
            VehicleDetails::Motorcycle { .. } => VehicleKind::Motorcycle,
            VehicleDetails::Truck { .. } => VehicleKind::Truck,
        }
    }
}

/// Mapping between kind attributes and detail rows
pub trait DetailsMapping: KindAttrs {
    fn into_details(self) -> VehicleDetails;

    /// `None` when the details belong to another kind
    fn from_details(details: VehicleDetails) -> Option<Self>;
}

impl DetailsMapping for CarAttrs {
    fn into_details(self) -> VehicleDetails {
        VehicleDetails::Car {
            number_of_doors: self.number_of_doors,
        }
    }

    fn from_details(details: VehicleDetails) -> Option<Self> {
        match details {
            VehicleDetails::Car { number_of_doors } => Some(CarAttrs { number_of_doors }),
            _ => None,
        }
    }
}

impl DetailsMapping for MotorcycleAttrs {
    fn into_details(self) -> VehicleDetails {
        VehicleDetails::Motorcycle {
            has_sidecar: self.has_sidecar,
        }
    }

    fn from_details(details: VehicleDetails) -> Option<Self> {
        match details {
            VehicleDetails::Motorcycle { has_sidecar } => Some(MotorcycleAttrs { has_sidecar }),
            _ => None,
        }
    }
}

impl DetailsMapping for TruckAttrs {
    fn into_details(self) -> VehicleDetails {
        VehicleDetails::Truck {
            payload_capacity: self.payload_capacity,
        }
    }

    fn from_details(details: VehicleDetails) -> Option<Self> {
        match details {
            VehicleDetails::Truck { payload_capacity } => Some(TruckAttrs { payload_capacity }),
            _ => None,
        }
    }
}

/// Convert a transfer object to its storage form
pub fn to_entity<A: DetailsMapping>(vehicle: Vehicle<A>) -> VehicleEntity {
    VehicleEntity {
        id: vehicle.id,
        make: vehicle.make,
        model: vehicle.model,
        year: vehicle.year,
        details: vehicle.attrs.into_details(),
    }
}

/// Convert a stored record back to a transfer object of kind `A`
pub fn to_dto<A: DetailsMapping>(entity: VehicleEntity) -> StoreResult<Vehicle<A>> {
    let id = entity.id.ok_or_else(|| {
        StoreError::Other(format!("{} record was returned without an identity", A::KIND))
    })?;

    let actual = entity.kind();
    let attrs = A::from_details(entity.details).ok_or(StoreError::KindMismatch {
        id,
        expected: A::KIND,
        actual,
    })?;

    Ok(Vehicle {
        id: Some(id),
        make: entity.make,
        model: entity.model,
        year: entity.year,
        attrs,
    })
}
