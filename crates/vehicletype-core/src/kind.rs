//! Vehicle kind tag
//!
//! Every record, cache region, route and event channel is scoped by one of
//! these kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three kinds of vehicle the registry manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Car,
    Motorcycle,
    Truck,
}

impl VehicleKind {
    /// All kinds, in routing order
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Car, VehicleKind::Motorcycle, VehicleKind::Truck];

    /// Capitalized label, used as the key in error maps
    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Motorcycle => "Motorcycle",
            VehicleKind::Truck => "Truck",
        }
    }

    /// Lowercase name, used in messages and URL segments
    pub fn name(&self) -> &'static str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Motorcycle => "motorcycle",
            VehicleKind::Truck => "truck",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            VehicleKind::Car => "cars",
            VehicleKind::Motorcycle => "motorcycles",
            VehicleKind::Truck => "trucks",
        }
    }

    /// Name of the cache region holding this kind
    pub fn cache_region(&self) -> &'static str {
        self.plural()
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "car" => Ok(VehicleKind::Car),
            "motorcycle" => Ok(VehicleKind::Motorcycle),
            "truck" => Ok(VehicleKind::Truck),
            other => Err(format!("Unknown vehicle kind: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_labels() {
        assert_eq!(VehicleKind::Car.label(), "Car");
        assert_eq!(VehicleKind::Motorcycle.name(), "motorcycle");
        assert_eq!(VehicleKind::Truck.cache_region(), "trucks");
    }

    #[test]
    fn test_from_str_roundtrip() {
        for kind in VehicleKind::ALL {
            assert_eq!(kind.name().parse::<VehicleKind>().unwrap(), kind);
        }
        assert_eq!("TRUCK".parse::<VehicleKind>().unwrap(), VehicleKind::Truck);
        assert!("bicycle".parse::<VehicleKind>().is_err());
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(VehicleKind::Motorcycle.to_string(), "motorcycle");
    }
}
