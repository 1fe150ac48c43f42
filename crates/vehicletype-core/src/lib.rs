//! Vehicle Type Registry - domain core
//!
//! This crate holds everything about vehicle records that does not touch I/O:
//! - Vehicle kinds and transfer objects
//! - DTO-boundary validation
//! - Error taxonomy
//! - Domain events and publishers
//! - Generic repository/service ports, the service adapter and the logging decorator

pub mod dto;
pub mod error;
pub mod event;
pub mod kind;
pub mod logging;
pub mod ports;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use dto::{
    CarAttrs, CarDto, KindAttrs, MotorcycleAttrs, MotorcycleDto, TruckAttrs, TruckDto, Vehicle,
};
pub use error::{FieldErrors, VehicleError, VehicleResult};
pub use event::{BroadcastPublisher, EventPublisher, NoopPublisher, VehicleEvent};
pub use kind::VehicleKind;
pub use logging::Logged;
pub use ports::{RepositoryPort, ServicePort};
pub use service::{DeleteEventPolicy, VehicleService};
pub use validation::{parse_count, parse_identifier, VehicleDraft};
