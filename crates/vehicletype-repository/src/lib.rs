//! Storage layer for the vehicle type registry
//!
//! This crate persists vehicle records and puts an id-keyed cache in front
//! of them.
//!
//! # Features
//!
//! - **In-memory store**: default backend for local runs and tests
//! - **PostgreSQL store**: joined-table schema (feature `postgres`)
//! - **Caching**: one TTL-bounded cache region per vehicle kind
//! - **Async API**: non-blocking operations on Tokio
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use vehicletype_core::{CarAttrs, CarDto, RepositoryPort};
//! use vehicletype_repository::{CacheConfig, InMemoryStore, VehicleRepository};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(InMemoryStore::new());
//!     let cars = VehicleRepository::<CarAttrs>::new(store, CacheConfig::default());
//!
//!     let saved = cars
//!         .save(CarDto::new("Toyota", "Corolla", 2020, CarAttrs { number_of_doors: 4 }))
//!         .await?;
//!     let found = cars.find_by_id(saved.id.unwrap_or_default()).await?;
//!     println!("Found {:?}", found);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │  Service layer (vehicletype-core)      │
//! └──────────────┬─────────────────────────┘
//!                │ RepositoryPort<Vehicle<A>, i64>
//!                ↓
//! ┌────────────────────────────────────────┐
//! │  VehicleRepository<A>                  │
//! │  - RegionCache (cars/motorcycles/...)  │
//! │  - entity ⇄ DTO conversion             │
//! └──────────────┬─────────────────────────┘
//!                │ VehicleStore
//!       ┌────────┴────────┐
//!       ↓                 ↓
//! ┌──────────────┐  ┌──────────────────┐
//! │ InMemory     │  │  PostgreSQL      │
//! │ Store        │  │  Store           │
//! └──────────────┘  └──────────────────┘
//! ```

pub mod adapter;
pub mod cache;
pub mod config;
pub mod entity;
pub mod error;
pub mod memory;
pub mod models;
pub mod traits;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-exports - Configuration
pub use config::{ConfigError, StoreConfig, StoreSource};

// Re-exports - Error
pub use error::{StoreError, StoreResult};

// Re-exports - Storage
pub use adapter::VehicleRepository;
pub use cache::RegionCache;
pub use entity::{to_dto, to_entity, DetailsMapping, VehicleDetails, VehicleEntity};
pub use memory::InMemoryStore;
pub use models::{CacheConfig, CacheStats};
pub use traits::VehicleStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
