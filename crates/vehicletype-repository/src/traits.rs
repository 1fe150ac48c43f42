//! Storage collaborator trait
//!
//! [`VehicleStore`] is the persistence seam beneath the cached repository
//! adapters. One store holds records of every kind; each operation is scoped
//! to a kind so a car identity is never answered with a truck record.
//!
//! # Implementation Notes
//!
//! - Identities come from one sequence shared by all kinds
//! - `find_all_by_make_asc` orders by make, then by identity
//! - Saving an entity whose identity is unknown for its kind inserts it under
//!   a freshly assigned identity
//! - All implementations must be `Send + Sync` for use across async tasks

use async_trait::async_trait;
use vehicletype_core::VehicleKind;

use crate::entity::VehicleEntity;
use crate::StoreResult;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Look up a record of `kind` by identity
    async fn find_by_id(&self, kind: VehicleKind, id: i64) -> StoreResult<Option<VehicleEntity>>;

    /// Whether a record of `kind` exists under `id`
    async fn exists_by_id(&self, kind: VehicleKind, id: i64) -> StoreResult<bool>;

    /// One page of records of `kind`, ordered by make ascending
    ///
    /// `page` is zero-based; the page starts at offset `page * size`.
    async fn find_all_by_make_asc(
        &self,
        kind: VehicleKind,
        page: u32,
        size: u32,
    ) -> StoreResult<Vec<VehicleEntity>>;

    /// Insert or update a record, returning it with its identity
    async fn save(&self, entity: VehicleEntity) -> StoreResult<VehicleEntity>;

    /// Remove the record of `kind` under `id`; absent records are ignored
    async fn delete_by_id(&self, kind: VehicleKind, id: i64) -> StoreResult<()>;
}
