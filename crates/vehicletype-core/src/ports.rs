//! Port contracts between the HTTP surface, the service layer and storage
//!
//! - [`ServicePort`]: business-facing operations, called by controllers
//! - [`RepositoryPort`]: persistence-facing operations, called by services
//!
//! Both share one shape, parameterized by the record type `T` and the
//! identity type `I`, and are implemented once for all vehicle kinds.

use crate::error::VehicleResult;
use async_trait::async_trait;

/// Persistence contract for one vehicle kind
///
/// # Implementation Notes
///
/// - `find_by_id` and `delete` fail with `NotFound` when the id is absent
/// - `find_all_order_by_make_asc` pages are zero-based and ordered by `make`;
///   a page past the end is empty, not an error
/// - `save` inserts when the record has no id and updates otherwise
/// - `delete` returns whether the record is confirmed gone afterwards
#[async_trait]
pub trait RepositoryPort<T, I>: Send + Sync
where
    T: Send + 'static,
    I: Send + 'static,
{
    async fn find_by_id(&self, id: I) -> VehicleResult<T>;

    async fn find_all_order_by_make_asc(&self, page: u32, size: u32) -> VehicleResult<Vec<T>>;

    async fn save(&self, record: T) -> VehicleResult<T>;

    async fn delete(&self, id: I) -> VehicleResult<bool>;
}

/// Business contract for one vehicle kind
///
/// Same operations as [`RepositoryPort`]; implementations add domain event
/// publication on `save` and `delete`.
#[async_trait]
pub trait ServicePort<T, I>: Send + Sync
where
    T: Send + 'static,
    I: Send + 'static,
{
    async fn find_by_id(&self, id: I) -> VehicleResult<T>;

    async fn find_all_order_by_make_asc(&self, page: u32, size: u32) -> VehicleResult<Vec<T>>;

    async fn save(&self, record: T) -> VehicleResult<T>;

    async fn delete(&self, id: I) -> VehicleResult<bool>;
}
