//! Logging decorator for repository and service ports
//!
//! [`Logged`] wraps a port and logs before each call, after it succeeds and
//! after it fails, then hands back the inner result untouched. Errors are
//! observed, never swallowed or rewritten.
//!
//! ```ignore
//! let repository = Logged::repository(VehicleRepository::<CarAttrs>::new(store, cache), VehicleKind::Car);
//! let repository: Arc<dyn RepositoryPort<CarDto, i64>> = Arc::new(repository);
//! ```

use crate::error::VehicleResult;
use crate::kind::VehicleKind;
use crate::ports::{RepositoryPort, ServicePort};
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use tracing::{error, info};

/// Layer name for service ports
pub const SERVICE_LAYER: &str = "service";

/// Layer name for repository ports
pub const REPOSITORY_LAYER: &str = "repository";

/// Port decorator that logs every call exactly once per outcome
pub struct Logged<P> {
    inner: P,
    kind: VehicleKind,
    layer: &'static str,
}

impl<P> Logged<P> {
    pub fn new(inner: P, kind: VehicleKind, layer: &'static str) -> Self {
        Self { inner, kind, layer }
    }

    /// Wrap a service port
    pub fn service(inner: P, kind: VehicleKind) -> Self {
        Self::new(inner, kind, SERVICE_LAYER)
    }

    /// Wrap a repository port
    pub fn repository(inner: P, kind: VehicleKind) -> Self {
        Self::new(inner, kind, REPOSITORY_LAYER)
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    async fn observe_find_by_id<T, F>(&self, id: i64, call: F) -> VehicleResult<T>
    where
        T: fmt::Debug,
        F: Future<Output = VehicleResult<T>>,
    {
        let (kind, layer) = (self.kind, self.layer);
        info!(%kind, layer, "Searching {} with id {}.", kind, id);
        match call.await {
            Ok(found) => {
                info!(%kind, layer, "{} found {:?}.", kind.label(), found);
                Ok(found)
            }
            Err(err) => {
                error!(%kind, layer, error = %err, "Error finding {} with id {}.", kind, id);
                Err(err)
            }
        }
    }

    async fn observe_find_all<T, F>(&self, page: u32, size: u32, call: F) -> VehicleResult<Vec<T>>
    where
        F: Future<Output = VehicleResult<Vec<T>>>,
    {
        let (kind, layer) = (self.kind, self.layer);
        info!(
            %kind, layer, page, size,
            "Initiating query to find all {} ordered by make in ascending order.",
            kind.plural()
        );
        match call.await {
            Ok(found) => {
                info!(
                    %kind, layer,
                    "Found {} {} ordered by make in ascending order.",
                    found.len(),
                    kind.plural()
                );
                Ok(found)
            }
            Err(err) => {
                error!(
                    %kind, layer, error = %err,
                    "Error finding {} ordered by make in ascending order.",
                    kind.plural()
                );
                Err(err)
            }
        }
    }

    async fn observe_save<T, F>(&self, described: String, call: F) -> VehicleResult<T>
    where
        T: fmt::Debug,
        F: Future<Output = VehicleResult<T>>,
    {
        let (kind, layer) = (self.kind, self.layer);
        info!(%kind, layer, "Saving {} {}.", kind, described);
        match call.await {
            Ok(saved) => {
                info!(%kind, layer, "{} saved {:?}.", kind.label(), saved);
                Ok(saved)
            }
            Err(err) => {
                error!(%kind, layer, error = %err, "Error saving {} {}.", kind, described);
                Err(err)
            }
        }
    }

    async fn observe_delete<F>(&self, id: i64, call: F) -> VehicleResult<bool>
    where
        F: Future<Output = VehicleResult<bool>>,
    {
        let (kind, layer) = (self.kind, self.layer);
        info!(%kind, layer, "Deleting {} with id {}.", kind, id);
        match call.await {
            Ok(deleted) => {
                info!(%kind, layer, deleted, "{} deleted with id {}.", kind.label(), id);
                Ok(deleted)
            }
            Err(err) => {
                error!(%kind, layer, error = %err, "Error deleting {} with id {}.", kind, id);
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<P, T> RepositoryPort<T, i64> for Logged<P>
where
    P: RepositoryPort<T, i64>,
    T: fmt::Debug + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> VehicleResult<T> {
        self.observe_find_by_id(id, <P as RepositoryPort<T, i64>>::find_by_id(&self.inner, id))
            .await
    }

    async fn find_all_order_by_make_asc(&self, page: u32, size: u32) -> VehicleResult<Vec<T>> {
        let call = <P as RepositoryPort<T, i64>>::find_all_order_by_make_asc(&self.inner, page, size);
        self.observe_find_all(page, size, call).await
    }

    async fn save(&self, record: T) -> VehicleResult<T> {
        let described = format!("{:?}", record);
        self.observe_save(described, <P as RepositoryPort<T, i64>>::save(&self.inner, record))
            .await
    }

    async fn delete(&self, id: i64) -> VehicleResult<bool> {
        self.observe_delete(id, <P as RepositoryPort<T, i64>>::delete(&self.inner, id))
            .await
    }
}

#[async_trait]
impl<P, T> ServicePort<T, i64> for Logged<P>
where
    P: ServicePort<T, i64>,
    T: fmt::Debug + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> VehicleResult<T> {
        self.observe_find_by_id(id, <P as ServicePort<T, i64>>::find_by_id(&self.inner, id))
            .await
    }

    async fn find_all_order_by_make_asc(&self, page: u32, size: u32) -> VehicleResult<Vec<T>> {
        let call = <P as ServicePort<T, i64>>::find_all_order_by_make_asc(&self.inner, page, size);
        self.observe_find_all(page, size, call).await
    }

    async fn save(&self, record: T) -> VehicleResult<T> {
        let described = format!("{:?}", record);
        self.observe_save(described, <P as ServicePort<T, i64>>::save(&self.inner, record))
            .await
    }

    async fn delete(&self, id: i64) -> VehicleResult<bool> {
        self.observe_delete(id, <P as ServicePort<T, i64>>::delete(&self.inner, id))
            .await
    }
}
