//! Cached repository adapter
//!
//! [`VehicleRepository`] implements the repository port for one vehicle kind
//! on top of a shared [`VehicleStore`] and that kind's cache region.

use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;
use vehicletype_core::{RepositoryPort, Vehicle, VehicleError, VehicleResult};

use crate::cache::RegionCache;
use crate::entity::{to_dto, to_entity, DetailsMapping};
use crate::models::CacheConfig;
use crate::traits::VehicleStore;

/// Repository port implementation for records of kind `A`
pub struct VehicleRepository<A: DetailsMapping> {
    store: Arc<dyn VehicleStore>,
    cache: Arc<RegionCache<Vehicle<A>>>,
    _kind: PhantomData<fn() -> A>,
}

impl<A: DetailsMapping> VehicleRepository<A> {
    /// Create an adapter with a fresh cache region for this kind
    pub fn new(store: Arc<dyn VehicleStore>, cache_config: CacheConfig) -> Self {
        let cache = Arc::new(RegionCache::new(A::KIND.cache_region(), cache_config));
        Self::with_cache(store, cache)
    }

    /// Create an adapter over an existing cache region
    pub fn with_cache(store: Arc<dyn VehicleStore>, cache: Arc<RegionCache<Vehicle<A>>>) -> Self {
        Self {
            store,
            cache,
            _kind: PhantomData,
        }
    }

    /// The cache region backing this adapter
    pub fn cache(&self) -> &Arc<RegionCache<Vehicle<A>>> {
        &self.cache
    }
}

#[async_trait]
impl<A: DetailsMapping> RepositoryPort<Vehicle<A>, i64> for VehicleRepository<A> {
    async fn find_by_id(&self, id: i64) -> VehicleResult<Vehicle<A>> {
        if let Some(cached) = self.cache.get(id).await {
            debug!(kind = %A::KIND, id, "Cache hit");
            return Ok(cached);
        }

        let generation = self.cache.generation();
        let entity = self
            .store
            .find_by_id(A::KIND, id)
            .await?
            .ok_or_else(|| VehicleError::not_found(A::KIND, id))?;
        let vehicle = to_dto::<A>(entity)?;

        self.cache.put_if_current(id, vehicle.clone(), generation).await;
        Ok(vehicle)
    }

    async fn find_all_order_by_make_asc(
        &self,
        page: u32,
        size: u32,
    ) -> VehicleResult<Vec<Vehicle<A>>> {
        let entities = self.store.find_all_by_make_asc(A::KIND, page, size).await?;
        entities
            .into_iter()
            .map(|entity| to_dto::<A>(entity).map_err(VehicleError::from))
            .collect()
    }

    async fn save(&self, record: Vehicle<A>) -> VehicleResult<Vehicle<A>> {
        let stored = self.store.save(to_entity(record)).await?;
        let saved = to_dto::<A>(stored)?;

        if let Some(id) = saved.id {
            self.cache.put(id, saved.clone()).await;
        }
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> VehicleResult<bool> {
        if !self.store.exists_by_id(A::KIND, id).await? {
            return Err(VehicleError::not_found(A::KIND, id));
        }

        self.cache.evict(id).await;
        self.store.delete_by_id(A::KIND, id).await?;
        // Invalidates reads that loaded the record before the delete committed
        self.cache.evict(id).await;

        let still_present = self.store.exists_by_id(A::KIND, id).await?;
        Ok(!still_present)
    }
}
