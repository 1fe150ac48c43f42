//! Component wiring
//!
//! Builds, per vehicle kind, the chain
//! `Logged<VehicleService>` → `Logged<VehicleRepository>` → shared store,
//! with one cache region and one event channel per kind.

use crate::config::ServerConfig;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vehicletype_core::{
    BroadcastPublisher, CarAttrs, DeleteEventPolicy, EventPublisher, Logged, MotorcycleAttrs,
    RepositoryPort, ServicePort, TruckAttrs, Vehicle, VehicleService,
};
use vehicletype_repository::{
    CacheConfig, DetailsMapping, RegionCache, VehicleRepository, VehicleStore,
};

/// Everything the HTTP layer and event consumers need for one kind
pub struct KindComponents<A: DetailsMapping> {
    pub service: Arc<dyn ServicePort<Vehicle<A>, i64>>,
    pub events: BroadcastPublisher<Vehicle<A>>,
    pub cache: Arc<RegionCache<Vehicle<A>>>,
}

impl<A: DetailsMapping> KindComponents<A> {
    pub fn build(
        store: Arc<dyn VehicleStore>,
        cache_config: CacheConfig,
        event_capacity: usize,
        delete_policy: DeleteEventPolicy,
    ) -> Self {
        let repository = VehicleRepository::<A>::new(store, cache_config);
        let cache = repository.cache().clone();
        let repository: Arc<dyn RepositoryPort<Vehicle<A>, i64>> =
            Arc::new(Logged::repository(repository, A::KIND));

        let events = BroadcastPublisher::with_capacity(event_capacity);
        let publisher: Arc<dyn EventPublisher<Vehicle<A>>> = Arc::new(events.clone());

        let service =
            VehicleService::new(repository, publisher).with_delete_policy(delete_policy);
        let service: Arc<dyn ServicePort<Vehicle<A>, i64>> =
            Arc::new(Logged::service(service, A::KIND));

        Self {
            service,
            events,
            cache,
        }
    }

    /// Log every event published for this kind until the channel closes
    pub fn spawn_event_logger(&self) -> JoinHandle<()> {
        let mut receiver = self.events.subscribe();
        let kind = A::KIND;

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        debug!(%kind, event = event.name(), variables = ?event.variables(), "Vehicle event");
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(%kind, skipped, "Event logger fell behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

/// Per-kind components over one shared store
pub struct Registry {
    pub cars: KindComponents<CarAttrs>,
    pub motorcycles: KindComponents<MotorcycleAttrs>,
    pub trucks: KindComponents<TruckAttrs>,
}

impl Registry {
    /// Open the configured store and wire every kind onto it
    pub async fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let store = config.storage.open().await?;
        Ok(Self::with_store(store, config))
    }

    /// Wire every kind onto an existing store
    pub fn with_store(store: Arc<dyn VehicleStore>, config: &ServerConfig) -> Self {
        let cache_config = config.cache.to_cache_config();
        let capacity = config.events.capacity;
        let policy = config.events.delete_policy;

        let registry = Self {
            cars: KindComponents::build(store.clone(), cache_config.clone(), capacity, policy),
            motorcycles: KindComponents::build(
                store.clone(),
                cache_config.clone(),
                capacity,
                policy,
            ),
            trucks: KindComponents::build(store, cache_config, capacity, policy),
        };

        info!(
            cache_enabled = config.cache.enabled,
            event_capacity = capacity,
            delete_policy = ?policy,
            "Vehicle registry wired"
        );
        registry
    }

    /// Start one event logger per kind
    pub fn spawn_event_loggers(&self) -> Vec<JoinHandle<()>> {
        vec![
            self.cars.spawn_event_logger(),
            self.motorcycles.spawn_event_logger(),
            self.trucks.spawn_event_logger(),
        ]
    }
}
