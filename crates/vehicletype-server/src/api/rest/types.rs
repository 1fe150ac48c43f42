//! Request and response types

use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use vehicletype_core::{CarDto, KindAttrs, MotorcycleDto, ServicePort, TruckDto, Vehicle};
use vehicletype_repository::{CacheStats, RegionCache};

/// State shared by the routes of one vehicle kind
#[derive(Clone)]
pub struct KindState<A: KindAttrs> {
    pub service: Arc<dyn ServicePort<Vehicle<A>, i64>>,
    /// Page size used when `/all` has no `size` parameter
    pub default_page_size: u32,
}

impl<A: KindAttrs> KindState<A> {
    pub fn new(service: Arc<dyn ServicePort<Vehicle<A>, i64>>, default_page_size: u32) -> Self {
        Self {
            service,
            default_page_size,
        }
    }
}

/// Cache regions reported by `/health`
#[derive(Clone)]
pub struct HealthState {
    cars: Arc<RegionCache<CarDto>>,
    motorcycles: Arc<RegionCache<MotorcycleDto>>,
    trucks: Arc<RegionCache<TruckDto>>,
}

impl HealthState {
    pub fn new(registry: &Registry) -> Self {
        Self {
            cars: registry.cars.cache.clone(),
            motorcycles: registry.motorcycles.cache.clone(),
            trucks: registry.trucks.cache.clone(),
        }
    }

    /// Statistics keyed by region name
    pub fn cache_reports(&self) -> BTreeMap<String, CacheReport> {
        BTreeMap::from([
            (self.cars.region().to_string(), CacheReport::from(&self.cars.stats())),
            (
                self.motorcycles.region().to_string(),
                CacheReport::from(&self.motorcycles.stats()),
            ),
            (self.trucks.region().to_string(), CacheReport::from(&self.trucks.stats())),
        ])
    }
}

/// Statistics of one cache region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheReport {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}

impl From<&CacheStats> for CacheReport {
    fn from(stats: &CacheStats) -> Self {
        Self {
            entries: stats.size,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub caches: BTreeMap<String, CacheReport>,
}

/// `/all` query parameters
///
/// Kept as raw strings so non-numeric input is reported with the same
/// message as a malformed path id.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub size: Option<String>,
}
