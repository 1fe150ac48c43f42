//! In-memory storage
//!
//! Default store for local runs and tests. Records live in a `BTreeMap` keyed
//! by identity, so insertion order never leaks into query results.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;
use vehicletype_core::VehicleKind;

use crate::entity::VehicleEntity;
use crate::error::{StoreError, StoreResult};
use crate::traits::VehicleStore;

#[derive(Debug, Default)]
struct Tables {
    rows: BTreeMap<i64, VehicleEntity>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> StoreResult<i64> {
        self.last_id = self
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdentityExhausted)?;
        Ok(self.last_id)
    }
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records of every kind
    pub async fn len(&self) -> usize {
        self.tables.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VehicleStore for InMemoryStore {
    async fn find_by_id(&self, kind: VehicleKind, id: i64) -> StoreResult<Option<VehicleEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .rows
            .get(&id)
            .filter(|row| row.kind() == kind)
            .cloned())
    }

    async fn exists_by_id(&self, kind: VehicleKind, id: i64) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.rows.get(&id).is_some_and(|row| row.kind() == kind))
    }

    async fn find_all_by_make_asc(
        &self,
        kind: VehicleKind,
        page: u32,
        size: u32,
    ) -> StoreResult<Vec<VehicleEntity>> {
        let tables = self.tables.read().await;
        // BTreeMap iteration is id-ascending; a stable sort keeps that as the tie-break
        let mut rows: Vec<&VehicleEntity> =
            tables.rows.values().filter(|row| row.kind() == kind).collect();
        rows.sort_by(|a, b| a.make.cmp(&b.make));

        let offset = u64::from(page) * u64::from(size);
        Ok(rows
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(size as usize)
            .cloned()
            .collect())
    }

    async fn save(&self, mut entity: VehicleEntity) -> StoreResult<VehicleEntity> {
        let mut tables = self.tables.write().await;
        let kind = entity.kind();

        let known = entity
            .id
            .is_some_and(|id| tables.rows.get(&id).is_some_and(|row| row.kind() == kind));
        if !known {
            entity.id = Some(tables.next_id()?);
        }

        if let Some(id) = entity.id {
            debug!(%kind, id, inserted = !known, "Stored record");
            tables.rows.insert(id, entity.clone());
        }
        Ok(entity)
    }

    async fn delete_by_id(&self, kind: VehicleKind, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.rows.get(&id).is_some_and(|row| row.kind() == kind) {
            tables.rows.remove(&id);
            debug!(%kind, id, "Removed record");
        }
        Ok(())
    }
}
