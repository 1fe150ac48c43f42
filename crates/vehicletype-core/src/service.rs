//! Service adapter shared by every vehicle kind

use crate::error::VehicleResult;
use crate::event::{EventPublisher, VehicleEvent};
use crate::ports::{RepositoryPort, ServicePort};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// When `delete` publishes a `VehicleDeleted` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteEventPolicy {
    /// Publish after every delete call that returns, whatever the result
    #[default]
    Always,
    /// Publish only when the deletion was confirmed
    OnlyConfirmed,
}

/// Delegates to a repository port and publishes domain events
pub struct VehicleService<T> {
    repository: Arc<dyn RepositoryPort<T, i64>>,
    publisher: Arc<dyn EventPublisher<T>>,
    delete_policy: DeleteEventPolicy,
}

impl<T> VehicleService<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(
        repository: Arc<dyn RepositoryPort<T, i64>>,
        publisher: Arc<dyn EventPublisher<T>>,
    ) -> Self {
        Self {
            repository,
            publisher,
            delete_policy: DeleteEventPolicy::default(),
        }
    }

    pub fn with_delete_policy(mut self, policy: DeleteEventPolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    pub fn delete_policy(&self) -> DeleteEventPolicy {
        self.delete_policy
    }
}

#[async_trait]
impl<T> ServicePort<T, i64> for VehicleService<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> VehicleResult<T> {
        self.repository.find_by_id(id).await
    }

    async fn find_all_order_by_make_asc(&self, page: u32, size: u32) -> VehicleResult<Vec<T>> {
        self.repository.find_all_order_by_make_asc(page, size).await
    }

    async fn save(&self, record: T) -> VehicleResult<T> {
        let saved = self.repository.save(record).await?;
        self.publisher.publish(VehicleEvent::VehicleSaved(saved.clone()));
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> VehicleResult<bool> {
        let deleted = self.repository.delete(id).await?;
        if deleted || self.delete_policy == DeleteEventPolicy::Always {
            self.publisher.publish(VehicleEvent::VehicleDeleted(deleted));
        }
        Ok(deleted)
    }
}
