//! Domain events published after a vehicle record changes
//!
//! Events are fire-and-forget: publishing never fails a port call, and a
//! publisher with no subscribers simply drops the event.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Default broadcast channel capacity
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Change notification for one vehicle kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum VehicleEvent<T> {
    /// A record was persisted; carries the persisted record
    VehicleSaved(T),
    /// A delete was attempted; carries the confirmed deletion result
    VehicleDeleted(bool),
}

impl<T: Serialize> VehicleEvent<T> {
    /// Event variables keyed the way downstream templates expect them
    pub fn variables(&self) -> serde_json::Map<String, serde_json::Value> {
        let payload = match self {
            VehicleEvent::VehicleSaved(vehicle) => match serde_json::to_value(vehicle) {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "Event payload could not be serialized");
                    serde_json::Value::Null
                }
            },
            VehicleEvent::VehicleDeleted(deleted) => serde_json::Value::Bool(*deleted),
        };

        let mut variables = serde_json::Map::new();
        variables.insert("Vehicle".to_string(), payload);
        variables
    }
}

impl<T> VehicleEvent<T> {
    /// Event name as published
    pub fn name(&self) -> &'static str {
        match self {
            VehicleEvent::VehicleSaved(_) => "VehicleSaved",
            VehicleEvent::VehicleDeleted(_) => "VehicleDeleted",
        }
    }
}

/// Outbound port for domain events
pub trait EventPublisher<T>: Send + Sync {
    fn publish(&self, event: VehicleEvent<T>);
}

/// Publisher that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl<T> EventPublisher<T> for NoopPublisher {
    fn publish(&self, _event: VehicleEvent<T>) {}
}

/// In-process publisher backed by a tokio broadcast channel
///
/// When the channel is full the oldest events are dropped for lagging
/// subscribers.
pub struct BroadcastPublisher<T> {
    sender: Arc<broadcast::Sender<VehicleEvent<T>>>,
    capacity: usize,
}

impl<T: Clone + Send + 'static> BroadcastPublisher<T> {
    /// Create a publisher with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a publisher with a custom channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
            capacity,
        }
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<VehicleEvent<T>> {
        self.sender.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone + Send + 'static> Default for BroadcastPublisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BroadcastPublisher<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
            capacity: self.capacity,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> EventPublisher<T> for BroadcastPublisher<T> {
    fn publish(&self, event: VehicleEvent<T>) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(count) => debug!("Published {} to {} subscribers", name, count),
            Err(_) => debug!("Published {} but no subscribers", name),
        }
    }
}
