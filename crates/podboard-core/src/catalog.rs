//! The fixed pod catalog.
//!
//! Pods are immutable catalog entries; none are created or destroyed while a
//! session is running. The default catalog matches the three physical study
//! pods, four seats each.

use serde::{Deserialize, Serialize};

/// Seats per pod unless the configuration says otherwise.
pub const DEFAULT_CAPACITY: u32 = 4;

/// A fixed-capacity study room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    /// Catalog identifier, e.g. "POD-A".
    pub id: String,
    /// Maximum students per time slot.
    pub capacity: u32,
}

impl Pod {
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}

/// The set of pods available for booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodCatalog {
    pods: Vec<Pod>,
}

impl PodCatalog {
    pub fn new(pods: Vec<Pod>) -> Self {
        Self { pods }
    }

    /// Look up a pod by id. Ids compare case-insensitively so shell input
    /// like `pod-a` resolves to `POD-A`.
    pub fn get(&self, id: &str) -> Option<&Pod> {
        self.pods.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    pub fn pods(&self) -> &[Pod] {
        &self.pods
    }

    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }
}

impl Default for PodCatalog {
    fn default() -> Self {
        Self::new(vec![
            Pod::new("POD-A", DEFAULT_CAPACITY),
            Pod::new("POD-B", DEFAULT_CAPACITY),
            Pod::new("POD-C", DEFAULT_CAPACITY),
        ])
    }
}
