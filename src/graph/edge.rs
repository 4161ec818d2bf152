//! Weighted directed edge

use super::types::EntityId;
use serde::{Deserialize, Serialize};

/// A rating relation: `source` (rating entity) rated `target` (rated entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    /// Rating entity (edge goes FROM this node)
    pub source: EntityId,

    /// Rated entity (edge goes TO this node)
    pub target: EntityId,

    /// Normalized rating weight, never zero
    pub weight: f64,
}

impl WeightedEdge {
    pub fn new(source: impl Into<EntityId>, target: impl Into<EntityId>, weight: f64) -> Self {
        WeightedEdge {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.weight > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.weight < 0.0
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
