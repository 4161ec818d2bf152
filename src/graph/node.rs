//! Entity (graph node)

use super::types::{Category, EntityId};
use serde::{Deserialize, Serialize};

/// A rated/rating individual
///
/// The net score is shared by every graph variant built from the same
/// scored matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Trimmed, unique identifier
    pub id: EntityId,

    /// Category from the injected lookup
    pub category: Category,

    /// Sum of weights received
    pub net_score: f64,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>, category: Category, net_score: f64) -> Self {
        Entity {
            id: id.into(),
            category,
            net_score,
        }
    }
}
