//! In-memory sociogram graph
//!
//! One directed weighted graph per variant. Nodes keep insertion order, which
//! the builder sets to the canonical (score-descending) order.

use super::edge::WeightedEdge;
use super::node::Entity;
use super::types::EntityId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which slice of the rating relation a graph holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphVariant {
    /// Every nonzero rating
    Full,
    /// Ratings with weight > 0
    Positive,
    /// Ratings with weight < 0
    Negative,
}

impl GraphVariant {
    pub const ALL: [GraphVariant; 3] = [GraphVariant::Full, GraphVariant::Positive, GraphVariant::Negative];

    /// Edge-weight predicate for this variant. Zero is never accepted.
    pub fn accepts(&self, weight: f64) -> bool {
        match self {
            GraphVariant::Full => weight != 0.0 && !weight.is_nan(),
            GraphVariant::Positive => weight > 0.0,
            GraphVariant::Negative => weight < 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphVariant::Full => "full",
            GraphVariant::Positive => "positive",
            GraphVariant::Negative => "negative",
        }
    }
}

impl fmt::Display for GraphVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during graph construction
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("Entity {0} already exists")]
    EntityAlreadyExists(EntityId),

    #[error("Edge {0} -> {1} already exists")]
    EdgeAlreadyExists(EntityId, EntityId),

    #[error("Weight {weight} does not belong in the {variant} graph")]
    WeightRejected { variant: GraphVariant, weight: f64 },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Directed weighted graph of entities
///
/// - nodes: EntityId -> Entity, in insertion order
/// - edges: flat list, in insertion order
/// - outgoing/incoming: node index -> edge indices
#[derive(Debug, Clone, Serialize)]
pub struct SocialGraph {
    variant: GraphVariant,

    nodes: IndexMap<EntityId, Entity>,

    edges: Vec<WeightedEdge>,

    #[serde(skip)]
    outgoing: Vec<Vec<usize>>,

    #[serde(skip)]
    incoming: Vec<Vec<usize>>,
}

impl SocialGraph {
    pub fn new(variant: GraphVariant) -> Self {
        SocialGraph {
            variant,
            nodes: IndexMap::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn variant(&self) -> GraphVariant {
        self.variant
    }

    /// Add an entity; isolated entities are kept
    pub fn add_node(&mut self, entity: Entity) -> GraphResult<usize> {
        if self.nodes.contains_key(&entity.id) {
            return Err(GraphError::EntityAlreadyExists(entity.id));
        }
        let (idx, _) = self.nodes.insert_full(entity.id.clone(), entity);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        Ok(idx)
    }

    /// Add a directed edge. Both endpoints must exist and the weight must
    /// satisfy the variant's predicate.
    pub fn add_edge(&mut self, edge: WeightedEdge) -> GraphResult<()> {
        if !self.variant.accepts(edge.weight) {
            return Err(GraphError::WeightRejected {
                variant: self.variant,
                weight: edge.weight,
            });
        }
        let source = self
            .index_of(&edge.source)
            .ok_or_else(|| GraphError::EntityNotFound(edge.source.clone()))?;
        let target = self
            .index_of(&edge.target)
            .ok_or_else(|| GraphError::EntityNotFound(edge.target.clone()))?;

        if self.find_edge(source, target).is_some() {
            return Err(GraphError::EdgeAlreadyExists(edge.source, edge.target));
        }

        let edge_idx = self.edges.len();
        self.edges.push(edge);
        self.outgoing[source].push(edge_idx);
        self.incoming[target].push(edge_idx);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Entities in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Entity> {
        self.nodes.values()
    }

    pub fn node(&self, id: &EntityId) -> Option<&Entity> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Dense position of an entity in insertion order
    pub fn index_of(&self, id: &EntityId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub fn entity_at(&self, idx: usize) -> Option<&Entity> {
        self.nodes.get_index(idx).map(|(_, e)| e)
    }

    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    fn find_edge(&self, source: usize, target: usize) -> Option<&WeightedEdge> {
        let target_id = self.nodes.get_index(target).map(|(id, _)| id)?;
        self.outgoing
            .get(source)?
            .iter()
            .map(|&e| &self.edges[e])
            .find(|e| &e.target == target_id)
    }

    /// Weight of `source -> target`, if present
    pub fn edge_weight(&self, source: &EntityId, target: &EntityId) -> Option<f64> {
        let s = self.index_of(source)?;
        let t = self.index_of(target)?;
        self.find_edge(s, t).map(|e| e.weight)
    }

    pub fn has_edge(&self, source: &EntityId, target: &EntityId) -> bool {
        self.edge_weight(source, target).is_some()
    }

    /// Edges leaving an entity (ratings it gave)
    pub fn outgoing_edges(&self, id: &EntityId) -> Vec<&WeightedEdge> {
        self.index_of(id)
            .map(|idx| self.outgoing[idx].iter().map(|&e| &self.edges[e]).collect())
            .unwrap_or_default()
    }

    /// Edges entering an entity (ratings it received)
    pub fn incoming_edges(&self, id: &EntityId) -> Vec<&WeightedEdge> {
        self.index_of(id)
            .map(|idx| self.incoming[idx].iter().map(|&e| &self.edges[e]).collect())
            .unwrap_or_default()
    }

    pub fn out_degree(&self, id: &EntityId) -> usize {
        self.index_of(id).map_or(0, |idx| self.outgoing[idx].len())
    }

    pub fn in_degree(&self, id: &EntityId) -> usize {
        self.index_of(id).map_or(0, |idx| self.incoming[idx].len())
    }

    /// Sum of weights on incoming edges of this variant
    pub fn received_weight(&self, id: &EntityId) -> f64 {
        self.incoming_edges(id).iter().map(|e| e.weight).sum()
    }

    /// Whether both `a -> b` and `b -> a` exist in this graph
    pub fn is_reciprocal(&self, a: &EntityId, b: &EntityId) -> bool {
        a != b && self.has_edge(a, b) && self.has_edge(b, a)
    }

    /// Mutual pairs, each once, ordered by the position of their first member
    pub fn reciprocal_pairs(&self) -> Vec<(EntityId, EntityId)> {
        let mut pairs = Vec::new();
        for (a_idx, a) in self.nodes.keys().enumerate() {
            for &e in &self.outgoing[a_idx] {
                let b = &self.edges[e].target;
                let b_idx = self.index_of(b).unwrap_or(a_idx);
                if b_idx > a_idx && self.has_edge(b, a) {
                    pairs.push((a.clone(), b.clone()));
                }
            }
        }
        pairs
    }
}
