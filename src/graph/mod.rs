//! Sociogram graph model
//!
//! Entities rated by one another, joined by directed weighted edges. Three
//! variants are derived from one scored matrix: full, positive and negative.

pub mod builder;
pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use builder::{build_graph, build_graphs, GraphSet};
pub use edge::WeightedEdge;
pub use node::Entity;
pub use store::{GraphError, GraphResult, GraphVariant, SocialGraph};
pub use types::{Category, CategoryLookup, EntityId};
