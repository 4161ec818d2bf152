//! Sociogram Engine
//!
//! Turns a square peer-rating matrix (who rated whom, and how) into a scored,
//! directed weighted social graph, lays it out so that mutually positive
//! individuals sit together, and partitions it into cohesion groups.
//!
//! # Pipeline
//!
//! 1. Symbol normalization: raw tokens to weights in `[-3, 3]` ([`rating`])
//! 2. Score aggregation: net scores, canonical order, acceptance index ([`matrix`])
//! 3. Graph construction: full, positive and negative variants ([`graph`])
//! 4. Layout: seeded spring layout over positive weights ([`algo::layout`])
//! 5. Cohesion: strongly connected components of the positive graph ([`algo::cohesion`])
//!
//! Rendering is left to the caller; every output type is `Serialize`.
//!
//! ## Example Usage
//!
//! ```rust
//! use sociogram::{Category, CategoryLookup, SociogramPipeline};
//!
//! let csv = ",A,B,C\nA,,3,\nB,3,,\nC,-1,-1,\n";
//!
//! let mut categories = CategoryLookup::new();
//! categories.insert("A", Category::Female);
//!
//! let report = SociogramPipeline::default().run_csv(csv, &categories).unwrap();
//!
//! assert_eq!(report.entities[0].id.as_str(), "A");
//! assert_eq!(report.positive.groups.len(), 1);
//! assert_eq!(report.negative.graph.edge_count(), 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod pipeline;
pub mod rating;

// Re-export main types for convenience
pub use algo::{CohesionGroup, Envelope, Layout, LayoutStrategy, Point};

pub use config::{CohesionConfig, LayoutConfig, SociogramConfig};

pub use error::{SociogramError, SociogramResult};

pub use graph::{
    Category, CategoryLookup, Entity, EntityId, GraphError, GraphResult, GraphSet, GraphVariant,
    SocialGraph, WeightedEdge,
};

pub use matrix::{AcceptanceEntry, RatingMatrix, ScoredMatrix, ScoredRow};

pub use pipeline::{GraphBundle, SociogramPipeline, SociogramReport};

pub use rating::SymbolTable;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
