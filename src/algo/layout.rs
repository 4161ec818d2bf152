//! Layout engine adapter
//!
//! Spring layout over the graph's positive-weight structure, with a circular
//! fallback when there is nothing to attract.

use super::build_view;
use crate::config::LayoutConfig;
use crate::graph::{EntityId, SocialGraph};
use indexmap::IndexMap;
use serde::Serialize;
use sociogram_algorithms::{circular_layout, spring_layout, LayoutError, Point};
use tracing::debug;

/// How a layout was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Force-directed relaxation
    Spring,
    /// Static circle (no attracting edges, or fewer than two nodes)
    Circular,
}

/// Position of every entity of a graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub strategy: LayoutStrategy,
    positions: IndexMap<EntityId, Point>,
}

impl Layout {
    pub fn from_positions<I, S>(strategy: LayoutStrategy, positions: I) -> Self
    where
        I: IntoIterator<Item = (S, Point)>,
        S: Into<EntityId>,
    {
        Layout {
            strategy,
            positions: positions.into_iter().map(|(id, p)| (id.into(), p)).collect(),
        }
    }

    pub fn position(&self, id: &EntityId) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// `(entity, position)` pairs in graph node order
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &Point)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Lay out a graph.
///
/// Only positive weights attract, whatever the graph variant. Degenerate input
/// falls back to the circular arrangement instead of failing.
pub fn compute_layout(graph: &SocialGraph, config: &LayoutConfig) -> Layout {
    let view = build_view(graph, |w| w > 0.0);

    let (strategy, points) = match spring_layout(&view, &config.to_spring_config()) {
        Ok(points) => (LayoutStrategy::Spring, points),
        Err(LayoutError::DegenerateLayoutInput { node_count, edge_count }) => {
            debug!(
                variant = %graph.variant(),
                node_count,
                edge_count,
                "no attracting structure, using circular layout"
            );
            (LayoutStrategy::Circular, circular_layout(view.node_count, config.scale))
        }
    };

    let positions = graph
        .nodes()
        .map(|e| e.id.clone())
        .zip(points)
        .collect();

    Layout { strategy, positions }
}
