//! Graph algorithms module
//!
//! Algorithms are implemented in the `sociogram-algorithms` crate.
//! This module provides the integration/adapter layer: it projects a
//! `SocialGraph` onto a dense `GraphView` and maps results back to entities.

pub mod cohesion;
pub mod layout;

use crate::graph::SocialGraph;
use sociogram_algorithms::GraphView;

// Re-export algorithms
pub use sociogram_algorithms::{
    circular_layout, convex_hull, spring_layout, strongly_connected_components, HullError,
    LayoutError, Point, SccResult, SpringConfig,
};

pub use cohesion::{attach_envelopes, cohesion_groups, envelope_for, find_groups, CohesionGroup, Envelope};
pub use layout::{compute_layout, Layout, LayoutStrategy};

/// Build a GraphView from a graph for algorithm execution.
///
/// Dense index `i` (and view NodeId `i`) is the entity at position `i` in the
/// graph's node order. Only edges whose weight passes `keep` are projected.
pub fn build_view<F>(graph: &SocialGraph, keep: F) -> GraphView
where
    F: Fn(f64) -> bool,
{
    let index_to_node = (0..graph.node_count() as u64).collect();

    let edges: Vec<(usize, usize, f64)> = graph
        .edges()
        .iter()
        .filter(|e| keep(e.weight))
        .filter_map(|e| {
            let u = graph.index_of(&e.source)?;
            let v = graph.index_of(&e.target)?;
            Some((u, v, e.weight))
        })
        .collect();

    GraphView::from_edges(index_to_node, &edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, Entity, GraphVariant, WeightedEdge};

    #[test]
    fn test_graph_view_projection() {
        let mut graph = SocialGraph::new(GraphVariant::Full);
        for id in ["A", "B", "C"] {
            graph.add_node(Entity::new(id, Category::Unknown, 0.0)).unwrap();
        }
        // A -> B -> C, C -> A negative
        graph.add_edge(WeightedEdge::new("A", "B", 2.0)).unwrap();
        graph.add_edge(WeightedEdge::new("B", "C", 1.0)).unwrap();
        graph.add_edge(WeightedEdge::new("C", "A", -3.0)).unwrap();

        let view = build_view(&graph, |_| true);
        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);
        assert_eq!(view.successors(0), &[1]);
        assert_eq!(view.weights(2), &[-3.0]);

        let positive = build_view(&graph, |w| w > 0.0);
        assert_eq!(positive.edge_count(), 2);
        assert!(positive.successors(2).is_empty());
        assert_eq!(positive.successors(0), &[1]);
    }
}
