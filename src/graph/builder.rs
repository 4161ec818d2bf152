//! Graph construction from a scored matrix
//!
//! One builder, parametrized by the variant's weight predicate, produces the
//! full, positive and negative graphs. Because the positive and negative
//! predicates are disjoint and their union is the full predicate, the edge sets
//! partition by construction.

use super::edge::WeightedEdge;
use super::node::Entity;
use super::store::{GraphResult, GraphVariant, SocialGraph};
use super::types::CategoryLookup;
use crate::matrix::ScoredMatrix;
use tracing::debug;

/// The three graph variants derived from one scored matrix
#[derive(Debug, Clone)]
pub struct GraphSet {
    pub full: SocialGraph,
    pub positive: SocialGraph,
    pub negative: SocialGraph,
}

impl GraphSet {
    pub fn get(&self, variant: GraphVariant) -> &SocialGraph {
        match variant {
            GraphVariant::Full => &self.full,
            GraphVariant::Positive => &self.positive,
            GraphVariant::Negative => &self.negative,
        }
    }
}

/// Build one variant. Every entity becomes a node, in canonical order, even
/// without incident edges. Edges run from the rating entity (column) to the
/// rated entity (row); self-ratings are kept.
pub fn build_graph(
    scored: &ScoredMatrix,
    categories: &CategoryLookup,
    variant: GraphVariant,
) -> GraphResult<SocialGraph> {
    let mut graph = SocialGraph::new(variant);

    for (id, &net_score) in scored.entities.iter().zip(&scored.net_scores) {
        graph.add_node(Entity::new(id.clone(), categories.category_of(id), net_score))?;
    }

    for (rated_idx, rated) in scored.entities.iter().enumerate() {
        for (rater_idx, rater) in scored.entities.iter().enumerate() {
            let weight = scored.weight(rated_idx, rater_idx);
            if variant.accepts(weight) {
                graph.add_edge(WeightedEdge::new(rater.clone(), rated.clone(), weight))?;
            }
        }
    }

    debug!(
        variant = %variant,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );

    Ok(graph)
}

/// Build the full, positive and negative graphs
pub fn build_graphs(scored: &ScoredMatrix, categories: &CategoryLookup) -> GraphResult<GraphSet> {
    Ok(GraphSet {
        full: build_graph(scored, categories, GraphVariant::Full)?,
        positive: build_graph(scored, categories, GraphVariant::Positive)?,
        negative: build_graph(scored, categories, GraphVariant::Negative)?,
    })
}
