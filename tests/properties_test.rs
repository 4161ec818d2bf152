//! Property-based tests for the scoring and graph stages
//!
//! Invariants checked over random rating matrices:
//! - Conservation: net scores sum to the total matrix weight
//! - Permutation: reordering the input never changes an entity's net score
//! - Partition: positive and negative edges split the full edge set
//! - Cohesion: every group has 2+ members that all reach one another positively
//! - Idempotence: aggregating an aggregated matrix changes nothing

use proptest::prelude::*;
use sociogram::matrix::{aggregate_scores, normalize_matrix};
use sociogram::{
    CategoryLookup, EntityId, RatingMatrix, SocialGraph, SociogramConfig, SociogramPipeline, SymbolTable,
};
use std::collections::{HashMap, HashSet};

const TOKENS: &[&str] = &[
    "", "", "", "3", "2", "1", "0", "-1", "-2", "-3", "2!", "-1!!", "1!", "!!", "-1!", "1!!", "-2!",
];

// Weights with no exact binary representation
const INEXACT: &[(&str, f64)] = &[("a", 0.1), ("b", 0.7), ("c", 0.3), ("d", -0.1), ("e", -0.3)];

fn grid_of(tokens: &'static [&'static str]) -> impl Strategy<Value = Vec<Vec<String>>> {
    (1usize..8).prop_flat_map(move |n| {
        prop::collection::vec(
            prop::collection::vec(prop::sample::select(tokens).prop_map(String::from), n),
            n,
        )
    })
}

fn token_grid() -> impl Strategy<Value = Vec<Vec<String>>> {
    grid_of(TOKENS)
}

fn inexact_pipeline() -> SociogramPipeline {
    let config = SociogramConfig {
        symbols: Some(INEXACT.iter().map(|&(t, w)| (t.to_string(), w)).collect()),
        ..SociogramConfig::default()
    };
    SociogramPipeline::new(config).unwrap()
}

fn matrix(cells: &[Vec<String>]) -> RatingMatrix {
    let ids: Vec<String> = (0..cells.len()).map(|i| format!("E{}", i)).collect();
    RatingMatrix::new(&ids, &ids, cells.to_vec()).unwrap()
}

fn positively_reachable(graph: &SocialGraph, from: &EntityId) -> HashSet<EntityId> {
    let mut seen = HashSet::new();
    let mut stack = vec![from.clone()];
    while let Some(id) = stack.pop() {
        if !seen.insert(id.clone()) {
            continue;
        }
        for edge in graph.outgoing_edges(&id) {
            if edge.weight > 0.0 {
                stack.push(edge.target.clone());
            }
        }
    }
    seen
}

proptest! {
    #[test]
    fn prop_net_scores_conserve_total_weight(cells in token_grid()) {
        let symbols = SymbolTable::default();
        let normalized = normalize_matrix(&matrix(&cells), &symbols).unwrap();
        let scored = aggregate_scores(&normalized);

        let sum: f64 = scored.net_scores.iter().sum();
        prop_assert!((sum - normalized.total_weight()).abs() < 1e-9);
        prop_assert!((scored.total_weight() - normalized.total_weight()).abs() < 1e-9);
    }

    #[test]
    fn prop_canonical_order_is_descending(cells in token_grid()) {
        let scored = SociogramPipeline::default().score(&matrix(&cells)).unwrap();
        for pair in scored.net_scores.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn prop_permutation_keeps_net_scores(cells in token_grid(), rotate in 0usize..8) {
        let n = cells.len();
        let shift = rotate % n;
        let perm: Vec<usize> = (0..n).map(|i| (i + shift) % n).collect();

        let ids: Vec<String> = perm.iter().map(|&i| format!("E{}", i)).collect();
        let permuted: Vec<Vec<String>> = perm
            .iter()
            .map(|&r| perm.iter().map(|&c| cells[r][c].clone()).collect())
            .collect();

        let pipeline = SociogramPipeline::default();
        let original = pipeline.score(&matrix(&cells)).unwrap();
        let shuffled = pipeline
            .score(&RatingMatrix::new(&ids, &ids, permuted).unwrap())
            .unwrap();

        let by_id: HashMap<&EntityId, f64> = original
            .entities
            .iter()
            .zip(&original.net_scores)
            .map(|(id, &score)| (id, score))
            .collect();
        for (id, score) in shuffled.entities.iter().zip(&shuffled.net_scores) {
            prop_assert!((by_id[id] - score).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_aggregation_is_idempotent(cells in token_grid()) {
        let pipeline = SociogramPipeline::default();
        let once = pipeline.score(&matrix(&cells)).unwrap();
        let twice = pipeline.score(&once.to_rating_matrix().unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_aggregation_is_idempotent_with_overrides(
        cells in grid_of(&["", "0", "1", "-1", "a", "b", "c", "d", "e"])
    ) {
        let pipeline = inexact_pipeline();
        let once = pipeline.score(&matrix(&cells)).unwrap();
        let twice = pipeline.score(&once.to_rating_matrix().unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_variants_partition_full_edges(cells in token_grid()) {
        let report = SociogramPipeline::default()
            .run(&matrix(&cells), &CategoryLookup::new())
            .unwrap();

        prop_assert!(report.positive.graph.edges().iter().all(|e| e.weight > 0.0));
        prop_assert!(report.negative.graph.edges().iter().all(|e| e.weight < 0.0));
        prop_assert!(report.full.graph.edges().iter().all(|e| e.weight != 0.0));
        prop_assert_eq!(
            report.positive.graph.edge_count() + report.negative.graph.edge_count(),
            report.full.graph.edge_count()
        );

        for edge in report.full.graph.edges() {
            let graph = if edge.weight > 0.0 { &report.positive.graph } else { &report.negative.graph };
            prop_assert_eq!(graph.edge_weight(&edge.source, &edge.target), Some(edge.weight));
        }
    }

    #[test]
    fn prop_groups_are_mutually_reachable(cells in token_grid()) {
        let report = SociogramPipeline::default()
            .run(&matrix(&cells), &CategoryLookup::new())
            .unwrap();
        let graph = &report.positive.graph;

        let mut seen = HashSet::new();
        for group in &report.positive.groups {
            prop_assert!(group.len() >= 2);
            prop_assert!(group.envelope.is_some());
            for member in &group.members {
                prop_assert!(seen.insert(member.clone()), "{} in two groups", member);
                let reach = positively_reachable(graph, member);
                for other in &group.members {
                    prop_assert!(reach.contains(other));
                }
            }
        }
    }
}
