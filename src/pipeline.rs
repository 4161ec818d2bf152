//! End-to-end sociogram pipeline
//!
//! raw matrix -> normalize -> aggregate -> build graphs -> layout -> cohesion.
//! Each run owns all of its data; nothing is shared between runs.

use crate::algo::{attach_envelopes, compute_layout, find_groups, CohesionGroup, Layout};
use crate::config::SociogramConfig;
use crate::error::SociogramResult;
use crate::graph::{build_graphs, CategoryLookup, Entity, EntityId, GraphVariant, SocialGraph};
use crate::matrix::{
    acceptance_index, aggregate_scores, normalize_matrix, AcceptanceEntry, RatingMatrix,
    ScoredMatrix, ScoredRow,
};
use crate::rating::SymbolTable;
use serde::Serialize;
use tracing::info;

/// One graph variant with its layout and cohesion groups
#[derive(Debug, Clone, Serialize)]
pub struct GraphBundle {
    pub graph: SocialGraph,
    pub layout: Layout,
    /// Cohesion groups of the positive relation, envelopes over this bundle's layout
    pub groups: Vec<CohesionGroup>,
    /// Mutual pairs within this variant
    pub reciprocal_pairs: Vec<(EntityId, EntityId)>,
}

/// Everything an external renderer needs
#[derive(Debug, Clone, Serialize)]
pub struct SociogramReport {
    /// Entities in canonical order
    pub entities: Vec<Entity>,
    /// Raw tokens in canonical order with the net score appended
    pub scored_matrix: Vec<ScoredRow>,
    pub acceptance: Vec<AcceptanceEntry>,
    pub full: GraphBundle,
    pub positive: GraphBundle,
    pub negative: GraphBundle,
}

impl SociogramReport {
    pub fn bundle(&self, variant: GraphVariant) -> &GraphBundle {
        match variant {
            GraphVariant::Full => &self.full,
            GraphVariant::Positive => &self.positive,
            GraphVariant::Negative => &self.negative,
        }
    }

    pub fn to_json_pretty(&self) -> SociogramResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configured pipeline; reusable across runs
#[derive(Debug, Clone)]
pub struct SociogramPipeline {
    config: SociogramConfig,
    symbols: SymbolTable,
}

impl Default for SociogramPipeline {
    fn default() -> Self {
        SociogramPipeline {
            config: SociogramConfig::default(),
            symbols: SymbolTable::default(),
        }
    }
}

impl SociogramPipeline {
    pub fn new(config: SociogramConfig) -> SociogramResult<Self> {
        config.validate()?;
        let symbols = config.symbol_table()?;
        Ok(SociogramPipeline { config, symbols })
    }

    pub fn config(&self) -> &SociogramConfig {
        &self.config
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Normalize and aggregate only
    pub fn score(&self, matrix: &RatingMatrix) -> SociogramResult<ScoredMatrix> {
        let normalized = normalize_matrix(matrix, &self.symbols)?;
        Ok(aggregate_scores(&normalized))
    }

    /// Run every stage on a validated matrix
    pub fn run(&self, matrix: &RatingMatrix, categories: &CategoryLookup) -> SociogramResult<SociogramReport> {
        info!(entities = matrix.len(), "sociogram run started");

        let scored = self.score(matrix)?;
        let acceptance = acceptance_index(&scored);
        let graphs = build_graphs(&scored, categories)?;

        // Membership comes from the positive relation once; envelopes follow each layout
        let groups = find_groups(&graphs.positive, &self.config.cohesion);

        let bundle = |graph: SocialGraph| {
            let layout = compute_layout(&graph, &self.config.layout);
            let groups = attach_envelopes(groups.clone(), &layout, &self.config.cohesion);
            let reciprocal_pairs = graph.reciprocal_pairs();
            GraphBundle {
                graph,
                layout,
                groups,
                reciprocal_pairs,
            }
        };

        let entities: Vec<Entity> = graphs.full.nodes().cloned().collect();
        let full = bundle(graphs.full);
        let positive = bundle(graphs.positive);
        let negative = bundle(graphs.negative);

        info!(
            entities = entities.len(),
            full_edges = full.graph.edge_count(),
            positive_edges = positive.graph.edge_count(),
            negative_edges = negative.graph.edge_count(),
            groups = positive.groups.len(),
            "sociogram run finished"
        );

        Ok(SociogramReport {
            entities,
            scored_matrix: scored.rows(),
            acceptance,
            full,
            positive,
            negative,
        })
    }

    /// Parse CSV text, then run
    pub fn run_csv(&self, csv: &str, categories: &CategoryLookup) -> SociogramResult<SociogramReport> {
        let matrix = RatingMatrix::from_csv_str(csv)?;
        self.run(&matrix, categories)
    }
}
