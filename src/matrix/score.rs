//! Score aggregation
//!
//! Normalizes tokens to weights, computes each entity's net score (row sum:
//! weights received), and reorders the matrix by descending net score. Ties
//! keep their input order, so aggregating an already-ordered matrix is a no-op.

use super::table::RatingMatrix;
use crate::error::SociogramResult;
use crate::graph::EntityId;
use crate::rating::SymbolTable;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Token matrix with numeric weights, still in input order
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatrix {
    pub entities: Vec<EntityId>,
    pub tokens: Vec<Vec<String>>,
    /// `weights[[row, column]]`: weight `column` gave to `row`
    pub weights: Array2<f64>,
}

impl NormalizedMatrix {
    /// Sum over every cell
    pub fn total_weight(&self) -> f64 {
        self.weights.sum()
    }
}

/// Normalize every cell of a rating matrix.
///
/// The first unknown token aborts with `UnrecognizedRatingToken`, naming its cell.
pub fn normalize_matrix(matrix: &RatingMatrix, symbols: &SymbolTable) -> SociogramResult<NormalizedMatrix> {
    let n = matrix.len();
    let entities = matrix.entities();
    let mut weights = Array2::<f64>::zeros((n, n));

    for row in 0..n {
        for column in 0..n {
            weights[[row, column]] = symbols.normalize_cell(
                matrix.token(row, column),
                entities[row].as_str(),
                entities[column].as_str(),
            )?;
        }
    }

    Ok(NormalizedMatrix {
        entities: entities.to_vec(),
        tokens: matrix.cells().to_vec(),
        weights,
    })
}

/// Matrix in canonical order with per-entity net scores
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatrix {
    /// Canonical order: net score descending, ties by input position
    pub entities: Vec<EntityId>,
    /// Raw tokens, rows and columns in canonical order
    pub tokens: Vec<Vec<String>>,
    /// Weights, rows and columns in canonical order
    pub weights: Array2<f64>,
    /// Net score of `entities[i]`
    pub net_scores: Vec<f64>,
}

/// One row of the scored table: the raw tokens received plus the net score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow {
    pub entity: EntityId,
    pub tokens: Vec<String>,
    pub net_score: f64,
}

impl ScoredMatrix {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn net_score(&self, id: &EntityId) -> Option<f64> {
        self.entities
            .iter()
            .position(|e| e == id)
            .map(|i| self.net_scores[i])
    }

    /// Weight `column` gave to `row`, by canonical position
    pub fn weight(&self, row: usize, column: usize) -> f64 {
        self.weights[[row, column]]
    }

    /// Sum over every cell
    pub fn total_weight(&self) -> f64 {
        self.weights.sum()
    }

    /// Scored table rows in canonical order, net score appended to each
    pub fn rows(&self) -> Vec<ScoredRow> {
        self.entities
            .iter()
            .zip(&self.tokens)
            .zip(&self.net_scores)
            .map(|((entity, tokens), &net_score)| ScoredRow {
                entity: entity.clone(),
                tokens: tokens.clone(),
                net_score,
            })
            .collect()
    }

    /// The reordered raw matrix, ready to be aggregated again
    pub fn to_rating_matrix(&self) -> SociogramResult<RatingMatrix> {
        RatingMatrix::new(
            self.entities.iter().map(|e| e.as_str()),
            self.entities.iter().map(|e| e.as_str()),
            self.tokens.clone(),
        )
    }
}

/// Compute net scores and reorder rows and columns into canonical order
pub fn aggregate_scores(normalized: &NormalizedMatrix) -> ScoredMatrix {
    let n = normalized.entities.len();
    // Each row is summed over columns in id order, so a net score does not
    // depend on where the columns currently sit
    let mut by_id: Vec<usize> = (0..n).collect();
    by_id.sort_by(|&a, &b| normalized.entities[a].as_str().cmp(normalized.entities[b].as_str()));
    let sums: Vec<f64> = (0..n)
        .map(|r| by_id.iter().map(|&c| normalized.weights[[r, c]]).sum())
        .collect();

    let mut order: Vec<usize> = (0..n).collect();
    // Stable: ties keep input order
    order.sort_by(|&a, &b| sums[b].total_cmp(&sums[a]));

    let weights = Array2::from_shape_fn((n, n), |(r, c)| normalized.weights[[order[r], order[c]]]);
    let tokens = order
        .iter()
        .map(|&r| {
            order
                .iter()
                .map(|&c| normalized.tokens[r][c].clone())
                .collect()
        })
        .collect();
    let entities: Vec<EntityId> = order.iter().map(|&i| normalized.entities[i].clone()).collect();
    let net_scores: Vec<f64> = order.iter().map(|&i| sums[i]).collect();

    debug!(
        entities = n,
        top = ?entities.first().map(|e| e.as_str()),
        max_score = net_scores.first().copied().unwrap_or(0.0),
        min_score = net_scores.last().copied().unwrap_or(0.0),
        "scores aggregated"
    );

    ScoredMatrix {
        entities,
        tokens,
        weights,
        net_scores,
    }
}

/// One entity's acceptance: net score and its 0-100 min-max index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceEntry {
    pub entity: EntityId,
    pub net_score: f64,
    pub index: f64,
}

/// Min-max scale net scores to `0..=100`, rounded to one decimal.
///
/// When every entity has the same score the index is 0 for all of them.
pub fn acceptance_index(scored: &ScoredMatrix) -> Vec<AcceptanceEntry> {
    let min = scored.net_scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scored.net_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    scored
        .entities
        .iter()
        .zip(&scored.net_scores)
        .map(|(entity, &net_score)| {
            let index = if range > 0.0 {
                ((net_score - min) / range * 1000.0).round() / 10.0
            } else {
                0.0
            };
            AcceptanceEntry {
                entity: entity.clone(),
                net_score,
                index,
            }
        })
        .collect()
}
