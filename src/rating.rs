//! Symbol normalization
//!
//! Maps raw rating tokens to weights in `[-3, 3]`. Plain tokens are signed
//! integers; mixed-response tokens carry a trailing `!` marker and map to
//! half steps. An empty cell is an abstention and weighs zero.

use crate::error::{SociogramError, SociogramResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Lowest weight a token may carry
pub const MIN_WEIGHT: f64 = -3.0;
/// Highest weight a token may carry
pub const MAX_WEIGHT: f64 = 3.0;

/// Marker character that distinguishes mixed-response tokens
pub const MIXED_MARKER: char = '!';

const DEFAULT_SYMBOLS: &[(&str, f64)] = &[
    ("3", 3.0),
    ("2", 2.0),
    ("1", 1.0),
    ("0", 0.0),
    ("-1", -1.0),
    ("-2", -2.0),
    ("-3", -3.0),
    // two positive, one negative
    ("2!", 1.5),
    ("-1!!", 1.5),
    // weak or ambiguous positive
    ("1!", 0.5),
    ("!!", 0.5),
    ("-1!", 0.5),
    // two negative, one positive
    ("1!!", -1.5),
    ("-2!", -1.5),
    ("", 0.0),
];

/// Lookup table from trimmed token to weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolTable {
    weights: BTreeMap<String, f64>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable {
            weights: DEFAULT_SYMBOLS
                .iter()
                .map(|&(token, weight)| (token.to_string(), weight))
                .collect(),
        }
    }
}

impl SymbolTable {
    /// Built-in table with extra or replacement entries merged on top.
    ///
    /// Every override must lie in `[-3, 3]`.
    pub fn with_overrides<'a, I>(overrides: I) -> SociogramResult<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let mut table = SymbolTable::default();
        for (token, &weight) in overrides {
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
                return Err(SociogramError::InvalidConfig(format!(
                    "symbol {:?} maps to {}, outside [{}, {}]",
                    token, weight, MIN_WEIGHT, MAX_WEIGHT
                )));
            }
            table.weights.insert(token.trim().to_string(), weight);
        }
        Ok(table)
    }

    /// Weight of a token, `None` if the token is not in the table
    pub fn weight(&self, token: &str) -> Option<f64> {
        self.weights.get(token.trim()).copied()
    }

    /// Weight of the token found at `(row, column)`.
    ///
    /// Unknown tokens fail with `UnrecognizedRatingToken` naming the cell.
    pub fn normalize_cell(&self, token: &str, row: &str, column: &str) -> SociogramResult<f64> {
        self.weight(token)
            .ok_or_else(|| SociogramError::UnrecognizedRatingToken {
                token: token.to_string(),
                row: row.to_string(),
                column: column.to_string(),
            })
    }

    /// All `(token, weight)` pairs in token order
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Whether a token is a mixed-response token
pub fn is_mixed(token: &str) -> bool {
    token.trim().ends_with(MIXED_MARKER)
}
