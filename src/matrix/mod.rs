//! Rating matrix ingestion and score aggregation

mod csv;
pub mod score;
pub mod table;

pub use score::{
    acceptance_index, aggregate_scores, normalize_matrix, AcceptanceEntry, NormalizedMatrix,
    ScoredMatrix, ScoredRow,
};
pub use table::RatingMatrix;
