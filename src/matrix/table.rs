//! Raw rating matrix
//!
//! Square table of tokens keyed by entity on both axes. Cell `(row, column)`
//! holds the rating that `column` gave to `row`.

use super::csv::parse_records;
use crate::error::{SociogramError, SociogramResult};
use crate::graph::EntityId;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Validated square matrix of raw rating tokens
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    /// Shared row/column index, in row order
    entities: Vec<EntityId>,
    /// `cells[row][column]`, columns realigned to row order
    cells: Vec<Vec<String>>,
}

impl RatingMatrix {
    /// Build a matrix from row ids, column ids and row-major cells.
    ///
    /// Ids are trimmed. Row and column id sets must be identical and free of
    /// duplicates; columns are realigned to row order.
    pub fn new<R, C>(row_ids: R, column_ids: C, cells: Vec<Vec<String>>) -> SociogramResult<Self>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows: Vec<EntityId> = row_ids.into_iter().map(EntityId::new).collect();
        let columns: Vec<EntityId> = column_ids.into_iter().map(EntityId::new).collect();

        if rows.is_empty() {
            return Err(SociogramError::malformed("matrix has no entities"));
        }
        if rows.len() != columns.len() {
            return Err(SociogramError::malformed(format!(
                "matrix is not square: {} rows, {} columns",
                rows.len(),
                columns.len()
            )));
        }
        if cells.len() != rows.len() {
            return Err(SociogramError::malformed(format!(
                "expected {} rows of cells, found {}",
                rows.len(),
                cells.len()
            )));
        }
        if let Some((idx, row)) = cells
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(SociogramError::malformed(format!(
                "row {} has {} cells, expected {}",
                rows[idx],
                row.len(),
                columns.len()
            )));
        }

        check_unique(&rows, "row")?;
        check_unique(&columns, "column")?;

        let column_pos: HashMap<&EntityId, usize> =
            columns.iter().enumerate().map(|(i, id)| (id, i)).collect();

        let row_set: HashSet<&EntityId> = rows.iter().collect();
        if let Some(extra) = columns.iter().find(|id| !row_set.contains(id)) {
            return Err(SociogramError::malformed(format!(
                "column {} has no matching row",
                extra
            )));
        }
        if let Some(missing) = rows.iter().find(|id| !column_pos.contains_key(id)) {
            return Err(SociogramError::malformed(format!(
                "row {} has no matching column",
                missing
            )));
        }

        let order: Vec<usize> = rows.iter().map(|id| column_pos[id]).collect();
        let cells = cells
            .into_iter()
            .map(|row| order.iter().map(|&c| row[c].clone()).collect())
            .collect();

        debug!(entities = rows.len(), "rating matrix validated");

        Ok(RatingMatrix {
            entities: rows,
            cells,
        })
    }

    /// Parse CSV text: header row of column ids (first cell ignored), then one
    /// record per rated entity with its id in the first cell.
    pub fn from_csv_str(input: &str) -> SociogramResult<Self> {
        let mut records = parse_records(input)?.into_iter();
        let header = records
            .next()
            .ok_or_else(|| SociogramError::malformed("CSV input is empty"))?;
        let column_ids: Vec<String> = header.into_iter().skip(1).collect();

        let mut row_ids = Vec::new();
        let mut cells = Vec::new();
        for (line, mut record) in records.enumerate() {
            if record.len() != column_ids.len() + 1 {
                return Err(SociogramError::malformed(format!(
                    "CSV record {} has {} fields, header has {}",
                    line + 2,
                    record.len(),
                    column_ids.len() + 1
                )));
            }
            let tokens = record.split_off(1);
            row_ids.push(record.remove(0));
            cells.push(tokens);
        }

        Self::new(row_ids, column_ids, cells)
    }

    pub fn from_csv_reader<R: Read>(mut reader: R) -> SociogramResult<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::from_csv_str(&input)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> SociogramResult<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_csv_str(&input)
    }

    /// Shared row/column index
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Token that `column` gave to `row`, by position
    pub fn token(&self, row: usize, column: usize) -> &str {
        &self.cells[row][column]
    }

    /// Row-major cells
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }
}

fn check_unique(ids: &[EntityId], axis: &str) -> SociogramResult<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id) {
            return Err(SociogramError::malformed(format!(
                "duplicate {} id {}",
                axis, id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_columns_realigned_to_rows() {
        // Columns listed as B, A
        let matrix = RatingMatrix::new(
            ["A ", " B"],
            ["B", "A"],
            cells(&[&["3", ""], &["", "-1"]]),
        )
        .unwrap();

        assert_eq!(matrix.entities(), &[EntityId::new("A"), EntityId::new("B")]);
        // A received "3" from B
        assert_eq!(matrix.token(0, 1), "3");
        assert_eq!(matrix.token(0, 0), "");
        // B received "-1" from A
        assert_eq!(matrix.token(1, 0), "-1");
    }

    #[test]
    fn test_mismatched_index_sets() {
        let err = RatingMatrix::new(["A", "B"], ["A", "C"], cells(&[&["", ""], &["", ""]])).unwrap_err();
        assert!(matches!(err, SociogramError::MalformedMatrix { .. }));
    }

    #[test]
    fn test_not_square() {
        let err = RatingMatrix::new(["A", "B"], ["A"], cells(&[&[""], &[""]])).unwrap_err();
        assert!(matches!(err, SociogramError::MalformedMatrix { .. }));
    }

    #[test]
    fn test_duplicate_after_trim() {
        let err = RatingMatrix::new(["A", "A "], ["A", "A"], cells(&[&["", ""], &["", ""]])).unwrap_err();
        assert!(err.to_string().contains("duplicate row id A"));
    }

    #[test]
    fn test_ragged_rows() {
        let err = RatingMatrix::new(["A", "B"], ["A", "B"], cells(&[&["", ""], &[""]])).unwrap_err();
        assert!(matches!(err, SociogramError::MalformedMatrix { .. }));
    }

    #[test]
    fn test_empty_matrix() {
        let err = RatingMatrix::new(Vec::<String>::new(), Vec::<String>::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, SociogramError::MalformedMatrix { .. }));
    }

    #[test]
    fn test_from_csv() {
        let matrix = RatingMatrix::from_csv_str("Alumno,A,B\nA,,2!\nB,-1,\n").unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.token(0, 1), "2!");
        assert_eq!(matrix.token(1, 0), "-1");
    }

    #[test]
    fn test_from_csv_short_record() {
        let err = RatingMatrix::from_csv_str(",A,B\nA,1\nB,,\n").unwrap_err();
        assert!(err.to_string().contains("record 2"));
    }

    #[test]
    fn test_from_empty_csv() {
        assert!(RatingMatrix::from_csv_str("").is_err());
    }
}
