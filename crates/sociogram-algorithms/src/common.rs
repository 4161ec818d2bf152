//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of a weighted directed graph for algorithm execution.

use ndarray::Array2;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Vec<f64>,
}

impl GraphView {
    /// Build a view from a node list and `(source_idx, target_idx, weight)` triples.
    ///
    /// Edges whose endpoints fall outside `0..index_to_node.len()` are skipped.
    /// Edge order per source is preserved.
    pub fn from_edges(index_to_node: Vec<NodeId>, edges: &[(usize, usize, f64)]) -> Self {
        let node_count = index_to_node.len();
        let mut outgoing: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];

        for &(u, v, w) in edges {
            if u >= node_count || v >= node_count {
                continue;
            }
            outgoing[u].push((v, w));
        }

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut weights = Vec::new();
        out_offsets.push(0);
        for neighbors in outgoing {
            for (v, w) in neighbors {
                out_targets.push(v);
                weights.push(w);
            }
            out_offsets.push(out_targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            out_offsets,
            out_targets,
            weights,
        }
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get weights for outgoing edges of a node, aligned with `successors`
    pub fn weights(&self, idx: usize) -> &[f64] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.weights[start..end]
    }

    /// Symmetric attraction matrix built from positive edge weights only.
    ///
    /// `A[i][j] = A[j][i]` is the sum of the positive weights of `i -> j` and `j -> i`.
    /// Self-loops exert no force and are left out.
    pub fn attraction_matrix(&self) -> Array2<f64> {
        let n = self.node_count;
        let mut a = Array2::<f64>::zeros((n, n));
        for u in 0..n {
            for (&v, &w) in self.successors(u).iter().zip(self.weights(u)) {
                if w > 0.0 && u != v {
                    a[[u, v]] += w;
                    a[[v, u]] += w;
                }
            }
        }
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_edges() {
        // 10 -> 20 (2.0), 20 -> 10 (-1.0), 20 -> 30 (0.5)
        let view = GraphView::from_edges(
            vec![10, 20, 30],
            &[(0, 1, 2.0), (1, 0, -1.0), (1, 2, 0.5), (7, 0, 1.0)],
        );

        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 3);
        assert_eq!(view.successors(1), &[0, 2]);
        assert_eq!(view.weights(1), &[-1.0, 0.5]);
        assert!(view.successors(2).is_empty());
        assert_eq!(view.index_to_node[2], 30);
    }

    #[test]
    fn test_attraction_ignores_negative_weights() {
        let view = GraphView::from_edges(
            vec![0, 1, 2],
            &[(0, 1, 3.0), (1, 0, 1.5), (1, 2, -2.0), (2, 2, 1.0)],
        );

        let a = view.attraction_matrix();
        assert_eq!(a[[0, 1]], 4.5);
        assert_eq!(a[[1, 0]], 4.5);
        assert_eq!(a[[1, 2]], 0.0);
        assert_eq!(a[[2, 2]], 0.0);
    }
}
