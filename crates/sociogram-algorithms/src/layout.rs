//! Force-directed graph layout
//!
//! Fruchterman-Reingold spring model: every pair of nodes repels with `k²/d`,
//! nodes joined by a positive weight attract with `w·d²/k`. Relaxation runs for a
//! bounded number of steps under a linearly cooling temperature, then the result
//! is centred on the origin and rescaled.

use super::common::GraphView;
use super::geometry::Point;
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Minimum pair distance used in force computation
const MIN_DISTANCE: f64 = 0.01;

/// Spring layout configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SpringConfig {
    /// Seed for the initial random placement
    pub seed: u64,
    /// Maximum number of relaxation steps
    pub iterations: usize,
    /// Optimal pair distance. `None` uses `sqrt(1 / n)`
    pub k: Option<f64>,
    /// Largest absolute coordinate after rescaling
    pub scale: f64,
    /// Stop early once the mean step length falls below this value
    pub threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            iterations: 300,
            k: Some(1.5),
            scale: 1.0,
            threshold: 1e-4,
        }
    }
}

/// Errors raised by layout computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Degenerate layout input: {node_count} node(s), {edge_count} attracting edge(s)")]
    DegenerateLayoutInput { node_count: usize, edge_count: usize },
}

pub type LayoutResult<T> = Result<T, LayoutError>;

/// Compute spring layout positions, aligned with the view's dense indices.
///
/// Attraction comes from `GraphView::attraction_matrix`, so negative weights
/// never pull nodes together. Fails with `DegenerateLayoutInput` when there are
/// fewer than two nodes or no attracting edge.
pub fn spring_layout(view: &GraphView, config: &SpringConfig) -> LayoutResult<Vec<Point>> {
    let n = view.node_count;
    let attraction = view.attraction_matrix();
    let attracting_pairs = attraction.iter().filter(|w| **w > 0.0).count() / 2;

    if n < 2 || attracting_pairs == 0 {
        return Err(LayoutError::DegenerateLayoutInput {
            node_count: n,
            edge_count: attracting_pairs,
        });
    }

    let k = config
        .k
        .filter(|k| k.is_finite() && *k > 0.0)
        .unwrap_or_else(|| (1.0 / n as f64).sqrt());

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut pos = Array2::from_shape_fn((n, 2), |_| rng.gen::<f64>());

    let mut t = max_extent(&pos) * 0.1;
    let dt = t / (config.iterations as f64 + 1.0);
    let mut step = Array2::<f64>::zeros((n, 2));

    for _ in 0..config.iterations {
        for i in 0..n {
            let (mut dx_sum, mut dy_sum) = (0.0, 0.0);
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[[i, 0]] - pos[[j, 0]];
                let dy = pos[[i, 1]] - pos[[j, 1]];
                let d = dx.hypot(dy).max(MIN_DISTANCE);
                let force = k * k / (d * d) - attraction[[i, j]] * d / k;
                dx_sum += dx * force;
                dy_sum += dy * force;
            }

            let mut length = dx_sum.hypot(dy_sum);
            if length < MIN_DISTANCE {
                length = 0.1;
            }
            step[[i, 0]] = dx_sum * t / length;
            step[[i, 1]] = dy_sum * t / length;
        }

        pos += &step;
        t -= dt;

        let err = step.iter().map(|v| v * v).sum::<f64>().sqrt() / n as f64;
        if err < config.threshold {
            break;
        }
    }

    rescale(&mut pos, config.scale);

    Ok(pos
        .rows()
        .into_iter()
        .map(|row| Point::new(row[0], row[1]))
        .collect())
}

/// Static arrangement on a circle of radius `scale`, starting at angle zero.
///
/// A single node sits at the origin; an empty graph has no positions.
pub fn circular_layout(node_count: usize, scale: f64) -> Vec<Point> {
    match node_count {
        0 => Vec::new(),
        1 => vec![Point::new(0.0, 0.0)],
        n => (0..n)
            .map(|i| {
                let theta = std::f64::consts::TAU * i as f64 / n as f64;
                Point::new(scale * theta.cos(), scale * theta.sin())
            })
            .collect(),
    }
}

fn max_extent(pos: &Array2<f64>) -> f64 {
    pos.axis_iter(Axis(1))
        .map(|col| {
            let (lo, hi) = col
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
            hi - lo
        })
        .fold(0.0, f64::max)
}

/// Centre on the origin and scale so the largest absolute coordinate is `scale`
fn rescale(pos: &mut Array2<f64>, scale: f64) {
    if let Some(mean) = pos.mean_axis(Axis(0)) {
        *pos -= &mean;
    }
    let lim = pos.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if lim > 0.0 {
        pos.mapv_inplace(|v| v * scale / lim);
    }
}
