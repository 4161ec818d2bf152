//! Graph algorithms for the Sociogram engine
//!
//! Everything here works on a dense, id-agnostic [`GraphView`]; mapping entity
//! identifiers to view indices is the caller's job.

pub mod common;
pub mod community;
pub mod geometry;
pub mod layout;

pub use common::{GraphView, NodeId};
pub use community::{strongly_connected_components, SccResult};
pub use geometry::{centroid, convex_hull, HullError, HullResult, Point};
pub use layout::{circular_layout, spring_layout, LayoutError, LayoutResult, SpringConfig};
