//! Cohesion partitioner
//!
//! Cohesion groups are the strongly connected components of the positive
//! relation with at least two members. Each group gets an envelope over its
//! members' layout coordinates: the convex hull when it spans an area,
//! otherwise a small disk around the members' centroid.

use super::build_view;
use super::layout::Layout;
use crate::config::CohesionConfig;
use crate::graph::{EntityId, SocialGraph};
use serde::Serialize;
use sociogram_algorithms::{centroid, convex_hull, strongly_connected_components, Point};
use tracing::debug;

/// Enclosing shape of a group, for visual grouping only
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Envelope {
    /// Convex hull vertices, counter-clockwise
    Hull { vertices: Vec<Point> },
    /// Disk around the members' centroid
    Disk { center: Point, radius: f64 },
}

/// A strongly connected set of mutually reachable entities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohesionGroup {
    /// Members in graph node order
    pub members: Vec<EntityId>,
    /// `None` only when some member has no position in the layout
    pub envelope: Option<Envelope>,
}

impl CohesionGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.members.contains(id)
    }
}

/// Member sets of the cohesion groups, ordered by their first member's position.
///
/// Only positive edges are followed, whatever the graph variant.
pub fn find_groups(graph: &SocialGraph, config: &CohesionConfig) -> Vec<Vec<EntityId>> {
    let view = build_view(graph, |w| w > 0.0);
    let scc = strongly_connected_components(&view);

    let groups: Vec<Vec<EntityId>> = scc
        .components_with_min_size(config.effective_min_group_size())
        .into_iter()
        .map(|members| {
            members
                .iter()
                .filter_map(|&node| graph.entity_at(node as usize))
                .map(|e| e.id.clone())
                .collect()
        })
        .collect();

    debug!(
        components = scc.components.len(),
        groups = groups.len(),
        "cohesion groups found"
    );

    groups
}

/// Envelope of a member set over a layout.
///
/// Three or more members with a proper hull get the hull; two members, or a
/// collinear or coincident set, get a disk at the centroid.
pub fn envelope_for(members: &[EntityId], layout: &Layout, config: &CohesionConfig) -> Option<Envelope> {
    let points: Vec<Point> = members
        .iter()
        .map(|id| layout.position(id))
        .collect::<Option<_>>()?;

    if points.len() >= 3 {
        match convex_hull(&points) {
            Ok(vertices) => return Some(Envelope::Hull { vertices }),
            Err(err) => debug!(members = points.len(), %err, "hull unavailable, using disk"),
        }
    }

    centroid(&points).map(|center| Envelope::Disk {
        center,
        radius: config.disk_radius,
    })
}

/// Partition a graph's positive relation into cohesion groups with envelopes
pub fn cohesion_groups(graph: &SocialGraph, layout: &Layout, config: &CohesionConfig) -> Vec<CohesionGroup> {
    attach_envelopes(find_groups(graph, config), layout, config)
}

/// Pair precomputed member sets with envelopes over `layout`
pub fn attach_envelopes(
    groups: Vec<Vec<EntityId>>,
    layout: &Layout,
    config: &CohesionConfig,
) -> Vec<CohesionGroup> {
    groups
        .into_iter()
        .map(|members| {
            let envelope = envelope_for(&members, layout, config);
            CohesionGroup { members, envelope }
        })
        .collect()
}
