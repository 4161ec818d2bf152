//! Community detection algorithms
//!
//! Strongly connected components over directed edges (Tarjan, iterative).

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

const UNVISITED: usize = usize::MAX;

/// Result of SCC algorithm
#[derive(Debug, Clone)]
pub struct SccResult {
    /// Map of Component ID -> List of NodeIds
    pub components: HashMap<usize, Vec<NodeId>>,
    /// Map of NodeId -> Component ID
    pub node_component: HashMap<NodeId, usize>,
}

impl SccResult {
    /// Components ordered by ID, members in view order.
    ///
    /// Component IDs are assigned by the dense index of each component's
    /// first member, so this ordering follows the order of the view.
    pub fn sorted_components(&self) -> Vec<&[NodeId]> {
        let mut ids: Vec<usize> = self.components.keys().copied().collect();
        ids.sort_unstable();
        ids.iter().map(|id| self.components[id].as_slice()).collect()
    }

    /// Components with at least `min_size` members, in ID order
    pub fn components_with_min_size(&self, min_size: usize) -> Vec<&[NodeId]> {
        self.sorted_components()
            .into_iter()
            .filter(|members| members.len() >= min_size)
            .collect()
    }
}

/// Strongly Connected Components (SCC)
///
/// Finds maximal sets of nodes where every node is reachable from every other
/// node following edge direction. Every node belongs to exactly one component;
/// isolated nodes form singleton components.
pub fn strongly_connected_components(view: &GraphView) -> SccResult {
    let n = view.node_count;

    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut raw_component = vec![UNVISITED; n];
    let mut raw_count = 0usize;
    let mut next_index = 0usize;

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }

        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;

        // Explicit call stack: (node, position of next successor to visit)
        let mut call: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = call.last_mut() {
            let v = frame.0;
            let successors = view.successors(v);

            if frame.1 < successors.len() {
                let w = successors[frame.1];
                frame.1 += 1;

                if index[w] == UNVISITED {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    call.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            call.pop();
            if let Some(&(parent, _)) = call.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }

            if lowlink[v] == index[v] {
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    raw_component[w] = raw_count;
                    if w == v {
                        break;
                    }
                }
                raw_count += 1;
            }
        }
    }

    // Renumber: component ID = dense index of its first member
    let mut first_member = vec![UNVISITED; raw_count];
    for (idx, &raw) in raw_component.iter().enumerate() {
        if first_member[raw] == UNVISITED {
            first_member[raw] = idx;
        }
    }

    let mut components: HashMap<usize, Vec<NodeId>> = HashMap::with_capacity(raw_count);
    let mut node_component = HashMap::with_capacity(n);

    for (idx, &raw) in raw_component.iter().enumerate() {
        let component_id = first_member[raw];
        let node_id = view.index_to_node[idx];
        components.entry(component_id).or_default().push(node_id);
        node_component.insert(node_id, component_id);
    }

    SccResult {
        components,
        node_component,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scc() {
        // Nodes: 1..=6
        // Cycle 1 -> 2 -> 3 -> 1, chain 3 -> 4, mutual 4 <-> 5, 6 isolated
        let view = GraphView::from_edges(
            vec![1, 2, 3, 4, 5, 6],
            &[
                (0, 1, 1.0),
                (1, 2, 1.0),
                (2, 0, 1.0),
                (2, 3, 1.0),
                (3, 4, 1.0),
                (4, 3, 1.0),
            ],
        );

        let result = strongly_connected_components(&view);

        assert_eq!(result.components.len(), 3);

        let c1 = result.node_component[&1];
        assert_eq!(c1, result.node_component[&2]);
        assert_eq!(c1, result.node_component[&3]);

        let c4 = result.node_component[&4];
        assert_eq!(c4, result.node_component[&5]);
        assert_ne!(c1, c4);

        assert_eq!(result.components[&result.node_component[&6]], vec![6]);
    }

    #[test]
    fn test_one_way_edge_is_not_a_component() {
        let view = GraphView::from_edges(vec![1, 2], &[(0, 1, 3.0)]);
        let result = strongly_connected_components(&view);

        assert_eq!(result.components.len(), 2);
        assert!(result.components_with_min_size(2).is_empty());
    }

    #[test]
    fn test_sorted_components_follow_view_order() {
        // 30 <-> 40 comes before 10 <-> 20 in view order
        let view = GraphView::from_edges(
            vec![30, 40, 10, 20, 50],
            &[(0, 1, 1.0), (1, 0, 1.0), (2, 3, 1.0), (3, 2, 1.0)],
        );
        let result = strongly_connected_components(&view);

        let groups = result.components_with_min_size(2);
        assert_eq!(groups, vec![&[30, 40][..], &[10, 20][..]]);
    }

    #[test]
    fn test_self_loop_is_singleton() {
        let view = GraphView::from_edges(vec![7], &[(0, 0, 2.0)]);
        let result = strongly_connected_components(&view);

        assert_eq!(result.components.len(), 1);
        assert_eq!(result.components[&0], vec![7]);
    }

    #[test]
    fn test_empty_view() {
        let view = GraphView::from_edges(Vec::new(), &[]);
        let result = strongly_connected_components(&view);
        assert!(result.components.is_empty());
        assert!(result.node_component.is_empty());
    }
}
