//! Reachability over claimed edges

use crate::grid::{Edge, Vertex};
use rustc_hash::FxHashSet;

/// Every vertex reachable from `origin` by walking `walkable` edges.
///
/// Edges touching `forbidden` are never crossed, so paths can neither pass
/// through nor end on it. Each edge is crossed at most once. `origin` itself
/// is not part of the result, even when a cycle leads back to it.
///
/// `forbidden` must differ from `origin`.
pub fn accessible_vertices_from(
    origin: Vertex,
    walkable: &FxHashSet<Edge>,
    forbidden: Vertex,
) -> FxHashSet<Vertex> {
    debug_assert_ne!(origin, forbidden, "origin cannot be its own barrier");

    let mut reached = FxHashSet::default();
    let mut traversed: FxHashSet<Edge> = FxHashSet::default();
    let mut stack = vec![origin];

    while let Some(vertex) = stack.pop() {
        for edge in vertex.protruding_edges() {
            if !walkable.contains(&edge)
                || edge.is_incident_to(forbidden)
                || !traversed.insert(edge)
            {
                continue;
            }

            if let Some(next) = edge.far_endpoint(vertex) {
                if reached.insert(next) {
                    stack.push(next);
                }
            }
        }
    }

    reached.remove(&origin);
    reached
}
