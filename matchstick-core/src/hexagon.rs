//! Closed hexagon detection (the win condition)

use crate::grid::{Edge, Orientation, Vertex};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A unit hexagonal cell: the six edges joining the neighbours of `centre`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hexagon {
    pub centre: Vertex,
}

impl Hexagon {
    pub const fn around(centre: Vertex) -> Self {
        Self { centre }
    }

    /// The hexagon whose top boundary is the given south edge.
    /// Each hexagon has exactly one such edge.
    pub fn below(edge: Edge) -> Option<Self> {
        match edge.orientation {
            Orientation::South => Some(Self::around(Vertex::new(edge.u + 1, edge.v - 1))),
            Orientation::West | Orientation::East => None,
        }
    }

    /// Boundary edges, starting from the top south edge
    pub fn edges(&self) -> [Edge; 6] {
        let (a, b) = (self.centre.u - 1, self.centre.v + 1);
        [
            Edge::south(a, b),
            Edge::east(a + 1, b - 1),
            Edge::west(a + 2, b - 2),
            Edge::south(a + 1, b - 2),
            Edge::east(a, b - 2),
            Edge::west(a, b - 1),
        ]
    }

    pub fn edge_set(&self) -> FxHashSet<Edge> {
        self.edges().into_iter().collect()
    }

    pub fn is_closed_by(&self, edges: &FxHashSet<Edge>) -> bool {
        self.edges().iter().all(|edge| edges.contains(edge))
    }
}

/// All hexagons whose six boundary edges are in `edges`
pub fn find_closed_hexagons(edges: &FxHashSet<Edge>) -> FxHashSet<Hexagon> {
    edges
        .iter()
        .filter_map(|&edge| Hexagon::below(edge))
        .filter(|hexagon| hexagon.is_closed_by(edges))
        .collect()
}
