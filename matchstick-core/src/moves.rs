//! Move catalogue

use crate::grid::{Edge, Vertex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four move types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Expand,   // Claim a free edge at your vertex
    Move,     // Walk along your own edges
    Resupply, // Give back one of your edges
    Assault,  // Take an opponent or neutral edge at your vertex
}

impl MoveKind {
    pub const ALL: [MoveKind; 4] = [
        MoveKind::Expand,
        MoveKind::Move,
        MoveKind::Resupply,
        MoveKind::Assault,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MoveKind::Expand => "expand",
            MoveKind::Move => "move",
            MoveKind::Resupply => "resupply",
            MoveKind::Assault => "assault",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        MoveKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something a move can point at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Target {
    Vertex(Vertex),
    Edge(Edge),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Vertex(vertex) => write!(f, "{vertex}"),
            Target::Edge(edge) => write!(f, "{edge}"),
        }
    }
}

impl From<Vertex> for Target {
    fn from(vertex: Vertex) -> Self {
        Target::Vertex(vertex)
    }
}

impl From<Edge> for Target {
    fn from(edge: Edge) -> Self {
        Target::Edge(edge)
    }
}

/// A move by the current player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    Expand { edge: Edge },
    Move { to: Vertex },
    Resupply { edge: Edge },
    Assault { edge: Edge },
}

impl Move {
    /// Pair a kind with a target; `None` if the target has the wrong shape
    pub fn new(kind: MoveKind, target: Target) -> Option<Self> {
        match (kind, target) {
            (MoveKind::Expand, Target::Edge(edge)) => Some(Move::Expand { edge }),
            (MoveKind::Move, Target::Vertex(to)) => Some(Move::Move { to }),
            (MoveKind::Resupply, Target::Edge(edge)) => Some(Move::Resupply { edge }),
            (MoveKind::Assault, Target::Edge(edge)) => Some(Move::Assault { edge }),
            _ => None,
        }
    }

    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Expand { .. } => MoveKind::Expand,
            Move::Move { .. } => MoveKind::Move,
            Move::Resupply { .. } => MoveKind::Resupply,
            Move::Assault { .. } => MoveKind::Assault,
        }
    }

    pub fn target(&self) -> Target {
        match *self {
            Move::Expand { edge } | Move::Resupply { edge } | Move::Assault { edge } => {
                Target::Edge(edge)
            }
            Move::Move { to } => Target::Vertex(to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        assert_eq!(MoveKind::from_name("assault"), Some(MoveKind::Assault));
        assert_eq!(MoveKind::from_name("EXPAND"), Some(MoveKind::Expand));
        assert_eq!(MoveKind::from_name("pass"), None);
        for kind in MoveKind::ALL {
            assert_eq!(MoveKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_move_shape() {
        let edge = Edge::south(0, 0);
        let vertex = Vertex::new(1, 0);

        assert_eq!(Move::new(MoveKind::Expand, edge.into()), Some(Move::Expand { edge }));
        assert_eq!(Move::new(MoveKind::Move, vertex.into()), Some(Move::Move { to: vertex }));
        assert_eq!(Move::new(MoveKind::Move, edge.into()), None);
        assert_eq!(Move::new(MoveKind::Assault, vertex.into()), None);

        let mv = Move::Assault { edge };
        assert_eq!(mv.kind(), MoveKind::Assault);
        assert_eq!(mv.target(), Target::Edge(edge));
        assert_eq!(mv.to_string(), "assault S(0,0)");
    }
}
