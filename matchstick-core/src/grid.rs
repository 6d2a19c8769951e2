//! Triangular lattice geometry with axial coordinates
//!
//! Vertices are lattice points `(u, v)`. Every edge is anchored at a lattice
//! point and tagged with one of three orientations, so each of the lattice's
//! edges has exactly one canonical name:
//!
//! | Tag | Endpoints of the edge anchored at `(u, v)` |
//! |-----|--------------------------------------------|
//! | `W` | `(u, v)` and `(u, v + 1)`                  |
//! | `S` | `(u, v)` and `(u + 1, v)`                  |
//! | `E` | `(u, v + 1)` and `(u + 1, v)`              |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// sin(60°), the vertical spacing between lattice rows
const SIN_60: f64 = 0.866_025_403_784_438_6;

/// Offsets (du, dv) to the six lattice neighbours.
/// Index order matches [`Vertex::protruding_edges`].
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),   // along S
    (1, -1),  // along E, anchored below
    (0, -1),  // along W, anchored below
    (-1, 0),  // along S, anchored left
    (-1, 1),  // along E, anchored left
    (0, 1),   // along W
];

/// Largest coordinate magnitude a playable vertex may have.
/// Every offset the engine applies stays well inside `i32` from here.
pub const MAX_COORDINATE: i32 = i32::MAX / 2;

// ============================================================================
// VERTEX
// ============================================================================

/// A lattice point in axial coordinates
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Vertex {
    pub u: i32,
    pub v: i32,
}

impl Vertex {
    pub const fn new(u: i32, v: i32) -> Self {
        Self { u, v }
    }

    /// Neighbour in direction (0-5), see [`DIRECTIONS`]
    pub fn neighbor(&self, direction: usize) -> Vertex {
        let (du, dv) = DIRECTIONS[direction % 6];
        Vertex::new(self.u + du, self.v + dv)
    }

    /// The six lattice neighbours, in [`DIRECTIONS`] order
    pub fn adjacent_vertices(&self) -> [Vertex; 6] {
        std::array::from_fn(|dir| self.neighbor(dir))
    }

    /// The six edges incident to this vertex, in canonical form.
    ///
    /// `protruding_edges()[d]` joins `self` and `self.neighbor(d)`.
    pub fn protruding_edges(&self) -> [Edge; 6] {
        let Vertex { u, v } = *self;
        [
            Edge::south(u, v),
            Edge::east(u, v - 1),
            Edge::west(u, v - 1),
            Edge::south(u - 1, v),
            Edge::east(u - 1, v),
            Edge::west(u, v),
        ]
    }

    /// Whether both coordinates are within [`MAX_COORDINATE`]
    pub fn in_bounds(&self) -> bool {
        let range = -MAX_COORDINATE..=MAX_COORDINATE;
        range.contains(&self.u) && range.contains(&self.v)
    }

    pub fn is_adjacent_to(&self, other: Vertex) -> bool {
        self.adjacent_vertices().contains(&other)
    }

    /// Cartesian projection for renderers; rules never need it.
    /// Adjacent vertices are exactly 1.0 apart.
    pub fn to_cartesian(&self) -> (f64, f64) {
        let x = self.u as f64 + 0.5 * self.v as f64;
        let y = -SIN_60 * self.v as f64;
        (x, y)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.u, self.v)
    }
}

impl FromStr for Vertex {
    type Err = ParseError;

    /// Parses `(u,v)`; whitespace around the numbers is allowed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Vertex(s.to_string());

        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (u, v) = inner.split_once(',').ok_or_else(invalid)?;
        let u = u.trim().parse::<i32>().map_err(|_| invalid())?;
        let v = v.trim().parse::<i32>().map_err(|_| invalid())?;

        Ok(Vertex::new(u, v))
    }
}

// ============================================================================
// EDGE
// ============================================================================

/// Orientation tag of an edge relative to its anchor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    West,
    South,
    East,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [Orientation::West, Orientation::South, Orientation::East];

    pub fn letter(self) -> char {
        match self {
            Orientation::West => 'W',
            Orientation::South => 'S',
            Orientation::East => 'E',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Orientation::West),
            'S' => Some(Orientation::South),
            'E' => Some(Orientation::East),
            _ => None,
        }
    }
}

/// A lattice edge: anchor vertex plus orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub u: i32,
    pub v: i32,
    pub orientation: Orientation,
}

impl Edge {
    pub const fn new(u: i32, v: i32, orientation: Orientation) -> Self {
        Self { u, v, orientation }
    }

    pub const fn west(u: i32, v: i32) -> Self {
        Self::new(u, v, Orientation::West)
    }

    pub const fn south(u: i32, v: i32) -> Self {
        Self::new(u, v, Orientation::South)
    }

    pub const fn east(u: i32, v: i32) -> Self {
        Self::new(u, v, Orientation::East)
    }

    pub fn anchor(&self) -> Vertex {
        Vertex::new(self.u, self.v)
    }

    /// The two vertices bounding this edge
    pub fn endpoints(&self) -> [Vertex; 2] {
        let Edge { u, v, orientation } = *self;
        match orientation {
            Orientation::West => [Vertex::new(u, v), Vertex::new(u, v + 1)],
            Orientation::South => [Vertex::new(u, v), Vertex::new(u + 1, v)],
            Orientation::East => [Vertex::new(u, v + 1), Vertex::new(u + 1, v)],
        }
    }

    /// Whether both endpoints are within [`MAX_COORDINATE`]
    pub fn in_bounds(&self) -> bool {
        self.anchor().in_bounds() && self.endpoints().iter().all(Vertex::in_bounds)
    }

    pub fn is_incident_to(&self, vertex: Vertex) -> bool {
        self.endpoints().contains(&vertex)
    }

    /// The endpoint opposite `from`, or `None` if `from` is not an endpoint
    pub fn far_endpoint(&self, from: Vertex) -> Option<Vertex> {
        match self.endpoints() {
            [a, b] if a == from => Some(b),
            [a, b] if b == from => Some(a),
            _ => None,
        }
    }

    /// The unique edge joining two adjacent vertices
    pub fn between(a: Vertex, b: Vertex) -> Option<Edge> {
        (0..6)
            .find(|&dir| a.neighbor(dir) == b)
            .map(|dir| a.protruding_edges()[dir])
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.orientation.letter(), self.anchor())
    }
}

impl FromStr for Edge {
    type Err = ParseError;

    /// Parses `S(u,v)`, `W(u,v)` or `E(u,v)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let tag = chars.next().ok_or_else(|| ParseError::Edge(s.to_string()))?;
        let orientation = Orientation::from_letter(tag).ok_or(ParseError::Orientation(tag))?;
        let anchor: Vertex = chars
            .as_str()
            .parse()
            .map_err(|_| ParseError::Edge(s.to_string()))?;

        Ok(Edge::new(anchor.u, anchor.v, orientation))
    }
}

/// Failure to read lattice notation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected a vertex like (u,v), got {0:?}")]
    Vertex(String),

    #[error("expected an edge like S(u,v), got {0:?}")]
    Edge(String),

    #[error("unknown orientation {0:?}, expected W, S or E")]
    Orientation(char),
}
