//! Matchstick Core - Game engine
//!
//! This crate provides the core game logic for Matchstick:
//! - Triangular lattice geometry (vertices, edges, incidence)
//! - Reachability over claimed edges
//! - Closed hexagon detection (the win condition)
//! - Game state, legal targets and move application
//! - Game setup configuration
//! - Random playouts for simulation

pub mod grid;
pub mod traversal;
pub mod hexagon;
pub mod moves;
pub mod game;
pub mod config;
pub mod playout;

// Re-exports for convenient access
pub use grid::{Edge, Orientation, ParseError, Vertex, DIRECTIONS, MAX_COORDINATE};
pub use traversal::accessible_vertices_from;
pub use hexagon::{find_closed_hexagons, Hexagon};
pub use moves::{Move, MoveKind, Target};
pub use game::{GameState, MoveError, Player};
pub use config::{GameConfig, PlayerSetup, TurnPolicy, STARTING_MATCHSTICKS};
pub use playout::{random_playout, PlayoutOutcome};
