//! Game setup and turn policy

use crate::game::{GameState, Player};
use crate::grid::{Edge, Vertex, MAX_COORDINATE};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Matchsticks each player starts with
pub const STARTING_MATCHSTICKS: u32 = 20;

/// What a refused move does to the turn pointer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPolicy {
    /// Pass the turn even when a move is refused.
    /// Never applies once the game is over.
    #[serde(default)]
    pub advance_on_refusal: bool,
}

impl TurnPolicy {
    /// Refused moves still pass the turn
    pub fn advance_on_refusal() -> Self {
        Self {
            advance_on_refusal: true,
        }
    }
}

/// Starting seat for one player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    #[serde(default)]
    pub name: String,
    pub colour: String,
    pub start: Vertex,
}

/// Everything needed to set up a game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_matchsticks: u32,
    pub players: [PlayerSetup; 2],
    pub neutral_edges: Vec<Edge>,
    pub turn_policy: TurnPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_matchsticks: STARTING_MATCHSTICKS,
            players: [
                PlayerSetup {
                    name: String::new(),
                    colour: "red".to_string(),
                    start: Vertex::new(0, 0),
                },
                PlayerSetup {
                    name: String::new(),
                    colour: "blue".to_string(),
                    start: Vertex::new(1, 0),
                },
            ],
            neutral_edges: vec![Edge::south(0, 0)],
            turn_policy: TurnPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Load from a JSON file; missing fields fall back to defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the setup can start a game
    pub fn validate(&self) -> anyhow::Result<()> {
        let [first, second] = &self.players;
        if first.start == second.start {
            anyhow::bail!("Both players start on {}", first.start);
        }
        for seat in &self.players {
            if !seat.start.in_bounds() {
                anyhow::bail!(
                    "Start {} is beyond the playable range (|u|, |v| <= {})",
                    seat.start,
                    MAX_COORDINATE
                );
            }
        }
        if let Some(edge) = self.neutral_edges.iter().find(|edge| !edge.in_bounds()) {
            anyhow::bail!(
                "Neutral edge {} is beyond the playable range (|u|, |v| <= {})",
                edge,
                MAX_COORDINATE
            );
        }
        Ok(())
    }

    /// Set starting matchsticks
    pub fn with_matchsticks(mut self, matchsticks: u32) -> Self {
        self.starting_matchsticks = matchsticks;
        self
    }

    /// Set turn policy
    pub fn with_turn_policy(mut self, turn_policy: TurnPolicy) -> Self {
        self.turn_policy = turn_policy;
        self
    }

    /// Replace the neutral edges
    pub fn with_neutral_edges(mut self, edges: impl IntoIterator<Item = Edge>) -> Self {
        self.neutral_edges = edges.into_iter().collect();
        self
    }

    /// Build the opening position
    pub fn to_game_state(&self) -> GameState {
        let players = self.players.clone().map(|seat| {
            Player::new(seat.start, self.starting_matchsticks)
                .with_name(seat.name)
                .with_colour(seat.colour)
        });

        GameState::new(
            players,
            self.neutral_edges.iter().copied().collect(),
            self.turn_policy,
        )
    }
}
