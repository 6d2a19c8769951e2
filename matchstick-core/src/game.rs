//! Game state, legal targets and move application

use crate::config::{GameConfig, TurnPolicy};
use crate::grid::{Edge, Vertex};
use crate::hexagon::{find_closed_hexagons, Hexagon};
use crate::moves::{Move, MoveKind, Target};
use crate::traversal::accessible_vertices_from;
use rustc_hash::FxHashSet;

// ============================================================================
// CORE TYPES
// ============================================================================

/// One side of the game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub matchsticks: u32,
    pub position: Vertex,
    pub owned_edges: FxHashSet<Edge>,
    /// Presentation tag, never read by the rules
    pub colour: String,
}

impl Player {
    pub fn new(position: Vertex, matchsticks: u32) -> Self {
        Self {
            name: String::new(),
            matchsticks,
            position,
            owned_edges: FxHashSet::default(),
            colour: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = colour.into();
        self
    }

    pub fn with_edges(mut self, edges: impl IntoIterator<Item = Edge>) -> Self {
        self.owned_edges.extend(edges);
        self
    }

    pub fn owns(&self, edge: &Edge) -> bool {
        self.owned_edges.contains(edge)
    }
}

/// Why a move was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error("{target} is not a legal {kind} target")]
    IllegalTarget { kind: MoveKind, target: Target },

    #[error("{kind} cannot be aimed at {target}")]
    TargetMismatch { kind: MoveKind, target: Target },
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state (clone to mutate)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    players: [Player; 2],

    /// Edges on the board that nobody owns
    neutral_edges: FxHashSet<Edge>,

    /// Index of the player to move
    current_player: usize,

    winner: Option<usize>,

    /// Accepted moves so far
    turn: u32,

    policy: TurnPolicy,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a game; player 0 moves first
    pub fn new(players: [Player; 2], neutral_edges: FxHashSet<Edge>, policy: TurnPolicy) -> Self {
        debug_assert_ne!(
            players[0].position, players[1].position,
            "players must start apart"
        );

        Self {
            players,
            neutral_edges,
            current_player: 0,
            winner: None,
            turn: 0,
            policy,
        }
    }

    /// Standard opening: (0,0) against (1,0), one neutral edge between them
    pub fn new_default() -> Self {
        GameConfig::default().to_game_state()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn neutral_edges(&self) -> &FxHashSet<Edge> {
        &self.neutral_edges
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|index| &self.players[index])
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn policy(&self) -> TurnPolicy {
        self.policy
    }

    /// Hexagons the player has closed (non-empty only for a winner)
    pub fn closed_hexagons(&self, player: usize) -> FxHashSet<Hexagon> {
        self.player(player)
            .map(|p| find_closed_hexagons(&p.owned_edges))
            .unwrap_or_default()
    }

    /// Owned by a player or lying neutral on the board
    pub fn is_claimed(&self, edge: &Edge) -> bool {
        self.neutral_edges.contains(edge) || self.players.iter().any(|p| p.owns(edge))
    }

    /// The player and their opponent, if the game is still running
    fn sides(&self, player: usize) -> Option<(&Player, &Player)> {
        if self.is_over() || player > 1 {
            return None;
        }
        Some((&self.players[player], &self.players[1 - player]))
    }

    // ========================================================================
    // LEGAL TARGETS
    // ========================================================================

    /// Legal targets of one move kind for `player`.
    /// Empty once the game is over or for an unknown player index.
    pub fn legal_targets(&self, kind: MoveKind, player: usize) -> FxHashSet<Target> {
        match kind {
            MoveKind::Expand => to_targets(self.expand_targets(player)),
            MoveKind::Move => to_targets(self.move_targets(player)),
            MoveKind::Resupply => to_targets(self.resupply_targets(player)),
            MoveKind::Assault => to_targets(self.assault_targets(player)),
        }
    }

    /// Unclaimed edges at the player's vertex, if they have a matchstick
    pub fn expand_targets(&self, player: usize) -> FxHashSet<Edge> {
        let Some((me, _)) = self.sides(player) else {
            return FxHashSet::default();
        };
        if me.matchsticks == 0 {
            return FxHashSet::default();
        }

        me.position
            .protruding_edges()
            .into_iter()
            .filter(|edge| edge.in_bounds() && !self.is_claimed(edge))
            .collect()
    }

    /// Vertices reachable over the player's own edges without touching the opponent
    pub fn move_targets(&self, player: usize) -> FxHashSet<Vertex> {
        match self.sides(player) {
            Some((me, rival)) => {
                accessible_vertices_from(me.position, &me.owned_edges, rival.position)
            }
            None => FxHashSet::default(),
        }
    }

    pub fn resupply_targets(&self, player: usize) -> FxHashSet<Edge> {
        match self.sides(player) {
            Some((me, _)) => me.owned_edges.clone(),
            None => FxHashSet::default(),
        }
    }

    /// Opponent or neutral edges at the player's vertex, except those touching
    /// the opponent's vertex
    pub fn assault_targets(&self, player: usize) -> FxHashSet<Edge> {
        let Some((me, rival)) = self.sides(player) else {
            return FxHashSet::default();
        };
        if me.matchsticks == 0 {
            return FxHashSet::default();
        }

        me.position
            .protruding_edges()
            .into_iter()
            .filter(|edge| rival.owns(edge) || self.neutral_edges.contains(edge))
            .filter(|edge| !edge.is_incident_to(rival.position))
            .collect()
    }

    /// Every legal move for the player to move, in a stable order
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = MoveKind::ALL
            .into_iter()
            .flat_map(|kind| {
                self.legal_targets(kind, self.current_player)
                    .into_iter()
                    .filter_map(move |target| Move::new(kind, target))
            })
            .collect();
        moves.sort_unstable();
        moves
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_targets(mv.kind(), self.current_player)
            .contains(&mv.target())
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move for the current player, return the new state.
    ///
    /// The winning move does not pass the turn.
    pub fn try_apply_move(&self, mv: Move) -> Result<Self, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.is_legal(mv) {
            return Err(MoveError::IllegalTarget {
                kind: mv.kind(),
                target: mv.target(),
            });
        }

        let mut new_state = self.clone();
        new_state.apply_move_internal(mv);
        new_state.turn += 1;
        new_state.check_winner();

        if !new_state.is_over() {
            new_state.current_player = 1 - new_state.current_player;
        }

        tracing::debug!(
            "Turn {}: player {} plays {}",
            new_state.turn,
            self.current_player,
            mv
        );
        Ok(new_state)
    }

    /// Apply a move, or fall back to the refused state per the turn policy
    pub fn apply_move(&self, mv: Move) -> Self {
        match self.try_apply_move(mv) {
            Ok(state) => state,
            Err(err) => {
                tracing::debug!("Refused {} from player {}: {}", mv, self.current_player, err);
                self.refused()
            }
        }
    }

    /// Pair a move kind with a raw target and apply it
    pub fn try_command(&self, kind: MoveKind, target: Target) -> Result<Self, MoveError> {
        let mv = Move::new(kind, target).ok_or(MoveError::TargetMismatch { kind, target })?;
        self.try_apply_move(mv)
    }

    /// Like [`GameState::try_command`], falling back to the refused state
    pub fn command(&self, kind: MoveKind, target: Target) -> Self {
        match self.try_command(kind, target) {
            Ok(state) => state,
            Err(err) => {
                tracing::debug!("Refused {} {}: {}", kind, target, err);
                self.refused()
            }
        }
    }

    /// State after a refused move: unchanged, or with the turn passed
    /// when the policy says so
    pub fn refused(&self) -> Self {
        let mut new_state = self.clone();
        if self.policy.advance_on_refusal && !self.is_over() {
            new_state.current_player = 1 - new_state.current_player;
        }
        new_state
    }

    fn apply_move_internal(&mut self, mv: Move) {
        let mover = self.current_player;
        let rival = 1 - mover;

        match mv {
            Move::Expand { edge } => {
                let me = &mut self.players[mover];
                me.owned_edges.insert(edge);
                me.matchsticks = me.matchsticks.saturating_sub(1);
            }

            Move::Move { to } => {
                self.players[mover].position = to;
            }

            Move::Resupply { edge } => {
                let me = &mut self.players[mover];
                me.owned_edges.remove(&edge);
                me.matchsticks += 1;
            }

            Move::Assault { edge } => {
                let opponent = &mut self.players[rival];
                if opponent.owned_edges.remove(&edge) {
                    opponent.matchsticks += 1;
                } else {
                    self.neutral_edges.remove(&edge);
                }

                let me = &mut self.players[mover];
                me.owned_edges.insert(edge);
                me.matchsticks = me.matchsticks.saturating_sub(1);
                if let Some(far) = edge.far_endpoint(me.position) {
                    me.position = far;
                }
            }
        }
    }

    /// Mover first, then the opponent. Only a setup that hands the
    /// opponent a closed ring can make the second check fire.
    fn check_winner(&mut self) {
        let mover = self.current_player;
        for index in [mover, 1 - mover] {
            let closed = find_closed_hexagons(&self.players[index].owned_edges);
            if let Some(hexagon) = closed.iter().next() {
                tracing::info!(
                    "Player {} closed the hexagon around {} on turn {}",
                    index,
                    hexagon.centre,
                    self.turn
                );
                self.winner = Some(index);
                return;
            }
        }
    }
}

fn to_targets<T: Into<Target>>(items: FxHashSet<T>) -> FxHashSet<Target> {
    items.into_iter().map(Into::into).collect()
}

// ============================================================================
// TESTS
// ============================================================================
