//! Random playouts
//!
//! Plays uniformly random legal moves until someone wins, nobody can move,
//! or the turn limit is reached. Used for simulation statistics and for
//! exercising the rules over long games.

use crate::game::GameState;
use crate::moves::Move;
use rand::Rng;

/// How a playout ended
#[derive(Clone, Debug)]
pub struct PlayoutOutcome {
    pub final_state: GameState,
    pub moves: Vec<Move>,
    /// The player to move had no legal move
    pub stalled: bool,
}

impl PlayoutOutcome {
    pub fn winner(&self) -> Option<usize> {
        self.final_state.winner_index()
    }

    /// No winner, either stalled or out of turns
    pub fn is_unfinished(&self) -> bool {
        self.winner().is_none()
    }
}

/// Play random legal moves from `state` for at most `max_turns` moves
pub fn random_playout<R: Rng>(state: &GameState, max_turns: u32, rng: &mut R) -> PlayoutOutcome {
    let mut current = state.clone();
    let mut moves = Vec::new();
    let mut stalled = false;

    while !current.is_over() && (moves.len() as u32) < max_turns {
        let legal_moves = current.legal_moves();

        if legal_moves.is_empty() {
            stalled = true;
            break;
        }

        let mv = select_random_move(&legal_moves, rng);
        current = current.apply_move(mv);
        moves.push(mv);
    }

    PlayoutOutcome {
        final_state: current,
        moves,
        stalled,
    }
}

/// Select a random move uniformly from the list
fn select_random_move<R: Rng>(moves: &[Move], rng: &mut R) -> Move {
    let idx = rng.gen_range(0..moves.len());
    moves[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Matchsticks held plus edges on the board
    fn material(state: &GameState) -> u32 {
        let held: u32 = state
            .players()
            .iter()
            .map(|p| p.matchsticks + p.owned_edges.len() as u32)
            .sum();
        held + state.neutral_edges().len() as u32
    }

    #[test]
    fn test_playout_is_deterministic() {
        let game = GameState::new_default();
        let a = random_playout(&game, 200, &mut ChaCha8Rng::seed_from_u64(7));
        let b = random_playout(&game, 200, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.final_state, b.final_state);
    }

    #[test]
    fn test_turn_limit() {
        let game = GameState::new_default();
        let outcome = random_playout(&game, 5, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(outcome.moves.len() <= 5);
        assert_eq!(outcome.final_state.turn() as usize, outcome.moves.len());
    }

    #[test]
    fn test_stall_without_options() {
        let game = GameConfig::default().with_matchsticks(0).to_game_state();
        let outcome = random_playout(&game, 10, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(outcome.stalled);
        assert!(outcome.moves.is_empty());
        assert!(outcome.is_unfinished());
    }

    #[test]
    fn test_invariants_hold_over_random_games() {
        let start = GameState::new_default();
        let opening = material(&start);

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut state = start.clone();

            for _ in 0..300 {
                let moves = state.legal_moves();
                if moves.is_empty() {
                    break;
                }
                let mv = select_random_move(&moves, &mut rng);
                let next = state.try_apply_move(mv).unwrap();

                let [a, b] = next.players();
                assert_ne!(a.position, b.position, "players never share a vertex");
                assert!(a.owned_edges.is_disjoint(&b.owned_edges));
                assert!(a.owned_edges.is_disjoint(next.neutral_edges()));
                assert!(b.owned_edges.is_disjoint(next.neutral_edges()));

                let lost = material(&state) - material(&next);
                let neutral_assault = matches!(
                    mv,
                    Move::Assault { edge } if state.neutral_edges().contains(&edge)
                );
                assert_eq!(lost, u32::from(neutral_assault), "material after {mv}");
                assert!(material(&next) <= opening);

                if next.is_over() {
                    assert_eq!(next.current_player_index(), state.current_player_index());
                    break;
                }
                assert_ne!(next.current_player_index(), state.current_player_index());
                state = next;
            }
        }
    }
}
