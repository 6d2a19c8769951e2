//! Play command - hot-seat game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_session()
//! - Level 3: handle_command()
//! - Level 4: formatting utilities

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;

use matchstick_core::{GameConfig, GameState, MoveKind, Player, Target, TurnPolicy};

use crate::command::{parse_command, Command, HELP};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Pass the turn when a move is refused
    #[arg(long)]
    pub advance_on_refusal: bool,
}

/// Whether the session keeps going after a command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the opening position
/// 2. Play until someone wins, the players quit, or input ends
pub fn run(args: PlayArgs, config: GameConfig) -> Result<()> {
    let config = if args.advance_on_refusal {
        config.with_turn_policy(TurnPolicy::advance_on_refusal())
    } else {
        config
    };
    let state = config.to_game_state();

    tracing::info!("Starting hot-seat game");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let final_state = play_session(state, stdin.lock(), stdout.lock())?;

    tracing::info!("Game ended after {} turns", final_state.turn());
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Read commands until the game ends; returns the last state
pub fn play_session<R: BufRead, W: Write>(
    mut state: GameState,
    input: R,
    mut output: W,
) -> Result<GameState> {
    writeln!(output, "{}", HELP)?;
    write_state(&state, &mut output)?;
    write_prompt(&state, &mut output)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write_prompt(&state, &mut output)?;
            continue;
        }

        let flow = match parse_command(&line) {
            Ok(command) => handle_command(&mut state, command, &mut output)?,
            Err(err) => {
                writeln!(output, "error: {:#}", err)?;
                Flow::Continue
            }
        };

        if flow == Flow::Stop {
            break;
        }
        write_prompt(&state, &mut output)?;
    }

    Ok(state)
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn handle_command<W: Write>(state: &mut GameState, command: Command, output: &mut W) -> Result<Flow> {
    match command {
        Command::Play(mv) => match state.try_apply_move(mv) {
            Ok(next) => {
                *state = next;
                if let Some(index) = state.winner_index() {
                    writeln!(output, "{} closes a hexagon and wins!", label(state, index))?;
                    write_state(state, output)?;
                    return Ok(Flow::Stop);
                }
            }
            Err(err) => {
                writeln!(output, "refused: {}", err)?;
                *state = state.refused();
            }
        },
        Command::Targets => write_targets(state, output)?,
        Command::State => write_state(state, output)?,
        Command::Help => writeln!(output, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Stop),
    }
    Ok(Flow::Continue)
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn label(state: &GameState, index: usize) -> String {
    match state.player(index) {
        Some(Player { name, .. }) if !name.is_empty() => name.clone(),
        _ => format!("Player {}", index),
    }
}

fn write_state<W: Write>(state: &GameState, output: &mut W) -> Result<()> {
    for (index, player) in state.players().iter().enumerate() {
        let marker = if index == state.current_player_index() && !state.is_over() {
            " *"
        } else {
            ""
        };
        writeln!(
            output,
            "{} [{}] at {}: {} matchsticks, edges: {}{}",
            label(state, index),
            player.colour,
            player.position,
            player.matchsticks,
            join_sorted(player.owned_edges.iter().map(|&edge| Target::Edge(edge))),
            marker
        )?;
    }
    writeln!(
        output,
        "neutral: {}",
        join_sorted(state.neutral_edges().iter().map(|&edge| Target::Edge(edge)))
    )?;
    Ok(())
}

fn write_targets<W: Write>(state: &GameState, output: &mut W) -> Result<()> {
    let player = state.current_player_index();
    for kind in MoveKind::ALL {
        let targets = state.legal_targets(kind, player);
        writeln!(output, "  {:<9} {}", kind.name(), join_sorted(targets))?;
    }
    Ok(())
}

fn write_prompt<W: Write>(state: &GameState, output: &mut W) -> Result<()> {
    let index = state.current_player_index();
    write!(output, "{} (turn {})> ", label(state, index), state.turn() + 1)?;
    output.flush()?;
    Ok(())
}

fn join_sorted(targets: impl IntoIterator<Item = Target>) -> String {
    let mut targets: Vec<Target> = targets.into_iter().collect();
    if targets.is_empty() {
        return "-".to_string();
    }
    targets.sort_unstable();
    targets
        .iter()
        .map(Target::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchstick_core::{Edge, Vertex};
    use std::io::Cursor;

    fn run_script(state: GameState, script: &str) -> (GameState, String) {
        let mut output = Vec::new();
        let final_state = play_session(state, Cursor::new(script), &mut output).unwrap();
        (final_state, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_session_applies_moves() {
        let (state, output) = run_script(GameState::new_default(), "expand W(0,0)\nstate\n");
        assert!(state.players()[0].owns(&Edge::west(0, 0)));
        assert_eq!(state.current_player_index(), 1);
        assert!(output.contains("Player 0 [red] at (0,0): 19 matchsticks, edges: W(0,0)"));
    }

    #[test]
    fn test_session_reports_errors() {
        let (state, output) =
            run_script(GameState::new_default(), "jump\nexpand S(0,0)\nmove (5,5)\n");
        assert_eq!(state, GameState::new_default());
        assert!(output.contains("error: Unknown command"));
        assert!(output.contains("refused: S(0,0) is not a legal expand target"));
        assert!(output.contains("refused: (5,5) is not a legal move target"));
    }

    #[test]
    fn test_refusal_policy_in_session() {
        let state = GameConfig::default()
            .with_turn_policy(TurnPolicy::advance_on_refusal())
            .to_game_state();
        let (state, _) = run_script(state, "expand S(0,0)\n");
        assert_eq!(state.current_player_index(), 1);
        assert_eq!(state.turn(), 0);
    }

    #[test]
    fn test_targets_listing() {
        let (_, output) = run_script(GameState::new_default(), "targets\n");
        assert!(output.contains("expand    S(-1,0) E(-1,0) W(0,-1) E(0,-1) W(0,0)"));
        assert!(output.contains("assault   -"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let (state, _) = run_script(GameState::new_default(), "quit\nexpand W(0,0)\n");
        assert_eq!(state.turn(), 0);
    }

    #[test]
    fn test_session_ends_on_win() {
        let mut state = GameState::new_default();
        // Walk player 0 around the hexagon at (-1,1); player 1 shuffles one edge
        let script = [
            ("expand W(0,0)", "expand S(1,0)"),
            ("move (0,1)", "resupply S(1,0)"),
            ("expand E(-1,1)", "expand S(1,0)"),
            ("move (-1,2)", "resupply S(1,0)"),
            ("expand S(-2,2)", "expand S(1,0)"),
            ("move (-2,2)", "resupply S(1,0)"),
            ("expand W(-2,1)", "expand S(1,0)"),
            ("move (-2,1)", "resupply S(1,0)"),
            ("expand E(-2,0)", "expand S(1,0)"),
            ("move (-1,0)", "resupply S(1,0)"),
        ];
        for (mine, theirs) in script {
            for line in [mine, theirs] {
                let (next, output) = run_script(state, line);
                assert!(!output.contains("refused"), "{line}: {output}");
                state = next;
            }
        }

        let (state, output) = run_script(state, "expand S(-1,0)\nstate\n");
        assert_eq!(state.winner_index(), Some(0));
        assert_eq!(state.players()[0].position, Vertex::new(-1, 0));
        assert!(output.contains("Player 0 closes a hexagon and wins!"));
        // Input after the win is ignored
        assert_eq!(state.turn(), 21);
    }
}
