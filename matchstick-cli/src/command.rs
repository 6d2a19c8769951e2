//! Parsing of interactive session input
//!
//! Level 4 - Utilities

use anyhow::{bail, Context, Result};

use matchstick_core::{Edge, Move, MoveKind, Target, Vertex};

/// One line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Targets,
    State,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  expand S(u,v)     claim a free edge at your vertex
  move (u,v)        walk along your own edges
  resupply S(u,v)   give back one of your edges for a matchstick
  assault S(u,v)    take an opponent or neutral edge at your vertex
  targets           list legal targets
  state             show both players
  help              show this text
  quit              leave the game
Edges are W(u,v), S(u,v) or E(u,v).";

/// Parse a line such as `expand S(0,0)` or `move (1,-2)`
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "targets" => Command::Targets,
        "state" => Command::State,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            let Some(kind) = MoveKind::from_name(other) else {
                bail!("Unknown command: {:?} (try help)", other);
            };
            if rest.is_empty() {
                bail!("{} needs a target", kind);
            }
            let target = parse_target(kind, rest)?;
            let mv = Move::new(kind, target)
                .with_context(|| format!("{} cannot be aimed at {}", kind, target))?;
            Command::Play(mv)
        }
    };

    Ok(command)
}

fn parse_target(kind: MoveKind, text: &str) -> Result<Target> {
    let target = match kind {
        MoveKind::Move => Target::Vertex(text.parse::<Vertex>()?),
        MoveKind::Expand | MoveKind::Resupply | MoveKind::Assault => {
            Target::Edge(text.parse::<Edge>()?)
        }
    };
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!(
            parse_command("expand S(0,0)").unwrap(),
            Command::Play(Move::Expand { edge: Edge::south(0, 0) })
        );
        assert_eq!(
            parse_command("  Move ( 1 , -2 ) ").unwrap(),
            Command::Play(Move::Move { to: Vertex::new(1, -2) })
        );
        assert_eq!(
            parse_command("resupply w(3,4)").unwrap(),
            Command::Play(Move::Resupply { edge: Edge::west(3, 4) })
        );
        assert_eq!(
            parse_command("assault E(-1,0)").unwrap(),
            Command::Play(Move::Assault { edge: Edge::east(-1, 0) })
        );
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(parse_command("targets").unwrap(), Command::Targets);
        assert_eq!(parse_command("STATE").unwrap(), Command::State);
        assert_eq!(parse_command("?").unwrap(), Command::Help);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("pass").is_err());
        assert!(parse_command("expand").is_err());
        assert!(parse_command("expand (0,0)").is_err());
        assert!(parse_command("move S(0,0)").is_err());
        assert!(parse_command("").is_err());
    }
}
