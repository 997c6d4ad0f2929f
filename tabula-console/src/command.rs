//! Parsing of console input lines.

use anyhow::{anyhow, bail, Result};
use tabula_core::{Position, Topology};

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// A single cell: origin at the piece prompt, destination at the target prompt
    Square(Position),
    /// Origin and destination in one line (`e2 e4`, `e2e4`)
    Move(Position, Position),
    Undo(usize),
    Redo(usize),
    History,
    Export,
    Resign,
    Cancel,
    Help,
    Quit,
}

impl Command {
    /// Parse a line using the board's cell names.
    pub fn parse(line: &str, topology: &dyn Topology) -> Result<Command> {
        let line = line.trim().to_ascii_lowercase();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty input");
        };
        let rest: Vec<&str> = words.collect();

        let command = match head {
            "undo" | "u" => Command::Undo(count(&rest)?),
            "redo" => Command::Redo(count(&rest)?),
            "history" | "h" => Command::History,
            "export" => Command::Export,
            "resign" => Command::Resign,
            "cancel" | "c" => Command::Cancel,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return parse_cells(head, &rest, topology),
        };
        if !rest.is_empty() && !matches!(command, Command::Undo(_) | Command::Redo(_)) {
            bail!("'{head}' takes no arguments");
        }
        Ok(command)
    }
}

/// Optional move count, 1 when absent.
fn count(rest: &[&str]) -> Result<usize> {
    match rest {
        [] => Ok(1),
        [n] => n
            .parse()
            .map_err(|_| anyhow!("'{n}' is not a number of moves")),
        _ => bail!("expected at most one number"),
    }
}

fn parse_cells(head: &str, rest: &[&str], topology: &dyn Topology) -> Result<Command> {
    let cell = |text: &str| {
        topology
            .parse(text)
            .ok_or_else(|| anyhow!("'{text}' is not a square on this board"))
    };

    match rest {
        [] => {
            if let Some(pos) = topology.parse(head) {
                return Ok(Command::Square(pos));
            }
            // Joined form such as e2e4 or f10f11
            let split = (1..head.len())
                .filter(|&i| head.is_char_boundary(i))
                .find_map(|i| Some((topology.parse(&head[..i])?, topology.parse(&head[i..])?)));
            match split {
                Some((from, to)) => Ok(Command::Move(from, to)),
                None => bail!("unknown command '{head}' (type 'help')"),
            }
        }
        [to] => Ok(Command::Move(cell(head)?, cell(to)?)),
        _ => bail!("too many words"),
    }
}

/// Text for the `help` command.
pub const HELP: &str = "\
Commands at the piece prompt:
  e2            select the piece on e2
  e2 e4, e2e4   move in one line
  undo [n]      take back n moves (default 1)
  redo [n]      replay n taken-back moves
  history       list the moves played
  export        print the moves played as JSON
  resign        give up the game
  help          show this text
  quit          leave
At the target prompt:
  e4            move the selected piece there
  cancel        pick another piece
  undo [n]      drop the selection and take back n moves";
