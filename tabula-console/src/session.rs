//! Interactive game loop over any reader and writer.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tabula_core::variants::VARIANT_NAMES;
use tabula_core::{Game, GameResult, Move, Position};
use tracing::debug;

use crate::command::{Command, HELP};
use crate::render::render;

/// Whether the loop keeps going.
enum Flow {
    Continue,
    Quit,
}

/// Ask which game to play. Returns `None` on end of input.
pub fn choose_variant<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<&'static str>> {
    loop {
        writeln!(output, "Choose a game:")?;
        writeln!(output, "1. Classic chess")?;
        writeln!(output, "2. Hexagonal chess")?;
        writeln!(output, "3. Checkers")?;
        write!(output, "Game number: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        let choice = line.trim().to_ascii_lowercase();
        let picked = match choice.as_str() {
            "1" => Some(VARIANT_NAMES[0]),
            "2" => Some(VARIANT_NAMES[1]),
            "3" => Some(VARIANT_NAMES[2]),
            name => VARIANT_NAMES.iter().copied().find(|v| *v == name),
        };
        match picked {
            Some(name) => return Ok(Some(name)),
            None => writeln!(output, "Unknown choice '{}'.", line.trim())?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading input")?;
    Ok((read > 0).then_some(line))
}

/// A game played through text prompts.
pub struct Session<R, W> {
    game: Game,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: Game, input: R, output: W) -> Session<R, W> {
        Session { game, input, output }
    }

    #[cfg(test)]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.show_board()?;
            if let Some(outcome) = self.game.outcome() {
                writeln!(self.output, "Game over: {outcome}. Use 'undo' to go back or 'quit'.")?;
            }
            let prompt = format!("{} - select a piece: ", self.game.active_color());
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(());
            };
            if let Flow::Quit = self.piece_prompt(&line)? {
                return Ok(());
            }
        }
    }

    fn piece_prompt(&mut self, line: &str) -> Result<Flow> {
        let command = match Command::parse(line, self.game.board().topology()) {
            Ok(command) => command,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Square(origin) => return self.target_prompt(origin),
            Command::Move(from, to) => {
                let result = self.game.submit_move(from, to);
                self.report_move(result)?;
            }
            Command::Undo(count) => self.rollback(count)?,
            Command::Redo(count) => {
                if let Err(err) = self.game.redo(count) {
                    writeln!(self.output, "{err}")?;
                }
            }
            Command::History => self.show_history()?,
            Command::Export => {
                let json = serde_json::to_string_pretty(self.game.history().moves())?;
                writeln!(self.output, "{json}")?;
            }
            Command::Resign => {
                let color = self.game.active_color();
                match self.game.resign(color) {
                    Ok(outcome) => writeln!(self.output, "{color} resigns. {outcome}.")?,
                    Err(err) => writeln!(self.output, "{err}")?,
                }
            }
            Command::Cancel => writeln!(self.output, "Nothing selected.")?,
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Second step of a half-move: where the selected piece goes.
    fn target_prompt(&mut self, origin: Position) -> Result<Flow> {
        let candidates = match self.game.select_origin(origin) {
            Ok(candidates) => candidates,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(Flow::Continue);
            }
        };
        let topology = self.game.board().topology_handle();
        let names: Vec<String> = candidates.iter().map(|p| topology.label(*p)).collect();
        if names.is_empty() {
            writeln!(self.output, "That piece cannot move.")?;
        } else {
            writeln!(self.output, "Moves: {}", names.join(" "))?;
        }

        loop {
            let Some(line) = self.prompt("target square: ")? else {
                return Ok(Flow::Quit);
            };
            match Command::parse(&line, topology.as_ref()) {
                Ok(Command::Square(destination)) => {
                    let result = self.game.choose_destination(destination);
                    self.report_move(result)?;
                    return Ok(Flow::Continue);
                }
                Ok(Command::Cancel) => {
                    self.game.cancel_selection();
                    return Ok(Flow::Continue);
                }
                Ok(Command::Undo(count)) => {
                    self.game.cancel_selection();
                    self.rollback(count)?;
                    return Ok(Flow::Continue);
                }
                Ok(Command::Quit) => return Ok(Flow::Quit),
                Ok(_) => writeln!(self.output, "Enter a target square, 'cancel' or 'undo'.")?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn rollback(&mut self, count: usize) -> Result<()> {
        match self.game.rollback(count) {
            Ok(state) => {
                debug!("[CONSOLE] Rolled back to move {}", state.move_count());
                writeln!(self.output, "Took back {count} move(s).")?;
            }
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn report_move(&mut self, result: GameResult<Move>) -> Result<()> {
        match result {
            Ok(mv) => {
                let text = mv.describe(self.game.board().topology());
                writeln!(self.output, "Played {text}.")?;
            }
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn show_board(&mut self) -> Result<()> {
        let text = render(&self.game.board_view(), self.game.board().topology(), self.game.rules());
        writeln!(self.output)?;
        write!(self.output, "{text}")?;
        Ok(())
    }

    fn show_history(&mut self) -> Result<()> {
        let topology = self.game.board().topology_handle();
        let moves = self.game.history().moves();
        if moves.is_empty() {
            writeln!(self.output, "No moves yet.")?;
        }
        for (index, pair) in moves.chunks(2).enumerate() {
            let line: Vec<String> = pair.iter().map(|m| m.describe(topology.as_ref())).collect();
            writeln!(self.output, "{:>3}. {}", index + 1, line.join("  "))?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        read_line(&mut self.input)
    }
}
