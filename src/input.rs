use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::InputError;
use crate::types::Square;

/// File letter and a single digit, twice, with optional whitespace between tokens.
static MOVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z])\s*(\d+)\s*([A-Za-z])\s*(\d+)$").expect("move pattern compiles")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Square, Square),
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    if line == "Q" || line == "q" {
        return Ok(Command::Quit);
    }
    let (from, to) = parse_move(line)?;
    Ok(Command::Move(from, to))
}

/// Parses `A 6 A 4`, `a6a4` or `d6 d4` into an origin and a destination.
pub fn parse_move(text: &str) -> Result<(Square, Square), InputError> {
    let text = text.trim();
    let caps = MOVE_RE
        .captures(text)
        .ok_or_else(|| InputError::Malformed(text.to_string()))?;
    let square = |file: usize, row: usize| {
        let token = format!("{}{}", &caps[file], &caps[row]);
        Square::from_algebraic(&token).ok_or(InputError::OutOfRange(token))
    };
    let from = square(1, 2)?;
    let to = square(3, 4)?;
    trace!(%from, %to, "parsed move");
    Ok((from, to))
}
