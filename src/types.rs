use std::fmt;

use serde::Serialize;

use crate::pieces::{Color, PieceType};

/// A square on the 8x8 grid. Row 0 is Black's back rank, column 0 is file A.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct Square {
    row: usize,
    col: usize,
}

impl Square {
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn row(self) -> usize {
        self.row
    }

    #[inline(always)]
    pub const fn col(self) -> usize {
        self.col
    }

    pub fn file(self) -> char {
        (b'A' + self.col as u8) as char
    }

    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as usize,
                col: col as usize,
            })
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square { row, col }))
    }

    /// Parses `"A6"`: a file letter (either case) followed by a row digit 0-7.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let col = match bytes[0].to_ascii_uppercase() {
            c @ b'A'..=b'H' => (c - b'A') as usize,
            _ => return None,
        };
        let row = match bytes[1] {
            d @ b'0'..=b'7' => (d - b'0') as usize,
            _ => return None,
        };
        Some(Self { row, col })
    }

    pub fn to_algebraic(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.row)
    }
}

/// Produced when an accepted move removes an opposing piece.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
pub struct Capture {
    pub by_color: Color,
    pub by: PieceType,
    pub captured_color: Color,
    pub captured: PieceType,
    pub square: Square,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The piece moved; the game continues.
    Moved {
        from: Square,
        to: Square,
        capture: Option<Capture>,
    },
    /// The destination held a king. The board is left as it was and the game is over.
    KingCaptured { winner: Color, by: PieceType },
}

impl MoveOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveOutcome::KingCaptured { .. })
    }

    pub fn capture(&self) -> Option<Capture> {
        match self {
            MoveOutcome::Moved { capture, .. } => *capture,
            MoveOutcome::KingCaptured { .. } => None,
        }
    }
}
