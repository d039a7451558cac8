use std::fmt;

use tracing::debug;

use crate::error::{MoveError, MoveResult};
use crate::pieces::{Color, Piece, PieceType};
use crate::rules;
use crate::types::{Capture, MoveOutcome, Square};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Drawn for empty squares.
    pub empty: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { empty: '.' }
    }
}

/// The grid, indexed `squares[row][col]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty grid. Use [`Board::standard`] for the opening position.
    pub fn new() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    pub fn standard() -> Self {
        let mut board = Self::new();
        board.setup_standard();
        board
    }

    pub fn setup_standard(&mut self) {
        self.squares = [[None; 8]; 8];
        for color in [Color::White, Color::Black] {
            let back = color.back_row();
            let pawns = color.pawn_row();
            for (col, &pt) in BACK_RANK.iter().enumerate() {
                self.squares[back][col] = Some(Piece::new(pt, color));
                self.squares[pawns][col] = Some(Piece::new(PieceType::Pawn, color));
            }
        }
    }

    #[inline(always)]
    pub fn get_square(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()]
    }

    #[inline(always)]
    pub fn set_square(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.row()][sq.col()] = piece;
    }

    pub fn get(&self, pos: &str) -> Option<Piece> {
        Square::from_algebraic(pos).and_then(|sq| self.get_square(sq))
    }

    pub fn set(&mut self, pos: &str, piece: Option<Piece>) -> bool {
        if let Some(sq) = Square::from_algebraic(pos) {
            self.set_square(sq, piece);
            true
        } else {
            false
        }
    }

    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        match self.get_square(from) {
            Some(piece) => rules::is_valid_move(self, piece, from, to),
            None => false,
        }
    }

    /// Every square the occupant of `from` may move to. Empty if `from` is empty.
    pub fn destinations(&self, from: Square) -> Vec<Square> {
        match self.get_square(from) {
            Some(piece) => Square::all()
                .filter(|&to| rules::is_valid_move(self, piece, from, to))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Validates and applies a single move.
    ///
    /// A rejected move leaves the board untouched. Landing on a king returns
    /// [`MoveOutcome::KingCaptured`] without moving anything; the caller is
    /// expected to end the game on that value.
    pub fn apply_move(&mut self, from: Square, to: Square) -> MoveResult<MoveOutcome> {
        let piece = self
            .get_square(from)
            .ok_or(MoveError::NoPieceAtOrigin { square: from })?;

        if !rules::is_valid_move(self, piece, from, to) {
            debug!(%from, %to, piece = ?piece.piece_type, color = %piece.color, "move rejected");
            return Err(MoveError::IllegalMove {
                color: piece.color,
                piece: piece.piece_type,
                from,
                to,
            });
        }

        let target = self.get_square(to);
        if let Some(king) = target.filter(|t| t.piece_type == PieceType::King) {
            debug!(%from, %to, winner = %piece.color, loser = %king.color, "king captured");
            return Ok(MoveOutcome::KingCaptured {
                winner: piece.color,
                by: piece.piece_type,
            });
        }

        let capture = target.map(|victim| Capture {
            by_color: piece.color,
            by: piece.piece_type,
            captured_color: victim.color,
            captured: victim.piece_type,
            square: to,
        });

        self.set_square(to, Some(piece));
        self.set_square(from, None);
        debug!(%from, %to, piece = ?piece.piece_type, captured = ?capture.map(|c| c.captured), "move applied");

        Ok(MoveOutcome::Moved { from, to, capture })
    }

    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    pub fn render_with(&self, opts: &RenderOptions) -> String {
        let mut out = String::with_capacity(8 * 20);
        out.push_str("  A B C D E F G H\n");
        for (row, cells) in self.squares.iter().enumerate() {
            out.push_str(&row.to_string());
            out.push(' ');
            for cell in cells {
                out.push(cell.map(|p| p.symbol()).unwrap_or(opts.empty));
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            self.get_square(sq)
                .is_some_and(|p| p.piece_type == PieceType::King && p.color == color)
        })
    }

    pub fn piece_count(&self, piece_type: PieceType) -> usize {
        self.squares
            .iter()
            .flatten()
            .flatten()
            .filter(|p| p.piece_type == piece_type)
            .count()
    }

    pub fn piece_count_color(&self, piece_type: PieceType, color: Color) -> usize {
        self.squares
            .iter()
            .flatten()
            .flatten()
            .filter(|p| p.piece_type == piece_type && p.color == color)
            .count()
    }

    pub fn piece_count_all(&self) -> usize {
        self.squares.iter().flatten().flatten().count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
