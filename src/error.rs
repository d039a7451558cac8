//! Error types for move application, turn handling and input parsing.

use thiserror::Error;

use crate::pieces::{Color, PieceType};
use crate::types::Square;

/// Reasons the board refuses a move. The board is unchanged in every case.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece at {square}")]
    NoPieceAtOrigin { square: Square },

    #[error("illegal move for {color} {piece:?} from {from} to {to}")]
    IllegalMove {
        color: Color,
        piece: PieceType,
        from: Square,
        to: Square,
    },
}

/// Errors from [`crate::game::Game::make_move`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    #[error("it is {expected}'s turn")]
    WrongSideToMove { expected: Color },

    #[error("the game is over, {winner} won")]
    GameOver { winner: Color },

    #[error(transparent)]
    Move(#[from] MoveError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("expected a move like `A 6 A 4`, got `{0}`")]
    Malformed(String),

    #[error("coordinate `{0}` is off the board (files A-H, rows 0-7)")]
    OutOfRange(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode event: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MoveResult<T> = Result<T, MoveError>;
