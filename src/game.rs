use tracing::info;

use crate::board::Board;
use crate::error::PlayError;
use crate::pieces::Color;
use crate::types::{MoveOutcome, Square};

/// One game: the board, whose turn it is, and the winner once a king falls.
pub struct Game {
    pub board: Board,
    pub current_turn: Color,
    pub result: Option<Color>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            current_turn: Color::White,
            result: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Plays a move for the side to move.
    ///
    /// Moving the opponent's piece fails without consuming the turn. An empty
    /// origin is left to the board to report.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, PlayError> {
        if let Some(winner) = self.result {
            return Err(PlayError::GameOver { winner });
        }
        if let Some(piece) = self.board.get_square(from) {
            if piece.color != self.current_turn {
                return Err(PlayError::WrongSideToMove {
                    expected: self.current_turn,
                });
            }
        }

        let outcome = self.board.apply_move(from, to)?;
        match outcome {
            MoveOutcome::KingCaptured { winner, .. } => {
                info!(%winner, "king captured, game over");
                self.result = Some(winner);
            }
            MoveOutcome::Moved { .. } => {
                self.current_turn = self.current_turn.opposite();
                info!(turn = %self.current_turn, "turn passed");
            }
        }
        Ok(outcome)
    }
}
