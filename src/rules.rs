//! Per-kind legality rules.
//!
//! Every rule judges a move in isolation: whose turn it is and whether the
//! mover's king ends up attacked are not considered here.

use crate::board::Board;
use crate::pieces::{Color, Piece, PieceType};
use crate::types::Square;

const KNIGHT_JUMPS: &[(isize, isize)] = &[
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub fn is_valid_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    match piece.piece_type {
        PieceType::Pawn => pawn_move(board, piece.color, from, to),
        PieceType::Rook => rook_move(board, piece.color, from, to),
        PieceType::Knight => knight_move(board, piece.color, from, to),
        PieceType::Bishop => bishop_move(board, piece.color, from, to),
        PieceType::Queen => queen_move(board, piece.color, from, to),
        PieceType::King => king_move(board, piece.color, from, to),
    }
}

#[inline]
fn delta(from: Square, to: Square) -> (isize, isize) {
    (
        to.row() as isize - from.row() as isize,
        to.col() as isize - from.col() as isize,
    )
}

/// Empty, or held by the other side.
fn open_for(board: &Board, color: Color, to: Square) -> bool {
    match board.get_square(to) {
        None => true,
        Some(p) => p.color != color,
    }
}

/// Walks from `from` toward `to` one step at a time and reports whether every
/// square strictly in between is empty. The caller guarantees the two squares
/// share a row, column or diagonal.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    let (sr, sc) = (dr.signum(), dc.signum());
    let mut cur = from.offset(sr, sc);
    while let Some(sq) = cur {
        if sq == to {
            return true;
        }
        if board.get_square(sq).is_some() {
            return false;
        }
        cur = sq.offset(sr, sc);
    }
    false
}

pub fn pawn_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    let dir = color.forward();
    match dc.abs() {
        0 => {
            if dr == dir {
                return board.get_square(to).is_none();
            }
            if dr == 2 * dir && from.row() == color.pawn_row() {
                let mid = from.offset(dir, 0);
                return mid.is_some_and(|m| board.get_square(m).is_none())
                    && board.get_square(to).is_none();
            }
            false
        }
        1 if dr == dir => board.get_square(to).is_some_and(|p| p.color != color),
        _ => false,
    }
}

pub fn rook_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    if from.row() != to.row() && from.col() != to.col() {
        return false;
    }
    path_clear(board, from, to) && open_for(board, color, to)
}

pub fn knight_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let jump = delta(from, to);
    KNIGHT_JUMPS.contains(&jump) && open_for(board, color, to)
}

pub fn bishop_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    if dr == 0 || dr.abs() != dc.abs() {
        return false;
    }
    path_clear(board, from, to) && open_for(board, color, to)
}

pub fn queen_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    rook_move(board, color, from, to) || bishop_move(board, color, from, to)
}

/// Zero displacement passes the geometry test here; it is still rejected
/// because the destination then holds the mover itself.
pub fn king_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (dr, dc) = delta(from, to);
    dr.abs() <= 1 && dc.abs() <= 1 && open_for(board, color, to)
}
