//! Cross-checks slider, knight and king geometry against shakmaty's attack
//! tables on random positions, and plays random games to check board invariants.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use shakmaty::{Bitboard, File, Rank, attacks};
use textchess::board::Board;
use textchess::game::Game;
use textchess::pieces::{Color, Piece, PieceType};
use textchess::types::Square;

fn to_shakmaty(sq: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(File::new(sq.col() as u32), Rank::new(7 - sq.row() as u32))
}

fn random_board(rng: &mut StdRng) -> Board {
    let mut board = Board::new();
    for sq in Square::all() {
        if rng.gen_bool(0.3) {
            let pt = PieceType::ALL[rng.gen_range(0..PieceType::ALL.len())];
            let color = if rng.gen_bool(0.5) { Color::White } else { Color::Black };
            board.set_square(sq, Some(Piece::new(pt, color)));
        }
    }
    board
}

#[test]
fn non_pawn_destinations_match_attack_tables() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let board = random_board(&mut rng);
        let occupied: Bitboard = Square::all()
            .filter(|&s| board.get_square(s).is_some())
            .map(to_shakmaty)
            .collect();

        for from in Square::all() {
            let Some(piece) = board.get_square(from) else {
                continue;
            };
            let own: Bitboard = Square::all()
                .filter(|&s| board.get_square(s).is_some_and(|p| p.color == piece.color))
                .map(to_shakmaty)
                .collect();
            let origin = to_shakmaty(from);
            let reach = match piece.piece_type {
                PieceType::Pawn => continue,
                PieceType::Knight => attacks::knight_attacks(origin),
                PieceType::King => attacks::king_attacks(origin),
                PieceType::Rook => attacks::rook_attacks(origin, occupied),
                PieceType::Bishop => attacks::bishop_attacks(origin, occupied),
                PieceType::Queen => attacks::queen_attacks(origin, occupied),
            };
            let ours: Bitboard = board.destinations(from).into_iter().map(to_shakmaty).collect();
            assert_eq!(
                ours,
                reach & !own,
                "{:?} on {from}\n{}",
                piece,
                board.render()
            );
        }
    }
}

#[test]
fn random_games_keep_board_consistent() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut game = Game::new();
        for _ in 0..400 {
            let side = game.current_turn;
            let mut candidates: Vec<(Square, Square)> = Square::all()
                .filter(|&s| game.board.get_square(s).is_some_and(|p| p.color == side))
                .flat_map(|s| {
                    game.board
                        .destinations(s)
                        .into_iter()
                        .map(move |to| (s, to))
                })
                .collect();
            if candidates.is_empty() {
                break;
            }
            candidates.shuffle(&mut rng);
            let (from, to) = candidates[0];
            let before = game.board.piece_count_all();
            let out = game.make_move(from, to).unwrap();

            if out.is_terminal() {
                assert_eq!(game.result, Some(side));
                assert_eq!(game.board.piece_count_all(), before);
                break;
            }
            let after = game.board.piece_count_all();
            let captured = usize::from(out.capture().is_some());
            assert_eq!(after + captured, before);
            assert_eq!(game.board.piece_count_color(PieceType::King, Color::White), 1);
            assert_eq!(game.board.piece_count_color(PieceType::King, Color::Black), 1);
            assert_ne!(game.current_turn, side);
        }
    }
}
