//! Pseudo-legal chess move generation over bitboards and a fixed-depth
//! alpha-beta negamax that picks a move for a board-game host.

pub mod attacks;
pub mod bitboards;
pub mod board;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod movegen;
pub mod search;
pub mod uci;

pub use board::{Board, Color, Piece, Square, Symbol};
pub use error::{GameError, PositionError, UciError};
pub use evaluation::Evaluator;
pub use game::Game;
pub use movegen::{Move, MoveGenerator};
pub use search::{Search, SearchConfig, SearchResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        let generator = MoveGenerator::new();
        let moves = generator.generate_moves(&board, Color::White);

        // 8 single pushes, 8 double pushes, 4 knight moves.
        assert_eq!(moves.len(), 20);

        for mv in moves {
            assert_eq!(board.get_piece_at(mv.from), Some((mv.piece, Color::White)));
            assert_ne!(mv.from, mv.to);
        }
    }

    #[test]
    fn test_destinations_never_own_pieces() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQK2R",
            "4k3/8/3q4/8/2NBR3/8/3K4/8",
        ];
        let generator = MoveGenerator::new();
        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            for side in [Color::White, Color::Black] {
                for mv in generator.generate_moves(&board, side) {
                    assert_ne!(board.symbol_at(mv.to).color(), Some(side), "{} {:?}", fen, mv);
                }
            }
        }
    }

    #[test]
    fn test_perft_initial_position() {
        let board = Board::new();
        let generator = MoveGenerator::new();

        assert_eq!(perft(&mut board.clone(), &generator, Color::White, 1), 20);
        // Nothing can be in check during the first three plies, so the
        // pseudo-legal counts match the legal ones here.
        assert_eq!(perft(&mut board.clone(), &generator, Color::White, 2), 400);
        assert_eq!(perft(&mut board.clone(), &generator, Color::White, 3), 8902);
    }

    fn perft(board: &mut Board, generator: &MoveGenerator, side: Color, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = generator.generate_moves(board, side);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            let undo = board.apply_move(mv);
            nodes += perft(board, generator, side.opposite(), depth - 1);
            board.undo_move(undo);
        }

        nodes
    }
}
