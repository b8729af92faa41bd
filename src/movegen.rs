use crate::attacks::{RayAttacks, SlidingAttacks, KING_ATTACKS, KNIGHT_ATTACKS};
use crate::bitboards::{squares, Bitboard, Bitboards, NOT_A_FILE, NOT_H_FILE, RANK_3, RANK_6};
use crate::board::{Board, Color, Piece, Square};

/// A pseudo-legal move. Captures, promotions and other special moves are
/// not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
}

impl Move {
    pub fn new(from: Square, to: Square, piece: Piece) -> Self {
        Self { from, to, piece }
    }
}

/// Enumerates pseudo-legal moves.
///
/// Output order is fixed: knights, king, bishops, rooks, queens, then pawn
/// single pushes, double pushes, left captures and right captures. Sources
/// and destinations are each visited lowest square first, which makes the
/// first-found tie-break at the search root deterministic.
pub struct MoveGenerator<S = RayAttacks> {
    sliders: S,
}

impl MoveGenerator {
    pub fn new() -> Self {
        Self::with_sliders(RayAttacks)
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SlidingAttacks> MoveGenerator<S> {
    pub fn with_sliders(sliders: S) -> Self {
        Self { sliders }
    }

    /// All pseudo-legal moves for `side`. Never checks whether the mover's
    /// king is left in check; no castling, en passant or promotion.
    pub fn generate_moves(&self, board: &Board, side: Color) -> Vec<Move> {
        let bb = Bitboards::from_board(board);
        let own = bb.occupancy_of(side);
        let mut moves = Vec::with_capacity(32);

        for from in squares(bb.pieces(side, Piece::Knight)) {
            push_targets(&mut moves, from, KNIGHT_ATTACKS.get(from) & !own, Piece::Knight);
        }
        for from in squares(bb.pieces(side, Piece::King)) {
            push_targets(&mut moves, from, KING_ATTACKS.get(from) & !own, Piece::King);
        }
        for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
            for from in squares(bb.pieces(side, piece)) {
                let targets = self.sliders.sliding_attacks(from, bb.occupancy, piece) & !own;
                push_targets(&mut moves, from, targets, piece);
            }
        }
        self.generate_pawn_moves(&mut moves, &bb, side);

        moves
    }

    /// Pawn moves are computed for all pawns at once by shifting the whole
    /// mask, then each destination is mapped back to its source.
    fn generate_pawn_moves(&self, moves: &mut Vec<Move>, bb: &Bitboards, side: Color) {
        let pawns = bb.pieces(side, Piece::Pawn);
        let empty = !bb.occupancy;
        let enemies = bb.occupancy_of(side.opposite());

        let (single, double, left, right) = match side {
            Color::White => {
                let single = (pawns << 8) & empty;
                (
                    single,
                    ((single & RANK_3) << 8) & empty,
                    ((pawns & NOT_A_FILE) << 7) & enemies,
                    ((pawns & NOT_H_FILE) << 9) & enemies,
                )
            }
            Color::Black => {
                let single = (pawns >> 8) & empty;
                (
                    single,
                    ((single & RANK_6) >> 8) & empty,
                    ((pawns & NOT_A_FILE) >> 9) & enemies,
                    ((pawns & NOT_H_FILE) >> 7) & enemies,
                )
            }
        };

        // Source = destination - delta.
        let deltas: [i8; 4] = match side {
            Color::White => [8, 16, 7, 9],
            Color::Black => [-8, -16, -9, -7],
        };

        for (targets, delta) in [single, double, left, right].into_iter().zip(deltas) {
            for to in squares(targets) {
                let from = (to as i8 - delta) as Square;
                moves.push(Move::new(from, to, Piece::Pawn));
            }
        }
    }
}

fn push_targets(moves: &mut Vec<Move>, from: Square, targets: Bitboard, piece: Piece) {
    moves.extend(squares(targets).map(|to| Move::new(from, to, piece)));
}
