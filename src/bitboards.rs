use crate::board::{Board, Color, Piece, Square, Symbol};

pub type Bitboard = u64;

pub const NOT_A_FILE: Bitboard = 0xFEFE_FEFE_FEFE_FEFE;
pub const NOT_H_FILE: Bitboard = 0x7F7F_7F7F_7F7F_7F7F;
pub const RANK_3: Bitboard = 0x0000_0000_00FF_0000;
pub const RANK_6: Bitboard = 0x0000_FF00_0000_0000;

/// Per-type masks for one position, rebuilt from a [`Board`] on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitboards {
    pub white_pieces: [Bitboard; 6], // Pawn, Knight, Bishop, Rook, Queen, King
    pub black_pieces: [Bitboard; 6], // Pawn, Knight, Bishop, Rook, Queen, King
    pub empty: Bitboard,
    pub white_occupancy: Bitboard,
    pub black_occupancy: Bitboard,
    pub occupancy: Bitboard,
}

impl Bitboards {
    /// One pass over the 64 squares, then the aggregates.
    pub fn from_board(board: &Board) -> Self {
        let mut bb = Self::default();
        for (square, symbol) in board.squares().iter().enumerate() {
            *bb.slot_mut(*symbol) |= 1u64 << square;
        }
        bb.white_occupancy = bb.white_pieces.iter().fold(0, |acc, p| acc | p);
        bb.black_occupancy = bb.black_pieces.iter().fold(0, |acc, p| acc | p);
        bb.occupancy = bb.white_occupancy | bb.black_occupancy;
        bb
    }

    fn slot_mut(&mut self, symbol: Symbol) -> &mut Bitboard {
        match symbol {
            Symbol::Empty => &mut self.empty,
            Symbol::Occupied(Color::White, piece) => &mut self.white_pieces[piece.index()],
            Symbol::Occupied(Color::Black, piece) => &mut self.black_pieces[piece.index()],
        }
    }

    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        match color {
            Color::White => self.white_pieces[piece.index()],
            Color::Black => self.black_pieces[piece.index()],
        }
    }

    pub fn occupancy_of(&self, color: Color) -> Bitboard {
        match color {
            Color::White => self.white_occupancy,
            Color::Black => self.black_occupancy,
        }
    }
}

/// Set squares of `bb`, lowest index first.
pub fn squares(mut bb: Bitboard) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if bb == 0 {
            return None;
        }
        let square = bb.trailing_zeros() as Square;
        bb &= bb - 1;
        Some(square)
    })
}
