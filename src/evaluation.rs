use crate::board::{Board, Color, Piece, Symbol};

/// Material-only scoring, always from White's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluator {
    pub pawn_value: i32,
    pub knight_value: i32,
    pub bishop_value: i32,
    pub rook_value: i32,
    pub queen_value: i32,
    pub king_value: i32,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            pawn_value: 100,
            knight_value: 200,
            bishop_value: 230,
            rook_value: 400,
            queen_value: 900,
            king_value: 2000,
        }
    }

    pub fn piece_value(&self, piece: Piece) -> i32 {
        match piece {
            Piece::Pawn => self.pawn_value,
            Piece::Knight => self.knight_value,
            Piece::Bishop => self.bishop_value,
            Piece::Rook => self.rook_value,
            Piece::Queen => self.queen_value,
            Piece::King => self.king_value,
        }
    }

    pub fn symbol_value(&self, symbol: Symbol) -> i32 {
        match symbol {
            Symbol::Empty => 0,
            Symbol::Occupied(Color::White, piece) => self.piece_value(piece),
            Symbol::Occupied(Color::Black, piece) => -self.piece_value(piece),
        }
    }

    /// Positive favours White.
    pub fn evaluate(&self, board: &Board) -> i32 {
        board.squares().iter().map(|&s| self.symbol_value(s)).sum()
    }
}
