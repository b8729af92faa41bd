use std::fmt;

use crate::error::PositionError;
use crate::movegen::Move;

/// Square index, `rank * 8 + file`, with a1 = 0 and h8 = 63.
pub type Square = u8;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Negamax color token: +1 for White, -1 for Black.
    pub fn sign(&self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

/// Content of one square of a [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Symbol {
    #[default]
    Empty,
    Occupied(Color, Piece),
}

impl Symbol {
    /// The 13 recognised symbols. Uppercase is White, lowercase Black, '0' empty.
    pub fn from_char(ch: char) -> Option<Symbol> {
        let piece = match ch.to_ascii_uppercase() {
            '0' => return Some(Symbol::Empty),
            'P' => Piece::Pawn,
            'N' => Piece::Knight,
            'B' => Piece::Bishop,
            'R' => Piece::Rook,
            'Q' => Piece::Queen,
            'K' => Piece::King,
            _ => return None,
        };
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Symbol::Occupied(color, piece))
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::Empty => '0',
            Symbol::Occupied(Color::White, piece) => piece.to_char(),
            Symbol::Occupied(Color::Black, piece) => piece.to_char().to_ascii_lowercase(),
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Symbol::Empty => None,
            Symbol::Occupied(color, _) => Some(color),
        }
    }
}

/// What [`Board::apply_move`] overwrote, enough to put it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub from: Square,
    pub to: Square,
    pub moved: Symbol,
    pub captured: Symbol,
}

/// The 64-symbol board state shared with the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Symbol; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.into_iter().enumerate() {
            board.squares[file] = Symbol::Occupied(Color::White, piece);
            board.squares[8 + file] = Symbol::Occupied(Color::White, Piece::Pawn);
            board.squares[48 + file] = Symbol::Occupied(Color::Black, Piece::Pawn);
            board.squares[56 + file] = Symbol::Occupied(Color::Black, piece);
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [Symbol::Empty; 64],
        }
    }

    /// Reads the piece-placement field of a FEN string. Fields after the
    /// first space (side, castling, en passant, clocks) are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let placement = fen.split_whitespace().next().unwrap_or("");
        let mut board = Self::empty();
        let mut rank = 0usize;
        let mut file = 0usize;

        for (index, ch) in placement.chars().enumerate() {
            match ch {
                '/' => {
                    rank += 1;
                    file = 0;
                    if rank > 7 {
                        return Err(PositionError::TooManyRanks);
                    }
                }
                '1'..='8' => {
                    file += ch as usize - '0' as usize;
                    if file > 8 {
                        return Err(PositionError::RankOverflow { rank });
                    }
                }
                _ => {
                    let symbol = match Symbol::from_char(ch) {
                        Some(symbol @ Symbol::Occupied(..)) => symbol,
                        _ => return Err(PositionError::InvalidSymbol { symbol: ch, index }),
                    };
                    if file > 7 {
                        return Err(PositionError::RankOverflow { rank });
                    }
                    // FEN lists rank 8 first.
                    board.squares[(7 - rank) * 8 + file] = symbol;
                    file += 1;
                }
            }
        }
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut gap = 0u8;
            for file in 0..8 {
                match self.squares[rank * 8 + file] {
                    Symbol::Empty => gap += 1,
                    symbol => {
                        if gap > 0 {
                            fen.push((b'0' + gap) as char);
                            gap = 0;
                        }
                        fen.push(symbol.to_char());
                    }
                }
            }
            if gap > 0 {
                fen.push((b'0' + gap) as char);
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }

    /// Parses the host's 64-symbol snapshot, symbol `i` describing square `i`.
    pub fn from_position_str(s: &str) -> Result<Self, PositionError> {
        let len = s.chars().count();
        if len != 64 {
            return Err(PositionError::InvalidLength { len });
        }
        let mut board = Self::empty();
        for (index, ch) in s.chars().enumerate() {
            board.squares[index] = Symbol::from_char(ch)
                .ok_or(PositionError::InvalidSymbol { symbol: ch, index })?;
        }
        Ok(board)
    }

    pub fn to_position_string(&self) -> String {
        self.squares.iter().map(|s| s.to_char()).collect()
    }

    pub fn squares(&self) -> &[Symbol; 64] {
        &self.squares
    }

    /// `square` must be below 64.
    pub fn symbol_at(&self, square: Square) -> Symbol {
        debug_assert!(square < 64, "square {} off the board", square);
        self.squares[square as usize]
    }

    /// `square` must be below 64.
    pub fn set_symbol(&mut self, square: Square, symbol: Symbol) {
        debug_assert!(square < 64, "square {} off the board", square);
        self.squares[square as usize] = symbol;
    }

    pub fn get_piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        match self.symbol_at(square) {
            Symbol::Empty => None,
            Symbol::Occupied(color, piece) => Some((piece, color)),
        }
    }

    /// Moves whatever stands on `mv.from` onto `mv.to`, overwriting the
    /// destination. Only these two squares change.
    pub fn apply_move(&mut self, mv: Move) -> Undo {
        let undo = Undo {
            from: mv.from,
            to: mv.to,
            moved: self.symbol_at(mv.from),
            captured: self.symbol_at(mv.to),
        };
        self.squares[mv.to as usize] = undo.moved;
        self.squares[mv.from as usize] = Symbol::Empty;
        undo
    }

    pub fn undo_move(&mut self, undo: Undo) {
        self.squares[undo.to as usize] = undo.captured;
        self.squares[undo.from as usize] = undo.moved;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let c = match self.squares[rank * 8 + file] {
                    Symbol::Empty => '.',
                    symbol => symbol.to_char(),
                };
                write!(f, "{}", c)?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
