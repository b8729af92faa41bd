use thiserror::Error;

use crate::board::Square;

/// Failures while reading a position from host input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position string must hold 64 symbols, found {len}")]
    InvalidLength { len: usize },
    #[error("unknown symbol '{symbol}' at index {index}")]
    InvalidSymbol { symbol: char, index: usize },
    #[error("rank {rank} of the placement field runs past the h-file")]
    RankOverflow { rank: usize },
    #[error("placement field has more than 8 ranks")]
    TooManyRanks,
}

/// Failures while a host session executes a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("square {0} is out of range")]
    InvalidSquare(Square),
    #[error("no piece of the side to move on square {0}")]
    NotYourPiece(Square),
    #[error("move {from} -> {to} is not available")]
    IllegalMove { from: Square, to: Square },
}

/// Failures while parsing front-end commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("invalid move notation '{0}'")]
    InvalidNotation(String),
    #[error("invalid side to move '{0}', expected 'w' or 'b'")]
    InvalidSide(String),
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Game(#[from] GameError),
}
