//! Precomputed reachability masks.
//!
//! Knight and king tables are built once from fixed offset sets and never
//! change afterwards. Sliding pieces go through [`SlidingAttacks`], which
//! the move generator treats as a black box; [`RayAttacks`] is the
//! implementation shipped with the crate.

use once_cell::sync::Lazy;

use crate::bitboards::Bitboard;
use crate::board::{Piece, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// One mask per square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTable([Bitboard; 64]);

impl AttackTable {
    /// Marks every `(rank, file)` offset from each square that stays on the board.
    pub fn from_offsets(offsets: &[(i8, i8)]) -> Self {
        let mut masks = [0u64; 64];
        for (square, mask) in masks.iter_mut().enumerate() {
            let rank = (square / 8) as i8;
            let file = (square % 8) as i8;
            for &(dr, df) in offsets {
                let r = rank + dr;
                let f = file + df;
                if (0..8).contains(&r) && (0..8).contains(&f) {
                    *mask |= 1u64 << (r * 8 + f);
                }
            }
        }
        Self(masks)
    }

    #[inline]
    pub fn get(&self, square: Square) -> Bitboard {
        self.0[square as usize]
    }
}

pub static KNIGHT_ATTACKS: Lazy<AttackTable> =
    Lazy::new(|| AttackTable::from_offsets(&KNIGHT_OFFSETS));

pub static KING_ATTACKS: Lazy<AttackTable> =
    Lazy::new(|| AttackTable::from_offsets(&KING_OFFSETS));

/// Full-length rays per square, indexed by direction: the four diagonals
/// followed by the four orthogonals.
static RAYS: Lazy<[[Bitboard; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    let directions = BISHOP_DIRECTIONS.iter().chain(ROOK_DIRECTIONS.iter());
    for (dir, &(dr, df)) in directions.enumerate() {
        for square in 0..64 {
            let mut r = (square / 8) as i8 + dr;
            let mut f = (square % 8) as i8 + df;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                rays[dir][square] |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
        }
    }
    rays
});

/// Builds every shared table now instead of on first use.
pub fn init() {
    Lazy::force(&KNIGHT_ATTACKS);
    Lazy::force(&KING_ATTACKS);
    Lazy::force(&RAYS);
}

/// Attack masks for bishops, rooks and queens given the full occupancy.
///
/// Each ray stops at the first occupied square and includes it; whether
/// that square may be captured is left to the caller.
pub trait SlidingAttacks {
    fn bishop_attacks(&self, square: Square, occupied: Bitboard) -> Bitboard;

    fn rook_attacks(&self, square: Square, occupied: Bitboard) -> Bitboard;

    fn queen_attacks(&self, square: Square, occupied: Bitboard) -> Bitboard {
        self.bishop_attacks(square, occupied) | self.rook_attacks(square, occupied)
    }

    /// Dispatch on piece kind. Non-sliders have no sliding attacks.
    fn sliding_attacks(&self, square: Square, occupied: Bitboard, piece: Piece) -> Bitboard {
        match piece {
            Piece::Bishop => self.bishop_attacks(square, occupied),
            Piece::Rook => self.rook_attacks(square, occupied),
            Piece::Queen => self.queen_attacks(square, occupied),
            _ => 0,
        }
    }
}

/// Classical ray lookup: take the full ray, find the nearest blocker and
/// cut off everything behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayAttacks;

impl RayAttacks {
    fn ray(square: Square, occupied: Bitboard, dir: usize) -> Bitboard {
        let ray = RAYS[dir][square as usize];
        let blockers = ray & occupied;
        if blockers == 0 {
            return ray;
        }
        let (dr, df) = if dir < 4 {
            BISHOP_DIRECTIONS[dir]
        } else {
            ROOK_DIRECTIONS[dir - 4]
        };
        // Positive directions grow the square index, so the nearest blocker
        // is the lowest set bit; negative ones want the highest.
        let positive = dr > 0 || (dr == 0 && df > 0);
        let blocker = if positive {
            blockers.trailing_zeros()
        } else {
            63 - blockers.leading_zeros()
        };
        ray ^ RAYS[dir][blocker as usize]
    }
}

impl SlidingAttacks for RayAttacks {
    fn bishop_attacks(&self, square: Square, occupied: Bitboard) -> Bitboard {
        (0..4).fold(0, |acc, dir| acc | Self::ray(square, occupied, dir))
    }

    fn rook_attacks(&self, square: Square, occupied: Bitboard) -> Bitboard {
        (4..8).fold(0, |acc, dir| acc | Self::ray(square, occupied, dir))
    }
}
