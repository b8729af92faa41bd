use log::debug;

use crate::attacks::{RayAttacks, SlidingAttacks};
use crate::board::{Board, Color};
use crate::evaluation::Evaluator;
use crate::movegen::{Move, MoveGenerator};

/// Score floor. A root search that never beats it selects no move.
pub const NEG_INF: i32 = -1_000_000;
pub const POS_INF: i32 = -NEG_INF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched from the root, root move included.
    pub depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 4 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score of `best_move` from the mover's point of view.
    pub score: i32,
}

/// Fixed-depth negamax with alpha-beta pruning.
///
/// No move ordering, no transposition table, no quiescence and no clock:
/// the same board and side always produce the same move.
pub struct Search<S = RayAttacks> {
    evaluator: Evaluator,
    move_generator: MoveGenerator<S>,
    config: SearchConfig,
    nodes_searched: u64,
}

impl Search {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self::with_parts(Evaluator::new(), MoveGenerator::new(), config)
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SlidingAttacks> Search<S> {
    pub fn with_parts(
        evaluator: Evaluator,
        move_generator: MoveGenerator<S>,
        config: SearchConfig,
    ) -> Self {
        Self {
            evaluator,
            move_generator,
            config,
            nodes_searched: 0,
        }
    }

    /// Picks the move for `side` with the strictly highest score; on ties the
    /// move generated first wins. `board` itself is left untouched.
    pub fn find_best_move(&mut self, board: &Board, side: Color) -> Option<SearchResult> {
        self.nodes_searched = 0;
        let depth = self.config.depth.max(1);

        let mut buffer = board.clone();
        let moves = self.move_generator.generate_moves(&buffer, side);

        let mut best_score = NEG_INF;
        let mut best_move = None;

        for mv in moves {
            let undo = buffer.apply_move(mv);
            let score = -self.negamax(&mut buffer, depth - 1, side.opposite(), -POS_INF, -NEG_INF);
            buffer.undo_move(undo);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        debug!(
            "depth {} for {:?}: best {:?} score {} after {} nodes",
            depth, side, best_move, best_score, self.nodes_searched
        );

        best_move.map(|best_move| SearchResult {
            best_move,
            score: best_score,
        })
    }

    /// Score of `board` for `color` to move, searched `depth` plies deep.
    ///
    /// Every move is applied to `board` in place and undone before the next
    /// one, so the buffer is back to its entry state on return.
    pub fn negamax(
        &mut self,
        board: &mut Board,
        depth: u32,
        color: Color,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return self.evaluator.evaluate(board) * color.sign();
        }

        let moves = self.move_generator.generate_moves(board, color);

        // A side without moves keeps the floor; mate and stalemate are not
        // recognised.
        let mut best_score = NEG_INF;
        for mv in moves {
            let undo = board.apply_move(mv);
            let score = -self.negamax(board, depth - 1, color.opposite(), -beta, -alpha);
            board.undo_move(undo);

            best_score = best_score.max(score);
            alpha = alpha.max(best_score);
            if alpha >= beta {
                break;
            }
        }

        best_score
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn move_generator(&self) -> &MoveGenerator<S> {
        &self.move_generator
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_max_depth(&mut self, depth: u32) {
        self.config.depth = depth;
    }

    pub fn get_nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}
