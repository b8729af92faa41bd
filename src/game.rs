//! Host-side session around the core: whose turn it is, which moves the
//! side to move has, and what the board looked like after every turn.

use log::info;

use crate::board::{Board, Color, Square};
use crate::error::{GameError, PositionError};
use crate::movegen::{Move, MoveGenerator};
use crate::search::{Search, SearchConfig, SearchResult};

/// Snapshot taken at the end of each turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub board_state: String,
    pub turn_number: u32,
}

pub struct Game {
    board: Board,
    side_to_move: Color,
    turn_number: u32,
    moves: Vec<Move>,
    history: Vec<Turn>,
    move_generator: MoveGenerator,
    search: Search,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_board(Board::new(), Color::White)
    }

    pub fn from_fen(fen: &str, side_to_move: Color) -> Result<Self, PositionError> {
        Ok(Self::with_board(Board::from_fen(fen)?, side_to_move))
    }

    pub fn with_board(board: Board, side_to_move: Color) -> Self {
        let move_generator = MoveGenerator::new();
        let moves = move_generator.generate_moves(&board, side_to_move);
        info!("new game from {} with {:?} to move", board.to_fen(), side_to_move);
        Self {
            board,
            side_to_move,
            turn_number: 0,
            moves,
            history: Vec::new(),
            move_generator,
            search: Search::new(),
        }
    }

    pub fn set_search_config(&mut self, config: SearchConfig) {
        self.search = Search::with_config(config);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Moves available to the side to move, as generated at the start of the turn.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn state_string(&self) -> String {
        self.board.to_position_string()
    }

    pub fn initial_state_string() -> String {
        Board::new().to_position_string()
    }

    /// Destinations for the piece on `from`, empty unless it belongs to the
    /// side to move.
    pub fn moves_from(&self, from: Square) -> Vec<Square> {
        self.moves
            .iter()
            .filter(|mv| mv.from == from)
            .map(|mv| mv.to)
            .collect()
    }

    pub fn can_move(&self, from: Square, to: Square) -> bool {
        self.find_move(from, to).is_some()
    }

    fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        self.moves
            .iter()
            .copied()
            .find(|mv| mv.from == from && mv.to == to)
    }

    /// Executes a host-requested move if the side to move has it, then ends the turn.
    pub fn play_move(&mut self, from: Square, to: Square) -> Result<Move, GameError> {
        for square in [from, to] {
            if square >= 64 {
                return Err(GameError::InvalidSquare(square));
            }
        }
        if self.board.symbol_at(from).color() != Some(self.side_to_move) {
            return Err(GameError::NotYourPiece(from));
        }
        let mv = self
            .find_move(from, to)
            .ok_or(GameError::IllegalMove { from, to })?;
        self.board.apply_move(mv);
        self.end_turn();
        Ok(mv)
    }

    pub fn end_turn(&mut self) {
        self.turn_number += 1;
        self.side_to_move = self.side_to_move.opposite();
        self.moves = self
            .move_generator
            .generate_moves(&self.board, self.side_to_move);
        self.history.push(Turn {
            board_state: self.state_string(),
            turn_number: self.turn_number,
        });
    }

    /// Searches for the side to move without touching the live board.
    pub fn best_move(&mut self) -> Option<SearchResult> {
        self.search.find_best_move(&self.board, self.side_to_move)
    }

    /// Searches, plays the chosen move and ends the turn. `None` when the
    /// search selected nothing; the board is then unchanged.
    pub fn play_ai_move(&mut self) -> Option<SearchResult> {
        let result = self.best_move()?;
        info!(
            "{:?} plays {} -> {} (score {}, {} nodes)",
            self.side_to_move,
            result.best_move.from,
            result.best_move.to,
            result.score,
            self.search.get_nodes_searched()
        );
        self.board.apply_move(result.best_move);
        self.end_turn();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Symbol, START_FEN};

    #[test]
    fn test_pick_up_highlights_destinations() {
        let game = Game::new();
        assert_eq!(game.moves().len(), 20);
        assert_eq!(game.moves_from(1), vec![16, 18]);
        assert_eq!(game.moves_from(12), vec![20, 28]);
        // Black pieces and empty squares offer nothing on White's turn.
        assert!(game.moves_from(57).is_empty());
        assert!(game.moves_from(30).is_empty());
        assert!(game.can_move(12, 28));
        assert!(!game.can_move(12, 36));
    }

    #[test]
    fn test_play_move_flips_turn_and_records_history() {
        let mut game = Game::new();
        let mv = game.play_move(12, 28).unwrap();
        assert_eq!(mv, Move::new(12, 28, Piece::Pawn));
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.turn_number(), 1);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].board_state, game.state_string());
        assert_eq!(
            game.board().symbol_at(28),
            Symbol::Occupied(Color::White, Piece::Pawn)
        );
        assert!(game.moves().iter().all(|mv| mv.from >= 48));
    }

    #[test]
    fn test_play_move_rejections() {
        let mut game = Game::new();
        assert_eq!(game.play_move(52, 36), Err(GameError::NotYourPiece(52)));
        assert_eq!(game.play_move(30, 38), Err(GameError::NotYourPiece(30)));
        assert_eq!(
            game.play_move(12, 36),
            Err(GameError::IllegalMove { from: 12, to: 36 })
        );
        assert_eq!(game.play_move(12, 64), Err(GameError::InvalidSquare(64)));
        assert_eq!(game.turn_number(), 0);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn test_ai_move_is_played() {
        let mut game = Game::from_fen("7k/8/8/q7/8/8/8/R6K", Color::White).unwrap();
        game.set_search_config(SearchConfig { depth: 2 });
        let result = game.play_ai_move().unwrap();
        assert_eq!(result.best_move, Move::new(0, 32, Piece::Rook));
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.board().to_fen(), "7k/8/8/R7/8/8/8/7K");
    }

    #[test]
    fn test_ai_without_moves_leaves_board() {
        let mut game = Game::from_fen("8/8/8/8/8/8/8/K7", Color::Black).unwrap();
        assert!(game.play_ai_move().is_none());
        assert_eq!(game.turn_number(), 0);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_from_start_fen_matches_initial_state() {
        let game = Game::from_fen(START_FEN, Color::White).unwrap();
        assert_eq!(game.state_string(), Game::initial_state_string());
    }
}
