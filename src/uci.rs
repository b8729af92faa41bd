use crate::board::{Color, Square, START_FEN};
use crate::error::UciError;
use crate::game::Game;
use crate::movegen::Move;
use crate::search::SearchConfig;
use anyhow::{Context, Result};
use log::{trace, warn};
use std::io::{self, BufRead, Write};

const MIN_DEPTH: u32 = 1;
const MAX_DEPTH: u32 = 8;

pub struct UciHandler {
    game: Game,
    config: SearchConfig,
}

impl Default for UciHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl UciHandler {
    pub fn new() -> Self {
        UciHandler {
            game: Game::new(),
            config: SearchConfig::default(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut reader = stdin.lock();
        let mut line = String::new();

        while reader.read_line(&mut line).context("reading command")? > 0 {
            let command = line.trim();
            trace!("<< {}", command);

            if command == "quit" {
                break;
            }
            match self.handle_command(command) {
                Ok(response) => write!(stdout, "{}", response)?,
                Err(err) => warn!("{}: {}", command, err),
            }

            stdout.flush().context("flushing output")?;
            line.clear();
        }
        Ok(())
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn handle_command(&mut self, command: &str) -> Result<String, UciError> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(String::new());
        }

        match parts[0] {
            "uci" => Ok(self.handle_uci()),
            "isready" => Ok("readyok\n".to_string()),
            "ucinewgame" => {
                self.game = Game::new();
                Ok(String::new())
            }
            "position" => self.handle_position(&parts[1..]).map(|_| String::new()),
            "go" => Ok(self.handle_go(&parts[1..])),
            "setoption" => Ok(self.handle_setoption(&parts[1..])),
            "d" => Ok(format!("{}{}\n", self.game.board(), self.game.board().to_fen())),
            "quit" => Ok(String::new()),
            other => {
                warn!("unknown command '{}'", other);
                Ok(String::new())
            }
        }
    }

    fn handle_uci(&self) -> String {
        format!(
            "id name Salmon Core\noption name Depth type spin default {} min {} max {}\nuciok\n",
            SearchConfig::default().depth,
            MIN_DEPTH,
            MAX_DEPTH
        )
    }

    fn handle_position(&mut self, parts: &[&str]) -> Result<(), UciError> {
        let moves_at = parts.iter().position(|&p| p == "moves");
        let (setup, moves) = match moves_at {
            Some(i) => (&parts[..i], &parts[i + 1..]),
            None => (parts, &parts[parts.len()..]),
        };

        let mut game = match setup.first() {
            Some(&"startpos") => Game::from_fen(START_FEN, Color::White)?,
            Some(&"fen") => {
                let placement = setup.get(1).copied().unwrap_or("");
                let side = match setup.get(2) {
                    None | Some(&"w") => Color::White,
                    Some(&"b") => Color::Black,
                    Some(other) => return Err(UciError::InvalidSide(other.to_string())),
                };
                Game::from_fen(placement, side)?
            }
            _ => return Ok(()),
        };
        // The current game survives a rejected move list.
        for notation in moves {
            let (from, to) = parse_move(notation)?;
            game.play_move(from, to)?;
        }
        self.game = game;
        Ok(())
    }

    fn handle_go(&mut self, parts: &[&str]) -> String {
        let mut config = self.config;
        for i in 0..parts.len() {
            if parts[i] == "depth" {
                if let Some(depth) = parts.get(i + 1).and_then(|s| s.parse::<u32>().ok()) {
                    config.depth = depth.clamp(MIN_DEPTH, MAX_DEPTH);
                }
            }
        }
        self.game.set_search_config(config);

        match self.game.best_move() {
            Some(result) => format!("bestmove {}\n", format_move(&result.best_move)),
            None => "bestmove (none)\n".to_string(),
        }
    }

    fn handle_setoption(&mut self, parts: &[&str]) -> String {
        // setoption name Depth value N
        if let [.., "name", name, "value", value] = parts {
            if name.eq_ignore_ascii_case("depth") {
                match value.parse::<u32>() {
                    Ok(depth) => self.config.depth = depth.clamp(MIN_DEPTH, MAX_DEPTH),
                    Err(_) => warn!("ignoring depth '{}'", value),
                }
            }
        }
        String::new()
    }
}

fn parse_square(s: &[u8]) -> Option<Square> {
    match s {
        [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Some((rank - b'1') * 8 + (file - b'a')),
        _ => None,
    }
}

/// Coordinate notation such as `e2e4`. A promotion suffix is accepted and
/// dropped since pawns never promote.
pub fn parse_move(notation: &str) -> Result<(Square, Square), UciError> {
    let bytes = notation.as_bytes();
    let invalid = || UciError::InvalidNotation(notation.to_string());
    if bytes.len() != 4 && bytes.len() != 5 {
        return Err(invalid());
    }
    let from = parse_square(&bytes[0..2]).ok_or_else(invalid)?;
    let to = parse_square(&bytes[2..4]).ok_or_else(invalid)?;
    Ok((from, to))
}

pub fn format_move(mv: &Move) -> String {
    let mut result = String::with_capacity(4);
    for square in [mv.from, mv.to] {
        result.push((b'a' + square % 8) as char);
        result.push((b'1' + square / 8) as char);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::error::GameError;

    #[test]
    fn test_notation() {
        assert_eq!(parse_move("e2e4").unwrap(), (12, 28));
        assert_eq!(parse_move("a7a8q").unwrap(), (48, 56));
        assert!(parse_move("e9e4").is_err());
        assert!(parse_move("e2").is_err());
        assert_eq!(format_move(&Move::new(6, 21, Piece::Knight)), "g1f3");
        assert_eq!(format_move(&Move::new(63, 0, Piece::Queen)), "h8a1");
    }

    #[test]
    fn test_handshake() {
        let mut uci = UciHandler::new();
        let out = uci.handle_command("uci").unwrap();
        assert!(out.starts_with("id name Salmon Core"));
        assert!(out.ends_with("uciok\n"));
        assert!(!out.contains("id author"));
        assert_eq!(uci.handle_command("isready").unwrap(), "readyok\n");
        assert_eq!(uci.handle_command("").unwrap(), "");
    }

    #[test]
    fn test_position_with_moves() {
        let mut uci = UciHandler::new();
        uci.handle_command("position startpos moves e2e4 e7e5 g1f3").unwrap();
        let game = uci.game();
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.turn_number(), 3);
        assert_eq!(
            game.board().to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"
        );
    }

    #[test]
    fn test_position_rejects_unavailable_move() {
        let mut uci = UciHandler::new();
        let err = uci.handle_command("position startpos moves e2e5").unwrap_err();
        assert_eq!(err, UciError::Game(GameError::IllegalMove { from: 12, to: 36 }));
    }

    #[test]
    fn test_go_from_fen() {
        let mut uci = UciHandler::new();
        uci.handle_command("position fen 7k/8/8/q7/8/8/8/R6K w - - 0 1").unwrap();
        assert_eq!(uci.handle_command("go depth 2").unwrap(), "bestmove a1a5\n");

        uci.handle_command("position fen 8/8/8/8/8/8/8/K7 b").unwrap();
        assert_eq!(uci.handle_command("go").unwrap(), "bestmove (none)\n");

        let err = uci.handle_command("position fen 8/8/8/8/8/8/8/K7 x").unwrap_err();
        assert_eq!(err, UciError::InvalidSide("x".to_string()));
    }

    #[test]
    fn test_setoption_depth() {
        let mut uci = UciHandler::new();
        uci.handle_command("setoption name Depth value 2").unwrap();
        assert_eq!(uci.config.depth, 2);
        uci.handle_command("setoption name Depth value x").unwrap();
        assert_eq!(uci.config.depth, 2);
        uci.handle_command("setoption name Depth value 30").unwrap();
        assert_eq!(uci.config.depth, MAX_DEPTH);
        uci.handle_command("setoption name Depth value 0").unwrap();
        assert_eq!(uci.config.depth, MIN_DEPTH);
    }

    #[test]
    fn test_go_depth_is_clamped() {
        let mut uci = UciHandler::new();
        uci.handle_command("position fen 7k/8/8/8/8/8/8/R6K w").unwrap();
        // A depth of 0 still expands the root and finds a move.
        assert_ne!(uci.handle_command("go depth 0").unwrap(), "bestmove (none)\n");
        assert!(uci.handle_command("uci").unwrap().contains("min 1 max 8"));
    }

    #[test]
    fn test_rejected_move_list_keeps_previous_game() {
        let mut uci = UciHandler::new();
        uci.handle_command("position fen 7k/8/8/8/8/8/8/R6K w").unwrap();
        let err = uci
            .handle_command("position startpos moves e2e4 e2e5")
            .unwrap_err();
        assert_eq!(err, UciError::Game(GameError::NotYourPiece(12)));
        assert_eq!(uci.game().board().to_fen(), "7k/8/8/8/8/8/8/R6K");
        assert_eq!(uci.game().side_to_move(), Color::White);
        assert_eq!(uci.game().turn_number(), 0);

        let err = uci.handle_command("position startpos moves e2e4 zz").unwrap_err();
        assert_eq!(err, UciError::InvalidNotation("zz".to_string()));
        assert_eq!(uci.game().board().to_fen(), "7k/8/8/8/8/8/8/R6K");
    }
}
