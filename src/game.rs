use crate::color::Color;
use crate::error::Error;
use crate::moves::Move;
use crate::position::Position;
use std::str::FromStr;

/// Contains all actions supported within the game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MakeMove(Move),
    OfferDraw(Color),
    AcceptDraw,
    DeclareDraw,
    Resign(Color),
}

/// What was the result of this game?
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    RedCheckmates,
    RedWins,
    RedResigns,
    BlackCheckmates,
    BlackWins,
    BlackResigns,
    DrawAccepted,
    DrawDeclared,
    Draw,
}

/// For UI/engine use.  Store a game and its complete action history, and
/// allow that history to be enumerated.
///
/// ```
/// use xiangqi::{Game, Move};
///
/// let mut game = Game::new();
/// assert!(game.make_move(Move::from_string("b3e3".to_owned()).unwrap()));
/// assert!(game.make_move(Move::from_string("b10c8".to_owned()).unwrap()));
/// assert!(game.result().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    start_pos: Position,
    moves: Vec<Action>,
}

impl Game {
    /// Create a new `Game` with the initial position.
    pub fn new() -> Game {
        Game {
            start_pos: Position::default(),
            moves: vec![],
        }
    }

    /// Create a new `Game` with a specific starting position.
    pub fn new_with_position(position: Position) -> Game {
        Game {
            start_pos: position,
            moves: vec![],
        }
    }

    /// Get all actions made in this game (moves, draw offers, resignations).
    pub fn actions(&self) -> &Vec<Action> {
        &self.moves
    }

    /// What is the status of this game?
    pub fn result(&self) -> Option<GameResult> {
        for action in self.moves.iter() {
            match action {
                Action::AcceptDraw => return Some(GameResult::DrawAccepted),
                Action::DeclareDraw => return Some(GameResult::DrawDeclared),
                Action::Resign(color) => {
                    return Some(match color {
                        Color::Red => GameResult::RedResigns,
                        Color::Black => GameResult::BlackResigns,
                    });
                }
                _ => {}
            }
        }

        // the fifty-move rule only ends the game here by declaration, so
        // check the board-level endings individually
        let position = self.current_position();
        if position.is_checkmate() {
            return Some(match position.turn() {
                Color::Red => GameResult::BlackCheckmates,
                Color::Black => GameResult::RedCheckmates,
            });
        }
        if position.is_stalemate() {
            return Some(match position.turn() {
                Color::Red => GameResult::BlackWins,
                Color::Black => GameResult::RedWins,
            });
        }
        if position.is_insufficient_material() {
            return Some(GameResult::Draw);
        }
        None
    }

    /// Get the current position by replaying the moves from the start.
    pub fn current_position(&self) -> Position {
        let mut copy = self.start_pos;

        for action in self.moves.iter() {
            if let Action::MakeMove(m) = action {
                copy.play(*m);
            }
        }

        copy
    }

    /// Who's turn is it to move?
    pub fn side_to_move(&self) -> Color {
        self.current_position().turn()
    }

    /// Make a move on the board.  Returns true if the move was made, false
    /// if the move was illegal or the game is already over.
    pub fn make_move(&mut self, game_move: Move) -> bool {
        if self.result().is_some() {
            return false;
        }
        if self.current_position().is_legal(game_move, None) {
            self.moves.push(Action::MakeMove(game_move));
            true
        } else {
            false
        }
    }

    /// Offer a draw.  The offer is recorded; it does nothing until the
    /// opponent accepts.
    pub fn offer_draw(&mut self, color: Color) -> bool {
        if self.result().is_some() {
            return false;
        }
        self.moves.push(Action::OfferDraw(color));
        true
    }

    /// Accept a draw offered by the opponent.  The offer must be the most
    /// recent action, or the most recent action before my own move.
    pub fn accept_draw(&mut self) -> bool {
        if self.result().is_some() {
            return false;
        }
        if self.moves.len() > 0 {
            if let Action::OfferDraw(color) = self.moves[self.moves.len() - 1] {
                if color == !self.side_to_move() {
                    self.moves.push(Action::AcceptDraw);
                    return true;
                }
            }
        }

        if self.moves.len() > 1 {
            if let (Action::OfferDraw(color), Action::MakeMove(_)) = (
                self.moves[self.moves.len() - 2],
                self.moves[self.moves.len() - 1],
            ) {
                if color == !self.side_to_move() {
                    self.moves.push(Action::AcceptDraw);
                    return true;
                }
            }
        }

        false
    }

    /// Can a draw be declared under the fifty-move rule?
    pub fn can_declare_draw(&self) -> bool {
        if self.result().is_some() {
            return false;
        }
        self.current_position().is_fifty_moves()
    }

    /// Declare a draw under the fifty-move rule.  Returns false if the
    /// rule does not apply yet.
    pub fn declare_draw(&mut self) -> bool {
        if self.can_declare_draw() {
            self.moves.push(Action::DeclareDraw);
            true
        } else {
            false
        }
    }

    /// Resign the game for one side.
    pub fn resign(&mut self, color: Color) -> bool {
        if self.result().is_some() {
            return false;
        }
        self.moves.push(Action::Resign(color));
        true
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl FromStr for Game {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Game::new_with_position(Position::from_str(value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(s: &str) -> Move {
        Move::from_string(s.to_owned()).expect("valid move string")
    }

    #[test]
    fn legal_and_illegal_moves() {
        let mut game = Game::new();
        assert_eq!(game.side_to_move(), Color::Red);
        assert!(game.make_move(mv("b3e3")));
        assert_eq!(game.side_to_move(), Color::Black);
        // red may not move twice in a row
        assert!(!game.make_move(mv("h3e3")));
        assert!(game.make_move(mv("b10c8")));
        assert_eq!(game.actions().len(), 2);
        assert_eq!(game.result(), None);
    }

    #[test]
    fn checkmate_ends_the_game() {
        let mut game = Game::from_str("3k5/9/9/9/9/9/9/4r4/9/r3K4 w - - 0 1").unwrap();
        assert_eq!(game.result(), Some(GameResult::BlackCheckmates));
        // no move can be made in a finished game
        assert!(!game.make_move(mv("e1e2")));
        assert!(!game.resign(Color::Red));
    }

    #[test]
    fn stalemate_is_a_win_not_a_draw() {
        let game = Game::from_str("3k1r3/9/9/9/9/9/9/9/3p5/4K4 w - - 0 1").unwrap();
        assert_eq!(game.result(), Some(GameResult::BlackWins));
    }

    #[test]
    fn resignation() {
        let mut game = Game::new();
        assert!(game.make_move(mv("b3e3")));
        assert!(game.resign(Color::Black));
        assert_eq!(game.result(), Some(GameResult::BlackResigns));
    }

    #[test]
    fn draw_offers() {
        let mut game = Game::new();
        assert!(game.make_move(mv("b3e3")));
        // black cannot accept a draw nobody offered
        assert!(!game.accept_draw());
        assert!(game.offer_draw(Color::Red));
        assert!(game.accept_draw());
        assert_eq!(game.result(), Some(GameResult::DrawAccepted));
    }

    #[test]
    fn declared_draws_require_the_counter() {
        let mut game = Game::new();
        assert!(!game.can_declare_draw());
        assert!(!game.declare_draw());

        let mut tired = Game::from_str(
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 50 40",
        )
        .unwrap();
        assert!(tired.can_declare_draw());
        assert!(tired.declare_draw());
        assert_eq!(tired.result(), Some(GameResult::DrawDeclared));
    }
}
