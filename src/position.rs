use crate::attacks;
use crate::bitboard::{BitBoard, EMPTY};
use crate::board::Board;
use crate::board_builder::BoardBuilder;
use crate::color::{Color, ALL_COLORS};
use crate::error::{Error, IllegalSetup};
use crate::moves::Move;
use crate::piece::{Piece, ALL_PIECES};
use crate::square::Square;
use arrayvec::ArrayVec;
use std::convert::TryInto;
use std::fmt;
use std::str::FromStr;

/// A snapshot of the side to move's king square and the pieces currently
/// attacking it.  Computed once per query; callers running a batch of
/// legality checks can thread one `Context` through to avoid recomputing
/// it.  Never stored.
#[derive(Copy, Clone, Debug)]
pub struct Context {
    /// The side to move's king, if it is on the board.
    pub king: Option<Square>,
    /// Enemy pieces giving check.
    pub checkers: BitBoard,
}

/// Outcome of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    /// The winning color, or `None` for a draw.
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Outcome::Decisive { winner: Color::Red } => "1-0",
                Outcome::Decisive { winner: Color::Black } => "0-1",
                Outcome::Draw => "1/2-1/2",
            }
        )
    }
}

/// The legal destination sets for every piece of the side to move.  A side
/// fields at most 16 pieces.
pub type DestsMap = ArrayVec<(Square, BitBoard), 16>;

/// A xiangqi position: piece placement, side to move and move counters.
///
/// A `Position` obtained from [`Position::default`] or by validating a
/// [`BoardBuilder`] is legal by construction and stays legal as long as it
/// is only mutated through [`Position::play`] with legal moves.  All
/// queries assume that invariant and are total.
///
/// The structure is `Copy`; the legality filter exploits that by probing a
/// copy of the position for every candidate destination instead of doing
/// analytic pin detection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    turn: Color,
    halfmoves: u32,
    fullmoves: u32,
}

impl Position {
    /// Build a position from a setup, classifying anything illegal about
    /// it.  This is the only way an invalid arrangement can be rejected;
    /// every later query trusts its result.
    pub fn from_setup(setup: &BoardBuilder) -> Result<Position, IllegalSetup> {
        let mut board = Board::new();
        for sq in crate::square::ALL_SQUARES.iter() {
            if let Some((piece, color)) = setup[*sq] {
                board.set(*sq, piece, color);
            }
        }
        let position = Position {
            board,
            turn: setup.get_side_to_move(),
            halfmoves: setup.get_halfmoves(),
            fullmoves: setup.get_fullmoves(),
        };
        position.validate()?;
        Ok(position)
    }

    /// The piece placement.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Who's turn is it?
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Plies since the last capture.
    #[inline]
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Move number, starting at 1 and incremented after each Black move.
    #[inline]
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    /// The pieces of `attacker` that geometrically attack `square` under
    /// the given occupancy.  Horse and pawn use their inverse generators;
    /// the other shapes are symmetric so the forward generators radiate
    /// out from the target.
    pub fn king_attackers(&self, square: Square, attacker: Color, occupied: BitBoard) -> BitBoard {
        let board = &self.board;
        let theirs = board.color_combined(attacker);
        let attackers = (attacks::chariot_attacks(square, occupied)
            & board.pieces(Piece::Chariot)
            & theirs)
            | (attacks::cannon_attacks(square, occupied) & board.pieces(Piece::Cannon) & theirs)
            | (attacks::horse_attackers(square, occupied) & board.pieces(Piece::Horse) & theirs)
            | (attacks::elephant_attacks(square, occupied)
                & board.pieces(Piece::Elephant)
                & theirs)
            | (attacks::advisor_attacks(square) & board.pieces(Piece::Advisor) & theirs)
            | (attacks::king_attacks(square) & board.pieces(Piece::King) & theirs)
            | (attacks::pawn_attackers(attacker, square) & board.pieces(Piece::Pawn) & theirs);
        attackers & theirs
    }

    /// Compute the king/checkers snapshot for the side to move.
    pub fn ctx(&self) -> Context {
        let king = self.board.king_of(self.turn);
        let checkers = match king {
            Some(sq) => self.king_attackers(sq, !self.turn, self.board.combined()),
            None => EMPTY,
        };
        Context { king, checkers }
    }

    /// Do the two kings stand on one file with nothing between them?
    fn kings_facing(&self) -> bool {
        match (
            self.board.king_of(Color::Red),
            self.board.king_of(Color::Black),
        ) {
            (Some(red), Some(black)) => {
                red.get_file() == black.get_file()
                    && attacks::between(red, black) & self.board.combined() == EMPTY
            }
            _ => false,
        }
    }

    fn validate(&self) -> Result<(), IllegalSetup> {
        if self.board.combined() == EMPTY {
            return Err(IllegalSetup::Empty);
        }

        for color in ALL_COLORS.iter() {
            if (self.board.pieces(Piece::King) & self.board.color_combined(*color)).popcnt() != 1 {
                return Err(IllegalSetup::Kings);
            }
        }

        if self.kings_facing() {
            return Err(IllegalSetup::FacingKings);
        }

        // only the side to move may stand in check
        if let Some(their_king) = self.board.king_of(!self.turn) {
            if self.king_attackers(their_king, self.turn, self.board.combined()) != EMPTY {
                return Err(IllegalSetup::OppositeCheck);
            }
        }

        for color in ALL_COLORS.iter() {
            for piece in ALL_PIECES.iter() {
                let (max, error) = match piece {
                    Piece::King => (1, IllegalSetup::Kings),
                    Piece::Advisor => (2, IllegalSetup::Advisors),
                    Piece::Elephant => (2, IllegalSetup::Elephants),
                    Piece::Horse => (2, IllegalSetup::Horses),
                    Piece::Chariot => (2, IllegalSetup::Chariots),
                    Piece::Cannon => (2, IllegalSetup::Cannons),
                    Piece::Pawn => (5, IllegalSetup::Pawns),
                };
                let mine = self.board.pieces(*piece) & self.board.color_combined(*color);
                if mine.popcnt() > max || mine & attacks::banned_zone(*piece, *color) != EMPTY {
                    return Err(error);
                }
            }
        }

        Ok(())
    }

    /// The raw geometric destinations of the piece on `square`: reachable
    /// squares minus friendly-occupied ones, with no regard for check or
    /// facing kings.  Empty if the square is empty.
    pub fn pseudo_dests(&self, square: Square) -> BitBoard {
        let (piece, color) = match (self.board.piece_on(square), self.board.color_on(square)) {
            (Some(piece), Some(color)) => (piece, color),
            _ => return EMPTY,
        };
        attacks::attacks(piece, color, square, self.board.combined())
            & !self.board.color_combined(color)
    }

    /// The fully legal destinations for the piece on `square`, or the
    /// empty set if the square holds nothing or an enemy piece.
    ///
    /// Every pseudo-legal candidate is tried on a copy of the position;
    /// candidates that leave the mover's king attacked or the kings facing
    /// are dropped.  This trades a board copy plus one attack
    /// recomputation per candidate for not having to reason about pins and
    /// discovered checks analytically.
    pub fn dests(&self, square: Square, ctx: Option<&Context>) -> BitBoard {
        if self.board.color_on(square) != Some(self.turn) {
            return EMPTY;
        }
        let piece = match self.board.piece_on(square) {
            Some(piece) => piece,
            None => return EMPTY,
        };
        let ctx = match ctx {
            Some(ctx) => *ctx,
            None => self.ctx(),
        };

        let mut legal = EMPTY;
        for to in self.pseudo_dests(square) {
            let mut probe = *self;
            probe.board.take(square);
            probe.board.set(to, piece, self.turn);

            let king = if piece == Piece::King { Some(to) } else { ctx.king };
            let exposed = match king {
                Some(king_sq) => {
                    probe.king_attackers(king_sq, !self.turn, probe.board.combined()) != EMPTY
                }
                None => false,
            };
            if !exposed && !probe.kings_facing() {
                legal |= BitBoard::from_square(to);
            }
        }
        legal
    }

    /// The legal destination sets for every piece of the side to move.
    pub fn all_dests(&self, ctx: Option<&Context>) -> DestsMap {
        let ctx = match ctx {
            Some(ctx) => *ctx,
            None => self.ctx(),
        };
        let mut result = DestsMap::new();
        for square in self.board.color_combined(self.turn) {
            result.push((square, self.dests(square, Some(&ctx))));
        }
        result
    }

    /// Is this move legal in this position?
    pub fn is_legal(&self, m: Move, ctx: Option<&Context>) -> bool {
        self.dests(m.get_source(), ctx).contains(m.get_dest())
    }

    fn has_legal_moves(&self, ctx: Option<&Context>) -> bool {
        self.all_dests(ctx).iter().any(|(_, dests)| *dests != EMPTY)
    }

    /// Is the side to move in check?
    pub fn is_check(&self) -> bool {
        self.ctx().checkers != EMPTY
    }

    /// In check with no legal move.
    pub fn is_checkmate(&self) -> bool {
        let ctx = self.ctx();
        ctx.checkers != EMPTY && !self.has_legal_moves(Some(&ctx))
    }

    /// Not in check, but no legal move.  Unlike western chess this loses
    /// the game for the side to move.
    pub fn is_stalemate(&self) -> bool {
        let ctx = self.ctx();
        ctx.checkers == EMPTY && !self.has_legal_moves(Some(&ctx))
    }

    /// Can this color, on its own, still deliver mate?  This is a
    /// deliberately conservative approximation, not a full endgame
    /// classifier: any chariot or horse counts as sufficient, a cannon
    /// counts unless its side has no advisors and the board has no pawns
    /// at all, and otherwise the side is insufficient only while none of
    /// its pawns has advanced off its starting rank.
    pub fn has_insufficient_material(&self, color: Color) -> bool {
        let board = &self.board;
        let mine = board.color_combined(color);

        if (board.pieces(Piece::Chariot) | board.pieces(Piece::Horse)) & mine != EMPTY {
            return false;
        }
        if board.pieces(Piece::Cannon) & mine != EMPTY {
            return board.pieces(Piece::Advisor) & mine == EMPTY
                && board.pieces(Piece::Pawn) == EMPTY;
        }
        board.pieces(Piece::Pawn) & mine & !BitBoard::get_rank(color.to_pawn_rank()) == EMPTY
    }

    /// Neither side can deliver mate (per the approximation above).
    pub fn is_insufficient_material(&self) -> bool {
        ALL_COLORS
            .iter()
            .all(|color| self.has_insufficient_material(*color))
    }

    /// Fifty moves without a capture.
    pub fn is_fifty_moves(&self) -> bool {
        self.halfmoves >= 50
    }

    /// Is the game over, for any reason?
    pub fn is_end(&self) -> bool {
        self.is_insufficient_material() || self.is_fifty_moves() || !self.has_legal_moves(None)
    }

    /// The result of the game, or `None` while it is still going.
    /// Checkmate *and* stalemate lose for the side to move; insufficient
    /// material and the fifty-move rule draw.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.has_legal_moves(None) {
            Some(Outcome::Decisive { winner: !self.turn })
        } else if self.is_insufficient_material() || self.is_fifty_moves() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// Advisory sanity check: is the side to move checked by more pieces
    /// than any reachable game can produce?  At most 4 pieces can check
    /// simultaneously in xiangqi.  This is a heuristic, deliberately kept
    /// out of `validate`.
    pub fn is_impossible_check(&self) -> bool {
        self.ctx().checkers.popcnt() > 4
    }

    /// Play a move, unconditionally.  The caller must have established
    /// legality (see [`Position::is_legal`]); `play` performs no checks.
    /// Playing from an empty square leaves the board untouched but still
    /// updates the counters and the turn, so don't.
    pub fn play(&mut self, m: Move) {
        self.halfmoves += 1;
        if self.turn == Color::Black {
            self.fullmoves += 1;
        }
        self.turn = !self.turn;

        if let Some((piece, color)) = self.board.take(m.get_source()) {
            if self.board.set(m.get_dest(), piece, color).is_some() {
                self.halfmoves = 0;
            }
        }
    }

    /// Export this position as a `BoardBuilder`, with the counters clamped
    /// to ranges that downstream storage can rely on (halfmoves <= 150,
    /// fullmoves in 1..=9999).
    pub fn to_setup(&self) -> BoardBuilder {
        self.into()
    }

    /// Same placement and same side to move, ignoring the move counters.
    pub fn equals_ignore_moves(&self, other: &Position) -> bool {
        self.board == other.board && self.turn == other.turn
    }
}

impl Default for Position {
    /// The xiangqi starting position: Red to move, counters at 0 and 1.
    fn default() -> Position {
        Position {
            board: Board::default(),
            turn: Color::Red,
            halfmoves: 0,
            fullmoves: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_setup())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BoardBuilder::from_str(value)?.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::convert::TryInto;
    use std::str::FromStr;

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    fn mv(name: &str) -> Move {
        Move::from_string(name.to_owned()).unwrap()
    }

    fn pos(fen: &str) -> Position {
        BoardBuilder::from_str(fen)
            .expect("valid FEN")
            .try_into()
            .expect("legal position")
    }

    fn setup_error(fen: &str) -> IllegalSetup {
        let builder = BoardBuilder::from_str(fen).expect("valid FEN");
        match Position::from_setup(&builder) {
            Err(e) => e,
            Ok(_) => panic!("expected {} to be rejected", fen),
        }
    }

    #[test]
    fn default_position_basics() {
        let pos = Position::default();
        assert_eq!(pos.board().combined().popcnt(), 32);
        assert_eq!(pos.turn(), Color::Red);
        assert_eq!(pos.halfmoves(), 0);
        assert_eq!(pos.fullmoves(), 1);
        assert!(!pos.is_check());
        assert!(!pos.is_end());
        assert_eq!(pos.outcome(), None);

        let total: u32 = pos.all_dests(None).iter().map(|(_, d)| d.popcnt()).sum();
        assert_eq!(total, 44);
    }

    #[test]
    fn context_threading_changes_nothing() {
        let pos = Position::default();
        let ctx = pos.ctx();
        assert_eq!(pos.all_dests(Some(&ctx)), pos.all_dests(None));
    }

    #[test]
    fn classified_setup_errors() {
        assert_eq!(
            setup_error("9/9/9/9/9/9/9/9/9/9 w - - 0 1"),
            IllegalSetup::Empty
        );
        // missing black king
        assert_eq!(
            setup_error("9/9/9/9/9/9/9/9/9/4K4 w - - 0 1"),
            IllegalSetup::Kings
        );
        // king wandered out of the palace
        assert_eq!(
            setup_error("3k5/9/9/9/9/9/9/9/9/2K6 w - - 0 1"),
            IllegalSetup::Kings
        );
        // kings share an open file
        assert_eq!(
            setup_error("4k4/9/9/9/9/9/9/9/9/4K4 w - - 0 1"),
            IllegalSetup::FacingKings
        );
        // advisor on a palace square that is not a diagonal point
        assert_eq!(
            setup_error("3k5/9/9/9/9/9/9/4A4/9/4K4 w - - 0 1"),
            IllegalSetup::Advisors
        );
        // elephant across the river
        assert_eq!(
            setup_error("3k5/9/9/9/2B6/9/9/9/9/4K4 w - - 0 1"),
            IllegalSetup::Elephants
        );
        // three horses
        assert_eq!(
            setup_error("3k5/9/9/9/9/9/9/9/N1N1N4/4K4 w - - 0 1"),
            IllegalSetup::Horses
        );
        // three chariots
        assert_eq!(
            setup_error("3k5/9/9/9/9/9/9/9/R1R1R4/4K4 w - - 0 1"),
            IllegalSetup::Chariots
        );
        // three cannons
        assert_eq!(
            setup_error("3k5/9/9/9/9/9/9/9/C1C1C4/4K4 w - - 0 1"),
            IllegalSetup::Cannons
        );
        // a sixth pawn
        assert_eq!(
            setup_error("3k5/9/9/9/P8/9/P1P1P1P1P/9/9/4K4 w - - 0 1"),
            IllegalSetup::Pawns
        );
        // pawn on an odd file before the river
        assert_eq!(
            setup_error("3k5/9/9/9/9/9/1P7/9/9/4K4 w - - 0 1"),
            IllegalSetup::Pawns
        );
    }

    #[test]
    fn opposite_check_is_rejected_for_the_right_side_only() {
        // Red chariot stares down the black king.  With Red to move this
        // is opposite check and illegal; with Black to move it is just
        // check.
        let fen = "3k5/9/9/9/9/9/9/9/9/3RK4";
        assert_eq!(
            setup_error(&format!("{} w - - 0 1", fen)),
            IllegalSetup::OppositeCheck
        );
        let black_to_move = pos(&format!("{} b - - 0 1", fen));
        assert!(black_to_move.is_check());
    }

    #[test]
    fn validation_is_idempotent() {
        let first = pos("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1");
        let setup = first.to_setup();
        let second = Position::from_setup(&setup).expect("still legal");
        assert_eq!(first, second);
    }

    #[test]
    fn pinned_horse_has_no_dests() {
        // The horse shields its king from the chariot on e9; every jump
        // leaves the file open.
        let pos = pos("3k5/4r4/9/9/9/9/9/9/4N4/4K4 w - - 0 1");
        assert!(!pos.is_check());
        assert_eq!(pos.pseudo_dests(sq("e2")).popcnt(), 6);
        assert_eq!(pos.dests(sq("e2"), None), EMPTY);
        // the king itself can still sidestep
        assert!(pos.dests(sq("e1"), None) != EMPTY);
    }

    #[test]
    fn moves_that_leave_kings_facing_are_illegal() {
        // Only the horse stands between the two kings.
        let pos = pos("4k4/9/9/9/9/9/9/9/4N4/4K4 w - - 0 1");
        assert_eq!(pos.dests(sq("e2"), None), EMPTY);
        // the king may step aside, off the shared file
        let king_dests = pos.dests(sq("e1"), None);
        assert!(king_dests.contains(sq("d1")));
        assert!(king_dests.contains(sq("f1")));
        // but not up the file, which stays shielded anyway
        assert!(king_dests.contains(sq("e2")) == false);
    }

    #[test]
    fn dests_ignore_enemy_and_empty_squares() {
        let pos = Position::default();
        assert_eq!(pos.dests(sq("e5"), None), EMPTY); // empty square
        assert_eq!(pos.dests(sq("e7"), None), EMPTY); // black pawn, red to move
        assert!(pos.dests(sq("e4"), None) != EMPTY); // red pawn
    }

    #[test]
    fn checkmate_by_double_chariots() {
        let pos = pos("3k5/9/9/9/9/9/9/4r4/9/r3K4 w - - 0 1");
        assert!(pos.is_check());
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());
        assert!(pos.is_end());
        assert_eq!(pos.outcome(), Some(Outcome::Decisive { winner: Color::Black }));
        assert_eq!(pos.outcome().unwrap().winner(), Some(Color::Black));
    }

    #[test]
    fn stalemate_loses_for_the_side_to_move() {
        // Red's bare king has no safe square but is not in check.
        let pos = pos("3k1r3/9/9/9/9/9/9/9/3p5/4K4 w - - 0 1");
        assert!(!pos.is_check());
        assert!(pos.is_stalemate());
        assert!(!pos.is_checkmate());
        assert_eq!(pos.outcome(), Some(Outcome::Decisive { winner: Color::Black }));
    }

    #[test]
    fn mate_and_stalemate_are_mutually_exclusive() {
        for fen in &[
            "3k5/9/9/9/9/9/9/4r4/9/r3K4 w - - 0 1",
            "3k1r3/9/9/9/9/9/9/9/3p5/4K4 w - - 0 1",
        ] {
            let pos = pos(fen);
            assert!(pos.is_checkmate() != pos.is_stalemate());
            assert!(!pos.has_legal_moves(None));
        }
    }

    #[test]
    fn insufficient_material_draws() {
        // lone kings
        let pos1 = pos("3k5/9/9/9/9/9/9/9/9/4K4 w - - 0 1");
        assert!(pos1.is_insufficient_material());
        assert_eq!(pos1.outcome(), Some(Outcome::Draw));
        assert_eq!(pos1.outcome().unwrap().winner(), None);

        // king plus one unadvanced pawn each
        let pos2 = pos("3k5/9/9/8p/9/9/P8/9/9/4K4 w - - 0 1");
        assert!(pos2.has_insufficient_material(Color::Red));
        assert!(pos2.has_insufficient_material(Color::Black));
        assert!(pos2.is_insufficient_material());
        assert_eq!(pos2.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn advanced_pawn_is_still_material() {
        let pos = pos("3k5/9/9/9/9/P8/9/9/9/4K4 w - - 0 1");
        assert!(!pos.has_insufficient_material(Color::Red));
        assert!(pos.has_insufficient_material(Color::Black));
        assert!(!pos.is_insufficient_material());
        assert_eq!(pos.outcome(), None);
    }

    #[test]
    fn cannon_material_depends_on_advisors_and_pawns() {
        // bare cannon: cannot mate a bare king
        let bare = pos("3k5/9/9/9/9/9/9/9/4C4/4K4 w - - 0 1");
        assert!(bare.has_insufficient_material(Color::Red));
        assert!(bare.is_insufficient_material());

        // cannon plus own advisor: mating nets exist
        let with_advisor = pos("3k5/9/9/9/9/9/9/9/4C4/3AK4 w - - 0 1");
        assert!(!with_advisor.has_insufficient_material(Color::Red));

        // any pawn on the board keeps the cannon side sufficient
        let with_pawn = pos("3k5/9/9/8p/9/9/9/9/4C4/4K4 w - - 0 1");
        assert!(!with_pawn.has_insufficient_material(Color::Red));
    }

    #[test]
    fn chariot_or_horse_is_always_sufficient() {
        let pos = pos("3k5/9/9/9/9/9/9/9/4N4/4K4 w - - 0 1");
        assert!(!pos.has_insufficient_material(Color::Red));
        assert!(pos.has_insufficient_material(Color::Black));
    }

    #[test]
    fn fifty_move_rule() {
        let pos = pos("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 50 40");
        assert!(pos.is_fifty_moves());
        assert!(pos.is_end());
        assert_eq!(pos.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn impossible_check_heuristic() {
        // five simultaneous checkers: two chariots on the back rank, a
        // cannon behind a single screen, and two horses
        let five = pos("3k5/9/4c4/9/9/4p4/9/3n1n3/9/r3K3r w - - 0 1");
        assert_eq!(five.ctx().checkers.popcnt(), 5);
        assert!(five.is_impossible_check());

        // an ordinary single check is not flagged
        let single = pos("3k5/9/9/9/9/9/9/4r4/9/r3K4 w - - 0 1");
        assert!(!single.is_impossible_check());
    }

    #[test]
    fn play_updates_counters_and_captures() {
        let mut pos = Position::default();

        assert!(pos.is_legal(mv("b3e3"), None));
        pos.play(mv("b3e3"));
        assert_eq!(pos.turn(), Color::Black);
        assert_eq!(pos.halfmoves(), 1);
        assert_eq!(pos.fullmoves(), 1);

        pos.play(mv("b10c8"));
        assert_eq!(pos.turn(), Color::Red);
        assert_eq!(pos.halfmoves(), 2);
        assert_eq!(pos.fullmoves(), 2);

        // cannon takes the e7 pawn over the e4 screen
        assert!(pos.is_legal(mv("e3e7"), None));
        pos.play(mv("e3e7"));
        assert_eq!(pos.halfmoves(), 0);
        assert_eq!(pos.board().piece_on(sq("e7")), Some(Piece::Cannon));
        assert_eq!(pos.board().color_on(sq("e7")), Some(Color::Red));
        assert_eq!(pos.board().combined().popcnt(), 31);
    }

    #[test]
    fn every_generated_move_survives_its_own_application() {
        let positions = [
            Position::default(),
            pos("3k5/4r4/9/9/9/9/9/9/4N4/4K4 w - - 0 1"),
            pos("3k1r3/9/9/9/9/9/9/9/3p5/4K4 b - - 0 1"),
        ];
        for original in positions.iter() {
            for (from, dests) in original.all_dests(None) {
                for to in dests {
                    let mut probe = *original;
                    probe.play(Move::new(from, to));
                    // after a legal move the mover is never left in check
                    // and the kings never face
                    if let Some(king) = probe.board().king_of(!probe.turn()) {
                        assert_eq!(
                            probe.king_attackers(king, probe.turn(), probe.board().combined()),
                            EMPTY
                        );
                    }
                    assert!(!probe.kings_facing());
                }
            }
        }
    }

    #[test]
    fn to_setup_round_trip_and_clamping() {
        let pos1 = Position::default();
        let setup = pos1.to_setup();
        let pos2 = Position::from_setup(&setup).expect("legal");
        assert!(pos1.equals_ignore_moves(&pos2));

        let tired = pos("3k5/9/9/9/9/9/9/9/4C4/3AK4 w - - 999 0");
        let setup = tired.to_setup();
        assert_eq!(setup.get_halfmoves(), 150);
        assert_eq!(setup.get_fullmoves(), 1);
    }

    #[test]
    fn try_into_reports_errors_through_the_error_type() {
        let builder = BoardBuilder::from_str("4k4/9/9/9/9/9/9/9/9/4K4 w - - 0 1").unwrap();
        let result: Result<Position, Error> = (&builder).try_into();
        match result {
            Err(Error::InvalidSetup(IllegalSetup::FacingKings)) => {}
            other => panic!("expected facing kings, got {:?}", other.map(|_| ())),
        }
    }
}
