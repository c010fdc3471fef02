use crate::bitboard::{BitBoard, EMPTY};
use crate::color::{Color, NUM_COLORS};
use crate::file::ALL_FILES;
use crate::piece::{Piece, ALL_PIECES, NUM_PIECES};
use crate::rank::ALL_RANKS;
use crate::square::Square;
use std::fmt;

/// The piece placement store: which piece stands where, queryable as
/// per-role and per-color bitboards.  The `Board` knows nothing about whose
/// turn it is or whether the placement is legal; that is [`Position`]'s
/// job.
///
/// [`Position`]: crate::position::Position
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Board {
    pieces: [BitBoard; NUM_PIECES],
    color_combined: [BitBoard; NUM_COLORS],
    combined: BitBoard,
}

impl Board {
    /// Construct a new `Board` that is completely empty.
    /// Note: This does NOT give you the initial position.  Just a blank
    /// slate.
    pub fn new() -> Board {
        Board {
            pieces: [EMPTY; NUM_PIECES],
            color_combined: [EMPTY; NUM_COLORS],
            combined: EMPTY,
        }
    }

    /// Grab the "combined" `BitBoard`.  This is a `BitBoard` with every piece.
    #[inline]
    pub fn combined(&self) -> BitBoard {
        self.combined
    }

    /// Grab the "color combined" `BitBoard`.  This is a `BitBoard` with every
    /// piece of a particular color.
    #[inline]
    pub fn color_combined(&self, color: Color) -> BitBoard {
        self.color_combined[color.to_index()]
    }

    /// Grab the "pieces" `BitBoard`.  This is a `BitBoard` with every piece
    /// of a particular type.
    #[inline]
    pub fn pieces(&self, piece: Piece) -> BitBoard {
        self.pieces[piece.to_index()]
    }

    /// Add or remove a piece from the bitboards in this struct.
    fn xor(&mut self, piece: Piece, bb: BitBoard, color: Color) {
        self.pieces[piece.to_index()] ^= bb;
        self.color_combined[color.to_index()] ^= bb;
        self.combined ^= bb;
    }

    /// What piece is on a particular `Square`?  Is there even one?
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        let opp = BitBoard::from_square(square);
        if self.combined & opp == EMPTY {
            return None;
        }
        for piece in ALL_PIECES.iter() {
            if self.pieces(*piece) & opp != EMPTY {
                return Some(*piece);
            }
        }
        unreachable!("combined and per-piece bitboards out of sync");
    }

    /// What color piece is on a particular square?
    pub fn color_on(&self, square: Square) -> Option<Color> {
        let opp = BitBoard::from_square(square);
        if self.color_combined(Color::Red) & opp != EMPTY {
            Some(Color::Red)
        } else if self.color_combined(Color::Black) & opp != EMPTY {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Where is the king of a particular color?  `None` on boards that do
    /// not have exactly that king (validation reports those as illegal).
    pub fn king_of(&self, color: Color) -> Option<Square> {
        (self.pieces(Piece::King) & self.color_combined(color)).first()
    }

    /// Place a piece on a square, returning whatever stood there before.
    /// This is how captures are observed by callers.
    pub fn set(&mut self, square: Square, piece: Piece, color: Color) -> Option<(Piece, Color)> {
        let captured = self.take(square);
        self.xor(piece, BitBoard::from_square(square), color);
        captured
    }

    /// Remove and return the piece on a square, if any.
    pub fn take(&mut self, square: Square) -> Option<(Piece, Color)> {
        let piece = self.piece_on(square)?;
        let color = self.color_on(square)?;
        self.xor(piece, BitBoard::from_square(square), color);
        Some((piece, color))
    }

    /// Does this board "make sense"?
    /// Do all the pieces make sense, do the bitboards combine correctly, etc?
    /// This is for sanity checking.
    pub fn is_sane(&self) -> bool {
        for x in ALL_PIECES.iter() {
            for y in ALL_PIECES.iter() {
                if *x != *y && self.pieces(*x) & self.pieces(*y) != EMPTY {
                    return false;
                }
            }
        }

        if self.color_combined(Color::Red) & self.color_combined(Color::Black) != EMPTY {
            return false;
        }

        let combined = ALL_PIECES.iter().fold(EMPTY, |cur, next| cur | self.pieces(*next));
        if combined != self.combined() {
            return false;
        }

        self.color_combined(Color::Red) | self.color_combined(Color::Black) == self.combined()
    }
}

impl Default for Board {
    /// The standard xiangqi starting placement, 32 pieces.
    fn default() -> Board {
        let mut board = Board::new();

        for &(color, back, cannon_rank, pawn_rank) in &[
            (Color::Red, 0u8, 2u8, 3u8),
            (Color::Black, 9u8, 7u8, 6u8),
        ] {
            let at = |rank: u8, file: u8| Square::new(rank * 9 + file);

            for &(piece, file) in &[
                (Piece::Chariot, 0),
                (Piece::Horse, 1),
                (Piece::Elephant, 2),
                (Piece::Advisor, 3),
                (Piece::King, 4),
                (Piece::Advisor, 5),
                (Piece::Elephant, 6),
                (Piece::Horse, 7),
                (Piece::Chariot, 8),
            ] {
                board.set(at(back, file), piece, color);
            }
            board.set(at(cannon_rank, 1), Piece::Cannon, color);
            board.set(at(cannon_rank, 7), Piece::Cannon, color);
            for file in (0..9).step_by(2) {
                board.set(at(pawn_rank, file), Piece::Pawn, color);
            }
        }

        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in ALL_RANKS.iter().rev() {
            write!(f, "{:>2} ", rank.to_index() + 1)?;
            for file in ALL_FILES.iter() {
                let sq = Square::make_square(*rank, *file);
                match (self.piece_on(sq), self.color_on(sq)) {
                    (Some(piece), Some(color)) => write!(f, " {} ", piece.to_string(color))?,
                    _ => write!(f, " . ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a  b  c  d  e  f  g  h  i")
    }
}
