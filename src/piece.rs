use crate::color::Color;
use std::fmt;

/// Represent a xiangqi piece type as a very simple enum.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Piece {
    Pawn,
    Advisor,
    Elephant,
    Horse,
    Cannon,
    Chariot,
    King,
}

/// How many piece types are there?
pub const NUM_PIECES: usize = 7;

/// An array representing each piece type, in order of ascending value.
pub const ALL_PIECES: [Piece; NUM_PIECES] = [
    Piece::Pawn,
    Piece::Advisor,
    Piece::Elephant,
    Piece::Horse,
    Piece::Cannon,
    Piece::Chariot,
    Piece::King,
];

impl Piece {
    /// Convert the `Piece` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Convert a piece with a color to a FEN letter.  Red pieces are
    /// uppercase, Black pieces lowercase.
    ///
    /// ```
    /// use xiangqi::{Piece, Color};
    ///
    /// assert_eq!(Piece::King.to_string(Color::Red), "K");
    /// assert_eq!(Piece::Horse.to_string(Color::Black), "n");
    /// ```
    pub fn to_string(&self, color: Color) -> String {
        let piece = format!("{}", self);
        if color == Color::Red {
            piece.to_uppercase()
        } else {
            piece
        }
    }

    /// Convert a FEN letter back to a piece and its color, if valid.
    pub fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'a' => Piece::Advisor,
            'b' | 'e' => Piece::Elephant,
            'n' | 'h' => Piece::Horse,
            'c' => Piece::Cannon,
            'r' => Piece::Chariot,
            'k' => Piece::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        Some((piece, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Piece::Pawn => "p",
                Piece::Advisor => "a",
                Piece::Elephant => "b",
                Piece::Horse => "n",
                Piece::Cannon => "c",
                Piece::Chariot => "r",
                Piece::King => "k",
            }
        )
    }
}
