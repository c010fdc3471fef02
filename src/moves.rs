use crate::square::Square;
use std::fmt;
use std::str::FromStr;

/// Represent a move in memory: a source square and a destination square.
/// There are no promotions or special moves in xiangqi.
#[derive(Clone, Copy, Eq, Ord, PartialOrd, PartialEq, Default, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Create a new move, given a source `Square` and a destination
    /// `Square`.
    #[inline]
    pub fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn get_source(&self) -> Square {
        self.from
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn get_dest(&self) -> Square {
        self.to
    }

    /// Convert a coordinate `String` like "b1c3" to a move.  If invalid,
    /// return `None`.
    ///
    /// ```
    /// use xiangqi::{Move, Square};
    /// use std::str::FromStr;
    ///
    /// let mv = Move::new(
    ///     Square::from_str("b1").unwrap(),
    ///     Square::from_str("c3").unwrap(),
    /// );
    /// assert_eq!(Move::from_string("b1c3".to_owned()), Some(mv));
    /// ```
    pub fn from_string(s: String) -> Option<Move> {
        // valid coordinate moves are pure ASCII, so byte slicing is safe
        if !s.is_ascii() {
            return None;
        }
        // the rank digits make the square names 2 or 3 characters wide, so
        // try both split points
        for split in 2..=3 {
            if s.len() < split + 2 {
                continue;
            }
            if let (Ok(from), Ok(to)) = (
                Square::from_str(&s[0..split]),
                Square::from_str(&s[split..]),
            ) {
                return Some(Move::new(from, to));
            }
        }
        None
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
