use crate::rank::Rank;
use std::fmt;
use std::ops::Not;

/// Represent a side in a xiangqi game.  Red moves first.
#[derive(PartialOrd, Ord, PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Red,
    Black,
}

/// How many colors are there?
pub const NUM_COLORS: usize = 2;
/// List all colors
pub const ALL_COLORS: [Color; NUM_COLORS] = [Color::Red, Color::Black];

impl Color {
    /// Convert the `Color` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// The rank my major pieces start on (Red: rank 1, Black: rank 10).
    #[inline]
    pub fn to_my_backrank(&self) -> Rank {
        match *self {
            Color::Red => Rank::First,
            Color::Black => Rank::Tenth,
        }
    }

    /// The rank my pawns start on (Red: rank 4, Black: rank 7).
    #[inline]
    pub fn to_pawn_rank(&self) -> Rank {
        match *self {
            Color::Red => Rank::Fourth,
            Color::Black => Rank::Seventh,
        }
    }
}

impl Not for Color {
    type Output = Color;

    /// Get the other color.
    #[inline]
    fn not(self) -> Color {
        if self == Color::Red {
            Color::Black
        } else {
            Color::Red
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Color::Red => "red",
                Color::Black => "black",
            }
        )
    }
}
