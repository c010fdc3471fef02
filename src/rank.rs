use crate::error::Error;
use std::str::FromStr;

/// Describe a rank (row) on a xiangqi board.  Rank 1 is Red's back rank,
/// rank 10 is Black's.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
    Tenth,
}

/// How many ranks are there?
pub const NUM_RANKS: usize = 10;

/// Enumerate all ranks
pub const ALL_RANKS: [Rank; NUM_RANKS] = [
    Rank::First,
    Rank::Second,
    Rank::Third,
    Rank::Fourth,
    Rank::Fifth,
    Rank::Sixth,
    Rank::Seventh,
    Rank::Eighth,
    Rank::Ninth,
    Rank::Tenth,
];

impl Rank {
    /// Convert a `usize` into a `Rank` (the inverse of to_index).  If the
    /// number is > 9, wrap around.
    #[inline]
    pub fn from_index(i: usize) -> Rank {
        ALL_RANKS[i % NUM_RANKS]
    }

    /// Go one rank down.  If impossible, wrap around.
    #[inline]
    pub fn down(&self) -> Rank {
        Rank::from_index(self.to_index().wrapping_sub(1).min(NUM_RANKS - 1))
    }

    /// Go one rank up.  If impossible, wrap around.
    #[inline]
    pub fn up(&self) -> Rank {
        Rank::from_index(self.to_index() + 1)
    }

    /// Convert this `Rank` into a `usize` between 0 and 9 (inclusive).
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Rank::First),
            "2" => Ok(Rank::Second),
            "3" => Ok(Rank::Third),
            "4" => Ok(Rank::Fourth),
            "5" => Ok(Rank::Fifth),
            "6" => Ok(Rank::Sixth),
            "7" => Ok(Rank::Seventh),
            "8" => Ok(Rank::Eighth),
            "9" => Ok(Rank::Ninth),
            "10" => Ok(Rank::Tenth),
            _ => Err(Error::InvalidRank),
        }
    }
}
