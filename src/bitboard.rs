use crate::file::File;
use crate::rank::Rank;
use crate::square::{Square, NUM_SQUARES};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A set of squares, one bit per board intersection.  The 90 board squares
/// live in the low 90 bits of a `u128`; the upper bits are always zero, so
/// `!` masks its result back onto the board.
///
/// ```
/// use xiangqi::{BitBoard, EMPTY};
///
/// let bb = BitBoard::new(7); // a1, b1, c1
///
/// let mut count = 0;
/// for _ in bb {
///     count += 1;
/// }
/// assert_eq!(count, 3);
///
/// assert_eq!((!EMPTY).popcnt(), 90);
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Default, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct BitBoard(pub u128);

/// An empty bitboard.  `!EMPTY` is the universe of board squares.
pub const EMPTY: BitBoard = BitBoard(0);

/// Every square on the board.
pub const ALL: BitBoard = BitBoard((1u128 << NUM_SQUARES) - 1);

impl BitAnd for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn bitand(self, other: BitBoard) -> BitBoard {
        BitBoard(self.0 & other.0)
    }
}

impl BitOr for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn bitor(self, other: BitBoard) -> BitBoard {
        BitBoard(self.0 | other.0)
    }
}

impl BitXor for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn bitxor(self, other: BitBoard) -> BitBoard {
        BitBoard(self.0 ^ other.0)
    }
}

impl BitAndAssign for BitBoard {
    #[inline]
    fn bitand_assign(&mut self, other: BitBoard) {
        self.0 &= other.0;
    }
}

impl BitOrAssign for BitBoard {
    #[inline]
    fn bitor_assign(&mut self, other: BitBoard) {
        self.0 |= other.0;
    }
}

impl BitXorAssign for BitBoard {
    #[inline]
    fn bitxor_assign(&mut self, other: BitBoard) {
        self.0 ^= other.0;
    }
}

impl Not for BitBoard {
    type Output = BitBoard;

    /// Complement within the 90 board squares.
    #[inline]
    fn not(self) -> BitBoard {
        BitBoard(!self.0 & ALL.0)
    }
}

impl BitBoard {
    /// Construct a new bitboard from a raw bit pattern.  Bits above square
    /// 89 are the caller's mistake to make.
    #[inline]
    pub fn new(b: u128) -> BitBoard {
        BitBoard(b)
    }

    /// Construct a new `BitBoard` with a particular `Square` set
    #[inline]
    pub fn set(rank: Rank, file: File) -> BitBoard {
        BitBoard::from_square(Square::make_square(rank, file))
    }

    /// Construct a new `BitBoard` with a particular `Square` set
    #[inline]
    pub fn from_square(sq: Square) -> BitBoard {
        BitBoard(1u128 << sq.to_int())
    }

    /// Convert an `Option<Square>` to an `Option<BitBoard>`
    #[inline]
    pub fn from_maybe_square(sq: Option<Square>) -> Option<BitBoard> {
        sq.map(BitBoard::from_square)
    }

    /// Convert a `BitBoard` to a `Square`.  This grabs the least-significant
    /// `Square`.
    #[inline]
    pub fn to_square(&self) -> Square {
        Square::new(self.0.trailing_zeros() as u8)
    }

    /// The least-significant `Square`, if any bit is set.
    #[inline]
    pub fn first(&self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(self.to_square())
        }
    }

    /// The most-significant `Square`, if any bit is set.
    #[inline]
    pub fn last(&self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::new(127 - self.0.leading_zeros() as u8))
        }
    }

    /// Count the number of `Squares` set in this `BitBoard`
    #[inline]
    pub fn popcnt(&self) -> u32 {
        self.0.count_ones()
    }

    /// Is a particular `Square` a member of this set?
    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        self.0 & (1u128 << sq.to_int()) != 0
    }

    /// Get a `BitBoard` that represents all the squares on a particular rank.
    #[inline]
    pub fn get_rank(rank: Rank) -> BitBoard {
        BitBoard(0x1ffu128 << (rank.to_index() * 9))
    }
}

/// For the `BitBoard`, iterate over every `Square` set, in ascending order.
impl Iterator for BitBoard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            let result = self.to_square();
            *self ^= BitBoard::from_square(result);
            Some(result)
        }
    }
}

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s: String = "".to_owned();
        for rank in (0..10).rev() {
            for file in 0..9 {
                if self.0 & (1u128 << (rank * 9 + file)) != 0 {
                    s.push_str("X ");
                } else {
                    s.push_str(". ");
                }
            }
            s.push_str("\n");
        }
        write!(f, "{}", s)
    }
}
