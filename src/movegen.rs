use crate::bitboard::{BitBoard, EMPTY};
use crate::moves::Move;
use crate::position::Position;
use crate::square::Square;
use arrayvec::ArrayVec;

/// Never, ever, iterate over this.  See [`MoveGen`] for more details.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SquareAndBitBoard {
    square: Square,
    bitboard: BitBoard,
}

/// A plain list of moves, for callers that want to collect and shuffle.
pub type MoveList = ArrayVec<Move, 256>;

/// An incremental move generator.
///
/// The structure is lazy in one sense: legality is resolved up front (one
/// destination bitboard per piece of the side to move), but individual
/// `Move` values are only materialized as the iterator is consumed.
///
/// ```
/// use xiangqi::{MoveGen, Position};
///
/// let position = Position::default();
/// let mut count = 0;
/// for _ in MoveGen::new_legal(&position) {
///     count += 1;
/// }
/// assert_eq!(count, 44);
/// ```
pub struct MoveGen {
    moves: ArrayVec<SquareAndBitBoard, 16>,
    index: usize,
}

impl MoveGen {
    /// Create a new `MoveGen` structure, only generating legal moves.
    pub fn new_legal(position: &Position) -> MoveGen {
        let ctx = position.ctx();
        let mut moves = ArrayVec::new();
        for (square, bitboard) in position.all_dests(Some(&ctx)) {
            if bitboard != EMPTY {
                moves.push(SquareAndBitBoard { square, bitboard });
            }
        }
        MoveGen { moves, index: 0 }
    }
}

impl Iterator for MoveGen {
    type Item = Move;

    /// Find the next move in ascending square order.
    fn next(&mut self) -> Option<Move> {
        while self.index < self.moves.len() {
            let entry = &mut self.moves[self.index];
            if entry.bitboard == EMPTY {
                self.index += 1;
                continue;
            }
            let dest = entry.bitboard.to_square();
            entry.bitboard ^= BitBoard::from_square(dest);
            return Some(Move::new(entry.square, dest));
        }
        None
    }

    /// Give the size hint.  In this case, we can give the exact size.
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for MoveGen {
    /// The number of moves left to yield.
    fn len(&self) -> usize {
        self.moves[self.index..]
            .iter()
            .map(|entry| entry.bitboard.popcnt() as usize)
            .sum()
    }
}
