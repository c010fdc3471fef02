use crate::color::Color;
use crate::error::Error;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Represents a xiangqi position that has *not* been validated for
/// legality.
///
/// This structure is useful in the following cases:
/// * You are trying to build a position from user input square by square
///   and want to defer legality checking until the end.
/// * You want to read or write FEN strings; `BoardBuilder` implements
///   `FromStr` and `Display` for exactly that notation.
///
/// Convert it into a [`Position`] with `try_into()`, which runs the full
/// setup validation and classifies whatever is wrong.
///
/// ```
/// use xiangqi::{BoardBuilder, Position};
/// use std::convert::TryInto;
/// use std::str::FromStr;
///
/// let setup =
///     BoardBuilder::from_str("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1")
///         .unwrap();
/// let position: Position = setup.try_into().unwrap();
/// assert_eq!(position, Position::default());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BoardBuilder {
    pieces: [Option<(Piece, Color)>; NUM_SQUARES],
    side_to_move: Color,
    halfmoves: u32,
    fullmoves: u32,
}

impl BoardBuilder {
    /// Construct a new, empty `BoardBuilder`: no pieces, Red to move,
    /// counters at 0 and 1.
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            pieces: [None; NUM_SQUARES],
            side_to_move: Color::Red,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// Set up a board with a list of piece placements and the remaining
    /// state in one call.
    pub fn setup<'a>(
        pieces: impl IntoIterator<Item = &'a (Square, Piece, Color)>,
        side_to_move: Color,
        halfmoves: u32,
        fullmoves: u32,
    ) -> BoardBuilder {
        let mut result = BoardBuilder {
            pieces: [None; NUM_SQUARES],
            side_to_move,
            halfmoves,
            fullmoves,
        };

        for (square, piece, color) in pieces.into_iter() {
            result.pieces[square.to_index()] = Some((*piece, *color));
        }

        result
    }

    /// Get the side to move.
    pub fn get_side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Get the halfmove counter.
    pub fn get_halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Get the fullmove counter.
    pub fn get_fullmoves(&self) -> u32 {
        self.fullmoves
    }

    /// Set the side to move.  This function can be used on self directly or
    /// in a builder pattern.
    pub fn side_to_move(&mut self, color: Color) -> &mut Self {
        self.side_to_move = color;
        self
    }

    /// Set the halfmove counter.
    pub fn halfmoves(&mut self, halfmoves: u32) -> &mut Self {
        self.halfmoves = halfmoves;
        self
    }

    /// Set the fullmove counter.
    pub fn fullmoves(&mut self, fullmoves: u32) -> &mut Self {
        self.fullmoves = fullmoves;
        self
    }

    /// Set a square to a particular piece.
    pub fn piece(&mut self, square: Square, piece: Piece, color: Color) -> &mut Self {
        self[square] = Some((piece, color));
        self
    }

    /// Set a square back to empty.
    pub fn clear_square(&mut self, square: Square) -> &mut Self {
        self[square] = None;
        self
    }
}

impl Index<Square> for BoardBuilder {
    type Output = Option<(Piece, Color)>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.pieces[index.to_index()]
    }
}

impl IndexMut<Square> for BoardBuilder {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.pieces[index.to_index()]
    }
}

impl fmt::Display for BoardBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..10).rev() {
            let mut empties = 0;
            for file in 0..9 {
                match self.pieces[rank * 9 + file] {
                    Some((piece, color)) => {
                        if empties != 0 {
                            write!(f, "{}", empties)?;
                            empties = 0;
                        }
                        write!(f, "{}", piece.to_string(color))?;
                    }
                    None => empties += 1,
                }
            }
            if empties != 0 {
                write!(f, "{}", empties)?;
            }
            if rank != 0 {
                write!(f, "/")?;
            }
        }

        write!(
            f,
            " {} - - {} {}",
            match self.side_to_move {
                Color::Red => "w",
                Color::Black => "b",
            },
            self.halfmoves,
            self.fullmoves,
        )
    }
}

impl Default for BoardBuilder {
    /// The FEN of the starting position.
    fn default() -> BoardBuilder {
        BoardBuilder::from(&Position::default())
    }
}

impl FromStr for BoardBuilder {
    type Err = Error;

    /// Parse a xiangqi FEN: piece placement and side to move, two "-"
    /// placeholder fields, then optional halfmove and fullmove counters.
    /// The placeholders and counters may be omitted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFen {
            fen: value.to_string(),
        };

        let mut builder = BoardBuilder::new();
        let mut tokens = value.split_whitespace();

        let placement = tokens.next().ok_or_else(invalid)?;
        let mut rows = 0;
        for (i, row) in placement.split('/').enumerate() {
            if i >= 10 {
                return Err(invalid());
            }
            let rank = 9 - i;
            let mut file = 0;
            for c in row.chars() {
                match c.to_digit(10) {
                    Some(0) => return Err(invalid()),
                    Some(skip) => file += skip as usize,
                    None => {
                        let (piece, color) = Piece::from_fen_char(c).ok_or_else(invalid)?;
                        if file >= 9 {
                            return Err(invalid());
                        }
                        builder.pieces[rank * 9 + file] = Some((piece, color));
                        file += 1;
                    }
                }
            }
            if file != 9 {
                return Err(invalid());
            }
            rows += 1;
        }
        if rows != 10 {
            return Err(invalid());
        }

        match tokens.next().ok_or_else(invalid)? {
            "w" | "r" => builder.side_to_move(Color::Red),
            "b" => builder.side_to_move(Color::Black),
            _ => return Err(invalid()),
        };

        let mut counters = tokens.filter(|token| *token != "-");
        if let Some(token) = counters.next() {
            builder.halfmoves(token.parse().map_err(|_| invalid())?);
        }
        if let Some(token) = counters.next() {
            builder.fullmoves(token.parse().map_err(|_| invalid())?);
        }
        if counters.next().is_some() {
            return Err(invalid());
        }

        Ok(builder)
    }
}

impl From<&Position> for BoardBuilder {
    /// Export a position, clamping the counters to the ranges FEN
    /// consumers can rely on: halfmoves at most 150, fullmoves in
    /// 1..=9999.
    fn from(position: &Position) -> Self {
        let mut builder = BoardBuilder::new();
        for square in ALL_SQUARES.iter() {
            if let (Some(piece), Some(color)) = (
                position.board().piece_on(*square),
                position.board().color_on(*square),
            ) {
                builder.piece(*square, piece, color);
            }
        }
        builder.side_to_move(position.turn());
        builder.halfmoves(position.halfmoves().min(150));
        builder.fullmoves(position.fullmoves().max(1).min(9999));
        builder
    }
}

impl TryFrom<&BoardBuilder> for Position {
    type Error = Error;

    fn try_from(builder: &BoardBuilder) -> Result<Position, Error> {
        Ok(Position::from_setup(builder)?)
    }
}

impl TryFrom<BoardBuilder> for Position {
    type Error = Error;

    fn try_from(builder: BoardBuilder) -> Result<Position, Error> {
        Position::try_from(&builder)
    }
}
