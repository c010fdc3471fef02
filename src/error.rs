use failure::Fail;

/// Reasons a setup does not describe a legal xiangqi position.
///
/// Validation never repairs a setup; it reports the first rule the setup
/// breaks so callers can branch on the cause.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Fail)]
pub enum IllegalSetup {
    /// There are no pieces on the board at all.
    #[fail(display = "empty board")]
    Empty,
    /// The side that is *not* to move is in check.
    #[fail(display = "the side not to move is in check")]
    OppositeCheck,
    /// A side is missing its king, has more than one, or has a king outside
    /// its palace.
    #[fail(display = "missing, duplicated or misplaced king")]
    Kings,
    /// Too many advisors, or an advisor off the palace diagonal points.
    #[fail(display = "too many or misplaced advisors")]
    Advisors,
    /// Too many elephants, or an elephant off its seven legal points.
    #[fail(display = "too many or misplaced elephants")]
    Elephants,
    /// More than two horses of one color.
    #[fail(display = "too many horses")]
    Horses,
    /// More than two chariots of one color.
    #[fail(display = "too many chariots")]
    Chariots,
    /// More than two cannons of one color.
    #[fail(display = "too many cannons")]
    Cannons,
    /// Too many pawns, or a pawn outside its legal zone.
    #[fail(display = "too many or misplaced pawns")]
    Pawns,
    /// The two kings share a file with nothing between them.
    #[fail(display = "kings are facing each other")]
    FacingKings,
}

/// Sometimes, bad stuff happens.
#[derive(Clone, Debug, Fail)]
pub enum Error {
    /// The FEN string is invalid
    #[fail(display = "invalid FEN string: {}", fen)]
    InvalidFen { fen: String },

    /// The setup did not pass the position legality checks.
    #[fail(display = "illegal setup: {}", _0)]
    InvalidSetup(#[cause] IllegalSetup),

    /// An attempt was made to create a square from an invalid string
    #[fail(display = "the string specified does not contain a valid square")]
    InvalidSquare,

    /// An attempt was made to create a rank from an invalid string
    #[fail(display = "the string specified does not contain a valid rank")]
    InvalidRank,

    /// An attempt was made to create a file from an invalid string
    #[fail(display = "the string specified does not contain a valid file")]
    InvalidFile,
}

impl From<IllegalSetup> for Error {
    fn from(cause: IllegalSetup) -> Error {
        Error::InvalidSetup(cause)
    }
}
