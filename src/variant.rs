use crate::board_builder::BoardBuilder;
use crate::error::IllegalSetup;
use crate::position::Position;
use std::fmt;

/// Identifies a rule set.  There is exactly one today, but default
/// positions and setup validation dispatch through this tag so additional
/// rule sets can slot in without changing callers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    Xiangqi,
}

impl Variant {
    /// Look a variant up by its lowercase name.
    pub fn from_name(name: &str) -> Option<Variant> {
        match name {
            "xiangqi" => Some(Variant::Xiangqi),
            _ => None,
        }
    }

    /// The starting position for this variant.
    pub fn default_position(self) -> Position {
        match self {
            Variant::Xiangqi => Position::default(),
        }
    }

    /// Validate a setup under this variant's rules.
    pub fn position_from_setup(self, setup: &BoardBuilder) -> Result<Position, IllegalSetup> {
        match self {
            Variant::Xiangqi => Position::from_setup(setup),
        }
    }
}

impl Default for Variant {
    fn default() -> Variant {
        Variant::Xiangqi
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variant::Xiangqi => write!(f, "xiangqi"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(Variant::from_name("xiangqi"), Some(Variant::Xiangqi));
        assert_eq!(Variant::from_name("chess"), None);
        assert_eq!(Variant::from_name("Xiangqi"), None);
    }

    #[test]
    fn dispatch() {
        let variant = Variant::default();
        assert_eq!(variant.default_position(), Position::default());
        assert_eq!(format!("{}", variant), "xiangqi");

        let setup = BoardBuilder::from(&Position::default());
        let position = variant.position_from_setup(&setup).unwrap();
        assert_eq!(position, Position::default());
    }
}
