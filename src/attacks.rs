//! Geometric attack generation for every piece type, plus the palace,
//! river and legal-zone masks that encode the board topology.
//!
//! All generators answer the question "which squares does a piece of this
//! type standing on `sq` reach, given `occupied` blockers".  Horse and pawn
//! attacks are not symmetric, so those two also get inverse generators
//! (`horse_attackers`, `pawn_attackers`) used when computing the attackers
//! of a square.

use crate::bitboard::{BitBoard, EMPTY};
use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;

const ALL_MASK: u128 = (1u128 << 90) - 1;

const fn sq_bits(file: u128, rank: u128) -> u128 {
    1u128 << (rank * 9 + file)
}

const fn rank_bits(rank: u128) -> u128 {
    0x1ffu128 << (rank * 9)
}

const fn rank_span(from: u128, to: u128) -> u128 {
    let mut bits = 0u128;
    let mut r = from;
    while r <= to {
        bits |= rank_bits(r);
        r += 1;
    }
    bits
}

const fn palace_bits(low_rank: u128) -> u128 {
    let mut bits = 0u128;
    let mut r = low_rank;
    while r < low_rank + 3 {
        bits |= sq_bits(3, r) | sq_bits(4, r) | sq_bits(5, r);
        r += 1;
    }
    bits
}

const RED_PALACE: u128 = palace_bits(0);
const BLACK_PALACE: u128 = palace_bits(7);

/// Both palaces.  King and advisor steps are confined to this mask.
pub const PALACES: BitBoard = BitBoard(RED_PALACE | BLACK_PALACE);

/// Red's half of the board (ranks 1-5).
pub const RED_SIDE: BitBoard = BitBoard(rank_span(0, 4));
/// Black's half of the board (ranks 6-10).
pub const BLACK_SIDE: BitBoard = BitBoard(rank_span(5, 9));

const RED_ADVISOR_POINTS: u128 =
    sq_bits(3, 0) | sq_bits(5, 0) | sq_bits(4, 1) | sq_bits(3, 2) | sq_bits(5, 2);
const BLACK_ADVISOR_POINTS: u128 =
    sq_bits(3, 9) | sq_bits(5, 9) | sq_bits(4, 8) | sq_bits(3, 7) | sq_bits(5, 7);

const RED_ELEPHANT_POINTS: u128 = sq_bits(2, 0)
    | sq_bits(6, 0)
    | sq_bits(0, 2)
    | sq_bits(4, 2)
    | sq_bits(8, 2)
    | sq_bits(2, 4)
    | sq_bits(6, 4);
const BLACK_ELEPHANT_POINTS: u128 = sq_bits(2, 9)
    | sq_bits(6, 9)
    | sq_bits(0, 7)
    | sq_bits(4, 7)
    | sq_bits(8, 7)
    | sq_bits(2, 5)
    | sq_bits(6, 5);

const fn pawn_zone_bits(home_pawn_rank: u128, across: u128) -> u128 {
    let mut bits = across;
    let mut f = 0;
    while f < 9 {
        bits |= sq_bits(f, home_pawn_rank) | sq_bits(f, home_pawn_rank + 1);
        f += 2;
    }
    bits
}

const RED_PAWN_ZONE: u128 = pawn_zone_bits(3, rank_span(5, 9));
const BLACK_PAWN_ZONE: u128 = {
    // Black's home pawn ranks are 7 and 6 counting down; mirror of Red.
    let mut bits = rank_span(0, 4);
    let mut f = 0;
    while f < 9 {
        bits |= sq_bits(f, 6) | sq_bits(f, 5);
        f += 2;
    }
    bits
};

/// The palace a king of `color` must stay inside.
#[inline]
pub fn palace(color: Color) -> BitBoard {
    match color {
        Color::Red => BitBoard(RED_PALACE),
        Color::Black => BitBoard(BLACK_PALACE),
    }
}

/// Squares where a piece of this type and color is *not* allowed to stand.
/// Horses, chariots and cannons roam the whole board.
pub fn banned_zone(piece: Piece, color: Color) -> BitBoard {
    let allowed = match (piece, color) {
        (Piece::King, _) => return !palace(color),
        (Piece::Advisor, Color::Red) => RED_ADVISOR_POINTS,
        (Piece::Advisor, Color::Black) => BLACK_ADVISOR_POINTS,
        (Piece::Elephant, Color::Red) => RED_ELEPHANT_POINTS,
        (Piece::Elephant, Color::Black) => BLACK_ELEPHANT_POINTS,
        (Piece::Pawn, Color::Red) => RED_PAWN_ZONE,
        (Piece::Pawn, Color::Black) => BLACK_PAWN_ZONE,
        _ => ALL_MASK,
    };
    BitBoard(!allowed & ALL_MASK)
}

/// Step from a square by file/rank deltas, rejecting anything that falls
/// off the board.  Deltas are compared in file/rank space, so a step can
/// never wrap around a board edge.
#[inline]
fn offset(sq: Square, df: i32, dr: i32) -> Option<Square> {
    let file = (sq.to_index() % 9) as i32 + df;
    let rank = (sq.to_index() / 9) as i32 + dr;
    if (0..9).contains(&file) && (0..10).contains(&rank) {
        Some(Square::new((rank * 9 + file) as u8))
    } else {
        None
    }
}

/// The half of the board `sq` lies on.
#[inline]
fn river_side(sq: Square) -> BitBoard {
    if sq.to_index() < 45 {
        RED_SIDE
    } else {
        BLACK_SIDE
    }
}

/// Get the moves for a king on a particular square: one orthogonal step,
/// confined to the palace.
pub fn king_attacks(sq: Square) -> BitBoard {
    let mut result = EMPTY;
    for &(df, dr) in &[(1, 0), (-1, 0), (0, 1), (0, -1)] {
        if let Some(dest) = offset(sq, df, dr) {
            result |= BitBoard::from_square(dest);
        }
    }
    result & PALACES
}

/// Get the moves for an advisor on a particular square: one diagonal step,
/// confined to the palace.
pub fn advisor_attacks(sq: Square) -> BitBoard {
    let mut result = EMPTY;
    for &(df, dr) in &[(1, 1), (1, -1), (-1, 1), (-1, -1)] {
        if let Some(dest) = offset(sq, df, dr) {
            result |= BitBoard::from_square(dest);
        }
    }
    result & PALACES
}

/// Get the moves for an elephant on a particular square: two diagonal
/// steps, blocked by a piece on the intervening "eye" square, and never
/// across the river.  The shape is symmetric, so this also serves as the
/// inverse when looking for elephants attacking `sq`.
pub fn elephant_attacks(sq: Square, occupied: BitBoard) -> BitBoard {
    let mut result = EMPTY;
    for &(df, dr) in &[(2, 2), (2, -2), (-2, 2), (-2, -2)] {
        let eye = match offset(sq, df / 2, dr / 2) {
            Some(eye) => eye,
            None => continue,
        };
        if occupied.contains(eye) {
            continue;
        }
        if let Some(dest) = offset(sq, df, dr) {
            result |= BitBoard::from_square(dest);
        }
    }
    result & river_side(sq)
}

// Horse jump offsets paired with the leg square (relative to the horse)
// that must be empty for the jump.
const HORSE_JUMPS: [((i32, i32), (i32, i32)); 8] = [
    ((1, 2), (0, 1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
];

// The same 8 jumps seen from the target square: a horse on `sq + jump`
// attacks `sq` iff the diagonal square between them is empty.
const HORSE_APPROACHES: [((i32, i32), (i32, i32)); 8] = [
    ((1, 2), (1, 1)),
    ((2, 1), (1, 1)),
    ((-1, 2), (-1, 1)),
    ((-2, 1), (-1, 1)),
    ((1, -2), (1, -1)),
    ((2, -1), (1, -1)),
    ((-1, -2), (-1, -1)),
    ((-2, -1), (-1, -1)),
];

/// Get the moves for a horse on a particular square, given the blocking
/// pieces: one orthogonal step (the leg, which must be empty) followed by
/// one diagonal step outward.
pub fn horse_attacks(sq: Square, occupied: BitBoard) -> BitBoard {
    let mut result = EMPTY;
    for &((df, dr), (lf, lr)) in &HORSE_JUMPS {
        let leg = match offset(sq, lf, lr) {
            Some(leg) => leg,
            None => continue,
        };
        if occupied.contains(leg) {
            continue;
        }
        if let Some(dest) = offset(sq, df, dr) {
            result |= BitBoard::from_square(dest);
        }
    }
    result
}

/// The squares from which a horse attacks `sq`, given the blocking pieces.
/// Not the same set as `horse_attacks`: the leg sits next to the horse, so
/// the blocking square differs between the two directions.
pub fn horse_attackers(sq: Square, occupied: BitBoard) -> BitBoard {
    let mut result = EMPTY;
    for &((df, dr), (lf, lr)) in &HORSE_APPROACHES {
        let source = match offset(sq, df, dr) {
            Some(source) => source,
            None => continue,
        };
        let leg = match offset(sq, lf, lr) {
            Some(leg) => leg,
            None => continue,
        };
        if !occupied.contains(leg) {
            result |= BitBoard::from_square(source);
        }
    }
    result
}

/// Get the moves for a chariot on a particular square, given the blocking
/// pieces: orthogonal slides up to and including the first blocker.
pub fn chariot_attacks(sq: Square, occupied: BitBoard) -> BitBoard {
    let mut result = EMPTY;
    for &(df, dr) in &[(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let mut current = sq;
        while let Some(dest) = offset(current, df, dr) {
            result |= BitBoard::from_square(dest);
            if occupied.contains(dest) {
                break;
            }
            current = dest;
        }
    }
    result
}

/// Get the moves for a cannon on a particular square, given the blocking
/// pieces: quiet slides over empty squares, plus the first piece found
/// *behind* exactly one screen (the cannon's capture).
pub fn cannon_attacks(sq: Square, occupied: BitBoard) -> BitBoard {
    let mut result = EMPTY;
    for &(df, dr) in &[(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let mut current = sq;
        let mut behind_screen = false;
        while let Some(dest) = offset(current, df, dr) {
            if !occupied.contains(dest) {
                if !behind_screen {
                    result |= BitBoard::from_square(dest);
                }
            } else if behind_screen {
                result |= BitBoard::from_square(dest);
                break;
            } else {
                behind_screen = true;
            }
            current = dest;
        }
    }
    result
}

/// Get the moves for a pawn of a given color on a particular square:
/// one step forward, plus one step sideways once it has crossed the river.
/// Pawn moves and pawn attacks are the same set in xiangqi.
pub fn pawn_attacks(color: Color, sq: Square) -> BitBoard {
    let mut result = BitBoard::from_maybe_square(sq.forward(color)).unwrap_or(EMPTY);
    let crossed = match color {
        Color::Red => sq.to_index() >= 45,
        Color::Black => sq.to_index() < 45,
    };
    if crossed {
        result |= BitBoard::from_maybe_square(sq.left()).unwrap_or(EMPTY);
        result |= BitBoard::from_maybe_square(sq.right()).unwrap_or(EMPTY);
    }
    result
}

/// The squares from which a pawn of `color` attacks `sq`.  A pawn attacks
/// one square ahead of itself always, and sideways only past the river;
/// the sideways sources share a rank with the target, so the target's side
/// of the river decides whether they apply.
pub fn pawn_attackers(color: Color, sq: Square) -> BitBoard {
    let mut result = BitBoard::from_maybe_square(sq.backward(color)).unwrap_or(EMPTY);
    let crossed = match color {
        Color::Red => sq.to_index() >= 45,
        Color::Black => sq.to_index() < 45,
    };
    if crossed {
        result |= BitBoard::from_maybe_square(sq.left()).unwrap_or(EMPTY);
        result |= BitBoard::from_maybe_square(sq.right()).unwrap_or(EMPTY);
    }
    result
}

/// The squares strictly between two squares sharing a file or a rank.
/// Empty if they share neither.
pub fn between(a: Square, b: Square) -> BitBoard {
    if a == b {
        return EMPTY;
    }
    let (df, dr) = if a.get_file() == b.get_file() {
        (0, if a < b { 1 } else { -1 })
    } else if a.get_rank() == b.get_rank() {
        (if a < b { 1 } else { -1 }, 0)
    } else {
        return EMPTY;
    };

    let mut result = EMPTY;
    let mut current = a;
    while let Some(next) = offset(current, df, dr) {
        if next == b {
            break;
        }
        result |= BitBoard::from_square(next);
        current = next;
    }
    result
}

/// Get the raw geometric moves for a piece of a given type and color on a
/// particular square, given the blocking pieces.
pub fn attacks(piece: Piece, color: Color, sq: Square, occupied: BitBoard) -> BitBoard {
    match piece {
        Piece::Pawn => pawn_attacks(color, sq),
        Piece::Advisor => advisor_attacks(sq),
        Piece::Elephant => elephant_attacks(sq, occupied),
        Piece::Horse => horse_attacks(sq, occupied),
        Piece::Cannon => cannon_attacks(sq, occupied),
        Piece::Chariot => chariot_attacks(sq, occupied),
        Piece::King => king_attacks(sq),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    fn bb(names: &[&str]) -> BitBoard {
        names
            .iter()
            .fold(EMPTY, |b, name| b | BitBoard::from_square(sq(name)))
    }

    #[test]
    fn king_stays_in_palace() {
        assert_eq!(king_attacks(sq("e1")), bb(&["d1", "f1", "e2"]));
        assert_eq!(king_attacks(sq("d3")), bb(&["e3", "d2"]));
        assert_eq!(king_attacks(sq("e9")), bb(&["d9", "f9", "e8", "e10"]));
    }

    #[test]
    fn advisor_stays_in_palace() {
        assert_eq!(advisor_attacks(sq("e2")), bb(&["d1", "f1", "d3", "f3"]));
        assert_eq!(advisor_attacks(sq("d1")), bb(&["e2"]));
    }

    #[test]
    fn elephant_eye_and_river() {
        // free elephant in the middle of its own camp
        assert_eq!(
            elephant_attacks(sq("e3"), EMPTY),
            bb(&["c1", "g1", "c5", "g5"])
        );
        // a piece on the eye blocks the jump
        assert_eq!(
            elephant_attacks(sq("e3"), bb(&["d2", "f4"])),
            bb(&["g1", "c5"])
        );
        // the river is a hard wall: from c5 only same-side points remain
        assert_eq!(elephant_attacks(sq("c5"), EMPTY), bb(&["a3", "e3"]));
    }

    #[test]
    fn horse_leg_blocking() {
        assert_eq!(
            horse_attacks(sq("e5"), EMPTY),
            bb(&["d7", "f7", "d3", "f3", "c6", "c4", "g6", "g4"])
        );
        // a piece directly above blocks both upward jumps
        assert_eq!(
            horse_attacks(sq("e5"), bb(&["e6"])),
            bb(&["d3", "f3", "c6", "c4", "g6", "g4"])
        );
        // corner horse
        assert_eq!(horse_attacks(sq("a1"), EMPTY), bb(&["b3", "c2"]));
    }

    #[test]
    fn horse_attackers_use_the_other_leg() {
        // The leg sits next to the horse, so the attack relation is not
        // symmetric.  With e6 occupied, a horse on e5 cannot reach f7...
        let occupied = bb(&["e5", "e6", "f7"]);
        assert!(!horse_attacks(sq("e5"), occupied).contains(sq("f7")));
        assert!(!horse_attackers(sq("f7"), occupied).contains(sq("e5")));
        // ...but a horse on f7 still reaches e5 (its leg is f6).
        assert!(horse_attacks(sq("f7"), occupied).contains(sq("e5")));
        assert!(horse_attackers(sq("e5"), occupied).contains(sq("f7")));

        // blocking f6 flips both of those
        let occupied = bb(&["e5", "f6", "f7"]);
        assert!(horse_attackers(sq("f7"), occupied).contains(sq("e5")));
        assert!(!horse_attackers(sq("e5"), occupied).contains(sq("f7")));
    }

    #[test]
    fn chariot_slides_to_first_blocker() {
        assert_eq!(chariot_attacks(sq("a1"), EMPTY).popcnt(), 17);
        let occupied = bb(&["a4", "c1"]);
        assert_eq!(
            chariot_attacks(sq("a1"), occupied),
            bb(&["a2", "a3", "a4", "b1", "c1"])
        );
    }

    #[test]
    fn cannon_needs_a_screen_to_capture() {
        // quiet moves stop before the first blocker; the capture is the
        // first piece behind it.
        let occupied = bb(&["e4", "e7"]);
        let attacks = cannon_attacks(sq("e2"), occupied);
        assert!(attacks.contains(sq("e3"))); // quiet
        assert!(!attacks.contains(sq("e4"))); // the screen itself
        assert!(!attacks.contains(sq("e5"))); // shadow of the screen
        assert!(attacks.contains(sq("e7"))); // capture behind the screen
        assert!(!attacks.contains(sq("e8"))); // nothing past the capture

        // two screens protect everything behind them
        let occupied = bb(&["e4", "e5", "e7"]);
        assert!(!cannon_attacks(sq("e2"), occupied).contains(sq("e7")));
    }

    #[test]
    fn pawn_crosses_the_river() {
        // before the river: forward only
        assert_eq!(pawn_attacks(Color::Red, sq("e4")), bb(&["e5"]));
        // after the river: forward and sideways
        assert_eq!(pawn_attacks(Color::Red, sq("e6")), bb(&["e7", "d6", "f6"]));
        // on the last rank: sideways only
        assert_eq!(pawn_attacks(Color::Red, sq("e10")), bb(&["d10", "f10"]));
        // black mirrors
        assert_eq!(pawn_attacks(Color::Black, sq("e7")), bb(&["e6"]));
        assert_eq!(
            pawn_attacks(Color::Black, sq("e5")),
            bb(&["e4", "d5", "f5"])
        );
    }

    #[test]
    fn pawn_attackers_mirror_pawn_attacks() {
        // a red pawn on e6 attacks f6; so from f6, e6 is an attacker source
        assert!(pawn_attackers(Color::Red, sq("f6")).contains(sq("e6")));
        // but a red pawn cannot attack sideways on its own side
        assert!(!pawn_attackers(Color::Red, sq("f4")).contains(sq("e4")));
        // forward attack is always on
        assert!(pawn_attackers(Color::Red, sq("e5")).contains(sq("e4")));
        assert!(pawn_attackers(Color::Black, sq("e5")).contains(sq("e6")));
    }

    #[test]
    fn between_on_files_and_ranks() {
        assert_eq!(between(sq("e1"), sq("e4")), bb(&["e2", "e3"]));
        assert_eq!(between(sq("e4"), sq("e1")), bb(&["e2", "e3"]));
        assert_eq!(between(sq("a1"), sq("d1")), bb(&["b1", "c1"]));
        assert_eq!(between(sq("a1"), sq("a2")), EMPTY);
        assert_eq!(between(sq("a1"), sq("b2")), EMPTY);
        assert_eq!(between(sq("e4"), sq("e4")), EMPTY);
    }

    #[test]
    fn banned_zones() {
        assert!(banned_zone(Piece::King, Color::Red).contains(sq("e4")));
        assert!(!banned_zone(Piece::King, Color::Red).contains(sq("e3")));
        assert!(banned_zone(Piece::Advisor, Color::Red).contains(sq("e1")));
        assert!(!banned_zone(Piece::Advisor, Color::Red).contains(sq("e2")));
        assert!(banned_zone(Piece::Elephant, Color::Red).contains(sq("c6")));
        assert!(!banned_zone(Piece::Elephant, Color::Red).contains(sq("c5")));
        assert!(banned_zone(Piece::Pawn, Color::Red).contains(sq("b4")));
        assert!(!banned_zone(Piece::Pawn, Color::Red).contains(sq("a4")));
        assert!(!banned_zone(Piece::Pawn, Color::Red).contains(sq("b6")));
        assert_eq!(banned_zone(Piece::Chariot, Color::Red), EMPTY);
    }
}
