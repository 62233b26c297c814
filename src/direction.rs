//! Motion directions.
//!
//! A [`Direction`] describes the navigation step that caused the switcher
//! popup to appear.  The popup uses it to pick which edge of the active cell
//! gets highlighted, and [`GridShape::neighbor`](crate::grid::GridShape::neighbor)
//! uses it to walk the grid.
//!
//! The host may report diagonal motion too; the indicator selector treats
//! those as "no direction" while navigation splits them into a vertical and a
//! horizontal step.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Direction of workspace motion (cardinal and diagonal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

/// Canonical names, one per variant.  Printing, parsing and serde all go
/// through this table.
const NAMES: [(Direction, &str); 8] = [
    (Direction::Up, "up"),
    (Direction::Down, "down"),
    (Direction::Left, "left"),
    (Direction::Right, "right"),
    (Direction::UpLeft, "up-left"),
    (Direction::UpRight, "up-right"),
    (Direction::DownLeft, "down-left"),
    (Direction::DownRight, "down-right"),
];

impl Direction {
    /// Every direction, cardinal ones first.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Split into `(vertical, horizontal)` row/column deltas.
    pub fn deltas(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }

    /// Whether this is one of the four cardinal directions, i.e. moves
    /// along exactly one axis.
    pub fn is_cardinal(self) -> bool {
        let (dr, dc) = self.deltas();
        (dr == 0) != (dc == 0)
    }

    /// Canonical lowercase name (`"up"`, `"down-left"`, ...).
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(d, _)| *d == self)
            .map_or("", |(_, name)| name)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a direction string.  Case, whitespace, `-` and `_` are ignored, so
/// "up-left", "UpLeft" and "up_left" all name the same direction.
pub fn parse_direction(s: &str) -> Option<Direction> {
    let key = squash(s);
    NAMES
        .iter()
        .find(|(_, name)| squash(name) == key)
        .map(|(d, _)| *d)
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_direction(&s).ok_or_else(|| {
            let known: Vec<&str> = NAMES.iter().map(|(_, name)| *name).collect();
            DeError::custom(format!(
                "invalid direction {:?}, expected one of {}",
                s,
                known.join(", ")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
        assert_eq!(Direction::Left.to_string(), "left");
        assert_eq!(Direction::Right.to_string(), "right");
        assert_eq!(Direction::UpLeft.to_string(), "up-left");
        assert_eq!(Direction::DownRight.to_string(), "down-right");
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!(parse_direction("UP"), Some(Direction::Up));
        assert_eq!(parse_direction(" left "), Some(Direction::Left));
        assert_eq!(parse_direction("up-left"), Some(Direction::UpLeft));
        assert_eq!(parse_direction("DownRight"), Some(Direction::DownRight));
        assert_eq!(parse_direction("down_left"), Some(Direction::DownLeft));
        assert_eq!(parse_direction("sideways"), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for d in Direction::ALL {
            assert_eq!(parse_direction(&d.to_string()), Some(d));
        }
    }

    #[test]
    fn deserialize_from_json_string() {
        let d: Direction = serde_json::from_str("\"Right\"").unwrap();
        assert_eq!(d, Direction::Right);
        assert!(serde_json::from_str::<Direction>("\"north\"").is_err());
    }

    #[test]
    fn serializes_as_canonical_name() {
        let json = serde_json::to_string(&Direction::DownLeft).unwrap();
        assert_eq!(json, "\"down-left\"");
        let back: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Direction::DownLeft);
    }

    #[test]
    fn every_variant_has_a_distinct_name() {
        let mut names: Vec<&str> = Direction::ALL.iter().map(|d| d.name()).collect();
        assert!(names.iter().all(|n| !n.is_empty()));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Direction::ALL.len());
    }

    #[test]
    fn only_four_are_cardinal() {
        assert!(Direction::Up.is_cardinal());
        assert!(Direction::Right.is_cardinal());
        assert!(!Direction::UpLeft.is_cardinal());
        assert!(!Direction::DownRight.is_cardinal());
        assert_eq!(Direction::ALL.iter().filter(|d| d.is_cardinal()).count(), 4);
    }
}
