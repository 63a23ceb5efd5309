//! Compass directions on a screen-oriented grid (Y grows down).

use std::fmt;

use crate::geom::Point;

/// One of the eight compass directions.
///
/// Variants are declared clockwise starting from `Up`, so rotation is
/// arithmetic on the discriminant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

/// The four orthogonal directions, clockwise from `Up`.
pub const CARDINALS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

/// The four diagonal directions, clockwise from `UpRight`.
pub const DIAGONALS: [Direction; 4] = [
    Direction::UpRight,
    Direction::DownRight,
    Direction::DownLeft,
    Direction::UpLeft,
];

impl Direction {
    /// All eight directions, clockwise from `Up`.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// Unit offset of a single step in this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::UpRight => Point::new(1, -1),
            Direction::Right => Point::new(1, 0),
            Direction::DownRight => Point::new(1, 1),
            Direction::Down => Point::new(0, 1),
            Direction::DownLeft => Point::new(-1, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::UpLeft => Point::new(-1, -1),
        }
    }

    /// The direction whose unit offset is `delta`, if any.
    pub fn from_offset(delta: Point) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.offset() == delta)
    }

    /// Parse a movement arrow (`^`, `>`, `v`, `<`).
    pub fn from_arrow(c: char) -> Option<Direction> {
        match c {
            '^' => Some(Direction::Up),
            '>' => Some(Direction::Right),
            'v' | 'V' => Some(Direction::Down),
            '<' => Some(Direction::Left),
            _ => None,
        }
    }

    #[inline]
    fn rotate(self, eighths: u8) -> Direction {
        Self::ALL[(self as usize + eighths as usize) % 8]
    }

    /// Rotate 45° clockwise.
    #[inline]
    pub fn rotate_cw(self) -> Direction {
        self.rotate(1)
    }

    /// Rotate 45° counter-clockwise.
    #[inline]
    pub fn rotate_ccw(self) -> Direction {
        self.rotate(7)
    }

    /// Rotate 90° clockwise.
    #[inline]
    pub fn turn_right(self) -> Direction {
        self.rotate(2)
    }

    /// Rotate 90° counter-clockwise.
    #[inline]
    pub fn turn_left(self) -> Direction {
        self.rotate(6)
    }

    /// The opposite direction.
    #[inline]
    pub fn reverse(self) -> Direction {
        self.rotate(4)
    }

    /// Whether this is one of the four orthogonal directions.
    #[inline]
    pub fn is_cardinal(self) -> bool {
        (self as u8) % 2 == 0
    }

    /// Whether moving along `next` after `self` changes both axes of travel.
    ///
    /// For cardinal directions this is exactly a 90° turn; carrying straight on
    /// or reversing keeps one axis fixed.
    #[inline]
    pub fn is_turn_to(self, next: Direction) -> bool {
        let a = self.offset();
        let b = next.offset();
        (a.x != -b.x && a.x != b.x) || (a.y != -b.y && a.y != b.y)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::UpRight => "up-right",
            Direction::Right => "right",
            Direction::DownRight => "down-right",
            Direction::Down => "down",
            Direction::DownLeft => "down-left",
            Direction::Left => "left",
            Direction::UpLeft => "up-left",
        };
        f.write_str(name)
    }
}
