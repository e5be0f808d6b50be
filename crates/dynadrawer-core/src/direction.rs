//! Drawer directions and their bitmask combinations.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use kurbo::Vec2;

use crate::error::{DrawerError, DrawerResult};

/// A direction that a drawer can be revealed in, or a mask of several.
///
/// Bit values follow rectangle-edge order. Operations that act on a single
/// drawer reject masked values; configuration setters accept masks and apply
/// to every contained direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Direction(u8);

impl Direction {
    /// No direction.
    pub const NONE: Direction = Direction(0);
    /// Drawer revealed from underneath the top edge of the pane.
    pub const TOP: Direction = Direction(1 << 0);
    /// Drawer revealed from underneath the left edge of the pane.
    pub const LEFT: Direction = Direction(1 << 1);
    /// Drawer revealed from underneath the bottom edge of the pane.
    pub const BOTTOM: Direction = Direction(1 << 2);
    /// Drawer revealed from underneath the right edge of the pane.
    pub const RIGHT: Direction = Direction(1 << 3);
    /// Left and right.
    pub const HORIZONTAL: Direction = Direction(Self::LEFT.0 | Self::RIGHT.0);
    /// Top and bottom.
    pub const VERTICAL: Direction = Direction(Self::TOP.0 | Self::BOTTOM.0);
    /// Every edge.
    pub const ALL: Direction = Direction(Self::HORIZONTAL.0 | Self::VERTICAL.0);

    /// Cardinal directions in canonical iteration order.
    pub const CARDINALS: [Direction; 4] = [Self::TOP, Self::LEFT, Self::BOTTOM, Self::RIGHT];

    /// Raw bit representation.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build a direction from raw bits, rejecting unknown bits.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Whether no direction bit is set.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether more than one direction bit is set.
    pub const fn is_masked(self) -> bool {
        self.0.count_ones() > 1
    }

    /// Whether exactly one direction bit is set.
    pub const fn is_single(self) -> bool {
        self.0.count_ones() == 1
    }

    /// Whether every bit of `other` is also set in `self`.
    pub const fn contains(self, other: Direction) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `self` and `other` share at least one bit.
    pub const fn intersects(self, other: Direction) -> bool {
        self.0 & other.0 != 0
    }

    /// Fail with [`DrawerError::InvalidDirection`] unless this is a single direction.
    pub fn require_single(self) -> DrawerResult<Direction> {
        if self.is_single() {
            Ok(self)
        } else {
            Err(DrawerError::InvalidDirection(self))
        }
    }

    /// Iterate the cardinal directions contained in this mask, in the order
    /// top, left, bottom, right.
    pub fn iter(self) -> Directions {
        Directions { mask: self, index: 0 }
    }

    /// Perform `action` on each cardinal direction contained in this mask.
    pub fn for_each_unmasked_value(self, action: impl FnMut(Direction)) {
        self.iter().for_each(action);
    }

    /// The direction on the other side of the same axis.
    pub fn opposite(self) -> DrawerResult<Direction> {
        match self {
            Self::TOP => Ok(Self::BOTTOM),
            Self::BOTTOM => Ok(Self::TOP),
            Self::LEFT => Ok(Self::RIGHT),
            Self::RIGHT => Ok(Self::LEFT),
            other => Err(DrawerError::InvalidDirection(other)),
        }
    }

    /// The axis the pane moves along when revealing this direction's drawer.
    pub fn axis(self) -> DrawerResult<Axis> {
        match self {
            Self::LEFT | Self::RIGHT => Ok(Axis::Horizontal),
            Self::TOP | Self::BOTTOM => Ok(Axis::Vertical),
            other => Err(DrawerError::InvalidDirection(other)),
        }
    }

    /// Unit displacement of the pane when revealing this direction's drawer.
    ///
    /// Revealing the left drawer moves the pane right, and so on. Returns
    /// [`Vec2::ZERO`] for `NONE` and masked values.
    pub fn unit_vector(self) -> Vec2 {
        match self {
            Self::LEFT => Vec2::new(1.0, 0.0),
            Self::RIGHT => Vec2::new(-1.0, 0.0),
            Self::TOP => Vec2::new(0.0, 1.0),
            Self::BOTTOM => Vec2::new(0.0, -1.0),
            _ => Vec2::ZERO,
        }
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        Direction(self.0 | rhs.0)
    }
}

impl BitOrAssign for Direction {
    fn bitor_assign(&mut self, rhs: Direction) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Direction {
    type Output = Direction;

    fn bitand(self, rhs: Direction) -> Direction {
        Direction(self.0 & rhs.0)
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Direction({self})")
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("none");
        }
        let mut first = true;
        for direction in self.iter() {
            if !first {
                f.write_str("|")?;
            }
            first = false;
            let name = match direction {
                Self::TOP => "top",
                Self::LEFT => "left",
                Self::BOTTOM => "bottom",
                _ => "right",
            };
            f.write_str(name)?;
        }
        Ok(())
    }
}

/// Lazy iterator over the cardinal directions of a mask.
#[derive(Debug, Clone)]
pub struct Directions {
    mask: Direction,
    index: usize,
}

impl Iterator for Directions {
    type Item = Direction;

    fn next(&mut self) -> Option<Direction> {
        while self.index < Direction::CARDINALS.len() {
            let candidate = Direction::CARDINALS[self.index];
            self.index += 1;
            if self.mask.contains(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Horizontal (left/right) or vertical (top/bottom) pairing of directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Both directions on this axis.
    pub fn directions(self) -> Direction {
        match self {
            Axis::Horizontal => Direction::HORIZONTAL,
            Axis::Vertical => Direction::VERTICAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_and_single() {
        assert!(!Direction::NONE.is_masked());
        assert!(!Direction::LEFT.is_masked());
        assert!(Direction::HORIZONTAL.is_masked());
        assert!(Direction::ALL.is_masked());
        assert!(Direction::TOP.is_single());
        assert!(!Direction::NONE.is_single());
        assert!(!Direction::VERTICAL.is_single());
    }

    #[test]
    fn test_iteration_order_is_canonical() {
        let all: Vec<_> = Direction::ALL.iter().collect();
        assert_eq!(
            all,
            vec![Direction::TOP, Direction::LEFT, Direction::BOTTOM, Direction::RIGHT]
        );

        let mask = Direction::RIGHT | Direction::TOP;
        let values: Vec<_> = mask.iter().collect();
        assert_eq!(values, vec![Direction::TOP, Direction::RIGHT]);

        // Restartable
        let again: Vec<_> = mask.iter().collect();
        assert_eq!(values, again);

        assert_eq!(Direction::NONE.iter().count(), 0);
    }

    #[test]
    fn test_for_each_unmasked_value() {
        let mut seen = Direction::NONE;
        let mut count = 0;
        Direction::VERTICAL.for_each_unmasked_value(|d| {
            assert!(d.is_single());
            seen |= d;
            count += 1;
        });
        assert_eq!(seen, Direction::VERTICAL);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::LEFT.opposite().unwrap(), Direction::RIGHT);
        assert_eq!(Direction::RIGHT.opposite().unwrap(), Direction::LEFT);
        assert_eq!(Direction::TOP.opposite().unwrap(), Direction::BOTTOM);
        assert_eq!(Direction::BOTTOM.opposite().unwrap(), Direction::TOP);

        assert!(matches!(
            Direction::NONE.opposite(),
            Err(DrawerError::InvalidDirection(Direction::NONE))
        ));
        assert!(matches!(
            Direction::HORIZONTAL.opposite(),
            Err(DrawerError::InvalidDirection(_))
        ));
    }

    #[test]
    fn test_axis_and_unit_vector() {
        assert_eq!(Direction::LEFT.axis().unwrap(), Axis::Horizontal);
        assert_eq!(Direction::BOTTOM.axis().unwrap(), Axis::Vertical);
        assert!(Direction::ALL.axis().is_err());

        assert_eq!(Direction::LEFT.unit_vector(), Vec2::new(1.0, 0.0));
        assert_eq!(Direction::RIGHT.unit_vector(), Vec2::new(-1.0, 0.0));
        assert_eq!(Direction::TOP.unit_vector(), Vec2::new(0.0, 1.0));
        assert_eq!(Direction::BOTTOM.unit_vector(), Vec2::new(0.0, -1.0));
        assert_eq!(Direction::HORIZONTAL.unit_vector(), Vec2::ZERO);
    }

    #[test]
    fn test_from_bits_and_display() {
        assert_eq!(Direction::from_bits(0b1010), Some(Direction::HORIZONTAL));
        assert_eq!(Direction::from_bits(0b1_0000), None);
        assert_eq!(Direction::HORIZONTAL.to_string(), "left|right");
        assert_eq!(Direction::NONE.to_string(), "none");
    }
}
