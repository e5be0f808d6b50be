//! Drawer registry: which drawer lives in which direction, and how it opens.

use uuid::Uuid;

use crate::config::{DEFAULT_REVEAL_WIDTH_HORIZONTAL, DEFAULT_REVEAL_WIDTH_VERTICAL};
use crate::direction::{Axis, Direction};
use crate::error::{DrawerError, DrawerResult};

/// Identity of a drawer's content.
pub type DrawerId = Uuid;

/// Per-direction drawer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerSlot {
    /// The drawer assigned to this direction, if any.
    pub drawer: Option<DrawerId>,
    /// Explicit reveal width. `None` falls back to the axis default.
    pub reveal_width: Option<f64>,
    /// Whether the user can drag the pane to reveal this drawer.
    pub drag_enabled: bool,
    /// Whether tapping the open pane closes it.
    pub tap_to_close_enabled: bool,
}

impl Default for DrawerSlot {
    fn default() -> Self {
        Self {
            drawer: None,
            reveal_width: None,
            drag_enabled: true,
            tap_to_close_enabled: true,
        }
    }
}

/// Maps directions to drawers and their per-direction settings.
///
/// At most two drawers are set at once, and a second drawer must be in the
/// opposite direction of the first.
#[derive(Debug, Clone)]
pub struct DrawerRegistry {
    slots: [DrawerSlot; 4],
    default_width_horizontal: f64,
    default_width_vertical: f64,
}

impl Default for DrawerRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_WIDTH_HORIZONTAL, DEFAULT_REVEAL_WIDTH_VERTICAL)
    }
}

fn slot_index(direction: Direction) -> DrawerResult<usize> {
    Direction::CARDINALS
        .iter()
        .position(|d| *d == direction)
        .ok_or(DrawerError::InvalidDirection(direction))
}

impl DrawerRegistry {
    /// Create an empty registry with the given default reveal widths.
    pub fn new(default_width_horizontal: f64, default_width_vertical: f64) -> Self {
        Self {
            slots: Default::default(),
            default_width_horizontal,
            default_width_vertical,
        }
    }

    /// Change the axis defaults used by directions without an explicit width.
    pub fn set_default_widths(&mut self, horizontal: f64, vertical: f64) {
        self.default_width_horizontal = horizontal;
        self.default_width_vertical = vertical;
    }

    fn slot(&self, direction: Direction) -> DrawerResult<&DrawerSlot> {
        Ok(&self.slots[slot_index(direction)?])
    }

    /// Get the settings for a single direction.
    pub fn slot_for(&self, direction: Direction) -> DrawerResult<&DrawerSlot> {
        self.slot(direction)
    }

    /// Assign (or clear, with `None`) the drawer for a single direction.
    pub fn assign(&mut self, drawer: Option<DrawerId>, direction: Direction) -> DrawerResult<()> {
        let index = slot_index(direction)?;

        if drawer.is_some() {
            let existing = self.possible_directions();
            let after = existing | direction;
            let allowed = after.is_single() || after == Direction::HORIZONTAL || after == Direction::VERTICAL;
            if !allowed {
                log::warn!("Rejected drawer in {direction}: drawers already set in {existing}");
                return Err(DrawerError::TooManyDrawers {
                    requested: direction,
                    existing,
                });
            }
        }

        log::debug!("Drawer for {direction} set to {drawer:?}");
        self.slots[index].drawer = drawer;
        Ok(())
    }

    /// The drawer set for a single direction.
    pub fn drawer(&self, direction: Direction) -> DrawerResult<Option<DrawerId>> {
        Ok(self.slot(direction)?.drawer)
    }

    /// Bitmask of every direction that has a drawer.
    pub fn possible_directions(&self) -> Direction {
        Direction::CARDINALS
            .iter()
            .zip(&self.slots)
            .filter(|(_, slot)| slot.drawer.is_some())
            .fold(Direction::NONE, |mask, (direction, _)| mask | *direction)
    }

    /// Reveal width for a single direction.
    pub fn reveal_width(&self, direction: Direction) -> DrawerResult<f64> {
        let slot = self.slot(direction)?;
        Ok(match slot.reveal_width {
            Some(width) => width,
            None => match direction.axis()? {
                Axis::Horizontal => self.default_width_horizontal,
                Axis::Vertical => self.default_width_vertical,
            },
        })
    }

    /// Set the reveal width for every direction in `mask`.
    pub fn set_reveal_width(&mut self, width: f64, mask: Direction) -> DrawerResult<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(DrawerError::InvalidRevealWidth(width));
        }
        self.update_each(mask, |slot| slot.reveal_width = Some(width))
    }

    /// Whether dragging can reveal the drawer in a single direction.
    pub fn drag_enabled(&self, direction: Direction) -> DrawerResult<bool> {
        Ok(self.slot(direction)?.drag_enabled)
    }

    /// Enable or disable drag-reveal for every direction in `mask`.
    pub fn set_drag_enabled(&mut self, enabled: bool, mask: Direction) -> DrawerResult<()> {
        self.update_each(mask, |slot| slot.drag_enabled = enabled)
    }

    /// Whether tapping the open pane closes it, for a single direction.
    pub fn tap_to_close_enabled(&self, direction: Direction) -> DrawerResult<bool> {
        Ok(self.slot(direction)?.tap_to_close_enabled)
    }

    /// Enable or disable tap-to-close for every direction in `mask`.
    pub fn set_tap_to_close_enabled(&mut self, enabled: bool, mask: Direction) -> DrawerResult<()> {
        self.update_each(mask, |slot| slot.tap_to_close_enabled = enabled)
    }

    /// Directions in `mask` that have a drawer and allow drag-reveal.
    pub fn draggable_directions(&self, mask: Direction) -> Direction {
        (mask & self.possible_directions())
            .iter()
            .filter(|d| self.drag_enabled(*d).unwrap_or(false))
            .fold(Direction::NONE, |acc, d| acc | d)
    }

    fn update_each(&mut self, mask: Direction, mut update: impl FnMut(&mut DrawerSlot)) -> DrawerResult<()> {
        if mask.is_none() {
            return Err(DrawerError::InvalidDirection(mask));
        }
        for direction in mask.iter() {
            let index = slot_index(direction)?;
            update(&mut self.slots[index]);
        }
        Ok(())
    }
}
