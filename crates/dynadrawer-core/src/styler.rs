//! Stylers: observers that style the drawer as the pane moves.

use std::rc::Rc;

use crate::direction::Direction;

/// Receives continuous pane position updates for visual side effects.
///
/// Methods take `&self`; implementations that keep state use interior
/// mutability.
pub trait Styler {
    /// Called when the styler is added for `direction`.
    fn styler_was_added(&self, _direction: Direction) {}

    /// Called when the styler is removed for `direction`.
    fn styler_was_removed(&self, _direction: Direction) {}

    /// The pane moved. `fraction` is `0.0` when closed and `1.0` at the
    /// reveal width.
    fn did_update_open_fraction(&self, fraction: f64, direction: Direction);
}

/// Stylers registered per direction.
#[derive(Default)]
pub struct StylerRegistry {
    stylers: [Vec<Rc<dyn Styler>>; 4],
}

fn index(direction: Direction) -> Option<usize> {
    Direction::CARDINALS.iter().position(|d| *d == direction)
}

impl StylerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a styler for every direction in `mask`. Adding the same styler
    /// twice for a direction has no effect.
    pub fn add(&mut self, styler: Rc<dyn Styler>, mask: Direction) {
        for direction in mask.iter() {
            let Some(i) = index(direction) else { continue };
            if self.stylers[i].iter().any(|s| Rc::ptr_eq(s, &styler)) {
                continue;
            }
            self.stylers[i].push(Rc::clone(&styler));
            styler.styler_was_added(direction);
        }
    }

    /// Add several stylers for every direction in `mask`.
    pub fn add_all(&mut self, stylers: impl IntoIterator<Item = Rc<dyn Styler>>, mask: Direction) {
        for styler in stylers {
            self.add(styler, mask);
        }
    }

    /// Remove a styler from every direction in `mask`.
    pub fn remove(&mut self, styler: &Rc<dyn Styler>, mask: Direction) {
        for direction in mask.iter() {
            let Some(i) = index(direction) else { continue };
            let before = self.stylers[i].len();
            self.stylers[i].retain(|s| !Rc::ptr_eq(s, styler));
            if self.stylers[i].len() != before {
                styler.styler_was_removed(direction);
            }
        }
    }

    /// Stylers set for any direction in `mask`, without duplicates.
    pub fn stylers_for(&self, mask: Direction) -> Vec<Rc<dyn Styler>> {
        let mut result: Vec<Rc<dyn Styler>> = Vec::new();
        for direction in mask.iter() {
            let Some(i) = index(direction) else { continue };
            for styler in &self.stylers[i] {
                if !result.iter().any(|s| Rc::ptr_eq(s, styler)) {
                    result.push(Rc::clone(styler));
                }
            }
        }
        result
    }

    /// Notify the stylers of a single direction.
    pub fn notify(&self, fraction: f64, direction: Direction) {
        let Some(i) = index(direction) else { return };
        for styler in &self.stylers[i] {
            styler.did_update_open_fraction(fraction, direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        added: RefCell<Vec<Direction>>,
        removed: RefCell<Vec<Direction>>,
        fractions: RefCell<Vec<(f64, Direction)>>,
    }

    impl Styler for Recorder {
        fn styler_was_added(&self, direction: Direction) {
            self.added.borrow_mut().push(direction);
        }

        fn styler_was_removed(&self, direction: Direction) {
            self.removed.borrow_mut().push(direction);
        }

        fn did_update_open_fraction(&self, fraction: f64, direction: Direction) {
            self.fractions.borrow_mut().push((fraction, direction));
        }
    }

    #[test]
    fn test_add_for_mask() {
        let mut registry = StylerRegistry::new();
        let recorder = Rc::new(Recorder::default());
        let styler: Rc<dyn Styler> = recorder.clone();

        registry.add(styler.clone(), Direction::HORIZONTAL);
        registry.add(styler.clone(), Direction::LEFT);

        assert_eq!(*recorder.added.borrow(), vec![Direction::LEFT, Direction::RIGHT]);
        assert_eq!(registry.stylers_for(Direction::LEFT).len(), 1);
        assert_eq!(registry.stylers_for(Direction::ALL).len(), 1);
        assert!(registry.stylers_for(Direction::TOP).is_empty());
    }

    #[test]
    fn test_remove() {
        let mut registry = StylerRegistry::new();
        let recorder = Rc::new(Recorder::default());
        let styler: Rc<dyn Styler> = recorder.clone();

        registry.add(styler.clone(), Direction::HORIZONTAL);
        registry.remove(&styler, Direction::RIGHT);

        assert_eq!(*recorder.removed.borrow(), vec![Direction::RIGHT]);
        assert_eq!(registry.stylers_for(Direction::LEFT).len(), 1);
        assert!(registry.stylers_for(Direction::RIGHT).is_empty());

        // Removing again is silent.
        registry.remove(&styler, Direction::RIGHT);
        assert_eq!(recorder.removed.borrow().len(), 1);
    }

    #[test]
    fn test_notify_only_matching_direction() {
        let mut registry = StylerRegistry::new();
        let left = Rc::new(Recorder::default());
        let top = Rc::new(Recorder::default());
        registry.add_all([left.clone() as Rc<dyn Styler>], Direction::LEFT);
        registry.add(top.clone(), Direction::TOP);

        registry.notify(0.5, Direction::LEFT);

        assert_eq!(*left.fractions.borrow(), vec![(0.5, Direction::LEFT)]);
        assert!(top.fractions.borrow().is_empty());
    }
}
