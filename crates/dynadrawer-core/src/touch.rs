//! Controls that pane drags must pass through untouched.

use std::collections::HashSet;

/// Type identity of the element a touch began on.
///
/// `lineage` lists the element's own type first, followed by the types it
/// descends from, as supplied by the host toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchTarget {
    lineage: Vec<String>,
}

impl TouchTarget {
    /// A target of the given concrete type.
    pub fn new(type_identifier: impl Into<String>) -> Self {
        Self {
            lineage: vec![type_identifier.into()],
        }
    }

    /// Add an ancestor type.
    pub fn descends_from(mut self, type_identifier: impl Into<String>) -> Self {
        self.lineage.push(type_identifier.into());
        self
    }

    /// The concrete type of the element.
    pub fn type_identifier(&self) -> &str {
        &self.lineage[0]
    }

    /// The concrete type followed by its ancestors.
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }
}

/// Registry of control types that swallow pane drags.
#[derive(Debug, Clone)]
pub struct TouchForwardingPolicy {
    forwarding: HashSet<String>,
}

/// Types registered by default.
pub const DEFAULT_FORWARDING_TYPES: [&str; 2] = ["slider", "switch"];

impl Default for TouchForwardingPolicy {
    fn default() -> Self {
        Self {
            forwarding: DEFAULT_FORWARDING_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TouchForwardingPolicy {
    /// Create a policy seeded with the default forwarding types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type through which drags are forwarded.
    pub fn register(&mut self, type_identifier: impl Into<String>) {
        self.forwarding.insert(type_identifier.into());
    }

    /// Whether a type identifier is registered.
    pub fn is_registered(&self, type_identifier: &str) -> bool {
        self.forwarding.contains(type_identifier)
    }

    /// Whether a drag beginning on `target` should be forwarded rather than
    /// moving the pane.
    pub fn should_forward(&self, target: &TouchTarget) -> bool {
        target.lineage().iter().any(|t| self.forwarding.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_forward_slider_and_switch() {
        let policy = TouchForwardingPolicy::new();
        assert!(policy.should_forward(&TouchTarget::new("slider")));
        assert!(policy.should_forward(&TouchTarget::new("switch")));
        assert!(!policy.should_forward(&TouchTarget::new("label")));
    }

    #[test]
    fn test_descendants_are_forwarded() {
        let policy = TouchForwardingPolicy::new();
        let volume = TouchTarget::new("volume_slider").descends_from("slider").descends_from("control");
        assert_eq!(volume.type_identifier(), "volume_slider");
        assert!(policy.should_forward(&volume));

        let button = TouchTarget::new("button").descends_from("control");
        assert!(!policy.should_forward(&button));
    }

    #[test]
    fn test_register() {
        let mut policy = TouchForwardingPolicy::new();
        let map = TouchTarget::new("map_view");
        assert!(!policy.should_forward(&map));

        policy.register("map_view");
        assert!(policy.is_registered("map_view"));
        assert!(policy.should_forward(&map));
    }
}
