//! An ordered list of child entities
use hecs::Entity;

/// Ordered list of an entity's direct children
/// Kept in sync with each child's [`Parent`](super::Parent) component by
/// the functions in `crate::hierarchy`. The order is the order children
/// were attached in, and it determines traversal order for path lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Children(pub Vec<Entity>);

impl Children {
    /// Iterate over the children in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.0.iter().copied()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the entity has no children.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
