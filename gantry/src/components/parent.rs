//! A link from a child entity to its parent
use hecs::Entity;

/// Component added to indicate that an entity has a parent
/// Kept in sync with the parent's [`Children`](super::Children) list by the
/// functions in `crate::hierarchy`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parent(pub Entity);
