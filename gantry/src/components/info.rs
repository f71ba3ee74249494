//! Human readable entity metadata
/// Component that adds some information about the entity
/// Useful for debugging, and consulted by `crate::locate` when resolving
/// name paths
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Info {
    /// A helpful name
    pub name: String,
}
