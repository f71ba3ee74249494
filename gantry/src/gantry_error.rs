use thiserror::Error;

/// Any error that can surface from a transform operation.
#[derive(Error, Debug)]
pub enum GantryError {
    /// A path lookup was attempted with an empty path string.
    #[error("The path was empty")]
    EmptyPath,
    /// A reparent was rejected because it would have made a node an
    /// ancestor of itself.
    #[error("Reparenting would create a cycle in the hierarchy")]
    WouldCycle,
    /// The entity has been despawned or never existed.
    #[error(transparent)]
    NoSuchEntity(#[from] hecs::NoSuchEntity),
    /// The entity is alive but is missing a required component.
    #[error(transparent)]
    Component(#[from] hecs::ComponentError),
    /// Something else went wrong.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
