#![deny(missing_docs)]

//! Welcome to Gantry!
//!
//! Gantry is a hierarchical spatial transform system for games and other
//! simulations: entities carry a parent-relative position, rotation and
//! scale, and their world-space state is derived on demand by composing
//! the ancestor chain. Derived values are cached per entity behind dirty
//! flags, so reads are cheap until something above them moves, and every
//! mutation bumps a version counter on the whole affected subtree for
//! easy change detection.
//!
//! Entities live in a [`hecs`] [`World`](hecs::World); Gantry's functions
//! take the world plus an [`Entity`](hecs::Entity) rather than wrapping
//! either, so the hierarchy composes with whatever else your entities
//! carry.
//!
//! # Getting started
//!
//! ```
//! use gantry::components::LocalTransform;
//! use gantry::glam::DVec3;
//! use gantry::hecs::World;
//! use gantry::{hierarchy, world_transform};
//!
//! let mut world = World::new();
//! let ship = hierarchy::spawn(
//!     &mut world,
//!     "ship",
//!     LocalTransform::from_translation(DVec3::new(10., 0., 0.)),
//! );
//! let turret = hierarchy::spawn_child(
//!     &mut world,
//!     ship,
//!     "turret",
//!     LocalTransform::from_translation(DVec3::new(1., 0., 0.)),
//! )?;
//!
//! assert_eq!(
//!     world_transform::position(&world, turret)?,
//!     DVec3::new(11., 0., 0.),
//! );
//! # Ok::<(), gantry::GantryError>(())
//! ```
//!
//! # A note on threads
//!
//! All operations are synchronous and complete in one call; reads borrow
//! cache cells mutably under the hood. Keep all access to any one
//! hierarchy on a single thread, and serialize externally if you cannot.

pub use gantry_error::GantryError;
pub use glam;
pub use hecs;
pub use motion::Space;

/// Components are the data a transform hierarchy is made of
pub mod components;
/// Convert points, vectors, directions and rotations between spaces
pub mod convert;
mod gantry_error;
/// Create, link and tear down transform hierarchies
pub mod hierarchy;
/// Cache invalidation and version counting
pub mod invalidation;
/// Find entities by name and build name paths
pub mod locate;
/// Move, rotate, orbit and aim entities
pub mod motion;
/// Kitchen sink utility functions
pub mod util;
/// Read and write world-space transforms
pub mod world_transform;

/// Gantry result type
pub type GantryResult<T> = std::result::Result<T, GantryError>;
