//! Creating, linking and tearing down transform hierarchies
//!
//! The parent/child linkage lives in two components that mirror each
//! other: [`Parent`] on the child and an ordered [`Children`] list on the
//! parent. The functions here keep both sides consistent; if you edit the
//! links by hand you are responsible for that consistency and for calling
//! [`crate::invalidation::invalidate`] afterwards.
use hecs::{Entity, World};

use crate::{
    components::{Children, GlobalTransform, Info, LocalTransform, Parent},
    invalidation, world_transform, GantryError, GantryResult,
};

/// The entity's parent, if it has one.
pub fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<&Parent>(entity).map(|parent| parent.0).ok()
}

/// Snapshot of the entity's direct children, in attachment order.
///
/// Empty if the entity has no children or has been despawned.
pub fn children_of(world: &World, entity: Entity) -> Vec<Entity> {
    world
        .get::<&Children>(entity)
        .map(|children| children.0.clone())
        .unwrap_or_default()
}

/// Spawn a root entity carrying a name, the given local transform and a
/// fresh (fully dirty, version 1) world-space cache.
pub fn spawn(world: &mut World, name: impl Into<String>, local_transform: LocalTransform) -> Entity {
    world.spawn((
        Info { name: name.into() },
        local_transform,
        GlobalTransform::default(),
    ))
}

/// Spawn a new entity as the last child of `parent`.
///
/// The child's cache starts fully dirty, so no extra invalidation is
/// needed; its world-space state is computed on first read.
pub fn spawn_child(
    world: &mut World,
    parent: Entity,
    name: impl Into<String>,
    local_transform: LocalTransform,
) -> GantryResult<Entity> {
    if !world.contains(parent) {
        return Err(hecs::NoSuchEntity.into());
    }
    let child = spawn(world, name, local_transform);
    link_to_parent(world, child, parent)?;
    Ok(child)
}

/// Move `child` under `new_parent`, or detach it to the root if `None`.
///
/// The child keeps its local transform, so its world-space pose changes
/// with the new parent; use [`set_parent_in_place`] to keep the world pose
/// instead. The child and its whole subtree are invalidated, bumping their
/// versions. Fails with [`GantryError::WouldCycle`] if `new_parent` is the
/// child itself or one of its descendants.
pub fn set_parent(
    world: &mut World,
    child: Entity,
    new_parent: Option<Entity>,
) -> GantryResult<()> {
    if !world.contains(child) {
        return Err(hecs::NoSuchEntity.into());
    }
    if let Some(parent) = new_parent {
        if !world.contains(parent) {
            return Err(hecs::NoSuchEntity.into());
        }
        if parent == child || is_ancestor_of(world, child, parent) {
            log::warn!(
                "Refusing to parent {:?} under {:?}: it is its own descendant",
                child,
                parent
            );
            return Err(GantryError::WouldCycle);
        }
    }

    unlink_from_parent(world, child);
    if let Some(parent) = new_parent {
        link_to_parent(world, child, parent)?;
    }
    invalidation::invalidate(world, child);
    log::debug!("Parented {:?} under {:?}", child, new_parent);
    Ok(())
}

/// Like [`set_parent`], but compensates the child's local translation and
/// rotation so its world-space pose is unchanged by the move.
///
/// Scale is not compensated: the local scale is kept as-is, so the world
/// lossy scale may still change under a differently scaled parent.
pub fn set_parent_in_place(
    world: &mut World,
    child: Entity,
    new_parent: Option<Entity>,
) -> GantryResult<()> {
    let position = world_transform::position(world, child)?;
    let rotation = world_transform::rotation(world, child)?;
    set_parent(world, child, new_parent)?;
    world_transform::set_position(world, child, position)?;
    world_transform::set_rotation(world, child, rotation)?;
    Ok(())
}

/// Despawn the entity and every descendant, unlinking it from its parent's
/// child list first.
pub fn despawn_recursive(world: &mut World, entity: Entity) -> GantryResult<()> {
    if !world.contains(entity) {
        return Err(hecs::NoSuchEntity.into());
    }
    unlink_from_parent(world, entity);
    let despawned = despawn_subtree(world, entity);
    log::debug!("Despawned {:?} and {} descendants", entity, despawned - 1);
    Ok(())
}

/// Copy the world-space pose of `source` onto `target`.
///
/// This goes through the world-space properties rather than copying the
/// local fields raw: the target gets the source's world position and world
/// rotation re-expressed relative to its own parent, plus the source's
/// local scale, and its caches rebuild from there.
pub fn copy_transform(world: &mut World, source: Entity, target: Entity) -> GantryResult<()> {
    let position = world_transform::position(world, source)?;
    let rotation = world_transform::rotation(world, source)?;
    let scale = world.get::<&LocalTransform>(source)?.scale();
    world_transform::set_position(world, target, position)?;
    world_transform::set_rotation(world, target, rotation)?;
    world_transform::set_local_scale(world, target, scale)?;
    Ok(())
}

fn despawn_subtree(world: &mut World, entity: Entity) -> usize {
    let mut despawned = 0;
    for child in children_of(world, entity) {
        despawned += despawn_subtree(world, child);
    }
    if world.despawn(entity).is_ok() {
        despawned += 1;
    }
    despawned
}

fn is_ancestor_of(world: &World, ancestor: Entity, entity: Entity) -> bool {
    let mut current = parent_of(world, entity);
    while let Some(node) = current {
        if node == ancestor {
            return true;
        }
        current = parent_of(world, node);
    }
    false
}

fn unlink_from_parent(world: &mut World, child: Entity) {
    let old_parent = match world.get::<&Parent>(child) {
        Ok(parent) => parent.0,
        Err(_) => return,
    };
    if let Ok(mut children) = world.get::<&mut Children>(old_parent) {
        children.0.retain(|&entity| entity != child);
    }
    let _ = world.remove_one::<Parent>(child);
}

fn link_to_parent(world: &mut World, child: Entity, parent: Entity) -> GantryResult<()> {
    let appended = match world.get::<&mut Children>(parent) {
        Ok(mut children) => {
            children.0.push(child);
            true
        }
        Err(_) => false,
    };
    if !appended {
        world.insert_one(parent, Children(vec![child]))?;
    }
    world.insert_one(child, Parent(parent))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{DQuat, DVec3};

    #[test]
    fn spawn_child_links_both_directions() {
        let mut world = World::new();
        let parent = spawn(&mut world, "parent", LocalTransform::default());
        let child =
            spawn_child(&mut world, parent, "child", LocalTransform::default()).unwrap();

        assert_eq!(parent_of(&world, child), Some(parent));
        assert_eq!(children_of(&world, parent), vec![child]);
        assert_eq!(invalidation::version(&world, child).unwrap(), 1);
    }

    #[test]
    fn spawn_child_under_dead_parent_fails() {
        let mut world = World::new();
        let parent = spawn(&mut world, "parent", LocalTransform::default());
        world.despawn(parent).unwrap();
        assert!(matches!(
            spawn_child(&mut world, parent, "child", LocalTransform::default()),
            Err(GantryError::NoSuchEntity(_))
        ));
    }

    #[test]
    fn set_parent_moves_between_parents() {
        let mut world = World::new();
        let first = spawn(&mut world, "first", LocalTransform::default());
        let second = spawn(&mut world, "second", LocalTransform::default());
        let a = spawn_child(&mut world, first, "a", LocalTransform::default()).unwrap();
        let b = spawn_child(&mut world, first, "b", LocalTransform::default()).unwrap();

        set_parent(&mut world, a, Some(second)).unwrap();

        assert_eq!(children_of(&world, first), vec![b]);
        assert_eq!(children_of(&world, second), vec![a]);
        assert_eq!(parent_of(&world, a), Some(second));
    }

    #[test]
    fn set_parent_none_detaches() {
        let mut world = World::new();
        let parent = spawn(&mut world, "parent", LocalTransform::default());
        let child =
            spawn_child(&mut world, parent, "child", LocalTransform::default()).unwrap();

        set_parent(&mut world, child, None).unwrap();

        assert_eq!(parent_of(&world, child), None);
        assert!(children_of(&world, parent).is_empty());
    }

    #[test]
    fn reparenting_under_a_descendant_is_rejected() {
        let mut world = World::new();
        let root = spawn(&mut world, "root", LocalTransform::default());
        let child = spawn_child(&mut world, root, "child", LocalTransform::default()).unwrap();
        let grandchild =
            spawn_child(&mut world, child, "grandchild", LocalTransform::default()).unwrap();

        assert!(matches!(
            set_parent(&mut world, root, Some(grandchild)),
            Err(GantryError::WouldCycle)
        ));
        assert!(matches!(
            set_parent(&mut world, root, Some(root)),
            Err(GantryError::WouldCycle)
        ));
        // The failed move must leave the links untouched.
        assert_eq!(parent_of(&world, root), None);
        assert_eq!(children_of(&world, child), vec![grandchild]);
    }

    #[test]
    fn reparenting_bumps_versions_across_the_subtree() {
        let mut world = World::new();
        let first = spawn(&mut world, "first", LocalTransform::default());
        let second = spawn(&mut world, "second", LocalTransform::default());
        let child =
            spawn_child(&mut world, first, "child", LocalTransform::default()).unwrap();
        let grandchild =
            spawn_child(&mut world, child, "grandchild", LocalTransform::default()).unwrap();

        set_parent(&mut world, child, Some(second)).unwrap();

        assert_eq!(invalidation::version(&world, child).unwrap(), 2);
        assert_eq!(invalidation::version(&world, grandchild).unwrap(), 2);
        assert_eq!(invalidation::version(&world, first).unwrap(), 1);
    }

    #[test]
    fn set_parent_in_place_preserves_world_pose() {
        let mut world = World::new();
        let old_parent = spawn(
            &mut world,
            "old",
            LocalTransform::from_translation(DVec3::new(5., 0., 0.)),
        );
        let new_parent = spawn(
            &mut world,
            "new",
            LocalTransform::from_rotation_translation(
                DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2),
                DVec3::new(0., 3., 0.),
            ),
        );
        let child = spawn_child(
            &mut world,
            old_parent,
            "child",
            LocalTransform::from_translation(DVec3::new(1., 2., 3.)),
        )
        .unwrap();
        let position_before = world_transform::position(&world, child).unwrap();
        let rotation_before = world_transform::rotation(&world, child).unwrap();

        set_parent_in_place(&mut world, child, Some(new_parent)).unwrap();

        assert_eq!(parent_of(&world, child), Some(new_parent));
        assert_relative_eq!(
            world_transform::position(&world, child).unwrap(),
            position_before,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            world_transform::rotation(&world, child).unwrap(),
            rotation_before,
            epsilon = 1e-9
        );
    }

    #[test]
    fn despawn_recursive_removes_the_whole_subtree() {
        let mut world = World::new();
        let root = spawn(&mut world, "root", LocalTransform::default());
        let child = spawn_child(&mut world, root, "child", LocalTransform::default()).unwrap();
        let grandchild =
            spawn_child(&mut world, child, "grandchild", LocalTransform::default()).unwrap();
        let sibling =
            spawn_child(&mut world, root, "sibling", LocalTransform::default()).unwrap();

        despawn_recursive(&mut world, child).unwrap();

        assert!(!world.contains(child));
        assert!(!world.contains(grandchild));
        assert!(world.contains(sibling));
        assert_eq!(children_of(&world, root), vec![sibling]);
        assert!(matches!(
            despawn_recursive(&mut world, child),
            Err(GantryError::NoSuchEntity(_))
        ));
    }

    #[test]
    fn copy_transform_reexpresses_pose_under_the_targets_parent() {
        let mut world = World::new();
        let source_parent = spawn(
            &mut world,
            "source_parent",
            LocalTransform::from_translation(DVec3::new(10., 0., 0.)),
        );
        let source = spawn_child(
            &mut world,
            source_parent,
            "source",
            LocalTransform::new(
                DVec3::new(1., 0., 0.),
                DQuat::from_rotation_z(0.5),
                DVec3::new(2., 2., 2.),
            ),
        )
        .unwrap();
        let target_parent = spawn(
            &mut world,
            "target_parent",
            LocalTransform::from_translation(DVec3::new(0., -4., 0.)),
        );
        let target = spawn_child(
            &mut world,
            target_parent,
            "target",
            LocalTransform::default(),
        )
        .unwrap();

        copy_transform(&mut world, source, target).unwrap();

        assert_relative_eq!(
            world_transform::position(&world, target).unwrap(),
            world_transform::position(&world, source).unwrap(),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            world_transform::rotation(&world, target).unwrap(),
            world_transform::rotation(&world, source).unwrap(),
            epsilon = 1e-9
        );
        // Local scale is copied raw, not derived from world state.
        assert_eq!(
            world.get::<&LocalTransform>(target).unwrap().scale(),
            DVec3::new(2., 2., 2.)
        );
    }
}
