//! Finding entities by name and building name paths
use hecs::{Entity, World};

use crate::{components::Info, hierarchy, GantryError, GantryResult};

/// Resolve a `/`-separated path of child names, starting from `from`.
///
/// Each segment is matched against the names of the current entity's
/// *immediate* children, in attachment order. The first segment without a
/// match resolves the whole lookup to `None`. An empty path is an error;
/// an unmatched one is not.
pub fn find(world: &World, from: Entity, path: &str) -> GantryResult<Option<Entity>> {
    if path.is_empty() {
        return Err(GantryError::EmptyPath);
    }
    let mut current = from;
    for segment in path.split('/') {
        let next = hierarchy::children_of(world, current).into_iter().find(|&child| {
            world
                .get::<&Info>(child)
                .map_or(false, |info| info.name == segment)
        });
        match next {
            Some(child) => current = child,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Pre-order depth-first search for the first entity named `name`.
///
/// The starting entity itself is checked before its children, and each
/// child subtree is exhausted in attachment order before the next one is
/// tried. With duplicate names the winner is whichever the traversal
/// reaches first, nothing smarter.
pub fn deep_find(world: &World, from: Entity, name: &str) -> Option<Entity> {
    let found = world
        .get::<&Info>(from)
        .map_or(false, |info| info.name == name);
    if found {
        return Some(from);
    }
    hierarchy::children_of(world, from)
        .into_iter()
        .find_map(|child| deep_find(world, child, name))
}

/// Build the `/`-joined name path of `target`, walking up towards `root`.
///
/// Each step prepends the parent's name and only then compares against
/// `root`, so the root's own name heads the returned path. If `root` is
/// never encountered the walk continues to the hierarchy's real root.
pub fn path_of(world: &World, target: Entity, root: Entity) -> GantryResult<String> {
    let mut path = world.get::<&Info>(target)?.name.clone();
    let mut current = target;
    while let Some(parent) = hierarchy::parent_of(world, current) {
        path = format!("{}/{}", world.get::<&Info>(parent)?.name, path);
        current = parent;
        if current == root {
            break;
        }
    }
    Ok(path)
}
