//! Move generator (spec.md §4.4–4.5, C5) — the central algorithm.
//!
//! Grounded on the teacher's `world_state.rs::is_walkable_with_goal`, which
//! carves out an exemption for one destination tile on top of a base
//! passability check; the ground-height resolver below generalizes that
//! same "base rule, then a handful of exemptions" shape to jumps, drops,
//! ladders and swimming. The six-directional walk with incoming-delta
//! pruning has no direct analogue in the teacher (its world is 2D), so it
//! is newly written in the teacher's idiom, reusing `tracing::trace!` at
//! the same density `infra/cbs.rs` uses for per-candidate logging.

use tracing::trace;

use crate::block::{Entity, SurfaceType};
use crate::collision::{can_fit, probe_step_down, probe_step_up};
use crate::cost::is_stairs;
use crate::node::VisitedMap;
use crate::options::PathingOptions;
use crate::registries::Classifiers;
use crate::snapshot::WorldSnapshot;
use crate::types::BlockPos;

/// Blocks an agent may drop through in one move (spec.md §4.5).
const MAX_DROP: i32 = 4;
/// The deepest a drop probe searches before giving up (spec.md §4.5: "walk
/// downward 1..10 blocks").
const MAX_DROP_PROBE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 6] =
        [Direction::Up, Direction::Down, Direction::North, Direction::East, Direction::South, Direction::West];

    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Direction::Up => (0, 1, 0),
            Direction::Down => (0, -1, 0),
            Direction::North => (0, 0, -1),
            Direction::East => (1, 0, 0),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
        }
    }
}

/// Everything about the node being expanded that the move generator needs,
/// decoupled from [`crate::node::PathNode`]/[`crate::node::NodeArena`] so
/// this module doesn't need to know how the driver stores nodes.
#[derive(Debug, Clone, Copy)]
pub struct ParentInfo {
    pub pos: BlockPos,
    pub grandparent: Option<BlockPos>,
    pub corner: bool,
    pub on_ladder: bool,
    pub swimming: bool,
    pub on_rails: bool,
}

impl ParentInfo {
    fn incoming_delta(&self) -> (i32, i32, i32) {
        match self.grandparent {
            Some(gp) => self.pos.sub(gp),
            None => (0, 0, 0),
        }
    }
}

/// A proposed successor, fully classified and ready for [`crate::cost::step_cost`].
#[derive(Debug, Clone, Copy)]
pub struct Successor {
    pub pos: BlockPos,
    pub corner: bool,
    pub swimming: bool,
    pub swim_entering: bool,
    pub on_ladder: bool,
    pub on_road: bool,
    pub on_rails: bool,
    pub rails_exit: bool,
    pub delta: (i32, i32, i32),
    pub parent_is_stairs: bool,
    pub target_openable: bool,
}

/// Which of the six directions are worth attempting from this node
/// (spec.md §4.4's directional-pruning paragraph). DOWN is only offered
/// when the block below the node is a ladder, the cell below is passable,
/// or the node is a forced corner drop (spec.md §4.4: "DOWN is attempted
/// when the block below the node is a ladder, OR when the cell below is
/// passable, OR when the node is a 'corner' node whose parent is not
/// directly below"); offering it unconditionally let `ground_height`'s
/// "jump back onto my own cell" fallback misfire into a bogus corner
/// successor directly above every node standing on ordinary ground.
pub fn eligible_directions(world: &WorldSnapshot, classifiers: &Classifiers, parent: &ParentInfo) -> Vec<Direction> {
    let (dx, _dy, dz) = parent.incoming_delta();
    let mut dirs = Vec::with_capacity(6);
    if parent.on_ladder {
        dirs.push(Direction::Up);
    }

    let below = parent.pos.down();
    let forced_corner_drop = parent.corner && parent.grandparent != Some(below);
    if classifiers.is_ladder(world, below) || classifiers.is_passable(world, below) || forced_corner_drop {
        dirs.push(Direction::Down);
    }

    if dz <= 0 {
        dirs.push(Direction::North);
    }
    if dx >= 0 {
        dirs.push(Direction::East);
    }
    if dz >= 0 {
        dirs.push(Direction::South);
    }
    if dx <= 0 {
        dirs.push(Direction::West);
    }
    dirs
}

/// Ground-height resolver (spec.md §4.5): the Y at which `entity` can stand
/// at `(target.x, ?, target.z)` given it is currently at `parent.pos`, or
/// `None` to reject the move entirely.
pub fn ground_height(
    world: &WorldSnapshot,
    classifiers: &Classifiers,
    entity: Entity,
    options: &PathingOptions,
    parent: &ParentInfo,
    target: BlockPos,
) -> Option<i32> {
    let facing = target.sub(parent.pos);
    if !can_fit(world, classifiers, target, facing, entity) {
        return handle_target_not_passable(world, classifiers, entity, parent, target, facing);
    }

    let below = target.down();
    match classifiers.walkable_surface(world, below) {
        SurfaceType::Walkable => Some(target.y),
        SurfaceType::NotPassable => None,
        SurfaceType::Dropable => resolve_dropable(world, classifiers, options, entity, parent, target),
    }
}

fn handle_target_not_passable(
    world: &WorldSnapshot,
    classifiers: &Classifiers,
    entity: Entity,
    parent: &ParentInfo,
    target: BlockPos,
    facing: (i32, i32, i32),
) -> Option<i32> {
    if parent.on_ladder || parent.swimming {
        return None;
    }
    // A single-block jump (spec.md §4.5 step 1): both the cell the entity
    // would need headroom in above its own feet, and the landing cell
    // above the target, must accommodate a one-block rise.
    let clears_head = probe_step_up(world, classifiers, parent.pos, facing, entity, 1).is_some();
    let clears_landing = probe_step_up(world, classifiers, target, facing, entity, 1).is_some();
    if clears_head && clears_landing {
        Some(target.y + 1)
    } else {
        None
    }
}

fn resolve_dropable(
    world: &WorldSnapshot,
    classifiers: &Classifiers,
    options: &PathingOptions,
    entity: Entity,
    parent: &ParentInfo,
    target: BlockPos,
) -> Option<i32> {
    let below = target.down();
    let below_fluid = world.fluid_at(below);
    if below_fluid.is_liquid() {
        return if parent.swimming || (options.can_swim && below_fluid.is_water()) {
            Some(target.y)
        } else {
            None
        };
    }
    if classifiers.is_ladder(world, below) {
        return Some(target.y);
    }

    let horizontal = target.x != parent.pos.x || target.z != parent.pos.z;
    if horizontal && classifiers.walkable_surface(world, parent.pos.down()) != SurfaceType::Dropable {
        return None;
    }

    // Walk the fall via the collision oracle's own step-down probe (spec.md
    // §4.5's "walk downward 1..10 blocks"; §4.3's step-down probing): any
    // intermediate cell the entity cannot fit through aborts the drop.
    let facing = target.sub(parent.pos);
    let dy = probe_step_down(world, classifiers, target, facing, entity, MAX_DROP_PROBE, true)?;
    let candidate = target.offset(0, -dy, 0);
    let candidate_below = candidate.down();
    if world.fluid_at(candidate_below).is_liquid() {
        return Some(candidate.y);
    }
    if dy <= MAX_DROP && classifiers.walkable_surface(world, candidate_below) == SurfaceType::Walkable {
        Some(candidate.y)
    } else {
        None
    }
}

/// Attempts a single directional move from `parent` (spec.md §4.4 steps 1-6).
/// Returns `None` if the move is rejected outright, or if the successor's
/// packed key is already closed. Cost assembly and node bookkeeping happen
/// in the caller, per the C5 → C6 → C4 pipeline (spec.md §2).
pub fn walk(
    world: &WorldSnapshot,
    classifiers: &Classifiers,
    entity: Entity,
    options: &PathingOptions,
    parent: &ParentInfo,
    visited: &VisitedMap,
    direction: Direction,
) -> Option<Successor> {
    let (dx, dy, dz) = direction.delta();
    let raw = parent.pos.offset(dx, dy, dz);

    let new_y = ground_height(world, classifiers, entity, options, parent, raw)?;

    let mut target = raw;
    let mut corner = false;
    let mut effective_delta = (dx, dy, dz);

    if new_y != raw.y {
        let directly_above_parent = parent.pos.up();
        let down_neighbor_is_grandparent = parent.grandparent == Some(parent.pos.down());
        if new_y > raw.y && !parent.corner && parent.grandparent != Some(directly_above_parent) {
            target = parent.pos.offset(0, new_y - raw.y, 0);
            effective_delta = (0, new_y - raw.y, 0);
            corner = true;
        } else if new_y < raw.y && (dx != 0 || dz != 0) && !down_neighbor_is_grandparent {
            target = BlockPos::new(raw.x, parent.pos.y, raw.z);
            effective_delta = (dx, 0, dz);
            corner = true;
        } else {
            target = BlockPos::new(raw.x, new_y, raw.z);
        }
    }

    if visited.is_closed(target) {
        trace!(?target, "walk: target already closed, skipping");
        return None;
    }

    // Whether an existing node at this key was already swimming is a matter
    // for the driver (it holds the arena); here we classify purely from the
    // world, which is what a first visit would do anyway.
    let swimming = world.fluid_at(target.down()).is_water();
    if swimming && !options.can_swim {
        trace!(?target, "walk: rejecting swim node, canSwim disabled");
        return None;
    }
    let swim_entering = swimming && !parent.swimming;

    let on_ladder = options.can_use_ladders && classifiers.is_ladder(world, target);
    let on_road = classifiers.is_road(world, target.down());
    let on_rails_cell = if corner { target.down() } else { target };
    let on_rails = options.can_use_rails && world.block_at(on_rails_cell).is_rail();
    let rails_exit = parent.on_rails && !on_rails;

    let parent_block_pos = parent.pos.down();
    let successor = Successor {
        pos: target,
        corner,
        swimming,
        swim_entering,
        on_ladder,
        on_road,
        on_rails,
        rails_exit,
        delta: effective_delta,
        parent_is_stairs: is_stairs(world, parent_block_pos),
        target_openable: world.block_at(target).has_open_property,
    };
    trace!(?successor.pos, ?successor.delta, successor.corner, successor.swimming, "walk: candidate accepted");
    Some(successor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::FluidState;
    use crate::fixtures::{FlatWorld, SharedFlatWorld};

    fn parent_at(pos: BlockPos) -> ParentInfo {
        ParentInfo { pos, grandparent: None, corner: false, on_ladder: false, swimming: false, on_rails: false }
    }

    #[test]
    fn eligible_directions_prunes_180_reversal() {
        let mut flat = FlatWorld::new();
        flat.fill_floor(63, -2..=2, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(1, 64, 0)], 4);
        let classifiers = Classifiers::new();

        let mut parent = parent_at(BlockPos::new(1, 64, 0));
        parent.grandparent = Some(BlockPos::new(0, 64, 0)); // arrived moving +X (east)
        let dirs = eligible_directions(&snapshot, &classifiers, &parent);
        assert!(dirs.contains(&Direction::East));
        assert!(!dirs.contains(&Direction::West));
        assert!(dirs.contains(&Direction::North));
        assert!(dirs.contains(&Direction::South));
    }

    #[test]
    fn down_is_not_offered_on_ordinary_solid_ground() {
        let mut flat = FlatWorld::new();
        flat.fill_floor(63, -2..=2, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 4);
        let classifiers = Classifiers::new();

        let parent = parent_at(BlockPos::new(0, 64, 0));
        let dirs = eligible_directions(&snapshot, &classifiers, &parent);
        assert!(!dirs.contains(&Direction::Down));
    }

    #[test]
    fn down_is_offered_over_a_ledge() {
        let mut flat = FlatWorld::new();
        flat.fill_floor(63, -2..=2, 0); // standing cell has no floor beneath -- it's a ledge
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(3, 64, 0)], 4);
        let classifiers = Classifiers::new();

        let parent = parent_at(BlockPos::new(3, 64, 0));
        let dirs = eligible_directions(&snapshot, &classifiers, &parent);
        assert!(dirs.contains(&Direction::Down));
    }

    #[test]
    fn flat_corridor_step_is_accepted_without_vertical_adjustment() {
        let mut flat = FlatWorld::new();
        flat.fill_floor(0, 0..=10, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 1, 0)], 4);
        let classifiers = Classifiers::new();
        let options = PathingOptions::default();
        let visited = VisitedMap::new();
        let parent = parent_at(BlockPos::new(0, 1, 0));

        let successor =
            walk(&snapshot, &classifiers, Entity::humanoid(), &options, &parent, &visited, Direction::East).unwrap();
        assert_eq!(successor.pos, BlockPos::new(1, 1, 0));
        assert!(!successor.corner);
    }

    #[test]
    fn single_block_jump_produces_corner_then_horizontal() {
        let mut flat = FlatWorld::new();
        flat.fill_floor(0, 0..=4, 0);
        flat.fill_floor(1, 5..=9, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 1, 0)], 4);
        let classifiers = Classifiers::new();
        let options = PathingOptions::default();
        let visited = VisitedMap::new();
        let parent = parent_at(BlockPos::new(4, 1, 0));

        let successor =
            walk(&snapshot, &classifiers, Entity::humanoid(), &options, &parent, &visited, Direction::East).unwrap();
        assert!(successor.corner);
        assert_eq!(successor.pos, BlockPos::new(4, 2, 0));
    }

    #[test]
    fn swim_rejected_when_cannot_swim() {
        let mut flat = FlatWorld::new();
        flat.fill_floor(0, 0..=4, 0);
        flat.fill_floor(0, 6..=10, 0);
        flat.set_fluid(BlockPos::new(5, 0, 0), FluidState::Water);
        flat.mark_loaded(0, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(4, 1, 0)], 4);
        let classifiers = Classifiers::new();
        let mut options = PathingOptions::default();
        options.can_swim = false;
        let visited = VisitedMap::new();
        let parent = parent_at(BlockPos::new(4, 1, 0));

        let result = walk(&snapshot, &classifiers, Entity::humanoid(), &options, &parent, &visited, Direction::East);
        assert!(result.is_none());
    }
}
