//! Collision oracle (spec.md §4.3, C3).
//!
//! The host's full AABB-vs-voxel-shape intersection is simplified here to
//! the entity's footprint against each block's `collision_height` (see
//! `block.rs`'s doc comment on that field). `can_fit` first consults the
//! bounding-box-producer registry (spec.md §4.3 step 1) for a possibly
//! host-adjusted box before testing it, matching the teacher's
//! `world_state.rs::is_walkable_with_goal` pattern of carving out an
//! exemption on top of a base check. `probe_step_up`/`probe_step_down` are
//! the step-up/step-down probes spec.md §4.3 steps 3-5 describe, and are the
//! functions `moves::ground_height` calls to resolve a drop or a step rather
//! than reimplementing the probing itself.

use crate::block::Entity;
use crate::registries::Classifiers;
use crate::snapshot::WorldSnapshot;
use crate::types::BlockPos;

/// Whether `entity`, standing with its feet at `pos` and facing `facing`,
/// fits without intersecting solid geometry: headroom for its full height,
/// and the ground not protruding higher than `collision_height` allows.
/// `classifiers.bounding_box_for` gets first say on the box used (spec.md
/// §4.3 step 1); if nothing answers, `entity`'s own box is used as-is.
pub fn can_fit(world: &WorldSnapshot, classifiers: &Classifiers, pos: BlockPos, facing: (i32, i32, i32), entity: Entity) -> bool {
    let entity = classifiers.bounding_box_for(entity, pos, facing);
    let vertical_blocks = entity.height.ceil() as i32;
    for dy in 0..vertical_blocks.max(1) {
        let cell = pos.offset(0, dy, 0);
        let block = world.block_at(cell);
        if block.is_solid() {
            return false;
        }
    }
    true
}

/// Step-up probe: does the entity fit at `pos` if it is allowed to rise by
/// 1..=`max_step_up` blocks to clear an obstruction? Returns the Y delta of
/// the smallest rise that works, or `None` if none does. Deliberately starts
/// at `dy = 1`, not `0`: a caller only reaches for this after `pos` itself
/// has already failed to fit (or is known to trivially fit, as a search's
/// own standing cell does), so re-testing `dy = 0` would just repeat that
/// answer. `moves::handle_target_not_passable` calls this with
/// `max_step_up = 1` for spec.md §4.5's one-block jump.
pub fn probe_step_up(
    world: &WorldSnapshot,
    classifiers: &Classifiers,
    pos: BlockPos,
    facing: (i32, i32, i32),
    entity: Entity,
    max_step_up: i32,
) -> Option<i32> {
    for dy in 1..=max_step_up {
        if can_fit(world, classifiers, pos.offset(0, dy, 0), facing, entity) {
            return Some(dy);
        }
    }
    None
}

/// Step-down / drop probe: the first Y at or below `pos` with solid (or
/// liquid, when `accept_liquid` is set) support underfoot, searching down to
/// `max_drop` blocks. Returns the number of blocks dropped, or `None` if the
/// entity never finds support, or if an intermediate cell it cannot fit
/// through blocks the fall first (spec.md §4.5: "any intermediate non-air
/// block below aborts the drop").
pub fn probe_step_down(
    world: &WorldSnapshot,
    classifiers: &Classifiers,
    pos: BlockPos,
    facing: (i32, i32, i32),
    entity: Entity,
    max_drop: i32,
    accept_liquid: bool,
) -> Option<i32> {
    for dy in 0..=max_drop {
        let candidate = pos.offset(0, -dy, 0);
        if !can_fit(world, classifiers, candidate, facing, entity) {
            return None;
        }
        let below = candidate.down();
        let supported = world.block_at(below).is_solid()
            || (accept_liquid && world.fluid_at(below).is_liquid());
        if supported {
            return Some(dy);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockState;
    use crate::fixtures::{FlatWorld, SharedFlatWorld};

    const NO_FACING: (i32, i32, i32) = (0, 0, 0);

    #[test]
    fn fits_in_open_air() {
        let mut flat = FlatWorld::new();
        flat.fill_floor(63, -2..=2, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 4);
        let classifiers = Classifiers::new();
        assert!(can_fit(&snapshot, &classifiers, BlockPos::new(0, 64, 0), NO_FACING, Entity::humanoid()));
    }

    #[test]
    fn does_not_fit_inside_solid_block() {
        let mut flat = FlatWorld::new();
        flat.set_block(BlockPos::new(0, 64, 0), BlockState::solid());
        flat.mark_loaded(0, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 4);
        let classifiers = Classifiers::new();
        assert!(!can_fit(&snapshot, &classifiers, BlockPos::new(0, 64, 0), NO_FACING, Entity::humanoid()));
    }

    #[test]
    fn bounding_box_producer_overrides_the_default_box() {
        let mut flat = FlatWorld::new();
        flat.set_block(BlockPos::new(0, 65, 0), BlockState::solid());
        flat.mark_loaded(0, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 4);
        let mut classifiers = Classifiers::new();
        // A host shrinking the entity to a short crouching box should fit
        // under the solid block one cell above, where the full-height box does not.
        classifiers.bounding_box_producer.register("test:crouch", |entity, _pos, _facing| {
            Some(Entity::new(entity.width, 1.0, entity.eye_height))
        });
        assert!(can_fit(&snapshot, &classifiers, BlockPos::new(0, 64, 0), NO_FACING, Entity::humanoid()));

        let classifiers_default = Classifiers::new();
        assert!(!can_fit(&snapshot, &classifiers_default, BlockPos::new(0, 64, 0), NO_FACING, Entity::humanoid()));
    }

    #[test]
    fn step_up_finds_the_landing_one_block_higher() {
        let mut flat = FlatWorld::new();
        flat.set_block(BlockPos::new(0, 64, 0), BlockState::solid());
        flat.mark_loaded(0, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 4);
        let classifiers = Classifiers::new();
        assert_eq!(
            probe_step_up(&snapshot, &classifiers, BlockPos::new(0, 64, 0), NO_FACING, Entity::humanoid(), 1),
            Some(1)
        );
    }

    #[test]
    fn step_up_fails_when_the_raised_cell_is_also_blocked() {
        let mut flat = FlatWorld::new();
        flat.set_block(BlockPos::new(0, 64, 0), BlockState::solid());
        flat.set_block(BlockPos::new(0, 65, 0), BlockState::solid());
        flat.mark_loaded(0, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 4);
        let classifiers = Classifiers::new();
        assert_eq!(
            probe_step_up(&snapshot, &classifiers, BlockPos::new(0, 64, 0), NO_FACING, Entity::humanoid(), 1),
            None
        );
    }

    #[test]
    fn step_down_finds_ledge_within_max_drop() {
        let mut flat = FlatWorld::new();
        flat.set_block(BlockPos::new(0, 60, 0), BlockState::solid());
        flat.mark_loaded(0, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 8);
        let classifiers = Classifiers::new();
        assert_eq!(
            probe_step_down(&snapshot, &classifiers, BlockPos::new(0, 64, 0), NO_FACING, Entity::humanoid(), 4, false),
            Some(3)
        );
    }

    #[test]
    fn step_down_fails_beyond_max_drop() {
        let mut flat = FlatWorld::new();
        flat.set_block(BlockPos::new(0, 50, 0), BlockState::solid());
        flat.mark_loaded(0, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 16);
        let classifiers = Classifiers::new();
        assert_eq!(
            probe_step_down(&snapshot, &classifiers, BlockPos::new(0, 64, 0), NO_FACING, Entity::humanoid(), 4, false),
            None
        );
    }

    #[test]
    fn step_down_aborts_when_an_intermediate_cell_is_solid() {
        let mut flat = FlatWorld::new();
        flat.set_block(BlockPos::new(0, 62, 0), BlockState::solid());
        flat.set_block(BlockPos::new(0, 50, 0), BlockState::solid());
        flat.mark_loaded(0, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 16);
        let classifiers = Classifiers::new();
        // there is walkable support at dy=14 (above the block at y=50), but a
        // solid obstruction at dy=2 must block the fall before it gets there.
        assert_eq!(
            probe_step_down(&snapshot, &classifiers, BlockPos::new(0, 64, 0), NO_FACING, Entity::humanoid(), 16, false),
            None
        );
    }
}
