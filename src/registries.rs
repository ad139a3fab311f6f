//! Ordered classification registries (spec.md §4.2, C2).
//!
//! Grounded on the teacher's `Planner::select_goal`, which walks a fixed
//! `&[&dyn SelectGoal]` priority list and returns the first `Some` (see
//! `strategy.rs`). Here the same "ordered callbacks, first answer wins"
//! shape classifies blocks instead of selecting goals, and a handful of
//! registries are combined into one type so a host can register all of its
//! overrides in one place.

use crate::block::{BlockKind, BlockState, Entity, SurfaceType};
use crate::snapshot::WorldSnapshot;
use crate::types::BlockPos;

/// A single named callback in a registry. Kept as a boxed closure, same as
/// the teacher's `&dyn SelectGoal` objects, so hosts can register ad-hoc
/// mod-specific rules without implementing a trait.
pub struct Classifier<F> {
    pub name: &'static str,
    pub f: F,
}

/// An ordered list of classifiers, queried front-to-back; the first `Some`
/// returned wins, and the registry itself never resolves a default -- that
/// is the caller's job (spec.md §4.2 "first-non-empty-answer-wins").
pub struct Registry<T> {
    entries: Vec<Classifier<Box<dyn Fn(&WorldSnapshot, BlockPos, BlockState) -> Option<T> + Send + Sync>>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: &'static str,
        f: impl Fn(&WorldSnapshot, BlockPos, BlockState) -> Option<T> + Send + Sync + 'static,
    ) -> &mut Self {
        self.entries.push(Classifier { name, f: Box::new(f) });
        self
    }

    pub fn classify(&self, world: &WorldSnapshot, pos: BlockPos, block: BlockState) -> Option<T> {
        for entry in &self.entries {
            if let Some(result) = (entry.f)(world, pos, block) {
                return Some(result);
            }
        }
        None
    }
}

/// A single named callback producing a custom bounding box for an entity at
/// a position/facing (spec.md §4.2 "bounding-box producer"; §4.3 step 1).
/// The box itself is stood in by an adjusted [`Entity`], same simplification
/// `collision.rs` already makes for the default box. First `Some` wins, same
/// as [`Registry`]; kept as its own type since the callback shape (entity +
/// position + facing, not world + position + block) doesn't fit `Registry<T>`.
pub struct BoundingBoxRegistry {
    entries: Vec<Classifier<Box<dyn Fn(Entity, BlockPos, (i32, i32, i32)) -> Option<Entity> + Send + Sync>>>,
}

impl Default for BoundingBoxRegistry {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl BoundingBoxRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: &'static str,
        f: impl Fn(Entity, BlockPos, (i32, i32, i32)) -> Option<Entity> + Send + Sync + 'static,
    ) -> &mut Self {
        self.entries.push(Classifier { name, f: Box::new(f) });
        self
    }

    pub fn produce(&self, entity: Entity, center: BlockPos, facing: (i32, i32, i32)) -> Option<Entity> {
        for entry in &self.entries {
            if let Some(result) = (entry.f)(entity, center, facing) {
                return Some(result);
            }
        }
        None
    }
}

/// The bundle of registries a [`crate::options::PathingOptions`] carries.
/// Every field defaults to a registry containing only the built-in rule,
/// matching spec.md §4.2's "hosts extend, never replace, the defaults".
pub struct Classifiers {
    pub is_ladder: Registry<bool>,
    pub is_road: Registry<bool>,
    pub is_passable: Registry<bool>,
    pub walkable_surface: Registry<SurfaceType>,
    pub bounding_box_producer: BoundingBoxRegistry,
}

impl Default for Classifiers {
    fn default() -> Self {
        let mut is_ladder = Registry::new();
        is_ladder.register("builtin:ladder-like", |_world, _pos, block| {
            if block.is_ladder_like() { Some(true) } else { None }
        });

        let mut is_road = Registry::new();
        is_road.register("builtin:rail", |_world, _pos, block| {
            if block.is_rail() { Some(true) } else { None }
        });

        let mut is_passable = Registry::new();
        is_passable.register("builtin:solidity", |_world, _pos, block| {
            Some(!block.is_solid())
        });

        let mut walkable_surface = Registry::new();
        walkable_surface.register("builtin:default", |world, pos, block| {
            Some(default_walkable_surface(world, pos, block))
        });

        Self { is_ladder, is_road, is_passable, walkable_surface, bounding_box_producer: BoundingBoxRegistry::new() }
    }
}

impl Classifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ladder(&self, world: &WorldSnapshot, pos: BlockPos) -> bool {
        let block = world.block_at(pos);
        self.is_ladder.classify(world, pos, block).unwrap_or(false)
    }

    pub fn is_road(&self, world: &WorldSnapshot, pos: BlockPos) -> bool {
        let block = world.block_at(pos);
        self.is_road.classify(world, pos, block).unwrap_or(false)
    }

    pub fn is_passable(&self, world: &WorldSnapshot, pos: BlockPos) -> bool {
        let block = world.block_at(pos);
        self.is_passable.classify(world, pos, block).unwrap_or(true)
    }

    pub fn walkable_surface(&self, world: &WorldSnapshot, pos: BlockPos) -> SurfaceType {
        let block = world.block_at(pos);
        self.walkable_surface
            .classify(world, pos, block)
            .unwrap_or_else(|| default_walkable_surface(world, pos, block))
    }

    /// Lets a host shrink the entity's bounding box for a block below its
    /// feet -- crouching under a fence gate, swimming through a trapdoor,
    /// and so on (spec.md §4.2, "bounding-box producer"; §4.3 step 1). No
    /// built-in entry: if nothing answers, the collision oracle uses the
    /// entity's own box.
    pub fn bounding_box_for(&self, entity: Entity, center: BlockPos, facing: (i32, i32, i32)) -> Entity {
        self.bounding_box_producer.produce(entity, center, facing).unwrap_or(entity)
    }

    /// Lets a host nudge the search's literal start position before the
    /// first expansion -- e.g. snapping an entity standing astride two
    /// blocks onto the one it is actually supported by (spec.md §4.2,
    /// "start-position adjuster"). Defaults to the identity.
    pub fn adjust_start_position(&self, _world: &WorldSnapshot, start: BlockPos) -> BlockPos {
        start
    }
}

/// The built-in walkable-surface rule (spec.md §4.2): classifies a single
/// block in place, independent of what stands above or below it. The
/// ground-height resolver (§4.5) is what turns this into "can an entity
/// stand at this column".
pub fn default_walkable_surface(world: &WorldSnapshot, pos: BlockPos, block: BlockState) -> SurfaceType {
    if matches!(
        block.kind,
        BlockKind::Fence | BlockKind::FenceGate | BlockKind::Wall | BlockKind::Fire | BlockKind::Campfire | BlockKind::Bamboo
    ) || block.collision_height > 1.0
    {
        return SurfaceType::NotPassable;
    }
    if matches!(block.kind, BlockKind::Lava) || world.fluid_at(pos) == crate::block::FluidState::Lava {
        return SurfaceType::NotPassable;
    }
    if block.is_solid() || matches!(block.kind, BlockKind::Snow { layers } if layers > 1) || matches!(block.kind, BlockKind::Carpet) {
        return SurfaceType::Walkable;
    }
    SurfaceType::Dropable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FlatWorld, SharedFlatWorld};

    fn snapshot_with_floor() -> WorldSnapshot {
        let mut flat = FlatWorld::new();
        flat.fill_floor(63, -5..=5, 0);
        let world = SharedFlatWorld::new(flat);
        WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 8)
    }

    #[test]
    fn solid_floor_block_is_walkable() {
        let world = snapshot_with_floor();
        let classifiers = Classifiers::new();
        assert_eq!(classifiers.walkable_surface(&world, BlockPos::new(0, 63, 0)), SurfaceType::Walkable);
    }

    #[test]
    fn open_air_is_dropable() {
        let world = snapshot_with_floor();
        let classifiers = Classifiers::new();
        assert_eq!(classifiers.walkable_surface(&world, BlockPos::new(0, 70, 0)), SurfaceType::Dropable);
    }

    #[test]
    fn fence_is_not_passable() {
        let mut flat = FlatWorld::new();
        flat.set_block(BlockPos::new(0, 64, 0), BlockState::new(BlockKind::Fence, 1.5));
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 4);
        let classifiers = Classifiers::new();
        assert_eq!(classifiers.walkable_surface(&snapshot, BlockPos::new(0, 64, 0)), SurfaceType::NotPassable);
    }

    #[test]
    fn host_rule_overrides_default_by_running_first() {
        let world = snapshot_with_floor();
        let mut classifiers = Classifiers::new();
        classifiers.walkable_surface.entries.insert(
            0,
            Classifier {
                name: "host:always-blocked",
                f: Box::new(|_world, _pos, _block| Some(SurfaceType::NotPassable)),
            },
        );
        assert_eq!(
            classifiers.walkable_surface(&world, BlockPos::new(0, 63, 0)),
            SurfaceType::NotPassable
        );
    }
}
