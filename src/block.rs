//! Minimal block/entity capability surface the core reads from the host
//! world (spec.md §6, "Consumed" interfaces). The host's real block and
//! entity types are never touched directly; everything the search needs is
//! expressed through [`BlockState`], [`FluidState`] and [`Entity`] below.

/// Coarse material classification, mirrors `BlockState.material` in spec.md §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Air,
    Water,
    Lava,
    Solid,
}

/// Compass direction a ladder/vine/rail is attached to or runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    North,
    South,
    East,
    West,
    Up,
}

/// Block identity, collapsed to exactly the categories the move generator,
/// classification registries and collision oracle distinguish between.
/// A host with a richer block palette maps its own types down to this set
/// when implementing [`crate::world::ChunkData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Air,
    Solid,
    Water,
    Lava,
    Ladder(Facing),
    Vine(Facing),
    Scaffolding,
    Rail,
    PoweredRail,
    Fence,
    FenceGate,
    Wall,
    Fire,
    Campfire,
    Bamboo,
    Snow { layers: u8 },
    Carpet,
    Stairs,
    Slab,
    Door { open: bool },
    Other,
}

/// A single block's state as the core needs to see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockState {
    pub kind: BlockKind,
    /// Height in `[0.0, 1.0+]` of the block's collision shape above the
    /// cell floor; `0.0` for non-blocking blocks. A simplified stand-in for
    /// the host's full `VoxelShape` (spec.md §6), sufficient for the
    /// step-up/step-down probing the collision oracle does.
    pub collision_height: f64,
    pub has_open_property: bool,
}

impl BlockState {
    pub fn air() -> Self {
        Self { kind: BlockKind::Air, collision_height: 0.0, has_open_property: false }
    }

    pub fn solid() -> Self {
        Self { kind: BlockKind::Solid, collision_height: 1.0, has_open_property: false }
    }

    pub fn new(kind: BlockKind, collision_height: f64) -> Self {
        Self { kind, collision_height, has_open_property: false }
    }

    pub fn openable(mut self) -> Self {
        self.has_open_property = true;
        self
    }

    pub fn is_solid(&self) -> bool {
        self.collision_height >= 1.0 && !matches!(self.kind, BlockKind::Air)
    }

    pub fn material(&self) -> Material {
        match self.kind {
            BlockKind::Air => Material::Air,
            BlockKind::Water => Material::Water,
            BlockKind::Lava => Material::Lava,
            _ if self.is_solid() => Material::Solid,
            _ => Material::Air,
        }
    }

    pub fn is_ladder_like(&self) -> bool {
        matches!(self.kind, BlockKind::Ladder(_) | BlockKind::Vine(_) | BlockKind::Scaffolding)
    }

    pub fn ladder_facing(&self) -> Option<Facing> {
        match self.kind {
            BlockKind::Ladder(f) | BlockKind::Vine(f) => Some(f),
            BlockKind::Scaffolding => Some(Facing::Up),
            _ => None,
        }
    }

    pub fn is_rail(&self) -> bool {
        matches!(self.kind, BlockKind::Rail | BlockKind::PoweredRail)
    }
}

/// Fluid occupying a cell, independent of the block state (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluidState {
    Empty,
    Water,
    Lava,
}

impl FluidState {
    pub fn is_water(&self) -> bool {
        matches!(self, FluidState::Water)
    }

    pub fn is_liquid(&self) -> bool {
        !matches!(self, FluidState::Empty)
    }
}

/// Result of the walkable-surface classifier (spec.md §3, `SurfaceType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceType {
    Walkable,
    Dropable,
    NotPassable,
}

/// Movement pose, mirrors the capability surface `Entity.pose()` in spec.md §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Standing,
    Swimming,
    Crouching,
}

/// The minimal entity descriptor the search needs (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub width: f64,
    pub height: f64,
    pub eye_height: f64,
    pub pose: Pose,
}

impl Entity {
    pub fn new(width: f64, height: f64, eye_height: f64) -> Self {
        Self { width, height, eye_height, pose: Pose::Standing }
    }

    /// A generic humanoid-sized agent, used by tests and the demo binary.
    pub fn humanoid() -> Self {
        Self::new(0.6, 1.8, 1.62)
    }
}
