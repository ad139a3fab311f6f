//! Frozen, read-only world window (spec.md §4.1, C1).
//!
//! Grounded on the teacher's `state::Map` (a bounds-checked
//! `HashMap<Position, Tile>` wrapper): here the storage is chunk references
//! rather than individual tiles, since a voxel window can span many loaded
//! chunks, but the "bounds-check then return a neutral default" shape is
//! the same.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::block::{BlockState, FluidState};
use crate::types::{BlockBox, BlockPos, MAX_WINDOW_SPAN};
use crate::world::{ChunkData, WorldReader};

/// A rectangular array of chunk references, frozen at construction time.
/// Reads are O(1); out-of-window or unloaded cells read as air / empty
/// fluid, never as an error (spec.md §4.1).
pub struct WorldSnapshot {
    origin_chunk_x: i32,
    origin_chunk_z: i32,
    width_chunks: i32,
    depth_chunks: i32,
    chunks: Vec<Option<Arc<dyn ChunkData + Send + Sync>>>,
}

impl WorldSnapshot {
    /// Builds the snapshot over the bounding box of start∪goal, expanded by
    /// `padding` blocks (spec.md §4.1). `padding` is typically the search's
    /// `range` so the window never clips a reachable cell.
    #[tracing::instrument(level = "debug", skip(world, anchor_points))]
    pub fn build(world: &dyn WorldReader, anchor_points: &[BlockPos], padding: i32) -> Self {
        let bbox = BlockBox::from_points(anchor_points, padding);
        Self::from_box(world, bbox)
    }

    pub fn from_box(world: &dyn WorldReader, bbox: BlockBox) -> Self {
        debug_assert!(
            bbox.xz_span() <= MAX_WINDOW_SPAN,
            "world snapshot window exceeds the 4096-block span PackedKey can address"
        );

        let origin_chunk_x = bbox.min.x.div_euclid(16);
        let origin_chunk_z = bbox.min.z.div_euclid(16);
        let end_chunk_x = bbox.max.x.div_euclid(16);
        let end_chunk_z = bbox.max.z.div_euclid(16);

        let width_chunks = end_chunk_x - origin_chunk_x + 1;
        let depth_chunks = end_chunk_z - origin_chunk_z + 1;

        let mut chunks = Vec::with_capacity((width_chunks * depth_chunks) as usize);
        let mut loaded = 0usize;
        for cz in origin_chunk_z..=end_chunk_z {
            for cx in origin_chunk_x..=end_chunk_x {
                let chunk = world.chunk_at(cx, cz);
                if chunk.is_some() {
                    loaded += 1;
                }
                chunks.push(chunk);
            }
        }

        debug!(
            width_chunks,
            depth_chunks,
            loaded,
            total = chunks.len(),
            "world snapshot built"
        );
        if loaded == 0 {
            warn!("world snapshot has no loaded chunks; every read will return air");
        }

        Self { origin_chunk_x, origin_chunk_z, width_chunks, depth_chunks, chunks }
    }

    /// Bounds of the window, in block coordinates.
    pub fn bounds(&self) -> BlockBox {
        BlockBox::new(
            BlockPos::new(self.origin_chunk_x * 16, crate::types::MIN_Y, self.origin_chunk_z * 16),
            BlockPos::new(
                (self.origin_chunk_x + self.width_chunks) * 16 - 1,
                crate::types::MAX_Y,
                (self.origin_chunk_z + self.depth_chunks) * 16 - 1,
            ),
        )
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        self.bounds().min.x <= pos.x
            && pos.x <= self.bounds().max.x
            && self.bounds().min.z <= pos.z
            && pos.z <= self.bounds().max.z
    }

    fn chunk_at(&self, pos: BlockPos) -> Option<&Arc<dyn ChunkData + Send + Sync>> {
        let cx = pos.chunk_x() - self.origin_chunk_x;
        let cz = pos.chunk_z() - self.origin_chunk_z;
        if cx < 0 || cz < 0 || cx >= self.width_chunks || cz >= self.depth_chunks {
            return None;
        }
        let idx = (cz * self.width_chunks + cx) as usize;
        self.chunks[idx].as_ref()
    }

    pub fn block_at(&self, pos: BlockPos) -> BlockState {
        if pos.y < crate::types::MIN_Y || pos.y > crate::types::MAX_Y {
            return BlockState::air();
        }
        match self.chunk_at(pos) {
            Some(chunk) => chunk.block_at(pos),
            None => BlockState::air(),
        }
    }

    pub fn fluid_at(&self, pos: BlockPos) -> FluidState {
        if pos.y < crate::types::MIN_Y || pos.y > crate::types::MAX_Y {
            return FluidState::Empty;
        }
        match self.chunk_at(pos) {
            Some(chunk) => chunk.fluid_at(pos),
            None => FluidState::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FlatWorld, SharedFlatWorld};

    #[test]
    fn out_of_window_reads_as_air() {
        let world = SharedFlatWorld::new(FlatWorld::new());
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 64, 0)], 4);
        assert_eq!(snapshot.block_at(BlockPos::new(1000, 64, 1000)), BlockState::air());
    }

    #[test]
    fn unloaded_chunk_inside_window_reads_as_air() {
        let mut flat = FlatWorld::new();
        flat.set_block(BlockPos::new(0, 63, 0), BlockState::solid());
        let world = SharedFlatWorld::new(flat);
        // force a window that includes an unloaded chunk far from the anchor
        let snapshot = WorldSnapshot::from_box(
            &world,
            BlockBox::new(BlockPos::new(-32, 0, -32), BlockPos::new(32, 80, 32)),
        );
        assert_eq!(snapshot.block_at(BlockPos::new(31, 63, 31)), BlockState::air());
        assert!(snapshot.block_at(BlockPos::new(0, 63, 0)).is_solid());
    }
}
