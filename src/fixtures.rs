//! A tiny in-memory [`WorldReader`] implementation, used by the integration
//! tests and by `demos/run_search.rs`. Not part of the search algorithm
//! itself — a stand-in for whatever chunk storage a real host provides.

use std::collections::HashMap;
use std::sync::Arc;

use crate::block::{BlockState, FluidState};
use crate::types::BlockPos;
use crate::world::{ChunkData, WorldReader};

/// A sparse, single-chunk-sized (but unbounded) block store. Every loaded
/// chunk coordinate maps to the same shared storage, which is fine for
/// tests: the snapshot only ever asks for `block_at`/`fluid_at` at absolute
/// positions, never for chunk-relative ones.
#[derive(Default)]
pub struct FlatWorld {
    blocks: HashMap<BlockPos, BlockState>,
    fluids: HashMap<BlockPos, FluidState>,
    loaded_chunks: std::collections::HashSet<(i32, i32)>,
}

impl FlatWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_block(&mut self, pos: BlockPos, state: BlockState) -> &mut Self {
        self.loaded_chunks.insert((pos.chunk_x(), pos.chunk_z()));
        self.blocks.insert(pos, state);
        self
    }

    pub fn set_fluid(&mut self, pos: BlockPos, fluid: FluidState) -> &mut Self {
        self.loaded_chunks.insert((pos.chunk_x(), pos.chunk_z()));
        self.fluids.insert(pos, fluid);
        self
    }

    /// Fills a rectangular floor at the given Y with solid blocks, air above.
    pub fn fill_floor(&mut self, y: i32, x_range: std::ops::RangeInclusive<i32>, z: i32) -> &mut Self {
        for x in x_range {
            self.set_block(BlockPos::new(x, y, z), BlockState::solid());
        }
        self
    }

    pub fn mark_loaded(&mut self, chunk_x: i32, chunk_z: i32) -> &mut Self {
        self.loaded_chunks.insert((chunk_x, chunk_z));
        self
    }
}

impl ChunkData for FlatWorld {
    fn block_at(&self, pos: BlockPos) -> BlockState {
        self.blocks.get(&pos).copied().unwrap_or_else(BlockState::air)
    }

    fn fluid_at(&self, pos: BlockPos) -> FluidState {
        self.fluids.get(&pos).copied().unwrap_or(FluidState::Empty)
    }
}

/// `FlatWorld` acts as both the world and the (single, shared) chunk: every
/// loaded chunk coordinate resolves to an `Arc` pointing at the same map.
pub struct SharedFlatWorld(pub Arc<FlatWorld>);

impl SharedFlatWorld {
    pub fn new(world: FlatWorld) -> Self {
        Self(Arc::new(world))
    }
}

impl WorldReader for SharedFlatWorld {
    fn chunk_at(&self, chunk_x: i32, chunk_z: i32) -> Option<Arc<dyn ChunkData + Send + Sync>> {
        if self.0.loaded_chunks.contains(&(chunk_x, chunk_z)) {
            Some(self.0.clone() as Arc<dyn ChunkData + Send + Sync>)
        } else {
            None
        }
    }
}
