//! The host-world read interface (spec.md §6, "Consumed").
//!
//! The core never sees the live, mutable world directly — only through
//! these two traits, which [`crate::snapshot::WorldSnapshot`] consumes once
//! at construction time to copy in strong references to loaded chunks.

use std::sync::Arc;

use crate::block::{BlockState, FluidState};
use crate::types::BlockPos;

/// A single loaded 16-wide chunk column. Implementations own whatever
/// storage the host uses; the core only ever calls these two accessors.
pub trait ChunkData {
    fn block_at(&self, pos: BlockPos) -> BlockState;
    fn fluid_at(&self, pos: BlockPos) -> FluidState;
}

/// The host world, as the search sees it. `chunk_at` is the only method the
/// snapshot calls; everything else the search needs goes through the
/// returned chunk references, copied in once and never touched again
/// (spec.md §4.1, §9 "encapsulated world-mutation safety").
pub trait WorldReader {
    fn chunk_at(&self, chunk_x: i32, chunk_z: i32) -> Option<Arc<dyn ChunkData + Send + Sync>>;
}
