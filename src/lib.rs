pub mod block;
pub mod collision;
pub mod config;
pub mod cost;
pub mod diagnostics;
pub mod finalize;
pub mod fixtures;
pub mod logging;
pub mod moves;
pub mod node;
pub mod options;
pub mod registries;
pub mod search;
pub mod snapshot;
pub mod types;
pub mod world;

pub use block::{BlockKind, BlockState, Entity, FluidState, SurfaceType};
pub use cost::GoalSpec;
pub use diagnostics::CalculationData;
pub use finalize::{Path, Waypoint};
pub use options::PathingOptions;
pub use search::{Restriction, SearchJob, SearchOutcome};
pub use snapshot::WorldSnapshot;
pub use types::{BlockPos, PackedKey};
pub use world::{ChunkData, WorldReader};
