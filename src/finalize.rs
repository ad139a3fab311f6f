//! Path finalizer (spec.md §4.8, C8).
//!
//! Walks the parent chain from the terminal node back to the start and
//! emits the externally-facing waypoint list, same "walk back through
//! parents, reverse into an array" shape as the teacher's A* reconstructs a
//! path in `pathfinding.rs::find_path` (there via a `HashMap` `came_from`,
//! here via the arena's index links).

use crate::block::Facing;
use crate::node::{NodeArena, NodeId};
use crate::options::PathingOptions;
use crate::registries::Classifiers;
use crate::snapshot::WorldSnapshot;
use crate::types::BlockPos;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub pos: BlockPos,
    pub on_ladder: bool,
    pub ladder_facing: Option<Facing>,
    pub on_rails: bool,
    pub rails_entry: bool,
    pub rails_exit: bool,
    pub swimming: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Ordered start -> goal. A waypoint's successor is simply the next
    /// entry in this vector; there is no separate linked structure, since
    /// nothing downstream needs to mutate the chain once finalized.
    pub waypoints: Vec<Waypoint>,
    pub reaches_destination: bool,
}

/// Builds the waypoint list for `best`, the node the driver settled on
/// (either the true destination or a best-effort node). Re-finalizing the
/// same node is pure and always returns an equal path (spec.md §8,
/// "idempotent finalization").
pub fn finalize(
    arena: &NodeArena,
    best: NodeId,
    reaches_destination: bool,
    world: &WorldSnapshot,
    classifiers: &Classifiers,
    options: &PathingOptions,
) -> Path {
    let mut chain = Vec::new();
    let mut cursor = Some(best);
    while let Some(id) = cursor {
        let node = arena.get(id);
        chain.push(id);
        cursor = node.parent;
    }
    chain.reverse();

    let mut waypoints: Vec<Waypoint> = chain
        .iter()
        .map(|&id| {
            let node = arena.get(id);
            let ladder_facing = if node.on_ladder { ladder_facing_at(world, node.pos) } else { None };
            let pos = if node.swimming {
                // Resolves spec.md §9's open question about the swim
                // Y-shift: the emitted waypoint is lowered one block so the
                // movement controller tracks the water's surface rather
                // than the node's own (slightly-above-surface) cell.
                node.pos.down()
            } else {
                node.pos
            };
            Waypoint {
                pos,
                on_ladder: node.on_ladder,
                ladder_facing,
                on_rails: node.on_rails,
                rails_entry: false,
                rails_exit: false,
                swimming: node.swimming,
            }
        })
        .collect();

    mark_rail_runs(&mut waypoints, options.min_rail_run as usize);

    Path { waypoints, reaches_destination }
}

fn ladder_facing_at(world: &WorldSnapshot, pos: BlockPos) -> Option<Facing> {
    world.block_at(pos).ladder_facing()
}

/// Flags rails-entry / rails-exit on the first/last waypoint of every
/// contiguous on-rails run whose length meets `min_run` (spec.md §4.8:
/// "only if the rails run is ≥ configured minimum").
fn mark_rail_runs(waypoints: &mut [Waypoint], min_run: usize) {
    let mut i = 0;
    while i < waypoints.len() {
        if !waypoints[i].on_rails {
            i += 1;
            continue;
        }
        let start = i;
        while i < waypoints.len() && waypoints[i].on_rails {
            i += 1;
        }
        let end = i; // exclusive
        if end - start >= min_run {
            waypoints[start].rails_entry = true;
            waypoints[end - 1].rails_exit = true;
        }
    }
}
