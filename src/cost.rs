//! Cost and heuristic (spec.md §4.6, C6), and the capability record that
//! replaces the source's per-goal subclasses (spec.md §9).
//!
//! Grounded on the teacher's `strategy.rs` / `goal.rs` split: there, a
//! `Goal` enum picks a concrete `ExecuteGoal` implementation; here a single
//! `GoalSpec` struct holds the three callbacks a concrete goal needs to
//! supply, and `to_point`/`to_region`/`away_from` are the "separate
//! constructors producing that record" the design notes ask for.

use crate::block::BlockKind;
use crate::node::PathNode;
use crate::options::PathingOptions;
use crate::types::BlockPos;

/// The small capability record a driver needs from a concrete goal: an
/// admissible heuristic, a destination test, and a score used to track the
/// best-so-far node when the open set empties before reaching the goal
/// (spec.md §9).
pub struct GoalSpec {
    pub heuristic: Box<dyn Fn(BlockPos) -> f64 + Send + Sync>,
    pub is_at_destination: Box<dyn Fn(BlockPos) -> bool + Send + Sync>,
    pub node_result_score: Box<dyn Fn(BlockPos, f64) -> f64 + Send + Sync>,
}

impl GoalSpec {
    /// Goal is a single block. Heuristic and best-so-far score are both the
    /// euclidean distance to it.
    pub fn to_point(goal: BlockPos) -> Self {
        Self {
            heuristic: Box::new(move |pos| pos.euclidean_distance(goal)),
            is_at_destination: Box::new(move |pos| pos == goal),
            node_result_score: Box::new(move |pos, _h| pos.euclidean_distance(goal)),
        }
    }

    /// Goal is any block inside an axis-aligned region. Heuristic is the
    /// distance to the nearest point of the box, which stays admissible.
    pub fn to_region(min: BlockPos, max: BlockPos) -> Self {
        let clamp = move |pos: BlockPos| {
            BlockPos::new(pos.x.clamp(min.x, max.x), pos.y.clamp(min.y, max.y), pos.z.clamp(min.z, max.z))
        };
        let dist = move |pos: BlockPos| pos.euclidean_distance(clamp(pos));
        let contains = move |pos: BlockPos| {
            pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y && pos.z >= min.z && pos.z <= max.z
        };
        Self {
            heuristic: Box::new(dist),
            is_at_destination: Box::new(contains),
            node_result_score: Box::new(move |pos, _h| dist(pos)),
        }
    }

    /// Goal is to get clear of an avoid zone; never "reaches" in the usual
    /// sense, so `is_at_destination` is a minimum-distance threshold and the
    /// heuristic is the (always non-negative) shortfall from that radius,
    /// which stays admissible since it never overestimates remaining cost.
    pub fn away_from(avoid: BlockPos, clear_radius: f64) -> Self {
        Self {
            heuristic: Box::new(move |pos| (clear_radius - pos.euclidean_distance(avoid)).max(0.0)),
            is_at_destination: Box::new(move |pos| pos.euclidean_distance(avoid) >= clear_radius),
            node_result_score: Box::new(move |pos, _h| -pos.euclidean_distance(avoid)),
        }
    }
}

/// Everything about a single proposed move the cost model needs to know,
/// besides the raw euclidean delta. Populated by [`crate::moves::walk`].
pub struct MoveCostInputs {
    pub delta: (i32, i32, i32),
    pub parent_is_stairs: bool,
    pub target_openable: bool,
    pub on_road: bool,
    pub on_rails: bool,
    pub rails_exit: bool,
    pub on_ladder: bool,
    pub swimming: bool,
    pub swim_entering: bool,
}

/// Step cost assembly, in the multiplicative order spec.md §4.6 lists.
pub fn step_cost(inputs: &MoveCostInputs, options: &PathingOptions) -> f64 {
    let (dx, dy, dz) = inputs.delta;
    let mut cost = ((dx * dx + dy * dy + dz * dz) as f64).sqrt();

    if dy.unsigned_abs() >= 1 && (dx != 0 || dz != 0) && !inputs.parent_is_stairs {
        cost *= options.jump_drop_cost * dy.unsigned_abs() as f64;
    }
    if inputs.target_openable {
        cost *= options.traverse_toggleable_cost;
    }
    if inputs.on_road {
        cost *= options.on_path_cost;
    }
    if inputs.on_rails {
        cost *= options.on_rail_cost;
    }
    if inputs.rails_exit {
        cost *= options.rails_exit_cost;
    }
    if inputs.on_ladder {
        cost *= options.on_ladder_cost;
    }
    if inputs.swimming {
        cost *= if inputs.swim_entering { options.swim_cost_enter } else { options.swim_cost };
    }
    cost
}

/// Whether the block at `pos` is stairs, used by [`step_cost`]'s jump/drop
/// exemption (spec.md §4.6: "the parent block is not stairs").
pub fn is_stairs(world: &crate::snapshot::WorldSnapshot, pos: BlockPos) -> bool {
    matches!(world.block_at(pos).kind, BlockKind::Stairs)
}

/// `f = g + h`, recomputed whenever a node's `g` changes (spec.md §3).
pub fn recompute_f(node: &mut PathNode) {
    node.f = node.g + node.h;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_point_heuristic_is_zero_at_goal() {
        let goal = BlockPos::new(5, 10, 5);
        let spec = GoalSpec::to_point(goal);
        assert_eq!((spec.heuristic)(goal), 0.0);
        assert!((spec.is_at_destination)(goal));
    }

    #[test]
    fn step_cost_applies_jump_multiplier_only_with_horizontal_motion() {
        let options = PathingOptions::default();
        let vertical_only = MoveCostInputs {
            delta: (0, 1, 0),
            parent_is_stairs: false,
            target_openable: false,
            on_road: false,
            on_rails: false,
            rails_exit: false,
            on_ladder: true,
            swimming: false,
            swim_entering: false,
        };
        let base = 1.0 * options.on_ladder_cost;
        assert!((step_cost(&vertical_only, &options) - base).abs() < 1e-9);

        let diagonal = MoveCostInputs { delta: (1, 1, 0), on_ladder: false, ..vertical_only };
        let expected = 2.0_f64.sqrt() * options.jump_drop_cost;
        assert!((step_cost(&diagonal, &options) - expected).abs() < 1e-9);
    }
}
