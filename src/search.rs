//! A* driver (spec.md §4.7, C7) and job construction (spec.md §6, §9).
//!
//! Grounded on the teacher's `infra::pathfinding::AStar::find_path_with_cost`
//! for the overall pop/expand/terminate shape, and on `strategy.rs`'s
//! pattern of a small injected capability record standing in for a subclass
//! hierarchy -- here that record is [`crate::cost::GoalSpec`].

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::block::{Entity, SurfaceType};
use crate::cost::{step_cost, GoalSpec, MoveCostInputs};
use crate::diagnostics::{CalculationData, DiagnosticHook, InvalidMoveReason};
use crate::finalize::{finalize, Path};
use crate::moves::{self, Direction, ParentInfo};
use crate::node::{NodeArena, NodeId, OpenSet, PathNode, VisitedMap};
use crate::options::PathingOptions;
use crate::snapshot::WorldSnapshot;
use crate::types::{BlockPos, XzRect};

/// An axis-aligned XZ restriction window (spec.md §4.7). Soft mode gates
/// only destination testing; hard mode also gates expansion.
#[derive(Debug, Clone, Copy)]
pub struct Restriction {
    pub rect: XzRect,
    pub hard: bool,
}

/// Outcome of a completed (or interrupted) search.
pub struct SearchOutcome {
    /// `None` only on interruption before any node was ever popped, or when
    /// the start position falls outside the snapshot window (spec.md §7).
    pub path: Option<Path>,
    pub calculation: CalculationData,
}

pub struct SearchJob<'a> {
    world: &'a WorldSnapshot,
    start: BlockPos,
    entity: Entity,
    options: &'a PathingOptions,
    goal: GoalSpec,
    range: i32,
    restriction: Option<Restriction>,
    diagnostic_hook: Option<DiagnosticHook>,
}

impl<'a> SearchJob<'a> {
    /// The general constructor: any goal shape, any restriction. Concrete
    /// goals are produced by [`GoalSpec`]'s own constructors (spec.md §9).
    pub fn new(
        world: &'a WorldSnapshot,
        start: BlockPos,
        goal: GoalSpec,
        range: i32,
        entity: Entity,
        options: &'a PathingOptions,
    ) -> Self {
        Self { world, start, entity, options, goal, range, restriction: None, diagnostic_hook: None }
    }

    /// Exposed form `(world, start, end, range, entity)` (spec.md §6).
    pub fn to_point(
        world: &'a WorldSnapshot,
        start: BlockPos,
        end: BlockPos,
        range: i32,
        entity: Entity,
        options: &'a PathingOptions,
    ) -> Self {
        Self::new(world, start, GoalSpec::to_point(end), range, entity, options)
    }

    /// Exposed form `(world, start, restrictionMin, restrictionMax, range,
    /// grow, hardRestriction, entity)` (spec.md §6). `grow` widens the
    /// rectangle in every direction before it gates anything.
    #[allow(clippy::too_many_arguments)]
    pub fn new_restricted(
        world: &'a WorldSnapshot,
        start: BlockPos,
        restriction_min: BlockPos,
        restriction_max: BlockPos,
        range: i32,
        grow: i32,
        hard_restriction: bool,
        entity: Entity,
        options: &'a PathingOptions,
        goal: GoalSpec,
    ) -> Self {
        let rect = XzRect::new(restriction_min.x, restriction_max.x, restriction_min.z, restriction_max.z).grown(grow);
        let mut job = Self::new(world, start, goal, range, entity, options);
        job.restriction = Some(Restriction { rect, hard: hard_restriction });
        job
    }

    pub fn with_diagnostic_hook(mut self, hook: DiagnosticHook) -> Self {
        self.diagnostic_hook = Some(hook);
        self
    }

    /// Runs the search to completion or interruption (spec.md §4.7, §5).
    /// `cancelled` is checked once per pop; there is no preemption.
    #[tracing::instrument(level = "debug", skip(self, cancelled), fields(start = ?self.start, range = self.range))]
    pub fn run(self, cancelled: &AtomicBool) -> SearchOutcome {
        let mut calculation = CalculationData::new();
        let options = self.options;
        let classifiers = &options.classifiers;

        let start = classifiers.adjust_start_position(self.world, self.start);
        if !self.world.contains(start) {
            warn!(?start, "search start falls outside the world snapshot window; rejecting");
            return SearchOutcome { path: None, calculation };
        }

        let mut arena = NodeArena::new();
        let mut visited = VisitedMap::new();
        let mut open = OpenSet::new();
        let mut ordinal: u32 = 0;

        let h0 = (self.goal.heuristic)(start);
        let start_id = arena.push(PathNode {
            pos: start,
            parent: None,
            g: 0.0,
            h: h0,
            f: h0,
            steps: 0,
            swimming: false,
            on_ladder: false,
            on_rails: false,
            corner: false,
            ordinal,
        });
        visited.insert_or_update(start, start_id);
        open.push(start_id, h0, ordinal);

        let node_budget = options.max_node_budget.min((self.range as i64 * self.range as i64).max(1) as u32);

        let mut best_id = start_id;
        let mut best_score = (self.goal.node_result_score)(start, h0);
        let mut reaches = false;

        while let Some(current_id) = open.pop() {
            if cancelled.load(Ordering::Relaxed) {
                info!("search interrupted before completion");
                return SearchOutcome { path: None, calculation };
            }

            let current_pos = arena.get(current_id).pos;
            if visited.is_closed(current_pos) {
                // stale open-set entry left behind by an earlier decrease-g rewire
                continue;
            }
            if arena.len() as u32 > node_budget {
                calculation.record_invalid(current_pos, InvalidMoveReason::NodeBudgetExhausted);
                debug!(budget = node_budget, "node budget exhausted");
                break;
            }

            visited.close(current_pos);
            calculation.record_consumed(current_pos);

            let inside_window = self.restriction.map(|r| r.rect.contains(current_pos)).unwrap_or(true);
            if inside_window && (self.goal.is_at_destination)(current_pos) {
                best_id = current_id;
                reaches = true;
                break;
            }

            let current = *arena.get(current_id);
            let score = (self.goal.node_result_score)(current_pos, current.h);
            let stands_on_walkable =
                classifiers.walkable_surface(self.world, current_pos.down()) == SurfaceType::Walkable;
            if !current.corner && stands_on_walkable && score < best_score {
                best_score = score;
                best_id = current_id;
            }

            let may_expand = self.restriction.map(|r| !r.hard || r.rect.contains(current_pos)).unwrap_or(true);
            if may_expand {
                self.expand(&mut arena, &mut visited, &mut open, &mut calculation, &mut ordinal, current_id);
            }
        }

        let path = finalize(&arena, best_id, reaches, self.world, classifiers, options);
        calculation.final_path = Some(path.waypoints.iter().map(|w| w.pos).collect());
        calculation.reaches_destination = reaches;
        if let Some(hook) = &self.diagnostic_hook {
            hook(&calculation);
        }
        SearchOutcome { path: Some(path), calculation }
    }

    fn expand(
        &self,
        arena: &mut NodeArena,
        visited: &mut VisitedMap,
        open: &mut OpenSet,
        calculation: &mut CalculationData,
        ordinal: &mut u32,
        current_id: NodeId,
    ) {
        let current = *arena.get(current_id);
        let grandparent = current.parent.map(|id| arena.get(id).pos);
        let parent_info = ParentInfo {
            pos: current.pos,
            grandparent,
            corner: current.corner,
            on_ladder: current.on_ladder,
            swimming: current.swimming,
            on_rails: current.on_rails,
        };

        for direction in moves::eligible_directions(self.world, &self.options.classifiers, &parent_info) {
            if let Some(successor) =
                moves::walk(self.world, &self.options.classifiers, self.entity, self.options, &parent_info, visited, direction)
            {
                self.upsert(arena, visited, open, calculation, ordinal, current_id, &successor, direction);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn upsert(
        &self,
        arena: &mut NodeArena,
        visited: &mut VisitedMap,
        open: &mut OpenSet,
        calculation: &mut CalculationData,
        ordinal: &mut u32,
        parent_id: NodeId,
        successor: &moves::Successor,
        direction: Direction,
    ) -> NodeId {
        let parent = *arena.get(parent_id);
        let cost_inputs = MoveCostInputs {
            delta: successor.delta,
            parent_is_stairs: successor.parent_is_stairs,
            target_openable: successor.target_openable,
            on_road: successor.on_road,
            on_rails: successor.on_rails,
            rails_exit: successor.rails_exit,
            on_ladder: successor.on_ladder,
            swimming: successor.swimming,
            swim_entering: successor.swim_entering,
        };
        let step = step_cost(&cost_inputs, self.options);
        let g = parent.g + step;
        let h = (self.goal.heuristic)(successor.pos);
        let f = g + h;

        let new_id = match visited.best(successor.pos) {
            Some(existing_id) if !visited.is_closed(successor.pos) => {
                if f < arena.get(existing_id).f {
                    *ordinal += 1;
                    let node = arena.get_mut(existing_id);
                    node.parent = Some(parent_id);
                    node.g = g;
                    node.h = h;
                    node.f = f;
                    node.steps = parent.steps + 1;
                    node.swimming = successor.swimming;
                    node.on_ladder = successor.on_ladder;
                    node.on_rails = successor.on_rails;
                    node.corner = successor.corner;
                    node.ordinal = *ordinal;
                    open.push(existing_id, f, *ordinal);
                    calculation.record_edge(parent.pos, successor.pos);
                }
                existing_id
            }
            Some(existing_id) => existing_id, // closed: A* assumes a consistent heuristic (spec.md §3)
            None => {
                *ordinal += 1;
                let node = PathNode {
                    pos: successor.pos,
                    parent: Some(parent_id),
                    g,
                    h,
                    f,
                    steps: parent.steps + 1,
                    swimming: successor.swimming,
                    on_ladder: successor.on_ladder,
                    on_rails: successor.on_rails,
                    corner: successor.corner,
                    ordinal: *ordinal,
                };
                let id = arena.push(node);
                visited.insert_or_update(successor.pos, id);
                open.push(id, f, *ordinal);
                calculation.record_edge(parent.pos, successor.pos);
                id
            }
        };

        if successor.swimming && !self.options.can_swim {
            calculation.record_invalid(successor.pos, InvalidMoveReason::SwimmingNode);
        }

        if self.options.jps_lite_enabled {
            self.jps_lite_continue(arena, visited, open, calculation, ordinal, new_id, direction);
        }
        new_id
    }

    /// JPS-lite: as long as the successor's heuristic does not regress,
    /// keep walking the same direction instead of falling back to the
    /// open set (spec.md §4.4 step 8). Bounded defensively by the node
    /// budget so a pathological world can't spin this forever.
    fn jps_lite_continue(
        &self,
        arena: &mut NodeArena,
        visited: &mut VisitedMap,
        open: &mut OpenSet,
        calculation: &mut CalculationData,
        ordinal: &mut u32,
        mut current_id: NodeId,
        direction: Direction,
    ) {
        loop {
            if arena.len() as u32 > self.options.max_node_budget {
                return;
            }
            let current = *arena.get(current_id);
            let grandparent = current.parent.map(|id| arena.get(id).pos);
            let parent_info = ParentInfo {
                pos: current.pos,
                grandparent,
                corner: current.corner,
                on_ladder: current.on_ladder,
                swimming: current.swimming,
                on_rails: current.on_rails,
            };
            let Some(successor) = moves::walk(
                self.world,
                &self.options.classifiers,
                self.entity,
                self.options,
                &parent_info,
                visited,
                direction,
            ) else {
                return;
            };
            let new_h = (self.goal.heuristic)(successor.pos);
            if new_h > current.h {
                return;
            }
            current_id = self.upsert_jps(arena, visited, open, calculation, ordinal, current_id, &successor);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn upsert_jps(
        &self,
        arena: &mut NodeArena,
        visited: &mut VisitedMap,
        open: &mut OpenSet,
        calculation: &mut CalculationData,
        ordinal: &mut u32,
        parent_id: NodeId,
        successor: &moves::Successor,
    ) -> NodeId {
        // Same upsert rule as a regular expansion step, without re-triggering
        // JPS-lite recursion (the caller's loop already provides that).
        let parent = *arena.get(parent_id);
        let cost_inputs = MoveCostInputs {
            delta: successor.delta,
            parent_is_stairs: successor.parent_is_stairs,
            target_openable: successor.target_openable,
            on_road: successor.on_road,
            on_rails: successor.on_rails,
            rails_exit: successor.rails_exit,
            on_ladder: successor.on_ladder,
            swimming: successor.swimming,
            swim_entering: successor.swim_entering,
        };
        let step = step_cost(&cost_inputs, self.options);
        let g = parent.g + step;
        let h = (self.goal.heuristic)(successor.pos);
        let f = g + h;

        if let Some(existing_id) = visited.best(successor.pos) {
            if !visited.is_closed(successor.pos) && f < arena.get(existing_id).f {
                *ordinal += 1;
                let node = arena.get_mut(existing_id);
                node.parent = Some(parent_id);
                node.g = g;
                node.h = h;
                node.f = f;
                node.steps = parent.steps + 1;
                node.swimming = successor.swimming;
                node.on_ladder = successor.on_ladder;
                node.on_rails = successor.on_rails;
                node.corner = successor.corner;
                node.ordinal = *ordinal;
                open.push(existing_id, f, *ordinal);
                calculation.record_edge(parent.pos, successor.pos);
            }
            return existing_id;
        }

        *ordinal += 1;
        let node = PathNode {
            pos: successor.pos,
            parent: Some(parent_id),
            g,
            h,
            f,
            steps: parent.steps + 1,
            swimming: successor.swimming,
            on_ladder: successor.on_ladder,
            on_rails: successor.on_rails,
            corner: successor.corner,
            ordinal: *ordinal,
        };
        let id = arena.push(node);
        visited.insert_or_update(successor.pos, id);
        open.push(id, f, *ordinal);
        calculation.record_edge(parent.pos, successor.pos);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FlatWorld, SharedFlatWorld};

    fn flat_corridor() -> (SharedFlatWorld, WorldSnapshot) {
        let mut flat = FlatWorld::new();
        flat.fill_floor(0, 0..=9, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 1, 0), BlockPos::new(9, 1, 0)], 4);
        (world, snapshot)
    }

    #[test]
    fn flat_corridor_reaches_destination_with_increasing_x() {
        let (_world, snapshot) = flat_corridor();
        let options = PathingOptions::default();
        let job = SearchJob::to_point(&snapshot, BlockPos::new(0, 1, 0), BlockPos::new(9, 1, 0), 16, Entity::humanoid(), &options);
        let cancelled = AtomicBool::new(false);
        let outcome = job.run(&cancelled);
        let path = outcome.path.expect("path");
        assert!(path.reaches_destination);
        assert_eq!(path.waypoints.first().unwrap().pos, BlockPos::new(0, 1, 0));
        assert_eq!(path.waypoints.last().unwrap().pos, BlockPos::new(9, 1, 0));
        let xs: Vec<i32> = path.waypoints.iter().map(|w| w.pos.x).collect();
        assert!(xs.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn interruption_before_first_pop_returns_no_path() {
        let (_world, snapshot) = flat_corridor();
        let options = PathingOptions::default();
        let job = SearchJob::to_point(&snapshot, BlockPos::new(0, 1, 0), BlockPos::new(9, 1, 0), 16, Entity::humanoid(), &options);
        let cancelled = AtomicBool::new(true);
        let outcome = job.run(&cancelled);
        assert!(outcome.path.is_none());
        assert!(!outcome.calculation.reaches_destination);
    }

    #[test]
    fn unreachable_goal_returns_best_effort_without_reaching() {
        let mut flat = FlatWorld::new();
        flat.fill_floor(0, 0..=3, 0);
        let world = SharedFlatWorld::new(flat);
        let snapshot = WorldSnapshot::build(&world, &[BlockPos::new(0, 1, 0), BlockPos::new(20, 1, 0)], 4);
        let options = PathingOptions::default();
        let job = SearchJob::to_point(&snapshot, BlockPos::new(0, 1, 0), BlockPos::new(20, 1, 0), 8, Entity::humanoid(), &options);
        let cancelled = AtomicBool::new(false);
        let outcome = job.run(&cancelled);
        let path = outcome.path.expect("best-effort path");
        assert!(!path.reaches_destination);
    }
}
