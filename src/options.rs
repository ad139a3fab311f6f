//! Tunable search parameters (spec.md §3 `PathingOptions`, §9 config notes).

use crate::registries::Classifiers;

/// Scalar configuration bag, immutable for the duration of a single search
/// (spec.md §3). Grounded on the teacher's `AStar` constructor parameters in
/// `infra/pathfinding.rs`, generalized from two closures into this struct so
/// a host can share one configured instance across many jobs.
pub struct PathingOptions {
    pub classifiers: Classifiers,

    /// Multiplier applied per vertical block on a jump or drop (§4.6).
    pub jump_drop_cost: f64,
    /// Multiplier applied when the target block has an openable property (§4.6).
    pub traverse_toggleable_cost: f64,
    /// Multiplier applied while walking a road-classified block (§4.6).
    pub on_path_cost: f64,
    /// Multiplier applied while riding a rail (§4.6).
    pub on_rail_cost: f64,
    /// Multiplier applied on the waypoint that disembarks a rail (§4.6).
    pub rails_exit_cost: f64,
    /// Multiplier applied while climbing a ladder (§4.6).
    pub on_ladder_cost: f64,
    /// Multiplier applied while swimming, after the first wet step (§4.6).
    pub swim_cost: f64,
    /// Multiplier applied on the step that enters the water (§4.6).
    pub swim_cost_enter: f64,
    pub can_swim: bool,
    pub can_use_ladders: bool,
    pub can_use_rails: bool,

    /// Hard cap on node expansions before the search gives up; the driver
    /// also bounds by `range²` regardless of this value (spec.md §4.7, §5).
    pub max_node_budget: u32,
    /// Enables the JPS-lite recursive continuation (spec.md §4.4 step 8,
    /// glossary "an optional accelerator disabled by default").
    pub jps_lite_enabled: bool,
    /// Minimum rail run length before a rails-entry/rails-exit marker is
    /// emitted on the finalized path (spec.md §4.8).
    pub min_rail_run: u32,
}

impl PathingOptions {
    pub fn new(classifiers: Classifiers) -> Self {
        Self {
            classifiers,
            jump_drop_cost: 2.0,
            traverse_toggleable_cost: 1.2,
            on_path_cost: 0.8,
            on_rail_cost: 0.4,
            rails_exit_cost: 1.5,
            on_ladder_cost: 1.5,
            swim_cost: 1.3,
            swim_cost_enter: 2.0,
            can_swim: true,
            can_use_ladders: true,
            can_use_rails: true,
            max_node_budget: 10_000,
            jps_lite_enabled: false,
            min_rail_run: 3,
        }
    }
}

impl Default for PathingOptions {
    fn default() -> Self {
        Self::new(Classifiers::default())
    }
}
