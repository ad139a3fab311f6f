//! Environment-driven overrides for [`crate::options::PathingOptions`]
//! (spec.md OUT-OF-SCOPE "user configuration loading" — carried anyway as
//! ambient stack).
//!
//! Grounded on the teacher's `get_env_var_i32` / `main.rs` env-var reads: no
//! config crate, just `env::var(..).ok().and_then(|v| v.parse().ok())`.

use std::env;

use crate::options::PathingOptions;

fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Applies recognized `PATHFINDER_*` environment variables on top of
/// whatever defaults `options` already carries. Unset or unparsable
/// variables leave the existing value untouched.
pub fn apply_env_overrides(options: &mut PathingOptions) {
    if let Some(max_nodes) = env_var::<u32>("PATHFINDER_MAX_NODES") {
        options.max_node_budget = max_nodes;
    }
    if let Some(enabled) = env_var::<bool>("PATHFINDER_JPS_LITE") {
        options.jps_lite_enabled = enabled;
    }
    if let Some(min_run) = env_var::<u32>("PATHFINDER_MIN_RAIL_RUN") {
        options.min_rail_run = min_run;
    }
    if let Some(can_swim) = env_var::<bool>("PATHFINDER_CAN_SWIM") {
        options.can_swim = can_swim;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_vars_leave_defaults_untouched() {
        let mut options = PathingOptions::default();
        let default_budget = options.max_node_budget;
        apply_env_overrides(&mut options);
        assert_eq!(options.max_node_budget, default_budget);
    }
}
