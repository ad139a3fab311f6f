//! Append-only diagnostic log produced during a search (spec.md §3, §7).
//!
//! Grounded on the teacher's `VisualizingObserver`, which forwards frames to
//! a visualizer over an `mpsc` channel without the search caring whether
//! anyone is listening; here the "listener" is a plain callback invoked
//! once, after finalization, with the whole log rather than frame-by-frame.

use std::collections::{HashMap, HashSet};

use crate::types::BlockPos;

/// Why a candidate move was rejected, recorded for later visualization
/// rather than surfaced as an error (spec.md §7: "not errors... suppressed
/// in the normal control flow").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidMoveReason {
    SwimmingNode,
    ClosedNode,
    NotPassable,
    NodeBudgetExhausted,
}

#[derive(Debug, Clone, Default)]
pub struct CalculationData {
    pub consumed_nodes: HashSet<BlockPos>,
    /// source -> target for every edge the driver actually walked.
    pub walked_edges: HashMap<BlockPos, BlockPos>,
    pub invalid_node_reasons: HashMap<BlockPos, InvalidMoveReason>,
    pub final_path: Option<Vec<BlockPos>>,
    pub reaches_destination: bool,
}

impl CalculationData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_consumed(&mut self, pos: BlockPos) {
        self.consumed_nodes.insert(pos);
    }

    pub fn record_edge(&mut self, source: BlockPos, target: BlockPos) {
        self.walked_edges.insert(source, target);
    }

    pub fn record_invalid(&mut self, pos: BlockPos, reason: InvalidMoveReason) {
        self.invalid_node_reasons.insert(pos, reason);
    }
}

/// Invoked once the search concludes, with whatever data was gathered --
/// even on interruption or budget exhaustion (spec.md §5, §7). Mirrors the
/// teacher's observer callback shape rather than a trait, since a search
/// has exactly one listener per job.
pub type DiagnosticHook = Box<dyn Fn(&CalculationData) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_append_only_and_keyed_by_position() {
        let mut data = CalculationData::new();
        let a = BlockPos::new(0, 1, 0);
        let b = BlockPos::new(1, 1, 0);
        data.record_consumed(a);
        data.record_edge(a, b);
        data.record_invalid(b, InvalidMoveReason::SwimmingNode);
        assert!(data.consumed_nodes.contains(&a));
        assert_eq!(data.walked_edges.get(&a), Some(&b));
        assert_eq!(data.invalid_node_reasons.get(&b), Some(&InvalidMoveReason::SwimmingNode));
    }
}
