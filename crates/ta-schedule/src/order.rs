//! `ExecutionOrder` — the fixed per-turn phase sequence.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ta_core::HookId;

use crate::{DependencyGraph, ScheduleError, ScheduleResult, find_cycles};

/// Topologically sorted turn-phase hooks, computed once at load and reused
/// every turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionOrder {
    hooks: Vec<HookId>,
}

impl ExecutionOrder {
    /// Kahn's algorithm with a min-heap keyed by registration order, so that
    /// whenever several hooks are ready the earliest-registered one goes next.
    ///
    /// Fails with every cycle in the graph if the graph is not a DAG.
    pub fn compute(graph: &DependencyGraph) -> ScheduleResult<ExecutionOrder> {
        let n = graph.len();
        let mut in_degree = vec![0usize; n];
        for v in 0..n {
            for w in graph.successors(v) {
                in_degree[w] += 1;
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
            .filter(|&v| in_degree[v] == 0)
            .map(Reverse)
            .collect();

        let mut hooks = Vec::with_capacity(n);
        while let Some(Reverse(v)) = ready.pop() {
            hooks.push(graph.node(v).id.clone());
            for w in graph.successors(v) {
                in_degree[w] -= 1;
                if in_degree[w] == 0 {
                    ready.push(Reverse(w));
                }
            }
        }

        if hooks.len() < n {
            return Err(ScheduleError::Cycle(find_cycles(graph)));
        }

        tracing::debug!(phases = hooks.len(), "computed turn-phase execution order");
        Ok(ExecutionOrder { hooks })
    }

    pub fn hooks(&self) -> &[HookId] {
        &self.hooks
    }

    pub fn iter(&self) -> impl Iterator<Item = &HookId> + '_ {
        self.hooks.iter()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Zero-based slot of `hook` in the order.
    pub fn position(&self, hook: &HookId) -> Option<usize> {
        self.hooks.iter().position(|h| h == hook)
    }
}
