//! The turn-phase dependency graph.

use std::collections::{BTreeMap, BTreeSet};

use ta_behavior::{HookDefinition, InvocationKind, Relation};
use ta_core::{HookId, ModuleId};

/// A turn-phase hook in the graph.  Its index is its registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookNode {
    pub id:     HookId,
    /// Module that defined the hook.
    pub module: ModuleId,
}

/// One ordering constraint, normalized to predecessor → successor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from:          usize,
    pub to:            usize,
    /// How the constraint was spelled.
    pub relation:      Relation,
    /// Module whose hook definition declared the constraint.
    pub introduced_by: ModuleId,
}

/// Directed graph over turn-phase hooks.
///
/// Entity hooks are skipped, and so are constraints naming a hook that is
/// not a registered turn-phase hook.  Both are reported by the registry's
/// validation pass, not here.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes:      Vec<HookNode>,
    index:      BTreeMap<HookId, usize>,
    edges:      Vec<Edge>,
    successors: Vec<BTreeSet<usize>>,
    /// `(from, to)` → positions in `edges`.
    by_pair:    BTreeMap<(usize, usize), Vec<usize>>,
}

impl DependencyGraph {
    /// Build from hook definitions in registration order.
    ///
    /// Two passes, so a constraint may name a hook registered later.  A hook
    /// id seen twice keeps its first registration.
    pub fn build<'a, I>(hooks: I) -> Self
    where
        I: IntoIterator<Item = (&'a ModuleId, &'a HookDefinition)>,
    {
        let defs: Vec<(&ModuleId, &HookDefinition)> = hooks
            .into_iter()
            .filter(|(_, def)| def.invocation_kind == InvocationKind::TurnPhase)
            .collect();

        let mut graph = DependencyGraph::default();

        // ── Pass 1: nodes ─────────────────────────────────────────────────
        for (module, def) in &defs {
            if graph.index.contains_key(&def.hook_id) {
                continue;
            }
            graph.index.insert(def.hook_id.clone(), graph.nodes.len());
            graph.nodes.push(HookNode { id: def.hook_id.clone(), module: (*module).clone() });
            graph.successors.push(BTreeSet::new());
        }

        // ── Pass 2: edges ─────────────────────────────────────────────────
        for (module, def) in &defs {
            let Some(&me) = graph.index.get(&def.hook_id) else { continue };
            for (relation, target) in def.constraints() {
                let Some(&other) = graph.index.get(target) else { continue };
                let (from, to) = match relation {
                    Relation::After  => (other, me),
                    Relation::Before => (me, other),
                };
                graph.successors[from].insert(to);
                graph.by_pair.entry((from, to)).or_default().push(graph.edges.len());
                graph.edges.push(Edge {
                    from,
                    to,
                    relation,
                    introduced_by: (*module).clone(),
                });
            }
        }

        graph
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[HookNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &HookNode {
        &self.nodes[index]
    }

    pub fn index_of(&self, hook: &HookId) -> Option<usize> {
        self.index.get(hook).copied()
    }

    /// Every declared edge, including duplicates from different modules.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Distinct successors of `index`, ascending by registration order.
    pub fn successors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.successors[index].iter().copied()
    }

    /// Every declaration that produced the edge `from → to`.
    pub fn edges_between(&self, from: usize, to: usize) -> impl Iterator<Item = &Edge> + '_ {
        self.by_pair
            .get(&(from, to))
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
    }
}
