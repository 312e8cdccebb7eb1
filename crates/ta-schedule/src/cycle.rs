//! Cycle detection with provenance.
//!
//! Cycles are found per strongly connected component (Tarjan), so a tangle
//! of many overlapping loops is reported once rather than once per loop.
//! For each component the report carries one concrete loop through its
//! earliest-registered hook, and for every edge on that loop the modules
//! whose declarations created it.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use ta_behavior::Relation;
use ta_core::{HookId, ModuleId};

use crate::DependencyGraph;

/// One edge on a reported cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleEdge {
    pub from:          HookId,
    pub to:            HookId,
    /// `(module, relation)` for every declaration that produced this edge.
    pub introduced_by: Vec<(ModuleId, Relation)>,
}

/// A dependency cycle among turn-phase hooks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cycle {
    /// Every hook in the strongly connected component, in registration order.
    pub members: Vec<HookId>,
    /// A concrete loop: `path[i] → path[i+1]`, and the last hook back to the first.
    pub path:    Vec<HookId>,
    /// The edges along `path`, in the same order.
    pub edges:   Vec<CycleEdge>,
}

impl Cycle {
    pub fn contains(&self, hook: &HookId) -> bool {
        self.members.contains(hook)
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hook in &self.path {
            write!(f, "{hook} -> ")?;
        }
        if let Some(first) = self.path.first() {
            write!(f, "{first}")?;
        }
        let provenance: Vec<String> = self
            .edges
            .iter()
            .map(|e| {
                let who: Vec<String> = e
                    .introduced_by
                    .iter()
                    .map(|(m, r)| format!("{m} ({r})"))
                    .collect();
                format!("{} -> {} by {}", e.from, e.to, who.join(", "))
            })
            .collect();
        write!(f, " [{}]", provenance.join("; "))
    }
}

/// Every cycle in `graph`, one per non-trivial strongly connected component,
/// sorted by the registration order of each component's first hook.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let mut tarjan = Tarjan::new(graph);
    for v in 0..graph.len() {
        if tarjan.index[v].is_none() {
            tarjan.visit(v);
        }
    }

    let mut components: Vec<Vec<usize>> = tarjan
        .components
        .into_iter()
        .filter(|c| c.len() > 1 || graph.successors(c[0]).any(|w| w == c[0]))
        .map(|mut c| {
            c.sort_unstable();
            c
        })
        .collect();
    components.sort_by_key(|c| c[0]);

    components
        .into_iter()
        .map(|members| describe(graph, &members))
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn describe(graph: &DependencyGraph, members: &[usize]) -> Cycle {
    let path = loop_through(graph, members);
    let edges = path
        .iter()
        .zip(path.iter().cycle().skip(1))
        .map(|(&from, &to)| CycleEdge {
            from:          graph.node(from).id.clone(),
            to:            graph.node(to).id.clone(),
            introduced_by: graph
                .edges_between(from, to)
                .map(|e| (e.introduced_by.clone(), e.relation))
                .collect(),
        })
        .collect();

    Cycle {
        members: members.iter().map(|&i| graph.node(i).id.clone()).collect(),
        path:    path.iter().map(|&i| graph.node(i).id.clone()).collect(),
        edges,
    }
}

/// Shortest loop from the component's first member back to itself (BFS),
/// staying inside the component.
fn loop_through(graph: &DependencyGraph, members: &[usize]) -> Vec<usize> {
    let start = members[0];
    let inside: BTreeSet<usize> = members.iter().copied().collect();
    let mut parent: Vec<Option<usize>> = vec![None; graph.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(start);

    while let Some(v) = queue.pop_front() {
        for w in graph.successors(v) {
            if w == start {
                // Walk parents back to the start.
                let mut path = vec![v];
                let mut cur = v;
                while cur != start {
                    // Every dequeued node other than `start` has a parent.
                    let Some(p) = parent[cur] else { break };
                    path.push(p);
                    cur = p;
                }
                path.reverse();
                return path;
            }
            if inside.contains(&w) && parent[w].is_none() && w != start {
                parent[w] = Some(v);
                queue.push_back(w);
            }
        }
    }

    // Unreachable for a genuine component; fall back to the member list.
    members.to_vec()
}

struct Tarjan<'g> {
    graph:      &'g DependencyGraph,
    index:      Vec<Option<usize>>,
    low:        Vec<usize>,
    on_stack:   Vec<bool>,
    stack:      Vec<usize>,
    next:       usize,
    components: Vec<Vec<usize>>,
}

impl<'g> Tarjan<'g> {
    fn new(graph: &'g DependencyGraph) -> Self {
        let n = graph.len();
        Self {
            graph,
            index:      vec![None; n],
            low:        vec![0; n],
            on_stack:   vec![false; n],
            stack:      Vec::with_capacity(n),
            next:       0,
            components: Vec::new(),
        }
    }

    fn enter(&mut self, v: usize) {
        self.index[v] = Some(self.next);
        self.low[v] = self.next;
        self.next += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }

    /// Depth-first search from `root` on an explicit frame stack, so chain
    /// length is bounded by the heap rather than the call stack.  A frame is
    /// `(node, its successors, next successor to look at)`.
    fn visit(&mut self, root: usize) {
        let mut frames: Vec<(usize, Vec<usize>, usize)> = Vec::new();
        self.enter(root);
        frames.push((root, self.graph.successors(root).collect(), 0));

        while let Some((v, successors, next)) = frames.last_mut() {
            let v = *v;
            let w = successors.get(*next).copied();
            *next += 1;

            if let Some(w) = w {
                match self.index[w] {
                    None => {
                        self.enter(w);
                        frames.push((w, self.graph.successors(w).collect(), 0));
                    }
                    Some(iw) if self.on_stack[w] => {
                        self.low[v] = self.low[v].min(iw);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _, _)) = frames.last() {
                self.low[parent] = self.low[parent].min(self.low[v]);
            }

            if Some(self.low[v]) == self.index[v] {
                let mut component = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}
