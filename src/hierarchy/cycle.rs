//! Cycle detection over the reporting graph (DFS coloring).

use crate::hierarchy::graph::HierarchyGraph;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    /// On the active DFS path.
    Temp,
    /// Subtree fully explored.
    Perm,
}

/// Traversal state owned by one detection pass.
struct Traversal<'g, 'a> {
    graph: &'g HierarchyGraph<'a>,
    marks: BTreeMap<&'a str, Mark>,
    path: Vec<&'a str>,
    members: Vec<&'a str>,
    reported: BTreeSet<&'a str>,
}

impl<'g, 'a> Traversal<'g, 'a> {
    fn new(graph: &'g HierarchyGraph<'a>) -> Self {
        Self {
            graph,
            marks: BTreeMap::new(),
            path: Vec::new(),
            members: Vec::new(),
            reported: BTreeSet::new(),
        }
    }

    fn enter(&mut self, v: &'a str) {
        self.marks.insert(v, Mark::Temp);
        self.path.push(v);
    }

    /// Depth-first walk from `start`. Frames are (node, next child index) on
    /// the heap; chain depth is not limited by the thread stack.
    fn dfs(&mut self, start: &'a str) {
        let graph = self.graph;
        let mut frames: Vec<(&'a str, usize)> = vec![(start, 0)];
        self.enter(start);

        while let Some(frame) = frames.last_mut() {
            let (v, next) = *frame;
            let kids = graph.children(v);
            let Some(&k) = kids.get(next) else {
                frames.pop();
                self.path.pop();
                self.marks.insert(v, Mark::Perm);
                continue;
            };
            frame.1 += 1;

            match self.marks.get(k).copied() {
                Some(Mark::Perm) => {}
                Some(Mark::Temp) => self.close_cycle(k),
                None => {
                    self.enter(k);
                    frames.push((k, 0));
                }
            }
        }
    }

    /// `k` is on the active path: everything from `k` to the path's end loops.
    fn close_cycle(&mut self, k: &'a str) {
        let Some(start) = self.path.iter().position(|n| *n == k) else {
            return;
        };
        tracing::debug!(cycle = %self.path[start..].join(" -> "), "cycle detected");
        for &n in &self.path[start..] {
            if self.reported.insert(n) {
                self.members.push(n);
            }
        }
    }
}

/// Emails of every node lying on a cycle, in discovery order.
///
/// One DFS is started from each node not yet visited, in graph node order,
/// so disjoint cycles are all found and the result is deterministic.
pub fn find_cycle_members<'a>(graph: &HierarchyGraph<'a>) -> Vec<&'a str> {
    let mut t = Traversal::new(graph);
    for &n in graph.nodes() {
        if !t.marks.contains_key(n) {
            t.dfs(n);
        }
    }
    t.members
}
