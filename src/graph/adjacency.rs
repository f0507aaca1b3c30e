/*!
Adjacency-set representation of a skew-symmetric graph.

Successor sets give O(log deg) edge queries and straightforward mutation;
a snapshot is a value copy of the adjacency together with the live counts.
The live-vertex list `l` and its inverse `il` are *not* part of a
snapshot: removals only ever swap vertices past the live boundary, so
restoring the boundary revives exactly the removed set.
*/

use std::collections::BTreeSet;

use crate::graph::SkewGraph;
use crate::structures::{sigma, Vertex};

/// Skew-symmetric graph over successor sets.
#[derive(Clone, Debug)]
pub struct AdjacencyGraph {
    /// Live vertex count.
    no_v: u32,

    /// Live edge count.
    no_e: u32,

    /// Vertex list; the live vertices occupy the prefix `..no_v`.
    l: Vec<Vertex>,

    /// Position of each vertex in `l`.
    il: Vec<u32>,

    /// Successor sets.
    out: Vec<BTreeSet<Vertex>>,
}

/// State for [restore](SkewGraph::restore).
#[derive(Clone, Debug)]
pub struct AdjacencySnapshot {
    no_v: u32,
    no_e: u32,
    out: Vec<BTreeSet<Vertex>>,
}

impl AdjacencyGraph {
    /// Swaps `v` out of the live prefix.
    fn deactivate(&mut self, v: Vertex) {
        self.no_v -= 1;
        let i = self.il[v as usize] as usize;
        let j = self.no_v as usize;
        self.l.swap(i, j);
        let (a, b) = (self.l[i], self.l[j]);
        self.il.swap(a as usize, b as usize);
    }
}

impl SkewGraph for AdjacencyGraph {
    type Snapshot = AdjacencySnapshot;

    fn from_edges(edges: &[(Vertex, Vertex)], vertex_count: u32) -> Self {
        debug_assert!(vertex_count % 2 == 0);
        let n = vertex_count as usize;
        let mut graph = AdjacencyGraph {
            no_v: vertex_count,
            no_e: 0,
            l: (0..vertex_count).collect(),
            il: (0..vertex_count).collect(),
            out: vec![BTreeSet::new(); n],
        };
        for &(src, dst) in edges {
            if !graph.out[src as usize].insert(dst) {
                continue;
            }
            graph.no_e += 1;
            if sigma(dst) != src && graph.out[sigma(dst) as usize].insert(sigma(src)) {
                graph.no_e += 1;
            }
        }
        debug_assert!(graph.check_invariants());
        graph
    }

    fn vertex_count(&self) -> u32 {
        self.no_v
    }

    fn edge_count(&self) -> u32 {
        self.no_e
    }

    fn live_vertices(&self) -> &[Vertex] {
        &self.l[..self.no_v as usize]
    }

    fn slot(&self, v: Vertex) -> usize {
        self.il[v as usize] as usize
    }

    fn is_live(&self, v: Vertex) -> bool {
        self.il[v as usize] < self.no_v
    }

    fn out_degree(&self, v: Vertex) -> u32 {
        self.out[v as usize].len() as u32
    }

    fn in_degree(&self, v: Vertex) -> u32 {
        self.out[sigma(v) as usize].len() as u32
    }

    fn out_neighbors(&self, v: Vertex) -> Vec<Vertex> {
        self.out[v as usize].iter().copied().collect()
    }

    fn in_neighbors(&self, v: Vertex) -> Vec<Vertex> {
        self.out[sigma(v) as usize].iter().map(|&w| sigma(w)).collect()
    }

    fn snapshot(&self) -> AdjacencySnapshot {
        AdjacencySnapshot {
            no_v: self.no_v,
            no_e: self.no_e,
            out: self.out.clone(),
        }
    }

    fn restore(&mut self, snapshot: AdjacencySnapshot) {
        self.no_v = snapshot.no_v;
        self.no_e = snapshot.no_e;
        self.out = snapshot.out;
        debug_assert!(self.check_invariants());
    }

    fn remove_edge(&mut self, u: Vertex, v: Vertex) {
        let removed = self.out[u as usize].remove(&v);
        debug_assert!(removed);
        self.no_e -= 1;
        if self.out[sigma(v) as usize].remove(&sigma(u)) {
            self.no_e -= 1;
        }
    }

    fn remove_all_edges(&mut self, v: Vertex) {
        let dsts: Vec<Vertex> = self.out[v as usize].iter().copied().collect();
        for dst in dsts {
            if sigma(dst) != v {
                let removed = self.out[sigma(dst) as usize].remove(&sigma(v));
                debug_assert!(removed);
                self.no_e -= 1;
            }
        }
        self.no_e -= self.out[v as usize].len() as u32;
        self.out[v as usize].clear();
    }

    fn remove_vertex(&mut self, v: Vertex) {
        for x in [v, sigma(v)] {
            self.deactivate(x);
            self.remove_all_edges(x);
        }
    }

    fn merge(&mut self, v1: Vertex, v2: Vertex) {
        if v1 == v2 || self.il[v1 as usize] >= self.no_v || self.il[v2 as usize] >= self.no_v {
            return;
        }
        self.deactivate(v2);
        if sigma(v2) != v1 {
            self.deactivate(sigma(v2));
        }

        // bend the incoming edges of v2 towards v1
        for u in self.in_neighbors(v2) {
            self.out[u as usize].remove(&v2);
            if !self.out[u as usize].insert(v1) {
                self.no_e -= 1;
            }
        }
        if sigma(v2) != v1 {
            for u in self.in_neighbors(sigma(v2)) {
                self.out[u as usize].remove(&sigma(v2));
                if !self.out[u as usize].insert(sigma(v1)) {
                    self.no_e -= 1;
                }
            }
        }

        // fold the outgoing edges of v2 into v1, coalescing duplicates and
        // dropping arising self-loops
        let out2 = std::mem::take(&mut self.out[v2 as usize]);
        for w in out2 {
            if !self.out[v1 as usize].insert(w) {
                self.no_e -= 1;
            }
        }
        if self.out[v1 as usize].remove(&v1) {
            self.no_e -= 1;
        }
        if sigma(v2) != v1 {
            let out2 = std::mem::take(&mut self.out[sigma(v2) as usize]);
            for w in out2 {
                if !self.out[sigma(v1) as usize].insert(w) {
                    self.no_e -= 1;
                }
            }
            if self.out[sigma(v1) as usize].remove(&sigma(v1)) {
                self.no_e -= 1;
            }
        }
        // merging a complementary pair leaves the skew pairing broken; the
        // caller is about to detect inconsistency and restore
        debug_assert!(sigma(v2) == v1 || self.check_invariants());
    }

    fn check_invariants(&self) -> bool {
        let mut total = 0;
        for &v in self.live_vertices() {
            total += self.out[v as usize].len() as u32;
            for &w in &self.out[v as usize] {
                if self.il[w as usize] >= self.no_v {
                    return false;
                }
                if w == v {
                    return false;
                }
                if !self.out[sigma(w) as usize].contains(&sigma(v)) {
                    return false;
                }
            }
        }
        if total != self.no_e {
            return false;
        }
        self.l
            .iter()
            .enumerate()
            .all(|(i, &v)| self.il[v as usize] as usize == i && self.l[self.il[v as usize] as usize] == v)
    }
}
