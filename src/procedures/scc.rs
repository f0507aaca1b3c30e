/*!
Graph analyses: Kosaraju SCC contraction, topological order, components,
roots, reachability.

Within a strongly connected component the labels imply one another in a
cycle, so `label(root) + label(v)` vanishes for every member `v`; SCC
analysis emits exactly these rows and contracts each component into its
root. A component containing both a vertex and its σ-pair yields the
constant 1; the level is inconsistent and no contraction happens.

All walks use explicit stacks; the graphs get deep enough that recursion
is not an option.
*/

use std::collections::VecDeque;

use crate::context::GenericContext;
use crate::graph::SkewGraph;
use crate::labels::VertexLabels;
use crate::misc::log::targets;
use crate::structures::{sigma, LinearSystem, Lineral, Vertex};

impl<G: SkewGraph, L: VertexLabels> GenericContext<G, L> {
    /// Kosaraju SCC analysis: emits the component-collapse rows and, when
    /// they are consistent, merges each component into its root.
    pub fn scc_analysis(&mut self) -> LinearSystem {
        let n = self.graph.vertex_count() as usize;
        let mut visited = vec![false; n];
        let mut order: Vec<Vertex> = Vec::with_capacity(n);

        // first pass: finishing order on the forward graph
        let live: Vec<Vertex> = self.graph.live_vertices().to_vec();
        for &root in &live {
            if visited[self.graph.slot(root)] {
                continue;
            }
            visited[self.graph.slot(root)] = true;
            let mut stack: Vec<(Vertex, Vec<Vertex>, usize)> =
                vec![(root, self.graph.out_neighbors(root), 0)];
            while let Some(frame) = stack.last_mut() {
                if frame.2 < frame.1.len() {
                    let w = frame.1[frame.2];
                    frame.2 += 1;
                    if !visited[self.graph.slot(w)] {
                        visited[self.graph.slot(w)] = true;
                        let neighbors = self.graph.out_neighbors(w);
                        stack.push((w, neighbors, 0));
                    }
                } else {
                    order.push(frame.0);
                    stack.pop();
                }
            }
        }

        // second pass: components of the reverse graph in finishing order;
        // the mark array flips meaning, true now reads "not yet collected"
        let mut linerals: Vec<Lineral> = Vec::new();
        let mut merge_list: Vec<(Vertex, Vertex)> = Vec::new();
        while let Some(root) = order.pop() {
            if !visited[self.graph.slot(root)] {
                continue;
            }
            visited[self.graph.slot(root)] = false;
            let mut stack: Vec<Vertex> = vec![root];
            while let Some(v) = stack.pop() {
                if v != root {
                    linerals.push(self.labels.sum(root, v));
                    merge_list.push((root, v));
                }
                for w in self.graph.in_neighbors(v) {
                    if visited[self.graph.slot(w)] {
                        visited[self.graph.slot(w)] = false;
                        stack.push(w);
                    }
                }
            }
            // the mirror component carries the same rows
            visited[self.graph.slot(sigma(root))] = false;
        }

        let system = LinearSystem::from_linerals(linerals);
        if system.is_consistent() {
            for (root, v) in merge_list {
                self.graph.merge(root, v);
                if self.labels.has_vertex(v) {
                    self.labels.erase(v);
                } else if self.labels.has_vertex(sigma(v)) {
                    self.labels.erase(sigma(v));
                }
            }
        } else {
            log::trace!(target: targets::SCC, "inconsistent component found");
        }
        system
    }

    /// A topological order of the live vertices; empty when the graph has
    /// a cycle (or no vertices).
    pub fn topological_order(&self) -> Vec<Vertex> {
        let n = self.graph.vertex_count() as usize;
        let mut in_degree = vec![0u32; n];
        let mut queue: VecDeque<Vertex> = VecDeque::new();
        for &v in self.graph.live_vertices() {
            in_degree[self.graph.slot(v)] = self.graph.in_degree(v);
            if in_degree[self.graph.slot(v)] == 0 {
                queue.push_back(v);
            }
        }

        let mut order = Vec::with_capacity(n);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            for w in self.graph.out_neighbors(v) {
                in_degree[self.graph.slot(w)] -= 1;
                if in_degree[self.graph.slot(w)] == 0 {
                    queue.push_back(w);
                }
            }
        }
        if order.len() < n {
            order.clear();
        }
        order
    }

    pub fn is_dag(&self) -> bool {
        self.graph.vertex_count() == 0 || !self.topological_order().is_empty()
    }

    /// All live vertices without incoming edges.
    pub fn roots(&self) -> Vec<Vertex> {
        self.graph
            .live_vertices()
            .iter()
            .copied()
            .filter(|&v| self.graph.in_degree(v) == 0)
            .collect()
    }

    /// Labels every vertex with the root of its weakly connected
    /// component, indexed by slot.
    pub fn label_components(&self) -> Vec<Vertex> {
        let n = self.graph.vertex_count() as usize;
        let unlabelled = u32::MAX;
        let mut component = vec![unlabelled; n];

        let mut queue: VecDeque<Vertex> = VecDeque::new();
        for &root in self.graph.live_vertices() {
            if component[self.graph.slot(root)] != unlabelled {
                continue;
            }
            queue.push_back(root);
            while let Some(v) = queue.pop_front() {
                if component[self.graph.slot(v)] != unlabelled {
                    continue;
                }
                component[self.graph.slot(v)] = root;
                for w in self.graph.in_neighbors(v) {
                    if component[self.graph.slot(w)] == unlabelled {
                        queue.push_back(w);
                    }
                }
                for w in self.graph.out_neighbors(v) {
                    if component[self.graph.slot(w)] == unlabelled {
                        queue.push_back(w);
                    }
                }
            }
        }
        component
    }

    pub fn connected_component_count(&self) -> u32 {
        let component = self.label_components();
        self.graph
            .live_vertices()
            .iter()
            .filter(|&&v| component[self.graph.slot(v)] == v)
            .count() as u32
    }

    /// Whether there is a path from `src` to `dst`.
    pub fn is_descendant(&self, src: Vertex, dst: Vertex) -> bool {
        if src == dst {
            return true;
        }
        let n = self.graph.vertex_count() as usize;
        let mut seen = vec![false; n];
        seen[self.graph.slot(src)] = true;
        let mut stack = vec![src];
        while let Some(v) = stack.pop() {
            for w in self.graph.out_neighbors(v) {
                if w == dst {
                    return true;
                }
                if !seen[self.graph.slot(w)] {
                    seen[self.graph.slot(w)] = true;
                    stack.push(w);
                }
            }
        }
        false
    }
}
