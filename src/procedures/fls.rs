/*!
Failed-lineral search.

A root whose descendants include its own σ-pair is *failed*: asserting its
label forces some lineral and its complement at once, so the complement of
the root's label is implied. The trivial search detects exactly this by
depth-first search from each root, refined by the ancestor intersection of
the root and its σ-pair. The component-restricted variant only tries
roots sharing a weakly connected component with their σ-pair. The full
search accumulates, along a reverse topological order, the linear span
implied by each vertex, and intersects each span with that of the σ-pair.
*/

use crate::context::GenericContext;
use crate::graph::SkewGraph;
use crate::labels::VertexLabels;
use crate::misc::log::targets;
use crate::structures::{intersect, sigma, LinearSystem, Lineral, Vertex};

impl<G: SkewGraph, L: VertexLabels> GenericContext<G, L> {
    /// Trivial failed-lineral search from every root.
    pub fn fls_trivial(&self) -> LinearSystem {
        let roots = self.roots();
        self.fls_from_roots(&roots)
    }

    /// Trivial failed-lineral search, restricted to roots whose weak
    /// component contains their σ-pair.
    pub fn fls_trivial_cc(&self) -> LinearSystem {
        let component = self.label_components();
        let roots: Vec<Vertex> = self
            .graph
            .live_vertices()
            .iter()
            .copied()
            .filter(|&v| {
                self.graph.in_degree(v) == 0
                    && component[self.graph.slot(v)] == component[self.graph.slot(sigma(v))]
            })
            .collect();
        self.fls_from_roots(&roots)
    }

    fn fls_from_roots(&self, roots: &[Vertex]) -> LinearSystem {
        let n = self.graph.vertex_count() as usize;

        // forward search: does a root rediscover its own σ-pair?
        let mut failing: Vec<Vertex> = Vec::new();
        let mut marked = vec![false; n];
        let mut mark_root: Vec<Vertex> = vec![0; n];
        let mut stack: Vec<Vertex> = Vec::new();
        for &root in roots {
            stack.push(root);
            while let Some(v) = stack.pop() {
                if marked[self.graph.slot(v)] {
                    continue;
                }
                if marked[self.graph.slot(sigma(v))] && mark_root[self.graph.slot(sigma(v))] == root
                {
                    failing.push(v);
                }
                marked[self.graph.slot(v)] = true;
                mark_root[self.graph.slot(v)] = root;
                for w in self.graph.out_neighbors(v) {
                    if !marked[self.graph.slot(w)] {
                        stack.push(w);
                    }
                }
            }
        }

        // every common ancestor of a failing vertex and its σ-pair is
        // forced to its complement
        let mut failed: Vec<Lineral> = Vec::new();
        let mut ancestor = vec![false; n];
        let mut ancestor_sigma = vec![false; n];
        for &r in &failing {
            ancestor.fill(false);
            ancestor_sigma.fill(false);

            stack.push(r);
            while let Some(v) = stack.pop() {
                if ancestor[self.graph.slot(v)] {
                    continue;
                }
                ancestor[self.graph.slot(v)] = true;
                for w in self.graph.in_neighbors(v) {
                    if !ancestor[self.graph.slot(w)] {
                        stack.push(w);
                    }
                }
            }

            stack.push(sigma(r));
            while let Some(v) = stack.pop() {
                if ancestor_sigma[self.graph.slot(v)] {
                    continue;
                }
                ancestor_sigma[self.graph.slot(v)] = true;
                if ancestor[self.graph.slot(v)] {
                    failed.push(self.labels.label(v).plus_one());
                }
                for w in self.graph.in_neighbors(v) {
                    if !ancestor_sigma[self.graph.slot(w)] {
                        stack.push(w);
                    }
                }
            }
        }
        if !failed.is_empty() {
            log::trace!(target: targets::FLS, "{} failed linerals", failed.len());
        }
        LinearSystem::from_linerals(failed)
    }

    /// Full failed-lineral search: per-vertex downward spans with pairwise
    /// σ intersection.
    pub fn fls_full(&self) -> LinearSystem {
        let n = self.graph.vertex_count() as usize;
        let order = self.topological_order();

        let mut found: Vec<Lineral> = Vec::new();
        let mut spans: Vec<LinearSystem> = vec![LinearSystem::new(); n];
        for &v in order.iter().rev() {
            let label = self.labels.label(v);
            spans[self.graph.slot(v)].insert(label.clone());
            let span = spans[self.graph.slot(v)].clone();
            for w in self.graph.in_neighbors(v) {
                spans[self.graph.slot(w)].union(&span);
            }
            if !spans[self.graph.slot(v)].is_consistent() {
                found.push(label.plus_one());
            }
        }

        let mut handled = vec![false; n];
        for &v in self.graph.live_vertices() {
            if handled[self.graph.slot(sigma(v))] {
                continue;
            }
            handled[self.graph.slot(v)] = true;
            let shared = intersect(&spans[self.graph.slot(v)], &spans[self.graph.slot(sigma(v))]);
            if !shared.is_empty() {
                log::trace!(target: targets::FLS, "{} linerals implied both ways", shared.len());
                found.extend(shared);
            }
        }
        LinearSystem::from_linerals(found)
    }
}
