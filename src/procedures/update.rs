/*!
Propagating a new linear system into the graph.

Every live vertex label is reduced by the system. A label that collapses
onto one already present queues a merge of the two vertices; merges run
after the sweep. If the zero label is realized afterwards, everything the
zero vertex reaches is implied outright: the reachable labels are
collected into the returned system and their vertices leave the graph.
Reaching a vertex and its σ-pair both means the constant 1 is implied and
the current level is inconsistent.

The per-vertex reductions are independent of one another, so the sweep
could run in parallel with per-thread merge queues; the merge pass itself
is sequential.
*/

use std::collections::{HashSet, VecDeque};

use crate::context::GenericContext;
use crate::graph::SkewGraph;
use crate::labels::VertexLabels;
use crate::misc::log::targets;
use crate::structures::{sigma, LinearSystem, Lineral, Vertex};

impl<G: SkewGraph, L: VertexLabels> GenericContext<G, L> {
    /// Reduces all vertex labels by `system`, merges vertices whose labels
    /// became equal, and returns the system of linerals implied by a
    /// realized zero label.
    pub fn update_graph(&mut self, system: &LinearSystem) -> LinearSystem {
        debug_assert!(system.is_consistent());
        self.counters.graph_updates += 1;
        self.counters.update_vertices_seen += u64::from(self.graph.vertex_count());
        self.counters.update_rows_seen += system.size() as u64;

        if system.size() == 0 || self.is_cancelled() {
            return LinearSystem::new();
        }

        let dl = self.decision_level();

        // sweep: reduce each stored label, queueing merges for collapses
        let live: Vec<Vertex> = self.graph.live_vertices().to_vec();
        let mut merges: Vec<(Vertex, Vertex)> = Vec::new();
        for v in live {
            if !self.labels.has_vertex(v) {
                continue;
            }
            let mut label = self.labels.label(v);
            if label.reduce(system) {
                self.counters.vertex_updates += 1;
                let (holder, flipped) = self.labels.update(v, label, dl);
                let target = if flipped { sigma(holder) } else { holder };
                if target != v {
                    merges.push((target, v));
                }
            }
        }
        for (target, v) in merges {
            self.graph.merge(target, v);
        }

        // zero-label extraction
        let mut derived: Vec<Lineral> = Vec::new();
        if let Some(zero) = self.labels.zero_vertex() {
            log::trace!(target: targets::UPDATE, "zero label at vertex {zero}");
            let mut marked: HashSet<Vertex> = HashSet::new();
            let mut queue: VecDeque<Vertex> = VecDeque::new();
            marked.insert(zero);
            queue.push_back(zero);
            while let Some(v) = queue.pop_front() {
                // l and l + 1 both reachable: the level is inconsistent
                if marked.contains(&sigma(v)) {
                    derived.push(Lineral::one());
                    break;
                }
                debug_assert!(self.labels.has_pair(v));
                derived.push(self.labels.label(v));
                for w in self.graph.out_neighbors(v) {
                    if marked.insert(w) {
                        queue.push_back(w);
                    }
                }
                debug_assert!(self.graph.is_live(v));
                self.graph.remove_vertex(v);
                let stored = if self.labels.has_vertex(v) { v } else { sigma(v) };
                self.labels.erase(stored);
            }
        }

        LinearSystem::from_linerals(derived)
    }
}
