/*!
Decision heuristics.

Every heuristic returns a pair `(D, D̄)` of linear systems whose
disjunction is a tautology: the solver asserts `D`, and on backtrack
asserts `D̄`, so the case split is exhausted. The graph is a DAG with
singleton components when a decision is asked for, crGCP having run to a
fixed point.
*/

use crate::config::{DecisionHeuristic, Scoring};
use crate::context::GenericContext;
use crate::graph::SkewGraph;
use crate::labels::VertexLabels;
use crate::misc::log::targets;
use crate::structures::{sigma, LinearSystem, Lineral, Vertex};

impl<G: SkewGraph, L: VertexLabels> GenericContext<G, L> {
    /// The configured heuristic.
    pub fn decide(&self) -> (LinearSystem, LinearSystem) {
        match self.config.decision {
            DecisionHeuristic::FirstVert => self.decide_first_vert(),
            DecisionHeuristic::MaxPath => match self.config.scoring {
                Scoring::Active => self.decide_max_score_path(),
                Scoring::Inactive => self.decide_max_path(),
            },
            DecisionHeuristic::MaxReach => self.decide_max_reach(),
            DecisionHeuristic::MaxBottleneck => self.decide_max_bottleneck(),
            DecisionHeuristic::Lex => self.decide_lex(),
        }
    }

    /// Branch on the leading term of the first live vertex carrying one.
    pub fn decide_first_vert(&self) -> (LinearSystem, LinearSystem) {
        let mut lt = 0;
        let mut i = 0;
        while lt == 0 {
            debug_assert!(i < self.graph.vertex_count() as usize);
            lt = self.labels.leading_term(self.graph.live_vertices()[i]);
            i += 1;
        }
        let guess = Lineral::from_var(lt);
        (
            LinearSystem::from_lineral(guess.clone()),
            LinearSystem::from_lineral(guess.plus_one()),
        )
    }

    /// Branch on the vertex with the heaviest forward cone: assert the
    /// whole cone, or on backtrack the complemented backward cone.
    pub fn decide_max_reach(&self) -> (LinearSystem, LinearSystem) {
        let n = self.graph.vertex_count() as usize;
        let order = self.topological_order();

        let mut score: Vec<u64> = vec![1; n];
        if self.config.scoring == Scoring::Active {
            for &v in self.graph.live_vertices() {
                score[self.graph.slot(v)] = u64::from(self.activity_of(self.labels.leading_term(v)));
            }
        }

        let mut best = self.graph.live_vertices()[0];
        for &v in order.iter().rev() {
            for w in self.graph.out_neighbors(v) {
                score[self.graph.slot(v)] += score[self.graph.slot(w)];
            }
            if score[self.graph.slot(v)] > score[self.graph.slot(best)] {
                best = v;
            }
        }

        (self.cone_system(best, true), self.cone_system(best, false))
    }

    /// Branch on the vertex maximizing in-cone plus out-cone score.
    pub fn decide_max_bottleneck(&self) -> (LinearSystem, LinearSystem) {
        let n = self.graph.vertex_count() as usize;
        let order = self.topological_order();

        let mut in_score: Vec<u64> = vec![1; n];
        let mut out_score: Vec<u64> = vec![1; n];
        for &v in self.graph.live_vertices() {
            let activity = u64::from(self.activity_of(self.labels.leading_term(v)));
            in_score[self.graph.slot(v)] = activity;
            out_score[self.graph.slot(v)] = activity;
        }

        for &v in order.iter() {
            for w in self.graph.in_neighbors(v) {
                in_score[self.graph.slot(v)] += in_score[self.graph.slot(w)];
            }
        }
        let mut best = self.graph.live_vertices()[0];
        for &v in order.iter().rev() {
            for w in self.graph.out_neighbors(v) {
                out_score[self.graph.slot(v)] += out_score[self.graph.slot(w)];
            }
            let total = in_score[self.graph.slot(v)] + out_score[self.graph.slot(v)];
            if total > in_score[self.graph.slot(best)] + out_score[self.graph.slot(best)] {
                best = v;
            }
        }

        (self.cone_system(best, true), self.cone_system(best, false))
    }

    /// Branch on closing the longest path into a cycle, against pinning
    /// its endpoints.
    pub fn decide_max_path(&self) -> (LinearSystem, LinearSystem) {
        if self.graph.edge_count() == 0 {
            return self.decide_first_vert();
        }
        let n = self.graph.vertex_count() as usize;
        let order = self.topological_order();

        let mut length: Vec<u32> = vec![1; n];
        let mut next: Vec<Vertex> = vec![0; n];
        let mut best = self.graph.live_vertices()[0];
        for &v in order.iter().rev() {
            if self.graph.out_degree(v) == 0 {
                next[self.graph.slot(v)] = v;
            }
            for w in self.graph.out_neighbors(v) {
                if length[self.graph.slot(w)] + 1 > length[self.graph.slot(v)] {
                    length[self.graph.slot(v)] = length[self.graph.slot(w)] + 1;
                    next[self.graph.slot(v)] = w;
                }
            }
            if length[self.graph.slot(v)] > length[self.graph.slot(best)] {
                best = v;
            }
        }
        debug_assert!(length[self.graph.slot(best)] > 1);
        log::trace!(
            target: targets::DECISION,
            "chosen path has length {}",
            length[self.graph.slot(best)]
        );

        self.path_split(best, &next, length[self.graph.slot(best)])
    }

    /// Branch on closing the path of highest accumulated activity.
    pub fn decide_max_score_path(&self) -> (LinearSystem, LinearSystem) {
        if self.graph.edge_count() == 0 {
            return self.decide_first_vert();
        }
        let n = self.graph.vertex_count() as usize;
        let order = self.topological_order();

        let mut score: Vec<u64> = vec![1; n];
        let mut length: Vec<u32> = vec![1; n];
        let mut next: Vec<Vertex> = vec![0; n];
        let mut best = self.graph.live_vertices()[0];
        for &v in order.iter().rev() {
            let slot = self.graph.slot(v);
            score[slot] = u64::from(self.activity_of(self.labels.leading_term(v)));
            if self.graph.out_degree(v) == 0 {
                next[slot] = v;
            } else {
                let mut best_out = 0;
                for w in self.graph.out_neighbors(v) {
                    if score[self.graph.slot(w)] > best_out {
                        best_out = score[self.graph.slot(w)];
                        next[slot] = w;
                        length[slot] = length[self.graph.slot(w)] + 1;
                    }
                }
                score[slot] += best_out;
            }
            if score[slot] > score[self.graph.slot(best)] {
                best = v;
            }
        }
        log::trace!(
            target: targets::DECISION,
            "chosen path has score {} and length {}",
            score[self.graph.slot(best)],
            length[self.graph.slot(best)]
        );

        if length[self.graph.slot(best)] > 1 {
            self.path_split(best, &next, length[self.graph.slot(best)])
        } else {
            let label = self.labels.label(best);
            (
                LinearSystem::from_lineral(label.plus_one()),
                LinearSystem::from_lineral(label),
            )
        }
    }

    /// Branch on the lexicographically smallest unassigned variable.
    pub fn decide_lex(&self) -> (LinearSystem, LinearSystem) {
        let mut assigned = vec![false; self.config.var_count as usize + 1];
        for level in &self.systems {
            for system in level {
                for (&lt, &row) in system.pivots() {
                    // a variable may pivot a unit row in one system and a
                    // longer row in another; once pinned, it stays pinned
                    if system.row(row).len() == 1 {
                        assigned[lt as usize] = true;
                    }
                }
            }
        }
        for i in 1..=self.config.var_count {
            if !assigned[i as usize] {
                let guess = Lineral::from_var(i);
                return (
                    LinearSystem::from_lineral(guess.clone()),
                    LinearSystem::from_lineral(guess.plus_one()),
                );
            }
        }
        // every variable pinned yet edges remain; fall back
        self.decide_first_vert()
    }

    /// The labels of the forward cone of `v`, or the complemented labels
    /// of its backward cone. A cone reaching some vertex and its σ-pair
    /// collapses to the inconsistent system.
    fn cone_system(&self, start: Vertex, forward: bool) -> LinearSystem {
        let n = self.graph.vertex_count() as usize;
        let mut marked = vec![false; n];
        marked[self.graph.slot(start)] = true;
        let mut stack = vec![start];
        let mut linerals: Vec<Lineral> = Vec::new();
        while let Some(v) = stack.pop() {
            if marked[self.graph.slot(sigma(v))] {
                return LinearSystem::from_lineral(Lineral::one());
            }
            let mut label = self.labels.label(v);
            if !forward {
                label.add_one();
            }
            linerals.push(label);
            let neighbors = if forward {
                self.graph.out_neighbors(v)
            } else {
                self.graph.in_neighbors(v)
            };
            for w in neighbors {
                if !marked[self.graph.slot(w)] {
                    marked[self.graph.slot(w)] = true;
                    stack.push(w);
                }
            }
        }
        LinearSystem::from_linerals(linerals)
    }

    /// The two systems of a path split: the sums along the path (closing
    /// it into a cycle) against start-complemented, end-asserted.
    fn path_split(
        &self,
        start: Vertex,
        next: &[Vertex],
        length: u32,
    ) -> (LinearSystem, LinearSystem) {
        let mut cycle: Vec<Lineral> = Vec::with_capacity(length as usize);
        let mut v = start;
        for _ in 0..length {
            cycle.push(self.labels.sum(v, next[self.graph.slot(v)]));
            v = next[self.graph.slot(v)];
        }
        let no_cycle = LinearSystem::from_linerals(vec![
            self.labels.label(start).plus_one(),
            self.labels.label(v),
        ]);
        (LinearSystem::from_linerals(cycle), no_cycle)
    }
}
