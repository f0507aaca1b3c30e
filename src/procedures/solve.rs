/*!
The crGCP fixed point and the DPLL loop.

crGCP interleaves three deduction paths until none makes progress: graph
update against the newest asserted system, SCC contraction, and the
scheduled failed-lineral search. Afterwards either the current level is
inconsistent, or the graph is a DAG with singleton components and no
realized zero label.

The DPLL loop alternates crGCP with decisions. A conflict at level 0 is
unsatisfiability; a conflict above bumps the activity of the level's
leading terms, pops the snapshot stacks, and asserts the saved
alternative, so backtracking is strictly chronological. With no edges left
and a consistent system the formula is satisfiable and the witness is
assembled by back-substitution through the level stack, innermost level
first, each level's systems in reverse derivation order.
*/

use std::time::Instant;

use crate::config::{FlsMode, PreprocessMode, Scoring};
use crate::context::GenericContext;
use crate::graph::SkewGraph;
use crate::labels::VertexLabels;
use crate::misc::log::targets;
use crate::reports::Report;
use crate::structures::LinearSystem;

/// Outcome of one decision attempt.
enum Branched {
    /// A decision was asserted and a level pushed.
    Decision,

    /// Both case-split systems were inconsistent, or propagation of a
    /// forced half ran into a conflict.
    Conflict,

    /// Propagation of forced halves emptied the graph.
    Solved,
}

impl<G: SkewGraph, L: VertexLabels> GenericContext<G, L> {
    /// Runs crGCP with the configured failed-lineral search and schedule.
    pub fn crgcp(&mut self) {
        self.crgcp_with(self.config.fls, true);
    }

    /// Runs crGCP to a fixed point.
    pub fn crgcp_with(&mut self, fls: FlsMode, scheduled: bool) {
        if !self.is_consistent() {
            return;
        }
        self.counters.gcp_rounds += 1;

        loop {
            let mut progress = false;

            // propagate newly asserted systems through the graph
            loop {
                let system = self.take_current_system();
                let delta = self.update_graph(&system);
                self.put_back_system(system);
                if delta.size() == 0 {
                    break;
                }
                log::trace!(target: targets::GCP, "deduced {} new eqs (update)", delta.size());
                self.counters.eqs_from_update += delta.size() as u64;
                let consistent = delta.is_consistent();
                self.push_system(delta);
                progress = true;
                if !consistent {
                    return;
                }
            }

            // contract strongly connected components
            let scc = self.scc_analysis();
            if scc.size() > 0 {
                log::trace!(target: targets::GCP, "deduced {} new eqs (scc)", scc.size());
                self.counters.eqs_from_scc += scc.size() as u64;
                let consistent = scc.is_consistent();
                self.push_system(scc);
                if !consistent {
                    return;
                }
                continue;
            }

            // failed-lineral search, on schedule
            let period = self.config.fls_schedule.max(1);
            if !scheduled || self.counters.gcp_rounds % u64::from(period) == 0 {
                let found = match fls {
                    FlsMode::No => LinearSystem::new(),
                    FlsMode::Trivial => self.fls_trivial(),
                    FlsMode::TrivialCc => self.fls_trivial_cc(),
                    FlsMode::Full => self.fls_full(),
                };
                if found.size() > 0 {
                    log::trace!(target: targets::GCP, "deduced {} new eqs (fls)", found.size());
                    self.counters.eqs_from_fls += found.size() as u64;
                    let consistent = found.is_consistent();
                    self.push_system(found);
                    progress = true;
                    if !consistent {
                        return;
                    }
                }
            }

            if !progress {
                break;
            }
        }
        debug_assert!(!self.is_consistent() || self.is_dag());
    }

    /// The construction-time preprocessing round.
    pub fn preprocess(&mut self) {
        let fls = match self.config.preprocess {
            PreprocessMode::No => return,
            PreprocessMode::Scc => FlsMode::No,
            PreprocessMode::FlsScc | PreprocessMode::FlsSccEe => FlsMode::Full,
        };
        log::info!(target: targets::PREPROCESSING, "preprocess '{}'", self.config.preprocess);
        self.crgcp_with(fls, false);
    }

    /// Decides satisfiability of the context.
    pub fn solve(&mut self) -> Report {
        let timer = Instant::now();
        let report = self.dpll();
        self.counters.time = timer.elapsed();
        report
    }

    fn dpll(&mut self) -> Report {
        log::info!(target: targets::GCP, "dpll solving start");
        if !self.is_consistent() {
            return Report::Unsatisfiable;
        }

        // saved alternatives of the decisions on the trail
        let mut alternatives: Vec<LinearSystem> = Vec::new();

        self.crgcp();

        while self.graph.edge_count() > 0 || !self.is_consistent() {
            if self.is_cancelled() {
                log::info!(target: targets::GCP, "cancelled");
                return Report::Indefinite;
            }

            if !self.is_consistent() {
                self.counters.conflicts += 1;
                if self.decision_level() == 0 {
                    return Report::Unsatisfiable;
                }
                self.retreat(&mut alternatives);
            } else {
                match self.branch(&mut alternatives) {
                    Branched::Decision => {}
                    Branched::Solved => break,
                    Branched::Conflict => {
                        self.counters.conflicts += 1;
                        if self.decision_level() == 0 {
                            return Report::Unsatisfiable;
                        }
                        self.retreat(&mut alternatives);
                    }
                }
            }

            self.crgcp();
        }

        self.assemble_solution()
    }

    /// Asks the heuristic for a case split. Forced halves (one side
    /// inconsistent) are asserted in place without opening a level; a
    /// genuine split pushes the snapshots and saves the alternative.
    fn branch(&mut self, alternatives: &mut Vec<LinearSystem>) -> Branched {
        let (mut chosen, mut alternative) = self.decide();

        while !chosen.is_consistent() || !alternative.is_consistent() {
            if chosen.is_consistent() {
                self.push_system(chosen);
            } else if alternative.is_consistent() {
                self.push_system(alternative);
            } else {
                return Branched::Conflict;
            }
            log::trace!(
                target: targets::DECISION,
                "forced half asserted, {} eqs",
                self.current_system().size()
            );
            self.crgcp();
            if !self.is_consistent() {
                return Branched::Conflict;
            }
            if self.graph.edge_count() == 0 {
                return Branched::Solved;
            }
            (chosen, alternative) = self.decide();
        }

        self.counters.decisions += 1;
        let level = self.decision_level() + 1;
        log::debug!(
            target: targets::DECISION,
            "{level}: decision {} with {} or {} eqs",
            self.counters.decisions,
            chosen.size(),
            alternative.size()
        );
        self.graph_stack.push(self.graph.snapshot());
        self.label_stack.push(self.labels.snapshot());
        self.systems.push(Vec::new());
        self.push_system(chosen);
        alternatives.push(alternative);
        Branched::Decision
    }

    /// Chronological backtrack by one level, asserting the saved
    /// alternative at the surviving level.
    fn retreat(&mut self, alternatives: &mut Vec<LinearSystem>) {
        log::debug!(
            target: targets::BACKTRACK,
            "{}: conflict, backtracking",
            self.decision_level()
        );
        debug_assert!(self.decision_level() > 0);

        let level = self.systems.pop().expect("a level above the root");
        if self.config.scoring == Scoring::Active {
            for system in &level {
                self.bump_activity(system);
            }
            self.decay_activity();
        }

        let new_dl = self.decision_level() - 1;
        let label_snapshot = self.label_stack.pop().expect("paired with the level");
        self.labels.restore(label_snapshot, new_dl);
        let graph_snapshot = self.graph_stack.pop().expect("paired with the level");
        self.graph.restore(graph_snapshot);

        let alternative = alternatives.pop().expect("paired with the level");
        self.push_system(alternative);
    }

    /// Back-substitutes through the level stack into a full witness.
    fn assemble_solution(&mut self) -> Report {
        let mut sol = vec![false; self.config.var_count as usize];
        for level in self.systems.iter().rev() {
            for system in level.iter().rev() {
                system.solve(&mut sol);
            }
        }

        // map the witness back through the guessing-path permutation
        if !self.config.reordering.is_empty() {
            let mut reordered = sol.clone();
            for i in 1..=self.config.var_count {
                reordered[(i - 1) as usize] = sol[(self.config.reordering.at(i) - 1) as usize];
            }
            sol = reordered;
        }

        self.solution = Some(sol);
        Report::Satisfiable
    }
}
