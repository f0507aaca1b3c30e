/*!
The context: the implication graph and everything a solve needs around it.

Strictly, a [GenericContext] and a [Context]. The generic context is
parameterized by the graph and label-store representations; [Context]
fixes them to the build-time defaults (cargo features `lhgr` and `trie`
swap in the lean-hybrid graph and the trie store).

A context owns:

- the skew-symmetric graph and a stack of its snapshots,
- the vertex-label store and a stack of its snapshots,
- a stack of lists of linear systems, where the outer stack is indexed by
  decision level and each level's list holds every system asserted at that
  level in derivation order,
- the per-variable activity scores,
- the configuration, the counters, and the cancellation flag.

The three stacks move in lock-step: a decision pushes onto each, a
backtrack pops each.
*/

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::graph::SkewGraph;
use crate::labels::VertexLabels;
use crate::structures::{LinearSystem, Var};

mod counters;
pub use counters::Counters;

#[cfg(not(feature = "lhgr"))]
type DefaultGraph = crate::graph::AdjacencyGraph;
#[cfg(feature = "lhgr")]
type DefaultGraph = crate::graph::LeanGraph;

#[cfg(not(feature = "trie"))]
type DefaultLabels = crate::labels::HashLabels;
#[cfg(feature = "trie")]
type DefaultLabels = crate::labels::TrieLabels;

/// A context over the build-time default representations.
pub type Context = GenericContext<DefaultGraph, DefaultLabels>;

/// The generic context.
pub struct GenericContext<G: SkewGraph, L: VertexLabels> {
    /// The implication graph.
    pub graph: G,

    /// The vertex ↔ lineral store.
    pub labels: L,

    /// Graph snapshots, one per decision level.
    pub(crate) graph_stack: Vec<G::Snapshot>,

    /// Label-store snapshots, one per decision level.
    pub(crate) label_stack: Vec<L::Snapshot>,

    /// Linear systems per decision level, in derivation order.
    pub(crate) systems: Vec<Vec<LinearSystem>>,

    /// Per-variable activity, strictly positive.
    pub(crate) activity: Vec<u32>,

    /// Added to a leading term's activity on conflict.
    pub(crate) bump: u32,

    /// Multiplied into every activity after a conflict, rounding up.
    pub(crate) decay: f64,

    /// The witness, once a solve returned satisfiable.
    pub(crate) solution: Option<Vec<bool>>,

    pub config: Config,

    pub counters: Counters,

    /// Cooperative cancellation, set by an external observer.
    pub(crate) cancelled: Arc<AtomicBool>,
}

impl<G: SkewGraph, L: VertexLabels> GenericContext<G, L> {
    /// The current decision level.
    pub fn decision_level(&self) -> u32 {
        debug_assert!(!self.graph_stack.is_empty());
        (self.graph_stack.len() - 1) as u32
    }

    /// The newest linear system of the current decision level.
    pub fn current_system(&self) -> &LinearSystem {
        self.systems
            .last()
            .and_then(|level| level.last())
            .expect("a level always holds at least one system")
    }

    /// Whether the newest system of the current level is consistent.
    pub fn is_consistent(&self) -> bool {
        self.current_system().is_consistent()
    }

    /// Appends a freshly derived system to the current decision level.
    pub(crate) fn push_system(&mut self, system: LinearSystem) {
        self.systems
            .last_mut()
            .expect("at least the root level exists")
            .push(system);
    }

    /// Takes the newest system out of the current level; pair with
    /// [put_back_system](Self::put_back_system).
    pub(crate) fn take_current_system(&mut self) -> LinearSystem {
        std::mem::take(
            self.systems
                .last_mut()
                .and_then(|level| level.last_mut())
                .expect("a level always holds at least one system"),
        )
    }

    pub(crate) fn put_back_system(&mut self, system: LinearSystem) {
        *self
            .systems
            .last_mut()
            .and_then(|level| level.last_mut())
            .expect("a level always holds at least one system") = system;
    }

    /// The witness of the last satisfiable solve.
    pub fn witness(&self) -> Option<&[bool]> {
        self.solution.as_deref()
    }

    /// The shared cancellation flag; setting it makes the solver return
    /// indefinite within one loop iteration.
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Raises the activity of every pivot leading term of `system`.
    pub(crate) fn bump_activity(&mut self, system: &LinearSystem) {
        for (&lt, _) in system.pivots() {
            self.activity[lt as usize] += self.bump;
        }
    }

    /// Decays all activities, keeping every score strictly positive.
    pub(crate) fn decay_activity(&mut self) {
        for score in &mut self.activity {
            *score = (f64::from(*score) * self.decay).ceil() as u32;
        }
    }

    pub(crate) fn activity_of(&self, lt: Var) -> u32 {
        self.activity[lt as usize]
    }
}
