/*!
Bidirectional maps between graph vertices and linerals.

Labels are stored *normalized*: a stored lineral never carries a constant
term. The involution absorbs the constant (the vertex for `l + 1` is by
definition σ of the vertex for `l`), so every lookup and update resolves
through σ when a constant is involved.

Two representations implement the one [VertexLabels] contract: a pair of
hash maps ([HashLabels]) and a trie keyed on the reversed index sequence
([TrieLabels]). The choice is a build-time parameter (`trie` cargo
feature); the test suite runs against both.
*/

use crate::structures::{sigma, Lineral, Var, Vertex};

pub mod hash;
pub mod trie;

pub use hash::HashLabels;
pub use trie::TrieLabels;

/// The capability set of a backtrack-capable vertex ↔ lineral store.
pub trait VertexLabels: Sized {
    /// State sufficient to restore the store to the capture point.
    type Snapshot;

    fn with_capacity(vertices: usize, var_count: Var) -> Self;

    /// Number of stored pairs.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Binds `v ↔ label` unless the label already has a vertex.
    ///
    /// Returns `(true, v)` on a fresh binding and `(false, v')` when the
    /// label is already held by `v'` (or when `v` is already bound).
    /// `label` must be normalized.
    fn insert(&mut self, v: Vertex, label: Lineral, dl: u32) -> (bool, Vertex);

    /// Removes the binding of `v`; `v` must be the stored orientation.
    fn erase(&mut self, v: Vertex) -> bool;

    /// Whether `v` is a stored orientation.
    fn has_vertex(&self, v: Vertex) -> bool;

    /// Whether `v` or its σ-pair is a stored orientation.
    fn has_pair(&self, v: Vertex) -> bool {
        self.has_vertex(v) || self.has_vertex(sigma(v))
    }

    /// The label of `v`: the stored lineral, or the σ-pair's stored
    /// lineral plus one.
    fn label(&self, v: Vertex) -> Lineral;

    /// Leading term of the label of `v` (shared with its σ-pair).
    fn leading_term(&self, v: Vertex) -> Var;

    /// The vertex of `l`; when `l` was stored with its constant flipped
    /// the lookup resolves to σ of the stored vertex.
    fn vertex(&self, l: &Lineral) -> Option<Vertex>;

    fn contains_label(&self, l: &Lineral) -> bool {
        self.vertex(l).is_some()
    }

    /// The vertex holding the zero label, if any. The one-labelled vertex
    /// is its σ-pair.
    fn zero_vertex(&self) -> Option<Vertex>;

    /// `label(v1) + label(v2)`.
    fn sum(&self, v1: Vertex, v2: Vertex) -> Lineral {
        &self.label(v1) + &self.label(v2)
    }

    /// Rebinds `v` to `label`, normalizing first: with a constant present
    /// the normalized lineral belongs to σ(v).
    ///
    /// Returns `(v*, flipped)` where `v*` now holds the normalized label.
    /// The vertex representing `label` itself is `σ(v*)` when `flipped`.
    fn update(&mut self, v: Vertex, label: Lineral, dl: u32) -> (Vertex, bool) {
        debug_assert!(self.has_vertex(v));
        self.erase(v);
        let flipped = label.has_constant();
        let (target, normalized) = if flipped {
            (sigma(v), label.plus_one())
        } else {
            (v, label)
        };
        let (_, holder) = self.insert(target, normalized, dl);
        (holder, flipped)
    }

    /// Captures the current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Returns the store to the captured state at decision level `dl`.
    fn restore(&mut self, snapshot: Self::Snapshot, dl: u32);
}
