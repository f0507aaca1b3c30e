/*!
Skew-symmetric directed graphs.

A skew-symmetric graph carries the fixed fixed-point-free involution
σ(v) = v ^ 1 and maintains the invariant that `(u, v)` is an edge exactly
when `(σ(v), σ(u))` is. Only outgoing edges are stored; the incoming edges
of `v` are recovered as `σ(out(σ(v)))`.

Two representations implement the one [SkewGraph] contract:

- [AdjacencyGraph] keeps a set of successors per vertex and snapshots by
  value.
- [LeanGraph] keeps physical edge vectors with live-degree prefixes,
  inverse edge indices tying symmetric pairs, and per-color member lists,
  so that a snapshot is two flat vectors.

The choice between them is a build-time parameter (`lhgr` cargo feature);
both must pass the same external contract and the test suite runs against
both.
*/

use crate::structures::Vertex;

pub mod adjacency;
pub mod lean;

pub use adjacency::AdjacencyGraph;
pub use lean::LeanGraph;

/// The capability set of a skew-symmetric graph with O(deg) vertex merging
/// and snapshot-based backtracking.
pub trait SkewGraph: Sized {
    /// State sufficient to restore the graph to the capture point.
    type Snapshot;

    /// Builds a graph from an edge list over vertices `0..vertex_count`
    /// (`vertex_count` even). The skew-symmetric partner of every edge is
    /// added implicitly; the list must be free of duplicates and of pairs
    /// that are partners of one another.
    fn from_edges(edges: &[(Vertex, Vertex)], vertex_count: u32) -> Self;

    /// Number of live vertices.
    fn vertex_count(&self) -> u32;

    /// Number of live edges.
    fn edge_count(&self) -> u32;

    /// The live vertices, in no particular order.
    fn live_vertices(&self) -> &[Vertex];

    /// A dense index for the live vertex `v`, stable until the next
    /// mutation, in `0..vertex_count()`.
    fn slot(&self, v: Vertex) -> usize;

    fn is_live(&self, v: Vertex) -> bool;

    fn out_degree(&self, v: Vertex) -> u32;

    fn in_degree(&self, v: Vertex) -> u32;

    fn out_neighbors(&self, v: Vertex) -> Vec<Vertex>;

    fn in_neighbors(&self, v: Vertex) -> Vec<Vertex>;

    /// Captures the current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Returns the graph to the captured state; every vertex or edge
    /// removal and every merge since the capture is undone.
    fn restore(&mut self, snapshot: Self::Snapshot);

    /// Removes `(u, v)` and its skew-symmetric partner (which may coincide
    /// with it).
    fn remove_edge(&mut self, u: Vertex, v: Vertex);

    /// Removes all edges touching `v`, partners included.
    fn remove_all_edges(&mut self, v: Vertex);

    /// Removes `v` and `σ(v)` from the live set, along with all incident
    /// edges.
    fn remove_vertex(&mut self, v: Vertex);

    /// Contracts `v2` into `v1` and `σ(v2)` into `σ(v1)`: every edge
    /// into or out of `v2` goes into or out of `v1` instead, duplicates
    /// coalesce, and arising self-loops are deleted. A no-op when the two
    /// are already identified; the σ-half is skipped when `σ(v2) = v1`.
    fn merge(&mut self, v1: Vertex, v2: Vertex);

    /// Debug check of the representation invariants; meant for
    /// `debug_assert!` call sites.
    fn check_invariants(&self) -> bool;

    /// The live edges as a sorted list, for tests and display.
    fn edge_list(&self) -> Vec<(Vertex, Vertex)> {
        let mut edges = Vec::new();
        for &v in self.live_vertices() {
            for w in self.out_neighbors(v) {
                edges.push((v, w));
            }
        }
        edges.sort_unstable();
        edges
    }
}
