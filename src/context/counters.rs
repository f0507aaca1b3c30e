//! Counters over the lifetime of a solve.

use std::time::Duration;

/// Solve statistics, printed as `c` lines by the CLI.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    /// Decisions made.
    pub decisions: u64,

    /// Conflicts hit.
    pub conflicts: u64,

    /// crGCP fixed-point rounds.
    pub gcp_rounds: u64,

    /// Calls to update_graph.
    pub graph_updates: u64,

    /// Vertex labels rewritten across all graph updates.
    pub vertex_updates: u64,

    /// Live vertices summed over all graph updates.
    pub update_vertices_seen: u64,

    /// System rows summed over all graph updates.
    pub update_rows_seen: u64,

    /// Linerals learned from graph updates.
    pub eqs_from_update: u64,

    /// Linerals learned from SCC contraction.
    pub eqs_from_scc: u64,

    /// Linerals learned from failed-lineral search.
    pub eqs_from_fls: u64,

    /// Clauses added by edge-extension preprocessing.
    pub extension_clauses: u64,

    /// Wall-clock time of the solve, set by the caller.
    pub time: Duration,
}
