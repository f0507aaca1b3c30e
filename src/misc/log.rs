/*!
Miscellaneous items related to [logging](log).

Calls to the log macros are made throughout the library, split by target so
output can be narrowed to the relevant subsystem.
No log implementation is provided; pair the library with a logger such as
env_logger and filter with, e.g., `RUST_LOG=gcp=trace …`.
*/

/// Targets to be used within a [log] macro.
pub mod targets {
    pub const BUILD: &str = "build";
    pub const GCP: &str = "gcp";
    pub const UPDATE: &str = "update";
    pub const SCC: &str = "scc";
    pub const FLS: &str = "fls";
    pub const DECISION: &str = "decision";
    pub const BACKTRACK: &str = "backtrack";
    pub const PREPROCESSING: &str = "preprocessing";
    pub const PARSER: &str = "parser";
}
