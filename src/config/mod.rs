/*!
Configuration of a context.

Every runtime switch of the solver lives here, as a plain field of [Config].
The CLI parses switch values through the [FromStr] impls on the enums; the
enums display as the strings the CLI accepts.

The graph and label-store representations are *not* configuration: they are
build-time parameters selected by the `lhgr` and `trie` cargo features.
*/

use std::time::Duration;

use crate::builder::{ParsedXnf, Reordering};
use crate::structures::Var;

/// Which decision heuristic drives the DPLL case splits.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DecisionHeuristic {
    /// Branch on the first live vertex with a positive leading term.
    FirstVert,
    /// Branch on making the longest path a cycle.
    ///
    /// With [Scoring::Active] the path maximizes accumulated activity
    /// instead of length.
    #[default]
    MaxPath,
    /// Branch on the vertex with the largest forward cone.
    MaxReach,
    /// Branch on the vertex maximizing in-cone plus out-cone score.
    MaxBottleneck,
    /// Branch on the lexicographically next unassigned variable.
    ///
    /// Combined with a guessing path this decides variables in the
    /// requested external order.
    Lex,
}

/// Which failed-lineral search runs inside crGCP.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FlsMode {
    /// No failed-lineral search.
    #[default]
    No,
    /// Depth-first search from each root for its own complement.
    Trivial,
    /// As [FlsMode::Trivial], restricted to roots sharing a weak component
    /// with their complement.
    TrivialCc,
    /// Full span intersection along a topological order.
    Full,
}

/// Whether decision heuristics weight vertices by activity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Scoring {
    Active,
    #[default]
    Inactive,
}

/// Which edge set is emitted when translating clauses (§ the clause
/// `{f, g}` enforces `f·g = (f+g+1)·f = (f+g+1)·g`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GraphForm {
    /// Only `f+1 → g` and its skew-symmetric partner.
    Simple,
    /// Additionally `f+g → f` and `f+g → g`.
    #[default]
    Extended,
}

/// How much work the construction-time preprocessing round does.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PreprocessMode {
    /// None.
    #[default]
    No,
    /// One crGCP round with SCC contraction only.
    Scc,
    /// One crGCP round with full failed-lineral search.
    FlsScc,
    /// As [PreprocessMode::FlsScc], followed by edge extension between
    /// roots with jointly inconsistent spans.
    FlsSccEe,
}

/// The primary configuration structure.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Number of variables of the formula; index 0 is the constant slot.
    pub var_count: Var,

    /// Number of clauses announced by the input.
    pub clause_count: u32,

    /// Decision heuristic for the DPLL loop.
    pub decision: DecisionHeuristic,

    /// Failed-lineral search mode inside crGCP.
    pub fls: FlsMode,

    /// Run the failed-lineral search on every n-th crGCP call only.
    pub fls_schedule: u32,

    /// Activity-weighted heuristics and bump/decay on conflict.
    pub scoring: Scoring,

    /// Edge set emitted at construction.
    pub graph_form: GraphForm,

    /// Preprocessing performed while building the context.
    pub preprocess: PreprocessMode,

    /// Wall-clock budget enforced by an external observer; `None` disables.
    pub time_limit: Option<Duration>,

    /// Variable permutation from a guessing path; identity when empty.
    pub reordering: Reordering,
}

impl Config {
    /// A configuration sized to a parsed formula, all switches at their
    /// defaults.
    pub fn from_parsed(parsed: &ParsedXnf) -> Self {
        Config {
            var_count: parsed.var_count,
            clause_count: parsed.clause_count,
            fls_schedule: 1,
            ..Config::default()
        }
    }

    /// A configuration for a formula over `var_count` variables.
    pub fn with_vars(var_count: Var) -> Self {
        Config {
            var_count,
            fls_schedule: 1,
            ..Config::default()
        }
    }
}

impl std::str::FromStr for DecisionHeuristic {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fv" => Ok(Self::FirstVert),
            "mp" => Ok(Self::MaxPath),
            "mr" => Ok(Self::MaxReach),
            "mbn" => Ok(Self::MaxBottleneck),
            "lex" => Ok(Self::Lex),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for DecisionHeuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::FirstVert => write!(f, "fv"),
            Self::MaxPath => write!(f, "mp"),
            Self::MaxReach => write!(f, "mr"),
            Self::MaxBottleneck => write!(f, "mbn"),
            Self::Lex => write!(f, "lex"),
        }
    }
}

impl std::str::FromStr for FlsMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(Self::No),
            "trivial" => Ok(Self::Trivial),
            "trivial_cc" => Ok(Self::TrivialCc),
            "full" => Ok(Self::Full),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for FlsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::No => write!(f, "no"),
            Self::Trivial => write!(f, "trivial"),
            Self::TrivialCc => write!(f, "trivial_cc"),
            Self::Full => write!(f, "full"),
        }
    }
}

impl std::str::FromStr for PreprocessMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(Self::No),
            "scc" => Ok(Self::Scc),
            "fls_scc" => Ok(Self::FlsScc),
            "fls_scc_ee" => Ok(Self::FlsSccEe),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PreprocessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::No => write!(f, "no"),
            Self::Scc => write!(f, "scc"),
            Self::FlsScc => write!(f, "fls_scc"),
            Self::FlsSccEe => write!(f, "fls_scc_ee"),
        }
    }
}
