/*!
Solve outcomes, solution checking, and the XNF export of a context.
*/

use std::collections::{BTreeSet, HashSet};

use crate::context::GenericContext;
use crate::graph::SkewGraph;
use crate::labels::VertexLabels;
use crate::structures::{Clause, Lineral};

/// The outcome of a solve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Report {
    /// A witness was found.
    Satisfiable,

    /// Backtracking exhausted the root level.
    Unsatisfiable,

    /// Cancelled, timed out, or otherwise unresolved.
    Indefinite,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Report::Satisfiable => write!(f, "SATISFIABLE"),
            Report::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Report::Indefinite => write!(f, "INDEFINITE"),
        }
    }
}

/// Whether every clause has at least one lineral holding under `sol`.
pub fn check_solution(clauses: &[Clause], sol: &[bool]) -> bool {
    clauses
        .iter()
        .all(|clause| clause.iter().any(|lineral| lineral.eval(sol)))
}

impl<G: SkewGraph, L: VertexLabels> GenericContext<G, L> {
    /// The clause list equivalent to the current graph and the current
    /// level's systems: one clause `{f+1, g}` per edge, deduplicated, plus
    /// the system rows as unit clauses.
    pub fn to_clauses(&self) -> Vec<Clause> {
        let mut clauses: Vec<Clause> = Vec::new();
        let mut seen: HashSet<(Lineral, Lineral)> = HashSet::new();
        for &v in self.graph.live_vertices() {
            let f1 = self.labels.label(v).plus_one();
            for w in self.graph.out_neighbors(v) {
                let g = self.labels.label(w);
                if seen.contains(&(f1.clone(), g.clone())) || seen.contains(&(g.clone(), f1.clone()))
                {
                    continue;
                }
                seen.insert((f1.clone(), g.clone()));
                clauses.push(vec![f1.clone(), g]);
            }
        }
        for system in self.systems.last().expect("root level exists") {
            for row in system.rows() {
                clauses.push(vec![row.clone()]);
            }
        }
        clauses
    }

    /// An XNF rendition of [to_clauses](Self::to_clauses), clause lines
    /// sorted and deduplicated.
    pub fn to_xnf(&self) -> String {
        let mut lines: BTreeSet<String> = BTreeSet::new();
        for clause in self.to_clauses() {
            let tokens: Vec<String> = clause
                .iter()
                .map(Lineral::to_xnf_token)
                .filter(|t| !t.is_empty())
                .collect();
            if tokens.is_empty() {
                continue;
            }
            lines.insert(format!("{} 0", tokens.join(" ")));
        }
        let mut out = format!("p xnf {} {}\n", self.config.var_count, lines.len());
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
