/*!
Building a context from clauses.

Unit clauses feed the initial linear system. A clause `{f, g}` of two
linerals enforces `f·g = (f+g+1)·f = (f+g+1)·g` and is translated into
the implications `f+1 → g` (simple form) and additionally `f+g → f`,
`f+g → g` (extended form); the skew-symmetric partners arise implicitly.
Each referenced lineral is normalized and becomes a vertex pair, with the
even vertex holding the constant-free orientation.

With edge-extension preprocessing configured, construction loops: after a
crGCP round, root pairs whose downward spans are jointly inconsistent
contribute a fresh clause over the complements, and the graph is rebuilt
from the extended clause list until no pair fires.
*/

use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::config::{Config, GraphForm, PreprocessMode};
use crate::context::{Counters, GenericContext};
use crate::graph::SkewGraph;
use crate::labels::VertexLabels;
use crate::misc::log::targets;
use crate::structures::{sigma, Clause, LinearSystem, Lineral, Vertex};
use crate::types::err::{BuildError, ErrorKind};

mod guessing_path;
pub mod xnf;

pub use guessing_path::{parse_guessing_path, Reordering};
pub use xnf::{parse_xnf, ParsedXnf};

impl<G: SkewGraph, L: VertexLabels> GenericContext<G, L> {
    /// Builds a context over the given 2-XNF clause list and runs the
    /// configured preprocessing.
    pub fn from_clauses(clauses: Vec<Clause>, config: Config) -> Result<Self, ErrorKind> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut counters = Counters::default();
        let mut clauses = clauses;

        loop {
            let mut ctx = translate::<G, L>(&clauses, config.clone(), Arc::clone(&cancelled))?;
            ctx.counters = counters;

            if ctx.is_cancelled() {
                log::info!(target: targets::BUILD, "cancelled during construction");
                return Ok(ctx);
            }

            ctx.preprocess();

            if ctx.config.preprocess != PreprocessMode::FlsSccEe {
                return Ok(ctx);
            }

            // edge extension: derive clauses between roots with jointly
            // inconsistent downward spans, then rebuild
            clauses = ctx.to_clauses();
            let added = ctx.extension_clauses(&mut clauses);
            ctx.counters.extension_clauses += added;
            log::info!(target: targets::PREPROCESSING, "deduced {added} extension clauses");
            if added == 0 {
                return Ok(ctx);
            }
            counters = ctx.counters;
        }
    }

    /// Appends one clause `{label(σ(r1)), label(σ(r2))}` for every root
    /// pair whose spans union to an inconsistent system, unless `r1`
    /// already reaches `σ(r2)`. Returns the number added.
    fn extension_clauses(&self, clauses: &mut Vec<Clause>) -> u64 {
        let n = self.graph.vertex_count() as usize;
        let order = self.topological_order();

        let mut spans: Vec<LinearSystem> = vec![LinearSystem::new(); n];
        for &v in order.iter().rev() {
            spans[self.graph.slot(v)].insert(self.labels.label(v));
            let span = spans[self.graph.slot(v)].clone();
            for w in self.graph.in_neighbors(v) {
                spans[self.graph.slot(w)].union(&span);
            }
        }

        let roots = self.roots();
        let mut added = 0;
        for &r1 in &roots {
            for &r2 in &roots {
                if r1 == r2 {
                    continue;
                }
                let mut joint = spans[self.graph.slot(r1)].clone();
                joint.union(&spans[self.graph.slot(r2)]);
                if joint.is_consistent() {
                    continue;
                }
                if self.is_descendant(r1, sigma(r2)) {
                    continue;
                }
                clauses.push(vec![
                    self.labels.label(sigma(r1)),
                    self.labels.label(sigma(r2)),
                ]);
                added += 1;
            }
        }
        added
    }
}

/// One pass of clause translation: vertices, edges, the initial linear
/// system, and the activity scores.
fn translate<G: SkewGraph, L: VertexLabels>(
    clauses: &[Clause],
    config: Config,
    cancelled: Arc<AtomicBool>,
) -> Result<GenericContext<G, L>, ErrorKind> {
    let extended = config.graph_form == GraphForm::Extended;
    let capacity = clauses.len() * if extended { 6 } else { 2 };

    let mut labels = L::with_capacity(capacity, config.var_count);
    let mut units: Vec<Lineral> = Vec::new();
    let mut edges: Vec<(Vertex, Vertex)> = Vec::new();
    let mut vertex_count: u32 = 0;

    for clause in clauses {
        match clause.len() {
            0 => units.push(Lineral::one()),
            1 => units.push(clause[0].clone()),
            2 => {
                let f = &clause[0];
                let g = &clause[1];
                if f.is_zero() || g.is_zero() {
                    continue;
                }
                if f.is_one() {
                    units.push(g.clone());
                    continue;
                }
                if g.is_one() {
                    units.push(f.clone());
                    continue;
                }
                let fpg = f + g;
                if f == g {
                    units.push(f.clone());
                }
                if fpg.is_one() || f == g {
                    continue;
                }

                let mut referenced = vec![f.clone(), g.clone()];
                if extended {
                    referenced.push(fpg.clone());
                }
                for mut l in referenced {
                    if labels.contains_label(&l) {
                        continue;
                    }
                    if l.has_constant() {
                        l.add_one();
                    }
                    let (inserted, _) = labels.insert(vertex_count, l, 0);
                    if inserted {
                        vertex_count += 2;
                    }
                }

                let v_f1 = labels.vertex(&f.plus_one()).expect("just inserted");
                let v_g = labels.vertex(g).expect("just inserted");
                edges.push((v_f1, v_g));
                if extended {
                    let v_fpg = labels.vertex(&fpg).expect("just inserted");
                    let v_f = labels.vertex(f).expect("just inserted");
                    edges.push((v_fpg, v_f));
                    edges.push((v_fpg, v_g));
                }
            }
            _ => return Err(BuildError::NotTwoXnf.into()),
        }
    }

    // canonicalize: no duplicates, and of each skew-symmetric pair keep
    // only the lexicographically smaller edge
    edges.sort_unstable();
    edges.dedup();
    let edge_set: HashSet<(Vertex, Vertex)> = edges.iter().copied().collect();
    edges.retain(|&(u, v)| {
        let mirror = (sigma(v), sigma(u));
        !(edge_set.contains(&mirror) && mirror < (u, v))
    });

    let graph = G::from_edges(&edges, vertex_count);
    debug_assert_eq!(vertex_count as usize, 2 * labels.len());

    let mut activity = vec![1u32; config.var_count as usize + 1];
    for &v in graph.live_vertices() {
        activity[labels.leading_term(v) as usize] += 1;
    }

    let mut ctx = GenericContext {
        graph,
        labels,
        graph_stack: Vec::new(),
        label_stack: Vec::new(),
        systems: vec![vec![LinearSystem::from_linerals(units)]],
        activity,
        bump: 1,
        decay: 0.9,
        solution: None,
        config,
        counters: Counters::default(),
        cancelled,
    };
    ctx.graph_stack.push(ctx.graph.snapshot());
    ctx.label_stack.push(ctx.labels.snapshot());
    log::info!(
        target: targets::BUILD,
        "graph built: {} vertices, {} edges",
        ctx.graph.vertex_count(),
        ctx.graph.edge_count()
    );
    Ok(ctx)
}
