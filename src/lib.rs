//! A library for deciding the satisfiability of 2-XNF formulas.
//!
//! A 2-XNF formula is a conjunction of clauses, each clause a disjunction of at
//! most two *linerals*, affine linear forms over GF(2), i.e. XORs of boolean
//! variables, optionally plus the constant 1.
//! Such formulas arise naturally from algebraic attacks on symmetric ciphers and
//! from CNF-XOR translations, and they admit a decision procedure quite unlike
//! clause-driven CNF solving.
//!
//! The procedure implemented here drives DPLL-style search over an
//! *implication graph*:
//!
//! - Binary clauses are translated once into the edges of a directed graph
//!   equipped with the fixed-point-free involution σ(v) = v ^ 1, so that each
//!   vertex pair carries a normalized lineral and its complement
//!   ([graph], [labels]).
//! - Unit linerals accumulate in a reduced row-echelon linear system over
//!   GF(2) ([structures::linear_system]).
//! - Propagation (`crGCP`) interleaves label reduction, strongly-connected
//!   component contraction, and failed-lineral search to a fixed point
//!   ([procedures]).
//! - Decisions assert a linear system and push its symmetric alternative onto
//!   a backtrack stack; backtracking is chronological and restores the graph
//!   and label store from paired snapshots.
//!
//! # Orientation
//!
//! The library is designed around a [context](context::GenericContext) holding
//! every piece of solver state. Contexts are built from a clause list and a
//! [configuration](config::Config), most conveniently by parsing an XNF file
//! with [builder::parse_xnf].
//!
//! ```rust
//! use heron_xnf::builder::parse_xnf;
//! use heron_xnf::config::Config;
//! use heron_xnf::context::Context;
//! use heron_xnf::reports::Report;
//!
//! let xnf = "p xnf 2 2\n1 2 0\n-1 0\n";
//! let parsed = parse_xnf(xnf.as_bytes(), &Default::default()).unwrap();
//!
//! let mut ctx = Context::from_clauses(parsed.clauses.clone(), Config::from_parsed(&parsed)).unwrap();
//! assert_eq!(ctx.solve(), Report::Satisfiable);
//!
//! let witness = ctx.witness().unwrap();
//! assert!(heron_xnf::reports::check_solution(&parsed.clauses, witness));
//! ```
//!
//! Both the graph and the vertex-label store come in two interchangeable
//! representations (an adjacency-set graph and a lean-hybrid graph, a hash-map
//! store and a trie store). The choice is a build-time parameter: the cargo
//! features `lhgr` and `trie` select the non-default representations for
//! [Context](context::Context), and every representation satisfies the same
//! trait contract, so tests exercise all of them.
//!
//! # Logs
//!
//! Calls to [log] are made throughout, filtered by the targets listed in
//! [misc::log::targets]. No logger implementation is provided.

pub mod builder;
pub mod config;
pub mod context;
pub mod graph;
pub mod labels;
pub mod misc;
pub mod procedures;
pub mod reports;
pub mod structures;
pub mod types;
