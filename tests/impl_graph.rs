use heron_xnf::config::{Config, GraphForm};
use heron_xnf::context::GenericContext;
use heron_xnf::graph::{AdjacencyGraph, LeanGraph, SkewGraph};
use heron_xnf::labels::{HashLabels, TrieLabels, VertexLabels};
use heron_xnf::structures::{Clause, LinearSystem, Lineral};

fn lin(idxs: &[u32]) -> Lineral {
    Lineral::new(idxs.to_vec())
}

fn config(vars: u32, form: GraphForm) -> Config {
    let mut config = Config::with_vars(vars);
    config.graph_form = form;
    config
}

macro_rules! on_all {
    ($runner:ident $(, $arg:expr)*) => {
        $runner::<AdjacencyGraph, HashLabels>("adj/hash" $(, $arg)*);
        $runner::<AdjacencyGraph, TrieLabels>("adj/trie" $(, $arg)*);
        $runner::<LeanGraph, HashLabels>("lean/hash" $(, $arg)*);
        $runner::<LeanGraph, TrieLabels>("lean/trie" $(, $arg)*);
    };
}

mod construction {
    use super::*;

    fn single_clause<G: SkewGraph, L: VertexLabels>(name: &str) {
        let clauses: Vec<Clause> = vec![vec![lin(&[1]), lin(&[2])]];

        let ctx =
            GenericContext::<G, L>::from_clauses(clauses.clone(), config(2, GraphForm::Extended))
                .unwrap();
        // pairs for x1, x2, x1+x2 with three implications and partners
        assert_eq!(ctx.graph.vertex_count(), 6, "{name}");
        assert_eq!(ctx.graph.edge_count(), 6, "{name}");

        let simple =
            GenericContext::<G, L>::from_clauses(clauses, config(2, GraphForm::Simple)).unwrap();
        assert_eq!(simple.graph.vertex_count(), 4, "{name}");
        assert_eq!(simple.graph.edge_count(), 2, "{name}");
    }

    #[test]
    fn single_clause_graphs() {
        on_all!(single_clause);
    }

    fn chain<G: SkewGraph, L: VertexLabels>(name: &str) {
        let clauses: Vec<Clause> = vec![
            vec![lin(&[1]), lin(&[2])],
            vec![lin(&[2]), lin(&[3])],
            vec![lin(&[3]), lin(&[4])],
        ];
        let ctx =
            GenericContext::<G, L>::from_clauses(clauses, config(4, GraphForm::Simple)).unwrap();
        assert_eq!(ctx.graph.vertex_count(), 8, "{name}");
        assert_eq!(ctx.graph.edge_count(), 6, "{name}");
        assert!(ctx.is_consistent(), "{name}");
    }

    #[test]
    fn chained_clauses_share_vertices() {
        on_all!(chain);
    }

    fn degenerate<G: SkewGraph, L: VertexLabels>(name: &str) {
        // {l, l+1} is dropped entirely
        let tautology: Vec<Clause> = vec![vec![lin(&[1]), lin(&[0, 1])]];
        let ctx =
            GenericContext::<G, L>::from_clauses(tautology, config(1, GraphForm::Extended)).unwrap();
        assert_eq!(ctx.graph.vertex_count(), 0, "{name}");
        assert_eq!(ctx.current_system().size(), 0, "{name}");

        // {l, l} is the unit clause l
        let repeated: Vec<Clause> = vec![vec![lin(&[1]), lin(&[1])]];
        let ctx =
            GenericContext::<G, L>::from_clauses(repeated, config(1, GraphForm::Extended)).unwrap();
        assert_eq!(ctx.graph.vertex_count(), 0, "{name}");
        assert!(ctx.current_system().reduce(&lin(&[1])).is_zero(), "{name}");

        // a unit clause 1 is an immediate contradiction
        let falsum: Vec<Clause> = vec![vec![Lineral::one()]];
        let ctx =
            GenericContext::<G, L>::from_clauses(falsum, config(1, GraphForm::Extended)).unwrap();
        assert!(!ctx.is_consistent(), "{name}");
    }

    #[test]
    fn degenerate_clauses() {
        on_all!(degenerate);
    }
}

mod update {
    use super::*;

    fn unit_propagates<G: SkewGraph, L: VertexLabels>(name: &str) {
        // x1 ∨ x2 (as literals), then assert x1 false
        let clauses: Vec<Clause> = vec![vec![lin(&[0, 1]), lin(&[0, 2])]];
        let mut ctx =
            GenericContext::<G, L>::from_clauses(clauses, config(2, GraphForm::Simple)).unwrap();

        let delta = ctx.update_graph(&LinearSystem::from_lineral(lin(&[0, 1]).plus_one()));
        // asserting x1 realizes the zero label; x2 must follow as true
        assert!(delta.is_consistent(), "{name}");
        assert!(delta.reduce(&lin(&[0, 2])).is_zero(), "{name}");
    }

    #[test]
    fn unit_propagation_through_the_zero_vertex() {
        on_all!(unit_propagates);
    }

    fn empty_update_is_noop<G: SkewGraph, L: VertexLabels>(name: &str) {
        let clauses: Vec<Clause> = vec![vec![lin(&[1]), lin(&[2])]];
        let mut ctx =
            GenericContext::<G, L>::from_clauses(clauses, config(2, GraphForm::Simple)).unwrap();
        let edges = ctx.graph.edge_count();
        let delta = ctx.update_graph(&LinearSystem::new());
        assert_eq!(delta.size(), 0, "{name}");
        assert_eq!(ctx.graph.edge_count(), edges, "{name}");
    }

    #[test]
    fn empty_system_changes_nothing() {
        on_all!(empty_update_is_noop);
    }
}

mod scc {
    use super::*;

    fn cycle_collapses<G: SkewGraph, L: VertexLabels>(name: &str) {
        // x1 -> x2 -> x3 -> x1 as lineral implications
        let clauses: Vec<Clause> = vec![
            vec![lin(&[0, 1]), lin(&[2])],
            vec![lin(&[0, 2]), lin(&[3])],
            vec![lin(&[0, 3]), lin(&[1])],
        ];
        let mut ctx =
            GenericContext::<G, L>::from_clauses(clauses, config(3, GraphForm::Simple)).unwrap();
        assert_eq!(ctx.graph.vertex_count(), 6, "{name}");

        let system = ctx.scc_analysis();
        assert!(system.is_consistent(), "{name}");
        assert_eq!(system.dim(), 2, "{name}");
        // the cycle forces pairwise equality
        assert!(system.reduce(&lin(&[1, 2])).is_zero(), "{name}");
        assert!(system.reduce(&lin(&[2, 3])).is_zero(), "{name}");
        // both the component and its mirror contracted
        assert_eq!(ctx.graph.vertex_count(), 2, "{name}");

        // idempotent on the contracted graph
        let again = ctx.scc_analysis();
        assert_eq!(again.size(), 0, "{name}");
    }

    #[test]
    fn implication_cycles_become_equalities() {
        on_all!(cycle_collapses);
    }

    fn orders_and_roots<G: SkewGraph, L: VertexLabels>(name: &str) {
        let clauses: Vec<Clause> = vec![
            vec![lin(&[1]), lin(&[2])],
            vec![lin(&[2]), lin(&[3])],
        ];
        let ctx =
            GenericContext::<G, L>::from_clauses(clauses, config(3, GraphForm::Simple)).unwrap();
        assert!(ctx.is_dag(), "{name}");

        let order = ctx.topological_order();
        assert_eq!(order.len(), ctx.graph.vertex_count() as usize, "{name}");
        // every edge is oriented forwards in the order
        let position: std::collections::HashMap<u32, usize> =
            order.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        for &v in ctx.graph.live_vertices() {
            for w in ctx.graph.out_neighbors(v) {
                assert!(position[&v] < position[&w], "{name}");
            }
        }

        for root in ctx.roots() {
            assert_eq!(ctx.graph.in_degree(root), 0, "{name}");
        }

        // reachability follows the edges
        let &v = ctx.graph.live_vertices().iter().find(|&&v| ctx.graph.out_degree(v) > 0).unwrap();
        let w = ctx.graph.out_neighbors(v)[0];
        assert!(ctx.is_descendant(v, w), "{name}");
        assert!(ctx.is_descendant(v, v), "{name}");
        assert!(!ctx.is_descendant(w, v), "{name}");

        // the chain is weakly connected as one component plus its mirror
        assert_eq!(ctx.connected_component_count(), 2, "{name}");
    }

    #[test]
    fn topological_order_and_roots() {
        on_all!(orders_and_roots);
    }
}

mod fls {
    use super::*;

    fn failed_root_is_found<G: SkewGraph, L: VertexLabels>(name: &str) {
        // x1 -> x2 and x1 -> ¬x2: assuming x1 fails
        let clauses: Vec<Clause> = vec![
            vec![lin(&[1]), lin(&[0, 2])],
            vec![lin(&[1]), lin(&[2])],
        ];
        let ctx =
            GenericContext::<G, L>::from_clauses(clauses, config(2, GraphForm::Simple)).unwrap();

        for (mode, system) in [
            ("trivial", ctx.fls_trivial()),
            ("trivial_cc", ctx.fls_trivial_cc()),
            ("full", ctx.fls_full()),
        ] {
            assert!(system.is_consistent(), "{name}/{mode}");
            // ¬x1 is forced
            assert!(system.reduce(&lin(&[1])).is_zero(), "{name}/{mode}");
        }
    }

    #[test]
    fn failed_lineral_search_forces_the_complement() {
        on_all!(failed_root_is_found);
    }

    fn nothing_fails_on_a_chain<G: SkewGraph, L: VertexLabels>(name: &str) {
        let clauses: Vec<Clause> = vec![
            vec![lin(&[1]), lin(&[2])],
            vec![lin(&[2]), lin(&[3])],
        ];
        let ctx =
            GenericContext::<G, L>::from_clauses(clauses, config(3, GraphForm::Simple)).unwrap();
        assert_eq!(ctx.fls_trivial().size(), 0, "{name}");
        assert_eq!(ctx.fls_trivial_cc().size(), 0, "{name}");
        assert_eq!(ctx.fls_full().size(), 0, "{name}");
    }

    #[test]
    fn consistent_chains_yield_nothing() {
        on_all!(nothing_fails_on_a_chain);
    }
}

mod export {
    use super::*;

    fn round_trips<G: SkewGraph, L: VertexLabels>(name: &str) {
        let clauses: Vec<Clause> = vec![
            vec![lin(&[1]), lin(&[2])],
            vec![lin(&[2]), lin(&[3])],
            vec![lin(&[3])],
        ];
        let ctx = GenericContext::<G, L>::from_clauses(clauses, config(3, GraphForm::Simple))
            .unwrap();

        let exported = ctx.to_clauses();
        // one clause per stored edge pair plus the unit row
        assert!(!exported.is_empty(), "{name}");
        let text = ctx.to_xnf();
        assert!(text.starts_with("p xnf 3 "), "{name}");
        assert!(text.lines().count() >= 2, "{name}");
    }

    #[test]
    fn graphs_export_as_xnf() {
        on_all!(round_trips);
    }
}
