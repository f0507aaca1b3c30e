use heron_xnf::graph::{AdjacencyGraph, LeanGraph, SkewGraph};
use heron_xnf::structures::sigma;

/// Runs a scenario against both graph representations.
fn on_both(scenario: fn(&str, &mut dyn FnMut() -> Box<dyn GraphUnderTest>)) {
    scenario("adjacency", &mut || {
        Box::new(Harness::<AdjacencyGraph>::default())
    });
    scenario("lean", &mut || Box::new(Harness::<LeanGraph>::default()));
}

/// Object-safe view over a graph under test.
trait GraphUnderTest {
    fn build(&mut self, edges: &[(u32, u32)], vertex_count: u32);
    fn vertex_count(&self) -> u32;
    fn edge_count(&self) -> u32;
    fn out_degree(&self, v: u32) -> u32;
    fn in_degree(&self, v: u32) -> u32;
    fn out_neighbors(&self, v: u32) -> Vec<u32>;
    fn in_neighbors(&self, v: u32) -> Vec<u32>;
    fn edge_list(&self) -> Vec<(u32, u32)>;
    fn live_vertices(&self) -> Vec<u32>;
    fn remove_edge(&mut self, u: u32, v: u32);
    fn remove_vertex(&mut self, v: u32);
    fn merge(&mut self, v1: u32, v2: u32);
    fn snapshot(&mut self);
    fn restore(&mut self);
    fn check_invariants(&self) -> bool;
}

struct Harness<G: SkewGraph> {
    graph: Option<G>,
    snapshots: Vec<G::Snapshot>,
}

impl<G: SkewGraph> Default for Harness<G> {
    fn default() -> Self {
        Harness {
            graph: None,
            snapshots: Vec::new(),
        }
    }
}

impl<G: SkewGraph> GraphUnderTest for Harness<G> {
    fn build(&mut self, edges: &[(u32, u32)], vertex_count: u32) {
        self.graph = Some(G::from_edges(edges, vertex_count));
    }
    fn vertex_count(&self) -> u32 {
        self.graph.as_ref().unwrap().vertex_count()
    }
    fn edge_count(&self) -> u32 {
        self.graph.as_ref().unwrap().edge_count()
    }
    fn out_degree(&self, v: u32) -> u32 {
        self.graph.as_ref().unwrap().out_degree(v)
    }
    fn in_degree(&self, v: u32) -> u32 {
        self.graph.as_ref().unwrap().in_degree(v)
    }
    fn out_neighbors(&self, v: u32) -> Vec<u32> {
        let mut n = self.graph.as_ref().unwrap().out_neighbors(v);
        n.sort_unstable();
        n
    }
    fn in_neighbors(&self, v: u32) -> Vec<u32> {
        let mut n = self.graph.as_ref().unwrap().in_neighbors(v);
        n.sort_unstable();
        n
    }
    fn edge_list(&self) -> Vec<(u32, u32)> {
        self.graph.as_ref().unwrap().edge_list()
    }
    fn live_vertices(&self) -> Vec<u32> {
        let mut v = self.graph.as_ref().unwrap().live_vertices().to_vec();
        v.sort_unstable();
        v
    }
    fn remove_edge(&mut self, u: u32, v: u32) {
        self.graph.as_mut().unwrap().remove_edge(u, v);
    }
    fn remove_vertex(&mut self, v: u32) {
        self.graph.as_mut().unwrap().remove_vertex(v);
    }
    fn merge(&mut self, v1: u32, v2: u32) {
        self.graph.as_mut().unwrap().merge(v1, v2);
    }
    fn snapshot(&mut self) {
        let s = self.graph.as_ref().unwrap().snapshot();
        self.snapshots.push(s);
    }
    fn restore(&mut self) {
        let s = self.snapshots.pop().unwrap();
        self.graph.as_mut().unwrap().restore(s);
    }
    fn check_invariants(&self) -> bool {
        self.graph.as_ref().unwrap().check_invariants()
    }
}

#[test]
fn construction_adds_symmetric_partners() {
    on_both(|name, make| {
        let mut g = make();
        g.build(&[(0, 2), (2, 4)], 6);
        assert_eq!(g.edge_count(), 4, "{name}");
        assert_eq!(g.vertex_count(), 6, "{name}");
        assert_eq!(g.out_neighbors(0), vec![2], "{name}");
        assert_eq!(g.in_neighbors(2), vec![0], "{name}");
        assert_eq!(g.out_degree(0), 1, "{name}");
        assert_eq!(g.in_degree(2), 1, "{name}");
        let edges = g.edge_list();
        assert!(edges.contains(&(3, 1)), "{name}: partner of (0,2)");
        assert!(edges.contains(&(5, 3)), "{name}: partner of (2,4)");
        assert!(g.check_invariants(), "{name}");
    });
}

#[test]
fn self_symmetric_edge_is_not_duplicated() {
    on_both(|name, make| {
        let mut g = make();
        // (0,1) is its own partner
        g.build(&[(0, 1)], 2);
        assert_eq!(g.edge_count(), 1, "{name}");
        assert_eq!(g.out_neighbors(0), vec![1], "{name}");
        assert!(g.check_invariants(), "{name}");
    });
}

#[test]
fn removing_an_edge_removes_its_partner() {
    on_both(|name, make| {
        let mut g = make();
        g.build(&[(0, 2), (2, 4)], 6);
        g.remove_edge(0, 2);
        assert_eq!(g.edge_count(), 2, "{name}");
        let edges = g.edge_list();
        assert!(!edges.contains(&(0, 2)), "{name}");
        assert!(!edges.contains(&(3, 1)), "{name}");
        assert!(edges.contains(&(2, 4)), "{name}");
        assert!(g.check_invariants(), "{name}");
    });
}

#[test]
fn removing_a_vertex_takes_its_pair_and_edges() {
    on_both(|name, make| {
        let mut g = make();
        g.build(&[(0, 2), (2, 4)], 6);
        g.remove_vertex(2);
        assert_eq!(g.vertex_count(), 4, "{name}");
        assert_eq!(g.edge_count(), 0, "{name}");
        let live = g.live_vertices();
        assert!(!live.contains(&2), "{name}");
        assert!(!live.contains(&3), "{name}");
        assert!(g.check_invariants(), "{name}");
    });
}

#[test]
fn merge_coalesces_duplicates_and_bends_edges() {
    on_both(|name, make| {
        let mut g = make();
        // both 0 and 2 point at 4
        g.build(&[(0, 4), (2, 4)], 6);
        g.merge(0, 2);
        assert_eq!(g.vertex_count(), 4, "{name}");
        // the two edges into 4 coalesce, as do their partners
        assert_eq!(g.edge_count(), 2, "{name}");
        assert_eq!(g.out_neighbors(0), vec![4], "{name}");
        assert_eq!(g.in_neighbors(4), vec![0], "{name}");
    });
}

#[test]
fn merge_bends_incoming_edges() {
    on_both(|name, make| {
        let mut g = make();
        // 0 -> 2, 4 -> 2; merge 2 into 6
        g.build(&[(0, 2), (4, 2)], 8);
        g.merge(6, 2);
        assert_eq!(g.out_neighbors(0), vec![6], "{name}");
        assert_eq!(g.out_neighbors(4), vec![6], "{name}");
        assert_eq!(g.in_neighbors(6), vec![0, 4], "{name}");
        assert_eq!(g.edge_count(), 4, "{name}");
    });
}

#[test]
fn merge_drops_arising_self_loops() {
    on_both(|name, make| {
        let mut g = make();
        // 0 -> 2; merging 2 into 0 would loop
        g.build(&[(0, 2)], 4);
        g.merge(0, 2);
        assert_eq!(g.edge_count(), 0, "{name}");
        assert_eq!(g.vertex_count(), 2, "{name}");
    });
}

#[test]
fn merge_of_identified_vertices_is_a_no_op() {
    on_both(|name, make| {
        let mut g = make();
        g.build(&[(0, 2), (2, 4)], 6);
        let edges = g.edge_list();
        g.merge(4, 4);
        assert_eq!(g.edge_list(), edges, "{name}");
    });
}

#[test]
fn snapshots_survive_arbitrary_mutation() {
    on_both(|name, make| {
        let mut g = make();
        g.build(&[(0, 2), (2, 4), (4, 6)], 8);
        let vertices = g.vertex_count();
        let edges = g.edge_count();
        let edge_list = g.edge_list();

        g.snapshot();
        g.remove_edge(0, 2);
        g.merge(2, 4);
        g.remove_vertex(6);
        g.restore();

        assert_eq!(g.vertex_count(), vertices, "{name}");
        assert_eq!(g.edge_count(), edges, "{name}");
        assert_eq!(g.edge_list(), edge_list, "{name}");
        assert!(g.check_invariants(), "{name}");
    });
}

#[test]
fn snapshots_nest() {
    on_both(|name, make| {
        let mut g = make();
        g.build(&[(0, 2), (2, 4)], 6);
        let full = g.edge_list();

        g.snapshot();
        g.remove_edge(2, 4);
        let partial = g.edge_list();

        g.snapshot();
        g.merge(0, 2);
        g.restore();
        assert_eq!(g.edge_list(), partial, "{name}");

        g.restore();
        assert_eq!(g.edge_list(), full, "{name}");
    });
}

#[test]
fn sigma_is_an_involution() {
    for v in 0..16 {
        assert_eq!(sigma(sigma(v)), v);
        assert_ne!(sigma(v), v);
    }
}
