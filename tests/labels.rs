use heron_xnf::labels::{HashLabels, TrieLabels, VertexLabels};
use heron_xnf::structures::Lineral;

fn lin(idxs: &[u32]) -> Lineral {
    Lineral::new(idxs.to_vec())
}

fn on_both(scenario: fn(&str, &mut dyn StoreUnderTest)) {
    let mut hash = Harness {
        store: HashLabels::with_capacity(16, 10),
        snapshots: Vec::new(),
    };
    scenario("hash", &mut hash);
    let mut trie = Harness {
        store: TrieLabels::with_capacity(16, 10),
        snapshots: Vec::new(),
    };
    scenario("trie", &mut trie);
}

trait StoreUnderTest {
    fn len(&self) -> usize;
    fn insert(&mut self, v: u32, l: Lineral, dl: u32) -> (bool, u32);
    fn erase(&mut self, v: u32) -> bool;
    fn update(&mut self, v: u32, l: Lineral, dl: u32) -> (u32, bool);
    fn has_vertex(&self, v: u32) -> bool;
    fn label(&self, v: u32) -> Lineral;
    fn leading_term(&self, v: u32) -> u32;
    fn vertex(&self, l: &Lineral) -> Option<u32>;
    fn zero_vertex(&self) -> Option<u32>;
    fn sum(&self, v1: u32, v2: u32) -> Lineral;
    fn snapshot(&mut self);
    fn restore(&mut self, dl: u32);
}

struct Harness<L: VertexLabels> {
    store: L,
    snapshots: Vec<L::Snapshot>,
}

impl<L: VertexLabels> StoreUnderTest for Harness<L> {
    fn len(&self) -> usize {
        self.store.len()
    }
    fn insert(&mut self, v: u32, l: Lineral, dl: u32) -> (bool, u32) {
        self.store.insert(v, l, dl)
    }
    fn erase(&mut self, v: u32) -> bool {
        self.store.erase(v)
    }
    fn update(&mut self, v: u32, l: Lineral, dl: u32) -> (u32, bool) {
        self.store.update(v, l, dl)
    }
    fn has_vertex(&self, v: u32) -> bool {
        self.store.has_vertex(v)
    }
    fn label(&self, v: u32) -> Lineral {
        self.store.label(v)
    }
    fn leading_term(&self, v: u32) -> u32 {
        self.store.leading_term(v)
    }
    fn vertex(&self, l: &Lineral) -> Option<u32> {
        self.store.vertex(l)
    }
    fn zero_vertex(&self) -> Option<u32> {
        self.store.zero_vertex()
    }
    fn sum(&self, v1: u32, v2: u32) -> Lineral {
        self.store.sum(v1, v2)
    }
    fn snapshot(&mut self) {
        let s = self.store.snapshot();
        self.snapshots.push(s);
    }
    fn restore(&mut self, dl: u32) {
        let s = self.snapshots.pop().unwrap();
        self.store.restore(s, dl);
    }
}

#[test]
fn bindings_resolve_through_sigma() {
    on_both(|name, store| {
        assert_eq!(store.insert(0, lin(&[1, 2]), 0), (true, 0), "{name}");
        assert_eq!(store.len(), 1, "{name}");

        assert_eq!(store.vertex(&lin(&[1, 2])), Some(0), "{name}");
        // the complement lives on the sigma pair
        assert_eq!(store.vertex(&lin(&[0, 1, 2])), Some(1), "{name}");
        assert_eq!(store.label(0), lin(&[1, 2]), "{name}");
        assert_eq!(store.label(1), lin(&[0, 1, 2]), "{name}");
        assert_eq!(store.leading_term(0), 1, "{name}");
        assert_eq!(store.leading_term(1), 1, "{name}");
        assert!(store.has_vertex(0), "{name}");
        assert!(!store.has_vertex(1), "{name}");
    });
}

#[test]
fn duplicate_labels_report_their_holder() {
    on_both(|name, store| {
        store.insert(0, lin(&[1, 2]), 0);
        assert_eq!(store.insert(2, lin(&[1, 2]), 0), (false, 0), "{name}");
        assert_eq!(store.len(), 1, "{name}");
    });
}

#[test]
fn erase_unbinds() {
    on_both(|name, store| {
        store.insert(0, lin(&[3]), 0);
        assert!(store.erase(0), "{name}");
        assert_eq!(store.len(), 0, "{name}");
        assert_eq!(store.vertex(&lin(&[3])), None, "{name}");
        assert!(!store.erase(0), "{name}");
    });
}

#[test]
fn update_without_constant_rebinds_in_place() {
    on_both(|name, store| {
        store.insert(2, lin(&[3]), 0);
        let (holder, flipped) = store.update(2, lin(&[3, 4]), 0);
        assert_eq!((holder, flipped), (2, false), "{name}");
        assert_eq!(store.label(2), lin(&[3, 4]), "{name}");
    });
}

#[test]
fn update_with_constant_flips_to_sigma() {
    on_both(|name, store| {
        store.insert(2, lin(&[3]), 0);
        let (holder, flipped) = store.update(2, lin(&[0, 5]), 0);
        assert_eq!((holder, flipped), (3, true), "{name}");
        // vertex 2 now carries x5+1 through its pair
        assert_eq!(store.label(2), lin(&[0, 5]), "{name}");
        assert_eq!(store.label(3), lin(&[5]), "{name}");
        assert_eq!(store.vertex(&lin(&[0, 5])), Some(2), "{name}");
        assert!(!store.has_vertex(2), "{name}");
        assert!(store.has_vertex(3), "{name}");
    });
}

#[test]
fn update_onto_an_existing_label_reports_the_holder() {
    on_both(|name, store| {
        store.insert(4, lin(&[6]), 0);
        store.insert(6, lin(&[7]), 0);
        let (holder, flipped) = store.update(6, lin(&[6]), 0);
        assert_eq!((holder, flipped), (4, false), "{name}");
        // 6 lost its binding; the caller now merges 6 into 4
        assert!(!store.has_vertex(6), "{name}");
        assert_eq!(store.len(), 1, "{name}");
    });
}

#[test]
fn zero_vertex_is_tracked() {
    on_both(|name, store| {
        assert_eq!(store.zero_vertex(), None, "{name}");
        store.insert(0, lin(&[1]), 0);
        store.update(0, Lineral::zero(), 0);
        assert_eq!(store.zero_vertex(), Some(0), "{name}");
    });
}

#[test]
fn sums_respect_orientation() {
    on_both(|name, store| {
        store.insert(0, lin(&[1, 2]), 0);
        store.insert(2, lin(&[2, 3]), 0);
        assert_eq!(store.sum(0, 2), lin(&[1, 3]), "{name}");
        // summing through one sigma pair carries the constant
        assert_eq!(store.sum(1, 2), lin(&[0, 1, 3]), "{name}");
        // and through two it cancels
        assert_eq!(store.sum(1, 3), lin(&[1, 3]), "{name}");
    });
}

#[test]
fn snapshots_restore_bindings() {
    on_both(|name, store| {
        store.insert(0, lin(&[1]), 0);
        store.snapshot();

        store.update(0, lin(&[1, 2]), 1);
        store.insert(2, lin(&[4, 5]), 1);
        assert_eq!(store.len(), 2, "{name}");

        store.restore(0);
        assert_eq!(store.len(), 1, "{name}");
        assert_eq!(store.label(0), lin(&[1]), "{name}");
        assert_eq!(store.vertex(&lin(&[1])), Some(0), "{name}");
        assert_eq!(store.vertex(&lin(&[4, 5])), None, "{name}");
    });
}

#[test]
fn trie_prunes_and_reuses_nodes() {
    let mut store = TrieLabels::with_capacity(4, 10);
    store.insert(0, lin(&[1, 2, 3]), 0);
    let snapshot = store.snapshot();

    store.insert(2, lin(&[1, 2, 4]), 1);
    store.insert(4, lin(&[7]), 1);
    store.restore(snapshot, 0);

    // the level-1 paths are gone, the level-0 path survives
    assert_eq!(store.vertex(&lin(&[1, 2, 3])), Some(0));
    assert_eq!(store.vertex(&lin(&[1, 2, 4])), None);
    assert_eq!(store.vertex(&lin(&[7])), None);

    // pruned nodes are reusable
    store.insert(6, lin(&[5, 6]), 0);
    assert_eq!(store.vertex(&lin(&[5, 6])), Some(6));
    assert_eq!(store.label(6), lin(&[5, 6]));
}
