/*!
Trie representation of the vertex ↔ lineral store.

Labels are stored as paths keyed on the *reversed* index sequence: a path
descends from the root through decreasing indices, so walking a node's
parents yields the support in ascending order and the node's own key is
the leading term. Nodes created at a decision level are registered with
that level and pruned when a restore drops the level, which keeps the trie
from accumulating labels of abandoned branches; bindings themselves are
restored by value (they are two small maps).
*/

use std::collections::HashMap;

use crate::labels::VertexLabels;
use crate::structures::{sigma, Lineral, Var, Vertex};

const ROOT: u32 = 0;

#[derive(Clone, Debug)]
struct TrieNode {
    parent: u32,
    key: Var,
    children: HashMap<Var, u32>,
}

/// Vertex ↔ lineral store over a reversed-index trie.
#[derive(Clone, Debug)]
pub struct TrieLabels {
    nodes: Vec<TrieNode>,

    /// Node holding the label of each stored vertex.
    vertex_node: HashMap<Vertex, u32>,

    /// Vertex assigned to a node, for nodes that have one.
    assigned: HashMap<u32, Vertex>,

    /// Reusable node indices, filled by pruning.
    free: Vec<u32>,

    /// Nodes created per decision level.
    levels: Vec<Vec<u32>>,

    /// Number of stored pairs.
    count: usize,
}

/// State for [restore](VertexLabels::restore).
#[derive(Clone, Debug)]
pub struct TrieSnapshot {
    vertex_node: HashMap<Vertex, u32>,
    count: usize,
}

impl TrieLabels {
    fn add_node(&mut self, parent: u32, key: Var, dl: u32) -> u32 {
        let idx = match self.free.pop() {
            Some(idx) => {
                let node = &mut self.nodes[idx as usize];
                node.parent = parent;
                node.key = key;
                node.children.clear();
                idx
            }
            None => {
                self.nodes.push(TrieNode {
                    parent,
                    key,
                    children: HashMap::new(),
                });
                (self.nodes.len() - 1) as u32
            }
        };
        while self.levels.len() <= dl as usize {
            self.levels.push(Vec::new());
        }
        self.levels.last_mut().unwrap().push(idx);
        let prior = self.nodes[parent as usize].children.insert(key, idx);
        debug_assert!(prior.is_none());
        idx
    }

    fn remove_node(&mut self, idx: u32) {
        let parent = self.nodes[idx as usize].parent;
        let key = self.nodes[idx as usize].key;
        self.nodes[parent as usize].children.remove(&key);
        self.free.push(idx);
    }

    /// Removes every node created above decision level `dl`.
    fn prune(&mut self, dl: u32) {
        while self.levels.len() > dl as usize + 1 {
            let level = self.levels.pop().unwrap();
            for idx in level {
                self.remove_node(idx);
            }
        }
    }

    /// The node of the normalized support, if the full path exists.
    fn find(&self, support: &[Var]) -> Option<u32> {
        let mut cur = ROOT;
        for &ind in support.iter().rev() {
            cur = *self.nodes[cur as usize].children.get(&ind)?;
        }
        Some(cur)
    }
}

impl VertexLabels for TrieLabels {
    type Snapshot = TrieSnapshot;

    fn with_capacity(vertices: usize, _var_count: Var) -> Self {
        let mut nodes = Vec::with_capacity(vertices);
        nodes.push(TrieNode {
            parent: ROOT,
            key: 0,
            children: HashMap::new(),
        });
        TrieLabels {
            nodes,
            vertex_node: HashMap::with_capacity(vertices),
            assigned: HashMap::with_capacity(vertices),
            free: Vec::new(),
            levels: vec![Vec::new()],
            count: 0,
        }
    }

    fn len(&self) -> usize {
        self.count
    }

    fn insert(&mut self, v: Vertex, label: Lineral, dl: u32) -> (bool, Vertex) {
        debug_assert!(!label.has_constant());
        if self.vertex_node.contains_key(&v) {
            return (false, v);
        }

        let mut cur = ROOT;
        let mut node_added = false;
        for &ind in label.support().iter().rev() {
            let found = if node_added {
                None
            } else {
                self.nodes[cur as usize].children.get(&ind).copied()
            };
            match found {
                Some(child) => cur = child,
                None => {
                    cur = self.add_node(cur, ind, dl);
                    node_added = true;
                }
            }
        }

        if let Some(&held) = self.assigned.get(&cur) {
            return (false, held);
        }
        self.assigned.insert(cur, v);
        self.vertex_node.insert(v, cur);
        self.count += 1;
        (true, v)
    }

    fn erase(&mut self, v: Vertex) -> bool {
        // only the binding goes; the path stays until pruned
        match self.vertex_node.remove(&v) {
            Some(node) => {
                let removed = self.assigned.remove(&node);
                debug_assert!(removed.is_some());
                self.count -= 1;
                true
            }
            None => false,
        }
    }

    fn has_vertex(&self, v: Vertex) -> bool {
        self.vertex_node.contains_key(&v)
    }

    fn label(&self, v: Vertex) -> Lineral {
        let (node, flip) = match self.vertex_node.get(&v) {
            Some(&node) => (node, false),
            None => (self.vertex_node[&sigma(v)], true),
        };
        let mut idxs = Vec::new();
        let mut cur = node;
        while cur != ROOT {
            idxs.push(self.nodes[cur as usize].key);
            cur = self.nodes[cur as usize].parent;
        }
        Lineral::from_sorted(idxs, flip)
    }

    fn leading_term(&self, v: Vertex) -> Var {
        let node = match self.vertex_node.get(&v) {
            Some(&node) => node,
            None => self.vertex_node[&sigma(v)],
        };
        if node == ROOT {
            0
        } else {
            self.nodes[node as usize].key
        }
    }

    fn vertex(&self, l: &Lineral) -> Option<Vertex> {
        let node = self.find(l.support())?;
        let &v = self.assigned.get(&node)?;
        Some(if l.has_constant() { sigma(v) } else { v })
    }

    fn zero_vertex(&self) -> Option<Vertex> {
        self.assigned.get(&ROOT).copied()
    }

    fn snapshot(&self) -> TrieSnapshot {
        TrieSnapshot {
            vertex_node: self.vertex_node.clone(),
            count: self.count,
        }
    }

    fn restore(&mut self, snapshot: TrieSnapshot, dl: u32) {
        self.vertex_node = snapshot.vertex_node;
        self.count = snapshot.count;
        self.assigned.clear();
        for (&v, &node) in &self.vertex_node {
            self.assigned.insert(node, v);
        }
        self.prune(dl);
    }
}
