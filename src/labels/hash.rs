//! Hash-map representation of the vertex ↔ lineral store.
//!
//! Two mutually inverse maps; a snapshot is a value copy of both. Simple
//! and free of index-width limits, at the cost of storing each lineral
//! twice.

use std::collections::HashMap;

use crate::labels::VertexLabels;
use crate::structures::{sigma, Lineral, Var, Vertex};

/// Vertex ↔ lineral store over a pair of hash maps.
#[derive(Clone, Debug, Default)]
pub struct HashLabels {
    vertex_to_label: HashMap<Vertex, Lineral>,
    label_to_vertex: HashMap<Lineral, Vertex>,
}

/// State for [restore](VertexLabels::restore).
#[derive(Clone, Debug)]
pub struct HashSnapshot {
    vertex_to_label: HashMap<Vertex, Lineral>,
    label_to_vertex: HashMap<Lineral, Vertex>,
}

impl VertexLabels for HashLabels {
    type Snapshot = HashSnapshot;

    fn with_capacity(vertices: usize, _var_count: Var) -> Self {
        HashLabels {
            vertex_to_label: HashMap::with_capacity(vertices),
            label_to_vertex: HashMap::with_capacity(vertices),
        }
    }

    fn len(&self) -> usize {
        debug_assert_eq!(self.vertex_to_label.len(), self.label_to_vertex.len());
        self.vertex_to_label.len()
    }

    fn insert(&mut self, v: Vertex, label: Lineral, _dl: u32) -> (bool, Vertex) {
        debug_assert!(!label.has_constant());
        if let Some(&held) = self.label_to_vertex.get(&label) {
            return (false, held);
        }
        if self.vertex_to_label.contains_key(&v) {
            return (false, v);
        }
        self.label_to_vertex.insert(label.clone(), v);
        self.vertex_to_label.insert(v, label);
        (true, v)
    }

    fn erase(&mut self, v: Vertex) -> bool {
        match self.vertex_to_label.remove(&v) {
            Some(label) => {
                let removed = self.label_to_vertex.remove(&label);
                debug_assert!(removed.is_some());
                true
            }
            None => false,
        }
    }

    fn has_vertex(&self, v: Vertex) -> bool {
        self.vertex_to_label.contains_key(&v)
    }

    fn label(&self, v: Vertex) -> Lineral {
        match self.vertex_to_label.get(&v) {
            Some(label) => label.clone(),
            None => self.vertex_to_label[&sigma(v)].plus_one(),
        }
    }

    fn leading_term(&self, v: Vertex) -> Var {
        let stored = if self.has_vertex(v) { v } else { sigma(v) };
        self.vertex_to_label[&stored].leading_term()
    }

    fn vertex(&self, l: &Lineral) -> Option<Vertex> {
        if l.has_constant() {
            self.label_to_vertex.get(&l.plus_one()).map(|&v| sigma(v))
        } else {
            self.label_to_vertex.get(l).copied()
        }
    }

    fn zero_vertex(&self) -> Option<Vertex> {
        self.label_to_vertex.get(&Lineral::zero()).copied()
    }

    fn snapshot(&self) -> HashSnapshot {
        HashSnapshot {
            vertex_to_label: self.vertex_to_label.clone(),
            label_to_vertex: self.label_to_vertex.clone(),
        }
    }

    fn restore(&mut self, snapshot: HashSnapshot, _dl: u32) {
        self.vertex_to_label = snapshot.vertex_to_label;
        self.label_to_vertex = snapshot.label_to_vertex;
    }
}
