/*!
Lean-hybrid representation of a skew-symmetric graph.

Physical out-edge vectors never shrink; the live edges of a vertex occupy
the prefix `..vd_out[v]` and removal swaps an edge past that boundary.
Each edge carries an inverse index tying it to its skew-symmetric partner,

    al_out[σ(al_out[v][i])][ial_in[v][i]] == σ(v),

so a partner is found in O(1). Merges work on *colors*: every vertex maps
to the color representing it, a color lists its members, and the color
out-degree is the sum over members. A snapshot is just the live counts
plus the degree and color vectors; restore rebuilds the member lists and
color degrees in one pass.
*/

use crate::graph::SkewGraph;
use crate::structures::{sigma, Vertex};

/// Skew-symmetric graph in the lean-hybrid representation.
#[derive(Clone, Debug)]
pub struct LeanGraph {
    /// Live color count.
    no_v: u32,

    /// Live edge count.
    no_e: u32,

    /// Color list; live colors occupy the prefix `..no_v`.
    l: Vec<Vertex>,

    /// Position of each color in `l`.
    il: Vec<u32>,

    /// Physical out-edge vectors, live prefix `..vd_out[v]`.
    al_out: Vec<Vec<Vertex>>,

    /// Inverse edge indices; see the module invariant.
    ial_in: Vec<Vec<u32>>,

    /// Live out-degree of each vertex.
    vd_out: Vec<u32>,

    /// Members of each color.
    cal: Vec<Vec<Vertex>>,

    /// Color of each vertex.
    vc: Vec<Vertex>,

    /// Out-degree of each color.
    cd_out: Vec<u32>,

    /// Scratch "edge to this color exists" marks, reset through an
    /// explicit list after every merge.
    edge_mark: Vec<bool>,
}

/// State for [restore](SkewGraph::restore): the counts plus the degree and
/// color vectors.
#[derive(Clone, Debug)]
pub struct LeanSnapshot {
    no_v: u32,
    no_e: u32,
    vd_out: Vec<u32>,
    vc: Vec<Vertex>,
}

impl LeanGraph {
    /// Appends the edge `(src, dst)` and its partner. Construction only,
    /// as snapshots taken earlier are invalidated.
    fn add_edge(&mut self, src: Vertex, dst: Vertex) {
        debug_assert!(src != dst);
        let (s, d) = (src as usize, dst as usize);
        self.al_out[s].push(dst);
        self.vd_out[s] += 1;
        let i = self.al_out[s].len() - 1;

        let mut j = i;
        if sigma(dst) != src {
            let sd = sigma(dst) as usize;
            self.al_out[sd].push(sigma(src));
            self.vd_out[sd] += 1;
            j = self.al_out[sd].len() - 1;
        }

        if self.ial_in[s].len() <= i {
            self.ial_in[s].resize(i + 1, 0);
        }
        self.ial_in[s][i] = j as u32;
        if sigma(dst) != src {
            let sd = sigma(dst) as usize;
            if self.ial_in[sd].len() <= j {
                self.ial_in[sd].resize(j + 1, 0);
            }
            self.ial_in[sd][j] = i as u32;
        }
    }

    /// Swaps color `c` out of the live prefix.
    fn deactivate(&mut self, c: Vertex) {
        self.no_v -= 1;
        let i = self.il[c as usize] as usize;
        let j = self.no_v as usize;
        self.l.swap(i, j);
        let (a, b) = (self.l[i], self.l[j]);
        self.il.swap(a as usize, b as usize);
    }

    /// Removes the live edge `al_out[src][idx]` without touching its
    /// partner; a no-op when the index is already past the live prefix.
    fn remove_half_edge(&mut self, src: Vertex, idx: usize) {
        let s = src as usize;
        if idx >= self.vd_out[s] as usize {
            return;
        }
        self.cd_out[self.vc[s] as usize] -= 1;
        self.vd_out[s] -= 1;
        self.no_e -= 1;

        let last = self.vd_out[s] as usize;
        let dst = self.al_out[s][idx];
        let dst_last = self.al_out[s][last];

        self.al_out[s].swap(idx, last);
        // re-aim the partners' back-pointers at the swapped positions
        let bi = self.ial_in[s][idx] as usize;
        let bj = self.ial_in[s][last] as usize;
        let (ps, pm) = (sigma(dst) as usize, sigma(dst_last) as usize);
        let tmp = self.ial_in[pm][bj];
        self.ial_in[pm][bj] = self.ial_in[ps][bi];
        self.ial_in[ps][bi] = tmp;
        self.ial_in[s].swap(idx, last);
    }

    /// Removes the live edge `al_out[src][idx]` together with its partner.
    fn remove_edge_at(&mut self, src: Vertex, idx: usize) {
        self.remove_half_edge(src, idx);
        // the removed edge now sits at the live boundary
        let s = src as usize;
        let last = self.vd_out[s] as usize;
        let dst = self.al_out[s][last];
        let back = self.ial_in[s][last] as usize;
        self.remove_half_edge(sigma(dst), back);
    }

    /// Coalesces the out-edges of color `c`, keeping one edge per target
    /// color and no edge back to `c` itself.
    fn dedup_color(&mut self, c: Vertex) {
        if self.edge_mark.len() < self.no_v as usize {
            self.edge_mark.resize(self.no_v as usize, false);
        }
        let mut reset = Vec::new();
        let self_slot = self.il[c as usize] as usize;
        self.edge_mark[self_slot] = true;
        reset.push(self_slot);

        let members = self.cal[c as usize].clone();
        for w in members {
            let mut idx = 0;
            while idx < self.vd_out[w as usize] as usize {
                let dst = self.al_out[w as usize][idx];
                let slot = self.il[self.vc[dst as usize] as usize] as usize;
                if !self.edge_mark[slot] {
                    self.edge_mark[slot] = true;
                    reset.push(slot);
                    idx += 1;
                } else if self.vc[w as usize] != self.vc[sigma(dst) as usize] {
                    self.remove_edge_at(w, idx);
                } else {
                    // the partner is an out-edge of this color itself
                    self.remove_half_edge(w, idx);
                }
            }
        }
        for slot in reset {
            self.edge_mark[slot] = false;
        }
    }
}

impl SkewGraph for LeanGraph {
    type Snapshot = LeanSnapshot;

    fn from_edges(edges: &[(Vertex, Vertex)], vertex_count: u32) -> Self {
        debug_assert!(vertex_count % 2 == 0);
        let n = vertex_count as usize;
        let mut graph = LeanGraph {
            no_v: vertex_count,
            no_e: 0,
            l: (0..vertex_count).collect(),
            il: (0..vertex_count).collect(),
            al_out: vec![Vec::new(); n],
            ial_in: vec![Vec::new(); n],
            vd_out: vec![0; n],
            cal: (0..vertex_count).map(|v| vec![v]).collect(),
            vc: (0..vertex_count).collect(),
            cd_out: vec![0; n],
            edge_mark: Vec::new(),
        };
        for &(src, dst) in edges {
            graph.add_edge(src, dst);
        }
        for v in 0..n {
            graph.cd_out[v] = graph.vd_out[v];
            graph.no_e += graph.vd_out[v];
        }
        debug_assert!(graph.check_invariants());
        graph
    }

    fn vertex_count(&self) -> u32 {
        self.no_v
    }

    fn edge_count(&self) -> u32 {
        self.no_e
    }

    fn live_vertices(&self) -> &[Vertex] {
        &self.l[..self.no_v as usize]
    }

    fn slot(&self, v: Vertex) -> usize {
        self.il[self.vc[v as usize] as usize] as usize
    }

    fn is_live(&self, v: Vertex) -> bool {
        self.il[self.vc[v as usize] as usize] < self.no_v
    }

    fn out_degree(&self, v: Vertex) -> u32 {
        self.cd_out[self.vc[v as usize] as usize]
    }

    fn in_degree(&self, v: Vertex) -> u32 {
        self.cd_out[self.vc[sigma(v) as usize] as usize]
    }

    fn out_neighbors(&self, v: Vertex) -> Vec<Vertex> {
        let mut out = Vec::new();
        for &w in &self.cal[self.vc[v as usize] as usize] {
            for i in 0..self.vd_out[w as usize] as usize {
                out.push(self.vc[self.al_out[w as usize][i] as usize]);
            }
        }
        out
    }

    fn in_neighbors(&self, v: Vertex) -> Vec<Vertex> {
        let mut out = Vec::new();
        for &w in &self.cal[self.vc[sigma(v) as usize] as usize] {
            for i in 0..self.vd_out[w as usize] as usize {
                out.push(self.vc[sigma(self.al_out[w as usize][i]) as usize]);
            }
        }
        out
    }

    fn snapshot(&self) -> LeanSnapshot {
        LeanSnapshot {
            no_v: self.no_v,
            no_e: self.no_e,
            vd_out: self.vd_out.clone(),
            vc: self.vc.clone(),
        }
    }

    fn restore(&mut self, snapshot: LeanSnapshot) {
        self.no_v = snapshot.no_v;
        self.no_e = snapshot.no_e;
        self.vd_out = snapshot.vd_out;
        self.vc = snapshot.vc;

        for i in 0..self.no_v as usize {
            let c = self.l[i] as usize;
            self.cal[c].clear();
            self.cd_out[c] = 0;
        }
        for v in 0..self.vc.len() {
            let c = self.vc[v] as usize;
            self.cal[c].push(v as Vertex);
            self.cd_out[c] += self.vd_out[v];
        }
        debug_assert!(self.check_invariants());
    }

    fn remove_edge(&mut self, u: Vertex, v: Vertex) {
        let target = self.vc[v as usize];
        let members = self.cal[self.vc[u as usize] as usize].clone();
        for w in members {
            for idx in 0..self.vd_out[w as usize] as usize {
                if self.vc[self.al_out[w as usize][idx] as usize] == target {
                    self.remove_edge_at(w, idx);
                    return;
                }
            }
        }
        debug_assert!(false, "edge not present");
    }

    fn remove_all_edges(&mut self, v: Vertex) {
        let members = self.cal[self.vc[v as usize] as usize].clone();
        for src in members {
            let s = src as usize;
            for idx in 0..self.vd_out[s] as usize {
                let dst = self.al_out[s][idx];
                if sigma(dst) != src {
                    let back = self.ial_in[s][idx] as usize;
                    self.remove_half_edge(sigma(dst), back);
                }
            }
            self.cd_out[self.vc[s] as usize] -= self.vd_out[s];
            self.no_e -= self.vd_out[s];
            self.vd_out[s] = 0;
        }
    }

    fn remove_vertex(&mut self, v: Vertex) {
        for x in [v, sigma(v)] {
            let c = self.vc[x as usize];
            self.deactivate(c);
            self.remove_all_edges(x);
            self.cal[x as usize].clear();
        }
    }

    fn merge(&mut self, v1: Vertex, v2: Vertex) {
        let v1 = self.vc[v1 as usize];
        let v2 = self.vc[v2 as usize];
        if v1 == v2 || self.il[v1 as usize] >= self.no_v || self.il[v2 as usize] >= self.no_v {
            return;
        }
        let split_pair = self.vc[sigma(v2) as usize] != v1;

        self.deactivate(v2);
        self.cd_out[v1 as usize] += self.cd_out[v2 as usize];
        self.cd_out[v2 as usize] = 0;
        let members = std::mem::take(&mut self.cal[v2 as usize]);
        for &m in &members {
            self.vc[m as usize] = v1;
        }
        self.cal[v1 as usize].extend_from_slice(&members);

        if split_pair {
            let sv2 = self.vc[sigma(v2) as usize];
            let sv1 = self.vc[sigma(v1) as usize];
            self.deactivate(sv2);
            self.cd_out[sv1 as usize] += self.cd_out[sv2 as usize];
            self.cd_out[sv2 as usize] = 0;
            let members = std::mem::take(&mut self.cal[sv2 as usize]);
            for &m in &members {
                self.vc[m as usize] = sv1;
            }
            self.cal[sv1 as usize].extend_from_slice(&members);
        }

        self.dedup_color(v1);
        if split_pair {
            let sv1 = self.vc[sigma(v1) as usize];
            self.dedup_color(sv1);
        }
        debug_assert!(!split_pair || self.check_invariants());
    }

    fn check_invariants(&self) -> bool {
        for u in 0..self.al_out.len() {
            if self.vd_out[u] as usize > self.al_out[u].len() {
                return false;
            }
            for i in 0..self.al_out[u].len() {
                let partner_src = sigma(self.al_out[u][i]) as usize;
                let back = self.ial_in[u][i] as usize;
                if self.al_out[partner_src][back] != sigma(u as Vertex) {
                    return false;
                }
            }
        }
        for i in 0..self.no_v as usize {
            let c = self.l[i];
            if self.vc[c as usize] != c {
                return false;
            }
            let degree: u32 = self.cal[c as usize]
                .iter()
                .map(|&v| self.vd_out[v as usize])
                .sum();
            if degree != self.cd_out[c as usize] {
                return false;
            }
        }
        self.l
            .iter()
            .enumerate()
            .all(|(i, &v)| self.il[v as usize] as usize == i)
    }
}
