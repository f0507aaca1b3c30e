/*!
A system of linerals maintained in reduced row-echelon form over GF(2).

Rows are [Lineral]s; the pivot map sends each row's leading term to its row
index. Every pivot column carries exactly one 1 across the system, zero
rows are dropped as they arise, and a row equal to `1` (pivot 0) marks the
system inconsistent; it is retained as the marker and exempted from
back-substitution.
*/

use std::collections::{BTreeMap, HashMap};

use crate::structures::matrix::BitMatrix;
use crate::structures::{Lineral, Var};

/// A GF(2) linear system in reduced row-echelon form.
#[derive(Clone, Debug, Default)]
pub struct LinearSystem {
    rows: Vec<Lineral>,
    pivots: BTreeMap<Var, usize>,
}

impl LinearSystem {
    /// The empty system.
    pub fn new() -> Self {
        LinearSystem::default()
    }

    /// A system spanned by a single lineral.
    pub fn from_lineral(l: Lineral) -> Self {
        let mut sys = LinearSystem::default();
        sys.absorb(std::iter::once(l));
        sys
    }

    /// A system spanned by the given linerals.
    pub fn from_linerals(ls: Vec<Lineral>) -> Self {
        let mut sys = LinearSystem::default();
        sys.absorb(ls);
        sys
    }

    /// Number of rows; equals [dim](LinearSystem::dim).
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Number of pivots.
    pub fn dim(&self) -> usize {
        self.pivots.len()
    }

    pub fn rows(&self) -> &[Lineral] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> &Lineral {
        &self.rows[i]
    }

    pub fn pivots(&self) -> &BTreeMap<Var, usize> {
        &self.pivots
    }

    /// Whether the system has no row equal to `1`.
    pub fn is_consistent(&self) -> bool {
        !self.pivots.contains_key(&0)
    }

    pub fn contains_lt(&self, lt: Var) -> bool {
        self.pivots.contains_key(&lt)
    }

    /// Reduces `l` by the system without mutating it; the result has no
    /// pivot leading term in its support.
    pub fn reduce(&self, l: &Lineral) -> Lineral {
        let mut out = l.clone();
        for (&lt, &row) in &self.pivots {
            if out.contains(lt) {
                out += &self.rows[row];
            }
        }
        out
    }

    /// Inserts one lineral, restoring RREF incrementally.
    pub fn insert(&mut self, l: Lineral) {
        self.absorb(std::iter::once(l));
    }

    /// Unions another system in, restoring RREF incrementally.
    pub fn union(&mut self, other: &LinearSystem) {
        self.absorb(other.rows.iter().cloned());
    }

    /// The incremental RREF step shared by construction, insertion, and
    /// union: reduce each new row by the pivots, drop it if zero, else
    /// record its pivot and back-substitute into the existing rows. A new
    /// row equal to `1` skips the back-substitution.
    fn absorb<I: IntoIterator<Item = Lineral>>(&mut self, new_rows: I) {
        for mut row in new_rows {
            for (&lt, &j) in &self.pivots {
                if row.contains(lt) {
                    row += &self.rows[j];
                }
            }
            if row.is_zero() {
                continue;
            }
            let lt = row.leading_term();
            if lt != 0 {
                for (_, &j) in &self.pivots {
                    if self.rows[j].contains(lt) {
                        self.rows[j] += &row;
                    }
                }
            }
            self.pivots.insert(lt, self.rows.len());
            self.rows.push(row);
        }
    }

    /// Reduces every row by per-variable assignments, then rebuilds the
    /// leading terms by repeated pivot lookup, dropping zero rows.
    pub fn lt_update(&mut self, assignments: &[Lineral]) {
        for row in &mut self.rows {
            row.reduce_with_assignments(assignments);
        }
        self.pivots.clear();
        let old = std::mem::take(&mut self.rows);
        for mut row in old {
            while !row.is_zero() {
                match self.pivots.get(&row.leading_term()) {
                    Some(&j) => row += &self.rows[j],
                    None => break,
                }
            }
            if !row.is_zero() {
                self.pivots.insert(row.leading_term(), self.rows.len());
                self.rows.push(row);
            }
        }
    }

    /// Reduces every row by decision-level-filtered assignments and
    /// rebuilds the RREF from scratch.
    pub fn update_with_assignments(
        &mut self,
        assignments: &[Lineral],
        assignment_dls: &[Var],
        dl: Var,
    ) {
        for row in &mut self.rows {
            row.reduce_with_assignments_filtered(assignments, assignment_dls, dl);
        }
        self.pivots.clear();
        let old = std::mem::take(&mut self.rows);
        self.absorb(old);
    }

    /// Whether every row holds under the assignment.
    pub fn eval(&self, sol: &[bool]) -> bool {
        self.rows.iter().all(|row| row.eval(sol))
    }

    /// Extends a partial assignment to a solution of the system: for each
    /// pivot row, the pivot variable is flipped so the row holds. Only
    /// pivot variables are touched.
    pub fn solve(&self, sol: &mut [bool]) {
        debug_assert!(self.is_consistent());
        for (&lt, &row) in &self.pivots {
            if lt == 0 {
                continue;
            }
            if !self.rows[row].eval(sol) {
                sol[(lt - 1) as usize] = !sol[(lt - 1) as usize];
            }
        }
    }

}

impl std::fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut first = true;
        for (_, &i) in &self.pivots {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", self.rows[i])?;
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// The union of the variable supports of two systems, plus the constant
/// slot at position 0, with a dense back-mapping.
fn dense_support(u: &LinearSystem, w: &LinearSystem) -> (Vec<Var>, HashMap<Var, usize>) {
    let mut supp: Vec<Var> = Vec::new();
    for sys in [u, w] {
        for row in sys.rows() {
            supp.extend_from_slice(row.support());
        }
    }
    supp.sort_unstable();
    supp.dedup();
    let positions = supp.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    (supp, positions)
}

/// A basis of the vector-space intersection of two systems, by the
/// Zassenhaus block construction: row-reduce `[U U; W 0]` and read the
/// right halves of the rows whose left half vanished.
pub fn intersect(u: &LinearSystem, w: &LinearSystem) -> Vec<Lineral> {
    if !u.is_consistent() {
        return w.rows().to_vec();
    }
    if !w.is_consistent() {
        return u.rows().to_vec();
    }

    let (supp, positions) = dense_support(u, w);
    // column 0 of each half is the constant, column 1 + i the i-th
    // support variable
    let half = supp.len() + 1;
    let mut m = BitMatrix::zero(u.size() + w.size(), 2 * half);

    let mut r = 0;
    for row in u.rows() {
        if row.has_constant() {
            m.set(r, 0);
            m.set(r, half);
        }
        for &i in row.support() {
            let c = 1 + positions[&i];
            m.set(r, c);
            m.set(r, half + c);
        }
        r += 1;
    }
    for row in w.rows() {
        if row.has_constant() {
            m.set(r, 0);
        }
        for &i in row.support() {
            m.set(r, 1 + positions[&i]);
        }
        r += 1;
    }

    let rank = m.echelonize();

    let mut out = Vec::new();
    for r in (0..rank).rev() {
        if !m.row_zero_in(r, 0, half) {
            break;
        }
        let constant = m.get(r, half);
        let mut idxs = Vec::new();
        for c in half + 1..2 * half {
            if m.get(r, c) {
                idxs.push(supp[c - half - 1]);
            }
        }
        out.push(Lineral::from_sorted(idxs, constant));
    }
    out
}

/// Decides whether there is a lineral `l` with `l ∈ U` and `l + 1 ∈ W`,
/// by solving `[Uᵀ | Wᵀ] · x = e₀`; on success `l` is recovered as the
/// sum of the rows of `U` selected by the first half of the solution.
pub fn intersect_affine(u: &LinearSystem, w: &LinearSystem) -> Option<Lineral> {
    if !u.is_consistent() || !w.is_consistent() {
        return Some(Lineral::zero());
    }

    let (supp, positions) = dense_support(u, w);
    let nrows = supp.len() + 1;
    let mut m = BitMatrix::zero(nrows, u.size() + w.size());

    for (c, row) in u.rows().iter().chain(w.rows().iter()).enumerate() {
        if row.has_constant() {
            m.set(0, c);
        }
        for &i in row.support() {
            m.set(1 + positions[&i], c);
        }
    }

    let mut rhs = vec![false; nrows];
    rhs[0] = true;

    let x = m.solve(&rhs)?;

    let mut out = Lineral::zero();
    for (r, row) in u.rows().iter().enumerate() {
        if x[r] {
            out += row;
        }
    }
    debug_assert!(u.reduce(&out).is_zero());
    debug_assert!(w.reduce(&out).is_one());
    Some(out)
}

/// Iteratively extends the basis `b` by reduced elements of `l` until the
/// dimensions agree; returns the added elements.
pub fn extend_basis(b: &[Lineral], l: &LinearSystem) -> Vec<Lineral> {
    let mut basis = LinearSystem::from_linerals(b.to_vec());
    let mut out = Vec::new();
    for row in l.rows() {
        if basis.dim() == l.dim() {
            break;
        }
        let reduced = basis.reduce(row);
        if !reduced.is_zero() {
            out.push(reduced.clone());
            basis.insert(reduced);
        }
    }
    debug_assert_eq!(basis.dim(), l.dim());
    out
}
