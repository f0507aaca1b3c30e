/*!
Sparse representation of a lineral, an affine linear form over GF(2).

A lineral `c ⊕ x_{i₁} ⊕ … ⊕ x_{iₖ}` is stored as its constant bit together
with the strictly increasing sequence `i₁ < … < iₖ` of variable indices.
Index 0 never appears in the sequence; a 0 handed to a constructor is
folded into the constant bit.

A lineral stands for the constraint "this form evaluates to 0":
[eval](Lineral::eval) returns true on assignments satisfying the
constraint. Under this convention the lineral `0` is always true, `1` is
always false, and the XNF literal `a` is the lineral `x_a + 1`.
*/

use crate::structures::linear_system::LinearSystem;
use crate::structures::Var;

/// A sparse affine form over GF(2).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Lineral {
    /// The constant term.
    constant: bool,

    /// Sorted, duplicate-free sequence of variable indices; 0 excluded.
    idxs: Vec<Var>,
}

impl Lineral {
    /// The zero lineral, the trivially true constraint.
    pub fn zero() -> Self {
        Lineral::default()
    }

    /// The one lineral, the trivially false constraint.
    pub fn one() -> Self {
        Lineral {
            constant: true,
            idxs: Vec::new(),
        }
    }

    /// A lineral from an arbitrary index sequence.
    ///
    /// The sequence is sorted and deduplicated; an index 0 toggles the
    /// constant instead of entering the support.
    pub fn new(mut idxs: Vec<Var>) -> Self {
        idxs.sort_unstable();
        idxs.dedup();
        let mut constant = false;
        if idxs.first() == Some(&0) {
            idxs.remove(0);
            constant = true;
        }
        Lineral { constant, idxs }
    }

    /// A lineral from an already sorted, duplicate-free sequence.
    ///
    /// A leading 0 is still folded into the constant.
    pub fn from_sorted(mut idxs: Vec<Var>, mut constant: bool) -> Self {
        debug_assert!(idxs.windows(2).all(|w| w[0] < w[1]));
        if idxs.first() == Some(&0) {
            idxs.remove(0);
            constant ^= true;
        }
        Lineral { constant, idxs }
    }

    /// A lineral over a single variable.
    pub fn from_var(v: Var) -> Self {
        debug_assert!(v > 0);
        Lineral {
            constant: false,
            idxs: vec![v],
        }
    }

    pub fn is_zero(&self) -> bool {
        !self.constant && self.idxs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.constant && self.idxs.is_empty()
    }

    pub fn has_constant(&self) -> bool {
        self.constant
    }

    /// The smallest index of the support, 0 for a constant lineral.
    pub fn leading_term(&self) -> Var {
        self.idxs.first().copied().unwrap_or(0)
    }

    /// Size of the support.
    pub fn len(&self) -> usize {
        self.idxs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idxs.is_empty()
    }

    pub fn support(&self) -> &[Var] {
        &self.idxs
    }

    /// Whether the form has the given term; index 0 queries the constant.
    pub fn contains(&self, idx: Var) -> bool {
        if idx == 0 {
            self.constant
        } else {
            self.idxs.binary_search(&idx).is_ok()
        }
    }

    /// This lineral plus one.
    pub fn plus_one(&self) -> Self {
        Lineral {
            constant: !self.constant,
            idxs: self.idxs.clone(),
        }
    }

    /// Flips the constant in place.
    pub fn add_one(&mut self) {
        self.constant ^= true;
    }

    /// Evaluates the constraint "form = 0" under the assignment `sol`,
    /// where `sol[i - 1]` is the value of variable `i`.
    pub fn eval(&self, sol: &[bool]) -> bool {
        let mut out = !self.constant;
        for &i in &self.idxs {
            out ^= sol[(i - 1) as usize];
        }
        out
    }

    /// Flips the leading variable of `sol` so that the constraint holds.
    pub fn solve(&self, sol: &mut [bool]) {
        let lt = self.leading_term();
        if lt > 0 && !self.eval(sol) {
            sol[(lt - 1) as usize] = !sol[(lt - 1) as usize];
        }
    }

    /// Reduces this lineral by a linear system: afterwards no pivot of
    /// `sys` occurs in the support. Returns whether anything changed.
    ///
    /// Of the two equivalent strategies the cheaper one is picked: iterate
    /// the pivots when the support is large relative to the system,
    /// otherwise look up each support index in the pivot map.
    pub fn reduce(&mut self, sys: &LinearSystem) -> bool {
        if sys.size() == 0 {
            return false;
        }
        let n = self.idxs.len();
        let log2 = if n == 0 { 0 } else { n.ilog2() as usize };
        if n > log2 * sys.size() {
            let mut changed = false;
            for (&lt, &row) in sys.pivots() {
                if self.contains(lt) {
                    *self += sys.row(row);
                    changed = true;
                }
            }
            changed
        } else {
            let mut rows = Vec::new();
            for &i in &self.idxs {
                if let Some(&row) = sys.pivots().get(&i) {
                    rows.push(row);
                }
            }
            for &row in &rows {
                *self += sys.row(row);
            }
            !rows.is_empty()
        }
    }

    /// Reduces by per-variable assignments: while some support index `i`
    /// has a nonzero `assignments[i]`, that assignment is added in.
    pub fn reduce_with_assignments(&mut self, assignments: &[Lineral]) -> bool {
        let mut changed = false;
        let mut offset = 0;
        while offset < self.idxs.len() {
            let idx = self.idxs[offset] as usize;
            if assignments[idx].leading_term() > 0 {
                changed = true;
                *self += &assignments[idx];
            } else {
                offset += 1;
            }
        }
        changed
    }

    /// As [reduce_with_assignments](Lineral::reduce_with_assignments), but
    /// only assignments made at decision level `dl` or below are used.
    pub fn reduce_with_assignments_filtered(
        &mut self,
        assignments: &[Lineral],
        assignment_dls: &[Var],
        dl: Var,
    ) -> bool {
        let mut changed = false;
        let mut offset = 0;
        while offset < self.idxs.len() {
            let idx = self.idxs[offset] as usize;
            if assignments[idx].leading_term() > 0 && assignment_dls[idx] <= dl {
                changed = true;
                *self += &assignments[idx];
            } else {
                offset += 1;
            }
        }
        changed
    }

    /// Reduces with assignments as long as the leading term can be reduced.
    pub fn lt_reduce(&mut self, assignments: &[Lineral]) -> bool {
        let changed = !assignments[self.leading_term() as usize].is_zero();
        while !assignments[self.leading_term() as usize].is_zero() {
            *self += &assignments[self.leading_term() as usize];
        }
        changed
    }

    /// The XNF token of this lineral, e.g. `-1+3` for `x1+x3`.
    ///
    /// Under the "form = 0" reading a lineral without constant is a
    /// complemented literal, hence the sign on the first index.
    pub fn to_xnf_token(&self) -> String {
        if self.idxs.is_empty() && !self.constant {
            return String::new();
        }
        let mut out = String::new();
        if !self.constant {
            out.push('-');
        }
        let mut first = true;
        for &i in &self.idxs {
            if !first {
                out.push('+');
            }
            out.push_str(&i.to_string());
            first = false;
        }
        out
    }
}

impl std::ops::AddAssign<&Lineral> for Lineral {
    fn add_assign(&mut self, other: &Lineral) {
        self.constant ^= other.constant;
        if other.idxs.is_empty() {
            return;
        }
        let lhs = std::mem::take(&mut self.idxs);
        let mut merged = Vec::with_capacity(lhs.len() + other.idxs.len());
        let (mut i, mut j) = (0, 0);
        while i < lhs.len() && j < other.idxs.len() {
            match lhs[i].cmp(&other.idxs[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(lhs[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(other.idxs[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&lhs[i..]);
        merged.extend_from_slice(&other.idxs[j..]);
        self.idxs = merged;
    }
}

impl std::ops::Add<&Lineral> for &Lineral {
    type Output = Lineral;

    fn add(self, other: &Lineral) -> Lineral {
        let mut out = self.clone();
        out += other;
        out
    }
}

impl PartialOrd for Lineral {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Lineral {
    /// Lexicographic on the index sequence with length tiebreak, then the
    /// constant bit.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.idxs
            .cmp(&other.idxs)
            .then(self.constant.cmp(&other.constant))
    }
}

impl std::fmt::Display for Lineral {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.idxs.is_empty() {
            return write!(f, "{}", if self.constant { "1" } else { "0" });
        }
        let mut first = true;
        for &i in &self.idxs {
            if !first {
                write!(f, "+")?;
            }
            write!(f, "x{i}")?;
            first = false;
        }
        if self.constant {
            write!(f, "+1")?;
        }
        Ok(())
    }
}
