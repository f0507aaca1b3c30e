/*!
Guessing paths: an external variable order for the `lex` decision
heuristic.

The file lists one positive variable index per non-comment line; the k-th
line names the variable to decide k-th. Parsing builds the permutation
mapping requested order to natural order; the solver consumes the
permutation as an opaque option and the witness is mapped back through it
before printing.
*/

use std::collections::HashMap;
use std::io::BufRead;

use crate::structures::Var;
use crate::types::err::{ErrorKind, ParseError};

/// A sparse permutation of variable indices, identity where unspecified.
#[derive(Clone, Debug, Default)]
pub struct Reordering {
    map: HashMap<Var, Var>,
}

impl Reordering {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Swaps the images of `ind` and `pos`, so that afterwards
    /// `at(ind) == old at(pos)` and vice versa. Keeps the map a bijection.
    pub fn insert(&mut self, ind: Var, pos: Var) {
        if self.at(pos) == ind {
            return;
        }
        let p_ind = self.at(ind);
        let p_pos = self.at(pos);
        self.map.insert(pos, p_ind);
        self.map.insert(ind, p_pos);
    }

    pub fn at(&self, ind: Var) -> Var {
        self.map.get(&ind).copied().unwrap_or(ind)
    }
}

/// Parses a guessing-path file into the permutation sending the variable
/// named on line k to index k.
pub fn parse_guessing_path<R: BufRead>(reader: R) -> Result<Reordering, ErrorKind> {
    let mut reordering = Reordering::default();
    let mut position: Var = 1;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|_| ParseError::Token(lineno + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        let ind: u64 = line.parse().map_err(|_| ParseError::Token(lineno + 1))?;
        if ind == 0 || ind > u64::from(Var::MAX) {
            return Err(ParseError::Token(lineno + 1).into());
        }
        reordering.insert(ind as Var, position);
        position += 1;
    }
    Ok(reordering)
}
