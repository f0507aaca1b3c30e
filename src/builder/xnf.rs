/*!
The XNF text format.

Lines starting with `c` are comments. A header `p xnf N M` declares `N`
variables and `M` clauses. Every other non-empty line is a clause of
whitespace-separated lineral tokens terminated by `0`. A token `a+b+c` is
a lineral over signed variable indices (positive for the plain variable,
negative for its complement), so `-1+2` reads as `x1 + x2`. A line
starting with `x` is an XOR-clause: the single lineral obtained by
XOR-summing its variable tokens.

Clauses of more than two linerals are rejected, as the input would not be
2-XNF.
*/

use std::io::BufRead;

use crate::builder::Reordering;
use crate::misc::log::targets;
use crate::structures::{Clause, Lineral, Var};
use crate::types::err::{CapacityError, ErrorKind, ParseError};

/// A parsed XNF formula.
#[derive(Clone, Debug)]
pub struct ParsedXnf {
    pub var_count: Var,
    pub clause_count: u32,
    pub clauses: Vec<Clause>,
}

/// Parses XNF text, mapping every variable through the reordering.
pub fn parse_xnf<R: BufRead>(reader: R, reorder: &Reordering) -> Result<ParsedXnf, ErrorKind> {
    let mut var_count: Var = 0;
    let mut clause_count: u32 = 0;
    let mut clauses: Vec<Clause> = Vec::new();

    for (lineno0, line) in reader.lines().enumerate() {
        let lineno = lineno0 + 1;
        let line = line.map_err(|_| ParseError::Token(lineno))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words[0] == "p" {
            if words.len() < 4 {
                return Err(ParseError::ProblemSpecification.into());
            }
            if words[1] != "xnf" {
                log::warn!(
                    target: targets::PARSER,
                    "file format given as '{}', continuing as xnf",
                    words[1]
                );
            }
            let vars: u64 = words[2]
                .parse()
                .map_err(|_| ParseError::ProblemSpecification)?;
            if vars > u64::from(Var::MAX) {
                return Err(CapacityError::Variables(vars).into());
            }
            let cls: u64 = words[3]
                .parse()
                .map_err(|_| ParseError::ProblemSpecification)?;
            if cls > u64::from(u32::MAX) {
                return Err(CapacityError::Clauses(cls).into());
            }
            var_count = vars as Var;
            clause_count = cls as u32;
            continue;
        }

        // an x-line collapses into a single XOR-summed lineral token
        let tokens: Vec<String> = if words[0] == "x" {
            vec![words[1..]
                .iter()
                .filter(|w| **w != "0")
                .copied()
                .collect::<Vec<_>>()
                .join("+")]
        } else {
            words.iter().map(|w| w.to_string()).collect()
        };

        let mut clause: Clause = Vec::new();
        for token in &tokens {
            if token.as_str() == "0" {
                break;
            }
            let mut idxs: Vec<Var> = Vec::new();
            let mut need_zero = true;
            for part in token.split('+') {
                let value: i64 = part.parse().map_err(|_| ParseError::Token(lineno))?;
                if value > 0 {
                    if value as u64 > u64::from(var_count) {
                        return Err(ParseError::OversizedVariable(lineno).into());
                    }
                    idxs.push(reorder.at(value as Var));
                } else if value == 0 {
                    // nonstandard: a '+0' term reads as a complementation
                    need_zero ^= true;
                } else {
                    let abs = value.unsigned_abs();
                    if abs > u64::from(var_count) {
                        return Err(ParseError::OversizedVariable(lineno).into());
                    }
                    idxs.push(reorder.at(abs as Var));
                    need_zero ^= true;
                }
            }
            if need_zero {
                idxs.push(0);
            }
            if !idxs.is_empty() {
                clause.push(Lineral::new(idxs));
            }
        }

        if clause.len() > 2 {
            return Err(ParseError::NotTwoXnf(lineno).into());
        }
        if !clause.is_empty() {
            clauses.push(clause);
        }
    }

    if clauses.len() as u32 != clause_count {
        log::warn!(
            target: targets::PARSER,
            "header announced {} clauses, found {}",
            clause_count,
            clauses.len()
        );
    }

    Ok(ParsedXnf {
        var_count,
        clause_count,
        clauses,
    })
}
