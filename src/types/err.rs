/*!
Error types used in the library.

- Parse errors abort the current invocation with a user-visible message.
- Build errors surface malformed clause lists handed to a context directly.
- Capacity errors report inputs exceeding the representation width of the
  variable-index type, with a hint towards the roomier representation.

Unsatisfiability, satisfiability, and cancellation are *outcomes*, not
errors; see [Report](crate::reports::Report).
*/

use crate::structures::Var;

/// A union of the varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error related to parsing.
    Parse(ParseError),

    /// An error when building a context from clauses.
    Build(BuildError),

    /// An input exceeding some representation width.
    Capacity(CapacityError),
}

/// Errors during parsing of XNF or guessing-path input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem line of an XNF input.
    ProblemSpecification,

    /// An unreadable token at a specific line.
    Token(usize),

    /// A clause with more than two linerals, so the input is not 2-XNF.
    NotTwoXnf(usize),

    /// A variable index exceeding the count announced by the header.
    OversizedVariable(usize),

    /// No file was found at the given path.
    NoFile,
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors when building a context from a clause list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// A clause with more than two linerals, so the input is not 2-XNF.
    NotTwoXnf,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Inputs exceeding the width of some index type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CapacityError {
    /// The variable count does not fit the variable-index type.
    Variables(u64),

    /// The clause count does not fit the clause-index type.
    Clauses(u64),

    /// The vertex-label store ran out of node indices.
    ///
    /// The hash-map store is not subject to this limit; switch with the
    /// `trie` cargo feature disabled.
    LabelStore,
}

impl From<CapacityError> for ErrorKind {
    fn from(e: CapacityError) -> Self {
        ErrorKind::Capacity(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ErrorKind::Parse(ParseError::ProblemSpecification) => {
                write!(f, "malformed problem line, expected 'p xnf <vars> <clauses>'")
            }
            ErrorKind::Parse(ParseError::Token(line)) => {
                write!(f, "unreadable token on line {line}")
            }
            ErrorKind::Parse(ParseError::NotTwoXnf(line)) => {
                write!(f, "clause on line {line} has more than two linerals")
            }
            ErrorKind::Parse(ParseError::OversizedVariable(line)) => {
                write!(f, "variable on line {line} exceeds the header count")
            }
            ErrorKind::Parse(ParseError::NoFile) => write!(f, "file not found"),
            ErrorKind::Build(BuildError::NotTwoXnf) => {
                write!(f, "given clauses are not in 2-XNF")
            }
            ErrorKind::Capacity(CapacityError::Variables(n)) => {
                write!(f, "{n} variables exceed the width of the index type ({} max)", Var::MAX)
            }
            ErrorKind::Capacity(CapacityError::Clauses(n)) => {
                write!(f, "{n} clauses exceed the width of the index type")
            }
            ErrorKind::Capacity(CapacityError::LabelStore) => {
                write!(f, "vertex-label store overflow; use the hash-map store")
            }
        }
    }
}
