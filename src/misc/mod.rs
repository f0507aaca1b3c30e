//! Miscellaneous items, at present only [log] targets.

pub mod log;
