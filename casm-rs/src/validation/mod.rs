//! Checking CASM source against the fixed quantum-instruction grammar.

pub mod line;
pub mod register;
