//! Line-by-line validation of quantum CASM instructions.
//!
//! The grammar is deliberately small: an opcode from [`Opcode`], followed by register operands.
//! `MEASURE` additionally requires the `MEASURE <reg> -> <reg>` shape. Nothing about arity is
//! checked for the gate opcodes, so `CX Q0` and `CX Q0 Q1 Q2` both pass.

use std::str::FromStr;

use serde::Serialize;

use super::register::{is_register, RegisterRole};
use crate::program::Program;
use crate::reserved::Opcode;

/// The arrow separating the two operands of a `MEASURE`.
pub const MEASURE_ARROW: &str = "->";

/// Reasons a single line can fail validation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LineValidationError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Unknown opcode '{0}'")]
    UnknownOpcode(String),

    #[error("Invalid MEASURE syntax (expected: MEASURE Q1 -> C0)")]
    InvalidMeasureSyntax,

    #[error("Invalid {role} '{token}'")]
    InvalidRegister { role: RegisterRole, token: String },
}

pub type LineValidationResult = Result<(), LineValidationError>;

/// Check one line of source against the grammar.
///
/// Leading and trailing whitespace is ignored; the line is split on runs of whitespace.
pub fn validate_line(line: &str) -> LineValidationResult {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (op, operands) = tokens
        .split_first()
        .ok_or(LineValidationError::EmptyLine)?;

    let opcode =
        Opcode::from_str(op).map_err(|_| LineValidationError::UnknownOpcode(op.to_string()))?;

    if opcode.is_measurement() {
        return validate_measurement(operands);
    }

    match operands.iter().find(|token| !is_register(token)) {
        Some(token) => Err(invalid_register(RegisterRole::Any, token)),
        None => Ok(()),
    }
}

fn validate_measurement(operands: &[&str]) -> LineValidationResult {
    let [qubit, arrow, target] = operands else {
        return Err(LineValidationError::InvalidMeasureSyntax);
    };
    if *arrow != MEASURE_ARROW {
        return Err(LineValidationError::InvalidMeasureSyntax);
    }
    if !is_register(qubit) {
        return Err(invalid_register(RegisterRole::Quantum, qubit));
    }
    if !is_register(target) {
        return Err(invalid_register(RegisterRole::Classical, target));
    }
    Ok(())
}

fn invalid_register(role: RegisterRole, token: &str) -> LineValidationError {
    LineValidationError::InvalidRegister {
        role,
        token: token.to_string(),
    }
}

/// A validation failure, tagged with the 1-based position of the line among the non-blank lines
/// of its program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineError {
    pub line_number: usize,
    #[serde(serialize_with = "serialize_display")]
    pub error: LineValidationError,
}

fn serialize_display<S>(error: &LineValidationError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}

/// Every failure found in a program, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: Vec<LineError>,
}

impl ValidationReport {
    /// Validate each line, collecting every failure rather than stopping at the first.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let errors = lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                validate_line(line.as_ref()).err().map(|error| LineError {
                    line_number: index + 1,
                    error,
                })
            })
            .collect();
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }

    /// The error messages alone, one per failing line.
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|line_error| line_error.error.to_string())
            .collect()
    }
}

/// Validate every non-blank line of `text`, returning one message per failing line.
///
/// An empty result means the whole program is valid.
pub fn validate_lines(text: &str) -> Vec<String> {
    Program::from(text).validate().messages()
}
