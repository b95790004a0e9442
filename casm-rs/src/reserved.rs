//! This module contains enums for the reserved words of CASM

use strum;

/// The opcodes accepted by the line validator.
///
/// Matching is case-sensitive: `x Q0` is an unknown opcode to the validator, even though the
/// normalizer would happily rewrite it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Opcode {
    X,
    H,
    Cx,
    Measure,
}

impl Opcode {
    /// `true` for the single-arrow measurement form, `MEASURE <reg> -> <reg>`.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Self::Measure)
    }
}

/// The leading keywords the normalizer recognizes, in the order they are tried.
///
/// The normalizer matches these against the upper-cased line through [`Keyword::prefix`], so no
/// parsing from text is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Mov,
    Add,
    If,
    Label,
    X,
    H,
    Cx,
    Measure,
}

impl Keyword {
    /// The keyword followed by the single space that must separate it from its operands.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Mov => "MOV ",
            Self::Add => "ADD ",
            Self::If => "IF ",
            Self::Label => "LABEL ",
            Self::X => "X ",
            Self::H => "H ",
            Self::Cx => "CX ",
            Self::Measure => "MEASURE ",
        }
    }
}
