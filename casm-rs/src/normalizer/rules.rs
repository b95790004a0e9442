//! The ordered rewrite rules used by the [`Normalizer`](super::Normalizer).
//!
//! Rules are keyed on the upper-cased, trimmed line. Several prefixes could in principle overlap
//! as new keywords are added, so the table order is the precedence: the first rule that applies
//! owns the line, even if its parser then rejects it.

use crate::instruction::{
    Addition, ConditionalJump, Gate, GateName, Instruction, Label, Measurement, Move,
};
use crate::reserved::Keyword;

/// Turns the trimmed text of a line into an instruction, or `None` if the line is malformed.
pub(crate) type Parser = fn(&str) -> Option<Instruction>;

pub(crate) struct Rule {
    pub keyword: Keyword,
    /// A further substring the upper-cased line must contain before the rule applies.
    pub requires: Option<&'static str>,
    pub parse: Parser,
}

impl Rule {
    const fn new(keyword: Keyword, parse: Parser) -> Self {
        Self {
            keyword,
            requires: None,
            parse,
        }
    }

    pub fn applies_to(&self, upper: &str) -> bool {
        upper.starts_with(self.keyword.prefix())
            && self.requires.map_or(true, |needle| upper.contains(needle))
    }
}

pub(crate) const RULES: &[Rule] = &[
    Rule::new(Keyword::Mov, parse_move),
    Rule::new(Keyword::Add, parse_addition),
    Rule {
        keyword: Keyword::If,
        requires: Some(" GOTO "),
        parse: parse_conditional_jump,
    },
    Rule::new(Keyword::Label, parse_label),
    Rule::new(Keyword::X, parse_x),
    Rule::new(Keyword::H, parse_h),
    Rule::new(Keyword::Cx, parse_cx),
    Rule::new(Keyword::Measure, parse_measurement),
];

/// The text after the leading keyword and the whitespace that follows it.
pub(crate) fn operands(line: &str) -> Option<&str> {
    line.split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim_start())
}

fn split_pair<'a>(text: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    text.split_once(separator)
        .map(|(left, right)| (left.trim(), right.trim()))
}

fn parse_move(line: &str) -> Option<Instruction> {
    let (destination, source) = split_pair(operands(line)?, ",")?;
    Some(Instruction::Move(Move::new(destination, source)))
}

fn parse_addition(line: &str) -> Option<Instruction> {
    let parts: Vec<&str> = operands(line)?.split(',').map(str::trim).collect();
    let [destination, augend, addend] = parts.as_slice() else {
        return None;
    };
    Some(Instruction::Addition(Addition::new(
        *destination,
        *augend,
        *addend,
    )))
}

fn parse_conditional_jump(line: &str) -> Option<Instruction> {
    // Only an upper-case GOTO splits the line; a lower-case one falls back to unrecognized.
    let (condition, target) = line.split_once("GOTO")?;
    let condition = condition
        .trim()
        .get(Keyword::If.prefix().len()..)
        .unwrap_or_default()
        .trim();
    Some(Instruction::ConditionalJump(ConditionalJump::new(
        condition,
        target.trim(),
    )))
}

fn parse_label(line: &str) -> Option<Instruction> {
    Some(Instruction::Label(Label::new(operands(line)?.trim())))
}

fn parse_single_qubit_gate(name: GateName, line: &str) -> Option<Instruction> {
    let qubit = operands(line)?.trim();
    Some(Instruction::Gate(Gate::new(name, vec![qubit.to_string()])))
}

fn parse_x(line: &str) -> Option<Instruction> {
    parse_single_qubit_gate(GateName::X, line)
}

fn parse_h(line: &str) -> Option<Instruction> {
    parse_single_qubit_gate(GateName::H, line)
}

fn parse_cx(line: &str) -> Option<Instruction> {
    let (control, target) = split_pair(operands(line)?, ",")?;
    Some(Instruction::Gate(Gate::new(
        GateName::Cx,
        vec![control.to_string(), target.to_string()],
    )))
}

fn parse_measurement(line: &str) -> Option<Instruction> {
    let (before, target) = split_pair(line, "->")?;
    let qubit = operands(before)?.trim();
    Some(Instruction::Measurement(Measurement::new(qubit, target)))
}
