//! Rewriting CASM into its normalized display form.
//!
//! Unlike the [line validator](crate::validation::line), the normalizer never rejects input. It
//! recognizes a broader set of instruction shapes, classical pseudo-assembly included, and every
//! line it cannot rewrite is carried through as [`Instruction::Unrecognized`].

use indexmap::IndexSet;

use crate::casm::{write_join_casm, Casm, ToCasmResult};
use crate::instruction::Instruction;
use crate::program::Program;
use crate::reserved::Keyword;

mod rules;

use rules::{operands, RULES};

/// The names declared by `LABEL` lines, in order of first appearance.
pub type LabelSet = IndexSet<String>;

/// Rewrites programs line by line using a fixed, ordered table of rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize every non-blank line of `text`.
    pub fn normalize(&self, text: &str) -> NormalizedProgram {
        self.normalize_program(&Program::from(text))
    }

    pub fn normalize_program(&self, program: &Program) -> NormalizedProgram {
        let labels = collect_labels(program.lines());
        let instructions = program
            .lines()
            .iter()
            .map(|line| self.normalize_line(line))
            .collect();

        NormalizedProgram {
            labels,
            instructions,
        }
    }

    /// Rewrite a single line. The first rule whose keyword prefixes the upper-cased line decides
    /// the outcome; a line that rule cannot parse becomes [`Instruction::Unrecognized`], keeping
    /// the raw text.
    pub fn normalize_line(&self, raw: &str) -> Instruction {
        let line = raw.trim();
        let upper = line.to_uppercase();

        RULES
            .iter()
            .find(|rule| rule.applies_to(&upper))
            .and_then(|rule| (rule.parse)(line))
            .unwrap_or_else(|| Instruction::Unrecognized(raw.to_string()))
    }
}

/// Gather the name of every `LABEL` line.
///
/// The rewrite pass does not consult this set: jump targets are neither resolved nor checked.
pub fn collect_labels<S: AsRef<str>>(lines: &[S]) -> LabelSet {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| line.to_uppercase().starts_with(Keyword::Label.prefix()))
        .filter_map(operands)
        .map(|name| name.trim().to_string())
        .collect()
}

/// The result of normalizing a program: one instruction per non-blank source line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedProgram {
    labels: LabelSet,
    instructions: Vec<Instruction>,
}

impl NormalizedProgram {
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// How many lines fell through to the unrecognized-instruction marker.
    pub fn unrecognized_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instruction| !instruction.is_recognized())
            .count()
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.instructions.iter().map(ToString::to_string).collect()
    }
}

impl Casm for NormalizedProgram {
    fn write(&self, writer: &mut impl std::fmt::Write) -> ToCasmResult<()> {
        write_join_casm(writer, &self.instructions, "\n")
    }
}

impl std::fmt::Display for NormalizedProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write(f).map_err(|_| std::fmt::Error)
    }
}

/// Normalize `text`, one output line per non-blank input line, joined with newlines.
pub fn normalize(text: &str) -> String {
    Normalizer::new().normalize(text).to_string()
}

/// Normalize `text`, returning each rewritten line separately.
pub fn normalize_lines(text: &str) -> Vec<String> {
    Normalizer::new().normalize(text).to_lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("MOV R1, 5", "SET R1 ⇐ 5")]
    #[case("mov  r1 ,  5 ", "SET r1 ⇐ 5")]
    #[case("MOV R1, 5, 6", "SET R1 ⇐ 5, 6")]
    #[case("MOV R1 5", "UNKNOWN INSTRUCTION: MOV R1 5")]
    #[case("ADD R3, R1, R2", "R3 ⇐ R1 + R2")]
    #[case("add R3,R1,R2", "R3 ⇐ R1 + R2")]
    #[case("ADD R3, R1", "UNKNOWN INSTRUCTION: ADD R3, R1")]
    #[case("ADD R3, R1, R2, R4", "UNKNOWN INSTRUCTION: ADD R3, R1, R2, R4")]
    #[case("IF R3 > 12 GOTO 10", "IF R3 > 12 THEN → 10")]
    #[case("if R3 == 0 goto end", "UNKNOWN INSTRUCTION: if R3 == 0 goto end")]
    #[case("if R3 == 0 GOTO end", "IF R3 == 0 THEN → end")]
    #[case("IF goto_flag GOTO 5", "IF goto_flag THEN → 5")]
    #[case("IF  R3 > 12   GOTO   10", "IF R3 > 12 THEN → 10")]
    #[case("IF R3 > 12", "UNKNOWN INSTRUCTION: IF R3 > 12")]
    #[case("IF R3 > 12 GOTO", "UNKNOWN INSTRUCTION: IF R3 > 12 GOTO")]
    #[case("LABEL 10", "[10]:")]
    #[case("label   loop start", "[loop start]:")]
    #[case("X Q0", "X(Q0)")]
    #[case("x q0", "X(q0)")]
    #[case("X Q0 Q1", "X(Q0 Q1)")]
    #[case("H Q1", "H(Q1)")]
    #[case("CX Q0, Q1", "CX(Q0, Q1)")]
    #[case("cx Q0,Q1", "CX(Q0, Q1)")]
    #[case("CX Q0, Q1, Q2", "CX(Q0, Q1, Q2)")]
    #[case("CX Q0 Q1", "UNKNOWN INSTRUCTION: CX Q0 Q1")]
    #[case("MEASURE Q1 -> C0", "Q1 ⇨ C0  [MEASURE]")]
    #[case("measure Q1->C0", "Q1 ⇨ C0  [MEASURE]")]
    #[case("MEASURE Q1 C0", "UNKNOWN INSTRUCTION: MEASURE Q1 C0")]
    #[case("MEASURE -> C0", "UNKNOWN INSTRUCTION: MEASURE -> C0")]
    #[case("GARBAGE LINE", "UNKNOWN INSTRUCTION: GARBAGE LINE")]
    #[case("XOR Q0", "UNKNOWN INSTRUCTION: XOR Q0")]
    #[case("HALT", "UNKNOWN INSTRUCTION: HALT")]
    fn normalizes_line(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn fallback_keeps_raw_line() {
        let normalizer = Normalizer::new();
        assert_eq!(
            normalizer.normalize_line("   GARBAGE LINE \t"),
            Instruction::Unrecognized("   GARBAGE LINE \t".to_string())
        );
    }

    #[test]
    fn one_output_line_per_non_blank_input_line() {
        let text = "MOV R1, 5\n\n   \nADD R3, R1\nLABEL 10\n\nIF R1 > 0 GOTO 10\n";
        assert_eq!(
            normalize_lines(text),
            vec![
                "SET R1 ⇐ 5",
                "UNKNOWN INSTRUCTION: ADD R3, R1",
                "[10]:",
                "IF R1 > 0 THEN → 10",
            ]
        );
    }

    #[test]
    fn labels_are_collected_but_not_resolved() {
        let program =
            Normalizer::new().normalize("LABEL b\nIF R1 GOTO missing\nlabel a\nLABEL b\nLABEL");
        let labels: Vec<&str> = program.labels().iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["b", "a"]);
        assert_eq!(program.instructions()[1].to_string(), "IF R1 THEN → missing");
        assert_eq!(program.unrecognized_count(), 1);
    }

    #[test]
    fn empty_input_normalizes_to_empty_output() {
        let program = Normalizer::new().normalize("\n\n");
        assert!(program.is_empty());
        assert_eq!(program.to_string(), "");
    }

    #[test]
    fn normalize_is_repeatable() {
        let text = "MOV R1, 5\nCX Q0, Q1\nnonsense";
        assert_eq!(normalize(text), normalize(text));
    }
}
