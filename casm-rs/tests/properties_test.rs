//! Properties that hold for arbitrary input text.

use proptest::prelude::*;

use casm_rs::{normalize, normalize_lines, validate_lines};

fn non_blank_line_count(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Lines built from fragments of the CASM vocabulary, so that every rule gets exercised.
fn casm_like_line() -> impl Strategy<Value = String> {
    let words = prop::sample::select(vec![
        "MOV", "ADD", "IF", "GOTO", "LABEL", "X", "H", "CX", "MEASURE", "->", ",", "Q0", "C1",
        "R2", "12", ">", "mov", "cx", "", " ", "\t",
    ]);
    prop::collection::vec(words, 0..6).prop_map(|words| words.join(" "))
}

fn casm_like_program() -> impl Strategy<Value = String> {
    prop::collection::vec(casm_like_line(), 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn normalizer_keeps_one_line_per_source_line(text in casm_like_program()) {
        prop_assert_eq!(normalize_lines(&text).len(), non_blank_line_count(&text));
    }

    #[test]
    fn normalizer_keeps_line_count_for_any_text(text in "(?s).{0,200}") {
        prop_assert_eq!(normalize_lines(&text).len(), non_blank_line_count(&text));
    }

    #[test]
    fn validator_reports_at_most_one_error_per_line(text in casm_like_program()) {
        prop_assert!(validate_lines(&text).len() <= non_blank_line_count(&text));
    }

    #[test]
    fn both_are_repeatable(text in casm_like_program()) {
        prop_assert_eq!(validate_lines(&text), validate_lines(&text));
        prop_assert_eq!(normalize(&text), normalize(&text));
    }
}
