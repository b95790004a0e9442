//! Types and functions related to validating CASM register tokens
use once_cell::sync::Lazy;
use regex::Regex;

/// A regex that matches only valid register tokens: `Q` or `C` followed by a decimal index
const REGISTER_REGEX: &str = r"^[QC][0-9]+$";

static REGISTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(REGISTER_REGEX).expect("regex should be valid"));

/// Which operand position a register token was found in. Only used to word error messages; the
/// validator accepts either prefix letter in every position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterRole {
    /// An operand of `X`, `H` or `CX`.
    Any,
    /// The source of a `MEASURE`.
    Quantum,
    /// The target of a `MEASURE`.
    Classical,
}

impl std::fmt::Display for RegisterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "register"),
            Self::Quantum => write!(f, "quantum register"),
            Self::Classical => write!(f, "classical register"),
        }
    }
}

/// Returns `true` if the given token is a register, such as `Q0` or `C12`
pub fn is_register(token: &str) -> bool {
    REGISTER.is_match(token)
}
