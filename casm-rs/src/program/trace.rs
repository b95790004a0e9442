//! A step-by-step echo of a program, as if each line were being executed in turn.
//!
//! Nothing is executed; the trace only restates the source.

use std::fmt;

use serde::Serialize;

/// The final line of every [`EmissionTrace`].
pub const EMISSION_COMPLETE: &str = "✔ Emission complete.";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmissionTrace {
    steps: Vec<String>,
}

impl EmissionTrace {
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            steps: lines
                .iter()
                .enumerate()
                .map(|(index, line)| format!("[{:02}] Executing → {}", index + 1, line.as_ref()))
                .collect(),
        }
    }

    /// One entry per source line; the completion marker is not included.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }
}

impl fmt::Display for EmissionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        write!(f, "{EMISSION_COMPLETE}")
    }
}

/// Render the emission trace of every non-blank line of `text`.
pub fn emit(text: &str) -> String {
    crate::Program::from(text).emission_trace().to_string()
}
