// Copyright 2021 Rigetti Computing
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::convert::Infallible;
use std::str::FromStr;

use crate::normalizer::{NormalizedProgram, Normalizer};
use crate::validation::line::ValidationReport;

pub mod listing;
pub mod trace;

use listing::Listing;
use trace::EmissionTrace;

/// A CASM program: the non-blank lines of some source text, in order.
///
/// Lines are stored exactly as written, including any surrounding whitespace; blank lines (empty
/// or whitespace-only) are dropped when the program is built and are not counted when numbering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Program {
    lines: Vec<String>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a program from lines that have already been split, dropping blank ones.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(Into::into)
                .filter(|line: &String| !line.trim().is_empty())
                .collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check every line against the quantum-instruction grammar.
    pub fn validate(&self) -> ValidationReport {
        ValidationReport::from_lines(&self.lines)
    }

    /// Validate the program and, if every line passes, render its listing.
    pub fn compile(&self) -> Result<Listing, ValidationReport> {
        let report = self.validate();
        if report.is_valid() {
            Ok(self.listing())
        } else {
            Err(report)
        }
    }

    /// The numbered listing of the program, regardless of validity.
    pub fn listing(&self) -> Listing {
        Listing::new(&self.lines)
    }

    pub fn normalize(&self) -> NormalizedProgram {
        Normalizer::new().normalize_program(self)
    }

    pub fn emission_trace(&self) -> EmissionTrace {
        EmissionTrace::new(&self.lines)
    }
}

impl From<&str> for Program {
    fn from(text: &str) -> Self {
        Self::from_lines(text.lines())
    }
}

impl FromStr for Program {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
