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

//! Tooling for CASM, a small line-oriented text format mixing classical
//! pseudo-assembly (`MOV`, `ADD`, `IF ... GOTO`, `LABEL`) with quantum register
//! operations (`X`, `H`, `CX`, `MEASURE`).
//!
//! Within this crate you'll find:
//!
//! * A [line validator] that checks quantum instructions against a fixed grammar
//! * A [normalizer] that rewrites any line into a readable display form
//! * A [listing] renderer and an [emission trace] for validated programs
//!
//! Both the validator and the normalizer are pure functions of their input and
//! hold no state between calls.
//!
//! [emission trace]: crate::program::trace::EmissionTrace
//! [line validator]: crate::validation::line::validate_line
//! [listing]: crate::program::listing::Listing
//! [normalizer]: crate::normalizer::Normalizer

pub mod casm;
pub mod instruction;
pub mod normalizer;
pub mod program;
pub mod reserved;
pub mod validation;

pub use normalizer::{normalize, normalize_lines, Normalizer};
pub use program::listing::format_listing;
pub use program::trace::emit;
pub use program::Program;
pub use validation::line::validate_lines;
