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

use std::fmt;

use crate::casm::{Casm, ToCasmResult};

mod classical;
mod control_flow;
mod gate;
mod measurement;

pub use self::classical::{Addition, Move};
pub use self::control_flow::{ConditionalJump, Label};
pub use self::gate::{Gate, GateName};
pub use self::measurement::Measurement;

/// Written in front of the raw text of any line the normalizer could not rewrite.
pub const UNRECOGNIZED_PREFIX: &str = "UNKNOWN INSTRUCTION: ";

/// A single normalized line of CASM.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    Move(Move),
    Addition(Addition),
    ConditionalJump(ConditionalJump),
    Label(Label),
    Gate(Gate),
    Measurement(Measurement),
    /// A line that matched no rule, or matched one but could not be parsed by it. Holds the line
    /// exactly as it appeared in the source, surrounding whitespace included.
    Unrecognized(String),
}

impl Instruction {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Casm for Instruction {
    fn write(&self, f: &mut impl std::fmt::Write) -> ToCasmResult<()> {
        match self {
            Instruction::Move(instruction) => instruction.write(f),
            Instruction::Addition(instruction) => instruction.write(f),
            Instruction::ConditionalJump(instruction) => instruction.write(f),
            Instruction::Label(instruction) => instruction.write(f),
            Instruction::Gate(instruction) => instruction.write(f),
            Instruction::Measurement(instruction) => instruction.write(f),
            Instruction::Unrecognized(raw) => {
                write!(f, "{UNRECOGNIZED_PREFIX}{raw}").map_err(Into::into)
            }
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f).map_err(|_| fmt::Error)
    }
}
