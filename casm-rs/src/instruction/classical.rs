use crate::casm::{Casm, ToCasmResult};

/// `MOV <destination>, <source>`, rendered as an assignment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub destination: String,
    pub source: String,
}

impl Move {
    pub fn new(destination: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            source: source.into(),
        }
    }
}

impl Casm for Move {
    fn write(&self, f: &mut impl std::fmt::Write) -> ToCasmResult<()> {
        write!(f, "SET {} ⇐ {}", self.destination, self.source).map_err(Into::into)
    }
}

/// `ADD <destination>, <augend>, <addend>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Addition {
    pub destination: String,
    pub augend: String,
    pub addend: String,
}

impl Addition {
    pub fn new(
        destination: impl Into<String>,
        augend: impl Into<String>,
        addend: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            augend: augend.into(),
            addend: addend.into(),
        }
    }
}

impl Casm for Addition {
    fn write(&self, f: &mut impl std::fmt::Write) -> ToCasmResult<()> {
        write!(
            f,
            "{} ⇐ {} + {}",
            self.destination, self.augend, self.addend
        )
        .map_err(Into::into)
    }
}
