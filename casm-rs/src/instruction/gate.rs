use crate::casm::{write_join_casm, Casm, ToCasmResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum GateName {
    X,
    H,
    Cx,
}

/// A gate applied to its operands, rendered in call syntax such as `CX(Q0, Q1)`.
///
/// Operands are kept as written; the normalizer does not check that they are registers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gate {
    pub name: GateName,
    pub qubits: Vec<String>,
}

impl Gate {
    pub fn new(name: GateName, qubits: Vec<String>) -> Self {
        Self { name, qubits }
    }
}

impl Casm for Gate {
    fn write(&self, f: &mut impl std::fmt::Write) -> ToCasmResult<()> {
        write!(f, "{}(", self.name)?;
        write_join_casm(f, &self.qubits, ", ")?;
        write!(f, ")").map_err(Into::into)
    }
}
