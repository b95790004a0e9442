use crate::casm::{Casm, ToCasmResult};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Measurement {
    pub qubit: String,
    pub target: String,
}

impl Measurement {
    pub fn new(qubit: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            qubit: qubit.into(),
            target: target.into(),
        }
    }
}

impl Casm for Measurement {
    fn write(&self, writer: &mut impl std::fmt::Write) -> ToCasmResult<()> {
        write!(writer, "{} ⇨ {}  [MEASURE]", self.qubit, self.target).map_err(Into::into)
    }
}
