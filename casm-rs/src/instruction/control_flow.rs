use crate::casm::{Casm, ToCasmResult};

/// `LABEL <name>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Label { name: name.into() }
    }
}

impl Casm for Label {
    fn write(&self, writer: &mut impl std::fmt::Write) -> ToCasmResult<()> {
        write!(writer, "[{}]:", self.name).map_err(Into::into)
    }
}

/// `IF <condition> GOTO <target>`.
///
/// Neither side is interpreted: the condition is free text and the target is not checked
/// against the labels declared in the program.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConditionalJump {
    pub condition: String,
    pub target: String,
}

impl ConditionalJump {
    pub fn new(condition: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            target: target.into(),
        }
    }
}

impl Casm for ConditionalJump {
    fn write(&self, writer: &mut impl std::fmt::Write) -> ToCasmResult<()> {
        write!(writer, "IF {} THEN → {}", self.condition, self.target).map_err(Into::into)
    }
}
