/// A trait to wrap items which have a normalized CASM display form.
pub trait Casm {
    /// Return the normalized form of the item as a string.
    fn to_casm(&self) -> Result<String, ToCasmError> {
        let mut buffer = String::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }

    /// Write the normalized form of the item to the given writer.
    fn write(&self, writer: &mut impl std::fmt::Write) -> Result<(), ToCasmError>;
}

pub type ToCasmResult<T> = Result<T, ToCasmError>;

/// Errors which can occur when rendering a CASM item to a string.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ToCasmError {
    #[error("Failed to write CASM: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Write a sequence of CASM items to the given writer, joined with the provided `joiner`.
pub(crate) fn write_join_casm<'i, I, T>(
    writer: &mut impl std::fmt::Write,
    values: I,
    joiner: &str,
) -> ToCasmResult<()>
where
    I: IntoIterator<Item = &'i T>,
    T: Casm + 'i,
{
    let mut iter = values.into_iter();
    if let Some(first) = iter.next() {
        first.write(writer)?;

        for value in iter {
            write!(writer, "{joiner}")?;
            value.write(writer)?;
        }
    }
    Ok(())
}

impl Casm for String {
    fn write(&self, writer: &mut impl std::fmt::Write) -> ToCasmResult<()> {
        write!(writer, "{self}").map_err(Into::into)
    }
}
