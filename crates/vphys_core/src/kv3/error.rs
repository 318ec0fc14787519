use thiserror::Error;

/// Errors that can occur while parsing a KV3 text document.
///
/// Every variant is fatal to the whole document; no partial tree is returned.
/// Offsets are byte offsets into the source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of input while reading a value at offset {0}")]
    UnexpectedEof(usize),

    #[error("Unclosed object starting at offset {0}")]
    UnclosedObject(usize),

    #[error("Unclosed array starting at offset {0}")]
    UnclosedArray(usize),

    #[error("Unclosed byte array starting at offset {0}")]
    UnclosedByteArray(usize),

    #[error("Empty key at offset {0}")]
    EmptyKey(usize),

    #[error("No progress in {context} at offset {offset}")]
    NoProgress { context: &'static str, offset: usize },
}

impl ParseError {
    /// Byte offset the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedEof(offset)
            | ParseError::UnclosedObject(offset)
            | ParseError::UnclosedArray(offset)
            | ParseError::UnclosedByteArray(offset)
            | ParseError::EmptyKey(offset) => *offset,
            ParseError::NoProgress { offset, .. } => *offset,
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
