//! Error types for ide-xml

/// Result type for ide-xml operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing element trees
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax { message: String, position: u64 },

    #[error("Unexpected end of document, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    #[error("Document has no root element")]
    EmptyDocument,

    #[error("Document has more than one root element")]
    MultipleRoots,

    #[error("Failed to write XML: {0}")]
    Write(String),
}

impl Error {
    pub fn syntax(message: impl Into<String>, position: u64) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
        }
    }
}
