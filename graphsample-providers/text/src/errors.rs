use thiserror::Error;

/// Errors raised while reading or writing text graph files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TextProviderError {
    /// The input held no data lines.
    #[error("input contains no edges or nodes")]
    EmptyInput,
    /// A token could not be parsed as a node id.
    #[error("line {line}: `{token}` is not a valid node id")]
    InvalidNodeId {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// An edge-list line held more than two endpoints.
    #[error("line {line}: expected `a,b` but found `{content}`")]
    MalformedEdge {
        /// One-based line number.
        line: usize,
        /// Trimmed line content.
        content: String,
    },
    /// Reading from or writing to the underlying stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl TextProviderError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> TextProviderErrorCode {
        match self {
            Self::EmptyInput => TextProviderErrorCode::EmptyInput,
            Self::InvalidNodeId { .. } => TextProviderErrorCode::InvalidNodeId,
            Self::MalformedEdge { .. } => TextProviderErrorCode::MalformedEdge,
            Self::Io(_) => TextProviderErrorCode::Io,
        }
    }

    /// Returns the line the error was raised on, if it concerns one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidNodeId { line, .. } | Self::MalformedEdge { line, .. } => Some(*line),
            Self::EmptyInput | Self::Io(_) => None,
        }
    }
}

/// Machine-readable error codes for [`TextProviderError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TextProviderErrorCode {
    /// The input held no data lines.
    EmptyInput,
    /// A token was not a node id.
    InvalidNodeId,
    /// An edge line had too many endpoints.
    MalformedEdge,
    /// The underlying stream failed.
    Io,
}

impl TextProviderErrorCode {
    /// Returns the symbolic identifier for this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "TEXT_PROVIDER_EMPTY_INPUT",
            Self::InvalidNodeId => "TEXT_PROVIDER_INVALID_NODE_ID",
            Self::MalformedEdge => "TEXT_PROVIDER_MALFORMED_EDGE",
            Self::Io => "TEXT_PROVIDER_IO",
        }
    }
}

impl std::fmt::Display for TextProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
