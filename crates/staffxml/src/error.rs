//! Error types for staffxml

use std::fmt;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Position in an XML source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input or document location does not exist
    SourceNotFound,
    /// One CSV row could not be turned into an employee
    MalformedRecord { line: u64 },
    /// Persisted document is not well-formed XML
    Parse,
    /// Well-formed XML that is not an employee document
    InvalidDocument,
    /// Any other read or write fault
    Io,
    /// Rejected configuration
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound => write!(f, "source not found"),
            Self::MalformedRecord { line } => write!(f, "malformed record on line {line}"),
            Self::Parse => write!(f, "xml parse error"),
            Self::InvalidDocument => write!(f, "invalid employee document"),
            Self::Io => write!(f, "i/o error"),
            Self::Config => write!(f, "configuration error"),
        }
    }
}

/// Main error type for staffxml
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    pos: Option<Pos>,
    message: String,
    #[source]
    source: Option<io::Error>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            pos: None,
            message: message.into(),
            source: None,
        }
    }

    /// Create a parse error at a specific position
    pub fn parse_at(pos: Pos, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: ErrorKind::Parse,
            pos: Some(pos),
            message: format!("{message} at {pos}"),
            source: None,
        }
    }

    /// Classify an I/O failure on `path`; a missing file becomes `SourceNotFound`
    pub fn io(path: &Path, source: io::Error) -> Self {
        let kind = match source.kind() {
            io::ErrorKind::NotFound => ErrorKind::SourceNotFound,
            _ => ErrorKind::Io,
        };
        Self {
            kind,
            pos: None,
            message: format!("{}: {source}", path.display()),
            source: Some(source),
        }
    }

    /// Wrap a write failure on `path`; always `Io`, even for a missing directory
    pub fn write(path: &Path, source: io::Error) -> Self {
        Self {
            kind: ErrorKind::Io,
            pos: None,
            message: format!("writing {}: {source}", path.display()),
            source: Some(source),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type alias for staffxml
pub type Result<T> = std::result::Result<T, Error>;
