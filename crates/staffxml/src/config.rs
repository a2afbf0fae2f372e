//! Reader and writer configuration

use crate::error::{Error, ErrorKind, Result};

/// Largest indent width accepted by the XML writer
pub const MAX_INDENT: usize = 16;

/// Configuration shared by the CSV reader and the XML writer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Field separator for CSV input
    pub delimiter: u8,
    /// Spaces per nesting level in written documents
    pub indent: usize,
    /// Emit the `<?xml ...?>` declaration line
    pub declaration: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b',',
            indent: 4,
            declaration: true,
        }
    }
}

impl Config {
    /// Create a config with a specific delimiter and indent width
    pub const fn new(delimiter: u8, indent: usize) -> Self {
        Self {
            delimiter,
            indent,
            declaration: true,
        }
    }

    /// Compact single-line output without a declaration
    pub const fn compact() -> Self {
        Self {
            delimiter: b',',
            indent: 0,
            declaration: false,
        }
    }

    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Reject settings the reader or writer cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.indent > MAX_INDENT {
            return Err(Error::new(
                ErrorKind::Config,
                format!("indent width {} exceeds {MAX_INDENT}", self.indent),
            ));
        }
        if !self.delimiter.is_ascii() || matches!(self.delimiter, b'\n' | b'\r') {
            return Err(Error::new(
                ErrorKind::Config,
                format!("unusable delimiter byte 0x{:02x}", self.delimiter),
            ));
        }
        Ok(())
    }
}
