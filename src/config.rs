// Parser configuration: the separator byte and the logical line buffer.

use crate::core::quote::SMART_QUOTE_LEAD;
use crate::core::scanner::DQUOTE;
use crate::error::{Error, Result};

/// Default logical line buffer in bytes.
pub const DEFAULT_MAX_LINE_BUFFER: usize = 8096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Field separator byte.
    pub separator: u8,
    /// Upper bound for a logical line that is still waiting for a quote to
    /// close. Once the joined lines pass 7/8 of this, the line is cut.
    pub max_line_buffer: usize,
}

impl ParserConfig {
    /// Comma separated values
    pub fn csv() -> Self {
        Self::dsv(b',')
    }

    /// Tab separated values
    pub fn tsv() -> Self {
        Self::dsv(b'\t')
    }

    /// Values separated by an arbitrary byte
    pub fn dsv(separator: u8) -> Self {
        ParserConfig {
            separator,
            max_line_buffer: DEFAULT_MAX_LINE_BUFFER,
        }
    }

    pub fn with_max_line_buffer(mut self, max_line_buffer: usize) -> Self {
        self.max_line_buffer = max_line_buffer;
        self
    }

    /// Size at which an unbalanced logical line gets force cut.
    pub fn cut_threshold(&self) -> usize {
        self.max_line_buffer / 8 * 7 + self.max_line_buffer % 8 * 7 / 8
    }

    pub fn validate(&self) -> Result<()> {
        match self.separator {
            DQUOTE | b'\n' | b'\r' | SMART_QUOTE_LEAD => {
                return Err(Error::InvalidSeparator(self.separator))
            }
            _ => {}
        }
        if self.max_line_buffer == 0 {
            return Err(Error::InvalidLineBuffer(self.max_line_buffer));
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::csv()
    }
}
