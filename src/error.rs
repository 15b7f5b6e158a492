// Error type shared by every parse entry point.
//
// Malformed quoting is not an error: it is logged and the parser keeps
// going. Out-of-range lookups are not errors either, see `CellStatus`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The source could not be opened or read.
    #[error("unable to read {name}: {source}")]
    SourceUnreadable {
        name: String,
        #[source]
        source: std::io::Error,
    },
    /// The separator byte can never split a field.
    #[error("invalid separator byte {0:#04x}")]
    InvalidSeparator(u8),
    /// The logical line buffer must hold at least one byte.
    #[error("invalid line buffer size {0}")]
    InvalidLineBuffer(usize),
}

impl Error {
    pub(crate) fn unreadable(name: &str, source: std::io::Error) -> Self {
        Error::SourceUnreadable {
            name: name.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
