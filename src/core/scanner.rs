// Byte-level helpers for field splitting and quote balancing.

/// The standard CSV quote byte.
pub const DQUOTE: u8 = b'"';

/// True for the two bytes that end a physical line.
#[inline]
pub fn is_line_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// True if `byte` can end a field: the separator or a line terminator.
/// Quote state is the caller's business.
#[inline]
pub fn is_terminator(byte: u8, separator: u8) -> bool {
    byte == separator || is_line_terminator(byte)
}

/// Drop any trailing `\r` / `\n` bytes.
#[inline]
pub fn strip_line_terminator(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && is_line_terminator(bytes[end - 1]) {
        end -= 1;
    }
    &bytes[..end]
}
