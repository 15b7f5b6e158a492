// Quote tracking shared by line assembly and field tokenizing.
//
// Two independent quote kinds are tracked:
// - Standard `"`: toggles on every occurrence. Doubled quotes toggle twice,
//   so they never change the balance.
// - "Smart" quotes: the typographic U+201C / U+201D pair some spreadsheet
//   exports emit instead of `"`. They are matched as raw 3-byte UTF-8
//   sequences, not decoded. This is a heuristic for one tool's output and
//   is kept exactly that narrow; other typographic quotes are plain data.

use super::scanner::DQUOTE;

/// Lead byte shared by both smart quote encodings.
pub const SMART_QUOTE_LEAD: u8 = 0xE2;

/// U+201C LEFT DOUBLE QUOTATION MARK
pub const SMART_QUOTE_OPEN: [u8; 3] = [0xE2, 0x80, 0x9C];

/// U+201D RIGHT DOUBLE QUOTATION MARK
pub const SMART_QUOTE_CLOSE: [u8; 3] = [0xE2, 0x80, 0x9D];

/// Width of a smart quote sequence in bytes.
pub const SMART_QUOTE_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartQuote {
    Opening,
    Closing,
}

/// Returns the smart quote starting at `pos`, if any.
#[inline]
pub fn smart_quote_at(bytes: &[u8], pos: usize) -> Option<SmartQuote> {
    if bytes[pos] != SMART_QUOTE_LEAD || pos + SMART_QUOTE_LEN > bytes.len() {
        return None;
    }
    let window = &bytes[pos..pos + SMART_QUOTE_LEN];
    if window == SMART_QUOTE_OPEN {
        Some(SmartQuote::Opening)
    } else if window == SMART_QUOTE_CLOSE {
        Some(SmartQuote::Closing)
    } else {
        None
    }
}

/// Outcome of the smart quote detector over everything fed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartQuoteBalance {
    /// No smart quote seen.
    None,
    /// An opening smart quote has no matching close yet.
    OpeningUnmatched,
    /// Smart quotes were seen and the last one closed the run.
    ClosingSeen,
}

/// Quote state over a stream of bytes.
///
/// Lives only as long as one logical line: the assembler keeps one while it
/// joins physical lines, the tokenizer keeps one while it walks a line.
#[derive(Debug, Clone, Default)]
pub struct QuoteState {
    in_standard: bool,
    in_smart: bool,
    smart_seen: bool,
}

impl QuoteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the state for the byte at `pos` and return how many bytes
    /// were consumed (3 for a smart quote, otherwise 1).
    #[inline]
    pub fn step(&mut self, bytes: &[u8], pos: usize) -> usize {
        let byte = bytes[pos];
        if byte == DQUOTE {
            self.in_standard = !self.in_standard;
            return 1;
        }
        match smart_quote_at(bytes, pos) {
            Some(SmartQuote::Opening) => {
                self.in_smart = true;
                self.smart_seen = true;
                SMART_QUOTE_LEN
            }
            Some(SmartQuote::Closing) => {
                self.in_smart = false;
                self.smart_seen = true;
                SMART_QUOTE_LEN
            }
            None => 1,
        }
    }

    /// Feed a whole slice, e.g. one physical line.
    pub fn feed(&mut self, bytes: &[u8]) {
        let mut pos = 0;
        while pos < bytes.len() {
            pos += self.step(bytes, pos);
        }
    }

    /// Inside an odd run of `"`.
    #[inline]
    pub fn in_standard(&self) -> bool {
        self.in_standard
    }

    pub fn smart_balance(&self) -> SmartQuoteBalance {
        if self.in_smart {
            SmartQuoteBalance::OpeningUnmatched
        } else if self.smart_seen {
            SmartQuoteBalance::ClosingSeen
        } else {
            SmartQuoteBalance::None
        }
    }

    /// Either detector says a quoted run is still open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.in_standard() || self.smart_balance() == SmartQuoteBalance::OpeningUnmatched
    }
}
