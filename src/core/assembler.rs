// Logical line assembly.
//
// Reads physical lines and joins them until both quote detectors report a
// balanced line. Joining is plain concatenation: each physical line keeps
// its own line break, so a quoted field that spans lines keeps the break in
// its text.
//
// While a quote is open, continuation reads are limited to the room left in
// the line buffer, so a joined line never grows past `max_line_buffer`. A
// line that never balances is cut once it passes the configured threshold.
// The cut is logged and parsing goes on with whatever follows; it degrades
// the data, it never fails the parse.

use std::io::{BufRead, Read};

use super::quote::QuoteState;
use crate::config::ParserConfig;
use crate::error::{Error, Result};

/// One or more physical lines with balanced quoting (unless `forced`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Raw bytes including line breaks.
    pub bytes: Vec<u8>,
    /// 1-based physical line number the logical line starts on.
    pub first_line: usize,
    /// Number of physical lines joined.
    pub physical_lines: usize,
    /// True if the line was emitted with a quote still open.
    pub forced: bool,
}

/// Iterator of logical lines over a buffered reader.
///
/// Not restartable: one assembler per parse. All state (quote tracking,
/// line numbering) starts fresh with `new`.
pub struct LineAssembler<R> {
    reader: R,
    source_name: String,
    max_line_buffer: usize,
    cut_threshold: usize,
    physical_line: usize,
    // Last read stopped before a line break (buffer limit hit)
    mid_line: bool,
    done: bool,
}

impl<R: BufRead> LineAssembler<R> {
    pub fn new(reader: R, config: &ParserConfig) -> Self {
        LineAssembler {
            reader,
            source_name: String::from("<input>"),
            max_line_buffer: config.max_line_buffer,
            cut_threshold: config.cut_threshold(),
            physical_line: 0,
            mid_line: false,
            done: false,
        }
    }

    /// Name used in diagnostics, usually the file path.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Append up to `limit` bytes of the next physical line to `buf`.
    /// Returns the bytes read, 0 at end of input.
    fn read_physical(&mut self, buf: &mut Vec<u8>, limit: u64) -> Result<usize> {
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', buf)
            .map_err(|e| Error::unreadable(&self.source_name, e))?;
        if read > 0 {
            // The tail of a line split by the limit is not a new line
            if !self.mid_line {
                self.physical_line += 1;
            }
            self.mid_line = buf.last() != Some(&b'\n');
        }
        Ok(read)
    }

    fn forced(&self, bytes: Vec<u8>, first_line: usize) -> LogicalLine {
        LogicalLine {
            bytes,
            first_line,
            physical_lines: self.physical_line - first_line + 1,
            forced: true,
        }
    }

    fn next_line(&mut self) -> Result<Option<LogicalLine>> {
        let mut bytes = Vec::new();
        if self.read_physical(&mut bytes, u64::MAX)? == 0 {
            return Ok(None);
        }

        let first_line = self.physical_line;
        let mut quotes = QuoteState::new();
        quotes.feed(&bytes);

        while quotes.is_open() {
            if bytes.len() > self.cut_threshold {
                log::warn!(
                    "{}: malformed input near line {}: quoted field still open after {} bytes, cutting line",
                    self.source_name,
                    first_line,
                    bytes.len()
                );
                return Ok(Some(self.forced(bytes, first_line)));
            }

            // threshold < max_line_buffer, so there is always room here
            let start = bytes.len();
            let room = self.max_line_buffer.saturating_sub(start) as u64;
            if self.read_physical(&mut bytes, room)? == 0 {
                log::warn!(
                    "{}: input ends inside a quoted field opened near line {}",
                    self.source_name,
                    first_line
                );
                return Ok(Some(self.forced(bytes, first_line)));
            }
            quotes.feed(&bytes[start..]);
        }

        let physical_lines = self.physical_line - first_line + 1;
        if physical_lines > 1 {
            log::trace!(
                "{}: joined lines {}..={} into one row",
                self.source_name,
                first_line,
                self.physical_line
            );
        }

        Ok(Some(LogicalLine {
            bytes,
            first_line,
            physical_lines,
            forced: false,
        }))
    }
}

impl<R: BufRead> Iterator for LineAssembler<R> {
    type Item = Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Read};
    use test_log::test;

    fn assemble(input: &[u8], config: &ParserConfig) -> Vec<LogicalLine> {
        LineAssembler::new(input, config)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn texts(lines: &[LogicalLine]) -> Vec<String> {
        lines
            .iter()
            .map(|l| String::from_utf8_lossy(&l.bytes).to_string())
            .collect()
    }

    #[test]
    fn test_balanced_lines_pass_through() {
        let lines = assemble(b"a,b\nc,d\n", &ParserConfig::csv());
        assert_eq!(texts(&lines), vec!["a,b\n", "c,d\n"]);
        assert_eq!(lines[1].first_line, 2);
        assert!(lines.iter().all(|l| l.physical_lines == 1 && !l.forced));
    }

    #[test]
    fn test_open_quote_joins_next_line() {
        let lines = assemble(b"\"ab\ncd\",x\nnext\n", &ParserConfig::csv());
        assert_eq!(texts(&lines), vec!["\"ab\ncd\",x\n", "next\n"]);
        assert_eq!(lines[0].physical_lines, 2);
        assert_eq!(lines[1].first_line, 3);
    }

    #[test]
    fn test_joins_across_several_lines() {
        let lines = assemble(b"a,\"1\n2\n3\",b\n", &ParserConfig::csv());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].physical_lines, 3);
    }

    #[test]
    fn test_open_smart_quote_joins_next_line() {
        let input = "a,\u{201C}one\ntwo\u{201D},b\nc\n".as_bytes();
        let lines = assemble(input, &ParserConfig::csv());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].physical_lines, 2);
    }

    #[test]
    fn test_last_line_without_newline() {
        let lines = assemble(b"a\nb", &ParserConfig::csv());
        assert_eq!(texts(&lines), vec!["a\n", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(assemble(b"", &ParserConfig::csv()).is_empty());
    }

    #[test]
    fn test_force_cut_on_runaway_quote() {
        let config = ParserConfig::csv().with_max_line_buffer(16);
        let input = b"\"runaway\nmore text\nstill more\nok,1\n";
        let lines = assemble(input, &config);
        assert!(lines[0].forced);
        assert!(lines[0].bytes.len() > config.cut_threshold());
        assert!(lines[0].bytes.len() <= config.max_line_buffer);
        // Whatever follows the cut starts a fresh logical line
        assert!(!lines.last().unwrap().forced);
        assert_eq!(texts(&lines).last().unwrap(), "ok,1\n");
    }

    #[test]
    fn test_long_continuation_line_stays_within_buffer() {
        let config = ParserConfig::csv().with_max_line_buffer(64);
        let mut input = b"\"open\n".to_vec();
        input.extend(std::iter::repeat(b'x').take(1_000_000));
        input.push(b'\n');

        let lines = assemble(&input, &config);
        assert!(lines[0].forced);
        assert!(lines[0].bytes.len() <= 64, "grew to {}", lines[0].bytes.len());
        assert_eq!(lines[0].first_line, 1);
        // Nothing is dropped: the rest of the long line follows the cut
        let total: usize = lines.iter().map(|l| l.bytes.len()).sum();
        assert_eq!(total, input.len());
        assert_eq!(lines.last().unwrap().first_line, 2);
    }

    #[test]
    fn test_unterminated_quote_at_end_of_input() {
        let lines = assemble(b"a\n\"open\nrest", &ParserConfig::csv());
        assert_eq!(lines.len(), 2);
        assert!(lines[1].forced);
        assert_eq!(lines[1].bytes, b"\"open\nrest");
    }

    #[test]
    fn test_works_with_bufreader() {
        let reader = BufReader::with_capacity(4, &b"x,\"y\nz\"\nw\n"[..]);
        let lines: Vec<_> = LineAssembler::new(reader, &ParserConfig::csv())
            .with_source_name("mem.csv")
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(texts(&lines), vec!["x,\"y\nz\"\n", "w\n"]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_read_error_is_reported_once() {
        let mut assembler = LineAssembler::new(BufReader::new(FailingReader), &ParserConfig::csv())
            .with_source_name("broken.csv");
        match assembler.next() {
            Some(Err(Error::SourceUnreadable { name, .. })) => assert_eq!(name, "broken.csv"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(assembler.next().is_none());
    }
}
