// Field tokenizer: one logical line in, one row of fields out.
//
// Single left-to-right pass. A byte ends a field only when it is the
// separator or a line terminator AND no quote run (standard or smart) is
// open. Quote characters stay in the field text: there is no stripping of
// the outer quotes and no collapsing of doubled quotes. Callers that want
// RFC 4180 unescaping have to do it on the cell text themselves.
//
// Boundary rules:
// - A terminator at position 0 is a no-op. `,a,b` gives two fields, not
//   three, and a line holding only a line break gives a row with no fields.
// - The first unquoted `\n` or `\r` ends the row. `\r\n` therefore yields a
//   single break and anything after the first terminator byte is dropped.
// - A line that runs out without an unquoted line terminator (last line of
//   a file, or a force-cut line with an open quote) flushes the remainder as
//   the last field, minus any trailing line break bytes.

use super::quote::QuoteState;
use super::scanner::{is_line_terminator, is_terminator, strip_line_terminator};
use crate::table::Cell;

/// Split a logical line into borrowed field slices.
pub fn split_fields(line: &[u8], separator: u8) -> Vec<&[u8]> {
    let mut fields = Vec::with_capacity(8);
    let mut quotes = QuoteState::new();
    let mut field_start = 0;
    let mut pos = 0;

    while pos < line.len() {
        let byte = line[pos];

        if !quotes.is_open() && is_terminator(byte, separator) {
            if pos > 0 {
                fields.push(&line[field_start..pos]);
            }
            field_start = pos + 1;
            if is_line_terminator(byte) {
                return fields;
            }
            pos += 1;
        } else {
            pos += quotes.step(line, pos);
        }
    }

    if !line.is_empty() {
        fields.push(strip_line_terminator(&line[field_start..]));
    }

    fields
}

/// Tokenize a logical line into owned cells.
pub fn tokenize_line(line: &[u8], separator: u8) -> Vec<Cell> {
    split_fields(line, separator)
        .into_iter()
        .map(Cell::from_bytes)
        .collect()
}
