// Sequential parsing
//
// One pass: assemble a logical line, tokenize it, append the row. The
// whole table is materialized before it is returned.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::ParserConfig;
use crate::core::{tokenize_line, LineAssembler};
use crate::error::{Error, Result};
use crate::table::{Table, TableBuilder};

/// Parse everything a buffered reader yields.
pub fn parse<R: BufRead>(reader: R, config: &ParserConfig) -> Result<Table> {
    parse_named(reader, config, "<input>")
}

/// Parse with a source name used in diagnostics and errors.
pub fn parse_named<R: BufRead>(reader: R, config: &ParserConfig, name: &str) -> Result<Table> {
    config.validate()?;

    let mut builder = TableBuilder::new();
    for line in LineAssembler::new(reader, config).with_source_name(name) {
        let line = line?;
        builder.append_row(tokenize_line(&line.bytes, config.separator));
    }

    let table = builder.finish();
    log::debug!(
        "{}: parsed {} rows, {} columns (direct)",
        name,
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Parse an in-memory buffer.
pub fn parse_bytes(input: &[u8], config: &ParserConfig) -> Result<Table> {
    parse(input, config)
}

/// Open and parse a file.
pub fn parse_file<P: AsRef<Path>>(path: P, config: &ParserConfig) -> Result<Table> {
    let path = path.as_ref();
    let name = path.display().to_string();
    config.validate()?;
    let file = File::open(path).map_err(|e| Error::unreadable(&name, e))?;
    parse_named(BufReader::new(file), config, &name)
}
