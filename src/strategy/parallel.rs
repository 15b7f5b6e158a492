// Parallel parsing using Rayon
//
// Strategy:
// 1. Single-threaded: assemble all logical lines (quote balance depends on
//    everything before it, so this cannot be split)
// 2. Parallel: tokenize each logical line independently using rayon
// 3. Single-threaded: append rows in source order
//
// The resulting table is identical to the one the direct strategy builds.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rayon::prelude::*;

use crate::config::ParserConfig;
use crate::core::{tokenize_line, LineAssembler, LogicalLine};
use crate::error::{Error, Result};
use crate::table::{Cell, Table, TableBuilder};

/// Parse a buffered reader, tokenizing rows on the rayon pool.
pub fn parse_parallel<R: BufRead>(reader: R, config: &ParserConfig) -> Result<Table> {
    parse_parallel_named(reader, config, "<input>")
}

pub fn parse_parallel_named<R: BufRead>(
    reader: R,
    config: &ParserConfig,
    name: &str,
) -> Result<Table> {
    config.validate()?;

    // Phase 1: logical line boundaries (sequential, quote-aware)
    let lines = LineAssembler::new(reader, config)
        .with_source_name(name)
        .collect::<Result<Vec<LogicalLine>>>()?;

    // Phase 2: tokenize in parallel, order preserved by the indexed collect
    let separator = config.separator;
    let rows: Vec<Vec<Cell>> = lines
        .par_iter()
        .map(|line| tokenize_line(&line.bytes, separator))
        .collect();

    // Phase 3: sequential ids
    let mut builder = TableBuilder::with_capacity(rows.len());
    for row in rows {
        builder.append_row(row);
    }

    let table = builder.finish();
    log::debug!(
        "{}: parsed {} rows, {} columns (parallel, {} threads)",
        name,
        table.row_count(),
        table.column_count(),
        rayon::current_num_threads()
    );
    Ok(table)
}

pub fn parse_bytes_parallel(input: &[u8], config: &ParserConfig) -> Result<Table> {
    parse_parallel(input, config)
}

pub fn parse_file_parallel<P: AsRef<Path>>(path: P, config: &ParserConfig) -> Result<Table> {
    let path = path.as_ref();
    let name = path.display().to_string();
    config.validate()?;
    let file = File::open(path).map_err(|e| Error::unreadable(&name, e))?;
    parse_parallel_named(BufReader::new(file), config, &name)
}
