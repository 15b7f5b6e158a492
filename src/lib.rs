// CsvCells - delimited text into a random-access cell table
//
// Pipeline:
// 1. core::assembler joins physical lines until quoting balances
// 2. core::field splits each logical line into cells
// 3. table::TableBuilder appends rows; the finished Table answers
//    get_cell(row, col) with O(1) row lookup
//
// Strategies:
// A: Sequential (parse_file / parse_string)
// B: Parallel tokenizing via rayon (parse_file_parallel)
//
// Rows and columns are 0-based, unlike spreadsheet tools.

use rustler::{Atom, Binary, Env, Error, NifResult, ResourceArc, Term};

pub mod allocator;
pub mod config;
pub mod core;
pub mod error;
pub mod resource;
pub mod strategy;
pub mod table;
mod term;

pub use config::ParserConfig;
pub use error::Result;
pub use strategy::{
    parse, parse_bytes, parse_bytes_parallel, parse_file, parse_file_parallel, parse_parallel,
};
pub use table::{Cell, CellRef, CellStatus, Row, Table, TableBuilder};

use resource::{TableRef, TableResource};
use term::{cell_to_term, table_to_term};

mod atoms {
    rustler::atoms! {
        ok,
    }
}

/// Decode separator from a Term.
/// Accepts: integer 44 or binary <<44>>
fn decode_separator(term: Term<'_>) -> NifResult<u8> {
    if let Ok(byte) = term.decode::<u8>() {
        return Ok(byte);
    }
    if let Ok(binary) = term.decode::<Binary<'_>>() {
        if let [byte] = binary.as_slice() {
            return Ok(*byte);
        }
    }
    Err(Error::BadArg)
}

/// Decode the separator and build a validated config
fn decode_config(sep_term: Term<'_>) -> NifResult<ParserConfig> {
    let config = ParserConfig::dsv(decode_separator(sep_term)?);
    config.validate().map_err(|_| Error::BadArg)?;
    Ok(config)
}

/// Wrap a parse result as `{:ok, table}` or `{:error, reason}`
fn into_nif_result(result: Result<Table>) -> NifResult<(Atom, TableRef)> {
    match result {
        Ok(table) => Ok((atoms::ok(), ResourceArc::new(TableResource::new(table)))),
        Err(e) => Err(Error::Term(Box::new(e.to_string()))),
    }
}

// ============================================================================
// Memory Tracking NIFs (zeros unless the memory_tracking feature is enabled)
// ============================================================================

/// Get current Rust heap allocation in bytes
#[rustler::nif]
fn get_rust_memory() -> usize {
    allocator::allocated()
}

/// Get peak Rust heap allocation since last reset
#[rustler::nif]
fn get_rust_memory_peak() -> usize {
    allocator::peak_allocated()
}

/// Reset memory stats
#[rustler::nif]
fn reset_rust_memory_stats() -> (usize, usize) {
    allocator::reset_peak()
}

// ============================================================================
// Strategy A: Sequential Parser
// ============================================================================

/// Parse a file into a table handle
#[rustler::nif(name = "parse_file", schedule = "DirtyIo")]
fn parse_file_nif<'a>(path: String, sep_term: Term<'a>) -> NifResult<(Atom, TableRef)> {
    let config = decode_config(sep_term)?;
    into_nif_result(parse_file(&path, &config))
}

/// Parse an in-memory binary into a table handle
#[rustler::nif]
fn parse_string<'a>(input: Binary<'a>, sep_term: Term<'a>) -> NifResult<(Atom, TableRef)> {
    let config = decode_config(sep_term)?;
    into_nif_result(parse_bytes(input.as_slice(), &config))
}

// ============================================================================
// Strategy B: Parallel Parser
// ============================================================================

/// Parse a file, tokenizing rows on the rayon pool
/// Uses DirtyCpu scheduler since this can take significant time
#[rustler::nif(name = "parse_file_parallel", schedule = "DirtyCpu")]
fn parse_file_parallel_nif<'a>(path: String, sep_term: Term<'a>) -> NifResult<(Atom, TableRef)> {
    let config = decode_config(sep_term)?;
    into_nif_result(parse_file_parallel(&path, &config))
}

// ============================================================================
// Table Access NIFs
// ============================================================================

#[rustler::nif]
fn row_count(table: TableRef) -> usize {
    table.table.row_count()
}

#[rustler::nif]
fn column_count(table: TableRef) -> usize {
    table.table.column_count()
}

/// Look up a cell: `{status, bytes, last_in_row, text | nil}`
#[rustler::nif]
fn get_cell<'a>(env: Env<'a>, table: TableRef, row: usize, col: usize) -> Term<'a> {
    cell_to_term(env, &table.table.get_cell(row, col))
}

/// All rows as a list of lists of binaries
#[rustler::nif]
fn to_rows<'a>(env: Env<'a>, table: TableRef) -> Term<'a> {
    table_to_term(env, &table.table)
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.CsvCells.Native");
