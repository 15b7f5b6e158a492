// Term building utilities for converting tables and cells to Elixir terms

use crate::table::{CellRef, CellStatus, Row, Table};
use rustler::{Atom, Encoder, Env, NewBinary, Term};

mod atoms {
    rustler::atoms! {
        empty,
        normal,
        missing_row,
        missing_col,
        nil,
    }
}

/// Status atom for a cell lookup
pub fn status_atom(status: CellStatus) -> Atom {
    match status {
        CellStatus::Empty => atoms::empty(),
        CellStatus::Normal => atoms::normal(),
        CellStatus::MissingRow => atoms::missing_row(),
        CellStatus::MissingCol => atoms::missing_col(),
    }
}

/// Copy bytes into a fresh binary term
pub fn bytes_to_term<'a>(env: Env<'a>, bytes: &[u8]) -> Term<'a> {
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}

/// Convert a lookup result to `{status, bytes, last_in_row, text | nil}`
pub fn cell_to_term<'a>(env: Env<'a>, cell: &CellRef<'_>) -> Term<'a> {
    let text = match cell.text {
        Some(bytes) => bytes_to_term(env, bytes),
        None => atoms::nil().encode(env),
    };
    (status_atom(cell.status), cell.bytes, cell.last_in_row, text).encode(env)
}

/// Convert a single row's cells to an Elixir list of binaries
pub fn row_to_term<'a>(env: Env<'a>, row: &Row) -> Term<'a> {
    let mut list = Term::list_new_empty(env);

    for cell in row.cells().iter().rev() {
        list = list.list_prepend(bytes_to_term(env, cell.as_bytes()));
    }

    list
}

/// Convert a whole table to a list of lists of binaries
pub fn table_to_term<'a>(env: Env<'a>, table: &Table) -> Term<'a> {
    // Build list in reverse (efficient for cons lists)
    let mut list = Term::list_new_empty(env);

    for row in table.rows().rev() {
        list = list.list_prepend(row_to_term(env, row));
    }

    list
}
