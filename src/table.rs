// In-memory table: rows of owned cells with O(1) row lookup.
//
// Rows live in one contiguous Vec and a row's id is its position in it, so
// the Vec doubles as the row index. Column lookup inside a row is a plain
// slice index. Rows are not padded: a row may hold fewer cells than
// `column_count`.

/// Status of a cell, as reported by [`Table::get_cell`].
///
/// Stored cells are only ever `Empty` or `Normal`. The `Missing*` variants
/// describe coordinates that fall outside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStatus {
    /// Row and column exist but the field had no bytes.
    Empty,
    /// Row index is past the last row.
    MissingRow,
    /// Row exists but has no field at this column.
    MissingCol,
    /// Field has at least one byte.
    Normal,
}

/// One field of a row. Owns its bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    text: Vec<u8>,
}

impl Cell {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Cell {
            text: bytes.to_vec(),
        }
    }

    /// `Empty` iff the cell has zero bytes, `Normal` otherwise.
    #[inline]
    pub fn status(&self) -> CellStatus {
        if self.text.is_empty() {
            CellStatus::Empty
        } else {
            CellStatus::Normal
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    /// The cell text if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.text).ok()
    }
}

impl From<Vec<u8>> for Cell {
    fn from(text: Vec<u8>) -> Self {
        Cell { text }
    }
}

/// One physical (or logical, for multi-line quoted fields) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: usize,
    cells: Vec<Cell>,
}

impl Row {
    /// Sequential id, starting at 0 for the first row of the source.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of fields physically present in this row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }
}

/// Result of a coordinate lookup.
///
/// `bytes` is 0 and `text` is `None` for every status but `Normal`.
/// Missing coordinates report `last_in_row = true`, since there is nothing
/// after them in the row either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef<'a> {
    pub status: CellStatus,
    pub bytes: usize,
    pub last_in_row: bool,
    pub text: Option<&'a [u8]>,
}

impl<'a> CellRef<'a> {
    fn missing(status: CellStatus) -> Self {
        CellRef {
            status,
            bytes: 0,
            last_in_row: true,
            text: None,
        }
    }

    /// True for `MissingRow` and `MissingCol`.
    pub fn is_missing(&self) -> bool {
        matches!(self.status, CellStatus::MissingRow | CellStatus::MissingCol)
    }

    pub fn text_str(&self) -> Option<&'a str> {
        self.text.and_then(|t| std::str::from_utf8(t).ok())
    }
}

/// A parsed table. Immutable once built; share it freely across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
    column_count: usize,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row's field count. 0 for an empty table. A table whose rows
    /// all have zero fields reports 1.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// O(1) row lookup by 0-based id.
    #[inline]
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &Row> + ExactSizeIterator + '_ {
        self.rows.iter()
    }

    /// Look up a cell by 0-based `row` and `col`.
    ///
    /// Spreadsheet tools number rows and columns from 1; this does not.
    /// Out-of-range coordinates are not errors, they come back as
    /// `MissingRow` / `MissingCol`.
    pub fn get_cell(&self, row: usize, col: usize) -> CellRef<'_> {
        let Some(r) = self.row(row) else {
            return CellRef::missing(CellStatus::MissingRow);
        };
        let Some(cell) = r.cell(col) else {
            return CellRef::missing(CellStatus::MissingCol);
        };

        let status = cell.status();
        CellRef {
            status,
            bytes: cell.len(),
            last_in_row: col + 1 == r.len(),
            text: match status {
                CellStatus::Normal => Some(cell.as_bytes()),
                _ => None,
            },
        }
    }
}

/// Builds a [`Table`] row by row. One builder per parse: a fresh builder
/// always starts again at row id 0.
#[derive(Debug, Default)]
pub struct TableBuilder {
    rows: Vec<Row>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize) -> Self {
        TableBuilder {
            rows: Vec::with_capacity(rows),
        }
    }

    /// Append a row and return the id it was given.
    pub fn append_row(&mut self, cells: Vec<Cell>) -> usize {
        let id = self.rows.len();
        self.rows.push(Row { id, cells });
        id
    }

    /// Compute the counts and freeze the rows.
    pub fn finish(mut self) -> Table {
        self.rows.shrink_to_fit();
        let widest = self.rows.iter().map(Row::len).max().unwrap_or(0);
        let column_count = if widest == 0 && !self.rows.is_empty() {
            1
        } else {
            widest
        };
        Table {
            rows: self.rows,
            column_count,
        }
    }
}
