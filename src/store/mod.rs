//! Tabular storage - the workbook the generator reads from and writes to
//!
//! The engine never touches files or spreadsheets directly; every table
//! access goes through the [`TabularStore`] trait so the same generation
//! logic runs against an in-memory workbook (tests, embedding) or a
//! directory of CSV files (the CLI).

pub mod csv;
pub mod memory;

pub use self::csv::CsvStore;
pub use memory::MemoryStore;

use crate::error::SdfError;

/// Name-addressed access to a workbook of tables.
///
/// All cell values are text. Rows may be ragged (tables are not required to
/// be rectangular); consumers that need a rectangle pad with empty strings.
pub trait TabularStore {
    /// Whether a table with this name exists.
    fn has_table(&self, name: &str) -> bool;

    /// Create an empty table. Does nothing if the table already exists.
    fn create_table(&mut self, name: &str) -> Result<(), SdfError>;

    /// Remove a table entirely. Does nothing if the table does not exist.
    fn delete_table(&mut self, name: &str) -> Result<(), SdfError>;

    /// Remove all rows from an existing table.
    fn clear_table(&mut self, name: &str) -> Result<(), SdfError>;

    /// Append one row at the bottom of an existing table.
    fn append_row(&mut self, name: &str, row: &[String]) -> Result<(), SdfError>;

    /// Overwrite a single cell with text, extending the row with empty
    /// cells if `col` is past its current end. `row`/`col` are zero-based.
    fn set_cell_text(&mut self, name: &str, row: usize, col: usize, value: &str)
        -> Result<(), SdfError>;

    /// Snapshot every row of an existing table, in order.
    fn all_rows(&self, name: &str) -> Result<Vec<Vec<String>>, SdfError>;
}
