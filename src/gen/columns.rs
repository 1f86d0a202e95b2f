use crate::error::SdfError;
use crate::store::TabularStore;

/// A column-oriented snapshot of one table.
///
/// Columns keep the table's left-to-right order, and each column's value
/// list keeps the table's top-to-bottom order *including the header*: the
/// column name itself sits at index 0 of its own list, and data record `i`
/// lives at list index `i + 1`. Rows shorter than the widest row are padded
/// with empty cells so every column has the same length.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: Vec<(String, Vec<String>)>,
}

impl ColumnMap {
    /// Snapshot `table` from the store. Fails only if the table is absent.
    pub fn load<S: TabularStore>(store: &S, table: &str) -> Result<Self, SdfError> {
        let rows = store.all_rows(table)?;
        Ok(Self::from_rows(&rows))
    }

    /// Build a column map from raw rows; the first row is the header.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut columns = Vec::with_capacity(width);
        for col in 0..width {
            let name = rows
                .first()
                .and_then(|header| header.get(col))
                .cloned()
                .unwrap_or_default();
            let values = rows
                .iter()
                .map(|row| row.get(col).cloned().unwrap_or_default())
                .collect();
            columns.push((name, values));
        }
        ColumnMap { columns }
    }

    /// The full value list for a named column (header at index 0).
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// The value of data record `index` in a named column. Record 0 is the
    /// first row below the header.
    pub fn record_value(&self, name: &str, index: usize) -> Option<&str> {
        self.column(name)
            .and_then(|values| values.get(index + 1))
            .map(|v| v.as_str())
    }

    /// Number of data records (rows below the header).
    pub fn record_count(&self) -> usize {
        self.columns
            .iter()
            .map(|(_, values)| values.len())
            .max()
            .unwrap_or(0)
            .saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
