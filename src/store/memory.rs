use crate::error::SdfError;
use crate::store::TabularStore;

/// An in-memory workbook. Insertion order of tables is preserved.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Vec<(String, Vec<Vec<String>>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Convenience for seeding tables in tests and embedded callers.
    pub fn with_table(mut self, name: &str, rows: Vec<Vec<String>>) -> Self {
        self.tables.retain(|(n, _)| n != name);
        self.tables.push((name.to_string(), rows));
        self
    }

    fn rows_mut(&mut self, name: &str) -> Result<&mut Vec<Vec<String>>, SdfError> {
        self.tables
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, rows)| rows)
            .ok_or_else(|| SdfError::MissingTable(name.to_string()))
    }
}

impl TabularStore for MemoryStore {
    fn has_table(&self, name: &str) -> bool {
        self.tables.iter().any(|(n, _)| n == name)
    }

    fn create_table(&mut self, name: &str) -> Result<(), SdfError> {
        if !self.has_table(name) {
            self.tables.push((name.to_string(), Vec::new()));
        }
        Ok(())
    }

    fn delete_table(&mut self, name: &str) -> Result<(), SdfError> {
        self.tables.retain(|(n, _)| n != name);
        Ok(())
    }

    fn clear_table(&mut self, name: &str) -> Result<(), SdfError> {
        self.rows_mut(name)?.clear();
        Ok(())
    }

    fn append_row(&mut self, name: &str, row: &[String]) -> Result<(), SdfError> {
        self.rows_mut(name)?.push(row.to_vec());
        Ok(())
    }

    fn set_cell_text(
        &mut self,
        name: &str,
        row: usize,
        col: usize,
        value: &str,
    ) -> Result<(), SdfError> {
        let rows = self.rows_mut(name)?;
        while rows.len() <= row {
            rows.push(Vec::new());
        }
        let cells = &mut rows[row];
        while cells.len() <= col {
            cells.push(String::new());
        }
        cells[col] = value.to_string();
        Ok(())
    }

    fn all_rows(&self, name: &str) -> Result<Vec<Vec<String>>, SdfError> {
        self.tables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| SdfError::MissingTable(name.to_string()))
    }
}
