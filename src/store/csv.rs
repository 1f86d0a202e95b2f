use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::SdfError;
use crate::store::TabularStore;

/// A workbook backed by a directory of CSV files, one `NAME.csv` per table.
///
/// The whole directory is read into memory when the store is opened; every
/// mutating operation rewrites the affected table's file immediately, so a
/// cell-level rewrite is durable as soon as the call returns.
pub struct CsvStore {
    dir: PathBuf,
    tables: HashMap<String, Vec<Vec<String>>>,
}

impl CsvStore {
    /// Open a workbook directory, creating it if it does not exist.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, SdfError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;

        let mut tables = HashMap::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            tables.insert(name.to_string(), read_csv(&path)?);
        }

        Ok(CsvStore { dir, tables })
    }

    fn table_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", name))
    }

    fn persist(&self, name: &str) -> Result<(), SdfError> {
        let rows = self
            .tables
            .get(name)
            .ok_or_else(|| SdfError::MissingTable(name.to_string()))?;
        let file = BufWriter::new(File::create(self.table_path(name))?);
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
        for row in rows {
            if row.is_empty() {
                // The csv writer rejects zero-field records; a padded-out
                // empty row round-trips as a single empty cell instead.
                writer.write_record([""])?;
            } else {
                writer.write_record(row)?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    fn rows_mut(&mut self, name: &str) -> Result<&mut Vec<Vec<String>>, SdfError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| SdfError::MissingTable(name.to_string()))
    }
}

fn read_csv(path: &Path) -> Result<Vec<Vec<String>>, SdfError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(rows)
}

impl TabularStore for CsvStore {
    fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    fn create_table(&mut self, name: &str) -> Result<(), SdfError> {
        if !self.tables.contains_key(name) {
            self.tables.insert(name.to_string(), Vec::new());
            self.persist(name)?;
        }
        Ok(())
    }

    fn delete_table(&mut self, name: &str) -> Result<(), SdfError> {
        if self.tables.remove(name).is_some() {
            let path = self.table_path(name);
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn clear_table(&mut self, name: &str) -> Result<(), SdfError> {
        self.rows_mut(name)?.clear();
        self.persist(name)
    }

    fn append_row(&mut self, name: &str, row: &[String]) -> Result<(), SdfError> {
        self.rows_mut(name)?.push(row.to_vec());
        self.persist(name)
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
        self.persist(name)
    }

    fn all_rows(&self, name: &str) -> Result<Vec<Vec<String>>, SdfError> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| SdfError::MissingTable(name.to_string()))
    }
}
