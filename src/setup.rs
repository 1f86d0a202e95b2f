//! One-time workbook setup
//!
//! Seeds the three source tables (input, structure, mapping) from the
//! built-in field schema. Destructive by design: running it again resets
//! the workbook to the shipped defaults. The generation engine never reads
//! the schema below at run time; it only ever sees the structure *table*.

use tracing::info;

use crate::error::SdfError;
use crate::gen::types::{EntityType, INPUT_TABLE, MAPPING_TABLE, STRUCTURE_TABLE};
use crate::store::TabularStore;

/// Columns a fresh input table starts with.
pub const INPUT_HEADERS: [&str; 5] = ["ID", "NAME", "YOUTUBE_ID", "DISPLAY_URL", "LANDING_URL"];

/// Columns of the name-to-ID match table.
pub const MAPPING_HEADERS: [&str; 3] = ["INPUT_COLUMN", "FULL_NAME", "DV360_ID"];

/// Built-in field schema: `(field name, default value)` per entity type.
/// Defaults may carry `%%…%%` placeholders over [`INPUT_HEADERS`].
fn builtin_fields(entity: EntityType) -> &'static [(&'static str, &'static str)] {
    match entity {
        EntityType::Order => &[
            ("Io Id", ""),
            ("Campaign Id", ""),
            ("Name", "TrueView IO"),
            ("Status", "Active"),
            ("Io Type", "Standard"),
            ("Pacing", "Flight"),
            ("Pacing Rate", "Even"),
            ("Budget Type", "Amount"),
            ("Budget Segments", ""),
        ],
        EntityType::LineItem => &[
            ("Line Item Id", ""),
            ("Io Id", ""),
            ("Type", "TrueView"),
            ("Subtype", "In-Stream"),
            ("Name", "LI - %%ID%% - %%NAME%%"),
            ("Status", "Draft"),
            ("Start Date", ""),
            ("End Date", ""),
            ("Budget Type", "TrueView Budget"),
            ("Budget Amount", ""),
            ("Pacing", "Daily"),
            ("Pacing Rate", "Even"),
        ],
        EntityType::AdGroup => &[
            ("Ad Group Id", ""),
            ("Line Item Id", ""),
            ("Name", "AdGroup - %%ID%% - %%NAME%%"),
            ("Status", "Active"),
            ("Video Ad Format", "In-Stream"),
            ("Max Cost", ""),
        ],
        EntityType::Ad => &[
            ("Ad Id", ""),
            ("Ad Group Id", ""),
            ("Name", "Ad - %%NAME%%"),
            ("Status", "Active"),
            ("Video Id", "%%YOUTUBE_ID%%"),
            ("Display URL", "%%DISPLAY_URL%%"),
            ("Landing Page URL", "%%LANDING_URL%%"),
        ],
    }
}

/// Recreate the input, structure, and mapping tables from the built-in
/// schema. Any existing content in those three tables is lost; the output
/// tables are left alone (the next generation run recreates them anyway).
pub fn initial_setup<S: TabularStore>(store: &mut S) -> Result<(), SdfError> {
    seed_table(store, MAPPING_TABLE, &[header_row(&MAPPING_HEADERS)])?;
    seed_table(store, INPUT_TABLE, &[header_row(&INPUT_HEADERS)])?;
    seed_table(store, STRUCTURE_TABLE, &structure_rows())?;
    info!("initial setup complete");
    Ok(())
}

fn seed_table<S: TabularStore>(
    store: &mut S,
    name: &str,
    rows: &[Vec<String>],
) -> Result<(), SdfError> {
    store.delete_table(name)?;
    store.create_table(name)?;
    for row in rows {
        store.append_row(name, row)?;
    }
    Ok(())
}

fn header_row(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| h.to_string()).collect()
}

/// The structure table as rows: a pair of columns per entity type
/// (`<table>`, `<table>-defaults`), padded square with empty cells.
fn structure_rows() -> Vec<Vec<String>> {
    let mut header = Vec::new();
    for entity in EntityType::ALL {
        header.push(entity.fields_column().to_string());
        header.push(entity.defaults_column());
    }

    let depth = EntityType::ALL
        .iter()
        .map(|e| builtin_fields(*e).len())
        .max()
        .unwrap_or(0);

    let mut rows = vec![header];
    for row_index in 0..depth {
        let mut row = Vec::new();
        for entity in EntityType::ALL {
            let (name, default) = builtin_fields(entity)
                .get(row_index)
                .copied()
                .unwrap_or(("", ""));
            row.push(name.to_string());
            row.push(default.to_string());
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::columns::ColumnMap;
    use crate::store::MemoryStore;

    #[test]
    fn test_setup_creates_the_three_source_tables() {
        let mut store = MemoryStore::new();
        initial_setup(&mut store).unwrap();

        for table in [INPUT_TABLE, STRUCTURE_TABLE, MAPPING_TABLE] {
            assert!(store.has_table(table), "missing {}", table);
        }
        assert_eq!(
            store.all_rows(INPUT_TABLE).unwrap()[0],
            INPUT_HEADERS.map(String::from).to_vec()
        );
    }

    #[test]
    fn test_setup_resets_existing_content() {
        let mut store = MemoryStore::new();
        initial_setup(&mut store).unwrap();
        store
            .append_row(INPUT_TABLE, &["1".to_string()])
            .unwrap();

        initial_setup(&mut store).unwrap();
        assert_eq!(store.all_rows(INPUT_TABLE).unwrap().len(), 1);
    }

    #[test]
    fn test_structure_table_pairs_fields_and_defaults() {
        let mut store = MemoryStore::new();
        initial_setup(&mut store).unwrap();

        let structure = ColumnMap::load(&store, STRUCTURE_TABLE).unwrap();
        let ad_fields = structure.column("Ad-SDF").unwrap();
        let ad_defaults = structure.column("Ad-SDF-defaults").unwrap();

        // Header at index 0, then (field, default) pairs line up.
        assert_eq!(ad_fields[0], "Ad-SDF");
        let video_row = ad_fields.iter().position(|f| f == "Video Id").unwrap();
        assert_eq!(ad_defaults[video_row], "%%YOUTUBE_ID%%");
    }

    #[test]
    fn test_every_placeholder_names_an_input_header() {
        for entity in EntityType::ALL {
            for (_, default) in builtin_fields(entity) {
                let mut rest = *default;
                while let Some(start) = rest.find("%%") {
                    let tail = &rest[start + 2..];
                    let end = tail.find("%%").expect("unbalanced placeholder");
                    let token = &tail[..end];
                    assert!(
                        INPUT_HEADERS.contains(&token),
                        "unknown placeholder {}",
                        token
                    );
                    rest = &tail[end + 2..];
                }
            }
        }
    }
}
