use tracing::{debug, info};

use crate::error::SdfError;
use crate::gen::columns::ColumnMap;
use crate::gen::types::{RewriteReport, INPUT_TABLE, MAPPING_TABLE};
use crate::store::TabularStore;

/// Rewrites human-readable names in the input table to host-system IDs.
///
/// Each row of the mapping table is one rule `(INPUT_COLUMN, FULL_NAME,
/// DV360_ID)`: in the input column named `INPUT_COLUMN`, replace the
/// substring `FULL_NAME` with `DV360_ID`. Rules run in table order and are
/// independent, so a later rule can rewrite the result of an earlier one.
/// A rule naming a column the input table does not have is skipped without
/// error; that is the documented contract, not an oversight.
pub fn convert_names_to_ids<S: TabularStore>(store: &mut S) -> Result<RewriteReport, SdfError> {
    let mapping = ColumnMap::load(store, MAPPING_TABLE)?;
    let mut report = RewriteReport::default();

    for rule_index in 0..mapping.record_count() {
        let column_name = mapping
            .record_value("INPUT_COLUMN", rule_index)
            .unwrap_or("")
            .to_string();
        let full_name = mapping
            .record_value("FULL_NAME", rule_index)
            .unwrap_or("")
            .to_string();
        let target_id = mapping
            .record_value("DV360_ID", rule_index)
            .unwrap_or("")
            .to_string();
        if full_name.is_empty() {
            continue;
        }

        // Re-read the input table per rule so each rule sees the previous
        // rule's rewrites, matching the per-cell persistence contract.
        let input_rows = store.all_rows(INPUT_TABLE)?;
        let Some(col) = input_rows
            .first()
            .and_then(|header| header.iter().position(|name| name == &column_name))
        else {
            report.rules_skipped += 1;
            continue;
        };
        report.rules_applied += 1;

        for (row, cells) in input_rows.iter().enumerate().skip(1) {
            let Some(current) = cells.get(col) else {
                continue;
            };
            let rewritten = current.replace(&full_name, &target_id);
            if rewritten != *current {
                store.set_cell_text(INPUT_TABLE, row, col, &rewritten)?;
                report.cells_rewritten += 1;
                debug!(row, column = %column_name, "rewrote name to id");
            }
        }
    }

    info!(
        applied = report.rules_applied,
        skipped = report.rules_skipped,
        cells = report.cells_rewritten,
        "name-to-id conversion finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn store_with_mapping(rules: Vec<Vec<String>>) -> MemoryStore {
        let mut mapping = vec![row(&["INPUT_COLUMN", "FULL_NAME", "DV360_ID"])];
        mapping.extend(rules);
        MemoryStore::new()
            .with_table(
                INPUT_TABLE,
                vec![
                    row(&["ID", "GEO"]),
                    row(&["1", "Paris, France"]),
                    row(&["2", "Berlin, Germany"]),
                ],
            )
            .with_table(MAPPING_TABLE, mapping)
    }

    #[test]
    fn test_rewrites_matching_cell() {
        let mut store =
            store_with_mapping(vec![row(&["GEO", "Paris, France", "1006094"])]);
        let report = convert_names_to_ids(&mut store).unwrap();

        assert_eq!(report.cells_rewritten, 1);
        let rows = store.all_rows(INPUT_TABLE).unwrap();
        assert_eq!(rows[1], row(&["1", "1006094"]));
        assert_eq!(rows[2], row(&["2", "Berlin, Germany"]));
    }

    #[test]
    fn test_missing_column_is_silently_skipped() {
        let mut store =
            store_with_mapping(vec![row(&["GEO2", "Paris, France", "1006094"])]);
        let report = convert_names_to_ids(&mut store).unwrap();

        assert_eq!(report.rules_skipped, 1);
        assert_eq!(report.cells_rewritten, 0);
        // No mutation anywhere.
        let rows = store.all_rows(INPUT_TABLE).unwrap();
        assert_eq!(rows[1], row(&["1", "Paris, France"]));
    }

    #[test]
    fn test_later_rule_sees_earlier_rewrite() {
        let mut store = store_with_mapping(vec![
            row(&["GEO", "Paris, France", "FR-1006094"]),
            row(&["GEO", "FR-", ""]),
        ]);
        let report = convert_names_to_ids(&mut store).unwrap();

        assert_eq!(report.cells_rewritten, 2);
        let rows = store.all_rows(INPUT_TABLE).unwrap();
        assert_eq!(rows[1][1], "1006094");
    }

    #[test]
    fn test_substring_match_inside_cell() {
        let mut store = store_with_mapping(vec![row(&["GEO", "Paris", "75000"])]);
        convert_names_to_ids(&mut store).unwrap();

        let rows = store.all_rows(INPUT_TABLE).unwrap();
        assert_eq!(rows[1][1], "75000, France");
    }

    #[test]
    fn test_header_row_is_never_rewritten() {
        let mut store = store_with_mapping(vec![row(&["GEO", "GEO", "X"])]);
        convert_names_to_ids(&mut store).unwrap();

        let rows = store.all_rows(INPUT_TABLE).unwrap();
        assert_eq!(rows[0], row(&["ID", "GEO"]));
    }

    #[test]
    fn test_missing_mapping_table_is_fatal() {
        let mut store = MemoryStore::new().with_table(INPUT_TABLE, vec![row(&["ID"])]);
        assert!(matches!(
            convert_names_to_ids(&mut store),
            Err(SdfError::MissingTable(_))
        ));
    }
}
