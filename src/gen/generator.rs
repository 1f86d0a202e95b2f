use tracing::{info, warn};

use crate::error::SdfError;
use crate::gen::builder::RowBuilder;
use crate::gen::columns::ColumnMap;
use crate::gen::resolver::PlaceholderResolver;
use crate::gen::types::{
    EntityType, GeneratorConfig, RunReport, GROUP_ID_COLUMN, INPUT_TABLE, STRUCTURE_TABLE,
};
use crate::store::TabularStore;

/// The hierarchical generation engine.
///
/// One call to [`SdfGenerator::run`] is one run: it snapshots the structure
/// and input tables, recreates the four output tables, and expands every
/// input record into hierarchy rows. All run state (snapshots, dedup list,
/// warning buffer) lives in a per-run context and is dropped when the run
/// ends, so back-to-back runs on unchanged tables produce identical output.
pub struct SdfGenerator {
    config: GeneratorConfig,
}

impl SdfGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        SdfGenerator { config }
    }

    /// Execute one generation run against `store`.
    ///
    /// Fails fast with [`SdfError::MissingTable`] if the structure or input
    /// table is absent, before any output table is touched. Unresolved
    /// placeholders never fail the run; they are collected into the
    /// report's warning list.
    pub fn run<S: TabularStore>(&self, store: &mut S) -> Result<RunReport, SdfError> {
        // Snapshot sources first so a missing table aborts with the output
        // tables untouched.
        let structure = ColumnMap::load(store, STRUCTURE_TABLE)?;
        let input = ColumnMap::load(store, INPUT_TABLE)?;

        let mut run = RunState {
            builder: RowBuilder::new(PlaceholderResolver::new(self.config.token_style), &structure),
            input,
            emitted_groups: Vec::new(),
            warnings: Vec::new(),
            rows_written: 0,
        };

        let records = run.input.record_count();
        info!(records, "generation started");

        // Recreate the output tables and emit every header up front.
        for entity in EntityType::ALL {
            store.create_table(entity.table_name())?;
            store.clear_table(entity.table_name())?;
            let header = run.builder.field_names(entity);
            store.append_row(entity.table_name(), &header)?;
        }

        // Exactly one Order per run, emitted from the first record before
        // the per-record loop.
        if records > 0 {
            run.emit(store, EntityType::Order, 0)?;
        }

        for index in 0..records {
            if !run.group_already_emitted(index) {
                run.emit(store, EntityType::LineItem, index)?;
                run.emit(store, EntityType::AdGroup, index)?;
                run.mark_group_emitted(index);
            }
            run.emit(store, EntityType::Ad, index)?;
        }

        let report = RunReport {
            records,
            rows_written: run.rows_written,
            warnings: run.warnings,
        };
        info!(
            records = report.records,
            rows = report.rows_written,
            warnings = report.warnings.len(),
            "generation finished"
        );
        Ok(report)
    }
}

/// Everything owned by a single run and discarded at its end.
struct RunState<'a> {
    builder: RowBuilder<'a>,
    input: ColumnMap,
    emitted_groups: Vec<String>,
    warnings: Vec<String>,
    rows_written: usize,
}

impl RunState<'_> {
    fn group_id(&self, record_index: usize) -> String {
        self.input
            .record_value(GROUP_ID_COLUMN, record_index)
            .unwrap_or("")
            .to_string()
    }

    fn group_already_emitted(&self, record_index: usize) -> bool {
        self.emitted_groups.contains(&self.group_id(record_index))
    }

    fn mark_group_emitted(&mut self, record_index: usize) {
        self.emitted_groups.push(self.group_id(record_index));
    }

    fn emit<S: TabularStore>(
        &mut self,
        store: &mut S,
        entity: EntityType,
        record_index: usize,
    ) -> Result<(), SdfError> {
        let resolved = self.builder.build(entity, record_index, &self.input);
        for offender in resolved.unresolved {
            warn!(value = %offender, "placeholder with no matching input column");
            self.warnings
                .push(format!("Found a placeholder with no matching value: {}", offender));
        }
        store.append_row(entity.table_name(), &resolved.values)?;
        self.rows_written += 1;
        Ok(())
    }
}
