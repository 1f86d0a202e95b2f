use serde::{Deserialize, Serialize};

use crate::gen::resolver::TokenStyle;

/// Name of the user-entered input table.
pub const INPUT_TABLE: &str = "INPUT";
/// Name of the template table (field names and default values per entity).
pub const STRUCTURE_TABLE: &str = "STRUCTURE_AND_DEFAULTS";
/// Name of the name-to-ID match table.
pub const MAPPING_TABLE: &str = "NAME_IDS_MAPPING";

/// The distinguished input column that groups ads under one line item /
/// ad group.
pub const GROUP_ID_COLUMN: &str = "ID";

/// The four levels of the generated hierarchy, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    Order,
    LineItem,
    AdGroup,
    Ad,
}

impl EntityType {
    pub const ALL: [EntityType; 4] = [
        EntityType::Order,
        EntityType::LineItem,
        EntityType::AdGroup,
        EntityType::Ad,
    ];

    /// The output table this entity's rows land in. The names double as
    /// SDF file names, so they are part of the external contract.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityType::Order => "IO-SDF",
            EntityType::LineItem => "LI-SDF",
            EntityType::AdGroup => "AdGroup-SDF",
            EntityType::Ad => "Ad-SDF",
        }
    }

    /// Column in the structure table holding this entity's field names.
    pub fn fields_column(&self) -> &'static str {
        self.table_name()
    }

    /// Column in the structure table holding this entity's default values.
    pub fn defaults_column(&self) -> String {
        format!("{}-defaults", self.table_name())
    }
}

/// Configuration for one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Placeholder grammar used by the structure table's default values.
    pub token_style: TokenStyle,
}

/// What a finished generation run looked like.
///
/// `warnings` carries one entry per template value that still contained a
/// placeholder token after substitution; a non-empty list means the output
/// tables were written but need a human look.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub records: usize,
    pub rows_written: usize,
    pub warnings: Vec<String>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Outcome of a name-to-ID conversion pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteReport {
    /// Rules whose input column existed and were scanned.
    pub rules_applied: usize,
    /// Rules naming a column absent from the input table (skipped, by
    /// contract not an error).
    pub rules_skipped: usize,
    /// Cells whose text actually changed.
    pub cells_rewritten: usize,
}
