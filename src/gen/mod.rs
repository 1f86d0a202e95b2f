//! SDF generation - expand input records into hierarchy rows
//!
//! The pipeline: [`columns::ColumnMap`] snapshots the structure and input
//! tables, [`resolver::PlaceholderResolver`] fills `%%COLUMN%%` tokens from
//! a record, [`builder::RowBuilder`] produces one resolved row per entity
//! type, and [`generator::SdfGenerator`] drives the per-record loop with
//! parent deduplication. [`rewriter`] is a standalone pre-processing pass
//! that shares nothing with the generator but the store.

pub mod builder;
pub mod columns;
pub mod generator;
pub mod resolver;
pub mod rewriter;
pub mod types;

pub use builder::RowBuilder;
pub use columns::ColumnMap;
pub use generator::SdfGenerator;
pub use resolver::{PlaceholderResolver, ResolvedRow, TokenStyle};
pub use rewriter::convert_names_to_ids;
pub use types::{
    EntityType, GeneratorConfig, RewriteReport, RunReport, GROUP_ID_COLUMN, INPUT_TABLE,
    MAPPING_TABLE, STRUCTURE_TABLE,
};
