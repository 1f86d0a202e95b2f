//! # sdfgen - Structured Data File generator
//!
//! Expands a small table of user-entered records into DV360 SDF-compatible
//! tables for a four-level ad hierarchy (insertion order → line item →
//! ad group → ad), by substituting per-record values into per-entity
//! template rows.
//!
//! ## Modules
//!
//! - **store**: the [`TabularStore`] workbook abstraction (in-memory and
//!   CSV-directory implementations)
//! - **gen**: the generation engine (column snapshots, placeholder
//!   resolution, hierarchy expansion, name-to-ID rewriting)
//! - **setup**: one-time seeding of the source tables from the built-in
//!   field schema
//!
//! ## Quick Start
//!
//! ```rust
//! use sdfgen::store::{MemoryStore, TabularStore};
//! use sdfgen::{generate, GeneratorConfig};
//!
//! # fn main() -> Result<(), sdfgen::SdfError> {
//! let mut store = MemoryStore::new();
//! sdfgen::setup::initial_setup(&mut store)?;
//! store.append_row(
//!     "INPUT",
//!     &["g1".into(), "Spot".into(), "dQw4w9WgXcQ".into(), "example.com".into(),
//!       "https://example.com".into()],
//! )?;
//!
//! let report = generate(&mut store, GeneratorConfig::default())?;
//! assert!(report.is_clean());
//! assert_eq!(store.all_rows("Ad-SDF")?.len(), 2); // header + one ad
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod gen;
pub mod setup;
pub mod store;

// Re-export commonly used types for convenience
pub use error::SdfError;
pub use gen::{
    convert_names_to_ids, EntityType, GeneratorConfig, RewriteReport, RunReport, SdfGenerator,
    TokenStyle,
};
pub use store::{CsvStore, MemoryStore, TabularStore};

/// Main entry point: run one generation pass against a workbook.
pub fn generate<S: TabularStore>(
    store: &mut S,
    config: GeneratorConfig,
) -> Result<RunReport, SdfError> {
    SdfGenerator::new(config).run(store)
}
