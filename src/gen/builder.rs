use crate::gen::columns::ColumnMap;
use crate::gen::resolver::{PlaceholderResolver, ResolvedRow};
use crate::gen::types::EntityType;

/// Builds one fully resolved output row for an entity type and record.
///
/// Borrows the structure snapshot for the duration of the run; templates
/// are cloned before resolution so the shared snapshot is never mutated
/// across records.
pub struct RowBuilder<'a> {
    resolver: PlaceholderResolver,
    structure: &'a ColumnMap,
}

impl<'a> RowBuilder<'a> {
    pub fn new(resolver: PlaceholderResolver, structure: &'a ColumnMap) -> Self {
        RowBuilder {
            resolver,
            structure,
        }
    }

    /// Field names for an entity type, in output column order.
    ///
    /// Skips the structural header at index 0 and stops at the first empty
    /// field name: structure columns are padded to the tallest entity, and
    /// an empty field name marks the end of the real fields.
    pub fn field_names(&self, entity: EntityType) -> Vec<String> {
        let column = self.structure.column(entity.fields_column()).unwrap_or(&[]);
        column
            .iter()
            .skip(1)
            .take_while(|name| !name.is_empty())
            .cloned()
            .collect()
    }

    /// Default values for an entity type, truncated to its field count.
    fn defaults(&self, entity: EntityType) -> Vec<String> {
        let field_count = self.field_names(entity).len();
        let column = self
            .structure
            .column(&entity.defaults_column())
            .unwrap_or(&[]);
        let mut defaults: Vec<String> = column.iter().skip(1).take(field_count).cloned().collect();
        defaults.resize(field_count, String::new());
        defaults
    }

    /// Build the resolved output row for `entity` and data record
    /// `record_index`. Unresolved placeholders ride along in the result;
    /// they are the caller's diagnostics to accumulate.
    pub fn build(&self, entity: EntityType, record_index: usize, input: &ColumnMap) -> ResolvedRow {
        let template = self.defaults(entity);
        self.resolver.resolve(&template, record_index, input)
    }
}
