use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::gen::columns::ColumnMap;

// Leftover-token scan for the legacy style. A bare `%` is common in normal
// text (budgets, rates), so only a delimited identifier counts as a token.
static SINGLE_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[A-Za-z0-9_]+%").unwrap());

/// Which placeholder grammar the templates use.
///
/// A workbook uses exactly one style; the two are never mixed within one
/// deployment's templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenStyle {
    /// `%%COLUMN_NAME%%` (authoritative).
    #[default]
    DoublePercent,
    /// `%COLUMN_NAME%` (legacy workbooks).
    SinglePercent,
}

impl TokenStyle {
    fn token(&self, column: &str) -> String {
        match self {
            TokenStyle::DoublePercent => format!("%%{}%%", column),
            TokenStyle::SinglePercent => format!("%{}%", column),
        }
    }

    fn find_leftover(&self, value: &str) -> Option<String> {
        match self {
            TokenStyle::DoublePercent => {
                value.contains("%%").then(|| value.to_string())
            }
            TokenStyle::SinglePercent => SINGLE_TOKEN_REGEX
                .is_match(value)
                .then(|| value.to_string()),
        }
    }
}

/// One template row after substitution, plus the values that still carry
/// a placeholder token nobody could fill.
#[derive(Debug, Clone)]
pub struct ResolvedRow {
    pub values: Vec<String>,
    pub unresolved: Vec<String>,
}

/// Substitutes record values into placeholder-bearing template values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderResolver {
    style: TokenStyle,
}

impl PlaceholderResolver {
    pub fn new(style: TokenStyle) -> Self {
        PlaceholderResolver { style }
    }

    /// Resolve one template row against data record `record_index`.
    ///
    /// For every input column, the first occurrence of that column's token
    /// in each value is replaced with the record's cell text. Matching is
    /// case-sensitive and exact. Values that still contain a token after
    /// every column has been tried are returned as-is and reported in
    /// `unresolved`; the caller accumulates those into the run diagnostics
    /// rather than aborting.
    pub fn resolve(
        &self,
        template: &[String],
        record_index: usize,
        input: &ColumnMap,
    ) -> ResolvedRow {
        let mut values = Vec::with_capacity(template.len());
        let mut unresolved = Vec::new();

        for template_value in template {
            let mut value = template_value.clone();
            for column in input.column_names() {
                let token = self.style.token(column);
                if value.contains(&token) {
                    let replacement = input.record_value(column, record_index).unwrap_or("");
                    value = value.replacen(&token, replacement, 1);
                }
            }
            if let Some(offender) = self.style.find_leftover(&value) {
                unresolved.push(offender);
            }
            values.push(value);
        }

        ResolvedRow { values, unresolved }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn input() -> ColumnMap {
        ColumnMap::from_rows(&[
            row(&["ID", "NAME"]),
            row(&["42", "Acme"]),
            row(&["7", "Spot"]),
        ])
    }

    #[test]
    fn test_basic_substitution() {
        let resolver = PlaceholderResolver::new(TokenStyle::DoublePercent);
        let resolved = resolver.resolve(&row(&["Order for %%NAME%%"]), 0, &input());

        assert_eq!(resolved.values, row(&["Order for Acme"]));
        assert!(resolved.unresolved.is_empty());
    }

    #[test]
    fn test_record_index_selects_the_row() {
        let resolver = PlaceholderResolver::default();
        let resolved = resolver.resolve(&row(&["%%ID%%-LI", "Active"]), 1, &input());

        assert_eq!(resolved.values, row(&["7-LI", "Active"]));
    }

    #[test]
    fn test_unresolved_token_is_reported_not_fatal() {
        let resolver = PlaceholderResolver::default();
        let resolved = resolver.resolve(&row(&["%%MISSING%%"]), 0, &input());

        // The literal token stays in the output row and shows up as a
        // diagnostic; the row is still usable.
        assert_eq!(resolved.values, row(&["%%MISSING%%"]));
        assert_eq!(resolved.unresolved, row(&["%%MISSING%%"]));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let resolver = PlaceholderResolver::default();
        let resolved = resolver.resolve(&row(&["%%name%%"]), 0, &input());
        assert_eq!(resolved.values, row(&["%%name%%"]));
        assert_eq!(resolved.unresolved.len(), 1);
    }

    #[test]
    fn test_single_percent_style() {
        let resolver = PlaceholderResolver::new(TokenStyle::SinglePercent);
        let resolved = resolver.resolve(&row(&["%NAME% / %GONE%"]), 0, &input());

        assert_eq!(resolved.values, row(&["Acme / %GONE%"]));
        assert_eq!(resolved.unresolved.len(), 1);
    }

    #[test]
    fn test_single_percent_ignores_bare_percent() {
        let resolver = PlaceholderResolver::new(TokenStyle::SinglePercent);
        let resolved = resolver.resolve(&row(&["rate is 50%"]), 0, &input());
        assert!(resolved.unresolved.is_empty());
    }

    #[test]
    fn test_double_style_does_not_touch_single_tokens() {
        let resolver = PlaceholderResolver::new(TokenStyle::DoublePercent);
        let resolved = resolver.resolve(&row(&["%NAME%"]), 0, &input());
        // Not this style's token, and not this style's leftover either.
        assert_eq!(resolved.values, row(&["%NAME%"]));
        assert!(resolved.unresolved.is_empty());
    }

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        let resolver = PlaceholderResolver::default();
        let resolved = resolver.resolve(&row(&["%%NAME%% %%NAME%%"]), 0, &input());

        assert_eq!(resolved.values, row(&["Acme %%NAME%%"]));
        assert_eq!(resolved.unresolved.len(), 1);
    }
}
