//! Column schema resolution.
//!
//! An explicit schema is used as given. Without one, columns are inferred
//! from the first row of the first non-empty batch and then kept: later
//! batches never change the schema, even if their rows have other fields.

use tracing::debug;

use crate::model::{Column, Row, SemanticType};

/// Builds one read-only, visible column per field of `sample`, in field order.
pub fn infer_columns(sample: &Row) -> Vec<Column> {
    sample
        .fields()
        .iter()
        .map(|(name, value)| Column::new(name.clone()).with_type(SemanticType::of_value(value)))
        .collect()
}

/// Resolves a schema from an explicit definition or a sample row.
///
/// Returns `None` when there is neither; resolution is then deferred.
pub fn resolve(explicit: Option<&[Column]>, sample: Option<&Row>) -> Option<Vec<Column>> {
    match explicit {
        Some(columns) if !columns.is_empty() => Some(columns.to_vec()),
        _ => sample.map(infer_columns),
    }
}

/// Holds the schema of a table for its whole lifetime.
#[derive(Debug, Default)]
pub struct SchemaResolver {
    columns: Option<Vec<Column>>,
    inferred: bool,
}

impl SchemaResolver {
    /// Creates a resolver. An empty explicit schema counts as absent.
    pub fn new(explicit: Option<Vec<Column>>) -> Self {
        Self {
            columns: explicit.filter(|c| !c.is_empty()),
            inferred: false,
        }
    }

    /// Feeds a row batch. Infers the schema from `rows[0]` if none exists
    /// yet; returns `true` only on the call that did so.
    pub fn observe(&mut self, rows: &[Row]) -> bool {
        if self.columns.is_some() {
            return false;
        }
        let Some(columns) = resolve(None, rows.first()) else {
            return false;
        };
        debug!(columns = columns.len(), "inferred schema from first row");
        self.columns = Some(columns);
        self.inferred = true;
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.columns.is_some()
    }

    /// Returns `true` if the schema came from data rather than the caller.
    pub fn is_inferred(&self) -> bool {
        self.inferred
    }

    /// Full schema, hidden columns included.
    pub fn columns(&self) -> &[Column] {
        self.columns.as_deref().unwrap_or(&[])
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns().iter().filter(|c| c.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_columns().count()
    }

    pub fn find(&self, name: &str) -> Option<&Column> {
        self.columns().iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        Row::from_json(value).unwrap()
    }

    fn names(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_infer_follows_key_order_and_types() {
        let sample: Row =
            serde_json::from_str(r#"{"id": 1, "name": "a", "ok": true, "extra": null}"#).unwrap();
        let columns = infer_columns(&sample);

        assert_eq!(names(&columns), vec!["id", "name", "ok", "extra"]);
        assert_eq!(columns[0].semantic_type, SemanticType::Number);
        assert_eq!(columns[1].semantic_type, SemanticType::Text);
        assert_eq!(columns[2].semantic_type, SemanticType::Boolean);
        assert!(columns.iter().all(|c| c.visible && !c.editable));
    }

    #[test]
    fn test_explicit_schema_returned_unchanged() {
        let explicit = vec![
            Column::new("b").hidden(),
            Column::new("a").editable().with_type(SemanticType::Rating),
        ];
        let sample = row(json!({"id": 1, "x": 2}));
        let resolved = resolve(Some(explicit.as_slice()), Some(&sample)).unwrap();

        assert_eq!(names(&resolved), vec!["b", "a"]);
        assert!(!resolved[0].visible);
        assert!(resolved[1].editable);
        assert_eq!(resolved[1].semantic_type, SemanticType::Rating);
    }

    #[test]
    fn test_empty_explicit_schema_falls_back_to_inference() {
        let sample = row(json!({"id": 1, "x": 2}));
        let resolved = resolve(Some(&[][..]), Some(&sample)).unwrap();
        assert_eq!(names(&resolved), vec!["id", "x"]);
    }

    #[test]
    fn test_no_schema_no_data_defers() {
        assert!(resolve(None, None).is_none());

        let mut resolver = SchemaResolver::new(None);
        assert!(!resolver.observe(&[]));
        assert!(!resolver.is_resolved());
        assert!(resolver.columns().is_empty());
    }

    #[test]
    fn test_inferred_schema_is_sticky() {
        let mut resolver = SchemaResolver::new(None);
        assert!(resolver.observe(&[row(json!({"id": 1, "a": 1}))]));
        assert!(resolver.is_inferred());

        assert!(!resolver.observe(&[row(json!({"id": 2, "b": 2, "c": 3}))]));
        assert_eq!(names(resolver.columns()), vec!["id", "a"]);
    }

    #[test]
    fn test_explicit_schema_never_inferred() {
        let mut resolver = SchemaResolver::new(Some(vec![Column::new("a")]));
        assert!(!resolver.observe(&[row(json!({"id": 1, "z": 1}))]));
        assert!(!resolver.is_inferred());
        assert_eq!(names(resolver.columns()), vec!["a"]);
    }

    #[test]
    fn test_visible_columns_skip_hidden() {
        let resolver = SchemaResolver::new(Some(vec![
            Column::new("a"),
            Column::new("b").hidden(),
            Column::new("c"),
        ]));
        let visible: Vec<&str> = resolver.visible_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(visible, vec!["a", "c"]);
        assert_eq!(resolver.visible_count(), 2);
        assert!(resolver.find("b").is_some());
    }
}
