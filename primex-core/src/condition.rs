use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One cell of a condition table. The tabular source is stringly typed;
/// the accessors do the narrowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue(String);

impl FieldValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_text(&self) -> &str {
        &self.0
    }

    pub fn as_int(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }

    /// Resolves the cell as a file reference relative to `base`.
    pub fn as_rel_path(&self, base: &Path) -> PathBuf {
        base.join(self.0.trim())
    }
}

/// How a record's field set must relate to a schema's required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    /// Field sets must be equal.
    Exact,
    /// The record may carry extra fields beyond the required ones.
    Superset,
}

/// The set of field names a block of condition records must provide.
#[derive(Debug, Clone)]
pub struct Schema {
    required: BTreeSet<String>,
    mode: SchemaMode,
}

impl Schema {
    pub fn exact<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: fields.into_iter().map(Into::into).collect(),
            mode: SchemaMode::Exact,
        }
    }

    pub fn superset<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: fields.into_iter().map(Into::into).collect(),
            mode: SchemaMode::Superset,
        }
    }

    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    pub fn matches(&self, record: &ConditionRecord) -> bool {
        let found: BTreeSet<&str> = record.field_names().collect();
        let required: BTreeSet<&str> = self.required.iter().map(String::as_str).collect();
        match self.mode {
            SchemaMode::Exact => found == required,
            SchemaMode::Superset => required.is_subset(&found),
        }
    }
}

/// One row of a condition table: an immutable mapping of named fields,
/// in source column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ConditionRecord {
    pub fn new(fields: Vec<(String, FieldValue)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
