use serde::Serialize;

/// An index on a table, which covers primary keys and unique constraints as well.
#[derive(Debug, Eq, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintMetadata {
    pub schema: String,
    pub table: String,
    pub index_name: String,
    /// The `where` clause of a partial index.
    pub index_predicate: Option<String>,
    pub is_unique: bool,
    pub is_primary: bool,
    /// The key expressions in index order. Plain columns are just the column name.
    pub index_keys: Vec<String>,
}
