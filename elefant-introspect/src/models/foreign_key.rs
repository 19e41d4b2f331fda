use serde::Serialize;

/// A single column of a foreign key. Composite foreign keys are represented as multiple
/// values sharing the same `constraint_name`.
#[derive(Debug, Eq, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyConstraintMetadata {
    pub table_schema: String,
    pub constraint_name: String,
    pub table_name: String,
    pub column_name: String,
    pub foreign_table_schema: String,
    pub foreign_table_name: String,
    pub foreign_column_name: String,
}
