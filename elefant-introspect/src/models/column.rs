use serde::Serialize;
use crate::SemanticType;

#[derive(Debug, Eq, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub column_name: String,
    /// The type as reported by `information_schema`, e.g. `character varying` or `USER-DEFINED`.
    pub data_type: String,
    pub is_nullable: bool,
    /// The underlying type name, e.g. the enum name for `USER-DEFINED` columns or `_text` for arrays.
    pub udt_name: String,
    /// Resolved by the loader's `parse_type` when the column is assembled into a table.
    pub semantic_type: Option<SemanticType>,
}

impl ColumnMetadata {
    pub fn new(column_name: &str, data_type: &str, is_nullable: bool, udt_name: &str) -> Self {
        ColumnMetadata {
            column_name: column_name.to_string(),
            data_type: data_type.to_string(),
            is_nullable,
            udt_name: udt_name.to_string(),
            semantic_type: None,
        }
    }

    pub fn with_semantic_type(mut self, semantic_type: SemanticType) -> Self {
        self.semantic_type = Some(semantic_type);
        self
    }

    /// The resolved semantic type, falling back to the Postgres type mapping for columns
    /// that were never assembled.
    pub fn semantic_type(&self) -> crate::Result<SemanticType> {
        match self.semantic_type {
            Some(semantic_type) => Ok(semantic_type),
            None => SemanticType::from_native(&self.data_type),
        }
    }
}
