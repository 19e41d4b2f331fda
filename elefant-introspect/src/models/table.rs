use serde::Serialize;
use crate::models::column::ColumnMetadata;
use crate::models::constraint::ConstraintMetadata;
use crate::models::foreign_key::ForeignKeyConstraintMetadata;

#[derive(Debug, Eq, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    pub table_name: String,
}

impl TableMetadata {
    pub fn new(table_name: &str) -> Self {
        TableMetadata {
            table_name: table_name.to_string(),
        }
    }
}

/// A table with everything that was read about it from the catalog.
#[derive(Debug, Eq, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table: TableMetadata,
    pub columns: Vec<ColumnMetadata>,
    pub constraints: Vec<ConstraintMetadata>,
    pub foreign_key_constraints: Vec<ForeignKeyConstraintMetadata>,
}

impl Table {
    pub fn name(&self) -> &str {
        &self.table.table_name
    }

    pub fn get_column(&self, column_name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.column_name == column_name)
    }

    pub fn primary_key(&self) -> Option<&ConstraintMetadata> {
        self.constraints.iter().find(|c| c.is_primary)
    }
}
