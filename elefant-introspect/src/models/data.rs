use serde::Serialize;
use crate::models::enumeration::Enum;
use crate::models::table::Table;

/// Everything read from a schema, handed to a renderer to generate code from.
#[derive(Debug, Eq, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Data {
    pub schema: String,
    pub tables: Vec<Table>,
    pub enums: Vec<Enum>,
    pub reference_table_enums: Vec<Enum>,
}

impl Data {
    pub fn get_table(&self, table_name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == table_name)
    }

    pub fn get_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn get_reference_table_enum(&self, name: &str) -> Option<&Enum> {
        self.reference_table_enums.iter().find(|e| e.name == name)
    }

    /// Native enums followed by reference table enums.
    pub fn all_enums(&self) -> impl Iterator<Item = &Enum> {
        self.enums.iter().chain(self.reference_table_enums.iter())
    }
}
