use ordered_float::NotNan;
use serde::Serialize;

#[derive(Debug, Eq, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMetadata {
    pub enum_name: String,
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueMetadata {
    pub enum_value: String,
    pub sort_order: NotNan<f32>,
}

impl EnumValueMetadata {
    pub fn new(enum_value: &str, sort_order: NotNan<f32>) -> Self {
        EnumValueMetadata {
            enum_value: enum_value.to_string(),
            sort_order,
        }
    }
}

/// An enumeration, either declared natively with `create type ... as enum` or
/// derived from the rows of a reference table.
#[derive(Debug, Eq, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValueMetadata>,
    pub is_reference_table: bool,
    /// Only set when `is_reference_table` is true.
    pub reference_table_name: Option<String>,
}

impl Enum {
    pub fn native(name: &str, values: Vec<EnumValueMetadata>) -> Self {
        Enum {
            name: name.to_string(),
            values,
            is_reference_table: false,
            reference_table_name: None,
        }
    }

    pub fn from_reference_table(name: &str, reference_table_name: &str, values: Vec<EnumValueMetadata>) -> Self {
        Enum {
            name: name.to_string(),
            values,
            is_reference_table: true,
            reference_table_name: Some(reference_table_name.to_string()),
        }
    }

    pub fn value_labels(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.enum_value.as_str())
    }
}
