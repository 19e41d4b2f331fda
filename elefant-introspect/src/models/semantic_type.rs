use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::Serialize;
use crate::IntrospectError;

/// The portable value kinds every native column type must map to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum SemanticType {
    String,
    Int,
    Int64,
    Bool,
    Decimal,
    Time,
    #[allow(clippy::upper_case_acronyms)]
    UUID,
    Jsonb,
    StringArray,
}

impl SemanticType {
    /// Maps a type name as reported by `information_schema.columns.data_type` to its semantic type.
    ///
    /// The comparison ignores case. Unknown types are an error rather than a fallback, as
    /// guessing would produce models that do not match the database.
    pub fn from_native(native_type: &str) -> crate::Result<Self> {
        let semantic = match native_type.to_lowercase().as_str() {
            "array" => SemanticType::StringArray,
            "boolean" => SemanticType::Bool,
            "character" | "character varying" | "text" | "user-defined" => SemanticType::String,
            "inet" => SemanticType::String,
            "smallint" | "integer" => SemanticType::Int,
            "bigint" => SemanticType::Int64,
            "jsonb" => SemanticType::Jsonb,
            "float" => SemanticType::Decimal,
            "decimal" | "double precision" | "numeric" => SemanticType::Decimal,
            "date"
            | "timestamp with time zone"
            | "timestamp without time zone"
            | "time with time zone"
            | "time without time zone" => SemanticType::Time,
            "uuid" => SemanticType::UUID,
            _ => return Err(IntrospectError::UnsupportedType(native_type.to_string())),
        };

        Ok(semantic)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SemanticType::String => "String",
            SemanticType::Int => "Int",
            SemanticType::Int64 => "Int64",
            SemanticType::Bool => "Bool",
            SemanticType::Decimal => "Decimal",
            SemanticType::Time => "Time",
            SemanticType::UUID => "UUID",
            SemanticType::Jsonb => "Jsonb",
            SemanticType::StringArray => "StringArray",
        }
    }
}

impl Display for SemanticType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SemanticType {
    type Err = IntrospectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticType::from_native(s)
    }
}
