use std::future::Future;
use crate::models::*;
use crate::Result;

/// The queries a database backend has to answer for a [`Data`] description to be assembled.
///
/// Every method reads the live catalog when called. Nothing is cached between calls, and
/// separate calls are not guaranteed to see the same snapshot of the catalog.
///
/// [`Data`]: crate::Data
pub trait MetadataLoader: Sync {
    /// The schema to introspect.
    fn schema(&self) -> impl Future<Output = Result<String>> + Send;

    /// All user tables in the schema ordered by name, excluding the migration bookkeeping table.
    fn table_list(&self, schema: &str) -> impl Future<Output = Result<Vec<TableMetadata>>> + Send;

    /// The columns of a table in the order they are declared.
    fn column_list(&self, schema: &str, table_name: &str) -> impl Future<Output = Result<Vec<ColumnMetadata>>> + Send;

    /// The indices of a table ordered by index name.
    fn constraint_list(&self, schema: &str, table_name: &str) -> impl Future<Output = Result<Vec<ConstraintMetadata>>> + Send;

    /// One entry per column of every foreign key originating from the table.
    fn foreign_key_constraint_list(&self, table_name: &str) -> impl Future<Output = Result<Vec<ForeignKeyConstraintMetadata>>> + Send;

    /// The names of the enum types in the schema.
    fn enum_list(&self, schema: &str) -> impl Future<Output = Result<Vec<EnumMetadata>>> + Send;

    /// The values of an enum type in declared sort order.
    fn enum_value_list(&self, schema: &str, enum_name: &str) -> impl Future<Output = Result<Vec<EnumValueMetadata>>> + Send;

    /// The distinct entries of the `value` column of a reference table, in lexical order.
    fn reference_table_value_list(&self, schema: &str, table_name: &str) -> impl Future<Output = Result<Vec<EnumValueMetadata>>> + Send;

    /// Maps a native column type to its semantic type.
    fn parse_type(&self, native_type: &str) -> Result<SemanticType> {
        SemanticType::from_native(native_type)
    }
}
