use crate::metadata_loader::MetadataLoader;
use crate::models::*;
use crate::postgres_client_wrapper::PostgresClientWrapper;
use crate::Result;
use tracing::instrument;

mod enumeration;
mod foreign_key;
mod index;
mod reference_table;
mod schema;
mod table;
mod table_column;

/// Reads schema metadata from the Postgres system catalogs.
pub struct PostgresLoader<'a> {
    connection: &'a PostgresClientWrapper,
}

impl PostgresLoader<'_> {
    pub fn new(connection: &PostgresClientWrapper) -> PostgresLoader<'_> {
        PostgresLoader { connection }
    }
}

impl MetadataLoader for PostgresLoader<'_> {
    async fn schema(&self) -> Result<String> {
        self.get_current_schema().await
    }

    async fn table_list(&self, schema: &str) -> Result<Vec<TableMetadata>> {
        let tables = self.get_tables(schema).await?;
        Ok(tables.into_iter().map(TableMetadata::from).collect())
    }

    async fn column_list(&self, schema: &str, table_name: &str) -> Result<Vec<ColumnMetadata>> {
        let columns = self.get_columns(schema, table_name).await?;
        Ok(columns.into_iter().map(ColumnMetadata::from).collect())
    }

    async fn constraint_list(&self, schema: &str, table_name: &str) -> Result<Vec<ConstraintMetadata>> {
        let indices = self.get_indices(schema, table_name).await?;
        Ok(indices.into_iter().map(ConstraintMetadata::from).collect())
    }

    async fn foreign_key_constraint_list(&self, table_name: &str) -> Result<Vec<ForeignKeyConstraintMetadata>> {
        let columns = self.get_foreign_key_columns(table_name).await?;
        Ok(columns.into_iter().map(ForeignKeyConstraintMetadata::from).collect())
    }

    async fn enum_list(&self, schema: &str) -> Result<Vec<EnumMetadata>> {
        let enums = self.get_enums(schema).await?;
        Ok(enums.into_iter().map(EnumMetadata::from).collect())
    }

    #[instrument(skip(self))]
    async fn enum_value_list(&self, schema: &str, enum_name: &str) -> Result<Vec<EnumValueMetadata>> {
        self.get_enum_values(schema, enum_name)
            .await?
            .iter()
            .map(|v| v.to_enum_value_metadata(enum_name))
            .collect()
    }

    async fn reference_table_value_list(&self, schema: &str, table_name: &str) -> Result<Vec<EnumValueMetadata>> {
        self.get_reference_table_values(schema, table_name)
            .await?
            .iter()
            .map(|v| v.to_enum_value_metadata(table_name))
            .collect()
    }
}

macro_rules! define_loader_query {
    ($fn_name:ident, $result:ident, ($($param:ident: $param_type:ty),*), $query:literal) => {
        impl $crate::postgres_loader::PostgresLoader<'_> {
            #[tracing::instrument(skip(self))]
            pub(in crate::postgres_loader) async fn $fn_name(&self, $($param: $param_type),*) -> $crate::Result<Vec<$result>> {
                self.connection.get_results_with_params($query, &[$(&$param),*]).await
            }
        }
    };
}

pub(crate) use define_loader_query;
