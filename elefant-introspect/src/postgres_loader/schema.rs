use tracing::instrument;
use crate::postgres_loader::PostgresLoader;
use crate::IntrospectError;

impl PostgresLoader<'_> {
    #[instrument(skip_all)]
    pub(in crate::postgres_loader) async fn get_current_schema(&self) -> crate::Result<String> {
        //language=postgresql
        let schema: Option<String> = self.connection.get_single_result("select current_schema()::text;").await?;

        match schema {
            Some(schema) if !schema.is_empty() => Ok(schema),
            _ => Err(IntrospectError::SchemaUndeterminable),
        }
    }
}
