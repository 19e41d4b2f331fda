use tracing::instrument;
use crate::postgres_loader::enumeration::EnumValueResult;
use crate::postgres_loader::PostgresLoader;
use crate::quoting::quote_qualified;

impl PostgresLoader<'_> {
    /// Reads the distinct, non-null entries of the `value` column. The sort order of each
    /// entry is its 1-based position in the result.
    #[instrument(skip(self))]
    pub(in crate::postgres_loader) async fn get_reference_table_values(&self, schema: &str, table_name: &str) -> crate::Result<Vec<EnumValueResult>> {
        // Identifiers cannot be bound as parameters, so the table name is quoted into the query.
        //language=postgresql
        let query = format!(r#"
select v.value, (row_number() over (order by v.value))::real
from (select distinct value::text as value from {} where value is not null) v
order by v.value;
"#, quote_qualified(schema, table_name));

        self.connection.get_results(&query).await
    }
}
