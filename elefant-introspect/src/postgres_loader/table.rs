use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::postgres_loader::define_loader_query;
use crate::TableMetadata;

#[derive(Debug, Eq, PartialEq)]
pub struct TablesResult {
    pub table_name: String,
}

impl FromRow for TablesResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(TablesResult {
            table_name: row.try_get(0)?,
        })
    }
}

impl From<TablesResult> for TableMetadata {
    fn from(value: TablesResult) -> Self {
        TableMetadata {
            table_name: value.table_name,
        }
    }
}

//language=postgresql
define_loader_query!(get_tables, TablesResult, (schema: &str), r#"
select cl.relname::text
from pg_class cl
         join pg_namespace ns on ns.oid = cl.relnamespace
where ns.nspname = $1
  and cl.relkind in ('r', 'p')
  and cl.relname <> 'schema_migrations'
order by cl.relname;
"#);
