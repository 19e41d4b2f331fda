use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::postgres_loader::define_loader_query;
use crate::ColumnMetadata;

#[derive(Debug, Eq, PartialEq)]
pub struct TableColumnsResult {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub udt_name: String,
}

impl FromRow for TableColumnsResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(TableColumnsResult {
            column_name: row.try_get(0)?,
            data_type: row.try_get(1)?,
            is_nullable: row.try_get(2)?,
            udt_name: row.try_get(3)?,
        })
    }
}

impl From<TableColumnsResult> for ColumnMetadata {
    fn from(value: TableColumnsResult) -> Self {
        ColumnMetadata {
            column_name: value.column_name,
            data_type: value.data_type,
            is_nullable: value.is_nullable,
            udt_name: value.udt_name,
            semantic_type: None,
        }
    }
}

// information_schema is used here as its `data_type` is the spelling the semantic types are mapped from.
//language=postgresql
define_loader_query!(get_columns, TableColumnsResult, (schema: &str, table_name: &str), r#"
select c.column_name::text,
       c.data_type::text,
       c.is_nullable::text = 'YES' as is_nullable,
       c.udt_name::text
from information_schema.columns c
where c.table_schema = $1::text
  and c.table_name = $2::text
order by c.ordinal_position;
"#);
