use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::postgres_loader::define_loader_query;
use crate::ForeignKeyConstraintMetadata;

pub struct ForeignKeyColumnResult {
    pub source_schema_name: String,
    pub constraint_name: String,
    pub source_table_name: String,
    pub source_table_column_name: String,
    pub target_schema_name: String,
    pub target_table_name: String,
    pub target_table_column_name: String,
}

impl FromRow for ForeignKeyColumnResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(Self {
            source_schema_name: row.try_get(0)?,
            constraint_name: row.try_get(1)?,
            source_table_name: row.try_get(2)?,
            source_table_column_name: row.try_get(3)?,
            target_schema_name: row.try_get(4)?,
            target_table_name: row.try_get(5)?,
            target_table_column_name: row.try_get(6)?,
        })
    }
}

impl From<ForeignKeyColumnResult> for ForeignKeyConstraintMetadata {
    fn from(value: ForeignKeyColumnResult) -> Self {
        ForeignKeyConstraintMetadata {
            table_schema: value.source_schema_name,
            constraint_name: value.constraint_name,
            table_name: value.source_table_name,
            column_name: value.source_table_column_name,
            foreign_table_schema: value.target_schema_name,
            foreign_table_name: value.target_table_name,
            foreign_column_name: value.target_table_column_name,
        }
    }
}

//language=postgresql
define_loader_query!(get_foreign_key_columns, ForeignKeyColumnResult, (table_name: &str), r#"
select tab_ns.nspname::text            as source_schema_name,
       con.conname::text               as constraint_name,
       tab.relname::text               as source_table_name,
       source_table_attr.attname::text as source_table_column_name,
       target_ns.nspname::text         as target_schema_name,
       target.relname::text            as target_table_name,
       target_table_attr.attname::text as target_table_column_name
from pg_constraint con
         join pg_class tab on tab.oid = con.conrelid
         join pg_namespace tab_ns on tab_ns.oid = tab.relnamespace
         join pg_class target on target.oid = con.confrelid
         join pg_namespace target_ns on target_ns.oid = target.relnamespace
         join unnest(con.conkey, con.confkey) with ordinality as cols (conkey, confkey, position) on true
         join pg_attribute source_table_attr
              on source_table_attr.attrelid = con.conrelid and source_table_attr.attnum = cols.conkey
         join pg_attribute target_table_attr
              on target_table_attr.attrelid = con.confrelid and target_table_attr.attnum = cols.confkey
where con.contype = 'f'
  and tab.relname = $1
order by con.conname, cols.position;
"#);
