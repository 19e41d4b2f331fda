use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::postgres_loader::define_loader_query;
use crate::ConstraintMetadata;

pub struct IndexResult {
    pub table_schema: String,
    pub table_name: String,
    pub index_name: String,
    pub index_predicate: Option<String>,
    pub is_unique: bool,
    pub is_primary_key: bool,
    pub index_keys: Vec<String>,
}

impl FromRow for IndexResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(IndexResult {
            table_schema: row.try_get(0)?,
            table_name: row.try_get(1)?,
            index_name: row.try_get(2)?,
            index_predicate: row.try_get(3)?,
            is_unique: row.try_get(4)?,
            is_primary_key: row.try_get(5)?,
            index_keys: row.try_get(6)?,
        })
    }
}

impl From<IndexResult> for ConstraintMetadata {
    fn from(value: IndexResult) -> Self {
        ConstraintMetadata {
            schema: value.table_schema,
            table: value.table_name,
            index_name: value.index_name,
            index_predicate: value.index_predicate,
            is_unique: value.is_unique,
            is_primary: value.is_primary_key,
            index_keys: value.index_keys,
        }
    }
}

//language=postgresql
define_loader_query!(get_indices, IndexResult, (schema: &str, table_name: &str), r#"
select n.nspname::text                                      as table_schema,
       table_class.relname::text                            as table_name,
       index_class.relname::text                            as index_name,
       pg_catalog.pg_get_expr(i.indpred, i.indrelid, true)  as index_predicate,
       i.indisunique                                        as is_unique,
       i.indisprimary                                       as is_primary_key,
       array(select pg_catalog.pg_get_indexdef(i.indexrelid, k, true)
             from generate_series(1, i.indnkeyatts) as k
             order by k)::text[]                            as index_keys
from pg_index i
         join pg_class table_class on table_class.oid = i.indrelid
         join pg_class index_class on index_class.oid = i.indexrelid
         join pg_namespace n on n.oid = table_class.relnamespace
where n.nspname = $1
  and table_class.relname = $2
order by index_class.relname;
"#);
