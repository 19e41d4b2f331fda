use ordered_float::NotNan;
use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::postgres_loader::define_loader_query;
use crate::{EnumMetadata, EnumValueMetadata, IntrospectError};

pub struct EnumResult {
    pub name: String,
}

impl FromRow for EnumResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(Self {
            name: row.try_get(0)?,
        })
    }
}

impl From<EnumResult> for EnumMetadata {
    fn from(value: EnumResult) -> Self {
        EnumMetadata {
            enum_name: value.name,
        }
    }
}

pub struct EnumValueResult {
    pub label: String,
    pub sort_order: f32,
}

impl FromRow for EnumValueResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(Self {
            label: row.try_get(0)?,
            sort_order: row.try_get(1)?,
        })
    }
}

impl EnumValueResult {
    /// `enum_name` is only used to describe the enum if the sort order turns out to be invalid.
    pub fn to_enum_value_metadata(&self, enum_name: &str) -> crate::Result<EnumValueMetadata> {
        let sort_order = NotNan::new(self.sort_order).map_err(|_| IntrospectError::InvalidEnumSortOrder {
            enum_name: enum_name.to_string(),
            value: self.label.clone(),
        })?;

        Ok(EnumValueMetadata {
            enum_value: self.label.clone(),
            sort_order,
        })
    }
}

//language=postgresql
define_loader_query!(get_enums, EnumResult, (schema: &str), r#"
select distinct t.typname::text
from pg_type t
         join pg_namespace ns on ns.oid = t.typnamespace
         join pg_enum e on e.enumtypid = t.oid
where ns.nspname = $1
order by 1;
"#);

//language=postgresql
define_loader_query!(get_enum_values, EnumValueResult, (schema: &str, enum_name: &str), r#"
select e.enumlabel::text, e.enumsortorder
from pg_enum e
         join pg_type t on t.oid = e.enumtypid
         join pg_namespace ns on ns.oid = t.typnamespace
where ns.nspname = $1
  and t.typname = $2
order by e.enumsortorder;
"#);
