use crate::metadata_loader::MetadataLoader;
use crate::models::*;
use crate::Result;
use tracing::{debug, instrument};

/// The suffix marking a table as a reference table, whose `value` column is turned into an enum.
pub const REFERENCE_TABLE_SUFFIX: &str = "_reference_table";

/// Derives the enum name of a reference table, or `None` if the table is not a reference table.
///
/// Only a trailing suffix is removed, so `a_reference_table_b_reference_table` becomes
/// `a_reference_table_b`. A table named just `_reference_table` has no name to give an
/// enum, so it is treated as an ordinary table.
pub fn reference_table_enum_name(table_name: &str) -> Option<&str> {
    table_name
        .strip_suffix(REFERENCE_TABLE_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// Builds a [`Data`] description using the queries of a [`MetadataLoader`].
///
/// All queries are issued one after another. The first failing query aborts the
/// assembly and its error is returned unchanged.
pub struct DataAssembler<'a, L: MetadataLoader> {
    loader: &'a L,
}

impl<'a, L: MetadataLoader> DataAssembler<'a, L> {
    pub fn new(loader: &'a L) -> Self {
        DataAssembler { loader }
    }

    #[instrument(skip_all)]
    pub async fn assemble(&self) -> Result<Data> {
        let schema = self.loader.schema().await?;
        debug!(schema = %schema, "Introspecting schema");

        let tables = self.get_tables(&schema).await?;
        let enums = self.get_enums(&schema).await?;
        let reference_table_enums = self.get_reference_table_enums(&schema).await?;

        debug!(
            tables = tables.len(),
            enums = enums.len(),
            reference_table_enums = reference_table_enums.len(),
            "Introspected schema"
        );

        Ok(Data {
            schema,
            tables,
            enums,
            reference_table_enums,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_tables(&self, schema: &str) -> Result<Vec<Table>> {
        let tables = self.loader.table_list(schema).await?;

        let mut result = Vec::with_capacity(tables.len());

        for table in tables {
            let columns = self.resolve_semantic_types(self.loader.column_list(schema, &table.table_name).await?)?;
            let constraints = self.loader.constraint_list(schema, &table.table_name).await?;
            let foreign_key_constraints = self.loader.foreign_key_constraint_list(&table.table_name).await?;

            result.push(Table {
                table,
                columns,
                constraints,
                foreign_key_constraints,
            });
        }

        Ok(result)
    }

    /// Resolves the semantic type of every column through the loader, so the loader decides
    /// how its native types are mapped. An unknown type aborts the assembly.
    fn resolve_semantic_types(&self, columns: Vec<ColumnMetadata>) -> Result<Vec<ColumnMetadata>> {
        columns
            .into_iter()
            .map(|column| {
                let semantic_type = self.loader.parse_type(&column.data_type)?;
                Ok(column.with_semantic_type(semantic_type))
            })
            .collect()
    }

    /// The enums declared with `create type ... as enum`.
    #[instrument(skip(self))]
    pub async fn get_enums(&self, schema: &str) -> Result<Vec<Enum>> {
        let enums = self.loader.enum_list(schema).await?;

        let mut result = Vec::with_capacity(enums.len());

        for enumeration in enums {
            let values = self.loader.enum_value_list(schema, &enumeration.enum_name).await?;
            result.push(Enum::native(&enumeration.enum_name, values));
        }

        Ok(result)
    }

    /// The enums derived from reference tables.
    #[instrument(skip(self))]
    pub async fn get_reference_table_enums(&self, schema: &str) -> Result<Vec<Enum>> {
        let tables = self.loader.table_list(schema).await?;

        let mut result = Vec::new();

        for table in &tables {
            let Some(name) = reference_table_enum_name(&table.table_name) else {
                continue;
            };

            let values = self.loader.reference_table_value_list(schema, &table.table_name).await?;
            result.push(Enum::from_reference_table(name, &table.table_name, values));
        }

        Ok(result)
    }
}

/// Assembles the [`Data`] description of the schema the loader points at.
pub async fn assemble_data<L: MetadataLoader>(loader: &L) -> Result<Data> {
    DataAssembler::new(loader).assemble().await
}
