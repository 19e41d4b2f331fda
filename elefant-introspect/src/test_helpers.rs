use std::collections::HashMap;
use std::panic::{RefUnwindSafe, UnwindSafe};
use std::sync::Mutex;
use itertools::Itertools;
use ordered_float::NotNan;
use uuid::Uuid;
use crate::metadata_loader::MetadataLoader;
use crate::models::*;
use crate::postgres_client_wrapper::PostgresClientWrapper;
use crate::{IntrospectError, Result};

/// A helper for running tests that require a database.
///
/// This will automatically create a new database for each test,
/// and drop it when the test is done, if the test succeeded.
///
/// All the methods on this struct unwraps errors directly to make it easier to write tests.
pub struct TestHelper {
    /// The name of the test database
    pub test_db_name: String,
    /// The main connected used against the database
    main_connection: PostgresClientWrapper,
    /// An identifier for the test helper
    helper_name: String,
    /// The port of the Postgres instance that was connected to.
    pub port: u16,
    /// If the database was cleaned up nicely
    cleaned_up_nicely: bool,
}

impl Drop for TestHelper {
    /// Drops the test helper, cleaning up the database if the test succeeded.
    fn drop(&mut self) {
        if self.cleaned_up_nicely {
            return;
        }

        if std::thread::panicking() {
            eprintln!("Thread is panicking when dropping test helper. Leaving database '{}' ({}) around to be inspected", self.test_db_name, self.helper_name);
        } else {
            let db_name = self.test_db_name.clone();
            let port = self.port;
            std::thread::spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .unwrap();
                runtime.block_on(cleanup(&db_name, port));
            })
                .join()
                .expect("Failed to run test helper cleanup from drop");
        }
    }
}

impl RefUnwindSafe for TestHelper {}

impl UnwindSafe for TestHelper {}

/// Creates a new test helper, using a random database name and a specific port.
pub async fn get_test_helper_on_port(name: &str, port: u16) -> TestHelper {
    let id = Uuid::new_v4().simple().to_string();

    let test_db_name = format!("test_db_{}", id);
    {
        let conn = get_test_connection_on_port("postgres", port).await;

        conn.execute_non_query(&format!("create database {}", test_db_name)).await.expect("Failed to create test database");
    }

    let conn = get_test_connection_on_port(&test_db_name, port).await;

    TestHelper {
        test_db_name,
        main_connection: conn,
        helper_name: name.to_string(),
        port,
        cleaned_up_nicely: false,
    }
}

impl TestHelper {
    /// Executes a query that does not return any results.
    pub async fn execute_not_query(&self, sql: &str) {
        self.get_conn().execute_non_query(sql).await.unwrap_or_else(|e| panic!("Failed to execute non query: {:?}\n{}", e, sql));
    }

    /// Gets the underlying connection to the database.
    pub fn get_conn(&self) -> &PostgresClientWrapper {
        &self.main_connection
    }

    /// Stops the test helper, cleaning up the database.
    pub async fn stop(mut self) {
        cleanup(&self.test_db_name, self.port).await;
        self.cleaned_up_nicely = true;
    }
}

/// Gets a connection to the specified database on the specified port.
async fn get_test_connection_on_port(database_name: &str, port: u16) -> PostgresClientWrapper {
    let connection_string = format!("host=localhost port={port} user=postgres password=passw0rd dbname={database_name}");

    PostgresClientWrapper::new(&connection_string).await.expect("Connection to test database failed. Is postgres running?")
}

async fn cleanup(db_name: &str, port: u16) {
    let conn = get_test_connection_on_port("postgres", port).await;
    if conn.version() >= 130 {
        conn.execute_non_query(&format!("drop database {} with (force);", db_name)).await.expect("Failed to drop test database");
    } else {
        conn.execute_non_query(&format!("SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}' AND pid != pg_backend_pid()", db_name)).await.expect("Failed to drop test database");
        conn.execute_non_query(&format!("drop database {};", db_name)).await.expect("Failed to drop test database");
    }
}

/// Builds enum values with sort orders 1, 2, 3, ... in the order given.
pub fn enum_values(labels: &[&str]) -> Vec<EnumValueMetadata> {
    labels
        .iter()
        .enumerate()
        .map(|(idx, label)| EnumValueMetadata::new(label, NotNan::new((idx + 1) as f32).unwrap()))
        .collect()
}

/// The operations of a [`MetadataLoader`], used to make [`InMemoryLoader`] fail on purpose.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LoaderOperation {
    Schema,
    TableList,
    ColumnList,
    ConstraintList,
    ForeignKeyConstraintList,
    EnumList,
    EnumValueList,
    ReferenceTableValueList,
}

/// A [`MetadataLoader`] answering from memory, behaving like the Postgres loader would.
#[derive(Default)]
pub struct InMemoryLoader {
    pub schema: Option<String>,
    /// Tables in creation order. `table_list` returns them sorted by name.
    pub tables: Vec<String>,
    pub columns: HashMap<String, Vec<ColumnMetadata>>,
    pub constraints: HashMap<String, Vec<ConstraintMetadata>>,
    pub foreign_keys: HashMap<String, Vec<ForeignKeyConstraintMetadata>>,
    /// Native enums with their values in declared order.
    pub enums: Vec<(String, Vec<EnumValueMetadata>)>,
    /// The raw `value` column of each reference table, including duplicates.
    pub reference_table_rows: HashMap<String, Vec<String>>,
    /// Native types mapped by this loader itself instead of the Postgres mapping.
    pub type_overrides: HashMap<String, SemanticType>,
    pub fail_on: Option<LoaderOperation>,
    pub calls: Mutex<Vec<LoaderOperation>>,
}

impl InMemoryLoader {
    pub fn new(schema: &str) -> Self {
        InMemoryLoader {
            schema: Some(schema.to_string()),
            ..Default::default()
        }
    }

    pub fn with_table(mut self, name: &str, columns: Vec<ColumnMetadata>) -> Self {
        self.tables.push(name.to_string());
        self.columns.insert(name.to_string(), columns);
        self
    }

    pub fn with_reference_table(mut self, name: &str, rows: &[&str]) -> Self {
        self.tables.push(name.to_string());
        self.columns.insert(name.to_string(), vec![ColumnMetadata::new("value", "text", false, "text")]);
        self.reference_table_rows.insert(name.to_string(), rows.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn with_enum(mut self, name: &str, labels: &[&str]) -> Self {
        self.enums.push((name.to_string(), enum_values(labels)));
        self
    }

    pub fn with_type_override(mut self, native_type: &str, semantic_type: SemanticType) -> Self {
        self.type_overrides.insert(native_type.to_string(), semantic_type);
        self
    }

    pub fn failing_on(mut self, operation: LoaderOperation) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<LoaderOperation> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: LoaderOperation) -> Result {
        self.calls.lock().unwrap().push(operation);

        if self.fail_on == Some(operation) {
            return Err(IntrospectError::InvalidNumberOfResults {
                actual: 0,
                expected: 1,
            });
        }

        Ok(())
    }
}

impl MetadataLoader for InMemoryLoader {
    async fn schema(&self) -> Result<String> {
        self.record(LoaderOperation::Schema)?;
        self.schema.clone().ok_or(IntrospectError::SchemaUndeterminable)
    }

    async fn table_list(&self, _schema: &str) -> Result<Vec<TableMetadata>> {
        self.record(LoaderOperation::TableList)?;
        Ok(self.tables.iter().sorted().map(|t| TableMetadata::new(t)).collect())
    }

    async fn column_list(&self, _schema: &str, table_name: &str) -> Result<Vec<ColumnMetadata>> {
        self.record(LoaderOperation::ColumnList)?;
        Ok(self.columns.get(table_name).cloned().unwrap_or_default())
    }

    async fn constraint_list(&self, _schema: &str, table_name: &str) -> Result<Vec<ConstraintMetadata>> {
        self.record(LoaderOperation::ConstraintList)?;
        Ok(self.constraints.get(table_name).cloned().unwrap_or_default())
    }

    async fn foreign_key_constraint_list(&self, table_name: &str) -> Result<Vec<ForeignKeyConstraintMetadata>> {
        self.record(LoaderOperation::ForeignKeyConstraintList)?;
        Ok(self.foreign_keys.get(table_name).cloned().unwrap_or_default())
    }

    async fn enum_list(&self, _schema: &str) -> Result<Vec<EnumMetadata>> {
        self.record(LoaderOperation::EnumList)?;
        Ok(self.enums.iter().map(|(name, _)| EnumMetadata { enum_name: name.clone() }).sorted_by(|a, b| a.enum_name.cmp(&b.enum_name)).collect())
    }

    async fn enum_value_list(&self, _schema: &str, enum_name: &str) -> Result<Vec<EnumValueMetadata>> {
        self.record(LoaderOperation::EnumValueList)?;
        Ok(self.enums.iter()
            .find(|(name, _)| name == enum_name)
            .map(|(_, values)| values.iter().cloned().sorted_by_key(|v| v.sort_order).collect())
            .unwrap_or_default())
    }

    async fn reference_table_value_list(&self, _schema: &str, table_name: &str) -> Result<Vec<EnumValueMetadata>> {
        self.record(LoaderOperation::ReferenceTableValueList)?;
        let rows = self.reference_table_rows.get(table_name).cloned().unwrap_or_default();
        let distinct: Vec<&str> = rows.iter().map(|r| r.as_str()).sorted().dedup().collect();
        Ok(enum_values(&distinct))
    }

    fn parse_type(&self, native_type: &str) -> Result<SemanticType> {
        match self.type_overrides.get(native_type) {
            Some(semantic_type) => Ok(*semantic_type),
            None => SemanticType::from_native(native_type),
        }
    }
}
