use tokio::task::JoinHandle;
use tokio_postgres::types::{FromSqlOwned, ToSql};
use tokio_postgres::{Client, NoTls, Row};
use crate::{IntrospectError, Result};

/// A connection to a Postgres database, with the connection driver running in the background.
pub struct PostgresClientWrapper {
    client: Client,
    join_handle: JoinHandle<Result<()>>,
    version: i32,
}

impl PostgresClientWrapper {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let (client, connection) =
            tokio_postgres::connect(connection_string, NoTls).await?;

        // The connection object performs the actual communication with the database,
        // so spawn it off to run on its own.
        let join_handle = tokio::spawn(async move {
            match connection.await {
                Err(e) => Err(IntrospectError::PostgresError(e)),
                Ok(_) => Ok(())
            }
        });

        let version = match client.simple_query("SHOW server_version_num;").await?.first() {
            Some(tokio_postgres::SimpleQueryMessage::Row(row)) => {
                let version: i32 = row.get(0)
                    .and_then(|v| v.parse().ok())
                    .ok_or(IntrospectError::InvalidPostgresVersionResponse)?;
                if version < 120000 {
                    return Err(IntrospectError::UnsupportedPostgresVersion(version));
                }
                version / 1000
            }
            _ => return Err(IntrospectError::InvalidPostgresVersionResponse)
        };

        Ok(PostgresClientWrapper {
            client,
            join_handle,
            version
        })
    }

    pub async fn execute_non_query(&self, sql: &str) -> Result {
        self.client.batch_execute(sql).await.map_err(|e| IntrospectError::PostgresErrorWithQuery {
            source: e,
            query: sql.to_string(),
        })?;

        Ok(())
    }

    pub async fn get_results<T: FromRow>(&self, sql: &str) -> Result<Vec<T>> {
        self.get_results_with_params(sql, &[]).await
    }

    pub async fn get_results_with_params<T: FromRow>(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<T>> {
        let query_results = self.client.query(sql, params).await.map_err(|e| IntrospectError::PostgresErrorWithQuery {
            source: e,
            query: sql.to_string(),
        })?;

        let mut output = Vec::with_capacity(query_results.len());

        for row in query_results.into_iter() {
            output.push(T::from_row(row)?);
        }

        Ok(output)
    }

    pub async fn get_result<T: FromRow>(&self, sql: &str) -> Result<T> {
        let results = self.get_results(sql).await?;
        let actual = results.len();

        match results.into_iter().next() {
            Some(r) if actual == 1 => Ok(r),
            _ => Err(IntrospectError::InvalidNumberOfResults {
                actual,
                expected: 1,
            }),
        }
    }

    pub async fn get_single_result<T: FromSqlOwned>(&self, sql: &str) -> Result<T> {
        let result = self.get_result::<(T,)>(sql).await?;
        Ok(result.0)
    }

    /// The major version of the server, multiplied by 10. Postgres 16 is reported as `160`.
    pub fn version(&self) -> i32 {
        self.version
    }
}

impl Drop for PostgresClientWrapper {
    fn drop(&mut self) {
        self.join_handle.abort();
    }
}

pub trait FromRow: Sized {
    fn from_row(row: Row) -> Result<Self>;
}

impl<T1: FromSqlOwned> FromRow for (T1,) {
    fn from_row(row: Row) -> Result<Self> {
        Ok((
            row.try_get(0)?,
        ))
    }
}
