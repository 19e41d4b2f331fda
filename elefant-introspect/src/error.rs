use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntrospectError {
    #[error("Error from postgres: `{0}`")]
    PostgresError(#[from] tokio_postgres::Error),

    #[error("Error from postgres: `{query}` when executing query: `{source}`")]
    PostgresErrorWithQuery {
        query: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("Invalid number of results returned from query. Expected `{expected}`, got `{actual}`")]
    InvalidNumberOfResults {
        actual: usize,
        expected: usize,
    },

    #[error("Postgres version `{0}` is not supported. Postgres 12 or newer is required")]
    UnsupportedPostgresVersion(i32),

    #[error("Postgres did not respond with a version number")]
    InvalidPostgresVersionResponse,

    #[error("Could not determine which schema to introspect")]
    SchemaUndeterminable,

    #[error("unsupported type '{0}'")]
    UnsupportedType(String),

    #[error("Enum `{enum_name}` has a value `{value}` without a valid sort order")]
    InvalidEnumSortOrder {
        enum_name: String,
        value: String,
    },

    #[error("Invalid configuration in `{path}`: {message}")]
    ConfigError {
        path: String,
        message: String,
    },

    #[error("io error: `{0}`")]
    IoError(#[from] std::io::Error),

    #[error("json error: `{0}`")]
    JsonError(#[from] serde_json::Error),

    #[error("docker error: {0}")]
    DockerError(String),
}

pub type Result<T = ()> = std::result::Result<T, IntrospectError>;
