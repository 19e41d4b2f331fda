use std::path::{Path, PathBuf};
use serde::Deserialize;
use crate::{IntrospectError, Result};

/// Everything needed to connect to the database and to know where the generated files go.
///
/// Read once from a JSON file with camelCase keys and passed around by reference.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub database_name: String,
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    /// Directory containing `*.up.sql` migrations, applied when using a disposable database.
    #[serde(default)]
    pub migration_path: PathBuf,
    pub model_path: PathBuf,
    pub table_path: PathBuf,
    /// The tag of the `postgres` image to start when using a disposable database.
    #[serde(default = "default_docker_image_tag")]
    pub docker_image_tag: String,
}

fn default_port() -> u16 {
    5432
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_docker_image_tag() -> String {
    "16".to_string()
}

impl GeneratorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| IntrospectError::ConfigError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_json(&content).map_err(|e| match e {
            IntrospectError::ConfigError { message, .. } => IntrospectError::ConfigError {
                path: path.display().to_string(),
                message,
            },
            e => e,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json).map_err(|e| IntrospectError::ConfigError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result {
        let required = [
            ("host", &self.host),
            ("username", &self.username),
            ("databaseName", &self.database_name),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(IntrospectError::ConfigError {
                    path: "<inline>".to_string(),
                    message: format!("`{name}` must not be empty"),
                });
            }
        }

        // Connections are always made with `NoTls`.
        match self.ssl_mode.as_str() {
            "disable" => Ok(()),
            other => Err(IntrospectError::ConfigError {
                path: "<inline>".to_string(),
                message: format!("`sslMode` must be `disable` as TLS connections are not supported, got `{other}`"),
            }),
        }
    }

    pub fn connection_string(&self) -> String {
        let mut connection_string = format!("host={} port={} user={} dbname={} sslmode={}", self.host, self.port, self.username, self.database_name, self.ssl_mode);

        if !self.password.is_empty() {
            connection_string.push_str(&format!(" password={}", self.password));
        }

        connection_string
    }
}
