use std::time::Duration;
use tokio::process::Command;
use tracing::{info, instrument, warn};
use crate::config::GeneratorConfig;
use crate::postgres_client_wrapper::PostgresClientWrapper;
use crate::{IntrospectError, Result};

const READY_ATTEMPTS: u32 = 60;
const READY_INTERVAL: Duration = Duration::from_millis(500);

/// A throwaway Postgres container, started from the `postgres` docker image.
pub struct DockerizedDatabase {
    container_id: String,
    stopped: bool,
}

impl DockerizedDatabase {
    /// Starts a container with the credentials and port from the config, and waits until it accepts connections.
    #[instrument(skip_all, fields(image_tag = %config.docker_image_tag))]
    pub async fn start(config: &GeneratorConfig) -> Result<(Self, PostgresClientWrapper)> {
        let output = Command::new("docker")
            .args(docker_run_args(config))
            .output()
            .await
            .map_err(|e| IntrospectError::DockerError(format!("Failed to run docker: {e}")))?;

        if !output.status.success() {
            return Err(IntrospectError::DockerError(String::from_utf8_lossy(&output.stderr).trim().to_string()));
        }

        let mut database = DockerizedDatabase {
            container_id: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stopped: false,
        };
        info!(container_id = %database.container_id, "Started postgres container");

        match wait_until_ready(config).await {
            Ok(connection) => Ok((database, connection)),
            Err(e) => {
                let stopped = database.stop().await;
                Err(readiness_error(e, stopped))
            }
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    #[instrument(skip_all)]
    pub async fn stop(&mut self) -> Result {
        if self.stopped {
            return Ok(());
        }

        let output = Command::new("docker")
            .args(["stop", self.container_id.as_str()])
            .output()
            .await?;
        self.stopped = true;

        if !output.status.success() {
            return Err(IntrospectError::DockerError(String::from_utf8_lossy(&output.stderr).trim().to_string()));
        }

        info!("Stopped postgres container");
        Ok(())
    }
}

impl Drop for DockerizedDatabase {
    fn drop(&mut self) {
        if self.stopped {
            return;
        }

        warn!(container_id = %self.container_id, "Postgres container was not stopped explicitly, stopping it now");
        if let Err(e) = std::process::Command::new("docker").args(["stop", self.container_id.as_str()]).output() {
            warn!("Failed to stop postgres container: {e}");
        }
    }
}

fn docker_run_args(config: &GeneratorConfig) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "-d".to_string(),
        "--rm".to_string(),
        "-e".to_string(),
        format!("POSTGRES_USER={}", config.username),
        "-e".to_string(),
        format!("POSTGRES_DB={}", config.database_name),
    ];

    args.push("-e".to_string());
    if config.password.is_empty() {
        args.push("POSTGRES_HOST_AUTH_METHOD=trust".to_string());
    } else {
        args.push(format!("POSTGRES_PASSWORD={}", config.password));
    }

    args.push("-p".to_string());
    args.push(format!("{}:5432", config.port));
    args.push(format!("postgres:{}", config.docker_image_tag));

    args
}

/// Returns the readiness failure. A failure to stop the container afterwards is only logged.
fn readiness_error(readiness: IntrospectError, stopped: Result) -> IntrospectError {
    if let Err(e) = stopped {
        warn!(error = %e, "Failed to stop postgres container after it did not become ready");
    }

    readiness
}

async fn wait_until_ready(config: &GeneratorConfig) -> Result<PostgresClientWrapper> {
    let connection_string = config.connection_string();
    let mut last_error = None;

    for _ in 0..READY_ATTEMPTS {
        match PostgresClientWrapper::new(&connection_string).await {
            Ok(connection) => return Ok(connection),
            Err(e) => {
                last_error = Some(e);
                tokio::time::sleep(READY_INTERVAL).await;
            }
        }
    }

    Err(IntrospectError::DockerError(match last_error {
        Some(e) => format!("Postgres container did not become ready: {e}"),
        None => "Postgres container did not become ready".to_string(),
    }))
}
