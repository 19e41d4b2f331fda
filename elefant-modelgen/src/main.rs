use crate::cli::Commands;
use clap::Parser;
use elefant_introspect::{
    assemble_data, run_migrations, write_artifacts, Data, DockerizedDatabase, GeneratorConfig,
    JsonRenderer, OutputPaths, PostgresClientWrapper, PostgresLoader, Renderer, Result,
};
use std::path::Path;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();

    run(cli).await?;

    Ok(())
}

#[instrument(skip_all)]
async fn run(cli: cli::Cli) -> Result<()> {
    match cli.command {
        Commands::GenerateDatabaseModel { config, use_docker } => {
            generate_database_model(&config, use_docker).await?;
        }
    }

    Ok(())
}

#[instrument(skip_all)]
async fn generate_database_model(config_path: &Path, use_docker: bool) -> Result<()> {
    let config = GeneratorConfig::from_file(config_path)?;

    let data = if use_docker {
        introspect_disposable_database(&config).await?
    } else {
        let connection = PostgresClientWrapper::new(&config.connection_string()).await?;
        assemble_data(&PostgresLoader::new(&connection)).await?
    };

    let renderer = JsonRenderer;
    let paths = OutputPaths::new(&config, renderer.extension());
    let written = write_artifacts(&renderer, &data, &paths).await?;

    info!(files = written.len(), schema = %data.schema, "Generated database model");

    Ok(())
}

/// Migrates a fresh container and introspects it. The container is stopped whether or not
/// introspection succeeds.
#[instrument(skip_all)]
async fn introspect_disposable_database(config: &GeneratorConfig) -> Result<Data> {
    let (mut database, connection) = DockerizedDatabase::start(config).await?;

    let result = migrate_and_assemble(&connection, &config.migration_path).await;

    drop(connection);
    if let Err(e) = database.stop().await {
        warn!(container = database.container_id(), error = %e, "Failed to stop database container");
    }

    result
}

async fn migrate_and_assemble(connection: &PostgresClientWrapper, migration_path: &Path) -> Result<Data> {
    if migration_path.as_os_str().is_empty() {
        warn!("No migrationPath configured, introspecting an empty database");
    } else {
        run_migrations(connection, migration_path).await?;
    }

    assemble_data(&PostgresLoader::new(connection)).await
}
