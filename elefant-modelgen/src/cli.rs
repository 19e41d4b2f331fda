use std::path::PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
/// Generates model, table and enum definitions from the schema of a Postgres database.
///
/// Reference tables, tables named `<name>_reference_table` with a `value` column, are turned
/// into enums alongside the native Postgres enums.
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Introspect the configured database and write the generated files
    GenerateDatabaseModel {
        /// The JSON configuration file describing the connection and output directories
        #[arg(long, env = "ELEFANT_MODELGEN_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Start a disposable Postgres container, apply the migrations to it and introspect that
        /// instead of connecting to the configured database
        #[arg(long)]
        use_docker: bool,
    },
}

pub const DEFAULT_CONFIG_FILE: &str = "elefant-modelgen.json";

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert()
}

#[test]
fn parses_generate_database_model() {
    let cli = Cli::parse_from(["elefant-modelgen", "generate-database-model", "--use-docker"]);

    match cli.command {
        Commands::GenerateDatabaseModel { config, use_docker } => {
            assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_FILE));
            assert!(use_docker);
        }
    }
}
