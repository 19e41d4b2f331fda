use std::path::{Path, PathBuf};
use itertools::Itertools;
use tracing::{info, instrument};
use crate::postgres_client_wrapper::PostgresClientWrapper;
use crate::Result;

/// Finds the migrations to apply in a directory, ordered by file name.
///
/// Both `0001_init.up.sql` style migrations and plain `.sql` files are picked up,
/// but `.down.sql` files are never applied.
pub async fn migration_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(directory).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }

        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if file_name.ends_with(".sql") && !file_name.ends_with(".down.sql") {
            files.push(path);
        }
    }

    Ok(files.into_iter().sorted_by(|a, b| a.file_name().cmp(&b.file_name())).collect())
}

/// The version of a migration is the number its file name starts with.
pub fn migration_version(path: &Path) -> Option<i64> {
    let file_name = path.file_name()?.to_str()?;
    let digits: String = file_name.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Applies every migration in the directory and records the last version in `schema_migrations`.
///
/// Returns how many migrations were applied.
#[instrument(skip(connection))]
pub async fn run_migrations(connection: &PostgresClientWrapper, directory: &Path) -> Result<usize> {
    let files = migration_files(directory).await?;

    for file in &files {
        info!(migration = %file.display(), "Applying migration");
        let sql = tokio::fs::read_to_string(file).await?;
        connection.execute_non_query(&sql).await?;
    }

    if let Some(version) = files.last().and_then(|f| migration_version(f)) {
        //language=postgresql
        connection.execute_non_query(&format!(r#"
create table if not exists schema_migrations (version bigint not null primary key, dirty boolean not null);
delete from schema_migrations;
insert into schema_migrations (version, dirty) values ({version}, false);
"#)).await?;
    }

    info!(count = files.len(), "Applied migrations");

    Ok(files.len())
}
