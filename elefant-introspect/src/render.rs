use std::path::PathBuf;
use serde::Serialize;
use tracing::{info, instrument};
use crate::config::GeneratorConfig;
use crate::models::*;
use crate::Result;

/// The different files generated from a [`Data`] description.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ArtifactKind {
    Enum,
    Model,
    Table,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::Enum, ArtifactKind::Model, ArtifactKind::Table];

    fn file_stem_suffix(&self) -> &'static str {
        match self {
            ArtifactKind::Enum => "enum",
            ArtifactKind::Model => "model",
            ArtifactKind::Table => "table",
        }
    }
}

/// Where each artifact is written.
///
/// Enums and models go into the model directory, tables into the table directory. Files are
/// named `<database>_<kind>.generated.<extension>`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OutputPaths {
    pub model_path: PathBuf,
    pub table_path: PathBuf,
    pub database_name: String,
    pub extension: String,
}

impl OutputPaths {
    pub fn new(config: &GeneratorConfig, extension: &str) -> Self {
        OutputPaths {
            model_path: config.model_path.clone(),
            table_path: config.table_path.clone(),
            database_name: config.database_name.clone(),
            extension: extension.to_string(),
        }
    }

    pub fn path_for(&self, kind: ArtifactKind) -> PathBuf {
        let directory = match kind {
            ArtifactKind::Enum | ArtifactKind::Model => &self.model_path,
            ArtifactKind::Table => &self.table_path,
        };

        directory.join(format!("{}_{}.generated.{}", self.database_name, kind.file_stem_suffix(), self.extension))
    }
}

/// Turns a [`Data`] description into the content of a generated file.
pub trait Renderer {
    /// The extension of the generated files, without the leading dot.
    fn extension(&self) -> &str;

    fn render(&self, kind: ArtifactKind, data: &Data) -> Result<String>;
}

/// Renders every artifact and writes them to their output paths.
///
/// Everything is rendered before anything is written, so a failure leaves no partial output behind.
#[instrument(skip_all)]
pub async fn write_artifacts<R: Renderer>(renderer: &R, data: &Data, paths: &OutputPaths) -> Result<Vec<PathBuf>> {
    let mut rendered = Vec::with_capacity(ArtifactKind::ALL.len());

    for kind in ArtifactKind::ALL {
        rendered.push((paths.path_for(kind), renderer.render(kind, data)?));
    }

    let mut written = Vec::with_capacity(rendered.len());

    for (path, content) in rendered {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&path, content).await?;
        info!(path = %path.display(), "Wrote generated file");
        written.push(path);
    }

    Ok(written)
}

/// Renders the description as JSON, to be consumed by an external template engine.
#[derive(Debug, Default, Copy, Clone)]
pub struct JsonRenderer;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnumArtifact<'a> {
    schema: &'a str,
    enums: &'a [Enum],
    reference_table_enums: &'a [Enum],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelArtifact<'a> {
    schema: &'a str,
    models: Vec<Model<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Model<'a> {
    table_name: &'a str,
    fields: Vec<ModelField<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelField<'a> {
    column_name: &'a str,
    semantic_type: SemanticType,
    is_nullable: bool,
    /// Set when the column is typed with one of the native enums.
    enum_name: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TableArtifact<'a> {
    schema: &'a str,
    tables: Vec<TableDefinition<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TableDefinition<'a> {
    table_name: &'a str,
    columns: Vec<&'a str>,
    constraints: &'a [ConstraintMetadata],
    foreign_key_constraints: &'a [ForeignKeyConstraintMetadata],
}

impl JsonRenderer {
    fn model_artifact<'a>(&self, data: &'a Data) -> Result<ModelArtifact<'a>> {
        let mut models = Vec::with_capacity(data.tables.len());

        for table in &data.tables {
            let mut fields = Vec::with_capacity(table.columns.len());

            for column in &table.columns {
                fields.push(ModelField {
                    column_name: &column.column_name,
                    semantic_type: column.semantic_type()?,
                    is_nullable: column.is_nullable,
                    enum_name: data.get_enum(&column.udt_name).map(|e| e.name.as_str()),
                });
            }

            models.push(Model {
                table_name: table.name(),
                fields,
            });
        }

        Ok(ModelArtifact {
            schema: &data.schema,
            models,
        })
    }
}

impl Renderer for JsonRenderer {
    fn extension(&self) -> &str {
        "json"
    }

    fn render(&self, kind: ArtifactKind, data: &Data) -> Result<String> {
        let json = match kind {
            ArtifactKind::Enum => serde_json::to_string_pretty(&EnumArtifact {
                schema: &data.schema,
                enums: &data.enums,
                reference_table_enums: &data.reference_table_enums,
            })?,
            ArtifactKind::Model => serde_json::to_string_pretty(&self.model_artifact(data)?)?,
            ArtifactKind::Table => serde_json::to_string_pretty(&TableArtifact {
                schema: &data.schema,
                tables: data.tables.iter().map(|t| TableDefinition {
                    table_name: t.name(),
                    columns: t.columns.iter().map(|c| c.column_name.as_str()).collect(),
                    constraints: &t.constraints,
                    foreign_key_constraints: &t.foreign_key_constraints,
                }).collect(),
            })?,
        };

        Ok(json)
    }
}

#[cfg(test)]
mod tests;
