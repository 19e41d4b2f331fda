use super::*;
use crate::test_helpers::{enum_values, InMemoryLoader};
use crate::assemble_data;
use crate::IntrospectError;
use indoc::indoc;
use uuid::Uuid;

fn shop_data() -> Data {
    Data {
        schema: "public".to_string(),
        tables: vec![Table {
            table: TableMetadata::new("customers"),
            columns: vec![
                ColumnMetadata::new("id", "bigint", false, "int8"),
                ColumnMetadata::new("role", "USER-DEFINED", true, "user_role"),
            ],
            constraints: vec![ConstraintMetadata {
                schema: "public".to_string(),
                table: "customers".to_string(),
                index_name: "customers_pkey".to_string(),
                index_predicate: None,
                is_unique: true,
                is_primary: true,
                index_keys: vec!["id".to_string()],
            }],
            foreign_key_constraints: vec![],
        }],
        enums: vec![Enum::native("user_role", enum_values(&["admin", "member"]))],
        reference_table_enums: vec![Enum::from_reference_table("order_status", "order_status_reference_table", enum_values(&["CLOSED", "OPEN"]))],
    }
}

fn paths(root: &std::path::Path) -> OutputPaths {
    OutputPaths {
        model_path: root.join("model"),
        table_path: root.join("table"),
        database_name: "shop".to_string(),
        extension: "json".to_string(),
    }
}

#[test]
fn names_files_by_database_and_kind() {
    let paths = OutputPaths {
        model_path: PathBuf::from("gen/model"),
        table_path: PathBuf::from("gen/table"),
        database_name: "shop".to_string(),
        extension: "go".to_string(),
    };

    assert_eq!(paths.path_for(ArtifactKind::Enum), PathBuf::from("gen/model/shop_enum.generated.go"));
    assert_eq!(paths.path_for(ArtifactKind::Model), PathBuf::from("gen/model/shop_model.generated.go"));
    assert_eq!(paths.path_for(ArtifactKind::Table), PathBuf::from("gen/table/shop_table.generated.go"));
}

#[test]
fn takes_paths_from_config() {
    let config = GeneratorConfig::from_json(indoc! {r#"
        {
            "host": "localhost",
            "username": "postgres",
            "databaseName": "shop",
            "modelPath": "out/model",
            "tablePath": "out/table"
        }
    "#}).unwrap();

    let paths = OutputPaths::new(&config, JsonRenderer.extension());

    assert_eq!(paths.path_for(ArtifactKind::Model), PathBuf::from("out/model/shop_model.generated.json"));
}

#[test]
fn renders_enums() {
    let rendered = JsonRenderer.render(ArtifactKind::Enum, &shop_data()).unwrap();

    similar_asserts::assert_eq!(rendered, indoc! {r#"
        {
          "schema": "public",
          "enums": [
            {
              "name": "user_role",
              "values": [
                {
                  "enumValue": "admin",
                  "sortOrder": 1.0
                },
                {
                  "enumValue": "member",
                  "sortOrder": 2.0
                }
              ],
              "isReferenceTable": false,
              "referenceTableName": null
            }
          ],
          "referenceTableEnums": [
            {
              "name": "order_status",
              "values": [
                {
                  "enumValue": "CLOSED",
                  "sortOrder": 1.0
                },
                {
                  "enumValue": "OPEN",
                  "sortOrder": 2.0
                }
              ],
              "isReferenceTable": true,
              "referenceTableName": "order_status_reference_table"
            }
          ]
        }"#});
}

#[test]
fn renders_models_with_semantic_types() {
    let rendered = JsonRenderer.render(ArtifactKind::Model, &shop_data()).unwrap();

    similar_asserts::assert_eq!(rendered, indoc! {r#"
        {
          "schema": "public",
          "models": [
            {
              "tableName": "customers",
              "fields": [
                {
                  "columnName": "id",
                  "semanticType": "Int64",
                  "isNullable": false,
                  "enumName": null
                },
                {
                  "columnName": "role",
                  "semanticType": "String",
                  "isNullable": true,
                  "enumName": "user_role"
                }
              ]
            }
          ]
        }"#});
}

#[test]
fn renders_tables() {
    let rendered = JsonRenderer.render(ArtifactKind::Table, &shop_data()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["tables"][0]["tableName"], "customers");
    assert_eq!(value["tables"][0]["columns"], serde_json::json!(["id", "role"]));
    assert_eq!(value["tables"][0]["constraints"][0]["indexName"], "customers_pkey");
    assert_eq!(value["tables"][0]["constraints"][0]["isPrimary"], true);
    assert_eq!(value["tables"][0]["foreignKeyConstraints"], serde_json::json!([]));
}

#[test]
fn uses_camel_case_keys_throughout() {
    for kind in ArtifactKind::ALL {
        let rendered = JsonRenderer.render(kind, &shop_data()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        let mut keys = Vec::new();
        collect_keys(&value, &mut keys);

        let snake_case: Vec<_> = keys.iter().filter(|k| k.contains('_')).collect();
        assert!(snake_case.is_empty(), "{kind:?} has snake_case keys {snake_case:?}");
    }
}

fn collect_keys(value: &serde_json::Value, keys: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                keys.push(key.clone());
                collect_keys(nested, keys);
            }
        }
        serde_json::Value::Array(items) => items.iter().for_each(|item| collect_keys(item, keys)),
        _ => {}
    }
}

#[tokio::test]
async fn renders_semantic_types_resolved_by_the_loader() {
    let loader = InMemoryLoader::new("app")
        .with_type_override("int", SemanticType::Int)
        .with_table("events", vec![ColumnMetadata::new("id", "int", false, "int")]);
    let data = assemble_data(&loader).await.unwrap();

    let rendered = JsonRenderer.render(ArtifactKind::Model, &data).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["models"][0]["fields"][0]["semanticType"], "Int");
}

#[test]
fn unsupported_column_types_fail_model_rendering() {
    let mut data = shop_data();
    data.tables[0].columns.push(ColumnMetadata::new("email", "citext", false, "citext"));

    match JsonRenderer.render(ArtifactKind::Model, &data) {
        Err(IntrospectError::UnsupportedType(t)) => assert_eq!(t, "citext"),
        other => panic!("Expected UnsupportedType, got {:?}", other),
    }
}

#[tokio::test]
async fn writes_every_artifact() {
    let root = std::env::temp_dir().join(format!("elefant_render_{}", Uuid::new_v4().simple()));
    let paths = paths(&root);

    let written = write_artifacts(&JsonRenderer, &shop_data(), &paths).await.unwrap();

    assert_eq!(written, vec![
        root.join("model/shop_enum.generated.json"),
        root.join("model/shop_model.generated.json"),
        root.join("table/shop_table.generated.json"),
    ]);

    for path in &written {
        let content = tokio::fs::read_to_string(path).await.unwrap();
        assert!(content.starts_with('{'), "{}", path.display());
    }

    tokio::fs::remove_dir_all(&root).await.unwrap();
}

#[tokio::test]
async fn writes_nothing_when_rendering_fails() {
    let root = std::env::temp_dir().join(format!("elefant_render_{}", Uuid::new_v4().simple()));
    let mut data = shop_data();
    data.tables[0].columns.push(ColumnMetadata::new("location", "point", true, "point"));

    let result = write_artifacts(&JsonRenderer, &data, &paths(&root)).await;

    assert!(matches!(result, Err(IntrospectError::UnsupportedType(_))), "{result:?}");
    assert!(!root.exists());
}
