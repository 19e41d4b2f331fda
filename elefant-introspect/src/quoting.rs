/// Quotes an identifier for usage in Postgres.
///
/// The identifier is always quoted, so the exact name as stored in the catalog is
/// used, including upper case letters and names that collide with keywords.
pub(crate) fn quote_identifier(identifier: &str) -> String {
    let escaped = identifier.replace('"', r#""""#);

    format!("\"{escaped}\"")
}

/// Quotes a schema qualified name, e.g. `"public"."my_table"`.
pub(crate) fn quote_qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_identifier(schema), quote_identifier(name))
}
