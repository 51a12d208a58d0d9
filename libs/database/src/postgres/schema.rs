//! Introspection of the live schema, used to fail fast at startup when the
//! database disagrees with the service configuration.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::common::{DatabaseError, DatabaseResult};

/// Installed version of a PostgreSQL extension, or `None` when missing.
pub async fn extension_version(
    db: &DatabaseConnection,
    extension: &str,
) -> DatabaseResult<Option<String>> {
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        "SELECT extversion FROM pg_extension WHERE extname = $1",
        [extension.into()],
    );

    match db.query_one_raw(stmt).await? {
        Some(row) => Ok(Some(row.try_get::<String>("", "extversion")?)),
        None => Ok(None),
    }
}

/// Declared dimension of a pgvector column (`vector(N)` gives `N`).
///
/// pgvector stores the dimension directly as the column typmod. Returns
/// `None` when the column is declared without a dimension, and
/// [`DatabaseError::SchemaMismatch`] when the table or column is missing.
pub async fn vector_column_dimension(
    db: &DatabaseConnection,
    table: &str,
    column: &str,
) -> DatabaseResult<Option<usize>> {
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        r#"SELECT a.atttypmod
           FROM pg_attribute a
           WHERE a.attrelid = to_regclass($1)
             AND a.attname = $2
             AND NOT a.attisdropped"#,
        [table.into(), column.into()],
    );

    let row = db.query_one_raw(stmt).await?.ok_or_else(|| {
        DatabaseError::SchemaMismatch(format!("column {table}.{column} does not exist"))
    })?;
    let typmod: i32 = row.try_get("", "atttypmod")?;

    Ok(usize::try_from(typmod).ok().filter(|dim| *dim > 0))
}
