use crate::config::TagSchema;
use anyhow::Result;
use sqlx::{MySql, Pool};
use tracing::info;

pub fn create_tags_table_sql(schema: &TagSchema) -> String {
    let counter = schema
        .taggings_count_column
        .as_ref()
        .map(|column| format!("{} INT UNSIGNED NOT NULL DEFAULT 0,", column))
        .unwrap_or_default();

    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            {id} BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            {name} VARCHAR(255) NOT NULL,
            {counter}
            UNIQUE INDEX idx_{table}_{name} ({name})
        ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
        "#,
        table = schema.table,
        id = schema.id_column,
        name = schema.name_column,
        counter = counter,
    )
}

pub async fn initialize_schema(pool: &Pool<MySql>, schema: &TagSchema) -> Result<()> {
    info!("Initializing database schema for table {}...", schema.table);

    let sql = create_tags_table_sql(schema);
    sqlx::query(&sql).execute(pool).await?;

    info!("Database schema initialized successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_sql_uses_configured_names() {
        let schema = TagSchema {
            table: "labels".to_string(),
            id_column: "label_id".to_string(),
            name_column: "label".to_string(),
            taggings_count_column: Some("uses".to_string()),
        };
        let sql = create_tags_table_sql(&schema);
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS labels"));
        assert!(sql.contains("label_id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY"));
        assert!(sql.contains("uses INT UNSIGNED NOT NULL DEFAULT 0,"));
        assert!(sql.contains("UNIQUE INDEX idx_labels_label (label)"));
    }

    #[test]
    fn test_create_table_sql_without_counter() {
        let sql = create_tags_table_sql(&TagSchema::default());
        assert!(!sql.contains("DEFAULT 0"));
        assert!(sql.contains("name VARCHAR(255) NOT NULL,"));
    }
}
