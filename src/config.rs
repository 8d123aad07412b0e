use std::env;

/// Where tags live. Names are data, not inferred from type names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSchema {
    pub table: String,
    pub id_column: String,
    pub name_column: String,
    pub taggings_count_column: Option<String>,
}

impl Default for TagSchema {
    fn default() -> Self {
        Self {
            table: "tags".to_string(),
            id_column: "id".to_string(),
            name_column: "name".to_string(),
            taggings_count_column: None,
        }
    }
}

impl TagSchema {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            table: env::var("TAGS_TABLE").unwrap_or(defaults.table),
            id_column: env::var("TAGS_ID_COLUMN").unwrap_or(defaults.id_column),
            name_column: env::var("TAGS_NAME_COLUMN").unwrap_or(defaults.name_column),
            taggings_count_column: env::var("TAGS_TAGGINGS_COUNT_COLUMN")
                .ok()
                .filter(|c| !c.is_empty()),
        }
    }

    /// Every configured name, for validation.
    fn identifiers(&self) -> Vec<&str> {
        let mut names = vec![
            self.table.as_str(),
            self.id_column.as_str(),
            self.name_column.as_str(),
        ];
        if let Some(column) = &self.taggings_count_column {
            names.push(column.as_str());
        }
        names
    }

    /// Table and column names are spliced into SQL, so they are restricted
    /// to plain identifiers.
    pub fn validate(&self) -> Result<(), String> {
        for name in self.identifiers() {
            if !is_identifier(name) {
                return Err(format!("'{}' is not a valid SQL identifier", name));
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 64 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub port: u16,
    pub service_name: String,
    pub rust_log: String,
    pub use_memory_store: bool,
    pub max_batch_size: usize,
    pub schema: TagSchema,
}

impl Config {
    pub fn load() -> Self {
        let config = Self {
            db_host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            db_port: env::var("DB_PORT")
                .unwrap_or_else(|_| "3306".to_string())
                .parse()
                .unwrap_or(3306),
            db_user: env::var("DB_USER").unwrap_or_else(|_| "server".to_string()),
            db_password: env::var("DB_PASSWORD").unwrap_or_else(|_| "secret_app".to_string()),
            db_name: env::var("DB_NAME").unwrap_or_else(|_| "tags".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "tag-resolver".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            use_memory_store: env::var("USE_MEMORY_STORE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            max_batch_size: env::var("MAX_BATCH_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
            schema: TagSchema::from_env(),
        };

        // Validate configuration
        if !config.use_memory_store {
            if config.db_host.is_empty() {
                panic!("DB_HOST environment variable is required");
            }
            if config.db_user.is_empty() {
                panic!("DB_USER environment variable is required");
            }
            if config.db_name.is_empty() {
                panic!("DB_NAME environment variable is required");
            }
        }
        if config.port == 0 {
            panic!("PORT environment variable must be a valid port number");
        }
        if config.max_batch_size == 0 {
            panic!("MAX_BATCH_SIZE must be at least 1");
        }
        if let Err(e) = config.schema.validate() {
            panic!("Invalid tag schema configuration: {}", e);
        }

        config
    }

    pub fn database_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}?charset=utf8mb4",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }
}
