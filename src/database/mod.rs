pub mod memory;
pub mod mysql;
pub mod schema;

pub use memory::MemoryTagStore;
pub use mysql::MySqlTagStore;

use crate::error::TagError;
use crate::models::Tag;
use crate::utils::pattern::{contains_pattern, exact_pattern};
use anyhow::{Context, Result};
use async_trait::async_trait;
use log;
use sqlx::{pool::PoolOptions, MySql, Pool};
use std::time::Duration;

const MAX_RETRIES: u32 = 10;
const INITIAL_RETRY_DELAY_SECS: u64 = 2;
const MAX_RETRY_DELAY_SECS: u64 = 30;

/// Which tags a lookup selects. Names are expected to be normalized already;
/// they are turned into escaped `LIKE` patterns by [`NamePredicate::patterns`]
/// and never reach a store as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePredicate {
    /// Case-insensitive equality with the name.
    Named(String),
    /// Case-insensitive equality with any of the names.
    NamedAny(Vec<String>),
    /// Case-insensitive substring match.
    NamedLike(String),
    /// Case-insensitive substring match against any of the names.
    NamedLikeAny(Vec<String>),
}

impl NamePredicate {
    /// The patterns this predicate ORs together.
    pub fn patterns(&self) -> Vec<String> {
        match self {
            NamePredicate::Named(name) => vec![exact_pattern(name)],
            NamePredicate::NamedAny(names) => names.iter().map(|n| exact_pattern(n)).collect(),
            NamePredicate::NamedLike(name) => vec![contains_pattern(name)],
            NamePredicate::NamedLikeAny(names) => {
                names.iter().map(|n| contains_pattern(n)).collect()
            }
        }
    }
}

/// Persistence for tags. Implementations enforce that names are present and
/// unique; callers rely on that as the last line of defence against racing
/// creates.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Tags matching the predicate, in storage order. A predicate with no
    /// patterns matches nothing.
    async fn query(&self, predicate: &NamePredicate) -> Result<Vec<Tag>, TagError>;

    /// Persist a new tag. Fails with [`TagError::Conflict`] when the name is
    /// taken and [`TagError::Validation`] when it is blank.
    async fn create(&self, name: &str) -> Result<Tag, TagError>;

    async fn count(&self) -> Result<u64, TagError>;
}

pub async fn create_pool(config: &crate::config::Config) -> Result<Pool<MySql>> {
    log::info!("Building database connection string...");
    let database_url = config.database_url();
    log::info!(
        "Database URL constructed (password hidden): mysql://{}:***@{}:{}/{}",
        config.db_user,
        config.db_host,
        config.db_port,
        config.db_name
    );

    let mut last_error = None;

    for attempt in 1..=MAX_RETRIES {
        log::info!("Connection attempt {} of {}", attempt, MAX_RETRIES);

        let pool_options = PoolOptions::<MySql>::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800));

        match pool_options.connect(&database_url).await {
            Ok(pool) => match sqlx::query("SELECT 1").fetch_one(&pool).await {
                Ok(_) => {
                    log::info!(
                        "Database connected successfully to {}:{}/{} on attempt {}",
                        config.db_host,
                        config.db_port,
                        config.db_name,
                        attempt
                    );
                    return Ok(pool);
                }
                Err(e) => {
                    log::warn!("Connection pool created but test query failed: {}. Retrying...", e);
                    last_error = Some(anyhow::anyhow!("{}", e));
                }
            },
            Err(e) => {
                log::warn!("Connection attempt {} failed: {}", attempt, e);
                last_error = Some(anyhow::anyhow!("{}", e));
            }
        }

        if attempt < MAX_RETRIES {
            // 2s, 4s, 8s, 16s, then capped at 30s
            let delay_secs = std::cmp::min(
                INITIAL_RETRY_DELAY_SECS * (1u64 << (attempt - 1)),
                MAX_RETRY_DELAY_SECS,
            );
            log::info!("Waiting {} seconds before next attempt...", delay_secs);
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Failed to connect after {} attempts", MAX_RETRIES)))
        .context("Failed to establish database connection after all retries")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_patterns_are_escaped() {
        assert_eq!(
            NamePredicate::Named("coo%".to_string()).patterns(),
            vec!["coo\\%".to_string()]
        );
        assert_eq!(
            NamePredicate::NamedLikeAny(vec!["a_b".to_string(), "cool".to_string()]).patterns(),
            vec!["%a\\_b%".to_string(), "%cool%".to_string()]
        );
        assert!(NamePredicate::NamedAny(Vec::new()).patterns().is_empty());
    }
}
