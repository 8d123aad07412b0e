use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("Tag name is invalid: {0}")]
    Validation(String),
    #[error("Tag already exists: {0}")]
    Conflict(String),
    #[error("Tag storage unavailable: {0}")]
    Infrastructure(String),
}

impl TagError {
    pub fn blank_name() -> Self {
        TagError::Validation("name can't be blank".to_string())
    }
}

impl From<sqlx::Error> for TagError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                TagError::Conflict(db.message().to_string())
            }
            _ => TagError::Infrastructure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::error::Error as StdError;

    #[derive(Error, Debug)]
    #[error("{message}")]
    struct FakeDatabaseError {
        message: String,
        unique: bool,
    }

    impl DatabaseError for FakeDatabaseError {
        fn message(&self) -> &str {
            &self.message
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    fn database_error(message: &str, unique: bool) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDatabaseError {
            message: message.to_string(),
            unique,
        }))
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let e = database_error("Duplicate entry 'epic' for key 'idx_tags_name'", true);
        assert_eq!(
            TagError::from(e),
            TagError::Conflict("Duplicate entry 'epic' for key 'idx_tags_name'".to_string())
        );
    }

    #[test]
    fn test_other_database_errors_map_to_infrastructure() {
        let e = database_error("Lock wait timeout exceeded", false);
        assert!(matches!(TagError::from(e), TagError::Infrastructure(_)));
        assert!(matches!(
            TagError::from(sqlx::Error::PoolTimedOut),
            TagError::Infrastructure(_)
        ));
    }
}
