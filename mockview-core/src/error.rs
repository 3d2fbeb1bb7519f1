use thiserror::Error;

#[derive(Error, Debug)]
pub enum MockviewError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl MockviewError {
    /// Classify a failed answer insert. A foreign-key violation means the
    /// referenced interview does not exist.
    pub fn from_write(err: sqlx::Error, mock_id: &str) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_foreign_key_violation() {
                return Self::unknown_interview(mock_id);
            }
        }
        Self::Database(err)
    }

    pub fn unknown_interview(mock_id: &str) -> Self {
        Self::Constraint(format!("mock_id_ref {} references no interview", mock_id))
    }
}

pub type Result<T> = std::result::Result<T, MockviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_interview_is_a_constraint_violation() {
        let err = MockviewError::unknown_interview("abc");
        assert!(matches!(err, MockviewError::Constraint(_)));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn non_database_write_error_stays_database() {
        let err = MockviewError::from_write(sqlx::Error::RowNotFound, "abc");
        assert!(matches!(err, MockviewError::Database(_)));
    }
}
