use sqlx::Error as SqlxError;
use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
const NUMERIC_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        if let SqlxError::RowNotFound = err {
            return RepositoryError::NotFound;
        }

        if let Some(db_err) = err.as_database_error() {
            let detail = db_err
                .constraint()
                .map(str::to_string)
                .unwrap_or_else(|| db_err.message().to_string());

            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return RepositoryError::AlreadyExists(detail),
                Some(FOREIGN_KEY_VIOLATION) => return RepositoryError::ForeignKey(detail),
                Some(CHECK_VIOLATION) | Some(NUMERIC_OUT_OF_RANGE) => {
                    return RepositoryError::OutOfRange(detail);
                }
                _ => {}
            }
        }

        RepositoryError::Sqlx(err)
    }
}
