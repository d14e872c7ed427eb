//! Persistence boundary shared by the repositories.

#[cfg(test)]
pub mod memory;

use thiserror::Error;

/// Failure talking to the persistent store.
///
/// Always an infrastructure problem: "row not found" is reported through
/// `Option`, never through this type.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    /// A write referenced a row that does not exist; carries the request field.
    #[error("Referenced {0} does not exist")]
    MissingReference(&'static str),
}

impl StoreError {
    /// Classify a failed write: foreign-key violations on a constraint listed
    /// in `references` (constraint name, field) become `MissingReference`.
    pub fn from_write(err: sqlx::Error, references: &[(&str, &'static str)]) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_foreign_key_violation() {
                let field = db.constraint().and_then(|constraint| {
                    references
                        .iter()
                        .find(|(name, _)| *name == constraint)
                        .map(|(_, field)| *field)
                });
                if let Some(field) = field {
                    return StoreError::MissingReference(field);
                }
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
