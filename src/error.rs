use thiserror::Error;

/// Failures surfaced by the persistence layer.
///
/// Invalid user input is deliberately not represented here: a save with a
/// blank name or student id is dropped without a write rather than reported
/// as an error. See [`crate::BiodataController::save`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
