use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::error::StorageError;
use crate::model::{Biodata, NewBiodata};
use crate::store::BiodataStore;

/// Raw presentation-layer input for a save. Text fields arrive untrimmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiodataInput {
    pub name: String,
    pub student_id: String,
    pub birth_place: String,
    pub birth_date: String,
    pub address: String,
    #[serde(default)]
    pub photo_uri: Option<String>,
}

/// Mediates between the presentation layer and [`BiodataStore`]: trims and
/// validates input before persisting, and exposes the record's live state.
#[derive(Clone)]
pub struct BiodataController {
    store: Arc<BiodataStore>,
}

impl BiodataController {
    pub fn new(store: Arc<BiodataStore>) -> Self {
        Self { store }
    }

    /// Live view of the persisted record, passed through from the store.
    pub fn current_record(&self) -> watch::Receiver<Option<Biodata>> {
        self.store.observe()
    }

    /// Trims the text fields and persists the record under the fixed id.
    ///
    /// A submission whose name or student id is blank after trimming is
    /// dropped without a write and without an error. The UI pre-populates
    /// its form from [`BiodataController::current_record`], so a dropped
    /// save leaves the last good state visible.
    pub async fn save(&self, input: BiodataInput) -> Result<(), StorageError> {
        let name = input.name.trim();
        let student_id = input.student_id.trim();
        if name.is_empty() || student_id.is_empty() {
            debug!(
                target: "biodata",
                event = "save_rejected",
                blank_name = name.is_empty(),
                blank_student_id = student_id.is_empty()
            );
            return Ok(());
        }

        let record = NewBiodata {
            name: name.to_string(),
            student_id: student_id.to_string(),
            birth_place: input.birth_place.trim().to_string(),
            birth_date: input.birth_date.trim().to_string(),
            address: input.address.trim().to_string(),
            // Opaque handle to external media, stored exactly as supplied.
            photo_uri: input.photo_uri,
        };
        self.store.upsert(record).await?;
        Ok(())
    }

    /// Removes the record; succeeds whether or not one exists.
    pub async fn delete(&self) -> Result<(), StorageError> {
        self.store.delete().await
    }
}
