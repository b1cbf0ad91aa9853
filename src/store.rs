use sqlx::SqlitePool;
use tokio::sync::watch;
use tracing::info;

use crate::error::StorageError;
use crate::model::{Biodata, NewBiodata, BIODATA_ID};
use crate::time::now_ms;

const SELECT_BIODATA: &str = "SELECT id, name, student_id, birth_place, birth_date, address, \
     photo_uri, created_at, updated_at FROM biodata WHERE id = ?";

/// Durable storage for the single biodata row, with change notification.
///
/// Construct one per process (see [`crate::bootstrap`]) and share it;
/// receivers from [`BiodataStore::observe`] are only notified of writes that
/// go through the same instance.
pub struct BiodataStore {
    pool: SqlitePool,
    current: watch::Sender<Option<Biodata>>,
}

impl BiodataStore {
    /// Wraps an open, migrated pool and seeds the observation channel from
    /// the current row.
    pub async fn new(pool: SqlitePool) -> Result<Self, StorageError> {
        let initial = fetch(&pool).await?;
        let (current, _) = watch::channel(initial);
        Ok(Self { pool, current })
    }

    /// Point read of the current record.
    pub async fn get(&self) -> Result<Option<Biodata>, StorageError> {
        fetch(&self.pool).await
    }

    /// Live view of the record: `borrow()` yields the current snapshot
    /// immediately, `changed().await` wakes after every successful upsert or
    /// delete. Yields `None` while no record exists. Drop the receiver to
    /// stop observing.
    pub fn observe(&self) -> watch::Receiver<Option<Biodata>> {
        self.current.subscribe()
    }

    /// Writes the record under the fixed id, atomically replacing any
    /// existing row. `created_at` survives an overwrite; everything else is
    /// taken from `record`.
    pub async fn upsert(&self, record: NewBiodata) -> Result<Biodata, StorageError> {
        let now = now_ms();
        sqlx::query(
            "INSERT INTO biodata (id, name, student_id, birth_place, birth_date, address, \
               photo_uri, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
               name = excluded.name, \
               student_id = excluded.student_id, \
               birth_place = excluded.birth_place, \
               birth_date = excluded.birth_date, \
               address = excluded.address, \
               photo_uri = excluded.photo_uri, \
               updated_at = excluded.updated_at",
        )
        .bind(BIODATA_ID)
        .bind(&record.name)
        .bind(&record.student_id)
        .bind(&record.birth_place)
        .bind(&record.birth_date)
        .bind(&record.address)
        .bind(&record.photo_uri)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let saved = sqlx::query(SELECT_BIODATA)
            .bind(BIODATA_ID)
            .fetch_one(&self.pool)
            .await
            .and_then(|row| Biodata::from_row(&row))?;

        info!(
            target: "biodata",
            event = "biodata_saved",
            updated_at = saved.updated_at
        );
        self.current.send_replace(Some(saved.clone()));
        Ok(saved)
    }

    /// Removes the row if present. Already-absent is a success, not an
    /// error; observers are (re)notified with `None` either way.
    pub async fn delete(&self) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM biodata WHERE id = ?")
            .bind(BIODATA_ID)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() > 0 {
            info!(target: "biodata", event = "biodata_deleted");
        }
        self.current.send_replace(None);
        Ok(())
    }
}

async fn fetch(pool: &SqlitePool) -> Result<Option<Biodata>, StorageError> {
    let row = sqlx::query(SELECT_BIODATA)
        .bind(BIODATA_ID)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(Biodata::from_row).transpose()?)
}
