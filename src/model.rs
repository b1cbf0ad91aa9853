use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Fixed primary key of the single biodata row. The schema's `CHECK (id = 1)`
/// keeps the table at zero-or-one rows.
pub const BIODATA_ID: i64 = 1;

/// The persisted biodata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biodata {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub student_id: String,
    pub birth_place: String,
    /// Free-form text ("5 Mei 1999"), never parsed as a date.
    pub birth_date: String,
    pub address: String,
    /// Opaque handle to externally managed photo data. Stored and returned
    /// unchanged; never dereferenced or validated here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Biodata {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            student_id: row.try_get("student_id")?,
            birth_place: row.try_get("birth_place")?,
            birth_date: row.try_get("birth_date")?,
            address: row.try_get("address")?,
            photo_uri: row.try_get("photo_uri")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Field values for a save, already trimmed and validated by the caller.
/// The store assigns [`BIODATA_ID`] and the bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBiodata {
    pub name: String,
    pub student_id: String,
    pub birth_place: String,
    pub birth_date: String,
    pub address: String,
    #[serde(default)]
    pub photo_uri: Option<String>,
}
