#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use anyhow::Result;
use biodata_lib::{migrate, BiodataInput};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub async fn memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::query("PRAGMA foreign_keys=ON;").execute(&pool).await?;
    migrate::apply_migrations(&pool).await?;
    Ok(pool)
}

pub fn sample_input() -> BiodataInput {
    BiodataInput {
        name: "Budi".into(),
        student_id: "12345".into(),
        birth_place: "Bandung".into(),
        birth_date: "5 Mei 1999".into(),
        address: "Jl. Merdeka".into(),
        photo_uri: None,
    }
}
