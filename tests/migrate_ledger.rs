use anyhow::Result;
use biodata_lib::{migrate, BiodataStore, NewBiodata};

#[path = "util.rs"]
mod util;

fn sample_record() -> NewBiodata {
    NewBiodata {
        name: "Budi".into(),
        student_id: "12345".into(),
        birth_place: "Bandung".into(),
        birth_date: "5 Mei 1999".into(),
        address: "Jl. Merdeka".into(),
        photo_uri: None,
    }
}

#[tokio::test]
async fn reapply_is_a_noop() -> Result<()> {
    let pool = util::memory_pool().await?;
    let store = BiodataStore::new(pool.clone()).await?;
    store.upsert(sample_record()).await?;

    migrate::apply_migrations(&pool).await?;

    assert!(store.get().await?.is_some());
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(&pool)
        .await?;
    assert_eq!(applied, 1);
    Ok(())
}

#[tokio::test]
async fn tampered_checksum_rebuilds_destructively() -> Result<()> {
    let pool = util::memory_pool().await?;
    let store = BiodataStore::new(pool.clone()).await?;
    store.upsert(sample_record()).await?;

    sqlx::query("UPDATE schema_migrations SET checksum = 'deadbeef'")
        .execute(&pool)
        .await?;

    // Wipe-and-recreate: the schema comes back, the record does not.
    migrate::apply_migrations(&pool).await?;
    assert!(store.get().await?.is_none());

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(&pool)
        .await?;
    assert_eq!(applied, 1);
    let stored: String = sqlx::query_scalar("SELECT checksum FROM schema_migrations")
        .fetch_one(&pool)
        .await?;
    assert_ne!(stored, "deadbeef");
    Ok(())
}
