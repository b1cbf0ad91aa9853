use sha2::{Digest, Sha256};
use sqlx::{Executor, Row, SqlitePool};
use std::collections::HashMap;

use crate::time::now_ms;
use tracing::{error, info, warn};

static MIGRATIONS: &[(&str, &str)] = &[(
    "202608201200_biodata.sql",
    include_str!("../migrations/202608201200_biodata.sql"),
)];

fn preview(sql: &str) -> String {
    let one_line = sql.replace(['\n', '\t'], " ");
    let trimmed = one_line.trim();
    if trimmed.len() > 160 {
        format!("{}…", &trimmed[..160])
    } else {
        trimmed.to_string()
    }
}

fn cleaned_sql(raw: &str) -> String {
    raw.lines()
        .filter(|line| {
            let t = line.trim_start();
            !(t.is_empty() || t.starts_with("--"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn checksum_of(cleaned: &str) -> String {
    format!("{:x}", Sha256::digest(cleaned.as_bytes()))
}

pub async fn apply_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    pool.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (\
           version   TEXT PRIMARY KEY,\
           applied_at INTEGER NOT NULL,\
           checksum TEXT NOT NULL\
         )",
    )
    .await?;

    let rows = sqlx::query("SELECT version, checksum FROM schema_migrations")
        .fetch_all(pool)
        .await?;
    let mut applied: HashMap<String, String> = HashMap::new();
    for r in rows {
        if let (Ok(v), Ok(c)) = (
            r.try_get::<String, _>("version"),
            r.try_get::<String, _>("checksum"),
        ) {
            applied.insert(v, c);
        }
    }

    // A ledger entry whose checksum no longer matches the embedded file means
    // the schema definition changed after it was applied. The only supported
    // recovery is wipe-and-recreate, as in the original app.
    let tampered = MIGRATIONS.iter().any(|(filename, raw_sql)| {
        applied
            .get(*filename)
            .is_some_and(|stored| stored != &checksum_of(&cleaned_sql(raw_sql)))
    });
    if tampered {
        rebuild_schema(pool).await?;
        applied.clear();
    }

    for (filename, raw_sql) in MIGRATIONS {
        let cleaned = cleaned_sql(raw_sql);
        let checksum = checksum_of(&cleaned);

        if applied.contains_key(*filename) {
            info!(target = "biodata", event = "migration_skip_file", file = %filename);
            continue;
        }

        let mut tx = pool.begin().await?;
        for stmt in cleaned.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            info!(target = "biodata", event = "migration_stmt", file = %filename, sql = %preview(s));
            if let Err(e) = sqlx::query(s).execute(&mut *tx).await {
                error!(target = "biodata", event = "migration_stmt_error", file = %filename, sql = %preview(s), error = %e);
                return Err(e.into());
            }
        }

        sqlx::query(
            "INSERT INTO schema_migrations (version, applied_at, checksum) VALUES (?, ?, ?)",
        )
        .bind(*filename)
        .bind(now_ms())
        .bind(&checksum)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(target = "biodata", event = "migration_file_applied", file = %filename);
    }

    Ok(())
}

/// Drops the biodata schema and its ledger entries so the embedded files can
/// be re-applied from scratch. Destroys any stored record.
async fn rebuild_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    warn!(target = "biodata", event = "schema_rebuild_destructive");
    pool.execute("DROP TABLE IF EXISTS biodata").await?;
    sqlx::query("DELETE FROM schema_migrations")
        .execute(pool)
        .await?;
    Ok(())
}
