use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use experience_upgrades::{SeenUpgradeStore, UpgradeId};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenUpgrade {
    pub upgrade_id: UpgradeId,
    pub seen_at: DateTime<Utc>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        create_database_dir(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("unsupported upgrade store url {database_url}"))?
            .create_if_missing(true);
        // One connection keeps `sqlite::memory:` databases shared across queries.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("cannot open upgrade store at {database_url}"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run storage migrations")?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("upgrade store is not answering queries")?;
        Ok(())
    }

    pub async fn list_seen_upgrades(&self) -> Result<Vec<SeenUpgrade>> {
        let rows = sqlx::query(
            "SELECT upgrade_id, seen_at FROM experience_upgrades_seen ORDER BY upgrade_id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(SeenUpgrade {
                    upgrade_id: UpgradeId(row.try_get::<u32, _>("upgrade_id")?),
                    seen_at: row.try_get::<DateTime<Utc>, _>("seen_at")?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl SeenUpgradeStore for Storage {
    async fn seen_ids(&self) -> Result<HashSet<UpgradeId>> {
        let ids: Vec<u32> = sqlx::query_scalar("SELECT upgrade_id FROM experience_upgrades_seen")
            .fetch_all(&self.pool)
            .await
            .context("failed to read seen experience upgrades")?;
        Ok(ids.into_iter().map(UpgradeId).collect())
    }

    async fn insert_all(&self, ids: &[UpgradeId]) -> Result<u64> {
        let seen_at = Utc::now();
        let mut tx = self.pool.begin().await?;

        let mut inserted = 0;
        for id in ids {
            inserted += sqlx::query(
                "INSERT INTO experience_upgrades_seen (upgrade_id, seen_at) VALUES (?, ?)
                 ON CONFLICT(upgrade_id) DO NOTHING",
            )
            .bind(id.0)
            .bind(seen_at)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to mark experience upgrade {id} as seen"))?
            .rows_affected();
        }

        tx.commit().await?;
        debug!(requested = ids.len(), inserted, "storage: recorded seen upgrades");
        Ok(inserted)
    }
}

/// Creates the directory holding a file-backed database so first runs succeed.
fn create_database_dir(database_url: &str) -> Result<()> {
    match database_file(database_url).as_deref().and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("cannot create database directory {}", dir.display())),
        _ => Ok(()),
    }
}

fn database_file(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with("sqlite::memory:") {
        return None;
    }
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let file = rest.split('?').next().filter(|file| !file.is_empty())?;
    Some(PathBuf::from(file))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
