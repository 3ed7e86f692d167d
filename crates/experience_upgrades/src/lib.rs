//! One-time feature introductions shown to upgrading users.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeId(pub u32);

impl std::fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformCapability {
    /// The OS call screen integration (lock-screen answering, system call log).
    SystemCallIntegration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformCapabilities {
    available: HashSet<PlatformCapability>,
}

impl PlatformCapabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, capability: PlatformCapability) -> Self {
        self.available.insert(capability);
        self
    }

    pub fn supports(&self, capability: PlatformCapability) -> bool {
        self.available.contains(&capability)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExperienceUpgrade {
    pub id: UpgradeId,
    pub title_key: &'static str,
    pub body_key: &'static str,
    pub image: &'static str,
}

struct CatalogEntry {
    upgrade: ExperienceUpgrade,
    requires: Option<PlatformCapability>,
}

// Append only, ordered by increasing id. Never renumber or remove entries:
// ids are persisted in users' seen sets.
const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        upgrade: ExperienceUpgrade {
            id: UpgradeId(1),
            title_key: "UPGRADE_EXPERIENCE_VIDEO_TITLE",
            body_key: "UPGRADE_EXPERIENCE_VIDEO_DESCRIPTION",
            image: "introductory_splash_video_calling",
        },
        requires: None,
    },
    CatalogEntry {
        upgrade: ExperienceUpgrade {
            id: UpgradeId(2),
            title_key: "UPGRADE_EXPERIENCE_CALLKIT_TITLE",
            body_key: "UPGRADE_EXPERIENCE_CALLKIT_DESCRIPTION",
            image: "introductory_splash_callkit",
        },
        requires: Some(PlatformCapability::SystemCallIntegration),
    },
];

/// The upgrades that apply to one platform, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeCatalog {
    records: Vec<ExperienceUpgrade>,
}

impl UpgradeCatalog {
    pub fn for_platform(capabilities: &PlatformCapabilities) -> Self {
        let records = CATALOG
            .iter()
            .filter(|entry| entry.requires.map_or(true, |cap| capabilities.supports(cap)))
            .map(|entry| entry.upgrade)
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[ExperienceUpgrade] {
        &self.records
    }

    pub fn ids(&self) -> Vec<UpgradeId> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn unseen(&self, seen: &HashSet<UpgradeId>) -> Vec<ExperienceUpgrade> {
        self.records
            .iter()
            .filter(|r| !seen.contains(&r.id))
            .copied()
            .collect()
    }

    /// Adds every catalog id to `seen`; returns how many were new.
    pub fn mark_all_seen(&self, seen: &mut HashSet<UpgradeId>) -> usize {
        self.records.iter().filter(|r| seen.insert(r.id)).count()
    }
}

/// Persisted per-installation set of upgrades the user has already seen.
#[async_trait]
pub trait SeenUpgradeStore: Send + Sync {
    /// Every seen id, read as one consistent snapshot.
    async fn seen_ids(&self) -> Result<HashSet<UpgradeId>>;
    /// Inserts all `ids` in one read-write transaction. Already-present ids
    /// are left alone; returns how many rows were new.
    async fn insert_all(&self, ids: &[UpgradeId]) -> Result<u64>;
}

pub struct ExperienceUpgradeFinder<S: SeenUpgradeStore> {
    catalog: UpgradeCatalog,
    store: S,
}

impl<S: SeenUpgradeStore> ExperienceUpgradeFinder<S> {
    pub fn new(catalog: UpgradeCatalog, store: S) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &UpgradeCatalog {
        &self.catalog
    }

    pub async fn all_unseen(&self) -> Result<Vec<ExperienceUpgrade>> {
        let seen = self.store.seen_ids().await?;
        Ok(self.catalog.unseen(&seen))
    }

    pub async fn mark_all_as_seen(&self) -> Result<u64> {
        let inserted = self.store.insert_all(&self.catalog.ids()).await?;
        info!(
            "experience upgrades: marked as seen catalog={} new={inserted}",
            self.catalog.records().len()
        );
        Ok(inserted)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
