//! Memorandum store with file-based JSON persistence
//!
//! Memorandums are held in memory and mirrored as one JSON file each under
//! `<storage.memorandums_dir>/<id>.json`. Numbers are issued through the
//! shared [`NumberRegistry`].

use crate::error::{Error, Result};
use crate::memorandums::types::*;
use crate::numbering::{DocumentKind, NumberRegistry};
use crate::org::OfficeBranch;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Search, branch and paging options for [`MemorandumStore::list`]
#[derive(Debug, Default)]
pub struct ListFilter<'a> {
    pub search: Option<&'a str>,
    pub branch: Option<OfficeBranch>,
    pub skip: usize,
    pub take: Option<usize>,
}

/// In-memory memorandum store backed by JSON files
pub struct MemorandumStore {
    dir: PathBuf,
    registry: Arc<NumberRegistry>,
    memorandums: RwLock<Vec<Memorandum>>,
}

impl MemorandumStore {
    /// Create a store at `dir`, loading any memorandums already on disk
    pub async fn new(dir: PathBuf, registry: Arc<NumberRegistry>) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(&dir).await?;
        let mut memorandums = Self::load_from_disk(&dir);
        memorandums.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(Self {
            dir,
            registry,
            memorandums: RwLock::new(memorandums),
        })
    }

    /// Create a memorandum, issuing the next memorandum number for its branch
    pub async fn create(&self, req: CreateMemorandumRequest) -> Result<Memorandum> {
        let number = self
            .registry
            .issue(DocumentKind::Memorandum, req.branch)
            .await?;
        let now = Utc::now();

        let memo = Memorandum {
            id: uuid::Uuid::new_v4().to_string(),
            memorandum_number: number.to_string(),
            to: req.to.trim().to_string(),
            subject: req.subject.trim().to_string(),
            contents: req.contents,
            branch: req.branch,
            creator_id: req.creator_id,
            approver_id: None,
            created_at: now,
            updated_at: now,
        };

        let mut memorandums = self.memorandums.write().await;
        self.persist(&memo).await?;
        memorandums.insert(0, memo.clone());

        tracing::info!(
            id = %memo.id,
            number = %memo.memorandum_number,
            to = %memo.to,
            "Memorandum created"
        );
        Ok(memo)
    }

    /// List memorandums, newest first, that pass `visible` and the filter.
    ///
    /// `total` counts every match before paging.
    pub async fn list(
        &self,
        filter: &ListFilter<'_>,
        visible: impl Fn(&Memorandum) -> bool,
    ) -> MemorandumList {
        let memorandums = self.memorandums.read().await;
        let query = filter.search.map(str::to_lowercase);

        let matched: Vec<&Memorandum> = memorandums
            .iter()
            .filter(|m| visible(m))
            .filter(|m| filter.branch.map_or(true, |b| m.branch == b))
            .filter(|m| match &query {
                Some(q) => {
                    m.subject.to_lowercase().contains(q)
                        || m.to.to_lowercase().contains(q)
                        || m.memorandum_number.to_lowercase().contains(q)
                }
                None => true,
            })
            .collect();

        let total = matched.len() as u64;
        let memorandum_data = matched
            .into_iter()
            .skip(filter.skip)
            .take(filter.take.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        MemorandumList {
            memorandum_data,
            total,
        }
    }

    pub async fn get(&self, id: &str) -> Option<Memorandum> {
        self.memorandums.read().await.iter().find(|m| m.id == id).cloned()
    }

    /// Apply a partial update; `None` if the memorandum does not exist
    pub async fn update(
        &self,
        id: &str,
        req: UpdateMemorandumRequest,
    ) -> Result<Option<Memorandum>> {
        let mut memorandums = self.memorandums.write().await;
        let Some(index) = memorandums.iter().position(|m| m.id == id) else {
            return Ok(None);
        };

        let mut updated = memorandums[index].clone();
        if let Some(to) = req.to {
            updated.to = to.trim().to_string();
        }
        if let Some(subject) = req.subject {
            updated.subject = subject.trim().to_string();
        }
        if let Some(contents) = req.contents {
            updated.contents = contents;
        }
        updated.updated_at = Utc::now();

        self.persist(&updated).await?;
        memorandums[index] = updated.clone();
        Ok(Some(updated))
    }

    /// Record the approving user; `None` if the memorandum does not exist
    pub async fn set_approver(&self, id: &str, approver_id: &str) -> Result<Option<Memorandum>> {
        let mut memorandums = self.memorandums.write().await;
        let Some(index) = memorandums.iter().position(|m| m.id == id) else {
            return Ok(None);
        };

        let mut updated = memorandums[index].clone();
        updated.approver_id = Some(approver_id.to_string());
        updated.updated_at = Utc::now();

        self.persist(&updated).await?;
        memorandums[index] = updated.clone();
        tracing::info!(id = %updated.id, approver = %approver_id, "Memorandum approved");
        Ok(Some(updated))
    }

    /// Delete a memorandum; returns whether it existed
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut memorandums = self.memorandums.write().await;
        let Some(index) = memorandums.iter().position(|m| m.id == id) else {
            return Ok(false);
        };

        let path = self.file_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::Storage(format!(
                    "Failed to remove {}: {}",
                    path.display(),
                    e
                )))
            }
        }

        memorandums.remove(index);
        tracing::info!(id = %id, "Memorandum deleted");
        Ok(true)
    }

    /// Counts over the memorandums that pass `visible`
    pub async fn summary(&self, visible: impl Fn(&Memorandum) -> bool) -> MemorandumSummary {
        let memorandums = self.memorandums.read().await;
        let mut summary = MemorandumSummary::default();

        for memo in memorandums.iter().filter(|m| visible(m)) {
            summary.total += 1;
            if memo.approver_id.is_some() {
                summary.approved += 1;
            } else {
                summary.pending += 1;
            }
            match memo.branch {
                OfficeBranch::Cebu => summary.cebu += 1,
                OfficeBranch::Calbayog => summary.calbayog += 1,
                OfficeBranch::Fuente => summary.fuente += 1,
            }
        }

        summary
    }

    fn file_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn load_from_disk(dir: &Path) -> Vec<Memorandum> {
        let mut memorandums = Vec::new();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return memorandums,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(data) => match serde_json::from_str::<Memorandum>(&data) {
                    Ok(m) => memorandums.push(m),
                    Err(e) => {
                        tracing::warn!("Failed to parse memorandum {}: {}", path.display(), e)
                    }
                },
                Err(e) => tracing::warn!("Failed to read memorandum {}: {}", path.display(), e),
            }
        }

        memorandums
    }

    /// Write a memorandum to disk. Callers hold the write lock, so writes
    /// and removals of one record land in the order they were made.
    async fn persist(&self, memo: &Memorandum) -> Result<()> {
        let path = self.file_path(&memo.id);
        let json = serde_json::to_string_pretty(memo)?;
        tokio::fs::write(&path, json).await.map_err(|e| {
            Error::Storage(format!("Failed to persist {}: {}", path.display(), e))
        })
    }
}
