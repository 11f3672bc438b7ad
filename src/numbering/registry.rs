//! Number registry with file-based JSON persistence
//!
//! Keeps the last issued [`DocumentNumber`] of every (kind, branch) scope as
//! structured fields, so the next number never has to be parsed back out of
//! a display string. Layout:
//! ```text
//! <storage.base_dir>/
//! └── numbers.json   # [{kind, sequence, date, branch}, ...]
//! ```

use crate::error::{Error, Result};
use crate::numbering::generator::today;
use crate::numbering::{DocumentKind, DocumentNumber, NumberingError};
use crate::org::OfficeBranch;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

type Scope = (DocumentKind, OfficeBranch);

const REGISTRY_FILE: &str = "numbers.json";

/// Issues document numbers, one sequence per (kind, branch) scope
pub struct NumberRegistry {
    path: PathBuf,
    last: Mutex<BTreeMap<Scope, DocumentNumber>>,
}

impl NumberRegistry {
    /// Open the registry stored under `dir`, creating the directory if needed
    pub async fn open(dir: PathBuf) -> Result<Self> {
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(REGISTRY_FILE);

        let last = match tokio::fs::read_to_string(&path).await {
            Ok(data) => {
                let numbers: Vec<DocumentNumber> = serde_json::from_str(&data)?;
                numbers
                    .into_iter()
                    .map(|n| ((n.kind, n.branch), n))
                    .collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::Io(e)),
        };

        tracing::debug!(scopes = last.len(), path = %path.display(), "Number registry loaded");

        Ok(Self {
            path,
            last: Mutex::new(last),
        })
    }

    /// Issue the next number of a scope, stamped with today's date
    pub async fn issue(&self, kind: DocumentKind, branch: OfficeBranch) -> Result<DocumentNumber> {
        self.issue_on(kind, branch, today()).await
    }

    /// Issue the next number of a scope.
    ///
    /// The lock is held until the new last number is on disk, so two callers
    /// can never receive the same number.
    pub async fn issue_on(
        &self,
        kind: DocumentKind,
        branch: OfficeBranch,
        date: NaiveDate,
    ) -> Result<DocumentNumber> {
        let mut last = self.last.lock().await;

        let number = match last.get(&(kind, branch)) {
            Some(previous) => previous.next(date)?,
            None => DocumentNumber::first(kind, branch, date),
        };

        let mut updated = last.clone();
        updated.insert((kind, branch), number.clone());
        self.persist(&updated).await?;
        *last = updated;

        tracing::info!(%kind, %branch, number = %number, "Issued document number");
        Ok(number)
    }

    /// The number `issue` would return right now, without issuing it
    pub async fn peek(&self, kind: DocumentKind, branch: OfficeBranch) -> Result<String> {
        let last = self.last.lock().await;
        let number = match last.get(&(kind, branch)) {
            Some(previous) => previous.next(today())?,
            None => DocumentNumber::first(kind, branch, today()),
        };
        Ok(number.to_string())
    }

    /// Last number issued in a scope
    pub async fn last(&self, kind: DocumentKind, branch: OfficeBranch) -> Option<DocumentNumber> {
        self.last.lock().await.get(&(kind, branch)).cloned()
    }

    /// Import a number that was stored as text before the registry existed.
    ///
    /// The scope is taken from the number itself. Seeding below the current
    /// last number is rejected.
    pub async fn seed(&self, kind: DocumentKind, legacy: &str) -> Result<DocumentNumber> {
        let number = DocumentNumber::parse_legacy(kind, legacy)?;
        let scope = (kind, number.branch);

        let mut last = self.last.lock().await;
        if let Some(current) = last.get(&scope) {
            if current.sequence > number.sequence {
                return Err(NumberingError::Regression {
                    kind,
                    branch: number.branch,
                    current: current.sequence,
                    attempted: number.sequence,
                }
                .into());
            }
        }

        let mut updated = last.clone();
        updated.insert(scope, number.clone());
        self.persist(&updated).await?;
        *last = updated;

        tracing::info!(%kind, branch = %number.branch, number = %number, "Seeded document number");
        Ok(number)
    }

    async fn persist(&self, numbers: &BTreeMap<Scope, DocumentNumber>) -> Result<()> {
        let list: Vec<&DocumentNumber> = numbers.values().collect();
        let json = serde_json::to_string_pretty(&list)?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            Error::Storage(format!("Failed to persist {}: {}", self.path.display(), e))
        })
    }
}
