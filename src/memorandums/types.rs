//! Memorandum wire types
//!
//! All types use camelCase JSON serialization to match the web client.

use crate::org::OfficeBranch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A memorandum addressed to an audience
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memorandum {
    pub id: String,
    pub memorandum_number: String,
    /// Audience label or individual "First Last" name
    pub to: String,
    pub subject: String,
    /// Rich-text editor payload, stored opaque
    pub contents: String,
    pub branch: OfficeBranch,
    pub creator_id: Option<String>,
    pub approver_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a memorandum
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemorandumRequest {
    pub to: String,
    pub subject: String,
    #[serde(default)]
    pub contents: String,
    pub branch: OfficeBranch,
    pub creator_id: Option<String>,
}

impl CreateMemorandumRequest {
    /// Check required fields, returning the first problem found
    pub fn validate(&self) -> Result<(), String> {
        if self.to.trim().is_empty() {
            return Err("To is required".to_string());
        }
        if self.subject.trim().is_empty() {
            return Err("Subject is required".to_string());
        }
        Ok(())
    }
}

/// Request body for updating a memorandum
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemorandumRequest {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub contents: Option<String>,
}

/// Query parameters for listing memorandums
#[derive(Debug, Default, Deserialize)]
pub struct ListMemorandumsQuery {
    pub skip: Option<usize>,
    pub take: Option<usize>,
    pub search: Option<String>,
    pub branch: Option<String>,
}

/// List response envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorandumList {
    pub memorandum_data: Vec<Memorandum>,
    pub total: u64,
}

/// Memorandum counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorandumSummary {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub cebu: u64,
    pub calbayog: u64,
    pub fuente: u64,
}
