//! Branch Office - document numbering and memorandum service
//!
//! Backs the office-administration web client of a multi-branch company.
//! Every issued document carries a branch-scoped, date-stamped number, and
//! memorandums are only shown to the audience they are addressed to.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      HTTP API (axum)                          │
//! │  /api/v1/numbers/*              /api/v1/memorandums/*         │
//! └───────────┬───────────────────────────────┬──────────────────┘
//!             │                               │
//! ┌───────────▼───────────┐       ┌───────────▼──────────────────┐
//! │    Number Registry    │◄──────┤      Memorandum Store        │
//! │  one sequence per     │       │  CRUD, approval, summary     │
//! │  (kind, branch)       │       └───────────┬──────────────────┘
//! └───────────┬───────────┘                   │
//!             │                   ┌───────────▼──────────────────┐
//! ┌───────────▼───────────┐       │        Access rules          │
//! │   Number generator    │       │  audience vs. permission,    │
//! │  prefix, pad, date,   │       │  branch and name             │
//! │  branch code          │       └──────────────────────────────┘
//! └───────────────────────┘
//! ```
//!
//! ## Number format
//!
//! `{prefix}{sequence, zero-padded}-{MMDDYYYY}-{branch code}`, for example
//! `SA00251-03052024-CEB` or `T001-03052024-FUENTE`.

pub mod access;
pub mod api;
pub mod config;
pub mod error;
pub mod memorandums;
pub mod numbering;
pub mod org;

pub use config::BranchOfficeConfig;
pub use error::{Error, Result};
