//! Numbering module — branch-scoped, date-stamped document numbers
//!
//! Six document kinds (memorandum, DTS, transaction, serial, purchase
//! request, package) each keep one monotonically increasing sequence per
//! office branch. The generator is pure; the registry serializes
//! "read last, compute next, persist" per scope and exposes it over HTTP.

pub mod generator;
pub mod handler;
pub mod kind;
pub mod registry;

pub use generator::{
    next_dts_number, next_memorandum_number, next_package_number, next_purchase_request_number,
    next_serial_number, next_transaction_number, DocumentNumber,
};
pub use handler::{numbers_router, NumbersState};
pub use kind::{DocumentKind, SequenceSlot};
pub use registry::NumberRegistry;

use thiserror::Error;

/// Numbering error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberingError {
    #[error("unknown document kind: {0}")]
    UnknownKind(String),

    #[error("{kind} number '{value}' has no readable sequence")]
    MalformedSequence { kind: DocumentKind, value: String },

    #[error("{kind} number '{value}' is not of the form <sequence>-MMDDYYYY-<branch code>")]
    MalformedNumber { kind: DocumentKind, value: String },

    #[error("{0} sequence exhausted")]
    SequenceExhausted(DocumentKind),

    #[error("{kind} {branch} is already at {current}; cannot seed {attempted}")]
    Regression {
        kind: DocumentKind,
        branch: crate::org::OfficeBranch,
        current: u32,
        attempted: u32,
    },
}
