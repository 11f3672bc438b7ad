//! Memorandums module — numbered memos with audience-based visibility
//!
//! Provides REST endpoints for creating, listing, reading, updating,
//! deleting, and approving memorandums. Memorandum numbers come from the
//! shared number registry; reads are filtered through
//! [`crate::access::can_access_memo`].

pub mod handler;
pub mod store;
pub mod types;

pub use handler::{memorandums_router, MemorandumsState};
pub use store::MemorandumStore;
