//! Access module — who may read a memorandum
//!
//! [`can_access_memo`] decides visibility from the requesting user's
//! permission, branch and name against a memorandum's free-text audience.
//! [`RequestUser`] extracts that identity from the headers set by the
//! fronting auth proxy.

pub mod identity;

pub use identity::RequestUser;

use crate::org::{OfficeBranch, PermissionType};

/// Audience that every employee can read
pub const ALL_EMPLOYEES: &str = "All Employees";

/// Audience labels offered when composing a memorandum
pub const MEMO_AUDIENCE: [&str; 10] = [
    "All Employees",
    "Supervisor Cebu",
    "Supervisor Calbayog",
    "All Supervisor",
    "Accounting Cebu",
    "Accounting Calbayog",
    "All Accounting",
    "Reservation Cebu",
    "Reservation Calbayog",
    "All Drivers",
];

/// Audience label for a permission at one branch. Fuente has none.
pub fn branch_audience(permission: PermissionType, branch: OfficeBranch) -> Option<&'static str> {
    use crate::org::OfficeBranch::*;
    use crate::org::PermissionType::*;

    match (permission, branch) {
        (Accounting, Cebu) => Some("Accounting Cebu"),
        (Accounting, Calbayog) => Some("Accounting Calbayog"),
        (Reservation, Cebu) => Some("Reservation Cebu"),
        (Reservation, Calbayog) => Some("Reservation Calbayog"),
        (Supervisor, Cebu) => Some("Supervisor Cebu"),
        (Supervisor, Calbayog) => Some("Supervisor Calbayog"),
        (_, Fuente) | (SuperAdmin, _) => None,
    }
}

/// Audience label covering a permission across all branches
pub fn department_audience(permission: PermissionType) -> Option<&'static str> {
    match permission {
        PermissionType::Accounting => Some("All Accounting"),
        PermissionType::Reservation => Some("All Reservation"),
        PermissionType::Supervisor => Some("All Supervisor"),
        PermissionType::SuperAdmin => None,
    }
}

/// Whether a user may read a memorandum addressed to `memo_audience`.
///
/// Rules, first match wins: super admins see everything; "All Employees"
/// is public; then the user's branch label, their department label, and
/// finally their exact "First Last" name.
pub fn can_access_memo(
    user_permission: PermissionType,
    user_branch: OfficeBranch,
    memo_audience: &str,
    user_first_name: Option<&str>,
    user_last_name: Option<&str>,
) -> bool {
    if user_permission == PermissionType::SuperAdmin {
        return true;
    }

    if memo_audience == ALL_EMPLOYEES {
        return true;
    }

    if branch_audience(user_permission, user_branch) == Some(memo_audience) {
        return true;
    }

    if department_audience(user_permission) == Some(memo_audience) {
        return true;
    }

    match (user_first_name, user_last_name) {
        (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
            memo_audience == format!("{} {}", first, last)
        }
        _ => false,
    }
}
