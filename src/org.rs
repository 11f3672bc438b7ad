//! Organization enumerations shared across modules
//!
//! Office branches, permission levels, and user types. All are closed sets
//! serialized in SCREAMING_SNAKE_CASE, matching the stored records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A branch, permission or user type name that is not one of the known values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrgParseError {
    #[error("unknown office branch: {0}")]
    UnknownBranch(String),

    #[error("unknown permission: {0}")]
    UnknownPermission(String),

    #[error("unknown user type: {0}")]
    UnknownUserType(String),
}

/// Physical office location. Scopes numbering sequences and some memo audiences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfficeBranch {
    Cebu,
    Calbayog,
    Fuente,
}

impl OfficeBranch {
    pub const ALL: [OfficeBranch; 3] = [Self::Cebu, Self::Calbayog, Self::Fuente];

    /// Short code embedded in document numbers
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cebu => "CEB",
            Self::Calbayog => "CAL",
            Self::Fuente => "FUENTE",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cebu => "CEBU",
            Self::Calbayog => "CALBAYOG",
            Self::Fuente => "FUENTE",
        }
    }
}

impl std::fmt::Display for OfficeBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OfficeBranch {
    type Err = OrgParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CEBU" => Ok(Self::Cebu),
            "CALBAYOG" => Ok(Self::Calbayog),
            "FUENTE" => Ok(Self::Fuente),
            other => Err(OrgParseError::UnknownBranch(other.to_string())),
        }
    }
}

/// Role-based access level, independent of branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionType {
    SuperAdmin,
    Supervisor,
    Accounting,
    Reservation,
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "SUPER_ADMIN"),
            Self::Supervisor => write!(f, "SUPERVISOR"),
            Self::Accounting => write!(f, "ACCOUNTING"),
            Self::Reservation => write!(f, "RESERVATION"),
        }
    }
}

impl std::str::FromStr for PermissionType {
    type Err = OrgParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "SUPERVISOR" => Ok(Self::Supervisor),
            "ACCOUNTING" => Ok(Self::Accounting),
            "RESERVATION" => Ok(Self::Reservation),
            other => Err(OrgParseError::UnknownPermission(other.to_string())),
        }
    }
}

/// Account type. Only admins may approve memorandums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Admin,
    #[default]
    Employee,
}

impl std::str::FromStr for UserType {
    type Err = OrgParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "EMPLOYEE" => Ok(Self::Employee),
            other => Err(OrgParseError::UnknownUserType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_codes() {
        assert_eq!(OfficeBranch::Cebu.code(), "CEB");
        assert_eq!(OfficeBranch::Calbayog.code(), "CAL");
        assert_eq!(OfficeBranch::Fuente.code(), "FUENTE");
    }

    #[test]
    fn test_branch_from_str() {
        assert_eq!("CEBU".parse::<OfficeBranch>().unwrap(), OfficeBranch::Cebu);
        assert_eq!("FUENTE".parse::<OfficeBranch>().unwrap(), OfficeBranch::Fuente);
        assert!("cebu".parse::<OfficeBranch>().is_err());
        assert_eq!(
            "MANILA".parse::<OfficeBranch>(),
            Err(OrgParseError::UnknownBranch("MANILA".to_string()))
        );
    }

    #[test]
    fn test_branch_serialization() {
        let json = serde_json::to_string(&OfficeBranch::Calbayog).unwrap();
        assert_eq!(json, "\"CALBAYOG\"");
        let parsed: OfficeBranch = serde_json::from_str("\"FUENTE\"").unwrap();
        assert_eq!(parsed, OfficeBranch::Fuente);
    }

    #[test]
    fn test_permission_round_trip_through_display() {
        for p in [
            PermissionType::SuperAdmin,
            PermissionType::Supervisor,
            PermissionType::Accounting,
            PermissionType::Reservation,
        ] {
            assert_eq!(p.to_string().parse::<PermissionType>().unwrap(), p);
        }
        assert_eq!(
            "ADMIN".parse::<PermissionType>(),
            Err(OrgParseError::UnknownPermission("ADMIN".to_string()))
        );
    }

    #[test]
    fn test_user_type_default() {
        assert_eq!(UserType::default(), UserType::Employee);
        assert_eq!("ADMIN".parse::<UserType>().unwrap(), UserType::Admin);
        assert_eq!(
            "MANAGER".parse::<UserType>().unwrap_err().to_string(),
            "unknown user type: MANAGER"
        );
    }
}
