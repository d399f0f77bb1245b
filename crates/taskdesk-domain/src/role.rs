//! Account role types.

use serde::{Deserialize, Serialize};

/// The two user roles the service knows about.
///
/// Wire and storage format: lowercase string (`customer` / `employee`).
/// A role is fixed when the account's profile is created and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Employee,
}

impl Role {
    /// Canonical storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Employee => "employee",
        }
    }

    /// Parse the storage representation. Returns `None` for unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}
