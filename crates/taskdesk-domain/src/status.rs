//! Task lifecycle status.

use serde::{Deserialize, Serialize};

/// Task status: `waiting → in_progress → completed`.
///
/// `completed` is terminal — mutation paths are closed to it by the
/// access rules, so there is no way back out. The transitions themselves
/// are driven by ordinary updates and the close operation; this type only
/// knows the states and which of them is final.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Waiting,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Canonical storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Parse the storage representation. Returns `None` for unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(Self::Waiting),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// `completed` admits no further mutation through normal update paths.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}
