use serde::Serialize;
use std::fmt;

/// Lifecycle status of a logged session transition.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Started,
    Cancelled,
    Finished,
    Missing,
}

impl SessionStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionStatus::Started => "started",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Finished => "finished",
            SessionStatus::Missing => "missing",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "started" => Some(SessionStatus::Started),
            "cancelled" => Some(SessionStatus::Cancelled),
            "finished" => Some(SessionStatus::Finished),
            "missing" => Some(SessionStatus::Missing),
            _ => None,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
