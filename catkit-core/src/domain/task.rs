//! Cold start task domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy when the result cache target already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IfExists {
    Error,
    Archive,
    Delete,
}

impl IfExists {
    pub fn as_str(&self) -> &'static str {
        match self {
            IfExists::Error => "error",
            IfExists::Archive => "archive",
            IfExists::Delete => "delete",
        }
    }
}

impl fmt::Display for IfExists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for a cold start submission.
#[derive(Debug, Clone, Serialize)]
pub struct ColdStartRequest {
    pub data_product_id: String,
    pub result_cache_database: String,
    pub result_cache_schema: String,
    pub if_exists: IfExists,
}

/// Typed view of a cold start task's status record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}
