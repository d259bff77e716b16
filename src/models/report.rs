//! Report model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A single user report, kept in insertion order per (chat, reported user)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub reporter_id: i64,
    pub reporter_name: String,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Number of pending reports against one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub user_id: i64,
    pub count: usize,
}
