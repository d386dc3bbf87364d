// ── Maintenance task domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

/// A work item against an area of the building.
///
/// `completed_date` is stamped when the task enters `Completed` and
/// cleared if the task is reverted to an open status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub id: TaskId,
    pub area: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub assigned_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub photos: Vec<String>,
    pub notes: Option<String>,
}
