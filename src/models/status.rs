use super::MaintenanceKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Maintenance status of an item or a whole vehicle.
///
/// Ordering follows [`MaintenanceStatus::rank`], not declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    Ok,
    DueSoon,
    Overdue,
}

impl MaintenanceStatus {
    pub fn rank(&self) -> u8 {
        match self {
            MaintenanceStatus::Ok => 1,
            MaintenanceStatus::DueSoon => 2,
            MaintenanceStatus::Overdue => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Ok => "OK",
            MaintenanceStatus::DueSoon => "Due Soon",
            MaintenanceStatus::Overdue => "Overdue",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MaintenanceStatus::Ok => "✓",
            MaintenanceStatus::DueSoon => "⚠",
            MaintenanceStatus::Overdue => "!",
        }
    }
}

impl PartialOrd for MaintenanceStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MaintenanceStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which recurrence path decided an item's combined status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyReason {
    Km,
    Date,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStatus {
    pub rule_id: i64,
    pub item_name: String,
    pub kind: MaintenanceKind,

    // Distance path; all None when the rule has no km interval
    pub last_performed_km: Option<i64>,
    pub next_due_km: Option<i64>,
    pub remaining_km: Option<i64>,

    // Calendar path; all None when the rule has no month interval
    pub last_performed_date: Option<NaiveDate>,
    pub next_due_date: Option<NaiveDate>,
    pub remaining_days: Option<i64>,

    pub status: MaintenanceStatus,
    pub urgency_reason: UrgencyReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub current_odo: i64,
    pub report_date: NaiveDate,
    pub items: Vec<ItemStatus>,
    pub status: MaintenanceStatus,
}

impl Report {
    pub fn items_with_status(&self, status: MaintenanceStatus) -> Vec<&ItemStatus> {
        self.items.iter().filter(|i| i.status == status).collect()
    }
}
