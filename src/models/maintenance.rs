use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceKind {
    Replace,
    Check,
    Clean,
}

impl MaintenanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceKind::Replace => "Replace",
            MaintenanceKind::Check => "Check",
            MaintenanceKind::Clean => "Clean",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "replace" | "r" => Some(MaintenanceKind::Replace),
            "check" | "c" => Some(MaintenanceKind::Check),
            "clean" => Some(MaintenanceKind::Clean),
            _ => None,
        }
    }

    pub fn all() -> &'static [MaintenanceKind] {
        &[
            MaintenanceKind::Replace,
            MaintenanceKind::Check,
            MaintenanceKind::Clean,
        ]
    }

    /// Marker used in text reports
    pub fn marker(&self) -> &'static str {
        match self {
            MaintenanceKind::Replace => "[R]",
            MaintenanceKind::Check => "[C]",
            MaintenanceKind::Clean => "[V]",
        }
    }
}

impl std::fmt::Display for MaintenanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recurring maintenance requirement. Either interval may be absent; with
/// neither the item is never due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRule {
    pub id: i64,
    pub item_name: String,
    pub kind: MaintenanceKind,
    pub interval_km: Option<i64>,
    pub interval_months: Option<u32>,
}

impl MaintenanceRule {
    pub fn new(id: i64, item_name: impl Into<String>, kind: MaintenanceKind) -> Self {
        Self {
            id,
            item_name: item_name.into(),
            kind,
            interval_km: None,
            interval_months: None,
        }
    }

    pub fn every_km(mut self, km: i64) -> Self {
        self.interval_km = Some(km);
        self
    }

    pub fn every_months(mut self, months: u32) -> Self {
        self.interval_months = Some(months);
        self
    }

    pub fn is_trackable(&self) -> bool {
        self.interval_km.is_some() || self.interval_months.is_some()
    }
}

/// A record that maintenance was performed at some odometer reading and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEvent {
    pub id: i64,
    pub rule_id: Option<i64>,
    pub item_name: String,
    pub performed_at_km: i64,
    pub performed_at_date: NaiveDate,
    pub cost: Option<f64>,
    pub note: Option<String>,
}

impl ServiceEvent {
    pub fn new(
        id: i64,
        item_name: impl Into<String>,
        performed_at_km: i64,
        performed_at_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            rule_id: None,
            item_name: item_name.into(),
            performed_at_km,
            performed_at_date,
            cost: None,
            note: None,
        }
    }

    pub fn for_rule(mut self, rule_id: i64) -> Self {
        self.rule_id = Some(rule_id);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }
}

/// A named set of maintenance rules shared by vehicles of the same model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceProfile {
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Input for a new rule, before it has a database id.
#[derive(Debug, Clone)]
pub struct NewRule {
    pub item_name: String,
    pub kind: MaintenanceKind,
    pub interval_km: Option<i64>,
    pub interval_months: Option<u32>,
}

/// Input for a new service event, before it has a database id.
#[derive(Debug, Clone)]
pub struct NewServiceEvent {
    pub vehicle_id: i64,
    pub rule_id: Option<i64>,
    pub item_name: String,
    pub performed_at_km: i64,
    pub performed_at_date: NaiveDate,
    pub cost: Option<f64>,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_str_valid() {
        assert_eq!(
            MaintenanceKind::from_str("REPLACE"),
            Some(MaintenanceKind::Replace)
        );
        assert_eq!(
            MaintenanceKind::from_str("check"),
            Some(MaintenanceKind::Check)
        );
        assert_eq!(
            MaintenanceKind::from_str(" Clean "),
            Some(MaintenanceKind::Clean)
        );
    }

    #[test]
    fn kind_from_str_invalid() {
        assert_eq!(MaintenanceKind::from_str("inspect"), None);
        assert_eq!(MaintenanceKind::from_str(""), None);
    }

    #[test]
    fn kind_round_trip() {
        for kind in MaintenanceKind::all() {
            let debug_str = format!("{:?}", kind);
            assert_eq!(
                MaintenanceKind::from_str(&debug_str),
                Some(*kind),
                "Round-trip failed for {:?}",
                kind
            );
        }
    }

    #[test]
    fn kind_serializes_upper_case() {
        let json = serde_json::to_string(&MaintenanceKind::Replace).unwrap();
        assert_eq!(json, "\"REPLACE\"");
    }

    #[test]
    fn rule_without_intervals_is_not_trackable() {
        let rule = MaintenanceRule::new(1, "Horn", MaintenanceKind::Check);
        assert!(!rule.is_trackable());
        assert!(rule.clone().every_km(1000).is_trackable());
        assert!(rule.every_months(6).is_trackable());
    }

    #[test]
    fn event_builder_pattern() {
        let event = ServiceEvent::new(
            7,
            "Engine oil",
            4500,
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        )
        .for_rule(3)
        .with_cost(150000.0)
        .with_note("Dealer service");

        assert_eq!(event.rule_id, Some(3));
        assert_eq!(event.performed_at_km, 4500);
        assert_eq!(event.cost, Some(150000.0));
        assert_eq!(event.note, Some("Dealer service".to_string()));
    }
}
