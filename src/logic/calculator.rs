use super::calendar::{add_months, days_between};
use crate::models::{
    AssetSnapshot, ItemStatus, MaintenanceRule, MaintenanceStatus, Report, ServiceEvent,
    UrgencyReason,
};
use chrono::NaiveDate;

/// Share of an interval left before an item is reported as due soon.
/// Applies to both the km and the calendar path, for every maintenance kind.
pub const DUE_SOON_RATIO: f64 = 0.10;

/// How a service event was associated with a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventMatch {
    /// The event records the rule's id.
    ById,
    /// The event records no rule id and its item name equals the rule's,
    /// ignoring case.
    ByName,
}

/// Classify whether `event` belongs to `rule`.
///
/// An event that carries a rule id only ever matches that rule. Name
/// comparison is a fallback for events logged without a rule.
pub fn match_event(rule: &MaintenanceRule, event: &ServiceEvent) -> Option<EventMatch> {
    match event.rule_id {
        Some(id) if id == rule.id => Some(EventMatch::ById),
        Some(_) => None,
        None if same_item(&event.item_name, &rule.item_name) => Some(EventMatch::ByName),
        None => None,
    }
}

fn same_item(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// The matching event with the highest odometer reading; equal readings are
/// decided by the later date, and full ties keep the first event seen.
pub fn latest_event<'a>(
    rule: &MaintenanceRule,
    events: &'a [ServiceEvent],
) -> Option<&'a ServiceEvent> {
    events
        .iter()
        .filter(|e| match_event(rule, e).is_some())
        .fold(None, |best: Option<&ServiceEvent>, e| match best {
            Some(b) if (e.performed_at_km, e.performed_at_date)
                <= (b.performed_at_km, b.performed_at_date) =>
            {
                Some(b)
            }
            _ => Some(e),
        })
}

/// Outcome of a single recurrence path.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PathStatus<T> {
    status: MaintenanceStatus,
    next_due: T,
    remaining: i64,
}

fn classify(remaining: i64, threshold: f64) -> MaintenanceStatus {
    if remaining <= 0 {
        MaintenanceStatus::Overdue
    } else if remaining as f64 <= threshold {
        MaintenanceStatus::DueSoon
    } else {
        MaintenanceStatus::Ok
    }
}

fn km_path(interval_km: i64, baseline_km: i64, current_odo: i64) -> PathStatus<i64> {
    let next_due = baseline_km.saturating_add(interval_km);
    let remaining = next_due.saturating_sub(current_odo);
    let threshold = interval_km as f64 * DUE_SOON_RATIO;

    PathStatus {
        status: classify(remaining, threshold),
        next_due,
        remaining,
    }
}

fn date_path(
    interval_months: u32,
    baseline_date: NaiveDate,
    as_of: NaiveDate,
) -> PathStatus<NaiveDate> {
    let next_due = add_months(baseline_date, interval_months);
    let remaining = days_between(as_of, next_due);
    let total_interval_days = days_between(baseline_date, next_due);
    let threshold = total_interval_days as f64 * DUE_SOON_RATIO;

    PathStatus {
        status: classify(remaining, threshold),
        next_due,
        remaining,
    }
}

/// Merge the two path statuses. The km path wins ties.
fn combine(
    km: Option<MaintenanceStatus>,
    date: Option<MaintenanceStatus>,
) -> (MaintenanceStatus, UrgencyReason) {
    match (km, date) {
        (None, None) => (MaintenanceStatus::Ok, UrgencyReason::None),
        (Some(k), None) => (k, UrgencyReason::Km),
        (None, Some(d)) => (d, UrgencyReason::Date),
        (Some(k), Some(d)) if k >= d => (k, UrgencyReason::Km),
        (Some(_), Some(d)) => (d, UrgencyReason::Date),
    }
}

/// Worst status among the items, or OK when there are none.
pub fn aggregate(items: &[ItemStatus]) -> MaintenanceStatus {
    items
        .iter()
        .map(|i| i.status)
        .max()
        .unwrap_or(MaintenanceStatus::Ok)
}

/// Computes maintenance status for a vehicle from its rules and service
/// history. Stateless; `as_of` is always supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCalculator;

impl StatusCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(
        &self,
        snapshot: &AssetSnapshot,
        rules: &[MaintenanceRule],
        events: &[ServiceEvent],
        as_of: NaiveDate,
    ) -> Report {
        let items: Vec<ItemStatus> = rules
            .iter()
            .map(|rule| self.item_status(snapshot, rule, events, as_of))
            .collect();

        let status = aggregate(&items);
        tracing::debug!(
            items = items.len(),
            status = %status,
            %as_of,
            "Calculated maintenance report"
        );

        Report {
            current_odo: snapshot.current_odo,
            report_date: as_of,
            items,
            status,
        }
    }

    fn item_status(
        &self,
        snapshot: &AssetSnapshot,
        rule: &MaintenanceRule,
        events: &[ServiceEvent],
        as_of: NaiveDate,
    ) -> ItemStatus {
        let last = latest_event(rule, events);

        let (baseline_km, baseline_date) = match last {
            Some(e) => (e.performed_at_km, e.performed_at_date),
            None => (snapshot.initial_odo, snapshot.acquired_on),
        };

        let km = rule
            .interval_km
            .map(|interval| km_path(interval, baseline_km, snapshot.current_odo));
        let date = rule
            .interval_months
            .map(|interval| date_path(interval, baseline_date, as_of));

        let (status, urgency_reason) = combine(km.map(|p| p.status), date.map(|p| p.status));

        tracing::trace!(
            rule_id = rule.id,
            item = %rule.item_name,
            baseline_km,
            %baseline_date,
            from_event = last.is_some(),
            status = %status,
            "Evaluated maintenance item"
        );

        ItemStatus {
            rule_id: rule.id,
            item_name: rule.item_name.clone(),
            kind: rule.kind,
            last_performed_km: km.and(last).map(|e| e.performed_at_km),
            next_due_km: km.map(|p| p.next_due),
            remaining_km: km.map(|p| p.remaining),
            last_performed_date: date.and(last).map(|e| e.performed_at_date),
            next_due_date: date.map(|p| p.next_due),
            remaining_days: date.map(|p| p.remaining),
            status,
            urgency_reason,
        }
    }
}
