use super::service::VehicleStatus;
use crate::config::DisplayConfig;
use crate::error::Result;
use crate::models::{ItemStatus, MaintenanceKind, MaintenanceStatus, ServiceEvent, UrgencyReason};

/// Render a vehicle status report as plain text.
pub fn render_status(status: &VehicleStatus, display: &DisplayConfig) -> String {
    let vehicle = &status.vehicle;
    let report = &status.report;

    let mut lines = vec![
        format!("{} ({})", vehicle.name, vehicle.license_plate),
        format!(
            "Odometer: {} km | Report date: {}",
            format_km(report.current_odo),
            report.report_date
        ),
    ];
    if let Some(profile) = &status.profile {
        lines.push(format!("Profile: {}", profile.name));
    }
    lines.push(format!("Status: {} {}", report.status.symbol(), report.status));
    lines.push(String::new());

    if report.items.is_empty() {
        lines.push("No maintenance items configured for this vehicle.".to_string());
        return lines.join("\n");
    }

    let overdue = report.items_with_status(MaintenanceStatus::Overdue);
    let due_soon = report.items_with_status(MaintenanceStatus::DueSoon);

    push_section(&mut lines, "OVERDUE", &overdue);
    push_section(&mut lines, "DUE SOON", &due_soon);

    if overdue.is_empty() && due_soon.is_empty() {
        lines.push(format!(
            "{} All {} maintenance items are OK.",
            MaintenanceStatus::Ok.symbol(),
            report.items.len()
        ));
        lines.push(String::new());
    }

    if display.show_ok_items {
        let ok = report.items_with_status(MaintenanceStatus::Ok);
        push_section(&mut lines, "OK", &ok);
    }

    lines.push(legend());
    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[&ItemStatus]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("{} ({})", title, items.len()));
    for item in items {
        lines.push(format!(
            "  {} {}: {}",
            item.kind.marker(),
            item.item_name,
            describe_due(item)
        ));
    }
    lines.push(String::new());
}

/// Describe how far an item is from its due point along the path that
/// decided its status.
fn describe_due(item: &ItemStatus) -> String {
    match item.urgency_reason {
        UrgencyReason::Km => match (item.remaining_km, item.next_due_km) {
            (Some(remaining), Some(next)) if remaining <= 0 => format!(
                "exceeded by {} km (due at {} km)",
                format_km(-remaining),
                format_km(next)
            ),
            (Some(remaining), Some(next)) => format!(
                "{} km left (due at {} km)",
                format_km(remaining),
                format_km(next)
            ),
            _ => "no km schedule".to_string(),
        },
        UrgencyReason::Date => match (item.remaining_days, item.next_due_date) {
            (Some(days), Some(next)) if days <= 0 => {
                format!("exceeded by {} days (due {})", -days, next)
            }
            (Some(days), Some(next)) => format!("{} days left (due {})", days, next),
            _ => "no calendar schedule".to_string(),
        },
        UrgencyReason::None => "no interval set".to_string(),
    }
}

fn legend() -> String {
    MaintenanceKind::all()
        .iter()
        .map(|k| format!("{} {}", k.marker(), k))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Render a vehicle status report as pretty-printed JSON.
pub fn render_status_json(status: &VehicleStatus) -> Result<String> {
    Ok(serde_json::to_string_pretty(status)?)
}

/// Render service history, newest first as given.
pub fn render_events(events: &[ServiceEvent], display: &DisplayConfig) -> String {
    if events.is_empty() {
        return "No service history recorded.".to_string();
    }

    events
        .iter()
        .map(|e| {
            let mut line = format!(
                "#{:<4} {}  {:>9} km  {}",
                e.id,
                e.performed_at_date,
                format_km(e.performed_at_km),
                e.item_name
            );
            if let Some(cost) = e.cost {
                line.push_str(&format!("  {:.0} {}", cost, display.currency));
            }
            if let Some(note) = &e.note {
                line.push_str(&format!("  ({})", note));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a distance with thousands separators.
pub fn format_km(km: i64) -> String {
    let digits = km.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if km < 0 {
        out.insert(0, '-');
    }
    out
}
