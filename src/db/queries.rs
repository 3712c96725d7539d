use crate::db::Database;
use crate::error::Result;
use crate::models::{
    MaintenanceKind, MaintenanceProfile, MaintenanceRule, NewRule, NewServiceEvent, ServiceEvent,
    Vehicle,
};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Row};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

// Profile Queries

impl Database {
    pub fn create_profile(&self, profile: &MaintenanceProfile) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO maintenance_profiles (code, name, description) VALUES (?1, ?2, ?3)",
                params![profile.code, profile.name, profile.description],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_profile(&self, id: i64) -> Result<Option<MaintenanceProfile>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM maintenance_profiles WHERE id = ?1",
                [id],
                row_to_profile,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn get_profile_by_code(&self, code: &str) -> Result<Option<MaintenanceProfile>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM maintenance_profiles WHERE code = ?1",
                [code],
                row_to_profile,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn list_profiles(&self) -> Result<Vec<MaintenanceProfile>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM maintenance_profiles ORDER BY name")?;
            let profiles = stmt
                .query_map([], row_to_profile)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(profiles)
        })
    }
}

fn row_to_profile(row: &Row) -> rusqlite::Result<MaintenanceProfile> {
    Ok(MaintenanceProfile {
        id: Some(row.get("id")?),
        code: row.get("code")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

// Rule Queries

impl Database {
    pub fn create_rule(&self, profile_id: i64, rule: &NewRule) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO maintenance_rules
                    (profile_id, item_name, kind, interval_km, interval_months)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    profile_id,
                    rule.item_name,
                    rule.kind.as_str(),
                    rule.interval_km,
                    rule.interval_months,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_rule(&self, id: i64) -> Result<Option<MaintenanceRule>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM maintenance_rules WHERE id = ?1",
                [id],
                row_to_rule,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Rules of the profile bound to the vehicle; empty when it has none.
    pub fn get_rules_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<MaintenanceRule>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT r.* FROM maintenance_rules r
                INNER JOIN vehicles v ON v.profile_id = r.profile_id
                WHERE v.id = ?1
                ORDER BY r.item_name, r.id
                "#,
            )?;
            let rules = stmt
                .query_map([vehicle_id], row_to_rule)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rules)
        })
    }

    pub fn delete_rule(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM maintenance_rules WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }
}

fn row_to_rule(row: &Row) -> rusqlite::Result<MaintenanceRule> {
    let kind_str: String = row.get("kind")?;
    let kind = MaintenanceKind::from_str(&kind_str).unwrap_or_else(|| {
        warn!(kind = %kind_str, "Unknown maintenance kind in database, defaulting to Replace");
        MaintenanceKind::Replace
    });

    Ok(MaintenanceRule {
        id: row.get("id")?,
        item_name: row.get("item_name")?,
        kind,
        interval_km: row.get("interval_km")?,
        interval_months: row.get("interval_months")?,
    })
}

// Vehicle Queries

impl Database {
    pub fn create_vehicle(&self, vehicle: &Vehicle) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO vehicles
                    (name, license_plate, current_odo, initial_odo, purchase_date, profile_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    vehicle.name,
                    vehicle.license_plate,
                    vehicle.current_odo,
                    vehicle.initial_odo,
                    vehicle.purchase_date.format(DATE_FORMAT).to_string(),
                    vehicle.profile_id,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_vehicle(&self, id: i64) -> Result<Option<Vehicle>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT * FROM vehicles WHERE id = ?1", [id], row_to_vehicle)
                .optional()
                .map_err(Into::into)
        })
    }

    pub fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM vehicles ORDER BY id")?;
            let vehicles = stmt
                .query_map([], row_to_vehicle)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(vehicles)
        })
    }

    pub fn update_odometer(&self, id: i64, current_odo: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE vehicles SET current_odo = ?1, updated_at = datetime('now') WHERE id = ?2",
                params![current_odo, id],
            )?;
            Ok(affected > 0)
        })
    }

    pub fn bind_profile(&self, vehicle_id: i64, profile_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE vehicles SET profile_id = ?1, updated_at = datetime('now') WHERE id = ?2",
                params![profile_id, vehicle_id],
            )?;
            Ok(affected > 0)
        })
    }
}

fn row_to_vehicle(row: &Row) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        license_plate: row.get("license_plate")?,
        current_odo: row.get("current_odo")?,
        initial_odo: row.get("initial_odo")?,
        purchase_date: get_date(row, "purchase_date")?,
        profile_id: row.get("profile_id")?,
    })
}

// Service Event Queries

impl Database {
    pub fn create_event(&self, event: &NewServiceEvent) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO service_events
                    (vehicle_id, rule_id, item_name, performed_at_km, performed_at_date, cost, note)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    event.vehicle_id,
                    event.rule_id,
                    event.item_name,
                    event.performed_at_km,
                    event.performed_at_date.format(DATE_FORMAT).to_string(),
                    event.cost,
                    event.note,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Full service history of a vehicle, newest first.
    pub fn get_events_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<ServiceEvent>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT * FROM service_events
                WHERE vehicle_id = ?1
                ORDER BY performed_at_date DESC, performed_at_km DESC, id DESC
                "#,
            )?;
            let events = stmt
                .query_map([vehicle_id], row_to_event)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(events)
        })
    }

    pub fn delete_event(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM service_events WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }
}

fn row_to_event(row: &Row) -> rusqlite::Result<ServiceEvent> {
    Ok(ServiceEvent {
        id: row.get("id")?,
        rule_id: row.get("rule_id")?,
        item_name: row.get("item_name")?,
        performed_at_km: row.get("performed_at_km")?,
        performed_at_date: get_date(row, "performed_at_date")?,
        cost: row.get("cost")?,
        note: row.get("note")?,
    })
}

fn get_date(row: &Row, column: &str) -> rusqlite::Result<NaiveDate> {
    let value: String = row.get(column)?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|e| {
        let idx = row.as_ref().column_index(column).unwrap_or(0);
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
