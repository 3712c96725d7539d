use super::calculator::StatusCalculator;
use super::seeds;
use crate::config::Config;
use crate::db::Database;
use crate::error::{MaintrackError, Result};
use crate::models::{
    normalize_plate, MaintenanceProfile, MaintenanceRule, NewRule, NewServiceEvent, Report,
    ServiceEvent, Vehicle,
};
use chrono::NaiveDate;
use serde::Serialize;

const MAX_ITEM_NAME_LEN: usize = 100;
const MAX_PLATE_LEN: usize = 20;
const MAX_NOTE_LEN: usize = 500;
/// Upper bound for odometer readings and km intervals
pub const MAX_KM: i64 = 10_000_000;

/// A vehicle together with its computed maintenance report.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleStatus {
    pub vehicle: Vehicle,
    pub profile: Option<MaintenanceProfile>,
    pub report: Report,
}

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub license_plate: String,
    pub initial_odo: i64,
    pub purchase_date: NaiveDate,
    /// Profile to bind; the configured default is used when absent
    pub profile_code: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub profiles_created: usize,
    pub rules_created: usize,
}

/// Loads vehicles, rules and service history from the database, validates
/// user input and runs the status calculator.
pub struct MaintenanceService {
    db: Database,
    calculator: StatusCalculator,
    default_profile: String,
}

impl MaintenanceService {
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            db,
            calculator: StatusCalculator::new(),
            default_profile: config.garage.default_profile.clone(),
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    // Status

    pub fn status(&self, vehicle_id: i64, as_of: NaiveDate) -> Result<VehicleStatus> {
        let vehicle = self.get_vehicle(vehicle_id)?;
        let profile = match vehicle.profile_id {
            Some(id) => self.db.get_profile(id)?,
            None => None,
        };

        let rules = self.db.get_rules_for_vehicle(vehicle_id)?;
        let events = self.db.get_events_for_vehicle(vehicle_id)?;

        let report = self
            .calculator
            .calculate(&vehicle.snapshot(), &rules, &events, as_of);

        Ok(VehicleStatus {
            vehicle,
            profile,
            report,
        })
    }

    // Vehicles

    pub fn get_vehicle(&self, id: i64) -> Result<Vehicle> {
        self.db
            .get_vehicle(id)?
            .ok_or_else(|| MaintrackError::NotFound(format!("Vehicle with ID {} not found", id)))
    }

    pub fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.db.list_vehicles()
    }

    pub fn find_vehicle_by_plate(&self, plate: &str) -> Result<Option<Vehicle>> {
        let wanted = normalize_plate(plate);
        Ok(self
            .db
            .list_vehicles()?
            .into_iter()
            .find(|v| normalize_plate(&v.license_plate) == wanted))
    }

    /// Look a vehicle up by numeric id, falling back to its license plate.
    pub fn resolve_vehicle(&self, key: &str) -> Result<Vehicle> {
        if let Ok(id) = key.trim().parse::<i64>() {
            if let Some(vehicle) = self.db.get_vehicle(id)? {
                return Ok(vehicle);
            }
        }

        self.find_vehicle_by_plate(key)?.ok_or_else(|| {
            MaintrackError::NotFound(format!("No vehicle with ID or plate '{}'", key))
        })
    }

    pub fn create_vehicle(&self, new_vehicle: NewVehicle) -> Result<Vehicle> {
        let name = new_vehicle.name.trim();
        let plate = new_vehicle.license_plate.trim();

        validate_name("Vehicle name", name, MAX_ITEM_NAME_LEN)?;
        validate_name("License plate", plate, MAX_PLATE_LEN)?;
        validate_km("Initial odometer", new_vehicle.initial_odo)?;
        if self.find_vehicle_by_plate(plate)?.is_some() {
            return Err(MaintrackError::InvalidData(format!(
                "A vehicle with plate '{}' already exists",
                plate
            )));
        }

        let vehicle = Vehicle::new(
            name,
            plate,
            new_vehicle.initial_odo,
            new_vehicle.purchase_date,
        );
        let id = self.db.create_vehicle(&vehicle)?;
        tracing::info!(vehicle_id = id, plate = %plate, "Created vehicle");

        match new_vehicle.profile_code {
            Some(code) => {
                self.bind_profile(id, &code)?;
            }
            None => self.assign_default_profile(id)?,
        }

        self.get_vehicle(id)
    }

    pub fn update_odometer(&self, vehicle_id: i64, km: i64) -> Result<Vehicle> {
        validate_km("Odometer reading", km)?;

        let vehicle = self.get_vehicle(vehicle_id)?;
        if km < vehicle.current_odo {
            tracing::warn!(
                vehicle_id,
                previous = vehicle.current_odo,
                new = km,
                "Odometer reading moved backward"
            );
        }

        self.db.update_odometer(vehicle_id, km)?;
        tracing::info!(vehicle_id, km, "Updated odometer");

        self.get_vehicle(vehicle_id)
    }

    // Profiles

    pub fn list_profiles(&self) -> Result<Vec<MaintenanceProfile>> {
        self.db.list_profiles()
    }

    /// Bind the configured default profile unless the vehicle already has one.
    pub fn assign_default_profile(&self, vehicle_id: i64) -> Result<()> {
        let vehicle = self.get_vehicle(vehicle_id)?;
        if vehicle.profile_id.is_some() {
            return Ok(());
        }

        let code = self.default_profile.clone();
        self.bind_profile(vehicle_id, &code)?;
        Ok(())
    }

    pub fn bind_profile(&self, vehicle_id: i64, code: &str) -> Result<MaintenanceProfile> {
        self.get_vehicle(vehicle_id)?;
        let profile = self.ensure_profile(code)?;
        let profile_id = profile
            .id
            .ok_or_else(|| MaintrackError::InvalidData("Profile has no ID".into()))?;

        self.db.bind_profile(vehicle_id, profile_id)?;
        tracing::info!(vehicle_id, profile = %profile.code, "Bound maintenance profile");

        Ok(profile)
    }

    /// Fetch a profile by code, creating it from the built-in catalogue on
    /// first use.
    fn ensure_profile(&self, code: &str) -> Result<MaintenanceProfile> {
        if let Some(profile) = self.db.get_profile_by_code(code)? {
            return Ok(profile);
        }

        let seed = seeds::find_profile(code).ok_or_else(|| {
            MaintrackError::NotFound(format!("Maintenance profile '{}' not found", code))
        })?;
        let (profile, _) = self.create_profile_from_seed(seed)?;
        Ok(profile)
    }

    fn create_profile_from_seed(
        &self,
        seed: &seeds::ProfileSeed,
    ) -> Result<(MaintenanceProfile, usize)> {
        let mut profile = MaintenanceProfile {
            id: None,
            code: seed.code.to_string(),
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
        };
        let profile_id = self.db.create_profile(&profile)?;
        profile.id = Some(profile_id);

        let rules = seeds::rules_for(seed.code).unwrap_or(&[]);
        for rule in rules {
            self.db.create_rule(profile_id, &rule.to_new_rule())?;
        }

        tracing::info!(
            profile = %seed.code,
            rules = rules.len(),
            "Seeded maintenance profile"
        );
        Ok((profile, rules.len()))
    }

    /// Create every catalogue profile that does not exist yet.
    pub fn seed(&self) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();
        for seed in seeds::PROFILES {
            if self.db.get_profile_by_code(seed.code)?.is_some() {
                tracing::debug!(profile = %seed.code, "Profile already present, skipping");
                continue;
            }
            let (_, rules) = self.create_profile_from_seed(seed)?;
            summary.profiles_created += 1;
            summary.rules_created += rules;
        }
        Ok(summary)
    }

    // Rules

    pub fn list_rules(&self, vehicle_id: i64) -> Result<Vec<MaintenanceRule>> {
        self.get_vehicle(vehicle_id)?;
        self.db.get_rules_for_vehicle(vehicle_id)
    }

    /// Add a rule to the profile of the given vehicle.
    pub fn add_rule(&self, vehicle_id: i64, rule: NewRule) -> Result<MaintenanceRule> {
        let vehicle = self.get_vehicle(vehicle_id)?;
        let profile_id = vehicle.profile_id.ok_or_else(|| {
            MaintrackError::NotFound(
                "Vehicle does not have a maintenance profile assigned".into(),
            )
        })?;

        let rule = NewRule {
            item_name: rule.item_name.trim().to_string(),
            ..rule
        };
        validate_name("Item name", &rule.item_name, MAX_ITEM_NAME_LEN)?;
        if matches!(rule.interval_km, Some(km) if km < 1) {
            return Err(MaintrackError::InvalidData(
                "Km interval must be at least 1".into(),
            ));
        }
        if let Some(km) = rule.interval_km {
            validate_km("Km interval", km)?;
        }
        if matches!(rule.interval_months, Some(0)) {
            return Err(MaintrackError::InvalidData(
                "Month interval must be at least 1".into(),
            ));
        }

        let id = self.db.create_rule(profile_id, &rule)?;
        tracing::info!(rule_id = id, profile_id, item = %rule.item_name, "Created rule");

        self.db
            .get_rule(id)?
            .ok_or_else(|| MaintrackError::NotFound(format!("Rule with ID {} not found", id)))
    }

    pub fn delete_rule(&self, id: i64) -> Result<()> {
        if !self.db.delete_rule(id)? {
            return Err(MaintrackError::NotFound(format!(
                "Maintenance rule with ID {} not found",
                id
            )));
        }
        tracing::info!(rule_id = id, "Deleted rule");
        Ok(())
    }

    // Service history

    pub fn list_events(&self, vehicle_id: i64) -> Result<Vec<ServiceEvent>> {
        self.get_vehicle(vehicle_id)?;
        self.db.get_events_for_vehicle(vehicle_id)
    }

    /// Record performed maintenance. When the event references a rule and
    /// has no item name of its own, the rule's name is used.
    pub fn log_service(&self, event: NewServiceEvent) -> Result<ServiceEvent> {
        self.get_vehicle(event.vehicle_id)?;

        let mut event = NewServiceEvent {
            item_name: event.item_name.trim().to_string(),
            ..event
        };

        if let Some(rule_id) = event.rule_id {
            let rule = self.db.get_rule(rule_id)?.ok_or_else(|| {
                MaintrackError::NotFound(format!(
                    "Maintenance rule with ID {} not found",
                    rule_id
                ))
            })?;
            let applies = self
                .db
                .get_rules_for_vehicle(event.vehicle_id)?
                .iter()
                .any(|r| r.id == rule_id);
            if !applies {
                return Err(MaintrackError::InvalidData(format!(
                    "Maintenance rule {} is not part of this vehicle's profile",
                    rule_id
                )));
            }
            if event.item_name.is_empty() {
                event.item_name = rule.item_name;
            }
        }

        validate_name("Item name", &event.item_name, MAX_ITEM_NAME_LEN)?;
        validate_km("Odometer reading", event.performed_at_km)?;
        if matches!(event.cost, Some(c) if c < 0.0 || !c.is_finite()) {
            return Err(MaintrackError::InvalidData(
                "Cost must be a non-negative amount".into(),
            ));
        }
        if matches!(&event.note, Some(n) if n.chars().count() > MAX_NOTE_LEN) {
            return Err(MaintrackError::InvalidData(format!(
                "Note is longer than {} characters",
                MAX_NOTE_LEN
            )));
        }

        let id = self.db.create_event(&event)?;
        tracing::info!(
            event_id = id,
            vehicle_id = event.vehicle_id,
            item = %event.item_name,
            km = event.performed_at_km,
            "Logged service"
        );

        let mut logged = ServiceEvent::new(
            id,
            event.item_name,
            event.performed_at_km,
            event.performed_at_date,
        );
        if let Some(rule_id) = event.rule_id {
            logged = logged.for_rule(rule_id);
        }
        if let Some(cost) = event.cost {
            logged = logged.with_cost(cost);
        }
        if let Some(note) = &event.note {
            logged = logged.with_note(note);
        }
        Ok(logged)
    }

    pub fn delete_event(&self, id: i64) -> Result<()> {
        if !self.db.delete_event(id)? {
            return Err(MaintrackError::NotFound(format!(
                "Service log with ID {} not found",
                id
            )));
        }
        tracing::info!(event_id = id, "Deleted service log");
        Ok(())
    }
}

fn validate_km(field: &str, km: i64) -> Result<()> {
    if km < 0 {
        return Err(MaintrackError::InvalidData(format!("{} cannot be negative", field)));
    }
    if km > MAX_KM {
        return Err(MaintrackError::InvalidData(format!(
            "{} cannot exceed {} km",
            field, MAX_KM
        )));
    }
    Ok(())
}

fn validate_name(field: &str, value: &str, max_len: usize) -> Result<()> {
    if value.is_empty() {
        return Err(MaintrackError::InvalidData(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > max_len {
        return Err(MaintrackError::InvalidData(format!(
            "{} is longer than {} characters",
            field, max_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaintenanceKind, MaintenanceStatus, UrgencyReason};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> MaintenanceService {
        let db = Database::open_in_memory().unwrap();
        MaintenanceService::new(db, &Config::default())
    }

    fn airblade(svc: &MaintenanceService) -> Vehicle {
        svc.create_vehicle(NewVehicle {
            name: "Honda Airblade 2024".into(),
            license_plate: "59A1-12345".into(),
            initial_odo: 0,
            purchase_date: date(2024, 1, 15),
            profile_code: None,
        })
        .unwrap()
    }

    fn oil_log(vehicle_id: i64, rule_id: Option<i64>, km: i64, on: NaiveDate) -> NewServiceEvent {
        NewServiceEvent {
            vehicle_id,
            rule_id,
            item_name: "Engine oil".into(),
            performed_at_km: km,
            performed_at_date: on,
            cost: None,
            note: None,
        }
    }

    #[test]
    fn new_vehicle_gets_default_profile() {
        let svc = service();
        let vehicle = airblade(&svc);
        assert_eq!(vehicle.current_odo, 0);
        assert!(vehicle.profile_id.is_some());

        let rules = svc.list_rules(vehicle.id.unwrap()).unwrap();
        assert_eq!(rules.len(), seeds::SEVERE_SCOOTER_RULES.len());
    }

    #[test]
    fn default_profile_is_seeded_once() {
        let svc = service();
        airblade(&svc);
        svc.create_vehicle(NewVehicle {
            name: "Second".into(),
            license_plate: "59B2-22222".into(),
            initial_odo: 100,
            purchase_date: date(2024, 3, 1),
            profile_code: None,
        })
        .unwrap();

        assert_eq!(svc.list_profiles().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_plate_is_rejected_ignoring_format() {
        let svc = service();
        airblade(&svc);
        let err = svc
            .create_vehicle(NewVehicle {
                name: "Copy".into(),
                license_plate: "59a1 12345".into(),
                initial_odo: 0,
                purchase_date: date(2024, 1, 15),
                profile_code: None,
            })
            .unwrap_err();
        assert!(matches!(err, MaintrackError::InvalidData(_)));
    }

    #[test]
    fn unknown_profile_code_is_not_found() {
        let svc = service();
        let vehicle = airblade(&svc);
        let err = svc
            .bind_profile(vehicle.id.unwrap(), "NO_SUCH_PROFILE")
            .unwrap_err();
        assert!(matches!(err, MaintrackError::NotFound(_)));
    }

    #[test]
    fn resolve_vehicle_by_id_or_plate() {
        let svc = service();
        let vehicle = airblade(&svc);
        let id = vehicle.id.unwrap();

        assert_eq!(svc.resolve_vehicle(&id.to_string()).unwrap().id, Some(id));
        assert_eq!(svc.resolve_vehicle("59a1-12345").unwrap().id, Some(id));
        assert!(matches!(
            svc.resolve_vehicle("00X0-00000"),
            Err(MaintrackError::NotFound(_))
        ));
    }

    #[test]
    fn status_for_fresh_vehicle_is_ok() {
        let svc = service();
        let vehicle = airblade(&svc);
        let status = svc.status(vehicle.id.unwrap(), date(2024, 2, 1)).unwrap();

        assert_eq!(status.report.status, MaintenanceStatus::Ok);
        assert_eq!(status.report.items.len(), seeds::SEVERE_SCOOTER_RULES.len());
        assert_eq!(status.report.report_date, date(2024, 2, 1));
        assert_eq!(
            status.profile.map(|p| p.code),
            Some(seeds::DEFAULT_PROFILE_CODE.to_string())
        );
    }

    #[test]
    fn odometer_update_changes_status() {
        let svc = service();
        let id = airblade(&svc).id.unwrap();

        svc.update_odometer(id, 1950).unwrap();
        let status = svc.status(id, date(2024, 2, 1)).unwrap();

        let oil = status
            .report
            .items
            .iter()
            .find(|i| i.item_name == "Engine oil")
            .unwrap();
        assert_eq!(oil.status, MaintenanceStatus::DueSoon);
        assert_eq!(oil.remaining_km, Some(50));
        // Lights and horn every 1000 km
        assert_eq!(status.report.status, MaintenanceStatus::Overdue);
    }

    #[test]
    fn negative_odometer_is_rejected() {
        let svc = service();
        let id = airblade(&svc).id.unwrap();
        assert!(matches!(
            svc.update_odometer(id, -1),
            Err(MaintrackError::InvalidData(_))
        ));
    }

    #[test]
    fn logged_service_moves_baseline() {
        let svc = service();
        let id = airblade(&svc).id.unwrap();
        let rule = svc
            .list_rules(id)
            .unwrap()
            .into_iter()
            .find(|r| r.item_name == "Engine oil")
            .unwrap();

        svc.update_odometer(id, 2100).unwrap();
        svc.log_service(oil_log(id, Some(rule.id), 2050, date(2024, 3, 1)))
            .unwrap();

        let status = svc.status(id, date(2024, 3, 2)).unwrap();
        let oil = status
            .report
            .items
            .iter()
            .find(|i| i.rule_id == rule.id)
            .unwrap();
        assert_eq!(oil.last_performed_km, Some(2050));
        assert_eq!(oil.next_due_km, Some(4050));
        assert_eq!(oil.status, MaintenanceStatus::Ok);
    }

    #[test]
    fn unlinked_log_matches_by_name() {
        let svc = service();
        let id = airblade(&svc).id.unwrap();
        svc.log_service(NewServiceEvent {
            item_name: "ENGINE OIL".into(),
            ..oil_log(id, None, 1500, date(2024, 2, 20))
        })
        .unwrap();

        let status = svc.status(id, date(2024, 3, 1)).unwrap();
        let oil = status
            .report
            .items
            .iter()
            .find(|i| i.item_name == "Engine oil")
            .unwrap();
        assert_eq!(oil.next_due_km, Some(3500));
    }

    #[test]
    fn log_with_rule_inherits_rule_name() {
        let svc = service();
        let id = airblade(&svc).id.unwrap();
        let rule = svc.list_rules(id).unwrap().remove(0);

        let event = svc
            .log_service(NewServiceEvent {
                item_name: "  ".into(),
                ..oil_log(id, Some(rule.id), 100, date(2024, 2, 1))
            })
            .unwrap();
        assert_eq!(event.item_name, rule.item_name);
    }

    #[test]
    fn log_validation() {
        let svc = service();
        let id = airblade(&svc).id.unwrap();

        let missing_rule = svc.log_service(oil_log(id, Some(99_999), 100, date(2024, 2, 1)));
        assert!(matches!(missing_rule, Err(MaintrackError::NotFound(_))));

        let negative_km = svc.log_service(oil_log(id, None, -5, date(2024, 2, 1)));
        assert!(matches!(negative_km, Err(MaintrackError::InvalidData(_))));

        let negative_cost = svc.log_service(NewServiceEvent {
            cost: Some(-1.0),
            ..oil_log(id, None, 100, date(2024, 2, 1))
        });
        assert!(matches!(negative_cost, Err(MaintrackError::InvalidData(_))));

        let long_note = svc.log_service(NewServiceEvent {
            note: Some("x".repeat(MAX_NOTE_LEN + 1)),
            ..oil_log(id, None, 100, date(2024, 2, 1))
        });
        assert!(matches!(long_note, Err(MaintrackError::InvalidData(_))));

        let unknown_vehicle = svc.log_service(oil_log(id + 10, None, 100, date(2024, 2, 1)));
        assert!(matches!(unknown_vehicle, Err(MaintrackError::NotFound(_))));
    }

    #[test]
    fn add_rule_validates_intervals() {
        let svc = service();
        let id = airblade(&svc).id.unwrap();

        let zero_km = svc.add_rule(
            id,
            NewRule {
                item_name: "Chain".into(),
                kind: MaintenanceKind::Clean,
                interval_km: Some(0),
                interval_months: None,
            },
        );
        assert!(matches!(zero_km, Err(MaintrackError::InvalidData(_))));

        let rule = svc
            .add_rule(
                id,
                NewRule {
                    item_name: " Registration ".into(),
                    kind: MaintenanceKind::Check,
                    interval_km: None,
                    interval_months: Some(12),
                },
            )
            .unwrap();
        assert_eq!(rule.item_name, "Registration");
        assert_eq!(rule.interval_months, Some(12));

        let status = svc.status(id, date(2025, 1, 20)).unwrap();
        let reg = status
            .report
            .items
            .iter()
            .find(|i| i.rule_id == rule.id)
            .unwrap();
        assert_eq!(reg.next_due_date, Some(date(2025, 1, 15)));
        assert_eq!(reg.status, MaintenanceStatus::Overdue);
        assert_eq!(reg.urgency_reason, UrgencyReason::Date);
    }

    #[test]
    fn rule_without_intervals_is_allowed() {
        let svc = service();
        let id = airblade(&svc).id.unwrap();
        let rule = svc
            .add_rule(
                id,
                NewRule {
                    item_name: "Mirror".into(),
                    kind: MaintenanceKind::Check,
                    interval_km: None,
                    interval_months: None,
                },
            )
            .unwrap();
        assert!(!rule.is_trackable());
    }

    #[test]
    fn km_values_above_limit_are_rejected() {
        let svc = service();
        let id = airblade(&svc).id.unwrap();

        let huge_interval = svc.add_rule(
            id,
            NewRule {
                item_name: "Chain".into(),
                kind: MaintenanceKind::Clean,
                interval_km: Some(i64::MAX),
                interval_months: None,
            },
        );
        assert!(matches!(huge_interval, Err(MaintrackError::InvalidData(_))));

        assert!(matches!(
            svc.update_odometer(id, MAX_KM + 1),
            Err(MaintrackError::InvalidData(_))
        ));
        assert!(matches!(
            svc.log_service(oil_log(id, None, i64::MAX, date(2024, 2, 1))),
            Err(MaintrackError::InvalidData(_))
        ));
        assert!(matches!(
            svc.create_vehicle(NewVehicle {
                name: "Odd".into(),
                license_plate: "59C3-33333".into(),
                initial_odo: MAX_KM + 1,
                purchase_date: date(2024, 1, 1),
                profile_code: None,
            }),
            Err(MaintrackError::InvalidData(_))
        ));

        let widest = svc
            .add_rule(
                id,
                NewRule {
                    item_name: "Frame".into(),
                    kind: MaintenanceKind::Check,
                    interval_km: Some(MAX_KM),
                    interval_months: None,
                },
            )
            .unwrap();
        svc.update_odometer(id, MAX_KM).unwrap();
        svc.log_service(NewServiceEvent {
            item_name: "Frame".into(),
            ..oil_log(id, Some(widest.id), MAX_KM, date(2024, 2, 1))
        })
        .unwrap();

        let status = svc.status(id, date(2024, 2, 1)).unwrap();
        let frame = status
            .report
            .items
            .iter()
            .find(|i| i.rule_id == widest.id)
            .unwrap();
        assert_eq!(frame.next_due_km, Some(2 * MAX_KM));
        assert_eq!(frame.status, MaintenanceStatus::Ok);
    }

    #[test]
    fn log_rejects_rule_of_another_profile() {
        let svc = service();
        let airblade_id = airblade(&svc).id.unwrap();
        let vario = svc
            .create_vehicle(NewVehicle {
                name: "Honda Vario".into(),
                license_plate: "59D4-44444".into(),
                initial_odo: 0,
                purchase_date: date(2024, 1, 1),
                profile_code: Some("HONDA_VARIO_HCM_SEVERE".into()),
            })
            .unwrap();
        let vario_rule = svc.list_rules(vario.id.unwrap()).unwrap().remove(0);

        let err = svc
            .log_service(oil_log(
                airblade_id,
                Some(vario_rule.id),
                100,
                date(2024, 2, 1),
            ))
            .unwrap_err();
        assert!(matches!(err, MaintrackError::InvalidData(_)));
        assert!(svc.list_events(airblade_id).unwrap().is_empty());
    }

    #[test]
    fn delete_missing_rows_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.delete_rule(12345),
            Err(MaintrackError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_event(12345),
            Err(MaintrackError::NotFound(_))
        ));
    }

    #[test]
    fn seed_is_idempotent() {
        let svc = service();
        let first = svc.seed().unwrap();
        assert_eq!(first.profiles_created, seeds::PROFILES.len());
        assert_eq!(
            first.rules_created,
            seeds::PROFILES.len() * seeds::SEVERE_SCOOTER_RULES.len()
        );

        let second = svc.seed().unwrap();
        assert_eq!(second, SeedSummary::default());
    }
}
