use crate::models::{MaintenanceKind, NewRule};

/// Profile bound to new vehicles when the config does not name another one.
pub const DEFAULT_PROFILE_CODE: &str = "HONDA_AIRBLADE_HCM_SEVERE";

pub struct ProfileSeed {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub struct RuleSeed {
    pub item_name: &'static str,
    pub kind: MaintenanceKind,
    pub interval_km: Option<i64>,
    pub interval_months: Option<u32>,
}

impl RuleSeed {
    pub fn to_new_rule(&self) -> NewRule {
        NewRule {
            item_name: self.item_name.to_string(),
            kind: self.kind,
            interval_km: self.interval_km,
            interval_months: self.interval_months,
        }
    }
}

const fn km(item_name: &'static str, kind: MaintenanceKind, interval_km: i64) -> RuleSeed {
    RuleSeed {
        item_name,
        kind,
        interval_km: Some(interval_km),
        interval_months: None,
    }
}

const fn km_or_months(
    item_name: &'static str,
    kind: MaintenanceKind,
    interval_km: i64,
    interval_months: u32,
) -> RuleSeed {
    RuleSeed {
        item_name,
        kind,
        interval_km: Some(interval_km),
        interval_months: Some(interval_months),
    }
}

use crate::models::MaintenanceKind::{Check, Clean, Replace};

/// Scooter schedule for severe city conditions: dust, stop-and-go traffic,
/// short trips and flooded streets. Intervals are shorter than the
/// manufacturer's standard schedule.
pub const SEVERE_SCOOTER_RULES: &[RuleSeed] = &[
    // Engine and fuel system
    km("Engine oil", Replace, 2000),
    km("Engine oil (full drain)", Replace, 8000),
    km("Air filter", Replace, 10000),
    km("Spark plug", Replace, 12000),
    km("CVT cleaning", Clean, 5000),
    km("Injector and combustion chamber", Clean, 8000),
    km("Crankcase breather", Clean, 6000),
    km("Oil strainer screen", Clean, 12000),
    km("Valve clearance", Check, 10000),
    km("Engine idle speed", Check, 8000),
    // Cooling
    km("Coolant level", Check, 5000),
    km_or_months("Coolant", Replace, 20000, 24),
    // Transmission
    km("Drive belt", Check, 8000),
    km("Drive belt", Replace, 24000),
    km_or_months("Final drive oil", Replace, 6000, 6),
    // Brakes
    km_or_months("Brake fluid", Replace, 20000, 24),
    km("Brake pads", Check, 4000),
    // Electrical
    km("Battery", Check, 6000),
    km("Lights and horn", Check, 1000),
    // Chassis
    km("Side stand", Check, 4000),
    km("Suspension", Check, 10000),
    km("Tire pressure and wear", Check, 2000),
    km("Steering head bearings", Check, 12000),
];

pub const PROFILES: &[ProfileSeed] = &[
    ProfileSeed {
        code: "HONDA_AIRBLADE_HCM_SEVERE",
        name: "Honda Airblade (HCM - Severe)",
        description: "Severe city conditions schedule for the Honda Airblade",
    },
    ProfileSeed {
        code: "HONDA_VARIO_HCM_SEVERE",
        name: "Honda Vario/Click (HCM - Severe)",
        description: "Severe city conditions schedule for the Honda Vario and Click",
    },
    ProfileSeed {
        code: "GENERIC_SCOOTER_HCM",
        name: "Generic scooter (Vision/Lead)",
        description: "Shared schedule for common Honda scooters in city use",
    },
];

pub fn find_profile(code: &str) -> Option<&'static ProfileSeed> {
    PROFILES.iter().find(|p| p.code == code)
}

/// Rules seeded for a catalogue profile. Every built-in profile currently
/// shares the severe scooter schedule.
pub fn rules_for(code: &str) -> Option<&'static [RuleSeed]> {
    find_profile(code).map(|_| SEVERE_SCOOTER_RULES)
}
