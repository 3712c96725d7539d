use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Option<i64>,
    pub name: String,
    pub license_plate: String,
    pub current_odo: i64,
    pub initial_odo: i64,
    pub purchase_date: NaiveDate,
    pub profile_id: Option<i64>,
}

impl Vehicle {
    /// A freshly acquired vehicle starts with its odometer at the initial reading.
    pub fn new(
        name: impl Into<String>,
        license_plate: impl Into<String>,
        initial_odo: i64,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            license_plate: license_plate.into(),
            current_odo: initial_odo,
            initial_odo,
            purchase_date,
            profile_id: None,
        }
    }

    pub fn snapshot(&self) -> AssetSnapshot {
        AssetSnapshot {
            current_odo: self.current_odo,
            initial_odo: self.initial_odo,
            acquired_on: self.purchase_date,
        }
    }
}

/// Odometer and acquisition values the status calculation works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub current_odo: i64,
    pub initial_odo: i64,
    pub acquired_on: NaiveDate,
}

/// Normalize a license plate for comparison: spaces and dashes are dropped
/// and letters lowercased, so "59A1-12345" and "59a1 12345" are equal.
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vehicle_starts_at_initial_odo() {
        let v = Vehicle::new(
            "Airblade",
            "59A1-12345",
            120,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        assert_eq!(v.current_odo, 120);
        let snap = v.snapshot();
        assert_eq!(snap.initial_odo, 120);
        assert_eq!(snap.acquired_on, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn plates_compare_without_separators() {
        assert_eq!(normalize_plate("59A1-12345"), "59a112345");
        assert_eq!(normalize_plate(" 59a1 123-45 "), "59a112345");
        assert_ne!(normalize_plate("59A1-12345"), normalize_plate("59A1-12346"));
    }
}
