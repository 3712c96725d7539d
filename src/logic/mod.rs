pub mod calculator;
pub mod calendar;
pub mod render;
pub mod seeds;
pub mod service;

pub use service::{MaintenanceService, NewVehicle};
