use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "maintrack", version, about = "Vehicle maintenance tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and open the database
    Check,
    /// Create the built-in maintenance profiles
    Seed,
    /// Manage vehicles
    #[command(subcommand)]
    Vehicle(VehicleCommand),
    /// Manage maintenance rules of a vehicle's profile
    #[command(subcommand)]
    Rule(RuleCommand),
    /// Record and list performed maintenance
    #[command(subcommand)]
    Log(LogCommand),
    /// List maintenance profiles
    Profiles,
    /// Show maintenance status of a vehicle
    Status {
        /// Vehicle ID or license plate
        vehicle: String,
        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    /// Register a vehicle
    Add(AddVehicleArgs),
    /// List vehicles
    List,
    /// Update the odometer reading
    Odo {
        /// Vehicle ID or license plate
        vehicle: String,
        km: i64,
    },
    /// Bind a maintenance profile by code
    Profile {
        /// Vehicle ID or license plate
        vehicle: String,
        code: String,
    },
    /// Find a vehicle by license plate
    Find { plate: String },
}

#[derive(Args)]
pub struct AddVehicleArgs {
    pub name: String,
    pub plate: String,
    /// Odometer reading at purchase
    #[arg(long, default_value_t = 0)]
    pub odo: i64,
    /// Purchase date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub purchased: Option<NaiveDate>,
    /// Profile code, defaults to the configured profile
    #[arg(long)]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum RuleCommand {
    /// List rules that apply to a vehicle
    List {
        /// Vehicle ID or license plate
        vehicle: String,
    },
    /// Add a rule to the vehicle's profile
    Add(AddRuleArgs),
    /// Delete a rule by ID
    Delete { id: i64 },
}

#[derive(Args)]
pub struct AddRuleArgs {
    /// Vehicle ID or license plate
    pub vehicle: String,
    pub item: String,
    /// replace, check or clean
    #[arg(long, default_value = "replace")]
    pub kind: String,
    #[arg(long)]
    pub km: Option<i64>,
    #[arg(long)]
    pub months: Option<u32>,
}

#[derive(Subcommand)]
pub enum LogCommand {
    /// Record performed maintenance
    Add(AddLogArgs),
    /// List service history of a vehicle
    List {
        /// Vehicle ID or license plate
        vehicle: String,
    },
    /// Delete a service log by ID
    Delete { id: i64 },
}

#[derive(Args)]
pub struct AddLogArgs {
    /// Vehicle ID or license plate
    pub vehicle: String,
    /// Item name; may be omitted when --rule is given
    #[arg(default_value = "")]
    pub item: String,
    /// Link the log to a rule ID
    #[arg(long)]
    pub rule: Option<i64>,
    /// Odometer at service time, defaults to the current reading
    #[arg(long)]
    pub km: Option<i64>,
    /// Service date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub cost: Option<f64>,
    #[arg(long)]
    pub note: Option<String>,
}
