mod cli;
mod config;
mod db;
mod error;
mod logic;
mod models;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, LogCommand, RuleCommand, VehicleCommand};
use config::Config;
use db::Database;
use logic::render::{format_km, render_events, render_status, render_status_json};
use logic::{seeds, MaintenanceService, NewVehicle};
use models::{MaintenanceKind, NewRule, NewServiceEvent, Vehicle};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init = cli.command {
        Config::setup_interactive().context("Interactive setup failed")?;
        return Ok(());
    }

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let db = Database::open(cli.data_dir.as_ref()).context("Failed to open database")?;
    let service = MaintenanceService::new(db, &config);

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Init => {}
        Commands::Check => run_check(&service, &config)?,
        Commands::Seed => {
            let summary = service.seed()?;
            println!(
                "Seeded {} profiles with {} rules.",
                summary.profiles_created, summary.rules_created
            );
        }
        Commands::Profiles => {
            let profiles = service.list_profiles()?;
            if profiles.is_empty() {
                println!("No profiles yet. Run `maintrack seed` to create the built-in ones.");
            }
            for p in profiles {
                println!("#{:<4} {:<28} {}", p.id.unwrap_or_default(), p.code, p.name);
            }
        }
        Commands::Vehicle(cmd) => run_vehicle(&service, cmd, today)?,
        Commands::Rule(cmd) => run_rule(&service, cmd)?,
        Commands::Log(cmd) => run_log(&service, &config, cmd, today)?,
        Commands::Status {
            vehicle,
            as_of,
            json,
        } => {
            let vehicle = service.resolve_vehicle(&vehicle)?;
            let vehicle_id = vehicle_id(&vehicle)?;
            let status = service
                .status(vehicle_id, as_of.unwrap_or(today))
                .with_context(|| format!("Failed to compute status for {}", vehicle.name))?;

            if json {
                println!("{}", render_status_json(&status)?);
            } else {
                println!("{}", render_status(&status, &config.display));
            }
        }
    }

    Ok(())
}

fn vehicle_id(vehicle: &Vehicle) -> anyhow::Result<i64> {
    vehicle
        .id
        .with_context(|| format!("Vehicle '{}' has no ID", vehicle.name))
}

fn run_check(service: &MaintenanceService, config: &Config) -> anyhow::Result<()> {
    println!("Database: {}", service.db().path().display());
    println!("Schema version: {}", db::migrations::latest_version());

    let known = seeds::find_profile(&config.garage.default_profile).is_some()
        || service
            .db()
            .get_profile_by_code(&config.garage.default_profile)?
            .is_some();
    if !known {
        anyhow::bail!(
            "Default profile '{}' is neither built in nor in the database",
            config.garage.default_profile
        );
    }
    println!("Default profile: {}", config.garage.default_profile);

    println!("Vehicles: {}", service.list_vehicles()?.len());
    println!("Profiles: {}", service.list_profiles()?.len());
    println!("Configuration OK");
    Ok(())
}

fn print_vehicle(v: &Vehicle) {
    println!(
        "#{:<4} {:<24} {:<12} {:>9} km  since {}",
        v.id.unwrap_or_default(),
        v.name,
        v.license_plate,
        format_km(v.current_odo),
        v.purchase_date
    );
}

fn run_vehicle(
    service: &MaintenanceService,
    cmd: VehicleCommand,
    today: chrono::NaiveDate,
) -> anyhow::Result<()> {
    match cmd {
        VehicleCommand::Add(args) => {
            let vehicle = service.create_vehicle(NewVehicle {
                name: args.name,
                license_plate: args.plate,
                initial_odo: args.odo,
                purchase_date: args.purchased.unwrap_or(today),
                profile_code: args.profile,
            })?;
            println!("Created vehicle:");
            print_vehicle(&vehicle);
        }
        VehicleCommand::List => {
            let vehicles = service.list_vehicles()?;
            if vehicles.is_empty() {
                println!("No vehicles registered.");
            }
            vehicles.iter().for_each(print_vehicle);
        }
        VehicleCommand::Odo { vehicle, km } => {
            let vehicle = service.resolve_vehicle(&vehicle)?;
            let updated = service.update_odometer(vehicle_id(&vehicle)?, km)?;
            println!(
                "{}: {} km -> {} km",
                updated.name,
                format_km(vehicle.current_odo),
                format_km(updated.current_odo)
            );
        }
        VehicleCommand::Profile { vehicle, code } => {
            let vehicle = service.resolve_vehicle(&vehicle)?;
            let profile = service.bind_profile(vehicle_id(&vehicle)?, &code)?;
            println!("{} now follows {}", vehicle.name, profile.name);
        }
        VehicleCommand::Find { plate } => match service.find_vehicle_by_plate(&plate)? {
            Some(v) => print_vehicle(&v),
            None => println!("No vehicle with plate '{}'", plate),
        },
    }
    Ok(())
}

fn run_rule(service: &MaintenanceService, cmd: RuleCommand) -> anyhow::Result<()> {
    match cmd {
        RuleCommand::List { vehicle } => {
            let vehicle = service.resolve_vehicle(&vehicle)?;
            let rules = service.list_rules(vehicle_id(&vehicle)?)?;
            if rules.is_empty() {
                println!("No rules for {}.", vehicle.name);
            }
            for r in rules {
                let km = r
                    .interval_km
                    .map(|k| format!("{} km", format_km(k)))
                    .unwrap_or_else(|| "-".into());
                let months = r
                    .interval_months
                    .map(|m| format!("{} months", m))
                    .unwrap_or_else(|| "-".into());
                let untracked = if r.is_trackable() { "" } else { "  (no interval)" };
                println!(
                    "#{:<4} {} {:<34} {:>10}  {:>10}{}",
                    r.id,
                    r.kind.marker(),
                    r.item_name,
                    km,
                    months,
                    untracked
                );
            }
        }
        RuleCommand::Add(args) => {
            let kind = MaintenanceKind::from_str(&args.kind).with_context(|| {
                format!("Unknown kind '{}', expected replace, check or clean", args.kind)
            })?;
            let vehicle = service.resolve_vehicle(&args.vehicle)?;
            let rule = service.add_rule(
                vehicle_id(&vehicle)?,
                NewRule {
                    item_name: args.item,
                    kind,
                    interval_km: args.km,
                    interval_months: args.months,
                },
            )?;
            println!("Created rule #{} {}", rule.id, rule.item_name);
        }
        RuleCommand::Delete { id } => {
            service.delete_rule(id)?;
            println!("Deleted rule #{}", id);
        }
    }
    Ok(())
}

fn run_log(
    service: &MaintenanceService,
    config: &Config,
    cmd: LogCommand,
    today: chrono::NaiveDate,
) -> anyhow::Result<()> {
    match cmd {
        LogCommand::Add(args) => {
            let vehicle = service.resolve_vehicle(&args.vehicle)?;
            let event = service.log_service(NewServiceEvent {
                vehicle_id: vehicle_id(&vehicle)?,
                rule_id: args.rule,
                item_name: args.item,
                performed_at_km: args.km.unwrap_or(vehicle.current_odo),
                performed_at_date: args.date.unwrap_or(today),
                cost: args.cost,
                note: args.note,
            })?;
            println!(
                "Logged #{} {} at {} km on {}",
                event.id,
                event.item_name,
                format_km(event.performed_at_km),
                event.performed_at_date
            );
        }
        LogCommand::List { vehicle } => {
            let vehicle = service.resolve_vehicle(&vehicle)?;
            let events = service.list_events(vehicle_id(&vehicle)?)?;
            println!("{}", render_events(&events, &config.display));
        }
        LogCommand::Delete { id } => {
            service.delete_event(id)?;
            println!("Deleted service log #{}", id);
        }
    }
    Ok(())
}
