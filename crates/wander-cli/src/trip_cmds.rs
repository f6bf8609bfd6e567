//! CLI handlers for `wander trip` subcommands.
//!
//! Implements:
//! - `wander trip create <file>`     -- run a draft file through the wizard and generate
//! - `wander trip list`              -- trips grouped into current/upcoming/past
//! - `wander trip show <id>`         -- one trip with its itinerary
//! - `wander trip delete <id>`       -- remove a trip
//! - `wander trip regenerate <id>`   -- replace a trip's itinerary
//! - `wander trip template`          -- print a starter draft file
//! - `wander trip prompt <file>`     -- print the generation prompt for a draft file

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use wander_core::dates::describe_range;
use wander_core::draft::{
    ActivityLevel, BudgetTier, DraftFile, DraftPatch, TravelerCategory, TripDraft,
    parse_draft_toml,
};
use wander_core::generate::build_generation_prompt;
use wander_core::resolver::{TripBuckets, TripPhase, days_remaining};
use wander_core::service;
use wander_core::trip::{LocationInfo, NOT_SPECIFIED, SavedTrip, TripData};
use wander_core::wizard::{StepInput, WizardSession, WizardStep};
use wander_db::queries::trips as trip_queries;

use crate::TripCommands;
use crate::config::WanderConfig;

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch a database-backed `TripCommands` variant.
pub async fn run_trip_command(
    command: TripCommands,
    pool: &PgPool,
    config: &WanderConfig,
    today: NaiveDate,
) -> Result<()> {
    let user_id = config.user_id()?;
    match command {
        TripCommands::Create { file, plan } => {
            cmd_create(pool, config, user_id, &file, plan.as_deref(), today).await
        }
        TripCommands::List => cmd_list(pool, user_id, today).await,
        TripCommands::Show { trip_id } => cmd_show(pool, user_id, &trip_id, today).await,
        TripCommands::Delete { trip_id } => cmd_delete(pool, user_id, &trip_id).await,
        TripCommands::Regenerate { trip_id, plan } => {
            cmd_regenerate(pool, config, user_id, &trip_id, plan.as_deref()).await
        }
        TripCommands::Template | TripCommands::Prompt { .. } => {
            bail!("this trip command does not use the database")
        }
    }
}

pub fn parse_trip_id(trip_id: &str) -> Result<Uuid> {
    Uuid::parse_str(trip_id).with_context(|| format!("invalid trip ID: {trip_id}"))
}

fn read_plan_file(path: Option<&str>) -> Result<Option<String>> {
    path.map(|p| {
        std::fs::read_to_string(p).with_context(|| format!("failed to read plan file: {p}"))
    })
    .transpose()
}

/// Read a draft file and walk it through the wizard up to generation.
pub fn draft_from_file(file_path: &str, today: NaiveDate) -> Result<TripDraft> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read draft file: {file_path}"))?;
    let request = parse_draft_toml(&content)
        .with_context(|| format!("failed to parse draft file: {file_path}"))?;

    let mut session = WizardSession::new(today);
    let reached = session
        .fill_from(&request)
        .with_context(|| format!("invalid trip in {file_path}"))?;
    if reached != WizardStep::ReviewTrip {
        let missing: Vec<String> = session
            .draft()
            .missing_fields()
            .iter()
            .map(ToString::to_string)
            .collect();
        bail!(
            "{file_path} stops at {} ({}): missing {}",
            reached,
            session.position()?,
            missing.join(", ")
        );
    }
    session
        .submit(StepInput::Confirm)
        .with_context(|| format!("invalid trip in {file_path}"))?;
    Ok(session.into_draft())
}

// -----------------------------------------------------------------------
// wander trip create <file>
// -----------------------------------------------------------------------

async fn cmd_create(
    pool: &PgPool,
    config: &WanderConfig,
    user_id: &str,
    file_path: &str,
    plan_path: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let draft = draft_from_file(file_path, today)?;
    let generator = config.generator(read_plan_file(plan_path)?)?;

    println!("Generating itinerary with {}...", generator.name());
    let trip = service::submit_trip(pool, user_id, &draft, generator.as_ref()).await?;

    println!("Trip created successfully.");
    println!();
    print_summary(&trip);
    Ok(())
}

// -----------------------------------------------------------------------
// wander trip list
// -----------------------------------------------------------------------

async fn cmd_list(pool: &PgPool, user_id: &str, today: NaiveDate) -> Result<()> {
    let trips = service::load_user_trips(pool, user_id).await?;
    if trips.is_empty() {
        println!("No trips found. Use `wander trip create <file>` to plan one.");
        return Ok(());
    }

    let buckets = TripBuckets::partition(trips, today);
    let sections = [
        ("Current", &buckets.current),
        ("Upcoming", &buckets.upcoming),
        ("Past", &buckets.past),
        ("Unscheduled", &buckets.unscheduled),
    ];
    let mut first = true;
    for (heading, trips) in sections {
        if trips.is_empty() {
            continue;
        }
        if !first {
            println!();
        }
        first = false;
        println!("{heading} ({})", trips.len());
        print_table(trips);
    }
    Ok(())
}

fn dates_label(data: &TripData) -> String {
    match data.date_range() {
        Some((start, end)) => describe_range(start, end),
        None => "dates not set".to_string(),
    }
}

fn print_table(trips: &[SavedTrip]) {
    let id_w = 36;
    let dest_w = trips.iter().map(|t| t.title().len()).max().unwrap_or(11).max(11);
    let dates_w = trips
        .iter()
        .map(|t| dates_label(&t.data).chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        "  {:<id_w$}  {:<dest_w$}  {:<dates_w$}  TRAVELERS",
        "ID", "DESTINATION", "DATES",
    );
    for trip in trips {
        println!(
            "  {:<id_w$}  {:<dest_w$}  {:<dates_w$}  {}",
            trip.record.id,
            trip.title(),
            dates_label(&trip.data),
            trip.data.travelers_label(),
        );
    }
}

// -----------------------------------------------------------------------
// wander trip show <id>
// -----------------------------------------------------------------------

async fn cmd_show(pool: &PgPool, user_id: &str, trip_id: &str, today: NaiveDate) -> Result<()> {
    let id = parse_trip_id(trip_id)?;
    let trip = service::load_trip(pool, user_id, id)
        .await?
        .with_context(|| format!("trip {id} not found"))?;

    print_summary(&trip);
    if let Some((start, end)) = trip.data.date_range() {
        let phase = TripPhase::on(start, end, today);
        match phase {
            TripPhase::Current => println!(
                "  Status:       {phase} ({})",
                days_remaining(end, today)
            ),
            _ => println!("  Status:       {phase}"),
        }
    }
    print_plan(&trip);
    Ok(())
}

fn print_summary(trip: &SavedTrip) {
    let data = &trip.data;
    println!("  Trip ID:      {}", trip.record.id);
    println!("  Destination:  {}", trip.title());
    println!("  Dates:        {}", dates_label(data));
    if let Some(days) = data.total_days() {
        println!("  Days:         {days}");
    }
    println!("  Travelers:    {}", data.travelers_label());
    println!(
        "  Budget:       {}",
        data.budget.as_deref().unwrap_or(NOT_SPECIFIED)
    );
    println!(
        "  Activity:     {}",
        data.activity_level.as_deref().unwrap_or(NOT_SPECIFIED)
    );
}

fn print_plan(trip: &SavedTrip) {
    let plan = &trip.plan;
    if plan.is_empty() {
        println!();
        println!("No itinerary generated yet.");
        return;
    }

    println!();
    println!("Itinerary for {} (budget: {})", plan.destination(), plan.budget());
    if let Some(summary) = plan.summary() {
        println!("  {summary}");
    }

    if let Some(flight) = &plan.travel_plan.flight {
        println!();
        println!("Flight:");
        let price = flight
            .flight_price
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());
        println!("  {} ({price})", flight.airline_name);
    }

    let hotels = plan.all_hotels();
    if !hotels.is_empty() {
        println!();
        println!("Hotels:");
        for hotel in hotels {
            let mut line = format!("  - {}", hotel.hotel_name);
            if let Some(rating) = &hotel.rating {
                line.push_str(&format!(" ({rating}*)"));
            }
            if let Some(price) = &hotel.price {
                line.push_str(&format!(", {price}"));
            }
            println!("{line}");
        }
    }

    for (i, day) in plan.travel_plan.itinerary.iter().enumerate() {
        println!();
        match &day.day {
            Some(label) if label.to_string().parse::<u32>().is_ok() => println!("Day {label}:"),
            Some(label) => println!("{label}:"),
            None => println!("Day {}:", i + 1),
        }
        if day.places.is_empty() {
            println!("  (free day)");
        }
        for place in &day.places {
            match &place.time_to_travel {
                Some(time) => println!("  - {} [{time}]", place.place_name),
                None => println!("  - {}", place.place_name),
            }
            if let Some(details) = &place.place_details {
                println!("      {details}");
            }
        }
    }
}

// -----------------------------------------------------------------------
// wander trip delete <id>
// -----------------------------------------------------------------------

async fn cmd_delete(pool: &PgPool, user_id: &str, trip_id: &str) -> Result<()> {
    let id = parse_trip_id(trip_id)?;
    if !trip_queries::delete_trip(pool, user_id, id).await? {
        bail!("trip {id} not found");
    }
    println!("Trip {id} deleted.");
    Ok(())
}

// -----------------------------------------------------------------------
// wander trip regenerate <id>
// -----------------------------------------------------------------------

async fn cmd_regenerate(
    pool: &PgPool,
    config: &WanderConfig,
    user_id: &str,
    trip_id: &str,
    plan_path: Option<&str>,
) -> Result<()> {
    let id = parse_trip_id(trip_id)?;
    let generator = config.generator(read_plan_file(plan_path)?)?;

    println!("Generating itinerary with {}...", generator.name());
    let trip = service::regenerate_plan(pool, user_id, id, generator.as_ref()).await?;
    println!("Itinerary replaced.");
    print_plan(&trip);
    Ok(())
}

// -----------------------------------------------------------------------
// wander trip template / wander trip prompt <file>
// -----------------------------------------------------------------------

/// Print a starter draft file, dated a week from `today`.
pub fn cmd_template(today: NaiveDate) -> Result<()> {
    let start = today + chrono::Days::new(7);
    let end = start + chrono::Days::new(4);
    let draft = TripDraft::default().merged(
        DraftPatch::new()
            .destination(LocationInfo {
                name: "Lisbon, Portugal".to_string(),
                ..LocationInfo::default()
            })
            .dates(start, end)
            .travelers(TravelerCategory::Couple)
            .budget(BudgetTier::Moderate)
            .activity_level(ActivityLevel::Balanced),
    );
    let file = DraftFile::from_draft(&draft).context("template draft is incomplete")?;
    print!("{}", file.to_toml().context("failed to render draft file")?);
    Ok(())
}

/// Print the prompt `trip create` would send for `file_path`.
pub fn cmd_prompt(file_path: &str, today: NaiveDate) -> Result<()> {
    let draft = draft_from_file(file_path, today)?;
    let data = draft.to_trip_data()?;
    print!("{}", build_generation_prompt(&data));
    Ok(())
}
