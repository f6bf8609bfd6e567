//! `wander current`: the trip in progress today.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::PgPool;

use wander_core::dates::describe_range;
use wander_core::service;

pub async fn run_current(pool: &PgPool, user_id: &str, today: NaiveDate) -> Result<()> {
    let Some(current) = service::find_current_trip(pool, user_id, today).await? else {
        println!("No current trip.");
        return Ok(());
    };

    let trip = &current.trip;
    println!("{} -- {}", trip.title(), current.days_remaining);
    if let Some((start, end)) = trip.data.date_range() {
        println!("  {}", describe_range(start, end));
    }
    println!("  Trip ID: {}", trip.record.id);

    // Today's stop list, when the plan has one for this day.
    if let Some((start, _)) = trip.data.date_range() {
        let index = (today - start).num_days();
        let day = usize::try_from(index)
            .ok()
            .and_then(|i| trip.plan.travel_plan.itinerary.get(i));
        if let Some(day) = day.filter(|d| !d.places.is_empty()) {
            println!();
            println!("Today:");
            for place in &day.places {
                println!("  - {}", place.place_name);
            }
        }
    }
    Ok(())
}
