//! Which trip is happening now.
//!
//! A trip's phase is never stored. It is recomputed from its start and end
//! dates against today's date every time, so it stays right across
//! midnight:
//!
//! ```text
//! upcoming  (today < start)
//! current   (start <= today <= end)
//! past      (end < today)
//! ```
//!
//! All comparisons are on calendar days.

use std::cmp::Reverse;
use std::fmt;

use chrono::NaiveDate;
use tracing::debug;
use wander_db::models::PersistedTrip;

use crate::trip::{SavedTrip, TripData};

/// Where a trip sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripPhase {
    Upcoming,
    Current,
    Past,
}

impl TripPhase {
    pub fn on(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        if today < start {
            Self::Upcoming
        } else if today <= end {
            Self::Current
        } else {
            Self::Past
        }
    }
}

impl fmt::Display for TripPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Upcoming => "upcoming",
            Self::Current => "current",
            Self::Past => "past",
        };
        f.write_str(s)
    }
}

/// Whole days from today to the end date. Zero is the last day; negative
/// means the trip is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DaysRemaining(pub i64);

impl DaysRemaining {
    pub fn is_last_day(self) -> bool {
        self.0 == 0
    }

    pub fn has_ended(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for DaysRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            n if n < 0 => f.write_str("Trip ended"),
            0 => f.write_str("Last day"),
            1 => f.write_str("1 day left"),
            n => write!(f, "{n} days left"),
        }
    }
}

pub fn days_remaining(end: NaiveDate, today: NaiveDate) -> DaysRemaining {
    DaysRemaining((end - today).num_days())
}

/// The trip in progress today.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentTrip {
    pub trip: SavedTrip,
    pub days_remaining: DaysRemaining,
}

fn is_current(data: &TripData, today: NaiveDate) -> bool {
    matches!(
        data.date_range(),
        Some((start, end)) if start <= today && today <= end
    )
}

/// Find the first trip, in list order, whose range contains `today`.
///
/// Overlapping trips are not ranked: the earliest-listed match wins.
/// Records with missing or unreadable dates never match.
pub fn find_current_trip(trips: &[PersistedTrip], today: NaiveDate) -> Option<CurrentTrip> {
    let found = trips.iter().find_map(|record| {
        let trip = SavedTrip::from_record(record.clone());
        is_current(&trip.data, today).then_some(trip)
    });

    let Some(trip) = found else {
        debug!(%today, candidates = trips.len(), "no current trip");
        return None;
    };
    let (_, end) = trip.data.date_range()?;
    let remaining = days_remaining(end, today);
    debug!(trip_id = %trip.record.id, %remaining, "resolved current trip");
    Some(CurrentTrip {
        trip,
        days_remaining: remaining,
    })
}

/// A user's trips grouped for the trip list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripBuckets {
    /// In list order.
    pub current: Vec<SavedTrip>,
    /// Soonest start first.
    pub upcoming: Vec<SavedTrip>,
    /// Most recently ended first.
    pub past: Vec<SavedTrip>,
    /// Missing or unreadable dates, in list order.
    pub unscheduled: Vec<SavedTrip>,
}

impl TripBuckets {
    pub fn partition(trips: impl IntoIterator<Item = SavedTrip>, today: NaiveDate) -> Self {
        let mut buckets = Self::default();
        for trip in trips {
            match trip.data.date_range() {
                Some((start, end)) => match TripPhase::on(start, end, today) {
                    TripPhase::Current => buckets.current.push(trip),
                    TripPhase::Upcoming => buckets.upcoming.push(trip),
                    TripPhase::Past => buckets.past.push(trip),
                },
                None => buckets.unscheduled.push(trip),
            }
        }
        buckets.upcoming.sort_by_key(|t| t.data.start_date);
        buckets.past.sort_by_key(|t| Reverse(t.data.end_date));
        buckets
    }

    pub fn len(&self) -> usize {
        self.current.len() + self.upcoming.len() + self.past.len() + self.unscheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip(name: &str, start: &str, end: &str) -> PersistedTrip {
        PersistedTrip::unsaved(
            "user-1",
            json!({"locationInfo": {"name": name}, "startDate": start, "endDate": end}),
            json!({}),
        )
    }

    #[test]
    fn mid_trip_has_five_days_left() {
        let trips = [trip("Lisbon", "2024-06-05", "2024-06-15")];
        let current = find_current_trip(&trips, day(2024, 6, 10)).unwrap();
        assert_eq!(current.trip.title(), "Lisbon");
        assert_eq!(current.days_remaining, DaysRemaining(5));
        assert_eq!(current.days_remaining.to_string(), "5 days left");
    }

    #[test]
    fn end_date_is_the_last_day() {
        let trips = [trip("Lisbon", "2024-06-05", "2024-06-15")];
        let current = find_current_trip(&trips, day(2024, 6, 15)).unwrap();
        assert_eq!(current.days_remaining, DaysRemaining(0));
        assert!(current.days_remaining.is_last_day());
        assert_eq!(current.days_remaining.to_string(), "Last day");
    }

    #[test]
    fn start_date_counts_as_current() {
        let trips = [trip("Lisbon", "2024-06-05T00:00:00.000Z", "2024-06-15T00:00:00.000Z")];
        let current = find_current_trip(&trips, day(2024, 6, 5)).unwrap();
        assert_eq!(current.days_remaining, DaysRemaining(10));
    }

    #[test]
    fn no_match_is_none() {
        let trips = [
            trip("Past", "2024-05-01", "2024-05-10"),
            trip("Later", "2024-07-01", "2024-07-10"),
        ];
        assert!(find_current_trip(&trips, day(2024, 6, 10)).is_none());
        assert!(find_current_trip(&[], day(2024, 6, 10)).is_none());
    }

    #[test]
    fn first_listed_overlap_wins() {
        let trips = [
            trip("Not yet", "2024-06-20", "2024-06-25"),
            trip("First", "2024-06-08", "2024-06-12"),
            trip("Second", "2024-06-01", "2024-06-30"),
        ];
        let current = find_current_trip(&trips, day(2024, 6, 10)).unwrap();
        assert_eq!(current.trip.title(), "First");
    }

    #[test]
    fn text_blobs_and_bad_dates_are_tolerated() {
        let text = PersistedTrip::unsaved(
            "user-1",
            Value::String(
                json!({"locationInfo": {"name": "Encoded"}, "startDate": "2024-06-01", "endDate": "2024-06-30"})
                    .to_string(),
            ),
            Value::String("not json".into()),
        );
        let trips = [trip("Broken", "someday", "2024-06-30"), text];
        let current = find_current_trip(&trips, day(2024, 6, 10)).unwrap();
        assert_eq!(current.trip.title(), "Encoded");
        assert!(current.trip.plan.is_empty());
    }

    #[test]
    fn unrelated_bad_fields_do_not_hide_a_trip() {
        let extras = [
            json!({"locationInfo": {"name": null}}),
            json!({"totalNoOfDays": "11"}),
            json!({"budget": {"title": "Moderate"}}),
        ];
        for extra in extras {
            let mut data = json!({"startDate": "2024-06-05", "endDate": "2024-06-15"});
            if let (Some(fields), Some(more)) = (data.as_object_mut(), extra.as_object()) {
                fields.extend(more.clone());
            }
            let trips = [PersistedTrip::unsaved("user-1", data, json!({}))];
            let current = find_current_trip(&trips, day(2024, 6, 10))
                .unwrap_or_else(|| panic!("trip with {extra} was skipped"));
            assert_eq!(current.days_remaining, DaysRemaining(5));
            assert_eq!(current.trip.data.total_days(), Some(11));
        }
    }

    #[test]
    fn days_remaining_tolerates_ended_trips() {
        let remaining = days_remaining(day(2024, 6, 15), day(2024, 6, 18));
        assert_eq!(remaining, DaysRemaining(-3));
        assert!(remaining.has_ended());
        assert_eq!(remaining.to_string(), "Trip ended");
        assert_eq!(days_remaining(day(2024, 6, 16), day(2024, 6, 15)).to_string(), "1 day left");
    }

    #[test]
    fn phase_follows_the_calendar() {
        let (start, end) = (day(2024, 6, 5), day(2024, 6, 15));
        assert_eq!(TripPhase::on(start, end, day(2024, 6, 4)), TripPhase::Upcoming);
        assert_eq!(TripPhase::on(start, end, start), TripPhase::Current);
        assert_eq!(TripPhase::on(start, end, end), TripPhase::Current);
        assert_eq!(TripPhase::on(start, end, day(2024, 6, 16)), TripPhase::Past);
    }

    #[test]
    fn partition_sorts_each_bucket() {
        let trips = [
            trip("Later", "2024-09-01", "2024-09-05"),
            trip("Old", "2024-01-01", "2024-01-05"),
            trip("Now", "2024-06-01", "2024-06-20"),
            trip("Soon", "2024-07-01", "2024-07-05"),
            trip("Recent", "2024-05-01", "2024-05-05"),
            trip("Undated", "", ""),
        ]
        .map(SavedTrip::from_record);

        let buckets = TripBuckets::partition(trips, day(2024, 6, 10));
        let titles = |v: &[SavedTrip]| v.iter().map(|t| t.title().to_string()).collect::<Vec<_>>();
        assert_eq!(titles(&buckets.current), ["Now"]);
        assert_eq!(titles(&buckets.upcoming), ["Soon", "Later"]);
        assert_eq!(titles(&buckets.past), ["Recent", "Old"]);
        assert_eq!(titles(&buckets.unscheduled), ["Undated"]);
        assert_eq!(buckets.len(), 6);
    }
}
