//! `trip.toml` draft files.
//!
//! A draft file answers the wizard's questions up front:
//!
//! ```toml
//! [destination]
//! name = "Lisbon, Portugal"
//! lat = 38.72
//! lng = -9.14
//!
//! [dates]
//! start = 2024-06-05
//! end = 2024-06-15
//!
//! [preferences]
//! travelers = 2          # or "solo" / "couple" / "group"
//! budget = "moderate"
//! activity = "balanced"
//! ```
//!
//! [`parse_draft_toml`] checks that every value is well-formed. Rules that
//! depend on more than one value or on today's date (end after start, no
//! past trips) belong to the wizard steps that consume the result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TripDraft;
use super::options::{ActivityLevel, BudgetTier, OptionParseError, TravelerCategory};
use crate::dates::{format_day, parse_day};
use crate::trip::{Coordinates, LocationInfo};

/// Errors that can occur while parsing a draft file.
#[derive(Debug, Error)]
pub enum DraftFileError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("destination name must not be empty")]
    EmptyDestination,

    #[error("destination coordinates need both lat and lng")]
    PartialCoordinates,

    #[error("invalid {field} date {value} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid travelers value {0} (expected a positive count, or solo, couple, or group)")]
    InvalidTravelers(String),

    #[error("{0}")]
    InvalidBudget(#[source] OptionParseError),

    #[error("{0}")]
    InvalidActivity(#[source] OptionParseError),
}

/// On-disk layout of a draft file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftFile {
    pub destination: DestinationToml,
    pub dates: DatesToml,
    #[serde(default)]
    pub preferences: PreferencesToml,
}

/// `[destination]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DestinationToml {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// `[dates]`. Either TOML dates or `"YYYY-MM-DD"` strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatesToml {
    pub start: toml::Value,
    pub end: toml::Value,
}

/// `[preferences]`. Anything left out has to be filled in before the trip
/// can be generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PreferencesToml {
    /// Head count or category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travelers: Option<toml::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

/// How the travelers were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelerInput {
    Count(u32),
    Category(TravelerCategory),
}

/// A validated draft file, ready to feed to the wizard steps.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRequest {
    pub destination: LocationInfo,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub travelers: Option<TravelerInput>,
    pub budget: Option<BudgetTier>,
    pub activity_level: Option<ActivityLevel>,
}

/// Parse and validate a `trip.toml` string.
pub fn parse_draft_toml(content: &str) -> Result<DraftRequest, DraftFileError> {
    let file: DraftFile = toml::from_str(content)?;
    validate(&file)
}

fn validate(file: &DraftFile) -> Result<DraftRequest, DraftFileError> {
    let dest = &file.destination;
    if dest.name.trim().is_empty() {
        return Err(DraftFileError::EmptyDestination);
    }
    let coordinates = match (dest.lat, dest.lng) {
        (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
        (None, None) => None,
        _ => return Err(DraftFileError::PartialCoordinates),
    };
    let destination = LocationInfo {
        name: dest.name.trim().to_string(),
        coordinates,
        photo_ref: dest.photo_ref.clone(),
        url: dest.url.clone(),
    };

    let start_date = toml_day(&file.dates.start, "start")?;
    let end_date = toml_day(&file.dates.end, "end")?;

    let prefs = &file.preferences;
    let travelers = prefs.travelers.as_ref().map(traveler_input).transpose()?;
    let budget = prefs
        .budget
        .as_deref()
        .map(str::parse::<BudgetTier>)
        .transpose()
        .map_err(DraftFileError::InvalidBudget)?;
    let activity_level = prefs
        .activity
        .as_deref()
        .map(str::parse::<ActivityLevel>)
        .transpose()
        .map_err(DraftFileError::InvalidActivity)?;

    Ok(DraftRequest {
        destination,
        start_date,
        end_date,
        travelers,
        budget,
        activity_level,
    })
}

fn toml_day(value: &toml::Value, field: &'static str) -> Result<NaiveDate, DraftFileError> {
    let invalid = || DraftFileError::InvalidDate {
        field,
        value: value.to_string(),
    };
    match value {
        toml::Value::Datetime(dt) => {
            let date = dt.date.ok_or_else(invalid)?;
            NaiveDate::from_ymd_opt(date.year.into(), date.month.into(), date.day.into())
                .ok_or_else(invalid)
        }
        toml::Value::String(s) => parse_day(s).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn traveler_input(value: &toml::Value) -> Result<TravelerInput, DraftFileError> {
    match value {
        toml::Value::Integer(n) if *n > 0 => u32::try_from(*n)
            .map(TravelerInput::Count)
            .map_err(|_| DraftFileError::InvalidTravelers(value.to_string())),
        toml::Value::String(s) => s
            .parse::<TravelerCategory>()
            .map(TravelerInput::Category)
            .map_err(|_| DraftFileError::InvalidTravelers(value.to_string())),
        _ => Err(DraftFileError::InvalidTravelers(value.to_string())),
    }
}

impl DraftFile {
    /// Render an existing draft in file form. Returns `None` until the
    /// draft has a destination and both dates.
    pub fn from_draft(draft: &TripDraft) -> Option<Self> {
        let dest = draft.destination.as_ref()?;
        let start = draft.start_date?;
        let end = draft.end_date?;
        Some(Self {
            destination: DestinationToml {
                name: dest.name.clone(),
                lat: dest.coordinates.map(|c| c.lat),
                lng: dest.coordinates.map(|c| c.lng),
                photo_ref: dest.photo_ref.clone(),
                url: dest.url.clone(),
            },
            dates: DatesToml {
                start: toml::Value::String(format_day(start)),
                end: toml::Value::String(format_day(end)),
            },
            preferences: PreferencesToml {
                travelers: draft
                    .travelers
                    .map(|t| toml::Value::String(t.to_string().to_lowercase())),
                budget: draft.budget.map(|b| b.to_string().to_lowercase()),
                activity: draft.activity_level.map(|a| a.to_string().to_lowercase()),
            },
        })
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftPatch;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const FULL: &str = r#"
[destination]
name = "Lisbon, Portugal"
lat = 38.72
lng = -9.14
url = "https://maps.example/lisbon"

[dates]
start = 2024-06-05
end = "2024-06-15"

[preferences]
travelers = 2
budget = "moderate"
activity = "Balanced"
"#;

    #[test]
    fn parses_full_file() {
        let req = parse_draft_toml(FULL).expect("should parse");
        assert_eq!(req.destination.name, "Lisbon, Portugal");
        assert_eq!(
            req.destination.coordinates,
            Some(Coordinates { lat: 38.72, lng: -9.14 })
        );
        assert_eq!(req.start_date, day(2024, 6, 5));
        assert_eq!(req.end_date, day(2024, 6, 15));
        assert_eq!(req.travelers, Some(TravelerInput::Count(2)));
        assert_eq!(req.budget, Some(BudgetTier::Moderate));
        assert_eq!(req.activity_level, Some(ActivityLevel::Balanced));
    }

    #[test]
    fn preferences_are_optional() {
        let req = parse_draft_toml(
            r#"
[destination]
name = "Oslo"

[dates]
start = 2024-01-02
end = 2024-01-04
"#,
        )
        .expect("should parse");
        assert_eq!(req.travelers, None);
        assert_eq!(req.budget, None);
        assert_eq!(req.destination.coordinates, None);
    }

    #[test]
    fn travelers_by_name() {
        let content = FULL.replace("travelers = 2", "travelers = \"group\"");
        let req = parse_draft_toml(&content).unwrap();
        assert_eq!(
            req.travelers,
            Some(TravelerInput::Category(TravelerCategory::Group))
        );
    }

    #[test]
    fn rejects_blank_destination() {
        let content = FULL.replace("name = \"Lisbon, Portugal\"", "name = \"   \"");
        let err = parse_draft_toml(&content).unwrap_err();
        assert!(
            matches!(err, DraftFileError::EmptyDestination),
            "expected EmptyDestination, got: {err}"
        );
    }

    #[test]
    fn rejects_half_coordinates() {
        let content = FULL.replace("lng = -9.14\n", "");
        let err = parse_draft_toml(&content).unwrap_err();
        assert!(
            matches!(err, DraftFileError::PartialCoordinates),
            "expected PartialCoordinates, got: {err}"
        );
    }

    #[test]
    fn rejects_bad_dates() {
        let content = FULL.replace("end = \"2024-06-15\"", "end = \"mid June\"");
        let err = parse_draft_toml(&content).unwrap_err();
        assert!(
            matches!(err, DraftFileError::InvalidDate { field: "end", .. }),
            "expected InvalidDate, got: {err}"
        );

        let content = FULL.replace("start = 2024-06-05", "start = 20240605");
        let err = parse_draft_toml(&content).unwrap_err();
        assert!(
            matches!(err, DraftFileError::InvalidDate { field: "start", .. }),
            "expected InvalidDate, got: {err}"
        );
    }

    #[test]
    fn rejects_bad_travelers() {
        for bad in ["travelers = 0", "travelers = -3", "travelers = \"family\"", "travelers = 1.5"] {
            let content = FULL.replace("travelers = 2", bad);
            let err = parse_draft_toml(&content).unwrap_err();
            assert!(
                matches!(err, DraftFileError::InvalidTravelers(_)),
                "{bad}: expected InvalidTravelers, got: {err}"
            );
        }
    }

    #[test]
    fn rejects_bad_budget_and_activity() {
        let err = parse_draft_toml(&FULL.replace("\"moderate\"", "\"frugal\"")).unwrap_err();
        assert!(
            matches!(err, DraftFileError::InvalidBudget(_)),
            "expected InvalidBudget, got: {err}"
        );

        let err = parse_draft_toml(&FULL.replace("\"Balanced\"", "\"frantic\"")).unwrap_err();
        assert!(
            matches!(err, DraftFileError::InvalidActivity(_)),
            "expected InvalidActivity, got: {err}"
        );
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = parse_draft_toml("this is not valid toml {{{").unwrap_err();
        assert!(
            matches!(err, DraftFileError::TomlError(_)),
            "expected TomlError, got: {err}"
        );
    }

    #[test]
    fn rendered_draft_parses_back() {
        let draft = TripDraft::default().merged(
            DraftPatch::new()
                .destination(LocationInfo {
                    name: "Kyoto, Japan".into(),
                    coordinates: Some(Coordinates { lat: 35.0, lng: 135.7 }),
                    ..LocationInfo::default()
                })
                .dates(day(2025, 4, 1), day(2025, 4, 8))
                .travelers(TravelerCategory::Solo)
                .budget(BudgetTier::Luxury),
        );
        let text = DraftFile::from_draft(&draft).unwrap().to_toml().unwrap();
        let req = parse_draft_toml(&text).expect("rendered file should parse");
        assert_eq!(req.destination, draft.destination.unwrap());
        assert_eq!(req.start_date, day(2025, 4, 1));
        assert_eq!(
            req.travelers,
            Some(TravelerInput::Category(TravelerCategory::Solo))
        );
        assert_eq!(req.budget, Some(BudgetTier::Luxury));
        assert_eq!(req.activity_level, None);
    }

    #[test]
    fn incomplete_draft_has_no_file_form() {
        assert!(DraftFile::from_draft(&TripDraft::default()).is_none());
    }
}
