//! The trip draft built up by the wizard.
//!
//! A [`DraftStore`] owns the single [`TripDraft`] of a wizard session. Steps
//! read the draft through a shared borrow and hand back a [`DraftPatch`];
//! [`DraftStore::update`] is the only write path. The store does no
//! validation of its own: each step checks its input before producing a
//! patch (see [`crate::wizard::steps`]).

pub mod file;
pub mod options;

use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::dates::TripLength;
use crate::trip::{LocationInfo, TripData};

pub use file::{DraftFile, DraftFileError, parse_draft_toml};
pub use options::{ActivityLevel, BudgetTier, OptionParseError, TravelerCategory};

/// Fields of a draft, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Destination,
    StartDate,
    EndDate,
    Travelers,
    Budget,
    ActivityLevel,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Destination => "destination",
            Self::StartDate => "start date",
            Self::EndDate => "end date",
            Self::Travelers => "travelers",
            Self::Budget => "budget",
            Self::ActivityLevel => "activity level",
        };
        f.write_str(s)
    }
}

/// Errors raised when a draft is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("trip draft is missing its {0}")]
    MissingField(DraftField),
}

/// A trip under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripDraft {
    pub destination: Option<LocationInfo>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travelers: Option<TravelerCategory>,
    pub budget: Option<BudgetTier>,
    pub activity_level: Option<ActivityLevel>,
}

impl TripDraft {
    /// Shallow merge: every field the patch sets or clears replaces the
    /// draft's value, every field it leaves alone is kept.
    pub fn merged(mut self, patch: DraftPatch) -> Self {
        if let Some(destination) = patch.destination {
            self.destination = destination;
        }
        if let Some(start) = patch.start_date {
            self.start_date = start;
        }
        if let Some(end) = patch.end_date {
            self.end_date = end;
        }
        if let Some(travelers) = patch.travelers {
            self.travelers = travelers;
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
        if let Some(activity) = patch.activity_level {
            self.activity_level = activity;
        }
        self
    }

    /// Length of the chosen range, once both dates are set.
    pub fn length(&self) -> Option<TripLength> {
        Some(TripLength::between(self.start_date?, self.end_date?))
    }

    /// Derived total-day count (inclusive).
    pub fn total_days(&self) -> Option<i64> {
        self.length().map(|len| len.days)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fields still unset, in wizard order.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let checks = [
            (self.destination.is_none(), DraftField::Destination),
            (self.start_date.is_none(), DraftField::StartDate),
            (self.end_date.is_none(), DraftField::EndDate),
            (self.travelers.is_none(), DraftField::Travelers),
            (self.budget.is_none(), DraftField::Budget),
            (self.activity_level.is_none(), DraftField::ActivityLevel),
        ];
        checks
            .into_iter()
            .filter_map(|(missing, field)| missing.then_some(field))
            .collect()
    }

    /// Serialize a complete draft into the stored `trip_data` form.
    pub fn to_trip_data(&self) -> Result<TripData, DraftError> {
        if let Some(field) = self.missing_fields().first() {
            return Err(DraftError::MissingField(*field));
        }

        Ok(TripData {
            location_info: self.destination.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            total_no_of_days: self.total_days(),
            who_is_going: self.travelers.map(|t| Value::String(t.to_string())),
            budget: self.budget.map(|b| b.to_string()),
            activity_level: self.activity_level.map(|a| a.to_string()),
        })
    }
}

/// A partial update to a [`TripDraft`].
///
/// Each field is `None` to leave the draft alone, `Some(Some(v))` to set it
/// and `Some(None)` to clear it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftPatch {
    pub destination: Option<Option<LocationInfo>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub travelers: Option<Option<TravelerCategory>>,
    pub budget: Option<Option<BudgetTier>>,
    pub activity_level: Option<Option<ActivityLevel>>,
}

impl DraftPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(mut self, destination: LocationInfo) -> Self {
        self.destination = Some(Some(destination));
        self
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(Some(start));
        self.end_date = Some(Some(end));
        self
    }

    pub fn travelers(mut self, travelers: TravelerCategory) -> Self {
        self.travelers = Some(Some(travelers));
        self
    }

    pub fn budget(mut self, budget: BudgetTier) -> Self {
        self.budget = Some(Some(budget));
        self
    }

    pub fn activity_level(mut self, activity: ActivityLevel) -> Self {
        self.activity_level = Some(Some(activity));
        self
    }

    /// Unset `field` in the draft when merged.
    pub fn clear(mut self, field: DraftField) -> Self {
        match field {
            DraftField::Destination => self.destination = Some(None),
            DraftField::StartDate => self.start_date = Some(None),
            DraftField::EndDate => self.end_date = Some(None),
            DraftField::Travelers => self.travelers = Some(None),
            DraftField::Budget => self.budget = Some(None),
            DraftField::ActivityLevel => self.activity_level = Some(None),
        }
        self
    }

    /// Names of the fields this patch sets or clears, for logging.
    pub fn fields(&self) -> Vec<DraftField> {
        let checks = [
            (self.destination.is_some(), DraftField::Destination),
            (self.start_date.is_some(), DraftField::StartDate),
            (self.end_date.is_some(), DraftField::EndDate),
            (self.travelers.is_some(), DraftField::Travelers),
            (self.budget.is_some(), DraftField::Budget),
            (self.activity_level.is_some(), DraftField::ActivityLevel),
        ];
        checks
            .into_iter()
            .filter_map(|(set, field)| set.then_some(field))
            .collect()
    }
}

/// Owner of the draft for one wizard session.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    draft: TripDraft,
}

impl DraftStore {
    /// Start with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing draft, e.g. one loaded from a file.
    pub fn with_draft(draft: TripDraft) -> Self {
        Self { draft }
    }

    pub fn current(&self) -> &TripDraft {
        &self.draft
    }

    /// Merge `patch` into the draft.
    pub fn update(&mut self, patch: DraftPatch) {
        debug!(fields = ?patch.fields(), "updating trip draft");
        let draft = std::mem::take(&mut self.draft);
        self.draft = draft.merged(patch);
    }

    /// Clear the draft back to empty.
    pub fn reset(&mut self) {
        debug!("resetting trip draft");
        self.draft = TripDraft::default();
    }

    /// Consume the store at submission time.
    pub fn into_draft(self) -> TripDraft {
        self.draft
    }
}
