//! Input validation for each wizard step.
//!
//! Every function checks raw input and returns the [`DraftPatch`] to merge,
//! or a [`StepError`] that is shown to the user on the same screen.

use chrono::NaiveDate;
use thiserror::Error;

use crate::draft::file::TravelerInput;
use crate::draft::{ActivityLevel, BudgetTier, DraftError, DraftPatch, TravelerCategory, TripDraft};
use crate::trip::{LocationInfo, TripData};

use super::WizardStep;

/// A rejected step input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("please choose a destination")]
    EmptyDestination,

    #[error("please select a start date")]
    MissingStartDate,

    #[error("please select an end date")]
    MissingEndDate,

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("start date {start} is in the past (today is {today})")]
    StartInPast { start: NaiveDate, today: NaiveDate },

    #[error("at least one traveler is required")]
    NoTravelers,

    #[error("please select a budget")]
    MissingBudget,

    #[error("please select an activity level")]
    MissingActivity,

    #[error(transparent)]
    Incomplete(#[from] DraftError),

    #[error("step {step} does not take {input} input")]
    WrongInput {
        step: WizardStep,
        input: &'static str,
    },
}

/// WhereTo: the destination needs a name.
pub fn where_to(destination: LocationInfo) -> Result<DraftPatch, StepError> {
    let name = destination.name.trim();
    if name.is_empty() {
        return Err(StepError::EmptyDestination);
    }
    let destination = LocationInfo {
        name: name.to_string(),
        ..destination
    };
    Ok(DraftPatch::new().destination(destination))
}

/// ChooseDate: both ends of the range, in order, and not before today.
pub fn choose_date(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DraftPatch, StepError> {
    let start = start.ok_or(StepError::MissingStartDate)?;
    let end = end.ok_or(StepError::MissingEndDate)?;
    if start < today {
        return Err(StepError::StartInPast { start, today });
    }
    if end < start {
        return Err(StepError::EndBeforeStart { start, end });
    }
    Ok(DraftPatch::new().dates(start, end))
}

/// WhosGoing: a head count or a category by name.
pub fn whos_going(input: TravelerInput) -> Result<DraftPatch, StepError> {
    let category = match input {
        TravelerInput::Count(n) => TravelerCategory::from_count(n).ok_or(StepError::NoTravelers)?,
        TravelerInput::Category(c) => c,
    };
    Ok(DraftPatch::new().travelers(category))
}

/// MoreInfo: budget and activity level, both required.
pub fn more_info(
    budget: Option<BudgetTier>,
    activity: Option<ActivityLevel>,
) -> Result<DraftPatch, StepError> {
    let budget = budget.ok_or(StepError::MissingBudget)?;
    let activity = activity.ok_or(StepError::MissingActivity)?;
    Ok(DraftPatch::new().budget(budget).activity_level(activity))
}

/// ReviewTrip: the draft must be complete to move on to generation.
pub fn review_trip(draft: &TripDraft) -> Result<TripData, StepError> {
    Ok(draft.to_trip_data()?)
}
