//! One pass through the wizard.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::steps::{self, StepError};
use super::{BackTarget, FlowError, ScreenFlow, StepPosition, WizardStep};
use crate::draft::file::{DraftRequest, TravelerInput};
use crate::draft::{ActivityLevel, BudgetTier, DraftStore, TripDraft};
use crate::trip::{LocationInfo, TripData};

/// Raw input submitted on a wizard screen.
#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    Destination(LocationInfo),
    Dates {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Travelers(TravelerInput),
    Preferences {
        budget: Option<BudgetTier>,
        activity: Option<ActivityLevel>,
    },
    /// Confirmation on the review screen.
    Confirm,
}

impl StepInput {
    fn kind(&self) -> &'static str {
        match self {
            Self::Destination(_) => "destination",
            Self::Dates { .. } => "dates",
            Self::Travelers(_) => "travelers",
            Self::Preferences { .. } => "preferences",
            Self::Confirm => "confirm",
        }
    }
}

/// Wizard state: the flow, the current step and the draft being built.
///
/// The session is the only owner of its [`DraftStore`]; steps see the draft
/// through [`WizardSession::draft`] and change it only by submitting input.
#[derive(Debug, Clone)]
pub struct WizardSession {
    flow: ScreenFlow,
    store: DraftStore,
    current: WizardStep,
    today: NaiveDate,
}

impl WizardSession {
    /// Enter the standard wizard with an empty draft.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            flow: ScreenFlow::standard(),
            store: DraftStore::new(),
            current: WizardStep::WhereTo,
            today,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.current
    }

    pub fn draft(&self) -> &TripDraft {
        self.store.current()
    }

    pub fn flow(&self) -> &ScreenFlow {
        &self.flow
    }

    pub fn position(&self) -> Result<StepPosition, FlowError> {
        self.flow.position(self.current.name())
    }

    /// Validate `input` for the current step, merge it, and move on.
    /// Returns the step now showing. On error nothing changes.
    pub fn submit(&mut self, input: StepInput) -> Result<WizardStep, StepError> {
        let step = self.current;
        let patch = match (step, input) {
            (WizardStep::WhereTo, StepInput::Destination(dest)) => steps::where_to(dest)?,
            (WizardStep::ChooseDate, StepInput::Dates { start, end }) => {
                steps::choose_date(start, end, self.today)?
            }
            (WizardStep::WhosGoing, StepInput::Travelers(t)) => steps::whos_going(t)?,
            (WizardStep::MoreInfo, StepInput::Preferences { budget, activity }) => {
                steps::more_info(budget, activity)?
            }
            (WizardStep::ReviewTrip, StepInput::Confirm) => {
                steps::review_trip(self.store.current())?;
                Default::default()
            }
            (step, input) => {
                return Err(StepError::WrongInput {
                    step,
                    input: input.kind(),
                });
            }
        };

        self.store.update(patch);
        self.current = self.following(step);
        debug!(from = %step, to = %self.current, "wizard advanced");
        Ok(self.current)
    }

    fn following(&self, step: WizardStep) -> WizardStep {
        self.flow
            .next(step.name())
            .ok()
            .flatten()
            .and_then(|name| name.parse().ok())
            .unwrap_or(step)
    }

    /// Go back one screen. Leaving from the first screen discards the draft.
    pub fn back(&mut self) -> Result<BackTarget, FlowError> {
        let target = self.flow.previous(self.current.name())?;
        match &target {
            BackTarget::Step(name) => {
                self.current = name.parse()?;
            }
            BackTarget::ExitToTripList => {
                info!("leaving trip wizard");
                self.reset();
            }
        }
        Ok(target)
    }

    /// Start over with an empty draft on the first screen.
    pub fn reset(&mut self) {
        self.store.reset();
        self.current = WizardStep::WhereTo;
    }

    /// Feed a parsed draft file through the steps in order. Stops at the
    /// first step the file has no answer for.
    pub fn fill_from(&mut self, request: &DraftRequest) -> Result<WizardStep, StepError> {
        self.submit(StepInput::Destination(request.destination.clone()))?;
        self.submit(StepInput::Dates {
            start: Some(request.start_date),
            end: Some(request.end_date),
        })?;
        if let Some(travelers) = request.travelers {
            self.submit(StepInput::Travelers(travelers))?;
        } else {
            return Ok(self.current);
        }
        if request.budget.is_some() && request.activity_level.is_some() {
            self.submit(StepInput::Preferences {
                budget: request.budget,
                activity: request.activity_level,
            })?;
        }
        Ok(self.current)
    }

    /// The submitted trip data, once the review step has been passed.
    pub fn trip_data(&self) -> Result<TripData, StepError> {
        steps::review_trip(self.store.current())
    }

    /// Hand the draft over for generation.
    pub fn into_draft(self) -> TripDraft {
        self.store.into_draft()
    }
}
