//! Trip-creation wizard: step sequencing and per-step validation.
//!
//! [`ScreenFlow`] is the ordered list of step names. It answers "where am
//! I" (`Step 3 of 6`), "where does back go" and "what comes next" by
//! positional lookup. A step name missing from the flow is a wiring bug
//! and surfaces as [`FlowError::UnknownStep`].

pub mod session;
pub mod steps;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use session::{StepInput, WizardSession};
pub use steps::StepError;

/// Errors from flow lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("unknown wizard step {0:?}")]
    UnknownStep(String),
}

/// The screens of the standard trip wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    WhereTo,
    ChooseDate,
    WhosGoing,
    MoreInfo,
    ReviewTrip,
    GenerateTrip,
}

impl WizardStep {
    pub const ALL: [Self; 6] = [
        Self::WhereTo,
        Self::ChooseDate,
        Self::WhosGoing,
        Self::MoreInfo,
        Self::ReviewTrip,
        Self::GenerateTrip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::WhereTo => "WhereTo",
            Self::ChooseDate => "ChooseDate",
            Self::WhosGoing => "WhosGoing",
            Self::MoreInfo => "MoreInfo",
            Self::ReviewTrip => "ReviewTrip",
            Self::GenerateTrip => "GenerateTrip",
        }
    }

    /// Prompt shown on the step's screen.
    pub fn title(self) -> &'static str {
        match self {
            Self::WhereTo => "Where to?",
            Self::ChooseDate => "Choose your travel dates",
            Self::WhosGoing => "Who's going?",
            Self::MoreInfo => "Budget and pace",
            Self::ReviewTrip => "Review your trip",
            Self::GenerateTrip => "Generating your itinerary",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WizardStep {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.name() == s)
            .ok_or_else(|| FlowError::UnknownStep(s.to_owned()))
    }
}

/// 1-based position of a step within its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPosition {
    pub index: usize,
    pub total: usize,
}

impl fmt::Display for StepPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.index, self.total)
    }
}

/// Where back navigation leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackTarget {
    Step(String),
    /// Back from the first step leaves the wizard for the trip list.
    ExitToTripList,
}

/// An ordered list of step names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenFlow {
    steps: Vec<String>,
}

impl ScreenFlow {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    /// `WhereTo → ChooseDate → WhosGoing → MoreInfo → ReviewTrip → GenerateTrip`.
    pub fn standard() -> Self {
        Self::new(WizardStep::ALL.iter().map(|s| s.name()))
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn index_of(&self, step: &str) -> Result<usize, FlowError> {
        self.steps
            .iter()
            .position(|s| s == step)
            .ok_or_else(|| FlowError::UnknownStep(step.to_owned()))
    }

    /// Position of `step` for progress display.
    pub fn position(&self, step: &str) -> Result<StepPosition, FlowError> {
        let index = self.index_of(step)?;
        Ok(StepPosition {
            index: index + 1,
            total: self.steps.len(),
        })
    }

    /// Target of back navigation from `step`.
    pub fn previous(&self, step: &str) -> Result<BackTarget, FlowError> {
        let index = self.index_of(step)?;
        Ok(match index.checked_sub(1) {
            Some(prev) => BackTarget::Step(self.steps[prev].clone()),
            None => BackTarget::ExitToTripList,
        })
    }

    /// The step after `step`, or `None` at the end of the flow.
    pub fn next(&self, step: &str) -> Result<Option<&str>, FlowError> {
        let index = self.index_of(step)?;
        Ok(self.steps.get(index + 1).map(String::as_str))
    }
}

impl Default for ScreenFlow {
    fn default() -> Self {
        Self::standard()
    }
}
