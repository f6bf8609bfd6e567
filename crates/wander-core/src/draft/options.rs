//! Fixed choices offered by the wizard.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a choice name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} {value:?} (expected {expected})")]
pub struct OptionParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Who is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelerCategory {
    Solo,
    Couple,
    Group,
}

impl TravelerCategory {
    pub const ALL: [Self; 3] = [Self::Solo, Self::Couple, Self::Group];

    /// Category for a head count: 1 is solo, 2 a couple, more a group.
    /// Zero travelers has no category.
    pub fn from_count(count: u32) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::Solo),
            2 => Some(Self::Couple),
            _ => Some(Self::Group),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Solo => "A sole traveler in exploration",
            Self::Couple => "Two travelers in tandem",
            Self::Group => "A group of fun-loving adventurers",
        }
    }
}

impl fmt::Display for TravelerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Solo => "Solo",
            Self::Couple => "Couple",
            Self::Group => "Group",
        };
        f.write_str(s)
    }
}

impl FromStr for TravelerCategory {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solo" => Ok(Self::Solo),
            "couple" => Ok(Self::Couple),
            "group" => Ok(Self::Group),
            _ => Err(OptionParseError {
                kind: "travelers",
                value: s.to_owned(),
                expected: "solo, couple, or group",
            }),
        }
    }
}

/// Spending level for the generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetTier {
    Cheap,
    Moderate,
    Luxury,
}

impl BudgetTier {
    pub const ALL: [Self; 3] = [Self::Cheap, Self::Moderate, Self::Luxury];

    pub fn description(self) -> &'static str {
        match self {
            Self::Cheap => "Stay conscious of costs",
            Self::Moderate => "Keep cost on the average side",
            Self::Luxury => "Don't worry about cost",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cheap => "Cheap",
            Self::Moderate => "Moderate",
            Self::Luxury => "Luxury",
        };
        f.write_str(s)
    }
}

impl FromStr for BudgetTier {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cheap" => Ok(Self::Cheap),
            "moderate" => Ok(Self::Moderate),
            "luxury" => Ok(Self::Luxury),
            _ => Err(OptionParseError {
                kind: "budget",
                value: s.to_owned(),
                expected: "cheap, moderate, or luxury",
            }),
        }
    }
}

/// How packed the days should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    Relaxed,
    Balanced,
    Active,
}

impl ActivityLevel {
    pub const ALL: [Self; 3] = [Self::Relaxed, Self::Balanced, Self::Active];

    pub fn description(self) -> &'static str {
        match self {
            Self::Relaxed => "Slow mornings and few stops per day",
            Self::Balanced => "A mix of sightseeing and downtime",
            Self::Active => "Full days, early starts",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Relaxed => "Relaxed",
            Self::Balanced => "Balanced",
            Self::Active => "Active",
        };
        f.write_str(s)
    }
}

impl FromStr for ActivityLevel {
    type Err = OptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relaxed" => Ok(Self::Relaxed),
            "balanced" => Ok(Self::Balanced),
            "active" => Ok(Self::Active),
            _ => Err(OptionParseError {
                kind: "activity level",
                value: s.to_owned(),
                expected: "relaxed, balanced, or active",
            }),
        }
    }
}
