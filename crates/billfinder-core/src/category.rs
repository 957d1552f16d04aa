use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A demographic category a bill can be classified under.
///
/// The snake_case key is the canonical name used in stored documents,
/// query parameters and model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AgeGroups,
    IncomeBrackets,
    RaceOrEthnicity,
    Location,
    Gender,
    OtherGroups,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::AgeGroups,
        Category::IncomeBrackets,
        Category::RaceOrEthnicity,
        Category::Location,
        Category::Gender,
        Category::OtherGroups,
    ];

    /// Categories the model is asked to fill in.
    pub const CLASSIFIED: [Category; 5] = [
        Category::AgeGroups,
        Category::IncomeBrackets,
        Category::RaceOrEthnicity,
        Category::Location,
        Category::Gender,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::AgeGroups => "age_groups",
            Category::IncomeBrackets => "income_brackets",
            Category::RaceOrEthnicity => "race_or_ethnicity",
            Category::Location => "location",
            Category::Gender => "gender",
            Category::OtherGroups => "other_groups",
        }
    }

    /// Resolve a category from a document key.
    ///
    /// Accepts the canonical snake_case keys as well as the camelCase field
    /// names posted by the frontend questionnaire.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "age_groups" | "ageGroup" | "ageGroups" => Some(Category::AgeGroups),
            "income_brackets" | "incomeBracket" | "incomeBrackets" => {
                Some(Category::IncomeBrackets)
            }
            "race_or_ethnicity" | "raceEthnicity" | "raceOrEthnicity" => {
                Some(Category::RaceOrEthnicity)
            }
            "location" => Some(Category::Location),
            "gender" => Some(Category::Gender),
            "other_groups" | "otherGroups" => Some(Category::OtherGroups),
            _ => None,
        }
    }

    /// Whether this category takes part in bill matching.
    pub fn is_matchable(self) -> bool {
        self != Category::OtherGroups
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_key(s).ok_or_else(|| format!("unknown demographic category: {s}"))
    }
}
