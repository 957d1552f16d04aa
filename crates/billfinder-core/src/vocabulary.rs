//! Closed value sets the model chooses demographic groups from.
//!
//! Revisions differ in how finely race and location are bucketed. The
//! vocabulary is data: a deployment picks a built-in revision or loads one
//! from a JSON file with the same shape as [`Vocabulary`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::CoreError;
use crate::models::demographics::Demographics;

const AGE_GROUPS: &[&str] = &["0-18", "19-25", "25-40", "41-65", "65+"];

const INCOME_BRACKETS: &[&str] = &[
    "$0-11,600",
    "$11,601-47,150",
    "$47,151-100,525",
    "$100,526+",
];

const GENDERS: &[&str] = &["Male", "Female", "Other"];

const RACE_DETAILED: &[&str] = &[
    "Hispanic or Latino",
    "White (not Hispanic or Latino)",
    "Black or African American",
    "Asian",
    "American Indian or Alaska Native",
    "Native Hawaiian or Other Pacific Islander",
];

const RACE_COARSE: &[&str] = &["White", "Black", "Hispanic or Latino", "Asian"];

const US_STATES: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

const LOCATION_COARSE: &[&str] = &["Urban", "Suburban", "Rural", "Nationwide"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub revision: String,
    pub age_groups: Vec<String>,
    pub income_brackets: Vec<String>,
    pub race_or_ethnicity: Vec<String>,
    pub location: Vec<String>,
    pub gender: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Vocabulary {
    /// Six race/ethnicity buckets and the fifty states.
    pub fn detailed() -> Self {
        Self {
            revision: "detailed".to_string(),
            age_groups: owned(AGE_GROUPS),
            income_brackets: owned(INCOME_BRACKETS),
            race_or_ethnicity: owned(RACE_DETAILED),
            location: owned(US_STATES),
            gender: owned(GENDERS),
        }
    }

    /// Four race/ethnicity buckets and four settlement-type locations.
    pub fn coarse() -> Self {
        Self {
            revision: "coarse".to_string(),
            age_groups: owned(AGE_GROUPS),
            income_brackets: owned(INCOME_BRACKETS),
            race_or_ethnicity: owned(RACE_COARSE),
            location: owned(LOCATION_COARSE),
            gender: owned(GENDERS),
        }
    }

    pub fn by_revision(name: &str) -> Result<Self, CoreError> {
        match name {
            "detailed" => Ok(Self::detailed()),
            "coarse" => Ok(Self::coarse()),
            other => Err(CoreError::UnknownVocabulary(other.to_string())),
        }
    }

    /// Load a vocabulary from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Resolve a `VOCABULARY` setting: a built-in revision name, or a path
    /// to a JSON file.
    pub fn resolve(setting: &str) -> Result<Self, CoreError> {
        match Self::by_revision(setting) {
            Ok(v) => Ok(v),
            Err(_) if setting.ends_with(".json") => Self::load(Path::new(setting)),
            Err(e) => Err(e),
        }
    }

    /// Allowed values for a category. `other_groups` is open-ended.
    pub fn values(&self, category: Category) -> &[String] {
        match category {
            Category::AgeGroups => &self.age_groups,
            Category::IncomeBrackets => &self.income_brackets,
            Category::RaceOrEthnicity => &self.race_or_ethnicity,
            Category::Location => &self.location,
            Category::Gender => &self.gender,
            Category::OtherGroups => &[],
        }
    }

    /// Values in `demographics` that are not part of this vocabulary.
    pub fn out_of_vocabulary<'a>(&self, demographics: &'a Demographics) -> Vec<(Category, &'a str)> {
        demographics
            .iter()
            .filter(|(category, _)| category.is_matchable())
            .flat_map(|(category, values)| {
                let allowed = self.values(category);
                values
                    .iter()
                    .filter(move |v| !allowed.contains(*v))
                    .map(move |v| (category, v.as_str()))
            })
            .collect()
    }

    /// Render the option lists as a prompt block.
    pub fn render(&self) -> String {
        let sections = [
            ("Age", Category::AgeGroups),
            ("Income", Category::IncomeBrackets),
            ("Race", Category::RaceOrEthnicity),
            ("Location", Category::Location),
            ("Gender", Category::Gender),
        ];

        sections
            .iter()
            .map(|(label, category)| format!("{label}:\n{}", self.values(*category).join(", ")))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::detailed()
    }
}
