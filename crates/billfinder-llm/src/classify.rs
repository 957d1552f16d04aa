//! Two-pass population classification of a bill.
//!
//! Pass one asks the model for a free-text analysis of which populations a
//! bill affects. Pass two asks it to compress that analysis into the fixed
//! category schema, choosing only from the active [`Vocabulary`]. The reply
//! to pass two is parsed with [`parse_classification`]; an unparsable reply
//! is not an error.

use tracing::{info, warn};

use billfinder_core::category::Category;
use billfinder_core::classification::{ClassificationOutcome, parse_classification};
use billfinder_core::vocabulary::Vocabulary;

use crate::error::LlmError;
use crate::model::{CompletionModel, ask};

/// Prompt for the free-text analysis pass.
pub fn analysis_prompt(title: &str, description: &str) -> String {
    format!(
        "Analyze the following bill and identify the specific populations it would affect.\n\
         \n\
         Bill Title: {title}\n\
         Bill Description: {description}\n\
         \n\
         Consider these groupings:\n\
         - Age groups (children, young adults, working-age adults, seniors)\n\
         - Economic groups (low-income households, middle class, high earners, small businesses)\n\
         - Geographic areas (rural, urban, specific states or regions)\n\
         - Occupational groups (farmers, healthcare workers, teachers, veterans)\n\
         - Other groups (students, homeowners, immigrants, people with disabilities)\n\
         \n\
         Give a concise summary of which populations are primarily affected and how. \
         Do not mention that the analysis is based on the bill title."
    )
}

/// Prompt for the structured categorization pass.
pub fn categorization_prompt(analysis: &str, vocabulary: &Vocabulary) -> String {
    let template = Category::CLASSIFIED
        .iter()
        .map(|c| format!("    \"{}\": []", c.key()))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "Based on this population analysis, categorize the affected groups using ONLY \
         the following options.\n\
         \n\
         {options}\n\
         \n\
         Population Analysis:\n\
         {analysis}\n\
         \n\
         Return ONLY a JSON object shaped like this, using empty arrays where nothing \
         applies. Put no text outside the JSON:\n\
         \n\
         {{\n{template}\n}}",
        options = vocabulary.render(),
    )
}

/// Everything the pipeline produced for one bill.
#[derive(Debug, Clone)]
pub struct BillClassification {
    /// Pass-one free text, stored as the population summary.
    pub analysis: String,
    /// Pass-two reply exactly as the model returned it.
    pub raw_categories: String,
    pub outcome: ClassificationOutcome,
}

/// Run both passes for one bill.
///
/// Transport failures from either pass are returned as errors; a pass-two
/// reply that does not parse yields [`ClassificationOutcome::Unparsable`].
pub async fn classify_bill(
    model: &dyn CompletionModel,
    vocabulary: &Vocabulary,
    title: &str,
    description: &str,
) -> Result<BillClassification, LlmError> {
    let analysis = ask(model, &analysis_prompt(title, description)).await?;
    let raw_categories = ask(model, &categorization_prompt(&analysis, vocabulary)).await?;
    let outcome = parse_classification(&raw_categories);

    match &outcome {
        ClassificationOutcome::Parsed(demographics) => {
            for (category, value) in vocabulary.out_of_vocabulary(demographics) {
                warn!(
                    title,
                    category = %category,
                    value,
                    revision = %vocabulary.revision,
                    "model returned a value outside the vocabulary"
                );
            }
            info!(title, model = model.model_id(), "bill classified");
        }
        ClassificationOutcome::Unparsable { reason } => {
            warn!(title, reason = %reason, "categorization reply could not be parsed");
        }
    }

    Ok(BillClassification {
        analysis,
        raw_categories,
        outcome,
    })
}
