use billfinder_core::category::Category;
use billfinder_core::classification::ClassificationOutcome;
use billfinder_core::vocabulary::Vocabulary;
use billfinder_llm::classify::{categorization_prompt, classify_bill};
use billfinder_llm::model::ChatRole;
use billfinder_llm::scripted::ScriptedModel;

#[tokio::test]
async fn two_passes_feed_analysis_into_categorization() {
    let model = ScriptedModel::with_replies([
        "Mostly affects young adults in Texas.",
        "```json\n{\"age_groups\": [\"19-25\"], \"location\": [\"Texas\"]}\n```",
    ]);

    let result = classify_bill(&model, &Vocabulary::detailed(), "Campus Act", "Referred")
        .await
        .expect("classification succeeds");

    assert_eq!(result.analysis, "Mostly affects young adults in Texas.");
    let demographics = result.outcome.into_demographics().expect("parsed");
    assert_eq!(demographics.get(Category::AgeGroups), ["19-25"]);

    let calls = model.calls();
    assert_eq!(calls.len(), 2);
    for call in &calls {
        assert!(call.system_prompt.is_none());
        assert_eq!(call.messages.len(), 1);
        assert_eq!(call.messages[0].role, ChatRole::User);
    }
    assert!(calls[0].messages[0].content.contains("Bill Title: Campus Act"));
    assert!(calls[0].messages[0].content.contains("Bill Description: Referred"));
    assert!(calls[1].messages[0].content.contains("Mostly affects young adults in Texas."));
}

#[tokio::test]
async fn unparsable_categorization_is_not_an_error() {
    let model = ScriptedModel::with_replies(["Analysis.", "Sorry, I cannot help with that."]);

    let result = classify_bill(&model, &Vocabulary::detailed(), "Act", "Desc")
        .await
        .expect("still succeeds");

    assert!(matches!(result.outcome, ClassificationOutcome::Unparsable { .. }));
    assert_eq!(result.raw_categories, "Sorry, I cannot help with that.");
}

#[tokio::test]
async fn transport_failure_propagates() {
    let model = ScriptedModel::new();
    model.push_failure("connection reset");

    let result = classify_bill(&model, &Vocabulary::detailed(), "Act", "Desc").await;
    assert!(result.is_err());
    assert_eq!(model.calls().len(), 1);
}

#[tokio::test]
async fn out_of_vocabulary_values_are_kept() {
    let model = ScriptedModel::with_replies(["Analysis.", "{\"age_groups\": [\"toddlers\"]}"]);

    let result = classify_bill(&model, &Vocabulary::detailed(), "Act", "Desc")
        .await
        .expect("succeeds");
    let demographics = result.outcome.into_demographics().expect("parsed");
    assert_eq!(demographics.get(Category::AgeGroups), ["toddlers"]);
}

#[test]
fn categorization_prompt_lists_vocabulary_and_schema() {
    let prompt = categorization_prompt("Farmers.", &Vocabulary::coarse());
    assert!(prompt.contains("Urban, Suburban, Rural, Nationwide"));
    assert!(prompt.contains("\"race_or_ethnicity\": []"));
    assert!(!prompt.contains("other_groups"));
    assert!(prompt.contains("Farmers."));
}
