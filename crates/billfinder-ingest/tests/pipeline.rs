use billfinder_congress::scripted::ScriptedBillSource;
use billfinder_congress::types::BillRef;
use billfinder_core::category::Category;
use billfinder_core::keys::Collection;
use billfinder_core::vocabulary::Vocabulary;
use billfinder_ingest::error::IngestError;
use billfinder_ingest::pipeline::{BillOutcome, IngestOptions, ingest};
use billfinder_ingest::preview::analyze_preview;
use billfinder_llm::scripted::ScriptedModel;
use billfinder_storage::memory::MemoryDocumentStore;
use billfinder_storage::store::DocumentStore;
use serde_json::{Value, json};

fn listing() -> Value {
    json!({
        "bills": [
            {
                "congress": 119,
                "type": "HR",
                "number": "1234",
                "title": "Campus Housing Act",
                "updateDate": "2025-03-01",
                "latestAction": {"actionDate": "2025-02-27", "text": "Referred to committee."}
            },
            {
                "congress": 119,
                "type": "S",
                "number": "77",
                "title": "Rural Clinics Act",
                "updateDate": "2025-02-28"
            },
            {
                "congress": 119,
                "type": "HR",
                "number": "9",
                "title": "Third Act",
                "updateDate": "2025-02-20"
            }
        ]
    })
}

fn hr1234() -> BillRef {
    BillRef {
        congress: 119,
        bill_type: "HR".to_string(),
        number: "1234".to_string(),
    }
}

fn s77() -> BillRef {
    BillRef {
        congress: 119,
        bill_type: "S".to_string(),
        number: "77".to_string(),
    }
}

fn options(batch: usize) -> IngestOptions {
    IngestOptions {
        batch,
        ..IngestOptions::default()
    }
}

#[tokio::test]
async fn classified_bills_are_written_with_stored_field_names() {
    let source = ScriptedBillSource::new()
        .with_listing(listing())
        .with_summary(&hr1234(), "Official summary.")
        .with_xml_link(&hr1234(), "https://example.test/1234.xml");
    let model = ScriptedModel::with_replies([
        "Students aged 19-25.",
        "```json\n{\"age_groups\": [\"19-25\"]}\n```",
    ]);
    let store = MemoryDocumentStore::new();

    let report = ingest(&source, &model, &store, &Vocabulary::detailed(), &options(1))
        .await
        .expect("ingest succeeds");

    assert_eq!(report.bills.len(), 1);
    assert_eq!(report.bills[0].outcome, BillOutcome::Stored);

    let doc = store
        .get(Collection::Bills, "119-hr-1234")
        .await
        .expect("get")
        .expect("stored");
    assert_eq!(doc.data["title"], "Campus Housing Act");
    assert_eq!(doc.data["original"], "Official summary.");
    assert_eq!(doc.data["summary"], "Referred to committee.");
    assert_eq!(doc.data["demographics"], json!({"age_groups": ["19-25"]}));
    assert_eq!(doc.data["population affect summary"], "Students aged 19-25.");
    assert_eq!(doc.data["latest action date"], "2025-02-27");
    assert_eq!(doc.data["xml link"], "https://example.test/1234.xml");
    assert!(doc.data["date"].is_string());
}

#[tokio::test]
async fn unparsable_classification_still_persists_with_null() {
    let source = ScriptedBillSource::new().with_listing(listing());
    let model = ScriptedModel::with_replies(["Analysis.", "no json here"]);
    let store = MemoryDocumentStore::new();

    let report = ingest(&source, &model, &store, &Vocabulary::detailed(), &options(1))
        .await
        .expect("ingest succeeds");

    assert_eq!(report.stored(), 1);
    assert_eq!(report.classified(), 0);
    let doc = store.get(Collection::Bills, "119-hr-1234").await.expect("get").expect("stored");
    assert_eq!(doc.data["demographics"], Value::Null);
    assert_eq!(doc.data["original"], Value::Null);
}

#[tokio::test]
async fn model_failure_degrades_to_null_analysis() {
    let source = ScriptedBillSource::new().with_listing(listing());
    let model = ScriptedModel::new();
    model.push_failure("throttled");
    let store = MemoryDocumentStore::new();

    let report = ingest(&source, &model, &store, &Vocabulary::detailed(), &options(1))
        .await
        .expect("ingest succeeds");

    assert_eq!(report.bills[0].outcome, BillOutcome::Stored);
    assert!(report.bills[0].analysis.is_none());
    let doc = store.get(Collection::Bills, "119-hr-1234").await.expect("get").expect("stored");
    assert_eq!(doc.data["population affect summary"], Value::Null);
}

#[tokio::test]
async fn lookup_failures_become_null_and_defaults_apply() {
    let source = ScriptedBillSource::new()
        .with_listing(listing())
        .with_failing_bill(&s77());
    let model = ScriptedModel::with_replies(["a", "{}", "b", "{}"]);
    let store = MemoryDocumentStore::new();

    let report = ingest(&source, &model, &store, &Vocabulary::detailed(), &options(2))
        .await
        .expect("ingest succeeds");
    assert_eq!(report.stored(), 2);

    let doc = store.get(Collection::Bills, "119-s-77").await.expect("get").expect("stored");
    assert_eq!(doc.data["summary"], "No description available");
    assert_eq!(doc.data["original"], Value::Null);
    assert_eq!(doc.data["latest action date"], "N/A");
    assert_eq!(doc.data["xml link"], "");
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let source = ScriptedBillSource::new().with_listing(listing());
    let model = ScriptedModel::with_replies(["a", "{}"]);
    let store = MemoryDocumentStore::new();

    let opts = IngestOptions {
        batch: 1,
        persist: false,
        ..IngestOptions::default()
    };
    let report = ingest(&source, &model, &store, &Vocabulary::detailed(), &opts)
        .await
        .expect("ingest succeeds");

    assert_eq!(report.bills[0].outcome, BillOutcome::NotPersisted);
    assert!(store.is_empty(Collection::Bills).await);
}

#[tokio::test]
async fn untitled_bill_is_skipped() {
    let source = ScriptedBillSource::new().with_listing(json!({
        "bills": [{"congress": 119, "type": "HR", "number": "5"}]
    }));
    let model = ScriptedModel::with_replies(["a", "{}"]);
    let store = MemoryDocumentStore::new();

    let report = ingest(&source, &model, &store, &Vocabulary::detailed(), &options(5))
        .await
        .expect("ingest succeeds");

    assert!(matches!(report.bills[0].outcome, BillOutcome::Skipped { .. }));
    assert!(store.is_empty(Collection::Bills).await);
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn preview_labels_untitled_bills() {
    let source = ScriptedBillSource::new().with_listing(json!({
        "bills": [{"congress": 119, "type": "HR", "number": "5"}]
    }));
    let model = ScriptedModel::with_replies(["Nobody in particular.", "{}"]);
    let store = MemoryDocumentStore::new();

    let bills = analyze_preview(&source, &model, &store, &Vocabulary::detailed())
        .await
        .expect("preview succeeds");

    assert_eq!(bills[0].title, "No title available");
    assert_eq!(bills[0].bill_number, "119-hr-5");
    assert!(model.calls()[0].messages[0].content.contains("No title available"));
}

#[tokio::test]
async fn reingesting_overwrites() {
    let source = ScriptedBillSource::new().with_listing(listing());
    let store = MemoryDocumentStore::new();

    let first = ScriptedModel::with_replies(["a", "{\"gender\": \"Female\"}"]);
    ingest(&source, &first, &store, &Vocabulary::detailed(), &options(1))
        .await
        .expect("first run");
    let second = ScriptedModel::with_replies(["b", "{\"gender\": [\"Male\"]}"]);
    ingest(&source, &second, &store, &Vocabulary::detailed(), &options(1))
        .await
        .expect("second run");

    assert_eq!(store.len(Collection::Bills).await, 1);
    let doc = store.get(Collection::Bills, "119-hr-1234").await.expect("get").expect("stored");
    assert_eq!(doc.data["demographics"]["gender"], json!(["Male"]));
}

#[tokio::test]
async fn missing_bills_array_carries_payload() {
    let source = ScriptedBillSource::new().with_listing(json!({"message": "over limit"}));
    let model = ScriptedModel::new();
    let store = MemoryDocumentStore::new();

    let err = ingest(&source, &model, &store, &Vocabulary::detailed(), &options(2))
        .await
        .expect_err("should fail");
    match err {
        IngestError::NoBills { payload } => assert_eq!(payload["message"], "over limit"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(model.calls().is_empty());
}

#[tokio::test]
async fn unavailable_source_is_an_error() {
    let source = ScriptedBillSource::new();
    let model = ScriptedModel::new();
    let store = MemoryDocumentStore::new();

    let err = ingest(&source, &model, &store, &Vocabulary::detailed(), &options(2))
        .await
        .expect_err("should fail");
    assert!(matches!(err, IngestError::Source(_)));
}

#[tokio::test]
async fn preview_classifies_two_without_writing() {
    let source = ScriptedBillSource::new()
        .with_listing(listing())
        .with_summary(&hr1234(), "never fetched");
    let model = ScriptedModel::with_replies([
        "Students.",
        "{\"age_groups\": [\"19-25\"]}",
        "Rural residents.",
        "not json",
    ]);
    let store = MemoryDocumentStore::new();

    let bills = analyze_preview(&source, &model, &store, &Vocabulary::detailed())
        .await
        .expect("preview succeeds");

    assert_eq!(bills.len(), 2);
    assert_eq!(bills[0].bill_number, "119-hr-1234");
    assert_eq!(bills[0].update_date, "2025-03-01");
    assert_eq!(bills[0].affected_populations_summary.as_deref(), Some("Students."));
    assert_eq!(
        bills[0].categorized_populations[Category::AgeGroups.key()],
        json!(["19-25"])
    );
    assert_eq!(bills[1].description, "No description available");
    assert_eq!(bills[1].categorized_populations, json!("not json"));
    assert_eq!(model.calls().len(), 4);
    assert!(store.is_empty(Collection::Bills).await);
}
