use billfinder_core::keys::Collection;
use billfinder_storage::error::StorageError;
use billfinder_storage::memory::MemoryDocumentStore;
use billfinder_storage::store::{self, DocumentStore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, json};

#[tokio::test]
async fn get_missing_document_is_none() {
    let store = MemoryDocumentStore::new();
    let doc = store.get(Collection::Bills, "119-hr-1").await.expect("get succeeds");
    assert!(doc.is_none());
}

#[tokio::test]
async fn set_replaces_whole_document() {
    let store = MemoryDocumentStore::new();
    store
        .set(Collection::Bills, "b1", json!({"title": "A", "summary": "x"}))
        .await
        .unwrap();
    store
        .set(Collection::Bills, "b1", json!({"title": "B"}))
        .await
        .unwrap();

    let doc = store.get(Collection::Bills, "b1").await.unwrap().unwrap();
    assert_eq!(doc.data, json!({"title": "B"}));
}

#[tokio::test]
async fn merge_overlays_top_level_fields_only() {
    let store = MemoryDocumentStore::new();
    store
        .set(
            Collection::ChatHistories,
            "u1",
            json!({"messages": [{"sender": "user", "text": "old"}], "pinned": true}),
        )
        .await
        .unwrap();

    let mut fields = Map::new();
    fields.insert("messages".into(), json!([{"sender": "bot", "text": "new"}]));
    store.merge(Collection::ChatHistories, "u1", fields).await.unwrap();

    let doc = store.get(Collection::ChatHistories, "u1").await.unwrap().unwrap();
    assert_eq!(
        doc.data,
        json!({"messages": [{"sender": "bot", "text": "new"}], "pinned": true})
    );
}

#[tokio::test]
async fn list_newest_orders_by_date_and_skips_undated() {
    let store = MemoryDocumentStore::new();
    store
        .set(Collection::Bills, "a", json!({"date": "2025-01-01T00:00:00Z"}))
        .await
        .unwrap();
    store
        .set(Collection::Bills, "b", json!({"date": "2025-03-01T00:00:00Z"}))
        .await
        .unwrap();
    store
        .set(Collection::Bills, "c", json!({"date": "2025-02-01T00:00:00Z"}))
        .await
        .unwrap();
    store.set(Collection::Bills, "d", json!({})).await.unwrap();

    let newest = store.list_newest(Collection::Bills, 10).await.unwrap();
    let ids: Vec<_> = newest.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["b", "c", "a"]);

    let limited = store.list_newest(Collection::Bills, 2).await.unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn list_uses_id_order_and_limit() {
    let store = MemoryDocumentStore::new();
    for id in ["c", "a", "b"] {
        store.set(Collection::Bills, id, json!({})).await.unwrap();
    }
    let docs = store.list(Collection::Bills, 2).await.unwrap();
    let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[tokio::test]
async fn simulated_outages_surface_as_errors() {
    let store = MemoryDocumentStore::new();

    store.set_ordering_unavailable(true);
    assert!(matches!(
        store.list_newest(Collection::Bills, 5).await,
        Err(StorageError::Ordering(_))
    ));
    assert!(store.list(Collection::Bills, 5).await.is_ok());

    store.set_unavailable(true);
    assert!(matches!(
        store.get(Collection::Users, "u").await,
        Err(StorageError::Unavailable(_))
    ));
}

#[tokio::test]
async fn invalid_ids_are_rejected() {
    let store = MemoryDocumentStore::new();
    let err = store.set(Collection::Users, "a/b", json!({})).await;
    assert!(matches!(err, Err(StorageError::InvalidKey(_))));
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Note {
    text: String,
}

#[tokio::test]
async fn typed_helpers_round_trip() {
    let store = MemoryDocumentStore::new();
    let note = Note {
        text: "hello".into(),
    };
    store::save(&store, Collection::Users, "n1", &note).await.unwrap();

    let loaded: Option<Note> = store::load(&store, Collection::Users, "n1").await.unwrap();
    assert_eq!(loaded, Some(note));

    let missing: Option<Note> = store::load(&store, Collection::Users, "n2").await.unwrap();
    assert!(missing.is_none());
}
