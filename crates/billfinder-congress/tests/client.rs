use billfinder_congress::types::BillRef;
use billfinder_congress::{BillSource, CongressClient, CongressError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hr(number: &str) -> BillRef {
    BillRef {
        congress: 119,
        bill_type: "HR".to_string(),
        number: number.to_string(),
    }
}

#[tokio::test]
async fn listing_uses_header_key_and_sort() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bill"))
        .and(header("x-api-key", "secret"))
        .and(query_param("limit", "100"))
        .and(query_param("sort", "updateDate desc"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bills": [
                {
                    "congress": 119,
                    "type": "HR",
                    "number": "1234",
                    "title": "Campus Housing Act",
                    "updateDate": "2025-03-01",
                    "latestAction": {"actionDate": "2025-02-27", "text": "Referred to committee."}
                },
                {"congress": "not a number"}
            ],
            "pagination": {"count": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CongressClient::new("secret", server.uri()).expect("client builds");
    let page = client.recent_bills(100).await.expect("listing succeeds");

    let bills = page.bills.expect("bills array present");
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].number, "1234");
    assert_eq!(bills[0].latest_action_text(), Some("Referred to committee."));
    assert_eq!(bills[0].latest_action_date(), Some("2025-02-27"));
    assert_eq!(page.raw["pagination"]["count"], 2);
}

#[tokio::test]
async fn listing_without_bills_keeps_raw_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "rate limit"})))
        .mount(&server)
        .await;

    let client = CongressClient::new("k", server.uri()).expect("client builds");
    let page = client.recent_bills(100).await.expect("request succeeds");

    assert!(page.bills.is_none());
    assert_eq!(page.raw, json!({"error": "rate limit"}));
}

#[tokio::test]
async fn listing_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bill"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let client = CongressClient::new("k", server.uri()).expect("client builds");
    let err = client.recent_bills(10).await.expect_err("should fail");
    assert!(matches!(err, CongressError::Status { status: 503, .. }));
}

#[tokio::test]
async fn summary_uses_query_key_and_lowercase_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bill/119/hr/1234/summaries"))
        .and(query_param("api_key", "secret"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summaries": [
                {"text": "<p>Latest summary.</p>"},
                {"text": "Older summary."}
            ]
        })))
        .mount(&server)
        .await;

    let client = CongressClient::new("secret", server.uri()).expect("client builds");
    let summary = client.latest_summary(&hr("1234")).await.expect("lookup succeeds");
    assert_eq!(summary.as_deref(), Some("<p>Latest summary.</p>"));
}

#[tokio::test]
async fn bill_without_summaries_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bill/119/hr/9/summaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summaries": []})))
        .mount(&server)
        .await;

    let client = CongressClient::new("k", server.uri()).expect("client builds");
    assert_eq!(client.latest_summary(&hr("9")).await.expect("ok"), None);
}

#[tokio::test]
async fn xml_link_comes_from_first_text_version() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bill/119/hr/1234/text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "textVersions": [
                {"formats": [
                    {"type": "Formatted Text", "url": "https://example.test/1.htm"},
                    {"type": "Formatted XML", "url": "https://example.test/1.xml"}
                ]},
                {"formats": [
                    {"type": "Formatted XML", "url": "https://example.test/old.xml"}
                ]}
            ]
        })))
        .mount(&server)
        .await;

    let client = CongressClient::new("k", server.uri()).expect("client builds");
    let link = client.formatted_xml_link(&hr("1234")).await.expect("ok");
    assert_eq!(link.as_deref(), Some("https://example.test/1.xml"));
}

#[tokio::test]
async fn missing_xml_format_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bill/119/hr/5/text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "textVersions": [{"formats": [{"type": "PDF", "url": "https://example.test/5.pdf"}]}]
        })))
        .mount(&server)
        .await;

    let client = CongressClient::new("k", server.uri()).expect("client builds");
    assert_eq!(client.formatted_xml_link(&hr("5")).await.expect("ok"), None);
}

#[tokio::test]
async fn document_text_is_stripped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/1234.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<?xml version=\"1.0\"?>\n<bill>\n  <section>SEC. 1. Short   title.</section>\n</bill>",
        ))
        .mount(&server)
        .await;

    let client = CongressClient::new("k", server.uri()).expect("client builds");
    let text = client
        .fetch_document_text(&format!("{}/docs/1234.xml", server.uri()))
        .await
        .expect("fetch succeeds");
    assert_eq!(text, "SEC. 1. Short title.");
}
