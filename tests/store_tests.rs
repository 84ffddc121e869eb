mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeSummarizer, rec, test_config};
use rushboard::core::models::{ApplicantStatus, FieldMap, NewInteraction};
use rushboard::errors::RushError;
use rushboard::pipeline::SummaryPipeline;
use rushboard::store::{AirtableClient, RecordStore};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APPLICANTS_PATH: &str = "/appTestBase/Applicants";
const INTERACTIONS_PATH: &str = "/appTestBase/Interactions";

fn client_for(server: &MockServer) -> AirtableClient {
    let mut config = test_config();
    config.airtable_api_url = server.uri();
    AirtableClient::new(&config).unwrap()
}

fn record(id: &str, fields: Value) -> Value {
    json!({ "id": id, "createdTime": "2025-02-01T12:00:00.000Z", "fields": fields })
}

#[tokio::test]
async fn test_list_applicants_maps_fields_and_keeps_unknown_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPLICANTS_PATH))
        .and(header("Authorization", "Bearer airtable-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [record(&rec(1), json!({
                "applicant_name": "Alex Kim",
                "email": "alex@example.com",
                "year": 2028,
                "major": "Physics",
                "status": "Ongoing",
                "day_1": true,
                "elo": 1510
            }))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let applicants = client_for(&server).list_applicants(None).await.unwrap();

    assert_eq!(applicants.len(), 1);
    let alex = &applicants[0];
    assert_eq!(alex.id, rec(1));
    assert_eq!(alex.applicant_name, "Alex Kim");
    assert_eq!(alex.year, Some(2028));
    assert_eq!(alex.status, Some(ApplicantStatus::Ongoing));
    assert_eq!(alex.day_1, Some(true));
    assert_eq!(alex.extra.get("elo"), Some(&json!(1510)));
    assert_eq!(alex.created_at.as_deref(), Some("2025-02-01T12:00:00.000Z"));
}

#[tokio::test]
async fn test_list_applicants_tolerates_unexpected_cell_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPLICANTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                record(&rec(1), json!({ "applicant_name": "Alex", "status": "Ongoing" })),
                record(&rec(2), json!({
                    "applicant_name": "Blake",
                    "status": "Applied",
                    "year": "Sophomore",
                    "photo": [{ "url": "https://example.com/blake.jpg" }]
                })),
                record(&rec(3), json!({ "applicant_name": "Casey", "status": "Not Applied" }))
            ]
        })))
        .mount(&server)
        .await;

    let applicants = client_for(&server).list_applicants(None).await.unwrap();

    assert_eq!(applicants.len(), 3);
    assert_eq!(applicants[0].status, Some(ApplicantStatus::Ongoing));
    let blake = &applicants[1];
    assert_eq!(blake.applicant_name, "Blake");
    assert_eq!(blake.status, Some(ApplicantStatus::Applied));
    assert_eq!(blake.year, None);
    assert_eq!(blake.photo, None);
    assert_eq!(
        applicants[2].status,
        Some(ApplicantStatus::Other("Not Applied".to_string()))
    );
}

#[tokio::test]
async fn test_batch_runs_over_applicants_with_unlisted_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPLICANTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                record(&rec(1), json!({ "applicant_name": "Alex", "status": "Ongoing" })),
                record(&rec(2), json!({ "applicant_name": "Blake", "status": "Applied" }))
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(INTERACTIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": [] })))
        .mount(&server)
        .await;

    let pipeline = SummaryPipeline::new(
        Arc::new(client_for(&server)),
        Arc::new(FakeSummarizer::default()),
        Duration::ZERO,
    );
    let report = pipeline.run_batch().await.unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.successful, 2);
    assert_eq!(report.results[1].applicant_name, "Blake");
}

#[tokio::test]
async fn test_list_applicants_passes_filter_formula() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPLICANTS_PATH))
        .and(query_param("filterByFormula", "{year}=2028"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let applicants = client_for(&server)
        .list_applicants(Some("{year}=2028"))
        .await
        .unwrap();
    assert!(applicants.is_empty());
}

#[tokio::test]
async fn test_list_follows_offset_cursor_across_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPLICANTS_PATH))
        .and(query_param("offset", "itrPage2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [record(&rec(2), json!({ "applicant_name": "Blake" }))]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(APPLICANTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [record(&rec(1), json!({ "applicant_name": "Alex" }))],
            "offset": "itrPage2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let applicants = client_for(&server).list_applicants(None).await.unwrap();

    let names: Vec<&str> = applicants.iter().map(|a| a.applicant_name.as_str()).collect();
    assert_eq!(names, vec!["Alex", "Blake"]);
}

#[tokio::test]
async fn test_list_applicants_non_2xx_is_store_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPLICANTS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client_for(&server).list_applicants(None).await;

    match result {
        Err(RushError::StoreUnavailable(msg)) => assert!(msg.contains("503")),
        other => panic!("expected StoreUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_store_is_store_unavailable() {
    let mut config = test_config();
    config.airtable_api_url = "http://127.0.0.1:1".to_string();
    let client = AirtableClient::new(&config).unwrap();

    let result = client.list_applicants(None).await;
    assert!(matches!(result, Err(RushError::StoreUnavailable(_))));
}

#[tokio::test]
async fn test_get_applicant_returns_none_on_404() {
    let server = MockServer::start().await;
    let id = rec(7);
    Mock::given(method("GET"))
        .and(path(format!("{APPLICANTS_PATH}/{id}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let applicant = client_for(&server).get_applicant(&id).await.unwrap();
    assert!(applicant.is_none());
}

#[tokio::test]
async fn test_get_applicant_other_errors_are_store_unavailable() {
    let server = MockServer::start().await;
    let id = rec(7);
    Mock::given(method("GET"))
        .and(path(format!("{APPLICANTS_PATH}/{id}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client_for(&server).get_applicant(&id).await;
    assert!(matches!(result, Err(RushError::StoreUnavailable(_))));
}

#[tokio::test]
async fn test_get_applicant_rejects_malformed_id_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server).get_applicant("../Interactions").await;
    assert!(matches!(result, Err(RushError::ValidationError(_))));
}

#[tokio::test]
async fn test_list_interactions_filters_by_applicant_and_keeps_order() {
    let server = MockServer::start().await;
    let applicant_id = rec(1);
    Mock::given(method("GET"))
        .and(path(INTERACTIONS_PATH))
        .and(query_param(
            "filterByFormula",
            format!("{{applicant_id}}='{applicant_id}'"),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                record(&rec(21), json!({ "applicant_id": applicant_id, "note": "second", "author_email": "a@x.com" })),
                record(&rec(20), json!({ "applicant_id": applicant_id, "note": "first", "author_email": "b@x.com" }))
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let interactions = client_for(&server)
        .list_interactions(Some(&applicant_id))
        .await
        .unwrap();

    let notes: Vec<&str> = interactions.iter().map(|i| i.note.as_str()).collect();
    assert_eq!(notes, vec!["second", "first"]);
    assert_eq!(interactions[0].author_email, "a@x.com");
}

#[tokio::test]
async fn test_update_applicant_sends_partial_patch() {
    let server = MockServer::start().await;
    let id = rec(3);
    Mock::given(method("PATCH"))
        .and(path(APPLICANTS_PATH))
        .and(body_json(json!({
            "records": [{ "id": id, "fields": { "notes_summary": "Solid candidate." } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [record(&id, json!({
                "applicant_name": "Casey",
                "notes_summary": "Solid candidate."
            }))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut fields = FieldMap::new();
    fields.insert("notes_summary".to_string(), json!("Solid candidate."));
    let updated = client_for(&server)
        .update_applicant(&id, fields)
        .await
        .unwrap();

    assert_eq!(updated.applicant_name, "Casey");
    assert_eq!(updated.notes_summary.as_deref(), Some("Solid candidate."));
}

#[tokio::test]
async fn test_update_applicant_failure_is_store_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(APPLICANTS_PATH))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .update_applicant(&rec(3), FieldMap::new())
        .await;
    assert!(matches!(result, Err(RushError::StoreUnavailable(_))));
}

#[tokio::test]
async fn test_create_interaction_posts_record() {
    let server = MockServer::start().await;
    let applicant_id = rec(1);
    Mock::given(method("POST"))
        .and(path(INTERACTIONS_PATH))
        .and(body_json(json!({
            "records": [{ "fields": {
                "applicant_id": applicant_id,
                "author_email": "brother@example.com",
                "note": "Came to the cookout.",
                "Dashboard": ["recDash0000000001"]
            } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [record(&rec(30), json!({
                "applicant_id": applicant_id,
                "author_email": "brother@example.com",
                "note": "Came to the cookout."
            }))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_interaction(&NewInteraction {
            applicant_id: applicant_id.clone(),
            author_email: "brother@example.com".to_string(),
            note: "Came to the cookout.".to_string(),
            extra: serde_json::from_value(json!({ "Dashboard": ["recDash0000000001"] })).unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, rec(30));
    assert_eq!(created.note, "Came to the cookout.");
}
