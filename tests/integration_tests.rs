//! Integration tests using wiremock to simulate the Reyah API.

use parking_lot::Mutex;
use reyah::{
    Client, ContentType, CreateDocumentModelFieldRequest, CreateExtractionJobRequest,
    CreateOAuthClient, CreateRenderingJobRequest, Error, EventEmitter, FeedElementType, FieldKind,
    Filter, GrantType, JobStatus, Pagination, RangeSelector, Register, RenderingJobField,
    ResourceName, RetryPolicy, TokenAuthProvider, UpdateFieldRequest,
};
use serde_json::json;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> Client {
    Client::builder()
        .base_url(&server.uri())
        .unwrap()
        .retry_policy(RetryPolicy::immediate(3))
        .auth_provider(Arc::new(TokenAuthProvider::from_access_token("abc")))
        .build()
        .unwrap()
}

fn record_events(events: &EventEmitter) -> Arc<Mutex<Vec<&'static str>>> {
    let names = Arc::new(Mutex::new(Vec::new()));
    let sink = names.clone();
    events.subscribe(move |event| sink.lock().push(event.name()));
    names
}

#[tokio::test]
async fn test_quota_retrieve_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quota/resources/extraction_job"))
        .and(header("authorization", "Bearer abc"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource_name": "extraction_job",
            "quotas": {
                "monthly": {"current": 12, "max": "100"},
                "daily": {"current": "3", "max": 10}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let quota = client(&mock_server)
        .quota()
        .retrieve(ResourceName::ExtractionJob)
        .await
        .unwrap();

    assert_eq!(quota.resource_name, "extraction_job");
    let monthly = quota.quota(RangeSelector::Monthly).unwrap();
    assert_eq!((monthly.current, monthly.max), (12, 100));
    assert_eq!(quota.quota(RangeSelector::Daily).unwrap().current, 3);
    assert!(quota.quota(RangeSelector::Hourly).is_none());
}

#[tokio::test]
async fn test_user_agent_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quota/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(&mock_server.uri())
        .unwrap()
        .user_agent_suffix("QuotaReport/1.0")
        .build()
        .unwrap();

    client.quota().alive().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let user_agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(user_agent.starts_with("Reyah-SDK-Rust/"));
    assert!(user_agent.ends_with(" QuotaReport/1.0"));
}

#[tokio::test]
async fn test_health_check_needs_no_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false, "reason": "db down"})))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(&mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let status = client.profile().alive().await.unwrap();
    assert!(!status.ok);
    assert_eq!(status.reason.as_deref(), Some("db down"));

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_retry_on_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quota/resources"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/quota/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quotas": [{"resource_name": "jobs", "quotas": {}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let events = record_events(client.events());

    let quotas = client.quota().retrieve_all().await.unwrap();

    assert_eq!(quotas.quotas.len(), 1);
    assert_eq!(quotas.quotas[0].resource_name, "jobs");

    let events = events.lock();
    assert_eq!(events.iter().filter(|n| **n == "request").count(), 1);
    assert_eq!(events.iter().filter(|n| **n == "transport:request").count(), 3);
    assert_eq!(events.iter().filter(|n| **n == "transport:error").count(), 2);
    assert_eq!(events.iter().filter(|n| **n == "error").count(), 0);
}

#[tokio::test]
async fn test_server_error_exhausts_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": 13, "reyah_err": "ErrInternal", "message": "boom"}
        })))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let events = record_events(client.events());

    let err = client.profile().me().await.unwrap_err();

    match err {
        Error::Unknown(e) => {
            assert_eq!(e.code, 500);
            assert_eq!(e.kind(), "ErrInternal");
            assert!(e.message.ends_with("\nboom"));
        }
        other => panic!("Expected Unknown error, got {:?}", other),
    }
    assert_eq!(events.lock().iter().filter(|n| **n == "error").count(), 1);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oauth/clients/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 5, "reyah_err": "ErrNotFound", "status": "NOT_FOUND", "message": "no client"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .oauth()
        .retrieve_client(7)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    match err {
        Error::NotFound(e) => {
            let body = e.body.unwrap();
            assert_eq!(body.code, 5);
            assert_eq!(body.status, "NOT_FOUND");
            assert_eq!(body.message, "no client");
        }
        other => panic!("Expected NotFound error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/quota/resources"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).quota().retrieve_all().await.unwrap_err();

    match err {
        Error::Unauthorized(e) => {
            assert_eq!(e.kind(), "UnknownErr");
            assert_eq!(e.response.unwrap().data, json!("token expired"));
        }
        other => panic!("Expected Unauthorized error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limited_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oauth/scopes"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).oauth().list_scopes().await.unwrap_err();
    assert!(matches!(err, Error::TooManyRequests(_)));
}

#[tokio::test]
async fn test_connection_refused_is_retried() {
    // Bind and release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = Client::builder()
        .base_url(&format!("http://127.0.0.1:{}", port))
        .unwrap()
        .retry_policy(RetryPolicy::immediate(3))
        .build()
        .unwrap();
    let events = record_events(client.events());

    let err = client.quota().alive().await.unwrap_err();

    assert_eq!(err.status(), Some(0));
    assert!(err.request_error().unwrap().response.is_none());

    let events = events.lock();
    assert_eq!(events.iter().filter(|n| **n == "transport:request").count(), 3);
    assert_eq!(events.iter().filter(|n| **n == "transport:error").count(), 3);
    assert_eq!(events.iter().filter(|n| **n == "error").count(), 1);
}

#[tokio::test]
async fn test_missing_auth_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(&mock_server.uri())
        .unwrap()
        .build()
        .unwrap();

    let err = client.profile().me().await.unwrap_err();
    assert!(matches!(err, Error::NoAuthProvided));

    client.use_auth_provider(Arc::new(TokenAuthProvider::from_access_token("late")));
    assert_eq!(client.auth_provider().unwrap().name(), "token");
}

#[tokio::test]
async fn test_profile_register() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/profile/register"))
        .and(body_json(json!({"company_name": "Acme", "city": "Lyon"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "u1",
            "first_name": "Ada",
            "is_registered": true,
            "company_name": "Acme",
            "city": "Lyon"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let register = Register {
        company_name: Some("Acme".into()),
        city: Some("Lyon".into()),
        ..Default::default()
    };
    let profile = client(&mock_server)
        .profile()
        .register(&register)
        .await
        .unwrap();

    assert!(profile.is_registered);
    assert_eq!(profile.first_name, "Ada");
    assert_eq!(profile.last_name, "");
}

#[tokio::test]
async fn test_profile_invitations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile/register/invitation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "invitations": [{"user_id": "u1", "code": "XYZ", "consumed": false}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/profile/register/invitation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": "u1", "code": "NEW"})))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let invitations = client.profile().list_invitations().await.unwrap();
    assert_eq!(invitations.len(), 1);
    assert_eq!(invitations[0].code, "XYZ");

    let invitation = client.profile().create_invitation().await.unwrap();
    assert_eq!(invitation.code, "NEW");
}

#[tokio::test]
async fn test_oauth_client_lifecycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/clients"))
        .and(body_json(json!({"name": "ci", "grant_types": ["client_credentials"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "client_id": 42,
            "name": "ci",
            "grant_types": ["client_credentials"],
            "client_secret": "s3cret"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/oauth/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clients": [{"client_id": 42, "name": "ci"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/clients/42/secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "client_id": 42,
            "client_secret": "rotated"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/oauth/clients/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let oauth = client.oauth();

    let created = oauth
        .create_client(&CreateOAuthClient {
            name: "ci".into(),
            description: None,
            redirect_uris: None,
            grant_types: vec![GrantType::ClientCredentials],
            scopes: None,
            logo_uri: None,
        })
        .await
        .unwrap();
    assert_eq!(created.client.client_id, 42);
    assert_eq!(created.client_secret, "s3cret");

    let clients = oauth.retrieve_all_clients().await.unwrap();
    assert_eq!(clients[0].name, "ci");

    let rotated = oauth.regen_secret(42).await.unwrap();
    assert_eq!(rotated.client_secret, "rotated");

    oauth.delete_client(42).await.unwrap();
}

#[tokio::test]
async fn test_feed_pagination_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed/elements"))
        .and(query_param("page", "2"))
        .and(query_param("size", "50"))
        .and(query_param("start_at", "2024-01-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed_elements": [
                {"id": "a", "type": "INVALID_JOB", "invalid_job": {"job_id": "j1"}},
                {"id": "b", "type": "SOMETHING_NEW", "unsupported_element": {"x": 1}}
            ],
            "pagination_status": {"current_page": "2", "total_pages": 3, "page_size": 50}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = client(&mock_server)
        .feed()
        .retrieve_all_elements("2024-01-01T00:00:00Z", Some(Pagination { page: 2, size: 50 }))
        .await
        .unwrap();

    assert_eq!(page.pagination_status.current_page, 2);
    assert_eq!(page.pagination_status.total_pages, 3);
    assert_eq!(page.elements[0].element_type, FeedElementType::InvalidJob);
    assert_eq!(page.elements[0].invalid_job.as_ref().unwrap().job_id, "j1");
    assert_eq!(page.elements[1].element_type, FeedElementType::Unsupported);
}

#[tokio::test]
async fn test_feed_set_seen() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/feed/element/abc"))
        .and(query_param("element_id", "abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    client(&mock_server).feed().set_seen("abc").await.unwrap();
}

#[tokio::test]
async fn test_truncated_error_body_keeps_status() {
    // Announces a longer body than it sends, then hangs up
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    std::thread::spawn(move || {
        for mut stream in listener.incoming().take(3).flatten() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"err",
            );
        }
    });

    let client = Client::builder()
        .base_url(&format!("http://127.0.0.1:{}", port))
        .unwrap()
        .retry_policy(RetryPolicy::immediate(3))
        .build()
        .unwrap();
    let events = record_events(client.events());

    let err = client.profile().alive().await.unwrap_err();

    match err {
        Error::NotFound(e) => {
            assert_eq!(e.code, 404);
            assert_eq!(e.response.unwrap().data, serde_json::Value::Null);
        }
        other => panic!("Expected NotFound error, got {:?}", other),
    }
    assert_eq!(events.lock().iter().filter(|n| **n == "transport:request").count(), 1);
}

#[tokio::test]
async fn test_data_type_list_with_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datatype/types"))
        .and(query_param("only", "id,name"))
        .and(query_param("page", "1"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "name": "iban"},
            {"id": 2, "name": "date"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/datatype/types/2/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data_fields": [4, "5"]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/datatype/types/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let service = client.data_type();

    let types = service
        .retrieve_all(Some(&Filter::only(["id", "name"])), Some(Pagination { page: 1, size: 10 }))
        .await
        .unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0].id, 1);

    assert_eq!(service.retrieve_links(2).await.unwrap().data_fields, vec![4, 5]);
    service.delete(2).await.unwrap();
}

#[tokio::test]
async fn test_data_model_version_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datamodel/models/8"))
        .and(query_param("version", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model_id": "8",
            "name": "invoice",
            "fields": [{"field_id": 1, "kind": "element", "name": "total"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/datamodel/fields/1"))
        .and(query_param_is_missing("version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"field_id": 1, "kind": "table"})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let service = client.data_model();

    let model = service.retrieve(8, Some(3)).await.unwrap();
    assert_eq!(model.model_id, 8);
    assert_eq!(model.fields[0].name, "total");

    assert_eq!(service.retrieve_field(1, None).await.unwrap().kind, FieldKind::Table);
    service.retrieve_field(1, Some(0)).await.unwrap();
}

#[tokio::test]
async fn test_data_model_lists_and_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datamodel/models"))
        .and(query_param("only", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"model_id": 1}, {"model_id": 2}],
            "pagination_status": {"total_entries": 2}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // No pagination state: the page is empty
    Mock::given(method("GET"))
        .and(path("/datamodel/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fields": [{"field_id": 1}]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/datamodel/fields/4"))
        .and(body_json(json!({
            "field_id": 4,
            "kind": "element",
            "name": "iban",
            "datatypes": [2]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"field_id": 4, "name": "iban"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let service = client.data_model();

    let models = service.retrieve_all(Some(&Filter::only(["name"])), None).await.unwrap();
    assert_eq!(models.models.len(), 2);
    assert_eq!(models.pagination_status.total_entries, 2);

    let fields = service.retrieve_all_fields(None).await.unwrap();
    assert!(fields.fields.is_empty());

    let field = service
        .patch_field(&UpdateFieldRequest {
            field_id: 4,
            kind: FieldKind::Element,
            name: "iban".into(),
            datatypes: vec![2],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(field.name, "iban");
}

#[tokio::test]
async fn test_document_model_preview_and_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/document/models/9/preview"))
        .and(body_json(json!({"id": "9", "contentType": "image/png"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://upload.test/9",
            "expiry": "2024-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/document/models/9/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": [{"id": 30, "name": "total", "element": {}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/document/models"))
        .and(query_param("page", "1"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"id": 9, "version": "2", "stoppers": null}],
            "pagination_status": {"current_page": 1}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let service = client.document_model();

    let preview = service.set_preview(9, ContentType::Png).await.unwrap();
    assert_eq!(preview.url, "https://upload.test/9");

    let fields = service
        .create_fields(
            9,
            &[CreateDocumentModelFieldRequest {
                name: "total".into(),
                datamodel_field_id: 12,
                ..Default::default()
            }],
        )
        .await
        .unwrap();
    assert_eq!(fields[0].id, 30);
    assert!(fields[0].element.is_some());

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body["fields"][0]["datamodel_field_id"], 12);

    let models = service
        .retrieve_all(None, Some(Pagination { page: 1, size: 5 }))
        .await
        .unwrap();
    assert_eq!(models.models[0].version, 2);
    assert!(models.models[0].stoppers.is_empty());
}

#[tokio::test]
async fn test_extraction_job_lifecycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/job/extraction/jobs"))
        .and(body_json(json!({
            "document_id": "doc-1",
            "content_type": "application/pdf",
            "document_name": "invoice.pdf"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "job-1",
            "document_name": "invoice.pdf",
            "url": "https://upload.test/job-1",
            "content_type": "application/pdf"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/extraction/jobs/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job-1",
            "status": "SUCCEEDED",
            "tags": {"source": "scanner"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/extraction/jobs/job-1/output"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": [{"field_id": "f1", "element": {"values": ["42.00"]}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let jobs = client.job();

    let created = jobs
        .create_extraction_job(&CreateExtractionJobRequest {
            document_id: "doc-1".into(),
            content_type: ContentType::Pdf,
            document_name: Some("invoice.pdf".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.url, "https://upload.test/job-1");

    let job = jobs.retrieve_extraction_job(&created.id).await.unwrap();
    assert!(job.status.is_terminal());
    assert_eq!(job.tags["source"], "scanner");

    let output = jobs.retrieve_extraction_job_output(&created.id).await.unwrap();
    assert_eq!(output.fields[0].element.as_ref().unwrap().values, vec!["42.00"]);
}

#[tokio::test]
async fn test_rendering_jobs_use_rendering_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/job/rendering/jobs"))
        .and(body_json(json!({
            "document_id": "doc-1",
            "content_type": "image/png",
            "font_size": 12,
            "fields": [{"field_id": "f1", "values": ["ACME"]}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "r-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/rendering/jobs"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{"id": "r-1", "status": "PROCESSING"}],
            "pagination_status": {"total_entries": "1"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/rendering/jobs/r-1/output"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://download.test/r-1",
            "content_type": "image/png"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let jobs = client.job();

    let created = jobs
        .create_rendering_job(&CreateRenderingJobRequest {
            document_id: "doc-1".into(),
            content_type: ContentType::Png,
            ignore_datatypes: None,
            font_size: 12,
            fields: vec![RenderingJobField {
                field_id: "f1".into(),
                values: vec!["ACME".into()],
            }],
        })
        .await
        .unwrap();
    assert_eq!(created.id, "r-1");

    let page = jobs
        .retrieve_all_rendering_jobs(Some(Pagination { page: 0, size: 20 }))
        .await
        .unwrap();
    assert_eq!(page.jobs[0].status, JobStatus::Processing);
    assert_eq!(page.pagination_status.total_entries, 1);

    let output = jobs.retrieve_rendering_job_output("r-1").await.unwrap();
    assert_eq!(output.url, "https://download.test/r-1");
}
