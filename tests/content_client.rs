use std::time::Duration;

use portfolio_content::config::ClientOptions;
use portfolio_content::content::{fallback, ContactMessage, ContentClient, ProjectLimit};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ContentClient {
    let options = ClientOptions::new(&format!("{}/api", server.uri())).unwrap();
    ContentClient::new(options).unwrap()
}

#[tokio::test]
async fn test_server_error_falls_back_to_static_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .expect(1)
        .mount(&server)
        .await;

    let content = client_for(&server).get_profile().await;

    assert!(content.is_fallback());
    let err = content.error().unwrap();
    assert_eq!(err.status, Some(500));
    assert_eq!(err.message, "HTTP error! status: 500");
    assert_eq!(err.detail.as_deref(), Some("boom"));
    assert_eq!(content.data, fallback::profile());
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/skills"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "technical": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let options = ClientOptions::new(&format!("{}/api", server.uri()))
        .unwrap()
        .with_request_timeout(Some(Duration::from_millis(100)));
    let content = ContentClient::new(options).unwrap().get_skills().await;

    assert!(content.is_fallback());
    assert!(content.error().unwrap().is_timeout());
    assert_eq!(content.data, fallback::skills());
}

#[tokio::test]
async fn test_unreachable_backend_falls_back() {
    // Nothing listens on port 9 locally
    let options = ClientOptions::new("http://127.0.0.1:9/api").unwrap();
    let content = ContentClient::new(options).unwrap().get_experience().await;

    assert!(content.is_fallback());
    assert_eq!(content.error().unwrap().status, None);
    assert_eq!(content.data, fallback::experience());
}

#[tokio::test]
async fn test_flattened_profile_matches_nested() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ada",
            "title": "Engineer",
            "intro": "Hi",
            "about_journey": "J",
            "about_interests": "I",
            "email": "ada@example.com",
            "location": "London",
            "experience_years": 7,
            "profile_image": "https://img.example/ada.png"
        })))
        .mount(&server)
        .await;

    let flattened = client_for(&server).get_profile().await;
    assert!(flattened.is_live());

    let nested: portfolio_content::content::Profile = serde_json::from_value(json!({
        "name": "Ada",
        "title": "Engineer",
        "intro": "Hi",
        "about": { "journey": "J", "interests": "I" },
        "personalDetails": { "email": "ada@example.com", "location": "London", "experience": "7" },
        "profileImage": "https://img.example/ada.png"
    }))
    .unwrap();

    assert_eq!(flattened.data, nested);
    assert_eq!(flattened.data.personal_details.experience, "7");
}

#[tokio::test]
async fn test_project_limit_is_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .and(query_param("limit", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "One", "description": "d", "image": "", "technologies": ["Rust"] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let content = client_for(&server).get_projects(6u32).await;
    assert!(content.is_live());
    assert_eq!(content.data.len(), 1);
    assert_eq!(content.data[0].technologies, vec!["Rust"]);
}

#[tokio::test]
async fn test_unlimited_projects_send_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.get_projects(ProjectLimit::All).await;
    client.get_projects(0u32).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.url.query().is_none()));
}

#[tokio::test]
async fn test_fallback_projects_respect_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.get_projects(2u32).await.data.len(), 2);
    assert_eq!(client.get_projects(ProjectLimit::All).await.data, fallback::projects());
}

#[tokio::test]
async fn test_requests_carry_json_and_client_info_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contact"))
        .and(header("Accept", "application/json"))
        .and(header_exists("X-Client-Info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "me@example.com",
            "phone": null,
            "location": "Remote",
            "social": [],
            "resume_url": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let content = client_for(&server).get_contact_info().await;
    assert!(content.is_live());
    assert_eq!(content.data.phone, "");
    assert_eq!(content.data.resume_url, None);
}

#[tokio::test]
async fn test_send_message_posts_json() {
    let server = MockServer::start().await;
    let message = ContactMessage {
        name: "Alex Doe".to_string(),
        email: "a@b.com".to_string(),
        subject: "Hello there".to_string(),
        message: "This is a sufficiently long message.".to_string(),
    };
    Mock::given(method("POST"))
        .and(path("/api/contact/send"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&message))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Thanks", "id": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = client_for(&server).send_message(&message).await.unwrap();
    assert!(receipt.accepted);
    assert_eq!(receipt.id, Some(42));
    assert_eq!(receipt.message.as_deref(), Some("Thanks"));
}

#[tokio::test]
async fn test_send_message_failure_has_no_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact/send"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid data" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_message(&ContactMessage::default())
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(400));
    assert_eq!(err.detail.as_deref(), Some("Invalid data"));
}

#[tokio::test]
async fn test_fetch_json_reaches_arbitrary_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/cache"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let health = client.fetch_json("/health", reqwest::Method::GET, None).await.unwrap();
    assert_eq!(health["status"], "ok");

    let empty = client.fetch_json("/cache", reqwest::Method::DELETE, None).await.unwrap();
    assert!(empty.is_null());
}
