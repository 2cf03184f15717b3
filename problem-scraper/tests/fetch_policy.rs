//! Escalation-order tests for the fetch policy, against a local mock
//! server. Delays are zeroed so the ladder runs instantly.

use std::time::Duration;

use problem_scraper::{FetchConfig, FetchError, FetchPolicy};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn instant_config() -> FetchConfig {
    FetchConfig {
        timeout: Duration::from_secs(5),
        attempt_delays: vec![Duration::ZERO; 4],
    }
}

#[tokio::test]
async fn success_short_circuits_after_first_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let policy = FetchPolicy::new(instant_config()).unwrap();
    let body = policy
        .fetch(&format!("{}/problem/1000", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "<html>ok</html>");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn forbidden_escalates_until_the_view_standard_profile() {
    let server = MockServer::start().await;
    // Profile 4 appends view=standard; everything before it is refused.
    Mock::given(method("GET"))
        .and(query_param("view", "standard"))
        .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let policy = FetchPolicy::new(instant_config()).unwrap();
    let body = policy
        .fetch(&format!("{}/problem/1000", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "finally");
    // Exactly the four ladder profiles, no fifth attempt.
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn non_forbidden_status_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let policy = FetchPolicy::new(instant_config()).unwrap();
    let err = policy
        .fetch(&format!("{}/problem/404", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn all_forbidden_exhausts_the_ladder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let policy = FetchPolicy::new(instant_config()).unwrap();
    let err = policy
        .fetch(&format!("{}/problem/1000", server.uri()))
        .await
        .unwrap_err();

    match err {
        FetchError::Exhausted {
            attempts,
            last_status,
            ..
        } => {
            assert_eq!(attempts, 4);
            assert_eq!(last_status, 403);
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn client_hints_appear_from_the_second_profile_on() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let policy = FetchPolicy::new(instant_config()).unwrap();
    let _ = policy
        .fetch(&format!("{}/problem/1000", server.uri()))
        .await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    assert!(!requests[0].headers.contains_key("sec-fetch-mode"));
    for req in &requests[1..] {
        assert!(req.headers.contains_key("sec-fetch-mode"));
        assert!(req.headers.contains_key("sec-ch-ua"));
    }
    // Profile 3 adds the trailing slash, profile 4 the query variant.
    assert!(requests[2].url.path().ends_with('/'));
    assert_eq!(requests[3].url.query(), Some("view=standard"));
}
