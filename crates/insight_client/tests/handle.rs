use std::sync::Once;
use std::time::Duration;

use insight_client::{ApiHandle, ClientCommand, ClientEvent, ClientSettings, PollerSettings};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn handle_for(server: &MockServer) -> ApiHandle {
    let settings = ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(2),
        ..ClientSettings::default()
    };
    ApiHandle::new(settings, PollerSettings::default()).expect("handle")
}

async fn wait_event(handle: &ApiHandle) -> ClientEvent {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    loop {
        if let Some(event) = handle.try_recv() {
            return event;
        }
        assert!(tokio::time::Instant::now() < deadline, "no event arrived");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn probe_round_trips_through_the_client_thread() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let handle = handle_for(&server);
    handle.send(ClientCommand::ProbeSession);
    assert_eq!(
        wait_event(&handle).await,
        ClientEvent::SessionProbed {
            authenticated: true
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn job_trigger_posts_the_request_and_echoes_the_acceptance() {
    init_logging();
    let server = MockServer::start().await;
    let body = json!({
        "products": ["widget"],
        "limit": 75,
        "subreddits": ["widgets"],
        "time_filter": "week",
        "use_openai": true,
    });
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "started",
            "products": ["widget"],
            "subreddits": ["widgets"],
            "limit": 75,
            "time_filter": "week",
        })))
        .mount(&server)
        .await;

    let handle = handle_for(&server);
    handle.send(ClientCommand::TriggerJob(insight_client::ScrapeRequest {
        products: vec!["widget".to_string()],
        limit: 75,
        subreddits: vec!["widgets".to_string()],
        time_filter: "week".to_string(),
        use_openai: true,
    }));

    match wait_event(&handle).await {
        ClientEvent::JobAccepted(accepted) => {
            assert_eq!(accepted.products, vec!["widget".to_string()]);
            assert_eq!(accepted.limit, 75);
        }
        other => panic!("expected acceptance, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_saved_recommendations_fall_back_to_generation() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"recommendations": []})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/recommendations"))
        .and(body_json(json!({"products": ["widget"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recommendations": [{
                "product": "widget",
                "summary": "fix the onboarding",
                "recommendations": [{
                    "title": "Simplify setup",
                    "description": "Cut the wizard to one screen",
                    "complexity": "low",
                    "impact": "high",
                }],
            }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handle = handle_for(&server);
    handle.send(ClientCommand::FetchRecommendations {
        subjects: vec!["widget".to_string()],
    });

    match wait_event(&handle).await {
        ClientEvent::RecommendationsLoaded(payload) => {
            assert_eq!(payload.recommendations.len(), 1);
            assert_eq!(payload.recommendations[0].product, "widget");
        }
        other => panic!("expected generated recommendations, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_session_during_a_fetch_flips_the_gate() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openai-analysis"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let handle = handle_for(&server);
    handle.send(ClientCommand::FetchIssues {
        subjects: Vec::new(),
    });
    assert_eq!(
        wait_event(&handle).await,
        ClientEvent::SessionProbed {
            authenticated: false
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn action_failures_carry_the_backend_message() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "already running"})),
        )
        .mount(&server)
        .await;

    let handle = handle_for(&server);
    handle.send(ClientCommand::TriggerJob(insight_client::ScrapeRequest {
        products: vec!["widget".to_string()],
        limit: 10,
        subreddits: vec!["widgets".to_string()],
        time_filter: "week".to_string(),
        use_openai: false,
    }));
    assert_eq!(
        wait_event(&handle).await,
        ClientEvent::JobRejected {
            message: "already running".to_string()
        }
    );
}
