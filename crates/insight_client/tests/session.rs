use std::sync::{Arc, Once};
use std::time::Duration;

use insight_client::{
    ApiFailure, ClientSettings, DashboardApi, ReqwestDashboardApi, SessionGate, SessionVerdict,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn gate_for(server: &MockServer) -> SessionGate {
    let settings = ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(2),
        ..ClientSettings::default()
    };
    let api: Arc<dyn DashboardApi> =
        Arc::new(ReqwestDashboardApi::new(settings).expect("client"));
    SessionGate::new(api)
}

#[tokio::test]
async fn successful_probe_is_authenticated() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    assert_eq!(gate_for(&server).probe().await, SessionVerdict::Authenticated);
}

#[tokio::test]
async fn forbidden_probe_is_unauthenticated_not_an_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    assert_eq!(
        gate_for(&server).probe().await,
        SessionVerdict::Unauthenticated
    );
}

#[tokio::test]
async fn server_failure_fails_closed() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(
        gate_for(&server).probe().await,
        SessionVerdict::Unauthenticated
    );
}

#[tokio::test]
async fn logout_clears_locally_even_when_the_backend_fails() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    assert_eq!(
        gate_for(&server).logout().await,
        SessionVerdict::Unauthenticated
    );
}

#[tokio::test]
async fn login_maps_rejected_credentials_to_unauthorized() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = gate_for(&server)
        .login("ada", "wrong")
        .await
        .expect_err("rejected credentials");
    assert_eq!(err.kind, ApiFailure::Unauthorized);
}

#[tokio::test]
async fn login_succeeds_on_accepted_credentials() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Login successful"})),
        )
        .mount(&server)
        .await;

    gate_for(&server).login("ada", "secret").await.expect("login ok");
}
