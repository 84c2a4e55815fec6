//! Integration tests using mock HTTP server
//!
//! Tests the full flow: config → credential exchange → authenticated request

use chrono::Utc;
use claroty_api_client::{ApiClient, ClientConfig, Error};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn jwt_expiring_in(seconds: i64) -> String {
    let exp = Utc::now().timestamp() + seconds;
    encode(
        &Header::default(),
        &json!({"sub": "admin", "exp": exp}),
        &EncodingKey::from_secret(b"appliance-secret"),
    )
    .unwrap()
}

fn password_client(server: &MockServer) -> ApiClient {
    let config = ClientConfig::builder(server.uri())
        .username("admin")
        .password("secret")
        .build();
    ApiClient::new(config).unwrap()
}

// ============================================================================
// Username/password
// ============================================================================

#[tokio::test]
async fn test_password_login_then_requests() {
    let mock_server = MockServer::start().await;
    let token = jwt_expiring_in(3600);

    Mock::given(method("POST"))
        .and(path("/auth/authenticate"))
        .and(body_json(json!({"username": "admin", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "passwordExpired": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ranger/sites"))
        .and(header("Authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count_total": 1,
            "objects": [{"id": 1, "name": "plant-a"}]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = password_client(&mock_server);

    let first: serde_json::Value = client.get_json("/ranger/sites").await.unwrap();
    let second: serde_json::Value = client.get_json("/ranger/sites").await.unwrap();

    assert_eq!(first["objects"][0]["name"], "plant-a");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_expired_token_triggers_one_reauthentication() {
    let mock_server = MockServer::start().await;
    let stale = jwt_expiring_in(-120);
    let fresh = jwt_expiring_in(3600);

    // First login hands out an already-expired token
    Mock::given(method("POST"))
        .and(path("/auth/authenticate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": stale,
            "passwordExpired": false
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/authenticate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": fresh,
            "passwordExpired": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ranger/alerts"))
        .and(header("Authorization", format!("Bearer {fresh}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"objects": []})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = password_client(&mock_server);
    client.authenticator().authenticate().await.unwrap();

    let _: serde_json::Value = client.get_json("/ranger/alerts").await.unwrap();
    let _: serde_json::Value = client.get_json("/ranger/alerts").await.unwrap();

    assert_eq!(client.token().await.unwrap(), fresh);
}

#[tokio::test]
async fn test_password_expired_blocks_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/authenticate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "passwordExpired": true
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ranger/sites"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = password_client(&mock_server);
    let result: Result<serde_json::Value, Error> = client.get_json("/ranger/sites").await;

    assert!(matches!(result, Err(Error::ExpiredCredential)));
    assert!(!client.authenticator().is_authenticated().await);
}

#[tokio::test]
async fn test_login_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/authenticate"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid username or password"))
        .mount(&mock_server)
        .await;

    let client = password_client(&mock_server);
    let err = client.token().await.unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert!(err.to_string().contains("invalid username or password"));
}

// ============================================================================
// API key
// ============================================================================

#[tokio::test]
async fn test_api_key_skips_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/authenticate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ranger/assets"))
        .and(header("Authorization", "Bearer static-api-key"))
        .and(body_json(json!({"filter": {"site_id": 1}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count_total": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder(mock_server.uri())
        .api_key("static-api-key")
        .build();
    let client = ApiClient::new(config).unwrap();

    let reply: serde_json::Value = client
        .post_json("/ranger/assets", &json!({"filter": {"site_id": 1}}))
        .await
        .unwrap();

    assert_eq!(reply["count_total"], 0);
    assert_eq!(client.token().await.unwrap(), "static-api-key");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_client_requires_credentials() {
    let config = ClientConfig::builder("https://ctd.example.com").build();
    let result = ApiClient::new(config);
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn test_client_rejects_bad_url() {
    let config = ClientConfig::builder("ctd.example.com")
        .api_key("key")
        .build();
    let result = ApiClient::new(config);
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn test_client_from_yaml() {
    let config = ClientConfig::from_yaml_str(
        r"
base_url: https://ctd.example.com
api_key: static-api-key
danger_accept_invalid_certs: true
",
    )
    .unwrap();

    let client = ApiClient::new(config).unwrap();
    assert_eq!(client.http().base_url(), "https://ctd.example.com");
    assert!(client.authenticator().config().danger_accept_invalid_certs);
}
