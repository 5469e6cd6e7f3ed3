//! Tests for AnkiConnect response envelope validation.

mod common;

use common::{mock_action, mock_anki_error, setup_mock_server};
use vocab_connect::{AnkiClient, Error};
use wiremock::ResponseTemplate;

#[tokio::test]
async fn test_extra_field_is_protocol_error() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deckNames",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [],
            "error": null,
            "extra": true
        })),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let err = client.decks().names().await.unwrap_err();

    assert!(matches!(err, Error::Protocol(_)));
}

#[tokio::test]
async fn test_missing_error_field_is_protocol_error() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deckNames",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": ["Default"]
        })),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let err = client.decks().names().await.unwrap_err();

    match err {
        Error::Protocol(msg) => assert!(msg.contains("number of fields")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_keys_is_protocol_error() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deckNames",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": ["Default"],
            "status": "ok"
        })),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let err = client.decks().names().await.unwrap_err();

    match err {
        Error::Protocol(msg) => assert!(msg.contains("error field")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_protocol_error() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deckNames",
        ResponseTemplate::new(200).set_body_string("AnkiConnect v.6"),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let err = client.decks().names().await.unwrap_err();

    assert!(matches!(err, Error::Protocol(_)));
}

#[tokio::test]
async fn test_remote_error_carries_message() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "createDeck",
        mock_anki_error("collection is not available"),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let err = client.decks().create("Deck").await.unwrap_err();

    assert_eq!(err.to_string(), "AnkiConnect error: collection is not available");
}

#[tokio::test]
async fn test_permission_error() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deckNames",
        mock_anki_error("valid api key must be provided; permission denied"),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let err = client.decks().names().await.unwrap_err();

    assert!(matches!(err, Error::PermissionDenied));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connection_refused() {
    // Reserve a free port, then close it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = AnkiClient::builder().host_port("127.0.0.1", port).build();
    let err = client.decks().names().await.unwrap_err();

    assert!(matches!(err, Error::ConnectionRefused));
}

#[tokio::test]
async fn test_api_key_is_sent() {
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::Mock;

    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "modelNames",
            "key": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": ["Basic"],
            "error": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnkiClient::builder()
        .url(server.uri())
        .api_key("secret")
        .build();

    assert_eq!(client.models().names().await.unwrap(), vec!["Basic"]);
}
