//! Tests for note AnkiConnect actions.

mod common;

use common::{
    mock_action, mock_action_times, mock_anki_error, mock_anki_response, setup_mock_server,
};
use vocab_connect::{AnkiClient, DuplicateScope, MediaAttachment, NoteBuilder};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, ResponseTemplate};

fn vocabulary_note() -> vocab_connect::Note {
    NoteBuilder::new("English Vocabulary", "Basic")
        .fields([("Front", "run"), ("Back", "[verb] to move swiftly")])
        .tags(["english", "vocabulary"])
        .allow_duplicate(false)
        .duplicate_scope(DuplicateScope::Deck)
        .build()
}

#[tokio::test]
async fn test_add_note() {
    let server = setup_mock_server().await;
    mock_action(&server, "addNote", mock_anki_response(1234567890_i64)).await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let note_id = client.notes().add(&vocabulary_note()).await.unwrap();

    assert_eq!(note_id, 1234567890);
}

#[tokio::test]
async fn test_add_note_sends_duplicate_options() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": "addNote",
            "params": {
                "note": {
                    "deckName": "English Vocabulary",
                    "modelName": "Basic",
                    "fields": {"Front": "run"},
                    "tags": ["english", "vocabulary"],
                    "options": {"allowDuplicate": false, "duplicateScope": "deck"}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": 42,
            "error": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let note_id = client.notes().add(&vocabulary_note()).await.unwrap();

    assert_eq!(note_id, 42);
}

#[tokio::test]
async fn test_add_to_deck_creates_missing_deck() {
    let server = setup_mock_server().await;
    mock_action(&server, "deckNames", mock_anki_response(vec!["Default"])).await;
    mock_action(&server, "createDeck", mock_anki_response(99_i64)).await;
    mock_action(&server, "addNote", mock_anki_response(7_i64)).await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let note_id = client.notes().add_to_deck(&vocabulary_note()).await.unwrap();

    assert_eq!(note_id, 7);
}

#[tokio::test]
async fn test_add_to_deck_skips_existing_deck() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deckNames",
        mock_anki_response(vec!["Default", "English Vocabulary"]),
    )
    .await;
    mock_action_times(&server, "createDeck", mock_anki_response(99_i64), 0).await;
    mock_action(&server, "addNote", mock_anki_response(8_i64)).await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let note_id = client.notes().add_to_deck(&vocabulary_note()).await.unwrap();

    assert_eq!(note_id, 8);
}

#[tokio::test]
async fn test_find_notes() {
    let server = setup_mock_server().await;
    mock_action(&server, "findNotes", mock_anki_response(vec![3_i64, 1, 2])).await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let notes = client
        .notes()
        .find("\"run\" deck:\"English Vocabulary\"")
        .await
        .unwrap();

    assert_eq!(notes, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_notes_info() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "notesInfo",
        mock_anki_response(vec![serde_json::json!({
            "noteId": 1234567890_i64,
            "modelName": "Basic",
            "tags": ["english", "vocabulary"],
            "fields": {
                "Back": {"value": "to move swiftly", "order": 1},
                "Front": {"value": "", "order": 0}
            },
            "cards": [9876543210_i64]
        })]),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let notes = client.notes().info(&[1234567890]).await.unwrap();

    assert_eq!(notes.len(), 1);
    let note = &notes[0];
    assert_eq!(note.note_id, 1234567890);
    assert_eq!(note.model_name, "Basic");
    assert_eq!(note.tags, vec!["english", "vocabulary"]);

    let fields = note.ordered_fields();
    let names: Vec<_> = fields.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["Front", "Back"]);
    assert_eq!(fields[1].1.value, "to move swiftly");
}

#[tokio::test]
async fn test_delete_notes() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "deleteNotes",
        mock_anki_response(serde_json::Value::Null),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let result = client.notes().delete(&[1234567890]).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_duplicate_note_error() {
    let server = setup_mock_server().await;
    mock_action(
        &server,
        "addNote",
        mock_anki_error("cannot create note because it is a duplicate"),
    )
    .await;

    let client = AnkiClient::builder().url(server.uri()).build();
    let result = client.notes().add(&vocabulary_note()).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("duplicate"));
}

#[test]
fn test_note_serialization_omits_missing_audio() {
    let note = vocabulary_note();
    let json = serde_json::to_value(&note).unwrap();

    assert!(json.get("audio").is_none());
    assert_eq!(json["options"]["duplicateScope"], "deck");
}

#[test]
fn test_note_serialization_with_audio() {
    let note = NoteBuilder::new("Default", "Basic")
        .fields([("Front", "run")])
        .audio(MediaAttachment {
            filename: "word_run.mp3".to_string(),
            data: "AAAA".to_string(),
            fields: vec!["Front".to_string()],
        })
        .build();
    let json = serde_json::to_value(&note).unwrap();

    assert_eq!(
        json["audio"],
        serde_json::json!([{"filename": "word_run.mp3", "data": "AAAA", "fields": ["Front"]}])
    );
    assert!(json.get("tags").is_none());
}
