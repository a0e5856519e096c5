//! Tests for journal data types and their persisted JSON shape.

use chrono::Utc;
use mindful_core::{
    Attachment, AttachmentKind, EntryKind, GenerationConfig, GenerationRequest, JournalEntry,
    Mood, OutputFormat,
};
use std::str::FromStr;

fn attachment(id: &str, kind: AttachmentKind) -> Attachment {
    Attachment {
        id: id.to_string(),
        kind,
        mime_type: match kind {
            AttachmentKind::Image => "image/png".to_string(),
            AttachmentKind::Pdf => "application/pdf".to_string(),
        },
        data: vec![0x89, 0x50, 0x4E, 0x47],
        name: format!("{id}.bin"),
    }
}

#[test]
fn test_mood_parses_case_insensitively() {
    assert_eq!(Mood::from_str("stressed").unwrap(), Mood::Stressed);
    assert_eq!(Mood::from_str("GREAT").unwrap(), Mood::Great);
    assert!(Mood::from_str("ecstatic").is_err());
    assert_eq!(Mood::Bad.to_string(), "BAD");
}

#[test]
fn test_output_format_parses() {
    assert_eq!(OutputFormat::from_str("video").unwrap(), OutputFormat::Video);
    assert_eq!(OutputFormat::Image.to_string(), "IMAGE");
}

#[test]
fn test_entry_json_shape() {
    let entry = JournalEntry {
        id: "entry-1".to_string(),
        date: Utc::now(),
        content: "Walked by the river".to_string(),
        mood: Mood::Good,
        ai_reflection: None,
        tags: vec!["outdoors".to_string()],
        attachments: vec![attachment("a1", AttachmentKind::Image)],
        kind: EntryKind::Text,
    };

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["mood"], "GOOD");
    assert_eq!(json["type"], "text");
    assert_eq!(json["attachments"][0]["type"], "image");
    assert_eq!(json["attachments"][0]["mimeType"], "image/png");
    assert_eq!(json["attachments"][0]["data"], "iVBORw==");
    assert!(json.get("aiReflection").is_none());

    let back: JournalEntry = serde_json::from_value(json).unwrap();
    assert_eq!(back, entry);
}

#[test]
fn test_entry_defaults_for_missing_optional_fields() {
    let json = serde_json::json!({
        "id": "entry-2",
        "date": "2025-01-01T10:00:00Z",
        "content": "Short day",
        "mood": "NEUTRAL"
    });
    let entry: JournalEntry = serde_json::from_value(json).unwrap();
    assert!(entry.attachments.is_empty());
    assert!(entry.tags.is_empty());
    assert_eq!(entry.kind, EntryKind::Text);
}

#[test]
fn test_generation_request_filters_image_attachments() {
    let request = GenerationRequest::new(
        "entry-1",
        "text",
        Mood::Neutral,
        vec![
            attachment("a1", AttachmentKind::Image),
            attachment("a2", AttachmentKind::Pdf),
            attachment("a3", AttachmentKind::Image),
        ],
        GenerationConfig::default(),
    );

    let ids: Vec<_> = request.image_attachments().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a3"]);
}

#[test]
fn test_config_json_uses_camel_case() {
    let json = serde_json::to_value(GenerationConfig::default()).unwrap();
    assert_eq!(json["artStyle"], "Abstract & Dreamy");
    assert_eq!(json["captionTone"], "Reflective & Poetic");
    assert_eq!(json["includeAudio"], true);
    assert_eq!(json["outputFormat"], "IMAGE");
}
