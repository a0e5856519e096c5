//! Tests for JournalRepository over both store backends.

use chrono::{TimeZone, Utc};
use mindful_core::{
    EntryKind, FeedPost, FriendProfile, GenerationConfig, JournalEntry, MediaPayload,
    MediaResult, Mood, OutputFormat, Task, TaskPriority, VoiceName,
};
use mindful_storage::{FileSystemStore, JournalRepository, KeyValueStore, MemoryStore, StateSlice};
use tempfile::TempDir;

fn entry(id: &str, day: u32, content: &str) -> JournalEntry {
    JournalEntry {
        id: id.to_string(),
        date: Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
        content: content.to_string(),
        mood: Mood::Good,
        ai_reflection: None,
        tags: vec![],
        attachments: vec![],
        kind: EntryKind::Text,
    }
}

fn post(id: &str) -> FeedPost {
    FeedPost::new(
        id,
        "entry-1",
        MediaResult::Image(MediaPayload::new("image/png", vec![1, 2, 3])),
        "A calm morning",
        Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
        Mood::Good,
        None,
    )
}

#[tokio::test]
async fn test_missing_slices_load_as_defaults() -> anyhow::Result<()> {
    let repo = JournalRepository::new(MemoryStore::new());

    assert!(repo.entries().await?.is_empty());
    assert!(repo.posts().await?.is_empty());
    assert!(repo.tasks().await?.is_empty());
    assert!(repo.friends().await?.is_empty());
    assert_eq!(repo.config().await?, GenerationConfig::default());
    assert!(repo.latest_entry().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_entries_newest_first_and_latest_by_date() -> anyhow::Result<()> {
    let repo = JournalRepository::new(MemoryStore::new());
    repo.add_entry(entry("b", 3, "later day")).await?;
    repo.add_entry(entry("a", 1, "backfilled")).await?;

    let entries = repo.entries().await?;
    assert_eq!(entries[0].id, "a");
    assert_eq!(entries[1].id, "b");

    let latest = repo.latest_entry().await?.unwrap();
    assert_eq!(latest.id, "b");

    assert_eq!(repo.find_entry("a").await?.unwrap().content, "backfilled");
    assert!(repo.find_entry("zzz").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_update_entry() -> anyhow::Result<()> {
    let repo = JournalRepository::new(MemoryStore::new());
    repo.add_entry(entry("a", 1, "text")).await?;

    let mut updated = entry("a", 1, "text");
    updated.ai_reflection = Some("You seem rested.".to_string());
    assert!(repo.update_entry(updated).await?);
    assert!(!repo.update_entry(entry("missing", 1, "x")).await?);

    let stored = repo.find_entry("a").await?.unwrap();
    assert_eq!(stored.ai_reflection.as_deref(), Some("You seem rested."));
    Ok(())
}

#[tokio::test]
async fn test_toggle_like_persists() -> anyhow::Result<()> {
    let repo = JournalRepository::new(MemoryStore::new());
    repo.append_post(post("p1")).await?;
    repo.append_post(post("p2")).await?;

    let liked = repo.toggle_like("p1").await?.unwrap();
    assert!(*liked.liked_by_user());
    assert_eq!(*liked.like_count(), 1);

    let posts = repo.posts().await?;
    assert_eq!(posts[0].id(), "p2");
    assert!(!*posts[0].liked_by_user());
    assert!(*posts[1].liked_by_user());

    let unliked = repo.toggle_like("p1").await?.unwrap();
    assert!(!*unliked.liked_by_user());
    assert_eq!(*unliked.like_count(), 0);

    assert!(repo.toggle_like("nope").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_config_round_trip() -> anyhow::Result<()> {
    let repo = JournalRepository::new(MemoryStore::new());
    let config = GenerationConfig::default()
        .with_art_style("Comic Book")
        .with_caption_tone("Witty")
        .with_include_audio(false)
        .with_output_format(OutputFormat::Video);
    repo.update_config(&config).await?;
    assert_eq!(repo.config().await?, config);
    Ok(())
}

#[tokio::test]
async fn test_tasks_and_friends() -> anyhow::Result<()> {
    let repo = JournalRepository::new(MemoryStore::new());
    repo.add_tasks(vec![Task {
        id: "t1".to_string(),
        title: "Read chapter 3".to_string(),
        completed: false,
        due_date: None,
        priority: TaskPriority::High,
        subject: Some("Biology".to_string()),
    }])
    .await?;

    assert!(repo.toggle_task("t1").await?);
    assert!(repo.tasks().await?[0].completed);
    assert!(!repo.toggle_task("t2").await?);

    repo.add_friend(FriendProfile {
        name: "Sam".to_string(),
        personality: "Cheerful".to_string(),
        context: "College roommate".to_string(),
        voice_name: VoiceName::Puck,
        avatar_url: None,
    })
    .await?;
    assert_eq!(repo.find_friend("sam").await?.unwrap().voice_name, VoiceName::Puck);
    Ok(())
}

#[tokio::test]
async fn test_filesystem_store_survives_reopen() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let repo = JournalRepository::new(FileSystemStore::new(temp_dir.path())?);
        repo.add_entry(entry("a", 1, "persisted")).await?;
        repo.append_post(post("p1")).await?;
        repo.toggle_like("p1").await?;
    }

    let repo = JournalRepository::new(FileSystemStore::new(temp_dir.path())?);
    assert_eq!(repo.entries().await?[0].content, "persisted");
    assert!(*repo.posts().await?[0].liked_by_user());
    assert!(temp_dir.path().join("mindful_posts.json").exists());
    assert!(!temp_dir.path().join("mindful_posts.json.tmp").exists());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_slice_is_an_error() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("mindful_entries.json"), b"{not json")?;

    let repo = JournalRepository::new(FileSystemStore::new(temp_dir.path())?);
    let err = repo.entries().await.unwrap_err();
    assert!(format!("{}", err).contains("mindful_entries"));
    Ok(())
}

#[tokio::test]
async fn test_wrong_shape_is_corrupt() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store
        .save(StateSlice::Posts.key(), &serde_json::json!({"not": "a list"}))
        .await?;

    let repo = JournalRepository::new(store);
    let err = repo.posts().await.unwrap_err();
    assert!(format!("{}", err).contains("Corrupt"));
    Ok(())
}

#[tokio::test]
async fn test_missing_and_invalid_keys() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FileSystemStore::new(temp_dir.path())?;

    assert!(store.load("mindful_tasks").await?.is_none());
    assert!(store.load("../escape").await.is_err());
    assert!(
        store
            .save("../escape", &serde_json::json!([]))
            .await
            .is_err()
    );
    Ok(())
}
