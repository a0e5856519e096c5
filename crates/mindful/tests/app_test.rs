//! Facade tests: generation persists only finished posts.

mod test_utils;

use mindful::{
    FileSystemStore, FriendProfile, GenerationConfig, JournalRepository, MemoryStore, Mindful,
    MindfulConfig, MindfulErrorKind, Mood, OutputFormat, StorageErrorKind, VoiceName,
};
use std::sync::Arc;
use tempfile::TempDir;
use test_utils::MockProvider;
use tokio_util::sync::CancellationToken;

fn app(provider: &Arc<MockProvider>) -> anyhow::Result<Mindful<MockProvider>> {
    let config = MindfulConfig::bundled()?;
    Ok(Mindful::new(
        JournalRepository::new(MemoryStore::new()),
        Arc::clone(provider),
        &config,
    ))
}

fn is_not_found(err: &mindful::MindfulError) -> bool {
    matches!(
        err.kind(),
        MindfulErrorKind::Storage(e) if matches!(e.kind, StorageErrorKind::NotFound(_))
    )
}

#[tokio::test]
async fn test_generated_post_is_persisted_for_latest_entry() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new());
    let app = app(&provider)?;
    let entry = app
        .write_entry("Lit a candle and read by the window.", Mood::Good, vec![])
        .await?;

    let post = app.generate_post(None, &CancellationToken::new()).await?;

    assert_eq!(post.source_entry_id(), &entry.id);
    assert_eq!(post.caption(), "Quiet light.");
    assert_eq!(*post.mood_tag(), Mood::Good);
    assert!(post.narration_audio().is_some());

    let stored = app.repository().posts().await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], post);
    Ok(())
}

#[tokio::test]
async fn test_stored_preferences_drive_generation() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new());
    let app = app(&provider)?;
    app.set_generation_config(&GenerationConfig {
        include_audio: false,
        ..Default::default()
    })
    .await?;
    let entry = app
        .write_entry("Long walk, no phone.", Mood::Great, vec![])
        .await?;

    let post = app
        .generate_post(Some(&entry.id), &CancellationToken::new())
        .await?;

    assert!(post.narration_audio().is_none());
    assert_eq!(provider.speech_calls(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_video_preference_produces_video_post() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new());
    let app = app(&provider)?;
    app.set_generation_config(&GenerationConfig {
        output_format: OutputFormat::Video,
        include_audio: false,
        ..Default::default()
    })
    .await?;
    app.write_entry("Rain on the tram window.", Mood::Neutral, vec![])
        .await?;

    let post = app.generate_post(None, &CancellationToken::new()).await?;

    assert_eq!(post.media().format(), OutputFormat::Video);
    assert_eq!(provider.image_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_failed_generation_persists_nothing() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::failing_media());
    let app = app(&provider)?;
    app.write_entry("A day that went sideways.", Mood::Bad, vec![])
        .await?;

    let result = app.generate_post(None, &CancellationToken::new()).await;

    assert!(matches!(
        result.unwrap_err().kind(),
        MindfulErrorKind::Generation(_)
    ));
    assert!(app.repository().posts().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cancelled_generation_persists_nothing() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new());
    let app = app(&provider)?;
    app.write_entry("Started, then changed my mind.", Mood::Neutral, vec![])
        .await?;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = app.generate_post(None, &cancel).await.unwrap_err();

    match err.kind() {
        MindfulErrorKind::Generation(e) => assert!(e.is_cancelled()),
        other => panic!("expected generation error, got {:?}", other),
    }
    assert_eq!(provider.json_calls(), 0);
    assert!(app.repository().posts().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_generation_without_entries_is_not_found() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new());
    let app = app(&provider)?;

    let err = app
        .generate_post(None, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(is_not_found(&err));

    let err = app
        .generate_post(Some("missing"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(is_not_found(&err));
    assert_eq!(provider.json_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_like_toggle_round_trips_through_storage() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let provider = Arc::new(MockProvider::new());
    let config = MindfulConfig::bundled()?;
    let app = Mindful::new(
        JournalRepository::new(FileSystemStore::new(dir.path())?),
        Arc::clone(&provider),
        &config,
    );
    app.write_entry("Finished the essay!", Mood::Great, vec![])
        .await?;
    let post = app.generate_post(None, &CancellationToken::new()).await?;

    let liked = app.toggle_like(post.id()).await?.expect("post exists");
    assert!(*liked.liked_by_user());
    assert_eq!(*liked.like_count(), 1);

    let reopened = JournalRepository::new(FileSystemStore::new(dir.path())?);
    let stored = reopened.posts().await?;
    assert_eq!(*stored[0].like_count(), 1);

    let unliked = app.toggle_like(post.id()).await?.expect("post exists");
    assert!(!*unliked.liked_by_user());
    assert_eq!(*unliked.like_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_like_unknown_post_is_silent_no_op() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new());
    let app = app(&provider)?;
    app.write_entry("Quiet morning.", Mood::Neutral, vec![])
        .await?;
    app.generate_post(None, &CancellationToken::new()).await?;
    let before = app.repository().posts().await?;

    let result = app.toggle_like("post-nope").await?;

    assert!(result.is_none());
    assert_eq!(app.repository().posts().await?, before);
    Ok(())
}

#[tokio::test]
async fn test_reflection_is_stored_on_entry() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new());
    let app = app(&provider)?;
    let entry = app
        .write_entry("Took the evening off and felt fine about it.", Mood::Good, vec![])
        .await?;

    let reflection = app.reflect(None).await?.expect("reflection");
    assert_eq!(reflection.sentiment, "Calm");

    let stored = app
        .repository()
        .find_entry(&entry.id)
        .await?
        .expect("entry");
    assert_eq!(stored.ai_reflection.as_deref(), Some("Rest is progress too."));
    assert_eq!(stored.tags, vec!["rest", "evening"]);
    Ok(())
}

#[tokio::test]
async fn test_study_plan_tasks_are_saved() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new());
    let app = app(&provider)?;

    let tasks = app.plan_study("Revise the Tudors", "3 days", None).await?;

    assert_eq!(tasks.len(), 1);
    assert_eq!(app.repository().tasks().await?, tasks);
    Ok(())
}

#[tokio::test]
async fn test_friend_chat_requires_saved_persona() -> anyhow::Result<()> {
    let provider = Arc::new(MockProvider::new());
    let app = app(&provider)?;
    assert!(is_not_found(&app.friend_chat("Alex").await.unwrap_err()));

    app.repository()
        .add_friend(FriendProfile {
            name: "Alex".to_string(),
            personality: "Calm listener".to_string(),
            context: "Met at the climbing gym".to_string(),
            voice_name: VoiceName::Charon,
            avatar_url: None,
        })
        .await?;

    let mut session = app.friend_chat("alex").await?;
    assert!(session.system_instruction().contains("Calm listener"));
    assert_eq!(session.send("hi").await?, "Happy to help.");
    assert_eq!(provider.text_calls(), 1);
    Ok(())
}
