//! Application facade tying storage, the feed pipeline and companions together.

use mindful_companion::{ChatSession, EntryReflector, StudyPlanner, TravelPlanner};
use mindful_config::MindfulConfig;
use mindful_core::{
    Attachment, FeedPost, GenerationConfig, GenerationRequest, JournalEntry, Mood,
    Reflection, Task, Trip,
};
use mindful_error::{MindfulResult, StorageError, StorageErrorKind};
use mindful_feed::{FeedDriver, FeedPipeline};
use mindful_interface::TextGeneration;
use mindful_storage::JournalRepository;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

fn not_found(what: impl Into<String>) -> StorageError {
    StorageError::new(StorageErrorKind::NotFound(what.into()))
}

/// The journal and everything generated from it.
///
/// Every operation reads and writes through the [`JournalRepository`], so a
/// `Mindful` is cheap to create per command.
pub struct Mindful<D: ?Sized> {
    repository: JournalRepository,
    driver: Arc<D>,
    pipeline: FeedPipeline<D>,
}

impl<D> Mindful<D>
where
    D: FeedDriver + TextGeneration + ?Sized + 'static,
{
    /// Create the facade over a repository and a provider.
    pub fn new(repository: JournalRepository, driver: Arc<D>, config: &MindfulConfig) -> Self {
        let pipeline = FeedPipeline::new(Arc::clone(&driver), &config.pipeline);
        Self {
            repository,
            driver,
            pipeline,
        }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &JournalRepository {
        &self.repository
    }

    /// Save a new text entry.
    #[instrument(skip(self, content, attachments), fields(attachments = attachments.len()))]
    pub async fn write_entry(
        &self,
        content: &str,
        mood: Mood,
        attachments: Vec<Attachment>,
    ) -> MindfulResult<JournalEntry> {
        let entry = JournalEntry::new(uuid::Uuid::new_v4().to_string(), content, mood, attachments);
        self.repository.add_entry(entry.clone()).await?;
        Ok(entry)
    }

    async fn entry_or_latest(&self, entry_id: Option<&str>) -> MindfulResult<JournalEntry> {
        let entry = match entry_id {
            Some(id) => self.repository.find_entry(id).await?,
            None => self.repository.latest_entry().await?,
        };
        entry.ok_or_else(|| {
            not_found(match entry_id {
                Some(id) => format!("entry '{}'", id),
                None => "any journal entry".to_string(),
            })
            .into()
        })
    }

    /// Generate a feed post from an entry (the latest when `entry_id` is
    /// `None`) using the stored generation config.
    ///
    /// The post is persisted only when the run succeeds, so a failed or
    /// cancelled run leaves the feed untouched.
    #[instrument(skip(self, cancel))]
    pub async fn generate_post(
        &self,
        entry_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> MindfulResult<FeedPost> {
        let entry = self.entry_or_latest(entry_id).await?;
        let config = self.repository.config().await?;
        let request = GenerationRequest::from_entry(&entry, config);

        let post = self.pipeline.run(&request, cancel).await?;
        self.repository.append_post(post.clone()).await?;
        info!(post_id = %post.id(), entry_id = %entry.id, "Post published");
        Ok(post)
    }

    /// Flip the like on a post and return its new state.
    ///
    /// An unknown id changes nothing and yields `Ok(None)`.
    pub async fn toggle_like(&self, post_id: &str) -> MindfulResult<Option<FeedPost>> {
        self.repository.toggle_like(post_id).await
    }

    /// Stored generation preferences.
    pub async fn generation_config(&self) -> MindfulResult<GenerationConfig> {
        self.repository.config().await
    }

    /// Replace the generation preferences.
    pub async fn set_generation_config(&self, config: &GenerationConfig) -> MindfulResult<()> {
        self.repository.update_config(config).await
    }

    /// Reflect on an entry and store the reflection and tags on it.
    ///
    /// Returns `None` when the entry is too short to reflect on.
    #[instrument(skip(self))]
    pub async fn reflect(&self, entry_id: Option<&str>) -> MindfulResult<Option<Reflection>> {
        let mut entry = self.entry_or_latest(entry_id).await?;
        let reflector = EntryReflector::new(Arc::clone(&self.driver));
        let Some(reflection) = reflector.analyze_entry(&entry.content).await? else {
            return Ok(None);
        };

        entry.ai_reflection = Some(reflection.reflection.clone());
        for tag in &reflection.tags {
            if !entry.tags.contains(tag) {
                entry.tags.push(tag.clone());
            }
        }
        self.repository.update_entry(entry).await?;
        Ok(Some(reflection))
    }

    /// Generate study tasks and add them to the task list.
    pub async fn plan_study(
        &self,
        goal: &str,
        time_available: &str,
        document: Option<&Attachment>,
    ) -> MindfulResult<Vec<Task>> {
        let planner = StudyPlanner::new(Arc::clone(&self.driver));
        let tasks = planner
            .generate_study_plan(goal, time_available, document)
            .await?;
        self.repository.add_tasks(tasks.clone()).await?;
        Ok(tasks)
    }

    /// Destinations found in the latest entries.
    pub async fn travel_intents(&self) -> MindfulResult<Vec<String>> {
        let entries = self.repository.entries().await?;
        TravelPlanner::new(Arc::clone(&self.driver))
            .extract_travel_intent(&entries)
            .await
    }

    /// Plan a trip to `destination`.
    pub async fn plan_trip(&self, destination: &str) -> MindfulResult<Trip> {
        TravelPlanner::new(Arc::clone(&self.driver))
            .plan_trip(destination)
            .await
    }

    /// Open a study tutor session.
    pub fn study_chat(&self, document: Option<&Attachment>) -> ChatSession<D> {
        ChatSession::study(Arc::clone(&self.driver), document)
    }

    /// Open a chat with a saved friend persona.
    pub async fn friend_chat(&self, name: &str) -> MindfulResult<ChatSession<D>> {
        let friend = self
            .repository
            .find_friend(name)
            .await?
            .ok_or_else(|| not_found(format!("friend '{}'", name)))?;
        Ok(ChatSession::friend(Arc::clone(&self.driver), &friend))
    }
}
