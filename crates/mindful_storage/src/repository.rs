//! Typed access to the journal state slices.

use crate::{KeyValueStore, StateSlice};
use mindful_core::{FeedPost, FriendProfile, GenerationConfig, JournalEntry, Task};
use mindful_error::{MindfulResult, StorageError, StorageErrorKind};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Repository over a [`KeyValueStore`].
///
/// Missing slices load as their defaults: empty collections and the default
/// [`GenerationConfig`]. Read-modify-write operations are serialized so
/// concurrent callers in one process cannot lose each other's updates.
#[derive(Clone)]
pub struct JournalRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for JournalRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JournalRepository").finish_non_exhaustive()
    }
}

impl JournalRepository {
    /// Create a repository over a store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Create a repository over a shared store.
    pub fn from_arc(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load_slice<T>(&self, slice: StateSlice) -> MindfulResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(value) = self.store.load(slice.key()).await? else {
            return Ok(T::default());
        };
        serde_json::from_value(value).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt {
                key: slice.key().to_string(),
                message: e.to_string(),
            })
            .into()
        })
    }

    async fn save_slice<T>(&self, slice: StateSlice, value: &T) -> MindfulResult<()>
    where
        T: Serialize,
    {
        let value = serde_json::to_value(value).map_err(|e| {
            StorageError::new(StorageErrorKind::Encode {
                key: slice.key().to_string(),
                message: e.to_string(),
            })
        })?;
        self.store.save(slice.key(), &value).await
    }

    // ---- Entries ----

    /// All entries, newest first.
    pub async fn entries(&self) -> MindfulResult<Vec<JournalEntry>> {
        self.load_slice(StateSlice::Entries).await
    }

    /// Add an entry at the top of the journal.
    #[instrument(skip(self, entry), fields(entry_id = %entry.id))]
    pub async fn add_entry(&self, entry: JournalEntry) -> MindfulResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries().await?;
        entries.insert(0, entry);
        self.save_slice(StateSlice::Entries, &entries).await?;
        info!(count = entries.len(), "Entry saved");
        Ok(())
    }

    /// Find an entry by id.
    pub async fn find_entry(&self, id: &str) -> MindfulResult<Option<JournalEntry>> {
        Ok(self.entries().await?.into_iter().find(|e| e.id == id))
    }

    /// The most recently dated entry.
    pub async fn latest_entry(&self) -> MindfulResult<Option<JournalEntry>> {
        Ok(self.entries().await?.into_iter().max_by_key(|e| e.date))
    }

    /// Replace the stored copy of an entry. Returns false if no entry has its id.
    #[instrument(skip(self, entry), fields(entry_id = %entry.id))]
    pub async fn update_entry(&self, entry: JournalEntry) -> MindfulResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.entries().await?;
        let Some(slot) = entries.iter_mut().find(|e| e.id == entry.id) else {
            return Ok(false);
        };
        *slot = entry;
        self.save_slice(StateSlice::Entries, &entries).await?;
        Ok(true)
    }

    // ---- Feed ----

    /// All posts, newest first.
    pub async fn posts(&self) -> MindfulResult<Vec<FeedPost>> {
        self.load_slice(StateSlice::Posts).await
    }

    /// Add a finished post at the top of the feed.
    #[instrument(skip(self, post), fields(post_id = %post.id()))]
    pub async fn append_post(&self, post: FeedPost) -> MindfulResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.posts().await?;
        posts.insert(0, post);
        self.save_slice(StateSlice::Posts, &posts).await?;
        info!(count = posts.len(), "Post published");
        Ok(())
    }

    /// Flip the like state of a post and persist it.
    ///
    /// Returns the updated post, or `None` if no post has that id.
    #[instrument(skip(self))]
    pub async fn toggle_like(&self, post_id: &str) -> MindfulResult<Option<FeedPost>> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.posts().await?;
        if !mindful_core::toggle_like(&mut posts, post_id) {
            debug!("No post with that id");
            return Ok(None);
        }
        self.save_slice(StateSlice::Posts, &posts).await?;
        Ok(posts.into_iter().find(|p| p.id() == post_id))
    }

    // ---- Config ----

    /// Generation preferences, or defaults if never saved.
    pub async fn config(&self) -> MindfulResult<GenerationConfig> {
        self.load_slice(StateSlice::Config).await
    }

    /// Replace the generation preferences.
    #[instrument(skip(self, config))]
    pub async fn update_config(&self, config: &GenerationConfig) -> MindfulResult<()> {
        let _guard = self.write_lock.lock().await;
        self.save_slice(StateSlice::Config, config).await
    }

    // ---- Tasks ----

    /// All study tasks in insertion order.
    pub async fn tasks(&self) -> MindfulResult<Vec<Task>> {
        self.load_slice(StateSlice::Tasks).await
    }

    /// Append tasks to the list.
    #[instrument(skip(self, new_tasks), fields(count = new_tasks.len()))]
    pub async fn add_tasks(&self, new_tasks: Vec<Task>) -> MindfulResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.tasks().await?;
        tasks.extend(new_tasks);
        self.save_slice(StateSlice::Tasks, &tasks).await
    }

    /// Flip the completed flag of a task. Returns false if no task has that id.
    #[instrument(skip(self))]
    pub async fn toggle_task(&self, task_id: &str) -> MindfulResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.tasks().await?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        self.save_slice(StateSlice::Tasks, &tasks).await?;
        Ok(true)
    }

    // ---- Friends ----

    /// All companion personas.
    pub async fn friends(&self) -> MindfulResult<Vec<FriendProfile>> {
        self.load_slice(StateSlice::Friends).await
    }

    /// Add a companion persona.
    #[instrument(skip(self, friend), fields(name = %friend.name))]
    pub async fn add_friend(&self, friend: FriendProfile) -> MindfulResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut friends = self.friends().await?;
        friends.push(friend);
        self.save_slice(StateSlice::Friends, &friends).await
    }

    /// Find a companion persona by name, ignoring case.
    pub async fn find_friend(&self, name: &str) -> MindfulResult<Option<FriendProfile>> {
        Ok(self
            .friends()
            .await?
            .into_iter()
            .find(|f| f.name.eq_ignore_ascii_case(name)))
    }
}
