//! Keys of the persisted state slices.

/// One independently persisted part of the journal state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum StateSlice {
    /// Diary entries, newest first
    #[strum(serialize = "mindful_entries")]
    Entries,
    /// Study tasks
    #[strum(serialize = "mindful_tasks")]
    Tasks,
    /// Feed posts, newest first
    #[strum(serialize = "mindful_posts")]
    Posts,
    /// Generation preferences
    #[strum(serialize = "mindful_config")]
    Config,
    /// Companion personas
    #[strum(serialize = "mindful_friends")]
    Friends,
}

impl StateSlice {
    /// Storage key for this slice.
    pub fn key(self) -> &'static str {
        self.into()
    }
}
