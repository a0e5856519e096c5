//! Final assembly of a feed post.

use chrono::Utc;
use mindful_core::{AudioClip, FeedPost, GenerationRequest, MediaResult, VisualBrief};
use uuid::Uuid;

/// Prefix of every generated post id.
pub const POST_ID_PREFIX: &str = "post-";

/// Combines stage outputs into a [`FeedPost`]. Does not persist.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedPostAssembler;

impl FeedPostAssembler {
    /// Build a post with a fresh id, the current time and no likes.
    ///
    /// A media result is required; there is no way to assemble a post
    /// without one.
    pub fn assemble(
        request: &GenerationRequest,
        brief: VisualBrief,
        media: MediaResult,
        narration: Option<AudioClip>,
    ) -> FeedPost {
        FeedPost::new(
            format!("{}{}", POST_ID_PREFIX, Uuid::new_v4()),
            request.entry_id().clone(),
            media,
            brief.caption,
            Utc::now(),
            *request.mood(),
            narration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindful_core::{GenerationConfig, MediaPayload, Mood};

    #[test]
    fn test_assemble_copies_inputs_and_starts_unliked() {
        let request = GenerationRequest::new(
            "entry-9",
            "text",
            Mood::Stressed,
            vec![],
            GenerationConfig::default(),
        );
        let brief = VisualBrief {
            visual_prompt: "storm clouds".to_string(),
            caption: "It will pass.".to_string(),
        };
        let media = MediaResult::Image(MediaPayload::new("image/png", vec![7]));

        let first = FeedPostAssembler::assemble(&request, brief.clone(), media.clone(), None);
        let second = FeedPostAssembler::assemble(&request, brief, media.clone(), None);

        assert!(first.id().starts_with(POST_ID_PREFIX));
        assert_ne!(first.id(), second.id());
        assert_eq!(first.source_entry_id(), "entry-9");
        assert_eq!(first.caption(), "It will pass.");
        assert_eq!(first.media(), &media);
        assert_eq!(*first.mood_tag(), Mood::Stressed);
        assert_eq!(*first.like_count(), 0);
        assert!(!*first.liked_by_user());
        assert!(first.narration_audio().is_none());
    }
}
