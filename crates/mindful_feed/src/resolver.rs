//! Derivation of media parameters from user preferences.

use mindful_core::{GenerationConfig, OutputFormat};
use mindful_interface::AspectRatio;

/// Art style that switches image generation to a wide panel layout.
pub const COMIC_BOOK_STYLE: &str = "Comic Book";

/// Appended to every image prompt.
pub const QUALITY_SUFFIX: &str = ", high quality, digital art, 4k";

/// Appended to image prompts in the comic book style.
pub const COMIC_BOOK_SUFFIX: &str = ", comic book style, graphic novel aesthetic, detailed linework, vibrant colors, multi-panel layout";

/// Appended to image prompts that carry reference images.
pub const IMAGE_REFERENCE_HINT: &str =
    " Use the attached images as character references and visual style guides for the generation.";

/// Appended to video prompts that carry reference images.
pub const VIDEO_REFERENCE_HINT: &str =
    " Animate the characters and environment from the reference images to match the story.";

/// Parameters derived from a [`GenerationConfig`] for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Image or video
    pub output_format: OutputFormat,
    /// Whether narration is requested
    pub include_audio: bool,
    /// Style requested by the user, passed through verbatim
    pub art_style: String,
    /// Caption tone requested by the user, passed through verbatim
    pub caption_tone: String,
    /// Frame shape for still images
    pub image_aspect_ratio: AspectRatio,
    /// Frame shape for video clips
    pub video_aspect_ratio: AspectRatio,
    /// Video frame resolution
    pub video_resolution: String,
    /// Whether the comic book panel layout applies
    pub comic_book: bool,
}

impl ResolvedConfig {
    /// Final image prompt for a visual prompt.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindful_core::GenerationConfig;
    /// use mindful_feed::ConfigResolver;
    ///
    /// let resolved = ConfigResolver::default().resolve(&GenerationConfig::default());
    /// assert_eq!(
    ///     resolved.image_prompt("a lake", false),
    ///     "a lake, high quality, digital art, 4k"
    /// );
    /// ```
    pub fn image_prompt(&self, visual_prompt: &str, has_references: bool) -> String {
        let mut prompt = format!("{}{}", visual_prompt, QUALITY_SUFFIX);
        if self.comic_book {
            prompt.push_str(COMIC_BOOK_SUFFIX);
        }
        if has_references {
            prompt.push_str(IMAGE_REFERENCE_HINT);
        }
        prompt
    }

    /// Final video prompt for a visual prompt.
    pub fn video_prompt(&self, visual_prompt: &str, has_references: bool) -> String {
        if has_references {
            format!("{}{}", visual_prompt, VIDEO_REFERENCE_HINT)
        } else {
            visual_prompt.to_string()
        }
    }
}

/// Pure mapping from preferences to [`ResolvedConfig`].
///
/// Never fails: unknown art styles and tones pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigResolver {
    video_resolution: String,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new("720p")
    }
}

impl ConfigResolver {
    /// Create a resolver that requests videos at `video_resolution`.
    pub fn new(video_resolution: impl Into<String>) -> Self {
        Self {
            video_resolution: video_resolution.into(),
        }
    }

    /// Derive the parameters for one run.
    pub fn resolve(&self, config: &GenerationConfig) -> ResolvedConfig {
        let comic_book = config.art_style.trim().eq_ignore_ascii_case(COMIC_BOOK_STYLE);
        ResolvedConfig {
            output_format: config.output_format,
            include_audio: config.include_audio,
            art_style: config.art_style.clone(),
            caption_tone: config.caption_tone.clone(),
            image_aspect_ratio: if comic_book {
                AspectRatio::Landscape
            } else {
                AspectRatio::Square
            },
            video_aspect_ratio: AspectRatio::Landscape,
            video_resolution: self.video_resolution.clone(),
            comic_book,
        }
    }
}
