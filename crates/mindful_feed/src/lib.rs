//! Diary entry to feed post generation pipeline.
//!
//! A run turns one [`GenerationRequest`](mindful_core::GenerationRequest) into
//! one [`FeedPost`](mindful_core::FeedPost) through four stages:
//!
//! 1. [`ConfigResolver`] derives aspect ratios and prompt suffixes
//! 2. [`PromptSynthesizer`] asks for a visual prompt and caption
//! 3. [`MediaGenerator`] renders an image or a video, while
//!    [`NarrationGenerator`] optionally synthesizes audio alongside it
//! 4. [`FeedPostAssembler`] combines the results
//!
//! Prompt and media failures end the run; narration failures only drop the
//! audio. The pipeline never persists anything.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mindful_config::MindfulConfig;
//! use mindful_core::{GenerationConfig, GenerationRequest, Mood};
//! use mindful_feed::FeedPipeline;
//! use mindful_models::GeminiClient;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MindfulConfig::load()?;
//! let client = Arc::new(GeminiClient::from_config(&config)?);
//! let pipeline = FeedPipeline::new(client, &config.pipeline);
//!
//! let request = GenerationRequest::new(
//!     "entry-1",
//!     "Walked by the river at sunset.",
//!     Mood::Great,
//!     vec![],
//!     GenerationConfig::default(),
//! );
//! let post = pipeline.run(&request, &CancellationToken::new()).await?;
//! println!("{}", post.caption());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod driver;
mod media;
mod narration;
mod pipeline;
mod prompt;
mod render_job;
mod resolver;

pub use assembler::{FeedPostAssembler, POST_ID_PREFIX};
pub use driver::FeedDriver;
pub use media::{MAX_REFERENCE_IMAGES, MediaGenerator, reference_images};
pub use narration::NarrationGenerator;
pub use pipeline::FeedPipeline;
pub use prompt::{PromptSynthesizer, visual_brief_schema};
pub use render_job::{RenderHandle, VideoRenderJob};
pub use resolver::{
    COMIC_BOOK_STYLE, COMIC_BOOK_SUFFIX, ConfigResolver, IMAGE_REFERENCE_HINT, QUALITY_SUFFIX,
    ResolvedConfig, VIDEO_REFERENCE_HINT,
};
