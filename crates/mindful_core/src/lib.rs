//! Core data types for the Mindful journaling library.
//!
//! This crate provides the data model shared by every Mindful crate: diary
//! entries, feed posts, generation preferences, study tasks, travel plans,
//! companion personas, and the generic request/response types exchanged with
//! model providers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod encoding;
mod companion;
mod feed;
mod input;
mod journal;
mod media;
mod message;
mod output;
mod request;
mod role;
mod study;
#[cfg(feature = "observability")]
mod telemetry;
mod travel;

pub use companion::{ChatMessage, ChatRole, FriendProfile, Reflection, VoiceName};
pub use feed::{
    AudioClip, FeedPost, GenerationConfig, GenerationRequest, MediaPayload, MediaResult,
    OutputFormat, VisualBrief, toggle_like,
};
pub use input::Input;
pub use journal::{Attachment, AttachmentKind, EntryKind, JournalEntry, Mood};
pub use media::MediaSource;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, GroundingSource, Tool};
pub use role::Role;
pub use study::{Task, TaskPriority};
#[cfg(feature = "observability")]
pub use telemetry::{init_telemetry, shutdown_telemetry};
pub use travel::{Place, Trip, TripStatus};
