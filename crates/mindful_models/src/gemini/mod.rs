//! Google Gemini REST API client.
//!
//! [`GeminiClient`] implements every capability trait from
//! `mindful_interface`:
//! - `generateContent` for text, JSON mode, images and speech
//! - `predictLongRunning` plus operation polling for Veo video
//!
//! Transient failures (timeouts, 429, 5xx) are retried with exponential
//! backoff unless retries are disabled in [`mindful_config::GeminiSettings`].

mod client;
mod conversion;
mod dto;

pub use client::GeminiClient;

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, mindful_error::GeminiError>;
