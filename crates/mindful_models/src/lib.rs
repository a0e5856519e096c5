//! Generative model provider integrations for Mindful.
//!
//! Each provider sits behind its own feature flag. The only provider today is
//! Google Gemini, reached over its REST API, which covers every capability the
//! journal needs: text, structured output, image generation, Veo video jobs
//! and text-to-speech.
//!
//! # Example
//!
//! ```no_run
//! use mindful_config::MindfulConfig;
//! use mindful_core::GenerateRequest;
//! use mindful_interface::TextGeneration;
//! use mindful_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MindfulConfig::load()?;
//! let client = GeminiClient::from_config(&config)?;
//! let response = client.generate(&GenerateRequest::prompt("Hello")).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiResult};
