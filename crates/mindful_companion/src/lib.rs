//! Companion features built on the generative provider.
//!
//! Everything here is independent of the feed pipeline:
//!
//! - [`EntryReflector`] turns a diary entry into a short supportive reflection
//! - [`StudyPlanner`] breaks a study goal into tasks, optionally from a document
//! - [`TravelPlanner`] finds destinations in recent entries and plans trips
//! - [`ChatSession`] holds a study tutor or friend conversation
//!
//! Each type holds an `Arc` to a provider implementing the capabilities it
//! needs, so one provider can back all of them.

#![warn(missing_docs)]

mod chat;
mod parts;
mod reflection;
mod study;
mod travel;

pub use chat::{ChatSession, STUDY_PRIMING_REPLY};
pub use parts::attachment_part;
pub use reflection::{EntryReflector, MIN_REFLECTION_CHARS, reflection_schema};
pub use study::{StudyPlanner, study_plan_schema};
pub use travel::{TravelPlanner, destinations_schema};
