//! Travel plans.

use crate::MediaPayload;
use serde::{Deserialize, Serialize};

/// A place suggested for a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Display name
    pub title: String,
    /// Link to the place
    pub uri: String,
    /// Street address, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Rating, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

/// Whether a trip is planned or aspirational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    /// Concrete itinerary
    #[default]
    Planned,
    /// Someday
    Dream,
}

/// A generated travel itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique identifier
    pub id: String,
    /// Destination name
    pub destination: String,
    /// Markdown itinerary
    pub description: String,
    /// Grounded places
    pub places: Vec<Place>,
    /// Planned or dream
    pub status: TripStatus,
    /// Header image, if one was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<MediaPayload>,
}
