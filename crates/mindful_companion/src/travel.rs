//! Travel intents and trip planning.

use mindful_core::{
    GenerateRequest, Input, JournalEntry, MediaPayload, Output, Place, Tool, Trip, TripStatus,
};
use mindful_error::{JsonError, MindfulResult};
use mindful_interface::{AspectRatio, ImageGeneration, JsonMode, TextGeneration};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Number of recent entries scanned for travel intents.
const INTENT_WINDOW: usize = 3;

/// Response schema for a destination list.
pub fn destinations_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "destinations": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["destinations"]
    })
}

#[derive(Debug, Deserialize)]
struct Destinations {
    #[serde(default)]
    destinations: Vec<String>,
}

/// Text of the most recent entries, oldest first.
fn recent_text(entries: &[JournalEntry]) -> String {
    let mut recent: Vec<&JournalEntry> = entries.iter().collect();
    recent.sort_by_key(|entry| entry.date);
    let skip = recent.len().saturating_sub(INTENT_WINDOW);
    recent
        .into_iter()
        .skip(skip)
        .map(|entry| entry.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds destinations in the diary and plans trips to them.
#[derive(Debug)]
pub struct TravelPlanner<D: ?Sized> {
    driver: Arc<D>,
}

impl<D> TravelPlanner<D>
where
    D: TextGeneration + JsonMode + ImageGeneration + ?Sized,
{
    /// Create a planner over a provider with text, structured and image output.
    pub fn new(driver: Arc<D>) -> Self {
        Self { driver }
    }

    /// Destination names mentioned in, or suggested by, the latest entries.
    ///
    /// Returns an empty list without calling the provider when there are no
    /// entries.
    #[instrument(skip_all, fields(entries = entries.len()))]
    pub async fn extract_travel_intent(
        &self,
        entries: &[JournalEntry],
    ) -> MindfulResult<Vec<String>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = format!(
            "Analyze these diary entries and identify any travel intents, dream destinations, \
             or past trips mentioned.\n\
             Return a list of just the destination names (e.g., \"Paris\", \"Kyoto\", \"Grand Canyon\").\n\
             If nothing specific, suggest 2 destinations that match the mood \
             (e.g. \"Relaxing Beach\", \"Quiet Cabin\").\n\
             Entries: \"{}\"",
            recent_text(entries)
        );
        let value = self
            .driver
            .generate_json(&GenerateRequest::prompt(prompt), &destinations_schema())
            .await?;
        let found: Destinations = serde_json::from_value(value)
            .map_err(|e| JsonError::new(format!("Destinations did not match schema: {}", e)))?;

        debug!(count = found.destinations.len(), "Travel intents extracted");
        Ok(found.destinations)
    }

    /// Plan a trip: a grounded itinerary and a header image, requested
    /// concurrently.
    ///
    /// A failed or empty image request leaves the header empty.
    ///
    /// # Errors
    ///
    /// Fails when the itinerary request fails.
    #[instrument(skip(self))]
    pub async fn plan_trip(&self, destination: &str) -> MindfulResult<Trip> {
        let itinerary = GenerateRequest::prompt(format!(
            "Plan a travel itinerary for {}.\n\
             Provide a structured Markdown description of the vibe, best time to visit, \
             and a day-by-day highlight.\n\
             Then, use the Google Maps tool to find 4-5 specific top-rated places to visit \
             (attractions, restaurants, etc).",
            destination
        ))
        .with_tools(vec![Tool::GoogleMaps]);
        let header_prompt = vec![Input::Text(format!(
            "A cinematic, high-quality travel photography shot of {}, golden hour, wide angle, \
             4k, travel magazine style, breathtaking view",
            destination
        ))];

        let (text, image) = tokio::join!(
            self.driver.generate(&itinerary),
            self.driver
                .generate_image(&header_prompt, AspectRatio::Landscape),
        );
        let text = text?;

        let places: Vec<Place> = text
            .grounding
            .iter()
            .map(|source| Place {
                title: source
                    .title
                    .clone()
                    .unwrap_or_else(|| "Unknown Place".to_string()),
                uri: source.uri.clone().unwrap_or_else(|| "#".to_string()),
                address: None,
                rating: None,
            })
            .collect();

        let header_image = match image {
            Ok(outputs) => outputs.into_iter().find_map(|output| match output {
                Output::Image { mime, data } if !data.is_empty() => {
                    Some(MediaPayload::new(mime, data))
                }
                _ => None,
            }),
            Err(e) => {
                warn!(error = %e, "Header image failed, planning trip without one");
                None
            }
        };

        let description = match text.text() {
            body if body.trim().is_empty() => format!("A trip plan for {}", destination),
            body => body,
        };

        info!(
            places = places.len(),
            with_header = header_image.is_some(),
            "Trip planned"
        );
        Ok(Trip {
            id: format!("trip-{}", uuid::Uuid::new_v4()),
            destination: destination.to_string(),
            description,
            places,
            status: TripStatus::Planned,
            header_image,
        })
    }
}
