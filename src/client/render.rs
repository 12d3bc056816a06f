use serde::Serialize;
use std::fmt;
use url::form_urlencoded;

use crate::models::itinerary::{Activity, Itinerary};

const IMAGE_SERVICE_URL: &str = "https://image.pollinations.ai/prompt/";
const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/";
const DEFAULT_AREA: &str = "City Center";

#[derive(Debug, Clone, Serialize)]
pub struct RenderedTrip {
    pub destination: String,
    pub summary: String,
    pub duration: String,
    pub budget: String,
    pub background_image_url: String,
    pub days: Vec<RenderedDay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedDay {
    pub title: String,
    pub theme: String,
    pub cards: Vec<ActivityCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityCard {
    pub time: String,
    pub place: String,
    pub description: String,
    pub area: String,
    pub image_url: String,
    pub map_url: String,
}

/// Lay an itinerary out day by day. Image and map links are derived on every
/// call and never checked for existence.
pub fn render(itinerary: &Itinerary) -> RenderedTrip {
    let destination = &itinerary.trip_details.destination;

    RenderedTrip {
        destination: destination.clone(),
        summary: itinerary.trip_details.summary.clone(),
        duration: itinerary.trip_details.duration.clone(),
        budget: itinerary.trip_details.budget.clone(),
        background_image_url: background_image_url(destination),
        days: itinerary
            .itinerary
            .iter()
            .map(|day| RenderedDay {
                title: format!("Day {}", day.day),
                theme: day.theme.clone(),
                cards: day
                    .activities
                    .iter()
                    .map(|activity| activity_card(activity, destination))
                    .collect(),
            })
            .collect(),
    }
}

fn activity_card(activity: &Activity, destination: &str) -> ActivityCard {
    let area = if activity.location_area.trim().is_empty() {
        DEFAULT_AREA.to_string()
    } else {
        activity.location_area.clone()
    };

    ActivityCard {
        time: activity.time.clone(),
        place: activity.place.clone(),
        description: activity.description.clone(),
        area,
        image_url: activity_image_url(&activity.place, destination),
        map_url: map_search_url(&activity.map_query),
    }
}

/// Percent-encode one URL component the way browsers' `encodeURIComponent` does
/// for the characters that matter here: spaces become `%20`, separators are escaped.
fn encode_component(value: &str) -> String {
    // byte_serialize writes a literal '+' as %2B, so any '+' left is a space
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn image_url(prompt: &str, width: u32, height: u32) -> String {
    format!(
        "{}{}?width={}&height={}&nologo=true",
        IMAGE_SERVICE_URL,
        encode_component(prompt),
        width,
        height
    )
}

pub fn activity_image_url(place: &str, destination: &str) -> String {
    image_url(&format!("cinematic photo of {} in {}", place, destination), 800, 600)
}

pub fn background_image_url(destination: &str) -> String {
    image_url(
        &format!("cinematic drone shot of {} luxury travel 4k", destination),
        1920,
        1080,
    )
}

pub fn map_search_url(query: &str) -> String {
    format!("{}?api=1&query={}", MAP_SEARCH_URL, encode_component(query))
}

impl fmt::Display for RenderedTrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.destination)?;
        if !self.summary.is_empty() {
            writeln!(f, "\"{}\"", self.summary)?;
        }
        writeln!(f, "{} | {}", self.duration, self.budget)?;

        for day in &self.days {
            writeln!(f)?;
            writeln!(f, "{}: {}", day.title, day.theme)?;
            for card in &day.cards {
                writeln!(f, "  [{}] {} ({})", card.time, card.place, card.area)?;
                writeln!(f, "    {}", card.description)?;
                writeln!(f, "    Map:   {}", card.map_url)?;
                writeln!(f, "    Photo: {}", card.image_url)?;
            }
        }
        Ok(())
    }
}
