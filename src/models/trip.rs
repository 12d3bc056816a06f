use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::errors::ApiError;
use crate::models::itinerary::Itinerary;

pub const MISSING_FIELDS_MESSAGE: &str = "Destination and days are required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Budget {
    Economy,
    #[default]
    Standard,
    Luxury,
}

impl Budget {
    /// Label the front-end form submits, also used in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Budget::Economy => "Cheap",
            Budget::Standard => "Moderate",
            Budget::Luxury => "Luxury",
        }
    }
}

impl From<String> for Budget {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cheap" | "economy" | "budget" => Budget::Economy,
            "luxury" => Budget::Luxury,
            _ => Budget::Standard,
        }
    }
}

impl From<Budget> for String {
    fn from(budget: Budget) -> Self {
        budget.label().to_string()
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Form inputs arrive as strings, API callers send numbers
fn deserialize_optional_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Number(n)) => Ok(n.as_u64().and_then(|d| u32::try_from(d).ok())),
        Some(serde_json::Value::String(s)) => Ok(s.trim().parse::<u32>().ok()),
        _ => Ok(None),
    }
}

/// Body of `POST /api/generate-trip` as it arrives on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateTripRequest {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_days")]
    pub days: Option<u32>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub interests: Option<String>,
}

impl GenerateTripRequest {
    pub fn validate(self) -> Result<TripPreferences, ApiError> {
        let destination = self
            .destination
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        match (destination, self.days) {
            (Some(destination), Some(days)) if days >= 1 => Ok(TripPreferences {
                destination,
                days,
                budget: self.budget.unwrap_or_default(),
                interests: self.interests.unwrap_or_default().trim().to_string(),
            }),
            _ => Err(ApiError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

/// Validated preferences. Immutable once handed to the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPreferences {
    pub destination: String,
    pub days: u32,
    pub budget: Budget,
    pub interests: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTripRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default, deserialize_with = "deserialize_optional_days")]
    pub days: Option<u32>,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub interests: String,
    #[serde(rename = "generatedContent")]
    pub generated_content: Itinerary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveTripResponse {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTrip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub destination: String,
    pub days: Option<u32>,
    pub budget: Budget,
    pub interests: String,
    #[serde(rename = "generatedContent")]
    pub generated_content: Itinerary,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SaveTripRequest> for StoredTrip {
    fn from(req: SaveTripRequest) -> Self {
        Self {
            id: None,
            destination: req.destination,
            days: req.days,
            budget: req.budget,
            interests: req.interests,
            generated_content: req.generated_content,
            created_at: None,
            updated_at: None,
        }
    }
}
