use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::config::CompletionConfig;
use crate::models::itinerary::Itinerary;
use crate::models::trip::TripPreferences;
use crate::services::completion::{
    ChatCompletionRequest, ChatMessage, CompletionProvider, GenerationError,
};

const SYSTEM_MESSAGE: &str = "You are a helpful travel assistant. Output only JSON.";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone)]
pub struct ItineraryGenerationConfig {
    pub model: String,
    /// Moderate on purpose: identical requests are expected to vary.
    pub temperature: f32,
}

impl Default for ItineraryGenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl From<&CompletionConfig> for ItineraryGenerationConfig {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

pub struct ItineraryGenerator {
    provider: Arc<dyn CompletionProvider>,
    config: ItineraryGenerationConfig,
}

impl ItineraryGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self::with_config(provider, ItineraryGenerationConfig::default())
    }

    pub fn with_config(
        provider: Arc<dyn CompletionProvider>,
        config: ItineraryGenerationConfig,
    ) -> Self {
        Self { provider, config }
    }

    /// Generate an itinerary for the given preferences.
    ///
    /// Single shot: provider failures and unparseable output are returned as-is,
    /// nothing is cached and nothing is retried.
    pub async fn generate(&self, prefs: &TripPreferences) -> Result<Itinerary, GenerationError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_MESSAGE),
                ChatMessage::user(build_prompt(prefs)),
            ],
            temperature: self.config.temperature,
        };

        let raw = self.provider.complete(&request).await?;
        log::debug!("Provider returned {} bytes", raw.len());

        parse_itinerary(&raw)
    }
}

pub fn build_prompt(prefs: &TripPreferences) -> String {
    let interests = if prefs.interests.is_empty() {
        "No specific preference"
    } else {
        prefs.interests.as_str()
    };

    format!(
        r#"
Act as a local expert travel guide. Create a detailed, day-by-day itinerary for a trip to {destination}.

User Preferences:
- Duration: {days} Days
- Budget: {budget}
- Interests: {interests}

CRITICAL INSTRUCTIONS:
1. Be specific. Do not say "Visit a local park". Say "Visit Ueno Park".
2. Suggest logically grouped activities (places close to each other).
3. Provide a "map_query" for every activity so it can be linked to Google Maps.

RESPONSE FORMAT:
You must output strictly valid JSON. No markdown, no code fences.

{{
  "trip_details": {{
    "destination": "{destination}",
    "duration": "{days} days",
    "budget": "{budget}",
    "summary": "A 1-sentence summary of the vibe of this trip."
  }},
  "itinerary": [
    {{
      "day": 1,
      "theme": "Theme of the day (e.g., Historic Old Town)",
      "activities": [
        {{
          "time": "Morning",
          "place": "Exact Name of Place",
          "description": "Why visit here? (1 sentence)",
          "location_area": "Neighborhood name (e.g., Shinjuku)",
          "map_query": "Exact Name of Place, City Name"
        }}
      ]
    }}
  ]
}}
"#,
        destination = prefs.destination,
        days = prefs.days,
        budget = prefs.budget,
        interests = interests,
    )
}

fn fence_pattern() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| match Regex::new(r"```(?:json|JSON)?") {
            Ok(re) => Some(re),
            Err(e) => {
                log::error!("Code fence pattern failed to compile: {}", e);
                None
            }
        })
        .as_ref()
}

/// Remove markdown code fences the model may emit despite being told not to.
pub fn strip_code_fences(raw: &str) -> String {
    match fence_pattern() {
        Some(re) => re.replace_all(raw, "").trim().to_string(),
        None => raw.replace("```json", "").replace("```", "").trim().to_string(),
    }
}

/// Parse provider output into a typed itinerary.
///
/// Falls back to the outermost `{ ... }` span when the object is wrapped in prose.
pub fn parse_itinerary(raw: &str) -> Result<Itinerary, GenerationError> {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str::<Itinerary>(&cleaned) {
        Ok(itinerary) => Ok(itinerary),
        Err(first) => {
            let start = cleaned.find('{');
            let end = cleaned.rfind('}');
            match (start, end) {
                (Some(start), Some(end)) if start < end && (start > 0 || end + 1 < cleaned.len()) => {
                    serde_json::from_str::<Itinerary>(&cleaned[start..=end])
                        .map_err(|e| GenerationError::Parse(e.to_string()))
                }
                _ => Err(GenerationError::Parse(first.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::Budget;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const ONE_DAY: &str = r#"{
        "trip_details": {"destination": "Kyoto, Japan", "duration": "3 days", "budget": "Moderate", "summary": "Temples and sushi."},
        "itinerary": [
            {"day": 1, "theme": "Higashiyama", "activities": [
                {"time": "Morning", "place": "Kiyomizu-dera", "description": "Wooden stage temple.", "location_area": "Higashiyama", "map_query": "Kiyomizu-dera, Kyoto"}
            ]}
        ]
    }"#;

    struct CannedProvider {
        reply: Result<String, u16>,
        seen: Mutex<Vec<ChatCompletionRequest>>,
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, GenerationError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(GenerationError::Api {
                    status: *status,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    fn prefs() -> TripPreferences {
        TripPreferences {
            destination: "Kyoto, Japan".to_string(),
            days: 3,
            budget: Budget::Standard,
            interests: "Temples, Sushi".to_string(),
        }
    }

    #[test]
    fn test_prompt_embeds_preferences() {
        let prompt = build_prompt(&prefs());
        assert!(prompt.contains("a trip to Kyoto, Japan."));
        assert!(prompt.contains("- Duration: 3 Days"));
        assert!(prompt.contains("- Budget: Moderate"));
        assert!(prompt.contains("- Interests: Temples, Sushi"));
        assert!(prompt.contains("\"map_query\""));
        assert!(prompt.contains("strictly valid JSON"));
    }

    #[test]
    fn test_prompt_without_interests() {
        let mut p = prefs();
        p.interests.clear();
        assert!(build_prompt(&p).contains("- Interests: No specific preference"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```\n"), "{}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
        assert_eq!(strip_code_fences("```JSON\n{}```"), "{}");
        assert!(fence_pattern().is_some());
    }

    #[test]
    fn test_parse_fenced_response() {
        let fenced = format!("```json\n{}\n```", ONE_DAY);
        let itinerary = parse_itinerary(&fenced).unwrap();
        assert_eq!(itinerary.day_count(), 1);
        assert_eq!(itinerary.itinerary[0].activities[0].place, "Kiyomizu-dera");
    }

    #[test]
    fn test_parse_response_wrapped_in_prose() {
        let chatty = format!("Here is your trip!\n{}\nEnjoy.", ONE_DAY);
        assert_eq!(parse_itinerary(&chatty).unwrap().trip_details.summary, "Temples and sushi.");
    }

    #[test]
    fn test_parse_rejects_invalid_json_and_wrong_shape() {
        assert!(matches!(parse_itinerary("not json at all"), Err(GenerationError::Parse(_))));
        assert!(matches!(parse_itinerary(r#"{"itinerary": []}"#), Err(GenerationError::Parse(_))));
    }

    #[test]
    fn test_missing_location_area_defaults_to_empty() {
        let raw = ONE_DAY.replace(r#""location_area": "Higashiyama", "#, "");
        let itinerary = parse_itinerary(&raw).unwrap();
        assert_eq!(itinerary.itinerary[0].activities[0].location_area, "");
    }

    #[tokio::test]
    async fn test_generate_sends_system_and_user_messages() {
        let provider = Arc::new(CannedProvider {
            reply: Ok(ONE_DAY.to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let generator = ItineraryGenerator::new(provider.clone());

        let itinerary = generator.generate(&prefs()).await.unwrap();
        assert_eq!(itinerary.trip_details.destination, "Kyoto, Japan");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "gpt-4o");
        assert_eq!(seen[0].messages[0], ChatMessage::system(SYSTEM_MESSAGE));
        assert_eq!(seen[0].messages[1].role, "user");
    }

    #[tokio::test]
    async fn test_generate_propagates_provider_errors() {
        let provider = Arc::new(CannedProvider {
            reply: Err(503),
            seen: Mutex::new(Vec::new()),
        });
        let generator = ItineraryGenerator::new(provider.clone());

        assert!(matches!(
            generator.generate(&prefs()).await,
            Err(GenerationError::Api { status: 503, .. })
        ));
        assert_eq!(provider.seen.lock().unwrap().len(), 1);
    }
}
