#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ClientOptions;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use trip_planner_api::config::{AppConfig, CompletionConfig};
use trip_planner_api::models::trip::StoredTrip;
use trip_planner_api::routes;
use trip_planner_api::services::completion::{
    ChatCompletionRequest, CompletionProvider, GenerationError,
};
use trip_planner_api::services::trip_store::{MongoTripStore, PersistenceError, TripStore};
use trip_planner_api::state::AppState;

pub const KYOTO_ONE_DAY: &str = r#"{
  "trip_details": {
    "destination": "Kyoto, Japan",
    "duration": "3 days",
    "budget": "Moderate",
    "summary": "Quiet temples in the morning, sushi counters at night."
  },
  "itinerary": [
    {
      "day": 1,
      "theme": "Eastern Temples",
      "activities": [
        {
          "time": "Morning",
          "place": "Kiyomizu-dera",
          "description": "Hillside temple with a famous wooden stage.",
          "location_area": "Higashiyama",
          "map_query": "Kiyomizu-dera, Kyoto"
        },
        {
          "time": "Evening",
          "place": "Sushi Gion Matsudaya",
          "description": "Counter omakase near the old geisha district.",
          "location_area": "Gion",
          "map_query": "Sushi Gion Matsudaya, Kyoto"
        }
      ]
    }
  ]
}"#;

pub fn itinerary_for(destination: &str) -> String {
    KYOTO_ONE_DAY.replace("Kyoto, Japan", destination)
}

/// Completion provider returning a canned reply and counting calls.
pub struct MockProvider {
    reply: Result<String, u16>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatCompletionRequest>>,
}

impl MockProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(GenerationError::Api {
                status: *status,
                message: "upstream unavailable".to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub struct MemoryTripStore {
    trips: Mutex<HashMap<String, StoredTrip>>,
}

impl MemoryTripStore {
    pub fn len(&self) -> usize {
        self.trips.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<StoredTrip> {
        self.trips.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl TripStore for MemoryTripStore {
    async fn save(&self, mut trip: StoredTrip) -> Result<String, PersistenceError> {
        let id = ObjectId::new();
        let now = chrono::Utc::now();
        trip.id = Some(id);
        trip.created_at = Some(now);
        trip.updated_at = Some(now);
        self.trips.lock().unwrap().insert(id.to_hex(), trip);
        Ok(id.to_hex())
    }

    async fn find(&self, id: &str) -> Result<Option<StoredTrip>, PersistenceError> {
        ObjectId::parse_str(id).map_err(|_| PersistenceError::InvalidId(id.to_string()))?;
        Ok(self.get(id))
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// A real Mongo store whose server cannot be reached (nothing listens on port 1).
pub async fn unreachable_mongo_store() -> Arc<dyn TripStore> {
    let mut options = ClientOptions::parse("mongodb://127.0.0.1:1").await.unwrap();
    options.server_selection_timeout = Some(Duration::from_millis(300));
    options.connect_timeout = Some(Duration::from_millis(300));
    let client = mongodb::Client::with_options(options).unwrap();
    Arc::new(MongoTripStore::new(Arc::new(client), "travel_planner_test"))
}

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        completion: CompletionConfig {
            api_key: "test-token".to_string(),
            base_url: "http://localhost:0".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.7,
        },
        mongo_uri: None,
        mongo_database: "travel_planner_test".to_string(),
    }
}

pub fn app_state(
    provider: Arc<dyn CompletionProvider>,
    store: Option<Arc<dyn TripStore>>,
) -> web::Data<AppState> {
    web::Data::new(AppState::new(&test_config(), provider, store))
}

pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(routes::configure)
}
