use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::mongo::create_mongo_client;
use crate::services::completion::{CompletionProvider, OpenAiCompatibleProvider};
use crate::services::itinerary_generation_service::{ItineraryGenerationConfig, ItineraryGenerator};
use crate::services::trip_store::{DisabledTripStore, MongoTripStore, TripStore};

/// Everything a handler needs, built once at startup and shared via `web::Data`.
pub struct AppState {
    pub generator: ItineraryGenerator,
    pub store: Arc<dyn TripStore>,
    pub persistence_enabled: bool,
    pub model: String,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        provider: Arc<dyn CompletionProvider>,
        store: Option<Arc<dyn TripStore>>,
    ) -> Self {
        let generator = ItineraryGenerator::with_config(
            provider,
            ItineraryGenerationConfig::from(&config.completion),
        );
        let persistence_enabled = store.is_some();
        let store = store.unwrap_or_else(|| Arc::new(DisabledTripStore) as Arc<dyn TripStore>);

        Self {
            generator,
            store,
            persistence_enabled,
            model: config.completion.model.clone(),
        }
    }

    /// Wire the real provider and, when configured, MongoDB.
    pub async fn from_config(config: &AppConfig) -> Self {
        let provider: Arc<dyn CompletionProvider> =
            Arc::new(OpenAiCompatibleProvider::new(&config.completion));

        let store: Option<Arc<dyn TripStore>> = match &config.mongo_uri {
            Some(uri) => match create_mongo_client(uri, &config.mongo_database).await {
                Ok(client) => Some(
                    Arc::new(MongoTripStore::new(client, &config.mongo_database)) as Arc<dyn TripStore>,
                ),
                Err(e) => {
                    log::error!("MongoDB connection error, saving trips is disabled: {}", e);
                    None
                }
            },
            None => None,
        };

        Self::new(config, provider, store)
    }
}
