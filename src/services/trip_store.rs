use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Client, Collection,
};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::models::trip::StoredTrip;

const TRIP_COLLECTION: &str = "trips";

#[derive(Debug)]
pub enum PersistenceError {
    Disabled,
    Database(mongodb::error::Error),
    MissingId,
    InvalidId(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Disabled => write!(f, "Persistence is disabled (MONGO_URI not set)"),
            PersistenceError::Database(err) => write!(f, "Database error: {}", err),
            PersistenceError::MissingId => write!(f, "Store did not return an inserted id"),
            PersistenceError::InvalidId(id) => write!(f, "Invalid trip id: {}", id),
        }
    }
}

impl Error for PersistenceError {}

impl From<mongodb::error::Error> for PersistenceError {
    fn from(err: mongodb::error::Error) -> Self {
        PersistenceError::Database(err)
    }
}

/// Write-once storage for generated trips. Records are never updated or deleted.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Persist a trip and return its generated identifier.
    async fn save(&self, trip: StoredTrip) -> Result<String, PersistenceError>;

    async fn find(&self, id: &str) -> Result<Option<StoredTrip>, PersistenceError>;

    /// Cheap reachability probe used by the health check.
    async fn ping(&self) -> Result<(), PersistenceError>;
}

pub struct MongoTripStore {
    collection: Collection<StoredTrip>,
    client: Arc<Client>,
    database: String,
}

impl MongoTripStore {
    pub fn new(client: Arc<Client>, database: &str) -> Self {
        let collection = client.database(database).collection(TRIP_COLLECTION);
        Self {
            collection,
            client,
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl TripStore for MongoTripStore {
    async fn save(&self, mut trip: StoredTrip) -> Result<String, PersistenceError> {
        let curr_time = Utc::now();
        trip.id = None;
        trip.created_at = Some(curr_time);
        trip.updated_at = Some(curr_time);

        let result = self.collection.insert_one(&trip).await?;
        result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .ok_or(PersistenceError::MissingId)
    }

    async fn find(&self, id: &str) -> Result<Option<StoredTrip>, PersistenceError> {
        let id = ObjectId::parse_str(id).map_err(|_| PersistenceError::InvalidId(id.to_string()))?;
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

/// Stand-in used when no connection string is configured.
pub struct DisabledTripStore;

#[async_trait]
impl TripStore for DisabledTripStore {
    async fn save(&self, _trip: StoredTrip) -> Result<String, PersistenceError> {
        Err(PersistenceError::Disabled)
    }

    async fn find(&self, _id: &str) -> Result<Option<StoredTrip>, PersistenceError> {
        Err(PersistenceError::Disabled)
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        Err(PersistenceError::Disabled)
    }
}
