//! Terminal counterpart of the browser front-end: submits preferences to the
//! backend, keeps a short local history and lays itineraries out for display.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::models::itinerary::Itinerary;
use crate::models::trip::GenerateTripRequest;

pub mod explore;
pub mod history;
pub mod render;
pub mod request;

use history::{LocalStorage, TripHistory};
use request::ItineraryClient;

pub const CONNECTIVITY_MESSAGE: &str = "Unable to connect to the travel engine. Please try again.";

#[derive(Debug)]
pub enum ClientError {
    /// Validation, provider and network failures all end up here.
    Connectivity,
    /// A generation request is already outstanding.
    Busy,
    EmptyDestination,
    UnknownHistoryEntry(usize),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Connectivity => f.write_str(CONNECTIVITY_MESSAGE),
            ClientError::Busy => f.write_str("A trip is already being generated"),
            ClientError::EmptyDestination => f.write_str("Enter a destination first"),
            ClientError::UnknownHistoryEntry(index) => {
                write!(f, "No saved trip at position {}", index)
            }
        }
    }
}

impl std::error::Error for ClientError {}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One user's planning session: the displayed itinerary plus recent history.
pub struct TripPlanner {
    client: ItineraryClient,
    storage: LocalStorage,
    history: Mutex<TripHistory>,
    current: Mutex<Option<Itinerary>>,
    busy: AtomicBool,
}

impl TripPlanner {
    pub fn new(client: ItineraryClient, storage: LocalStorage) -> Self {
        let history = TripHistory::load(&storage);
        Self {
            client,
            storage,
            history: Mutex::new(history),
            current: Mutex::new(None),
            busy: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &ItineraryClient {
        &self.client
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Submit preferences. Only one submission may be in flight at a time.
    pub async fn submit(&self, request: &GenerateTripRequest) -> Result<Itinerary, ClientError> {
        let blank = request
            .destination
            .as_deref()
            .map_or(true, |d| d.trim().is_empty());
        if blank {
            return Err(ClientError::EmptyDestination);
        }

        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(ClientError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = None;

        let itinerary = self.client.generate(request).await?;

        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(itinerary.clone());
        self.remember(itinerary.clone());
        Ok(itinerary)
    }

    /// Replace the displayed itinerary with a history entry (0 is the newest).
    pub fn load_from_history(&self, index: usize) -> Result<Itinerary, ClientError> {
        let entry = self
            .history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(index)
            .cloned()
            .ok_or(ClientError::UnknownHistoryEntry(index))?;

        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(entry.clone());
        Ok(entry)
    }

    pub fn current(&self) -> Option<Itinerary> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn history(&self) -> Vec<Itinerary> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries()
            .cloned()
            .collect()
    }

    fn remember(&self, itinerary: Itinerary) {
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        history.push(itinerary);
        if let Err(e) = history.save(&self.storage) {
            log::warn!("Could not persist trip history: {}", e);
        }
    }
}
