pub mod completion;
pub mod itinerary_generation_service;
pub mod trip_store;
