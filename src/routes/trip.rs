use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::models::trip::{GenerateTripRequest, SaveTripRequest, SaveTripResponse, StoredTrip};
use crate::state::AppState;

/*
    POST /api/generate-trip
*/
pub async fn generate_trip(
    state: web::Data<AppState>,
    input: web::Json<GenerateTripRequest>,
) -> Result<HttpResponse, ApiError> {
    let prefs = input.into_inner().validate()?;

    log::info!(
        "Generating trip for: {} ({} days, {})",
        prefs.destination,
        prefs.days,
        prefs.budget
    );

    let itinerary = state.generator.generate(&prefs).await?;
    if itinerary.day_count() != prefs.days as usize {
        log::debug!(
            "Model returned {} days for a {} day request",
            itinerary.day_count(),
            prefs.days
        );
    }

    Ok(HttpResponse::Ok().json(itinerary))
}

/*
    POST /api/save-trip
*/
pub async fn save_trip(
    state: web::Data<AppState>,
    input: web::Json<SaveTripRequest>,
) -> Result<HttpResponse, ApiError> {
    let trip = StoredTrip::from(input.into_inner());
    let id = state.store.save(trip).await?;

    log::info!("Saved trip {}", id);
    Ok(HttpResponse::Ok().json(SaveTripResponse { success: true, id }))
}

/*
    GET /api/trips/{id}
*/
pub async fn get_trip(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    match state.store.find(&path.into_inner()).await? {
        Some(trip) => Ok(HttpResponse::Ok().json(trip)),
        None => Err(ApiError::NotFound("Trip not found".to_string())),
    }
}
