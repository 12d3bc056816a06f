use actix_web::{error, web, HttpResponse};

use crate::errors::{ApiError, ErrorBody, SAVE_FAILED_MESSAGE};

pub mod health;
pub mod trip;

/// Route table shared by the server binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .route("/generate-trip", web::post().to(trip::generate_trip))
                .service(
                    web::resource("/save-trip")
                        .app_data(save_json_config())
                        .route(web::post().to(trip::save_trip)),
                )
                .route("/trips/{id}", web::get().to(trip::get_trip)),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid request body: {}", err);
        log::warn!("{}", message);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorBody { error: message }),
        )
        .into()
    })
}

// Saving only ever answers success or "Failed to save trip"
fn save_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::error!("Save error: unreadable trip record: {}", err);
        ApiError::PersistenceFailure(SAVE_FAILED_MESSAGE.to_string()).into()
    })
}
