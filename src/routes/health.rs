use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // The credential is validated at startup, so only report what is in use
    health.services.insert(
        "completion".to_string(),
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("model {}", state.model)),
        },
    );

    let mongo_result = check_mongodb(&state).await;
    if mongo_result.status == "error" {
        health.status = "degraded".to_string();
    }
    health.services.insert("mongodb".to_string(), mongo_result);

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(state: &AppState) -> ServiceStatus {
    if !state.persistence_enabled {
        return ServiceStatus {
            status: "disabled".to_string(),
            details: Some("MONGO_URI not set".to_string()),
        };
    }

    match state.store.ping().await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: None,
        },
        Err(e) => ServiceStatus {
            status: "error".to_string(),
            details: Some(e.to_string()),
        },
    }
}
