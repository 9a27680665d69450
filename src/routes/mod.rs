pub mod deals;
pub mod health;
pub mod stats;
pub mod trading_deals;

use actix_web::{HttpResponse, web};

use crate::error::ApiError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .configure(deals::deals_routes)
            .configure(trading_deals::trading_deals_routes)
            .configure(stats::stats_routes),
    );
}

/// Réponse de preflight CORS commune : 200, corps vide, méthodes autorisées
/// propres à chaque endpoint.
pub fn preflight(allow_methods: &str) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", allow_methods.to_string()))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .insert_header(("Access-Control-Max-Age", "86400"))
        .finish()
}

/// Route par défaut d'une ressource : toute méthode non câblée donne un 405
/// JSON au lieu du 405 vide d'actix.
pub async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}
