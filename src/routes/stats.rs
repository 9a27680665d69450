use actix_web::{HttpResponse, http::Method, web};

use crate::db::AppState;
use crate::error::ApiError;
use crate::routes::{method_not_allowed, preflight};
use crate::services::stats_service::StatsService;

/// GET /api/stats - Totaux + séries mensuelles du tableau de bord
pub async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let db = state.db()?;

    let stats = StatsService::dashboard(db).await?;

    Ok(HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .json(stats))
}

async fn options_stats() -> HttpResponse {
    preflight("GET, OPTIONS")
}

pub fn stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/stats")
            .route(web::get().to(get_stats))
            .route(web::method(Method::OPTIONS).to(options_stats))
            .default_service(web::route().to(method_not_allowed)),
    );
}
