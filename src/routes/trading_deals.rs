use actix_web::{HttpResponse, http::Method, web};

use crate::db::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{TradingDealPayload, TradingDealResponse, UpdateTradingDealRequest};
use crate::routes::{method_not_allowed, preflight};
use crate::services::trading_service::TradingDealService;

/// GET /api/trading-deals - Liste des opérations, date puis id décroissants
pub async fn list_trading_deals(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let db = state.db()?;

    let deals: Vec<TradingDealResponse> = TradingDealService::list(db)
        .await?
        .into_iter()
        .map(TradingDealResponse::from)
        .collect();

    Ok(HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .json(serde_json::json!({ "deals": deals })))
}

/// POST /api/trading-deals - Créer une opération, champs dérivés recalculés
pub async fn create_trading_deal(
    state: web::Data<AppState>,
    auth_user: AuthUser,
    body: Option<web::Json<TradingDealPayload>>,
) -> Result<HttpResponse, ApiError> {
    let db = state.db()?;

    // Tous les champs sont optionnels : un corps absent vaut un objet vide
    let payload = body.map(web::Json::into_inner).unwrap_or_default();
    let deal = TradingDealService::create(db, auth_user.user_id, payload).await?;

    Ok(HttpResponse::Created()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .json(serde_json::json!({ "deal": TradingDealResponse::from(deal) })))
}

/// PUT /api/trading-deals - Mise à jour fusionnée + recalcul des dérivés
pub async fn update_trading_deal(
    state: web::Data<AppState>,
    body: Option<web::Json<UpdateTradingDealRequest>>,
) -> Result<HttpResponse, ApiError> {
    let db = state.db()?;

    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let id = body.id.ok_or_else(|| ApiError::Validation("Deal ID required".into()))?;

    TradingDealService::update(db, id, body.fields).await?;

    Ok(HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .json(serde_json::json!({ "success": true })))
}

async fn options_trading_deals() -> HttpResponse {
    // DELETE reste annoncé pour compatibilité avec le front existant,
    // même si la méthode répond 405
    preflight("GET, POST, PUT, DELETE, OPTIONS")
}

pub fn trading_deals_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/trading-deals")
            .route(web::get().to(list_trading_deals))
            .route(web::post().to(create_trading_deal))
            .route(web::put().to(update_trading_deal))
            .route(web::method(Method::OPTIONS).to(options_trading_deals))
            .default_service(web::route().to(method_not_allowed)),
    );
}
