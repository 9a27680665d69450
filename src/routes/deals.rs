use actix_web::{HttpResponse, http::Method, web};

use crate::db::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateDealRequest, DealResponse, NewDealResponse, UpdateDealStatusRequest};
use crate::routes::{method_not_allowed, preflight};
use crate::services::deal_service::DealService;

/// GET /api/deals - Liste des ventes, plus récentes en premier
pub async fn list_deals(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let db = state.db()?;

    let rows = DealService::list(db).await?;
    let deals: Vec<DealResponse> = rows
        .into_iter()
        .map(|(deal, creator)| DealResponse::from_model(deal, creator))
        .collect();

    Ok(HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .json(serde_json::json!({ "deals": deals })))
}

/// POST /api/deals - Créer une vente (statut "pending")
pub async fn create_deal(
    state: web::Data<AppState>,
    auth_user: AuthUser,
    body: Option<web::Json<CreateDealRequest>>,
) -> Result<HttpResponse, ApiError> {
    let db = state.db()?;

    // Corps absent ou illisible = requête vide : la validation de présence
    // répond alors en JSON, jamais l'erreur texte de l'extracteur
    let request = body.map(web::Json::into_inner).unwrap_or_default();
    let new_deal = request.into_validated()?;
    let deal = DealService::create(db, auth_user.user_id, new_deal).await?;

    Ok(HttpResponse::Created()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .json(serde_json::json!({ "deal": NewDealResponse::from(deal) })))
}

/// PUT /api/deals - Changer le statut d'une vente
pub async fn update_deal_status(
    state: web::Data<AppState>,
    body: Option<web::Json<UpdateDealStatusRequest>>,
) -> Result<HttpResponse, ApiError> {
    let db = state.db()?;

    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let id = body.id.ok_or_else(|| ApiError::Validation("Deal ID required".into()))?;
    let status = body.status.ok_or_else(|| ApiError::Validation("Status required".into()))?;

    let deal = DealService::update_status(db, id, status).await?;

    Ok(HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .json(serde_json::json!({ "id": deal.id, "status": deal.status })))
}

async fn options_deals() -> HttpResponse {
    preflight("GET, POST, PUT, OPTIONS")
}

pub fn deals_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/deals")
            .route(web::get().to(list_deals))
            .route(web::post().to(create_deal))
            .route(web::put().to(update_deal_status))
            .route(web::method(Method::OPTIONS).to(options_deals))
            .default_service(web::route().to(method_not_allowed)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    fn unconfigured_state() -> web::Data<AppState> {
        web::Data::new(AppState { db: None })
    }

    fn mock_state() -> web::Data<AppState> {
        let db = sea_orm::MockDatabase::new(sea_orm::DatabaseBackend::Postgres).into_connection();
        web::Data::new(AppState { db: Some(db) })
    }

    #[actix_web::test]
    async fn test_options_returns_cors_preflight() {
        let app = test::init_service(
            App::new().app_data(unconfigured_state()).configure(deals_routes),
        )
        .await;

        let req = test::TestRequest::with_uri("/deals")
            .method(Method::OPTIONS)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let headers = resp.headers();
        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(headers.get("Access-Control-Allow-Methods").unwrap(), "GET, POST, PUT, OPTIONS");
        assert_eq!(headers.get("Access-Control-Allow-Headers").unwrap(), "Content-Type");
        assert_eq!(headers.get("Access-Control-Max-Age").unwrap(), "86400");

        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_unsupported_method_is_405() {
        let app = test::init_service(
            App::new().app_data(unconfigured_state()).configure(deals_routes),
        )
        .await;

        let req = test::TestRequest::delete().uri("/deals").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Method not allowed");
    }

    #[actix_web::test]
    async fn test_post_without_body_is_missing_required_fields() {
        // Corps absent = objet vide : la réponse vient de la validation de
        // présence, en JSON, pas de l'erreur texte de l'extracteur
        let app = test::init_service(
            App::new().app_data(mock_state()).configure(deals_routes),
        )
        .await;

        let req = test::TestRequest::post().uri("/deals").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing required fields");
    }

    #[actix_web::test]
    async fn test_post_with_malformed_json_is_missing_required_fields() {
        let app = test::init_service(
            App::new().app_data(mock_state()).configure(deals_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/deals")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing required fields");
    }

    #[actix_web::test]
    async fn test_put_without_body_requires_deal_id() {
        let app = test::init_service(
            App::new().app_data(mock_state()).configure(deals_routes),
        )
        .await;

        let req = test::TestRequest::put().uri("/deals").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Deal ID required");
    }

    #[actix_web::test]
    async fn test_get_without_database_is_500() {
        let app = test::init_service(
            App::new().app_data(unconfigured_state()).configure(deals_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/deals").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Database not configured");
    }
}
