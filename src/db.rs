// connexion BD

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

use crate::error::ApiError;

/// État partagé entre les handlers.
/// `db` reste `None` quand DATABASE_URL est absente : les endpoints
/// répondent alors 500 "Database not configured" sans tenter de requête.
pub struct AppState {
    pub db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn db(&self) -> Result<&DatabaseConnection, ApiError> {
        self.db.as_ref().ok_or(ApiError::DatabaseNotConfigured)
    }
}

pub async fn establish_connection() -> Result<Option<DatabaseConnection>, DbErr> {
    match env::var("DATABASE_URL") {
        Ok(url) => Database::connect(&url).await.map(Some),
        Err(_) => Ok(None),
    }
}
