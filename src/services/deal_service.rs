use chrono::Utc;
use sea_orm::*;

use crate::error::ApiError;
use crate::models::dto::NewDeal;
use crate::models::{deal, users};

pub struct DealService;

impl DealService {
    /// Liste toutes les ventes, plus récentes en premier, avec le nom du
    /// créateur (LEFT JOIN : un created_by orphelin donne un nom null).
    pub async fn list(
        db: &DatabaseConnection,
    ) -> Result<Vec<(deal::Model, Option<users::Model>)>, ApiError> {
        let deals = deal::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(deal::Column::DealDate)
            .all(db)
            .await?;

        Ok(deals)
    }

    /// Crée une vente au statut "pending", attribuée à l'utilisateur agissant.
    /// id et created_at sont assignés par la BD.
    pub async fn create(
        db: &DatabaseConnection,
        created_by: i32,
        new_deal: NewDeal,
    ) -> Result<deal::Model, ApiError> {
        Ok(Self::new_deal_model(created_by, new_deal).insert(db).await?)
    }

    fn new_deal_model(created_by: i32, new_deal: NewDeal) -> deal::ActiveModel {
        deal::ActiveModel {
            client_name: Set(new_deal.client_name),
            amount: Set(new_deal.amount),
            profit: Set(new_deal.profit),
            status: Set("pending".to_string()),
            deal_date: Set(new_deal.deal_date),
            created_by: Set(Some(created_by)),
            ..Default::default()
        }
    }

    /// Change le statut d'une vente. Le statut est libre (aucune machine à
    /// états) ; une vente inconnue donne un 404 explicite au lieu d'un
    /// UPDATE silencieux sur zéro ligne.
    pub async fn update_status(
        db: &DatabaseConnection,
        id: i32,
        status: String,
    ) -> Result<deal::Model, ApiError> {
        let existing = deal::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Deal {id} not found")))?;

        let mut deal: deal::ActiveModel = existing.into();
        deal.status = Set(status);
        deal.updated_at = Set(Some(Utc::now().into()));

        Ok(deal.update(db).await?)
    }
}
