// DTO des trois endpoints + conversions Decimal -> JSON

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{deal, trading_deal, users};

// Fonction helper pour convertir Decimal en f64 à la frontière JSON
pub fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_f64().unwrap_or(0.0)
}

fn opt_decimal_to_f64(field: Option<Decimal>) -> Option<f64> {
    field.map(decimal_to_f64)
}

// ---------------------------------------------------------------------------
// Deals
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CreateDealRequest {
    pub client_name: Option<String>,
    pub amount: Option<Decimal>,
    pub profit: Option<Decimal>,
    pub deal_date: Option<NaiveDate>,
}

/// Requête de création validée : tous les champs requis sont présents.
/// La validation est une vérification de présence (champ absent ou null),
/// pas de troncature "falsy" — un montant de 0 explicite passe.
#[derive(Debug, PartialEq)]
pub struct NewDeal {
    pub client_name: String,
    pub amount: Decimal,
    pub profit: Decimal,
    pub deal_date: NaiveDate,
}

impl CreateDealRequest {
    pub fn into_validated(self) -> Result<NewDeal, ApiError> {
        match (self.client_name, self.amount, self.profit, self.deal_date) {
            (Some(client_name), Some(amount), Some(profit), Some(deal_date))
                if !client_name.trim().is_empty() =>
            {
                Ok(NewDeal { client_name, amount, profit, deal_date })
            }
            _ => Err(ApiError::Validation("Missing required fields".into())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDealStatusRequest {
    pub id: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DealResponse {
    pub id: i32,
    pub client: String,
    pub amount: f64,
    pub profit: f64,
    pub status: String,
    pub date: String,
    pub created_at: String,
    pub created_by: Option<String>,
}

impl DealResponse {
    pub fn from_model(deal: deal::Model, creator: Option<users::Model>) -> Self {
        DealResponse {
            id: deal.id,
            client: deal.client_name,
            amount: decimal_to_f64(deal.amount),
            profit: decimal_to_f64(deal.profit),
            status: deal.status,
            date: deal.deal_date.format("%d.%m.%Y").to_string(),
            created_at: deal.created_at.to_rfc3339(),
            created_by: creator.and_then(|u| u.full_name),
        }
    }
}

/// Variante renvoyée par le POST : pas de created_at ni de created_by.
#[derive(Debug, Serialize)]
pub struct NewDealResponse {
    pub id: i32,
    pub client: String,
    pub amount: f64,
    pub profit: f64,
    pub status: String,
    pub date: String,
}

impl From<deal::Model> for NewDealResponse {
    fn from(deal: deal::Model) -> Self {
        NewDealResponse {
            id: deal.id,
            client: deal.client_name,
            amount: decimal_to_f64(deal.amount),
            profit: decimal_to_f64(deal.profit),
            status: deal.status,
            date: deal.deal_date.format("%d.%m.%Y").to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Trading deals
// ---------------------------------------------------------------------------

/// Champs bruts d'une opération de trading, tous optionnels.
/// Les champs dérivés (buy_usd/buy_rate selon la plateforme, sell_rub,
/// sell_usdt, profit_usd, trader_profit) ne sont jamais lus depuis la
/// requête : ils sortent de services::formula.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TradingDealPayload {
    pub trader_name: Option<String>,
    pub platform: Option<String>,
    pub trade_date: Option<NaiveDate>,
    pub buy_rub: Option<Decimal>,
    pub buy_usd: Option<Decimal>,
    pub buy_rate: Option<Decimal>,
    pub buy_deal_id: Option<String>,
    pub sell_rate: Option<Decimal>,
    pub sell_order_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTradingDealRequest {
    pub id: Option<i32>,
    #[serde(flatten)]
    pub fields: TradingDealPayload,
}

#[derive(Debug, Serialize)]
pub struct TradingDealResponse {
    pub id: i32,
    pub trader_name: Option<String>,
    pub platform: String,
    pub trade_date: Option<String>,
    pub buy_rub: Option<f64>,
    pub buy_usd: Option<f64>,
    pub buy_rate: Option<f64>,
    pub buy_deal_id: Option<String>,
    pub sell_rub: Option<f64>,
    pub sell_usdt: Option<f64>,
    pub sell_rate: Option<f64>,
    pub sell_order_number: Option<String>,
    pub profit_usd: Option<f64>,
    pub trader_profit: Option<f64>,
    pub is_finalized: bool,
}

impl From<trading_deal::Model> for TradingDealResponse {
    fn from(deal: trading_deal::Model) -> Self {
        TradingDealResponse {
            id: deal.id,
            trader_name: deal.trader_name,
            platform: deal.platform,
            trade_date: deal.trade_date.map(|d| d.format("%Y-%m-%d").to_string()),
            buy_rub: opt_decimal_to_f64(deal.buy_rub),
            buy_usd: opt_decimal_to_f64(deal.buy_usd),
            buy_rate: opt_decimal_to_f64(deal.buy_rate),
            buy_deal_id: deal.buy_deal_id,
            sell_rub: opt_decimal_to_f64(deal.sell_rub),
            sell_usdt: opt_decimal_to_f64(deal.sell_usdt),
            sell_rate: opt_decimal_to_f64(deal.sell_rate),
            sell_order_number: deal.sell_order_number,
            profit_usd: opt_decimal_to_f64(deal.profit_usd),
            trader_profit: opt_decimal_to_f64(deal.trader_profit),
            is_finalized: deal.is_finalized,
        }
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct MonthPoint {
    pub month: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub profit_margin: f64,
    pub active_deals: i64,
    pub total_deals: i64,
    pub sales_data: Vec<MonthPoint>,
    pub profit_data: Vec<MonthPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateDealRequest {
        CreateDealRequest {
            client_name: Some("Acme".to_string()),
            amount: Some(Decimal::from(1000)),
            profit: Some(Decimal::from(200)),
            deal_date: NaiveDate::from_ymd_opt(2024, 5, 1),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let deal = full_request().into_validated().unwrap();
        assert_eq!(deal.client_name, "Acme");
        assert_eq!(deal.amount, Decimal::from(1000));
        assert_eq!(deal.deal_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_missing_amount_is_rejected() {
        let mut req = full_request();
        req.amount = None;
        let err = req.into_validated().unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields");
    }

    #[test]
    fn test_blank_client_name_is_rejected() {
        let mut req = full_request();
        req.client_name = Some("   ".to_string());
        assert!(req.into_validated().is_err());
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        // Présence, pas "truthiness" : un montant nul explicite est valide
        let mut req = full_request();
        req.amount = Some(Decimal::ZERO);
        assert!(req.into_validated().is_ok());
    }

    #[test]
    fn test_deal_response_formats_date_and_creator() {
        let deal = deal::Model {
            id: 7,
            client_name: "Acme".to_string(),
            amount: Decimal::from(1000),
            profit: Decimal::from(200),
            status: "pending".to_string(),
            deal_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            created_by: Some(1),
            created_at: chrono::DateTime::parse_from_rfc3339("2024-05-01T10:00:00+00:00").unwrap(),
            updated_at: None,
        };
        let creator = users::Model {
            id: 1,
            username: Some("admin".to_string()),
            full_name: Some("Ivan Petrov".to_string()),
        };

        let response = DealResponse::from_model(deal, Some(creator));
        assert_eq!(response.date, "01.05.2024");
        assert_eq!(response.created_by.as_deref(), Some("Ivan Petrov"));
        assert_eq!(response.amount, 1000.0);
    }

    #[test]
    fn test_deal_response_tolerates_missing_creator() {
        let deal = deal::Model {
            id: 8,
            client_name: "Globex".to_string(),
            amount: Decimal::from(500),
            profit: Decimal::from(-50),
            status: "active".to_string(),
            deal_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            created_by: None,
            created_at: chrono::DateTime::parse_from_rfc3339("2024-06-15T08:30:00+00:00").unwrap(),
            updated_at: None,
        };

        let response = DealResponse::from_model(deal, None);
        assert_eq!(response.created_by, None);
        assert_eq!(response.profit, -50.0);
    }
}
