use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::*;

use crate::error::ApiError;
use crate::models::dto::TradingDealPayload;
use crate::models::trading_deal;
use crate::services::formula::{self, Platform};

pub struct TradingDealService;

impl TradingDealService {
    /// Liste toutes les opérations, date puis id décroissants.
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<trading_deal::Model>, ApiError> {
        let deals = trading_deal::Entity::find()
            .order_by_desc(trading_deal::Column::TradeDate)
            .order_by_desc(trading_deal::Column::Id)
            .all(db)
            .await?;

        Ok(deals)
    }

    /// Crée une opération : les entrées numériques absentes valent zéro pour
    /// le moteur de formules, mais restent null en base. Les champs dérivés
    /// sortent exclusivement du moteur.
    pub async fn create(
        db: &DatabaseConnection,
        created_by: i32,
        payload: TradingDealPayload,
    ) -> Result<trading_deal::Model, ApiError> {
        Ok(Self::new_deal_model(created_by, payload)?.insert(db).await?)
    }

    fn new_deal_model(
        created_by: i32,
        payload: TradingDealPayload,
    ) -> Result<trading_deal::ActiveModel, ApiError> {
        let platform: Platform = payload.platform.as_deref().unwrap_or("PL").parse()?;

        let calculated = formula::derive(
            platform,
            payload.buy_rub.unwrap_or(Decimal::ZERO),
            payload.buy_usd.unwrap_or(Decimal::ZERO),
            payload.buy_rate.unwrap_or(Decimal::ZERO),
            payload.sell_rate.unwrap_or(Decimal::ZERO),
        );

        let deal = trading_deal::ActiveModel {
            trader_name: Set(payload.trader_name),
            platform: Set(platform.to_string()),
            trade_date: Set(payload.trade_date),
            buy_rub: Set(payload.buy_rub),
            buy_usd: Set(calculated.buy_usd),
            buy_rate: Set(calculated.buy_rate),
            buy_deal_id: Set(payload.buy_deal_id),
            sell_rub: Set(Some(calculated.sell_rub)),
            sell_usdt: Set(calculated.sell_usdt),
            sell_rate: Set(payload.sell_rate),
            sell_order_number: Set(payload.sell_order_number),
            profit_usd: Set(calculated.profit_usd),
            trader_profit: Set(calculated.trader_profit),
            is_finalized: Set(false),
            created_by: Set(Some(created_by)),
            ..Default::default()
        };

        Ok(deal)
    }

    /// Met à jour une opération existante. Les champs fournis recouvrent
    /// l'enregistrement stocké, puis le moteur recalcule les dérivés sur le
    /// résultat fusionné : une mise à jour partielle ne remet jamais à zéro
    /// les entrées non touchées.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        payload: TradingDealPayload,
    ) -> Result<trading_deal::Model, ApiError> {
        let existing = trading_deal::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Trading deal {id} not found")))?;

        let platform: Platform = payload
            .platform
            .as_deref()
            .unwrap_or(&existing.platform)
            .parse()?;

        let (buy_rub, buy_usd, buy_rate, sell_rate) = Self::merged_inputs(&existing, &payload);

        let calculated = formula::derive(
            platform,
            buy_rub.unwrap_or(Decimal::ZERO),
            buy_usd.unwrap_or(Decimal::ZERO),
            buy_rate.unwrap_or(Decimal::ZERO),
            sell_rate.unwrap_or(Decimal::ZERO),
        );

        let trader_name = payload.trader_name.or(existing.trader_name.clone());
        let trade_date = payload.trade_date.or(existing.trade_date);
        let buy_deal_id = payload.buy_deal_id.or(existing.buy_deal_id.clone());
        let sell_order_number = payload.sell_order_number.or(existing.sell_order_number.clone());

        let mut deal: trading_deal::ActiveModel = existing.into();
        deal.trader_name = Set(trader_name);
        deal.platform = Set(platform.to_string());
        deal.trade_date = Set(trade_date);
        deal.buy_rub = Set(buy_rub);
        deal.buy_usd = Set(calculated.buy_usd);
        deal.buy_rate = Set(calculated.buy_rate);
        deal.buy_deal_id = Set(buy_deal_id);
        deal.sell_rub = Set(Some(calculated.sell_rub));
        deal.sell_usdt = Set(calculated.sell_usdt);
        deal.sell_rate = Set(sell_rate);
        deal.sell_order_number = Set(sell_order_number);
        deal.profit_usd = Set(calculated.profit_usd);
        deal.trader_profit = Set(calculated.trader_profit);
        deal.updated_at = Set(Some(Utc::now().into()));

        Ok(deal.update(db).await?)
    }

    /// Fusionne les entrées brutes : valeur de la requête si fournie, sinon
    /// valeur stockée. Pour PL le buy_usd stocké est lui-même un dérivé,
    /// mais la formule PL ne le lit pas (et symétriquement pour le buy_rate
    /// de Bliss), donc la fusion reste cohérente.
    fn merged_inputs(
        existing: &trading_deal::Model,
        payload: &TradingDealPayload,
    ) -> (Option<Decimal>, Option<Decimal>, Option<Decimal>, Option<Decimal>) {
        (
            payload.buy_rub.or(existing.buy_rub),
            payload.buy_usd.or(existing.buy_usd),
            payload.buy_rate.or(existing.buy_rate),
            payload.sell_rate.or(existing.sell_rate),
        )
    }
}
