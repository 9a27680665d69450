use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trading_deals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub trader_name: Option<String>,
    // Token canonique d'une Platform ("PL", "Bliss")
    pub platform: String,
    pub trade_date: Option<Date>,
    pub buy_rub: Option<Decimal>,
    pub buy_usd: Option<Decimal>,
    pub buy_rate: Option<Decimal>,
    pub buy_deal_id: Option<String>,
    pub sell_rub: Option<Decimal>,
    pub sell_usdt: Option<Decimal>,
    pub sell_rate: Option<Decimal>,
    pub sell_order_number: Option<String>,
    pub profit_usd: Option<Decimal>,
    pub trader_profit: Option<Decimal>,
    pub is_finalized: bool,
    pub created_by: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
