// Agrégats du tableau de bord.
//
// Les requêtes de regroupement passent par des Statements SQL : SeaORM ne
// couvre pas date_trunc/FILTER proprement avec son query builder. Le
// regroupement mensuel se fait sur le couple année-mois (date_trunc), le
// libellé court ("Jan") n'est qu'un affichage calculé côté Rust — deux mois
// homonymes d'années différentes restent deux points distincts.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};

use crate::error::ApiError;
use crate::models::dto::{MonthPoint, StatsResponse, decimal_to_f64};

#[derive(Debug, FromQueryResult)]
pub struct Summary {
    pub total_deals: i64,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub active_deals: i64,
}

#[derive(Debug, FromQueryResult)]
struct MonthRow {
    bucket: NaiveDate,
    value: Decimal,
}

pub struct StatsService;

impl StatsService {
    /// Totaux globaux sur la table deals. Toujours une ligne, même vide
    /// (les sommes retombent sur 0).
    pub async fn summary(db: &DatabaseConnection) -> Result<Summary, ApiError> {
        let row = Summary::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            r#"
            SELECT COUNT(*) AS total_deals,
                   COALESCE(SUM(amount), 0) AS total_revenue,
                   COALESCE(SUM(profit), 0) AS total_profit,
                   COUNT(*) FILTER (WHERE status = 'active') AS active_deals
            FROM deals
            "#,
        ))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::Db(DbErr::RecordNotFound("deals summary".to_string())))?;

        Ok(row)
    }

    /// Chiffre d'affaires par mois sur les 3 derniers mois glissants.
    pub async fn monthly_revenue(db: &DatabaseConnection) -> Result<Vec<MonthPoint>, ApiError> {
        let rows = MonthRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            r#"
            SELECT date_trunc('month', deal_date)::date AS bucket,
                   COALESCE(SUM(amount), 0) AS value
            FROM deals
            WHERE deal_date >= CURRENT_DATE - INTERVAL '3 months'
            GROUP BY bucket
            ORDER BY bucket
            "#,
        ))
        .all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| MonthPoint {
                month: month_label(row.bucket),
                value: decimal_to_f64(row.value),
            })
            .collect())
    }

    /// Marge (profit/CA en %) par mois, même fenêtre, arrondie à une
    /// décimale ; 0 quand le CA du mois est nul.
    pub async fn monthly_margin(db: &DatabaseConnection) -> Result<Vec<MonthPoint>, ApiError> {
        let rows = MonthRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            r#"
            SELECT date_trunc('month', deal_date)::date AS bucket,
                   CASE WHEN SUM(amount) > 0
                        THEN SUM(profit) / SUM(amount) * 100
                        ELSE 0
                   END AS value
            FROM deals
            WHERE deal_date >= CURRENT_DATE - INTERVAL '3 months'
            GROUP BY bucket
            ORDER BY bucket
            "#,
        ))
        .all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| MonthPoint {
                month: month_label(row.bucket),
                value: decimal_to_f64(row.value.round_dp(1)),
            })
            .collect())
    }

    /// Assemble la réponse complète du tableau de bord.
    pub async fn dashboard(db: &DatabaseConnection) -> Result<StatsResponse, ApiError> {
        let summary = Self::summary(db).await?;
        let sales_data = Self::monthly_revenue(db).await?;
        let profit_data = Self::monthly_margin(db).await?;

        Ok(StatsResponse {
            total_revenue: decimal_to_f64(summary.total_revenue),
            total_profit: decimal_to_f64(summary.total_profit),
            profit_margin: decimal_to_f64(profit_margin(summary.total_profit, summary.total_revenue)),
            active_deals: summary.active_deals,
            total_deals: summary.total_deals,
            sales_data,
            profit_data,
        })
    }
}

/// Marge globale en %, une décimale, 0 quand le CA est nul (pas de division
/// par zéro, quel que soit le profit).
pub fn profit_margin(total_profit: Decimal, total_revenue: Decimal) -> Decimal {
    if total_revenue > Decimal::ZERO {
        (total_profit / total_revenue * Decimal::from(100)).round_dp(1)
    } else {
        Decimal::ZERO
    }
}

/// Libellé calendaire court d'un bucket mensuel.
fn month_label(bucket: NaiveDate) -> String {
    const LABELS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun",
        "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    LABELS[bucket.month0() as usize].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_profit_margin_rounds_to_one_decimal() {
        assert_eq!(profit_margin(dec("200"), dec("1000")), dec("20.0"));
        assert_eq!(profit_margin(dec("58.48"), dec("1000")), dec("5.8"));
        assert_eq!(profit_margin(dec("-50"), dec("500")), dec("-10.0"));
    }

    #[test]
    fn test_profit_margin_guards_zero_revenue() {
        assert_eq!(profit_margin(dec("200"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(profit_margin(dec("-200"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_label(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), "Jan");
        assert_eq!(month_label(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()), "Dec");
        // Même mois, années différentes : même libellé, buckets distincts
        assert_eq!(month_label(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()), "Jan");
    }
}
