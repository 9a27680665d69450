// Moteur de formules des opérations de trading.
//
// Pure fonction des quatre entrées brutes + plateforme : aucune BD, aucun
// état. Utilisée à l'identique par la création et la mise à jour.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Commission du trader sur le profit (0.25 %).
const TRADER_COMMISSION: Decimal = Decimal::from_parts(25, 0, 0, false, 4);

/// Plateforme d'achat. Énumération fermée : un token inconnu est une erreur
/// de validation, pas un passage silencieux avec des champs null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Pl,
    Bliss,
}

impl FromStr for Platform {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PL" => Ok(Platform::Pl),
            "Bliss" => Ok(Platform::Bliss),
            other => Err(ApiError::Validation(format!("Unsupported platform: {other}"))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Pl => write!(f, "PL"),
            Platform::Bliss => write!(f, "Bliss"),
        }
    }
}

/// Les cinq champs dérivés. `None` = l'entrée nécessaire manquait (nulle ou
/// à zéro) ; seul sell_rub est inconditionnel.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFields {
    pub buy_usd: Option<Decimal>,
    pub buy_rate: Option<Decimal>,
    pub sell_rub: Decimal,
    pub sell_usdt: Option<Decimal>,
    pub profit_usd: Option<Decimal>,
    pub trader_profit: Option<Decimal>,
}

fn nonzero(value: Decimal) -> Option<Decimal> {
    if value.is_zero() { None } else { Some(value) }
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Calcule les champs dérivés à partir des entrées brutes.
///
/// - PL : buy_usd = buy_rub / buy_rate, buy_rate passe tel quel
/// - Bliss : buy_usd passe tel quel, buy_rate = buy_rub / buy_usd
/// - sell_rub = buy_rub, toujours
/// - sell_usdt = buy_rub / sell_rate
/// - profit_usd = sell_usdt - buy_usd quand les deux sont non nuls,
///   trader_profit = profit_usd * 0.0025
pub fn derive(
    platform: Platform,
    buy_rub: Decimal,
    buy_usd: Decimal,
    buy_rate: Decimal,
    sell_rate: Decimal,
) -> DerivedFields {
    let (buy_usd, buy_rate) = match platform {
        Platform::Pl => (ratio(buy_rub, buy_rate), nonzero(buy_rate)),
        Platform::Bliss => (nonzero(buy_usd), ratio(buy_rub, buy_usd)),
    };

    let sell_usdt = ratio(buy_rub, sell_rate);

    // Un dérivé valant exactement 0 compte comme absent ici : on ne produit
    // pas de profit à partir d'une jambe nulle
    let profit_usd = match (buy_usd, sell_usdt) {
        (Some(buy), Some(sell)) if !buy.is_zero() && !sell.is_zero() => Some(sell - buy),
        _ => None,
    };

    let trader_profit = profit_usd.map(|p| p * TRADER_COMMISSION);

    DerivedFields {
        buy_usd,
        buy_rate,
        sell_rub: buy_rub,
        sell_usdt,
        profit_usd,
        trader_profit,
    }
}
