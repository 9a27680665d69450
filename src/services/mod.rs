pub mod deal_service;
pub mod formula;
pub mod stats_service;
pub mod trading_service;
