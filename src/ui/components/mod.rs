pub mod kpi_card;
pub mod profit_indicator;
pub mod saved_calculations;
pub mod toast;
