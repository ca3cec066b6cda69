pub mod comparison_chart;
pub mod kpi_card;
pub mod toast;
