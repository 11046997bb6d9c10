pub mod analytics_service;
pub mod change_service;
pub mod chart_service;
pub mod curve_service;
pub mod stats_service;
