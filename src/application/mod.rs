// Application layer - Use cases and ports
pub mod catalog_service;
pub mod dashboard_service;
pub mod query_builder;
pub mod render_target;
pub mod series_builder;
pub mod table_formatter;
pub mod telemetry_repository;
