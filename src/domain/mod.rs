// Domain layer - Plain data types
pub mod catalog;
pub mod dashboard;
pub mod filter;
pub mod reading;
pub mod table;
pub mod telemetry;
