// Repository trait for telemetry data access
use crate::application::query_builder::GraphQlRequest;
use crate::domain::reading::{AggregatedReading, LocationInfo, Reading, SensorInfo};
use async_trait::async_trait;

/// Any failure to get a usable answer from the GraphQL endpoint.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("request to GraphQL endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GraphQL endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL query error: {0}")]
    Query(String),

    #[error("response has no `{0}` field")]
    MissingField(String),

    #[error("failed to decode `{field}`: {source}")]
    Decode {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// Locations with their sensor counts
    async fn locations(&self, request: &GraphQlRequest) -> Result<Vec<LocationInfo>, RepositoryError>;

    /// Every known sensor
    async fn sensors(&self, request: &GraphQlRequest) -> Result<Vec<SensorInfo>, RepositoryError>;

    /// Raw readings matching a request built by the query builder
    async fn sensor_readings(&self, request: &GraphQlRequest) -> Result<Vec<Reading>, RepositoryError>;

    /// Aggregated readings matching a request built by the query builder
    async fn aggregated_readings(
        &self,
        request: &GraphQlRequest,
    ) -> Result<Vec<AggregatedReading>, RepositoryError>;
}
