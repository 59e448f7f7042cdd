// GraphQL repository implementation
use crate::application::query_builder::GraphQlRequest;
use crate::application::telemetry_repository::{RepositoryError, TelemetryRepository};
use crate::domain::reading::{AggregatedReading, LocationInfo, Reading, SensorInfo};
use crate::infrastructure::schema::{WireAggregatedReading, WireLocation, WireReading, WireSensor};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GraphQlRepository {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl GraphQlRepository {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    async fn execute<W, T>(&self, request: &GraphQlRequest) -> Result<Vec<T>, RepositoryError>
    where
        W: DeserializeOwned,
        T: From<W>,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Status { status, body });
        }

        let payload = response.json::<GraphQlResponse>().await?;
        let records = extract_root(payload, &request.root_field)?;

        let wire: Vec<W> =
            serde_json::from_value(records).map_err(|source| RepositoryError::Decode {
                field: request.root_field.clone(),
                source,
            })?;
        Ok(wire.into_iter().map(T::from).collect())
    }
}

/// Pulls the root field out of `data`. GraphQL errors only fail the call when
/// there is no data to use.
fn extract_root(payload: GraphQlResponse, root_field: &str) -> Result<serde_json::Value, RepositoryError> {
    let messages = payload
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.message)
        .collect::<Vec<_>>();

    let value = payload
        .data
        .and_then(|mut data| data.remove(root_field))
        .filter(|v| !v.is_null());

    match value {
        Some(value) => {
            if !messages.is_empty() {
                tracing::warn!(root_field, errors = ?messages, "GraphQL response carried errors");
            }
            Ok(value)
        }
        None if !messages.is_empty() => Err(RepositoryError::Query(messages.join("; "))),
        None => Err(RepositoryError::MissingField(root_field.to_string())),
    }
}

#[async_trait]
impl TelemetryRepository for GraphQlRepository {
    async fn locations(&self, request: &GraphQlRequest) -> Result<Vec<LocationInfo>, RepositoryError> {
        self.execute::<WireLocation, _>(request).await
    }

    async fn sensors(&self, request: &GraphQlRequest) -> Result<Vec<SensorInfo>, RepositoryError> {
        self.execute::<WireSensor, _>(request).await
    }

    async fn sensor_readings(&self, request: &GraphQlRequest) -> Result<Vec<Reading>, RepositoryError> {
        tracing::debug!(root_field = %request.root_field, "Fetching sensor readings");
        self.execute::<WireReading, _>(request).await
    }

    async fn aggregated_readings(
        &self,
        request: &GraphQlRequest,
    ) -> Result<Vec<AggregatedReading>, RepositoryError> {
        tracing::debug!(root_field = %request.root_field, "Fetching aggregated readings");
        self.execute::<WireAggregatedReading, _>(request).await
    }
}
