// Catalog service - Use case for the location and sensor pickers
use crate::application::query_builder::QueryBuilder;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::catalog::{SelectOption, SensorCatalog};
use crate::domain::reading::SensorInfo;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn TelemetryRepository>,
    queries: QueryBuilder,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, queries: QueryBuilder) -> Self {
        Self {
            repository,
            queries,
        }
    }

    /// Location dropdown entries. Empty when the backend cannot be reached.
    pub async fn location_options(&self) -> Vec<SelectOption> {
        match self.repository.locations(&self.queries.locations()).await {
            Ok(locations) => locations.iter().map(SelectOption::for_location).collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load locations");
                Vec::new()
            }
        }
    }

    pub async fn sensor_catalog(&self) -> SensorCatalog {
        match self.repository.sensors(&self.queries.sensors()).await {
            Ok(sensors) => SensorCatalog::from_sensors(sensors),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load sensors");
                SensorCatalog::default()
            }
        }
    }

    pub async fn find_sensor(&self, sensor_id: &str) -> Option<SensorInfo> {
        self.sensor_catalog().await.find(sensor_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::query_builder::GraphQlRequest;
    use crate::application::telemetry_repository::RepositoryError;
    use crate::domain::reading::{AggregatedReading, LocationInfo, Reading};
    use async_trait::async_trait;

    struct StaticRepository {
        available: bool,
    }

    impl StaticRepository {
        fn check(&self) -> Result<(), RepositoryError> {
            if self.available {
                Ok(())
            } else {
                Err(RepositoryError::Query("backend down".to_string()))
            }
        }
    }

    #[async_trait]
    impl TelemetryRepository for StaticRepository {
        async fn locations(&self, request: &GraphQlRequest) -> Result<Vec<LocationInfo>, RepositoryError> {
            self.check()?;
            assert_eq!(request.root_field, "locations");
            Ok(vec![
                LocationInfo { name: "lab".to_string(), sensor_count: 3 },
                LocationInfo { name: "roof".to_string(), sensor_count: 1 },
            ])
        }

        async fn sensors(&self, request: &GraphQlRequest) -> Result<Vec<SensorInfo>, RepositoryError> {
            self.check()?;
            assert_eq!(request.root_field, "sensors");
            Ok(vec![SensorInfo {
                sensor_id: "t-1".to_string(),
                sensor_type: "temperature".to_string(),
                location: "roof".to_string(),
            }])
        }

        async fn sensor_readings(&self, _: &GraphQlRequest) -> Result<Vec<Reading>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn aggregated_readings(
            &self,
            _: &GraphQlRequest,
        ) -> Result<Vec<AggregatedReading>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    fn catalog(available: bool) -> CatalogService {
        CatalogService::new(Arc::new(StaticRepository { available }), QueryBuilder::default())
    }

    #[tokio::test]
    async fn test_location_options() {
        let labels: Vec<String> = catalog(true)
            .location_options()
            .await
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, ["lab (3)", "roof (1)"]);
    }

    #[tokio::test]
    async fn test_find_sensor() {
        let sensor = catalog(true).find_sensor("t-1").await.unwrap();
        assert_eq!(sensor.location, "roof");
        assert!(catalog(true).find_sensor("t-2").await.is_none());
    }

    #[tokio::test]
    async fn test_failures_yield_empty_lists() {
        let service = catalog(false);
        assert!(service.location_options().await.is_empty());
        assert_eq!(service.sensor_catalog().await, SensorCatalog::default());
    }
}
