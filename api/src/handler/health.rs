use axum::{extract::State, http::StatusCode};
use registry::AppRegistry;

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub async fn health_check_db(State(registry): State<AppRegistry>) -> StatusCode {
    if registry.health_check_repository().check_db().await {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{request, send, Mocks};
    use axum::http::{Method, StatusCode};
    use kernel::repository::health::{HealthCheckRepository, MockHealthCheckRepository};
    use std::sync::Arc;

    #[tokio::test]
    async fn database_failure_is_reported_as_500() {
        let mut health = MockHealthCheckRepository::new();
        health.expect_check_db().returning(|| false);
        let health: Arc<dyn HealthCheckRepository> = Arc::new(health);

        let mut mocks = Mocks::anonymous();
        mocks
            .registry
            .expect_health_check_repository()
            .returning(move || health.clone());
        let registry = mocks.into_registry();

        let (status, _) = send(registry.clone(), request(Method::GET, "/api/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(registry, request(Method::GET, "/api/health/db", None, None)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
