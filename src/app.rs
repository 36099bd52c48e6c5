//! Application wiring: collaborators from configuration and the HTTP router.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::analysis::{KeywordAnalysisProvider, MockAnalysisProvider};
use crate::adapters::geo::{FixedLocationProvider, MockFacilityLocator, UnavailableLocationProvider};
use crate::adapters::http::{triage_routes, TriageHandlers};
use crate::adapters::session::InMemoryConversationRegistry;
use crate::application::Collaborators;
use crate::config::{AnalysisProviderKind, AppConfig, CorsPolicy, ServerConfig};
use crate::ports::{AnalysisProvider, LocationProvider};

/// Builds the external collaborators selected by `config`.
pub fn collaborators(config: &AppConfig) -> Collaborators {
    let analysis: Arc<dyn AnalysisProvider> = match config.analysis.provider {
        AnalysisProviderKind::Mock => Arc::new(
            MockAnalysisProvider::new().with_delay(config.analysis.simulated_latency()),
        ),
        AnalysisProviderKind::Keyword => Arc::new(KeywordAnalysisProvider::new()),
    };

    let location: Arc<dyn LocationProvider> = if config.geo.disabled {
        Arc::new(UnavailableLocationProvider)
    } else {
        Arc::new(FixedLocationProvider::new(
            config.geo.latitude,
            config.geo.longitude,
            Some(config.geo.accuracy_m),
        ))
    };

    Collaborators::new(analysis, location, Arc::new(MockFacilityLocator::tunis()))
}

/// Conversation registry configured from `config`.
pub fn registry(config: &AppConfig) -> InMemoryConversationRegistry {
    InMemoryConversationRegistry::new(collaborators(config), config.pipeline_settings())
        .with_idle_ttl(config.server.session_idle_timeout())
}

/// Full HTTP application: triage routes under `/api` plus tracing, CORS and timeout layers.
pub fn router(registry: InMemoryConversationRegistry, server: &ServerConfig) -> Router {
    Router::new()
        .nest("/api", triage_routes(TriageHandlers::new(registry)))
        .layer(TimeoutLayer::new(server.turn_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(server))
}

/// Browser access for the chat front-end.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    match server.cors_policy() {
        CorsPolicy::AnyOrigin => {
            tracing::info!("CORS: allowing all origins");
            cors.allow_origin(Any)
        }
        CorsPolicy::Origins(origins) => {
            let origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            tracing::info!(origins = ?origins, "CORS: restricting origins");
            cors.allow_origin(origins)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeoConfig;

    #[test]
    fn keyword_provider_is_selected_from_config() {
        let mut config = AppConfig::default();
        config.analysis.provider = AnalysisProviderKind::Keyword;

        let collaborators = collaborators(&config);

        assert_eq!(collaborators.analysis.provider_info().name, "keyword");
    }

    #[test]
    fn registry_takes_session_ttl_from_server_config() {
        let mut config = AppConfig::default();
        config.server.session_idle_secs = 90;

        assert_eq!(registry(&config).idle_ttl(), std::time::Duration::from_secs(90));
    }

    #[tokio::test]
    async fn disabled_geo_reports_no_location() {
        let config = AppConfig {
            geo: GeoConfig {
                disabled: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let collaborators = collaborators(&config);

        assert_eq!(collaborators.location.current_location().await.unwrap(), None);
    }

    #[tokio::test]
    async fn configured_position_is_reported() {
        let config = AppConfig {
            geo: GeoConfig {
                latitude: 34.74,
                longitude: 10.76,
                accuracy_m: 50.0,
                disabled: false,
            },
            ..Default::default()
        };

        let point = collaborators(&config)
            .location
            .current_location()
            .await
            .unwrap()
            .unwrap();

        assert_eq!(point.latitude, 34.74);
        assert_eq!(point.accuracy, Some(50.0));
    }
}
