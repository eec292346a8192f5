//! GeoWatch Monitoring Server
//!
//! Backend for the geographic anomaly dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        GEOWATCH                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────┐ │
//! │  │  API      │  │  Filter      │  │  Demo Data Source    │ │
//! │  │  Gateway  │  │  Engine      │  │  (Periodic Reseed)   │ │
//! │  │  (Axum)   │  │  (Pure fns)  │  │                      │ │
//! │  └─────┬─────┘  └──────┬───────┘  └──────────┬───────────┘ │
//! │        └───────────────┼─────────────────────┘              │
//! │                        ▼                                    │
//! │                ┌───────────────┐                            │
//! │                │ Anomaly Store │                            │
//! │                │ (in-memory)   │                            │
//! │                └───────────────┘                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod models;
mod store;

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use store::AnomalyStore;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    init_tracing(&config);
    tracing::info!("GeoWatch server starting...");

    // Seed the in-memory store from the demo data source
    let records = {
        let mut rng = rand::thread_rng();
        logic::demo::generate(config.demo_anomaly_count, &mut rng)
    };
    let store = AnomalyStore::new(records);
    tracing::info!("Seeded {} demo anomalies", store.len().await);

    spawn_refresh_task(
        store.clone(),
        config.demo_anomaly_count,
        config.refresh_interval_secs,
    );

    // Build application state
    let state = AppState {
        store,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "geowatch_server=debug,tower_http=debug".into());

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: AnomalyStore,
    pub config: Config,
}

/// The demo data source re-seeds the store on a fixed interval, the way
/// a detection backend would push fresh results.
fn spawn_refresh_task(store: AnomalyStore, count: usize, interval_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick completes immediately and the store is already seeded
        interval.tick().await;
        loop {
            interval.tick().await;
            let records = {
                let mut rng = rand::thread_rng();
                logic::demo::generate(count, &mut rng)
            };
            let refreshed = store.replace(records).await;
            tracing::debug!("Demo data refreshed: {} anomalies", refreshed);
        }
    });
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        // Anomalies
        .route("/api/v1/anomalies", get(handlers::anomalies::list))
        .route("/api/v1/anomalies/refresh", post(handlers::anomalies::refresh))
        .route("/api/v1/anomalies/:id", get(handlers::anomalies::get))
        // Map projections
        .route("/api/v1/markers", get(handlers::markers::list))
        // Statistics
        .route("/api/v1/statistics", get(handlers::statistics::get))
        // Export
        .route("/api/v1/export", get(handlers::export::download))
        // Demo analysis
        .route("/api/v1/analysis/run", post(handlers::analysis::run))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use crate::models::AnomalyRecord;
    use rand::{rngs::StdRng, SeedableRng};
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let mut rng = StdRng::seed_from_u64(9);
        let state = AppState {
            store: AnomalyStore::new(logic::demo::generate(10, &mut rng)),
            config: Config {
                port: 0,
                demo_anomaly_count: 10,
                refresh_interval_secs: 60,
                environment: "test".to_string(),
            },
        };
        create_router(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (status, body) = get_json(test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["anomalies_loaded"], 10);
    }

    #[tokio::test]
    async fn anomaly_list_is_sorted_by_confidence() {
        let (status, body) =
            get_json(test_app(), "/api/v1/anomalies?min_confidence=0.0").await;
        assert_eq!(status, StatusCode::OK);

        let records: Vec<AnomalyRecord> = serde_json::from_slice(&body).unwrap();
        assert_eq!(records.len(), 10);
        for pair in records.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[tokio::test]
    async fn out_of_range_confidence_is_rejected() {
        let (status, _) =
            get_json(test_app(), "/api/v1/anomalies?min_confidence=1.5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_anomaly_type_is_rejected() {
        let (status, _) =
            get_json(test_app(), "/api/v1/anomalies?anomaly_type=earthquake").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (status, _) = get_json(test_app(), "/api/v1/anomalies/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json(test_app(), "/api/v1/anomalies/demo-1").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn statistics_count_the_whole_store_without_filters() {
        let (status, body) =
            get_json(test_app(), "/api/v1/statistics?min_confidence=0.0").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["total"], 10);
        let by_type = &json["by_type"];
        let type_sum = ["fire", "deforestation", "dump", "construction", "flood"]
            .iter()
            .map(|t| by_type[*t].as_u64().unwrap())
            .sum::<u64>();
        assert_eq!(type_sum, 10);
    }

    #[tokio::test]
    async fn markers_carry_style_and_heat_above_threshold() {
        let (status, body) =
            get_json(test_app(), "/api/v1/markers?min_confidence=0.0").await;
        assert_eq!(status, StatusCode::OK);

        let features: serde_json::Value = serde_json::from_slice(&body).unwrap();
        for feature in features.as_array().unwrap() {
            let confidence = feature["confidence"].as_f64().unwrap();
            let size_px = feature["style"]["size_px"].as_u64().unwrap();
            assert!([24, 28, 32].contains(&size_px));
            assert_eq!(feature["heat"].is_null(), confidence <= 0.7);
        }
    }

    #[tokio::test]
    async fn export_is_csv_with_bom() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?min_confidence=0.0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/csv"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with('\u{feff}'));
        // header + 10 records
        assert_eq!(text.trim_start_matches('\u{feff}').split('\n').count(), 11);
    }

    #[tokio::test]
    async fn analysis_run_prepends_a_fresh_anomaly() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analysis/run")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["total"], 11);

        // The new record is now served by the list endpoint
        let (status, body) =
            get_json(app, "/api/v1/anomalies?min_confidence=0.0").await;
        assert_eq!(status, StatusCode::OK);
        let records: Vec<AnomalyRecord> = serde_json::from_slice(&body).unwrap();
        assert_eq!(records.len(), 11);
    }

    #[tokio::test]
    async fn refresh_reseeds_the_store() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/anomalies/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["count"], 10);
    }
}
