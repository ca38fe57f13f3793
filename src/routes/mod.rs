pub mod health;
pub mod pages;
mod rate_limit;
pub mod stations;

use axum::{
    body::Body,
    http::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tracing::Level;
use uuid::Uuid;

use rate_limit::ClientIpKeyExtractor;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::services::{NewStation, StationView};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        stations::list_stations,
        stations::get_station,
        stations::create_station,
        stations::update_station_status,
        stations::delete_station,
    ),
    components(
        schemas(
            StationView,
            NewStation,
            stations::StatusUpdateRequest,
            stations::StatusUpdateResponse,
            stations::DeleteResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "stations", description = "Station inventory and status"),
    ),
    info(
        title = "Meteo Stations API",
        description = "Weather station inventory and status API",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let station_routes = if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");

        Router::new()
            .route(
                "/stations",
                get(stations::list_stations).post(stations::create_station),
            )
            .route(
                "/stations/{station_id}",
                get(stations::get_station)
                    .put(stations::update_station_status)
                    .delete(stations::delete_station),
            )
            .route("/estaciones", get(pages::station_list_page))
            .route("/estaciones/{station_id}", get(pages::station_detail_page))
    } else {
        tracing::info!(
            read_rate = %format!("{}/s burst {}", config.rate_limit_read_per_second, config.rate_limit_read_burst),
            write_rate = %format!("{}/s burst {}", config.rate_limit_write_per_second, config.rate_limit_write_burst),
            trust_forwarded_headers = config.trust_forwarded_headers,
            "Rate limiting configured"
        );

        let key_extractor = ClientIpKeyExtractor {
            trust_forwarded_headers: config.trust_forwarded_headers,
        };

        let read_limiter = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(key_extractor)
                .per_second(config.rate_limit_read_per_second)
                .burst_size(config.rate_limit_read_burst)
                .finish()
                .expect("Failed to create read rate limiter"),
        );

        let write_limiter = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(key_extractor)
                .per_second(config.rate_limit_write_per_second)
                .burst_size(config.rate_limit_write_burst)
                .finish()
                .expect("Failed to create write rate limiter"),
        );

        let read = || GovernorLayer {
            config: Arc::clone(&read_limiter),
        };
        let write = || GovernorLayer {
            config: Arc::clone(&write_limiter),
        };

        // Reads and writes share paths, so the limiters wrap method routers.
        Router::new()
            .route(
                "/stations",
                get(stations::list_stations)
                    .layer(read())
                    .merge(post(stations::create_station).layer(write())),
            )
            .route(
                "/stations/{station_id}",
                get(stations::get_station)
                    .layer(read())
                    .merge(put(stations::update_station_status).layer(write()))
                    .merge(delete(stations::delete_station).layer(write())),
            )
            .route(
                "/estaciones",
                get(pages::station_list_page).layer(read()),
            )
            .route(
                "/estaciones/{station_id}",
                get(pages::station_detail_page).layer(read()),
            )
    }
    .layer(RequestBodyLimitLayer::new(config.request_body_limit_bytes));

    // Health check routes (NO rate limiting)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .merge(station_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "http_request",
                        request_id = %Uuid::new_v4(),
                        method = %request.method(),
                        uri = %request.uri()
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
