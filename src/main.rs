mod category;
mod config;
mod engine;
mod openai;
mod prompt;
mod types;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use axum_prometheus::PrometheusMetricLayer;
use clap::Parser;
use metrics::counter;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use category::Category;
use config::Config;
use engine::ChatCompletion;
use openai::OpenAiClient;
use prompt::build_messages;
use types::{ClassifyRequest, ClassifyResponse, ErrorBody, MISSING_FIELDS_ERROR, encode_json};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,receipt_classifier=debug".into()),
        )
        .init();

    let config = Config::parse();
    tracing::info!(
        model = %config.model,
        api_base = %config.api_base,
        permissive_cors = config.permissive_cors,
        ascii_json = config.ascii_json,
        "Starting receipt classifier"
    );

    let engine = OpenAiClient::new(
        config.api_base.clone(),
        config.api_key.clone(),
        config.model.clone(),
    );
    let state = AppState::new(Arc::new(engine), config.ascii_json);

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let mut app = router(state)
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http());

    if config.permissive_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = TcpListener::bind(&config.server_address()).await?;
    tracing::info!("Server running on http://{}", config.server_address());

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Clone)]
struct AppState {
    engine: Arc<dyn ChatCompletion>,
    ascii_json: bool,
}

impl AppState {
    fn new(engine: Arc<dyn ChatCompletion>, ascii_json: bool) -> Self {
        Self { engine, ascii_json }
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/classify_receipt", post(classify_handler))
        .with_state(state)
}

#[tracing::instrument(skip(state, request), fields(store_name = ?request.store_name))]
async fn classify_handler(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Response {
    counter!("classification_requests_total").increment(1);

    let (Some(store_name), Some(product_names)) = (request.store_name, request.product_names)
    else {
        counter!("classification_bad_requests_total").increment(1);
        return json_response(
            StatusCode::BAD_REQUEST,
            &ErrorBody {
                error: MISSING_FIELDS_ERROR,
            },
            state.ascii_json,
        );
    };

    let messages = build_messages(&store_name, &product_names);

    let raw = match state.engine.complete(messages).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(error = %e, "Chat completion failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let category = Category::resolve(&raw);
    tracing::info!(category = category.label(), "Classification completed");

    json_response(
        StatusCode::OK,
        &ClassifyResponse {
            store_name,
            category,
        },
        state.ascii_json,
    )
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T, ascii: bool) -> Response {
    match encode_json(body, ascii) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
