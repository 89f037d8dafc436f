use std::sync::Arc;
use axum::{
    Router,
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::model::{Feature, ModelMetadata, SensorReading, ThresholdModel};
use crate::web::error::ApiError;

/// HTTP surface of the failure model
pub struct WebServer {
    model: Arc<ThresholdModel>,
    config: Arc<Config>,
}

#[derive(Clone)]
struct AppState {
    model: Arc<ThresholdModel>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model_version: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
struct PredictResponse {
    result: &'static str,
    prediction_binary: u8,
    confidence: f64,
    model_version: &'static str,
    recommendations: Vec<&'static str>,
    input_summary: InputSummary,
    timestamp: String,
}

/// Echo of the threshold-relevant inputs, as submitted
#[derive(Serialize)]
struct InputSummary {
    temperatura: Value,
    vibracion: Value,
    humedad: Value,
    eficiencia: Value,
}

impl InputSummary {
    fn from_payload(data: &Map<String, Value>) -> Self {
        let echo = |f: Feature| data.get(f.name()).cloned().unwrap_or(Value::Null);
        Self {
            temperatura: echo(Feature::Temperatura),
            vibracion: echo(Feature::Vibracion),
            humedad: echo(Feature::Humedad),
            eficiencia: echo(Feature::EficienciaPorcentual),
        }
    }
}

impl WebServer {
    pub fn new(model: Arc<ThresholdModel>, config: Arc<Config>) -> Self {
        Self { model, config }
    }

    pub fn router(&self) -> Router {
        router(self.model.clone(), self.config.cors.enabled)
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("🛠 Prediction API listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Prediction API stopped");
        Ok(())
    }
}

/// Build the route table around a shared model
pub fn router(model: Arc<ThresholdModel>, cors: bool) -> Router {
    let state = AppState { model };

    let app = Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/model/info", get(model_info))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Local time, ISO-8601 without offset
fn timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Liveness probe
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_version: state.model.version(),
        timestamp: timestamp(),
    })
}

/// Score one sensor reading
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::internal(e.body_text()))?;
    let body = body
        .as_object()
        .ok_or_else(|| ApiError::internal("el cuerpo de la petición debe ser un objeto JSON"))?;

    let empty = Map::new();
    let data = match body.get("data") {
        None => &empty,
        Some(Value::Object(data)) => data,
        Some(_) => return Err(ApiError::internal("el campo 'data' debe ser un objeto JSON")),
    };

    let reading = SensorReading::from_json(data)?;
    let assessment = state.model.assess(&reading);
    let prediction = assessment.prediction;

    let response = PredictResponse {
        result: prediction.label.describe(),
        prediction_binary: prediction.label.as_binary(),
        confidence: round4(prediction.confidence),
        model_version: state.model.version(),
        recommendations: assessment.recommendations,
        input_summary: InputSummary::from_payload(data),
        timestamp: timestamp(),
    };

    info!(
        "Prediction: {} (confidence: {:.4})",
        response.result, prediction.confidence
    );

    Ok(Json(response))
}

/// Static model description
async fn model_info(State(state): State<AppState>) -> Json<ModelMetadata> {
    Json(state.model.metadata().clone())
}
