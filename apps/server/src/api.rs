use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use platform_settings_core::errors::Error as CoreError;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    run_env: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub platform_id: String,
    pub valid: bool,
}

async fn healthz(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        run_env: state.run_env.to_string(),
    })
}

/// Checks that a known platform has credentials stored.
async fn validate_credentials(
    State(state): State<Arc<AppState>>,
    Path(platform_id): Path<String>,
) -> ApiResult<Json<ValidationResponse>> {
    let service = Arc::clone(&state.platform_service);
    let id = platform_id.clone();
    // Database and keyring access both block.
    let setting = tokio::task::spawn_blocking(move || service.get_setting(&id))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    if !setting.has_secrets {
        tracing::info!("No credentials stored for platform {}", platform_id);
        return Err(CoreError::ValidationFailed(format!(
            "No API key stored for platform {}",
            platform_id
        ))
        .into());
    }

    Ok(Json(ValidationResponse {
        platform_id,
        valid: true,
    }))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect::<Vec<HeaderValue>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/platforms/{id}/validate", post(validate_credentials));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
