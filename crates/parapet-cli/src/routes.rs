//! Request handlers.
//!
//! The `/ask` handler maps pipeline outcomes onto HTTP status codes:
//! a guardrail refusal is still a 200 with the audited payload, while a
//! failed generation backend is a 502. Blank questions are the caller's
//! fault and return 400.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use parapet_runtime::PipelineError;

use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub policy_pack_version: String,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Response {
    match state
        .pipeline
        .answer(&request.question, request.jurisdiction.as_deref())
        .await
    {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(PipelineError::EmptyQuestion) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "question must not be empty".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Answer pipeline failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub async fn healthz(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        policy_pack_version: state.pipeline.pack().version.clone(),
    })
}
