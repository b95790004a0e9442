use axum::{extract::State, http::HeaderMap, Json};

use casm_rs::Program;

use crate::identity::visitor_from_headers;
use crate::server::state::{Admission, AppState};
use crate::types::{CodeRequest, CompileResponse, EmitResponse, NormalizeResponse};

const SESSION_NOT_INITIALIZED: &str = "Session not initialized. Please refresh the page.";

/// POST /compile - Validate a program and return its listing, metered per visitor
pub async fn compile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CodeRequest>,
) -> crate::Result<Json<CompileResponse>> {
    let Some(visitor) = visitor_from_headers(&headers, &state.config().cookie.name) else {
        return Ok(Json(CompileResponse::failed(vec![
            SESSION_NOT_INITIALIZED.to_string(),
        ])));
    };

    let admission = state.admit(&visitor).await.map_err(|e| {
        tracing::error!(%visitor, error = %e, "failed to update usage ledger");
        e
    })?;

    match admission {
        Admission::LimitReached => {
            tracing::warn!(%visitor, "free compile limit reached");
            return Ok(Json(CompileResponse::limit_reached(
                state.config().free_compile_limit,
            )));
        }
        Admission::Admitted(count) => {
            tracing::info!(%visitor, count, "compile admitted");
        }
    }

    let response = match Program::from(request.code.as_str()).compile() {
        Ok(listing) => CompileResponse::compiled(listing.to_string()),
        Err(report) => CompileResponse::failed(report.messages()),
    };

    Ok(Json(response))
}

/// POST /normalize - Rewrite a program into its normalized form
pub async fn normalize(Json(request): Json<CodeRequest>) -> Json<NormalizeResponse> {
    Json(NormalizeResponse {
        normalized: casm_rs::normalize(&request.code),
    })
}

/// POST /emit - Echo an emission trace of a program
pub async fn emit(Json(request): Json<CodeRequest>) -> Json<EmitResponse> {
    Json(EmitResponse {
        emission: casm_rs::emit(&request.code),
    })
}
