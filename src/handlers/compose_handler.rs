use crate::services::compose_service::{self, ComposeError};
use crate::session::OutputSession;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use super::{input_error_response, store_error_response};

/// 选中的日文单词 -> 英文提示词
pub async fn compose(
    State(state): State<Arc<AppState>>,
    Json(session): Json<OutputSession>,
) -> impl IntoResponse {
    match compose_service::compose(&state.store, &session.selected).await {
        Ok(composition) => Json(composition).into_response(),
        Err(ComposeError::Input(e)) => input_error_response(e),
        Err(ComposeError::Store(e)) => store_error_response(e),
    }
}
