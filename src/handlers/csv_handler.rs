use crate::error::CsvError;
use crate::models::word::NewWord;
use crate::services::csv_codec::{self, EXPORT_FILE_NAME};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::store_error_response;

#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

async fn bulk_import(state: &AppState, words: Vec<NewWord>) -> axum::response::Response {
    match state.store.bulk_add(&words).await {
        Ok(imported) => (StatusCode::OK, Json(ImportResponse { imported })).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// 1. 粘贴的 CSV 文本（严格格式，任何一行出错整体拒绝）
pub async fn paste_csv(State(state): State<Arc<AppState>>, body: String) -> impl IntoResponse {
    tracing::info!(">>> 收到 CSV 粘贴导入请求");

    match csv_codec::parse_strict(&body) {
        Ok(pairs) => bulk_import(&state, pairs.into_iter().map(NewWord::from).collect()).await,
        Err(e) => {
            tracing::warn!("--- CSV 格式不正确: {}", e);
            e.into_response()
        }
    }
}

/// 2. CSV 文件导入（宽松格式，无法解析的行直接跳过）
pub async fn import_csv(State(state): State<Arc<AppState>>, body: String) -> impl IntoResponse {
    let rows = csv_codec::import_lenient(&body);
    tracing::info!(">>> 收到 CSV 文件导入请求: {} 行有效", rows.len());
    bulk_import(&state, rows).await
}

/// 3. 导出全部单词
pub async fn export_csv(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.get_all_words().await {
        Ok(words) => {
            let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv_codec::export(&words),
            )
                .into_response()
        }
        Err(e) => store_error_response(e),
    }
}

impl IntoResponse for CsvError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            CsvError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
