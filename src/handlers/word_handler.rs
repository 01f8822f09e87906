use crate::error::InputError;
use crate::models::word::{NewWord, UpsertOutcome, Word};
use crate::services::input::{check_join_delimiter, parse_tags, validate_edit, EditAction};
use crate::services::register_service::{self, RegisterError};
use crate::session::{ListView, RegisterSession};
use crate::AppState;
use axum::{extract::Path, extract::Query, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{input_error_response, store_error_response};

#[derive(Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    /// 逗号分隔的标签
    pub tags: Option<String>,
}

#[derive(Deserialize)]
pub struct LookupQuery {
    pub jp: String,
}

#[derive(Serialize)]
pub struct UpsertResponse {
    pub result: UpsertOutcome,
    pub word: Word,
}

#[derive(Deserialize)]
pub struct RegisterPayload {
    #[serde(flatten)]
    pub session: RegisterSession,
    /// 已登录且英文不同的单词是否覆盖
    #[serde(default)]
    pub overwrite: bool,
}

/// 1. 单词列表（可按标签过滤、排序）
pub async fn list_words(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    match state.store.get_all_words().await {
        Ok(words) => {
            // 未知的排序类型按原顺序返回
            let view = ListView {
                sort: query.sort.as_deref().and_then(|s| s.parse().ok()),
                selected_tags: query.tags.as_deref().map(parse_tags).unwrap_or_default(),
            };
            (StatusCode::OK, Json(view.apply(&words))).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

/// 2. 按 jp 追加或覆盖
pub async fn upsert_word(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewWord>,
) -> impl IntoResponse {
    tracing::info!(">>> 收到单词登录请求: jp={}", payload.jp);

    if payload.jp.trim().is_empty() || payload.en.trim().is_empty() {
        return input_error_response(InputError::MissingField);
    }
    if let Err(e) = check_join_delimiter(&payload.jp, &payload.en) {
        return input_error_response(e);
    }

    match state.store.add_or_update_by_jp(&payload).await {
        Ok((result, word)) => {
            let status = match result {
                UpsertOutcome::Added => StatusCode::CREATED,
                UpsertOutcome::Updated => StatusCode::OK,
            };
            (status, Json(UpsertResponse { result, word })).into_response()
        }
        Err(e) => store_error_response(e),
    }
}

/// 3. 多行登录
pub async fn register_words(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> impl IntoResponse {
    tracing::info!(">>> 收到多行登录请求: {} 行, overwrite={}", payload.session.rows.len(), payload.overwrite);

    let overwrite = payload.overwrite;
    match register_service::register_rows(&state.store, &payload.session.rows, |_, _| overwrite).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(RegisterError::Input(e)) => input_error_response(e),
        Err(RegisterError::Store(e)) => store_error_response(e),
    }
}

pub async fn get_word(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.store.get_word_by_id(id).await {
        Ok(Some(word)) => (StatusCode::OK, Json(word)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "未找到该单词").into_response(),
        Err(e) => store_error_response(e),
    }
}

pub async fn lookup_word(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> impl IntoResponse {
    match state.store.find_by_jp(&query.jp).await {
        Ok(Some(word)) => (StatusCode::OK, Json(word)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "未找到该单词").into_response(),
        Err(e) => store_error_response(e),
    }
}

/// 4. 编辑单词；jp 与 en 都清空时按删除处理
pub async fn update_word(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<NewWord>,
) -> impl IntoResponse {
    let action = match validate_edit(&payload.jp, &payload.en, &payload.tags) {
        Ok(action) => action,
        Err(e) => return input_error_response(e),
    };

    match action {
        EditAction::Delete => {
            tracing::info!(">>> 编辑内容为空，删除单词: ID={}", id);
            match state.store.delete_word(id).await {
                Ok(()) => StatusCode::NO_CONTENT.into_response(),
                Err(e) => store_error_response(e),
            }
        }
        EditAction::Update(word) => match state.store.update_word(id, &word).await {
            Ok(word) => (StatusCode::OK, Json(word)).into_response(),
            Err(e) => store_error_response(e),
        },
    }
}

/// 5. 删除单词（重复删除也返回成功）
pub async fn delete_word(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.store.delete_word(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_response(e),
    }
}

pub async fn list_tags(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.get_all_tags().await {
        Ok(tags) => (StatusCode::OK, Json(tags)).into_response(),
        Err(e) => store_error_response(e),
    }
}
