pub mod compose_handler;
pub mod csv_handler;
pub mod word_handler;

use axum::{http::StatusCode, response::IntoResponse, response::Response};

use crate::error::{InputError, StoreError};

pub(crate) fn store_error_response(e: StoreError) -> Response {
    match e {
        StoreError::NotFound(id) => {
            tracing::warn!("--- 单词不存在: ID={}", id);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        e => {
            tracing::error!("!!! 存储操作失败: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub(crate) fn input_error_response(e: InputError) -> Response {
    tracing::warn!("--- 输入不正确: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string()).into_response()
}
