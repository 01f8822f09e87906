use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod session;

use services::word_store::WordStore;

// 全局状态，Handler 通过它访问单词存储
pub struct AppState {
    pub store: WordStore,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    // 只监听本机，前端页面可能来自其他端口
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // 单词
        .route("/api/words", get(handlers::word_handler::list_words)
            .post(handlers::word_handler::upsert_word))
        .route("/api/words/register", post(handlers::word_handler::register_words))
        .route("/api/words/lookup", get(handlers::word_handler::lookup_word))
        .route("/api/words/:id", get(handlers::word_handler::get_word)
            .put(handlers::word_handler::update_word)
            .delete(handlers::word_handler::delete_word))
        .route("/api/tags", get(handlers::word_handler::list_tags))

        // CSV 导入/导出
        .route("/api/csv/paste", post(handlers::csv_handler::paste_csv))
        .route("/api/csv/import", post(handlers::csv_handler::import_csv))
        .route("/api/csv/export", get(handlers::csv_handler::export_csv))

        // 输出：日文 -> 英文提示词
        .route("/api/compose", post(handlers::compose_handler::compose))

        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
