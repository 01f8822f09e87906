use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use prompt_builder::config::Config;
use prompt_builder::services::word_store::WordStore;
use prompt_builder::{build_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env 环境变量
    dotenv().ok();
    let config = Config::from_env()?;

    // 2. 初始化日志系统
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 3. 打开单词存储（必要时执行 schema 迁移）
    let store = WordStore::init(&config.database_url)
        .await
        .with_context(|| format!("failed to open word store at {}", config.database_url))?;

    let shared_state = Arc::new(AppState { store });
    let app = build_router(shared_state);

    // 4. 启动服务
    tracing::info!("🚀 Server started at http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
