//! 주가 조회/예측 웹 서버 엔트리포인트.

use std::sync::Arc;

use anyhow::Context;
use sise_core::config::AppConfig;
use sise_core::logging::init_logging_from_env;
use sise_web::{router, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    if let Err(e) = init_logging_from_env() {
        eprintln!("로깅 초기화 실패: {e}");
    }

    let config = AppConfig::from_env();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    info!(display_name = %config.display_name, "서버 설정 로드 완료");

    let state = AppState::from_config(config).context("애플리케이션 상태 초기화 실패")?;
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{addr} 바인딩 실패"))?;
    info!("서버 시작: http://{addr}");

    axum::serve(listener, app).await.context("서버 실행 실패")?;
    Ok(())
}
