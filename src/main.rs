//! Revoice - 音色克隆 TTS API 服务
//!
//! 对外提供音色注册/查询与语音合成的 RESTful API，
//! 实际推理由外部 TTS 引擎服务完成

use std::sync::Arc;

use revoice::config::{load_config, print_config};
use revoice::infrastructure::adapters::{
    FileOutputStorage, HttpTtsClient, HttpTtsClientConfig, SymphoniaProbe,
};
use revoice::infrastructure::http::{AppState, HttpServer, ServerConfig};
use revoice::infrastructure::persistence::JsonVoiceRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},revoice={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Revoice - 音色克隆 TTS API 服务");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.outputs_dir).await?;
    tokio::fs::create_dir_all(&config.storage.uploads_dir).await?;

    // 加载音色注册表（显式构造后注入，无全局状态）
    let probe = Arc::new(SymphoniaProbe::new());
    let voice_registry = Arc::new(
        JsonVoiceRegistry::load(&config.storage.voices_dir, probe)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load voice registry: {}", e))?,
    );

    // 创建 HTTP TTS 引擎客户端
    let tts_config = HttpTtsClientConfig {
        base_url: config.tts.url.clone(),
        timeout_secs: config.tts.timeout_secs,
        max_retries: config.tts.max_retries,
    };
    let tts_engine = Arc::new(
        HttpTtsClient::new(tts_config)
            .map_err(|e| anyhow::anyhow!("Failed to create TTS client: {}", e))?,
    );

    // 创建输出存储
    let output_storage = Arc::new(
        FileOutputStorage::new(&config.storage.outputs_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create output storage: {}", e))?,
    );

    // 创建 HTTP 服务器
    let static_dir = config
        .server
        .static_files
        .enabled
        .then(|| config.server.static_files.dir.clone());
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.storage.max_upload_size as usize)
        .with_static_dir(static_dir);

    let state = AppState::new(
        voice_registry,
        tts_engine,
        output_storage,
        config.storage.uploads_dir.clone(),
        config.cleanup.output_max_age_secs,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
