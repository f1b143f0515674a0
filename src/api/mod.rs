use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;
use tokio::signal;

pub mod core;
pub mod plugin;
#[cfg(feature = "server")]
pub mod server;

use crate::api::plugin::{CypherPlugin, ErrorRepresentation};
use crate::config::Config;
use crate::storage::{GraphFixture, MemoryGraph};
use crate::utils::logging;

/// 读取配置，失败时使用默认配置
pub fn load_config(config_path: &str) -> Config {
    match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Failed to load config from '{}': {}, using default config",
                config_path, e
            );
            Config::default()
        }
    }
}

/// 创建内存图，按需载入图数据文件
pub fn load_graph(graph_file: Option<&str>) -> Result<MemoryGraph> {
    let graph = MemoryGraph::new();
    if let Some(path) = graph_file {
        let fixture = GraphFixture::load(path)
            .with_context(|| format!("无法读取图数据文件 '{}'", path))?;
        fixture
            .apply(&graph)
            .with_context(|| format!("无法载入图数据文件 '{}'", path))?;
        info!(
            "图数据已载入: {} 个节点, {} 个关系",
            graph.node_count(),
            graph.relationship_count()
        );
    }
    Ok(graph)
}

#[cfg(feature = "server")]
pub async fn start_service(config_path: String) -> Result<()> {
    let config = load_config(&config_path);

    if let Err(e) = logging::init(&config.log) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    info!("Configuration loaded: {:?}", config);

    let graph = Arc::new(load_graph(config.graph_file.as_deref())?);
    let server = Arc::new(server::HttpServer::new(graph, config));

    let result = server.run(shutdown_signal()).await;
    if let Err(e) = &result {
        error!("HTTP 服务异常退出: {}", e);
    }

    info!("Shutting down service...");
    logging::shutdown();
    result.context("HTTP 服务运行失败")
}

/// 直接执行一条查询并打印 JSON 结果
pub fn execute_query(query_str: &str, graph_file: Option<&str>, config: &Config) -> Result<()> {
    let graph = load_graph(graph_file)?;
    let plugin = CypherPlugin::new(config.plugin.syntax_errors);
    let base_uri = format!("http://{}/db/data", config.bind_address());

    match plugin.execute_query(&graph, query_str) {
        Ok(representation) => {
            if let Some(body) = representation.serialize(&base_uri) {
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            Ok(())
        }
        Err(e) => {
            let body = ErrorRepresentation::from_plugin_error(&e);
            eprintln!("{}", serde_json::to_string_pretty(&body)?);
            Err(anyhow::Error::new(e).context("查询执行失败"))
        }
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
