//! HTTP 服务器
//!
//! 持有图句柄、扩展实例和配置，供各个处理器共享

use crate::api::plugin::CypherPlugin;
use crate::config::Config;
use crate::storage::GraphDatabase;
use log::info;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::router::create_router;
use super::state::AppState;

/// HTTP 服务器
pub struct HttpServer<G: GraphDatabase + ?Sized + 'static> {
    graph: Arc<G>,
    plugin: CypherPlugin,
    config: Config,
}

impl<G: GraphDatabase + ?Sized + 'static> HttpServer<G> {
    /// 创建新的 HTTP 服务器，语法错误策略取自配置
    pub fn new(graph: Arc<G>, config: Config) -> Self {
        Self {
            graph,
            plugin: CypherPlugin::new(config.plugin.syntax_errors),
            config,
        }
    }

    /// 获取图句柄
    pub fn graph(&self) -> &Arc<G> {
        &self.graph
    }

    /// 获取查询扩展
    pub fn plugin(&self) -> &CypherPlugin {
        &self.plugin
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 绑定配置中的地址并提供服务，直到 `shutdown` 完成
    pub async fn run<F>(self: Arc<Self>, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_address()).await?;
        info!("HTTP 服务监听于 {}", listener.local_addr()?);

        let router = create_router(AppState::new(self));
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
