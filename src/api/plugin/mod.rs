//! Cypher 查询扩展
//!
//! 挂在 `/db/data/ext/CypherPlugin/graphdb/execute_query` 下的服务端扩展：
//! 接收查询文本，解析、执行并包装结果。

pub mod representation;

use log::{debug, warn};

pub use representation::{CypherResultRepresentation, ErrorRepresentation, Representation};

use crate::api::core::{PluginError, PluginResult};
use crate::config::SyntaxErrorPolicy;
use crate::query::{CypherParser, ExecutionEngine};
use crate::storage::GraphDatabase;

/// Cypher 查询扩展
///
/// 不持有任何可变状态，每次调用都新建解析器和执行引擎。
#[derive(Debug, Clone, Copy, Default)]
pub struct CypherPlugin {
    policy: SyntaxErrorPolicy,
}

impl CypherPlugin {
    /// 扩展名，出现在 URL 中
    pub const NAME: &'static str = "CypherPlugin";
    /// 扩展方法名
    pub const EXECUTE_QUERY: &'static str = "execute_query";
    /// 目标资源
    pub const TARGET: &'static str = "graphdb";

    pub fn new(policy: SyntaxErrorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SyntaxErrorPolicy {
        self.policy
    }

    /// 执行一条查询
    ///
    /// 语法错误总会记录日志；之后按策略返回失败或空表示。
    /// 执行错误原样返回。
    pub fn execute_query<G: GraphDatabase + ?Sized>(
        &self,
        graph: &G,
        query: &str,
    ) -> PluginResult<Representation> {
        let parser = CypherParser::new();
        let compiled = match parser.parse(query) {
            Ok(compiled) => compiled,
            Err(e) => {
                warn!("查询语法错误: {} (查询: {})", e, query);
                return match self.policy {
                    SyntaxErrorPolicy::Reject => Err(PluginError::Syntax(e)),
                    SyntaxErrorPolicy::Swallow => Ok(Representation::Empty),
                };
            }
        };

        let engine = ExecutionEngine::new(graph);
        let result = engine.execute(&compiled)?;
        debug!("查询返回 {} 行", result.len());

        Ok(Representation::CypherResult(CypherResultRepresentation::new(result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExecutionError;
    use crate::storage::{GraphFixture, MemoryGraph};

    fn graph() -> MemoryGraph {
        let graph = MemoryGraph::new();
        GraphFixture::from_description(&["I know you"])
            .expect("fixture")
            .apply(&graph)
            .expect("apply");
        graph
    }

    #[test]
    fn test_execute_query_success() {
        let graph = graph();
        let plugin = CypherPlugin::default();
        let repr = plugin
            .execute_query(&graph, "start n = node(*) return n.name")
            .expect("execute");
        let Representation::CypherResult(result) = repr else {
            panic!("expected a result");
        };
        assert_eq!(result.result().len(), 2);
    }

    #[test]
    fn test_syntax_error_rejected_by_default() {
        let graph = graph();
        let plugin = CypherPlugin::default();
        let err = plugin
            .execute_query(&graph, "start n = node(*) retrun n")
            .expect_err("syntax error");
        assert!(matches!(err, PluginError::Syntax(_)));
    }

    #[test]
    fn test_syntax_error_swallowed() {
        let graph = graph();
        let plugin = CypherPlugin::new(SyntaxErrorPolicy::Swallow);
        let repr = plugin.execute_query(&graph, "").expect("swallowed");
        assert!(repr.is_empty());
    }

    #[test]
    fn test_execution_error_is_not_swallowed() {
        let graph = graph();
        let plugin = CypherPlugin::new(SyntaxErrorPolicy::Swallow);
        let err = plugin
            .execute_query(&graph, "start n = (42) return n")
            .expect_err("unknown node");
        assert_eq!(err, PluginError::Execution(ExecutionError::NodeNotFound(42)));
    }
}
