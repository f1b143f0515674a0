//! 测试数据生成模块

use super::TestGraph;
use cypher_plugin::storage::{GraphFixture, MemoryGraph};
use serde_json::json;

fn build(fixture: GraphFixture) -> TestGraph {
    let graph = MemoryGraph::new();
    let ids = fixture.apply(&graph).expect("写入测试图失败");
    TestGraph { graph, ids }
}

/// I、you、him 三个节点，him 带 age = 25；I 认识 him 和 you
pub fn people_graph() -> TestGraph {
    build(
        GraphFixture::new()
            .with_named_node("I", json!({}))
            .with_named_node("you", json!({}))
            .with_named_node("him", json!({ "age": 25 }))
            .with_relationship("I", "know", "him")
            .with_relationship("I", "know", "you"),
    )
}

/// 简写描述构造的图，如 `"I know you"`
pub fn described_graph(lines: &[&str]) -> TestGraph {
    build(GraphFixture::from_description(lines).expect("图描述无效"))
}

/// start 子句锚定到某个节点的查询
pub fn query_from(graph: &TestGraph, key: &str, rest: &str) -> String {
    format!("start x = ({}) {}", graph.id(key), rest)
}
