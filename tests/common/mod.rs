//! 集成测试共享工具模块
//!
//! 提供测试用的图数据和断言函数

#![allow(dead_code)]

pub mod assertions;
pub mod data_fixtures;

use cypher_plugin::storage::MemoryGraph;
use std::collections::HashMap;

/// 测试图：图句柄加上节点 key 到 ID 的映射
pub struct TestGraph {
    pub graph: MemoryGraph,
    pub ids: HashMap<String, u64>,
}

impl TestGraph {
    /// 节点 key 对应的 ID
    pub fn id(&self, key: &str) -> u64 {
        *self
            .ids
            .get(key)
            .unwrap_or_else(|| panic!("测试图中没有节点 '{}'", key))
    }
}
