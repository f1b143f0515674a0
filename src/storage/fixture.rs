//! 图数据文件
//!
//! 用 JSON 描述一张小图，启动时（或测试中）写入 `MemoryGraph`：
//!
//! ```json
//! {
//!   "nodes": [
//!     { "key": "I", "set_name_property": true },
//!     { "key": "him", "set_name_property": true, "properties": { "age": 25 } }
//!   ],
//!   "relationships": [
//!     { "start": "I", "end": "him", "type": "know" }
//!   ]
//! }
//! ```
//!
//! 也支持一行一条关系的简写描述，如 `"I know you"`。

use super::MemoryGraph;
use crate::core::{Properties, StorageError, StorageResult, Value};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

type JsonProperties = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeFixture {
    pub key: String,
    #[serde(default)]
    pub set_name_property: bool,
    #[serde(default)]
    pub properties: JsonProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipFixture {
    pub start: String,
    pub end: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default)]
    pub properties: JsonProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphFixture {
    #[serde(default)]
    pub nodes: Vec<NodeFixture>,
    #[serde(default)]
    pub relationships: Vec<RelationshipFixture>,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 解析简写描述，每行 `起点 关系类型 终点`
    ///
    /// 出现过的节点都会带上与 key 相同的 `name` 属性。
    pub fn from_description(lines: &[&str]) -> StorageResult<Self> {
        let mut fixture = Self::new();
        for line in lines {
            let parts: Vec<&str> = line.split_whitespace().collect();
            let [start, rel_type, end] = parts.as_slice() else {
                return Err(StorageError::InvalidInput(format!(
                    "无效的图描述: '{}'，期望格式 '起点 类型 终点'",
                    line
                )));
            };
            fixture.ensure_named_node(start);
            fixture.ensure_named_node(end);
            fixture = fixture.with_relationship(start, rel_type, end);
        }
        Ok(fixture)
    }

    /// 添加一个带 `name` 属性的节点，`properties` 必须是 JSON 对象
    pub fn with_named_node(mut self, key: &str, properties: serde_json::Value) -> Self {
        let properties = match properties {
            serde_json::Value::Object(map) => map,
            _ => JsonProperties::new(),
        };
        match self.nodes.iter_mut().find(|n| n.key == key) {
            Some(node) => {
                node.set_name_property = true;
                node.properties.extend(properties);
            }
            None => self.nodes.push(NodeFixture {
                key: key.to_string(),
                set_name_property: true,
                properties,
            }),
        }
        self
    }

    pub fn with_relationship(mut self, start: &str, rel_type: &str, end: &str) -> Self {
        self.relationships.push(RelationshipFixture {
            start: start.to_string(),
            end: end.to_string(),
            rel_type: rel_type.to_string(),
            properties: JsonProperties::new(),
        });
        self
    }

    fn ensure_named_node(&mut self, key: &str) {
        if !self.nodes.iter().any(|n| n.key == key) {
            self.nodes.push(NodeFixture {
                key: key.to_string(),
                set_name_property: true,
                properties: JsonProperties::new(),
            });
        }
    }

    /// 写入图中，返回 key 到节点 ID 的映射
    pub fn apply(&self, graph: &MemoryGraph) -> StorageResult<HashMap<String, u64>> {
        let mut ids = HashMap::new();

        for node in &self.nodes {
            if ids.contains_key(&node.key) {
                return Err(StorageError::InvalidInput(format!("节点 key 重复: {}", node.key)));
            }
            let mut properties = convert_properties(&node.properties)?;
            if node.set_name_property {
                properties.insert("name".to_string(), Value::from(node.key.as_str()));
            }
            ids.insert(node.key.clone(), graph.create_node(properties));
        }

        for rel in &self.relationships {
            let start = lookup(&ids, &rel.start)?;
            let end = lookup(&ids, &rel.end)?;
            let properties = convert_properties(&rel.properties)?;
            graph.create_relationship(start, end, &rel.rel_type, properties)?;
        }

        log::debug!(
            "图数据已加载: {} 个节点, {} 条关系",
            self.nodes.len(),
            self.relationships.len()
        );
        Ok(ids)
    }
}

fn lookup(ids: &HashMap<String, u64>, key: &str) -> StorageResult<u64> {
    ids.get(key)
        .copied()
        .ok_or_else(|| StorageError::InvalidInput(format!("关系引用了未定义的节点: {}", key)))
}

fn convert_properties(json: &JsonProperties) -> StorageResult<Properties> {
    let mut properties = Properties::new();
    for (key, value) in json {
        let value = Value::try_from(value.clone())
            .map_err(|e| StorageError::InvalidInput(format!("属性 '{}': {}", key, e)))?;
        if !value.is_null() {
            properties.insert(key.clone(), value);
        }
    }
    Ok(properties)
}
