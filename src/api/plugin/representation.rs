//! 扩展调用结果的 JSON 表示
//!
//! 成功结果序列化为 `{"columns": [...], "data": [[...], ...]}`，
//! 节点、关系以 REST 资源的形式给出，URI 以 `base_uri` 为前缀。

use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};
use std::error::Error;

use crate::api::core::PluginError;
use crate::core::{Node, Path, Properties, Relationship, Value};
use crate::query::ExecutionResult;

/// 扩展调用的返回值
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    /// 空表示，序列化为空的响应体
    Empty,
    CypherResult(CypherResultRepresentation),
}

impl Representation {
    pub fn is_empty(&self) -> bool {
        matches!(self, Representation::Empty)
    }

    /// 序列化为 JSON；空表示返回 `None`
    pub fn serialize(&self, base_uri: &str) -> Option<JsonValue> {
        match self {
            Representation::Empty => None,
            Representation::CypherResult(result) => Some(result.to_json(base_uri)),
        }
    }
}

/// 查询结果的表示
#[derive(Debug, Clone, PartialEq)]
pub struct CypherResultRepresentation {
    result: ExecutionResult,
}

impl CypherResultRepresentation {
    pub fn new(result: ExecutionResult) -> Self {
        Self { result }
    }

    pub fn result(&self) -> &ExecutionResult {
        &self.result
    }

    pub fn to_json(&self, base_uri: &str) -> JsonValue {
        let data: Vec<JsonValue> = self
            .result
            .ordered_rows()
            .map(|row| {
                JsonValue::Array(row.into_iter().map(|v| value_to_json(v, base_uri)).collect())
            })
            .collect();

        json!({
            "columns": self.result.columns(),
            "data": data,
        })
    }
}

/// 错误表示，固定包含 `message`、`exception`、`causes` 三个字段
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRepresentation {
    pub message: String,
    pub exception: String,
    pub causes: Vec<String>,
}

impl ErrorRepresentation {
    pub fn new(message: impl Into<String>, exception: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exception: exception.into(),
            causes: Vec::new(),
        }
    }

    /// 由扩展错误构造，`causes` 为错误源链
    pub fn from_plugin_error(err: &PluginError) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: err.to_string(),
            exception: err.kind().as_str().to_string(),
            causes,
        }
    }
}

pub fn node_uri(base_uri: &str, id: u64) -> String {
    format!("{}/node/{}", base_uri, id)
}

pub fn relationship_uri(base_uri: &str, id: u64) -> String {
    format!("{}/relationship/{}", base_uri, id)
}

/// 将查询结果中的值转换为 JSON
pub fn value_to_json(value: &Value, base_uri: &str) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::from(*i),
        // NaN、无穷大无法用 JSON 表示
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::List(items) => {
            JsonValue::Array(items.iter().map(|v| value_to_json(v, base_uri)).collect())
        }
        Value::Node(node) => node_to_json(node, base_uri),
        Value::Relationship(rel) => relationship_to_json(rel, base_uri),
        Value::Path(path) => path_to_json(path, base_uri),
    }
}

fn properties_to_json(properties: &Properties, base_uri: &str) -> JsonValue {
    let map: Map<String, JsonValue> = properties
        .iter()
        .map(|(k, v)| (k.clone(), value_to_json(v, base_uri)))
        .collect();
    JsonValue::Object(map)
}

fn node_to_json(node: &Node, base_uri: &str) -> JsonValue {
    let uri = node_uri(base_uri, node.id);
    json!({
        "self": uri,
        "data": properties_to_json(&node.properties, base_uri),
        "properties": format!("{}/properties", uri),
        "outgoing_relationships": format!("{}/relationships/out", uri),
        "incoming_relationships": format!("{}/relationships/in", uri),
        "all_relationships": format!("{}/relationships/all", uri),
    })
}

fn relationship_to_json(rel: &Relationship, base_uri: &str) -> JsonValue {
    let uri = relationship_uri(base_uri, rel.id);
    json!({
        "self": uri,
        "start": node_uri(base_uri, rel.start),
        "end": node_uri(base_uri, rel.end),
        "type": rel.rel_type,
        "data": properties_to_json(&rel.properties, base_uri),
        "properties": format!("{}/properties", uri),
    })
}

fn path_to_json(path: &Path, base_uri: &str) -> JsonValue {
    let nodes: Vec<String> = path.nodes().iter().map(|n| node_uri(base_uri, n.id)).collect();
    let relationships: Vec<String> = path
        .relationships()
        .iter()
        .map(|r| relationship_uri(base_uri, r.id))
        .collect();
    json!({
        "start": node_uri(base_uri, path.start().id),
        "end": node_uri(base_uri, path.end().id),
        "length": path.length(),
        "nodes": nodes,
        "relationships": relationships,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExecutionError, StorageError, SyntaxError};

    const BASE: &str = "http://localhost:7474/db/data";

    fn named_node(id: u64, name: &str) -> Node {
        let mut properties = Properties::new();
        properties.insert("name".to_string(), Value::from(name));
        Node::new(id, properties)
    }

    #[test]
    fn test_empty_representation() {
        assert!(Representation::Empty.is_empty());
        assert_eq!(Representation::Empty.serialize(BASE), None);
    }

    #[test]
    fn test_result_columns_and_data() {
        let mut result = ExecutionResult::new(vec!["n.name?".to_string(), "n.age?".to_string()]);
        result.push_row(vec![Value::from("him"), Value::Int(25)]);
        result.push_row(vec![Value::from("you"), Value::Null]);

        let json = Representation::CypherResult(CypherResultRepresentation::new(result))
            .serialize(BASE)
            .expect("non-empty");
        assert_eq!(
            json,
            json!({
                "columns": ["n.name?", "n.age?"],
                "data": [["him", 25], ["you", null]],
            })
        );
    }

    #[test]
    fn test_node_json() {
        let json = value_to_json(&Value::Node(named_node(3, "him")), BASE);
        assert_eq!(json["self"], "http://localhost:7474/db/data/node/3");
        assert_eq!(json["data"]["name"], "him");
        assert_eq!(
            json["outgoing_relationships"],
            "http://localhost:7474/db/data/node/3/relationships/out"
        );
    }

    #[test]
    fn test_relationship_json() {
        let rel = Relationship::new(5, 1, 2, "know".to_string(), Properties::new());
        let json = value_to_json(&Value::Relationship(rel), BASE);
        assert_eq!(json["type"], "know");
        assert_eq!(json["start"], "http://localhost:7474/db/data/node/1");
        assert_eq!(json["end"], "http://localhost:7474/db/data/node/2");
    }

    #[test]
    fn test_path_json() {
        let mut path = Path::new(named_node(0, "I"));
        path.push(
            Relationship::new(0, 0, 1, "know".to_string(), Properties::new()),
            named_node(1, "you"),
        );
        let json = value_to_json(&Value::Path(path), BASE);
        assert_eq!(json["length"], 1);
        assert_eq!(json["start"], "http://localhost:7474/db/data/node/0");
        assert_eq!(json["end"], "http://localhost:7474/db/data/node/1");
        assert_eq!(json["relationships"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert_eq!(value_to_json(&Value::Float(f64::NAN), BASE), JsonValue::Null);
    }

    #[test]
    fn test_error_representation_causes() {
        let err: PluginError =
            ExecutionError::Storage(StorageError::IOError("disk".to_string())).into();
        let repr = ErrorRepresentation::from_plugin_error(&err);
        assert_eq!(repr.exception, "InternalError");
        assert_eq!(repr.causes.len(), 2);

        let err: PluginError = SyntaxError::new("期望关键字 'START'", 0).into();
        let json = serde_json::to_value(ErrorRepresentation::from_plugin_error(&err))
            .expect("serialize");
        assert_eq!(json.as_object().map(|o| o.len()), Some(3));
    }
}
