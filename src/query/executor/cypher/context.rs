//! Cypher执行器上下文
//!
//! 一行匹配结果：标识符到值的绑定

use crate::core::{ExecutionError, Node, Value};
use std::collections::HashMap;

/// 单行的变量绑定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    variables: HashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// 绑定变量，已存在时覆盖
    pub fn bind(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    /// 取得绑定为节点的变量
    ///
    /// 未绑定时返回 `Ok(None)`；绑定了非节点值时报类型错误。
    pub fn node(&self, name: &str) -> Result<Option<&Node>, ExecutionError> {
        match self.variables.get(name) {
            None => Ok(None),
            Some(Value::Node(node)) => Ok(Some(node)),
            Some(other) => Err(ExecutionError::TypeMismatch(format!(
                "'{}' 在模式中用作节点，但绑定的是 {}",
                name,
                other.type_name()
            ))),
        }
    }
}
