//! 查询层错误类型
//!
//! 涵盖查询解析和执行过程中的错误

use std::fmt;

use thiserror::Error;

use crate::core::error::storage::StorageError;

/// 查询文本不符合语法
///
/// `position` 是出错位置的字符偏移（从 0 开始）。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (位置 {position})")]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    pub fn new<T: fmt::Display>(message: T, position: usize) -> Self {
        Self {
            message: message.to_string(),
            position,
        }
    }
}

/// 执行结果类型别名
pub type ExecutionResultOf<T> = Result<T, ExecutionError>;

/// 查询执行错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("节点不存在: {0}")]
    NodeNotFound(u64),

    #[error("关系不存在: {0}")]
    RelationshipNotFound(u64),

    #[error("属性不存在: {identifier}.{key}")]
    PropertyNotFound { identifier: String, key: String },

    #[error("未绑定的标识符: {0}")]
    UnboundIdentifier(String),

    #[error("标识符重复定义: {0}")]
    DuplicateIdentifier(String),

    #[error("模式未连接到任何已绑定的节点: {0}")]
    UnboundPattern(String),

    #[error("类型错误: {0}")]
    TypeMismatch(String),

    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
}

impl ExecutionError {
    /// 是否为服务端内部故障（而非查询本身的问题）
    pub fn is_internal(&self) -> bool {
        matches!(self, ExecutionError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new("期望关键字 'RETURN'", 12);
        assert_eq!(err.to_string(), "期望关键字 'RETURN' (位置 12)");
    }

    #[test]
    fn test_storage_error_is_internal() {
        let err: ExecutionError = StorageError::IOError("disk".to_string()).into();
        assert!(err.is_internal());
        assert!(!ExecutionError::NodeNotFound(1).is_internal());
    }
}
