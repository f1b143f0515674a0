//! 存储层错误类型
//!
//! 涵盖图存储读写以及图数据文件加载相关的错误

use thiserror::Error;

/// 存储层结果类型
pub type StorageResult<T> = Result<T, StorageError>;

/// 存储层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("节点未找到: {0}")]
    NodeNotFound(u64),
    #[error("关系未找到: {0}")]
    RelationshipNotFound(u64),
    #[error("无效输入: {0}")]
    InvalidInput(String),
    #[error("IO错误: {0}")]
    IOError(String),
    #[error("解析错误: {0}")]
    ParseError(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::IOError(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::ParseError(err.to_string())
    }
}
