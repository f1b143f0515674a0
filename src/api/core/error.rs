//! API 核心层错误类型
//!
//! 与传输层无关的扩展调用错误

use thiserror::Error;

use crate::core::{ExecutionError, SyntaxError};

/// 错误类别，序列化到错误表示的 `exception` 字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Execution,
    BadInput,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Execution => "ExecutionError",
            ErrorKind::BadInput => "BadInputError",
            ErrorKind::Internal => "InternalError",
        }
    }
}

/// 扩展调用错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PluginError {
    #[error("语法错误: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("执行错误: {0}")]
    Execution(#[from] ExecutionError),

    #[error("无效的参数: {0}")]
    InvalidParameter(String),
}

/// 扩展调用结果类型
pub type PluginResult<T> = Result<T, PluginError>;

impl PluginError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PluginError::Syntax(_) => ErrorKind::Syntax,
            PluginError::Execution(e) if e.is_internal() => ErrorKind::Internal,
            PluginError::Execution(_) => ErrorKind::Execution,
            PluginError::InvalidParameter(_) => ErrorKind::BadInput,
        }
    }
}
