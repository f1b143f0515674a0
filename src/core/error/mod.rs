//! 错误类型
//!
//! 存储层和查询层各自使用 `thiserror` 枚举，
//! 查询执行错误通过 `#[from]` 保留底层存储错误。

pub mod query;
pub mod storage;

pub use query::{ExecutionError, ExecutionResultOf, SyntaxError};
pub use storage::{StorageError, StorageResult};
