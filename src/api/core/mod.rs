//! API 核心层 - 与传输层无关的部分
//!
//! 扩展调用的错误类型，被 HTTP 层和命令行共同使用。

pub mod error;

pub use error::{ErrorKind, PluginError, PluginResult};
