//! 网络服务层
//!
//! 提供基于 HTTP 的扩展调用接口

pub mod http;

pub use http::{create_router, AppState, HttpError, HttpServer};
