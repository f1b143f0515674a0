//! HTTP 服务模块
//!
//! 以 HTTP 协议暴露服务端扩展

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

pub use error::HttpError;
pub use router::create_router;
pub use server::HttpServer;
pub use state::AppState;
