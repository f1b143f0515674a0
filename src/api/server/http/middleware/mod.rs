pub mod error;
pub mod logging;

pub use error::error_handling_middleware;
pub use logging::logging_middleware;
