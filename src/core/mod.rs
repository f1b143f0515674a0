pub mod error;
pub mod value;
pub mod vertex_edge_path;

// 错误和结果类型
pub use error::{ExecutionError, StorageError, StorageResult, SyntaxError};

// 核心数据类型
pub use value::Value;
pub use vertex_edge_path::{Direction, Node, Path, Properties, Relationship};
