// Cypher执行器模块
pub mod cypher;
pub mod result;

pub use cypher::ExecutionEngine;
pub use result::ExecutionResult;
