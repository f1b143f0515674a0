//! Cypher查询执行器模块
//!
//! 在图句柄上执行已解析的 `CypherQuery`

pub mod context;
pub mod engine;
pub mod expression_evaluator;
pub mod matcher;

// 重新导出主要类型
pub use context::Bindings;
pub use engine::ExecutionEngine;
pub use expression_evaluator::CypherExpressionEvaluator;
pub use matcher::PatternMatcher;
