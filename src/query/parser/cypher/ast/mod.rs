//! Cypher AST模块
//!
//! 解析结果即编译后的查询，由执行引擎直接消费

pub mod clauses;
pub mod expressions;
pub mod patterns;
pub mod query_types;

// 重新导出主要类型
pub use clauses::{IdSelector, ReturnClause, ReturnItem, SortItem, StartItem, StartLookup};
pub use expressions::{ComparisonOperator, Expression};
pub use patterns::{NodePattern, Pattern, PatternStep, RelationshipPattern};
pub use query_types::CypherQuery;
