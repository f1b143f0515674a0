//! Cypher查询解析器模块
//!
//! 词法分析 + 递归下降解析，产出 `CypherQuery`

pub mod ast;
pub mod lexer;
pub mod parser;

mod clause_parser;
mod expression_parser;
mod parser_core;
mod pattern_parser;

// 重新导出主要类型
pub use ast::CypherQuery;
pub use lexer::CypherLexer;
pub use parser::CypherParser;
