//! Cypher解析器
//!
//! 对外的解析入口：查询文本 -> `CypherQuery`

use super::ast::CypherQuery;
use super::parser_core::CypherParserCore;
use crate::core::SyntaxError;

/// Cypher解析器
///
/// 无状态，每次解析都创建新的解析核心。
#[derive(Debug, Default, Clone, Copy)]
pub struct CypherParser;

impl CypherParser {
    /// 创建新的Cypher解析器
    pub fn new() -> Self {
        Self
    }

    /// 解析Cypher查询
    pub fn parse(&self, query: &str) -> Result<CypherQuery, SyntaxError> {
        let mut core = CypherParserCore::new(query)?;
        core.parse_query()
    }
}
