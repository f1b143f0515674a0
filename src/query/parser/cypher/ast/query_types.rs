//! 编译后的查询

use super::clauses::{ReturnClause, SortItem, StartItem};
use super::expressions::Expression;
use super::patterns::Pattern;

/// 一条完整的 Cypher 查询
#[derive(Debug, Clone, PartialEq)]
pub struct CypherQuery {
    pub start: Vec<StartItem>,
    pub patterns: Vec<Pattern>,
    pub filter: Option<Expression>,
    pub return_clause: ReturnClause,
    pub order_by: Vec<SortItem>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}
