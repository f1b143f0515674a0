//! Cypher子句定义

use super::expressions::Expression;

/// START 子句中的一项：`x = (1, 2)`
#[derive(Debug, Clone, PartialEq)]
pub struct StartItem {
    pub identifier: String,
    pub lookup: StartLookup,
}

/// 起始实体的查找方式
#[derive(Debug, Clone, PartialEq)]
pub enum StartLookup {
    Nodes(IdSelector),
    Relationships(IdSelector),
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdSelector {
    Ids(Vec<u64>),
    All,
}

/// RETURN 子句
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnClause {
    pub distinct: bool,
    pub items: Vec<ReturnItem>,
}

impl ReturnClause {
    /// 结果列名，按声明顺序
    pub fn column_names(&self) -> Vec<String> {
        self.items.iter().map(ReturnItem::column_name).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnItem {
    pub expression: Expression,
    pub alias: Option<String>,
}

impl ReturnItem {
    /// 别名优先，否则为表达式文本
    pub fn column_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => self.expression.to_string(),
        }
    }
}

/// ORDER BY 中的一项
#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    pub expression: Expression,
    pub descending: bool,
}
