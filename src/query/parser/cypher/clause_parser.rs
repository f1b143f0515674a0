//! Cypher子句解析器
//!
//! 负责解析 START、RETURN、ORDER BY、SKIP、LIMIT，以及整条查询的子句顺序

use super::ast::*;
use super::lexer::TokenType;
use super::parser_core::CypherParserCore;
use crate::core::SyntaxError;

impl CypherParserCore {
    /// 解析整条查询
    pub fn parse_query(&mut self) -> Result<CypherQuery, SyntaxError> {
        let start = self.parse_start_clause()?;

        let patterns = if self.consume_if_keyword("MATCH") {
            self.parse_patterns()?
        } else {
            Vec::new()
        };

        let filter = if self.consume_if_keyword("WHERE") {
            Some(self.parse_expression()?)
        } else {
            None
        };

        let return_clause = self.parse_return_clause()?;

        let order_by = if self.consume_if_keyword("ORDER") {
            self.expect_keyword("BY")?;
            self.parse_sort_items()?
        } else {
            Vec::new()
        };

        let skip = if self.consume_if_keyword("SKIP") {
            Some(self.parse_unsigned_integer()? as usize)
        } else {
            None
        };

        let limit = if self.consume_if_keyword("LIMIT") {
            Some(self.parse_unsigned_integer()? as usize)
        } else {
            None
        };

        self.consume_if_value(";");
        if !self.is_eof() {
            return Err(self.error_here("期望查询结束"));
        }

        Ok(CypherQuery {
            start,
            patterns,
            filter,
            return_clause,
            order_by,
            skip,
            limit,
        })
    }

    /// 解析START子句
    pub fn parse_start_clause(&mut self) -> Result<Vec<StartItem>, SyntaxError> {
        self.expect_keyword("START")?;

        let mut items = vec![self.parse_start_item()?];
        while self.consume_if_value(",") {
            items.push(self.parse_start_item()?);
        }
        Ok(items)
    }

    /// `x = (1, 2)`、`x = node(*)`、`r = relationship(3)`
    fn parse_start_item(&mut self) -> Result<StartItem, SyntaxError> {
        let identifier = self.parse_identifier()?;
        self.expect_token_value("=")?;

        let lookup = if self.is_current_token_value("(") {
            StartLookup::Nodes(self.parse_id_selector()?)
        } else if self.is_current_token_type(TokenType::Identifier) {
            let kind = self.current_token().value.to_lowercase();
            match kind.as_str() {
                "node" => {
                    self.consume_token();
                    StartLookup::Nodes(self.parse_id_selector()?)
                }
                "relationship" | "rel" => {
                    self.consume_token();
                    StartLookup::Relationships(self.parse_id_selector()?)
                }
                _ => return Err(self.error_here("期望 'node' 或 'relationship'")),
            }
        } else {
            return Err(self.error_here("期望起始节点"));
        };

        Ok(StartItem { identifier, lookup })
    }

    /// `(1, 2, 3)` 或 `(*)`
    fn parse_id_selector(&mut self) -> Result<IdSelector, SyntaxError> {
        self.expect_token_value("(")?;

        if self.consume_if_value("*") {
            self.expect_token_value(")")?;
            return Ok(IdSelector::All);
        }

        let mut ids = vec![self.parse_unsigned_integer()?];
        while self.consume_if_value(",") {
            ids.push(self.parse_unsigned_integer()?);
        }
        self.expect_token_value(")")?;
        Ok(IdSelector::Ids(ids))
    }

    /// 解析RETURN子句
    pub fn parse_return_clause(&mut self) -> Result<ReturnClause, SyntaxError> {
        self.expect_keyword("RETURN")?;
        let distinct = self.consume_if_keyword("DISTINCT");

        let mut items = vec![self.parse_return_item()?];
        while self.consume_if_value(",") {
            items.push(self.parse_return_item()?);
        }

        Ok(ReturnClause { distinct, items })
    }

    fn parse_return_item(&mut self) -> Result<ReturnItem, SyntaxError> {
        let expression = self.parse_expression()?;
        let alias = if self.consume_if_keyword("AS") {
            Some(self.parse_name()?)
        } else {
            None
        };
        Ok(ReturnItem { expression, alias })
    }

    fn parse_sort_items(&mut self) -> Result<Vec<SortItem>, SyntaxError> {
        let mut items = Vec::new();
        loop {
            let expression = self.parse_expression()?;
            let descending = if self.consume_if_keyword("DESC") {
                true
            } else {
                self.consume_if_keyword("ASC");
                false
            };
            items.push(SortItem {
                expression,
                descending,
            });

            if !self.consume_if_value(",") {
                break;
            }
        }
        Ok(items)
    }
}
