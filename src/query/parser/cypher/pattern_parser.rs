//! Cypher模式解析器
//!
//! 同时支持两种写法：`(a)-[:know]->(b)`，以及整条路径包在一对括号中、
//! 节点只写标识符的 `(a--b)`

use super::ast::*;
use super::lexer::TokenType;
use super::parser_core::CypherParserCore;
use crate::core::{Direction, SyntaxError};

impl CypherParserCore {
    /// 解析逗号分隔的模式列表
    pub fn parse_patterns(&mut self) -> Result<Vec<Pattern>, SyntaxError> {
        let mut patterns = vec![self.parse_pattern()?];
        while self.consume_if_value(",") {
            patterns.push(self.parse_pattern()?);
        }
        Ok(patterns)
    }

    /// 解析单个模式，可带路径名 `p = ...`
    pub fn parse_pattern(&mut self) -> Result<Pattern, SyntaxError> {
        let path_name = if self.is_current_token_type(TokenType::Identifier)
            && self
                .peek_token(1)
                .is_some_and(|t| t.token_type == TokenType::Operator && t.value == "=")
        {
            let name = self.parse_identifier()?;
            self.consume_token(); // 消费 '='
            Some(name)
        } else {
            None
        };

        let wrapped = self.is_wrapped_path();
        if wrapped {
            self.consume_token(); // 消费外层 '('
        }

        let start = self.parse_node_pattern()?;
        let mut steps = Vec::new();
        while self.is_current_token_value("-") || self.is_current_token_value("<-") {
            let relationship = self.parse_relationship_pattern()?;
            let node = self.parse_node_pattern()?;
            steps.push(PatternStep { relationship, node });
        }

        if wrapped {
            self.expect_token_value(")")?;
        }
        if steps.is_empty() && path_name.is_none() {
            return Err(self.error_here("模式中至少需要一个关系"));
        }

        Ok(Pattern {
            path_name,
            start,
            steps,
        })
    }

    /// `(x--friend)`：括号内的标识符后面紧跟关系而不是 ')'
    fn is_wrapped_path(&self) -> bool {
        if !self.is_current_token_value("(") {
            return false;
        }
        match (self.peek_token(1), self.peek_token(2)) {
            (Some(ident), Some(next)) if ident.token_type == TokenType::Identifier => {
                next.token_type == TokenType::Operator && (next.value == "-" || next.value == "<-")
            }
            _ => false,
        }
    }

    /// 解析节点模式：`(n)`、`()` 或裸标识符 `n`
    pub fn parse_node_pattern(&mut self) -> Result<NodePattern, SyntaxError> {
        if self.consume_if_value("(") {
            let identifier = if self.is_current_token_type(TokenType::Identifier) {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            self.expect_token_value(")")?;
            Ok(NodePattern { identifier })
        } else if self.is_current_token_type(TokenType::Identifier) {
            Ok(NodePattern {
                identifier: Some(self.parse_identifier()?),
            })
        } else {
            Err(self.error_here("期望节点模式"))
        }
    }

    /// 解析关系模式：`-->`、`<--`、`--`、`-[r:know|like]->`
    pub fn parse_relationship_pattern(&mut self) -> Result<RelationshipPattern, SyntaxError> {
        let incoming = if self.consume_if_value("<-") {
            true
        } else {
            self.expect_token_value("-")?;
            false
        };

        let mut identifier = None;
        let mut types = Vec::new();
        if self.consume_if_value("[") {
            if self.is_current_token_type(TokenType::Identifier) {
                identifier = Some(self.parse_identifier()?);
            }
            if self.consume_if_value(":") {
                types.push(self.parse_identifier()?);
                while self.consume_if_value("|") {
                    types.push(self.parse_identifier()?);
                }
            }
            self.expect_token_value("]")?;
        }

        let outgoing = if self.consume_if_value("->") {
            true
        } else {
            self.expect_token_value("-")?;
            false
        };

        let direction = match (incoming, outgoing) {
            (true, true) => return Err(self.error_here("关系不能同时指向两端")),
            (true, false) => Direction::Incoming,
            (false, true) => Direction::Outgoing,
            (false, false) => Direction::Both,
        };

        Ok(RelationshipPattern {
            identifier,
            types,
            direction,
        })
    }
}
