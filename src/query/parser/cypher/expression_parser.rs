//! Cypher表达式解析器
//!
//! 优先级从低到高：OR、AND、NOT、比较、操作数

use super::ast::*;
use super::lexer::TokenType;
use super::parser_core::CypherParserCore;
use crate::core::{SyntaxError, Value};

impl CypherParserCore {
    /// 解析表达式
    pub fn parse_expression(&mut self) -> Result<Expression, SyntaxError> {
        self.parse_or_expression()
    }

    fn parse_or_expression(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_and_expression()?;
        while self.consume_if_keyword("OR") {
            let right = self.parse_and_expression()?;
            left = Expression::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and_expression(&mut self) -> Result<Expression, SyntaxError> {
        let mut left = self.parse_not_expression()?;
        while self.consume_if_keyword("AND") {
            let right = self.parse_not_expression()?;
            left = Expression::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not_expression(&mut self) -> Result<Expression, SyntaxError> {
        if self.consume_if_keyword("NOT") {
            let inner = self.parse_not_expression()?;
            return Ok(Expression::Not(Box::new(inner)));
        }
        self.parse_comparison_expression()
    }

    fn parse_comparison_expression(&mut self) -> Result<Expression, SyntaxError> {
        let left = self.parse_operand()?;

        if self.is_current_token_type(TokenType::Operator) {
            if let Some(operator) = ComparisonOperator::from_token(&self.current_token().value) {
                self.consume_token();
                let right = self.parse_operand()?;
                return Ok(Expression::Comparison {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                });
            }
        }

        Ok(left)
    }

    /// 解析操作数：字面量、标识符、属性访问或括号表达式
    fn parse_operand(&mut self) -> Result<Expression, SyntaxError> {
        let token = self.current_token().clone();

        match token.token_type {
            TokenType::LiteralString => {
                self.consume_token();
                Ok(Expression::Literal(Value::String(token.value)))
            }
            TokenType::LiteralNumber => {
                self.consume_token();
                parse_number(&token.value, false, token.position)
            }
            TokenType::Operator if token.value == "-" => {
                self.consume_token();
                let number = self.current_token().clone();
                if number.token_type != TokenType::LiteralNumber {
                    return Err(self.error_here("'-' 之后期望数字"));
                }
                self.consume_token();
                parse_number(&number.value, true, number.position)
            }
            TokenType::Keyword => match token.value.as_str() {
                "TRUE" => {
                    self.consume_token();
                    Ok(Expression::Literal(Value::Bool(true)))
                }
                "FALSE" => {
                    self.consume_token();
                    Ok(Expression::Literal(Value::Bool(false)))
                }
                "NULL" => {
                    self.consume_token();
                    Ok(Expression::Literal(Value::Null))
                }
                _ => Err(self.error_here("期望表达式")),
            },
            TokenType::Identifier => {
                let identifier = self.parse_identifier()?;
                if self.consume_if_value(".") {
                    let key = self.parse_name()?;
                    let optional = self.consume_if_value("?");
                    Ok(Expression::Property {
                        identifier,
                        key,
                        optional,
                    })
                } else {
                    Ok(Expression::Identifier(identifier))
                }
            }
            TokenType::Punctuation if token.value == "(" => {
                self.consume_token();
                let inner = self.parse_expression()?;
                self.expect_token_value(")")?;
                Ok(inner)
            }
            _ => Err(self.error_here("期望表达式")),
        }
    }
}

fn parse_number(text: &str, negative: bool, position: usize) -> Result<Expression, SyntaxError> {
    let literal = if text.contains('.') {
        text.parse::<f64>()
            .map(|f| Value::Float(if negative { -f } else { f }))
            .ok()
    } else {
        let signed = if negative { format!("-{}", text) } else { text.to_string() };
        signed.parse::<i64>().map(Value::Int).ok()
    };

    literal
        .map(Expression::Literal)
        .ok_or_else(|| SyntaxError::new(format!("无效的数字: '{}'", text), position))
}
