//! Cypher解析器核心模块
//!
//! 提供解析器的基础结构和通用方法

use super::lexer::{CypherLexer, Token, TokenType};
use crate::core::SyntaxError;

/// Cypher解析器核心结构
#[derive(Debug)]
pub struct CypherParserCore {
    pub tokens: Vec<Token>,
    pub current_token_index: usize,
}

impl CypherParserCore {
    /// 对输入做词法分析并创建解析器
    pub fn new(input: &str) -> Result<Self, SyntaxError> {
        let tokens = CypherLexer::new(input).tokenize()?;
        Ok(Self {
            tokens,
            current_token_index: 0,
        })
    }

    /// 获取当前标记
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.current_token_index]
    }

    /// 查看之后第 `offset` 个标记
    pub fn peek_token(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current_token_index + offset)
    }

    /// 消费当前标记并移动到下一个
    pub fn consume_token(&mut self) -> Token {
        let token = self.tokens[self.current_token_index].clone();
        if self.current_token_index < self.tokens.len() - 1 {
            self.current_token_index += 1;
        }
        token
    }

    /// 检查当前标记是否为指定类型
    pub fn is_current_token_type(&self, token_type: TokenType) -> bool {
        self.current_token().token_type == token_type
    }

    /// 检查当前标记是否为指定值（字符串字面量除外）
    pub fn is_current_token_value(&self, value: &str) -> bool {
        let token = self.current_token();
        token.token_type != TokenType::LiteralString && token.value == value
    }

    /// 检查当前标记是否为关键字
    pub fn is_current_keyword(&self, keyword: &str) -> bool {
        self.is_current_token_type(TokenType::Keyword) && self.current_token().value == keyword
    }

    /// 当前标记为指定值时消费它
    pub fn consume_if_value(&mut self, value: &str) -> bool {
        if self.is_current_token_value(value) {
            self.consume_token();
            true
        } else {
            false
        }
    }

    /// 当前标记为指定关键字时消费它
    pub fn consume_if_keyword(&mut self, keyword: &str) -> bool {
        if self.is_current_keyword(keyword) {
            self.consume_token();
            true
        } else {
            false
        }
    }

    /// 期望当前标记为指定值，否则返回错误
    pub fn expect_token_value(&mut self, value: &str) -> Result<Token, SyntaxError> {
        if self.is_current_token_value(value) {
            Ok(self.consume_token())
        } else {
            Err(self.error_here(format!("期望 '{}'", value)))
        }
    }

    /// 期望当前标记为指定关键字，否则返回错误
    pub fn expect_keyword(&mut self, keyword: &str) -> Result<Token, SyntaxError> {
        if self.is_current_keyword(keyword) {
            Ok(self.consume_token())
        } else {
            Err(self.error_here(format!("期望关键字 '{}'", keyword)))
        }
    }

    /// 检查是否到达输入末尾
    pub fn is_eof(&self) -> bool {
        self.is_current_token_type(TokenType::EOF)
    }

    /// 解析标识符
    pub fn parse_identifier(&mut self) -> Result<String, SyntaxError> {
        if self.is_current_token_type(TokenType::Identifier) {
            Ok(self.consume_token().value)
        } else {
            Err(self.error_here("期望标识符"))
        }
    }

    /// 解析属性键或别名，关键字按源文本接受
    pub fn parse_name(&mut self) -> Result<String, SyntaxError> {
        match self.current_token().token_type {
            TokenType::Identifier => Ok(self.consume_token().value),
            TokenType::Keyword => Ok(self.consume_token().text),
            _ => Err(self.error_here("期望名称")),
        }
    }

    /// 解析非负整数（节点 ID、SKIP、LIMIT）
    pub fn parse_unsigned_integer(&mut self) -> Result<u64, SyntaxError> {
        if !self.is_current_token_type(TokenType::LiteralNumber) {
            return Err(self.error_here("期望整数"));
        }
        let token = self.consume_token();
        token
            .value
            .parse()
            .map_err(|_| SyntaxError::new(format!("无效的整数: '{}'", token.value), token.position))
    }

    /// 在当前位置构造语法错误，附带实际遇到的标记
    pub fn error_here<T: std::fmt::Display>(&self, message: T) -> SyntaxError {
        let token = self.current_token();
        let found = if token.token_type == TokenType::EOF {
            "输入结束".to_string()
        } else {
            format!("'{}'", token.value)
        };
        SyntaxError::new(format!("{}，但得到 {}", message, found), token.position)
    }
}
