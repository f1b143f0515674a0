//! Cypher词法分析器

use crate::core::SyntaxError;

/// Cypher词法分析器
#[derive(Debug)]
pub struct CypherLexer {
    input: Vec<char>,
    position: usize,
}

/// 词法标记
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    /// 规范化后的值，关键字为大写
    pub value: String,
    /// 源文本
    pub text: String,
    pub position: usize,
}

/// 标记类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Keyword,        // START, MATCH, RETURN, etc.
    Identifier,     // 变量名、关系类型名、属性名
    LiteralString,  // 字符串字面量
    LiteralNumber,  // 数字字面量
    Operator,       // -, ->, <-, =, <>, <, >, *, etc.
    Punctuation,    // (, ), [, ], :, ,, ., ?, |
    EOF,            // 文件结束
}

const KEYWORDS: &[&str] = &[
    "START", "MATCH", "WHERE", "RETURN", "DISTINCT", "ORDER", "BY", "ASC", "DESC", "SKIP",
    "LIMIT", "AND", "OR", "NOT", "TRUE", "FALSE", "NULL", "AS",
];

impl CypherLexer {
    /// 创建新的Cypher词法分析器
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// 词法分析
    pub fn tokenize(&mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;
            if self.is_eof() {
                break;
            }
            tokens.push(self.next_token()?);
        }

        // 添加EOF标记
        tokens.push(Token {
            token_type: TokenType::EOF,
            value: String::new(),
            text: String::new(),
            position: self.position,
        });

        Ok(tokens)
    }

    /// 获取下一个标记
    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        let position = self.position;
        let ch = match self.peek_char() {
            Some(ch) => ch,
            None => return Err(SyntaxError::new("意外的输入结束", position)),
        };

        let (token_type, value) = match ch {
            // 字符串字面量
            '"' | '\'' => (TokenType::LiteralString, self.read_string(ch)?),

            // 数字字面量
            '0'..='9' => (TokenType::LiteralNumber, self.read_number()),

            // 反引号标识符
            '`' => (TokenType::Identifier, self.read_quoted_identifier()?),

            // 标识符或关键字
            c if c.is_alphabetic() || c == '_' => {
                let value = self.read_identifier();
                if Self::is_keyword(&value) {
                    (TokenType::Keyword, value.to_uppercase())
                } else {
                    (TokenType::Identifier, value)
                }
            }

            // 标点符号
            '(' | ')' | '[' | ']' | ':' | ',' | '.' | '?' | '|' | ';' => {
                self.consume_char();
                (TokenType::Punctuation, ch.to_string())
            }

            // 操作符
            '-' | '=' | '<' | '>' | '!' | '*' | '+' | '/' => {
                (TokenType::Operator, self.read_operator(position)?)
            }

            _ => return Err(SyntaxError::new(format!("无法识别的字符: '{}'", ch), position)),
        };

        Ok(Token {
            token_type,
            value,
            text: self.input[position..self.position].iter().collect(),
            position,
        })
    }

    /// 读取字符串字面量
    fn read_string(&mut self, quote: char) -> Result<String, SyntaxError> {
        let start = self.position;
        self.consume_char();
        let mut string = String::new();

        loop {
            match self.peek_char() {
                None => return Err(SyntaxError::new("未结束的字符串字面量", start)),
                Some(ch) if ch == quote => {
                    self.consume_char();
                    return Ok(string);
                }
                Some('\\') => {
                    self.consume_char();
                    string.push(self.parse_escape_sequence()?);
                }
                Some(ch) => {
                    string.push(ch);
                    self.consume_char();
                }
            }
        }
    }

    /// 解析转义序列
    fn parse_escape_sequence(&mut self) -> Result<char, SyntaxError> {
        let position = self.position;
        let escaped = match self.peek_char() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            Some(c) => return Err(SyntaxError::new(format!("无效的转义序列: '\\{}'", c), position)),
            None => return Err(SyntaxError::new("未结束的字符串字面量", position)),
        };
        self.consume_char();
        Ok(escaped)
    }

    /// 读取数字字面量（整数或小数）
    fn read_number(&mut self) -> String {
        let mut number = String::new();
        let mut has_decimal = false;

        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.consume_char();
            } else if ch == '.'
                && !has_decimal
                && self.peek_next_char().is_some_and(|c| c.is_ascii_digit())
            {
                number.push(ch);
                has_decimal = true;
                self.consume_char();
            } else {
                break;
            }
        }

        number
    }

    /// 读取标识符
    fn read_identifier(&mut self) -> String {
        let mut identifier = String::new();

        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.consume_char();
            } else {
                break;
            }
        }

        identifier
    }

    fn read_quoted_identifier(&mut self) -> Result<String, SyntaxError> {
        let start = self.position;
        self.consume_char();
        let mut identifier = String::new();

        loop {
            match self.peek_char() {
                None => return Err(SyntaxError::new("未结束的反引号标识符", start)),
                Some('`') => {
                    self.consume_char();
                    break;
                }
                Some(ch) => {
                    identifier.push(ch);
                    self.consume_char();
                }
            }
        }

        if identifier.is_empty() {
            return Err(SyntaxError::new("标识符不能为空", start));
        }
        Ok(identifier)
    }

    /// 读取操作符
    fn read_operator(&mut self, position: usize) -> Result<String, SyntaxError> {
        let first_char = match self.peek_char() {
            Some(ch) => ch,
            None => return Err(SyntaxError::new("意外的输入结束", position)),
        };
        self.consume_char();

        // 检查多字符操作符
        let operator = match (first_char, self.peek_char()) {
            ('-', Some('>')) => "->",
            // `a<-1` 是比较而不是关系箭头
            ('<', Some('-')) if !self.peek_next_char().is_some_and(|c| c.is_ascii_digit()) => "<-",
            ('<', Some('>')) => "<>",
            ('<', Some('=')) => "<=",
            ('>', Some('=')) => ">=",
            ('!', Some('=')) => "!=",
            ('!', _) => return Err(SyntaxError::new("无法识别的字符: '!'", position)),
            _ => return Ok(first_char.to_string()),
        };
        self.consume_char();
        Ok(operator.to_string())
    }

    /// 跳过空白字符和注释
    fn skip_whitespace_and_comments(&mut self) -> Result<(), SyntaxError> {
        loop {
            match (self.peek_char(), self.peek_next_char()) {
                (Some(ch), _) if ch.is_whitespace() => self.consume_char(),
                (Some('/'), Some('/')) => {
                    while let Some(ch) = self.peek_char() {
                        if ch == '\n' {
                            break;
                        }
                        self.consume_char();
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.position;
                    self.consume_char();
                    self.consume_char();
                    loop {
                        match (self.peek_char(), self.peek_next_char()) {
                            (Some('*'), Some('/')) => {
                                self.consume_char();
                                self.consume_char();
                                break;
                            }
                            (Some(_), _) => self.consume_char(),
                            (None, _) => {
                                return Err(SyntaxError::new("未结束的多行注释", start));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// 检查是否为关键字
    fn is_keyword(word: &str) -> bool {
        KEYWORDS.contains(&word.to_uppercase().as_str())
    }

    // 辅助方法
    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_next_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn consume_char(&mut self) {
        self.position += 1;
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }
}
