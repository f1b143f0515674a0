//! Cypher表达式定义

use std::fmt;

use crate::core::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(Self::Equal),
            "<>" | "!=" => Some(Self::NotEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanOrEqual),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterThanOrEqual),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

/// Cypher表达式
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// 标量字面量
    Literal(Value),
    Identifier(String),
    /// `n.name`，带 `?` 时属性缺失返回 null
    Property {
        identifier: String,
        key: String,
        optional: bool,
    },
    Comparison {
        operator: ComparisonOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

impl Expression {
    pub fn property(identifier: &str, key: &str, optional: bool) -> Self {
        Expression::Property {
            identifier: identifier.to_string(),
            key: key.to_string(),
            optional,
        }
    }
}

// 文本形式即 RETURN 列名
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => match value {
                Value::String(s) => write!(f, "\"{}\"", s),
                Value::Int(i) => write!(f, "{}", i),
                Value::Float(x) => write!(f, "{}", x),
                Value::Bool(b) => write!(f, "{}", b),
                _ => write!(f, "null"),
            },
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Property {
                identifier,
                key,
                optional,
            } => {
                write!(f, "{}.{}", identifier, key)?;
                if *optional {
                    write!(f, "?")?;
                }
                Ok(())
            }
            Expression::Comparison {
                operator,
                left,
                right,
            } => write!(f, "{} {} {}", left, operator.symbol(), right),
            Expression::And(left, right) => write!(f, "({} AND {})", left, right),
            Expression::Or(left, right) => write!(f, "({} OR {})", left, right),
            Expression::Not(inner) => write!(f, "NOT {}", inner),
        }
    }
}
