//! Cypher表达式评估器

use super::context::Bindings;
use crate::core::value::{compare_values, values_equal};
use crate::core::{ExecutionError, Value};
use crate::query::parser::cypher::ast::{ComparisonOperator, Expression};
use std::cmp::Ordering;

/// Cypher表达式评估器
#[derive(Debug, Default, Clone, Copy)]
pub struct CypherExpressionEvaluator;

impl CypherExpressionEvaluator {
    /// 在一行绑定上评估表达式
    pub fn evaluate(&self, expr: &Expression, row: &Bindings) -> Result<Value, ExecutionError> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Identifier(name) => row
                .get(name)
                .cloned()
                .ok_or_else(|| ExecutionError::UnboundIdentifier(name.clone())),
            Expression::Property {
                identifier,
                key,
                optional,
            } => self.evaluate_property(identifier, key, *optional, row),
            Expression::Comparison {
                operator,
                left,
                right,
            } => {
                let left = self.evaluate(left, row)?;
                let right = self.evaluate(right, row)?;
                Self::compare(*operator, &left, &right).map(Value::Bool)
            }
            Expression::And(left, right) => {
                // 短路求值
                if !self.is_true(left, row)? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.is_true(right, row)?))
            }
            Expression::Or(left, right) => {
                if self.is_true(left, row)? {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.is_true(right, row)?))
            }
            Expression::Not(inner) => Ok(Value::Bool(!self.is_true(inner, row)?)),
        }
    }

    /// 将表达式作为谓词求值，null 视为 false
    pub fn is_true(&self, expr: &Expression, row: &Bindings) -> Result<bool, ExecutionError> {
        match self.evaluate(expr, row)? {
            Value::Bool(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(ExecutionError::TypeMismatch(format!(
                "谓词 '{}' 需要布尔值，但得到 {}",
                expr,
                other.type_name()
            ))),
        }
    }

    fn evaluate_property(
        &self,
        identifier: &str,
        key: &str,
        optional: bool,
        row: &Bindings,
    ) -> Result<Value, ExecutionError> {
        let target = row
            .get(identifier)
            .ok_or_else(|| ExecutionError::UnboundIdentifier(identifier.to_string()))?;

        let property = match target {
            Value::Node(node) => node.get_property(key),
            Value::Relationship(rel) => rel.get_property(key),
            Value::Null if optional => None,
            other => {
                return Err(ExecutionError::TypeMismatch(format!(
                    "无法在 {} 上访问属性 '{}'",
                    other.type_name(),
                    key
                )))
            }
        };

        match property {
            Some(value) => Ok(value.clone()),
            None if optional => Ok(Value::Null),
            None => Err(ExecutionError::PropertyNotFound {
                identifier: identifier.to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// 比较运算；涉及 null 时结果为 false
    fn compare(
        operator: ComparisonOperator,
        left: &Value,
        right: &Value,
    ) -> Result<bool, ExecutionError> {
        if left.is_null() || right.is_null() {
            return Ok(false);
        }

        let ordering = || {
            compare_values(left, right).ok_or_else(|| {
                ExecutionError::TypeMismatch(format!(
                    "无法比较 {} 与 {}",
                    left.type_name(),
                    right.type_name()
                ))
            })
        };

        Ok(match operator {
            ComparisonOperator::Equal => values_equal(left, right),
            ComparisonOperator::NotEqual => !values_equal(left, right),
            ComparisonOperator::LessThan => ordering()? == Ordering::Less,
            ComparisonOperator::LessThanOrEqual => ordering()? != Ordering::Greater,
            ComparisonOperator::GreaterThan => ordering()? == Ordering::Greater,
            ComparisonOperator::GreaterThanOrEqual => ordering()? != Ordering::Less,
        })
    }

    /// 获取表达式中使用的所有变量
    pub fn get_cypher_variables(&self, expr: &Expression) -> Vec<String> {
        let mut variables = Vec::new();
        Self::collect_variables(expr, &mut variables);
        variables
    }

    fn collect_variables(expr: &Expression, variables: &mut Vec<String>) {
        match expr {
            Expression::Literal(_) => {}
            Expression::Identifier(name) | Expression::Property { identifier: name, .. } => {
                if !variables.contains(name) {
                    variables.push(name.clone());
                }
            }
            Expression::Comparison { left, right, .. }
            | Expression::And(left, right)
            | Expression::Or(left, right) => {
                Self::collect_variables(left, variables);
                Self::collect_variables(right, variables);
            }
            Expression::Not(inner) => Self::collect_variables(inner, variables),
        }
    }
}
