use super::types::Value;
use std::cmp::Ordering;

/// 比较运算符使用的比较
///
/// 返回 `None` 表示两个值之间不存在顺序（类型不兼容或包含 null）。
/// 整数与浮点数按数值比较。
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => None,
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Node(a), Value::Node(b)) => Some(a.id.cmp(&b.id)),
        (Value::Relationship(a), Value::Relationship(b)) => Some(a.id.cmp(&b.id)),
        _ => None,
    }
}

/// 两个值是否相等（`=` 运算符）
///
/// 任一侧为 null 时结果为 false；不同类型之间不相等。
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Path(a), Value::Path(b)) => a == b,
        _ => compare_values(left, right) == Some(Ordering::Equal),
    }
}

/// ORDER BY 使用的全序
///
/// 同类值按自然顺序，null 排在最后，不同类型之间按类型排名。
pub fn sort_order(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::List(a), Value::List(b)) => a
            .iter()
            .zip(b)
            .map(|(x, y)| sort_order(x, y))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        (Value::Path(a), Value::Path(b)) => a.length().cmp(&b.length()),
        _ => compare_values(left, right)
            .unwrap_or_else(|| type_rank(left).cmp(&type_rank(right))),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Int(_) | Value::Float(_) => 1,
        Value::String(_) => 2,
        Value::List(_) => 3,
        Value::Node(_) => 4,
        Value::Relationship(_) => 5,
        Value::Path(_) => 6,
        Value::Null => 7,
    }
}
