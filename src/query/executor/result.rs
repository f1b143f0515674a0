//! 查询执行结果

use crate::core::Value;
use std::collections::HashMap;

static NULL: Value = Value::Null;

/// 一次查询的执行结果
///
/// 列名保持 RETURN 子句中的顺序，每一行是列名到值的映射。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    columns: Vec<String>,
    rows: Vec<HashMap<String, Value>>,
}

impl ExecutionResult {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 按列顺序追加一行
    pub fn push_row(&mut self, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.columns.len());
        let row = self.columns.iter().cloned().zip(values).collect();
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[HashMap<String, Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 某一列在所有行中的值，缺失时为 null
    pub fn column_values(&self, column: &str) -> Vec<&Value> {
        self.rows
            .iter()
            .map(|row| row.get(column).unwrap_or(&NULL))
            .collect()
    }

    /// 按列顺序取出每一行
    pub fn ordered_rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        self.rows.iter().map(move |row| {
            self.columns
                .iter()
                .map(|column| row.get(column).unwrap_or(&NULL))
                .collect()
        })
    }
}
