//! Cypher 执行引擎
//!
//! 执行顺序：START 绑定 → MATCH 展开 → WHERE 过滤 → RETURN 投影
//! → DISTINCT → ORDER BY → SKIP / LIMIT。

use super::context::Bindings;
use super::expression_evaluator::CypherExpressionEvaluator;
use super::matcher::PatternMatcher;
use crate::core::value::sort_order;
use crate::core::{ExecutionError, Value};
use crate::query::executor::result::ExecutionResult;
use crate::query::parser::cypher::ast::{
    CypherQuery, Expression, IdSelector, StartItem, StartLookup,
};
use crate::storage::GraphDatabase;
use log::debug;
use std::cmp::Ordering;
use std::collections::HashSet;

/// 投影后的一行：返回值和排序键
struct ProjectedRow {
    values: Vec<Value>,
    sort_keys: Vec<Value>,
}

/// 执行引擎，借用图句柄，每次查询新建
pub struct ExecutionEngine<'a, G: GraphDatabase + ?Sized> {
    graph: &'a G,
    evaluator: CypherExpressionEvaluator,
}

impl<'a, G: GraphDatabase + ?Sized> ExecutionEngine<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            evaluator: CypherExpressionEvaluator,
        }
    }

    /// 执行已解析的查询
    pub fn execute(&self, query: &CypherQuery) -> Result<ExecutionResult, ExecutionError> {
        self.validate(query)?;

        let mut rows = vec![Bindings::new()];
        for item in &query.start {
            rows = self.bind_start_item(item, rows)?;
        }
        debug!("START 产生 {} 行", rows.len());

        if !query.patterns.is_empty() {
            let matcher = PatternMatcher::new(self.graph);
            let mut matched = Vec::new();
            for row in rows {
                matched.extend(matcher.match_all(&query.patterns, row)?);
            }
            rows = matched;
            debug!("MATCH 产生 {} 行", rows.len());
        }

        if let Some(filter) = &query.filter {
            let mut kept = Vec::with_capacity(rows.len());
            for row in rows {
                if self.evaluator.is_true(filter, &row)? {
                    kept.push(row);
                }
            }
            rows = kept;
        }

        let mut projected = self.project(query, rows)?;

        if query.return_clause.distinct {
            let mut unique: Vec<ProjectedRow> = Vec::with_capacity(projected.len());
            for row in projected {
                if !unique.iter().any(|seen| seen.values == row.values) {
                    unique.push(row);
                }
            }
            projected = unique;
        }

        if !query.order_by.is_empty() {
            projected.sort_by(|a, b| compare_sort_keys(query, &a.sort_keys, &b.sort_keys));
        }

        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(usize::MAX);

        let mut result = ExecutionResult::new(query.return_clause.column_names());
        for row in projected.into_iter().skip(skip).take(limit) {
            result.push_row(row.values);
        }
        Ok(result)
    }

    /// 执行前的静态检查：标识符必须先声明后使用，列名不得重复
    fn validate(&self, query: &CypherQuery) -> Result<(), ExecutionError> {
        let mut declared: HashSet<&str> = HashSet::new();
        for item in &query.start {
            if !declared.insert(&item.identifier) {
                return Err(ExecutionError::DuplicateIdentifier(item.identifier.clone()));
            }
        }

        for pattern in &query.patterns {
            for node in pattern.nodes() {
                if let Some(identifier) = &node.identifier {
                    declared.insert(identifier);
                }
            }
            for step in &pattern.steps {
                if let Some(identifier) = &step.relationship.identifier {
                    declared.insert(identifier);
                }
            }
        }
        for pattern in &query.patterns {
            if let Some(name) = &pattern.path_name {
                if !declared.insert(name) {
                    return Err(ExecutionError::DuplicateIdentifier(name.clone()));
                }
            }
        }

        if let Some(filter) = &query.filter {
            self.check_declared(filter, &declared)?;
        }
        for item in &query.return_clause.items {
            self.check_declared(&item.expression, &declared)?;
        }

        let mut columns = HashSet::new();
        for column in query.return_clause.column_names() {
            if !columns.insert(column.clone()) {
                return Err(ExecutionError::DuplicateIdentifier(column));
            }
        }

        // ORDER BY 还可以引用 RETURN 中的别名
        for item in &query.return_clause.items {
            if let Some(alias) = &item.alias {
                declared.insert(alias);
            }
        }
        for item in &query.order_by {
            self.check_declared(&item.expression, &declared)?;
        }

        Ok(())
    }

    fn check_declared(
        &self,
        expr: &Expression,
        declared: &HashSet<&str>,
    ) -> Result<(), ExecutionError> {
        for variable in self.evaluator.get_cypher_variables(expr) {
            if !declared.contains(variable.as_str()) {
                return Err(ExecutionError::UnboundIdentifier(variable));
            }
        }
        Ok(())
    }

    /// START 项与已有的行做笛卡尔积
    fn bind_start_item(
        &self,
        item: &StartItem,
        rows: Vec<Bindings>,
    ) -> Result<Vec<Bindings>, ExecutionError> {
        let values = self.lookup(&item.lookup)?;
        let mut result = Vec::with_capacity(rows.len() * values.len());
        for row in rows {
            for value in &values {
                let mut next = row.clone();
                next.bind(&item.identifier, value.clone());
                result.push(next);
            }
        }
        Ok(result)
    }

    fn lookup(&self, lookup: &StartLookup) -> Result<Vec<Value>, ExecutionError> {
        match lookup {
            StartLookup::Nodes(IdSelector::All) => {
                Ok(self.graph.all_nodes()?.into_iter().map(Value::Node).collect())
            }
            StartLookup::Nodes(IdSelector::Ids(ids)) => ids
                .iter()
                .map(|&id| {
                    self.graph
                        .node(id)?
                        .map(Value::Node)
                        .ok_or(ExecutionError::NodeNotFound(id))
                })
                .collect(),
            StartLookup::Relationships(IdSelector::All) => Ok(self
                .graph
                .all_relationships()?
                .into_iter()
                .map(Value::Relationship)
                .collect()),
            StartLookup::Relationships(IdSelector::Ids(ids)) => ids
                .iter()
                .map(|&id| {
                    self.graph
                        .relationship(id)?
                        .map(Value::Relationship)
                        .ok_or(ExecutionError::RelationshipNotFound(id))
                })
                .collect(),
        }
    }

    fn project(
        &self,
        query: &CypherQuery,
        rows: Vec<Bindings>,
    ) -> Result<Vec<ProjectedRow>, ExecutionError> {
        let items = &query.return_clause.items;
        let mut projected = Vec::with_capacity(rows.len());

        for mut row in rows {
            let values = items
                .iter()
                .map(|item| self.evaluator.evaluate(&item.expression, &row))
                .collect::<Result<Vec<_>, _>>()?;

            let sort_keys = if query.order_by.is_empty() {
                Vec::new()
            } else {
                for (item, value) in items.iter().zip(&values) {
                    if let Some(alias) = &item.alias {
                        row.bind(alias, value.clone());
                    }
                }
                query
                    .order_by
                    .iter()
                    .map(|item| self.evaluator.evaluate(&item.expression, &row))
                    .collect::<Result<Vec<_>, _>>()?
            };

            projected.push(ProjectedRow { values, sort_keys });
        }

        Ok(projected)
    }
}

/// 按 ORDER BY 逐项比较；升序时 null 排在最后
fn compare_sort_keys(query: &CypherQuery, left: &[Value], right: &[Value]) -> Ordering {
    for ((item, l), r) in query.order_by.iter().zip(left).zip(right) {
        let ordering = sort_order(l, r);
        let ordering = if item.descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parser::cypher::CypherParser;
    use crate::storage::{GraphFixture, MemoryGraph};
    use serde_json::json;
    use std::collections::HashMap;

    fn setup() -> (MemoryGraph, HashMap<String, u64>) {
        let graph = MemoryGraph::new();
        let ids = GraphFixture::new()
            .with_named_node("I", json!({}))
            .with_named_node("you", json!({"age": 30}))
            .with_named_node("him", json!({"age": 25}))
            .with_relationship("I", "know", "him")
            .with_relationship("I", "know", "you")
            .with_relationship("you", "hate", "him")
            .apply(&graph)
            .expect("fixture");
        (graph, ids)
    }

    fn run(graph: &MemoryGraph, text: &str) -> Result<ExecutionResult, ExecutionError> {
        let query = CypherParser::new().parse(text).expect("valid query");
        ExecutionEngine::new(graph).execute(&query)
    }

    fn strings(result: &ExecutionResult, column: &str) -> Vec<String> {
        result
            .column_values(column)
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => format!("{:?}", other),
            })
            .collect()
    }

    // ==================== START ====================

    #[test]
    fn test_start_by_id() {
        let (graph, ids) = setup();
        let result = run(&graph, &format!("start x = ({}) return x.name", ids["I"])).expect("execute");
        assert_eq!(result.columns(), &["x.name".to_string()]);
        assert_eq!(strings(&result, "x.name"), vec!["I"]);
    }

    #[test]
    fn test_start_unknown_node() {
        let (graph, _) = setup();
        let err = run(&graph, "start x = (999) return x").expect_err("unknown node");
        assert_eq!(err, ExecutionError::NodeNotFound(999));
    }

    #[test]
    fn test_start_all_relationships() {
        let (graph, _) = setup();
        let result = run(&graph, "start r = relationship(*) return r").expect("execute");
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_start_cartesian_product() {
        let (graph, ids) = setup();
        let text = format!("start a = ({}, {}), b = ({}) return a, b", ids["I"], ids["you"], ids["him"]);
        let result = run(&graph, &text).expect("execute");
        assert_eq!(result.len(), 2);
    }

    // ==================== MATCH / WHERE ====================

    #[test]
    fn test_match_optional_properties() {
        let (graph, ids) = setup();
        let text = format!("start x = ({}) match (x) --> (n) return n.name?, n.age?", ids["I"]);
        let result = run(&graph, &text).expect("execute");

        assert_eq!(result.columns(), &["n.name?".to_string(), "n.age?".to_string()]);
        assert_eq!(result.len(), 2);
        let mut names = strings(&result, "n.name?");
        names.sort();
        assert_eq!(names, vec!["him", "you"]);
    }

    #[test]
    fn test_missing_mandatory_property() {
        let (graph, ids) = setup();
        let err = run(&graph, &format!("start x = ({}) return x.dummy", ids["I"]))
            .expect_err("missing property");
        assert!(matches!(err, ExecutionError::PropertyNotFound { .. }));
    }

    #[test]
    fn test_optional_property_keeps_row() {
        let (graph, ids) = setup();
        let text = format!("start x = ({}) return x.age?", ids["I"]);
        let result = run(&graph, &text).expect("execute");
        assert_eq!(result.column_values("x.age?"), vec![&Value::Null]);
    }

    #[test]
    fn test_where_filter() {
        let (graph, ids) = setup();
        let text = format!(
            "start x = ({}) match (x) -[:know]-> (n) where n.age > 26 return n.name",
            ids["I"]
        );
        let result = run(&graph, &text).expect("execute");
        assert_eq!(strings(&result, "n.name"), vec!["you"]);
    }

    #[test]
    fn test_path_binding() {
        let (graph, ids) = setup();
        let text = format!("start x = ({}) match p = (x) --> (you) -[:hate]-> (him) return p", ids["I"]);
        let result = run(&graph, &text).expect("execute");
        assert_eq!(result.len(), 1);
        assert!(matches!(result.column_values("p")[0], Value::Path(p) if p.length() == 2));
    }

    // ==================== RETURN ====================

    #[test]
    fn test_order_skip_limit() {
        let (graph, _) = setup();
        let result = run(&graph, "start n = node(*) return n.name order by n.name desc skip 1 limit 1")
            .expect("execute");
        // 字符串按码点排序：you > him > I
        assert_eq!(strings(&result, "n.name"), vec!["him"]);
    }

    #[test]
    fn test_order_by_alias() {
        let (graph, _) = setup();
        let result = run(&graph, "start n = node(*) return n.age? as age order by age")
            .expect("execute");
        assert_eq!(
            result.column_values("age"),
            vec![&Value::Int(25), &Value::Int(30), &Value::Null]
        );
    }

    #[test]
    fn test_distinct() {
        let (graph, _) = setup();
        let result = run(&graph, "start r = rel(*) return distinct r.dummy?").expect("execute");
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_unbound_identifier() {
        let (graph, ids) = setup();
        let err = run(&graph, &format!("start x = ({}) return y", ids["I"])).expect_err("unbound");
        assert_eq!(err, ExecutionError::UnboundIdentifier("y".to_string()));
    }

    #[test]
    fn test_duplicate_start_identifier() {
        let (graph, _) = setup();
        let err = run(&graph, "start x = (0), x = (1) return x").expect_err("duplicate");
        assert_eq!(err, ExecutionError::DuplicateIdentifier("x".to_string()));
    }

    #[test]
    fn test_duplicate_path_name() {
        let (graph, ids) = setup();
        let text = format!(
            "start x = ({}) match p = (x) --> (a), p = (x) --> (b) return a",
            ids["I"]
        );
        let err = run(&graph, &text).expect_err("duplicate path name");
        assert_eq!(err, ExecutionError::DuplicateIdentifier("p".to_string()));

        let text = format!("start x = ({}) match a = (x) --> (a) return a", ids["I"]);
        let err = run(&graph, &text).expect_err("path name shadows node");
        assert_eq!(err, ExecutionError::DuplicateIdentifier("a".to_string()));
    }

    #[test]
    fn test_duplicate_column_name() {
        let (graph, _) = setup();
        let err = run(&graph, "start n = node(*) return n.name?, n.name?").expect_err("duplicate column");
        assert_eq!(err, ExecutionError::DuplicateIdentifier("n.name?".to_string()));
    }

    #[test]
    fn test_order_desc_puts_null_first() {
        let (graph, _) = setup();
        let result = run(&graph, "start n = node(*) return n.age? as age order by age desc")
            .expect("execute");
        assert_eq!(
            result.column_values("age"),
            vec![&Value::Null, &Value::Int(30), &Value::Int(25)]
        );
    }

    #[test]
    fn test_keyword_named_property() {
        let graph = MemoryGraph::new();
        let ids = GraphFixture::new()
            .with_named_node("box", json!({"order": 3}))
            .apply(&graph)
            .expect("fixture");

        let text = format!("start x = ({}) return x.order?, x.limit?, x.name as start", ids["box"]);
        let result = run(&graph, &text).expect("execute");

        assert_eq!(
            result.columns(),
            &["x.order?".to_string(), "x.limit?".to_string(), "start".to_string()]
        );
        assert_eq!(result.column_values("x.order?"), vec![&Value::Int(3)]);
        assert_eq!(result.column_values("x.limit?"), vec![&Value::Null]);
        assert_eq!(strings(&result, "start"), vec!["box"]);
    }
}
