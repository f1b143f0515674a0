//! MATCH 模式匹配
//!
//! 每个模式从一个已绑定的节点或关系端点（锚点）出发，分别向右、向左展开，
//! 两侧的结果拼成完整的一条匹配。同一条匹配中一个关系只能使用一次。

use super::context::Bindings;
use crate::core::{Direction, ExecutionError, Node, Path, Relationship, StorageError, Value};
use crate::query::parser::cypher::ast::{Pattern, PatternStep};
use crate::storage::GraphDatabase;

/// 展开过程中的一条部分匹配
#[derive(Debug, Clone)]
struct PartialMatch {
    bindings: Bindings,
    path: Path,
    used: Vec<u64>,
}

/// 模式匹配器，借用图句柄
pub struct PatternMatcher<'a, G: GraphDatabase + ?Sized> {
    graph: &'a G,
}

impl<'a, G: GraphDatabase + ?Sized> PatternMatcher<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// 依次匹配所有模式，返回扩展后的行
    pub fn match_all(
        &self,
        patterns: &[Pattern],
        row: Bindings,
    ) -> Result<Vec<Bindings>, ExecutionError> {
        let mut rows = vec![row];
        for pattern in patterns {
            let mut next = Vec::new();
            for row in &rows {
                next.extend(self.match_pattern(pattern, row)?);
            }
            rows = next;
        }
        Ok(rows)
    }

    /// 匹配单个模式
    pub fn match_pattern(
        &self,
        pattern: &Pattern,
        row: &Bindings,
    ) -> Result<Vec<Bindings>, ExecutionError> {
        let (anchor_index, anchors) = self.find_anchor(pattern, row)?;

        let right_steps = &pattern.steps[anchor_index..];
        let reversed = pattern.reversed();
        let left_steps = &reversed.steps[pattern.steps.len() - anchor_index..];
        let anchor_identifier = pattern
            .nodes()
            .nth(anchor_index)
            .and_then(|n| n.identifier.as_deref());

        let mut results = Vec::new();
        for anchor in anchors {
            let mut bindings = row.clone();
            if let Some(identifier) = anchor_identifier {
                if !bindings.contains(identifier) {
                    bindings.bind(identifier, Value::Node(anchor.clone()));
                }
            }
            let seed = PartialMatch {
                bindings,
                path: Path::new(anchor.clone()),
                used: Vec::new(),
            };

            let mut right_matches = Vec::new();
            self.expand(right_steps, &anchor, seed, &mut right_matches)?;

            for right in right_matches {
                let seed = PartialMatch {
                    bindings: right.bindings,
                    path: Path::new(anchor.clone()),
                    used: right.used,
                };
                let mut left_matches = Vec::new();
                self.expand(left_steps, &anchor, seed, &mut left_matches)?;

                for left in left_matches {
                    let mut bindings = left.bindings;
                    if let Some(name) = &pattern.path_name {
                        let mut path = left.path.reversed();
                        path.append(right.path.clone());
                        bindings.bind(name, Value::Path(path));
                    }
                    results.push(bindings);
                }
            }
        }

        Ok(results)
    }

    /// 选出锚点：优先取第一个已绑定的节点；没有时取第一个已绑定的关系，
    /// 以它靠左一侧可能的端点作为候选
    fn find_anchor(
        &self,
        pattern: &Pattern,
        row: &Bindings,
    ) -> Result<(usize, Vec<Node>), ExecutionError> {
        for (index, node) in pattern.nodes().enumerate() {
            if let Some(identifier) = &node.identifier {
                if let Some(bound) = row.node(identifier)? {
                    return Ok((index, vec![bound.clone()]));
                }
            }
        }

        for (index, step) in pattern.steps.iter().enumerate() {
            let Some(identifier) = &step.relationship.identifier else {
                continue;
            };
            let rel = match row.get(identifier) {
                None => continue,
                Some(Value::Relationship(rel)) => rel,
                Some(other) => {
                    return Err(ExecutionError::TypeMismatch(format!(
                        "'{}' 在模式中用作关系，但绑定的是 {}",
                        identifier,
                        other.type_name()
                    )))
                }
            };

            let mut endpoints = match step.relationship.direction {
                Direction::Outgoing => vec![rel.start],
                Direction::Incoming => vec![rel.end],
                Direction::Both => vec![rel.start, rel.end],
            };
            endpoints.dedup();

            let mut anchors = Vec::with_capacity(endpoints.len());
            for id in endpoints {
                let node = self.graph.node(id)?.ok_or(StorageError::NodeNotFound(id))?;
                anchors.push(node);
            }
            return Ok((index, anchors));
        }

        Err(ExecutionError::UnboundPattern(describe(pattern)))
    }

    fn expand(
        &self,
        steps: &[PatternStep],
        current: &Node,
        partial: PartialMatch,
        out: &mut Vec<PartialMatch>,
    ) -> Result<(), ExecutionError> {
        let Some((step, rest)) = steps.split_first() else {
            out.push(partial);
            return Ok(());
        };

        let candidates = self
            .graph
            .relationships_of(current.id, step.relationship.direction)?;

        for rel in candidates {
            if partial.used.contains(&rel.id) || !step.relationship.accepts_type(&rel.rel_type) {
                continue;
            }
            if let Some(identifier) = &step.relationship.identifier {
                if !bound_relationship_matches(&partial.bindings, identifier, &rel)? {
                    continue;
                }
            }

            let other_id = rel.other_node(current.id);
            if let Some(identifier) = &step.node.identifier {
                if let Some(bound) = partial.bindings.node(identifier)? {
                    if bound.id != other_id {
                        continue;
                    }
                }
            }
            let other = self
                .graph
                .node(other_id)?
                .ok_or(StorageError::NodeNotFound(other_id))?;

            let mut next = partial.clone();
            next.used.push(rel.id);
            if let Some(identifier) = &step.relationship.identifier {
                next.bindings.bind(identifier, Value::Relationship(rel.clone()));
            }
            if let Some(identifier) = &step.node.identifier {
                next.bindings.bind(identifier, Value::Node(other.clone()));
            }
            next.path.push(rel, other.clone());

            self.expand(rest, &other, next, out)?;
        }

        Ok(())
    }
}

/// 关系标识符未绑定，或绑定的正是该关系
fn bound_relationship_matches(
    bindings: &Bindings,
    identifier: &str,
    rel: &Relationship,
) -> Result<bool, ExecutionError> {
    match bindings.get(identifier) {
        None => Ok(true),
        Some(Value::Relationship(bound)) => Ok(bound.id == rel.id),
        Some(other) => Err(ExecutionError::TypeMismatch(format!(
            "'{}' 在模式中用作关系，但绑定的是 {}",
            identifier,
            other.type_name()
        ))),
    }
}

fn describe(pattern: &Pattern) -> String {
    let names: Vec<&str> = pattern
        .nodes()
        .map(|n| n.identifier.as_deref().unwrap_or("()"))
        .collect();
    names.join("--")
}
