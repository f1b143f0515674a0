//! Cypher模式定义

use crate::core::Direction;

/// MATCH 中的一条路径模式，可选命名：`p = (a)-->(b)`
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub path_name: Option<String>,
    pub start: NodePattern,
    pub steps: Vec<PatternStep>,
}

impl Pattern {
    /// 按顺序列出所有节点模式
    pub fn nodes(&self) -> impl Iterator<Item = &NodePattern> {
        std::iter::once(&self.start).chain(self.steps.iter().map(|s| &s.node))
    }

    /// 反转模式方向，命名路径保持不变
    pub fn reversed(&self) -> Pattern {
        let mut nodes: Vec<NodePattern> = self.nodes().cloned().collect();
        nodes.reverse();
        let mut rels: Vec<RelationshipPattern> = self
            .steps
            .iter()
            .map(|s| RelationshipPattern {
                direction: s.relationship.direction.reverse(),
                ..s.relationship.clone()
            })
            .collect();
        rels.reverse();

        let mut nodes = nodes.into_iter();
        let start = nodes.next().unwrap_or_default();
        Pattern {
            path_name: self.path_name.clone(),
            start,
            steps: rels
                .into_iter()
                .zip(nodes)
                .map(|(relationship, node)| PatternStep { relationship, node })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternStep {
    pub relationship: RelationshipPattern,
    pub node: NodePattern,
}

/// 节点模式，匿名节点没有标识符
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodePattern {
    pub identifier: Option<String>,
}

impl NodePattern {
    pub fn named(identifier: &str) -> Self {
        Self {
            identifier: Some(identifier.to_string()),
        }
    }
}

/// 关系模式；`types` 为空表示任意类型
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipPattern {
    pub identifier: Option<String>,
    pub types: Vec<String>,
    pub direction: Direction,
}

impl RelationshipPattern {
    pub fn accepts_type(&self, rel_type: &str) -> bool {
        self.types.is_empty() || self.types.iter().any(|t| t == rel_type)
    }
}
