use std::collections::BTreeMap;

use crate::core::value::Value;

/// 节点、关系的属性集合
///
/// 使用有序 Map，保证序列化输出稳定。
pub type Properties = BTreeMap<String, Value>;

/// 图中的节点
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: u64,
    pub properties: Properties,
}

impl Node {
    pub fn new(id: u64, properties: Properties) -> Self {
        Self { id, properties }
    }

    /// Get property value by name
    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// 图中的有向关系
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: u64,
    pub start: u64,
    pub end: u64,
    pub rel_type: String,
    pub properties: Properties,
}

impl Relationship {
    pub fn new(id: u64, start: u64, end: u64, rel_type: String, properties: Properties) -> Self {
        Self {
            id,
            start,
            end,
            rel_type,
            properties,
        }
    }

    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// 给定一端节点，返回另一端节点的 ID
    pub fn other_node(&self, node_id: u64) -> u64 {
        if self.start == node_id {
            self.end
        } else {
            self.start
        }
    }
}

/// 从某个节点出发观察关系的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

impl Direction {
    /// 反向
    pub fn reverse(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
            Direction::Both => Direction::Both,
        }
    }

    /// 关系从 `node_id` 的角度看是否符合该方向
    pub fn matches(self, rel: &Relationship, node_id: u64) -> bool {
        match self {
            Direction::Outgoing => rel.start == node_id,
            Direction::Incoming => rel.end == node_id,
            Direction::Both => rel.start == node_id || rel.end == node_id,
        }
    }
}

/// 节点与关系交替组成的路径
///
/// `nodes.len() == relationships.len() + 1` 恒成立。
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
}

impl Path {
    /// 只有起点的路径
    pub fn new(start: Node) -> Self {
        Self {
            nodes: vec![start],
            relationships: Vec::new(),
        }
    }

    /// 追加一步
    pub fn push(&mut self, relationship: Relationship, node: Node) {
        self.relationships.push(relationship);
        self.nodes.push(node);
    }

    /// 拼接另一条以本路径终点为起点的路径
    pub fn append(&mut self, other: Path) {
        debug_assert_eq!(self.end().id, other.start().id);
        self.relationships.extend(other.relationships);
        self.nodes.extend(other.nodes.into_iter().skip(1));
    }

    /// 反转路径方向
    pub fn reversed(mut self) -> Self {
        self.nodes.reverse();
        self.relationships.reverse();
        self
    }

    pub fn start(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn end(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// 路径长度，即关系数量
    pub fn length(&self) -> usize {
        self.relationships.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64) -> Node {
        Node::new(id, Properties::new())
    }

    fn rel(id: u64, start: u64, end: u64) -> Relationship {
        Relationship::new(id, start, end, "know".to_string(), Properties::new())
    }

    #[test]
    fn test_path_push_and_reverse() {
        let mut path = Path::new(node(1));
        path.push(rel(10, 1, 2), node(2));
        path.push(rel(11, 2, 3), node(3));
        assert_eq!(path.length(), 2);
        assert_eq!(path.start().id, 1);
        assert_eq!(path.end().id, 3);

        let reversed = path.reversed();
        assert_eq!(reversed.start().id, 3);
        assert_eq!(reversed.end().id, 1);
        assert_eq!(reversed.relationships()[0].id, 11);
    }

    #[test]
    fn test_path_append() {
        let mut left = Path::new(node(1));
        left.push(rel(10, 1, 2), node(2));
        let mut right = Path::new(node(2));
        right.push(rel(11, 2, 3), node(3));

        left.append(right);
        assert_eq!(left.length(), 2);
        assert_eq!(left.nodes().len(), 3);
        assert_eq!(left.end().id, 3);
    }

    #[test]
    fn test_direction_matches() {
        let r = rel(1, 1, 2);
        assert!(Direction::Outgoing.matches(&r, 1));
        assert!(!Direction::Outgoing.matches(&r, 2));
        assert!(Direction::Incoming.matches(&r, 2));
        assert!(Direction::Both.matches(&r, 2));
        assert_eq!(r.other_node(1), 2);
        assert_eq!(r.other_node(2), 1);
    }
}
