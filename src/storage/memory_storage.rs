use super::GraphDatabase;
use crate::core::{Direction, Node, Properties, Relationship, StorageError, Value};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct GraphState {
    nodes: BTreeMap<u64, Node>,
    relationships: BTreeMap<u64, Relationship>,
    // 节点 ID -> 关联关系 ID（按创建顺序）
    adjacency: BTreeMap<u64, Vec<u64>>,
    next_node_id: u64,
    next_relationship_id: u64,
}

/// 内存图存储
///
/// 读多写少，使用读写锁保护全部状态。
#[derive(Debug, Default)]
pub struct MemoryGraph {
    state: RwLock<GraphState>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建节点，返回新节点 ID
    pub fn create_node(&self, properties: Properties) -> u64 {
        let mut state = self.state.write();
        let id = state.next_node_id;
        state.next_node_id += 1;
        state.nodes.insert(id, Node::new(id, properties));
        state.adjacency.insert(id, Vec::new());
        id
    }

    /// 在两个已存在的节点之间创建关系，返回新关系 ID
    pub fn create_relationship(
        &self,
        start: u64,
        end: u64,
        rel_type: &str,
        properties: Properties,
    ) -> Result<u64, StorageError> {
        let mut state = self.state.write();
        for node_id in [start, end] {
            if !state.nodes.contains_key(&node_id) {
                return Err(StorageError::NodeNotFound(node_id));
            }
        }
        if rel_type.is_empty() {
            return Err(StorageError::InvalidInput("关系类型不能为空".to_string()));
        }

        let id = state.next_relationship_id;
        state.next_relationship_id += 1;
        state.relationships.insert(
            id,
            Relationship::new(id, start, end, rel_type.to_string(), properties),
        );
        state.adjacency.entry(start).or_default().push(id);
        if end != start {
            state.adjacency.entry(end).or_default().push(id);
        }
        Ok(id)
    }

    /// 设置节点属性；值为 null 时删除该属性
    pub fn set_node_property(&self, id: u64, key: &str, value: Value) -> Result<(), StorageError> {
        let mut state = self.state.write();
        let node = state
            .nodes
            .get_mut(&id)
            .ok_or(StorageError::NodeNotFound(id))?;
        if value.is_null() {
            node.properties.remove(key);
        } else {
            node.properties.insert(key.to_string(), value);
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.state.read().relationships.len()
    }
}

impl GraphDatabase for MemoryGraph {
    fn node(&self, id: u64) -> Result<Option<Node>, StorageError> {
        Ok(self.state.read().nodes.get(&id).cloned())
    }

    fn relationship(&self, id: u64) -> Result<Option<Relationship>, StorageError> {
        Ok(self.state.read().relationships.get(&id).cloned())
    }

    fn all_nodes(&self) -> Result<Vec<Node>, StorageError> {
        Ok(self.state.read().nodes.values().cloned().collect())
    }

    fn all_relationships(&self) -> Result<Vec<Relationship>, StorageError> {
        Ok(self.state.read().relationships.values().cloned().collect())
    }

    fn relationships_of(
        &self,
        node_id: u64,
        direction: Direction,
    ) -> Result<Vec<Relationship>, StorageError> {
        let state = self.state.read();
        let rel_ids = state
            .adjacency
            .get(&node_id)
            .ok_or(StorageError::NodeNotFound(node_id))?;

        Ok(rel_ids
            .iter()
            .filter_map(|id| state.relationships.get(id))
            .filter(|rel| direction.matches(rel, node_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Properties {
        let mut props = Properties::new();
        props.insert("name".to_string(), Value::from(name));
        props
    }

    #[test]
    fn test_create_and_read_nodes() {
        let graph = MemoryGraph::new();
        let a = graph.create_node(named("a"));
        let b = graph.create_node(named("b"));
        assert_ne!(a, b);
        assert_eq!(graph.node_count(), 2);

        let node = graph.node(a).expect("read node").expect("node exists");
        assert_eq!(node.get_property("name"), Some(&Value::from("a")));
        assert!(graph.node(999).expect("read node").is_none());
    }

    #[test]
    fn test_relationships_by_direction() {
        let graph = MemoryGraph::new();
        let a = graph.create_node(Properties::new());
        let b = graph.create_node(Properties::new());
        let c = graph.create_node(Properties::new());
        graph.create_relationship(a, b, "know", Properties::new()).expect("a->b");
        graph.create_relationship(c, a, "know", Properties::new()).expect("c->a");

        let out = graph.relationships_of(a, Direction::Outgoing).expect("outgoing");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].end, b);

        let incoming = graph.relationships_of(a, Direction::Incoming).expect("incoming");
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].start, c);

        let both = graph.relationships_of(a, Direction::Both).expect("both");
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_self_loop_listed_once() {
        let graph = MemoryGraph::new();
        let a = graph.create_node(Properties::new());
        graph.create_relationship(a, a, "self", Properties::new()).expect("loop");
        let both = graph.relationships_of(a, Direction::Both).expect("both");
        assert_eq!(both.len(), 1);
    }

    #[test]
    fn test_relationship_requires_existing_nodes() {
        let graph = MemoryGraph::new();
        let a = graph.create_node(Properties::new());
        let result = graph.create_relationship(a, 42, "know", Properties::new());
        assert_eq!(result, Err(StorageError::NodeNotFound(42)));
        assert_eq!(graph.relationship_count(), 0);
    }

    #[test]
    fn test_set_node_property() {
        let graph = MemoryGraph::new();
        let a = graph.create_node(Properties::new());
        graph.set_node_property(a, "age", Value::Int(25)).expect("set");
        let node = graph.node(a).expect("read").expect("exists");
        assert_eq!(node.get_property("age"), Some(&Value::Int(25)));

        graph.set_node_property(a, "age", Value::Null).expect("remove");
        let node = graph.node(a).expect("read").expect("exists");
        assert!(node.get_property("age").is_none());
    }
}
