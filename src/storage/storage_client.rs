use crate::core::{Direction, Node, Relationship, StorageError};

/// 查询引擎使用的图数据库句柄
///
/// 执行引擎只借用句柄，不持有它；并发语义由实现自行负责。
pub trait GraphDatabase: Send + Sync {
    fn node(&self, id: u64) -> Result<Option<Node>, StorageError>;
    fn relationship(&self, id: u64) -> Result<Option<Relationship>, StorageError>;
    fn all_nodes(&self) -> Result<Vec<Node>, StorageError>;
    fn all_relationships(&self) -> Result<Vec<Relationship>, StorageError>;

    /// 节点在指定方向上的关系，按创建顺序返回
    ///
    /// 自环关系在 `Direction::Both` 下只返回一次。
    fn relationships_of(
        &self,
        node_id: u64,
        direction: Direction,
    ) -> Result<Vec<Relationship>, StorageError>;
}
