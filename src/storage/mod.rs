//! 图存储
//!
//! `GraphDatabase` 是查询引擎看到的图句柄；`MemoryGraph` 为内存实现。

pub mod fixture;
pub mod memory_storage;
pub mod storage_client;

pub use fixture::GraphFixture;
pub use memory_storage::MemoryGraph;
pub use storage_client::GraphDatabase;

pub use crate::core::StorageError;
