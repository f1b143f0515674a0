//! Query parser module
//!
//! Parses query strings into the AST consumed by the execution engine.

pub mod cypher;

pub use cypher::{CypherParser, CypherQuery};
