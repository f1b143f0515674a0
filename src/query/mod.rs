// Query module
//
// This module provides the query processing pipeline:
// - Parsing query strings into AST
// - Executing queries against a graph handle

pub mod executor;
pub mod parser;

// Re-export error types from core module
pub use crate::core::{ExecutionError, SyntaxError};
pub use executor::{ExecutionEngine, ExecutionResult};
pub use parser::{CypherParser, CypherQuery};
