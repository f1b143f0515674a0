//! Cypher query extension for a graph database server
//!
//! This crate exposes a legacy Cypher endpoint (`START ... MATCH ... RETURN`)
//! as a server extension, together with the parser, the execution engine and
//! an in-memory graph it runs against.

pub mod api;
pub mod config;
pub mod core;
pub mod query;
pub mod storage;
pub mod utils;
