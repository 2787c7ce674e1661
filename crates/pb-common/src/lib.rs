//! # pb-common
//!
//! Shared infrastructure for the Paperbots compiler and VM:
//! - `span` - source positions and locations (1-based line/column, byte offset)
//! - `source` - source text with a line table for offset lookups
//! - `ops` - unary and binary operators shared by the AST and the bytecode
//! - `types` - `TypeId`, the identity handle for types in the registry
//! - `error` - `CompilerError`, the single error type surfaced by `compile()`
//! - `diagnostics` - rendering of compiler errors against their source

pub mod diagnostics;
pub mod error;
pub mod ops;
pub mod source;
pub mod span;
pub mod types;

pub use error::CompilerError;
pub use ops::{BinaryOp, UnaryOp};
pub use source::SourceFile;
pub use span::{Location, Position};
pub use types::{signature, TypeId};
