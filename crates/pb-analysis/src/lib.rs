//! # pb-analysis
//!
//! Semantic analysis for Paperbots:
//! - `scope` - lexical scope stack with per-function slot allocation
//! - `types` - the type registry and resolved function/external signatures
//! - `checker` - the three-pass type checker that annotates the AST in place

pub mod checker;
pub mod scope;
pub mod types;

pub use checker::check;
pub use scope::{Scopes, Symbol};
pub use types::{CallTarget, ExternalType, FunctionType, TypeDef, TypeInfo, TypeKind, TypeRegistry};
