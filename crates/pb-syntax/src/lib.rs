//! # pb-syntax
//!
//! Lexer, AST definitions, and parser for the Paperbots language.
//!
//! ```text
//! fun add(a: number, b: number): number
//!     return a + b
//! end
//!
//! repeat 3 times
//!     print(add(1, 2))
//! end
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use parser::{parse, Parser, SyntaxError};
