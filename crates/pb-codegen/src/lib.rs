//! Paperbots bytecode generation.
//!
//! This crate lowers a checked [`Module`] into one [`FunctionCode`] per
//! function, `$main` first. The checker must have run: the emitter reads the
//! types and slots it left on the AST and fails on a node without them.

mod context;
mod expr;
mod func;
mod stmt;

pub use context::CodegenContext;
pub use func::{FuncBuilder, LoopContext};

use pb_analysis::TypeInfo;
use pb_common::CompilerError;
use pb_syntax::ast::{FunctionDecl, Module};
use pb_vm::FunctionCode;

use crate::stmt::compile_stmt;

/// Compile a checked module to bytecode.
#[tracing::instrument(skip_all, fields(functions = module.functions.len()))]
pub fn compile_module(module: &Module, info: &TypeInfo) -> Result<Vec<FunctionCode>, CompilerError> {
    let ctx = CodegenContext::new(info);
    let mut functions = Vec::with_capacity(module.functions.len());
    for (index, decl) in module.functions.iter().enumerate() {
        let code = compile_function(decl, index as u32, &ctx)?;
        tracing::debug!(
            function = %code.signature,
            instructions = code.instructions.len(),
            locals = code.locals.len(),
            "emitted"
        );
        functions.push(code);
    }
    Ok(functions)
}

fn compile_function(decl: &FunctionDecl, index: u32, ctx: &CodegenContext) -> Result<FunctionCode, CompilerError> {
    debug_assert!(
        decl.is_main() || ctx.function_index(&decl.signature()) == Some(index),
        "function order diverged from the checker"
    );
    let mut func = FuncBuilder::new(decl, index);

    // Parameters occupy the first slots.
    for param in &decl.params {
        let ty = param.ty.ok_or_else(|| ctx.unchecked("parameter", param.name.location))?;
        func.define_param(&param.name, ty, param.slot)?;
    }

    for stmt in &decl.body {
        compile_stmt(stmt, ctx, &mut func)?;
    }
    Ok(func.finish())
}
