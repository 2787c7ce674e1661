//! Codegen context - program-wide state shared by all function builders.

use pb_analysis::{CallTarget, TypeInfo};
use pb_common::{signature, CompilerError, Location, TypeId};
use pb_syntax::ast::CallExpr;

/// Read-only view of what the checker resolved.
pub struct CodegenContext<'a> {
    info: &'a TypeInfo,
}

impl<'a> CodegenContext<'a> {
    pub fn new(info: &'a TypeInfo) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &'a TypeInfo {
        self.info
    }

    /// Dense index of the user function with `signature`.
    pub fn function_index(&self, signature: &str) -> Option<u32> {
        self.info.functions.get(signature).map(|f| f.index)
    }

    /// Where a call goes, from the types the checker bound to its arguments.
    pub fn resolve_call(&self, call: &CallExpr, location: Location) -> Result<(CallTarget, TypeId), CompilerError> {
        let mut arg_types = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            arg_types.push(arg.ty.ok_or_else(|| self.unchecked("argument", arg.location))?);
        }
        let sig = signature(&call.name.name, arg_types.iter().map(|&t| self.info.registry.name(t)));
        self.info
            .resolve_call(&sig)
            .ok_or_else(|| CompilerError::new(format!("Can not find function '{}'.", sig), location))
    }

    /// Error for a node the checker never annotated.
    pub fn unchecked(&self, what: &str, location: Location) -> CompilerError {
        CompilerError::new(format!("Internal error: unchecked {}.", what), location)
    }
}
