//! Expression compilation.
//!
//! Expressions are emitted post-order; each leaves exactly one value on the
//! stack, except calls to functions returning `nothing`.

use pb_analysis::CallTarget;
use pb_common::{BinaryOp, CompilerError};
use pb_runtime::Value;
use pb_syntax::ast::{Expr, ExprKind};
use pb_vm::Instruction;

use crate::context::CodegenContext;
use crate::func::FuncBuilder;

pub fn compile_expr(expr: &Expr, ctx: &CodegenContext, func: &mut FuncBuilder) -> Result<(), CompilerError> {
    match &expr.kind {
        ExprKind::Number(n) => {
            func.emit(Instruction::Push(Value::Number(*n)));
        }
        ExprKind::Boolean(b) => {
            func.emit(Instruction::Push(Value::Boolean(*b)));
        }
        ExprKind::String(s) => {
            func.emit(Instruction::Push(Value::from(s.as_str())));
        }
        ExprKind::Variable(name) => {
            let slot = func.lookup_local(name)?;
            func.emit(Instruction::Load(slot));
        }
        ExprKind::Call(call) => {
            // Arguments left to right; the callee binds them in order.
            for arg in &call.args {
                compile_expr(arg, ctx, func)?;
            }
            match ctx.resolve_call(call, expr.location)? {
                (CallTarget::Function(index), _) => func.emit(Instruction::Call(index)),
                (CallTarget::External(index), _) => func.emit(Instruction::CallExt(index)),
            };
        }
        ExprKind::Field(_) | ExprKind::Index(_) => {
            return Err(CompilerError::new(
                "Field and array access is not implemented yet.",
                expr.location,
            ));
        }
        ExprKind::Unary(unary) => {
            compile_expr(&unary.operand, ctx, func)?;
            func.emit(Instruction::UnaryOp(unary.op));
        }
        ExprKind::Binary(binary) => {
            compile_expr(&binary.left, ctx, func)?;
            compile_expr(&binary.right, ctx, func)?;
            let ins = match binary.op {
                BinaryOp::Concat => Instruction::StringConcat,
                op => Instruction::BinaryOp(op),
            };
            func.emit(ins);
        }
    }
    Ok(())
}
