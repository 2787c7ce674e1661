//! Type checker.
//!
//! Runs in three passes over a `Module`:
//! 1. register every function (by signature), record, and external;
//! 2. resolve parameter, field, and return type names;
//! 3. walk each function body, binding expression types and variable slots.
//!
//! The first error aborts checking.

use pb_common::{signature, BinaryOp, CompilerError, Location, TypeId, UnaryOp};
use pb_runtime::ExternalRegistry;
use pb_syntax::ast::*;

use crate::scope::Scopes;
use crate::types::{ExternalType, FunctionType, TypeInfo, TypeKind};

type CheckResult<T> = Result<T, CompilerError>;

/// Type-checks `module` against `externals`, annotating the AST in place.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check<H>(module: &mut Module, externals: &ExternalRegistry<H>) -> CheckResult<TypeInfo> {
    let mut info = TypeInfo::default();
    register_declarations(&mut info, module, externals)?;
    resolve_declarations(&mut info, module)?;
    for function in module.functions.iter_mut() {
        BodyChecker::new(&info, function).check_function(function)?;
    }
    tracing::debug!(
        functions = info.functions.len(),
        records = module.records.len(),
        externals = info.externals.len(),
        types = info.registry.len(),
        "type check complete"
    );
    Ok(info)
}

// ═══════════════════════════════════════════════════════════════════════════
// Pass 1: registration
// ═══════════════════════════════════════════════════════════════════════════

fn register_declarations<H>(
    info: &mut TypeInfo,
    module: &Module,
    externals: &ExternalRegistry<H>,
) -> CheckResult<()> {
    for (index, function) in module.functions.iter().enumerate() {
        let sig = function.signature();
        let ty = info
            .registry
            .register(&sig, TypeKind::Function, function.location)
            .map_err(|other| {
                CompilerError::new(
                    format!(
                        "Function '{}' already defined in line {}.",
                        sig,
                        other.location.map_or(1, |l| l.line())
                    ),
                    function.name.location,
                )
            })?;
        if externals.lookup(&sig).is_some() {
            return Err(CompilerError::new(
                format!("Function '{}' already defined externally.", sig),
                function.name.location,
            ));
        }
        info.functions.insert(
            sig,
            FunctionType {
                ty,
                index: index as u32,
                params: Vec::new(),
                return_type: TypeId::NOTHING,
                location: function.location,
            },
        );
    }

    for record in &module.records {
        let name = &record.name.name;
        info.registry
            .register(name, TypeKind::Record, record.location)
            .map_err(|other| {
                let message = match other.location {
                    Some(l) => format!("Record '{}' already defined in line {}.", name, l.line()),
                    None => format!("Record '{}' already defined.", name),
                };
                CompilerError::new(message, record.name.location)
            })?;
    }

    for external in externals.iter() {
        let return_type = match external.return_type_name.as_deref() {
            None => TypeId::NOTHING,
            Some(type_name) => info.registry.lookup(type_name).ok_or_else(|| {
                CompilerError::new(
                    format!(
                        "Could not find type '{}' for return value of external function '{}'.",
                        type_name, external.name
                    ),
                    Location::unknown(),
                )
            })?,
        };
        let mut params = Vec::with_capacity(external.params.len());
        for (i, param) in external.params.iter().enumerate() {
            let ty = info.registry.lookup(&param.type_name).ok_or_else(|| {
                CompilerError::new(
                    format!(
                        "Could not find type '{}' for argument {} of external function '{}'.",
                        param.type_name,
                        i + 1,
                        external.name
                    ),
                    Location::unknown(),
                )
            })?;
            params.push(ty);
        }
        info.externals.insert(
            external.signature().to_string(),
            ExternalType {
                index: external.index,
                params,
                return_type,
                is_async: external.is_async(),
            },
        );
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Pass 2: resolve declared type names
// ═══════════════════════════════════════════════════════════════════════════

fn resolve_declarations(info: &mut TypeInfo, module: &mut Module) -> CheckResult<()> {
    for function in module.functions.iter_mut() {
        let sig = function.signature();
        for i in 0..function.params.len() {
            let param = &function.params[i];
            if let Some(other) = function.params[..i].iter().find(|p| p.name.name == param.name.name) {
                return Err(CompilerError::new(
                    format!(
                        "Duplicate parameter name '{}' in function '{}', see line {}, column {}.",
                        param.name.name,
                        sig,
                        other.name.location.start.line,
                        other.name.location.start.column
                    ),
                    param.name.location,
                ));
            }
            let ty = info.registry.lookup(param.type_name.name()).ok_or_else(|| {
                CompilerError::new(
                    format!(
                        "Unknown type '{}' for parameter '{}' of function '{}'.",
                        param.type_name.name(),
                        param.name.name,
                        sig
                    ),
                    param.type_name.id.location,
                )
            })?;
            function.params[i].ty = Some(ty);
        }

        let return_type = match &function.return_type_name {
            None => TypeId::NOTHING,
            Some(type_name) => info.registry.lookup(type_name.name()).ok_or_else(|| {
                CompilerError::new(
                    format!("Unknown return type '{}'.", type_name.name()),
                    type_name.id.location,
                )
            })?,
        };
        function.return_type = Some(return_type);

        if let Some(entry) = info.functions.get_mut(&sig) {
            entry.params = function.params.iter().filter_map(|p| p.ty).collect();
            entry.return_type = return_type;
        }
    }

    for record in module.records.iter_mut() {
        for i in 0..record.fields.len() {
            let field = &record.fields[i];
            if let Some(other) = record.fields[..i].iter().find(|f| f.name.name == field.name.name) {
                return Err(CompilerError::new(
                    format!(
                        "Duplicate field name '{}' in record '{}', see line {}, column {}.",
                        field.name.name,
                        record.name.name,
                        other.name.location.start.line,
                        other.name.location.start.column
                    ),
                    field.name.location,
                ));
            }
            let ty = info.registry.lookup(field.type_name.name()).ok_or_else(|| {
                CompilerError::new(
                    format!(
                        "Unknown type '{}' for field '{}' of record '{}'.",
                        field.type_name.name(),
                        field.name.name,
                        record.name.name
                    ),
                    field.type_name.id.location,
                )
            })?;
            record.fields[i].ty = Some(ty);
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Pass 3: function bodies
// ═══════════════════════════════════════════════════════════════════════════

struct BodyChecker<'a> {
    info: &'a TypeInfo,
    scopes: Scopes,
    signature: String,
    return_type: TypeId,
    is_main: bool,
    loop_depth: u32,
}

impl<'a> BodyChecker<'a> {
    fn new(info: &'a TypeInfo, function: &FunctionDecl) -> Self {
        Self {
            info,
            scopes: Scopes::new(),
            signature: function.signature(),
            return_type: function.return_type.unwrap_or(TypeId::NOTHING),
            is_main: function.is_main(),
            loop_depth: 0,
        }
    }

    fn type_name(&self, ty: TypeId) -> &str {
        self.info.registry.name(ty)
    }

    fn check_function(mut self, function: &mut FunctionDecl) -> CheckResult<()> {
        for param in function.params.iter_mut() {
            let ty = param.ty.unwrap_or(TypeId::NOTHING);
            param.slot = Some(self.scopes.add(&param.name.name, param.name.location, ty)?);
        }
        for stmt in function.body.iter_mut() {
            self.check_stmt(stmt)?;
        }
        tracing::trace!(function = %self.signature, slots = self.scopes.slot_count(), "checked");
        Ok(())
    }

    fn check_block(&mut self, stmts: &mut [Stmt]) -> CheckResult<()> {
        self.scopes.push();
        let result = stmts.iter_mut().try_for_each(|stmt| self.check_stmt(stmt));
        self.scopes.pop();
        result
    }

    fn check_loop_body(&mut self, stmts: &mut [Stmt]) -> CheckResult<()> {
        self.loop_depth += 1;
        let result = self.check_block(stmts);
        self.loop_depth -= 1;
        result
    }

    fn check_stmt(&mut self, stmt: &mut Stmt) -> CheckResult<()> {
        let location = stmt.location;
        match &mut stmt.kind {
            StmtKind::Expr(expr) => {
                self.check_expr(expr)?;
            }
            StmtKind::Var(var) => {
                let value_ty = self.check_value(&mut var.value)?;
                if let Some(type_name) = &var.type_name {
                    let declared = self.info.registry.lookup(type_name.name()).ok_or_else(|| {
                        CompilerError::new(
                            format!(
                                "Unknown type '{}' for variable '{}'.",
                                type_name.name(),
                                var.name.name
                            ),
                            type_name.id.location,
                        )
                    })?;
                    if declared != value_ty {
                        return Err(CompilerError::new(
                            format!(
                                "Can't assign a value of type '{}' to variable '{}' with type '{}'.",
                                self.type_name(value_ty),
                                var.name.name,
                                self.type_name(declared)
                            ),
                            var.value.location,
                        ));
                    }
                }
                var.ty = Some(value_ty);
                var.slot = Some(self.scopes.add(&var.name.name, var.name.location, value_ty)?);
            }
            StmtKind::Assign(assign) => {
                let value_ty = self.check_value(&mut assign.value)?;
                let symbol = self.scopes.find(&assign.target.name).ok_or_else(|| {
                    CompilerError::new(
                        format!(
                            "Can not find variable or parameter with name '{}'.",
                            assign.target.name
                        ),
                        assign.target.location,
                    )
                })?;
                if symbol.ty != value_ty {
                    return Err(CompilerError::new(
                        format!(
                            "Can not assign a value of type '{}' to a variable of type '{}'.",
                            self.type_name(value_ty),
                            self.type_name(symbol.ty)
                        ),
                        location,
                    ));
                }
            }
            StmtKind::If(if_stmt) => {
                let cond_ty = self.check_expr(&mut if_stmt.condition)?;
                if cond_ty != TypeId::BOOLEAN {
                    return Err(CompilerError::new(
                        format!(
                            "Condition of if statement must be a 'boolean', but is a '{}'.",
                            self.type_name(cond_ty)
                        ),
                        if_stmt.condition.location,
                    ));
                }
                self.check_block(&mut if_stmt.then_block)?;
                self.check_block(&mut if_stmt.else_block)?;
            }
            StmtKind::While(while_stmt) => {
                let cond_ty = self.check_expr(&mut while_stmt.condition)?;
                if cond_ty != TypeId::BOOLEAN {
                    return Err(CompilerError::new(
                        format!(
                            "Condition of while statement must be a 'boolean', but is a '{}'.",
                            self.type_name(cond_ty)
                        ),
                        while_stmt.condition.location,
                    ));
                }
                self.check_loop_body(&mut while_stmt.body)?;
            }
            StmtKind::Repeat(repeat) => {
                let count_ty = self.check_expr(&mut repeat.count)?;
                if count_ty != TypeId::NUMBER {
                    return Err(CompilerError::new(
                        format!(
                            "Count of repeat statement must be a 'number', but is a '{}'.",
                            self.type_name(count_ty)
                        ),
                        repeat.count.location,
                    ));
                }
                self.check_loop_body(&mut repeat.body)?;
            }
            StmtKind::Return(value) => self.check_return(value.as_mut(), location)?,
            StmtKind::Break => self.check_loop_control("break", location)?,
            StmtKind::Continue => self.check_loop_control("continue", location)?,
            StmtKind::Comment(_) => {}
        }
        Ok(())
    }

    fn check_loop_control(&self, keyword: &str, location: Location) -> CheckResult<()> {
        if self.loop_depth == 0 {
            return Err(CompilerError::new(
                format!("'{}' can only be used inside a 'while' or 'repeat' loop.", keyword),
                location,
            ));
        }
        Ok(())
    }

    fn check_return(&mut self, value: Option<&mut Expr>, location: Location) -> CheckResult<()> {
        if self.is_main {
            if value.is_some() {
                return Err(CompilerError::new(
                    "Can not return a value from the main program.",
                    location,
                ));
            }
            return Ok(());
        }
        let value_ty = match value {
            Some(expr) => Some(self.check_value(expr)?),
            None => None,
        };
        let expected = self.return_type;
        match value_ty {
            None if expected != TypeId::NOTHING => Err(CompilerError::new(
                format!(
                    "Function '{}' must return a value of type '{}'.",
                    self.signature,
                    self.type_name(expected)
                ),
                location,
            )),
            Some(_) if expected == TypeId::NOTHING => Err(CompilerError::new(
                format!("Function '{}' must not return a value.", self.signature),
                location,
            )),
            Some(actual) if actual != expected => Err(CompilerError::new(
                format!(
                    "Function '{}' must return a value of type '{}', but a value of type '{}' is returned.",
                    self.signature,
                    self.type_name(expected),
                    self.type_name(actual)
                ),
                location,
            )),
            _ => Ok(()),
        }
    }

    /// Checks an expression that is used as a value; `nothing` is rejected.
    fn check_value(&mut self, expr: &mut Expr) -> CheckResult<TypeId> {
        let ty = self.check_expr(expr)?;
        if ty.is_nothing() {
            let message = match &expr.kind {
                ExprKind::Call(call) => format!(
                    "Function '{}' does not return a value.",
                    call.name.name
                ),
                _ => "Expression does not produce a value.".to_string(),
            };
            return Err(CompilerError::new(message, expr.location));
        }
        Ok(ty)
    }

    fn check_expr(&mut self, expr: &mut Expr) -> CheckResult<TypeId> {
        let location = expr.location;
        let ty = match &mut expr.kind {
            ExprKind::Number(_) => TypeId::NUMBER,
            ExprKind::Boolean(_) => TypeId::BOOLEAN,
            ExprKind::String(_) => TypeId::STRING,
            ExprKind::Variable(name) => {
                let symbol = self.scopes.find(&name.name).ok_or_else(|| {
                    CompilerError::new(
                        format!("Can not find variable or parameter with name '{}'.", name.name),
                        name.location,
                    )
                })?;
                symbol.ty
            }
            ExprKind::Call(call) => {
                let mut arg_types = Vec::with_capacity(call.args.len());
                for arg in call.args.iter_mut() {
                    arg_types.push(self.check_value(arg)?);
                }
                let sig = signature(&call.name.name, arg_types.iter().map(|&t| self.type_name(t)));
                let (_, return_type) = self.info.resolve_call(&sig).ok_or_else(|| {
                    CompilerError::new(format!("Can not find function '{}'.", sig), location)
                })?;
                return_type
            }
            ExprKind::Field(_) | ExprKind::Index(_) => {
                return Err(CompilerError::new(
                    "Field and array access is not implemented yet.",
                    location,
                ));
            }
            ExprKind::Unary(unary) => {
                let operand_ty = self.check_expr(&mut unary.operand)?;
                let expected = match unary.op {
                    UnaryOp::Not => TypeId::BOOLEAN,
                    UnaryOp::Negate => TypeId::NUMBER,
                };
                if operand_ty != expected {
                    return Err(CompilerError::new(
                        format!(
                            "Operand of {} operator is not a '{}', but a '{}'.",
                            unary.op,
                            self.type_name(expected),
                            self.type_name(operand_ty)
                        ),
                        unary.operand.location,
                    ));
                }
                expected
            }
            ExprKind::Binary(binary) => self.check_binary(binary, location)?,
        };
        expr.ty = Some(ty);
        Ok(ty)
    }

    fn check_binary(&mut self, binary: &mut BinaryExpr, location: Location) -> CheckResult<TypeId> {
        let op = binary.op;
        if op.is_equality() {
            let left = self.check_value(&mut binary.left)?;
            let right = self.check_value(&mut binary.right)?;
            if left != right {
                return Err(CompilerError::new(
                    format!(
                        "Can not compare a '{}' to a '{}'.",
                        self.type_name(left),
                        self.type_name(right)
                    ),
                    location,
                ));
            }
            return Ok(TypeId::BOOLEAN);
        }

        let left = self.check_expr(&mut binary.left)?;
        let right = self.check_expr(&mut binary.right)?;
        let (operand, result) = match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => (TypeId::NUMBER, TypeId::NUMBER),
            BinaryOp::Concat => (TypeId::STRING, TypeId::STRING),
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
                (TypeId::NUMBER, TypeId::BOOLEAN)
            }
            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => (TypeId::BOOLEAN, TypeId::BOOLEAN),
            BinaryOp::Equal | BinaryOp::NotEqual => unreachable!("handled above"),
        };
        if left != operand {
            return Err(self.operand_error("Left", op, operand, left, binary.left.location));
        }
        if right != operand {
            return Err(self.operand_error("Right", op, operand, right, binary.right.location));
        }
        Ok(result)
    }

    fn operand_error(&self, side: &str, op: BinaryOp, expected: TypeId, actual: TypeId, location: Location) -> CompilerError {
        CompilerError::new(
            format!(
                "{} operand of {} operator is not a '{}', but a '{}'.",
                side,
                op,
                self.type_name(expected),
                self.type_name(actual)
            ),
            location,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_common::SourceFile;
    use pb_runtime::Value;
    use pretty_assertions::assert_eq;

    fn externals() -> ExternalRegistry<()> {
        let mut registry = ExternalRegistry::new();
        registry.add_sync("print", &[("value", "number")], None, |_, _| Value::Nothing);
        registry.add_sync("print", &[("value", "string")], None, |_, _| Value::Nothing);
        registry
    }

    fn check_src(src: &str) -> CheckResult<(Module, TypeInfo)> {
        let file = SourceFile::new("test.pb", src);
        let program = pb_syntax::parse(&file).map_err(CompilerError::from)?;
        let mut module = Module::from_program(program);
        let info = check(&mut module, &externals())?;
        Ok((module, info))
    }

    fn error_of(src: &str) -> CompilerError {
        match check_src(src) {
            Ok(_) => panic!("expected a compiler error for {:?}", src),
            Err(e) => e,
        }
    }

    #[test]
    fn test_expression_types_are_bound() {
        let (module, _) = check_src("var a = 1 + 2\nvar b = a < 3\nvar c = \"x\" .. \"y\"").unwrap();
        let tys: Vec<_> = module
            .main()
            .body
            .iter()
            .map(|s| match &s.kind {
                StmtKind::Var(v) => (v.ty, v.value.ty, v.slot),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            tys,
            vec![
                (Some(TypeId::NUMBER), Some(TypeId::NUMBER), Some(0)),
                (Some(TypeId::BOOLEAN), Some(TypeId::BOOLEAN), Some(1)),
                (Some(TypeId::STRING), Some(TypeId::STRING), Some(2)),
            ]
        );
    }

    #[test]
    fn test_slots_in_sibling_branches_differ() {
        let (module, _) =
            check_src("fun f(p: number)\n if true then var a = 1 else var a = 2 end\nend").unwrap();
        let f = &module.functions[1];
        assert_eq!(f.params[0].slot, Some(0));
        let StmtKind::If(if_stmt) = &f.body[0].kind else {
            panic!("expected if");
        };
        let slot_of = |stmts: &[Stmt]| match &stmts[0].kind {
            StmtKind::Var(v) => v.slot,
            _ => None,
        };
        assert_eq!(slot_of(&if_stmt.then_block), Some(1));
        assert_eq!(slot_of(&if_stmt.else_block), Some(2));
    }

    #[test]
    fn test_function_registry() {
        let (_, info) = check_src("fun add(a: number, b: number): number return a + b end").unwrap();
        let add = &info.functions["add(number,number)"];
        assert_eq!(add.index, 1);
        assert_eq!(add.params, vec![TypeId::NUMBER, TypeId::NUMBER]);
        assert_eq!(add.return_type, TypeId::NUMBER);
        assert_eq!(info.functions["$main()"].index, 0);
        assert!(info.externals.contains_key("print(number)"));
    }

    #[test]
    fn test_overloading_by_parameter_types() {
        assert!(check_src("fun f(a: number) end\nfun f(a: string) end\nf(1)\nf(\"x\")").is_ok());
        let err = error_of("fun f(a: number) end\nfun f(b: number) end");
        assert_eq!(err.message, "Function 'f(number)' already defined in line 1.");
        assert_eq!(err.location.start.line, 2);
    }

    #[test]
    fn test_collision_with_external() {
        let err = error_of("fun print(v: number) end");
        assert_eq!(err.message, "Function 'print(number)' already defined externally.");
    }

    #[test]
    fn test_operator_errors() {
        assert_eq!(error_of("1 == \"a\"").message, "Can not compare a 'number' to a 'string'.");
        assert_eq!(
            error_of("var x = 1 + true").message,
            "Right operand of + operator is not a 'number', but a 'boolean'."
        );
        assert_eq!(
            error_of("var x = not 1").message,
            "Operand of not operator is not a 'boolean', but a 'number'."
        );
        assert_eq!(
            error_of("var x = 1 .. \"a\"").message,
            "Left operand of .. operator is not a 'string', but a 'number'."
        );
    }

    #[test]
    fn test_loop_control_outside_loop() {
        let err = error_of("var a = 1\nbreak");
        assert_eq!(err.message, "'break' can only be used inside a 'while' or 'repeat' loop.");
        assert_eq!(err.location.start.line, 2);
        assert_eq!(err.location.start.column, 1);
        assert!(check_src("while true do if true then continue end end").is_ok());
    }

    #[test]
    fn test_return_rules() {
        assert_eq!(
            error_of("return 1").message,
            "Can not return a value from the main program."
        );
        assert_eq!(
            error_of("fun f(): number return end").message,
            "Function 'f()' must return a value of type 'number'."
        );
        assert_eq!(
            error_of("fun f() return 1 end").message,
            "Function 'f()' must not return a value."
        );
        assert_eq!(
            error_of("fun f(): number return \"a\" end").message,
            "Function 'f()' must return a value of type 'number', but a value of type 'string' is returned."
        );
    }

    #[test]
    fn test_variables() {
        assert_eq!(
            error_of("var a = 1\nif true then var a = 2 end").message,
            "Variable a already defined in line 1, column 5."
        );
        assert_eq!(
            error_of("var a: string = 1").message,
            "Can't assign a value of type 'number' to variable 'a' with type 'string'."
        );
        assert_eq!(
            error_of("var a: thing = 1").message,
            "Unknown type 'thing' for variable 'a'."
        );
        assert_eq!(
            error_of("print(b)").message,
            "Can not find variable or parameter with name 'b'."
        );
        assert_eq!(
            error_of("var a = 1\na = \"s\"").message,
            "Can not assign a value of type 'string' to a variable of type 'number'."
        );
    }

    #[test]
    fn test_variables_do_not_leak_between_functions() {
        let err = error_of("var a = 1\nfun f() print(a) end");
        assert_eq!(err.message, "Can not find variable or parameter with name 'a'.");
    }

    #[test]
    fn test_calls() {
        assert_eq!(error_of("print(true)").message, "Can not find function 'print(boolean)'.");
        assert_eq!(
            error_of("fun f() end\nvar x = f()").message,
            "Function 'f' does not return a value."
        );
    }

    #[test]
    fn test_declaration_errors() {
        assert_eq!(
            error_of("fun f(a: number, a: string) end").message,
            "Duplicate parameter name 'a' in function 'f(number,string)', see line 1, column 7."
        );
        assert_eq!(
            error_of("fun f(a: thing) end").message,
            "Unknown type 'thing' for parameter 'a' of function 'f(thing)'."
        );
        assert_eq!(error_of("fun f(): thing end").message, "Unknown return type 'thing'.");
        assert_eq!(
            error_of("record P x: number end\nrecord P y: number end").message,
            "Record 'P' already defined in line 1."
        );
        assert_eq!(
            error_of("record P x: number x: string end").message,
            "Duplicate field name 'x' in record 'P', see line 1, column 10."
        );
    }

    #[test]
    fn test_field_access_rejected() {
        let err = error_of("record P x: number end\nfun f(p: P) print(p.x) end");
        assert_eq!(err.message, "Field and array access is not implemented yet.");
    }

    #[test]
    fn test_bad_external_type() {
        let mut registry: ExternalRegistry<()> = ExternalRegistry::new();
        registry.add_sync("f", &[("x", "vector")], None, |_, _| Value::Nothing);
        let file = SourceFile::new("test.pb", "");
        let mut module = Module::from_program(pb_syntax::parse(&file).unwrap());
        let err = check(&mut module, &registry).unwrap_err();
        assert_eq!(
            err.message,
            "Could not find type 'vector' for argument 1 of external function 'f'."
        );
        assert_eq!(err.location, Location::unknown());
    }
}
