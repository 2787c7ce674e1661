//! Parser tests over complete programs.

use pb_common::{BinaryOp, SourceFile, UnaryOp};
use pb_syntax::ast::*;
use pb_syntax::parse;
use pretty_assertions::assert_eq;

fn parse_src(src: &str) -> Program {
    let file = SourceFile::new("test.pb", src);
    parse(&file).unwrap_or_else(|e| panic!("parse failed: {}", e))
}

fn parse_err(src: &str) -> pb_syntax::SyntaxError {
    let file = SourceFile::new("test.pb", src);
    parse(&file).expect_err("expected a syntax error")
}

fn single_stmt(src: &str) -> StmtKind {
    let program = parse_src(src);
    assert_eq!(program.items.len(), 1);
    match program.items.into_iter().next() {
        Some(Item::Statement(stmt)) => stmt.kind,
        other => panic!("expected statement, got {:?}", other),
    }
}

fn single_expr(src: &str) -> ExprKind {
    match single_stmt(src) {
        StmtKind::Expr(expr) => expr.kind,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_function_declaration() {
    let program = parse_src("fun add(a: number, b: number): number\n  return a + b\nend");
    let Item::Function(f) = &program.items[0] else {
        panic!("expected function");
    };
    assert_eq!(f.name.name, "add");
    assert_eq!(f.params.len(), 2);
    assert_eq!(f.params[1].type_name.name(), "number");
    assert_eq!(f.return_type_name.as_ref().map(|t| t.name()), Some("number"));
    assert_eq!(f.signature(), "add(number,number)");
    assert_eq!(f.location.start.line, 1);
    assert_eq!(f.location.end.line, 3);
    assert!(matches!(f.body[0].kind, StmtKind::Return(Some(_))));
}

#[test]
fn test_record_declaration() {
    let program = parse_src("record Point\n x: number\n y: number\nend");
    let Item::Record(r) = &program.items[0] else {
        panic!("expected record");
    };
    let names: Vec<_> = r.fields.iter().map(|f| f.name.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn test_precedence() {
    let ExprKind::Binary(add) = single_expr("1 + 2 * 3") else {
        panic!("expected binary");
    };
    assert_eq!(add.op, BinaryOp::Add);
    assert!(matches!(add.right.kind, ExprKind::Binary(BinaryExpr { op: BinaryOp::Mul, .. })));

    let ExprKind::Binary(and) = single_expr("1 < 2 and not true") else {
        panic!("expected binary");
    };
    assert_eq!(and.op, BinaryOp::And);
    assert!(matches!(and.left.kind, ExprKind::Binary(BinaryExpr { op: BinaryOp::Less, .. })));
    assert!(matches!(and.right.kind, ExprKind::Unary(UnaryExpr { op: UnaryOp::Not, .. })));
}

#[test]
fn test_left_associative() {
    let ExprKind::Binary(sub) = single_expr("10 - 4 - 3") else {
        panic!("expected binary");
    };
    assert!(matches!(sub.left.kind, ExprKind::Binary(_)));
    assert_eq!(sub.right.kind, ExprKind::Number(3.0));
}

#[test]
fn test_negative_literal_is_unary() {
    let ExprKind::Unary(neg) = single_expr("-1") else {
        panic!("expected unary");
    };
    assert_eq!(neg.op, UnaryOp::Negate);
    assert_eq!(neg.operand.kind, ExprKind::Number(1.0));
}

#[test]
fn test_elseif_nests_in_else_block() {
    let StmtKind::If(outer) = single_stmt("if a then\nelseif b then\n  x = 1\nelse\n  x = 2\nend") else {
        panic!("expected if");
    };
    assert!(outer.then_block.is_empty());
    assert_eq!(outer.else_block.len(), 1);
    let StmtKind::If(inner) = &outer.else_block[0].kind else {
        panic!("expected nested if");
    };
    assert_eq!(inner.then_block.len(), 1);
    assert_eq!(inner.else_block.len(), 1);
    assert_eq!(outer.else_block[0].location.start.line, 2);
}

#[test]
fn test_loops() {
    let StmtKind::Repeat(repeat) = single_stmt("repeat 3 times\n print(1)\n break\nend") else {
        panic!("expected repeat");
    };
    assert_eq!(repeat.count.kind, ExprKind::Number(3.0));
    assert_eq!(repeat.body.len(), 2);

    let StmtKind::While(w) = single_stmt("while true do continue end") else {
        panic!("expected while");
    };
    assert_eq!(w.body[0].kind, StmtKind::Continue);
}

#[test]
fn test_var_and_assignment() {
    let program = parse_src("var a: number = 1\na = 2");
    let Item::Statement(Stmt { kind: StmtKind::Var(var), .. }) = &program.items[0] else {
        panic!("expected var");
    };
    assert_eq!(var.name.name, "a");
    assert_eq!(var.type_name.as_ref().map(|t| t.name()), Some("number"));
    assert!(matches!(
        &program.items[1],
        Item::Statement(Stmt { kind: StmtKind::Assign(_), .. })
    ));
}

#[test]
fn test_return_value_must_be_on_same_line() {
    let program = parse_src("fun f()\n  return\n  print(1)\nend");
    let Item::Function(f) = &program.items[0] else {
        panic!("expected function");
    };
    assert_eq!(f.body.len(), 2);
    assert_eq!(f.body[0].kind, StmtKind::Return(None));
}

#[test]
fn test_comments_become_statements() {
    let program = parse_src("# header\nprint(1) # trailing\nfun f()\n  # inside\nend");
    let kinds: Vec<_> = program
        .items
        .iter()
        .map(|item| match item {
            Item::Statement(Stmt { kind: StmtKind::Comment(c), .. }) => format!("comment:{}", c.trim()),
            Item::Statement(_) => "stmt".to_string(),
            Item::Function(f) => format!("fun:{}", f.body.len()),
            Item::Record(_) => "record".to_string(),
        })
        .collect();
    assert_eq!(kinds, vec!["comment:header", "stmt", "comment:trailing", "fun:1"]);
}

#[test]
fn test_field_and_index_access_parse() {
    assert!(matches!(single_expr("p.x"), ExprKind::Field(_)));
    assert!(matches!(single_expr("a[1]"), ExprKind::Index(_)));
}

#[test]
fn test_module_puts_main_first() {
    let program = parse_src("fun f() end\nprint(1)\nprint(2)");
    let module = Module::from_program(program);
    assert_eq!(module.functions.len(), 2);
    assert!(module.main().is_main());
    assert_eq!(module.main().body.len(), 2);
    assert_eq!(module.functions[1].name.name, "f");
}

#[test]
fn test_errors_carry_locations() {
    let err = parse_err("if true then\n  print(1)\n");
    assert_eq!(err.message, "Expected 'end', but found 'end of file'.");

    let err = parse_err("var = 3");
    assert_eq!(err.location.start.line, 1);
    assert_eq!(err.location.start.column, 5);

    let err = parse_err("print(1)\n  $");
    assert_eq!(err.message, "Unexpected character '$'.");
    assert_eq!(err.location.start.line, 2);

    let err = parse_err("fun f()\n fun g() end\nend");
    assert_eq!(err.message, "Functions can only be declared at the top level.");
}
