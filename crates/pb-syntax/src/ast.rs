//! Abstract Syntax Tree definitions for Paperbots.
//!
//! The tree is produced by the parser with every `ty`/`slot` field empty; the
//! checker fills them in place and the emitter reads them back.

use pb_common::{signature, BinaryOp, Location, TypeId, UnaryOp};

/// Name of the synthetic function that holds all top-level statements.
pub const MAIN_FUNCTION: &str = "$main";

// ═══════════════════════════════════════════════════════════════════════════
// Program
// ═══════════════════════════════════════════════════════════════════════════

/// A parsed source file: top-level items in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Function(FunctionDecl),
    Record(RecordDecl),
    Statement(Stmt),
}

impl Item {
    pub fn location(&self) -> Location {
        match self {
            Item::Function(f) => f.location,
            Item::Record(r) => r.location,
            Item::Statement(s) => s.location,
        }
    }
}

/// A program regrouped for checking and emission: `$main` first, then user
/// functions in source order, plus all records.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub functions: Vec<FunctionDecl>,
    pub records: Vec<RecordDecl>,
}

impl Module {
    pub fn from_program(program: Program) -> Self {
        let mut main_body = Vec::new();
        let mut functions = Vec::new();
        let mut records = Vec::new();
        for item in program.items {
            match item {
                Item::Function(f) => functions.push(f),
                Item::Record(r) => records.push(r),
                Item::Statement(s) => main_body.push(s),
            }
        }
        let location = match (main_body.first(), main_body.last()) {
            (Some(first), Some(last)) => first.location.to(last.location),
            _ => Location::unknown(),
        };
        let main = FunctionDecl {
            name: Identifier::new(MAIN_FUNCTION, location),
            params: Vec::new(),
            return_type_name: None,
            return_type: Some(TypeId::NOTHING),
            body: main_body,
            location,
        };
        functions.insert(0, main);
        Self { functions, records }
    }

    pub fn main(&self) -> &FunctionDecl {
        &self.functions[0]
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Declarations
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub location: Location,
}

impl Identifier {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

/// A type written in source, e.g. the `number` in `a: number`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub id: Identifier,
}

impl TypeName {
    pub fn name(&self) -> &str {
        &self.id.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Identifier,
    pub type_name: TypeName,
    pub ty: Option<TypeId>,
    pub slot: Option<u16>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub params: Vec<Param>,
    /// `None` means the function returns `nothing`.
    pub return_type_name: Option<TypeName>,
    pub return_type: Option<TypeId>,
    pub body: Vec<Stmt>,
    pub location: Location,
}

impl FunctionDecl {
    /// Overload key built from the declared parameter type names.
    pub fn signature(&self) -> String {
        signature(&self.name.name, self.params.iter().map(|p| p.type_name.name()))
    }

    pub fn is_main(&self) -> bool {
        self.name.name == MAIN_FUNCTION
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: Identifier,
    pub type_name: TypeName,
    pub ty: Option<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    pub name: Identifier,
    pub fields: Vec<RecordField>,
    pub location: Location,
}

// ═══════════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub location: Location,
}

impl Stmt {
    pub fn new(kind: StmtKind, location: Location) -> Self {
        Self { kind, location }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expr(Expr),
    Var(VarDecl),
    Assign(Assignment),
    If(IfStmt),
    While(WhileStmt),
    Repeat(RepeatStmt),
    Return(Option<Expr>),
    Break,
    Continue,
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Identifier,
    pub type_name: Option<TypeName>,
    pub value: Expr,
    pub ty: Option<TypeId>,
    pub slot: Option<u16>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Identifier,
    pub value: Expr,
}

/// `elseif` chains are represented as a nested `IfStmt` that is the only
/// statement of `else_block`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Vec<Stmt>,
    pub else_block: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStmt {
    pub count: Expr,
    pub body: Vec<Stmt>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Location,
    /// Filled in by the checker.
    pub ty: Option<TypeId>,
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Self {
            kind,
            location,
            ty: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Number(f64),
    Boolean(bool),
    String(String),
    Variable(Identifier),
    Call(CallExpr),
    Field(FieldAccess),
    Index(IndexAccess),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: Identifier,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccess {
    pub record: Box<Expr>,
    pub field: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexAccess {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}
