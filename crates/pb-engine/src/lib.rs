//! # pb-engine
//!
//! The compile pipeline, from source text to a VM-ready program:
//!
//! ```text
//! source → parse → Module → check → TypeInfo → emit → [FunctionCode]
//! ```
//!
//! The first error of any phase ends compilation and is returned as a
//! [`CompilerError`].

use std::fmt;
use std::sync::Arc;

use pb_analysis::TypeInfo;
use pb_common::{CompilerError, SourceFile};
use pb_runtime::{register_std, ExternalRegistry, StdHost};
use pb_syntax::ast::Module;
use pb_vm::{FunctionCode, Vm};

/// Result of a successful compilation.
pub struct Compiled<H> {
    /// `$main` first, then user functions in source order.
    pub functions: Arc<[FunctionCode]>,
    pub externals: Arc<ExternalRegistry<H>>,
    pub type_info: TypeInfo,
    /// The checked AST, with types and slots filled in.
    pub ast: Module,
}

impl<H> Compiled<H> {
    /// A fresh VM for this program, positioned at the start of `$main`.
    pub fn vm(&self, host: H) -> Vm<H> {
        Vm::new(Arc::clone(&self.functions), Arc::clone(&self.externals), host)
    }

    pub fn function(&self, signature: &str) -> Option<&FunctionCode> {
        self.functions.iter().find(|f| f.signature == signature)
    }

    /// Human-readable listing of every function.
    pub fn disassemble(&self) -> Disassembly<'_> {
        Disassembly(&self.functions)
    }
}

impl<H> fmt::Debug for Compiled<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiled")
            .field("functions", &self.functions.len())
            .field("externals", &self.externals.len())
            .finish()
    }
}

pub struct Disassembly<'a>(&'a [FunctionCode]);

impl fmt::Display for Disassembly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

/// Compiles `source` against the given externals.
pub fn compile<H>(source: &str, externals: Arc<ExternalRegistry<H>>) -> Result<Compiled<H>, CompilerError> {
    compile_file(&SourceFile::new("<source>", source), externals)
}

#[tracing::instrument(skip_all, fields(file = file.name()))]
pub fn compile_file<H>(file: &SourceFile, externals: Arc<ExternalRegistry<H>>) -> Result<Compiled<H>, CompilerError> {
    let program = pb_syntax::parse(file)?;
    tracing::debug!(items = program.items.len(), "parsed");

    let mut module = Module::from_program(program);
    let type_info = pb_analysis::check(&mut module, externals.as_ref())?;
    tracing::debug!(
        functions = type_info.functions.len(),
        types = type_info.registry.len(),
        "checked"
    );

    let functions = pb_codegen::compile_module(&module, &type_info)?;
    Ok(Compiled {
        functions: functions.into(),
        externals,
        type_info,
        ast: module,
    })
}

/// A registry holding only the standard externals.
pub fn std_externals<H: StdHost + 'static>() -> Arc<ExternalRegistry<H>> {
    let mut registry = ExternalRegistry::new();
    register_std(&mut registry);
    Arc::new(registry)
}
