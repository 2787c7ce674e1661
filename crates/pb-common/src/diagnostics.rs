//! Rendering of compiler errors with `codespan-reporting`.

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::{self, Config};
use termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};

use crate::error::CompilerError;
use crate::source::SourceFile;

fn to_diagnostic(error: &CompilerError, source: &SourceFile) -> Diagnostic<()> {
    let mut range = error.location.byte_range();
    let len = source.source().len();
    range.start = range.start.min(len);
    range.end = range.end.clamp(range.start, len);
    Diagnostic::error()
        .with_message(&error.message)
        .with_labels(vec![Label::primary((), range)])
}

/// Emits `error` to `writer`, pointing into `source`.
pub fn emit(
    writer: &mut dyn WriteColor,
    error: &CompilerError,
    source: &SourceFile,
) -> Result<(), codespan_reporting::files::Error> {
    let file = SimpleFile::new(source.name(), source.source());
    let diagnostic = to_diagnostic(error, source);
    term::emit(writer, &Config::default(), &file, &diagnostic)
}

/// Emits `error` to stderr, colored when the terminal supports it.
pub fn emit_to_stderr(
    error: &CompilerError,
    source: &SourceFile,
) -> Result<(), codespan_reporting::files::Error> {
    let stream = StandardStream::stderr(ColorChoice::Auto);
    let mut lock = stream.lock();
    emit(&mut lock, error, source)
}

/// Renders `error` as plain text.
pub fn render(error: &CompilerError, source: &SourceFile) -> String {
    let mut out = NoColor::new(Vec::new());
    if emit(&mut out, error, source).is_err() {
        return error.to_string();
    }
    String::from_utf8_lossy(&out.into_inner()).into_owned()
}
