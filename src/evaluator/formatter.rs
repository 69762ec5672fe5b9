use super::{RuntimeError, RuntimeErrorKind, Value};
use ariadne::{Color, Label, Report, ReportKind, Source};

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

pub trait ValueFormatter {
    fn format(&self, value: &Value) -> String;
    fn format_error(&self, error: &RuntimeError) -> String;
}

pub struct DebugFormatter;

impl ValueFormatter for DebugFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value:?}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("{error:?}")
    }
}

/// The inspect form used by the REPL: values display themselves and
/// errors come out as `Error: <message>`.
pub struct BasicFormatter;

impl ValueFormatter for BasicFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("Error: {error}")
    }
}

pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src str,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src str) -> Self {
        Self { text, path }
    }
}

impl<'src> ValueFormatter for PrettyFormatter<'src> {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let path = self.path;
        let span = error.span;
        let mut output = std::io::Cursor::new(Vec::new());
        let label = match &error.kind {
            RuntimeErrorKind::IdentifierNotFound(_) => "Not bound in any enclosing scope",
            RuntimeErrorKind::UnknownPrefixOperator { .. }
            | RuntimeErrorKind::UnknownInfixOperator { .. } => "Operator is not defined here",
            RuntimeErrorKind::TypeMismatch { .. } => "Operands have different types",
            RuntimeErrorKind::NotCallable(_) => "Not a function value",
            RuntimeErrorKind::DivisionByZero => "Divisor evaluated to zero",
        };
        Report::build(ReportKind::Error, (path, span.range()))
            .with_code(error.code())
            .with_message(error.kind.to_string())
            .with_label(
                Label::new((path, span.range()))
                    .with_message(label)
                    .with_color(Color::BrightRed),
            )
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .expect(ARIADNE_WRITE_MSG);
        String::from_utf8(output.into_inner()).expect(ARIADNE_MSG)
    }
}
