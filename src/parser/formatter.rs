use super::{ParserError, ParserErrorKind, Program};
use ariadne::{Color, Label, Report, ReportKind, Source};

const ARIADNE_MSG: &str = "Ariadne produces valid utf-8 strings";
const ARIADNE_WRITE_MSG: &str = "Write into buffer should not fail.";

pub trait ProgramFormatter {
    fn format(&self, program: &Program) -> String;
    fn format_error(&self, error: &ParserError) -> String;
}

pub struct DebugFormatter;

impl ProgramFormatter for DebugFormatter {
    fn format(&self, program: &Program) -> String {
        format!("{program:?}")
    }

    fn format_error(&self, error: &ParserError) -> String {
        format!("{error:?}")
    }
}

/// Prints programs back as fully parenthesized source text and errors as
/// single `[line N]` diagnostics.
pub struct SourceFormatter;

impl ProgramFormatter for SourceFormatter {
    fn format(&self, program: &Program) -> String {
        program.to_string()
    }

    fn format_error(&self, error: &ParserError) -> String {
        error.to_string()
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

impl<'src> ProgramFormatter for PrettyFormatter<'src> {
    fn format(&self, program: &Program) -> String {
        program.to_string()
    }

    fn format_error(&self, error: &ParserError) -> String {
        let path = self.path;
        let span = error.span;
        let mut output = std::io::Cursor::new(Vec::new());
        let label = match &error.kind {
            ParserErrorKind::UnexpectedToken { expected, actual } => {
                format!("Expected {expected} but got {actual}")
            }
            ParserErrorKind::NoPrefixParseFunction(kind) => {
                format!("Not an expression token {kind}")
            }
            ParserErrorKind::IntegerOutOfRange(_) => {
                "Does not fit into a 64-bit signed integer".to_string()
            }
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
