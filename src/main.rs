use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::{fs::read_to_string, process::ExitCode};

use capuchin::evaluator::formatter::{
    PrettyFormatter as PrettyValueFormatter, ValueFormatter,
};
use capuchin::evaluator::{eval, Environment};
use capuchin::lexer::formatter::{
    BasicFormatter as BasicTokenFormatter, DebugFormatter as DebugTokenFormatter,
    LineFormatter as LineTokenFormatter, ToFormatter, TokenFormatter,
};
use capuchin::lexer::{Lexer, TokenKind};
use capuchin::parser::formatter::{
    DebugFormatter as DebugProgramFormatter, PrettyFormatter as PrettyProgramFormatter,
    ProgramFormatter, SourceFormatter,
};
use capuchin::parser::Parser;

#[derive(Debug, ClapParser)]
#[clap(name = "capuchin", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: CapuchinCommand,
}

#[derive(Debug, Subcommand)]
pub enum CapuchinCommand {
    /// Print the token stream of a script.
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    /// Parse a script and print it back, fully parenthesized.
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "source")]
        format: ProgramFormat,
    },
    /// Evaluate a script and print the resulting value.
    Run {
        path: PathBuf,
    },
    /// Interactive prompt holding one environment across lines.
    Repl,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
    Line,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ProgramFormat {
    Debug,
    Source,
    Pretty,
}

fn main() -> ExitCode {
    capuchin_main().expect("Encountered an error!")
}

fn capuchin_main() -> Result<ExitCode> {
    color_eyre::install().expect("Can't fail at first call!");
    let args = CLArgs::parse();
    match args.routine {
        CapuchinCommand::Tokenize { path, format } => {
            let src = read_to_string(&path)?;
            if !tokenize(&src, &format) {
                return Ok(ExitCode::from(65));
            }
        }
        CapuchinCommand::Parse { path, format } => {
            let src = read_to_string(&path)?;
            if !parse(&src, &path.to_string_lossy(), &format) {
                return Ok(ExitCode::from(65));
            }
        }
        CapuchinCommand::Run { path } => {
            let src = read_to_string(&path)?;
            return run(&src, &path.to_string_lossy());
        }
        CapuchinCommand::Repl => {
            repl()?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn tokenize(src: &str, format: &TokenFormat) -> bool {
    let mut scanner = Lexer::new(src);
    let formatter: Box<dyn TokenFormatter + '_> = match format {
        TokenFormat::Debug => Box::new(ToFormatter::<DebugTokenFormatter>::create_formatter(
            &scanner,
        )),
        TokenFormat::Basic => Box::new(ToFormatter::<BasicTokenFormatter>::create_formatter(
            &scanner,
        )),
        TokenFormat::Line => Box::new(ToFormatter::<LineTokenFormatter>::create_formatter(
            &scanner,
        )),
    };
    let mut succeeded = true;
    loop {
        let token = scanner.next_token();
        println!("{}", formatter.format(&token));
        match token.kind {
            TokenKind::Eof => return succeeded,
            TokenKind::Illegal => succeeded = false,
            _ => {}
        }
    }
}

fn parse(src: &str, path: &str, format: &ProgramFormat) -> bool {
    let mut parser = Parser::new(src);
    let program = parser.parse();
    let formatter: Box<dyn ProgramFormatter + '_> = match format {
        ProgramFormat::Debug => Box::new(DebugProgramFormatter),
        ProgramFormat::Source => Box::new(SourceFormatter),
        ProgramFormat::Pretty => Box::new(PrettyProgramFormatter::new(src, path)),
    };
    if !parser.errors().is_empty() {
        for error in parser.errors() {
            eprintln!("{}", formatter.format_error(error));
        }
        return false;
    }
    println!("{}", formatter.format(&program));
    true
}

fn run(src: &str, path: &str) -> Result<ExitCode> {
    let mut parser = Parser::new(src);
    let program = parser.parse();
    if !parser.errors().is_empty() {
        let formatter = PrettyProgramFormatter::new(src, path);
        for error in parser.errors() {
            eprintln!("{}", formatter.format_error(error));
        }
        return Ok(ExitCode::from(65));
    }

    let mut environment = Environment::new();
    match eval(&program, &mut environment) {
        Ok(value) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let formatter = PrettyValueFormatter::new(src, path);
            eprintln!("{}", formatter.format_error(&error));
            Ok(ExitCode::from(70))
        }
    }
}

fn repl() -> Result<()> {
    const PROMPT: &str = ">> ";

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut environment = Environment::new();
    let mut line = String::new();
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let mut parser = Parser::new(&line);
        let program = parser.parse();
        if !parser.errors().is_empty() {
            for error in parser.errors() {
                println!("{error}");
            }
            continue;
        }
        match eval(&program, &mut environment) {
            Ok(value) => println!("{value}"),
            Err(error) => println!("Error: {error}"),
        }
    }
}
