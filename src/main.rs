use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::info;
use typeinfer::{
    annotate::{annotate, describe},
    infer,
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The source with every typed expression wrapped as `type:<expr>`.
    Annotate,
    /// One `line:col: type: expr` entry per typed expression.
    List,
}

#[derive(Parser)]
#[command(
    name = "typeinfer",
    version,
    about = "Infer expression types in a BUILD or .bzl file."
)]
struct Cli {
    /// Path to the source file.
    input: PathBuf,

    /// How to print the inferred types.
    #[arg(long, value_enum, default_value_t = Format::Annotate)]
    format: Format,

    /// Dump the token stream produced by the lexer.
    #[arg(long)]
    dump_tokens: bool,

    /// Dump the parsed syntax tree.
    #[arg(long)]
    dump_ast: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let source = read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.display().to_string());

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            return Ok(ExitCode::FAILURE);
        }
    };

    info!("Tokenized in {:?}", start.elapsed());

    if cli.dump_tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let module = match parse(tokens, Rc::new(file_name)).1 {
        Ok(module) => module,
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            return Ok(ExitCode::FAILURE);
        }
    };

    info!("Parsed in {:?}", parse_start.elapsed());

    if cli.dump_ast {
        println!("{:#?}", module);
    }

    let infer_start = Instant::now();
    let types = infer(&module);

    info!("Inferred {} types in {:?}", types.len(), infer_start.elapsed());

    match cli.format {
        Format::Annotate => print!("{}", annotate(&source, &module, &types)),
        Format::List => {
            for typed in describe(&source, &module, &types) {
                println!("{}", typed);
            }
        }
    }

    info!("Total time: {:?}", start.elapsed());
    Ok(ExitCode::SUCCESS)
}
