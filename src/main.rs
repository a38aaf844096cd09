use std::{fs, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use clap::{ArgAction, Parser, ValueEnum};
use fluentc::{
    build_stage, codegen::codegen::GeneratorOptions, display_error, errors::errors::Error,
    generate_stage, lex_stage, parse_stage, runner,
};
use tracing::{debug, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

/// How far the pipeline runs before printing its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// The token stream
    Tokens,
    /// The parse tree
    Parse,
    /// The canonical AST
    Ast,
    /// The generated Python source
    Python,
    /// Execute the generated Python
    Run,
}

#[derive(Parser, Debug)]
#[command(name = "fluentc", version, about = "Translate a Fluent program to Python and run it")]
struct Cli {
    /// The Fluent source file, conventionally `*.is`
    file: PathBuf,

    /// Stop after this stage and print its output
    #[arg(long = "stage", value_enum, default_value_t = Emit::Run)]
    emit: Emit,

    /// Interpreter the generated program is piped to
    #[arg(long, default_value = runner::DEFAULT_INTERPRETER)]
    python: String,

    /// Treat calls to unknown names as calls to user functions
    #[arg(long)]
    permissive: bool,

    /// Spaces per indentation level in the generated code
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..))]
    indent: u8,

    /// Use verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let level_filter = match verbosity {
        0 => None,
        1 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    };

    let builder = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // Verbosity flags override RUST_LOG
    if let Some(level_filter) = level_filter {
        builder.with_max_level(level_filter).init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.file.extension().and_then(|extension| extension.to_str()) != Some("is") {
        warn!("{} does not have the `.is` extension", cli.file.display());
    }

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: cannot read {}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.file.display().to_string());

    match run_pipeline(&cli, &source, file_name) {
        Ok(code) => code,
        Err(error) => {
            display_error(&error, &source);
            ExitCode::FAILURE
        }
    }
}

fn run_pipeline(cli: &Cli, source: &str, file_name: String) -> Result<ExitCode, Error> {
    let start = Instant::now();
    let file_name = Rc::new(file_name);

    let tokens = lex_stage(source, &file_name)?;
    if cli.emit == Emit::Tokens {
        for token in &tokens {
            println!("{} {}", token.span.start, token);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let tree = parse_stage(tokens, &file_name)?;
    if cli.emit == Emit::Parse {
        print!("{}", tree.pretty());
        return Ok(ExitCode::SUCCESS);
    }

    let program = build_stage(&tree)?;
    if cli.emit == Emit::Ast {
        println!("{:#?}", program);
        return Ok(ExitCode::SUCCESS);
    }

    let options = GeneratorOptions {
        strict_calls: !cli.permissive,
        indent_width: usize::from(cli.indent),
    };

    let python = generate_stage(&program, &options)?;
    debug!("total time: {:?}", start.elapsed());

    if cli.emit == Emit::Python {
        print!("{}", python);
        return Ok(ExitCode::SUCCESS);
    }

    match runner::run(&python, &cli.python) {
        Ok(status) => {
            debug!("{} exited with {}", cli.python, status);
            let code = status.code().and_then(|code| u8::try_from(code).ok());
            Ok(code.map(ExitCode::from).unwrap_or(ExitCode::FAILURE))
        }
        Err(error) => {
            eprintln!("Error: cannot start `{}`: {}", cli.python, error);
            Ok(ExitCode::FAILURE)
        }
    }
}
