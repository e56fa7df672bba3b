use clap::{Parser as ClapParser, Subcommand};
use simplequery::ParseOptions;
use simplequery::cli::{self, CheckOptions, CheckResult, CliError, OutputFormat};
use simplequery::parser::DEFAULT_MAX_DEPTH;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "simplequery")]
#[command(about = "simplequery - compile boolean filter expressions into syntax trees")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log compilation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Maximum parenthesis nesting and tree depth
    #[arg(long, global = true, env = "SIMPLEQUERY_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an expression and print its tree
    Check {
        /// The filter expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Output format: canonical, pretty or json
        #[arg(short, long, default_value_t = OutputFormat::Canonical)]
        format: OutputFormat,

        /// Only validate syntax, don't print the tree
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the tokens of an expression, one per line
    Tokens {
        /// The filter expression (reads from stdin if not provided)
        expression: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let parse_options = ParseOptions {
        max_depth: cli.max_depth,
    };

    let result = match cli.command {
        Commands::Check {
            expression,
            format,
            syntax_only,
        } => run_check(expression, format, syntax_only, parse_options),
        Commands::Tokens { expression } => run_tokens(expression),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_expression(expression: Option<String>) -> Result<Option<String>, CliError> {
    match expression {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_check(
    expression: Option<String>,
    format: OutputFormat,
    syntax_only: bool,
    parse_options: ParseOptions,
) -> Result<(), CliError> {
    let options = CheckOptions {
        expression: read_expression(expression)?,
        format,
        syntax_only,
        parse_options,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Tree(tree) => println!("{}", tree),
    }
    Ok(())
}

fn run_tokens(expression: Option<String>) -> Result<(), CliError> {
    let expression = read_expression(expression)?.ok_or(CliError::NoInput)?;
    for line in cli::list_tokens(&expression)? {
        println!("{}", line);
    }
    Ok(())
}
