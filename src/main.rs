//! nn-lang Translator
//!
//! Command-line driver: reads one `.nn` file and either dumps its tokens
//! or translates it to Go.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use nn_lang::{CodeGen, GoCodeGen, Lexer, Parser as NnParser};

/// nn-lang Translator
#[derive(Parser, Debug)]
#[command(name = "nnc")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "nn-lang translator - converts .nn source to Go")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file (.nn)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Indent with N spaces instead of a tab
    #[arg(long, value_name = "N")]
    indent_width: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a source file to Go
    Build {
        /// Input source file
        input: PathBuf,

        /// Output file (defaults to the input path with a .go extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent with N spaces instead of a tab
        #[arg(long, value_name = "N")]
        indent_width: Option<usize>,
    },
    /// Print the token stream of a source file
    Tokens {
        /// Input source file
        input: PathBuf,

        /// Emit JSON instead of one token per line
        #[arg(long)]
        json: bool,

        /// Include whitespace tokens
        #[arg(long)]
        whitespace: bool,
    },
    /// Check a source file for syntax errors
    Check {
        /// Input source file
        input: PathBuf,
    },
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Build {
            input,
            output,
            indent_width,
        }) => {
            let output = output
                .clone()
                .unwrap_or_else(|| input.with_extension(GoCodeGen::new().file_extension()));
            translate_file(input, Some(&output), *indent_width)
        }
        Some(Commands::Tokens {
            input,
            json,
            whitespace,
        }) => dump_tokens(input, *json, *whitespace),
        Some(Commands::Check { input }) => check_file(input),
        Some(Commands::Version) => {
            println!("nnc 0.1.0");
            println!("nn-lang Translator");
            println!("License: Apache-2.0");
            Ok(())
        }
        None => match cli.input {
            Some(ref input) => translate_file(input, cli.output.as_deref(), cli.indent_width),
            None => bail!("No input file specified\nUsage: nnc <FILE> or nnc build <FILE>"),
        },
    }
}

fn read_source(input: &Path) -> Result<String> {
    let source = nn_lang::read_source(input)
        .with_context(|| format!("could not read {}", input.display()))?;
    debug!("read {} bytes from {}", source.len(), input.display());
    Ok(source)
}

fn codegen_for(indent_width: Option<usize>) -> GoCodeGen {
    match indent_width {
        Some(width) => GoCodeGen::new().with_indent_unit(" ".repeat(width)),
        None => GoCodeGen::new(),
    }
}

/// Translate a source file, writing to `output` or stdout
fn translate_file(input: &Path, output: Option<&Path>, indent_width: Option<usize>) -> Result<()> {
    let source = read_source(input)?;

    let mut parser = NnParser::new(Lexer::new(&source));
    let program = parser
        .parse_program()
        .with_context(|| format!("failed to parse {}", input.display()))?;
    info!("parsed {} statements from {}", program.stmts.len(), input.display());

    let codegen = codegen_for(indent_width);
    let generated = codegen.generate(&program);

    match output {
        Some(path) => {
            fs::write(path, &generated)
                .with_context(|| format!("could not write {}", path.display()))?;
            info!("wrote {} output to {}", codegen.name(), path.display());
        }
        None => print!("{}", generated),
    }
    Ok(())
}

fn dump_tokens(input: &Path, json: bool, whitespace: bool) -> Result<()> {
    let source = read_source(input)?;
    let tokens = Lexer::new(&source).with_whitespace(whitespace).tokenize();

    if json {
        let text = serde_json::to_string_pretty(&tokens).context("could not serialize tokens")?;
        println!("{}", text);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }
    Ok(())
}

/// Check a source file for errors without generating code
fn check_file(input: &Path) -> Result<()> {
    let source = read_source(input)?;

    let mut parser = NnParser::new(Lexer::new(&source));
    parser
        .parse_program()
        .with_context(|| format!("failed to parse {}", input.display()))?;

    println!("No errors found in {}", input.display());
    Ok(())
}
