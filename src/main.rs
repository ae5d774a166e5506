//! exprtree CLI
//!
//! Lexes and parses an arithmetic expression, prints the tree and writes it
//! out as JSON.

use std::env;
use std::fs;
use std::process;

use exprtree::logger::{self, LogLevel};
use exprtree::{lex, parse, Diagnostic, ExprError, VERSION};

const DEFAULT_SOURCE: &str = "(1 + 5 / 2)";
const DEFAULT_OUTPUT: &str = "ast.json";

/// Where the source text comes from
#[derive(Debug, Clone, PartialEq)]
enum Input {
    File(String),
    Inline(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Options {
    input: Input,
    output: String,
    show_tokens: bool,
    verbose: bool,
    show_help: bool,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut filename: Option<String> = None;
        let mut expr: Option<String> = None;
        let mut output = DEFAULT_OUTPUT.to_string();
        let mut show_tokens = false;
        let mut verbose = false;
        let mut show_help = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--tokens" | "-t" => show_tokens = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => show_help = true,
                "--expr" | "-e" => {
                    let value = iter.next().ok_or_else(|| format!("Missing value for {}", arg))?;
                    expr = Some(value.clone());
                }
                "--output" | "-o" => {
                    let value = iter.next().ok_or_else(|| format!("Missing value for {}", arg))?;
                    output = value.clone();
                }
                _ if arg.starts_with('-') => return Err(format!("Unknown flag: {}", arg)),
                _ => {
                    if filename.is_some() {
                        return Err(format!("Unexpected argument: {}", arg));
                    }
                    filename = Some(arg.clone());
                }
            }
        }

        let input = match (filename, expr) {
            (Some(_), Some(_)) => return Err("Pass either a file or --expr, not both".to_string()),
            (Some(file), None) => Input::File(file),
            (None, Some(text)) => Input::Inline(text),
            (None, None) => Input::Inline(DEFAULT_SOURCE.to_string()),
        };

        Ok(Self {
            input,
            output,
            show_tokens,
            verbose,
            show_help,
        })
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match Options::parse(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            print_usage();
            process::exit(1);
        }
    };

    if options.show_help {
        print_help();
        return;
    }

    logger::init_with_level(if options.verbose { LogLevel::Debug } else { LogLevel::Warn });

    if let Err(message) = run(&options) {
        eprintln!("{}", message);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: exprtree [OPTIONS] [file]");
    eprintln!("       exprtree --help");
}

fn print_help() {
    println!("exprtree v{} - arithmetic expression parser", VERSION);
    println!();
    println!("USAGE:");
    println!("    exprtree [OPTIONS] [file]");
    println!();
    println!("OPTIONS:");
    println!("    -e, --expr <TEXT>      Parse TEXT instead of a file");
    println!("    -o, --output <PATH>    Where to write the JSON tree (default: {})", DEFAULT_OUTPUT);
    println!("    -t, --tokens           Show tokenization output (lexer only)");
    println!("    -v, --verbose          Enable debug logging");
    println!("    -h, --help             Show this help message");
    println!();
    println!("Without a file or --expr the source is {:?}.", DEFAULT_SOURCE);
}

fn run(options: &Options) -> Result<(), String> {
    let (source, name) = match options.input {
        Input::File(ref file) => {
            let source = fs::read_to_string(file)
                .map_err(|e| format!("Failed to read file '{}': {}", file, e))?;
            (source, file.as_str())
        }
        Input::Inline(ref text) => (text.clone(), "<expr>"),
    };

    let report = |err: ExprError| Diagnostic::with_source(err, &source).filename(name).to_string();

    let tokens = lex(&source).map_err(report)?;

    if options.show_tokens {
        println!("Tokens for '{}':", name);
        println!("{}", "=".repeat(60));
        for (i, token) in tokens.iter().enumerate() {
            let value = token.value.as_ref().map(|v| v.to_string()).unwrap_or_default();
            println!("{:4}: {:12} | {:8} | {}", i, token.kind.to_string(), token.position.to_string(), value);
        }
        println!("{}", "=".repeat(60));
        println!("Total tokens: {}", tokens.len());
        return Ok(());
    }

    let ast = parse(&tokens).map_err(report)?;

    println!("AST:");
    println!("{:#?}", ast);

    let json = ast
        .to_json()
        .map_err(|e| format!("Failed to serialize AST: {}", e))?;
    fs::write(&options.output, json)
        .map_err(|e| format!("Failed to write '{}': {}", options.output, e))?;
    tracing::info!(path = %options.output, "wrote AST");

    Ok(())
}
