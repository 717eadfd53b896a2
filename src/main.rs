//! CLI tool to inspect how template scripts are split and tokenized.

use std::fs;
use std::process::ExitCode;

use scriptlex::{Block, LexOptions, lex_document, render_segments, render_tokens, split_with};

/// Installs a stderr subscriber when `RUST_LOG` is set,
/// e.g. `RUST_LOG=scriptlex=trace`.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn usage() -> ExitCode {
    eprintln!("Usage: scriptlex <command> [--strict] [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  segments  Print the RAW/CODE segments of each file");
    eprintln!("  tokens    Print the tokens of every CODE block");
    eprintln!("  check     Check that each file lexes without errors");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --strict  Report unterminated strings, comments and heredocs");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return usage();
    }

    let command = args[1].as_str();
    let mut options = LexOptions::default();
    let mut files = Vec::new();
    for arg in &args[2..] {
        if arg == "--strict" {
            options = options.strict();
        } else {
            files.push(arg.as_str());
        }
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "segments" => {
                print!("{}", render_segments(&content, &split_with(&content, &options)));
            }
            "tokens" => match lex_document(&content, &options) {
                Ok(blocks) => {
                    for block in &blocks {
                        if let Block::Code { tokens, .. } = block {
                            print!("{}", render_tokens(&content, tokens));
                        }
                    }
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "check" => match lex_document(&content, &options) {
                Ok(blocks) => {
                    let code = blocks
                        .iter()
                        .filter(|b| matches!(b, Block::Code { .. }))
                        .count();
                    let tokens: usize = blocks
                        .iter()
                        .map(|b| match b {
                            Block::Code { tokens, .. } => tokens.len(),
                            Block::Raw(_) => 0,
                        })
                        .sum();
                    eprintln!("{path}: ok ({code} code block(s), {tokens} token(s))");
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
