use std::{fs::read_to_string, path::{Path, PathBuf}, process::ExitCode, time::Instant};

use clap::{Parser, Subcommand};
use log::{info, warn};

use pikchr_highlight::{
    config::Config,
    errors::errors::{Error, ErrorTip},
    get_line_at_position,
    lexer::{tokenize_document, Token, TokenKind},
    mode::{is_pikchr_path, mode_info},
};

#[derive(Parser)]
#[command(author, version, about = "Pikchr syntax highlighting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a pikchr file
    Lex {
        file: PathBuf,
        /// Emit tokens as JSON
        #[arg(long)]
        json: bool,
        /// Include whitespace tokens
        #[arg(long)]
        all: bool,
    },
    /// Report text the lexer does not recognise
    Check { file: PathBuf },
    /// Print the editor mode declaration as JSON
    Mode,
    /// Print the render configuration resolved from the environment
    Config,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lex { file, json, all } => lex(&file, json, all),
        Commands::Check { file } => check(&file),
        Commands::Mode => print_json(&mode_info()).map(|_| true),
        Commands::Config => print_json(&Config::default()).map(|_| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            display_error(&error);
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_source(file: &Path) -> Result<(String, Vec<Token>), Error> {
    if !is_pikchr_path(file) {
        warn!("{} does not have a .pikchr extension", file.display());
    }

    let source = read_to_string(file)?;

    let start = Instant::now();
    let tokens = tokenize_document(&source);
    info!("Tokenized {} tokens in {:?}", tokens.len(), start.elapsed());

    Ok((source, tokens))
}

fn lex(file: &Path, json: bool, all: bool) -> Result<bool, Error> {
    let (_, tokens) = read_source(file)?;

    let tokens: Vec<Token> = tokens
        .into_iter()
        .filter(|token| all || token.kind != TokenKind::Whitespace)
        .collect();

    if json {
        print_json(&tokens)?;
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    Ok(true)
}

fn check(file: &Path) -> Result<bool, Error> {
    let (source, tokens) = read_source(file)?;

    let unknown: Vec<&Token> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Unknown)
        .collect();

    for token in &unknown {
        display_unknown(&source, token, file);
    }

    if unknown.is_empty() {
        println!("{}: ok", file.display());
    }

    Ok(unknown.is_empty())
}

fn display_error(error: &Error) {
    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}: {}", error.get_error_name(), error);
    } else {
        eprintln!("Error: {}: {} ({})", error.get_error_name(), error, error.get_tip());
    }
}

fn display_unknown(source: &str, token: &Token, file: &Path) {
    /*
        error: unrecognised text `~`
        -> flow.pikchr
           |
        20 | box ~ "a"
           | ----^
    */

    let Some((line, line_text, line_pos)) = get_line_at_position(source, token.span.start.offset())
    else {
        return;
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    println!("Error: unrecognised text {:?}", token.value);
    println!("-> {}", file.display());
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    println!("{} | {}", line_str, line_text_removed.trim_end());

    let column = line_text[..line_pos].chars().count();
    let arrows = column - removed_whitespace + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    let removed = string.len() - trimmed.len();

    (trimmed, removed)
}
