// src/main.rs
//
// html-string-tools — convert between plain text and HTML
//
// Subcommands:
//   text-to-html  : plain text → <!DOCTYPE html> document of <p> paragraphs
//   html-to-text  : HTML → plain text (optionally keeping <a>, <b>, <i>, <hr>, <img>)
//   format        : one tag per line, indented by nesting depth
//
// Input files are decoded as UTF-8, falling back to Latin-1. Output is UTF-8.
// Set RUST_LOG=debug to see which encoding was used.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use html_string_tools::{convert_html_file, convert_text_file, format_html_file, DEFAULT_INDENT};
use std::path::PathBuf;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a text file into an HTML file of paragraphs
    TextToHtml {
        /// Input text file to convert into HTML
        #[arg(short, long)]
        input: PathBuf,

        /// Output HTML file
        #[arg(short, long)]
        output: PathBuf,

        /// The text file already contains some HTML formatting tags
        #[arg(short, long, action = ArgAction::SetTrue)]
        contains_html: bool,
    },

    /// Convert an HTML file into plain text
    HtmlToText {
        /// Input HTML file to convert into text
        #[arg(short, long)]
        input: PathBuf,

        /// Output text file
        #[arg(short, long)]
        output: PathBuf,

        /// Keep basic HTML tags (<a>, <b>, <i>, <hr>, <img>) in the exported text
        #[arg(short, long, action = ArgAction::SetTrue)]
        keep_tags: bool,
    },

    /// Re-indent an HTML file, one tag per line
    Format {
        /// Input HTML file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// String used for one level of indentation
        #[arg(long, default_value = DEFAULT_INDENT)]
        indent: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::TextToHtml {
            input,
            output,
            contains_html,
        } => convert_text_file(&input, &output, contains_html)
            .with_context(|| format!("converting {} to HTML", input.display())),
        Command::HtmlToText {
            input,
            output,
            keep_tags,
        } => convert_html_file(&input, &output, keep_tags)
            .with_context(|| format!("converting {} to text", input.display())),
        Command::Format {
            input,
            output,
            indent,
        } => {
            let out_path = output.as_ref().unwrap_or(&input);
            format_html_file(&input, out_path, &indent)
                .with_context(|| format!("formatting {}", input.display()))
        }
    }
}
