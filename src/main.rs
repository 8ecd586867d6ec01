//! wordscan - word frequency reports for directories of documents
//!
//! wordscan provides:
//! - Flat or recursive directory traversal
//! - Text extraction from .txt, .docx, .pptx and .pdf files
//! - Per-unit (page, paragraph, slide shape, whole file) word counts
//! - A single CSV report in the current directory

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

mod backends;
mod cli;
mod core;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli::run(cli) {
        Ok(status) => status.exit_code(),
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(cli::EXIT_WRITE_FAILURE)
        }
    }
}
