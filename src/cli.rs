//! CLI module - Command-line interface definition and run loop

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::backends::walk::{collect_file_paths, scan_paths};
use crate::core::config::{ScanConfig, TextEncoding};
use crate::core::logging::{init_logging, Verbosity};
use crate::core::model::Report;
use crate::core::normalize::NormalizeConfig;
use crate::core::report::write_report;

/// wordscan - per-page, per-paragraph and per-slide word counts for a directory of documents.
#[derive(Parser, Debug)]
#[command(name = "wordscan")]
#[command(
    author,
    version,
    about,
    long_about = r#"wordscan extracts the text of every supported document under DIRECTORY and
writes one CSV row per distinct word per unit to ./word_scan_result.tmp.csv.

Supported formats and what a unit is:
- .txt: the whole file (unit_index 0)
- .docx: a body paragraph (unit_index 1, 2, ...)
- .pptx: a slide shape, numbered across the whole deck (1, 2, ...)
- .pdf: a page (1, 2, ...)

Files with any other extension are reported and skipped. A file that cannot
be read is reported and skipped; it never stops the scan.

Exit status: 0 report written, 1 nothing to report, 2 report could not be written.

Examples:
    wordscan ./docs
    wordscan -r ./docs
    wordscan -r --drop-empty --replacement ' ' ./docs
"#
)]
pub struct Cli {
    /// Directory to scan.
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Include files in subdirectories.
    #[arg(
        short,
        long,
        long_help = "Descend into subdirectories at any depth.\n\n\
By default only files directly inside DIRECTORY are scanned."
    )]
    pub recursive: bool,

    /// Character substituted for symbols inside words.
    #[arg(
        long,
        env = "WORDSCAN_REPLACEMENT",
        default_value = "_",
        value_name = "CHAR",
        value_parser = parse_replacement,
        long_help = "Character substituted for every symbol (anything but ASCII letters,\n\
digits and space) that is not directly followed by a space.\n\n\
Symbols directly followed by a space always become spaces. Use ' ' to make\n\
every symbol a word separator."
    )]
    pub replacement: char,

    /// Do not count empty words.
    #[arg(
        long,
        long_help = "Drop the empty-string words produced by consecutive spaces.\n\n\
By default they are counted and appear in the report with an empty word column."
    )]
    pub drop_empty: bool,

    /// Decode invalid UTF-8 in .txt files instead of skipping the file.
    #[arg(
        long,
        long_help = "Replace invalid UTF-8 sequences in .txt files with U+FFFD.\n\n\
By default such files are reported as unreadable and skipped."
    )]
    pub lossy: bool,

    /// Disable colored log output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors. Skipped-file notices and the run summary are suppressed."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log per-file details such as the number of units extracted.\n\n\
WORDSCAN_LOG (EnvFilter syntax) overrides both --quiet and --verbose."
    )]
    pub verbose: bool,
}

impl Cli {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            recursive: self.recursive,
            normalize: NormalizeConfig::new(self.replacement),
            keep_empty_tokens: !self.drop_empty,
            text_encoding: if self.lossy {
                TextEncoding::Lossy
            } else {
                TextEncoding::Strict
            },
            ..ScanConfig::new(&self.directory)
        }
    }
}

fn parse_replacement(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some('\n'), None) => Err("newline cannot be used as replacement".to_string()),
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got {:?}", s)),
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Report written with at least one row
    Written { rows: usize },
    /// Files were found but produced no rows; a header-only report was written
    Empty,
    /// No candidate files, no report
    NoFiles,
}

/// Exit status when the report cannot be written
pub const EXIT_WRITE_FAILURE: u8 = 2;

impl RunStatus {
    pub fn code(&self) -> u8 {
        match self {
            RunStatus::Written { .. } => 0,
            RunStatus::Empty | RunStatus::NoFiles => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Run the CLI with parsed arguments.
///
/// Only a report write failure is returned as an error.
pub fn run(cli: Cli) -> Result<RunStatus> {
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose), cli.no_color);
    let config = cli.scan_config();

    let paths = match collect_file_paths(&config.root, config.recursive) {
        Ok(paths) => paths,
        Err(err) => {
            error!("{:#}", err);
            return Ok(RunStatus::NoFiles);
        }
    };
    if paths.is_empty() {
        warn!("No files found under {}", config.root.display());
        return Ok(RunStatus::NoFiles);
    }

    let mut report = Report::new();
    let summary = scan_paths(&paths, &config, &mut report);
    info!(
        "Scanned {} file(s): {} processed, {} unsupported, {} failed, {} record(s)",
        summary.discovered, summary.processed, summary.unsupported, summary.failed, summary.records
    );

    let rows = write_report(&report, &config.output)
        .with_context(|| format!("Failed to write report {}", config.output.display()))?;
    info!("Data has been written to {}", config.output.display());

    if report.is_empty() {
        warn!("No words were extracted; the report only has a header");
        return Ok(RunStatus::Empty);
    }
    Ok(RunStatus::Written { rows })
}
