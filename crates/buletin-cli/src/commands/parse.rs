//! Parse command - extract fields from an already-transcribed text dump.
//!
//! Useful when the OCR text is already on disk (saved scans, test dumps):
//! runs only the extractor, no network involved.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use buletin_core::card::{IdCardParser, RecordParser};
use buletin_core::scan::ScanOutcome;

use super::scan::{OutputFormat, format_outcome, load_config, print_report};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file with raw OCR output
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show the extraction report after the output
    #[arg(long)]
    show_report: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let config = load_config(config_path, None)?;
    let raw_text = fs::read_to_string(&args.input)?;

    let parser = IdCardParser::new().with_cnp_validation(config.extraction.validate_cnp);
    let result = parser.parse(&raw_text);

    let outcome = ScanOutcome {
        raw_text,
        record: result.record,
        metadata: result.metadata,
    };

    if outcome.record.is_empty() {
        eprintln!(
            "{} No recognizable ID details found.",
            style("!").yellow()
        );
    }

    let source = args.input.display().to_string();
    let output = format_outcome(&source, &outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_report {
        print_report(&outcome.metadata);
    }

    Ok(())
}
