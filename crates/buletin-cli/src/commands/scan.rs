//! Scan command - OCR a single ID card image and extract its fields.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::debug;

use buletin_core::card::IdCardParser;
use buletin_core::card::rules::parse_issue_date;
use buletin_core::models::config::BuletinConfig;
use buletin_core::models::record::{ExtractionMetadata, FieldKind, IdentityRecord};
use buletin_core::scan::{IdScanner, ScanOutcome};
use buletin_core::{OcrInput, OcrSpaceClient};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input image file, or a remote URL with --url
    #[arg(required = true)]
    input: String,

    /// Treat the input as a URL for the OCR service to fetch
    #[arg(long)]
    url: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// OCR service API key (overrides the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// Show the extraction report after the output
    #[arg(long)]
    show_report: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON document with record and report
    Json,
    /// field,value rows, one per extracted field
    Csv,
    /// Plain text summary
    Text,
}

/// Serialized scan output document.
#[derive(Serialize)]
struct ScanDocument<'a> {
    extracted_at: DateTime<Utc>,
    source: &'a str,
    record: &'a IdentityRecord,
    metadata: &'a ExtractionMetadata,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path, args.api_key.as_deref())?;

    let input = if args.url {
        OcrInput::Url(args.input.clone())
    } else {
        let path = PathBuf::from(&args.input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        check_extension(&path)?;

        let data = fs::read(&path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        OcrInput::Bytes { filename, data }
    };

    // Create progress bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Calling OCR service...");
    pb.set_position(20);

    let outcome = scan_input(&config, &input).await?;

    pb.set_message("Extracting fields...");
    pb.set_position(80);
    pb.finish_with_message("Done");

    if outcome.record.is_empty() {
        eprintln!(
            "{} No recognizable ID details found.",
            style("!").yellow()
        );
    }

    // Format output
    let output = format_outcome(&args.input, &outcome, args.format)?;

    // Write output
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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load configuration: explicit path, else the default config file if it
/// exists, else defaults. A `--api-key` flag overrides the file value.
pub(crate) fn load_config(
    config_path: Option<&str>,
    api_key_override: Option<&str>,
) -> anyhow::Result<BuletinConfig> {
    let mut config = if let Some(path) = config_path {
        BuletinConfig::from_file(Path::new(path))?
    } else {
        let default_path = super::config::default_config_path();
        if default_path.exists() {
            BuletinConfig::from_file(&default_path)?
        } else {
            BuletinConfig::default()
        }
    };

    if let Some(key) = api_key_override {
        config.ocr.api_key = key.to_string();
    }

    Ok(config)
}

/// Run the scan pipeline for one input.
pub(crate) async fn scan_input(
    config: &BuletinConfig,
    input: &OcrInput,
) -> anyhow::Result<ScanOutcome> {
    let client = OcrSpaceClient::new(config.ocr.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create OCR client: {}", e))?;

    let parser = IdCardParser::new().with_cnp_validation(config.extraction.validate_cnp);

    let scanner = IdScanner::new(client)
        .with_parser(parser)
        .with_max_retries(config.ocr.max_retries);

    Ok(scanner.scan(input).await?)
}

fn check_extension(path: &Path) -> anyhow::Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "pdf" => Ok(()),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

pub(crate) fn format_outcome(
    source: &str,
    outcome: &ScanOutcome,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let doc = ScanDocument {
                extracted_at: Utc::now(),
                source,
                record: &outcome.record,
                metadata: &outcome.metadata,
            };
            Ok(serde_json::to_string_pretty(&doc)?)
        }
        OutputFormat::Csv => format_csv(&outcome.record),
        OutputFormat::Text => Ok(format_text(&outcome.record)),
    }
}

/// One `field,value` row per extracted field - the shape the persistence
/// layer stores.
fn format_csv(record: &IdentityRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "value"])?;
    for (field, value) in record.entries() {
        wtr.write_record([field.key(), value])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &IdentityRecord) -> String {
    let mut output = String::new();

    if record.is_empty() {
        output.push_str("No fields extracted.\n");
        return output;
    }

    for (field, value) in record.entries() {
        output.push_str(&format!("{:<18} {}\n", field.label(), value));
    }

    if let Some(date) = record.get(FieldKind::IssueDate).and_then(parse_issue_date) {
        output.push_str(&format!("\nIssue date resolves to {}\n", date));
    }

    output
}

pub(crate) fn print_report(metadata: &ExtractionMetadata) {
    println!();
    println!(
        "{} Extraction confidence: {:.1}%",
        style("ℹ").blue(),
        metadata.confidence * 100.0
    );
    if let Some(time_ms) = metadata.processing_time_ms {
        println!("{} Processing time: {}ms", style("ℹ").blue(), time_ms);
    }
    if !metadata.missing_fields.is_empty() {
        println!(
            "{} Missing fields: {}",
            style("ℹ").blue(),
            metadata.missing_fields.join(", ")
        );
    }
    for warning in &metadata.warnings {
        println!("{} {}", style("!").yellow(), warning);
    }
}
