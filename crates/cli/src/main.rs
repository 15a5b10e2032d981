//! CLI tool for turning office documents into summarized, mailed reports.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use mailer_core::{
    MemoReport, Notifier, OutboundMessage, ReportRenderer, StatusReport, Summarizer,
    TextReportRenderer,
};
use mailer_notify::{SmtpNotifier, SpoolNotifier, DEFAULT_SMTP_PORT};
use mailer_summarize::ChatSummarizer;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Body of the main message when a rendered report is attached.
const ATTACHMENT_BODY: &str = "Please find the attached monthly report.";

/// Status-message summary line when no summary was generated.
const NO_SUMMARY: &str = "(not summarized)";

/// Extract text from .docx, .pdf, and .xlsx files, summarize it, and mail the report.
#[derive(Parser, Debug)]
#[command(name = "report-mailer")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input document(s) (.docx, .pdf, or .xlsx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Write extracted text as <name>.txt into this directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print extracted text to stdout
    #[arg(short, long)]
    print: bool,

    /// Summarize the extracted text and render a report
    #[arg(short, long)]
    summarize: bool,

    /// API key for the summarization endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    api_base: String,

    /// Model used for summarization
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    model: String,

    /// Maximum characters of extracted text sent for summarization (0 = no limit)
    #[arg(long, default_value = "12000")]
    max_chars: usize,

    /// Directory for rendered reports
    #[arg(long, default_value = "generated_reports")]
    report_dir: PathBuf,

    /// Recipient of the report
    #[arg(long)]
    to: Option<String>,

    /// Subject of the report message
    #[arg(long, default_value = "Monthly Update")]
    subject: String,

    /// Address that receives a delivery status message
    #[arg(long, env = "STATUS_REPORT_EMAIL")]
    status_email: Option<String>,

    /// SMTP server; without one, messages are spooled into the outbox
    #[arg(long, env = "SMTP_SERVER")]
    smtp_server: Option<String>,

    /// SMTP server port
    #[arg(long, env = "SMTP_PORT", default_value_t = DEFAULT_SMTP_PORT)]
    smtp_port: u16,

    /// SMTP login, also used as the sender address
    #[arg(long, env = "SMTP_USER")]
    sender: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASS", hide_env_values = true)]
    smtp_pass: Option<String>,

    /// Outbox directory where messages are spooled when no SMTP server is set
    #[arg(long, env = "MAILER_OUTBOX", default_value = "outbox")]
    outbox: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let summarizer = if args.summarize {
        let api_key = args
            .api_key
            .clone()
            .context("--summarize needs an API key (--api-key or OPENAI_API_KEY)")?;
        Some(
            ChatSummarizer::new(api_key)
                .with_base_url(&args.api_base)
                .with_model(&args.model)
                .with_max_chars(args.max_chars),
        )
    } else {
        None
    };

    let renderer = TextReportRenderer::new(&args.report_dir);
    let notifier = build_notifier(&args)?;

    for input_path in &args.input {
        log::info!("Processing file: {}", input_path.display());

        let summarizer = summarizer.as_ref().map(|s| s as &dyn Summarizer);
        if let Err(e) = process_file(input_path, &args, summarizer, &renderer, notifier.as_ref()) {
            log::error!("Error processing {}: {:#}", input_path.display(), e);
        }
    }

    Ok(())
}

/// SMTP delivery when a server is configured, otherwise the outbox spool.
fn build_notifier(args: &Args) -> Result<Box<dyn Notifier>> {
    let Some(server) = &args.smtp_server else {
        log::info!("No SMTP server set; spooling messages into {}", args.outbox.display());
        let mut notifier = SpoolNotifier::new(&args.outbox);
        if let Some(sender) = &args.sender {
            notifier = notifier.with_sender(sender);
        }
        return Ok(Box::new(notifier));
    };

    let user = args
        .sender
        .clone()
        .context("SMTP delivery needs a login (--sender or SMTP_USER)")?;
    let pass = args
        .smtp_pass
        .clone()
        .context("SMTP delivery needs a password (--smtp-pass or SMTP_PASS)")?;

    Ok(Box::new(
        SmtpNotifier::new(server, user, pass).with_port(args.smtp_port),
    ))
}

/// Run the pipeline for one input file.
fn process_file(
    input_path: &Path,
    args: &Args,
    summarizer: Option<&dyn Summarizer>,
    renderer: &dyn ReportRenderer,
    notifier: &dyn Notifier,
) -> Result<()> {
    let text = mailer_extract::process(input_path)
        .with_context(|| format!("Failed to extract {}", input_path.display()))?;

    log::debug!("Extracted text:\n{}", text);

    if args.print {
        println!("{}", text);
    }

    if let Some(dir) = &args.output {
        let output_path = get_output_path(input_path, dir)?;
        write_output(&output_path, &text)?;
        log::info!("Written to: {}", output_path.display());
    }

    let Some(summarizer) = summarizer else {
        if let Some(to) = &args.to {
            let message = OutboundMessage::new(&args.subject, &text, to);
            deliver(input_path, args, &message, NO_SUMMARY, None, notifier);
        }
        return Ok(());
    };

    let summary = summarizer.summarize(&text);
    let memo = MemoReport::from_summary(&summary, Local::now().date_naive());
    let report_path = renderer.render(&memo).context("Failed to render report")?;
    log::info!("Report generated at: {}", report_path.display());

    if let Some(to) = &args.to {
        let message =
            OutboundMessage::new(&args.subject, ATTACHMENT_BODY, to).with_attachment(&report_path);
        deliver(input_path, args, &message, &summary, Some(&report_path), notifier);
    }

    Ok(())
}

/// Send the main message, then a status message if a status address is set.
fn deliver(
    input_path: &Path,
    args: &Args,
    message: &OutboundMessage,
    summary: &str,
    report_path: Option<&Path>,
    notifier: &dyn Notifier,
) -> bool {
    let delivered = notifier.send(message);

    if let Some(status_email) = &args.status_email {
        let status = StatusReport {
            file: input_path.display().to_string(),
            recipient: message.to.clone(),
            delivered,
            summary: summary.to_string(),
        };
        let mut status_message = status.to_message(status_email);
        if let Some(path) = report_path {
            status_message = status_message.with_attachment(path);
        }
        notifier.send(&status_message);
    }

    delivered
}

/// Determine the output path for extracted text.
fn get_output_path(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    Ok(output_dir.join(format!("{}.txt", stem)))
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
