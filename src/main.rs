//! Conversational assistant client
//!
//! A terminal chat over a remote document-grounded answer service, built on
//! a pure session state machine driven by a single runtime task.

mod answer;
mod bootstrap;
mod config;
mod format;
mod gateway;
mod report;
mod runtime;
mod session;
mod transcript;

use answer::{Answerer, HttpAnswerer, KeywordAnswerer, LoggingAnswerer};
use bootstrap::{BootstrapContext, UrlContextSource};
use config::{ClientConfig, Strategy};
use gateway::RequestGateway;
use report::{HttpReportGenerator, ReportGenerator};
use runtime::{SessionContext, SessionHandle, Submission};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transcript::TranscriptPrinter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Configuration
    let mut config = ClientConfig::from_env()?;
    if let Some(locator) = std::env::args().nth(1) {
        config.locator = Some(locator);
    }
    tracing::info!(
        api = %config.api_url,
        strategy = ?config.strategy,
        deadline_ms = %config.deadline.as_millis(),
        "Starting assistant client"
    );

    let client = reqwest::Client::new();
    let inner: Arc<dyn Answerer> = match config.strategy {
        Strategy::Http => Arc::new(HttpAnswerer::new(
            client.clone(),
            &config.api_url,
            config.share_url.clone(),
        )?),
        Strategy::Keyword => {
            let (min, max) = config.keyword_latency;
            Arc::new(KeywordAnswerer::default().with_latency(min, max))
        }
    };
    let gateway = RequestGateway::new(Arc::new(LoggingAnswerer::new(inner)), config.answer_options());
    let reports: Arc<dyn ReportGenerator> = Arc::new(HttpReportGenerator::new(client, &config.api_url)?);

    // Seed, render once, then consume the context parameter
    let mut bootstrap = BootstrapContext::new(context_source(config.locator.as_deref()));
    let handle = runtime::start(
        SessionContext::new(config.deadline),
        bootstrap.seed(chrono::Utc::now()),
        gateway,
    );

    let mut printer = TranscriptPrinter::new(
        config.brand.clone(),
        colored::control::SHOULD_COLORIZE.should_colorize(),
    );
    print_lines(printer.render_new(&handle.snapshot()));
    bootstrap.scrub();
    if let Some(source) = bootstrap.source() {
        tracing::debug!(locator = %source.as_str(), "Context parameter consumed");
    }

    run_shell(&handle, &mut printer, &reports, &config).await?;
    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "assistant_client=info".into());
    let json = std::env::var("ASSISTANT_LOG_JSON").is_ok_and(|v| v == "1");

    // stderr keeps logs out of the transcript
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn context_source(locator: Option<&str>) -> Option<UrlContextSource> {
    match UrlContextSource::parse(locator?) {
        Ok(source) => Some(source),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unusable locator");
            None
        }
    }
}

/// Read lines from stdin until `/quit` or end of input
async fn run_shell(
    handle: &SessionHandle,
    printer: &mut TranscriptPrinter,
    reports: &Arc<dyn ReportGenerator>,
    config: &ClientConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut updates = handle.subscribe();
    updates.mark_unchanged();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                changed?;
                let state = updates.borrow_and_update().clone();
                print_lines(printer.render_new(&state));
            }

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let text = line.trim();
                match text {
                    "" => {}
                    "/quit" => return Ok(()),
                    "/report" => spawn_report(handle, reports, config),
                    _ => {
                        if let Submission::Ignored(reason) = handle.submit(text).await? {
                            tracing::debug!(reason = %reason, "Input not submitted");
                        }
                    }
                }
            }
        }
    }

    // End of input: let the last answer land before exiting
    let state = handle.wait_until_idle().await?;
    print_lines(printer.render_new(&state));
    Ok(())
}

/// Generate a report from the current snapshot without blocking input
fn spawn_report(handle: &SessionHandle, reports: &Arc<dyn ReportGenerator>, config: &ClientConfig) {
    let export = handle.export(chrono::Utc::now());
    let reports = Arc::clone(reports);
    let brand = config.brand.clone();
    let dir = config.report_dir.clone();

    tokio::spawn(async move {
        match report::save_report(reports.as_ref(), &export, &brand, &dir).await {
            Ok(path) => println!("Informe guardado en {}", path.display()),
            Err(e) => {
                tracing::error!(error = %e, "Report generation failed");
                println!("No se pudo generar el informe: {e}");
            }
        }
    });
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
