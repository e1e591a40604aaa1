// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (quiet by default, chatty with --verbose)
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the URLs that loaded successfully to stdout
//
// Logs go to stderr and results go to stdout, so the output can be piped
// straight into another tool.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod domains;
mod fetch;
mod typo;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, CrawlArgs};
use crawl::{CrawlReport, Crawler};
use fetch::{HtmlLinkExtractor, HttpFetcher};
use typo::SuspiciousUrlCrawler;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

// Logs to stderr. RUST_LOG wins over --verbose when it is set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "typo_crawler=debug" } else { "warn" };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Crawl { start_url, options } => handle_crawl(start_url, &options).await,
        Commands::Suspicious {
            popular,
            benign,
            options,
        } => handle_suspicious(&popular, &benign, &options).await,
        Commands::Typos { domain } => {
            let mut typos: Vec<String> = typo::generate_typos(&domain).into_iter().collect();
            typos.sort();
            println!("{}", typos.join("\n"));
            Ok(())
        }
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(start_url: Option<String>, options: &CrawlArgs) -> Result<()> {
    let start_url = match start_url {
        Some(url) if crawl::is_valid_start_url(&url) => url,
        // An invalid URL on the command line is re-asked like a typed one
        rejected => {
            let stdin = BufReader::new(tokio::io::stdin());
            prompt_start_url(stdin, tokio::io::stdout(), rejected).await?
        }
    };

    let report = build_crawler(options)?.scrape([start_url], &[] as &[String]).await;

    print_results(&report, options.json)
}

// Handles the 'suspicious' subcommand
async fn handle_suspicious(
    popular: &std::path::Path,
    benign: &std::path::Path,
    options: &CrawlArgs,
) -> Result<()> {
    let popular = domains::load_domain_list(popular).await?;
    let benign = domains::load_domain_list(benign).await?;

    let report = SuspiciousUrlCrawler::new(build_crawler(options)?)
        .find_suspicious_urls(&popular, &benign)
        .await;

    print_results(&report, options.json)
}

fn build_crawler(options: &CrawlArgs) -> Result<Crawler> {
    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;

    Ok(Crawler::new(
        options.to_config(),
        Arc::new(fetcher),
        Arc::new(HtmlLinkExtractor),
    ))
}

// Asks for a starting URL until a valid one is entered
//
// `rejected` is an earlier invalid answer (from the command line); the first
// prompt then says why it is asking again.
async fn prompt_start_url<R, W>(input: R, mut output: W, rejected: Option<String>) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut prompt = invalid_url_prompt(rejected);

    loop {
        output.write_all(prompt.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            bail!("No starting URL given (input closed)");
        };

        if crawl::is_valid_start_url(&line) {
            return Ok(line);
        }

        prompt = invalid_url_prompt(Some(line));
    }
}

fn invalid_url_prompt(rejected: Option<String>) -> String {
    match rejected {
        Some(url) => format!(
            "The url \"{}\" is invalid. Please enter a valid starting URL: ",
            url
        ),
        None => "Please enter a valid starting URL: ".to_string(),
    }
}

// The --json shape of a crawl report
#[derive(Debug, Serialize)]
struct JsonReport {
    successful: Vec<String>,
    attempted: usize,
}

impl From<&CrawlReport> for JsonReport {
    fn from(report: &CrawlReport) -> Self {
        let mut successful: Vec<String> = report.successful.iter().cloned().collect();
        successful.sort();

        JsonReport {
            successful,
            attempted: report.visited.len(),
        }
    }
}

// Prints the results either as one URL per line or as JSON
fn print_results(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(&JsonReport::from(report))?;
        println!("{}", json_output);
    } else {
        let lines: Vec<&str> = report.successful.iter().map(String::as_str).collect();
        println!("{}", lines.join("\n"));
    }
    Ok(())
}
