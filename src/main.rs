//! ddg-sift CLI - cached DuckDuckGo search from the command line or over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use ddg_sift::{server, SearchConfig, SearchQuery, Searcher};

/// ddg-sift - cached, ranked DuckDuckGo search
#[derive(Parser)]
#[command(name = "ddg-sift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search and print the results
    Search(SearchArgs),

    /// Serve the search endpoint over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
struct PipelineArgs {
    /// Disable the result cache
    #[arg(long)]
    no_cache: bool,

    /// Cache directory
    #[arg(long, default_value = "search_cache")]
    cache_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Provider query attempts
    #[arg(long, default_value = "3")]
    retries: u32,

    /// Delay between provider attempts in milliseconds
    #[arg(long, default_value = "1000")]
    retry_delay_ms: u64,

    /// Minimum snippet length
    #[arg(long, default_value = "10")]
    min_snippet: usize,

    /// Drop results whose host contains this text (repeatable)
    #[arg(long = "exclude-domain")]
    exclude_domains: Vec<String>,

    /// Skip fetching linked pages
    #[arg(long)]
    no_content: bool,

    /// Maximum characters kept from each linked page
    #[arg(long, default_value = "2000")]
    content_length: usize,

    /// Linked pages fetched concurrently
    #[arg(long, default_value = "1")]
    concurrency: usize,
}

impl PipelineArgs {
    fn to_config(&self) -> SearchConfig {
        SearchConfig::new()
            .with_cache(!self.no_cache)
            .with_cache_dir(self.cache_dir.clone())
            .with_timeout(Duration::from_secs(self.timeout))
            .with_retry(self.retries, Duration::from_millis(self.retry_delay_ms))
            .with_min_snippet_length(self.min_snippet)
            .with_exclude_domains(self.exclude_domains.clone())
            .with_fetch_content(!self.no_content)
            .with_content_max_length(self.content_length)
            .with_enrich_concurrency(self.concurrency)
    }
}

#[derive(Args)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Maximum number of results
    #[arg(short = 'n', long, default_value = "5")]
    max_results: usize,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Serve(args) => run_serve(args).await,
    }
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let searcher = Searcher::new(args.pipeline.to_config())?;
    let query = SearchQuery::new(&args.query).with_max_results(args.max_results);
    let response = searcher.search_response(query).await?;

    match args.format {
        OutputFormat::Text => {
            println!(
                "\nSearch results for \"{}\" ({} results):\n",
                response.query, response.count
            );

            for (i, result) in response.results.iter().enumerate() {
                println!("{}. {}", i + 1, result.title);
                println!("   URL: {}", result.url);
                if !result.snippet.is_empty() {
                    println!("   {}", result.snippet);
                }
                if !result.content.is_empty() {
                    let preview: String = result.content.chars().take(300).collect();
                    println!("   Content: {}", preview);
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Compact => {
            for result in &response.results {
                println!("{}\t{}", result.title, result.url);
            }
        }
    }

    Ok(())
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let searcher = Searcher::new(args.pipeline.to_config())?;
    server::serve(Arc::new(searcher), args.addr).await
}
