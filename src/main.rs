// folio command-line entry point.
// Generates the static portfolio file and inspects the cached GitHub and blog data.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use folio::blog::{self, WordPressClient};
use folio::cache::{FileStore, KeyValueStore, MemoryStore, ResponseCache};
use folio::github::GitHubClient;
use folio::portfolio::{self, PortfolioGenerator, PortfolioSource, ProjectFilter};
use folio::{Config, GitHubData, Result, logging};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Portfolio data generator and GitHub data client", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub account, overriding the configuration.
    #[arg(long, global = true)]
    account: Option<String>,

    /// Bypass the on-disk response cache.
    #[arg(long, global = true)]
    no_cache: bool,

    /// Debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the static portfolio data file.
    Build {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the account profile.
    Profile,
    /// List the account's repositories.
    Repos,
    /// Show language usage across non-fork repositories.
    Languages,
    /// Show star, fork and follower totals.
    Stats,
    /// Profile, totals and languages together.
    Summary,
    /// Remove cached GitHub data for the account.
    ClearCache,
    /// Load the generated portfolio (bundled projects on failure) and filter it.
    Projects {
        /// URL or path of the generated file; defaults to the build output.
        #[arg(long)]
        source: Option<String>,
        /// `all`, `featured`, or a technology name.
        #[arg(long, default_value = "all")]
        filter: ProjectFilter,
    },
    /// Show blog posts from the WordPress feed.
    Posts {
        #[arg(long, default_value = "all")]
        category: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    if let Some(account) = cli.account {
        config.account = account;
    }

    match run(cli.command, &config, cli.no_cache).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &Config, no_cache: bool) -> Result<()> {
    match command {
        Commands::Build { output } => {
            let client = GitHubClient::from_env(&config.api_base, &config.raw_base)?;
            let output = output.unwrap_or_else(|| config.output.clone());
            let generator = PortfolioGenerator::new(&client, config.generator_settings());
            generator.build(&output).await?;
        }
        Commands::Profile => print_json(&data_client(config, no_cache)?.profile().await?)?,
        Commands::Repos => print_json(&data_client(config, no_cache)?.repos().await?)?,
        Commands::Languages => print_json(&data_client(config, no_cache)?.language_stats().await?)?,
        Commands::Stats => print_json(&data_client(config, no_cache)?.stats().await?)?,
        Commands::Summary => print_json(&data_client(config, no_cache)?.summary().await?)?,
        Commands::ClearCache => data_client(config, no_cache)?.clear_cache(),
        Commands::Projects { source, filter } => {
            let source = match source {
                Some(location) => PortfolioSource::parse(&location),
                None => PortfolioSource::File(config.output.clone()),
            };
            let loaded = portfolio::load_portfolio(&reqwest::Client::new(), &source).await;
            print_json(&filter.apply(&loaded.entries))?;
        }
        Commands::Posts { category } => {
            let client = WordPressClient::with_base_url(&config.wordpress_site, &config.wordpress_base)?;
            let posts = client.fetch_posts().await.inspect_err(|_| {
                eprintln!("Unable to load posts. Please try again later.");
            })?;
            let shown: Vec<_> = blog::filter_by_category(&posts, &category)
                .into_iter()
                .map(|post| post.card())
                .collect();
            if shown.is_empty() {
                eprintln!("No posts available");
            }
            print_json(&serde_json::json!({
                "categories": blog::unique_categories(&posts),
                "posts": shown,
            }))?;
        }
    }
    Ok(())
}

fn data_client(config: &Config, no_cache: bool) -> Result<GitHubData<Box<dyn KeyValueStore>>> {
    let store: Box<dyn KeyValueStore> = match config.resolved_cache_dir() {
        Some(dir) if !no_cache => Box::new(FileStore::new(dir)),
        _ => Box::new(MemoryStore::new()),
    };
    let client = GitHubClient::from_env(&config.api_base, &config.raw_base)?;
    let cache = ResponseCache::new(store, config.cache_ttl());
    Ok(GitHubData::new(client, cache, config.account.clone()).with_per_page(config.per_page))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
