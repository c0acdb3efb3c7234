use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shipyard::cli::{Cli, Commands};
use shipyard::config::Config;
use shipyard::services::{PipelineService, PreviewService, RunOutcome, SiteService};
use shipyard::sources::{metadata, FeedRegistry, HttpFetcher, Selection};
use shipyard::storage::{ContentDir, FsPostRepository};

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Build { choice } => cmd_build(&config, choice.selection()),
        Commands::Inject { choice } => cmd_inject(&config, choice.selection()),
        Commands::Rebuild => cmd_rebuild(&config),
        Commands::List => cmd_list(&config),
        Commands::Check => cmd_check(&config),
        Commands::Preview { max_items } => cmd_preview(&config, max_items),
    }
}

fn pipeline(
    config: &Config,
    fetcher: HttpFetcher,
) -> PipelineService<HttpFetcher, FsPostRepository> {
    let dir = ContentDir::new(&config.content_dir);
    PipelineService::new(
        &config.feeds_config,
        fetcher,
        FsPostRepository::new(dir.clone()),
        dir,
        &config.base_url,
    )
}

fn report(outcome: RunOutcome) -> anyhow::Result<()> {
    if !outcome.success {
        anyhow::bail!(outcome.message);
    }

    println!("{}", outcome.message);
    if let Some(filename) = outcome.filename {
        println!("  Post: /rsscontent/{}", filename);
    }
    println!("  Index: /rsscontent/index.html");
    println!("  Feed: /rsscontent/rss.xml");
    Ok(())
}

fn cmd_build(config: &Config, selection: Selection) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(config.fetch_timeout)?;
    report(pipeline(config, fetcher).run(selection))
}

fn cmd_inject(config: &Config, selection: Selection) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(config.inject_timeout)?;
    report(pipeline(config, fetcher).inject(selection))
}

fn cmd_rebuild(config: &Config) -> anyhow::Result<()> {
    let dir = ContentDir::new(&config.content_dir);
    let repository = FsPostRepository::new(dir.clone());
    let summary = SiteService::new(dir, &config.base_url)
        .rebuild(&repository)
        .with_context(|| format!("failed to rebuild {}", config.content_dir.display()))?;

    println!(
        "Rebuilt {} index page(s) and rss.xml ({} entries) from {} post(s).",
        summary.index.pages, summary.feed_entries, summary.posts
    );
    for name in &summary.index.removed {
        println!("  Removed stale page: {}", name);
    }
    Ok(())
}

fn cmd_list(config: &Config) -> anyhow::Result<()> {
    let registry = FeedRegistry::load(&config.feeds_config)?;

    if registry.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    println!("Configured feeds:\n");
    for (i, source) in registry.sources().iter().enumerate() {
        println!("  {}. {}", i, source.name);
        println!("     URL: {}", source.url);
    }

    Ok(())
}

fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let registry = FeedRegistry::load(&config.feeds_config)?;
    let fetcher = HttpFetcher::new(config.fetch_timeout)?;

    if registry.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    let mut failed = 0;
    for source in registry.sources() {
        print!("{}: ", source.name);
        io::stdout().flush()?;
        match metadata::inspect(&fetcher, &source.url) {
            Ok(meta) => {
                println!("OK");
                println!("  Title: {}", meta.title);
                println!("  Format: {} (parsed as {})", meta.format, meta.dialect);
                println!(
                    "  Entries: {} reported, {} extracted",
                    meta.entry_count, meta.extracted_items
                );
                if !meta.is_consistent() {
                    println!("  Warning: entry counts differ");
                }
            }
            Err(e) => {
                println!("FAILED: {}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} feeds failed", failed, registry.sources().len());
    }
    Ok(())
}

fn cmd_preview(config: &Config, max_items: usize) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(config.fetch_timeout)?;
    let service = PreviewService::new(
        &config.feeds_config,
        fetcher,
        ContentDir::new(&config.preview_dir),
    );

    let preview = service.preview(max_items)?;
    println!(
        "Preview of {} ({} of {} items): {}",
        preview.feed_name,
        preview.shown_items,
        preview.total_items,
        preview.path.display()
    );
    Ok(())
}
