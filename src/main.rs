use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use circlite::api::HttpFeedApi;
use circlite::cli::{CacheCommands, Cli, Commands};
use circlite::config::Config;
use circlite::errors::CircliteError;
use circlite::services::{ArticleService, CacheStore, FishingService, Pager};
use circlite::storage::sqlite::{SqliteKvStore, SqliteStorage};
use circlite::ui::{self, App};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration: defaults, environment, then CLI overrides.
    let mut config = Config::from_env()?;
    apply_overrides(&mut config, &cli);
    config.validate()?;

    // The widget owns the terminal, so its logs go to a file next to the
    // database; plain subcommands log to stderr.
    match cli.command {
        Commands::Run => init_logging(Some(log_path(&config.db_path))),
        _ => init_logging(None),
    }

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path)?;
    let kv = SqliteKvStore::new(storage);

    match cli.command {
        Commands::Run => cmd_run(config, kv),
        Commands::Fetch { refresh } => cmd_fetch(config, kv, refresh),
        Commands::Stats => cmd_stats(config, kv),
        Commands::Cache { command } => cmd_cache(config, kv, command),
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(api_url) = &cli.api_url {
        config.api_base = api_url.clone();
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(ttl_ms) = cli.ttl_ms {
        config.cache_ttl_ms = ttl_ms;
    }
    if cli.plain {
        config.fishing.enabled = false;
    }
}

fn log_path(db_path: &str) -> PathBuf {
    PathBuf::from(db_path).with_extension("log")
}

fn init_logging(log_file: Option<PathBuf>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file.and_then(|path| std::fs::File::create(path).ok()) {
        Some(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn cmd_run(config: Config, kv: SqliteKvStore) -> Result<()> {
    let api = HttpFeedApi::new(&config.api_base);
    let service = ArticleService::new(api, CacheStore::new(kv.clone()), config.cache_ttl_ms);
    let fishing = FishingService::new(kv, config.fishing.clone());

    let mut app = App::new(config, service, fishing, StdRng::from_entropy());
    ui::run(&mut app)
}

fn cmd_fetch(config: Config, kv: SqliteKvStore, refresh: bool) -> Result<()> {
    let api = HttpFeedApi::new(&config.api_base);
    let service = ArticleService::new(api, CacheStore::new(kv), config.cache_ttl_ms);

    let loaded = match if refresh {
        service.refresh()
    } else {
        service.load()
    } {
        Ok(loaded) => loaded,
        Err(e @ CircliteError::FetchFailed) => {
            println!("加载失败");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(stats) = &loaded.stats {
        println!(
            "订阅:{} 活跃:{} 总文章数:{}",
            stats.friends_num, stats.active_num, stats.article_num
        );
        println!("更新时间:{}", stats.last_updated_time);
    }
    println!(
        "{} articles{}",
        loaded.articles.len(),
        if loaded.from_cache { " (cached)" } else { "" }
    );
    println!();

    let mut pager = Pager::new(config.page_size);
    for article in pager.next_page(&loaded.articles) {
        println!(
            "  {}  {} — {}",
            article.created_date(),
            article.title,
            article.author
        );
    }

    let remaining = loaded.articles.len().saturating_sub(pager.revealed());
    if remaining > 0 {
        println!("  … {} more", remaining);
    }

    Ok(())
}

fn cmd_stats(config: Config, kv: SqliteKvStore) -> Result<()> {
    let cache = CacheStore::new(kv.clone());

    match cache.get(config.cache_ttl_ms) {
        Some(document) => {
            if let Some(stats) = &document.statistical_data {
                println!(
                    "订阅:{} 活跃:{} 总文章数:{}",
                    stats.friends_num, stats.active_num, stats.article_num
                );
                println!("更新时间:{}", stats.last_updated_time);
            }
            println!("cached articles: {}", document.article_data.len());
        }
        None => println!("cache: empty (run `circlite fetch`)"),
    }

    let fishing = FishingService::new(kv, config.fishing.clone());
    let counters = fishing.counters();
    println!("钓鱼次数: {}  点击次数: {}", counters.times, counters.clicks);
    if let Some(tag) = fishing.level_tag() {
        println!("{}", tag);
    }

    Ok(())
}

fn cmd_cache(config: Config, kv: SqliteKvStore, command: CacheCommands) -> Result<()> {
    let cache = CacheStore::new(kv);

    match command {
        CacheCommands::Status => match cache.stored_at() {
            Some(stored_at) => {
                let age_ms = chrono::Utc::now().timestamp_millis() - stored_at;
                let state = if age_ms < config.cache_ttl_ms {
                    "fresh"
                } else {
                    "expired"
                };
                println!("cache: stored {}s ago ({})", age_ms / 1000, state);
            }
            None => println!("cache: empty"),
        },
        CacheCommands::Clear => {
            cache.clear()?;
            println!("cache cleared");
        }
    }

    Ok(())
}
