//! Article Ledger CLI
//!
//! Publishes long-form articles as linked record chains on a ledger node,
//! and reads them back.
//!
//! ## Usage
//!
//! ```bash
//! # How many records (and ledger units) will this article cost?
//! article-ledger estimate draft.md
//!
//! # Publish it
//! article-ledger publish draft.md --title "On chains" --tags "storage,ledger"
//!
//! # Read a published article back by its root address
//! article-ledger read 91b4c2…
//!
//! # Publish a standalone short post
//! article-ledger post "short thought"
//!
//! # List published articles and posts
//! article-ledger list --kind article
//! ```

use anyhow::Context;
use article_ledger::{
    budget, Address, ArticleMetadata, ChainReader, ChainWriter, Config, LedgerClient, RecordKind,
    Registry,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "article-ledger")]
#[command(about = "Publish long-form articles as linked record chains on a ledger")]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ledger node API base URL
    #[arg(long, env = "LEDGER_URL")]
    ledger_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how many records (and ledger units) an article will need
    Estimate {
        /// Article text file
        file: PathBuf,
    },

    /// Publish an article file as a record chain
    Publish {
        /// Article text file
        file: PathBuf,

        #[arg(long)]
        title: String,

        /// Short abstract shown in feeds
        #[arg(long)]
        summary: Option<String>,

        #[arg(long)]
        content_warning: Option<String>,

        /// Address of the article being replied to
        #[arg(long)]
        reply_to: Option<Address>,

        /// Address of the article being cited
        #[arg(long)]
        quote: Option<Address>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Ledger account that receives tips for this article
        #[arg(long)]
        tip_account: Option<String>,
    },

    /// Fetch a record chain and print the reassembled article
    Read {
        /// Root record address
        address: Address,
    },

    /// Publish a standalone short post
    Post {
        text: String,
    },

    /// List published articles and posts (continuation records are never shown)
    List {
        /// Filter by record kind (article, post)
        #[arg(long)]
        kind: Option<RecordKind>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("article_ledger=info".parse()?),
        )
        .init();

    let args = Args::parse();

    // Load config
    let mut config = if let Some(config_path) = &args.config {
        Config::load(config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?
    } else {
        let config_path = Config::config_path();
        if config_path.exists() {
            Config::load(&config_path)?
        } else {
            let config = Config::default();
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            config.save(&config_path)?;
            info!(path = %config_path.display(), "Created default config");
            config
        }
    };

    // Apply CLI overrides
    if let Some(url) = args.ledger_url {
        config.ledger_url = url;
    }

    match args.command {
        Command::Estimate { file } => {
            let content = read_article(&file)?;
            let chars = content.chars().count();
            let records = budget::record_count(chars);
            println!(
                "{} characters -> {} record{} ({} ledger unit{})",
                chars,
                records,
                plural(records),
                records,
                plural(records),
            );
            if chars > budget::ARTICLE_MAX_CHARS {
                anyhow::bail!(
                    "article exceeds the {} character limit and cannot be published",
                    budget::ARTICLE_MAX_CHARS
                );
            }
        }

        Command::Publish {
            file,
            title,
            summary,
            content_warning,
            reply_to,
            quote,
            tags,
            tip_account,
        } => {
            let content = read_article(&file)?;
            let meta = ArticleMetadata {
                title,
                summary: summary.unwrap_or_default(),
                content_warning: content_warning.unwrap_or_default(),
                reply_to,
                quote,
                tags: tags.unwrap_or_default(),
                lang: config.lang.clone(),
                tip_account,
            };

            let registry = Arc::new(LedgerClient::new(config.ledger()));
            let writer = ChainWriter::new(registry);

            let mut progress = writer.subscribe_progress();
            let progress_task = tokio::spawn(async move {
                while let Ok(update) = progress.recv().await {
                    info!(
                        written = update.records_written,
                        total = update.total_records,
                        "record committed"
                    );
                }
            });

            let receipt = writer.publish(meta, &content).await?;
            progress_task.abort();

            info!(
                records = receipt.records,
                cost = receipt.records,
                "article published"
            );
            println!("{}", receipt.root_address);
        }

        Command::Read { address } => {
            let registry = Arc::new(LedgerClient::new(config.ledger()));
            let record = registry
                .get(&address)
                .await?
                .with_context(|| format!("no record at {address}"))?;

            match record.kind {
                RecordKind::Article => {
                    if let Some(meta) = &record.meta {
                        println!("# {}\n", meta.title);
                    }
                    let reader = ChainReader::new(registry);
                    println!("{}", reader.reassemble(&record).await);
                }
                RecordKind::Post => println!("{}", record.text),
                RecordKind::ArticleChunk => anyhow::bail!(
                    "{address} is a continuation record; read the chain from its article root"
                ),
            }
        }

        Command::Post { text } => {
            let registry = Arc::new(LedgerClient::new(config.ledger()));
            let writer = ChainWriter::new(registry);
            let address = writer.create_post(&text).await?;
            println!("{address}");
        }

        Command::List { kind } => {
            let registry = Arc::new(LedgerClient::new(config.ledger()));
            let records = registry.list(kind).await?;

            for fetched in records
                .iter()
                .filter(|f| f.record.kind.is_user_visible())
            {
                let label = match &fetched.record.meta {
                    Some(meta) => meta.title.clone(),
                    None => preview(&fetched.record.text),
                };
                println!("{}  {:13}  {}", fetched.address, fetched.record.kind, label);
            }
        }
    }

    Ok(())
}

fn read_article(file: &PathBuf) -> anyhow::Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(48).collect();
    if text.chars().count() > 48 {
        preview.push('…');
    }
    preview
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
