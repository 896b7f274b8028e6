use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kvrocket::config::{create_client, Config};
use kvrocket::storage::dynamodb::{ensure_table, TableOutcome};
use kvrocket::storage::DynamoDbStore;
use kvrocket::{KeyValueAccessLayer, MeteredRepository, TracingMetrics};
use kvrocket_core::converter::SerdeConverter;
use kvrocket_core::storage::{Cursor, Repository, ScanPolicy};

/// kvrocket - Paginated access to partition/range keyed DynamoDB tables
#[derive(Debug, Parser)]
#[command(name = "kvrocket")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Table to operate on (overrides DYNAMODB_TABLE_NAME)
    #[arg(long, short, global = true)]
    table: Option<String>,

    /// Document field holding the partition key
    #[arg(long, default_value = "id", global = true)]
    partition_field: String,

    /// Document field holding the range key
    #[arg(long, default_value = "sort", global = true)]
    range_field: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one document by its partition and range keys
    Get {
        partition_key: String,
        range_key: String,
    },

    /// List one page of a partition in ascending range key order
    List {
        partition_key: String,

        /// Page size (defaults to KVROCKET_PAGE_SIZE)
        #[arg(long, short)]
        limit: Option<u32>,

        /// Cursor token printed by a previous listing
        #[arg(long, short)]
        cursor: Option<String>,

        /// Fail the page on unreadable items instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Write a JSON document, replacing any document with the same key
    Put {
        /// The document, as a JSON object
        document: String,
    },

    /// Delete one document. Deleting a missing document succeeds.
    Delete {
        partition_key: String,
        range_key: String,
    },

    /// Create the table with the partition_key/range_key schema if it is missing
    CreateTable,
}

type Documents = MeteredRepository<
    KeyValueAccessLayer<Value, DynamoDbStore, SerdeConverter<Value>>,
    TracingMetrics,
>;

fn documents(
    store: Arc<DynamoDbStore>,
    table: &str,
    converter: SerdeConverter<Value>,
    scan_policy: ScanPolicy,
) -> Documents {
    let layer = KeyValueAccessLayer::new(store, table, converter).with_scan_policy(scan_policy);
    MeteredRepository::new(Arc::new(layer), Arc::new(TracingMetrics::new("kvrocket")))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kvrocket=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let table = cli.table.unwrap_or_else(|| config.table_name.clone());

    tracing::debug!(
        region = %config.region,
        endpoint = ?config.endpoint_url,
        static_credentials = config.has_static_credentials(),
        table = %table,
        "Creating DynamoDB client"
    );
    let client = create_client(&config).await;
    let store = Arc::new(DynamoDbStore::new(client));

    let converter = SerdeConverter::<Value>::new(cli.partition_field, cli.range_field);

    match cli.command {
        Commands::Get {
            partition_key,
            range_key,
        } => {
            let repo = documents(store, &table, converter, config.scan_policy);
            match repo.fetch(&partition_key, &range_key).await? {
                Some(document) => print_json(&document)?,
                None => anyhow::bail!("No document at {}/{}", partition_key, range_key),
            }
        }
        Commands::List {
            partition_key,
            limit,
            cursor,
            strict,
        } => {
            let scan_policy = if strict {
                ScanPolicy::Strict
            } else {
                config.scan_policy
            };
            let cursor = cursor
                .as_deref()
                .map(Cursor::from_token)
                .transpose()
                .context("Invalid cursor token")?;

            let repo = documents(store, &table, converter, scan_policy);
            let page = repo
                .fetch_all(
                    &partition_key,
                    limit.unwrap_or(config.page_size),
                    cursor.as_ref(),
                )
                .await?;

            print_json(&json!({
                "items": page.items,
                "cursor": page.cursor.as_ref().map(Cursor::to_token),
                "skipped": page.skipped,
            }))?;
        }
        Commands::Put { document } => {
            let document: Value =
                serde_json::from_str(&document).context("Document is not valid JSON")?;

            let repo = documents(store, &table, converter, config.scan_policy);
            let stored = repo.create(document).await?;
            print_json(&stored)?;
        }
        Commands::Delete {
            partition_key,
            range_key,
        } => {
            let repo = documents(store, &table, converter, config.scan_policy);
            repo.delete(&partition_key, &range_key).await?;
            tracing::info!(partition_key = %partition_key, range_key = %range_key, "Deleted");
        }
        Commands::CreateTable => {
            let client = store.client();
            match ensure_table(client, &table).await? {
                TableOutcome::Created => tracing::info!(table = %table, "Table created"),
                TableOutcome::AlreadyExists => {
                    tracing::info!(table = %table, "Table already exists")
                }
            }
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
