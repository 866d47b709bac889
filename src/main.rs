//! Content router command line.
//!
//! ```text
//! content-router --config router.toml resolve <uri> [--host <host>]
//! content-router --config router.toml route <node-id>
//! content-router --config router.toml check
//! content-router --config router.toml watch
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use content_router::config::loader::{content_path, load_config, load_parts};
use content_router::config::SnapshotWatcher;
use content_router::observability::{logging, metrics};
use content_router::{NodeId, RequestResolver};

#[derive(Parser)]
#[command(name = "content-router")]
#[command(about = "Resolve request URIs against a published content tree", long_about = None)]
struct Cli {
    /// Router configuration file.
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one URI and print the result as JSON
    Resolve {
        uri: String,
        /// Request host; overrides a host in the URI
        #[arg(long)]
        host: Option<String>,
    },
    /// Print the nice URL of a node
    Route { node: i64 },
    /// Load and validate config and content, then print a summary
    Check,
    /// Resolve lines from stdin ("<uri>" or "<host> <uri>"), reloading on file changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init(&config.observability.log_level)?;

    tracing::info!(config = %cli.config.display(), "content-router v0.1.0 starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let parts = load_parts(&cli.config, &config)?;
    let resolver = Arc::new(RequestResolver::with_snapshot(parts));

    match cli.command {
        Commands::Resolve { uri, host } => {
            let result = resolver.resolve(&uri, host.as_deref());
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Route { node } => match resolver.route_for(NodeId(node)) {
            Some(route) => println!("{route}"),
            None => return Err(format!("node {node} is not published").into()),
        },
        Commands::Check => {
            if let Some(snapshot) = resolver.snapshot() {
                println!("config:    {}", cli.config.display());
                println!("content:   {}", content_path(&cli.config, &config).display());
                println!(
                    "nodes:     {} ({} published)",
                    snapshot.store().len(),
                    snapshot.store().published_len()
                );
                println!("domains:   {}", snapshot.domains().len());
                for domain in snapshot.domains().iter() {
                    println!("  {domain} -> {} ({})", domain.root, domain.culture);
                }
                println!("templates: {}", config.templates.len());
                println!("lookups:   {}", snapshot.chain().names().join(" -> "));
            }
        }
        Commands::Watch => watch(&cli.config, &config, resolver).await?,
    }

    Ok(())
}

async fn watch(
    config_path: &std::path::Path,
    config: &content_router::RouterConfig,
    resolver: Arc<RequestResolver>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (watcher, mut updates) = SnapshotWatcher::new(config_path, &content_path(config_path, config));
    let _watcher = watcher.run()?;

    let installer = Arc::clone(&resolver);
    tokio::spawn(async move {
        while let Some(parts) = updates.recv().await {
            installer.install(parts);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let mut fields = line.split_whitespace();
                let (host, uri) = match (fields.next(), fields.next()) {
                    (Some(host), Some(uri)) => (Some(host), uri),
                    (Some(uri), None) => (None, uri),
                    _ => continue,
                };
                let result = resolver.resolve(uri, host);
                println!("{}", serde_json::to_string(&result)?);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
