//! Item archive command-line client.
//!
//! Usage:
//!   item-archive --url http://localhost:8330 ls /
//!   item-archive mkdir / shelf --tag wood
//!   item-archive add /shelf.wood.container lamp --image lamp.png
//!   item-archive mv /shelf.wood.container/lamp.item /lamp.item

use anyhow::{Context, Result};
use clap::Parser;
use item_archive_cli::{run, Cli};
use item_archive_client::RemoteArchive;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let archive = RemoteArchive::connect(cli.connect_config())
        .with_context(|| format!("invalid store URL {}", cli.url))?;

    let mut stdout = std::io::stdout().lock();
    run(&archive, cli.command, &mut stdout).await
}
