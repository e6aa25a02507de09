//! Command-line front end for the item archive.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use item_archive_client::{Archive, ConnectConfig};
use item_archive_types::{ArchivePath, EntryKind, EntryMetadata, ImageFormat, TracingSink};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "item-archive")]
#[command(about = "Browse and edit an item archive", version)]
pub struct Cli {
    /// Base URL of the archive store
    #[arg(long, env = "ITEM_ARCHIVE_URL", default_value = "http://localhost:8330")]
    pub url: String,

    /// Per-request timeout in seconds (none by default)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn connect_config(&self) -> ConnectConfig {
        ConnectConfig {
            base_url: self.url.clone(),
            request_timeout_secs: self.timeout,
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List a container's children, items first
    Ls {
        #[arg(default_value = "/")]
        path: ArchivePath,
    },
    /// Print an entry's metadata as JSON
    Show {
        #[arg(default_value = "/")]
        path: ArchivePath,
    },
    /// Create a container
    Mkdir(NewEntry),
    /// Create an item
    Add {
        #[command(flatten)]
        entry: NewEntry,
        /// Picture of the item; the format is taken from the extension
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Move or rename an entry with everything below it
    Mv { src: ArchivePath, dst: ArchivePath },
    /// Delete an entry with everything below it
    Rm { path: ArchivePath },
}

#[derive(clap::Args, Debug)]
pub struct NewEntry {
    /// Container to create the entry in
    pub parent: ArchivePath,
    /// Identifier of the new entry
    pub id: String,
    /// Tag to attach (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl NewEntry {
    fn metadata(&self) -> EntryMetadata {
        let mut metadata = EntryMetadata::new(&self.id).with_tags(self.tags.iter().cloned());
        metadata.description = self.description.clone();
        metadata
    }
}

/// Executes `command` against `archive`, writing human output to `out`.
pub async fn run<A, W>(archive: &A, command: Command, out: &mut W) -> Result<()>
where
    A: Archive + ?Sized,
    W: Write,
{
    match command {
        Command::Ls { path } => {
            let outcome = archive
                .read(&path)
                .await
                .with_context(|| format!("failed to read {path}"))?;
            if !outcome.is_container() {
                bail!("{path} is not a container");
            }
            for row in outcome.entries() {
                let name = row.parsed(&TracingSink);
                let kind = if row.is_item {
                    EntryKind::Item
                } else {
                    EntryKind::Container
                };
                if name.tags.is_empty() {
                    writeln!(out, "{kind:<9}  {}", name.id)?;
                } else {
                    writeln!(out, "{kind:<9}  {}  [{}]", name.id, name.tags.join(", "))?;
                }
            }
        }
        Command::Show { path } => {
            let outcome = archive
                .read(&path)
                .await
                .with_context(|| format!("failed to read {path}"))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&outcome.metadata)?)?;
        }
        Command::Mkdir(entry) => {
            create(archive, &entry, entry.metadata(), EntryKind::Container, out).await?;
        }
        Command::Add { entry, image } => {
            let mut metadata = entry.metadata();
            if let Some(image) = image {
                let format = image
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(ImageFormat::from_extension)
                    .with_context(|| format!("unsupported image type: {}", image.display()))?;
                let bytes = std::fs::read(&image)
                    .with_context(|| format!("failed to read image {}", image.display()))?;
                debug!(bytes = bytes.len(), ?format, "Attaching image");
                metadata = metadata.with_image(bytes, format);
            }
            create(archive, &entry, metadata, EntryKind::Item, out).await?;
        }
        Command::Mv { src, dst } => {
            archive
                .move_entry(&src, &dst)
                .await
                .with_context(|| format!("failed to move {src} to {dst}"))?;
            writeln!(out, "{src} -> {dst}")?;
        }
        Command::Rm { path } => {
            archive
                .delete(&path)
                .await
                .with_context(|| format!("failed to delete {path}"))?;
            writeln!(out, "deleted {path}")?;
        }
    }
    Ok(())
}

async fn create<A, W>(
    archive: &A,
    entry: &NewEntry,
    metadata: EntryMetadata,
    kind: EntryKind,
    out: &mut W,
) -> Result<()>
where
    A: Archive + ?Sized,
    W: Write,
{
    let segment = metadata
        .segment_name(kind)
        .with_context(|| format!("cannot name entry '{}'", entry.id))?;
    let path = entry.parent.join(segment);
    archive
        .create(metadata, &path, kind.is_container())
        .await
        .with_context(|| format!("failed to create {path}"))?;
    writeln!(out, "created {path}")?;
    Ok(())
}
