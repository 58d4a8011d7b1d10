//! CLI definitions for MangaView.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// MangaView CLI.
#[derive(Parser)]
#[command(name = "mangaview")]
#[command(about = "MangaDex catalog relay and terminal chapter reader")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the catalog and image relay
    Serve {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Search series by title
    Search {
        query: String,

        /// Result page (20 per page)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show a series and its chapters
    Details { series_id: String },

    /// Read a chapter interactively
    Read {
        chapter_id: String,

        /// Page to open on
        #[arg(long)]
        page: Option<usize>,

        /// Directory displayed pages are written to
        #[arg(long)]
        out: Option<PathBuf>,

        /// Load pages straight from the image host first
        #[arg(long)]
        direct: bool,
    },
}
