use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse the NASA Astronomy Picture of the Day feed from the terminal
#[derive(Parser)]
#[command(name = "apodview", version)]
#[command(about = "Search, filter and read NASA APOD entries", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the entry cache in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Searchable list of recent entries
    Search {
        /// Case-insensitive text to find in titles and explanations
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(long, default_value = "date", value_parser = ["date", "title"])]
        sort: String,
        #[arg(long, default_value = "desc", value_parser = ["asc", "desc"])]
        dir: String,
        /// Refetch the date window even when entries are cached
        #[arg(long)]
        refresh: bool,
        /// Print matching entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Thumbnail gallery filtered by media kind and year
    Gallery {
        #[arg(long, default_value = "all", value_parser = ["all", "image", "video"])]
        media: String,
        /// Four-digit year, or "all"
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        refresh: bool,
    },
    /// One entry with previous/next links
    Show {
        /// Entry date, YYYY-MM-DD
        date: String,
    },
    /// Render the view a path names, e.g. "/search?q=moon&sort=title"
    Open {
        path: String,
        #[arg(long)]
        refresh: bool,
    },
    /// Interactive navigation starting at PATH
    Browse {
        #[arg(default_value = "/search")]
        path: String,
    },
    /// Inspect or empty the local entry cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Count cached entries and show the date span
    Stats,
    /// Drop every cached entry
    Clear,
}
