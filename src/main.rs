mod cli;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use apodview::config::Config;
use apodview::query::{GalleryFilter, ListQuery, MediaFilter, SortDir, SortKey};
use apodview::render::render;
use apodview::routes::Route;
use apodview::{browse, today_utc, View, Viewer};
use cli::{CacheAction, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the views; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;
    let mut viewer = Viewer::connect(&cfg, cli.ephemeral).await?;
    let today = today_utc();

    let view = match cli.command {
        Commands::Search { query, sort, dir, refresh, json } => {
            let q = ListQuery {
                q: query,
                sort: SortKey::parse(&sort).unwrap_or_default(),
                dir: SortDir::parse(&dir).unwrap_or_default(),
            };
            let list = viewer.list(q, today, refresh).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&list.entries)?);
                if let Some(err) = list.error { eprintln!("Error: {err}"); }
                return Ok(());
            }
            View::List(list)
        }
        Commands::Gallery { media, year, refresh } => {
            let filter = GalleryFilter {
                media: MediaFilter::parse(&media).unwrap_or_default(),
                year: year.filter(|y| y != "all"),
            };
            View::Gallery(viewer.gallery(filter, today, refresh).await)
        }
        Commands::Show { date } => viewer.open(Route::Detail(date), today, false).await,
        Commands::Open { path, refresh } => {
            let route = Route::parse(&path, cfg.base_path.as_deref());
            viewer.open(route, today, refresh).await
        }
        Commands::Browse { path } => {
            let start = Route::parse(&path, cfg.base_path.as_deref());
            let input = BufReader::new(tokio::io::stdin());
            let mut out = tokio::io::stdout();
            browse::run(&mut viewer, start, cfg.base_path.as_deref(), today, input, &mut out).await?;
            out.flush().await?;
            return Ok(());
        }
        Commands::Cache { action } => {
            match action {
                CacheAction::Stats => {
                    let items = viewer.store().items();
                    match (items.iter().map(|a| a.date.as_str()).min(), items.iter().map(|a| a.date.as_str()).max()) {
                        (Some(first), Some(last)) => println!("{} cached entries ({first} .. {last})", items.len()),
                        _ => println!("cache is empty"),
                    }
                }
                CacheAction::Clear => {
                    viewer.clear_cache().await;
                    println!("cache cleared");
                }
            }
            return Ok(());
        }
    };

    print!("{}", render(&view));
    Ok(())
}
