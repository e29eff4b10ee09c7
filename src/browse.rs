//! Line-driven navigation between views.

use anyhow::Result;
use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::query::{GalleryFilter, ListQuery};
use crate::render::render;
use crate::routes::Route;
use crate::{View, Viewer};

pub const HELP: &str = "commands: <path> | <number> | n(ext) | p(rev) | s(earch) | g(allery) | r(efresh) | h(elp) | q(uit)\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(Route),
    Pick(usize),
    Next,
    Prev,
    Refresh,
    Help,
    Quit,
    Unknown(String),
}

/// `None` for a blank line.
pub fn parse_command(line: &str, base_path: Option<&str>) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.starts_with('/') {
        return Some(Command::Go(Route::parse(line, base_path)));
    }
    if let Ok(n) = line.parse::<usize>() {
        return Some(Command::Pick(n));
    }
    Some(match line.to_ascii_lowercase().as_str() {
        "n" | "next" => Command::Next,
        "p" | "prev" | "previous" => Command::Prev,
        "s" | "search" => Command::Go(Route::Search(ListQuery::default())),
        "g" | "gallery" => Command::Go(Route::Gallery(GalleryFilter::default())),
        "r" | "refresh" => Command::Refresh,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    })
}

/// Where the user is and what the last view offered to navigate to.
#[derive(Debug, Clone)]
pub struct Session {
    current: Route,
    /// Dates of the last rendered list or gallery, in display order.
    picks: Vec<String>,
    prev: Option<String>,
    next: Option<String>,
}

impl Session {
    pub fn new(start: Route) -> Self {
        Self { current: start.resolve(), picks: Vec::new(), prev: None, next: None }
    }

    pub fn current(&self) -> &Route { &self.current }

    /// Remember the navigation targets `view` exposes.
    pub fn record(&mut self, view: &View) {
        match view {
            View::List(v) => {
                self.picks = v.entries.iter().map(|a| a.date.clone()).collect();
                self.prev = None;
                self.next = None;
            }
            View::Gallery(v) => {
                self.picks = v.cards.iter().map(|c| c.date.clone()).collect();
                self.prev = None;
                self.next = None;
            }
            View::Detail(d) => {
                self.prev = d.prev.clone();
                self.next = d.next.clone();
            }
            View::DetailError { .. } | View::NotFound(_) => {
                self.prev = None;
                self.next = None;
            }
        }
    }

    /// Route a navigation command leads to, or the message explaining why it
    /// cannot be followed.
    pub fn target(&self, cmd: &Command) -> std::result::Result<Route, String> {
        match cmd {
            Command::Go(r) => Ok(r.clone().resolve()),
            Command::Pick(n) => n
                .checked_sub(1)
                .and_then(|i| self.picks.get(i))
                .map(|d| Route::Detail(d.clone()))
                .ok_or_else(|| format!("no entry #{n} in the last list")),
            Command::Next => self.next.clone().map(Route::Detail).ok_or_else(|| "no next entry".to_string()),
            Command::Prev => self.prev.clone().map(Route::Detail).ok_or_else(|| "no previous entry".to_string()),
            Command::Refresh => Ok(self.current.clone()),
            Command::Help | Command::Quit | Command::Unknown(_) => Err(HELP.trim_end().to_string()),
        }
    }
}

async fn show<W: AsyncWrite + Unpin>(viewer: &mut Viewer, session: &mut Session, route: Route, today: NaiveDate, refresh: bool, out: &mut W) -> Result<()> {
    tracing::debug!(path = %route.to_path(), "navigating");
    let view = viewer.open(route.clone(), today, refresh).await;
    session.current = route;
    session.record(&view);
    out.write_all(format!("\n[{}]\n", session.current.to_path()).as_bytes()).await?;
    out.write_all(render(&view).as_bytes()).await?;
    Ok(())
}

/// Render `start`, then follow commands from `input` until `q` or end of input.
pub async fn run<R, W>(viewer: &mut Viewer, start: Route, base_path: Option<&str>, today: NaiveDate, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new(start);
    let first = session.current.clone();
    show(viewer, &mut session, first, today, false, out).await?;

    let mut lines = input.lines();
    loop {
        out.write_all(b"> ").await?;
        out.flush().await?;
        let Some(line) = lines.next_line().await? else { break };
        let Some(cmd) = parse_command(&line, base_path) else { continue };
        match cmd {
            Command::Quit => break,
            Command::Help => out.write_all(HELP.as_bytes()).await?,
            Command::Unknown(s) => out.write_all(format!("unknown command: {s}\n{HELP}").as_bytes()).await?,
            ref nav => match session.target(nav) {
                Ok(route) => {
                    let refresh = matches!(nav, Command::Refresh);
                    show(viewer, &mut session, route, today, refresh, out).await?;
                }
                Err(msg) => out.write_all(format!("{msg}\n").as_bytes()).await?,
            },
        }
    }
    out.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{sample, MediaKind};
    use crate::{DetailView, ListView};

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("  ", None), None);
        assert_eq!(parse_command("3", None), Some(Command::Pick(3)));
        assert_eq!(parse_command("N", None), Some(Command::Next));
        assert_eq!(parse_command("/apod/2024-01-01", None), Some(Command::Go(Route::Detail("2024-01-01".into()))));
        assert_eq!(parse_command("g", None), Some(Command::Go(Route::Gallery(GalleryFilter::default()))));
        assert_eq!(parse_command("dance", None), Some(Command::Unknown("dance".into())));
    }

    #[test]
    fn picks_come_from_last_list() {
        let mut s = Session::new(Route::Root);
        assert_eq!(s.current(), &Route::Search(ListQuery::default()));
        s.record(&View::List(ListView {
            query: ListQuery::default(),
            entries: vec![sample("2024-03-02", "b", MediaKind::Image), sample("2024-03-01", "a", MediaKind::Image)],
            error: None,
        }));
        assert_eq!(s.target(&Command::Pick(2)), Ok(Route::Detail("2024-03-01".into())));
        assert!(s.target(&Command::Pick(0)).is_err());
        assert!(s.target(&Command::Pick(3)).is_err());
        assert!(s.target(&Command::Next).is_err());
    }

    #[test]
    fn prev_and_next_come_from_detail() {
        let mut s = Session::new(Route::Detail("2024-03-02".into()));
        let apod = sample("2024-03-02", "b", MediaKind::Image);
        s.record(&View::Detail(DetailView { media_src: apod.url.clone(), apod, prev: None, next: Some("2024-03-01".into()) }));
        assert_eq!(s.target(&Command::Next), Ok(Route::Detail("2024-03-01".into())));
        assert_eq!(s.target(&Command::Prev), Err("no previous entry".to_string()));
    }
}
