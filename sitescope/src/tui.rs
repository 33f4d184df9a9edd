//! Tabbed terminal display for the aggregated site result.
//!
//! The display is a small state machine: a loading indicator is shown
//! immediately and unconditionally when a load starts, and is replaced by
//! either the tabbed list view or an error panel when its completion
//! arrives. Each load carries a monotonically increasing sequence number;
//! completions from superseded loads are discarded, so the displayed tab set
//! always corresponds to exactly one response.

use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    sync::mpsc::{Receiver, Sender, channel},
    time::{Duration, Instant},
};

use anyhow::{Result, anyhow};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{
        Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
};
use sitescope_client::{ClientError, SiteClient, SiteContext};
use sitescope_model::SiteInfo;
use tokio::runtime::Handle;

use crate::rows::{self, ListRow};

/// Fixed tab order; the first tab is selected by default.
pub const TAB_TITLES: [&str; 4] =
    ["Sub Webs", "Content Types", "Fields", "Lists"];

const LOADING_LABEL: &str = "Loading the site information";
const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Source of key/input events so tests can drive the TUI without a real tty.
trait EventSource {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>>;
    fn is_scripted(&self) -> bool {
        false
    }
}

struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Scripted event source driven by a simple line-oriented DSL:
///   down|up|j|k|left|right|enter|tab|q|r|[|]|1|2|3|4
/// Lines beginning with # are ignored. Blank lines are skipped.
/// When events are exhausted, we fail fast to avoid hangs.
struct ScriptEventSource {
    events: Vec<Event>,
    cursor: usize,
    exhausted_at: Option<Instant>,
    trace: Option<File>,
}

impl ScriptEventSource {
    fn from_path(path: PathBuf, trace_path: Option<PathBuf>) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .map_err(|err| anyhow!("read scripted TUI input: {err}"))?;
        let events = parse_script(&contents)?;
        let trace = trace_path
            .map(|p| {
                File::create(p)
                    .map_err(|err| anyhow!("create tui trace file: {err}"))
            })
            .transpose()?;

        Ok(Self {
            events,
            cursor: 0,
            exhausted_at: None,
            trace,
        })
    }
}

fn parse_script(contents: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let code = match line {
            "down" | "j" => KeyCode::Down,
            "up" | "k" => KeyCode::Up,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "q" | "quit" => KeyCode::Char('q'),
            "r" | "reload" => KeyCode::Char('r'),
            "[" => KeyCode::Char('['),
            "]" => KeyCode::Char(']'),
            "1" | "2" | "3" | "4" => {
                KeyCode::Char(line.chars().next().unwrap())
            }
            _ => {
                return Err(anyhow!(
                    "unrecognized TUI script token at line {}: {}",
                    idx + 1,
                    line
                ));
            }
        };
        events.push(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: event::KeyEventKind::Press,
            state: event::KeyEventState::NONE,
        }));
    }
    Ok(events)
}

impl EventSource for ScriptEventSource {
    fn next(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        if self.cursor >= self.events.len() {
            // Allow a short grace period before failing to avoid tight loop.
            match self.exhausted_at {
                Some(ea) => {
                    if ea.elapsed() > Duration::from_secs(1) {
                        return Err(anyhow!(
                            "scripted TUI input exhausted before quit"
                        ));
                    }
                }
                None => self.exhausted_at = Some(Instant::now()),
            }
            std::thread::sleep(Duration::from_millis(25));
            return Ok(None);
        }

        let ev = self.events[self.cursor].clone();
        self.cursor += 1;

        if let Some(trace) = self.trace.as_mut() {
            let _ = writeln!(trace, "{:?}", ev);
        }

        Ok(Some(ev))
    }

    fn is_scripted(&self) -> bool {
        true
    }
}

fn event_source_from_env() -> Result<Box<dyn EventSource>> {
    if let Ok(path) = std::env::var("SITESCOPE_TUI_SCRIPT") {
        let trace = std::env::var("SITESCOPE_TUI_TRACE").ok();
        let src = ScriptEventSource::from_path(
            PathBuf::from(path),
            trace.map(PathBuf::from),
        )?;
        Ok(Box::new(src))
    } else {
        Ok(Box::new(CrosstermEventSource))
    }
}

/// What the container currently shows. Every transition fully replaces the
/// previous content; there is no incremental diffing.
enum Phase {
    Loading,
    Ready(SiteInfo),
    Failed(String),
}

/// A load completion: the sequence number of the load that produced it plus
/// its outcome.
type Completion = (u64, Result<SiteInfo, ClientError>);

struct AppState {
    phase: Phase,
    tab: usize,
    list_state: ListState,
    latest_seq: u64,
    spinner_tick: usize,
}

impl AppState {
    fn new() -> Self {
        Self {
            phase: Phase::Loading,
            tab: 0,
            list_state: ListState::default(),
            latest_seq: 0,
            spinner_tick: 0,
        }
    }

    fn select_tab(&mut self, tab: usize) {
        if tab != self.tab {
            self.tab = tab;
            self.list_state = ListState::default();
        }
    }

    /// Apply a completion, discarding it when a newer load has been issued
    /// since. Last-issued wins, regardless of arrival order.
    fn apply_completion(
        &mut self,
        seq: u64,
        result: Result<SiteInfo, ClientError>,
    ) {
        if seq != self.latest_seq {
            tracing::debug!(
                seq,
                latest = self.latest_seq,
                "discarding stale load completion"
            );
            return;
        }
        self.phase = match result {
            Ok(site) => Phase::Ready(site),
            Err(err) => Phase::Failed(err.to_string()),
        };
        self.list_state = ListState::default();
    }

    fn active_rows(&self) -> Vec<ListRow> {
        match &self.phase {
            Phase::Ready(site) => rows_for_tab(site, self.tab),
            _ => Vec::new(),
        }
    }

    fn move_selection(&mut self, delta: i64) {
        let len = self.active_rows().len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            None => 0,
            Some(current) => {
                (current as i64 + delta).clamp(0, len as i64 - 1) as usize
            }
        };
        self.list_state.select(Some(next));
    }
}

fn rows_for_tab(site: &SiteInfo, tab: usize) -> Vec<ListRow> {
    match tab {
        0 => rows::sub_web_rows(&site.webs),
        1 => rows::content_type_rows(&site.content_types),
        2 => rows::field_rows(&site.fields),
        _ => rows::list_rows(&site.lists),
    }
}

/// Issue a new load: bump the sequence number, show the loading indicator
/// immediately, and hand the fetch to the runtime.
fn start_load(
    app: &mut AppState,
    ctx: &SiteContext,
    handle: &Handle,
    tx: &Sender<Completion>,
) {
    app.latest_seq += 1;
    let seq = app.latest_seq;
    app.phase = Phase::Loading;
    app.spinner_tick = 0;

    let ctx = ctx.clone();
    let tx = tx.clone();
    handle.spawn(async move {
        let result = match SiteClient::new(&ctx) {
            Ok(client) => client.fetch_site_info().await,
            Err(err) => Err(err),
        };
        // The receiver is gone once the TUI exits; nothing to do then.
        let _ = tx.send((seq, result));
    });
}

/// Run the interactive display until the user quits.
pub fn run(ctx: SiteContext, handle: Handle) -> Result<()> {
    let mut source = event_source_from_env()?;
    let scripted = source.is_scripted();

    let mut stdout = io::stdout();
    if !scripted {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &ctx, &handle, &mut *source);

    if !scripted {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ctx: &SiteContext,
    handle: &Handle,
    source: &mut dyn EventSource,
) -> Result<()> {
    let (tx, rx): (Sender<Completion>, Receiver<Completion>) = channel();
    let mut app = AppState::new();
    start_load(&mut app, ctx, handle, &tx);

    loop {
        while let Ok((seq, result)) = rx.try_recv() {
            app.apply_completion(seq, result);
        }

        terminal.draw(|f| render(f, ctx, &mut app))?;

        match source.next(Duration::from_millis(150))? {
            Some(Event::Key(key)) => {
                if handle_key(key, &mut app, ctx, handle, &tx) {
                    return Ok(());
                }
            }
            Some(Event::Resize(_, _)) => {
                // redrawn on next loop automatically
            }
            Some(_) => {}
            None => {
                if matches!(app.phase, Phase::Loading) {
                    app.spinner_tick = app.spinner_tick.wrapping_add(1);
                }
            }
        }
    }
}

/// Handle one key press; returns true when the display should close.
fn handle_key(
    key: KeyEvent,
    app: &mut AppState,
    ctx: &SiteContext,
    handle: &Handle,
    tx: &Sender<Completion>,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('r') => start_load(app, ctx, handle, tx),
        KeyCode::Right | KeyCode::Tab | KeyCode::Char(']') => {
            app.select_tab((app.tab + 1) % TAB_TITLES.len());
        }
        KeyCode::Left | KeyCode::Char('[') => {
            app.select_tab(
                (app.tab + TAB_TITLES.len() - 1) % TAB_TITLES.len(),
            );
        }
        KeyCode::Char(c @ '1'..='4') => {
            app.select_tab(c as usize - '1' as usize);
        }
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        _ => {}
    }
    false
}

fn render(f: &mut Frame, ctx: &SiteContext, app: &mut AppState) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)].as_ref())
        .split(f.size());
    let content_area = vertical[0];
    let status_area = vertical[1];

    match &app.phase {
        Phase::Loading => {
            let frame = SPINNER_FRAMES
                [app.spinner_tick % SPINNER_FRAMES.len()];
            let loading = Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{frame} "),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(LOADING_LABEL),
            ]))
            .block(Block::default().borders(Borders::ALL).title("Site"));
            f.render_widget(loading, content_area);
        }
        Phase::Failed(message) => {
            let error = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Failed to load the site information",
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::raw(message.clone())),
                Line::default(),
                Line::from(Span::styled(
                    "Press r to retry",
                    Style::default().fg(Color::Gray),
                )),
            ])
            .block(Block::default().borders(Borders::ALL).title("Error"))
            .wrap(Wrap { trim: true });
            f.render_widget(error, content_area);
        }
        Phase::Ready(site) => {
            let inner = Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [Constraint::Length(3), Constraint::Min(1)].as_ref(),
                )
                .split(content_area);

            let title = if site.title.is_empty() {
                "Site".to_string()
            } else {
                site.title.clone()
            };
            let titles: Vec<Line> =
                TAB_TITLES.iter().map(|t| Line::from(*t)).collect();
            let tabs = Tabs::new(titles)
                .block(Block::default().borders(Borders::ALL).title(title))
                .select(app.tab)
                .highlight_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                );
            f.render_widget(tabs, inner[0]);

            let rows = rows_for_tab(site, app.tab);
            let items: Vec<ListItem> =
                rows.iter().map(row_item).collect();
            let list = List::new(items)
                .block(
                    Block::default().borders(Borders::ALL).title(format!(
                        "{} ({})",
                        TAB_TITLES[app.tab],
                        rows.len()
                    )),
                )
                .highlight_style(
                    Style::new()
                        .bg(Color::Cyan)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");
            f.render_stateful_widget(list, inner[1], &mut app.list_state);
        }
    }

    let status = Paragraph::new(Line::from(Span::styled(
        format!(
            "{} • ←/→ tabs • 1-4 jump • ↑/↓ scroll • r reload • q quit",
            ctx.base_url
        ),
        Style::default().fg(Color::Gray),
    )))
    .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, status_area);
}

fn row_item(row: &ListRow) -> ListItem<'static> {
    let mut spans = vec![Span::styled(
        row.primary.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for extra in [&row.secondary, &row.tertiary, &row.meta] {
        if !extra.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                extra.clone(),
                Style::default().fg(Color::Gray),
            ));
        }
    }
    ListItem::new(Line::from(spans))
}
