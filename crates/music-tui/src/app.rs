//! App: the event loop.
//!
//! Architecture:
//! - `App` owns `AppState`, the navigator, the overlays and the panes.
//! - A `tokio::mpsc` channel carries `AppMessage`s in from background tasks:
//!   terminal input, fetch results and the status poller.
//! - Each message is applied to completion, then the frame is redrawn.
//! - Player mutations leave through the [`WorkQueue`] and never report back;
//!   the next status poll shows their effect.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use music_proto::config::UiConfig;
use music_proto::{PlaybackClient, PlaybackStatus, Playlist, QueueSnapshot, Track};

use crate::{
    action::{Action, MenuOption, Modal, PanelId},
    app_state::{AppState, Loadable, MainContent},
    component::{Component, RenderCtx},
    components::{
        context_menu::ContextMenu, now_playing::NowPlaying, playlists::PlaylistsPanel,
        queue_inspector::QueueInspector, tracks::TracksPanel,
    },
    navigation::{default_layout, Focus, NavContext, Navigator, Routed},
    overlay::{body_height, overlay_rect, render_overlay},
    text::error_line,
    theme::Theme,
    widgets::status_bar::{draw_keys_bar, InputMode},
    worker::{Job, WorkQueue},
};

// ── Internal event bus ────────────────────────────────────────────────────────

/// Everything the loop reacts to. Fetch results carry the error as a single
/// bounded line; it only ever ends up on screen.
#[derive(Debug)]
pub enum AppMessage {
    Input(Event),
    PlaylistNames(Result<Vec<String>, String>),
    PlaylistLoaded {
        name: String,
        result: Result<Playlist, String>,
    },
    SearchResults {
        query: String,
        result: Result<Vec<Track>, String>,
    },
    Queue(Result<QueueSnapshot, String>),
    Status(Result<PlaybackStatus, String>),
}

const MAX_DRAIN: usize = 256;
const INPUT_POLL: Duration = Duration::from_millis(250);

pub struct App {
    client: Arc<PlaybackClient>,
    work: WorkQueue,
    ui: UiConfig,
    theme: Theme,
    state: AppState,
    nav: Navigator,
    inspector: QueueInspector,
    menu: ContextMenu,
    playlists_panel: PlaylistsPanel,
    tracks_panel: TracksPanel,
    now_playing: NowPlaying,
    tx: Option<mpsc::Sender<AppMessage>>,
    should_quit: bool,
}

impl App {
    pub fn new(client: Arc<PlaybackClient>, work: WorkQueue, ui: UiConfig) -> Self {
        let state = AppState::new(client.queue_name(), ui.playlist_cache_ttl());
        Self {
            client,
            work,
            ui,
            theme: Theme::default(),
            state,
            nav: Navigator::new(default_layout()),
            inspector: QueueInspector::default(),
            menu: ContextMenu::default(),
            playlists_panel: PlaylistsPanel,
            tracks_panel: TracksPanel,
            now_playing: NowPlaying,
            tx: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, rx) = mpsc::channel::<AppMessage>(1024);
        self.tx = Some(tx.clone());

        // ── Background task: keyboard events ──────────────────────────────────
        // Polls with a timeout so the thread notices the loop going away.
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Input(ev)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("terminal read failed: {}", e);
                        break;
                    }
                },
                Err(e) => {
                    error!("terminal poll failed: {}", e);
                    break;
                }
            }
        });

        spawn_status_poller(Arc::clone(&self.client), tx, self.ui.poll_interval());
        self.load_playlist_names();

        let result = self.event_loop(&mut terminal, rx).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("amtui exiting");
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        mut rx: mpsc::Receiver<AppMessage>,
    ) -> anyhow::Result<()> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            if self.should_quit {
                break;
            }

            let Some(msg) = rx.recv().await else {
                break;
            };
            let mut redraw = self.handle_message(msg);
            let mut drained = 0usize;
            while drained < MAX_DRAIN {
                let Ok(next) = rx.try_recv() else {
                    break;
                };
                drained += 1;
                redraw |= self.handle_message(next);
            }
            needs_redraw = redraw;
        }
        Ok(())
    }

    // ── Messages ──────────────────────────────────────────────────────────────

    /// Apply one message. Returns whether the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Input(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    return false;
                }
                self.handle_key(key);
                true
            }
            AppMessage::Input(Event::Resize(..)) => true,
            AppMessage::Input(_) => false,

            AppMessage::PlaylistNames(result) => {
                if let Err(e) = &result {
                    warn!("playlist names: {}", e);
                }
                self.state.playlists = Loadable::from_result(result);
                true
            }

            AppMessage::PlaylistLoaded { name, result } => {
                let waiting = self.state.main == MainContent::Loading(name.clone());
                match result {
                    Ok(playlist) => {
                        self.state.cache.insert(playlist.clone(), Instant::now());
                        if waiting {
                            self.state.main = MainContent::Playlist(playlist);
                        }
                    }
                    Err(message) => {
                        warn!("playlist {:?}: {}", name, message);
                        if waiting {
                            self.state.main = MainContent::Error {
                                title: format!("Could not load {}", name),
                                message,
                            };
                        }
                    }
                }
                waiting
            }

            AppMessage::SearchResults { query, result } => {
                if self.state.main != MainContent::Searching(query.clone()) {
                    debug!("dropping stale results for {:?}", query);
                    return false;
                }
                self.state.main = match result {
                    Ok(tracks) => {
                        info!("search {:?}: {} results", query, tracks.len());
                        MainContent::SearchResults { query, tracks }
                    }
                    Err(message) => {
                        warn!("search {:?}: {}", query, message);
                        MainContent::Error {
                            title: "Search failed".to_string(),
                            message,
                        }
                    }
                };
                true
            }

            AppMessage::Queue(result) => {
                if let Err(e) = &result {
                    warn!("queue snapshot: {}", e);
                }
                self.state.queue = Loadable::from_result(result);
                self.nav.modal() == Some(Modal::QueueInspector)
            }

            AppMessage::Status(Ok(status)) => {
                let new_id = status.track.as_ref().map(|t| t.id.clone());
                if new_id.is_some() && new_id.as_deref() != self.state.current_track_id() {
                    debug!("track changed to {:?}", new_id);
                    self.work.submit(Job::CleanupQueue);
                }
                self.state.status = Some(status);
                self.state.status_error = None;
                true
            }
            AppMessage::Status(Err(e)) => {
                let changed = self.state.status_error.as_deref() != Some(e.as_str());
                if changed {
                    warn!("status poll: {}", e);
                }
                self.state.status_error = Some(e);
                changed
            }
        }
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) {
        let actions = match self.nav.handle_key(key, &self.state) {
            Routed::Handled(actions) => actions,
            Routed::Modal(Modal::QueueInspector, key) => self.inspector.handle_key(key, &self.state),
            Routed::Modal(Modal::ContextMenu, key) => self.menu.handle_key(key),
            Routed::Search(key) => {
                self.state.search.handle_key(key);
                Vec::new()
            }
            Routed::Unhandled(key) => self.global_key(key).into_iter().collect(),
        };
        for action in actions {
            self.apply_action(action);
        }
    }

    /// Playback keys, active whenever no modal or search has the keyboard.
    fn global_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        let volume = i16::from(self.ui.volume_step);
        let seek = self.ui.seek_step_secs as f64;
        let job = match key.code {
            KeyCode::Char(' ') => Job::TogglePlayPause,
            KeyCode::Char('n') => Job::NextTrack,
            KeyCode::Char('p') => Job::PreviousTrack,
            KeyCode::Char('s') => Job::ToggleShuffle,
            KeyCode::Char('r') => Job::CycleRepeat,
            KeyCode::Char('+') | KeyCode::Char('=') => Job::ChangeVolume(volume),
            KeyCode::Char('-') => Job::ChangeVolume(-volume),
            KeyCode::Char(',') => Job::SeekRelative(-seek),
            KeyCode::Char('.') => Job::SeekRelative(seek),
            _ => return None,
        };
        Some(Action::Remote(job))
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    fn apply_action(&mut self, action: Action) {
        debug!("action: {:?}", action);
        match action {
            Action::Quit => self.should_quit = true,

            Action::BeginSearch => self.state.search.activate(),
            Action::SubmitSearch => {
                let query = self.state.search.text().trim().to_string();
                self.state.search.deactivate();
                self.state.main = MainContent::Searching(query.clone());
                self.nav.show_content(PanelId::Tracks);
                self.search(query);
            }
            Action::CancelSearch => {
                self.state.search.clear();
                self.state.search.deactivate();
            }

            Action::Activate {
                panel: PanelId::Playlists,
                index,
            } => self.open_playlist(index),
            Action::Activate {
                panel: PanelId::Tracks,
                index,
            } => self.play_entry(index),

            Action::ModalOpened(Modal::QueueInspector) => {
                self.inspector.reset();
                self.refresh_queue();
            }
            Action::ModalOpened(Modal::ContextMenu) => {
                let index = self.nav.selected(PanelId::Tracks);
                match self.state.main.tracks().get(index) {
                    Some(track) => self.menu.open(index, track.clone()),
                    None => self.nav.close_modal(),
                }
            }
            Action::CloseModal => self.nav.close_modal(),
            Action::RefreshQueue => self.refresh_queue(),
            Action::QueueJump(position) => self.work.submit(Job::SkipTo(position)),
            Action::MenuChoice(option) => {
                let Some((index, track)) = self.menu.target().cloned() else {
                    return;
                };
                match option {
                    MenuOption::Play => self.play_entry(index),
                    MenuOption::PlayNext => self.work.submit(Job::PlayNext {
                        name: track.name,
                        artist: track.artist,
                    }),
                    MenuOption::AddToQueue => self.work.submit(Job::AddToQueue {
                        name: track.name,
                        artist: track.artist,
                    }),
                }
            }

            Action::Remote(job) => self.work.submit(job),
        }
    }

    fn open_playlist(&mut self, index: usize) {
        let Some(name) = self.state.playlist_names().get(index).cloned() else {
            return;
        };
        if let Some(cached) = self.state.cache.get(&name, Instant::now()) {
            debug!("playlist {:?} served from cache", name);
            self.state.main = MainContent::Playlist(cached.clone());
            return;
        }
        self.state.main = MainContent::Loading(name.clone());
        let client = Arc::clone(&self.client);
        let fetch_name = name.clone();
        self.spawn_fetch(
            async move { client.playlist(&fetch_name).await },
            move |result| AppMessage::PlaylistLoaded { name, result },
        );
    }

    /// Enter on entry `index` of the main panel.
    fn play_entry(&mut self, index: usize) {
        let job = match &self.state.main {
            MainContent::Playlist(p) if index < p.tracks.len() => Job::PlayFromPosition {
                playlist: p.name.clone(),
                position: index + 1,
                shuffle: self.state.shuffle(),
            },
            MainContent::SearchResults { tracks, .. } => match tracks.get(index) {
                Some(t) if !t.id.is_empty() => Job::PlayTrack { id: t.id.clone() },
                Some(t) => {
                    warn!("{:?} has no persistent id; cannot play it directly", t.name);
                    return;
                }
                None => return,
            },
            _ => return,
        };
        self.work.submit(job);
    }

    // ── Fetches ───────────────────────────────────────────────────────────────

    fn spawn_fetch<T, Fut, F>(&self, fut: Fut, wrap: F)
    where
        T: Send + 'static,
        Fut: Future<Output = music_proto::error::Result<T>> + Send + 'static,
        F: FnOnce(Result<T, String>) -> AppMessage + Send + 'static,
    {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        tokio::spawn(async move {
            let result = fut.await.map_err(error_line);
            let _ = tx.send(wrap(result)).await;
        });
    }

    fn load_playlist_names(&self) {
        let client = Arc::clone(&self.client);
        self.spawn_fetch(
            async move { client.playlist_names().await },
            AppMessage::PlaylistNames,
        );
    }

    fn search(&self, query: String) {
        let client = Arc::clone(&self.client);
        let q = query.clone();
        self.spawn_fetch(async move { client.search(&q).await }, move |result| {
            AppMessage::SearchResults { query, result }
        });
    }

    fn refresh_queue(&mut self) {
        self.state.queue = Loadable::Loading;
        let client = Arc::clone(&self.client);
        self.spawn_fetch(async move { client.queue_snapshot().await }, AppMessage::Queue);
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(self.theme.bg)), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(outer[0]);
        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(body[0]);

        // Panel windows follow the rendered size before anything is drawn.
        let inner_height = |h: u16| h.saturating_sub(2) as usize;
        let playlists = self.state.item_count(PanelId::Playlists);
        let tracks = self.state.item_count(PanelId::Tracks);
        self.nav
            .sync_viewport(PanelId::Playlists, inner_height(sidebar[1].height), playlists);
        self.nav
            .sync_viewport(PanelId::Tracks, inner_height(body[1].height), tracks);
        let modal = self.nav.modal().map(|m| (m, overlay_rect(m, area.width, area.height)));
        if let Some((Modal::QueueInspector, rect)) = modal {
            let upcoming = self
                .state
                .queue
                .ready()
                .map(|s| s.upcoming().count())
                .unwrap_or(0);
            self.inspector.sync(body_height(rect), upcoming);
        }

        let ctx = RenderCtx {
            state: &self.state,
            nav: &self.nav,
            theme: &self.theme,
        };
        self.state.search.draw(frame, sidebar[0], &self.theme);
        self.playlists_panel.draw(frame, sidebar[1], &ctx);
        self.tracks_panel.draw(frame, body[1], &ctx);
        self.now_playing.draw(frame, outer[1], &ctx);
        let searching = self.nav.underlying_focus() == Focus::Search;
        let mode = InputMode::for_modal(self.nav.modal(), searching);
        draw_keys_bar(frame, outer[2], mode, self.nav.chord_pending(), &self.theme);

        if let Some((modal, rect)) = modal {
            let lines = match modal {
                Modal::QueueInspector => {
                    render_overlay(rect, &self.inspector.view(&self.state), &self.theme)
                }
                Modal::ContextMenu => render_overlay(rect, &self.menu, &self.theme),
            };
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(lines).style(Style::default().bg(self.theme.overlay_bg)),
                rect,
            );
        }
    }
}

/// Poll, post, sleep, repeat. A slow poll delays the next one instead of
/// overlapping it. Stops when the loop goes away.
fn spawn_status_poller(
    client: Arc<PlaybackClient>,
    tx: mpsc::Sender<AppMessage>,
    every: Duration,
) {
    tokio::spawn(async move {
        loop {
            let result = client.playback_status().await.map_err(error_line);
            if tx.send(AppMessage::Status(result)).await.is_err() {
                break;
            }
            tokio::time::sleep(every).await;
        }
        debug!("status poller stopped");
    });
}

/// Restore the terminal before the default hook prints the panic.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        error!("panic: {}", info);
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use music_proto::script::ScriptContext;
    use music_proto::Osascript;
    use tokio::sync::mpsc::UnboundedReceiver;

    // Fetches are no-ops without a channel, so the client is never called.
    fn app() -> (App, UnboundedReceiver<Job>) {
        let automation = Arc::new(Osascript::new("osascript", Duration::from_secs(1)));
        let client = Arc::new(PlaybackClient::new(automation, ScriptContext::default()));
        let (work, jobs) = WorkQueue::channel();
        (App::new(client, work, UiConfig::default()), jobs)
    }

    fn submitted(jobs: &mut UnboundedReceiver<Job>) -> Vec<Job> {
        let mut out = Vec::new();
        while let Ok(job) = jobs.try_recv() {
            out.push(job);
        }
        out
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        app.handle_message(AppMessage::Input(Event::Key(key)));
    }

    fn road_trip() -> Playlist {
        Playlist {
            name: "Road Trip".into(),
            tracks: vec![
                Track::new("A1", "Intro", "The xx", "xx", 128.0),
                Track::new("A2", "Midnight City", "M83", "Hurry Up", 243.0),
                Track::new("A3", "Kids", "MGMT", "Oracular", 302.0),
            ],
        }
    }

    fn status_with(id: &str, shuffle: bool) -> PlaybackStatus {
        PlaybackStatus {
            track: Some(Track::new(id, "Song", "Artist", "Album", 200.0)),
            shuffle,
            ..PlaybackStatus::default()
        }
    }

    #[test]
    fn enter_on_playlist_track_plays_from_its_position() {
        let (mut app, mut jobs) = app();
        app.state.main = MainContent::Playlist(road_trip());
        app.state.status = Some(status_with("Z", true));
        app.nav.focus_panel(PanelId::Tracks);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            submitted(&mut jobs),
            vec![Job::PlayFromPosition {
                playlist: "Road Trip".into(),
                position: 2,
                shuffle: true,
            }]
        );
    }

    #[test]
    fn enter_on_search_result_plays_track_by_id() {
        let (mut app, mut jobs) = app();
        app.state.main = MainContent::SearchResults {
            query: "kids".into(),
            tracks: vec![
                Track::new("", "No Id", "Nobody", "", 10.0),
                Track::new("A3", "Kids", "MGMT", "Oracular", 302.0),
            ],
        };
        app.nav.focus_panel(PanelId::Tracks);

        press(&mut app, KeyCode::Enter);
        assert!(submitted(&mut jobs).is_empty());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(submitted(&mut jobs), vec![Job::PlayTrack { id: "A3".into() }]);
    }

    #[test]
    fn stale_playlist_is_cached_but_not_shown() {
        let (mut app, _jobs) = app();
        app.state.main = MainContent::Loading("Focus".into());

        let redraw = app.handle_message(AppMessage::PlaylistLoaded {
            name: "Road Trip".into(),
            result: Ok(road_trip()),
        });

        assert!(!redraw);
        assert_eq!(app.state.main, MainContent::Loading("Focus".into()));
        assert!(app.state.cache.get("Road Trip", Instant::now()).is_some());

        let focus = Playlist {
            name: "Focus".into(),
            tracks: Vec::new(),
        };
        assert!(app.handle_message(AppMessage::PlaylistLoaded {
            name: "Focus".into(),
            result: Ok(focus.clone()),
        }));
        assert_eq!(app.state.main, MainContent::Playlist(focus));
    }

    #[test]
    fn stale_playlist_error_is_dropped() {
        let (mut app, _jobs) = app();
        app.state.main = MainContent::Loading("Focus".into());

        app.handle_message(AppMessage::PlaylistLoaded {
            name: "Road Trip".into(),
            result: Err("timed out".into()),
        });

        assert_eq!(app.state.main, MainContent::Loading("Focus".into()));
    }

    #[test]
    fn stale_search_results_are_dropped() {
        let (mut app, _jobs) = app();
        app.state.main = MainContent::Searching("kids".into());

        let redraw = app.handle_message(AppMessage::SearchResults {
            query: "intro".into(),
            result: Ok(road_trip().tracks),
        });
        assert!(!redraw);
        assert_eq!(app.state.main, MainContent::Searching("kids".into()));

        app.handle_message(AppMessage::SearchResults {
            query: "kids".into(),
            result: Ok(vec![road_trip().tracks[2].clone()]),
        });
        assert!(matches!(
            &app.state.main,
            MainContent::SearchResults { query, tracks } if query == "kids" && tracks.len() == 1
        ));
    }

    #[test]
    fn track_change_queues_cleanup() {
        let (mut app, mut jobs) = app();

        app.handle_message(AppMessage::Status(Ok(status_with("A1", false))));
        assert_eq!(submitted(&mut jobs), vec![Job::CleanupQueue]);

        app.handle_message(AppMessage::Status(Ok(status_with("A1", false))));
        assert!(submitted(&mut jobs).is_empty());

        app.handle_message(AppMessage::Status(Ok(status_with("A2", false))));
        assert_eq!(submitted(&mut jobs), vec![Job::CleanupQueue]);

        app.handle_message(AppMessage::Status(Ok(PlaybackStatus::default())));
        assert!(submitted(&mut jobs).is_empty());
    }

    #[test]
    fn repeated_status_error_redraws_once() {
        let (mut app, _jobs) = app();
        let err = || AppMessage::Status(Err("Music app is not running".into()));

        assert!(app.handle_message(err()));
        assert!(!app.handle_message(err()));
        assert_eq!(app.state.status_error.as_deref(), Some("Music app is not running"));
    }

    #[test]
    fn context_menu_choices_map_to_queue_jobs() {
        let (mut app, mut jobs) = app();
        app.state.main = MainContent::Playlist(road_trip());
        app.nav.focus_panel(PanelId::Tracks);
        press(&mut app, KeyCode::Down);

        press(&mut app, KeyCode::Char('K'));
        assert_eq!(app.nav.modal(), Some(Modal::ContextMenu));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.nav.modal(), None);
        assert_eq!(
            submitted(&mut jobs),
            vec![Job::PlayNext {
                name: "Midnight City".into(),
                artist: "M83".into(),
            }]
        );

        app.apply_action(Action::MenuChoice(MenuOption::AddToQueue));
        assert_eq!(
            submitted(&mut jobs),
            vec![Job::AddToQueue {
                name: "Midnight City".into(),
                artist: "M83".into(),
            }]
        );
    }

    #[test]
    fn queue_jump_skips_to_position() {
        let (mut app, mut jobs) = app();
        app.apply_action(Action::QueueJump(4));
        assert_eq!(submitted(&mut jobs), vec![Job::SkipTo(4)]);
    }
}
