//! App: host event loop around the cocktail detail view.
//!
//! Architecture:
//! - `App` owns the terminal, the detail view, the overlays and the shared
//!   favorites store.
//! - Terminal events arrive from a blocking reader thread over an mpsc channel;
//!   lookup results arrive over a second channel, tagged with their mount.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use cocktail_proto::lookup::RecipeLookup;
use cocktail_proto::recipe::RecipeId;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    action::Action,
    component::Component,
    components::{cocktail_detail::CocktailDetail, help_overlay::HelpOverlay},
    favorites::{self, SharedFavorites},
    fetch::LookupDelivery,
    theme::C_BG,
    widgets::{loader::LoaderAsset, status_bar, toast::ToastManager},
};

pub struct App {
    recipe_id: RecipeId,
    lookup: Arc<dyn RecipeLookup>,
    favorites: SharedFavorites,
    loader_asset: LoaderAsset,

    detail: CocktailDetail,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    show_keys_bar: bool,
    should_quit: bool,
    /// Where the detail view was last drawn (for mouse hit-testing).
    detail_area: Rect,

    lookup_tx: mpsc::Sender<LookupDelivery>,
    lookup_rx: Option<mpsc::Receiver<LookupDelivery>>,
}

impl App {
    pub fn new(
        recipe_id: RecipeId,
        lookup: Arc<dyn RecipeLookup>,
        favorites: SharedFavorites,
        loader_asset: LoaderAsset,
        show_keys_bar: bool,
    ) -> Self {
        let detail = build_view(&recipe_id, &favorites, &loader_asset);
        let (lookup_tx, lookup_rx) = mpsc::channel(8);
        Self {
            recipe_id,
            lookup,
            favorites,
            loader_asset,
            detail,
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            show_keys_bar,
            should_quit: false,
            detail_area: Rect::default(),
            lookup_tx,
            lookup_rx: Some(lookup_rx),
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut lookup_rx = self
            .lookup_rx
            .take()
            .context("event loop already started")?;

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let result = self.event_loop(&mut terminal, &mut lookup_rx).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        lookup_rx: &mut mpsc::Receiver<LookupDelivery>,
    ) -> anyhow::Result<()> {
        // ── Background task: keyboard/mouse events ────────────────────────────
        let (event_tx, mut event_rx) = mpsc::channel::<Event>(256);
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // Loader animation + toast expiry
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        self.activate_view();

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            needs_redraw = tokio::select! {
                Some(ev) = event_rx.recv() => self.handle_event(ev),

                Some(delivery) = lookup_rx.recv() => self.on_lookup(delivery),

                _ = ui_tick.tick() => {
                    let animated = self.detail.tick();
                    let expired = self.toast.tick();
                    animated || expired
                }
            };

            if self.should_quit {
                break;
            }
        }

        info!("[app] quitting");
        Ok(())
    }

    // ── View lifecycle ────────────────────────────────────────────────────────

    fn activate_view(&mut self) {
        self.detail
            .activate(self.lookup.clone(), self.lookup_tx.clone());
    }

    /// Leave and re-enter the detail screen: the old view (and its mount) is
    /// dropped, and a new one starts from Loading with a fresh snapshot.
    fn reenter(&mut self) {
        info!("[app] re-entering detail view for {}", self.recipe_id);
        self.detail = build_view(&self.recipe_id, &self.favorites, &self.loader_asset);
        self.activate_view();
    }

    fn on_lookup(&mut self, delivery: LookupDelivery) -> bool {
        if delivery.mount != self.detail.mount_id() {
            debug!("[app] dropping lookup for unmounted view {}", delivery.mount);
            return false;
        }
        self.detail.on_lookup(delivery)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn handle_event(&mut self, ev: Event) -> bool {
        let actions = match ev {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                self.handle_key(key)
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => return true,
            _ => return false,
        };
        let changed = !actions.is_empty();
        for a in actions {
            self.dispatch(a);
        }
        changed
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            KeyCode::Char('?') => vec![Action::ToggleHelp],
            KeyCode::Char('K') => vec![Action::ToggleKeys],
            KeyCode::Char('r') => vec![Action::Reenter],
            _ => self.detail.handle_key(key),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.help_overlay.visible {
            return vec![];
        }
        self.detail.handle_mouse(event, self.detail_area)
    }

    fn dispatch(&mut self, action: Action) {
        // Components react first, then the app.
        let mut secondary = self.detail.on_action(&action);
        secondary.extend(self.help_overlay.on_action(&action));

        self.apply_action(action);

        // Depth-limited to one level
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        if action != Action::Noop {
            debug!("apply_action: {:?}", action);
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleKeys => self.show_keys_bar = !self.show_keys_bar,
            Action::Reenter => {
                self.reenter();
                self.toast.info("re-entering…");
            }
            Action::ToggleFavorite => {
                // Checked under the loaded id, which is the one the callback stored.
                let Some(id) = self.detail.loaded_id().cloned() else {
                    return;
                };
                let (stored, save_error) = {
                    let store = favorites::lock(&self.favorites);
                    (store.contains(&id), store.last_save_error().map(str::to_string))
                };
                if let Some(e) = save_error {
                    warn!("[app] favorite change for {} not persisted: {}", id, e);
                    self.toast.error("favorites could not be saved");
                } else if stored != self.detail.is_favorite() {
                    warn!("[app] favorite marker for {} no longer matches the store", id);
                    self.toast.error("favorite not saved");
                } else if stored {
                    self.toast.success("added to favorites");
                } else {
                    self.toast.success("removed from favorites");
                }
            }
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("[app] clipboard unavailable: {}", e);
                        self.toast.warning("clipboard unavailable");
                    }
                }
            }
            Action::ToggleHelp
            | Action::ScrollUp(_)
            | Action::ScrollDown(_)
            | Action::ScrollTop
            | Action::Noop => {}
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let status_h = if self.show_keys_bar { 1 } else { 0 };
        let [body, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(status_h)]).areas(area);

        self.detail.draw(frame, body, !self.help_overlay.visible);
        self.detail_area = body;

        if self.show_keys_bar {
            status_bar::draw_keys_bar(frame, status, self.detail.mode());
        }

        self.help_overlay.draw(frame, area, false);
        self.toast.draw(frame, area);
    }
}

fn build_view(
    recipe_id: &RecipeId,
    favorites: &SharedFavorites,
    loader_asset: &LoaderAsset,
) -> CocktailDetail {
    let snapshot = favorites::lock(favorites).snapshot();
    CocktailDetail::new(
        recipe_id.clone(),
        &snapshot,
        favorites::toggle_callback(favorites.clone()),
        loader_asset.clone(),
    )
}
