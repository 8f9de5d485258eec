//! CocktailDetail component: one recipe, fetched once per mount.
//!
//! State machine: `Loading` → `Loaded(recipe)` on a non-empty lookup,
//! `Loading` → `Error` on an empty lookup or a failed request. Both end
//! states are final for the lifetime of the view; re-entering the screen
//! builds a new view.
//!
//! The favorite marker is read from the favorites snapshot once, at
//! construction. Toggling calls the injected callback and then flips the
//! local marker without consulting the store again, so the two can drift if
//! the callback's side effect does not happen.

use std::sync::Arc;

use cocktail_proto::lookup::RecipeLookup;
use cocktail_proto::recipe::{Recipe, RecipeId};
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::Action,
    component::Component,
    fetch::{spawn_lookup, LookupDelivery, Mount, MountId},
    theme::{
        style_heart, style_ingredient, style_subtitle, style_title, C_ERROR, C_LINK, C_MUTED,
        C_PRIMARY, C_READY, C_THUMB_BORDER,
    },
    widgets::{
        loader::{Loader, LoaderAsset},
        pane_chrome::{pane_chrome, Badge},
        status_bar::ViewMode,
    },
};

/// Side effect invoked with the loaded recipe when the user toggles the heart.
pub type ToggleFavoriteFn = Box<dyn FnMut(&Recipe) + Send>;

pub const LOOKUP_ERROR_MESSAGE: &str =
    "Could not load the cocktail details. Please try again later.";

/// Row of the heart affordance within the loaded content.
const HEART_LINE: u16 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error,
    Loaded(Recipe),
}

pub struct CocktailDetail {
    recipe_id: RecipeId,
    state: ViewState,
    is_favorite: bool,
    /// Ids in the favorites snapshot taken at construction.
    favorite_ids: Vec<RecipeId>,
    on_toggle: ToggleFavoriteFn,
    mount: Mount,
    activated: bool,
    loader: Loader,
    scroll: u16,
    max_scroll: u16,
    /// Absolute terminal row of the heart, if it was visible in the last draw.
    heart_row: Option<u16>,
}

impl CocktailDetail {
    pub fn new(
        recipe_id: RecipeId,
        favorites: &[Recipe],
        on_toggle: ToggleFavoriteFn,
        loader: LoaderAsset,
    ) -> Self {
        let favorite_ids: Vec<RecipeId> = favorites.iter().map(|r| r.id.clone()).collect();
        let is_favorite = favorite_ids.contains(&recipe_id);
        Self {
            recipe_id,
            state: ViewState::Loading,
            is_favorite,
            favorite_ids,
            on_toggle,
            mount: Mount::new(),
            activated: false,
            loader: Loader::new(loader),
            scroll: 0,
            max_scroll: 0,
            heart_row: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Id of the loaded recipe, which is what the toggle callback receives.
    pub fn loaded_id(&self) -> Option<&RecipeId> {
        match &self.state {
            ViewState::Loaded(recipe) => Some(&recipe.id),
            _ => None,
        }
    }

    pub fn mount_id(&self) -> MountId {
        self.mount.id()
    }

    pub fn mode(&self) -> ViewMode {
        match self.state {
            ViewState::Loading => ViewMode::Loading,
            ViewState::Error => ViewMode::Error,
            ViewState::Loaded(_) => ViewMode::Ready,
        }
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        match &self.state {
            ViewState::Loaded(recipe) => recipe.thumbnail.as_deref(),
            _ => None,
        }
    }

    /// Issue the view's single lookup. Later calls do nothing and return `None`.
    pub fn activate(
        &mut self,
        lookup: Arc<dyn RecipeLookup>,
        tx: mpsc::Sender<LookupDelivery>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        if self.activated {
            return None;
        }
        self.activated = true;
        info!("[detail] mount {} looking up {}", self.mount.id(), self.recipe_id);
        Some(spawn_lookup(lookup, self.recipe_id.clone(), &self.mount, tx))
    }

    /// Apply a lookup result. Returns true if the state changed.
    pub fn on_lookup(&mut self, delivery: LookupDelivery) -> bool {
        if delivery.mount != self.mount.id() || !self.mount.is_live() {
            debug!("[detail] ignoring lookup for mount {}", delivery.mount);
            return false;
        }
        if self.state != ViewState::Loading {
            return false;
        }

        self.state = match delivery.result {
            Ok(recipes) => match recipes.into_iter().next() {
                Some(first) => {
                    // The service may answer under a canonical id ("011007" -> "11007").
                    if !self.is_favorite && self.favorite_ids.contains(&first.id) {
                        self.is_favorite = true;
                    }
                    ViewState::Loaded(first)
                }
                None => ViewState::Error,
            },
            Err(e) => {
                error!("Failed to fetch cocktail details for {}: {}", self.recipe_id, e);
                ViewState::Error
            }
        };
        true
    }

    /// Invoke the callback with the loaded recipe and flip the marker.
    /// Does nothing unless a recipe is loaded.
    pub fn toggle_favorite(&mut self) -> bool {
        let ViewState::Loaded(recipe) = &self.state else {
            return false;
        };
        (self.on_toggle)(recipe);
        self.is_favorite = !self.is_favorite;
        true
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll as i32 + delta).clamp(0, self.max_scroll as i32);
        self.scroll = next as u16;
    }

    fn is_loaded(&self) -> bool {
        matches!(self.state, ViewState::Loaded(_))
    }
}

impl Component for CocktailDetail {
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.is_loaded() {
            return vec![];
        }
        match key.code {
            KeyCode::Char('f') | KeyCode::Char(' ') => vec![Action::ToggleFavorite],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::ScrollDown(1)],
            KeyCode::Up | KeyCode::Char('k') => vec![Action::ScrollUp(1)],
            KeyCode::PageDown => vec![Action::ScrollDown(10)],
            KeyCode::PageUp => vec![Action::ScrollUp(10)],
            KeyCode::Home | KeyCode::Char('g') => vec![Action::ScrollTop],
            KeyCode::Char('y') => match self.thumbnail_url() {
                Some(url) => vec![Action::CopyToClipboard(url.to_string())],
                None => vec![],
            },
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect) -> Vec<Action> {
        if !self.is_loaded() {
            return vec![];
        }
        let inside = event.column >= area.x
            && event.column < area.x + area.width
            && event.row >= area.y
            && event.row < area.y + area.height;
        if !inside {
            return vec![];
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if Some(event.row) == self.heart_row => {
                vec![Action::ToggleFavorite]
            }
            MouseEventKind::ScrollDown => vec![Action::ScrollDown(3)],
            MouseEventKind::ScrollUp => vec![Action::ScrollUp(3)],
            _ => vec![],
        }
    }

    fn tick(&mut self) -> bool {
        self.state == ViewState::Loading && self.loader.tick()
    }

    fn on_action(&mut self, action: &Action) -> Vec<Action> {
        match action {
            Action::ToggleFavorite => {
                self.toggle_favorite();
            }
            Action::ScrollDown(n) => self.scroll_by(*n as i32),
            Action::ScrollUp(n) => self.scroll_by(-(*n as i32)),
            Action::ScrollTop => self.scroll = 0,
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let badge = match self.state {
            // Nothing but the animation while loading.
            ViewState::Loading => {
                self.heart_row = None;
                self.loader.draw(frame, area);
                return;
            }
            ViewState::Error => Badge { text: "ERR", color: C_ERROR },
            ViewState::Loaded(_) => Badge { text: "READY", color: C_READY },
        };
        let block = pane_chrome("cocktail", focused, Some(badge));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.state {
            ViewState::Loading => {}
            ViewState::Error => {
                self.heart_row = None;
                frame.render_widget(
                    Paragraph::new(LOOKUP_ERROR_MESSAGE)
                        .style(Style::default().fg(C_ERROR))
                        .wrap(Wrap { trim: true }),
                    inner,
                );
            }
            ViewState::Loaded(recipe) => {
                let lines = build_lines(recipe, self.is_favorite);
                self.max_scroll = (lines.len() as u16).saturating_sub(inner.height);
                self.scroll = self.scroll.min(self.max_scroll);
                self.heart_row = HEART_LINE
                    .checked_sub(self.scroll)
                    .filter(|row| *row < inner.height)
                    .map(|row| inner.y + row);
                frame.render_widget(Paragraph::new(lines).scroll((self.scroll, 0)), inner);
            }
        }
    }
}

/// Content of the loaded screen: title, heart, thumbnail, type, ingredients.
fn build_lines(recipe: &Recipe, is_favorite: bool) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    let title = Span::styled(recipe.display_name().to_string(), style_title());
    lines.push(Line::from(title).centered());

    let (heart, hint) = if is_favorite {
        ("♥", " favorite ")
    } else {
        ("♡", " add to favorites ")
    };
    lines.push(
        Line::from(vec![
            Span::styled(hint, Style::default().fg(C_MUTED)),
            Span::styled(heart, style_heart()),
            Span::raw(" "),
        ])
        .right_aligned(),
    );
    lines.push(Line::from(""));

    lines.extend(thumbnail_lines(recipe.thumbnail.as_deref()));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled(" Type: ", style_subtitle()),
        Span::styled(
            recipe.alcoholic.clone().unwrap_or_default(),
            Style::default().fg(C_PRIMARY),
        ),
    ]));
    lines.push(Line::from(Span::styled(" Ingredients:", style_subtitle())));
    for ingredient in recipe.ingredients() {
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(format!(" {} ", ingredient), style_ingredient()),
        ]));
    }

    lines
}

/// Rounded frame standing in for the circular thumbnail, bound to its URL.
fn thumbnail_lines(url: Option<&str>) -> Vec<Line<'static>> {
    let label = "◯";
    let link = url.unwrap_or("(no image)");
    let width = link.width().max(label.width()) + 2;
    let border = Style::default().fg(C_THUMB_BORDER);

    let row = |text: &str, style: Style| {
        let pad = width - text.width();
        let left = pad / 2;
        Line::from(vec![
            Span::styled("│", border),
            Span::raw(" ".repeat(left)),
            Span::styled(text.to_string(), style),
            Span::raw(" ".repeat(pad - left)),
            Span::styled("│", border),
        ])
        .centered()
    };

    vec![
        Line::from(Span::styled(format!("╭{}╮", "─".repeat(width)), border)).centered(),
        row(label, Style::default().fg(C_THUMB_BORDER)),
        row(link, Style::default().fg(C_LINK)),
        Line::from(Span::styled(format!("╰{}╯", "─".repeat(width)), border)).centered(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::StubLookup;
    use cocktail_proto::lookup::LookupError;
    use cocktail_proto::recipe::parse_lookup_body;
    use ratatui::{backend::TestBackend, crossterm::event::KeyModifiers, Terminal};
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    const MARGARITA_THUMB: &str = "https://www.thecocktaildb.com/images/media/drink/5noda6.jpg";

    fn margarita() -> Recipe {
        let body = format!(
            r#"{{"drinks": [{{
                "strDrink": "Margarita",
                "strAlcoholic": "Alcoholic",
                "strDrinkThumb": "{MARGARITA_THUMB}",
                "strIngredient1": "Tequila",
                "strIngredient2": "Triple sec",
                "strIngredient3": "Lime juice",
                "strIngredient4": null
            }}]}}"#
        );
        parse_lookup_body(&body, &"11007".into()).unwrap().remove(0)
    }

    fn named(id: &str, name: &str) -> Recipe {
        let mut r = Recipe::new(id);
        r.name = Some(name.to_string());
        r
    }

    /// Callback that records every recipe id it is called with.
    fn recording() -> (ToggleFavoriteFn, Arc<Mutex<Vec<RecipeId>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let cb: ToggleFavoriteFn =
            Box::new(move |r: &Recipe| sink.lock().unwrap().push(r.id.clone()));
        (cb, calls)
    }

    fn view(id: &str, favorites: &[Recipe]) -> (CocktailDetail, Arc<Mutex<Vec<RecipeId>>>) {
        let (cb, calls) = recording();
        (
            CocktailDetail::new(id.into(), favorites, cb, LoaderAsset::shaker()),
            calls,
        )
    }

    fn deliver(view: &mut CocktailDetail, result: Result<Vec<Recipe>, LookupError>) -> bool {
        let mount = view.mount_id();
        view.on_lookup(LookupDelivery { mount, result })
    }

    fn decode_error() -> LookupError {
        LookupError::Decode(serde_json::from_str::<serde_json::Value>("{").unwrap_err())
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn ingredient_rows(recipe: &Recipe) -> Vec<String> {
        let lines: Vec<String> = build_lines(recipe, false).iter().map(line_text).collect();
        let start = lines
            .iter()
            .position(|l| l.trim() == "Ingredients:")
            .expect("ingredients heading");
        lines[start + 1..].iter().map(|l| l.trim().to_string()).collect()
    }

    fn render(view: &mut CocktailDetail, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| view.draw(f, f.area(), true)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_starts_loading() {
        let (v, _) = view("11007", &[]);
        assert_eq!(v.state(), &ViewState::Loading);
        assert_eq!(v.mode(), ViewMode::Loading);
    }

    #[test]
    fn test_non_empty_result_loads_first_recipe() {
        for len in [1usize, 3] {
            let (mut v, _) = view("11007", &[]);
            let recipes: Vec<Recipe> = (0..len).map(|i| named("11007", &format!("r{i}"))).collect();
            assert!(deliver(&mut v, Ok(recipes)));
            match v.state() {
                ViewState::Loaded(r) => assert_eq!(r.display_name(), "r0"),
                other => panic!("expected Loaded, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_result_and_failure_both_end_in_error() {
        let (mut empty, _) = view("1", &[]);
        assert!(deliver(&mut empty, Ok(Vec::new())));
        assert_eq!(empty.state(), &ViewState::Error);

        let (mut failed, _) = view("1", &[]);
        assert!(deliver(&mut failed, Err(decode_error())));
        assert_eq!(failed.state(), &ViewState::Error);
    }

    #[test]
    fn test_error_and_loaded_are_final() {
        let (mut v, _) = view("1", &[]);
        deliver(&mut v, Ok(Vec::new()));
        assert!(!deliver(&mut v, Ok(vec![named("1", "late")])));
        assert_eq!(v.state(), &ViewState::Error);

        let (mut v, _) = view("1", &[]);
        deliver(&mut v, Ok(vec![named("1", "first")]));
        assert!(!deliver(&mut v, Err(decode_error())));
        assert!(matches!(v.state(), ViewState::Loaded(r) if r.display_name() == "first"));
    }

    #[test]
    fn test_delivery_for_another_mount_is_ignored() {
        let (mut old, _) = view("1", &[]);
        let (mut current, _) = view("1", &[]);
        let stale = LookupDelivery {
            mount: old.mount_id(),
            result: Ok(vec![named("1", "stale")]),
        };
        assert!(!current.on_lookup(stale));
        assert_eq!(current.state(), &ViewState::Loading);
        // The old view still accepts its own delivery.
        assert!(deliver(&mut old, Ok(vec![named("1", "own")])));
    }

    #[test]
    fn test_sparse_ingredients_render_in_slot_order_trimmed() {
        let mut recipe = named("7", "Sparse");
        recipe.ingredients[0] = Some(" Gin ".into());
        recipe.ingredients[2] = Some("Tonic\t".into());
        recipe.ingredients[6] = Some("  Lime".into());
        assert_eq!(ingredient_rows(&recipe), ["Gin", "Tonic", "Lime"]);
    }

    #[test]
    fn test_initial_marker_follows_snapshot() {
        let snapshot = vec![named("11000", "Mojito"), named("11007", "Margarita")];
        let (fav, _) = view("11007", &snapshot);
        assert!(fav.is_favorite());
        let (not_fav, _) = view("17222", &snapshot);
        assert!(!not_fav.is_favorite());
    }

    #[test]
    fn test_marker_follows_loaded_id_when_it_differs_from_requested() {
        let snapshot = vec![named("11007", "Margarita")];
        let (mut v, calls) = view("011007", &snapshot);
        assert!(!v.is_favorite());
        assert_eq!(v.loaded_id(), None);

        deliver(&mut v, Ok(vec![named("11007", "Margarita")]));
        assert!(v.is_favorite());
        assert_eq!(v.loaded_id(), Some(&RecipeId::new("11007")));

        v.toggle_favorite();
        assert!(!v.is_favorite());
        assert_eq!(*calls.lock().unwrap(), vec![RecipeId::new("11007")]);
    }

    #[test]
    fn test_toggle_calls_back_then_flips() {
        let (mut v, calls) = view("11007", &[]);
        deliver(&mut v, Ok(vec![margarita()]));

        assert!(v.toggle_favorite());
        assert!(v.is_favorite());
        assert_eq!(*calls.lock().unwrap(), vec![RecipeId::new("11007")]);

        assert!(v.toggle_favorite());
        assert!(!v.is_favorite());
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_toggle_is_noop_until_loaded() {
        let (mut v, calls) = view("11007", &[]);
        assert!(!v.toggle_favorite());
        assert!(v.handle_key(key(KeyCode::Char('f'))).is_empty());

        deliver(&mut v, Err(decode_error()));
        assert!(!v.toggle_favorite());
        assert!(!v.is_favorite());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_marker_drifts_from_store_when_callback_has_no_effect() {
        // The store holds the recipe, but the callback never removes it.
        let store = vec![margarita()];
        let mut v = CocktailDetail::new(
            "11007".into(),
            &store,
            Box::new(|_: &Recipe| {}),
            LoaderAsset::shaker(),
        );
        deliver(&mut v, Ok(vec![margarita()]));

        v.toggle_favorite();
        assert!(!v.is_favorite());
        assert!(store.iter().any(|r| r.id.as_str() == "11007"));
    }

    #[test]
    fn test_keys_map_to_actions_when_loaded() {
        let (mut v, _) = view("11007", &[]);
        deliver(&mut v, Ok(vec![margarita()]));
        assert_eq!(v.handle_key(key(KeyCode::Char(' '))), vec![Action::ToggleFavorite]);
        assert_eq!(v.handle_key(key(KeyCode::Char('j'))), vec![Action::ScrollDown(1)]);
        assert_eq!(
            v.handle_key(key(KeyCode::Char('y'))),
            vec![Action::CopyToClipboard(MARGARITA_THUMB.to_string())]
        );
    }

    #[test]
    fn test_margarita_renders_full_detail() {
        let (mut v, _) = view("11007", &[]);
        deliver(&mut v, Ok(vec![margarita()]));
        let screen = render(&mut v, 100, 24);

        assert!(screen.contains("Margarita"));
        assert!(screen.contains("♡"));
        assert!(screen.contains(MARGARITA_THUMB));
        assert!(screen.contains("Type: Alcoholic"));
        assert_eq!(
            ingredient_rows(&margarita()),
            ["Tequila", "Triple sec", "Lime juice"]
        );
        let title_row = screen.lines().position(|l| l.contains("Margarita")).unwrap();
        let thumb_row = screen.lines().position(|l| l.contains(MARGARITA_THUMB)).unwrap();
        let type_row = screen.lines().position(|l| l.contains("Type:")).unwrap();
        let lime_row = screen.lines().position(|l| l.contains("Lime juice")).unwrap();
        assert!(title_row < thumb_row && thumb_row < type_row && type_row < lime_row);
    }

    #[test]
    fn test_null_drinks_renders_error_only() {
        let (mut v, _) = view("0", &[]);
        let recipes = parse_lookup_body(r#"{"drinks": null}"#, &"0".into()).unwrap();
        deliver(&mut v, Ok(recipes));
        let screen = render(&mut v, 100, 12);

        assert!(screen.contains(LOOKUP_ERROR_MESSAGE));
        assert!(!screen.contains("Ingredients"));
        assert!(!screen.contains("Type:"));
        assert!(!screen.contains("♡"));
    }

    #[test]
    fn test_loading_renders_no_text() {
        let (mut v, _) = view("11007", &[]);
        let screen = render(&mut v, 60, 12);
        // Only shaker glyphs and blanks: no title, badge or message.
        let stray: String = screen
            .chars()
            .filter(|c| !c.is_whitespace() && !"╭─╮│┴╰╯░▒▓".contains(*c))
            .collect();
        assert_eq!(stray, "");
        assert!(screen.contains('▒') || screen.contains('░') || screen.contains('▓'));
    }

    #[test]
    fn test_click_on_heart_toggles() {
        let (mut v, calls) = view("11007", &[]);
        deliver(&mut v, Ok(vec![margarita()]));
        let area = Rect::new(0, 0, 100, 24);
        render(&mut v, 100, 24);

        let click = |row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 90,
            row,
            modifiers: KeyModifiers::NONE,
        };
        // Border row 0, title row 1, heart row 2.
        assert!(v.handle_mouse(click(1), area).is_empty());
        let actions = v.handle_mouse(click(2), area);
        assert_eq!(actions, vec![Action::ToggleFavorite]);
        for a in &actions {
            v.on_action(a);
        }
        assert!(v.is_favorite());
        assert_eq!(calls.lock().unwrap().len(), 1);
        assert!(render(&mut v, 100, 24).contains("♥"));
    }

    #[tokio::test]
    async fn test_activate_issues_exactly_one_lookup() {
        let stub = Arc::new(StubLookup::answering(vec![margarita()]));
        let (mut v, _) = view("11007", &[]);
        let (tx, mut rx) = mpsc::channel(4);

        let handle = v.activate(stub.clone(), tx.clone()).expect("first activation");
        assert!(v.activate(stub.clone(), tx).is_none());
        handle.await.unwrap();

        let delivery = rx.recv().await.unwrap();
        assert!(v.on_lookup(delivery));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(v.state(), ViewState::Loaded(r) if r.display_name() == "Margarita"));
    }

    #[tokio::test]
    async fn test_failed_activation_ends_in_error() {
        let stub = Arc::new(StubLookup::failing());
        let (mut v, _) = view("11007", &[]);
        let (tx, mut rx) = mpsc::channel(4);

        v.activate(stub, tx).unwrap().await.unwrap();
        assert!(v.on_lookup(rx.recv().await.unwrap()));
        assert_eq!(v.state(), &ViewState::Error);
    }
}
