//! Favorites store: the host-owned set of favorite recipes, kept as JSON.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use cocktail_proto::recipe::{Recipe, RecipeId};
use tracing::{error, info, warn};

use crate::components::cocktail_detail::ToggleFavoriteFn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    entries: Vec<Recipe>,
    /// Failure of the most recent write, cleared by the next successful one.
    last_save_error: Option<String>,
}

impl FavoritesStore {
    /// Read `path`. A missing file is an empty store; an unreadable one is
    /// logged and treated as empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("[favorites] {:#}; starting empty", e);
                Vec::new()
            }
        };
        let store = Self {
            path,
            entries,
            last_save_error: None,
        };
        info!("[favorites] {} loaded from {}", store.len(), store.path.display());
        store
    }

    pub fn snapshot(&self) -> Vec<Recipe> {
        self.entries.clone()
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.entries.iter().any(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Add `recipe` if absent, remove it if present, then persist.
    ///
    /// The in-memory change stands even when the write fails.
    pub fn toggle(&mut self, recipe: &Recipe) -> anyhow::Result<FavoriteChange> {
        let change = match self.entries.iter().position(|r| r.id == recipe.id) {
            Some(idx) => {
                self.entries.remove(idx);
                FavoriteChange::Removed
            }
            None => {
                self.entries.push(recipe.clone());
                FavoriteChange::Added
            }
        };
        match self.save() {
            Ok(()) => {
                self.last_save_error = None;
                Ok(change)
            }
            Err(e) => {
                self.last_save_error = Some(format!("{:#}", e));
                Err(e)
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> anyhow::Result<Vec<Recipe>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Shared handle the host keeps while the detail view holds the callback.
pub type SharedFavorites = Arc<Mutex<FavoritesStore>>;

pub fn lock(store: &SharedFavorites) -> MutexGuard<'_, FavoritesStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Build the toggle callback handed to a detail view.
pub fn toggle_callback(store: SharedFavorites) -> ToggleFavoriteFn {
    Box::new(move |recipe: &Recipe| {
        let mut guard = lock(&store);
        match guard.toggle(recipe) {
            Ok(change) => {
                info!("[favorites] {:?} {} ({})", change, recipe.id, recipe.display_name())
            }
            Err(e) => error!("[favorites] toggling {} failed: {:#}", recipe.id, e),
        }
    })
}
