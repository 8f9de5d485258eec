//! Looping loader animation.
//!
//! The animation is an opaque asset handed to the detail view by the host.
//! Hosts may ship their own as JSON: `{"frames": ["...", ...], "interval_ms": 120}`.
//! A frame may span several lines.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::Paragraph,
    Frame,
};
use serde::Deserialize;

use crate::theme::C_LOADING;

const SHAKER_FRAMES: &[&str] = &[
    "  ╭─╮  \n  │ │  \n ╭┴─┴╮ \n │ ░ │ \n ╰───╯ ",
    "   ╭─╮ \n   │ │ \n ╭─┴─┴╮\n │ ▒ │ \n ╰───╯ ",
    "  ╭─╮  \n  │ │  \n ╭┴─┴╮ \n │ ▓ │ \n ╰───╯ ",
    " ╭─╮   \n │ │   \n╭┴─┴─╮ \n │ ▒ │ \n ╰───╯ ",
];

const DEFAULT_INTERVAL: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoaderAsset {
    frames: Vec<String>,
    #[serde(default = "default_interval_ms")]
    interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL.as_millis() as u64
}

impl LoaderAsset {
    /// Built-in cocktail shaker animation.
    pub fn shaker() -> Self {
        Self {
            frames: SHAKER_FRAMES.iter().map(|f| f.to_string()).collect(),
            interval_ms: default_interval_ms(),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading loader asset {}", path.display()))?;
        let asset: Self = serde_json::from_str(&content)
            .with_context(|| format!("parsing loader asset {}", path.display()))?;
        if asset.frames.is_empty() {
            anyhow::bail!("loader asset {} has no frames", path.display());
        }
        Ok(asset)
    }

    /// Load `path` if given, falling back to the built-in asset.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::from_file(p).unwrap_or_else(|e| {
                tracing::warn!("[loader] {:#}; using built-in animation", e);
                Self::shaker()
            }),
            None => Self::shaker(),
        }
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(16))
    }
}

impl Default for LoaderAsset {
    fn default() -> Self {
        Self::shaker()
    }
}

/// Plays a [`LoaderAsset`] on a loop, advanced from the UI tick.
pub struct Loader {
    asset: LoaderAsset,
    frame: usize,
    last_advance: Instant,
}

impl Loader {
    pub fn new(asset: LoaderAsset) -> Self {
        Self {
            asset,
            frame: 0,
            last_advance: Instant::now(),
        }
    }

    /// Advance when the frame interval has elapsed. Returns true on a new frame.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        if self.asset.frames.len() < 2
            || now.duration_since(self.last_advance) < self.asset.interval()
        {
            return false;
        }
        self.frame = (self.frame + 1) % self.asset.frames.len();
        self.last_advance = now;
        true
    }

    fn current(&self) -> &str {
        self.asset
            .frames
            .get(self.frame)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Render the current frame centered in `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let text: Text = self
            .current()
            .lines()
            .map(|l| Line::from(l.to_string()).centered())
            .collect::<Vec<_>>()
            .into();
        let height = text.height() as u16;
        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(C_LOADING)),
            row,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_loops_after_interval() {
        let mut loader = Loader::new(LoaderAsset {
            frames: vec!["a".into(), "b".into()],
            interval_ms: 100,
        });
        let start = loader.last_advance;
        assert!(!loader.tick_at(start + Duration::from_millis(50)));
        assert!(loader.tick_at(start + Duration::from_millis(100)));
        assert_eq!(loader.frame, 1);
        assert!(loader.tick_at(start + Duration::from_millis(200)));
        assert_eq!(loader.frame, 0);
    }

    #[test]
    fn test_single_frame_never_advances() {
        let mut loader = Loader::new(LoaderAsset {
            frames: vec!["only".into()],
            interval_ms: 16,
        });
        let start = loader.last_advance;
        assert!(!loader.tick_at(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_asset_file_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("loader.json");
        std::fs::write(&good, r#"{"frames": ["·", "•", "●"], "interval_ms": 80}"#).unwrap();
        assert_eq!(LoaderAsset::load_or_default(Some(&good)).frames.len(), 3);

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, r#"{"frames": []}"#).unwrap();
        assert_eq!(LoaderAsset::load_or_default(Some(&empty)), LoaderAsset::shaker());

        let missing = dir.path().join("missing.json");
        assert_eq!(LoaderAsset::load_or_default(Some(&missing)), LoaderAsset::shaker());
    }
}
