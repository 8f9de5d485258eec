//! Status bar: bottom line with view state and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_ERROR, C_LOADING, C_MUTED, C_READY};

/// Coarse view state shown at the left of the keys bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMode {
    Loading,
    Error,
    Ready,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Loading => "LOADING",
            Self::Error => "ERROR",
            Self::Ready => "READY",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Loading => C_LOADING,
            Self::Error => C_ERROR,
            Self::Ready => C_READY,
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: ViewMode) {
    let keys = match mode {
        ViewMode::Ready => {
            " f/space favorite  ↑↓/jk scroll  y copy image url  r re-enter  K keys  ? help  q quit"
        }
        ViewMode::Loading | ViewMode::Error => " r re-enter  K keys  ? help  q quit",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
