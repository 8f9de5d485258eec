//! Color palette and style constants for the cocktail TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_HEART: Color = Color::Rgb(235, 64, 64);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_LOADING: Color = Color::Rgb(255, 184, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_TITLE: Color = Color::Rgb(238, 238, 246);
pub const C_INGREDIENT_BG: Color = Color::Rgb(36, 36, 46);
pub const C_THUMB_BORDER: Color = Color::Rgb(100, 160, 130);
pub const C_LINK: Color = Color::Rgb(80, 140, 200);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200); // focus indicator
pub const C_READY: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_title() -> Style {
    Style::default().fg(C_TITLE).add_modifier(Modifier::BOLD)
}

pub fn style_subtitle() -> Style {
    Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD)
}

pub fn style_ingredient() -> Style {
    Style::default().fg(C_PRIMARY).bg(C_INGREDIENT_BG)
}

pub fn style_heart() -> Style {
    Style::default().fg(C_HEART).add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
