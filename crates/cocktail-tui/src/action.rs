//! Action enum: all user-initiated intents and internal events.

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Detail view ──────────────────────────────────────────────────────────
    ToggleFavorite,
    ScrollUp(u16),
    ScrollDown(u16),
    ScrollTop,

    // ── Navigation ───────────────────────────────────────────────────────────
    /// Leave the detail view and enter it again with a fresh lookup.
    Reenter,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Noop,
}
