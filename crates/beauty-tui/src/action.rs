//! Action enum: the central message bus for the TUI.
//! Key presses and request results both flow through here.

use beauty_core::Msg;

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Toggle the settings overlay (store id).
    ToggleSettings,
    /// A tick event for animations and notice expiry.
    Tick,
    /// Leave the current stage and start over, or close an overlay.
    Back,

    // ── Navigation ──────────────────────────────────────────
    OpenChat,
    OpenInventory,
    OpenComparer,
    /// Ask for a recommendation from the questions stage.
    Recommend,

    // ── Text Input ───────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Switch focus between input fields (Tab in input mode).
    SwitchInputField,
    /// Submit the focused form (Enter in input mode).
    SubmitForm,
    /// Clear the form without leaving the stage (Ctrl+L).
    ClearForm,
    /// Bulk paste from bracketed paste mode (terminal sends entire text at once).
    PasteBulk(String),

    // ── Scrolling / Selection ───────────────────────────────
    ScrollUp,
    ScrollDown,
    SelectPrev,
    SelectNext,
    PagePrev,
    PageNext,
    Confirm,

    // ── Requests ─────────────────────────────────────────────
    /// A request finished; apply its result to the session.
    Completed(Msg),
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the active component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode: keys are global shortcuts.
    Normal,
    /// Text input mode: keys go to the focused text field.
    Editing,
}
