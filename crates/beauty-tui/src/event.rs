//! Terminal event handling. Captures keyboard, paste and resize events
//! from crossterm and dispatches them as Actions.
//!
//! The handler operates in two modes:
//! - Normal: keys are mapped to shortcuts (quit, navigate, select).
//! - Editing: keys are forwarded as raw CharInput/BackspaceInput so text
//!   fields can receive typed characters.
//!
//! The current InputMode is shared between the App and EventHandler via
//! an Arc<AtomicU8>.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::{Action, InputMode};

/// Encode InputMode as u8 for atomic sharing.
const MODE_NORMAL: u8 = 0;
const MODE_EDITING: u8 = 1;

/// Shared flag the App sets so the EventHandler knows which keymap to use.
pub type InputModeFlag = Arc<AtomicU8>;

pub fn new_input_mode_flag() -> InputModeFlag {
    Arc::new(AtomicU8::new(MODE_NORMAL))
}

pub fn set_input_mode(flag: &InputModeFlag, mode: InputMode) {
    let val = match mode {
        InputMode::Normal => MODE_NORMAL,
        InputMode::Editing => MODE_EDITING,
    };
    flag.store(val, Ordering::Relaxed);
}

fn get_input_mode(flag: &InputModeFlag) -> InputMode {
    match flag.load(Ordering::Relaxed) {
        MODE_EDITING => InputMode::Editing,
        _ => InputMode::Normal,
    }
}

/// Event loop that reads terminal events and sends Actions.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Action>,
    tick_rate: Duration,
    mode_flag: InputModeFlag,
}

impl EventHandler {
    pub fn new(
        tx: mpsc::UnboundedSender<Action>,
        tick_rate: Duration,
        mode_flag: InputModeFlag,
    ) -> Self {
        Self {
            tx,
            tick_rate,
            mode_flag,
        }
    }

    /// Run the event loop. This blocks and should be spawned in a task.
    pub async fn run(&self) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        spawn_reader(event_tx);
        self.pump(event_rx).await;
    }

    /// Interleave ticks with terminal events until either channel closes.
    async fn pump(&self, mut events: mpsc::UnboundedReceiver<Event>) {
        let mut interval = tokio::time::interval(self.tick_rate);

        loop {
            let action = tokio::select! {
                _ = interval.tick() => Some(Action::Tick),
                event = events.recv() => match event {
                    Some(event) => self.map_event(event),
                    None => break,
                },
            };

            if let Some(action) = action {
                if self.tx.send(action).is_err() {
                    break;
                }
            }
        }
    }

    fn map_event(&self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.map_key(key),
            Event::Paste(text) => Some(Action::PasteBulk(text)),
            Event::Resize(_, _) => Some(Action::Tick),
            _ => None,
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits regardless of mode.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            KeyCode::F(1) => return Some(Action::ToggleHelp),
            KeyCode::F(2) => return Some(Action::ToggleSettings),
            _ => {}
        }

        match get_input_mode(&self.mode_flag) {
            InputMode::Editing => map_key_editing(key),
            InputMode::Normal => map_key_normal(key),
        }
    }
}

/// Read terminal events on a dedicated thread. A single reader owns
/// crossterm's queue, so no event is read and then dropped.
fn spawn_reader(tx: mpsc::UnboundedSender<Event>) {
    std::thread::spawn(move || loop {
        match event::poll(Duration::from_millis(250)) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("terminal read failed: {e}");
                    break;
                }
            },
            Ok(false) if tx.is_closed() => break,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("terminal poll failed: {e}");
                break;
            }
        }
    });
}

/// Key mapping when a text field is focused. Most keys become character
/// input; only a few are reserved for navigation.
fn map_key_editing(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') => Some(Action::DeleteWord),
            KeyCode::Char('l') => Some(Action::ClearForm),
            KeyCode::Char('s') => Some(Action::ToggleSettings),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchInputField),
        KeyCode::Enter => Some(Action::SubmitForm),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Left => Some(Action::PagePrev),
        KeyCode::Right => Some(Action::PageNext),
        KeyCode::Backspace => Some(Action::BackspaceInput),
        KeyCode::Char(c) => Some(Action::CharInput(c)),
        _ => None,
    }
}

/// Key mapping in normal mode: single-key shortcuts.
fn map_key_normal(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('s') => Some(Action::ToggleSettings),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SelectPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SelectNext),
        KeyCode::Char('[') => Some(Action::PagePrev),
        KeyCode::Char(']') => Some(Action::PageNext),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Confirm),
        KeyCode::Char('r') => Some(Action::Recommend),

        // Side branches from the category screen.
        KeyCode::Char('c') => Some(Action::OpenChat),
        KeyCode::Char('i') => Some(Action::OpenInventory),
        KeyCode::Char('p') => Some(Action::OpenComparer),

        _ => None,
    }
}
