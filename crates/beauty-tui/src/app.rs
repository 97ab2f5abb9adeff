//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use beauty_api::ApiClient;
use beauty_core::{AssistantConfig, Effect, Msg, Session, Stage};

use crate::action::{Action, InputMode};
use crate::components::categories::CategoriesComponent;
use crate::components::chat::ChatComponent;
use crate::components::comparer::ComparerComponent;
use crate::components::help::HelpComponent;
use crate::components::inventory::InventoryComponent;
use crate::components::questions::QuestionsComponent;
use crate::components::recommendation::RecommendationComponent;
use crate::components::settings::SettingsComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::{Component, SPINNER};
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;

/// Main application state.
pub struct App {
    /// Everything the screens show. Changed only through `dispatch`.
    session: Session,
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,
    /// HTTP client for the assistant API (shared across async tasks).
    client: Arc<ApiClient>,
    tick_rate: Duration,
    /// Frame counter for the full-screen loading spinner.
    spinner: usize,

    // ── Components ───────────────────────────────────────────
    categories: CategoriesComponent,
    questions: QuestionsComponent,
    recommendation: RecommendationComponent,
    chat: ChatComponent,
    inventory: InventoryComponent,
    comparer: ComparerComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
    settings: SettingsComponent,
}

impl App {
    pub fn new(config: &AssistantConfig) -> Self {
        let timeout = config.api.timeout_seconds.map(Duration::from_secs);
        Self {
            session: Session::new(config.store.store_id.clone()),
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            client: Arc::new(ApiClient::new(config.api_base_url(), timeout)),
            tick_rate: Duration::from_millis(config.ui.tick_rate_ms.max(10)),
            spinner: 0,
            categories: CategoriesComponent::new(),
            questions: QuestionsComponent::new(),
            recommendation: RecommendationComponent::new(),
            chat: ChatComponent::new(),
            inventory: InventoryComponent::new(),
            comparer: ComparerComponent::new(),
            status_bar: StatusBarComponent::new(config.ui.notice_ticks),
            help: HelpComponent::new(),
            settings: SettingsComponent::new(),
        }
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, self.tick_rate, mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        info!(api = %self.client.base_url(), store = %self.session.store_id, "Assistant started");
        let effect = self.session.start();
        self.run_effect(effect, &tx);
        self.sync_input_mode();

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        match self.session.snapshot_json() {
            Ok(snapshot) => debug!(%snapshot, "Final session state"),
            Err(e) => debug!("Could not serialize session: {}", e),
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Determine and set the correct input mode. Called after every action.
    fn sync_input_mode(&mut self) {
        let mode = self.current_input_mode();
        event::set_input_mode(&self.input_mode_flag, mode);
        self.status_bar.input_mode = mode;
    }

    fn current_input_mode(&self) -> InputMode {
        // Help closes on any key, so it always runs in normal mode.
        if self.help.visible {
            return InputMode::Normal;
        }
        if self.settings.visible {
            return InputMode::Editing;
        }
        match self.session.stage {
            Stage::Chat | Stage::Inventory | Stage::Comparer => InputMode::Editing,
            Stage::Categories | Stage::Questions | Stage::Recommendation => InputMode::Normal,
        }
    }

    /// Route an action to the overlays, the status bar or the active stage.
    fn handle_action(&mut self, action: Action, tx: &mpsc::UnboundedSender<Action>) {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::Completed(msg) => self.dispatch(msg, tx),
            Action::Tick => {
                self.spinner = self.spinner.wrapping_add(1);
                if let Some(msg) = self.status_bar.handle_action(&Action::Tick, &self.session) {
                    self.dispatch(msg, tx);
                }
                if let Some(msg) = self.forward_to_stage(&Action::Tick) {
                    self.dispatch(msg, tx);
                }
            }
            Action::ToggleHelp => {
                self.help.handle_action(&action, &self.session);
            }
            _ if self.help.visible => {
                self.help.handle_action(&action, &self.session);
            }
            Action::ToggleSettings => {
                self.settings.handle_action(&action, &self.session);
            }
            _ if self.settings.visible => {
                if let Some(msg) = self.settings.handle_action(&action, &self.session) {
                    self.dispatch(msg, tx);
                }
            }
            Action::Back => {
                if self.session.stage != Stage::Categories {
                    self.dispatch(Msg::StartOver, tx);
                }
            }
            other => {
                if let Some(msg) = self.forward_to_stage(&other) {
                    self.dispatch(msg, tx);
                }
            }
        }

        self.sync_input_mode();
    }

    fn forward_to_stage(&mut self, action: &Action) -> Option<Msg> {
        let session = &self.session;
        match session.stage {
            Stage::Categories => self.categories.handle_action(action, session),
            Stage::Questions => self.questions.handle_action(action, session),
            Stage::Recommendation => self.recommendation.handle_action(action, session),
            Stage::Chat => self.chat.handle_action(action, session),
            Stage::Inventory => self.inventory.handle_action(action, session),
            Stage::Comparer => self.comparer.handle_action(action, session),
        }
    }

    /// Apply a message to the session and start whatever request it asks for.
    fn dispatch(&mut self, msg: Msg, tx: &mpsc::UnboundedSender<Action>) {
        let before = self.session.stage;
        if let Some(effect) = self.session.update(msg) {
            self.run_effect(effect, tx);
        }
        if self.session.stage != before {
            self.reset_view(self.session.stage);
        }
    }

    /// Fresh cursor and scroll state when a stage is entered.
    fn reset_view(&mut self, stage: Stage) {
        match stage {
            Stage::Categories => {}
            Stage::Questions => self.questions.reset(),
            Stage::Recommendation => self.recommendation.reset(),
            Stage::Chat => self.chat.reset(),
            Stage::Inventory => self.inventory.reset(),
            Stage::Comparer => self.comparer.reset(),
        }
    }

    /// Spawn a task for `effect`. Its result comes back as `Action::Completed`.
    fn run_effect(&self, effect: Effect, tx: &mpsc::UnboundedSender<Action>) {
        let client = Arc::clone(&self.client);
        let tx = tx.clone();

        match effect {
            Effect::LoadCategories { ticket } => {
                tokio::spawn(async move {
                    let result = client
                        .categories()
                        .await
                        .map_err(|e| report("Loading categories failed", e));
                    let _ = tx.send(Action::Completed(Msg::CategoriesLoaded { ticket, result }));
                });
            }
            Effect::FetchQuestions { ticket, category } => {
                tokio::spawn(async move {
                    let result = client
                        .questions(&category)
                        .await
                        .map_err(|e| report("Loading questions failed", e));
                    let _ = tx.send(Action::Completed(Msg::QuestionsLoaded { ticket, result }));
                });
            }
            Effect::FetchRecommendation {
                ticket,
                category,
                answers,
            } => {
                tokio::spawn(async move {
                    let result = client
                        .recommendation(&category, &answers)
                        .await
                        .map(Box::new)
                        .map_err(|e| report("Recommendation failed", e));
                    let _ = tx.send(Action::Completed(Msg::RecommendationLoaded {
                        ticket,
                        result,
                    }));
                });
            }
            Effect::SendChat {
                ticket,
                message,
                store_id,
            } => {
                tokio::spawn(async move {
                    let result = client
                        .chat(&message, &store_id)
                        .await
                        .map_err(|e| report("Chat failed", e));
                    let _ = tx.send(Action::Completed(Msg::ChatReplied { ticket, result }));
                });
            }
            Effect::CheckInventory {
                ticket,
                query,
                store_id,
            } => {
                tokio::spawn(async move {
                    let result = client
                        .inventory(&query, &store_id)
                        .await
                        .map_err(|e| report("Inventory check failed", e));
                    let _ = tx.send(Action::Completed(Msg::InventoryLoaded { ticket, result }));
                });
            }
            Effect::Compare {
                ticket,
                first,
                second,
                store_id,
            } => {
                tokio::spawn(async move {
                    let result = client
                        .compare(&first, &second, &store_id)
                        .await
                        .map(Box::new)
                        .map_err(|e| report("Comparison failed", e));
                    let _ = tx.send(Action::Completed(Msg::ComparisonLoaded { ticket, result }));
                });
            }
        }
    }

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(2), // Tab bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_tabs(frame, chunks[0]);

        let session = &self.session;
        if session.wizard_loading {
            self.render_loading(frame, chunks[1]);
        } else {
            match session.stage {
                Stage::Categories => self.categories.render(frame, chunks[1], session),
                Stage::Questions => self.questions.render(frame, chunks[1], session),
                Stage::Recommendation => self.recommendation.render(frame, chunks[1], session),
                Stage::Chat => self.chat.render(frame, chunks[1], session),
                Stage::Inventory => self.inventory.render(frame, chunks[1], session),
                Stage::Comparer => self.comparer.render(frame, chunks[1], session),
            }
        }

        self.status_bar.render(frame, chunks[2], session);

        // Overlays (rendered on top)
        self.settings.render(frame, area, session);
        self.help.render(frame, area, session);
    }

    /// Render the stage tab bar.
    fn render_tabs(&self, frame: &mut ratatui::Frame, area: Rect) {
        let titles: Vec<Line> = Stage::all()
            .iter()
            .map(|stage| {
                let style = if *stage == self.session.stage {
                    Theme::tab_active()
                } else {
                    Theme::tab_inactive()
                };
                Line::from(Span::styled(stage.label(), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.session.stage.index())
            .divider(Span::styled(" | ", Theme::dim()))
            .highlight_style(Theme::tab_active());

        frame.render_widget(tabs, area);
    }

    /// Full-screen spinner shown while the wizard waits on the service.
    fn render_loading(&self, frame: &mut ratatui::Frame, area: Rect) {
        let text = if self.session.stage == Stage::Categories {
            "Loading questions..."
        } else {
            "Getting your recommendation..."
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::dim());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let middle = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(inner);
        let line = Line::from(vec![
            Span::styled(SPINNER[self.spinner % SPINNER.len()], Theme::title()),
            Span::styled(format!(" {text}"), Theme::normal()),
        ]);
        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center),
            middle[1],
        );
    }
}

/// Log a failed request and flatten it for the session.
fn report(context: &str, err: anyhow::Error) -> String {
    error!("{}: {:#}", context, err);
    format!("{err:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use beauty_core::catalog::Question;
    use beauty_core::chat::CHAT_FAILURE_REPLY;
    use beauty_core::session::{RequestKind, Ticket};
    use ratatui::backend::TestBackend;

    /// An app pointed at a port nothing listens on.
    fn app() -> App {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let mut config = AssistantConfig::default();
        config.api.base_url = "http://127.0.0.1:9".into();
        config.api.timeout_seconds = Some(5);
        App::new(&config)
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[tokio::test]
    async fn chat_round_trip_reports_unreachable_service() {
        let mut app = app();
        let (tx, mut rx) = mpsc::unbounded_channel();

        app.handle_action(Action::OpenChat, &tx);
        assert_eq!(app.session.stage, Stage::Chat);
        assert_eq!(app.current_input_mode(), InputMode::Editing);
        assert_eq!(app.status_bar.input_mode, InputMode::Editing);

        for c in "hi".chars() {
            app.handle_action(Action::CharInput(c), &tx);
        }
        app.handle_action(Action::SubmitForm, &tx);
        assert_eq!(app.session.chat.len(), 1);
        assert!(app.session.chat_loading);

        let reply = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("request finished")
            .expect("channel open");
        assert!(matches!(reply, Action::Completed(Msg::ChatReplied { .. })));
        app.handle_action(reply, &tx);

        assert!(!app.session.chat_loading);
        assert_eq!(app.session.chat[1].content, CHAT_FAILURE_REPLY);
        assert!(screen(&app).contains("Failed to get chat response."));
    }

    #[tokio::test]
    async fn escape_starts_over_from_side_branch() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_action(Action::OpenInventory, &tx);
        app.handle_action(Action::CharInput('k'), &tx);
        app.handle_action(Action::Back, &tx);

        assert_eq!(app.session.stage, Stage::Categories);
        assert!(app.session.inventory_input.is_empty());
        assert_eq!(app.current_input_mode(), InputMode::Normal);
    }

    #[tokio::test]
    async fn wizard_shows_loading_then_questions() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.session.categories = beauty_core::catalog::default_categories();

        app.handle_action(Action::Confirm, &tx);
        assert!(app.session.wizard_loading);
        assert!(screen(&app).contains("Loading questions..."));

        // The questions request for "Eyeliner" was the first one issued.
        app.handle_action(
            Action::Completed(Msg::QuestionsLoaded {
                ticket: Ticket {
                    kind: RequestKind::Questions,
                    generation: 1,
                },
                result: Ok(vec![Question {
                    attribute: "finish".into(),
                    question: "Which finish?".into(),
                    options: vec!["Matte".into(), "Glossy".into()],
                }]),
            }),
            &tx,
        );
        assert_eq!(app.session.stage, Stage::Questions);
        let text = screen(&app);
        assert!(text.contains("Which finish?"));
        assert!(text.contains("Eyeliner"));
    }

    #[tokio::test]
    async fn settings_overlay_captures_typing() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_action(Action::ToggleSettings, &tx);
        assert_eq!(app.current_input_mode(), InputMode::Editing);

        app.handle_action(Action::ClearForm, &tx);
        for c in "BLR9".chars() {
            app.handle_action(Action::CharInput(c), &tx);
        }
        app.handle_action(Action::SubmitForm, &tx);

        assert_eq!(app.session.store_id, "BLR9");
        assert_eq!(app.session.stage, Stage::Categories);
        assert_eq!(app.current_input_mode(), InputMode::Normal);
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_action(Action::Quit, &tx);
        assert!(app.should_quit);
    }
}
