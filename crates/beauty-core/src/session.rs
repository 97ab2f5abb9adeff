//! Session state machine.
//!
//! `Session` holds everything the UI shows. All changes go through
//! [`Session::update`], which applies one [`Msg`] and may hand back an
//! [`Effect`] (an API request) for the runtime to execute. The result of
//! that request comes back as another `Msg` carrying the same [`Ticket`];
//! results whose ticket is no longer current are dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{default_categories, AnswerSet, Category, Question};
use crate::chat::{ChatMessage, ChatReply, CHAT_FAILURE_REPLY};
use crate::error::Result;
use crate::product::{
    ComparisonResult, FurtherRecommendation, InventoryResult, Recommendation, RecommendationSet,
};

/// Top-level view of the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Categories,
    Questions,
    Recommendation,
    Chat,
    Inventory,
    Comparer,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Categories,
            Stage::Questions,
            Stage::Recommendation,
            Stage::Chat,
            Stage::Inventory,
            Stage::Comparer,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Categories => "Categories",
            Stage::Questions => "Questions",
            Stage::Recommendation => "Match",
            Stage::Chat => "Chat",
            Stage::Inventory => "Inventory",
            Stage::Comparer => "Compare",
        }
    }

    /// Stages reachable directly from the category screen.
    pub fn is_side_branch(&self) -> bool {
        matches!(self, Stage::Chat | Stage::Inventory | Stage::Comparer)
    }

    pub fn index(&self) -> usize {
        match self {
            Stage::Categories => 0,
            Stage::Questions => 1,
            Stage::Recommendation => 2,
            Stage::Chat => 3,
            Stage::Inventory => 4,
            Stage::Comparer => 5,
        }
    }
}

/// The kinds of request the session issues. Each has its own generation counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    Categories,
    Questions,
    Recommendation,
    Chat,
    Inventory,
    Compare,
}

impl RequestKind {
    const COUNT: usize = 6;

    fn slot(self) -> usize {
        match self {
            RequestKind::Categories => 0,
            RequestKind::Questions => 1,
            RequestKind::Recommendation => 2,
            RequestKind::Chat => 3,
            RequestKind::Inventory => 4,
            RequestKind::Compare => 5,
        }
    }
}

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub kind: RequestKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Generations([u64; RequestKind::COUNT]);

impl Generations {
    fn issue(&mut self, kind: RequestKind) -> Ticket {
        let slot = &mut self.0[kind.slot()];
        *slot += 1;
        Ticket {
            kind,
            generation: *slot,
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        self.0[ticket.kind.slot()] == ticket.generation
    }

    /// Make every outstanding request stale. The category list is shared
    /// across restarts, so its request stays valid.
    fn invalidate_restartable(&mut self) {
        for (slot, generation) in self.0.iter_mut().enumerate() {
            if slot != RequestKind::Categories.slot() {
                *generation += 1;
            }
        }
    }
}

/// Editable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    ChatMessage,
    InventoryQuery,
    CompareFirst,
    CompareSecond,
    StoreId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    Insert(char),
    InsertStr(String),
    Backspace,
    DeleteWord,
    Clear,
}

impl Edit {
    fn apply(&self, text: &mut String) {
        match self {
            Edit::Insert(c) => text.push(*c),
            Edit::InsertStr(s) => text.push_str(s),
            Edit::Backspace => {
                text.pop();
            }
            Edit::DeleteWord => {
                let trimmed = text.trim_end_matches(' ').len();
                let start = text[..trimmed].rfind(' ').map(|i| i + 1).unwrap_or(0);
                text.truncate(start);
            }
            Edit::Clear => text.clear(),
        }
    }
}

/// A transient error notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: u64,
    pub title: String,
    pub message: String,
}

/// Everything that can happen to a session.
#[derive(Debug, Clone)]
pub enum Msg {
    // ── User intent ─────────────────────────────────────────
    SelectCategory(String),
    Answer { attribute: String, option: String },
    RequestRecommendation,
    /// Jump from the category screen to a side branch.
    Navigate(Stage),
    StartOver,
    Edit { field: Field, edit: Edit },
    SendChat,
    CheckInventory,
    Compare,
    /// Clear both compare inputs and the result, staying on the comparer.
    ClearComparison,
    DismissNotice(u64),

    // ── Request results ─────────────────────────────────────
    CategoriesLoaded {
        ticket: Ticket,
        result: std::result::Result<Vec<Category>, String>,
    },
    QuestionsLoaded {
        ticket: Ticket,
        result: std::result::Result<Vec<Question>, String>,
    },
    RecommendationLoaded {
        ticket: Ticket,
        result: std::result::Result<Box<RecommendationSet>, String>,
    },
    ChatReplied {
        ticket: Ticket,
        result: std::result::Result<ChatReply, String>,
    },
    InventoryLoaded {
        ticket: Ticket,
        result: std::result::Result<Vec<InventoryResult>, String>,
    },
    ComparisonLoaded {
        ticket: Ticket,
        result: std::result::Result<Box<ComparisonResult>, String>,
    },
}

/// An API request the runtime should perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadCategories {
        ticket: Ticket,
    },
    FetchQuestions {
        ticket: Ticket,
        category: String,
    },
    FetchRecommendation {
        ticket: Ticket,
        category: String,
        answers: AnswerSet,
    },
    SendChat {
        ticket: Ticket,
        message: String,
        store_id: String,
    },
    CheckInventory {
        ticket: Ticket,
        query: String,
        store_id: String,
    },
    Compare {
        ticket: Ticket,
        first: String,
        second: String,
        store_id: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub stage: Stage,
    pub store_id: String,

    // ── Wizard ──────────────────────────────────────────────
    pub categories: Vec<Category>,
    pub selected_category: Option<String>,
    pub questions: Vec<Question>,
    pub answers: AnswerSet,
    pub recommendation: Option<Recommendation>,
    pub further_recommendations: Vec<FurtherRecommendation>,
    /// Blocks the whole screen while questions or a recommendation load.
    pub wizard_loading: bool,

    // ── Chat ────────────────────────────────────────────────
    pub chat: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_recommendations: Vec<FurtherRecommendation>,
    pub chat_loading: bool,

    // ── Inventory ───────────────────────────────────────────
    pub inventory_input: String,
    pub inventory_results: Vec<InventoryResult>,
    pub inventory_loading: bool,

    // ── Comparer ────────────────────────────────────────────
    pub compare_first: String,
    pub compare_second: String,
    pub comparison: Option<ComparisonResult>,
    pub compare_loading: bool,

    pub notice: Option<Notice>,
    next_notice_id: u64,
    generations: Generations,
}

impl Session {
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            stage: Stage::Categories,
            store_id: store_id.into(),
            categories: Vec::new(),
            selected_category: None,
            questions: Vec::new(),
            answers: AnswerSet::new(),
            recommendation: None,
            further_recommendations: Vec::new(),
            wizard_loading: false,
            chat: Vec::new(),
            chat_input: String::new(),
            chat_recommendations: Vec::new(),
            chat_loading: false,
            inventory_input: String::new(),
            inventory_results: Vec::new(),
            inventory_loading: false,
            compare_first: String::new(),
            compare_second: String::new(),
            comparison: None,
            compare_loading: false,
            notice: None,
            next_notice_id: 0,
            generations: Generations::default(),
        }
    }

    /// The request to issue when the session first comes up.
    pub fn start(&mut self) -> Effect {
        Effect::LoadCategories {
            ticket: self.generations.issue(RequestKind::Categories),
        }
    }

    /// Whether the "get recommendation" trigger should be offered.
    pub fn can_request_recommendation(&self) -> bool {
        self.stage == Stage::Questions
            && !self.wizard_loading
            && self.answers.is_enough_for_recommendation()
    }

    pub fn can_send_chat(&self) -> bool {
        !self.chat_loading && !self.chat_input.trim().is_empty()
    }

    pub fn can_check_inventory(&self) -> bool {
        !self.inventory_loading && !self.inventory_input.trim().is_empty()
    }

    pub fn can_compare(&self) -> bool {
        !self.compare_loading
            && !self.compare_first.trim().is_empty()
            && !self.compare_second.trim().is_empty()
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::ChatMessage => &self.chat_input,
            Field::InventoryQuery => &self.inventory_input,
            Field::CompareFirst => &self.compare_first,
            Field::CompareSecond => &self.compare_second,
            Field::StoreId => &self.store_id,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::ChatMessage => &mut self.chat_input,
            Field::InventoryQuery => &mut self.inventory_input,
            Field::CompareFirst => &mut self.compare_first,
            Field::CompareSecond => &mut self.compare_second,
            Field::StoreId => &mut self.store_id,
        }
    }

    /// Serialized view of the whole session, for diagnostics.
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Apply one message. Returns the request to run, if any.
    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::SelectCategory(name) => self.select_category(name),
            Msg::Answer { attribute, option } => {
                if self.stage == Stage::Questions {
                    self.answers.answer(attribute, option);
                }
                None
            }
            Msg::RequestRecommendation => self.request_recommendation(),
            Msg::Navigate(stage) => {
                if self.stage == Stage::Categories && !self.wizard_loading && stage.is_side_branch()
                {
                    self.stage = stage;
                }
                None
            }
            Msg::StartOver => {
                self.start_over();
                None
            }
            Msg::Edit { field, edit } => {
                edit.apply(self.field_mut(field));
                None
            }
            Msg::SendChat => self.send_chat(),
            Msg::CheckInventory => self.check_inventory(),
            Msg::Compare => self.compare(),
            Msg::ClearComparison => {
                if self.stage == Stage::Comparer {
                    self.compare_first.clear();
                    self.compare_second.clear();
                    self.comparison = None;
                }
                None
            }
            Msg::DismissNotice(id) => {
                if self.notice.as_ref().is_some_and(|n| n.id == id) {
                    self.notice = None;
                }
                None
            }

            Msg::CategoriesLoaded { ticket, result } => {
                if self.accept(&ticket) {
                    self.categories = match result {
                        Ok(categories) if !categories.is_empty() => categories,
                        Ok(_) => {
                            debug!("Service returned no categories, using built-in list");
                            default_categories()
                        }
                        Err(e) => {
                            debug!(error = %e, "Using built-in categories");
                            default_categories()
                        }
                    };
                }
                None
            }
            Msg::QuestionsLoaded { ticket, result } => {
                if self.accept(&ticket) {
                    self.wizard_loading = false;
                    match result {
                        Ok(questions) => {
                            self.questions = questions;
                            self.stage = Stage::Questions;
                        }
                        Err(_) => self.notify("Failed to load questions. Please try again."),
                    }
                }
                None
            }
            Msg::RecommendationLoaded { ticket, result } => {
                if self.accept(&ticket) {
                    self.wizard_loading = false;
                    match result {
                        Ok(set) => {
                            let RecommendationSet {
                                recommendation,
                                further,
                            } = *set;
                            self.recommendation = Some(recommendation);
                            self.further_recommendations = further;
                            self.stage = Stage::Recommendation;
                        }
                        Err(_) => self.notify("Failed to get recommendation. Please try again."),
                    }
                }
                None
            }
            Msg::ChatReplied { ticket, result } => {
                if self.accept(&ticket) {
                    self.chat_loading = false;
                    match result {
                        Ok(reply) => {
                            self.chat.push(ChatMessage::assistant(reply.response));
                            if !reply.recommendations.is_empty() {
                                self.chat_recommendations = reply.recommendations;
                            }
                        }
                        Err(_) => {
                            self.chat.push(ChatMessage::assistant(CHAT_FAILURE_REPLY));
                            self.notify("Failed to get chat response. Please try again.");
                        }
                    }
                }
                None
            }
            Msg::InventoryLoaded { ticket, result } => {
                if self.accept(&ticket) {
                    self.inventory_loading = false;
                    match result {
                        Ok(results) => self.inventory_results = results,
                        Err(_) => self.notify("Failed to check inventory. Please try again."),
                    }
                }
                None
            }
            Msg::ComparisonLoaded { ticket, result } => {
                if self.accept(&ticket) {
                    self.compare_loading = false;
                    match result {
                        Ok(comparison) => self.comparison = Some(*comparison),
                        Err(_) => self.notify("Failed to compare products. Please try again."),
                    }
                }
                None
            }
        }
    }

    fn select_category(&mut self, name: String) -> Option<Effect> {
        if self.wizard_loading || self.stage != Stage::Categories {
            return None;
        }
        self.answers.clear();
        self.selected_category = Some(name.clone());
        self.wizard_loading = true;
        Some(Effect::FetchQuestions {
            ticket: self.generations.issue(RequestKind::Questions),
            category: name,
        })
    }

    fn request_recommendation(&mut self) -> Option<Effect> {
        if !self.can_request_recommendation() {
            return None;
        }
        let category = self.selected_category.clone()?;
        self.wizard_loading = true;
        Some(Effect::FetchRecommendation {
            ticket: self.generations.issue(RequestKind::Recommendation),
            category,
            answers: self.answers.clone(),
        })
    }

    fn send_chat(&mut self) -> Option<Effect> {
        if self.stage != Stage::Chat || !self.can_send_chat() {
            return None;
        }
        let message = std::mem::take(&mut self.chat_input);
        self.chat.push(ChatMessage::user(message.clone()));
        self.chat_loading = true;
        Some(Effect::SendChat {
            ticket: self.generations.issue(RequestKind::Chat),
            message,
            store_id: self.store_id.clone(),
        })
    }

    fn check_inventory(&mut self) -> Option<Effect> {
        if self.stage != Stage::Inventory || !self.can_check_inventory() {
            return None;
        }
        self.inventory_loading = true;
        Some(Effect::CheckInventory {
            ticket: self.generations.issue(RequestKind::Inventory),
            query: self.inventory_input.clone(),
            store_id: self.store_id.clone(),
        })
    }

    fn compare(&mut self) -> Option<Effect> {
        if self.stage != Stage::Comparer || !self.can_compare() {
            return None;
        }
        self.compare_loading = true;
        Some(Effect::Compare {
            ticket: self.generations.issue(RequestKind::Compare),
            first: self.compare_first.clone(),
            second: self.compare_second.clone(),
            store_id: self.store_id.clone(),
        })
    }

    fn start_over(&mut self) {
        self.generations.invalidate_restartable();
        self.stage = Stage::Categories;
        self.selected_category = None;
        self.questions.clear();
        self.answers.clear();
        self.recommendation = None;
        self.further_recommendations.clear();
        self.wizard_loading = false;
        self.chat.clear();
        self.chat_input.clear();
        self.chat_recommendations.clear();
        self.chat_loading = false;
        self.inventory_input.clear();
        self.inventory_results.clear();
        self.inventory_loading = false;
        self.compare_first.clear();
        self.compare_second.clear();
        self.comparison = None;
        self.compare_loading = false;
    }

    fn accept(&self, ticket: &Ticket) -> bool {
        let current = self.generations.is_current(ticket);
        if !current {
            debug!(kind = ?ticket.kind, generation = ticket.generation, "Discarding stale response");
        }
        current
    }

    fn notify(&mut self, message: &str) {
        self.next_notice_id += 1;
        self.notice = Some(Notice {
            id: self.next_notice_id,
            title: "Error".to_string(),
            message: message.to_string(),
        });
    }
}
