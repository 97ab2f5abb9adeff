pub mod analysis;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod product;
pub mod session;

pub use config::AssistantConfig;
pub use error::{AssistantError, Result};
pub use session::{Effect, Msg, Session, Stage};
