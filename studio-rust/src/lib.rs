pub mod article;
pub mod catalog;
pub mod chat;
mod config;
pub mod content;
mod errors;
pub mod export;
pub mod generation;
pub mod live;
mod opentelemetry;
pub mod prompts;
pub mod runner;
pub mod store;

pub use article::{ArticleSession, ArticleStage, ArticleUpdate};
pub use catalog::{catalog, filter_tools, find_tool, Category, Slot, ToolDescriptor};
pub use chat::{ChatMessage, ChatSession, Sender};
pub use config::*;
pub use content::{ContentRequest, ContentType, SlotValues};
pub use errors::{StudioError, StudioResult};
pub use generation::{
    tip_of_the_day, BlogBrief, GeminiClient, GeminiModels, GeneratedImage, GenerationClient,
    SpeechAudio, Voice,
};
pub use live::{LiveSessionHandle, LiveSessionOptions, LiveSnapshot, LiveState};
pub use prompts::build_prompt;
pub use runner::ToolRun;
pub use store::{FavoritesRepository, FileStore, InMemoryStore, KeyValueStore, User, UserRepository};
