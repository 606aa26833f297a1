//! Configuration module — settings persistence and application paths.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, GeminiConfig, HistoryConfig, API_KEY_ENV};
