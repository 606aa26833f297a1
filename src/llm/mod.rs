//! Translation core for the Korean → English comment helper.
//!
//! This module provides:
//! * [`Translator`] — the orchestrator: prompt, remote call, normalization,
//!   bounded retry, fallback.
//! * [`ModelClient`] — async trait implemented by all model backends.
//! * [`GeminiClient`] — Gemini `generateContent` REST client.
//! * [`PromptBuilder`] — builds the three-variant JSON-contract prompt.
//! * [`normalize`] / [`extract_json`] — model-output normalization.
//! * [`FallbackProvider`] — deterministic canned triple for total failure.
//! * [`TranslationVariant`] / [`Style`] — the result types.
//! * [`TranslateError`] — error variants for translation operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use grandtalk::config::AppConfig;
//! use grandtalk::llm::{GeminiClient, Translator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let translator = Translator::new(GeminiClient::from_config(&config.gemini));
//!
//!     // Always yields three variants unless the input is empty or the API
//!     // key is missing/rejected.
//!     if let Ok(variants) = translator.translate("오늘 사진 정말 멋지다").await {
//!         for v in &variants {
//!             println!("[{}] {}", v.style, v.text);
//!         }
//!     }
//! }
//! ```

pub mod client;
pub mod fallback;
pub mod normalize;
pub mod prompt;
pub mod translator;
pub mod variant;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{GeminiClient, ModelClient, TranslateError};
pub use fallback::FallbackProvider;
pub use normalize::{extract_json, normalize};
pub use prompt::PromptBuilder;
pub use translator::{Sleep, TokioSleep, Translator, MAX_RETRIES};
pub use variant::{Style, TranslationVariant};
