//! grandtalk — Korean → English comment helper.
//!
//! Helps a Korean-speaking grandparent write English blog comments: Korean
//! text goes in, three stylistic English variants (Friendly / Warm / Fun)
//! come out, one of which can be copied to the clipboard.
//!
//! Modules:
//! * [`llm`] — the translation core: prompt builder, Gemini client, response
//!   normalizer, retry/fallback orchestrator.
//! * [`config`] — TOML settings and platform paths.
//! * [`history`] — bounded newest-first translation history (JSON file).
//! * [`clipboard`] — copy helper used by the CLI.

pub mod clipboard;
pub mod config;
pub mod history;
pub mod llm;
