//! Fallback provider — canned variants for when the model is unreachable.
//!
//! When every translation attempt has failed (network down, quota exhausted,
//! output unparseable) the orchestrator still owes the caller three variants.
//! [`FallbackProvider`] supplies a fixed triple covering the same three
//! styles, worded as a gentle notice plus a short ready-made comment, so the
//! user never sees a technical error.

use crate::llm::variant::{Style, TranslationVariant};

// ---------------------------------------------------------------------------
// Canned texts
// ---------------------------------------------------------------------------

const FALLBACK_TEXTS: [(Style, &str); 3] = [
    (
        Style::Friendly,
        "Sorry, the translator couldn't be reached just now — here's a ready-made comment: Great job! 😊",
    ),
    (
        Style::Warm,
        "The translator is taking a short break. Until it's back: I'm so proud of you! ❤️",
    ),
    (
        Style::Fun,
        "Oops, translation hiccup! Meanwhile: That's awesome! 🎉",
    ),
];

// ---------------------------------------------------------------------------
// FallbackProvider
// ---------------------------------------------------------------------------

/// Deterministic source of the canned variant triple.
///
/// Pure and side-effect free: every call returns the same three variants in
/// the same style order as a successful translation would use.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackProvider;

impl FallbackProvider {
    pub fn new() -> Self {
        Self
    }

    /// The fixed fallback triple, in vocabulary order.
    pub fn variants(&self) -> [TranslationVariant; 3] {
        FALLBACK_TEXTS.map(|(style, text)| TranslationVariant::new(style, text))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
