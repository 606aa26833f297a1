//! Style vocabulary and the translation result type.
//!
//! Every translation — model-generated or fallback — is delivered as exactly
//! three [`TranslationVariant`]s, one per [`Style`], in vocabulary order.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// The fixed style vocabulary, in presentation order.
///
/// The English labels are what the model is asked to echo back in its JSON
/// reply; the Korean labels are what the UI shows the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    /// Casual, upbeat — a comment between friends.
    Friendly,
    /// Affectionate and encouraging.
    Warm,
    /// Playful, with a bit of humour.
    Fun,
}

impl Style {
    /// All styles in presentation order.
    pub const ALL: [Style; 3] = [Style::Friendly, Style::Warm, Style::Fun];

    /// English label — the value requested in the model's `style` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Friendly => "Friendly",
            Style::Warm => "Warm",
            Style::Fun => "Fun",
        }
    }

    /// Korean display label.
    pub fn korean(&self) -> &'static str {
        match self {
            Style::Friendly => "친근한",
            Style::Warm => "따뜻한",
            Style::Fun => "재미있는",
        }
    }
}

// ---------------------------------------------------------------------------
// TranslationVariant
// ---------------------------------------------------------------------------

/// One styled English rendering of the Korean source text.
///
/// `style` is kept as the string the model actually returned (the normalizer
/// only requires it to be non-empty), so a slightly off-vocabulary label is
/// still displayed rather than dropped.  Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationVariant {
    /// Style label, e.g. `"Friendly"`.
    pub style: String,
    /// The translated comment text; never empty.
    pub text: String,
}

impl TranslationVariant {
    /// Construct a variant from a style in the fixed vocabulary.
    pub fn new(style: Style, text: impl Into<String>) -> Self {
        Self {
            style: style.as_str().to_string(),
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_order_is_friendly_warm_fun() {
        let labels: Vec<&str> = Style::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["Friendly", "Warm", "Fun"]);
    }

    #[test]
    fn korean_labels_match_styles() {
        assert_eq!(Style::Friendly.korean(), "친근한");
        assert_eq!(Style::Warm.korean(), "따뜻한");
        assert_eq!(Style::Fun.korean(), "재미있는");
    }

    #[test]
    fn new_uses_english_label() {
        let v = TranslationVariant::new(Style::Warm, "I'm so proud of you!");
        assert_eq!(v.style, "Warm");
        assert_eq!(v.text, "I'm so proud of you!");
    }
}
