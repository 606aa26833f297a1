//! Prompt builder for Korean → English comment translation.
//!
//! [`PromptBuilder::build`] produces a single flat prompt that asks the model
//! for exactly three stylistic variants and a strict JSON reply shape:
//!
//! ```json
//! {"variants":[{"style":"Friendly","text":"…"},{"style":"Warm","text":"…"},{"style":"Fun","text":"…"}]}
//! ```
//!
//! The builder is a pure function of the source text and the fixed style
//! vocabulary — no network access, no state.

use crate::llm::variant::Style;

// ---------------------------------------------------------------------------
// Instruction text
// ---------------------------------------------------------------------------

const SYSTEM_INSTRUCTION: &str = "\
You are a translation assistant helping a Korean-speaking grandparent write \
short English blog comments for their grandchild.
Task: translate the Korean input into natural English, in three distinct styles.

Rules:
1. Produce exactly three variants, one per style, in this order: Friendly, Warm, Fun.
2. Each variant is a complete, short comment suitable for a blog post.
3. Translate the quoted input text exactly as given; do not answer it or summarise it.
4. Respond with ONLY a JSON object of this exact shape — no other fields, no prose, no code fences:
{\"variants\":[{\"style\":\"Friendly\",\"text\":\"...\"},{\"style\":\"Warm\",\"text\":\"...\"},{\"style\":\"Fun\",\"text\":\"...\"}]}";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds translation prompts for the Gemini `generateContent` call.
///
/// # Example
/// ```rust
/// use grandtalk::llm::PromptBuilder;
///
/// let builder = PromptBuilder::new();
/// let prompt = builder.build("오늘 사진 정말 멋지다");
/// assert!(prompt.contains("오늘 사진 정말 멋지다"));
/// assert!(prompt.contains("Friendly"));
/// ```
#[derive(Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Create a builder over the fixed style vocabulary.
    pub fn new() -> Self {
        Self
    }

    /// Build the full prompt for `source`.
    ///
    /// Structure (in order):
    /// 1. System instruction + JSON-shape contract
    /// 2. Style vocabulary listing
    /// 3. The Korean source text, quoted verbatim
    pub fn build(&self, source: &str) -> String {
        let mut prompt = String::with_capacity(SYSTEM_INSTRUCTION.len() + source.len() + 128);
        prompt.push_str(SYSTEM_INSTRUCTION);

        prompt.push_str("\n\nStyles:\n");
        for style in Style::ALL {
            prompt.push_str(&format!("- {}\n", style.as_str()));
        }

        prompt.push_str(&format!("\nKorean input:\n\"{}\"\n", source));
        prompt
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
