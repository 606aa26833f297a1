//! Response normalizer — turns raw model text into exactly three variants.
//!
//! Models do not always honour "JSON only": the object may arrive wrapped in
//! prose ("Sure! Here are your translations: {…}") or markdown code fences.
//! [`extract_json`] locates the first balanced JSON object substring, and
//! [`normalize`] parses and validates it against the expected
//! `{"variants":[{"style","text"} …]}` shape.
//!
//! The extraction heuristic lives entirely inside this module so it can be
//! swapped for a strict structured-output mode without touching the
//! orchestrator contract.

use serde::Deserialize;

use crate::llm::client::TranslateError;
use crate::llm::variant::TranslationVariant;

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPayload {
    variants: Vec<RawVariant>,
}

/// One entry as the model wrote it.  Both fields are optional at the serde
/// level; entries missing either one are dropped during validation, not
/// defaulted.
#[derive(Debug, Deserialize)]
struct RawVariant {
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

// ---------------------------------------------------------------------------
// JSON extraction
// ---------------------------------------------------------------------------

/// Return the first balanced `{ … }` substring of `raw`, or `None`.
///
/// Brace counting is string-literal aware: braces inside JSON strings (and
/// escaped quotes inside those strings) do not affect the balance.  Anything
/// before the first `{` — prose, a ```` ```json ```` fence — is skipped, and
/// anything after the matching `}` is ignored.
pub fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    // Ran out of input with unbalanced braces.
    None
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

/// Parse raw model output into exactly three [`TranslationVariant`]s.
///
/// Validation rules:
/// * a JSON object must be present somewhere in `raw`;
/// * it must parse and contain a `variants` array;
/// * entries missing a non-empty `style` or `text` are dropped;
/// * at least three well-formed entries must remain — extras beyond the first
///   three (in array order) are ignored.
///
/// # Errors
///
/// Every failure mode is [`TranslateError::MalformedResponse`]; the message
/// names which rule was violated.
pub fn normalize(raw: &str) -> Result<[TranslationVariant; 3], TranslateError> {
    let json = extract_json(raw).ok_or_else(|| {
        TranslateError::MalformedResponse("no JSON object found in model output".into())
    })?;

    let payload: RawPayload = serde_json::from_str(json)
        .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;

    let mut kept: Vec<TranslationVariant> = payload
        .variants
        .into_iter()
        .filter_map(|entry| match (entry.style, entry.text) {
            (Some(style), Some(text)) if !style.trim().is_empty() && !text.trim().is_empty() => {
                Some(TranslationVariant { style, text })
            }
            _ => None,
        })
        .take(3)
        .collect();

    if kept.len() < 3 {
        return Err(TranslateError::MalformedResponse(format!(
            "expected 3 well-formed variants, got {}",
            kept.len()
        )));
    }

    kept.truncate(3);
    kept.try_into()
        .map_err(|_| TranslateError::MalformedResponse("variant count mismatch".into()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
