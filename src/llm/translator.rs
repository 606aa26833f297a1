//! Translation orchestrator — prompt, call, normalize, retry, fall back.
//!
//! [`Translator`] coordinates the whole request: it builds the prompt once,
//! calls the injected [`ModelClient`], runs the normalizer on the raw reply,
//! retries a bounded number of times on recoverable failures, and degrades to
//! the [`FallbackProvider`] triple when the retry budget is spent.  Only two
//! errors ever reach the caller: [`TranslateError::EmptyInput`] and
//! [`TranslateError::Authentication`].

use std::time::Duration;

use async_trait::async_trait;

use crate::llm::client::{ModelClient, TranslateError};
use crate::llm::fallback::FallbackProvider;
use crate::llm::normalize::normalize;
use crate::llm::prompt::PromptBuilder;
use crate::llm::variant::TranslationVariant;

// ---------------------------------------------------------------------------
// Retry policy
// ---------------------------------------------------------------------------

/// Additional attempts after the first one.
///
/// Bounded so a foreground action never waits on an open-ended retry loop;
/// with the client's per-request timeout this caps the total latency.
pub const MAX_RETRIES: u32 = 2;

/// Delay before retry `attempt` (1-based): 400 ms, then 800 ms.
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(400 * u64::from(attempt))
}

// ---------------------------------------------------------------------------
// Sleep capability
// ---------------------------------------------------------------------------

/// Injected delay capability, so the retry schedule is unit-testable without
/// wall-clock waits.
#[async_trait]
pub trait Sleep: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleep;

#[async_trait]
impl Sleep for TokioSleep {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ---------------------------------------------------------------------------
// Translator
// ---------------------------------------------------------------------------

/// Coordinates prompt construction, the remote call, normalization, bounded
/// retry, and the fallback path.
///
/// The client is injected at construction (no global state) and the
/// credential lives inside it, immutable.  One logical request is in flight
/// per [`translate`](Translator::translate) call; concurrent calls are
/// independent and share nothing mutable.
///
/// # Example
/// ```rust,no_run
/// use grandtalk::config::GeminiConfig;
/// use grandtalk::llm::{GeminiClient, Translator};
///
/// #[tokio::main]
/// async fn main() {
///     let client = GeminiClient::from_config(&GeminiConfig::default());
///     let translator = Translator::new(client);
///
///     match translator.translate("오늘 사진 정말 멋지다").await {
///         Ok(variants) => {
///             for v in &variants {
///                 println!("[{}] {}", v.style, v.text);
///             }
///         }
///         Err(e) => eprintln!("{e}"),
///     }
/// }
/// ```
pub struct Translator<C: ModelClient, S: Sleep = TokioSleep> {
    client: C,
    prompt_builder: PromptBuilder,
    fallback: FallbackProvider,
    sleeper: S,
}

impl<C: ModelClient> Translator<C> {
    /// Build a translator around `client` with the real tokio sleeper.
    pub fn new(client: C) -> Self {
        Self::with_sleeper(client, TokioSleep)
    }
}

impl<C: ModelClient, S: Sleep> Translator<C, S> {
    /// Build a translator with an explicit sleep capability (used by tests to
    /// observe the backoff schedule without waiting).
    pub fn with_sleeper(client: C, sleeper: S) -> Self {
        Self {
            client,
            prompt_builder: PromptBuilder::new(),
            fallback: FallbackProvider::new(),
            sleeper,
        }
    }

    /// Translate `source` into exactly three styled English variants.
    ///
    /// # Algorithm
    /// 1. Trim `source`; empty input fails fast with
    ///    [`TranslateError::EmptyInput`] — no network call is made.
    /// 2. Build the prompt once.
    /// 3. Up to `1 + MAX_RETRIES` attempts: call the client, normalize the
    ///    reply.  Transport, rate-limit, empty-response and malformed-response
    ///    failures are logged and retried after an incremental delay.
    /// 4. [`TranslateError::Authentication`] is never retried — it is a
    ///    configuration problem and propagates immediately.
    /// 5. When the budget is spent, the fallback triple is returned as
    ///    `Ok(…)`; exhausted retries are not an error for the caller.
    ///
    /// # Cancellation
    ///
    /// Dropping the returned future (e.g. losing a `tokio::select!` race)
    /// abandons the request between awaits: no further retry runs and the
    /// fallback is not produced.
    pub async fn translate(
        &self,
        source: &str,
    ) -> Result<[TranslationVariant; 3], TranslateError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let prompt = self.prompt_builder.build(source);

        for attempt in 1..=(1 + MAX_RETRIES) {
            if attempt > 1 {
                self.sleeper.sleep(backoff(attempt - 1)).await;
            }

            let raw = match self.client.generate(&prompt).await {
                Ok(raw) => raw,
                Err(e @ TranslateError::Authentication(_)) => return Err(e),
                Err(e) => {
                    log::warn!("translation attempt {attempt} failed: {e}");
                    continue;
                }
            };

            match normalize(&raw) {
                Ok(variants) => {
                    log::debug!("translation succeeded on attempt {attempt}");
                    return Ok(variants);
                }
                Err(e) => {
                    // The model may produce cleaner output on a fresh attempt.
                    log::warn!("attempt {attempt} returned unusable output: {e}");
                }
            }
        }

        log::warn!("all translation attempts failed — using fallback variants");
        Ok(self.fallback.variants())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    const VALID_JSON: &str = r#"{"variants":[
        {"style":"Friendly","text":"Nice one!"},
        {"style":"Warm","text":"So proud of you."},
        {"style":"Fun","text":"Legend! 🎉"}
    ]}"#;

    const TWO_ENTRY_JSON: &str = r#"{"variants":[
        {"style":"Friendly","text":"one"},
        {"style":"Warm","text":"two"}
    ]}"#;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Replays a scripted sequence of responses and counts calls.
    struct ScriptedClient {
        calls: AtomicU32,
        script: Mutex<Vec<Result<String, TranslateError>>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<String, TranslateError>>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                script: Mutex::new(script),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn generate(&self, _prompt: &str) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                Err(TranslateError::Transport("script exhausted".into()))
            } else {
                script.remove(0)
            }
        }
    }

    /// Records requested delays instead of sleeping.
    #[derive(Default)]
    struct RecordingSleep {
        delays: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleep for RecordingSleep {
        async fn sleep(&self, duration: Duration) {
            self.delays.lock().unwrap().push(duration);
        }
    }

    fn translator(
        script: Vec<Result<String, TranslateError>>,
    ) -> Translator<ScriptedClient, RecordingSleep> {
        Translator::with_sleeper(ScriptedClient::new(script), RecordingSleep::default())
    }

    // -----------------------------------------------------------------------
    // Precondition
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn empty_input_fails_before_any_network_call() {
        let t = translator(vec![Ok(VALID_JSON.into())]);

        for input in ["", "   ", "\n\t "] {
            assert!(matches!(
                t.translate(input).await,
                Err(TranslateError::EmptyInput)
            ));
        }
        assert_eq!(t.client.calls(), 0, "no client call may be attempted");
    }

    // -----------------------------------------------------------------------
    // Success paths
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn clean_response_succeeds_first_try() {
        let t = translator(vec![Ok(VALID_JSON.into())]);
        let variants = t.translate("오늘 사진 멋지다").await.unwrap();

        assert_eq!(variants[0].style, "Friendly");
        assert_eq!(t.client.calls(), 1);
        assert!(t.sleeper.delays.lock().unwrap().is_empty(), "no delay on success");
    }

    #[tokio::test]
    async fn two_entry_reply_is_retried_and_second_attempt_wins() {
        let t = translator(vec![Ok(TWO_ENTRY_JSON.into()), Ok(VALID_JSON.into())]);
        let variants = t.translate("잘 지냈니").await.unwrap();

        assert_eq!(t.client.calls(), 2);
        assert_eq!(variants[2].text, "Legend! 🎉", "must be the second call's result");
    }

    #[tokio::test]
    async fn transport_error_then_success() {
        let t = translator(vec![
            Err(TranslateError::Transport("connection refused".into())),
            Ok(VALID_JSON.into()),
        ]);
        let variants = t.translate("고마워").await.unwrap();

        assert_eq!(t.client.calls(), 2);
        assert_eq!(variants.len(), 3);
    }

    // -----------------------------------------------------------------------
    // Fallback paths — never an error
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn total_transport_failure_yields_fallback_triple() {
        let t = translator(vec![
            Err(TranslateError::Transport("down".into())),
            Err(TranslateError::Transport("down".into())),
            Err(TranslateError::Transport("down".into())),
        ]);
        let variants = t.translate("안녕").await.unwrap();

        assert_eq!(t.client.calls(), 3, "initial attempt + 2 retries");
        assert_eq!(variants, FallbackProvider::new().variants());
    }

    #[tokio::test]
    async fn persistent_malformed_output_yields_fallback() {
        let t = translator(vec![
            Ok("I cannot translate that.".into()),
            Ok("```json\n{broken".into()),
            Ok(TWO_ENTRY_JSON.into()),
        ]);
        let variants = t.translate("안녕").await.unwrap();

        assert_eq!(t.client.calls(), 3);
        assert_eq!(variants, FallbackProvider::new().variants());
    }

    #[tokio::test]
    async fn rate_limit_and_empty_response_are_retried() {
        let t = translator(vec![
            Err(TranslateError::RateLimited),
            Err(TranslateError::EmptyResponse),
            Ok(VALID_JSON.into()),
        ]);
        let variants = t.translate("안녕").await.unwrap();

        assert_eq!(t.client.calls(), 3);
        assert_eq!(variants[1].style, "Warm");
    }

    /// The three-variant invariant holds on every path.
    #[tokio::test]
    async fn always_exactly_three_variants() {
        let scripts: Vec<Vec<Result<String, TranslateError>>> = vec![
            vec![Ok(VALID_JSON.into())],
            (0..3)
                .map(|_| Err(TranslateError::Transport("down".into())))
                .collect(),
            (0..3).map(|_| Ok("no json here".into())).collect(),
        ];

        for script in scripts {
            let t = translator(script);
            let variants = t.translate("안녕하세요").await.unwrap();
            assert_eq!(variants.len(), 3);
        }
    }

    // -----------------------------------------------------------------------
    // Authentication short-circuit
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn authentication_error_is_not_retried() {
        let t = translator(vec![
            Err(TranslateError::Authentication("bad key".into())),
            Ok(VALID_JSON.into()),
        ]);

        match t.translate("안녕").await {
            Err(TranslateError::Authentication(_)) => {}
            other => panic!("expected Authentication, got {other:?}"),
        }
        assert_eq!(t.client.calls(), 1, "must not retry an auth failure");
        assert!(t.sleeper.delays.lock().unwrap().is_empty());
    }

    // -----------------------------------------------------------------------
    // Backoff schedule
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn backoff_is_incremental_and_bounded() {
        let t = translator(vec![
            Err(TranslateError::Transport("down".into())),
            Err(TranslateError::Transport("down".into())),
            Err(TranslateError::Transport("down".into())),
        ]);
        let _ = t.translate("안녕").await.unwrap();

        let delays = t.sleeper.delays.lock().unwrap().clone();
        assert_eq!(
            delays,
            vec![Duration::from_millis(400), Duration::from_millis(800)],
            "one delay per retry, growing"
        );
    }
}
