//! Application entry point — grandtalk CLI.
//!
//! # Flow
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the [`GeminiClient`] and [`Translator`].
//! 4. Take Korean text from the command line, or prompt on stdin.
//! 5. Translate and print the three variants.
//! 6. Let the user pick one: copy it to the clipboard and append it to the
//!    local history.
//!
//! Speech input is out of scope here; recognized text from any dictation
//! tool is pasted or typed like any other input.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use grandtalk::{
    clipboard,
    config::AppConfig,
    history::HistoryStore,
    llm::{GeminiClient, TranslateError, Translator},
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("grandtalk starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    if !config.gemini.is_configured() {
        eprintln!("Gemini API 키가 설정되지 않았습니다.");
        eprintln!(
            "settings.toml 의 [gemini] api_key 또는 GEMINI_API_KEY 환경 변수를 설정해 주세요."
        );
        std::process::exit(1);
    }

    // 3. Translator
    let translator = Translator::new(GeminiClient::from_config(&config.gemini));
    let history = HistoryStore::open_default();

    // 4. Source text: arguments, or one line from stdin
    let args: Vec<String> = std::env::args().skip(1).collect();
    let source = if args.is_empty() {
        prompt_line("한글 내용을 입력해 주세요: ")?
    } else {
        args.join(" ")
    };

    // 5. Translate
    println!("AI 번역 중...");
    let variants = match translator.translate(&source).await {
        Ok(variants) => variants,
        Err(TranslateError::EmptyInput) => {
            eprintln!("한글 내용을 입력하거나 말씀해 주세요.");
            std::process::exit(1);
        }
        Err(TranslateError::Authentication(reason)) => {
            eprintln!("API 키가 거부되었습니다 ({reason}). 설정에서 키를 확인해 주세요.");
            std::process::exit(1);
        }
        // The orchestrator absorbs every other failure into the fallback.
        Err(e) => {
            log::error!("unexpected translation error: {e}");
            std::process::exit(1);
        }
    };

    println!("\n번역 결과:");
    for (i, variant) in variants.iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, variant.style, variant.text);
    }

    // 6. Pick and copy
    let choice = prompt_line("\n복사할 번역을 선택하세요 (1-3, Enter = 건너뛰기): ")?;
    let Some(index) = parse_choice(&choice, variants.len()) else {
        println!("복사하지 않고 종료합니다.");
        return Ok(());
    };

    let chosen = &variants[index];
    match clipboard::copy_text(&chosen.text) {
        Ok(()) => println!("복사 완료! 📋  [{}] {}", chosen.style, chosen.text),
        Err(e) => {
            log::warn!("clipboard copy failed: {e}");
            println!("클립보드 복사에 실패했습니다. 직접 복사해 주세요:\n{}", chosen.text);
        }
    }

    if let Err(e) = history.append(source.trim(), &chosen.text) {
        log::warn!("failed to save history: {e}");
    }

    Ok(())
}

/// Print `prompt` and read one trimmed line from stdin.
fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Parse a 1-based menu choice; `None` for empty or out-of-range input.
fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
