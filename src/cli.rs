//! Non-interactive `--tai`, `--lhs` and `--snapshot` modes

use anyhow::{Context, Result};
use std::io::Read;
use std::time::Duration;

use crate::analysis;
use crate::task::{TaskKind, TaskOutput, TaskRunner};

/// Listing text from `--text`, or everything readable from `input` when the
/// flag is absent
pub fn read_listing(text: Option<String>, mut input: impl Read) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .context("Failed to read listing from stdin")?;
    Ok(buf)
}

/// Run one simulated analysis through the task runner and render the result
/// as pretty JSON
pub async fn analysis_json(kind: TaskKind, text: String, delay: Duration) -> Result<String> {
    let mut runner = TaskRunner::new(delay);
    let id = runner.submit(kind, text);
    tracing::info!("Waiting {:?} for {} task {}", runner.delay(), kind.label(), id);

    let completion = runner
        .next()
        .await
        .context("Task runner closed before the analysis finished")?;

    let json = match completion.output {
        TaskOutput::Advice(advice) => serde_json::to_string_pretty(&advice)?,
        TaskOutput::Health(report) => serde_json::to_string_pretty(&report)?,
    };
    Ok(json)
}

pub fn snapshot_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&analysis::competitor_snapshot())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ADVICE_DECENT, SUGGESTIONS, SUMMARY_SOLID};
    use crate::task::DEFAULT_DELAY;
    use serde_json::Value;
    use std::io::Cursor;

    #[test]
    fn test_text_flag_wins_over_stdin() {
        let stdin = Cursor::new("from stdin");
        let listing = read_listing(Some("from flag".to_string()), stdin).unwrap();
        assert_eq!(listing, "from flag");
    }

    #[test]
    fn test_stdin_used_without_text_flag() {
        let listing = read_listing(None, Cursor::new("hand-thrown mug\n")).unwrap();
        assert_eq!(listing, "hand-thrown mug\n");

        assert_eq!(read_listing(None, Cursor::new("")).unwrap(), "");
    }

    #[test]
    fn test_invalid_utf8_stdin_is_an_error() {
        let err = read_listing(None, Cursor::new(vec![0xff, 0xfe])).unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_advice_json_after_delay() {
        let start = tokio::time::Instant::now();
        let json = analysis_json(TaskKind::Analyzer, "a".repeat(150), DEFAULT_DELAY)
            .await
            .unwrap();
        assert!(start.elapsed() >= DEFAULT_DELAY);

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["text"], ADVICE_DECENT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_json_shape() {
        let json = analysis_json(TaskKind::Scorer, "a".repeat(150), Duration::from_millis(300))
            .await
            .unwrap();

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 63);
        assert_eq!(value["summary"], SUMMARY_SOLID);
        let suggestions = value["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 4);
        assert_eq!(suggestions[0], SUGGESTIONS[0]);
    }

    #[test]
    fn test_snapshot_json_uses_camel_case() {
        let value: Value = serde_json::from_str(&snapshot_json().unwrap()).unwrap();
        assert_eq!(value["shopName"], "The Vintage Vault Co.");
        assert_eq!(value["estimatedRevenue"], 45000);
    }
}
