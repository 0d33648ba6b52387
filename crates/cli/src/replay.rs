//! Replay a recorded host→UI message log through a connector.
//!
//! Input is NDJSON, one host message per line. Every UI event and host-bound
//! message the connector produces is written out as one JSON line, tagged
//! with its direction.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use comfy_table::{presets::UTF8_FULL, Table};
use console::style;
use featuredev_connector::{host_channel, ui_channel, Connector, UiEvent};
use featuredev_protocol::HostBound;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Stop at the first line that does not parse
    pub strict: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Direction {
    Ui,
    Host,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Payload<'a> {
    Ui(&'a UiEvent),
    Host(&'a HostBound),
}

#[derive(Serialize)]
struct ReplayRecord<'a> {
    direction: Direction,
    line: usize,
    #[serde(flatten)]
    payload: Payload<'a>,
}

/// Counts of what a replay produced, keyed by event kind / command name
#[derive(Debug, Default)]
pub struct ReplaySummary {
    pub lines: usize,
    pub rejected: usize,
    pub ui_events: BTreeMap<&'static str, usize>,
    pub host_messages: BTreeMap<&'static str, usize>,
}

impl ReplaySummary {
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Direction", "Kind", "Count"]);
        for (kind, count) in &self.ui_events {
            table.add_row(vec!["ui".to_string(), kind.to_string(), count.to_string()]);
        }
        for (kind, count) in &self.host_messages {
            table.add_row(vec!["host".to_string(), kind.to_string(), count.to_string()]);
        }
        table.add_row(vec![
            "-".to_string(),
            "rejected lines".to_string(),
            self.rejected.to_string(),
        ]);
        table
    }
}

pub async fn replay_file(
    path: &Path,
    options: ReplayOptions,
    out: &mut impl Write,
) -> anyhow::Result<ReplaySummary> {
    let input = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    replay(&input, options, out).await
}

pub async fn replay(
    input: &str,
    options: ReplayOptions,
    out: &mut impl Write,
) -> anyhow::Result<ReplaySummary> {
    let (transport, mut host_rx) = host_channel(CHANNEL_CAPACITY);
    let (ui, mut ui_rx) = ui_channel(CHANNEL_CAPACITY);
    let connector = Connector::builder(transport, ui.clone())
        .on_answer_received(ui.answers_received())
        .on_answer_updated(ui.answers_updated())
        .build();

    let mut summary = ReplaySummary::default();

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }
        summary.lines += 1;

        if let Err(e) = connector.handle_raw(raw).await {
            if options.strict {
                return Err(e).with_context(|| format!("line {}", line));
            }
            summary.rejected += 1;
            warn!(
                component = "replay",
                event = "replay.line.rejected",
                line = line,
                error = %e,
                "Skipping malformed host message"
            );
            eprintln!(
                "{} line {}: {}",
                style("skipped").yellow().bold(),
                line,
                e
            );
            continue;
        }

        drain(line, &mut host_rx, &mut ui_rx, &mut summary, out)?;
    }

    info!(
        component = "replay",
        event = "replay.finished",
        lines = summary.lines,
        rejected = summary.rejected,
        "Replay finished"
    );

    Ok(summary)
}

/// Host-bound sends are written before UI events; within one line that is
/// also the order the connector produces them.
fn drain(
    line: usize,
    host_rx: &mut mpsc::Receiver<HostBound>,
    ui_rx: &mut mpsc::Receiver<UiEvent>,
    summary: &mut ReplaySummary,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    while let Ok(message) = host_rx.try_recv() {
        *summary
            .host_messages
            .entry(message.command.name())
            .or_default() += 1;
        write_record(
            out,
            &ReplayRecord {
                direction: Direction::Host,
                line,
                payload: Payload::Host(&message),
            },
        )?;
    }
    while let Ok(event) = ui_rx.try_recv() {
        *summary.ui_events.entry(event.kind()).or_default() += 1;
        write_record(
            out,
            &ReplayRecord {
                direction: Direction::Ui,
                line,
                payload: Payload::Ui(&event),
            },
        )?;
    }
    Ok(())
}

fn write_record(out: &mut impl Write, record: &ReplayRecord<'_>) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const LOG: &str = r#"{"type":"chat-input-enabled","tabID":"t1","enabled":false}
{"type":"code-result-message","tabID":"t1","messageId":"m1","message":"Done","filePaths":[{"zipFilePath":"src/a.rs"}]}

{"type":"something-new","tabID":"t1"}
{"type":"auth-needed-exception","tabID":"t2","message":"Sign in","authType":"full-auth"}
"#;

    fn records(out: &[u8]) -> Vec<Value> {
        std::str::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn replays_every_line_in_order() {
        let mut out = Vec::new();
        let summary = replay(LOG, ReplayOptions::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(summary.lines, 4);
        assert_eq!(summary.rejected, 0);

        let records = records(&out);
        let shape: Vec<(String, String)> = records
            .iter()
            .map(|r| {
                let direction = r["direction"].as_str().unwrap().to_string();
                let kind = r
                    .get("event")
                    .or_else(|| r.get("command"))
                    .and_then(Value::as_str)
                    .unwrap()
                    .to_string();
                (direction, kind)
            })
            .collect();
        assert_eq!(
            shape,
            vec![
                ("ui".to_string(), "chat_input_enabled".to_string()),
                ("host".to_string(), "store-code-result-message-id".to_string()),
                ("ui".to_string(), "answer_received".to_string()),
                ("ui".to_string(), "answer_received".to_string()),
                ("ui".to_string(), "answer_received".to_string()),
            ]
        );
        assert_eq!(records[1]["line"], 2);
        assert_eq!(records[1]["tabType"], "featuredev");
        assert_eq!(records[3]["line"], 5);
        assert_eq!(records[4]["item"]["type"], "system-prompt");

        assert_eq!(summary.ui_events.get("answer_received"), Some(&3));
        assert_eq!(
            summary.host_messages.get("store-code-result-message-id"),
            Some(&1)
        );
    }

    #[tokio::test]
    async fn skips_malformed_lines_by_default() {
        let input = "not json\n{\"type\":\"open-new-tab\"}\n";
        let mut out = Vec::new();
        let summary = replay(input, ReplayOptions::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(summary.lines, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(records(&out).len(), 1);
    }

    #[tokio::test]
    async fn strict_mode_fails_on_malformed_line() {
        let input = "{\"type\":\"open-new-tab\"}\n{\"type\":\"error-message\"}\n";
        let mut out = Vec::new();
        let err = replay(input, ReplayOptions { strict: true }, &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("line 2"));
        assert_eq!(records(&out).len(), 1);
    }

    #[tokio::test]
    async fn replays_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("host.ndjson");
        std::fs::write(&path, LOG).unwrap();

        let mut out = Vec::new();
        let summary = replay_file(&path, ReplayOptions::default(), &mut out)
            .await
            .unwrap();
        assert_eq!(summary.lines, 4);

        let table = summary.table().to_string();
        assert!(table.contains("store-code-result-message-id"));
        assert!(table.contains("rejected lines"));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let mut out = Vec::new();
        let err = replay_file(
            Path::new("/nonexistent/host.ndjson"),
            ReplayOptions::default(),
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("reading"));
    }
}
