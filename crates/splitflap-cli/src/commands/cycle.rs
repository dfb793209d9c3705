use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use splitflap_core::scheduler::ChannelSink;
use splitflap_core::{spawn_cycler, PeriodicCycler};

pub async fn run(items: Vec<String>, interval_ms: u64, count: Option<u64>, json: bool) -> Result<()> {
    let cycler = PeriodicCycler::new(items, Duration::from_millis(interval_ms))?;
    let mut stdout = io::stdout();
    stream(cycler, count, json, &mut stdout, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Interrupted");
    })
    .await
}

/// Print one line per frame until `count` frames were written or `shutdown` resolves
pub async fn stream<W, F>(
    cycler: PeriodicCycler,
    count: Option<u64>,
    json: bool,
    out: &mut W,
    shutdown: F,
) -> Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    if count == Some(0) {
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = spawn_cycler(cycler, ChannelSink::new(tx));
    tokio::pin!(shutdown);

    let mut written = 0;
    loop {
        tokio::select! {
            frame = rx.recv() => {
                let Some(frame) = frame else { break };
                if json {
                    writeln!(out, "{}", frame.to_json_line()?)?;
                } else {
                    writeln!(out, "{}", frame.text)?;
                }
                out.flush()?;
                written += 1;
                if count.is_some_and(|limit| written >= limit) {
                    break;
                }
            }
            _ = &mut shutdown => break,
        }
    }

    handle.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycler() -> PeriodicCycler {
        PeriodicCycler::new(["ChatGPT", "Claude", "Cursor"], Duration::from_millis(2000)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_stops_after_count() {
        let mut out = Vec::new();
        stream(cycler(), Some(4), false, &mut out, std::future::pending())
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "ChatGPT\nClaude\nCursor\nChatGPT\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_json() {
        let mut out = Vec::new();
        stream(cycler(), Some(2), true, &mut out, std::future::pending())
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"previous\":null"));
        assert!(lines[1].contains("\"previous\":\"ChatGPT\""));
        assert!(lines[1].contains("\"index\":1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_stops_on_shutdown() {
        let mut out = Vec::new();
        stream(
            cycler(),
            None,
            false,
            &mut out,
            tokio::time::sleep(Duration::from_millis(5000)),
        )
        .await
        .unwrap();

        // Mount frame plus ticks at 2s and 4s
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
    }

    #[tokio::test]
    async fn test_zero_count_writes_nothing() {
        let mut out = Vec::new();
        stream(cycler(), Some(0), false, &mut out, std::future::pending())
            .await
            .unwrap();
        assert!(out.is_empty());
    }
}
