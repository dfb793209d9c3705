use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use splitflap_core::scheduler::ChannelSink;
use splitflap_core::{spawn_reveal, CharPool, RevealFrame, ScrambleReveal};

pub struct RevealArgs {
    pub text: String,
    pub interval_ms: u64,
    pub max_steps: Option<u32>,
    pub lock_in_factor: u32,
    pub pool: String,
    pub repeat: u32,
    pub pause_ms: u64,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn build(args: &RevealArgs) -> Result<ScrambleReveal> {
    let retrigger = (args.repeat != 1).then(|| Duration::from_millis(args.pause_ms));

    let mut builder = ScrambleReveal::builder(args.text.clone())
        .step_interval(Duration::from_millis(args.interval_ms))
        .lock_in_factor(args.lock_in_factor)
        .char_pool(CharPool::from_spec(&args.pool)?)
        .retrigger_interval(retrigger);
    if let Some(steps) = args.max_steps {
        builder = builder.max_steps(steps);
    }
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    Ok(builder.build()?)
}

pub async fn run(args: RevealArgs) -> Result<()> {
    let reveal = build(&args)?;
    let mut stdout = io::stdout();
    stream(reveal, args.repeat, args.json, &mut stdout, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Interrupted");
    })
    .await
}

/// Write frames until `repeat` runs have finished (0 = forever) or `shutdown` resolves
pub async fn stream<W, F>(
    reveal: ScrambleReveal,
    repeat: u32,
    json: bool,
    out: &mut W,
    shutdown: F,
) -> Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = spawn_reveal(reveal, ChannelSink::new(tx));
    tokio::pin!(shutdown);

    let mut finished = 0;
    loop {
        tokio::select! {
            frame = rx.recv() => {
                let Some(frame) = frame else { break };
                write_frame(out, &frame, json)?;
                if frame.finished {
                    finished += 1;
                    if repeat != 0 && finished >= repeat {
                        break;
                    }
                }
            }
            _ = &mut shutdown => break,
        }
    }

    handle.cancel();
    if !json {
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_frame<W: Write>(out: &mut W, frame: &RevealFrame, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", frame.to_json_line()?)?;
    } else {
        // Redraw in place
        write!(out, "\r{}", frame.text)?;
        out.flush()?;
    }
    Ok(())
}
