use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use super::handle::{EffectCommand, EffectHandle, EffectKind, Gate};
use super::sink::FrameSink;
use crate::effects::{CycleFrame, PeriodicCycler, RevealFrame, ScrambleReveal};

/// Mount a reveal on its own timer task
///
/// The first run starts after the reveal's initial delay (or waits for
/// `EffectHandle::trigger` when auto start is off). Each finished run is
/// followed by another after the retrigger interval, if one is set.
pub fn spawn_reveal<S>(reveal: ScrambleReveal, sink: S) -> EffectHandle
where
    S: FrameSink<RevealFrame> + 'static,
{
    let id = Uuid::new_v4();
    let gate = Gate::new();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let span = tracing::debug_span!("reveal", effect = %id);
    let driver = RevealDriver {
        reveal,
        sink,
        gate: gate.clone(),
        commands: command_rx,
        shutdown: shutdown_rx,
    };
    let task = tokio::spawn(driver.run().instrument(span));

    EffectHandle::new(id, EffectKind::Reveal, gate, shutdown_tx, command_tx, task)
}

/// Mount a cycler on its own timer task
///
/// The first item is emitted immediately, then one advance per interval.
pub fn spawn_cycler<S>(cycler: PeriodicCycler, sink: S) -> EffectHandle
where
    S: FrameSink<CycleFrame> + 'static,
{
    let id = Uuid::new_v4();
    let gate = Gate::new();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let span = tracing::debug_span!("cycler", effect = %id);
    let driver = CyclerDriver {
        cycler,
        sink,
        gate: gate.clone(),
        commands: command_rx,
        shutdown: shutdown_rx,
    };
    let task = tokio::spawn(driver.run().instrument(span));

    EffectHandle::new(id, EffectKind::Cycler, gate, shutdown_tx, command_tx, task)
}

/// Interval whose first tick fires one period from now
fn ticker(period: Duration) -> Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

enum Wake {
    Start,
    Stop,
}

struct RevealDriver<S> {
    reveal: ScrambleReveal,
    sink: S,
    gate: Gate,
    commands: mpsc::UnboundedReceiver<EffectCommand>,
    shutdown: watch::Receiver<bool>,
}

impl<S: FrameSink<RevealFrame>> RevealDriver<S> {
    async fn run(mut self) {
        info!(
            target_text = %self.reveal.target_string(),
            max_steps = self.reveal.max_steps(),
            step_ms = self.reveal.step_interval().as_millis() as u64,
            "Reveal mounted"
        );

        let mut delay = self
            .reveal
            .auto_start()
            .then(|| self.reveal.initial_delay());

        loop {
            if let Wake::Stop = self.wait_for_start(delay).await {
                break;
            }
            if !self.run_once().await {
                break;
            }
            delay = self.reveal.retrigger_interval();
        }

        debug!("Reveal stopped");
    }

    /// Idle until the delay elapses, a trigger arrives, or shutdown
    async fn wait_for_start(&mut self, delay: Option<Duration>) -> Wake {
        let sleep = async {
            match delay {
                Some(delay) => time::sleep(delay).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = sleep => Wake::Start,
            command = self.commands.recv() => match command {
                Some(EffectCommand::Trigger) => Wake::Start,
                None => Wake::Stop,
            },
            _ = self.shutdown.changed() => Wake::Stop,
        }
    }

    /// Run until the reveal finishes. Returns false when the effect was torn down.
    async fn run_once(&mut self) -> bool {
        self.reveal.start();
        debug!("Reveal run started");
        let mut ticker = ticker(self.reveal.step_interval());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let frame = self.reveal.tick();
                    if !self.gate.emit(&mut self.sink, &frame) {
                        return false;
                    }
                    if frame.finished {
                        debug!("Reveal run finished");
                        return true;
                    }
                }
                command = self.commands.recv() => match command {
                    Some(EffectCommand::Trigger) => {
                        debug!(step = self.reveal.step_count(), "Reveal restarted mid-run");
                        self.reveal.start();
                        ticker.reset();
                    }
                    None => return false,
                },
                _ = self.shutdown.changed() => return false,
            }
        }
    }
}

struct CyclerDriver<S> {
    cycler: PeriodicCycler,
    sink: S,
    gate: Gate,
    commands: mpsc::UnboundedReceiver<EffectCommand>,
    shutdown: watch::Receiver<bool>,
}

impl<S: FrameSink<CycleFrame>> CyclerDriver<S> {
    async fn run(mut self) {
        info!(
            items = self.cycler.items().len(),
            interval_ms = self.cycler.interval().as_millis() as u64,
            "Cycler mounted"
        );

        let first = self.cycler.current();
        if !self.gate.emit(&mut self.sink, &first) {
            return;
        }

        let mut ticker = ticker(self.cycler.interval());
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let frame = self.cycler.tick();
                    if !self.gate.emit(&mut self.sink, &frame) {
                        break;
                    }
                }
                command = self.commands.recv() => {
                    // Nothing to restart; keep going until the handle goes away
                    if command.is_none() {
                        break;
                    }
                }
                _ = self.shutdown.changed() => break,
            }
        }

        debug!("Cycler stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::scheduler::ChannelSink;

    fn drain<F>(rx: &mut mpsc::UnboundedReceiver<F>) -> Vec<F> {
        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(frame);
        }
        frames
    }

    fn demo_reveal() -> ScrambleReveal {
        ScrambleReveal::builder("DEMO")
            .max_steps(10)
            .step_interval(Duration::from_millis(50))
            .seed(1)
            .build()
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycler_wraps_on_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cycler = PeriodicCycler::new(["A", "B", "C"], Duration::from_millis(1000)).unwrap();
        let handle = spawn_cycler(cycler, ChannelSink::new(tx));

        time::sleep(Duration::from_millis(3500)).await;
        handle.cancel();

        let texts: Vec<String> = drain(&mut rx).into_iter().map(|f| f.text).collect();
        assert_eq!(texts, ["A", "B", "C", "A"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_runs_once_and_converges() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_reveal(demo_reveal(), ChannelSink::new(tx));

        time::sleep(Duration::from_secs(2)).await;

        let frames = drain(&mut rx);
        assert_eq!(frames.len(), 11);
        assert_eq!(frames[9].text, "DEMO");
        let last = frames.last().unwrap();
        assert!(last.finished);
        assert_eq!(last.text, "DEMO");
        assert_eq!(frames.iter().filter(|f| f.finished).count(), 1);
        assert!(!handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_callbacks() {
        let seen = Arc::new(Mutex::new(Vec::<RevealFrame>::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |frame: &RevealFrame| seen.lock().unwrap().push(frame.clone())
        };
        let handle = spawn_reveal(demo_reveal(), sink);

        time::sleep(Duration::from_millis(175)).await;
        handle.cancel();
        assert!(handle.is_cancelled());
        let at_cancel = seen.lock().unwrap().len();
        assert!(at_cancel > 0);

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(seen.lock().unwrap().len(), at_cancel);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cycler = PeriodicCycler::new(["x", "y"], Duration::from_millis(100)).unwrap();
        let handle = spawn_cycler(cycler, ChannelSink::new(tx));

        time::sleep(Duration::from_millis(250)).await;
        drop(handle);
        let before = drain(&mut rx).len();
        assert_eq!(before, 3);

        time::sleep(Duration::from_secs(1)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrigger_interval_restarts() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reveal = ScrambleReveal::builder("DEMO")
            .max_steps(10)
            .step_interval(Duration::from_millis(50))
            .retrigger_interval(Some(Duration::from_secs(1)))
            .build()
            .unwrap();
        let _handle = spawn_reveal(reveal, ChannelSink::new(tx));

        // run (550ms), idle 1s, run (550ms), idle...
        time::sleep(Duration::from_millis(3000)).await;
        let finished = drain(&mut rx).iter().filter(|f| f.finished).count();
        assert_eq!(finished, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_trigger() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reveal = ScrambleReveal::builder("Get Started")
            .auto_start(false)
            .build()
            .unwrap();
        let handle = spawn_reveal(reveal, ChannelSink::new(tx));

        time::sleep(Duration::from_secs(2)).await;
        assert!(drain(&mut rx).is_empty());

        handle.trigger();
        time::sleep(Duration::from_secs(2)).await;
        let frames = drain(&mut rx);
        assert_eq!(frames.iter().filter(|f| f.finished).count(), 1);
        assert_eq!(frames.last().unwrap().text, "Get Started");
    }

    #[tokio::test(start_paused = true)]
    async fn test_instances_are_independent() {
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let a = spawn_cycler(
            PeriodicCycler::new(["1", "2"], Duration::from_millis(100)).unwrap(),
            ChannelSink::new(tx_a),
        );
        let b = spawn_cycler(
            PeriodicCycler::new(["a", "b"], Duration::from_millis(100)).unwrap(),
            ChannelSink::new(tx_b),
        );
        assert_ne!(a.id(), b.id());

        time::sleep(Duration::from_millis(150)).await;
        a.cancel();
        time::sleep(Duration::from_millis(300)).await;

        assert_eq!(drain(&mut rx_a).len(), 2);
        assert_eq!(drain(&mut rx_b).len(), 5);
    }
}
