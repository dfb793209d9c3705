use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use super::sink::FrameSink;

/// Which effect a handle drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Reveal,
    Cycler,
}

/// Commands sent from a handle to its timer task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EffectCommand {
    /// Start a new run now, abandoning any run in progress
    Trigger,
}

/// Emission gate shared by a handle and its task
///
/// The task emits frames while holding the lock; `close()` takes the same
/// lock. Once `close()` returns no further frame can reach the sink.
#[derive(Debug, Clone)]
pub(crate) struct Gate {
    open: Arc<Mutex<bool>>,
}

impl Gate {
    pub(crate) fn new() -> Self {
        Self {
            open: Arc::new(Mutex::new(true)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        // A panicking sink poisons the lock; the flag itself is still valid
        self.open.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Emit through the gate. Returns false once the gate has closed.
    pub(crate) fn emit<F, S: FrameSink<F>>(&self, sink: &mut S, frame: &F) -> bool {
        let open = self.lock();
        if *open {
            sink.emit(frame);
        }
        *open
    }

    pub(crate) fn close(&self) {
        *self.lock() = false;
    }

    pub(crate) fn is_open(&self) -> bool {
        *self.lock()
    }
}

/// Owner of one running effect instance
///
/// Dropping the handle cancels the effect.
#[derive(Debug)]
pub struct EffectHandle {
    id: Uuid,
    kind: EffectKind,
    gate: Gate,
    shutdown: watch::Sender<bool>,
    commands: mpsc::UnboundedSender<EffectCommand>,
    task: JoinHandle<()>,
}

impl EffectHandle {
    pub(crate) fn new(
        id: Uuid,
        kind: EffectKind,
        gate: Gate,
        shutdown: watch::Sender<bool>,
        commands: mpsc::UnboundedSender<EffectCommand>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            id,
            kind,
            gate,
            shutdown,
            commands,
            task,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    /// Restart a reveal run immediately. Cyclers ignore triggers.
    pub fn trigger(&self) {
        if self.is_cancelled() {
            return;
        }
        if self.commands.send(EffectCommand::Trigger).is_err() {
            debug!(effect = %self.id, "Trigger ignored: effect task has exited");
        }
    }

    /// Stop the effect. No frame is emitted after this returns.
    pub fn cancel(&self) {
        if !self.gate.is_open() {
            return;
        }
        self.gate.close();
        let _ = self.shutdown.send(true);
        debug!(effect = %self.id, kind = ?self.kind, "Effect cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        !self.gate.is_open()
    }

    /// Whether the timer task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for EffectHandle {
    fn drop(&mut self) {
        self.cancel();
        self.task.abort();
    }
}
