use tokio::sync::mpsc;
use tracing::warn;

/// Consumer of frames produced by a running effect
///
/// Called from the effect's timer task. Implementations must not block and
/// must not cancel their own effect from inside `emit`.
pub trait FrameSink<F>: Send {
    fn emit(&mut self, frame: &F);
}

impl<F, T> FrameSink<F> for T
where
    T: FnMut(&F) + Send,
{
    fn emit(&mut self, frame: &F) {
        self(frame)
    }
}

/// Channel-backed sink; the receiving end is usually a UI loop
pub struct ChannelSink<F> {
    tx: mpsc::UnboundedSender<F>,
    closed: bool,
}

impl<F> ChannelSink<F> {
    pub fn new(tx: mpsc::UnboundedSender<F>) -> Self {
        Self { tx, closed: false }
    }
}

impl<F: Clone + Send> FrameSink<F> for ChannelSink<F> {
    fn emit(&mut self, frame: &F) {
        if self.tx.send(frame.clone()).is_err() && !self.closed {
            warn!("Failed to send frame: receiver dropped");
            self.closed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all<S: FrameSink<u32>>(sink: &mut S, frames: &[u32]) {
        for frame in frames {
            sink.emit(frame);
        }
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        push_all(&mut |frame: &u32| seen.push(*frame), &[1, 2]);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel::<u32>();
        let mut sink = ChannelSink::new(tx);
        push_all(&mut sink, &[1]);
        drop(rx);
        push_all(&mut sink, &[2, 3]);
        assert!(sink.closed);
    }
}
