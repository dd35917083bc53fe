//! Synchronization Engine
//!
//! One worker thread per generator run. The engine owns the thread and a
//! shared channel implementing the hand-off protocol; it has no knowledge of
//! cursors. Dropping the engine cancels the producer cooperatively and joins
//! the worker before returning.
//!
//! Cancellation is advisory, never preemptive: a producer that never reaches
//! a yield point cannot be interrupted, and dropping its engine blocks until
//! the producer's next yield or return. That is a caller obligation.

use crate::config::EngineConfig;
use crate::error::EngineError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, trace, warn};

mod channel;

use channel::Channel;

/// Continue/stop signal returned from every suspension point.
///
/// `Stop` means the run has been cancelled and the producer routine must
/// return immediately, abandoning all remaining work.
#[must_use = "a Stop signal obligates the producer to return immediately"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Stop,
}

impl Control {
    pub fn is_continue(self) -> bool {
        matches!(self, Control::Continue)
    }

    pub fn is_stop(self) -> bool {
        matches!(self, Control::Stop)
    }
}

/// Producer-facing handle passed into every generator routine.
///
/// [`Yielder::emit`] is the single suspension point: it publishes one value,
/// blocks until the consumer asks for the next one, and reports whether the
/// run has been cancelled in the meantime.
pub struct Yielder<Out> {
    channel: Arc<Channel<Out>>,
    engine_id: u64,
}

impl<Out> Yielder<Out> {
    /// Publish one value and suspend until resumed or cancelled.
    pub fn emit(&self, value: Out) -> Control {
        trace!(engine_id = self.engine_id, "Publishing value");
        if self.channel.publish(value) {
            Control::Continue
        } else {
            trace!(engine_id = self.engine_id, "Cancellation observed at yield point");
            Control::Stop
        }
    }
}

/// Per-run synchronization object coordinating one producer worker with its
/// consumers.
///
/// The producer routine and its input are moved into the worker at spawn
/// time and the routine is invoked exactly once. The engine is usually
/// driven through [`Cursor`](crate::Cursor) rather than directly.
pub struct Engine<Out> {
    channel: Arc<Channel<Out>>,
    worker: Option<JoinHandle<()>>,
    id: u64,
}

fn next_engine_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

impl<Out: Send + 'static> Engine<Out> {
    /// Spawn the worker thread for one producer run.
    ///
    /// The worker begins executing `producer` immediately; callers are
    /// expected to follow up with [`Engine::resume`] to perform the first
    /// hand-off.
    pub fn spawn<In, F>(config: &EngineConfig, producer: F, input: In) -> Result<Self, EngineError>
    where
        F: FnOnce(&Yielder<Out>, In) + Send + 'static,
        In: Send + 'static,
    {
        config.validate()?;

        let id = next_engine_id();
        let channel = Arc::new(Channel::new());
        let worker_channel = Arc::clone(&channel);

        let mut builder =
            std::thread::Builder::new().name(format!("{}-{}", config.thread_name, id));
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let worker = builder.spawn(move || {
            debug!(engine_id = id, "Producer routine started");
            let yielder = Yielder {
                channel: Arc::clone(&worker_channel),
                engine_id: id,
            };
            // The channel re-synchronizes via abort(); unwinding cannot leave
            // its lock state corrupt.
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| producer(&yielder, input)));
            match outcome {
                Ok(()) => {
                    worker_channel.finish();
                    debug!(engine_id = id, "Producer routine finished");
                }
                Err(payload) => {
                    warn!(engine_id = id, "Producer routine panicked");
                    worker_channel.abort(payload);
                }
            }
        })?;

        debug!(engine_id = id, "Spawned generator worker");

        Ok(Self {
            channel,
            worker: Some(worker),
            id,
        })
    }
}

impl<Out> Engine<Out> {
    /// Hand the turn to the producer and block until it publishes the next
    /// value or the run ends.
    ///
    /// Returns `None` once the producer has finished; every subsequent call
    /// keeps returning `None`. A panic raised inside the producer routine is
    /// re-raised here, on the calling thread.
    pub fn resume(&self) -> Option<Out> {
        trace!(engine_id = self.id, "Resuming producer");
        self.channel.resume()
    }

    /// Whether the run has reached a terminal state. Finished and cancelled
    /// runs are indistinguishable: both present as "no more values".
    pub fn is_finished(&self) -> bool {
        self.channel.is_finished()
    }
}

impl<Out> Drop for Engine<Out> {
    fn drop(&mut self) {
        self.channel.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            debug!(engine_id = self.id, "Generator worker joined");
        }
    }
}

impl<Out> fmt::Debug for Engine<Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("id", &self.id)
            .field("finished", &self.is_finished())
            .finish()
    }
}
