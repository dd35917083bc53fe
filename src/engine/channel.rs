//! Producer/consumer hand-off protocol
//!
//! A single lock and two condition signals serialize the producer and the
//! consumer so that at most one side runs non-synchronization code at any
//! instant. The slot is filled exactly once per `publish` and drained exactly
//! once per `resume`, so values are never skipped or duplicated.

use parking_lot::{Condvar, Mutex};
use std::any::Any;

type PanicPayload = Box<dyn Any + Send + 'static>;

/// Protocol state, guarded by the channel lock.
struct State<Out> {
    /// Most recently published value, drained by the consumer
    slot: Option<Out>,
    /// Continuation flag; terminal once false
    alive: bool,
    /// One-shot permit granted by `resume` and consumed by `publish`
    resumed: bool,
    /// Whether the construction-time resume has already happened
    started: bool,
    /// Captured producer panic, re-raised on the consumer thread
    panicked: Option<PanicPayload>,
}

/// Shared hand-off state between one producer worker and its consumers.
pub(crate) struct Channel<Out> {
    state: Mutex<State<Out>>,
    producer_turn: Condvar,
    consumer_turn: Condvar,
}

impl<Out> Channel<Out> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                slot: None,
                alive: true,
                resumed: false,
                started: false,
                panicked: None,
            }),
            producer_turn: Condvar::new(),
            consumer_turn: Condvar::new(),
        }
    }

    /// Consumer side: hand the turn to the producer and block until the next
    /// value is published or the run ends.
    ///
    /// Returns `None` once the producer has finished. A captured producer
    /// panic is re-raised here, on the consumer thread.
    ///
    /// The construction-time call only waits for the first value; the
    /// producer's initial run does not need a permit. Every later call grants
    /// exactly one permit before waiting.
    pub(crate) fn resume(&self) -> Option<Out> {
        let mut state = self.state.lock();

        if !state.alive && state.slot.is_none() && state.panicked.is_none() {
            return None;
        }

        if state.started {
            state.resumed = true;
            self.producer_turn.notify_one();
        } else {
            state.started = true;
        }

        while state.slot.is_none() && state.alive && state.panicked.is_none() {
            self.consumer_turn.wait(&mut state);
        }

        if let Some(payload) = state.panicked.take() {
            drop(state);
            std::panic::resume_unwind(payload);
        }

        state.slot.take()
    }

    /// Producer side: publish one value and block until resumed or cancelled.
    ///
    /// Returns the continuation flag; `false` obligates the producer to
    /// unwind immediately instead of continuing its loop.
    pub(crate) fn publish(&self, value: Out) -> bool {
        let mut state = self.state.lock();

        state.slot = Some(value);
        self.consumer_turn.notify_one();

        while !state.resumed && state.alive {
            self.producer_turn.wait(&mut state);
        }

        state.resumed = false;
        state.alive
    }

    /// Producer side, once, on normal return: mark the run finished and wake
    /// the consumer. Never blocks.
    pub(crate) fn finish(&self) {
        let mut state = self.state.lock();
        state.alive = false;
        self.consumer_turn.notify_one();
    }

    /// Worker side, on producer panic: mark the run finished and stash the
    /// payload for the next `resume`. Never blocks.
    pub(crate) fn abort(&self, payload: PanicPayload) {
        let mut state = self.state.lock();
        state.alive = false;
        state.panicked = Some(payload);
        self.consumer_turn.notify_one();
    }

    /// Consumer side: request cooperative cancellation. Idempotent, never
    /// blocks. A producer blocked in `publish` wakes and observes `false`;
    /// a producer between yield points observes it at its next `publish`.
    pub(crate) fn cancel(&self) {
        let mut state = self.state.lock();
        state.alive = false;
        self.producer_turn.notify_one();
    }

    /// Whether the run has reached a terminal state (finished or cancelled;
    /// the two are indistinguishable from the outside).
    pub(crate) fn is_finished(&self) -> bool {
        !self.state.lock().alive
    }
}
