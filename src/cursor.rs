//! Consumer-facing cursor over a generator run
//!
//! A cursor is a reference-counted handle to an [`Engine`] plus a privately
//! cached copy of the last value it observed. Cloning a cursor shares the
//! engine and copies the cache; it does NOT fork the sequence. Advancing any
//! clone moves the shared engine forward for every clone, while each clone's
//! cache only changes when that clone itself advances.
//!
//! Aliased cursors are meant to be advanced from one thread at a time; the
//! engine serializes each individual hand-off but does not arbitrate between
//! consumers racing to advance.

use crate::config::EngineConfig;
use crate::engine::{Engine, Yielder};
use crate::error::EngineError;
use std::fmt;
use std::sync::Arc;

/// Pull-based handle over one generator run.
///
/// A cursor is always positioned at a value, or at the canonical end state
/// (no engine reference). Construction performs the first hand-off, so a
/// fresh cursor is immediately either at the first value or at end.
pub struct Cursor<Out> {
    engine: Option<Arc<Engine<Out>>>,
    cached: Option<Out>,
}

impl<Out: Send + 'static> Cursor<Out> {
    /// Spawn a new producer run and return a cursor positioned at its first
    /// value, or at end if the routine yields nothing.
    ///
    /// # Panics
    ///
    /// Panics if the worker thread cannot be spawned. Use
    /// [`Cursor::try_spawn`] to recover from spawn failure instead, the same
    /// split `std::thread` offers between `spawn` and `Builder::spawn`.
    pub fn spawn<In, F>(producer: F, input: In) -> Self
    where
        F: FnOnce(&Yielder<Out>, In) + Send + 'static,
        In: Send + 'static,
    {
        Self::try_spawn(producer, input).expect("Failed to spawn generator worker thread")
    }

    /// Fallible variant of [`Cursor::spawn`] using the default engine
    /// configuration.
    pub fn try_spawn<In, F>(producer: F, input: In) -> Result<Self, EngineError>
    where
        F: FnOnce(&Yielder<Out>, In) + Send + 'static,
        In: Send + 'static,
    {
        Self::try_spawn_with(&EngineConfig::default(), producer, input)
    }

    /// Spawn with explicit worker thread configuration.
    pub fn try_spawn_with<In, F>(
        config: &EngineConfig,
        producer: F,
        input: In,
    ) -> Result<Self, EngineError>
    where
        F: FnOnce(&Yielder<Out>, In) + Send + 'static,
        In: Send + 'static,
    {
        let engine = Engine::spawn(config, producer, input)?;
        let mut cursor = Self {
            engine: Some(Arc::new(engine)),
            cached: None,
        };
        // First hand-off: either caches the first value or discovers
        // immediate exhaustion and collapses to the end state.
        cursor.advance();
        Ok(cursor)
    }
}

impl<Out> Cursor<Out> {
    /// The canonical end cursor: no engine, no value. All end cursors of the
    /// same output type compare equal.
    pub fn end() -> Self {
        Self {
            engine: None,
            cached: None,
        }
    }

    /// Whether this cursor is in the end state.
    pub fn is_end(&self) -> bool {
        self.engine.is_none()
    }

    /// The cached value, or `None` at end. Pure read, repeatable.
    pub fn get(&self) -> Option<&Out> {
        self.cached.as_ref()
    }

    /// The cached value.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is in the end state. Check [`Cursor::is_end`] or
    /// use [`Cursor::get`] first.
    #[track_caller]
    pub fn value(&self) -> &Out {
        match self.cached.as_ref() {
            Some(value) => value,
            None => panic!("value() called on an end cursor"),
        }
    }

    /// Advance to the next value. One engine hand-off; on exhaustion the
    /// engine reference is released and the cursor becomes the end state.
    /// A no-op on a cursor already at end.
    pub fn advance(&mut self) {
        let Some(engine) = &self.engine else {
            return;
        };
        match engine.resume() {
            Some(value) => self.cached = Some(value),
            None => {
                self.engine = None;
                self.cached = None;
            }
        }
    }

    /// Advance, returning a snapshot positioned at the pre-advance value.
    ///
    /// The snapshot shares the engine with `self`, so it compares equal to
    /// any clone taken before the advance, and unequal to `self` afterwards.
    pub fn step(&mut self) -> Self
    where
        Out: Clone,
    {
        let before = self.clone();
        self.advance();
        before
    }
}

impl<Out: Clone> Clone for Cursor<Out> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            cached: self.cached.clone(),
        }
    }
}

/// Equality is engine identity plus cached value: two cursors are equal iff
/// they reference the same engine instance and hold equal cached values, or
/// are both at end. Independently spawned runs over identical sequences are
/// never equal.
impl<Out: PartialEq> PartialEq for Cursor<Out> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.engine, &other.engine) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) && self.cached == other.cached,
            _ => false,
        }
    }
}

impl<Out: Eq> Eq for Cursor<Out> {}

impl<Out: fmt::Debug> fmt::Debug for Cursor<Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("at_end", &self.is_end())
            .field("cached", &self.cached)
            .finish()
    }
}

/// Draining iterator over the remaining values of a cursor.
pub struct IntoIter<Out> {
    cursor: Cursor<Out>,
}

impl<Out> Iterator for IntoIter<Out> {
    type Item = Out;

    fn next(&mut self) -> Option<Out> {
        let value = self.cursor.cached.take()?;
        if let Some(engine) = &self.cursor.engine {
            match engine.resume() {
                Some(next) => self.cursor.cached = Some(next),
                None => self.cursor.engine = None,
            }
        }
        Some(value)
    }
}

impl<Out> IntoIterator for Cursor<Out> {
    type Item = Out;
    type IntoIter = IntoIter<Out>;

    fn into_iter(self) -> IntoIter<Out> {
        IntoIter { cursor: self }
    }
}
