//! Integration tests for engine lifecycle
//!
//! Tests cover:
//! - Worker cleanup when the last cursor is dropped mid-sequence
//! - Cooperative cancellation observed at the yield point
//! - Panic propagation from the producer to the consumer
//! - Worker thread configuration

use spindle::{Cursor, EngineConfig, EngineError, Yielder};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Resource-accounting guard: counts live producer bodies.
struct WorkerGuard {
    live: Arc<AtomicUsize>,
}

impl WorkerGuard {
    fn new(live: &Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self {
            live: Arc::clone(live),
        }
    }
}

impl Drop for WorkerGuard {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[test]
fn test_no_leaked_workers_across_cycles() {
    let live = Arc::new(AtomicUsize::new(0));

    for _ in 0..16 {
        let cursor = Cursor::try_spawn(
            {
                let live = Arc::clone(&live);
                move |gen: &Yielder<u64>, _input: ()| {
                    let _guard = WorkerGuard::new(&live);
                    let mut i = 0u64;
                    loop {
                        if gen.emit(i).is_stop() {
                            return;
                        }
                        i += 1;
                    }
                }
            },
            (),
        )
        .unwrap();

        assert_eq!(*cursor.value(), 0);
        assert_eq!(live.load(Ordering::SeqCst), 1);

        // Dropping the last cursor cancels the run and joins the worker
        // before returning, so the guard must already be released here.
        drop(cursor);
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }
}

#[test]
fn test_cancellation_observed_at_yield_point() {
    let stopped = Arc::new(AtomicBool::new(false));

    let mut cursor = Cursor::try_spawn(
        {
            let stopped = Arc::clone(&stopped);
            move |gen: &Yielder<i32>, _input: ()| {
                let mut i = 0;
                loop {
                    if gen.emit(i).is_stop() {
                        stopped.store(true, Ordering::SeqCst);
                        return;
                    }
                    i += 1;
                }
            }
        },
        (),
    )
    .unwrap();

    assert_eq!(*cursor.value(), 0);
    cursor.advance();
    assert_eq!(*cursor.value(), 1);

    drop(cursor);
    assert!(stopped.load(Ordering::SeqCst));
}

#[test]
fn test_drop_immediately_after_spawn() {
    let cursor = Cursor::spawn(
        |gen: &Yielder<u64>, _input: ()| {
            let mut i = 0u64;
            loop {
                if gen.emit(i).is_stop() {
                    return;
                }
                i += 1;
            }
        },
        (),
    );
    drop(cursor);
}

#[test]
fn test_empty_closure_producer_is_end() {
    let cursor = Cursor::try_spawn(|_gen: &Yielder<i32>, _input: ()| {}, ()).unwrap();
    assert!(cursor.is_end());
}

#[test]
fn test_panic_propagates_on_advance() {
    let mut cursor = Cursor::try_spawn(
        |gen: &Yielder<i32>, _input: ()| {
            if gen.emit(1).is_stop() {
                return;
            }
            panic!("producer exploded");
        },
        (),
    )
    .unwrap();

    assert_eq!(*cursor.value(), 1);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cursor.advance()));
    let payload = result.unwrap_err();
    let message = payload.downcast_ref::<&str>().unwrap();
    assert!(message.contains("producer exploded"));
}

#[test]
fn test_panic_before_first_value_propagates_at_spawn() {
    let result = std::panic::catch_unwind(|| {
        Cursor::try_spawn(
            |_gen: &Yielder<i32>, _input: ()| panic!("immediate failure"),
            (),
        )
    });
    assert!(result.is_err());
}

#[test]
fn test_worker_thread_uses_configured_name() {
    let config = EngineConfig {
        thread_name: "squares-worker".to_string(),
        stack_size: Some(256 * 1024),
    };

    let cursor = Cursor::try_spawn_with(
        &config,
        |gen: &Yielder<String>, _input: ()| {
            let name = std::thread::current()
                .name()
                .unwrap_or_default()
                .to_string();
            let _ = gen.emit(name);
        },
        (),
    )
    .unwrap();

    assert!(cursor.value().starts_with("squares-worker-"));
}

#[test]
fn test_invalid_config_surfaces_error() {
    let config = EngineConfig {
        thread_name: String::new(),
        stack_size: None,
    };

    let result = Cursor::try_spawn_with(&config, |_gen: &Yielder<i32>, _input: ()| {}, ());
    assert!(matches!(result, Err(EngineError::Config(_))));
}
