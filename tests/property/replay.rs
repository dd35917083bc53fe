//! Property-based tests for ordering guarantees
//!
//! A producer that replays an arbitrary vector must hand back exactly that
//! vector in order, regardless of whether the consumer drains the run or
//! abandons it part-way.

use proptest::prelude::*;
use spindle::{Cursor, Yielder};

fn replay_cursor(values: Vec<i32>) -> Cursor<i32> {
    Cursor::try_spawn(
        |gen: &Yielder<i32>, input: Vec<i32>| {
            for value in input {
                if gen.emit(value).is_stop() {
                    return;
                }
            }
        },
        values,
    )
    .unwrap()
}

/// Draining a replay producer returns exactly the input sequence
#[test]
fn test_replay_roundtrip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(any::<i32>(), 0..64), |values| {
            let collected: Vec<i32> = replay_cursor(values.clone()).into_iter().collect();
            assert_eq!(collected, values);
            Ok(())
        })
        .unwrap();
}

/// Abandoning a run after k values observes exactly the k-prefix, and the
/// worker is still reclaimed
#[test]
fn test_prefix_consumption_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(any::<i32>(), 1..64), any::<usize>()),
            |(values, raw_take)| {
                let take = raw_take % values.len();
                let mut cursor = replay_cursor(values.clone());

                let mut observed = Vec::new();
                for _ in 0..take {
                    observed.push(*cursor.value());
                    cursor.advance();
                }

                assert_eq!(observed, values[..take].to_vec());
                Ok(())
            },
        )
        .unwrap();
}
