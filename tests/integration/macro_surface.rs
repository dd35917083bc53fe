//! Integration tests for the generator declaration macros

use spindle::{emit, generator};

mod shapes {
    spindle::generator! {
        /// Natural numbers below `limit`.
        pub(crate) Naturals(gen, limit: u32) -> u32 {
            for i in 0..limit {
                spindle::emit!(gen, i);
            }
        }
    }
}

generator! {
    /// Yields the first even value, then stops.
    FirstEven(gen, values: Vec<i32>) -> i32 {
        for v in values {
            if v % 2 == 0 {
                emit!(gen, v);
                return;
            }
        }
    }
}

generator! {
    /// Trailing-comma yield.
    Single(gen, value: i32) -> i32 {
        emit!(gen, value,);
    }
}

#[test]
fn test_generator_in_nested_module_with_visibility() {
    let collected: Vec<u32> = shapes::Naturals::begin(3).into_iter().collect();
    assert_eq!(collected, vec![0, 1, 2]);
    assert_eq!(shapes::Naturals::begin(0), shapes::Naturals::end());
}

#[test]
fn test_body_may_return_early() {
    let mut cursor = FirstEven::begin(vec![1, 3, 4, 5, 6]);
    assert_eq!(*cursor.value(), 4);
    cursor.advance();
    assert_eq!(cursor, FirstEven::end());
}

#[test]
fn test_body_without_matches_is_empty() {
    assert_eq!(FirstEven::begin(vec![1, 3, 5]), FirstEven::end());
}

#[test]
fn test_trailing_comma_in_emit() {
    let collected: Vec<i32> = Single::begin(7).into_iter().collect();
    assert_eq!(collected, vec![7]);
}
