//! Spindle: Thread-Backed Lazy Generators
//!
//! Pull-based sequence production: a producer routine emits values one at a
//! time to a consumer that drives progress explicitly. The producer runs on
//! its own worker thread; a lock and two condition signals enforce strict,
//! mutually-exclusive hand-off, so exactly one side executes at any instant.
//! The result is stackful-coroutine behavior on top of real threads, with no
//! buffering and no look-ahead.
//!
//! ```
//! use spindle::{emit, generator};
//!
//! generator! {
//!     /// Squares of `0..count`.
//!     Squares(gen, count: i64) -> i64 {
//!         for i in 0..count {
//!             emit!(gen, i * i);
//!         }
//!     }
//! }
//!
//! let mut cursor = Squares::begin(3);
//! assert_eq!(*cursor.value(), 0);
//! cursor.advance();
//! let rest: Vec<i64> = cursor.into_iter().collect();
//! assert_eq!(rest, vec![1, 4]);
//! ```
//!
//! Dropping the last cursor referencing a run cancels the producer at its
//! next yield point and joins the worker thread before returning. A producer
//! that never yields cannot be cancelled; dropping it blocks indefinitely.

pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod logging;

mod macros;

pub use config::EngineConfig;
pub use cursor::{Cursor, IntoIter};
pub use engine::{Control, Engine, Yielder};
pub use error::{ConfigError, EngineError};
