//! Generator Declaration Macros
//!
//! [`generator!`] declares a named generator type with `begin`/`end`
//! factories around a producer routine body; [`emit!`] is the yield
//! statement used inside that body. Neither adds behavior beyond wiring the
//! body into [`Cursor::spawn`](crate::Cursor::spawn); the macro layer is
//! convenience only.

/// Declare a named generator.
///
/// Expands to a unit struct with two factories:
/// `begin(input) -> Cursor<Out>`, which spawns a fresh producer run
/// positioned at its first value (or at end if the body yields nothing),
/// and `end() -> Cursor<Out>`, the canonical exhausted cursor.
///
/// The first binding names the [`Yielder`](crate::Yielder) handle visible to
/// the body; the second names the input parameter.
///
/// ```
/// spindle::generator! {
///     /// Squares of `0..count`.
///     Squares(gen, count: i64) -> i64 {
///         for i in 0..count {
///             spindle::emit!(gen, i * i);
///         }
///     }
/// }
///
/// let squares: Vec<i64> = Squares::begin(4).into_iter().collect();
/// assert_eq!(squares, vec![0, 1, 4, 9]);
/// assert_eq!(Squares::begin(0), Squares::end());
/// ```
#[macro_export]
macro_rules! generator {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident ( $yielder:ident, $input:ident : $in_ty:ty ) -> $out_ty:ty
        $body:block
    ) => {
        $(#[$meta])*
        $vis struct $name;

        impl $name {
            /// Spawn a fresh producer run bound to the given input,
            /// positioned at the first value (or at end if the routine
            /// yields nothing).
            $vis fn begin($input: $in_ty) -> $crate::Cursor<$out_ty> {
                $crate::Cursor::spawn(Self::produce, $input)
            }

            /// The canonical end cursor for this generator's output type.
            $vis fn end() -> $crate::Cursor<$out_ty> {
                $crate::Cursor::end()
            }

            fn produce($yielder: &$crate::Yielder<$out_ty>, $input: $in_ty) $body
        }
    };
}

/// Yield one value from inside a generator body.
///
/// Publishes the value through the named [`Yielder`](crate::Yielder) and
/// returns from the enclosing routine immediately if the run has been
/// cancelled in the meantime.
#[macro_export]
macro_rules! emit {
    ($yielder:expr, $value:expr $(,)?) => {
        if $yielder.emit($value).is_stop() {
            return;
        }
    };
}
