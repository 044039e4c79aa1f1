//! An immutable sequence that is known, from the moment it is built, to hold at
//! least one element.
//!
//! Operations that would be partial on a `Vec` (`first`, seedless `reduce`) are
//! total on [`NonEmptySeq`], and every transformation that provably keeps the
//! length above zero hands the guarantee straight through without re-checking.

#[macro_use]
extern crate tracing;

mod effect;
mod non_empty_seq;

pub use non_empty_seq::{EmptyError, NonEmptySeq};

///builds a [`NonEmptySeq`] from a literal list of elements, or from
///`ne_seq![elem; n]` repeat syntax.
///
///the empty forms do not compile:
///```compile_fail
///let nope: non_empty_seq::NonEmptySeq<i32> = non_empty_seq::ne_seq![];
///```
///```compile_fail
///let nope = non_empty_seq::ne_seq![1; 0];
///```
///a repeat count that is an expression only gets checked at runtime:
///```should_panic
///let n = 0;
///let nope = non_empty_seq::ne_seq![1; n];
///```
#[macro_export]
macro_rules! ne_seq {
    () => {
        ::std::compile_error!("a NonEmptySeq needs at least one element")
    };
    ($head:expr $(, $rest:expr)* $(,)?) => {
        $crate::NonEmptySeq::of($head, [$($rest),*])
    };
    ($elem:expr; 0) => {
        $crate::ne_seq![]
    };
    ($elem:expr; $n:literal) => {{
        //rejects a zero count while the length is still visible to the compiler
        const _ASSERT_NON_ZERO: [(); $n - 1] = [(); $n - 1];
        $crate::NonEmptySeq::from_vec(::std::vec![$elem; $n])
            .expect("a NonEmptySeq needs at least one element")
    }};
    ($elem:expr; $n:expr) => {
        $crate::NonEmptySeq::from_vec(::std::vec![$elem; $n])
            .expect("a NonEmptySeq needs at least one element")
    };
}
