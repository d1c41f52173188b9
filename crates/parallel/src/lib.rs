//! Declarative parallel/sequential execution utilities.
//!
//! Indicator families are pure functions over an immutable series, and the
//! indicator and forecast pipelines share nothing mutable. Both can fan out
//! across threads. The `cfg` logic for that lives here in ONE place so call
//! sites stay identical whether or not the `parallel` feature is enabled.
//!
//! # Runtime Override
//!
//! Every helper accepts a `force_sequential` flag. When `true`, work runs on
//! the calling thread even if the `parallel` feature is enabled, which keeps
//! profiling and debugging straightforward.
//!
//! # Example
//!
//! ```
//! let squares = parallel::map_slice(&[1, 2, 3], |x| x * x, false);
//! assert_eq!(squares, vec![1, 4, 9]);
//!
//! let (a, b) = parallel::join(|| 1 + 1, || "two", false);
//! assert_eq!((a, b), (2, "two"));
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Map a function over a slice, potentially in parallel.
///
/// Returns results in input order (rayon's indexed collect preserves it).
#[inline]
pub fn map_slice<T, F, R>(slice: &[T], f: F, force_sequential: bool) -> Vec<R>
where
    T: Sync,
    F: Fn(&T) -> R + Sync + Send,
    R: Send,
{
    #[cfg(feature = "parallel")]
    {
        if force_sequential {
            slice.iter().map(f).collect()
        } else {
            slice.par_iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = force_sequential;
        slice.iter().map(f).collect()
    }
}

/// Run two independent closures, potentially on two threads.
///
/// Without the `parallel` feature (or with `force_sequential`), `a` runs
/// to completion before `b` starts.
#[inline]
pub fn join<A, B, RA, RB>(a: A, b: B, force_sequential: bool) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        if force_sequential {
            (a(), b())
        } else {
            rayon::join(a, b)
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = force_sequential;
        (a(), b())
    }
}

/// Whether helpers in this crate can actually run on multiple threads.
pub const fn is_parallel_enabled() -> bool {
    cfg!(feature = "parallel")
}
