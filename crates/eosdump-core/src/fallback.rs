//! Descending ABI version-fallback ladder.
//!
//! Several SDK operations take a request struct tagged with an integer ABI
//! version. A deployed module may predate the newest version the binding
//! knows about, in which case the call reports a version-incompatible result.
//! The ladder retries the operation with `version - 1` until a version is
//! accepted or version 1 has been tried and rejected.
//!
//! The loop is iterative on purpose: attempt order and termination are
//! identical to a recursive formulation, without the recursion depth.

/// Outcome of a single attempt at one ABI version.
#[derive(Debug)]
pub enum FallbackStep<T, E> {
    /// The call was accepted; fallback terminates with this value.
    Done(T),
    /// The native layer rejected this ABI version specifically.
    Incompatible,
    /// The call failed for a reason unrelated to versioning; terminal.
    Fail(E),
}

/// Successful fallback outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackSuccess<T> {
    /// Value produced by the accepted attempt.
    pub value: T,
    /// ABI version that was actually accepted.
    pub version: i32,
    /// Total attempts made, including the successful one.
    pub attempts: u32,
}

/// Terminal fallback failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackError<E> {
    /// Every version down to 1 reported version-incompatible.
    Exhausted {
        /// Total attempts made.
        attempts: u32,
    },
    /// An attempt failed for a non-version reason; no further versions are
    /// tried.
    Failed(E),
}

/// Run `attempt` starting at `newest`, decrementing by exactly one per
/// version-incompatible result.
///
/// The closure is re-invoked for every attempt, so request options derived
/// from cheap local getters are rebuilt per attempt. Completed upstream
/// operations are the caller's state and are never replayed.
///
/// `newest` below 1 is clamped to a single attempt at version 1.
pub fn run_with_fallback<T, E, F>(
    newest: i32,
    mut attempt: F,
) -> Result<FallbackSuccess<T>, FallbackError<E>>
where
    F: FnMut(i32) -> FallbackStep<T, E>,
{
    let mut version = newest.max(1);
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match attempt(version) {
            FallbackStep::Done(value) => {
                return Ok(FallbackSuccess {
                    value,
                    version,
                    attempts,
                });
            }
            FallbackStep::Incompatible if version > 1 => {
                version -= 1;
            }
            FallbackStep::Incompatible => {
                return Err(FallbackError::Exhausted { attempts });
            }
            FallbackStep::Fail(err) => {
                return Err(FallbackError::Failed(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_version_accepted() {
        let result = run_with_fallback::<_, (), _>(3, |v| FallbackStep::Done(v * 10));
        assert_eq!(
            result,
            Ok(FallbackSuccess {
                value: 30,
                version: 3,
                attempts: 1,
            })
        );
    }

    #[test]
    fn test_falls_back_to_oldest_version() {
        // Backend only understands version 1: two retries, reports the
        // version actually used.
        let mut tried = Vec::new();
        let result = run_with_fallback::<_, (), _>(3, |v| {
            tried.push(v);
            if v == 1 {
                FallbackStep::Done("ok")
            } else {
                FallbackStep::Incompatible
            }
        });

        assert_eq!(tried, [3, 2, 1]);
        assert_eq!(
            result,
            Ok(FallbackSuccess {
                value: "ok",
                version: 1,
                attempts: 3,
            })
        );
    }

    #[test]
    fn test_exhaustion_after_version_one() {
        let mut tried = Vec::new();
        let result = run_with_fallback::<(), (), _>(2, |v| {
            tried.push(v);
            FallbackStep::Incompatible
        });

        // Exactly two attempts, no recursion past version 1.
        assert_eq!(tried, [2, 1]);
        assert_eq!(result, Err(FallbackError::Exhausted { attempts: 2 }));
    }

    #[test]
    fn test_non_version_failure_is_terminal() {
        let mut tried = Vec::new();
        let result = run_with_fallback::<(), &str, _>(4, |v| {
            tried.push(v);
            if v == 3 {
                FallbackStep::Fail("access denied")
            } else {
                FallbackStep::Incompatible
            }
        });

        assert_eq!(tried, [4, 3]);
        assert_eq!(result, Err(FallbackError::Failed("access denied")));
    }

    #[test]
    fn test_newest_below_one_clamps_to_single_attempt() {
        let mut attempts = 0;
        let result = run_with_fallback::<(), (), _>(0, |v| {
            attempts += 1;
            assert_eq!(v, 1);
            FallbackStep::Incompatible
        });

        assert_eq!(attempts, 1);
        assert_eq!(result, Err(FallbackError::Exhausted { attempts: 1 }));
    }
}
