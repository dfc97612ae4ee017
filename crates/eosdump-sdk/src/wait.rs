//! Per-operation result slots and the busy-wait that blocks the script flow.
//!
//! One asynchronous operation is outstanding at a time: the flow registers a
//! continuation that writes the raw result code into a [`ResultSlot`], issues
//! the call, and spins until the tick thread's callback clears the sentinel.
//! The spin-poll deliberately uses no blocking primitive — simplicity over
//! efficiency for a short-lived, one-operation-at-a-time tool. There is no
//! timeout by default; [`WaitPolicy::deadline`] is an explicit opt-in.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::error::SdkError;
use crate::ffi::EosResult;

/// Sentinel for "callback has not fired". SDK result codes are non-negative,
/// so -1 can never collide with a real completion.
const RESULT_UNSET: i32 = -1;

/// How long a blocking operation may wait for its completion callback.
#[derive(Debug, Clone, Default)]
pub struct WaitPolicy {
    deadline: Option<Duration>,
}

impl WaitPolicy {
    /// Wait forever, matching the native SDK's own lack of a timeout.
    pub fn no_timeout() -> Self {
        Self::default()
    }

    /// Fail with [`SdkError::OperationTimedOut`] after `limit`.
    pub fn deadline(limit: Duration) -> Self {
        Self {
            deadline: Some(limit),
        }
    }
}

/// Write-once slot for one in-flight operation's result code.
pub struct ResultSlot {
    operation: &'static str,
    code: Arc<AtomicI32>,
}

impl ResultSlot {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            code: Arc::new(AtomicI32::new(RESULT_UNSET)),
        }
    }

    /// Handle for the completion callback to store the result through.
    pub fn completer(&self) -> SlotCompleter {
        SlotCompleter {
            code: Arc::clone(&self.code),
        }
    }

    /// Spin until the callback fires, then return the recorded code.
    pub fn wait(&self, policy: &WaitPolicy) -> Result<EosResult, SdkError> {
        let started = Instant::now();
        loop {
            let code = self.code.load(Ordering::Acquire);
            if code != RESULT_UNSET {
                return Ok(EosResult(code));
            }
            if let Some(limit) = policy.deadline {
                if started.elapsed() >= limit {
                    return Err(SdkError::OperationTimedOut {
                        operation: self.operation,
                    });
                }
            }
            std::thread::yield_now();
        }
    }
}

/// Completion-side handle to a [`ResultSlot`].
#[derive(Clone)]
pub struct SlotCompleter {
    code: Arc<AtomicI32>,
}

impl SlotCompleter {
    /// Record the operation's result; written once, read after set.
    pub fn complete(&self, result: EosResult) {
        self.code.store(result.raw(), Ordering::Release);
    }
}

/// Shared slot for auxiliary callback output (e.g. a continuance token) that
/// rides alongside the result code.
pub struct ValueSlot<V> {
    value: Arc<Mutex<Option<V>>>,
}

impl<V> ValueSlot<V> {
    pub fn new() -> Self {
        Self {
            value: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set(&self, value: V) {
        *self.value.lock() = Some(value);
    }

    pub fn take(&self) -> Option<V> {
        self.value.lock().take()
    }
}

impl<V> Default for ValueSlot<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for ValueSlot<V> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_returns_code_set_by_other_thread() {
        let slot = ResultSlot::new("test_op");
        let completer = slot.completer();

        let setter = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            completer.complete(EosResult(7));
        });

        let code = slot.wait(&WaitPolicy::no_timeout()).unwrap();
        assert_eq!(code, EosResult(7));
        setter.join().unwrap();
    }

    #[test]
    fn test_deadline_fires_when_nothing_completes() {
        let slot = ResultSlot::new("test_op");
        let err = slot
            .wait(&WaitPolicy::deadline(Duration::from_millis(10)))
            .unwrap_err();
        assert!(matches!(
            err,
            SdkError::OperationTimedOut { operation: "test_op" }
        ));
    }

    #[test]
    fn test_result_already_set_returns_immediately() {
        let slot = ResultSlot::new("test_op");
        slot.completer().complete(EosResult::SUCCESS);
        let code = slot
            .wait(&WaitPolicy::deadline(Duration::from_millis(1)))
            .unwrap();
        assert!(code.is_success());
    }

    #[test]
    fn test_value_slot_round_trip() {
        let slot: ValueSlot<&str> = ValueSlot::new();
        assert!(slot.take().is_none());
        slot.clone().set("token");
        assert_eq!(slot.take(), Some("token"));
        assert!(slot.take().is_none());
    }
}
