//! One-shot callback shim.
//!
//! The native asynchronous API takes an opaque `client_data` pointer and a
//! plain C function to call on completion. [`ArmedCallback`] packages an
//! owned Rust closure into that shape: the closure is boxed, the box leaks
//! into `client_data`, and a monomorphized [`trampoline`] is handed to the
//! native side.
//!
//! Exactly-once guarantee: the trampoline atomically swaps the payload's
//! embedded `client_data` field to null *before* reconstituting the box, so
//! a duplicate firing — even a concurrent one from a misbehaving native
//! layer — observes null and returns. A registration that was never handed
//! to the native layer reclaims its storage on drop, so the continuation
//! runs zero or exactly one time and never leaks.

use std::ffi::c_void;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crate::ffi::EosResult;

/// Common prefix of every completion payload.
#[repr(C)]
pub struct CallbackHeader {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
}

/// Completion payload types the shim can service.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]` and begin with the exact
/// [`CallbackHeader`] field sequence (`result_code: EosResult`,
/// `client_data: *mut c_void`), so a pointer to the payload is also a valid
/// pointer to a `CallbackHeader`.
pub unsafe trait CompletionInfo: Sized {}

/// Notification entry point the native layer invokes on completion.
pub type NotifyFn<T> = unsafe extern "C" fn(*const T);

type Continuation<T> = Box<dyn FnOnce(&T) + Send>;

/// A continuation packaged for one native call.
pub struct ArmedCallback<T: CompletionInfo> {
    client_data: *mut c_void,
    notify: NotifyFn<T>,
    issued: bool,
}

impl<T: CompletionInfo> ArmedCallback<T> {
    /// Box `continuation` and produce the (`client_data`, entry point) pair
    /// for the native call.
    pub fn new<F>(continuation: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        let boxed: Box<Continuation<T>> = Box::new(Box::new(continuation));
        Self {
            client_data: Box::into_raw(boxed) as *mut c_void,
            notify: trampoline::<T>,
            issued: false,
        }
    }

    /// Opaque user data to pass alongside the native call.
    pub fn client_data(&self) -> *mut c_void {
        self.client_data
    }

    /// The completion entry point to register.
    pub fn notify(&self) -> NotifyFn<T> {
        self.notify
    }

    /// Mark the registration as accepted by the native layer. From this
    /// point the trampoline owns the continuation storage.
    pub fn commit(mut self) {
        self.issued = true;
    }
}

impl<T: CompletionInfo> Drop for ArmedCallback<T> {
    fn drop(&mut self) {
        if !self.issued && !self.client_data.is_null() {
            // The call was never issued: reclaim the storage so the
            // continuation runs zero times without leaking.
            // SAFETY: client_data came from Box::into_raw in `new` and was
            // never handed to the native layer.
            drop(unsafe { Box::from_raw(self.client_data as *mut Continuation<T>) });
        }
    }
}

/// The single free function registered for every completion callback.
unsafe extern "C" fn trampoline<T: CompletionInfo>(info: *const T) {
    if info.is_null() {
        return;
    }
    // SAFETY: CompletionInfo guarantees the payload starts with a
    // CallbackHeader, so the field projection is in bounds and aligned.
    let slot = unsafe {
        let header = info as *const CallbackHeader;
        AtomicPtr::from_ptr((&raw const (*header).client_data) as *mut *mut c_void)
    };

    // Clear the stored pointer before invoking: a second firing (native
    // contract violation) swaps out null and stops here.
    let data = slot.swap(ptr::null_mut(), Ordering::AcqRel);
    if data.is_null() {
        return;
    }

    // SAFETY: non-null data is the Box::into_raw pointer from
    // ArmedCallback::new, observed exactly once thanks to the swap above.
    let continuation = unsafe { *Box::from_raw(data as *mut Continuation<T>) };
    // SAFETY: the native layer passes a payload valid for the duration of
    // the callback.
    continuation(unsafe { &*info });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[repr(C)]
    struct TestInfo {
        result_code: EosResult,
        client_data: *mut c_void,
        payload: i32,
    }

    // SAFETY: repr(C) with the result_code/client_data prefix.
    unsafe impl CompletionInfo for TestInfo {}

    /// Increments its counter when dropped, to observe storage release.
    struct DropTracker(Arc<AtomicUsize>);

    impl Drop for DropTracker {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn armed_with_counters() -> (ArmedCallback<TestInfo>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let drops = Arc::new(AtomicUsize::new(0));
        let tracker = DropTracker(Arc::clone(&drops));
        let run_counter = Arc::clone(&runs);
        let armed = ArmedCallback::new(move |info: &TestInfo| {
            let _hold = &tracker;
            assert_eq!(info.payload, 42);
            run_counter.fetch_add(1, Ordering::SeqCst);
        });
        (armed, runs, drops)
    }

    #[test]
    fn test_fires_exactly_once() {
        let (armed, runs, drops) = armed_with_counters();
        let notify = armed.notify();
        // Heap payload behind a raw pointer, the way native memory reaches
        // the trampoline; the trampoline mutates its client_data field.
        let info = Box::into_raw(Box::new(TestInfo {
            result_code: EosResult::SUCCESS,
            client_data: armed.client_data(),
            payload: 42,
        }));
        armed.commit();

        unsafe { notify(info) };
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert!(unsafe { (*info).client_data }.is_null());

        // Fault injection: duplicate firing must not re-run or double-free.
        unsafe { notify(info) };
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(drops.load(Ordering::SeqCst), 1);

        drop(unsafe { Box::from_raw(info) });
    }

    #[test]
    fn test_uncommitted_registration_reclaims_storage() {
        let (armed, runs, drops) = armed_with_counters();
        drop(armed);
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_null_payload_is_ignored() {
        let (armed, runs, _drops) = armed_with_counters();
        let notify = armed.notify();
        unsafe { notify(ptr::null()) };
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        // Not committed: drop reclaims.
    }
}
