//! Pure logic for the EOS SDK runtime binding.
//!
//! Two concerns live here, both deliberately free of I/O and FFI so they can
//! be exercised on any host with plain byte slices and closures:
//!
//! - [`pe`]: PE export-directory parsing and calling-convention
//!   decorated-name matching, used on targets where the native loader cannot
//!   resolve decorated exports by their undecorated names.
//! - [`fallback`]: the descending ABI version ladder that retries a native
//!   call with successively older request-struct versions until one is
//!   accepted or the ladder is exhausted.

pub mod fallback;
pub mod pe;

pub use fallback::{FallbackError, FallbackStep, FallbackSuccess, run_with_fallback};
pub use pe::{ExportTable, PeError, PeResult};
