//! Native module loading and symbol-resolution strategies.
//!
//! The default strategy asks the system loader for each symbol by its
//! undecorated name. On 32-bit Windows that fails for `__stdcall` /
//! `__fastcall` exports, so there the module's export directory is parsed in
//! memory once, right after load, and requests are matched against decorated
//! names instead (`eosdump_core::pe`).
//!
//! The module is opened exactly once per process and never unloaded before
//! exit; SDKs of this class do not support clean unload.

use std::ffi::c_void;
use std::path::Path;

use crate::error::SdkError;

/// Address of a resolved export.
pub type RawFnPtr = *const c_void;

/// A source of symbol addresses, by logical (undecorated) name.
///
/// Implemented by [`NativeModule`]; tests substitute table-backed fakes.
pub trait SymbolSource {
    /// Address of `name`, or `None` when the module does not export it.
    fn address(&self, name: &str) -> Option<RawFnPtr>;
}

/// Platform/architecture-specific file name of the SDK module.
pub fn sdk_library_name() -> &'static str {
    if cfg!(all(target_os = "windows", target_arch = "x86_64")) {
        "EOSSDK-Win64-Shipping.dll"
    } else if cfg!(all(target_os = "windows", target_arch = "x86")) {
        "EOSSDK-Win32-Shipping.dll"
    } else if cfg!(target_os = "macos") {
        "libEOSSDK-Mac-Shipping.dylib"
    } else {
        "libEOSSDK-Linux-Shipping.so"
    }
}

/// The loaded SDK module. Owns the library handle for the process lifetime.
#[derive(Debug)]
pub struct NativeModule {
    #[cfg(not(all(target_os = "windows", target_arch = "x86")))]
    library: libloading::Library,
    #[cfg(all(target_os = "windows", target_arch = "x86"))]
    base: usize,
    #[cfg(all(target_os = "windows", target_arch = "x86"))]
    exports: eosdump_core::pe::ExportTable,
}

impl NativeModule {
    /// Load the module at `path`.
    #[cfg(not(all(target_os = "windows", target_arch = "x86")))]
    pub fn open(path: &Path) -> Result<Self, SdkError> {
        // SAFETY: loading the SDK module runs its initializers; that is the
        // whole point of this program.
        let library = unsafe { libloading::Library::new(path) }.map_err(|err| {
            SdkError::LibraryNotFound {
                library: path.display().to_string(),
                reason: err.to_string(),
            }
        })?;
        tracing::debug!(path = %path.display(), "loaded SDK module");
        Ok(Self { library })
    }

    /// Load the module at `path` and build its export table.
    ///
    /// The system loader cannot resolve decorated 32-bit exports by their
    /// undecorated names, so every lookup on this target goes through the
    /// parsed export directory.
    #[cfg(all(target_os = "windows", target_arch = "x86"))]
    pub fn open(path: &Path) -> Result<Self, SdkError> {
        use eosdump_core::pe::{ExportTable, peek_size_of_image};

        let not_found = |reason: String| SdkError::LibraryNotFound {
            library: path.display().to_string(),
            reason,
        };

        // SAFETY: same as the portable path; the raw handle is kept for the
        // process lifetime, which is exactly the unload-free contract.
        let library = unsafe { libloading::os::windows::Library::new(path) }
            .map_err(|err| not_found(err.to_string()))?;
        let base = library.into_raw() as usize;

        // An HMODULE is the image base address. Size the mapped image from a
        // header-sized prefix, then walk the full image.
        const HEADER_PROBE_LEN: usize = 0x1000;
        // SAFETY: a successfully loaded module maps at least its headers.
        let prefix = unsafe { std::slice::from_raw_parts(base as *const u8, HEADER_PROBE_LEN) };
        let size = peek_size_of_image(prefix)
            .map_err(|err| not_found(format!("invalid module image: {err}")))?;
        // SAFETY: SizeOfImage is the extent of the loader's mapping.
        let image = unsafe { std::slice::from_raw_parts(base as *const u8, size) };
        let exports = ExportTable::from_image(image)
            .map_err(|err| not_found(format!("invalid export directory: {err}")))?;

        tracing::debug!(
            path = %path.display(),
            exports = exports.len(),
            "loaded SDK module via export table"
        );
        Ok(Self { base, exports })
    }
}

#[cfg(not(all(target_os = "windows", target_arch = "x86")))]
impl SymbolSource for NativeModule {
    fn address(&self, name: &str) -> Option<RawFnPtr> {
        let mut symbol = Vec::with_capacity(name.len() + 1);
        symbol.extend_from_slice(name.as_bytes());
        symbol.push(0);
        // SAFETY: the symbol is only reinterpreted as a typed entry point by
        // the binding layer, which knows its signature.
        let found = unsafe { self.library.get::<*mut c_void>(&symbol) }.ok()?;
        Some(*found as RawFnPtr)
    }
}

#[cfg(all(target_os = "windows", target_arch = "x86"))]
impl SymbolSource for NativeModule {
    fn address(&self, name: &str) -> Option<RawFnPtr> {
        let resolved = self.exports.resolve(name)?;
        tracing::trace!(
            name,
            decorated = resolved.decorated,
            convention = ?resolved.convention,
            "resolved decorated export"
        );
        Some((self.base + resolved.rva as usize) as RawFnPtr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_name_is_platform_specific() {
        let name = sdk_library_name();
        assert!(name.contains("EOSSDK"));
        assert!(name.contains("Shipping"));
    }

    #[test]
    fn test_open_missing_module_is_library_not_found() {
        let err = NativeModule::open(Path::new("/nonexistent/libEOSSDK-test.so")).unwrap_err();
        assert!(matches!(err, SdkError::LibraryNotFound { .. }));
    }
}
