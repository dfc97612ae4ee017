//! Typed facade over the bound SDK.
//!
//! [`Sdk`] is the process-wide binding context: module handle plus function
//! tables, constructed once and passed by reference to everything that calls
//! into the native layer. [`Platform`] is created from it and hands out the
//! per-feature facades; their blocking methods register a callback shim,
//! issue the native call, and spin on the result slot while the tick pump
//! drives completion.

pub mod achievements;
pub mod auth;
pub mod connect;
pub mod ecom;
pub mod leaderboards;
pub mod stats;
pub mod title_storage;

use std::ffi::{CString, c_char};
use std::path::{Path, PathBuf};
use std::ptr;

use eosdump_core::fallback::{FallbackError, FallbackStep, FallbackSuccess, run_with_fallback};

pub use achievements::Achievements;
pub use auth::Auth;
pub use connect::Connect;
pub use ecom::Ecom;
pub use leaderboards::Leaderboards;
pub use stats::Stats;
pub use title_storage::TitleStorage;

use crate::bind::SdkFns;
use crate::error::SdkError;
use crate::ffi::options::{INITIALIZE_API_LATEST, InitializeOptions, PLATFORM_OPTIONS_API_LATEST,
    PlatformClientCredentials, PlatformOptions};
use crate::ffi::{
    EOS_FALSE, EosResult, EpicAccountId, HAchievements, HAuth, HConnect, HEcom, HLeaderboards,
    HPlatform, HStats, HTitleStorage, ProductUserId,
};
use crate::module::{NativeModule, sdk_library_name};
use crate::pump::TickHandle;
use crate::wait::ResultSlot;

/// Buffer length for native id stringification, matching the SDK's own
/// maximum.
const ID_BUFFER_LEN: usize = 512;

/// Settings for platform-object creation.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub product_id: String,
    pub sandbox_id: String,
    pub deployment_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub encryption_key: Option<String>,
    pub cache_directory: PathBuf,
    pub flags: u64,
}

/// The process-wide binding context. Exactly one per process; the module is
/// held for the whole lifetime and never unloaded.
pub struct Sdk {
    pub(crate) fns: SdkFns,
    _module: NativeModule,
}

impl Sdk {
    /// Load the platform-specific SDK module from the executable's
    /// directory and bind all entry points.
    pub fn load() -> Result<Self, SdkError> {
        let exe = std::env::current_exe().map_err(|err| SdkError::LibraryNotFound {
            library: sdk_library_name().to_owned(),
            reason: err.to_string(),
        })?;
        let dir = exe.parent().unwrap_or(Path::new("."));
        Self::load_from(&dir.join(sdk_library_name()))
    }

    /// Load the SDK module at an explicit path and bind all entry points.
    pub fn load_from(path: &Path) -> Result<Self, SdkError> {
        let module = NativeModule::open(path)?;
        let fns = SdkFns::bind(&module)?;
        tracing::info!(path = %path.display(), "SDK entry points bound");
        Ok(Self {
            fns,
            _module: module,
        })
    }

    /// Initialize the SDK with product identity.
    pub fn initialize(&self, product_name: &str, product_version: &str) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Initialize";
        let product_name = cstring(product_name, OPERATION)?;
        let product_version = cstring(product_version, OPERATION)?;

        let options = InitializeOptions {
            api_version: INITIALIZE_API_LATEST,
            allocate_memory_function: ptr::null_mut(),
            reallocate_memory_function: ptr::null_mut(),
            release_memory_function: ptr::null_mut(),
            product_name: product_name.as_ptr(),
            product_version: product_version.as_ptr(),
            reserved: ptr::null_mut(),
            system_initialize_options: ptr::null_mut(),
            override_thread_affinity: ptr::null(),
        };

        // SAFETY: options and its strings outlive the call.
        let code = unsafe { (self.fns.core.initialize)(&options) };
        if code.is_success() {
            Ok(())
        } else {
            Err(self.fns.operation_failed(OPERATION, code))
        }
    }

    /// Shut the SDK down. Called once at process exit.
    pub fn shutdown(&self) -> EosResult {
        // SAFETY: no platform calls happen after shutdown.
        unsafe { (self.fns.core.shutdown)() }
    }

    /// Human-readable form of a native result code.
    pub fn result_to_string(&self, code: EosResult) -> String {
        self.fns.result_name(code)
    }

    /// Stringify an Epic account id; empty on failure.
    pub fn epic_account_id_to_string(&self, id: EpicAccountId) -> String {
        id_to_string(id, self.fns.core.epic_account_id_to_string)
    }

    /// Stringify a product user id; empty on failure.
    pub fn product_user_id_to_string(&self, id: ProductUserId) -> String {
        id_to_string(id, self.fns.core.product_user_id_to_string)
    }

    /// Create the platform object, walking the version ladder on failure,
    /// then fetch every feature group's interface handle.
    pub fn create_platform(&self, config: &PlatformConfig) -> Result<Platform<'_>, SdkError> {
        const OPERATION: &str = "EOS_Platform_Create";
        let product_id = cstring(&config.product_id, OPERATION)?;
        let sandbox_id = cstring(&config.sandbox_id, OPERATION)?;
        let deployment_id = cstring(&config.deployment_id, OPERATION)?;
        let client_id = cstring(&config.client_id, OPERATION)?;
        let client_secret = cstring(&config.client_secret, OPERATION)?;
        let cache_directory = cstring(&config.cache_directory.to_string_lossy(), OPERATION)?;
        let encryption_key = match config.encryption_key.as_deref() {
            Some(key) if !key.is_empty() => Some(cstring(key, OPERATION)?),
            _ => None,
        };

        // Creation signals failure with a null handle rather than a result
        // code; a null handle walks the ladder down.
        let outcome = run_with_fallback::<HPlatform, core::convert::Infallible, _>(
            PLATFORM_OPTIONS_API_LATEST,
            |version| {
                let options = PlatformOptions {
                    api_version: version,
                    reserved: ptr::null_mut(),
                    product_id: product_id.as_ptr(),
                    sandbox_id: sandbox_id.as_ptr(),
                    client_credentials: PlatformClientCredentials {
                        client_id: client_id.as_ptr(),
                        client_secret: client_secret.as_ptr(),
                    },
                    is_server: EOS_FALSE,
                    encryption_key: encryption_key
                        .as_ref()
                        .map_or(ptr::null(), |key| key.as_ptr()),
                    override_country_code: ptr::null(),
                    override_locale_code: ptr::null(),
                    deployment_id: deployment_id.as_ptr(),
                    flags: config.flags,
                    cache_directory: cache_directory.as_ptr(),
                    tick_budget_in_milliseconds: 0,
                    rtc_options: ptr::null(),
                    integrated_platform_options_container_handle: ptr::null_mut(),
                    system_specific_options: ptr::null(),
                    task_network_timeout_seconds: ptr::null(),
                };
                tracing::trace!(
                    version,
                    product_id = %config.product_id,
                    sandbox_id = %config.sandbox_id,
                    deployment_id = %config.deployment_id,
                    "creating platform"
                );
                // SAFETY: options and its strings outlive the call.
                let handle = unsafe { (self.fns.platform.create)(&options) };
                if handle.is_null() {
                    FallbackStep::Incompatible
                } else {
                    FallbackStep::Done(handle)
                }
            },
        );

        let handle = match outcome {
            Ok(success) => {
                if success.attempts > 1 {
                    tracing::debug!(
                        version = success.version,
                        attempts = success.attempts,
                        "platform created after version fallback"
                    );
                }
                success.value
            }
            Err(FallbackError::Exhausted { .. }) => return Err(SdkError::PlatformCreateFailed),
            Err(FallbackError::Failed(never)) => match never {},
        };

        let interfaces = self.fetch_interfaces(handle)?;
        Ok(Platform {
            sdk: self,
            handle,
            interfaces,
        })
    }

    fn fetch_interfaces(&self, handle: HPlatform) -> Result<Interfaces, SdkError> {
        let fns = &self.fns.platform;

        // SAFETY: the platform handle was just created and stays alive.
        let auth = unsafe { (fns.get_auth_interface)(handle) };
        if auth.is_null() {
            return Err(SdkError::InterfaceUnavailable { name: "EOS_HAuth" });
        }
        let connect = unsafe { (fns.get_connect_interface)(handle) };
        if connect.is_null() {
            return Err(SdkError::InterfaceUnavailable { name: "EOS_HConnect" });
        }
        let ecom = unsafe { (fns.get_ecom_interface)(handle) };
        if ecom.is_null() {
            return Err(SdkError::InterfaceUnavailable { name: "EOS_HEcom" });
        }

        // A bound optional getter returning null is a broken module — fatal.
        // An unbound getter just leaves the group unavailable.
        let achievements = match fns.get_achievements_interface {
            Some(get) => {
                let h = unsafe { get(handle) };
                if h.is_null() {
                    return Err(SdkError::InterfaceUnavailable {
                        name: "EOS_HAchievements",
                    });
                }
                h
            }
            None => ptr::null_mut(),
        };
        let stats = match fns.get_stats_interface {
            Some(get) => {
                let h = unsafe { get(handle) };
                if h.is_null() {
                    return Err(SdkError::InterfaceUnavailable { name: "EOS_HStats" });
                }
                h
            }
            None => ptr::null_mut(),
        };
        let leaderboards = match fns.get_leaderboards_interface {
            Some(get) => {
                let h = unsafe { get(handle) };
                if h.is_null() {
                    return Err(SdkError::InterfaceUnavailable {
                        name: "EOS_HLeaderboards",
                    });
                }
                h
            }
            None => ptr::null_mut(),
        };
        let title_storage = match fns.get_title_storage_interface {
            Some(get) => {
                let h = unsafe { get(handle) };
                if h.is_null() {
                    return Err(SdkError::InterfaceUnavailable {
                        name: "EOS_HTitleStorage",
                    });
                }
                h
            }
            None => ptr::null_mut(),
        };

        Ok(Interfaces {
            auth,
            connect,
            ecom,
            achievements,
            stats,
            leaderboards,
            title_storage,
        })
    }
}

/// Interface handles fetched at platform creation. Null marks an optional
/// group whose getter was never exported; availability is monotonic for the
/// process lifetime.
pub(crate) struct Interfaces {
    auth: HAuth,
    connect: HConnect,
    ecom: HEcom,
    achievements: HAchievements,
    stats: HStats,
    leaderboards: HLeaderboards,
    title_storage: HTitleStorage,
}

/// The created platform object plus its feature-group handles.
pub struct Platform<'a> {
    sdk: &'a Sdk,
    handle: HPlatform,
    interfaces: Interfaces,
}

impl<'a> Platform<'a> {
    /// Drive one pump iteration.
    pub fn tick(&self) {
        // SAFETY: handle is valid for the process lifetime.
        unsafe { (self.sdk.fns.platform.tick)(self.handle) }
    }

    /// Handle for the background tick pump.
    pub fn tick_handle(&self) -> TickHandle {
        TickHandle {
            tick: self.sdk.fns.platform.tick,
            platform: self.handle,
        }
    }

    /// Override the locale reported to backend services.
    pub fn set_override_locale_code(&self, locale: &str) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Platform_SetOverrideLocaleCode";
        let locale = cstring(locale, OPERATION)?;
        // SAFETY: handle and string outlive the call.
        let code =
            unsafe { (self.sdk.fns.platform.set_override_locale_code)(self.handle, locale.as_ptr()) };
        if code.is_success() {
            Ok(())
        } else {
            Err(self.sdk.fns.operation_failed(OPERATION, code))
        }
    }

    pub fn auth(&self) -> Auth<'a> {
        Auth::new(&self.sdk.fns, self.interfaces.auth)
    }

    pub fn connect(&self) -> Connect<'a> {
        Connect::new(&self.sdk.fns, self.interfaces.connect)
    }

    pub fn ecom(&self) -> Ecom<'a> {
        Ecom::new(&self.sdk.fns, self.interfaces.ecom)
    }

    pub fn achievements(&self) -> Achievements<'a> {
        Achievements::new(&self.sdk.fns, self.interfaces.achievements)
    }

    pub fn stats(&self) -> Stats<'a> {
        Stats::new(&self.sdk.fns, self.interfaces.stats)
    }

    pub fn leaderboards(&self) -> Leaderboards<'a> {
        Leaderboards::new(&self.sdk.fns, self.interfaces.leaderboards)
    }

    pub fn title_storage(&self) -> TitleStorage<'a> {
        TitleStorage::new(&self.sdk.fns, self.interfaces.title_storage)
    }
}

/// Convert a Rust string for the C boundary.
pub(crate) fn cstring(value: &str, operation: &'static str) -> Result<CString, SdkError> {
    CString::new(value).map_err(|_| SdkError::InvalidArgument { operation })
}

/// Classify a completed wait for the version-fallback ladder.
pub(crate) fn classify_completion(
    fns: &SdkFns,
    operation: &'static str,
    waited: Result<EosResult, SdkError>,
) -> FallbackStep<EosResult, SdkError> {
    match waited {
        Ok(code) if code.is_success() => FallbackStep::Done(code),
        Ok(code) if code.is_incompatible_version() => FallbackStep::Incompatible,
        Ok(code) => FallbackStep::Fail(fns.operation_failed(operation, code)),
        Err(err) => FallbackStep::Fail(err),
    }
}

/// Collapse a fallback outcome into the operation's result.
pub(crate) fn finish_fallback<T>(
    operation: &'static str,
    outcome: Result<FallbackSuccess<T>, FallbackError<SdkError>>,
) -> Result<T, SdkError> {
    match outcome {
        Ok(success) => {
            if success.attempts > 1 {
                tracing::debug!(
                    operation,
                    version = success.version,
                    attempts = success.attempts,
                    "accepted after version fallback"
                );
            }
            Ok(success.value)
        }
        Err(FallbackError::Exhausted { attempts }) => {
            Err(SdkError::VersionExhausted { operation, attempts })
        }
        Err(FallbackError::Failed(err)) => Err(err),
    }
}

/// Run a single (non-laddered) asynchronous call to completion.
pub(crate) fn complete_simple(
    fns: &SdkFns,
    operation: &'static str,
    slot: &ResultSlot,
    policy: &crate::wait::WaitPolicy,
) -> Result<(), SdkError> {
    let code = slot.wait(policy)?;
    if code.is_success() {
        Ok(())
    } else {
        Err(fns.operation_failed(operation, code))
    }
}

fn id_to_string<Id: Copy>(
    id: Id,
    to_string: unsafe extern "C" fn(Id, *mut c_char, *mut i32) -> EosResult,
) -> String {
    let mut buffer = [0u8; ID_BUFFER_LEN];
    let mut length = ID_BUFFER_LEN as i32;
    // SAFETY: buffer and length describe writable storage of the advertised
    // size.
    let code = unsafe { to_string(id, buffer.as_mut_ptr() as *mut c_char, &mut length) };
    if code.is_success() && length > 0 {
        String::from_utf8_lossy(&buffer[..(length - 1) as usize]).into_owned()
    } else {
        String::new()
    }
}
