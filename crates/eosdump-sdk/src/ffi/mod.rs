//! Raw C-ABI surface of the EOS SDK: opaque handles, result codes, enums,
//! and the request/record structs the bound entry points exchange.
//!
//! Layouts follow the SDK headers; every struct here is `#[repr(C)]` and
//! carries an `api_version` tag interpreted by the native side.

pub mod functions;
pub mod options;
pub mod records;

use std::ffi::{CStr, c_char};

// ---------------------------------------------------------------------------
// Opaque handle types
// ---------------------------------------------------------------------------

/// Opaque platform instance.
pub enum OpaquePlatform {}
/// Opaque authentication interface.
pub enum OpaqueAuth {}
/// Opaque identity-linking (connect) interface.
pub enum OpaqueConnect {}
/// Opaque commerce interface.
pub enum OpaqueEcom {}
/// Opaque statistics interface.
pub enum OpaqueStats {}
/// Opaque leaderboards interface.
pub enum OpaqueLeaderboards {}
/// Opaque achievements interface.
pub enum OpaqueAchievements {}
/// Opaque title-storage interface.
pub enum OpaqueTitleStorage {}
/// Opaque in-flight title-storage file transfer.
pub enum OpaqueFileTransferRequest {}
/// Opaque Epic account identifier.
pub enum OpaqueEpicAccountId {}
/// Opaque product user identifier.
pub enum OpaqueProductUserId {}
/// Opaque continuance token handed out by a rejected connect login.
pub enum OpaqueContinuanceToken {}

pub type HPlatform = *mut OpaquePlatform;
pub type HAuth = *mut OpaqueAuth;
pub type HConnect = *mut OpaqueConnect;
pub type HEcom = *mut OpaqueEcom;
pub type HStats = *mut OpaqueStats;
pub type HLeaderboards = *mut OpaqueLeaderboards;
pub type HAchievements = *mut OpaqueAchievements;
pub type HTitleStorage = *mut OpaqueTitleStorage;
pub type HFileTransferRequest = *mut OpaqueFileTransferRequest;
pub type EpicAccountId = *mut OpaqueEpicAccountId;
pub type ProductUserId = *mut OpaqueProductUserId;
pub type ContinuanceToken = *mut OpaqueContinuanceToken;

// ---------------------------------------------------------------------------
// Scalar types and constants
// ---------------------------------------------------------------------------

/// The SDK's boolean: a 32-bit integer.
pub type EosBool = i32;

pub const EOS_TRUE: EosBool = 1;
pub const EOS_FALSE: EosBool = 0;

/// Platform creation flags.
pub const PF_LOADING_IN_EDITOR: u64 = 0x1;
pub const PF_DISABLE_OVERLAY: u64 = 0x2;
pub const PF_DISABLE_SOCIAL_OVERLAY: u64 = 0x4;

/// "No time bound" sentinel for stats and leaderboards queries.
pub const STATS_TIME_UNDEFINED: i64 = -1;
pub const LEADERBOARDS_TIME_UNDEFINED: i64 = -1;

/// Result code returned by every fallible native call.
///
/// Kept as a transparent wrapper rather than an enum: the deployed module may
/// return codes newer than this binding knows. The human-readable form comes
/// from the module's own `EOS_EResult_ToString` export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct EosResult(pub i32);

impl EosResult {
    pub const SUCCESS: Self = Self(0);
    pub const INVALID_USER: Self = Self(3);
    pub const INVALID_PARAMETERS: Self = Self(10);
    pub const INCOMPATIBLE_VERSION: Self = Self(13);
    pub const NOT_FOUND: Self = Self(18);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    pub fn is_incompatible_version(self) -> bool {
        self == Self::INCOMPATIBLE_VERSION
    }

    pub fn raw(self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for EosResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Credential kind accepted by the authentication login call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LoginCredentialType {
    Password = 0,
    ExchangeCode = 1,
    PersistentAuth = 2,
    DeviceCode = 3,
    Developer = 4,
    RefreshToken = 5,
    AccountPortal = 6,
    ExternalAuth = 7,
}

/// External credential kind for auth and connect logins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExternalCredentialType {
    Epic = 0,
    SteamAppTicket = 1,
    PsnIdToken = 2,
    XblXstsToken = 3,
    DiscordAccessToken = 4,
}

/// External account kind for identity-mapping queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExternalAccountType {
    Epic = 0,
    Steam = 1,
    Psn = 2,
    Xbl = 3,
    Discord = 4,
}

/// Authorization scopes requested at auth login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct AuthScopeFlags(pub i32);

impl AuthScopeFlags {
    pub const NO_FLAGS: Self = Self(0);
    pub const BASIC_PROFILE: Self = Self(0x1);
    pub const FRIENDS_LIST: Self = Self(0x2);
    pub const PRESENCE: Self = Self(0x4);
}

/// Reply expected from the title-storage per-chunk data callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TitleStorageReadResult {
    ContinueReading = 1,
    FailRequest = 2,
    CancelRequest = 3,
}

// ---------------------------------------------------------------------------
// C string helpers
// ---------------------------------------------------------------------------

/// Copy a possibly-null C string into an owned `String`; null becomes empty.
///
/// # Safety
///
/// A non-null `ptr` must point at a NUL-terminated string valid for the
/// duration of the call.
pub(crate) unsafe fn owned_or_empty(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_classification() {
        assert!(EosResult::SUCCESS.is_success());
        assert!(!EosResult::INVALID_USER.is_success());
        assert!(EosResult(13).is_incompatible_version());
        assert_eq!(format!("{}", EosResult(18)), "18");
    }

    #[test]
    fn test_owned_or_empty() {
        assert_eq!(unsafe { owned_or_empty(std::ptr::null()) }, "");
        let s = std::ffi::CString::new("achievement_01").unwrap();
        assert_eq!(unsafe { owned_or_empty(s.as_ptr()) }, "achievement_01");
    }
}
