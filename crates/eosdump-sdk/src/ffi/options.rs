//! Request structs passed into the SDK, with their newest known ABI versions.
//!
//! Every options struct leads with an `api_version` the native side uses to
//! decide which fields exist. The `*_API_LATEST` constants are the newest
//! versions this binding knows; the fallback ladder walks down from them.

use std::ffi::{c_char, c_void};

use super::records::ReadFileDataCallbackInfo;
use super::{
    AuthScopeFlags, ContinuanceToken, EosBool, EpicAccountId, ExternalAccountType,
    ExternalCredentialType, LoginCredentialType, ProductUserId, TitleStorageReadResult,
};

// ---------------------------------------------------------------------------
// Core and platform
// ---------------------------------------------------------------------------

pub const INITIALIZE_API_LATEST: i32 = 4;

#[repr(C)]
pub struct InitializeOptions {
    pub api_version: i32,
    pub allocate_memory_function: *mut c_void,
    pub reallocate_memory_function: *mut c_void,
    pub release_memory_function: *mut c_void,
    pub product_name: *const c_char,
    pub product_version: *const c_char,
    pub reserved: *mut c_void,
    pub system_initialize_options: *mut c_void,
    pub override_thread_affinity: *const c_void,
}

pub const PLATFORM_OPTIONS_API_LATEST: i32 = 12;

#[repr(C)]
pub struct PlatformClientCredentials {
    pub client_id: *const c_char,
    pub client_secret: *const c_char,
}

#[repr(C)]
pub struct PlatformOptions {
    pub api_version: i32,
    pub reserved: *mut c_void,
    pub product_id: *const c_char,
    pub sandbox_id: *const c_char,
    pub client_credentials: PlatformClientCredentials,
    pub is_server: EosBool,
    pub encryption_key: *const c_char,
    pub override_country_code: *const c_char,
    pub override_locale_code: *const c_char,
    pub deployment_id: *const c_char,
    pub flags: u64,
    pub cache_directory: *const c_char,
    pub tick_budget_in_milliseconds: u32,
    pub rtc_options: *const c_void,
    pub integrated_platform_options_container_handle: *mut c_void,
    pub system_specific_options: *const c_void,
    pub task_network_timeout_seconds: *const f64,
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

pub const AUTH_LOGIN_API_LATEST: i32 = 3;
pub const AUTH_COPYUSERAUTHTOKEN_API_LATEST: i32 = 1;

#[repr(C)]
pub struct AuthCredentials {
    pub api_version: i32,
    pub id: *const c_char,
    pub token: *const c_char,
    pub credential_type: LoginCredentialType,
    pub system_auth_credentials_options: *mut c_void,
    pub external_type: ExternalCredentialType,
}

#[repr(C)]
pub struct AuthLoginOptions {
    pub api_version: i32,
    pub credentials: *const AuthCredentials,
    pub scope_flags: AuthScopeFlags,
}

#[repr(C)]
pub struct AuthCopyUserAuthTokenOptions {
    pub api_version: i32,
}

// ---------------------------------------------------------------------------
// Identity linking (connect)
// ---------------------------------------------------------------------------

pub const CONNECT_LOGIN_API_LATEST: i32 = 2;
pub const CONNECT_CREDENTIALS_API_LATEST: i32 = 1;
pub const CONNECT_CREATEUSER_API_LATEST: i32 = 1;
pub const CONNECT_GETPRODUCTUSERIDMAPPING_API_LATEST: i32 = 1;
pub const CONNECT_GETEXTERNALACCOUNTMAPPINGS_API_LATEST: i32 = 1;

#[repr(C)]
pub struct ConnectCredentials {
    pub api_version: i32,
    pub token: *const c_char,
    pub credential_type: ExternalCredentialType,
}

#[repr(C)]
pub struct ConnectLoginOptions {
    pub api_version: i32,
    pub credentials: *const ConnectCredentials,
    pub user_login_info: *const c_void,
}

#[repr(C)]
pub struct ConnectCreateUserOptions {
    pub api_version: i32,
    pub continuance_token: ContinuanceToken,
}

#[repr(C)]
pub struct ConnectGetProductUserIdMappingOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
    pub account_id_type: ExternalAccountType,
    pub target_product_user_id: ProductUserId,
}

#[repr(C)]
pub struct ConnectGetExternalAccountMappingsOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
    pub account_id_type: ExternalAccountType,
    pub target_external_user_id: *const c_char,
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

pub const ACHIEVEMENTS_QUERYDEFINITIONS_API_LATEST: i32 = 3;
pub const ACHIEVEMENTS_GETACHIEVEMENTDEFINITIONCOUNT_API_LATEST: i32 = 1;
pub const ACHIEVEMENTS_COPYDEFINITIONBYINDEX_API_LATEST: i32 = 1;
pub const ACHIEVEMENTS_COPYDEFINITIONV2BYINDEX_API_LATEST: i32 = 2;
pub const ACHIEVEMENTS_COPYDEFINITIONV2BYACHIEVEMENTID_API_LATEST: i32 = 2;
pub const ACHIEVEMENTS_UNLOCKACHIEVEMENTS_API_LATEST: i32 = 1;

#[repr(C)]
pub struct AchievementsQueryDefinitionsOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
    pub epic_user_id_deprecated: EpicAccountId,
    pub hidden_achievement_ids_deprecated: *const *const c_char,
    pub hidden_achievements_count_deprecated: u32,
}

#[repr(C)]
pub struct AchievementsGetDefinitionCountOptions {
    pub api_version: i32,
}

#[repr(C)]
pub struct AchievementsCopyDefinitionByIndexOptions {
    pub api_version: i32,
    pub achievement_index: u32,
}

#[repr(C)]
pub struct AchievementsCopyDefinitionV2ByIndexOptions {
    pub api_version: i32,
    pub achievement_index: u32,
}

#[repr(C)]
pub struct AchievementsCopyDefinitionV2ByAchievementIdOptions {
    pub api_version: i32,
    pub achievement_id: *const c_char,
}

#[repr(C)]
pub struct AchievementsUnlockAchievementsOptions {
    pub api_version: i32,
    pub user_id: ProductUserId,
    pub achievement_ids: *const *const c_char,
    pub achievement_count: u32,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

pub const STATS_QUERYSTATS_API_LATEST: i32 = 3;
pub const STATS_GETSTATSCOUNT_API_LATEST: i32 = 1;
pub const STATS_COPYSTATBYINDEX_API_LATEST: i32 = 1;

#[repr(C)]
pub struct StatsQueryStatsOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
    pub start_time: i64,
    pub end_time: i64,
    pub stat_names: *const *const c_char,
    pub stat_names_count: u32,
    pub target_user_id: ProductUserId,
}

#[repr(C)]
pub struct StatsGetStatCountOptions {
    pub api_version: i32,
    pub target_user_id: ProductUserId,
}

#[repr(C)]
pub struct StatsCopyStatByIndexOptions {
    pub api_version: i32,
    pub target_user_id: ProductUserId,
    pub stat_index: u32,
}

// ---------------------------------------------------------------------------
// Commerce (ecom)
// ---------------------------------------------------------------------------

pub const ECOM_QUERYOFFERS_API_LATEST: i32 = 2;
pub const ECOM_GETOFFERCOUNT_API_LATEST: i32 = 1;
pub const ECOM_COPYOFFERBYINDEX_API_LATEST: i32 = 3;
pub const ECOM_GETOFFERITEMCOUNT_API_LATEST: i32 = 1;
pub const ECOM_COPYOFFERITEMBYINDEX_API_LATEST: i32 = 2;
pub const ECOM_QUERYENTITLEMENTS_API_LATEST: i32 = 2;
pub const ECOM_GETENTITLEMENTSCOUNT_API_LATEST: i32 = 1;
pub const ECOM_COPYENTITLEMENTBYINDEX_API_LATEST: i32 = 2;

#[repr(C)]
pub struct EcomQueryOffersOptions {
    pub api_version: i32,
    pub local_user_id: EpicAccountId,
    pub override_catalog_namespace: *const c_char,
}

#[repr(C)]
pub struct EcomGetOfferCountOptions {
    pub api_version: i32,
    pub local_user_id: EpicAccountId,
}

#[repr(C)]
pub struct EcomCopyOfferByIndexOptions {
    pub api_version: i32,
    pub local_user_id: EpicAccountId,
    pub offer_index: u32,
}

#[repr(C)]
pub struct EcomGetOfferItemCountOptions {
    pub api_version: i32,
    pub local_user_id: EpicAccountId,
    pub offer_id: *const c_char,
}

#[repr(C)]
pub struct EcomCopyOfferItemByIndexOptions {
    pub api_version: i32,
    pub local_user_id: EpicAccountId,
    pub offer_id: *const c_char,
    pub item_index: u32,
}

#[repr(C)]
pub struct EcomQueryEntitlementsOptions {
    pub api_version: i32,
    pub local_user_id: EpicAccountId,
    pub entitlement_names: *const *const c_char,
    pub entitlement_name_count: u32,
    pub include_redeemed: EosBool,
}

#[repr(C)]
pub struct EcomGetEntitlementsCountOptions {
    pub api_version: i32,
    pub local_user_id: EpicAccountId,
}

#[repr(C)]
pub struct EcomCopyEntitlementByIndexOptions {
    pub api_version: i32,
    pub local_user_id: EpicAccountId,
    pub entitlement_index: u32,
}

// ---------------------------------------------------------------------------
// Leaderboards
// ---------------------------------------------------------------------------

pub const LEADERBOARDS_QUERYLEADERBOARDDEFINITIONS_API_LATEST: i32 = 2;
pub const LEADERBOARDS_GETLEADERBOARDDEFINITIONCOUNT_API_LATEST: i32 = 1;
pub const LEADERBOARDS_COPYLEADERBOARDDEFINITIONBYINDEX_API_LATEST: i32 = 1;

#[repr(C)]
pub struct LeaderboardsQueryDefinitionsOptions {
    pub api_version: i32,
    pub start_time: i64,
    pub end_time: i64,
    pub local_user_id: ProductUserId,
}

#[repr(C)]
pub struct LeaderboardsGetDefinitionCountOptions {
    pub api_version: i32,
}

#[repr(C)]
pub struct LeaderboardsCopyDefinitionByIndexOptions {
    pub api_version: i32,
    pub leaderboard_index: u32,
}

// ---------------------------------------------------------------------------
// Title storage
// ---------------------------------------------------------------------------

pub const TITLESTORAGE_QUERYFILE_API_LATEST: i32 = 1;
pub const TITLESTORAGE_QUERYFILELIST_API_LATEST: i32 = 1;
pub const TITLESTORAGE_GETFILEMETADATACOUNT_API_LATEST: i32 = 1;
pub const TITLESTORAGE_COPYFILEMETADATAATINDEX_API_LATEST: i32 = 1;
pub const TITLESTORAGE_COPYFILEMETADATABYFILENAME_API_LATEST: i32 = 1;
pub const TITLESTORAGE_READFILE_API_LATEST: i32 = 1;

/// Per-chunk data callback invoked synchronously during a file read.
pub type OnReadFileDataFn =
    unsafe extern "C" fn(*const ReadFileDataCallbackInfo) -> TitleStorageReadResult;

#[repr(C)]
pub struct TitleStorageQueryFileOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
    pub filename: *const c_char,
}

#[repr(C)]
pub struct TitleStorageQueryFileListOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
}

#[repr(C)]
pub struct TitleStorageGetFileMetadataCountOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
}

#[repr(C)]
pub struct TitleStorageCopyFileMetadataAtIndexOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
    pub index: u32,
}

#[repr(C)]
pub struct TitleStorageCopyFileMetadataByFilenameOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
    pub filename: *const c_char,
}

#[repr(C)]
pub struct TitleStorageReadFileOptions {
    pub api_version: i32,
    pub local_user_id: ProductUserId,
    pub filename: *const c_char,
    pub read_chunk_length_bytes: u32,
    pub read_file_data_callback: OnReadFileDataFn,
    pub file_transfer_progress_callback: *const c_void,
}
