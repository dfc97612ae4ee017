//! Records the SDK hands back: completion-callback payloads and the structs
//! returned by copy-by-index calls (released through the matching native
//! release entry points).
//!
//! Completion payloads are `#[repr(C)]` with `result_code` and `client_data`
//! as their first two fields; that prefix is what [`crate::shim`] relies on.

use std::ffi::{c_char, c_void};

use super::{
    ContinuanceToken, EosBool, EosResult, EpicAccountId, ProductUserId,
};
use crate::shim::CompletionInfo;

// ---------------------------------------------------------------------------
// Completion payloads
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct AuthLoginCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub local_user_id: EpicAccountId,
    pub pin_grant_info: *const c_void,
    pub continuance_token: ContinuanceToken,
    pub account_feature_restricted_info_deprecated: *const c_void,
    pub selected_account_id: EpicAccountId,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for AuthLoginCallbackInfo {}

#[repr(C)]
pub struct ConnectLoginCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub local_user_id: ProductUserId,
    pub continuance_token: ContinuanceToken,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for ConnectLoginCallbackInfo {}

#[repr(C)]
pub struct ConnectCreateUserCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub local_user_id: ProductUserId,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for ConnectCreateUserCallbackInfo {}

#[repr(C)]
pub struct AchievementsQueryDefinitionsCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for AchievementsQueryDefinitionsCallbackInfo {}

#[repr(C)]
pub struct AchievementsUnlockAchievementsCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub user_id: ProductUserId,
    pub achievements_count: u32,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for AchievementsUnlockAchievementsCallbackInfo {}

#[repr(C)]
pub struct StatsQueryStatsCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub local_user_id: ProductUserId,
    pub target_user_id: ProductUserId,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for StatsQueryStatsCallbackInfo {}

#[repr(C)]
pub struct EcomQueryOffersCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub local_user_id: EpicAccountId,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for EcomQueryOffersCallbackInfo {}

#[repr(C)]
pub struct EcomQueryEntitlementsCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub local_user_id: EpicAccountId,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for EcomQueryEntitlementsCallbackInfo {}

#[repr(C)]
pub struct LeaderboardsQueryDefinitionsCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for LeaderboardsQueryDefinitionsCallbackInfo {}

#[repr(C)]
pub struct TitleStorageQueryFileCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub local_user_id: ProductUserId,
    pub filename: *const c_char,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for TitleStorageQueryFileCallbackInfo {}

#[repr(C)]
pub struct TitleStorageQueryFileListCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub local_user_id: ProductUserId,
    pub file_count: u32,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for TitleStorageQueryFileListCallbackInfo {}

#[repr(C)]
pub struct TitleStorageReadFileCallbackInfo {
    pub result_code: EosResult,
    pub client_data: *mut c_void,
    pub local_user_id: ProductUserId,
    pub filename: *const c_char,
}

// SAFETY: repr(C) with the result_code/client_data prefix.
unsafe impl CompletionInfo for TitleStorageReadFileCallbackInfo {}

/// Per-chunk payload for an in-progress file read. Unlike completion
/// payloads, `client_data` leads and the callback fires once per chunk.
#[repr(C)]
pub struct ReadFileDataCallbackInfo {
    pub client_data: *mut c_void,
    pub local_user_id: ProductUserId,
    pub filename: *const c_char,
    pub total_file_size_bytes: u32,
    pub is_last_chunk: EosBool,
    pub data_chunk_length_bytes: u32,
    pub data_chunk: *const c_void,
}

// ---------------------------------------------------------------------------
// Copied records
// ---------------------------------------------------------------------------

pub const AUTH_TOKEN_API_LATEST: i32 = 2;

#[repr(C)]
pub struct AuthToken {
    pub api_version: i32,
    pub app: *const c_char,
    pub client_id: *const c_char,
    pub account_id: *const c_char,
    pub access_token: *const c_char,
    pub expires_in: f64,
    pub expires_at: *const c_char,
    pub auth_type: i32,
    pub refresh_token: *const c_char,
    pub refresh_expires_in: f64,
    pub refresh_expires_at: *const c_char,
}

#[repr(C)]
pub struct StatThresholdsRecord {
    pub api_version: i32,
    pub name: *const c_char,
    pub threshold: i32,
}

#[repr(C)]
pub struct AchievementDefinitionRecord {
    pub api_version: i32,
    pub achievement_id: *const c_char,
    pub display_name: *const c_char,
    pub description: *const c_char,
    pub locked_display_name: *const c_char,
    pub locked_description: *const c_char,
    pub hidden_description: *const c_char,
    pub completion_description: *const c_char,
    pub unlocked_icon_id: *const c_char,
    pub locked_icon_id: *const c_char,
    pub is_hidden: EosBool,
    pub stat_thresholds_count: i32,
    pub stat_thresholds: *const StatThresholdsRecord,
}

#[repr(C)]
pub struct AchievementDefinitionV2Record {
    pub api_version: i32,
    pub achievement_id: *const c_char,
    pub unlocked_display_name: *const c_char,
    pub unlocked_description: *const c_char,
    pub locked_display_name: *const c_char,
    pub locked_description: *const c_char,
    pub flavor_text: *const c_char,
    pub unlocked_icon_url: *const c_char,
    pub locked_icon_url: *const c_char,
    pub is_hidden: EosBool,
    pub stat_thresholds_count: u32,
    pub stat_thresholds: *const StatThresholdsRecord,
}

#[repr(C)]
pub struct StatRecord {
    pub api_version: i32,
    pub name: *const c_char,
    pub start_time: i64,
    pub end_time: i64,
    pub value: i32,
}

#[repr(C)]
pub struct CatalogOfferRecord {
    pub api_version: i32,
    pub server_index: i32,
    pub catalog_namespace: *const c_char,
    pub id: *const c_char,
    pub title_text: *const c_char,
    pub description_text: *const c_char,
    pub long_description_text: *const c_char,
    pub technical_details_text_deprecated: *const c_char,
    pub currency_code: *const c_char,
    pub price_result: EosResult,
    pub original_price_deprecated: u32,
    pub current_price_deprecated: u32,
    pub discount_percentage: u8,
    pub expiration_timestamp: i64,
    pub purchased_count_deprecated: u32,
    pub purchase_limit: i32,
    pub available_for_purchase: EosBool,
    pub original_price64: u64,
    pub current_price64: u64,
    pub decimal_point: u32,
    pub release_date_timestamp: i64,
    pub effective_date_timestamp: i64,
}

#[repr(C)]
pub struct CatalogItemRecord {
    pub api_version: i32,
    pub catalog_namespace: *const c_char,
    pub id: *const c_char,
    pub entitlement_name: *const c_char,
    pub title_text: *const c_char,
    pub description_text: *const c_char,
    pub long_description_text: *const c_char,
    pub technical_details_text: *const c_char,
    pub developer_text: *const c_char,
    pub item_type: i32,
    pub entitlement_end_timestamp: i64,
}

#[repr(C)]
pub struct EntitlementRecord {
    pub api_version: i32,
    pub entitlement_name: *const c_char,
    pub entitlement_id: *const c_char,
    pub catalog_item_id: *const c_char,
    pub server_index: i32,
    pub redeemed: EosBool,
    pub end_timestamp: i64,
}

#[repr(C)]
pub struct LeaderboardDefinitionRecord {
    pub api_version: i32,
    pub leaderboard_id: *const c_char,
    pub stat_name: *const c_char,
    pub aggregation: i32,
    pub start_time: i64,
    pub end_time: i64,
}

pub const TITLESTORAGE_FILEMETADATA_API_LATEST: i32 = 2;

#[repr(C)]
pub struct FileMetadataRecord {
    pub api_version: i32,
    pub file_size_bytes: u32,
    pub md5_hash: *const c_char,
    pub filename: *const c_char,
    pub last_modified_time: i64,
    pub unencrypted_data_size_bytes: u32,
}
