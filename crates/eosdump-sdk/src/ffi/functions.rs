//! Function-pointer types for every bound entry point.

use std::ffi::{c_char, c_void};

use super::options::*;
use super::records::*;
use super::{
    EosBool, EosResult, EpicAccountId, HAchievements, HAuth, HConnect, HEcom,
    HFileTransferRequest, HLeaderboards, HPlatform, HStats, HTitleStorage, ProductUserId,
};
use crate::shim::NotifyFn;

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

pub type InitializeFn = unsafe extern "C" fn(*const InitializeOptions) -> EosResult;
pub type ShutdownFn = unsafe extern "C" fn() -> EosResult;
pub type ResultToStringFn = unsafe extern "C" fn(EosResult) -> *const c_char;

pub type EpicAccountIdIsValidFn = unsafe extern "C" fn(EpicAccountId) -> EosBool;
pub type EpicAccountIdToStringFn =
    unsafe extern "C" fn(EpicAccountId, *mut c_char, *mut i32) -> EosResult;
pub type EpicAccountIdFromStringFn = unsafe extern "C" fn(*const c_char) -> EpicAccountId;

pub type ProductUserIdIsValidFn = unsafe extern "C" fn(ProductUserId) -> EosBool;
pub type ProductUserIdToStringFn =
    unsafe extern "C" fn(ProductUserId, *mut c_char, *mut i32) -> EosResult;
pub type ProductUserIdFromStringFn = unsafe extern "C" fn(*const c_char) -> ProductUserId;

// ---------------------------------------------------------------------------
// Platform lifecycle
// ---------------------------------------------------------------------------

pub type PlatformCreateFn = unsafe extern "C" fn(*const PlatformOptions) -> HPlatform;
pub type PlatformTickFn = unsafe extern "C" fn(HPlatform);
pub type PlatformSetOverrideLocaleCodeFn =
    unsafe extern "C" fn(HPlatform, *const c_char) -> EosResult;

pub type PlatformGetAuthInterfaceFn = unsafe extern "C" fn(HPlatform) -> HAuth;
pub type PlatformGetConnectInterfaceFn = unsafe extern "C" fn(HPlatform) -> HConnect;
pub type PlatformGetEcomInterfaceFn = unsafe extern "C" fn(HPlatform) -> HEcom;
pub type PlatformGetAchievementsInterfaceFn = unsafe extern "C" fn(HPlatform) -> HAchievements;
pub type PlatformGetStatsInterfaceFn = unsafe extern "C" fn(HPlatform) -> HStats;
pub type PlatformGetLeaderboardsInterfaceFn = unsafe extern "C" fn(HPlatform) -> HLeaderboards;
pub type PlatformGetTitleStorageInterfaceFn = unsafe extern "C" fn(HPlatform) -> HTitleStorage;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

pub type AuthLoginFn = unsafe extern "C" fn(
    HAuth,
    *const AuthLoginOptions,
    *mut c_void,
    NotifyFn<AuthLoginCallbackInfo>,
);
pub type AuthGetLoggedInAccountByIndexFn = unsafe extern "C" fn(HAuth, i32) -> EpicAccountId;
pub type AuthCopyUserAuthTokenFn = unsafe extern "C" fn(
    HAuth,
    *const AuthCopyUserAuthTokenOptions,
    EpicAccountId,
    *mut *mut AuthToken,
) -> EosResult;
pub type AuthTokenReleaseFn = unsafe extern "C" fn(*mut AuthToken);

// ---------------------------------------------------------------------------
// Identity linking (connect)
// ---------------------------------------------------------------------------

pub type ConnectLoginFn = unsafe extern "C" fn(
    HConnect,
    *const ConnectLoginOptions,
    *mut c_void,
    NotifyFn<ConnectLoginCallbackInfo>,
);
pub type ConnectCreateUserFn = unsafe extern "C" fn(
    HConnect,
    *const ConnectCreateUserOptions,
    *mut c_void,
    NotifyFn<ConnectCreateUserCallbackInfo>,
);
pub type ConnectGetLoggedInUserByIndexFn = unsafe extern "C" fn(HConnect, i32) -> ProductUserId;
pub type ConnectGetProductUserIdMappingFn = unsafe extern "C" fn(
    HConnect,
    *const ConnectGetProductUserIdMappingOptions,
    *mut c_char,
    *mut i32,
) -> EosResult;
pub type ConnectGetExternalAccountMappingFn =
    unsafe extern "C" fn(HConnect, *const ConnectGetExternalAccountMappingsOptions) -> ProductUserId;

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

pub type AchievementsQueryDefinitionsFn = unsafe extern "C" fn(
    HAchievements,
    *const AchievementsQueryDefinitionsOptions,
    *mut c_void,
    NotifyFn<AchievementsQueryDefinitionsCallbackInfo>,
);
pub type AchievementsGetDefinitionCountFn =
    unsafe extern "C" fn(HAchievements, *const AchievementsGetDefinitionCountOptions) -> u32;
pub type AchievementsCopyDefinitionByIndexFn = unsafe extern "C" fn(
    HAchievements,
    *const AchievementsCopyDefinitionByIndexOptions,
    *mut *mut AchievementDefinitionRecord,
) -> EosResult;
pub type AchievementsDefinitionReleaseFn =
    unsafe extern "C" fn(*mut AchievementDefinitionRecord);
pub type AchievementsCopyDefinitionV2ByIndexFn = unsafe extern "C" fn(
    HAchievements,
    *const AchievementsCopyDefinitionV2ByIndexOptions,
    *mut *mut AchievementDefinitionV2Record,
) -> EosResult;
pub type AchievementsCopyDefinitionV2ByAchievementIdFn = unsafe extern "C" fn(
    HAchievements,
    *const AchievementsCopyDefinitionV2ByAchievementIdOptions,
    *mut *mut AchievementDefinitionV2Record,
) -> EosResult;
pub type AchievementsUnlockAchievementsFn = unsafe extern "C" fn(
    HAchievements,
    *const AchievementsUnlockAchievementsOptions,
    *mut c_void,
    NotifyFn<AchievementsUnlockAchievementsCallbackInfo>,
);
pub type AchievementsDefinitionV2ReleaseFn =
    unsafe extern "C" fn(*mut AchievementDefinitionV2Record);

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

pub type StatsQueryStatsFn = unsafe extern "C" fn(
    HStats,
    *const StatsQueryStatsOptions,
    *mut c_void,
    NotifyFn<StatsQueryStatsCallbackInfo>,
);
pub type StatsGetStatsCountFn =
    unsafe extern "C" fn(HStats, *const StatsGetStatCountOptions) -> u32;
pub type StatsCopyStatByIndexFn = unsafe extern "C" fn(
    HStats,
    *const StatsCopyStatByIndexOptions,
    *mut *mut StatRecord,
) -> EosResult;
pub type StatsStatReleaseFn = unsafe extern "C" fn(*mut StatRecord);

// ---------------------------------------------------------------------------
// Commerce (ecom)
// ---------------------------------------------------------------------------

pub type EcomQueryOffersFn = unsafe extern "C" fn(
    HEcom,
    *const EcomQueryOffersOptions,
    *mut c_void,
    NotifyFn<EcomQueryOffersCallbackInfo>,
);
pub type EcomGetOfferCountFn =
    unsafe extern "C" fn(HEcom, *const EcomGetOfferCountOptions) -> u32;
pub type EcomCopyOfferByIndexFn = unsafe extern "C" fn(
    HEcom,
    *const EcomCopyOfferByIndexOptions,
    *mut *mut CatalogOfferRecord,
) -> EosResult;
pub type EcomGetOfferItemCountFn =
    unsafe extern "C" fn(HEcom, *const EcomGetOfferItemCountOptions) -> u32;
pub type EcomCopyOfferItemByIndexFn = unsafe extern "C" fn(
    HEcom,
    *const EcomCopyOfferItemByIndexOptions,
    *mut *mut CatalogItemRecord,
) -> EosResult;
pub type EcomQueryEntitlementsFn = unsafe extern "C" fn(
    HEcom,
    *const EcomQueryEntitlementsOptions,
    *mut c_void,
    NotifyFn<EcomQueryEntitlementsCallbackInfo>,
);
pub type EcomGetEntitlementsCountFn =
    unsafe extern "C" fn(HEcom, *const EcomGetEntitlementsCountOptions) -> u32;
pub type EcomCopyEntitlementByIndexFn = unsafe extern "C" fn(
    HEcom,
    *const EcomCopyEntitlementByIndexOptions,
    *mut *mut EntitlementRecord,
) -> EosResult;
pub type EcomEntitlementReleaseFn = unsafe extern "C" fn(*mut EntitlementRecord);
pub type EcomCatalogOfferReleaseFn = unsafe extern "C" fn(*mut CatalogOfferRecord);
pub type EcomCatalogItemReleaseFn = unsafe extern "C" fn(*mut CatalogItemRecord);

// ---------------------------------------------------------------------------
// Leaderboards
// ---------------------------------------------------------------------------

pub type LeaderboardsQueryDefinitionsFn = unsafe extern "C" fn(
    HLeaderboards,
    *const LeaderboardsQueryDefinitionsOptions,
    *mut c_void,
    NotifyFn<LeaderboardsQueryDefinitionsCallbackInfo>,
);
pub type LeaderboardsGetDefinitionCountFn =
    unsafe extern "C" fn(HLeaderboards, *const LeaderboardsGetDefinitionCountOptions) -> u32;
pub type LeaderboardsCopyDefinitionByIndexFn = unsafe extern "C" fn(
    HLeaderboards,
    *const LeaderboardsCopyDefinitionByIndexOptions,
    *mut *mut LeaderboardDefinitionRecord,
) -> EosResult;
pub type LeaderboardsDefinitionReleaseFn =
    unsafe extern "C" fn(*mut LeaderboardDefinitionRecord);

// ---------------------------------------------------------------------------
// Title storage
// ---------------------------------------------------------------------------

pub type TitleStorageQueryFileFn = unsafe extern "C" fn(
    HTitleStorage,
    *const TitleStorageQueryFileOptions,
    *mut c_void,
    NotifyFn<TitleStorageQueryFileCallbackInfo>,
);
pub type TitleStorageQueryFileListFn = unsafe extern "C" fn(
    HTitleStorage,
    *const TitleStorageQueryFileListOptions,
    *mut c_void,
    NotifyFn<TitleStorageQueryFileListCallbackInfo>,
);
pub type TitleStorageGetFileMetadataCountFn =
    unsafe extern "C" fn(HTitleStorage, *const TitleStorageGetFileMetadataCountOptions) -> u32;
pub type TitleStorageCopyFileMetadataAtIndexFn = unsafe extern "C" fn(
    HTitleStorage,
    *const TitleStorageCopyFileMetadataAtIndexOptions,
    *mut *mut FileMetadataRecord,
) -> EosResult;
pub type TitleStorageCopyFileMetadataByFilenameFn = unsafe extern "C" fn(
    HTitleStorage,
    *const TitleStorageCopyFileMetadataByFilenameOptions,
    *mut *mut FileMetadataRecord,
) -> EosResult;
pub type TitleStorageFileMetadataReleaseFn = unsafe extern "C" fn(*mut FileMetadataRecord);
pub type TitleStorageReadFileFn = unsafe extern "C" fn(
    HTitleStorage,
    *const TitleStorageReadFileOptions,
    *mut c_void,
    NotifyFn<TitleStorageReadFileCallbackInfo>,
) -> HFileTransferRequest;
pub type FileTransferRequestReleaseFn = unsafe extern "C" fn(HFileTransferRequest);
