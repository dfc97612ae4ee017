//! Typed function tables and the mandatory/optional binding policy.
//!
//! Every logical entry point gets one slot, grouped by feature. Mandatory
//! symbols ([`bind_required`]) abort initialization when absent — there is
//! no safe partial-binding state. Optional symbols ([`bind_optional`]) leave
//! their slot empty; the owning feature group reports itself unavailable and
//! its methods fail with [`SdkError::FeatureUnavailable`] instead of ever
//! dereferencing an empty slot.
//!
//! Bindings are written once here and read-only afterward.

use crate::error::SdkError;
use crate::ffi::functions::*;
use crate::module::{RawFnPtr, SymbolSource};

/// Resolve a mandatory entry point or fail naming the symbol.
pub(crate) fn bind_required<F: Copy>(
    source: &dyn SymbolSource,
    symbol: &'static str,
) -> Result<F, SdkError> {
    assert_eq!(size_of::<F>(), size_of::<RawFnPtr>());
    let address = source
        .address(symbol)
        .ok_or(SdkError::BindingError { symbol })?;
    // SAFETY: F is a function-pointer type, pointer-sized, and the address
    // came from the module's export surface for exactly this symbol.
    Ok(unsafe { std::mem::transmute_copy::<RawFnPtr, F>(&address) })
}

/// Resolve an optional entry point; absence leaves the slot empty.
pub(crate) fn bind_optional<F: Copy>(source: &dyn SymbolSource, symbol: &'static str) -> Option<F> {
    assert_eq!(size_of::<F>(), size_of::<RawFnPtr>());
    let address = source.address(symbol);
    if address.is_none() {
        tracing::debug!(symbol, "optional symbol not exported");
    }
    // SAFETY: as in bind_required.
    address.map(|address| unsafe { std::mem::transmute_copy::<RawFnPtr, F>(&address) })
}

/// Process-wide entry points: initialization, shutdown, id helpers.
#[derive(Debug)]
pub struct CoreFns {
    pub initialize: InitializeFn,
    pub shutdown: ShutdownFn,
    pub result_to_string: ResultToStringFn,
    pub epic_account_id_is_valid: EpicAccountIdIsValidFn,
    pub epic_account_id_to_string: EpicAccountIdToStringFn,
    pub epic_account_id_from_string: EpicAccountIdFromStringFn,
    pub product_user_id_is_valid: ProductUserIdIsValidFn,
    pub product_user_id_to_string: ProductUserIdToStringFn,
    pub product_user_id_from_string: ProductUserIdFromStringFn,
}

impl CoreFns {
    fn bind(source: &dyn SymbolSource) -> Result<Self, SdkError> {
        Ok(Self {
            initialize: bind_required(source, "EOS_Initialize")?,
            shutdown: bind_required(source, "EOS_Shutdown")?,
            result_to_string: bind_required(source, "EOS_EResult_ToString")?,
            epic_account_id_is_valid: bind_required(source, "EOS_EpicAccountId_IsValid")?,
            epic_account_id_to_string: bind_required(source, "EOS_EpicAccountId_ToString")?,
            epic_account_id_from_string: bind_required(source, "EOS_EpicAccountId_FromString")?,
            product_user_id_is_valid: bind_required(source, "EOS_ProductUserId_IsValid")?,
            product_user_id_to_string: bind_required(source, "EOS_ProductUserId_ToString")?,
            product_user_id_from_string: bind_required(source, "EOS_ProductUserId_FromString")?,
        })
    }
}

/// Platform lifecycle entry points. The interface getters for optional
/// feature groups are themselves optional.
#[derive(Debug)]
pub struct PlatformFns {
    pub create: PlatformCreateFn,
    pub tick: PlatformTickFn,
    pub set_override_locale_code: PlatformSetOverrideLocaleCodeFn,
    pub get_auth_interface: PlatformGetAuthInterfaceFn,
    pub get_connect_interface: PlatformGetConnectInterfaceFn,
    pub get_ecom_interface: PlatformGetEcomInterfaceFn,
    pub get_achievements_interface: Option<PlatformGetAchievementsInterfaceFn>,
    pub get_stats_interface: Option<PlatformGetStatsInterfaceFn>,
    pub get_leaderboards_interface: Option<PlatformGetLeaderboardsInterfaceFn>,
    pub get_title_storage_interface: Option<PlatformGetTitleStorageInterfaceFn>,
}

impl PlatformFns {
    fn bind(source: &dyn SymbolSource) -> Result<Self, SdkError> {
        Ok(Self {
            create: bind_required(source, "EOS_Platform_Create")?,
            tick: bind_required(source, "EOS_Platform_Tick")?,
            set_override_locale_code: bind_required(source, "EOS_Platform_SetOverrideLocaleCode")?,
            get_auth_interface: bind_required(source, "EOS_Platform_GetAuthInterface")?,
            get_connect_interface: bind_required(source, "EOS_Platform_GetConnectInterface")?,
            get_ecom_interface: bind_required(source, "EOS_Platform_GetEcomInterface")?,
            get_achievements_interface: bind_optional(
                source,
                "EOS_Platform_GetAchievementsInterface",
            ),
            get_stats_interface: bind_optional(source, "EOS_Platform_GetStatsInterface"),
            get_leaderboards_interface: bind_optional(
                source,
                "EOS_Platform_GetLeaderboardsInterface",
            ),
            get_title_storage_interface: bind_optional(
                source,
                "EOS_Platform_GetTitleStorageInterface",
            ),
        })
    }
}

/// Achievements entry points; the whole group is optional, and the v1/v2
/// definition paths may be present independently.
#[derive(Debug)]
pub struct AchievementsFns {
    pub query_definitions: Option<AchievementsQueryDefinitionsFn>,
    pub get_definition_count: Option<AchievementsGetDefinitionCountFn>,
    pub copy_definition_by_index: Option<AchievementsCopyDefinitionByIndexFn>,
    pub definition_release: Option<AchievementsDefinitionReleaseFn>,
    pub copy_definition_v2_by_index: Option<AchievementsCopyDefinitionV2ByIndexFn>,
    pub copy_definition_v2_by_achievement_id: Option<AchievementsCopyDefinitionV2ByAchievementIdFn>,
    pub unlock_achievements: Option<AchievementsUnlockAchievementsFn>,
    pub definition_v2_release: Option<AchievementsDefinitionV2ReleaseFn>,
}

impl AchievementsFns {
    fn bind(source: &dyn SymbolSource) -> Self {
        Self {
            query_definitions: bind_optional(source, "EOS_Achievements_QueryDefinitions"),
            get_definition_count: bind_optional(
                source,
                "EOS_Achievements_GetAchievementDefinitionCount",
            ),
            copy_definition_by_index: bind_optional(
                source,
                "EOS_Achievements_CopyAchievementDefinitionByIndex",
            ),
            definition_release: bind_optional(source, "EOS_Achievements_Definition_Release"),
            copy_definition_v2_by_index: bind_optional(
                source,
                "EOS_Achievements_CopyAchievementDefinitionV2ByIndex",
            ),
            copy_definition_v2_by_achievement_id: bind_optional(
                source,
                "EOS_Achievements_CopyAchievementDefinitionV2ByAchievementId",
            ),
            unlock_achievements: bind_optional(source, "EOS_Achievements_UnlockAchievements"),
            definition_v2_release: bind_optional(source, "EOS_Achievements_DefinitionV2_Release"),
        }
    }
}

/// Authentication entry points.
#[derive(Debug)]
pub struct AuthFns {
    pub login: AuthLoginFn,
    pub get_logged_in_account_by_index: AuthGetLoggedInAccountByIndexFn,
    pub copy_user_auth_token: AuthCopyUserAuthTokenFn,
    pub token_release: Option<AuthTokenReleaseFn>,
}

impl AuthFns {
    fn bind(source: &dyn SymbolSource) -> Result<Self, SdkError> {
        Ok(Self {
            login: bind_required(source, "EOS_Auth_Login")?,
            get_logged_in_account_by_index: bind_required(
                source,
                "EOS_Auth_GetLoggedInAccountByIndex",
            )?,
            copy_user_auth_token: bind_required(source, "EOS_Auth_CopyUserAuthToken")?,
            token_release: bind_optional(source, "EOS_Auth_Token_Release"),
        })
    }
}

/// Identity-linking (connect) entry points.
#[derive(Debug)]
pub struct ConnectFns {
    pub login: ConnectLoginFn,
    pub create_user: ConnectCreateUserFn,
    pub get_logged_in_user_by_index: ConnectGetLoggedInUserByIndexFn,
    pub get_product_user_id_mapping: ConnectGetProductUserIdMappingFn,
    pub get_external_account_mapping: ConnectGetExternalAccountMappingFn,
}

impl ConnectFns {
    fn bind(source: &dyn SymbolSource) -> Result<Self, SdkError> {
        Ok(Self {
            login: bind_required(source, "EOS_Connect_Login")?,
            create_user: bind_required(source, "EOS_Connect_CreateUser")?,
            get_logged_in_user_by_index: bind_required(
                source,
                "EOS_Connect_GetLoggedInUserByIndex",
            )?,
            get_product_user_id_mapping: bind_required(
                source,
                "EOS_Connect_GetProductUserIdMapping",
            )?,
            get_external_account_mapping: bind_required(
                source,
                "EOS_Connect_GetExternalAccountMapping",
            )?,
        })
    }
}

/// Commerce entry points.
#[derive(Debug)]
pub struct EcomFns {
    pub query_offers: EcomQueryOffersFn,
    pub get_offer_count: EcomGetOfferCountFn,
    pub copy_offer_by_index: EcomCopyOfferByIndexFn,
    pub get_offer_item_count: EcomGetOfferItemCountFn,
    pub copy_offer_item_by_index: EcomCopyOfferItemByIndexFn,
    pub query_entitlements: EcomQueryEntitlementsFn,
    pub get_entitlements_count: EcomGetEntitlementsCountFn,
    pub copy_entitlement_by_index: EcomCopyEntitlementByIndexFn,
    pub entitlement_release: EcomEntitlementReleaseFn,
    pub catalog_offer_release: EcomCatalogOfferReleaseFn,
    pub catalog_item_release: EcomCatalogItemReleaseFn,
}

impl EcomFns {
    fn bind(source: &dyn SymbolSource) -> Result<Self, SdkError> {
        Ok(Self {
            query_offers: bind_required(source, "EOS_Ecom_QueryOffers")?,
            get_offer_count: bind_required(source, "EOS_Ecom_GetOfferCount")?,
            copy_offer_by_index: bind_required(source, "EOS_Ecom_CopyOfferByIndex")?,
            get_offer_item_count: bind_required(source, "EOS_Ecom_GetOfferItemCount")?,
            copy_offer_item_by_index: bind_required(source, "EOS_Ecom_CopyOfferItemByIndex")?,
            query_entitlements: bind_required(source, "EOS_Ecom_QueryEntitlements")?,
            get_entitlements_count: bind_required(source, "EOS_Ecom_GetEntitlementsCount")?,
            copy_entitlement_by_index: bind_required(source, "EOS_Ecom_CopyEntitlementByIndex")?,
            entitlement_release: bind_required(source, "EOS_Ecom_Entitlement_Release")?,
            catalog_offer_release: bind_required(source, "EOS_Ecom_CatalogOffer_Release")?,
            catalog_item_release: bind_required(source, "EOS_Ecom_CatalogItem_Release")?,
        })
    }
}

/// Statistics entry points; the whole group is optional.
#[derive(Debug)]
pub struct StatsFns {
    pub query_stats: Option<StatsQueryStatsFn>,
    pub get_stats_count: Option<StatsGetStatsCountFn>,
    pub copy_stat_by_index: Option<StatsCopyStatByIndexFn>,
    pub stat_release: Option<StatsStatReleaseFn>,
}

impl StatsFns {
    fn bind(source: &dyn SymbolSource) -> Self {
        Self {
            query_stats: bind_optional(source, "EOS_Stats_QueryStats"),
            get_stats_count: bind_optional(source, "EOS_Stats_GetStatsCount"),
            copy_stat_by_index: bind_optional(source, "EOS_Stats_CopyStatByIndex"),
            stat_release: bind_optional(source, "EOS_Stats_Stat_Release"),
        }
    }
}

/// Leaderboards entry points; the whole group is optional.
#[derive(Debug)]
pub struct LeaderboardsFns {
    pub query_definitions: Option<LeaderboardsQueryDefinitionsFn>,
    pub get_definition_count: Option<LeaderboardsGetDefinitionCountFn>,
    pub copy_definition_by_index: Option<LeaderboardsCopyDefinitionByIndexFn>,
    pub definition_release: Option<LeaderboardsDefinitionReleaseFn>,
}

impl LeaderboardsFns {
    fn bind(source: &dyn SymbolSource) -> Self {
        Self {
            query_definitions: bind_optional(source, "EOS_Leaderboards_QueryLeaderboardDefinitions"),
            get_definition_count: bind_optional(
                source,
                "EOS_Leaderboards_GetLeaderboardDefinitionCount",
            ),
            copy_definition_by_index: bind_optional(
                source,
                "EOS_Leaderboards_CopyLeaderboardDefinitionByIndex",
            ),
            definition_release: bind_optional(source, "EOS_Leaderboards_Definition_Release"),
        }
    }
}

/// Remote file storage entry points; the whole group is optional.
#[derive(Debug)]
pub struct TitleStorageFns {
    pub query_file: Option<TitleStorageQueryFileFn>,
    pub query_file_list: Option<TitleStorageQueryFileListFn>,
    pub copy_file_metadata_by_filename: Option<TitleStorageCopyFileMetadataByFilenameFn>,
    pub get_file_metadata_count: Option<TitleStorageGetFileMetadataCountFn>,
    pub copy_file_metadata_at_index: Option<TitleStorageCopyFileMetadataAtIndexFn>,
    pub file_metadata_release: Option<TitleStorageFileMetadataReleaseFn>,
    pub read_file: Option<TitleStorageReadFileFn>,
    pub transfer_request_release: Option<FileTransferRequestReleaseFn>,
}

impl TitleStorageFns {
    fn bind(source: &dyn SymbolSource) -> Self {
        Self {
            query_file: bind_optional(source, "EOS_TitleStorage_QueryFile"),
            query_file_list: bind_optional(source, "EOS_TitleStorage_QueryFileList"),
            copy_file_metadata_by_filename: bind_optional(
                source,
                "EOS_TitleStorage_CopyFileMetadataByFilename",
            ),
            get_file_metadata_count: bind_optional(source, "EOS_TitleStorage_GetFileMetadataCount"),
            copy_file_metadata_at_index: bind_optional(
                source,
                "EOS_TitleStorage_CopyFileMetadataAtIndex",
            ),
            file_metadata_release: bind_optional(source, "EOS_TitleStorage_FileMetadata_Release"),
            read_file: bind_optional(source, "EOS_TitleStorage_ReadFile"),
            transfer_request_release: bind_optional(
                source,
                "EOS_TitleStorageFileTransferRequest_Release",
            ),
        }
    }
}

/// Every bound entry point, grouped by feature.
#[derive(Debug)]
pub struct SdkFns {
    pub core: CoreFns,
    pub platform: PlatformFns,
    pub achievements: AchievementsFns,
    pub auth: AuthFns,
    pub connect: ConnectFns,
    pub ecom: EcomFns,
    pub stats: StatsFns,
    pub leaderboards: LeaderboardsFns,
    pub title_storage: TitleStorageFns,
}

impl SdkFns {
    /// Bind all groups. A mandatory failure aborts immediately: groups after
    /// the failing symbol are never consulted.
    pub fn bind(source: &dyn SymbolSource) -> Result<Self, SdkError> {
        Ok(Self {
            core: CoreFns::bind(source)?,
            platform: PlatformFns::bind(source)?,
            achievements: AchievementsFns::bind(source),
            auth: AuthFns::bind(source)?,
            connect: ConnectFns::bind(source)?,
            ecom: EcomFns::bind(source)?,
            stats: StatsFns::bind(source),
            leaderboards: LeaderboardsFns::bind(source),
            title_storage: TitleStorageFns::bind(source),
        })
    }

    /// Human-readable form of a native result code, via the module's own
    /// stringifier; falls back to the raw value.
    pub(crate) fn result_name(&self, code: crate::ffi::EosResult) -> String {
        // SAFETY: the entry point returns a static string owned by the
        // module, which lives as long as the process.
        let name = unsafe { (self.core.result_to_string)(code) };
        if name.is_null() {
            code.raw().to_string()
        } else {
            unsafe { crate::ffi::owned_or_empty(name) }
        }
    }

    pub(crate) fn operation_failed(
        &self,
        operation: &'static str,
        code: crate::ffi::EosResult,
    ) -> SdkError {
        SdkError::OperationFailed {
            operation,
            code: self.result_name(code),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::ffi::c_void;

    use super::*;

    /// Names the original loader treats as mandatory, in bind order.
    pub(crate) const MANDATORY: &[&str] = &[
        "EOS_Initialize",
        "EOS_Shutdown",
        "EOS_EResult_ToString",
        "EOS_EpicAccountId_IsValid",
        "EOS_EpicAccountId_ToString",
        "EOS_EpicAccountId_FromString",
        "EOS_ProductUserId_IsValid",
        "EOS_ProductUserId_ToString",
        "EOS_ProductUserId_FromString",
        "EOS_Platform_Create",
        "EOS_Platform_Tick",
        "EOS_Platform_SetOverrideLocaleCode",
        "EOS_Platform_GetAuthInterface",
        "EOS_Platform_GetConnectInterface",
        "EOS_Platform_GetEcomInterface",
        "EOS_Auth_Login",
        "EOS_Auth_GetLoggedInAccountByIndex",
        "EOS_Auth_CopyUserAuthToken",
        "EOS_Connect_Login",
        "EOS_Connect_CreateUser",
        "EOS_Connect_GetLoggedInUserByIndex",
        "EOS_Connect_GetProductUserIdMapping",
        "EOS_Connect_GetExternalAccountMapping",
        "EOS_Ecom_QueryOffers",
        "EOS_Ecom_GetOfferCount",
        "EOS_Ecom_CopyOfferByIndex",
        "EOS_Ecom_GetOfferItemCount",
        "EOS_Ecom_CopyOfferItemByIndex",
        "EOS_Ecom_QueryEntitlements",
        "EOS_Ecom_GetEntitlementsCount",
        "EOS_Ecom_CopyEntitlementByIndex",
        "EOS_Ecom_Entitlement_Release",
        "EOS_Ecom_CatalogOffer_Release",
        "EOS_Ecom_CatalogItem_Release",
    ];

    extern "C" fn placeholder() {}

    /// Table-backed source recording every queried name.
    pub(crate) struct FakeSource {
        exported: HashSet<&'static str>,
        queried: RefCell<Vec<String>>,
    }

    impl FakeSource {
        pub(crate) fn exporting(names: &[&'static str]) -> Self {
            Self {
                exported: names.iter().copied().collect(),
                queried: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn mandatory_only() -> Self {
            Self::exporting(MANDATORY)
        }

        fn queried(&self) -> Vec<String> {
            self.queried.borrow().clone()
        }
    }

    impl SymbolSource for FakeSource {
        fn address(&self, name: &str) -> Option<RawFnPtr> {
            self.queried.borrow_mut().push(name.to_owned());
            // Never called through; the tests only exercise binding policy.
            self.exported
                .contains(name)
                .then_some(placeholder as *const c_void)
        }
    }

    #[test]
    fn test_mandatory_only_module_binds() {
        let source = FakeSource::mandatory_only();
        let fns = SdkFns::bind(&source).unwrap();

        assert!(fns.platform.get_achievements_interface.is_none());
        assert!(fns.achievements.query_definitions.is_none());
        assert!(fns.stats.query_stats.is_none());
        assert!(fns.leaderboards.query_definitions.is_none());
        assert!(fns.title_storage.read_file.is_none());
        assert!(fns.auth.token_release.is_none());
    }

    #[test]
    fn test_missing_mandatory_symbol_aborts_naming_it() {
        let mut exported: Vec<&str> = MANDATORY.to_vec();
        exported.retain(|&name| name != "EOS_Connect_CreateUser");
        let source = FakeSource::exporting(&exported);

        let err = SdkFns::bind(&source).unwrap_err();
        assert!(matches!(
            err,
            SdkError::BindingError {
                symbol: "EOS_Connect_CreateUser"
            }
        ));

        // No further bindings occur after the failure.
        let queried = source.queried();
        assert_eq!(queried.last().unwrap(), "EOS_Connect_CreateUser");
        assert!(!queried.iter().any(|name| name == "EOS_Ecom_QueryOffers"));
    }

    #[test]
    fn test_optional_symbols_bind_when_present() {
        let mut exported: Vec<&str> = MANDATORY.to_vec();
        exported.extend([
            "EOS_Platform_GetAchievementsInterface",
            "EOS_Achievements_QueryDefinitions",
            "EOS_Achievements_GetAchievementDefinitionCount",
            "EOS_Achievements_CopyAchievementDefinitionV2ByIndex",
            "EOS_Achievements_DefinitionV2_Release",
            "EOS_Stats_QueryStats",
        ]);
        let source = FakeSource::exporting(&exported);

        let fns = SdkFns::bind(&source).unwrap();
        assert!(fns.platform.get_achievements_interface.is_some());
        assert!(fns.achievements.query_definitions.is_some());
        assert!(fns.achievements.copy_definition_v2_by_index.is_some());
        assert!(fns.achievements.copy_definition_by_index.is_none());
        assert!(fns.stats.query_stats.is_some());
        assert!(fns.stats.copy_stat_by_index.is_none());
    }
}
