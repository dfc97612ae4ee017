//! Achievements feature group (optional).
//!
//! The definition surface exists in two generations: the legacy v1 records
//! and the v2 records newer modules export. Either, both, or neither may be
//! present; callers pick a path with [`Achievements::has_v2`] /
//! [`Achievements::has_v1`].

use std::ptr;

use eosdump_core::fallback::run_with_fallback;

use super::{classify_completion, cstring, finish_fallback};
use crate::bind::SdkFns;
use crate::error::SdkError;
use crate::ffi::options::{
    ACHIEVEMENTS_COPYDEFINITIONBYINDEX_API_LATEST,
    ACHIEVEMENTS_COPYDEFINITIONV2BYACHIEVEMENTID_API_LATEST,
    ACHIEVEMENTS_COPYDEFINITIONV2BYINDEX_API_LATEST,
    ACHIEVEMENTS_GETACHIEVEMENTDEFINITIONCOUNT_API_LATEST,
    ACHIEVEMENTS_QUERYDEFINITIONS_API_LATEST, ACHIEVEMENTS_UNLOCKACHIEVEMENTS_API_LATEST,
    AchievementsCopyDefinitionByIndexOptions, AchievementsCopyDefinitionV2ByAchievementIdOptions,
    AchievementsCopyDefinitionV2ByIndexOptions, AchievementsGetDefinitionCountOptions,
    AchievementsQueryDefinitionsOptions, AchievementsUnlockAchievementsOptions,
};
use crate::ffi::records::{
    AchievementDefinitionRecord, AchievementDefinitionV2Record,
    AchievementsQueryDefinitionsCallbackInfo, AchievementsUnlockAchievementsCallbackInfo,
    StatThresholdsRecord,
};
use crate::ffi::{EpicAccountId, HAchievements, ProductUserId, owned_or_empty};
use crate::model::{AchievementDefinition, AchievementDefinitionV1, StatThreshold};
use crate::shim::ArmedCallback;
use crate::wait::{ResultSlot, WaitPolicy};

/// Symbol whose absence disables this whole group.
const INTERFACE_SYMBOL: &str = "EOS_Platform_GetAchievementsInterface";

pub struct Achievements<'a> {
    fns: &'a SdkFns,
    handle: HAchievements,
}

impl<'a> Achievements<'a> {
    pub(crate) fn new(fns: &'a SdkFns, handle: HAchievements) -> Self {
        Self { fns, handle }
    }

    pub fn is_available(&self) -> bool {
        !self.handle.is_null()
    }

    /// Whether the legacy v1 definition path is usable.
    pub fn has_v1(&self) -> bool {
        self.is_available() && self.fns.achievements.copy_definition_by_index.is_some()
    }

    /// Whether the v2 definition path is usable.
    pub fn has_v2(&self) -> bool {
        self.is_available() && self.fns.achievements.copy_definition_v2_by_index.is_some()
    }

    fn entry<F: Copy>(&self, slot: Option<F>, symbol: &'static str) -> Result<F, SdkError> {
        if self.handle.is_null() {
            return Err(SdkError::FeatureUnavailable {
                symbol: INTERFACE_SYMBOL,
            });
        }
        slot.ok_or(SdkError::FeatureUnavailable { symbol })
    }

    /// Fetch the title's achievement definitions into the SDK-side cache,
    /// walking the version ladder on a version-incompatible result.
    pub fn query_definitions(
        &self,
        epic_user: EpicAccountId,
        user: ProductUserId,
        policy: &WaitPolicy,
    ) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Achievements_QueryDefinitions";
        let query = self.entry(self.fns.achievements.query_definitions, OPERATION)?;

        let outcome = run_with_fallback(ACHIEVEMENTS_QUERYDEFINITIONS_API_LATEST, |version| {
            let slot = ResultSlot::new(OPERATION);
            let completer = slot.completer();
            let armed =
                ArmedCallback::new(move |info: &AchievementsQueryDefinitionsCallbackInfo| {
                    completer.complete(info.result_code);
                });

            let options = AchievementsQueryDefinitionsOptions {
                api_version: version,
                local_user_id: user,
                epic_user_id_deprecated: epic_user,
                hidden_achievement_ids_deprecated: ptr::null(),
                hidden_achievements_count_deprecated: 0,
            };

            tracing::trace!(version, "querying achievement definitions");
            // SAFETY: options outlive the call; the shim owns the
            // continuation until the callback fires.
            unsafe { query(self.handle, &options, armed.client_data(), armed.notify()) };
            armed.commit();
            classify_completion(self.fns, OPERATION, slot.wait(policy))
        });

        finish_fallback(OPERATION, outcome).map(|_| ())
    }

    pub fn definition_count(&self) -> Result<u32, SdkError> {
        let count = self.entry(
            self.fns.achievements.get_definition_count,
            "EOS_Achievements_GetAchievementDefinitionCount",
        )?;
        let options = AchievementsGetDefinitionCountOptions {
            api_version: ACHIEVEMENTS_GETACHIEVEMENTDEFINITIONCOUNT_API_LATEST,
        };
        // SAFETY: plain counter over the cached query result.
        Ok(unsafe { count(self.handle, &options) })
    }

    pub fn copy_definition_v2(&self, index: u32) -> Result<AchievementDefinition, SdkError> {
        const OPERATION: &str = "EOS_Achievements_CopyAchievementDefinitionV2ByIndex";
        let copy = self.entry(self.fns.achievements.copy_definition_v2_by_index, OPERATION)?;
        let release = self.entry(
            self.fns.achievements.definition_v2_release,
            "EOS_Achievements_DefinitionV2_Release",
        )?;

        let options = AchievementsCopyDefinitionV2ByIndexOptions {
            api_version: ACHIEVEMENTS_COPYDEFINITIONV2BYINDEX_API_LATEST,
            achievement_index: index,
        };
        let mut record: *mut AchievementDefinitionV2Record = ptr::null_mut();

        // SAFETY: out-pointer receives a record owned by the SDK, released
        // below.
        let code = unsafe { copy(self.handle, &options, &mut record) };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }

        // SAFETY: the record is valid until released.
        let definition = unsafe { definition_v2(record) };
        // SAFETY: record came from the matching copy call.
        unsafe { release(record) };
        Ok(definition)
    }

    pub fn copy_definition_v1(&self, index: u32) -> Result<AchievementDefinitionV1, SdkError> {
        const OPERATION: &str = "EOS_Achievements_CopyAchievementDefinitionByIndex";
        let copy = self.entry(self.fns.achievements.copy_definition_by_index, OPERATION)?;
        let release = self.entry(
            self.fns.achievements.definition_release,
            "EOS_Achievements_Definition_Release",
        )?;

        let options = AchievementsCopyDefinitionByIndexOptions {
            api_version: ACHIEVEMENTS_COPYDEFINITIONBYINDEX_API_LATEST,
            achievement_index: index,
        };
        let mut record: *mut AchievementDefinitionRecord = ptr::null_mut();

        // SAFETY: as in copy_definition_v2.
        let code = unsafe { copy(self.handle, &options, &mut record) };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }

        // SAFETY: the record is valid until released.
        let definition = unsafe {
            AchievementDefinitionV1 {
                achievement_id: owned_or_empty((*record).achievement_id),
                display_name: owned_or_empty((*record).display_name),
                description: owned_or_empty((*record).description),
                locked_display_name: owned_or_empty((*record).locked_display_name),
                locked_description: owned_or_empty((*record).locked_description),
                hidden_description: owned_or_empty((*record).hidden_description),
                completion_description: owned_or_empty((*record).completion_description),
                unlocked_icon_id: owned_or_empty((*record).unlocked_icon_id),
                locked_icon_id: owned_or_empty((*record).locked_icon_id),
                is_hidden: (*record).is_hidden != 0,
                stat_thresholds: thresholds(
                    (*record).stat_thresholds,
                    (*record).stat_thresholds_count.max(0) as usize,
                ),
            }
        };
        // SAFETY: record came from the matching copy call.
        unsafe { release(record) };
        Ok(definition)
    }

    /// Copy one definition by its achievement id instead of by index.
    pub fn copy_definition_v2_by_id(
        &self,
        achievement_id: &str,
    ) -> Result<AchievementDefinition, SdkError> {
        const OPERATION: &str = "EOS_Achievements_CopyAchievementDefinitionV2ByAchievementId";
        let copy = self.entry(
            self.fns.achievements.copy_definition_v2_by_achievement_id,
            OPERATION,
        )?;
        let release = self.entry(
            self.fns.achievements.definition_v2_release,
            "EOS_Achievements_DefinitionV2_Release",
        )?;
        let achievement_id = cstring(achievement_id, OPERATION)?;

        let options = AchievementsCopyDefinitionV2ByAchievementIdOptions {
            api_version: ACHIEVEMENTS_COPYDEFINITIONV2BYACHIEVEMENTID_API_LATEST,
            achievement_id: achievement_id.as_ptr(),
        };
        let mut record: *mut AchievementDefinitionV2Record = ptr::null_mut();

        // SAFETY: as in copy_definition_v2.
        let code = unsafe { copy(self.handle, &options, &mut record) };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }
        // SAFETY: the record is valid until released.
        let definition = unsafe { definition_v2(record) };
        // SAFETY: record came from the matching copy call.
        unsafe { release(record) };
        Ok(definition)
    }

    /// Unlock achievements for the player. Blocks until completion.
    pub fn unlock(
        &self,
        user: ProductUserId,
        achievement_ids: &[&str],
        policy: &WaitPolicy,
    ) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Achievements_UnlockAchievements";
        let unlock = self.entry(self.fns.achievements.unlock_achievements, OPERATION)?;

        let ids = achievement_ids
            .iter()
            .map(|id| cstring(id, OPERATION))
            .collect::<Result<Vec<_>, _>>()?;
        let id_ptrs: Vec<_> = ids.iter().map(|id| id.as_ptr()).collect();

        let slot = ResultSlot::new(OPERATION);
        let completer = slot.completer();
        let armed =
            ArmedCallback::new(move |info: &AchievementsUnlockAchievementsCallbackInfo| {
                completer.complete(info.result_code);
            });

        let options = AchievementsUnlockAchievementsOptions {
            api_version: ACHIEVEMENTS_UNLOCKACHIEVEMENTS_API_LATEST,
            user_id: user,
            achievement_ids: id_ptrs.as_ptr(),
            achievement_count: id_ptrs.len() as u32,
        };

        // SAFETY: options and the id strings outlive the call; the shim owns
        // the continuation.
        unsafe { unlock(self.handle, &options, armed.client_data(), armed.notify()) };
        armed.commit();
        super::complete_simple(self.fns, OPERATION, &slot, policy)
    }
}

/// Copy a v2 record into owned data.
///
/// # Safety
///
/// `record` must point at a live record from one of the v2 copy calls.
unsafe fn definition_v2(record: *const AchievementDefinitionV2Record) -> AchievementDefinition {
    unsafe {
        AchievementDefinition {
            achievement_id: owned_or_empty((*record).achievement_id),
            unlocked_display_name: owned_or_empty((*record).unlocked_display_name),
            unlocked_description: owned_or_empty((*record).unlocked_description),
            locked_display_name: owned_or_empty((*record).locked_display_name),
            locked_description: owned_or_empty((*record).locked_description),
            flavor_text: owned_or_empty((*record).flavor_text),
            unlocked_icon_url: owned_or_empty((*record).unlocked_icon_url),
            locked_icon_url: owned_or_empty((*record).locked_icon_url),
            is_hidden: (*record).is_hidden != 0,
            stat_thresholds: thresholds(
                (*record).stat_thresholds,
                (*record).stat_thresholds_count as usize,
            ),
        }
    }
}

/// Copy a native threshold array into owned records.
unsafe fn thresholds(records: *const StatThresholdsRecord, count: usize) -> Vec<StatThreshold> {
    if records.is_null() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            // SAFETY: the caller guarantees `count` in-bounds entries.
            let record = unsafe { &*records.add(i) };
            StatThreshold {
                name: unsafe { owned_or_empty(record.name) },
                threshold: record.threshold,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;
    use crate::bind::tests::FakeSource;

    #[test]
    fn test_unavailable_group_never_dereferences_empty_slots() {
        let source = FakeSource::mandatory_only();
        let fns = SdkFns::bind(&source).unwrap();
        let achievements = Achievements::new(&fns, ptr::null_mut());

        assert!(!achievements.is_available());
        assert!(!achievements.has_v1());
        assert!(!achievements.has_v2());

        let err = achievements.definition_count().unwrap_err();
        assert!(matches!(
            err,
            SdkError::FeatureUnavailable {
                symbol: "EOS_Platform_GetAchievementsInterface"
            }
        ));
    }

    #[test]
    fn test_partially_bound_group_names_missing_entry_point() {
        let source = FakeSource::mandatory_only();
        let fns = SdkFns::bind(&source).unwrap();
        let achievements = Achievements::new(&fns, 0x1 as HAchievements);

        // The group's handle exists, but the definition copy path does not.
        let err = achievements.copy_definition_v2(0).unwrap_err();
        assert!(matches!(
            err,
            SdkError::FeatureUnavailable {
                symbol: "EOS_Achievements_CopyAchievementDefinitionV2ByIndex"
            }
        ));
    }
}
