//! Leaderboards feature group (optional).

use std::ptr;

use eosdump_core::fallback::run_with_fallback;

use super::{classify_completion, finish_fallback};
use crate::bind::SdkFns;
use crate::error::SdkError;
use crate::ffi::options::{
    LEADERBOARDS_COPYLEADERBOARDDEFINITIONBYINDEX_API_LATEST,
    LEADERBOARDS_GETLEADERBOARDDEFINITIONCOUNT_API_LATEST,
    LEADERBOARDS_QUERYLEADERBOARDDEFINITIONS_API_LATEST,
    LeaderboardsCopyDefinitionByIndexOptions, LeaderboardsGetDefinitionCountOptions,
    LeaderboardsQueryDefinitionsOptions,
};
use crate::ffi::records::{
    LeaderboardDefinitionRecord, LeaderboardsQueryDefinitionsCallbackInfo,
};
use crate::ffi::{HLeaderboards, LEADERBOARDS_TIME_UNDEFINED, ProductUserId, owned_or_empty};
use crate::model::LeaderboardDefinition;
use crate::shim::ArmedCallback;
use crate::wait::{ResultSlot, WaitPolicy};

/// Symbol whose absence disables this whole group.
const INTERFACE_SYMBOL: &str = "EOS_Platform_GetLeaderboardsInterface";

pub struct Leaderboards<'a> {
    fns: &'a SdkFns,
    handle: HLeaderboards,
}

impl<'a> Leaderboards<'a> {
    pub(crate) fn new(fns: &'a SdkFns, handle: HLeaderboards) -> Self {
        Self { fns, handle }
    }

    pub fn is_available(&self) -> bool {
        !self.handle.is_null() && self.fns.leaderboards.query_definitions.is_some()
    }

    fn entry<F: Copy>(&self, slot: Option<F>, symbol: &'static str) -> Result<F, SdkError> {
        if self.handle.is_null() {
            return Err(SdkError::FeatureUnavailable {
                symbol: INTERFACE_SYMBOL,
            });
        }
        slot.ok_or(SdkError::FeatureUnavailable { symbol })
    }

    /// Fetch the title's leaderboard definitions into the SDK-side cache,
    /// walking the version ladder on a version-incompatible result.
    pub fn query_definitions(
        &self,
        user: ProductUserId,
        policy: &WaitPolicy,
    ) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Leaderboards_QueryLeaderboardDefinitions";
        let query = self.entry(self.fns.leaderboards.query_definitions, OPERATION)?;

        let outcome = run_with_fallback(
            LEADERBOARDS_QUERYLEADERBOARDDEFINITIONS_API_LATEST,
            |version| {
                let slot = ResultSlot::new(OPERATION);
                let completer = slot.completer();
                let armed =
                    ArmedCallback::new(move |info: &LeaderboardsQueryDefinitionsCallbackInfo| {
                        completer.complete(info.result_code);
                    });

                let options = LeaderboardsQueryDefinitionsOptions {
                    api_version: version,
                    start_time: LEADERBOARDS_TIME_UNDEFINED,
                    end_time: LEADERBOARDS_TIME_UNDEFINED,
                    local_user_id: user,
                };

                tracing::trace!(version, "querying leaderboard definitions");
                // SAFETY: options outlive the call; the shim owns the
                // continuation until the callback fires.
                unsafe { query(self.handle, &options, armed.client_data(), armed.notify()) };
                armed.commit();
                classify_completion(self.fns, OPERATION, slot.wait(policy))
            },
        );

        finish_fallback(OPERATION, outcome).map(|_| ())
    }

    pub fn definition_count(&self) -> Result<u32, SdkError> {
        let count = self.entry(
            self.fns.leaderboards.get_definition_count,
            "EOS_Leaderboards_GetLeaderboardDefinitionCount",
        )?;
        let options = LeaderboardsGetDefinitionCountOptions {
            api_version: LEADERBOARDS_GETLEADERBOARDDEFINITIONCOUNT_API_LATEST,
        };
        // SAFETY: plain counter over the cached query result.
        Ok(unsafe { count(self.handle, &options) })
    }

    pub fn copy_definition(&self, index: u32) -> Result<LeaderboardDefinition, SdkError> {
        const OPERATION: &str = "EOS_Leaderboards_CopyLeaderboardDefinitionByIndex";
        let copy = self.entry(self.fns.leaderboards.copy_definition_by_index, OPERATION)?;
        let release = self.entry(
            self.fns.leaderboards.definition_release,
            "EOS_Leaderboards_Definition_Release",
        )?;

        let options = LeaderboardsCopyDefinitionByIndexOptions {
            api_version: LEADERBOARDS_COPYLEADERBOARDDEFINITIONBYINDEX_API_LATEST,
            leaderboard_index: index,
        };
        let mut record: *mut LeaderboardDefinitionRecord = ptr::null_mut();

        // SAFETY: out-pointer receives a record owned by the SDK, released
        // below.
        let code = unsafe { copy(self.handle, &options, &mut record) };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }

        // SAFETY: the record is valid until released.
        let definition = unsafe {
            LeaderboardDefinition {
                leaderboard_id: owned_or_empty((*record).leaderboard_id),
                stat_name: owned_or_empty((*record).stat_name),
                aggregation: (*record).aggregation,
                start_time: (*record).start_time,
                end_time: (*record).end_time,
            }
        };
        // SAFETY: record came from the matching copy call.
        unsafe { release(record) };
        Ok(definition)
    }
}
