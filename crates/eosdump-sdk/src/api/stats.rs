//! Statistics feature group (optional).

use std::ptr;

use super::complete_simple;
use crate::bind::SdkFns;
use crate::error::SdkError;
use crate::ffi::options::{
    STATS_COPYSTATBYINDEX_API_LATEST, STATS_GETSTATSCOUNT_API_LATEST, STATS_QUERYSTATS_API_LATEST,
    StatsCopyStatByIndexOptions, StatsGetStatCountOptions, StatsQueryStatsOptions,
};
use crate::ffi::records::{StatRecord, StatsQueryStatsCallbackInfo};
use crate::ffi::{HStats, ProductUserId, STATS_TIME_UNDEFINED, owned_or_empty};
use crate::model::PlayerStat;
use crate::shim::ArmedCallback;
use crate::wait::{ResultSlot, WaitPolicy};

/// Symbol whose absence disables this whole group.
const INTERFACE_SYMBOL: &str = "EOS_Platform_GetStatsInterface";

pub struct Stats<'a> {
    fns: &'a SdkFns,
    handle: HStats,
}

impl<'a> Stats<'a> {
    pub(crate) fn new(fns: &'a SdkFns, handle: HStats) -> Self {
        Self { fns, handle }
    }

    pub fn is_available(&self) -> bool {
        !self.handle.is_null() && self.fns.stats.query_stats.is_some()
    }

    /// Resolve an optional entry point, or report the group unavailable by
    /// the missing symbol's name.
    fn entry<F: Copy>(&self, slot: Option<F>, symbol: &'static str) -> Result<F, SdkError> {
        if self.handle.is_null() {
            return Err(SdkError::FeatureUnavailable {
                symbol: INTERFACE_SYMBOL,
            });
        }
        slot.ok_or(SdkError::FeatureUnavailable { symbol })
    }

    /// Fetch the player's stats into the SDK-side cache.
    pub fn query_stats(&self, user: ProductUserId, policy: &WaitPolicy) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Stats_QueryStats";
        let query = self.entry(self.fns.stats.query_stats, OPERATION)?;

        let slot = ResultSlot::new(OPERATION);
        let completer = slot.completer();
        let armed = ArmedCallback::new(move |info: &StatsQueryStatsCallbackInfo| {
            completer.complete(info.result_code);
        });

        let options = StatsQueryStatsOptions {
            api_version: STATS_QUERYSTATS_API_LATEST,
            local_user_id: user,
            start_time: STATS_TIME_UNDEFINED,
            end_time: STATS_TIME_UNDEFINED,
            stat_names: ptr::null(),
            stat_names_count: 0,
            target_user_id: user,
        };

        tracing::trace!("querying stats");
        // SAFETY: options outlive the call; the shim owns the continuation.
        unsafe { query(self.handle, &options, armed.client_data(), armed.notify()) };
        armed.commit();
        complete_simple(self.fns, OPERATION, &slot, policy)
    }

    pub fn count(&self, user: ProductUserId) -> Result<u32, SdkError> {
        let count = self.entry(self.fns.stats.get_stats_count, "EOS_Stats_GetStatsCount")?;
        let options = StatsGetStatCountOptions {
            api_version: STATS_GETSTATSCOUNT_API_LATEST,
            target_user_id: user,
        };
        // SAFETY: plain counter over the cached query result.
        Ok(unsafe { count(self.handle, &options) })
    }

    pub fn copy_stat(&self, user: ProductUserId, index: u32) -> Result<PlayerStat, SdkError> {
        const OPERATION: &str = "EOS_Stats_CopyStatByIndex";
        let copy = self.entry(self.fns.stats.copy_stat_by_index, OPERATION)?;
        let release = self.entry(self.fns.stats.stat_release, "EOS_Stats_Stat_Release")?;

        let options = StatsCopyStatByIndexOptions {
            api_version: STATS_COPYSTATBYINDEX_API_LATEST,
            target_user_id: user,
            stat_index: index,
        };
        let mut record: *mut StatRecord = ptr::null_mut();

        // SAFETY: out-pointer receives a record owned by the SDK, released
        // below.
        let code = unsafe { copy(self.handle, &options, &mut record) };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }

        // SAFETY: the record is valid until released.
        let stat = unsafe {
            PlayerStat {
                name: owned_or_empty((*record).name),
                value: (*record).value,
                start_time: (*record).start_time,
                end_time: (*record).end_time,
            }
        };
        // SAFETY: record came from the matching copy call.
        unsafe { release(record) };
        Ok(stat)
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;
    use crate::bind::tests::FakeSource;

    #[test]
    fn test_missing_interface_reports_getter_symbol() {
        let source = FakeSource::mandatory_only();
        let fns = SdkFns::bind(&source).unwrap();
        let stats = Stats::new(&fns, ptr::null_mut());

        assert!(!stats.is_available());
        let err = stats.count(ptr::null_mut()).unwrap_err();
        assert!(matches!(
            err,
            SdkError::FeatureUnavailable {
                symbol: "EOS_Platform_GetStatsInterface"
            }
        ));
    }

    #[test]
    fn test_missing_entry_point_reports_its_symbol() {
        let source = FakeSource::mandatory_only();
        let fns = SdkFns::bind(&source).unwrap();
        // Interface handle present, entry points absent.
        let stats = Stats::new(&fns, 0x1 as HStats);

        assert!(!stats.is_available());
        let err = stats.count(ptr::null_mut()).unwrap_err();
        assert!(matches!(
            err,
            SdkError::FeatureUnavailable {
                symbol: "EOS_Stats_GetStatsCount"
            }
        ));
    }
}
