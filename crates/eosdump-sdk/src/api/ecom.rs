//! Commerce feature group: catalog offers, offer items, entitlements.

use std::ptr;

use super::{complete_simple, cstring};
use crate::bind::SdkFns;
use crate::error::SdkError;
use crate::ffi::options::{
    ECOM_COPYENTITLEMENTBYINDEX_API_LATEST, ECOM_COPYOFFERBYINDEX_API_LATEST,
    ECOM_COPYOFFERITEMBYINDEX_API_LATEST, ECOM_GETENTITLEMENTSCOUNT_API_LATEST,
    ECOM_GETOFFERCOUNT_API_LATEST, ECOM_GETOFFERITEMCOUNT_API_LATEST,
    ECOM_QUERYENTITLEMENTS_API_LATEST, ECOM_QUERYOFFERS_API_LATEST,
    EcomCopyEntitlementByIndexOptions, EcomCopyOfferByIndexOptions,
    EcomCopyOfferItemByIndexOptions, EcomGetEntitlementsCountOptions, EcomGetOfferCountOptions,
    EcomGetOfferItemCountOptions, EcomQueryEntitlementsOptions, EcomQueryOffersOptions,
};
use crate::ffi::records::{
    CatalogItemRecord, CatalogOfferRecord, EcomQueryEntitlementsCallbackInfo,
    EcomQueryOffersCallbackInfo, EntitlementRecord,
};
use crate::ffi::{EOS_TRUE, EpicAccountId, HEcom, owned_or_empty};
use crate::model::{CatalogItem, CatalogOffer, Entitlement};
use crate::shim::ArmedCallback;
use crate::wait::{ResultSlot, WaitPolicy};

pub struct Ecom<'a> {
    fns: &'a SdkFns,
    handle: HEcom,
}

impl<'a> Ecom<'a> {
    pub(crate) fn new(fns: &'a SdkFns, handle: HEcom) -> Self {
        Self { fns, handle }
    }

    pub fn is_available(&self) -> bool {
        !self.handle.is_null()
    }

    /// Fetch the account's catalog offers into the SDK-side cache.
    pub fn query_offers(
        &self,
        account: EpicAccountId,
        policy: &WaitPolicy,
    ) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Ecom_QueryOffers";
        let slot = ResultSlot::new(OPERATION);
        let completer = slot.completer();
        let armed = ArmedCallback::new(move |info: &EcomQueryOffersCallbackInfo| {
            completer.complete(info.result_code);
        });

        let options = EcomQueryOffersOptions {
            api_version: ECOM_QUERYOFFERS_API_LATEST,
            local_user_id: account,
            override_catalog_namespace: ptr::null(),
        };

        tracing::trace!("querying offers");
        // SAFETY: options outlive the call; the shim owns the continuation.
        unsafe {
            (self.fns.ecom.query_offers)(self.handle, &options, armed.client_data(), armed.notify())
        };
        armed.commit();
        complete_simple(self.fns, OPERATION, &slot, policy)
    }

    pub fn offer_count(&self, account: EpicAccountId) -> u32 {
        let options = EcomGetOfferCountOptions {
            api_version: ECOM_GETOFFERCOUNT_API_LATEST,
            local_user_id: account,
        };
        // SAFETY: plain counter over the cached query result.
        unsafe { (self.fns.ecom.get_offer_count)(self.handle, &options) }
    }

    pub fn copy_offer(&self, account: EpicAccountId, index: u32) -> Result<CatalogOffer, SdkError> {
        const OPERATION: &str = "EOS_Ecom_CopyOfferByIndex";
        let options = EcomCopyOfferByIndexOptions {
            api_version: ECOM_COPYOFFERBYINDEX_API_LATEST,
            local_user_id: account,
            offer_index: index,
        };
        let mut record: *mut CatalogOfferRecord = ptr::null_mut();

        // SAFETY: out-pointer receives a record owned by the SDK, released
        // below.
        let code = unsafe { (self.fns.ecom.copy_offer_by_index)(self.handle, &options, &mut record) };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }

        // SAFETY: the record is valid until released.
        let offer = unsafe {
            CatalogOffer {
                id: owned_or_empty((*record).id),
                title: owned_or_empty((*record).title_text),
                catalog_namespace: owned_or_empty((*record).catalog_namespace),
                description: owned_or_empty((*record).description_text),
            }
        };
        // SAFETY: record came from the matching copy call.
        unsafe { (self.fns.ecom.catalog_offer_release)(record) };
        Ok(offer)
    }

    pub fn offer_item_count(
        &self,
        account: EpicAccountId,
        offer_id: &str,
    ) -> Result<u32, SdkError> {
        let offer_id = cstring(offer_id, "EOS_Ecom_GetOfferItemCount")?;
        let options = EcomGetOfferItemCountOptions {
            api_version: ECOM_GETOFFERITEMCOUNT_API_LATEST,
            local_user_id: account,
            offer_id: offer_id.as_ptr(),
        };
        // SAFETY: options and the id string outlive the call.
        Ok(unsafe { (self.fns.ecom.get_offer_item_count)(self.handle, &options) })
    }

    pub fn copy_offer_item(
        &self,
        account: EpicAccountId,
        offer_id: &str,
        index: u32,
    ) -> Result<CatalogItem, SdkError> {
        const OPERATION: &str = "EOS_Ecom_CopyOfferItemByIndex";
        let offer_id = cstring(offer_id, OPERATION)?;
        let options = EcomCopyOfferItemByIndexOptions {
            api_version: ECOM_COPYOFFERITEMBYINDEX_API_LATEST,
            local_user_id: account,
            offer_id: offer_id.as_ptr(),
            item_index: index,
        };
        let mut record: *mut CatalogItemRecord = ptr::null_mut();

        // SAFETY: as in copy_offer.
        let code =
            unsafe { (self.fns.ecom.copy_offer_item_by_index)(self.handle, &options, &mut record) };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }

        // SAFETY: the record is valid until released.
        let item = unsafe {
            CatalogItem {
                id: owned_or_empty((*record).id),
                entitlement_name: owned_or_empty((*record).entitlement_name),
                title: owned_or_empty((*record).title_text),
            }
        };
        // SAFETY: record came from the matching copy call.
        unsafe { (self.fns.ecom.catalog_item_release)(record) };
        Ok(item)
    }

    /// Fetch the account's entitlements (including redeemed ones) into the
    /// SDK-side cache.
    pub fn query_entitlements(
        &self,
        account: EpicAccountId,
        policy: &WaitPolicy,
    ) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Ecom_QueryEntitlements";
        let slot = ResultSlot::new(OPERATION);
        let completer = slot.completer();
        let armed = ArmedCallback::new(move |info: &EcomQueryEntitlementsCallbackInfo| {
            completer.complete(info.result_code);
        });

        let options = EcomQueryEntitlementsOptions {
            api_version: ECOM_QUERYENTITLEMENTS_API_LATEST,
            local_user_id: account,
            entitlement_names: ptr::null(),
            entitlement_name_count: 0,
            include_redeemed: EOS_TRUE,
        };

        tracing::trace!("querying entitlements");
        // SAFETY: options outlive the call; the shim owns the continuation.
        unsafe {
            (self.fns.ecom.query_entitlements)(
                self.handle,
                &options,
                armed.client_data(),
                armed.notify(),
            )
        };
        armed.commit();
        complete_simple(self.fns, OPERATION, &slot, policy)
    }

    pub fn entitlements_count(&self, account: EpicAccountId) -> u32 {
        let options = EcomGetEntitlementsCountOptions {
            api_version: ECOM_GETENTITLEMENTSCOUNT_API_LATEST,
            local_user_id: account,
        };
        // SAFETY: plain counter over the cached query result.
        unsafe { (self.fns.ecom.get_entitlements_count)(self.handle, &options) }
    }

    pub fn copy_entitlement(
        &self,
        account: EpicAccountId,
        index: u32,
    ) -> Result<Entitlement, SdkError> {
        const OPERATION: &str = "EOS_Ecom_CopyEntitlementByIndex";
        let options = EcomCopyEntitlementByIndexOptions {
            api_version: ECOM_COPYENTITLEMENTBYINDEX_API_LATEST,
            local_user_id: account,
            entitlement_index: index,
        };
        let mut record: *mut EntitlementRecord = ptr::null_mut();

        // SAFETY: as in copy_offer.
        let code = unsafe {
            (self.fns.ecom.copy_entitlement_by_index)(self.handle, &options, &mut record)
        };
        if !code.is_success() || record.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }

        // SAFETY: the record is valid until released.
        let entitlement = unsafe {
            Entitlement {
                entitlement_name: owned_or_empty((*record).entitlement_name),
                entitlement_id: owned_or_empty((*record).entitlement_id),
                catalog_item_id: owned_or_empty((*record).catalog_item_id),
                redeemed: (*record).redeemed != 0,
                end_timestamp: (*record).end_timestamp,
            }
        };
        // SAFETY: record came from the matching copy call.
        unsafe { (self.fns.ecom.entitlement_release)(record) };
        Ok(entitlement)
    }
}
