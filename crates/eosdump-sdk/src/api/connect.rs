//! Identity-linking (connect) feature group.

use std::ptr;

use eosdump_core::fallback::{FallbackStep, run_with_fallback};

use super::{cstring, finish_fallback};
use crate::bind::SdkFns;
use crate::error::SdkError;
use crate::ffi::options::{
    CONNECT_CREATEUSER_API_LATEST, CONNECT_CREDENTIALS_API_LATEST,
    CONNECT_GETEXTERNALACCOUNTMAPPINGS_API_LATEST, CONNECT_GETPRODUCTUSERIDMAPPING_API_LATEST,
    CONNECT_LOGIN_API_LATEST, ConnectCreateUserOptions, ConnectCredentials,
    ConnectGetExternalAccountMappingsOptions, ConnectGetProductUserIdMappingOptions,
    ConnectLoginOptions,
};
use crate::ffi::records::{ConnectCreateUserCallbackInfo, ConnectLoginCallbackInfo};
use crate::ffi::{
    ContinuanceToken, EosResult, ExternalAccountType, ExternalCredentialType, HConnect,
    ProductUserId,
};
use crate::shim::ArmedCallback;
use crate::wait::{ResultSlot, ValueSlot, WaitPolicy};

/// Continuance tokens cross from the tick thread's callback to the waiting
/// flow.
struct SendToken(ContinuanceToken);

// SAFETY: the token is an opaque value only handed back to the SDK.
unsafe impl Send for SendToken {}

pub struct Connect<'a> {
    fns: &'a SdkFns,
    handle: HConnect,
}

impl<'a> Connect<'a> {
    pub(crate) fn new(fns: &'a SdkFns, handle: HConnect) -> Self {
        Self { fns, handle }
    }

    pub fn is_available(&self) -> bool {
        !self.handle.is_null()
    }

    /// Log the product user in with an auth-token credential, creating the
    /// user first when the backend asks for it via a continuance token.
    ///
    /// Only the login call itself rides the version ladder; the auth token
    /// obtained beforehand is caller state and is never re-derived here.
    pub fn login(&self, access_token: &str, policy: &WaitPolicy) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Connect_Login";
        let token = cstring(access_token, OPERATION)?;

        let outcome = run_with_fallback(CONNECT_LOGIN_API_LATEST, |version| {
            let slot = ResultSlot::new(OPERATION);
            let continuance: ValueSlot<SendToken> = ValueSlot::new();
            let completer = slot.completer();
            let token_out = continuance.clone();
            let armed = ArmedCallback::new(move |info: &ConnectLoginCallbackInfo| {
                if !info.continuance_token.is_null() {
                    token_out.set(SendToken(info.continuance_token));
                }
                completer.complete(info.result_code);
            });

            let credentials = ConnectCredentials {
                api_version: CONNECT_CREDENTIALS_API_LATEST,
                token: token.as_ptr(),
                credential_type: ExternalCredentialType::Epic,
            };
            let options = ConnectLoginOptions {
                api_version: version,
                credentials: &credentials,
                user_login_info: ptr::null(),
            };

            tracing::trace!(version, "connect login");
            // SAFETY: options outlive the call; the shim owns the
            // continuation until the callback fires.
            unsafe {
                (self.fns.connect.login)(self.handle, &options, armed.client_data(), armed.notify())
            };
            armed.commit();

            let code = match slot.wait(policy) {
                Ok(code) => code,
                Err(err) => return FallbackStep::Fail(err),
            };

            // An unknown user plus a continuance token means the product
            // user must be created; that call's outcome replaces the login
            // result.
            let code = if code == EosResult::INVALID_USER {
                match continuance.take() {
                    Some(SendToken(continuance_token)) => {
                        match self.create_user(continuance_token, policy) {
                            Ok(code) => code,
                            Err(err) => return FallbackStep::Fail(err),
                        }
                    }
                    None => code,
                }
            } else {
                code
            };

            if code.is_success() {
                FallbackStep::Done(())
            } else if code.is_incompatible_version() {
                FallbackStep::Incompatible
            } else {
                FallbackStep::Fail(self.fns.operation_failed(OPERATION, code))
            }
        });

        finish_fallback(OPERATION, outcome)
    }

    fn create_user(
        &self,
        continuance_token: ContinuanceToken,
        policy: &WaitPolicy,
    ) -> Result<EosResult, SdkError> {
        const OPERATION: &str = "EOS_Connect_CreateUser";
        let slot = ResultSlot::new(OPERATION);
        let completer = slot.completer();
        let armed = ArmedCallback::new(move |info: &ConnectCreateUserCallbackInfo| {
            completer.complete(info.result_code);
        });

        let options = ConnectCreateUserOptions {
            api_version: CONNECT_CREATEUSER_API_LATEST,
            continuance_token,
        };

        tracing::trace!("connect create user");
        // SAFETY: options outlive the call; the shim owns the continuation
        // until the callback fires.
        unsafe {
            (self.fns.connect.create_user)(
                self.handle,
                &options,
                armed.client_data(),
                armed.notify(),
            )
        };
        armed.commit();
        slot.wait(policy)
    }

    /// Product user id of the `index`-th logged-in user.
    pub fn logged_in_user(&self, index: i32) -> ProductUserId {
        // SAFETY: plain getter on a valid interface handle.
        unsafe { (self.fns.connect.get_logged_in_user_by_index)(self.handle, index) }
    }

    /// External (Epic) account id mapped to `target`, as a string.
    pub fn product_user_id_mapping(&self, target: ProductUserId) -> Result<String, SdkError> {
        const OPERATION: &str = "EOS_Connect_GetProductUserIdMapping";
        const BUFFER_LEN: usize = 512;

        let options = ConnectGetProductUserIdMappingOptions {
            api_version: CONNECT_GETPRODUCTUSERIDMAPPING_API_LATEST,
            local_user_id: self.logged_in_user(0),
            account_id_type: ExternalAccountType::Epic,
            target_product_user_id: target,
        };
        let mut buffer = [0u8; BUFFER_LEN];
        let mut length = BUFFER_LEN as i32;

        // SAFETY: buffer and length describe writable storage of the
        // advertised size.
        let code = unsafe {
            (self.fns.connect.get_product_user_id_mapping)(
                self.handle,
                &options,
                buffer.as_mut_ptr() as *mut _,
                &mut length,
            )
        };
        if code.is_success() && length > 0 {
            Ok(String::from_utf8_lossy(&buffer[..(length - 1) as usize]).into_owned())
        } else {
            Err(self.fns.operation_failed(OPERATION, code))
        }
    }

    /// Product user mapped to an external (Epic) account id.
    pub fn external_account_mapping(&self, external_id: &str) -> Result<ProductUserId, SdkError> {
        const OPERATION: &str = "EOS_Connect_GetExternalAccountMapping";
        let external_id = cstring(external_id, OPERATION)?;
        let options = ConnectGetExternalAccountMappingsOptions {
            api_version: CONNECT_GETEXTERNALACCOUNTMAPPINGS_API_LATEST,
            local_user_id: self.logged_in_user(0),
            account_id_type: ExternalAccountType::Epic,
            target_external_user_id: external_id.as_ptr(),
        };
        // SAFETY: options and the id string outlive the call.
        Ok(unsafe { (self.fns.connect.get_external_account_mapping)(self.handle, &options) })
    }
}
