//! Authentication feature group.

use std::ptr;

use eosdump_core::fallback::run_with_fallback;

use super::{classify_completion, cstring, finish_fallback};
use crate::bind::SdkFns;
use crate::error::SdkError;
use crate::ffi::options::{
    AUTH_COPYUSERAUTHTOKEN_API_LATEST, AUTH_LOGIN_API_LATEST, AuthCopyUserAuthTokenOptions,
    AuthCredentials, AuthLoginOptions,
};
use crate::ffi::records::{AuthLoginCallbackInfo, AuthToken};
use crate::ffi::{
    AuthScopeFlags, EpicAccountId, ExternalCredentialType, HAuth, LoginCredentialType,
    owned_or_empty,
};
use crate::model::UserAuthToken;
use crate::shim::ArmedCallback;
use crate::wait::{ResultSlot, WaitPolicy};

pub struct Auth<'a> {
    fns: &'a SdkFns,
    handle: HAuth,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(fns: &'a SdkFns, handle: HAuth) -> Self {
        Self { fns, handle }
    }

    pub fn is_available(&self) -> bool {
        !self.handle.is_null()
    }

    /// Log in with an Epic credential, walking the version ladder on a
    /// version-incompatible result. Blocks until the completion callback
    /// fires.
    pub fn login(
        &self,
        credential: &str,
        credential_type: LoginCredentialType,
        policy: &WaitPolicy,
    ) -> Result<(), SdkError> {
        const OPERATION: &str = "EOS_Auth_Login";
        let token = cstring(credential, OPERATION)?;

        let outcome = run_with_fallback(AUTH_LOGIN_API_LATEST, |version| {
            let slot = ResultSlot::new(OPERATION);
            let completer = slot.completer();
            let armed = ArmedCallback::new(move |info: &AuthLoginCallbackInfo| {
                completer.complete(info.result_code);
            });

            let credentials = AuthCredentials {
                api_version: version,
                id: ptr::null(),
                token: token.as_ptr(),
                credential_type,
                system_auth_credentials_options: ptr::null_mut(),
                external_type: ExternalCredentialType::Epic,
            };
            let options = AuthLoginOptions {
                api_version: version,
                credentials: &credentials,
                scope_flags: AuthScopeFlags::NO_FLAGS,
            };

            tracing::trace!(version, "auth login");
            // SAFETY: options and credentials outlive the call; the shim
            // owns the continuation until the callback fires.
            unsafe {
                (self.fns.auth.login)(self.handle, &options, armed.client_data(), armed.notify())
            };
            armed.commit();
            classify_completion(self.fns, OPERATION, slot.wait(policy))
        });

        finish_fallback(OPERATION, outcome).map(|_| ())
    }

    /// Account id of the `index`-th logged-in user.
    pub fn logged_in_account(&self, index: i32) -> EpicAccountId {
        // SAFETY: plain getter on a valid interface handle.
        unsafe { (self.fns.auth.get_logged_in_account_by_index)(self.handle, index) }
    }

    /// Copy the logged-in user's auth token (access + refresh strings).
    pub fn copy_user_auth_token(&self) -> Result<UserAuthToken, SdkError> {
        const OPERATION: &str = "EOS_Auth_CopyUserAuthToken";
        let options = AuthCopyUserAuthTokenOptions {
            api_version: AUTH_COPYUSERAUTHTOKEN_API_LATEST,
        };
        let account = self.logged_in_account(0);
        let mut token: *mut AuthToken = ptr::null_mut();

        // SAFETY: out-pointer receives a record owned by the SDK, released
        // below.
        let code = unsafe {
            (self.fns.auth.copy_user_auth_token)(self.handle, &options, account, &mut token)
        };
        if !code.is_success() || token.is_null() {
            return Err(self.fns.operation_failed(OPERATION, code));
        }

        // SAFETY: the record is valid until released.
        let copied = unsafe {
            UserAuthToken {
                access_token: owned_or_empty((*token).access_token),
                refresh_token: owned_or_empty((*token).refresh_token),
            }
        };
        if let Some(release) = self.fns.auth.token_release {
            // SAFETY: record came from the matching copy call.
            unsafe { release(token) };
        }
        Ok(copied)
    }
}
