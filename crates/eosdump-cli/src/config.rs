//! Dumper configuration: `dumper_params.json` plus claims recovered from a
//! game refresh token.
//!
//! The key names (including the historical `EOS_DEPLOYEMENT_ID` spelling)
//! match the parameter files this tool has always consumed.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::CliError;
use crate::store;

/// Raw parameter file; everything optional until [`DumperParams::finalize`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DumperParams {
    #[serde(rename = "EOS_PRODUCT_NAME")]
    pub product_name: Option<String>,
    #[serde(rename = "EOS_PRODUCT_VERSION")]
    pub product_version: Option<String>,
    #[serde(rename = "EOS_DEPLOYEMENT_ID")]
    pub deployment_id: Option<String>,
    #[serde(rename = "EOS_PRODUCT_ID")]
    pub product_id: Option<String>,
    #[serde(rename = "EOS_SANDBOX_ID")]
    pub sandbox_id: Option<String>,
    #[serde(rename = "EOS_AUDIENCE")]
    pub audience: Option<String>,
    #[serde(rename = "EOS_SECRET_KEY")]
    pub secret_key: Option<String>,
    #[serde(rename = "EOS_ENCRYPTIONKEY")]
    pub encryption_key: Option<String>,
    #[serde(rename = "EOS_LOCALE")]
    pub locale: Option<String>,
}

/// Fully validated configuration.
#[derive(Debug, Clone)]
pub struct ResolvedParams {
    pub product_name: String,
    pub product_version: String,
    pub deployment_id: String,
    pub product_id: String,
    pub sandbox_id: String,
    pub audience: String,
    pub secret_key: String,
    pub encryption_key: Option<String>,
    pub locale: String,
}

impl DumperParams {
    /// Load the parameter file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let value = store::load_json(path)?;
        serde_json::from_value(value).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay identifiers recovered from a refresh-token JWT payload. A
    /// token minted for the title is more authoritative than the static
    /// parameter file.
    pub fn merge_jwt_claims(&mut self, claims: &Value) {
        if let Some(deployment_id) = claims.get("pfdid").and_then(Value::as_str) {
            self.deployment_id = Some(deployment_id.to_owned());
        }
        if let Some(product_id) = claims.get("pfpid").and_then(Value::as_str) {
            self.product_id = Some(product_id.to_owned());
        }
        if let Some(sandbox_id) = claims.get("pfsid").and_then(Value::as_str) {
            self.sandbox_id = Some(sandbox_id.to_owned());
        }
        if let Some(audience) = claims.get("aud").and_then(Value::as_str) {
            self.audience = Some(audience.to_owned());
        }
    }

    /// Validate and apply defaults. Every missing required field is fatal
    /// and reported by name.
    pub fn finalize(self) -> Result<ResolvedParams, CliError> {
        fn required(
            value: Option<String>,
            name: &'static str,
        ) -> Result<String, CliError> {
            match value {
                Some(value) if !value.is_empty() => Ok(value),
                _ => Err(CliError::MissingParam { name }),
            }
        }

        Ok(ResolvedParams {
            product_name: self
                .product_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unreal".to_owned()),
            product_version: self
                .product_version
                .filter(|version| !version.is_empty())
                .unwrap_or_else(|| "1.0.0".to_owned()),
            deployment_id: required(self.deployment_id, "deployment_id")?,
            product_id: required(self.product_id, "product_id")?,
            sandbox_id: required(self.sandbox_id, "sandbox_id")?,
            audience: required(self.audience, "audience")?,
            secret_key: required(self.secret_key, "secret_key")?,
            encryption_key: self.encryption_key.filter(|key| !key.is_empty()),
            locale: self
                .locale
                .filter(|locale| !locale.is_empty())
                .unwrap_or_else(|| "en".to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn complete_params() -> DumperParams {
        serde_json::from_value(json!({
            "EOS_DEPLOYEMENT_ID": "dep",
            "EOS_PRODUCT_ID": "prod",
            "EOS_SANDBOX_ID": "sandbox",
            "EOS_AUDIENCE": "client",
            "EOS_SECRET_KEY": "secret",
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let params = complete_params().finalize().unwrap();
        assert_eq!(params.product_name, "Unreal");
        assert_eq!(params.product_version, "1.0.0");
        assert_eq!(params.locale, "en");
        assert!(params.encryption_key.is_none());
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let mut params = complete_params();
        params.secret_key = None;
        let err = params.finalize().unwrap_err();
        assert!(matches!(err, CliError::MissingParam { name: "secret_key" }));
    }

    #[test]
    fn test_empty_required_field_is_missing() {
        let mut params = complete_params();
        params.sandbox_id = Some(String::new());
        let err = params.finalize().unwrap_err();
        assert!(matches!(err, CliError::MissingParam { name: "sandbox_id" }));
    }

    #[test]
    fn test_jwt_claims_override_params() {
        let mut params = complete_params();
        params.merge_jwt_claims(&json!({
            "pfdid": "jwt-dep",
            "pfpid": "jwt-prod",
            "pfsid": "jwt-sandbox",
            "aud": "jwt-client",
            "other": 1,
        }));
        let params = params.finalize().unwrap();
        assert_eq!(params.deployment_id, "jwt-dep");
        assert_eq!(params.product_id, "jwt-prod");
        assert_eq!(params.sandbox_id, "jwt-sandbox");
        assert_eq!(params.audience, "jwt-client");
        // Claims never carry the secret.
        assert_eq!(params.secret_key, "secret");
    }
}
